use crate::domain::PriceRecord;

/// Where the controller publishes view state. Implementations only store or
/// display what they are given.
pub trait PresentationSink {
    /// A search is starting: reset the stopwatch display, show indeterminate progress.
    fn before_loading(&mut self);
    /// A search has ended, whatever the outcome. Called exactly once per session.
    fn after_loading(&mut self, identifier: &str, elapsed_ms: u128);
    fn show_results(&mut self, records: Vec<PriceRecord>);
    fn show_error(&mut self, message: &str);
    /// Non-error status text, e.g. the cancellation notice.
    fn show_notice(&mut self, message: &str);
    fn set_button_label(&mut self, text: &str);
    fn set_progress_visible(&mut self, visible: bool);
}
