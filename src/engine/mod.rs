pub mod cancellation;
pub mod controller;
pub mod messages;
pub mod session;
pub mod sink;

// Re-export key components
pub use cancellation::{CancellationSource, CancellationToken};
pub use controller::{ControllerState, SearchController};
pub use messages::{FetchCompletion, SearchError, SessionId};
pub use session::{SearchSession, SessionStatus};
pub use sink::PresentationSink;
