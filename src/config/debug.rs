//! Debugging feature flags.
//!
//! Toggle individual diagnostics here; keep the noisy ones `false` by default so
//! debug builds stay readable. Release builds never consult these flags.

pub struct DebugFlags {
    /// Emit session lifecycle transitions (start, cancel, terminal outcome, release).
    pub print_session_lifecycle: bool,
    /// Emit per-symbol progress from the fetch services.
    pub print_fetch_progress: bool,
    /// Emit UI interaction logs (button presses, Enter in the identifier box).
    pub print_ui_interactions: bool,
    /// Emit details of UI state serialization/deserialization.
    pub print_state_serde: bool,
    /// Emit shutdown app messages.
    pub print_shutdown: bool,
}

pub const DEBUG_FLAGS: DebugFlags = DebugFlags {
    print_session_lifecycle: true,
    print_fetch_progress: false,
    print_ui_interactions: true,
    print_state_serde: false,
    print_shutdown: false,
};
