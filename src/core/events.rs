//! Application event definitions

use std::path::PathBuf;
use tokio::sync::mpsc;

/// Sender half of the application event channel
pub type EventSender = mpsc::UnboundedSender<AppEvent>;

/// Receiver half of the application event channel
pub type EventReceiver = mpsc::UnboundedReceiver<AppEvent>;

/// Events delivered to the application loop
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The host asked for a document to be opened
    OpenFile(PathBuf),

    /// Keystrokes typed by the user
    Input(Vec<u8>),

    /// Output read from the shell (raw bytes)
    PtyOutput(Vec<u8>),

    /// The shell exited
    ChildExited(Option<u32>),

    /// The host terminal changed size
    Resize { rows: u16, cols: u16 },

    /// Time to end a visual bell flash
    FlashEnd,
}

/// Create the application event channel
pub fn channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}
