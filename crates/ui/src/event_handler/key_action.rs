/// Actions that can be triggered by key events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// User submitted a question
    SendMessage { message: String },
    /// Clear chat history (sidebar option)
    ClearHistory,
    ScrollUp,
    ScrollDown,
    ToggleSidebar,
    Exit,
}
