//! The action vocabulary the UI can dispatch.
//!
//! Embedders that speak the string protocol (`"copy_selection"`,
//! `"insert_result"`, ...) go through [`Action::parse`]; everything
//! downstream is typed.

/// One user-initiated action. Routing is terminal: each action triggers
/// exactly one effect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Copy the current selection to the clipboard.
    CopySelection,
    /// Analyze the currently hovered image.
    ImageAnalyze,
    /// Open the ask window seeded with the selection.
    Ask,
    Translate,
    Explain,
    Summarize,
    /// Grammar fix; requires the selection to have an editable origin.
    Grammar,
    /// Insert the result text at the captured source.
    InsertResult(String),
    /// Replace the captured span with the result text.
    ReplaceResult(String),
    /// Submit the user-entered question.
    SubmitAsk(String),
    RetryAsk,
    CancelAsk,
    ContinueChat,
}

impl Action {
    /// Decode an `(action id, payload)` pair. Returns `None` for unknown
    /// ids and for payload-carrying actions with no payload.
    pub fn parse(id: &str, payload: Option<&str>) -> Option<Action> {
        let action = match id {
            "copy_selection" => Action::CopySelection,
            "image_analyze" => Action::ImageAnalyze,
            "ask" => Action::Ask,
            "translate" => Action::Translate,
            "explain" => Action::Explain,
            "summarize" => Action::Summarize,
            "grammar" => Action::Grammar,
            "insert_result" => Action::InsertResult(payload?.to_string()),
            "replace_result" => Action::ReplaceResult(payload?.to_string()),
            "submit_ask" => Action::SubmitAsk(payload?.to_string()),
            "retry_ask" => Action::RetryAsk,
            "cancel_ask" => Action::CancelAsk,
            "continue_chat" => Action::ContinueChat,
            _ => return None,
        };
        Some(action)
    }
}
