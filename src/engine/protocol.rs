use crate::engine::llm_client::BackendSettings;
use crate::model::action::ParsedAction;
use crate::model::message::Message;

pub enum EngineCommand {
    SubmitPlayerInput(String),

    /// Run the action parser directly on operator-supplied text.
    TestParser(String),

    TestConnection,
    UpdateBackend(BackendSettings),
}

pub enum EngineResponse {
    FullMessageHistory(Vec<Message>),

    /// Actions recovered from the latest narration, in narration order.
    ActionsParsed(Vec<ParsedAction>),

    /// One-line status for the UI status bar.
    Status(String),
}
