use std::sync::mpsc::{Receiver, Sender};

use tracing::{debug, error, info};

use crate::engine::action_parser::ActionParser;
use crate::engine::llm_client::{BackendSettings, LlmClient};
use crate::engine::prompt_builder::PromptBuilder;
use crate::engine::protocol::{EngineCommand, EngineResponse};
use crate::model::message::Message;

/// Owns the transcript, the LLM client and the action parser.
/// Runs on its own thread; the UI talks to it over the two channels.
pub struct Engine {
    rx: Receiver<EngineCommand>,
    tx: Sender<EngineResponse>,
    messages: Vec<Message>,
    parser: ActionParser,
    llm: LlmClient,
}

impl Engine {
    pub fn new(
        rx: Receiver<EngineCommand>,
        tx: Sender<EngineResponse>,
        backend: BackendSettings,
    ) -> Self {
        Self {
            rx,
            tx,
            messages: Vec::new(),
            parser: ActionParser::new(),
            llm: LlmClient::new(backend),
        }
    }

    pub fn run(&mut self) {
        while let Ok(cmd) = self.rx.recv() {
            match cmd {
                EngineCommand::SubmitPlayerInput(text) => self.handle_player_input(text),
                EngineCommand::TestParser(text) => self.handle_test_parser(&text),
                EngineCommand::TestConnection => self.handle_test_connection(),
                EngineCommand::UpdateBackend(settings) => {
                    self.llm.set_settings(settings);
                    let _ = self.tx.send(EngineResponse::Status(
                        "Backend settings applied".to_string(),
                    ));
                }
            }
        }
    }

    fn handle_player_input(&mut self, text: String) {
        info!(chars = text.len(), "player input");

        let prompt = PromptBuilder::build(&self.messages, &text);
        self.messages.push(Message::Player(text));
        let _ = self
            .tx
            .send(EngineResponse::FullMessageHistory(self.messages.clone()));

        match self.llm.chat(prompt) {
            Ok(reply) => {
                info!(chars = reply.len(), "narrator reply received");
                self.messages.push(Message::DungeonMaster(reply.clone()));

                let actions = self.parser.parse_with(&reply, |action| {
                    debug!(
                        action_type = action.action_type.label(),
                        command = %action.command,
                        target = %action.target,
                        "parsed action"
                    );
                });

                let _ = self
                    .tx
                    .send(EngineResponse::FullMessageHistory(self.messages.clone()));
                let _ = self.tx.send(EngineResponse::ActionsParsed(actions));
            }
            Err(e) => {
                error!("LLM request failed: {e:#}");
                self.messages
                    .push(Message::System(format!("LLM error: {e:#}")));
                let _ = self
                    .tx
                    .send(EngineResponse::FullMessageHistory(self.messages.clone()));
            }
        }
    }

    fn handle_test_parser(&mut self, text: &str) {
        let actions = self.parser.parse(text);
        let _ = self.tx.send(EngineResponse::Status(format!(
            "Parser produced {} action(s)",
            actions.len()
        )));
        let _ = self.tx.send(EngineResponse::ActionsParsed(actions));
    }

    fn handle_test_connection(&mut self) {
        let status = match self.llm.test_connection() {
            Ok(msg) => msg,
            Err(e) => format!("Connection failed: {e:#}"),
        };
        let _ = self.tx.send(EngineResponse::Status(status));
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use super::*;
    use crate::model::action::ActionType;

    #[test]
    fn test_parser_test_command_round_trip() {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, resp_rx) = mpsc::channel();

        cmd_tx
            .send(EngineCommand::TestParser("[attack orc]".to_string()))
            .unwrap();
        drop(cmd_tx);

        let mut engine = Engine::new(cmd_rx, resp_tx, BackendSettings::default());
        engine.run();
        drop(engine);

        let responses: Vec<EngineResponse> = resp_rx.iter().collect();
        assert_eq!(responses.len(), 2);

        match &responses[1] {
            EngineResponse::ActionsParsed(actions) => {
                assert_eq!(actions.len(), 1);
                assert_eq!(actions[0].action_type, ActionType::Attack);
                assert_eq!(actions[0].target, "orc");
            }
            _ => panic!("expected ActionsParsed"),
        }
    }
}
