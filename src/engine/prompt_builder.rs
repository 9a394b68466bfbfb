use crate::engine::llm_client::ChatMessage;
use crate::model::message::Message;

/// How many transcript messages are replayed to the model on each turn.
const HISTORY_WINDOW: usize = 20;

/// Builds the message list sent to the LLM.
/// This struct is intentionally dumb: it only formats text.
/// No parsing, no networking, no engine logic.
pub struct PromptBuilder;

impl PromptBuilder {
    pub fn build(history: &[Message], player_input: &str) -> Vec<ChatMessage> {
        let mut messages = Vec::new();

        messages.push(ChatMessage::system(system_prompt()));
        push_history(&mut messages, history);
        messages.push(ChatMessage::user(player_input.to_string()));

        messages
    }
}

fn system_prompt() -> String {
    let mut prompt = String::new();

    push_role_section(&mut prompt);
    push_format_section(&mut prompt);

    prompt
}

fn push_role_section(prompt: &mut String) {
    prompt.push_str(
        "You are a dungeon master for a text adventure game. \
         Narrate the world and the consequences of the player's actions. \
         Keep responses concise and engaging (under 50 words).\n\n",
    );
}

fn push_format_section(prompt: &mut String) {
    prompt.push_str(
        "When something happens in the world, put each concrete action on its \
         own line in one of these forms:\n\
         [attack the goblin]\n\
         *move to the door*\n\
         Action: open the chest\n\
         Narration may surround these lines freely.\n",
    );
}

fn push_history(messages: &mut Vec<ChatMessage>, history: &[Message]) {
    let start = history.len().saturating_sub(HISTORY_WINDOW);

    for msg in &history[start..] {
        match msg {
            Message::Player(text) => messages.push(ChatMessage::user(text.clone())),
            Message::DungeonMaster(text) => {
                messages.push(ChatMessage::assistant(text.clone()))
            }
            // Local status chatter never goes to the model.
            Message::System(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_prompt_comes_first() {
        let messages = PromptBuilder::build(&[], "look around");
        assert_eq!(messages[0].role, "system");
        assert!(messages[0].content.contains("dungeon master"));
        assert_eq!(messages.last().unwrap().role, "user");
        assert_eq!(messages.last().unwrap().content, "look around");
    }

    #[test]
    fn test_history_is_replayed_without_system_messages() {
        let history = vec![
            Message::Player("hello".into()),
            Message::System("connected".into()),
            Message::DungeonMaster("You stand in a cave.".into()),
        ];

        let messages = PromptBuilder::build(&history, "go north");
        let roles: Vec<&str> = messages.iter().map(|m| m.role.as_str()).collect();
        assert_eq!(roles, vec!["system", "user", "assistant", "user"]);
    }

    #[test]
    fn test_history_window_is_bounded() {
        let history: Vec<Message> = (0..100)
            .map(|i| Message::Player(format!("turn {i}")))
            .collect();

        let messages = PromptBuilder::build(&history, "again");
        // system + window + current input
        assert_eq!(messages.len(), 1 + HISTORY_WINDOW + 1);
        assert_eq!(messages[1].content, "turn 80");
    }
}
