//! Turns the narrator's free-form text into structured [`ParsedAction`]s.
//!
//! The pipeline is pure and synchronous: split the text into candidate
//! commands, clean each one up, classify it against the keyword table, and
//! pull out parameters and a target. Every function is total over strings;
//! unrecognizable input degrades to a single `Unknown` record instead of
//! failing.

use crate::engine::action_keywords::KeywordTable;
use crate::model::action::{ActionType, ParsedAction};

/// Words never emitted as parameters on their own (articles, copulas).
const STOPLIST: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "is", "are", "was", "were", "be", "been",
];

/// Prepositions whose following word is treated as a parameter.
const PREPOSITIONS: &[&str] = &["to", "at", "with", "on", "in", "using"];

/// Nouns that make the word after a determiner count as a target.
const TARGET_HINTS: &[&str] = &[
    "door", "chest", "enemy", "monster", "item", "npc", "lever", "button",
];

/// Verbs whose direct object is the target.
const ATTACK_VERBS: &[&str] = &["attack", "hit", "strike"];

const DETERMINERS: &[&str] = &["the", "a", "an"];

/// Marker rules tried against each line, in priority order. The first rule
/// that applies wins; a line yields at most one candidate command.
const MARKERS: &[fn(&str) -> Option<String>] = &[
    bracketed_command,
    asterisked_command,
    action_prefixed_command,
    you_prefixed_command,
];

pub struct ActionParser {
    keywords: KeywordTable,
}

impl ActionParser {
    pub fn new() -> Self {
        Self {
            keywords: KeywordTable::new(),
        }
    }

    /// Parse a whole narration into action records.
    ///
    /// `on_action` is invoked once per record, in order, before the next
    /// command is processed. Empty (or whitespace-only) input produces no
    /// records and no callbacks.
    pub fn parse_with<F>(&self, text: &str, mut on_action: F) -> Vec<ParsedAction>
    where
        F: FnMut(&ParsedAction),
    {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let mut actions = Vec::new();

        for raw in self.extract_commands(text) {
            let command = normalize_command(&raw);
            let action = ParsedAction {
                action_type: self.classify(&command),
                parameters: extract_parameters(&command),
                target: extract_target(&command),
                command,
                description: text.to_string(),
            };

            on_action(&action);
            actions.push(action);
        }

        actions
    }

    pub fn parse(&self, text: &str) -> Vec<ParsedAction> {
        self.parse_with(text, |_| {})
    }

    /// Split the narration into raw candidate commands, one per line at most.
    ///
    /// Lines without an explicit marker still count when they are longer than
    /// three characters and mention a known action word. If nothing at all is
    /// found, the whole trimmed text becomes the single candidate, so
    /// non-empty input never extracts to nothing.
    pub fn extract_commands(&self, text: &str) -> Vec<String> {
        let mut commands = Vec::new();

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            if let Some(command) = MARKERS.iter().find_map(|rule| rule(line)) {
                commands.push(command);
                continue;
            }

            if line.len() > 3 && self.keywords.contains_any_keyword(&line.to_lowercase()) {
                commands.push(line.to_string());
            }
        }

        if commands.is_empty() {
            commands.push(text.trim().to_string());
        }

        commands
    }

    /// Map a cleaned command to its action type: first keyword set with a
    /// case-insensitive substring hit wins, in table order; otherwise
    /// `Unknown`.
    pub fn classify(&self, command: &str) -> ActionType {
        let lower = command.to_lowercase();

        for (action_type, keywords) in self.keywords.iter() {
            if keywords.iter().any(|k| lower.contains(k)) {
                return action_type;
            }
        }

        ActionType::Unknown
    }
}

impl Default for ActionParser {
    fn default() -> Self {
        Self::new()
    }
}

/// `[command]`: the span between the first `[` and the `]` after it.
fn bracketed_command(line: &str) -> Option<String> {
    let rest = line.strip_prefix('[')?;
    let end = rest.find(']')?;
    if end == 0 {
        return None;
    }
    Some(rest[..end].to_string())
}

/// `*command*`: strip one asterisk from each side.
fn asterisked_command(line: &str) -> Option<String> {
    if line.len() > 2 && line.starts_with('*') && line.ends_with('*') {
        Some(line[1..line.len() - 1].to_string())
    } else {
        None
    }
}

/// `Action: command`
fn action_prefixed_command(line: &str) -> Option<String> {
    line.strip_prefix("Action:")
        .map(|rest| rest.trim().to_string())
}

/// `You command.` with one trailing period coming off here; the rest of the
/// cleanup happens in [`normalize_command`].
fn you_prefixed_command(line: &str) -> Option<String> {
    let rest = line.strip_prefix("You ")?.trim();
    Some(rest.strip_suffix('.').unwrap_or(rest).to_string())
}

/// Clean a raw candidate command: trim, strip a leading `Player ` (checked
/// first) or `You `, drop any run of trailing `.`/`!`/`?`, trim again.
pub fn normalize_command(raw: &str) -> String {
    let mut cleaned = raw.trim();

    if let Some(rest) = cleaned.strip_prefix("Player ") {
        cleaned = rest;
    } else if let Some(rest) = cleaned.strip_prefix("You ") {
        cleaned = rest;
    }

    cleaned.trim_end_matches(['.', '!', '?']).trim().to_string()
}

/// Pull auxiliary tokens out of a command, left to right.
///
/// Three independent rules fire per token: the word after a preposition
/// (skipping a single stoplisted word), any all-digit token, and quoted
/// spans. Emitted parameters keep their original casing and quotes; nothing
/// is deduplicated.
pub fn extract_parameters(command: &str) -> Vec<String> {
    let words: Vec<&str> = command.split_whitespace().collect();
    let mut parameters = Vec::new();

    let mut i = 0;
    while i < words.len() {
        let lower = words[i].to_lowercase();

        if PREPOSITIONS.contains(&lower.as_str()) {
            if let Some(next) = words.get(i + 1) {
                if !STOPLIST.contains(&next.to_lowercase().as_str()) {
                    parameters.push((*next).to_string());
                } else if let Some(after) = words.get(i + 2) {
                    // "to the door" keeps "door"
                    parameters.push((*after).to_string());
                }
            }
        }

        if !lower.is_empty() && lower.chars().all(|c| c.is_ascii_digit()) {
            parameters.push(words[i].to_string());
        }

        if lower.starts_with('"') || lower.starts_with('\'') {
            let mut span = words[i].to_string();
            while i + 1 < words.len() && !span.ends_with('"') && !span.ends_with('\'') {
                i += 1;
                span.push(' ');
                span.push_str(words[i]);
            }
            parameters.push(span);
        }

        i += 1;
    }

    parameters
}

/// Resolve the object of a command, or return an empty string.
///
/// One left-to-right scan interleaves both rules, so whichever triggers at
/// the earliest token wins; the determiner rule is not given a full pass of
/// its own. Only when the scan finds nothing does the last-word fallback
/// apply.
pub fn extract_target(command: &str) -> String {
    let words: Vec<&str> = command.split_whitespace().collect();

    for (i, word) in words.iter().enumerate() {
        let lower = word.to_lowercase();

        if DETERMINERS.contains(&lower.as_str()) {
            if let Some(next) = words.get(i + 1) {
                let next_lower = next.to_lowercase();
                if TARGET_HINTS.iter().any(|hint| next_lower.contains(hint)) {
                    return (*next).to_string();
                }
            }
        }

        if ATTACK_VERBS.contains(&lower.as_str()) {
            if let Some(next) = words.get(i + 1) {
                return (*next).to_string();
            }
        }
    }

    // Last word is often the object, unless it reads like an adverb/gerund.
    if words.len() > 1 {
        let last = words[words.len() - 1];
        let last_lower = last.to_lowercase();
        if !last_lower.contains("ly") && !last_lower.contains("ing") {
            return last.to_string();
        }
    }

    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_empty_input() {
        let parser = ActionParser::new();
        let mut calls = 0;
        let actions = parser.parse_with("", |_| calls += 1);
        assert!(actions.is_empty());
        assert_eq!(calls, 0);

        let actions = parser.parse_with("   \n\t  ", |_| calls += 1);
        assert!(actions.is_empty());
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_parse_nonempty_input_never_empty() {
        let parser = ActionParser::new();
        let actions = parser.parse("zzz qqq xyzzy");
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].action_type, ActionType::Unknown);
        assert_eq!(actions[0].command, "zzz qqq xyzzy");
    }

    #[test]
    fn test_bracketed_command() {
        let parser = ActionParser::new();
        let actions = parser.parse("[attack orc]");
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].command, "attack orc");
        assert_eq!(actions[0].action_type, ActionType::Attack);
        assert_eq!(actions[0].target, "orc");
        assert_eq!(actions[0].description, "[attack orc]");
    }

    #[test]
    fn test_bracketed_needs_nonempty_span() {
        let parser = ActionParser::new();
        // "[]" has no span, so the line falls through to the whole-text
        // fallback instead of the bracket marker.
        let commands = parser.extract_commands("[]");
        assert_eq!(commands, vec!["[]".to_string()]);
    }

    #[test]
    fn test_bracketed_stops_at_first_close() {
        assert_eq!(
            bracketed_command("[open the chest] and [run]"),
            Some("open the chest".to_string())
        );
    }

    #[test]
    fn test_asterisked_command() {
        let parser = ActionParser::new();
        let actions = parser.parse("*look around*");
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].command, "look around");
        assert_eq!(actions[0].action_type, ActionType::Look);
    }

    #[test]
    fn test_lone_asterisk_is_not_a_marker() {
        assert_eq!(asterisked_command("*"), None);
        assert_eq!(asterisked_command("**"), None);
        assert_eq!(asterisked_command("*a*"), Some("a".to_string()));
    }

    #[test]
    fn test_action_prefix() {
        let parser = ActionParser::new();
        let actions = parser.parse("Action: cast spell at enemy");
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].command, "cast spell at enemy");
        assert_eq!(actions[0].action_type, ActionType::Cast);
        assert!(actions[0].parameters.contains(&"enemy".to_string()));
    }

    #[test]
    fn test_fire_keyword_outranks_cast() {
        // "fireball" contains "fire", which sits in the attack set, and the
        // attack set is checked before the cast set.
        let parser = ActionParser::new();
        let actions = parser.parse("Action: cast fireball at enemy");
        assert_eq!(actions[0].command, "cast fireball at enemy");
        assert_eq!(actions[0].action_type, ActionType::Attack);
        assert!(actions[0].parameters.contains(&"enemy".to_string()));
    }

    #[test]
    fn test_you_prefix() {
        let parser = ActionParser::new();
        let actions = parser.parse("You move to the door.");
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].command, "move to the door");
        assert_eq!(actions[0].action_type, ActionType::Move);
        assert_eq!(actions[0].target, "door");
        assert_eq!(actions[0].parameters, vec!["door".to_string()]);
    }

    #[test]
    fn test_keyword_fallback_line() {
        let parser = ActionParser::new();
        let actions = parser.parse("look around the room");
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].action_type, ActionType::Look);
    }

    #[test]
    fn test_short_line_skips_keyword_fallback() {
        let parser = ActionParser::new();
        // "go" is a keyword but the line is too short for the fallback rule,
        // so the whole-text fallback picks it up instead.
        let commands = parser.extract_commands("go");
        assert_eq!(commands, vec!["go".to_string()]);
    }

    #[test]
    fn test_multiline_order_preserved() {
        let parser = ActionParser::new();
        let text = "The goblin charges at you.\n[move north]\nYou draw your sword.\n*attack the goblin*";
        let actions = parser.parse(text);
        let commands: Vec<&str> = actions.iter().map(|a| a.command.as_str()).collect();
        assert_eq!(
            commands,
            vec![
                "The goblin charges at you",
                "move north",
                "draw your sword",
                "attack the goblin",
            ]
        );
        for action in &actions {
            assert_eq!(action.description, text);
        }
    }

    #[test]
    fn test_observer_called_per_record_in_order() {
        let parser = ActionParser::new();
        let mut seen = Vec::new();
        let actions = parser.parse_with("[move north]\n[attack orc]", |a| {
            seen.push(a.command.clone());
        });
        assert_eq!(seen, vec!["move north".to_string(), "attack orc".to_string()]);
        assert_eq!(actions.len(), seen.len());
    }

    #[test]
    fn test_normalize_strips_prefixes_and_punctuation() {
        assert_eq!(normalize_command("  You go north!!!  "), "go north");
        assert_eq!(normalize_command("Player attack the orc."), "attack the orc");
        assert_eq!(normalize_command("wait?!"), "wait");
        assert_eq!(normalize_command("look"), "look");
        assert_eq!(normalize_command(""), "");
    }

    #[test]
    fn test_classify_first_match_wins() {
        let parser = ActionParser::new();
        // "run" (move set) and "fight" (attack set) both match; the move set
        // is checked first.
        assert_eq!(parser.classify("fight or run"), ActionType::Move);
        // "use" lives in the interact set before the use-item set.
        assert_eq!(parser.classify("use the lever"), ActionType::Interact);
        // Substring matching: "using" contains "use".
        assert_eq!(parser.classify("using the key"), ActionType::Interact);
        assert_eq!(parser.classify("qqq zzz"), ActionType::Unknown);
        assert_eq!(parser.classify(""), ActionType::Unknown);
    }

    #[test]
    fn test_parameters_preposition_rule() {
        assert_eq!(extract_parameters("cast spell at enemy"), vec!["enemy"]);
        // A single stoplisted word after the preposition is skipped.
        assert_eq!(extract_parameters("move to the door"), vec!["door"]);
        // Preposition at the end of the command emits nothing.
        assert!(extract_parameters("come to").is_empty());
    }

    #[test]
    fn test_parameters_numeric_rule() {
        assert_eq!(extract_parameters("wait 5 turns"), vec!["5"]);
        assert_eq!(
            extract_parameters("give 3 coins to the merchant"),
            vec!["3", "merchant"]
        );
        // "3rd" is not all digits.
        assert!(extract_parameters("take 3rd exit").is_empty());
    }

    #[test]
    fn test_parameters_quoted_span() {
        assert_eq!(
            extract_parameters("say \"hello there\" to the guard"),
            vec!["\"hello there\"", "guard"]
        );
        // Unterminated quotes run to the end of the command.
        assert_eq!(extract_parameters("shout 'hello"), vec!["'hello"]);
    }

    #[test]
    fn test_parameters_keep_duplicates_and_order() {
        assert_eq!(
            extract_parameters("move 2 to room 2"),
            vec!["2", "room", "2"]
        );
    }

    #[test]
    fn test_target_attack_verb_rule() {
        assert_eq!(extract_target("attack orc"), "orc");
        assert_eq!(extract_target("hit rat with club"), "rat");
        // The rule takes the very next word, determiner or not.
        assert_eq!(extract_target("strike the skeleton"), "the");
        // No word after the verb, single-token fallback yields nothing.
        assert_eq!(extract_target("attack"), "");
    }

    #[test]
    fn test_target_determiner_rule() {
        assert_eq!(extract_target("open the door"), "door");
        assert_eq!(extract_target("examine a chest"), "chest");
        // The hint match is substring-based.
        assert_eq!(extract_target("pull the doorknob"), "doorknob");
    }

    #[test]
    fn test_target_rules_interleave_by_position() {
        // The determiner rule triggers at token 1, before the attack verb at
        // token 4 is ever reached.
        assert_eq!(extract_target("open the door and attack goblin"), "door");
        // Here the attack verb comes first.
        assert_eq!(extract_target("attack goblin near the door"), "goblin");
    }

    #[test]
    fn test_target_last_word_fallback() {
        assert_eq!(extract_target("look around"), "around");
        // Adverb/gerund filter.
        assert_eq!(extract_target("move slowly"), "");
        assert_eq!(extract_target("keep running"), "");
        // Single-word commands have no fallback target.
        assert_eq!(extract_target("look"), "");
    }

    proptest! {
        #[test]
        fn test_normalize_idempotent(s in r"(You |Player )?[a-z]+( [a-z]+){0,5}[.!?]{0,3}") {
            let once = normalize_command(&s);
            prop_assert_eq!(normalize_command(&once), once.clone());
        }

        #[test]
        fn test_classify_is_total(s in ".*") {
            let parser = ActionParser::new();
            // Must not panic, and must be deterministic.
            prop_assert_eq!(parser.classify(&s), parser.classify(&s));
        }
    }
}
