use crate::model::action::ActionType;

/// Trigger keywords for each action type.
///
/// The entry order is the classification priority: `classify` returns the
/// first type whose set matches, so this list must stay in a fixed order
/// rather than living in a hash map. Matching is case-insensitive substring
/// containment, not whole-word ("use" also fires inside "using").
pub struct KeywordTable {
    entries: Vec<(ActionType, Vec<&'static str>)>,
}

impl KeywordTable {
    pub fn new() -> Self {
        let entries = vec![
            (
                ActionType::Move,
                vec![
                    "move", "walk", "run", "go", "travel", "step", "proceed", "advance",
                    "retreat", "approach", "leave", "exit", "enter",
                ],
            ),
            (
                ActionType::Attack,
                vec![
                    "attack", "hit", "strike", "fight", "battle", "slash", "stab", "shoot",
                    "fire", "swing", "punch", "kick", "charge", "assault",
                ],
            ),
            (
                ActionType::Interact,
                vec![
                    "open", "close", "push", "pull", "press", "touch", "grab", "take", "pick",
                    "lift", "activate", "use", "operate", "interact",
                ],
            ),
            (
                ActionType::Look,
                vec![
                    "look", "examine", "inspect", "observe", "check", "search", "scan", "peek",
                    "watch", "study",
                ],
            ),
            (
                ActionType::UseItem,
                vec![
                    "use", "drink", "eat", "consume", "apply", "wield", "equip", "wear", "hold",
                    "drop",
                ],
            ),
            (
                ActionType::Inventory,
                vec![
                    "inventory", "items", "bag", "backpack", "check items", "list items",
                    "show items",
                ],
            ),
            (
                ActionType::Talk,
                vec![
                    "talk", "speak", "say", "tell", "ask", "chat", "converse", "discuss",
                    "question",
                ],
            ),
            (
                ActionType::Cast,
                vec![
                    "cast", "spell", "magic", "enchant", "summon", "invoke", "conjure",
                    "channel", "hex", "curse",
                ],
            ),
            (
                ActionType::Wait,
                vec![
                    "wait", "rest", "pause", "delay", "stay", "remain", "hold", "stop", "idle",
                ],
            ),
        ];

        Self { entries }
    }

    /// (type, keywords) pairs in classification priority order.
    pub fn iter(&self) -> impl Iterator<Item = (ActionType, &[&'static str])> + '_ {
        self.entries.iter().map(|(t, kws)| (*t, kws.as_slice()))
    }

    /// True if `lower` (already lower-cased) contains a keyword from any set.
    pub fn contains_any_keyword(&self, lower: &str) -> bool {
        self.entries
            .iter()
            .any(|(_, kws)| kws.iter().any(|k| lower.contains(k)))
    }
}

impl Default for KeywordTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_order_is_fixed() {
        let table = KeywordTable::new();
        let order: Vec<ActionType> = table.iter().map(|(t, _)| t).collect();
        assert_eq!(
            order,
            vec![
                ActionType::Move,
                ActionType::Attack,
                ActionType::Interact,
                ActionType::Look,
                ActionType::UseItem,
                ActionType::Inventory,
                ActionType::Talk,
                ActionType::Cast,
                ActionType::Wait,
            ]
        );
    }

    #[test]
    fn test_contains_any_keyword() {
        let table = KeywordTable::new();
        assert!(table.contains_any_keyword("look around the room"));
        assert!(table.contains_any_keyword("he starts using the lever"));
        assert!(!table.contains_any_keyword("zzz qqq"));
    }
}
