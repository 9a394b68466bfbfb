/// Closed set of categories a parsed command can fall into.
/// `Unknown` is the fallback for anything the keyword table does not cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionType {
    Unknown,
    Move,
    Attack,
    Interact,
    Look,
    UseItem,
    Inventory,
    Talk,
    Cast,
    Wait,
}

impl ActionType {
    pub fn label(&self) -> &'static str {
        match self {
            ActionType::Unknown => "Unknown",
            ActionType::Move => "Move",
            ActionType::Attack => "Attack",
            ActionType::Interact => "Interact",
            ActionType::Look => "Look",
            ActionType::UseItem => "Use Item",
            ActionType::Inventory => "Inventory",
            ActionType::Talk => "Talk",
            ActionType::Cast => "Cast Spell",
            ActionType::Wait => "Wait",
        }
    }
}

/// One structured action recovered from the narrator's output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAction {
    pub action_type: ActionType,

    /// The cleaned single-line command text.
    pub command: String,

    /// Auxiliary tokens in discovery order. Duplicates are kept.
    pub parameters: Vec<String>,

    /// The resolved object of the action, empty when nothing matched.
    pub target: String,

    /// The full narration this command came from, kept verbatim for context.
    pub description: String,
}
