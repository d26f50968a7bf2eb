use crate::betting::Action;
use serde::Deserialize;
use serde::Serialize;

/// A legal action with the label shown for it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Choice {
    action: Action,
    label: String,
}

impl Choice {
    pub fn action(&self) -> Action {
        self.action
    }
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl From<(Action, String)> for Choice {
    fn from((action, label): (Action, String)) -> Self {
        Self { action, label }
    }
}

/// Choices labelled with the action's own display.
impl From<Action> for Choice {
    fn from(action: Action) -> Self {
        Self::from((action, action.to_string()))
    }
}

impl std::fmt::Display for Choice {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.pad(&self.label)
    }
}
