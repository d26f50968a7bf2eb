/// A change the presentation layer should react to.
///
/// Queued by every tree mutation and drained with [`Tree::notices`](super::Tree::notices).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The tip moved to the node with this id.
    Tip(String),
    /// The focus moved to the node with this id.
    Focus(String),
    /// The tree was discarded and rebuilt from a new configuration.
    Reset,
    /// A path could not be replayed; focus fell back to `resolved`.
    Stale { requested: String, resolved: String },
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Tip(id) => write!(f, "tip {}", id),
            Self::Focus(id) => write!(f, "focus {}", id),
            Self::Reset => write!(f, "reset"),
            Self::Stale { requested, resolved } => write!(f, "stale {} -> {}", requested, resolved),
        }
    }
}
