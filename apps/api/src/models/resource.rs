use serde::{Deserialize, Serialize};

/// A pointer to an external learning resource for a skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRef {
    pub title: String,
    pub platform: String,
    pub url: String,
}
