//! Bug model
//!
//! Wire shape follows the server: camelCase keys, every field except `id`
//! optional.

use serde::{Deserialize, Serialize};

/// A tracked bug
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bug {
    pub id: u64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub resolved: bool,
    /// User the bug is assigned to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
}

impl Bug {
    pub fn new(id: u64, description: impl Into<String>) -> Self {
        Self {
            id,
            description: description.into(),
            ..Self::default()
        }
    }

    pub fn resolved(mut self) -> Self {
        self.resolved = true;
        self
    }

    pub fn assigned_to(mut self, user_id: u64) -> Self {
        self.user_id = Some(user_id);
        self
    }
}

/// A bug not yet saved to the server (no id)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBug {
    #[serde(default)]
    pub description: String,
}

impl NewBug {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// Reference to a bug by id; extra keys in the payload are ignored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BugRef {
    pub id: u64,
}

/// Assignment of a bug to a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BugAssignment {
    pub id: u64,
    pub user_id: u64,
}
