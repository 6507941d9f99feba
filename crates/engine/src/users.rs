use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered user.
///
/// `sent_group_invites` / `received_group_invites` are denormalized
/// bookkeeping kept for clients that render inboxes; the invite collection
/// on [`Document`] is the source of truth for every check.
///
/// [`Document`]: crate::Document
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub friends: Vec<Uuid>,
    #[serde(default)]
    pub sent_group_invites: Vec<Uuid>,
    #[serde(default)]
    pub received_group_invites: Vec<Uuid>,
}

impl User {
    pub fn new(username: String, password: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            username,
            password,
            friends: Vec::new(),
            sent_group_invites: Vec::new(),
            received_group_invites: Vec::new(),
        }
    }

    pub fn is_friend(&self, other: Uuid) -> bool {
        self.friends.contains(&other)
    }
}
