//! The single shared document every operation reads and writes whole.
//!
//! Top-level collections mirror the historical storage layout; unknown
//! sibling collections owned by other subsystems are carried through
//! `extra` so a save never drops them.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Expense, Group, GroupInvite, User};

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub groups: Vec<Group>,
    #[serde(default)]
    pub group_invites: Vec<GroupInvite>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Document {
    pub fn user(&self, id: Uuid) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn user_mut(&mut self, id: Uuid) -> Option<&mut User> {
        self.users.iter_mut().find(|u| u.id == id)
    }

    pub fn user_by_username(&self, username: &str) -> Option<&User> {
        self.users.iter().find(|u| u.username == username)
    }

    pub fn group(&self, id: Uuid) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == id)
    }

    pub fn group_mut(&mut self, id: Uuid) -> Option<&mut Group> {
        self.groups.iter_mut().find(|g| g.id == id)
    }

    pub fn invite(&self, id: Uuid) -> Option<&GroupInvite> {
        self.group_invites.iter().find(|i| i.id == id)
    }

    pub fn invite_mut(&mut self, id: Uuid) -> Option<&mut GroupInvite> {
        self.group_invites.iter_mut().find(|i| i.id == id)
    }

    pub fn expense(&self, id: Uuid) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id == id)
    }

    pub fn expenses_for_group(&self, group_id: Uuid) -> Vec<&Expense> {
        self.expenses
            .iter()
            .filter(|e| e.group_id == group_id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_collections_survive_round_trip() {
        let doc: Document = serde_json::from_value(json!({
            "users": [],
            "groups": [],
            "groupInvites": [],
            "expenses": [],
            "events": [{"id": "e1", "title": "concert"}]
        }))
        .unwrap();

        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["events"][0]["title"], "concert");
        assert!(value.get("groupInvites").is_some());
    }

    #[test]
    fn missing_collections_default_to_empty() {
        let doc: Document = serde_json::from_value(json!({})).unwrap();
        assert!(doc.users.is_empty());
        assert!(doc.group_invites.is_empty());
    }
}
