use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Invite lifecycle. `Pending` is the only state that allows a transition;
/// `Accepted` and `Rejected` are terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InviteStatus {
    Pending,
    Accepted,
    Rejected,
}

/// An offer of group membership from an authorized inviter to a friend.
///
/// Cross-references its users and group by id; owned by none of them.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupInvite {
    pub id: Uuid,
    pub from_user_id: Uuid,
    pub to_user_id: Uuid,
    pub group_id: Uuid,
    pub status: InviteStatus,
    pub created_at: DateTime<Utc>,
}

impl GroupInvite {
    pub fn new(from_user_id: Uuid, to_user_id: Uuid, group_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            from_user_id,
            to_user_id,
            group_id,
            status: InviteStatus::Pending,
            created_at: Utc::now(),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == InviteStatus::Pending
    }
}
