//! Request/response types shared by the server and its clients.
//!
//! JSON field names are camelCase, matching the stored document layout the
//! original clients already speak.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod user {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Register {
        pub username: String,
        pub password: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserView {
        pub id: Uuid,
        pub username: String,
    }

    /// Request body for recording a friendship.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct FriendNew {
        pub username: String,
    }
}

pub mod membership {
    use super::*;

    /// Role of a user in a group.
    ///
    /// - `founder`: full control, may act on any member.
    /// - `admin`: may manage the group but not touch founders.
    /// - `member`: plain membership, no privileged actions.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum MemberRole {
        Founder,
        Admin,
        Member,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct MemberView {
        pub user_id: Uuid,
        pub username: String,
        pub role: MemberRole,
        pub joined_at: DateTime<Utc>,
    }

    /// Request body for changing a member's role.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct RoleUpdate {
        pub role: MemberRole,
    }
}

pub mod group {
    use super::*;
    use membership::MemberView;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct GroupNew {
        pub name: String,
        #[serde(default)]
        pub description: String,
        pub image_url: Option<String>,
    }

    /// Wholesale replacement of the editable details.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct GroupUpdate {
        pub name: String,
        #[serde(default)]
        pub description: String,
        pub image_url: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct GroupSummary {
        pub id: Uuid,
        pub name: String,
        pub description: String,
        pub image_url: Option<String>,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct GroupView {
        pub id: Uuid,
        pub name: String,
        pub description: String,
        pub image_url: Option<String>,
        pub members: Vec<MemberView>,
        pub created_at: DateTime<Utc>,
        pub created_by: Uuid,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct GroupsResponse {
        pub groups: Vec<GroupSummary>,
    }
}

pub mod invite {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum InviteStatus {
        Pending,
        Accepted,
        Rejected,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct InviteNew {
        pub to_user_id: Uuid,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct InviteView {
        pub id: Uuid,
        pub from_user_id: Uuid,
        pub to_user_id: Uuid,
        pub group_id: Uuid,
        pub status: InviteStatus,
        pub created_at: DateTime<Utc>,
    }

    /// An entry in a user's invite inbox, with display summaries resolved.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PendingInviteView {
        pub id: Uuid,
        pub group_id: Uuid,
        pub group_name: String,
        pub from_user_id: Uuid,
        pub from_username: String,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct InvitesResponse {
        pub invites: Vec<InviteView>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PendingInvitesResponse {
        pub invites: Vec<PendingInviteView>,
    }
}

pub mod expense {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ExpenseNew {
        pub name: String,
        pub description: Option<String>,
        pub amount: Decimal,
        pub currency: String,
        pub paid_by_user_id: Uuid,
        pub split_between_user_ids: Vec<Uuid>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ParticipantView {
        pub user_id: Uuid,
        pub username: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ExpenseView {
        pub id: Uuid,
        pub group_id: Uuid,
        pub name: String,
        pub description: Option<String>,
        pub amount: Decimal,
        pub currency: String,
        pub paid_by: ParticipantView,
        pub split_between: Vec<ParticipantView>,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpensesResponse {
        pub expenses: Vec<ExpenseView>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseCreated {
        pub id: Uuid,
    }
}

pub mod balance {
    use super::*;

    /// Net position of one member. Positive: owed money; negative: owes.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct BalanceView {
        pub user_id: Uuid,
        pub balance: Decimal,
        pub currency: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BalancesResponse {
        pub balances: Vec<BalanceView>,
    }
}
