use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A shared cost scoped to a group, paid by one member and split across a
/// set of members.
///
/// Payer and split participants are validated against the member list when
/// the expense is written; later membership changes do not retroactively
/// invalidate the record.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: Uuid,
    pub group_id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub amount: Decimal,
    pub currency: String,
    pub paid_by_user_id: Uuid,
    pub split_between_user_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}
