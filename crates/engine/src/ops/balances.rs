//! Derives per-member net balances from a group's expense ledger.

use std::collections::HashMap;

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{Expense, GroupMember, ResultEngine};

use super::{
    Engine,
    access::{require_group, require_member},
};

/// Display currency for members no expense has touched yet.
const BASELINE_CURRENCY: &str = "PLN";

/// Net position of one member: positive means the member is owed money,
/// negative means they owe. The currency is whatever expense touched the
/// entry last; no conversion happens here.
#[derive(Clone, Debug, PartialEq)]
pub struct MemberBalance {
    pub user_id: Uuid,
    pub balance: Decimal,
    pub currency: String,
}

/// Folds the ledger into one entry per member, in member order.
///
/// Each expense credits its payer with the full amount and debits every
/// split participant an exact per-head share. Users referenced by an
/// expense but no longer members are skipped; memberships can change after
/// expenses are recorded and the ledger is not rewritten when they do.
fn compute_balances(members: &[GroupMember], expenses: &[&Expense]) -> Vec<MemberBalance> {
    let mut balances: Vec<MemberBalance> = members
        .iter()
        .map(|member| MemberBalance {
            user_id: member.user_id,
            balance: Decimal::ZERO,
            currency: BASELINE_CURRENCY.to_string(),
        })
        .collect();
    let index: HashMap<Uuid, usize> = members
        .iter()
        .enumerate()
        .map(|(position, member)| (member.user_id, position))
        .collect();

    for expense in expenses {
        if let Some(&position) = index.get(&expense.paid_by_user_id) {
            balances[position].balance += expense.amount;
            balances[position].currency = expense.currency.clone();
        }

        if expense.split_between_user_ids.is_empty() {
            continue;
        }
        let share = expense.amount / Decimal::from(expense.split_between_user_ids.len());
        for user_id in &expense.split_between_user_ids {
            if let Some(&position) = index.get(user_id) {
                balances[position].balance -= share;
                balances[position].currency = expense.currency.clone();
            }
        }
    }

    balances
}

impl Engine {
    /// Balances for every current member of a group. Member-only.
    pub async fn group_balances(
        &self,
        actor_id: Uuid,
        group_id: Uuid,
    ) -> ResultEngine<Vec<MemberBalance>> {
        self.read(|doc| {
            let group = require_group(doc, group_id)?;
            require_member(group, actor_id)?;

            let members = group.normalized_members();
            let expenses = doc.expenses_for_group(group_id);
            Ok(compute_balances(&members, &expenses))
        })
        .await
    }
}
