use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{Document, EngineError, Expense, Group, ResultEngine};

use super::{
    Engine,
    access::{require_group, require_member},
    groups::username_of,
    normalize_required_text,
};

/// Input for creating an expense; also the wholesale replacement applied on
/// update. Optional fields left out by the caller end up empty, not
/// "unchanged".
#[derive(Clone, Debug)]
pub struct NewExpense {
    pub name: String,
    pub description: Option<String>,
    pub amount: Decimal,
    pub currency: String,
    pub paid_by_user_id: Uuid,
    pub split_between_user_ids: Vec<Uuid>,
}

/// An expense enriched with resolved payer and participant summaries.
#[derive(Clone, Debug)]
pub struct ExpenseDetail {
    pub expense: Expense,
    pub paid_by_username: String,
    pub participants: Vec<ParticipantSummary>,
}

#[derive(Clone, Debug)]
pub struct ParticipantSummary {
    pub user_id: Uuid,
    pub username: String,
}

/// Create-time validation, re-run on update: positive amount, non-empty
/// split, payer and all split participants currently members.
fn validate_expense(doc: &Document, group: &Group, input: &NewExpense) -> ResultEngine<String> {
    let name = normalize_required_text(&input.name, "expense name")?;
    if input.amount <= Decimal::ZERO {
        return Err(EngineError::InvalidInput(
            "amount must be greater than zero".to_string(),
        ));
    }
    if input.currency.trim().is_empty() {
        return Err(EngineError::InvalidInput(
            "currency must not be empty".to_string(),
        ));
    }
    if input.split_between_user_ids.is_empty() {
        return Err(EngineError::InvalidInput(
            "split must include at least one member".to_string(),
        ));
    }

    if !group.is_member(input.paid_by_user_id) {
        return Err(EngineError::InvalidParticipant(username_of(
            doc,
            input.paid_by_user_id,
        )));
    }
    for user_id in &input.split_between_user_ids {
        if !group.is_member(*user_id) {
            return Err(EngineError::InvalidParticipant(username_of(doc, *user_id)));
        }
    }

    Ok(name)
}

impl Engine {
    /// Appends an expense to the group ledger. Any member may record one.
    pub async fn new_expense(
        &self,
        actor_id: Uuid,
        group_id: Uuid,
        input: NewExpense,
    ) -> ResultEngine<Expense> {
        self.mutate(move |doc| {
            let group = require_group(doc, group_id)?;
            require_member(group, actor_id)?;
            let name = validate_expense(doc, group, &input)?;

            let expense = Expense {
                id: Uuid::new_v4(),
                group_id,
                name,
                description: input.description.filter(|d| !d.trim().is_empty()),
                amount: input.amount,
                currency: input.currency.trim().to_string(),
                paid_by_user_id: input.paid_by_user_id,
                split_between_user_ids: input.split_between_user_ids,
                created_at: Utc::now(),
            };
            doc.expenses.push(expense.clone());
            Ok(expense)
        })
        .await
    }

    /// Replaces the mutable fields of an expense wholesale.
    pub async fn update_expense(
        &self,
        actor_id: Uuid,
        expense_id: Uuid,
        input: NewExpense,
    ) -> ResultEngine<Expense> {
        self.mutate(move |doc| {
            let group_id = doc
                .expense(expense_id)
                .ok_or_else(|| EngineError::NotFound("expense".to_string()))?
                .group_id;
            let group = require_group(doc, group_id)?;
            require_member(group, actor_id)?;
            let name = validate_expense(doc, group, &input)?;

            let expense = doc
                .expenses
                .iter_mut()
                .find(|e| e.id == expense_id)
                .ok_or_else(|| EngineError::NotFound("expense".to_string()))?;
            expense.name = name;
            expense.description = input.description.filter(|d| !d.trim().is_empty());
            expense.amount = input.amount;
            expense.currency = input.currency.trim().to_string();
            expense.paid_by_user_id = input.paid_by_user_id;
            expense.split_between_user_ids = input.split_between_user_ids;
            Ok(expense.clone())
        })
        .await
    }

    /// Removes an expense outright; there is no soft delete.
    pub async fn delete_expense(&self, actor_id: Uuid, expense_id: Uuid) -> ResultEngine<()> {
        self.mutate(move |doc| {
            let group_id = doc
                .expense(expense_id)
                .ok_or_else(|| EngineError::NotFound("expense".to_string()))?
                .group_id;
            let group = require_group(doc, group_id)?;
            require_member(group, actor_id)?;

            doc.expenses.retain(|e| e.id != expense_id);
            Ok(())
        })
        .await
    }

    /// All expenses for a group, enriched for display. Member-only.
    pub async fn group_expenses(
        &self,
        actor_id: Uuid,
        group_id: Uuid,
    ) -> ResultEngine<Vec<ExpenseDetail>> {
        self.read(|doc| {
            let group = require_group(doc, group_id)?;
            require_member(group, actor_id)?;

            Ok(doc
                .expenses_for_group(group_id)
                .into_iter()
                .map(|expense| ExpenseDetail {
                    paid_by_username: username_of(doc, expense.paid_by_user_id),
                    participants: expense
                        .split_between_user_ids
                        .iter()
                        .map(|user_id| ParticipantSummary {
                            user_id: *user_id,
                            username: username_of(doc, *user_id),
                        })
                        .collect(),
                    expense: expense.clone(),
                })
                .collect())
        })
        .await
    }
}
