//! Expense ledger endpoints.

use api_types::expense::{
    ExpenseCreated, ExpenseNew, ExpenseView, ExpensesResponse, ParticipantView,
};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{ServerError, server::ServerState};

fn map_input(payload: ExpenseNew) -> engine::NewExpense {
    engine::NewExpense {
        name: payload.name,
        description: payload.description,
        amount: payload.amount,
        currency: payload.currency,
        paid_by_user_id: payload.paid_by_user_id,
        split_between_user_ids: payload.split_between_user_ids,
    }
}

pub async fn expense_new(
    Extension(user): Extension<engine::User>,
    State(state): State<ServerState>,
    Path(group_id): Path<Uuid>,
    Json(payload): Json<ExpenseNew>,
) -> Result<(StatusCode, Json<ExpenseCreated>), ServerError> {
    let expense = state
        .engine
        .new_expense(user.id, group_id, map_input(payload))
        .await?;

    Ok((StatusCode::CREATED, Json(ExpenseCreated { id: expense.id })))
}

pub async fn list(
    Extension(user): Extension<engine::User>,
    State(state): State<ServerState>,
    Path(group_id): Path<Uuid>,
) -> Result<Json<ExpensesResponse>, ServerError> {
    let expenses = state
        .engine
        .group_expenses(user.id, group_id)
        .await?
        .into_iter()
        .map(|detail| ExpenseView {
            id: detail.expense.id,
            group_id: detail.expense.group_id,
            name: detail.expense.name,
            description: detail.expense.description,
            amount: detail.expense.amount,
            currency: detail.expense.currency,
            paid_by: ParticipantView {
                user_id: detail.expense.paid_by_user_id,
                username: detail.paid_by_username,
            },
            split_between: detail
                .participants
                .into_iter()
                .map(|p| ParticipantView {
                    user_id: p.user_id,
                    username: p.username,
                })
                .collect(),
            created_at: detail.expense.created_at,
        })
        .collect();

    Ok(Json(ExpensesResponse { expenses }))
}

pub async fn update(
    Extension(user): Extension<engine::User>,
    State(state): State<ServerState>,
    Path(expense_id): Path<Uuid>,
    Json(payload): Json<ExpenseNew>,
) -> Result<StatusCode, ServerError> {
    state
        .engine
        .update_expense(user.id, expense_id, map_input(payload))
        .await?;
    Ok(StatusCode::OK)
}

pub async fn delete(
    Extension(user): Extension<engine::User>,
    State(state): State<ServerState>,
    Path(expense_id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_expense(user.id, expense_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
