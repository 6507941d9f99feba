//! Derived balances endpoint.

use api_types::balance::{BalanceView, BalancesResponse};
use axum::{
    Extension, Json,
    extract::{Path, State},
};
use uuid::Uuid;

use crate::{ServerError, server::ServerState};

pub async fn get(
    Extension(user): Extension<engine::User>,
    State(state): State<ServerState>,
    Path(group_id): Path<Uuid>,
) -> Result<Json<BalancesResponse>, ServerError> {
    let balances = state
        .engine
        .group_balances(user.id, group_id)
        .await?
        .into_iter()
        .map(|b| BalanceView {
            user_id: b.user_id,
            balance: b.balance,
            currency: b.currency,
        })
        .collect();

    Ok(Json(BalancesResponse { balances }))
}
