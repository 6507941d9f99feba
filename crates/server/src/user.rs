//! Registration and friend bookkeeping endpoints.

use api_types::user::{FriendNew, Register, UserView};
use axum::{Extension, Json, extract::State, http::StatusCode};

use crate::{ServerError, server::ServerState};

pub async fn register(
    State(state): State<ServerState>,
    Json(payload): Json<Register>,
) -> Result<(StatusCode, Json<UserView>), ServerError> {
    let user = state
        .engine
        .register_user(&payload.username, &payload.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(UserView {
            id: user.id,
            username: user.username,
        }),
    ))
}

pub async fn friend_new(
    Extension(user): Extension<engine::User>,
    State(state): State<ServerState>,
    Json(payload): Json<FriendNew>,
) -> Result<StatusCode, ServerError> {
    state.engine.add_friend(user.id, &payload.username).await?;
    Ok(StatusCode::NO_CONTENT)
}
