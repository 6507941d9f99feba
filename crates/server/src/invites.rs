//! Group invitation endpoints.

use api_types::invite::{
    InviteNew, InviteStatus, InviteView, InvitesResponse, PendingInviteView,
    PendingInvitesResponse,
};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{ServerError, notify, server::ServerState};

fn map_status(status: engine::InviteStatus) -> InviteStatus {
    match status {
        engine::InviteStatus::Pending => InviteStatus::Pending,
        engine::InviteStatus::Accepted => InviteStatus::Accepted,
        engine::InviteStatus::Rejected => InviteStatus::Rejected,
    }
}

fn map_invite(invite: engine::GroupInvite) -> InviteView {
    InviteView {
        id: invite.id,
        from_user_id: invite.from_user_id,
        to_user_id: invite.to_user_id,
        group_id: invite.group_id,
        status: map_status(invite.status),
        created_at: invite.created_at,
    }
}

pub async fn invite_new(
    Extension(user): Extension<engine::User>,
    State(state): State<ServerState>,
    Path(group_id): Path<Uuid>,
    Json(payload): Json<InviteNew>,
) -> Result<(StatusCode, Json<InviteView>), ServerError> {
    let invite = state
        .engine
        .invite_member(user.id, group_id, payload.to_user_id)
        .await?;

    notify::invite_sent(&invite);
    Ok((StatusCode::CREATED, Json(map_invite(invite))))
}

pub async fn list_for_group(
    Extension(user): Extension<engine::User>,
    State(state): State<ServerState>,
    Path(group_id): Path<Uuid>,
) -> Result<Json<InvitesResponse>, ServerError> {
    let invites = state
        .engine
        .group_invites(user.id, group_id)
        .await?
        .into_iter()
        .map(map_invite)
        .collect();

    Ok(Json(InvitesResponse { invites }))
}

pub async fn inbox(
    Extension(user): Extension<engine::User>,
    State(state): State<ServerState>,
) -> Result<Json<PendingInvitesResponse>, ServerError> {
    let invites = state
        .engine
        .pending_invites_for_user(user.id)
        .await?
        .into_iter()
        .map(|pending| PendingInviteView {
            id: pending.invite.id,
            group_id: pending.invite.group_id,
            group_name: pending.group_name,
            from_user_id: pending.invite.from_user_id,
            from_username: pending.from_username,
            created_at: pending.invite.created_at,
        })
        .collect();

    Ok(Json(PendingInvitesResponse { invites }))
}

pub async fn accept(
    Extension(user): Extension<engine::User>,
    State(state): State<ServerState>,
    Path(invite_id): Path<Uuid>,
) -> Result<Json<InviteView>, ServerError> {
    let invite = state.engine.accept_invite(user.id, invite_id).await?;
    notify::invite_accepted(&invite);
    Ok(Json(map_invite(invite)))
}

pub async fn reject(
    Extension(user): Extension<engine::User>,
    State(state): State<ServerState>,
    Path(invite_id): Path<Uuid>,
) -> Result<Json<InviteView>, ServerError> {
    let invite = state.engine.reject_invite(user.id, invite_id).await?;
    notify::invite_rejected(&invite);
    Ok(Json(map_invite(invite)))
}
