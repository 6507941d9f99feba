//! Group API endpoints.

use api_types::group::{GroupNew, GroupSummary, GroupUpdate, GroupView, GroupsResponse};
use api_types::membership::{MemberRole, MemberView, RoleUpdate};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{ServerError, server::ServerState};

fn map_role(role: engine::Role) -> MemberRole {
    match role {
        engine::Role::Founder => MemberRole::Founder,
        engine::Role::Admin => MemberRole::Admin,
        engine::Role::Member => MemberRole::Member,
    }
}

fn map_role_back(role: MemberRole) -> engine::Role {
    match role {
        MemberRole::Founder => engine::Role::Founder,
        MemberRole::Admin => engine::Role::Admin,
        MemberRole::Member => engine::Role::Member,
    }
}

fn summarize(group: engine::Group) -> GroupSummary {
    GroupSummary {
        id: group.id,
        name: group.name,
        description: group.description,
        image_url: group.image_url,
        created_at: group.created_at,
    }
}

pub async fn group_new(
    Extension(user): Extension<engine::User>,
    State(state): State<ServerState>,
    Json(payload): Json<GroupNew>,
) -> Result<(StatusCode, Json<GroupSummary>), ServerError> {
    let group = state
        .engine
        .new_group(
            user.id,
            &payload.name,
            &payload.description,
            payload.image_url.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(summarize(group))))
}

pub async fn list(
    Extension(user): Extension<engine::User>,
    State(state): State<ServerState>,
) -> Result<Json<GroupsResponse>, ServerError> {
    let groups = state
        .engine
        .groups_for_user(user.id)
        .await?
        .into_iter()
        .map(summarize)
        .collect();

    Ok(Json(GroupsResponse { groups }))
}

pub async fn get(
    Extension(user): Extension<engine::User>,
    State(state): State<ServerState>,
    Path(group_id): Path<Uuid>,
) -> Result<Json<GroupView>, ServerError> {
    let detail = state.engine.group_detail(user.id, group_id).await?;

    let members = detail
        .members
        .into_iter()
        .map(|m| MemberView {
            user_id: m.member.user_id,
            username: m.username,
            role: map_role(m.member.role),
            joined_at: m.member.joined_at,
        })
        .collect();

    Ok(Json(GroupView {
        id: detail.group.id,
        name: detail.group.name,
        description: detail.group.description,
        image_url: detail.group.image_url,
        members,
        created_at: detail.group.created_at,
        created_by: detail.group.created_by,
    }))
}

pub async fn update(
    Extension(user): Extension<engine::User>,
    State(state): State<ServerState>,
    Path(group_id): Path<Uuid>,
    Json(payload): Json<GroupUpdate>,
) -> Result<Json<GroupSummary>, ServerError> {
    let group = state
        .engine
        .update_group(
            user.id,
            group_id,
            &payload.name,
            &payload.description,
            payload.image_url.as_deref(),
        )
        .await?;

    Ok(Json(summarize(group)))
}

pub async fn change_role(
    Extension(user): Extension<engine::User>,
    State(state): State<ServerState>,
    Path((group_id, member_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<RoleUpdate>,
) -> Result<StatusCode, ServerError> {
    state
        .engine
        .change_member_role(user.id, group_id, member_id, map_role_back(payload.role))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn remove_member(
    Extension(user): Extension<engine::User>,
    State(state): State<ServerState>,
    Path((group_id, member_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ServerError> {
    state
        .engine
        .remove_member(user.id, group_id, member_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
