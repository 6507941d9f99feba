//! The role gate and shared lookup helpers.
//!
//! Privileged group mutations resolve the actor's role from the member list
//! on every call; nothing is cached between requests. A deny is always an
//! explicit [`EngineError::Forbidden`], never a silent no-op.

use uuid::Uuid;

use crate::{Document, EngineError, Group, ResultEngine, Role, User};

/// The privileged group mutations the gate knows about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GroupAction {
    EditGroupDetails,
    InviteMember,
    ChangeMemberRole,
    RemoveMember,
}

/// Whether `actor` may perform `action` at all. Target-role constraints are
/// checked separately by [`require_target_actionable`].
pub fn authorize(actor: Role, action: GroupAction) -> bool {
    match action {
        GroupAction::EditGroupDetails
        | GroupAction::InviteMember
        | GroupAction::ChangeMemberRole
        | GroupAction::RemoveMember => actor.can_manage(),
    }
}

/// An admin may not act on a founder; a founder may act on anyone,
/// including other founders left over from historical seeding.
pub(super) fn require_target_actionable(actor: Role, target: Role) -> ResultEngine<()> {
    if actor == Role::Admin && target == Role::Founder {
        return Err(EngineError::Forbidden(
            "admins cannot act on a founder".to_string(),
        ));
    }
    Ok(())
}

pub(super) fn require_group(doc: &Document, group_id: Uuid) -> ResultEngine<&Group> {
    doc.group(group_id)
        .ok_or_else(|| EngineError::NotFound("group".to_string()))
}

pub(super) fn require_group_mut(doc: &mut Document, group_id: Uuid) -> ResultEngine<&mut Group> {
    doc.group_mut(group_id)
        .ok_or_else(|| EngineError::NotFound("group".to_string()))
}

pub(super) fn require_user(doc: &Document, user_id: Uuid) -> ResultEngine<&User> {
    doc.user(user_id)
        .ok_or_else(|| EngineError::NotFound("user".to_string()))
}

/// Membership is the precondition for any group read.
pub(super) fn require_member(group: &Group, user_id: Uuid) -> ResultEngine<Role> {
    group
        .role_of(user_id)
        .ok_or_else(|| EngineError::Forbidden("not a group member".to_string()))
}

/// Resolves the actor's current role and runs it through the gate.
pub(super) fn require_authorized(
    group: &Group,
    actor_id: Uuid,
    action: GroupAction,
) -> ResultEngine<Role> {
    let role = require_member(group, actor_id)?;
    if !authorize(role, action) {
        return Err(EngineError::Forbidden(
            "requires founder or admin".to_string(),
        ));
    }
    Ok(role)
}
