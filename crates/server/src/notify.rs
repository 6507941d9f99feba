//! Fire-and-forget notification emission.
//!
//! The request path only records that something notifiable happened; the
//! actual fan-out and delivery live in the notification subsystem and are
//! free to pick these events up asynchronously. Nothing here blocks or
//! fails a request.

use engine::GroupInvite;

pub fn invite_sent(invite: &GroupInvite) {
    tracing::info!(
        invite = %invite.id,
        to_user = %invite.to_user_id,
        group = %invite.group_id,
        "notify: group invite sent"
    );
}

pub fn invite_accepted(invite: &GroupInvite) {
    tracing::info!(
        invite = %invite.id,
        from_user = %invite.from_user_id,
        group = %invite.group_id,
        "notify: group invite accepted"
    );
}

pub fn invite_rejected(invite: &GroupInvite) {
    tracing::info!(
        invite = %invite.id,
        from_user = %invite.from_user_id,
        group = %invite.group_id,
        "notify: group invite rejected"
    );
}
