//! The group invitation protocol.
//!
//! An invite moves `pending -> accepted | rejected` and never leaves a
//! terminal state. Duplicate detection always scans the invite collection
//! for the exact `(from, to, group)` triple; the per-user invite-id lists
//! are display bookkeeping only.

use chrono::Utc;
use uuid::Uuid;

use crate::{EngineError, GroupInvite, InviteStatus, ResultEngine, Role};

use super::{
    Engine, GroupAction,
    access::{require_authorized, require_group, require_member, require_user},
    groups::username_of,
};

/// A pending invite enriched with sender and group summaries for display.
#[derive(Clone, Debug)]
pub struct PendingInvite {
    pub invite: GroupInvite,
    pub from_username: String,
    pub group_name: String,
}

impl Engine {
    /// Invites a friend into a group. Founder/admin only.
    pub async fn invite_member(
        &self,
        actor_id: Uuid,
        group_id: Uuid,
        target_id: Uuid,
    ) -> ResultEngine<GroupInvite> {
        self.mutate(move |doc| {
            let group = require_group(doc, group_id)?;
            require_authorized(group, actor_id, GroupAction::InviteMember)?;

            let target = require_user(doc, target_id)?;
            let target_name = target.username.clone();
            if group.is_member(target_id) {
                return Err(EngineError::AlreadyMember(target_name));
            }

            let actor = require_user(doc, actor_id)?;
            if !actor.is_friend(target_id) {
                return Err(EngineError::NotFriends(target_name));
            }

            let duplicate = doc.group_invites.iter().any(|invite| {
                invite.is_pending()
                    && invite.from_user_id == actor_id
                    && invite.to_user_id == target_id
                    && invite.group_id == group_id
            });
            if duplicate {
                return Err(EngineError::DuplicateInvite(target_name));
            }

            let invite = GroupInvite::new(actor_id, target_id, group_id);
            doc.group_invites.push(invite.clone());
            if let Some(user) = doc.user_mut(actor_id) {
                user.sent_group_invites.push(invite.id);
            }
            if let Some(user) = doc.user_mut(target_id) {
                user.received_group_invites.push(invite.id);
            }
            Ok(invite)
        })
        .await
    }

    /// Accepts a pending invite addressed to the actor and joins the group
    /// with the plain `member` role. Friendship is not re-checked here.
    pub async fn accept_invite(&self, actor_id: Uuid, invite_id: Uuid) -> ResultEngine<GroupInvite> {
        self.mutate(move |doc| {
            let invite = Self::pending_invite_for(doc, actor_id, invite_id)?;
            let group_id = invite.group_id;
            let already_member = require_group(doc, group_id)?.is_member(actor_id);

            let invite = doc
                .invite_mut(invite_id)
                .ok_or_else(|| EngineError::NotFound("invite".to_string()))?;
            invite.status = InviteStatus::Accepted;
            let accepted = invite.clone();

            // A second pending invite for the same target may already have
            // been accepted; membership stays unique.
            if !already_member
                && let Some(group) = doc.group_mut(group_id)
            {
                group.push_member(actor_id, Role::Member, Utc::now());
            }
            Ok(accepted)
        })
        .await
    }

    /// Rejects a pending invite addressed to the actor. No membership side
    /// effect.
    pub async fn reject_invite(&self, actor_id: Uuid, invite_id: Uuid) -> ResultEngine<GroupInvite> {
        self.mutate(move |doc| {
            Self::pending_invite_for(doc, actor_id, invite_id)?;
            let invite = doc
                .invite_mut(invite_id)
                .ok_or_else(|| EngineError::NotFound("invite".to_string()))?;
            invite.status = InviteStatus::Rejected;
            Ok(invite.clone())
        })
        .await
    }

    fn pending_invite_for(
        doc: &crate::Document,
        actor_id: Uuid,
        invite_id: Uuid,
    ) -> ResultEngine<GroupInvite> {
        let invite = doc
            .invite(invite_id)
            .ok_or_else(|| EngineError::NotFound("invite".to_string()))?;
        if invite.to_user_id != actor_id {
            return Err(EngineError::Forbidden(
                "invite addressed to someone else".to_string(),
            ));
        }
        if !invite.is_pending() {
            return Err(EngineError::AlreadyProcessed(invite.id.to_string()));
        }
        Ok(invite.clone())
    }

    /// Pending invites scoped to a group. Member-only.
    pub async fn group_invites(
        &self,
        actor_id: Uuid,
        group_id: Uuid,
    ) -> ResultEngine<Vec<GroupInvite>> {
        self.read(|doc| {
            let group = require_group(doc, group_id)?;
            require_member(group, actor_id)?;
            Ok(doc
                .group_invites
                .iter()
                .filter(|i| i.group_id == group_id && i.is_pending())
                .cloned()
                .collect())
        })
        .await
    }

    /// Pending invites addressed to the actor, enriched for display.
    pub async fn pending_invites_for_user(
        &self,
        actor_id: Uuid,
    ) -> ResultEngine<Vec<PendingInvite>> {
        self.read(|doc| {
            Ok(doc
                .group_invites
                .iter()
                .filter(|i| i.to_user_id == actor_id && i.is_pending())
                .map(|invite| PendingInvite {
                    from_username: username_of(doc, invite.from_user_id),
                    group_name: doc
                        .group(invite.group_id)
                        .map(|g| g.name.clone())
                        .unwrap_or_else(|| invite.group_id.to_string()),
                    invite: invite.clone(),
                })
                .collect())
        })
        .await
    }
}
