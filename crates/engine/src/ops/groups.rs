use uuid::Uuid;

use crate::{Document, EngineError, Group, GroupMember, ResultEngine, Role};

use super::{
    Engine, GroupAction,
    access::{
        require_authorized, require_group, require_group_mut, require_member,
        require_target_actionable, require_user,
    },
    normalize_optional_text, normalize_required_text,
};

/// A group with its members resolved for display.
#[derive(Clone, Debug)]
pub struct GroupDetail {
    pub group: Group,
    pub members: Vec<MemberDetail>,
}

#[derive(Clone, Debug)]
pub struct MemberDetail {
    pub member: GroupMember,
    pub username: String,
}

/// Display name for a user id; falls back to the raw id when the user
/// record is gone.
pub(super) fn username_of(doc: &Document, user_id: Uuid) -> String {
    doc.user(user_id)
        .map(|u| u.username.clone())
        .unwrap_or_else(|| user_id.to_string())
}

impl Engine {
    /// Creates a group; the creator is its sole founder.
    pub async fn new_group(
        &self,
        actor_id: Uuid,
        name: &str,
        description: &str,
        image_url: Option<&str>,
    ) -> ResultEngine<Group> {
        let name = normalize_required_text(name, "group name")?;
        let description = description.trim().to_string();
        let image_url = normalize_optional_text(image_url);

        self.mutate(move |doc| {
            require_user(doc, actor_id)?;
            let group = Group::new(name, description, image_url, actor_id);
            doc.groups.push(group.clone());
            Ok(group)
        })
        .await
    }

    /// Groups the actor belongs to, either record shape.
    pub async fn groups_for_user(&self, actor_id: Uuid) -> ResultEngine<Vec<Group>> {
        self.read(|doc| {
            Ok(doc
                .groups
                .iter()
                .filter(|g| g.is_member(actor_id))
                .cloned()
                .collect())
        })
        .await
    }

    /// Group detail with normalized, display-ready members. Member-only.
    pub async fn group_detail(&self, actor_id: Uuid, group_id: Uuid) -> ResultEngine<GroupDetail> {
        self.read(|doc| {
            let group = require_group(doc, group_id)?;
            require_member(group, actor_id)?;

            let members = group
                .normalized_members()
                .into_iter()
                .map(|member| MemberDetail {
                    username: username_of(doc, member.user_id),
                    member,
                })
                .collect();

            Ok(GroupDetail {
                group: group.clone(),
                members,
            })
        })
        .await
    }

    /// Replaces the group's editable details. Founder/admin only.
    pub async fn update_group(
        &self,
        actor_id: Uuid,
        group_id: Uuid,
        name: &str,
        description: &str,
        image_url: Option<&str>,
    ) -> ResultEngine<Group> {
        let name = normalize_required_text(name, "group name")?;
        let description = description.trim().to_string();
        let image_url = normalize_optional_text(image_url);

        self.mutate(move |doc| {
            let group = require_group_mut(doc, group_id)?;
            require_authorized(group, actor_id, GroupAction::EditGroupDetails)?;

            group.name = name;
            group.description = description;
            group.image_url = image_url;
            Ok(group.clone())
        })
        .await
    }

    /// Changes a member's role, rewriting the record in the current shape.
    pub async fn change_member_role(
        &self,
        actor_id: Uuid,
        group_id: Uuid,
        target_id: Uuid,
        role: Role,
    ) -> ResultEngine<()> {
        self.mutate(move |doc| {
            let group = require_group_mut(doc, group_id)?;
            let actor_role = require_authorized(group, actor_id, GroupAction::ChangeMemberRole)?;
            let target_role = group
                .role_of(target_id)
                .ok_or_else(|| EngineError::NotFound("member".to_string()))?;
            require_target_actionable(actor_role, target_role)?;

            if target_role == Role::Founder && role != Role::Founder && group.founder_count() == 1 {
                return Err(EngineError::InvalidInput(
                    "cannot demote the last founder".to_string(),
                ));
            }

            group.set_role(target_id, role);
            Ok(())
        })
        .await
    }

    pub async fn remove_member(
        &self,
        actor_id: Uuid,
        group_id: Uuid,
        target_id: Uuid,
    ) -> ResultEngine<()> {
        self.mutate(move |doc| {
            let group = require_group_mut(doc, group_id)?;
            let actor_role = require_authorized(group, actor_id, GroupAction::RemoveMember)?;
            let target_role = group
                .role_of(target_id)
                .ok_or_else(|| EngineError::NotFound("member".to_string()))?;
            require_target_actionable(actor_role, target_role)?;

            if target_role == Role::Founder && group.founder_count() == 1 {
                return Err(EngineError::InvalidInput(
                    "cannot remove the last founder".to_string(),
                ));
            }

            group.remove_member(target_id);
            Ok(())
        })
        .await
    }
}
