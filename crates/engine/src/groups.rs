//! Groups and the membership model.
//!
//! Historical documents contain two member record shapes: the original
//! profile-style record (just the user id plus whatever profile fields the
//! early clients stored inline) and the current `{userId, role, joinedAt}`
//! record. [`MemberRecord`] resolves the shape once at the serde boundary;
//! all role and membership questions go through [`Group::normalized_members`]
//! and [`Group::role_of`] so no call site ever branches on shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::EngineError;

/// Authorization role of a user within a group, in descending privilege.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Founder,
    Admin,
    Member,
}

impl Role {
    /// Returns the canonical role string used in the document.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Founder => "founder",
            Self::Admin => "admin",
            Self::Member => "member",
        }
    }

    pub(crate) fn can_manage(self) -> bool {
        matches!(self, Self::Founder | Self::Admin)
    }
}

impl TryFrom<&str> for Role {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "founder" => Ok(Self::Founder),
            "admin" => Ok(Self::Admin),
            "member" => Ok(Self::Member),
            other => Err(EngineError::InvalidInput(format!("invalid role: {other}"))),
        }
    }
}

/// The uniform member view, and also the shape every write emits.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupMember {
    pub user_id: Uuid,
    pub role: Role,
    pub joined_at: DateTime<Utc>,
}

/// The original member shape: a user id under `id` plus inlined profile
/// fields. Implicitly a founder who joined when the group was created.
/// The extra fields ride along untouched so rewriting the document never
/// drops data.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LegacyMember {
    pub id: Uuid,
    #[serde(flatten)]
    pub profile: serde_json::Map<String, serde_json::Value>,
}

/// One stored member record, either shape.
///
/// Deserialization tries the current shape first; a record without `userId`
/// falls through to the legacy shape.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MemberRecord {
    Current(GroupMember),
    Legacy(LegacyMember),
}

impl MemberRecord {
    pub fn user_id(&self) -> Uuid {
        match self {
            Self::Current(member) => member.user_id,
            Self::Legacy(legacy) => legacy.id,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub members: Vec<MemberRecord>,
    pub created_at: DateTime<Utc>,
    pub created_by: Uuid,
}

impl Group {
    /// Creates a group whose sole member is its founder.
    pub fn new(name: String, description: String, image_url: Option<String>, founder: Uuid) -> Self {
        let created_at = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            description,
            image_url,
            members: vec![MemberRecord::Current(GroupMember {
                user_id: founder,
                role: Role::Founder,
                joined_at: created_at,
            })],
            created_at,
            created_by: founder,
        }
    }

    /// Projects the stored member records into the uniform shape, preserving
    /// order. Legacy records become founders who joined at group creation.
    pub fn normalized_members(&self) -> Vec<GroupMember> {
        self.members
            .iter()
            .map(|record| match record {
                MemberRecord::Current(member) => member.clone(),
                MemberRecord::Legacy(legacy) => GroupMember {
                    user_id: legacy.id,
                    role: Role::Founder,
                    joined_at: self.created_at,
                },
            })
            .collect()
    }

    /// Role of `user_id` in this group, `None` when not a member.
    pub fn role_of(&self, user_id: Uuid) -> Option<Role> {
        self.members.iter().find_map(|record| match record {
            MemberRecord::Current(member) if member.user_id == user_id => Some(member.role),
            MemberRecord::Legacy(legacy) if legacy.id == user_id => Some(Role::Founder),
            _ => None,
        })
    }

    pub fn is_member(&self, user_id: Uuid) -> bool {
        self.role_of(user_id).is_some()
    }

    /// Appends a member in the current record shape. Callers check
    /// membership uniqueness first.
    pub fn push_member(&mut self, user_id: Uuid, role: Role, joined_at: DateTime<Utc>) {
        self.members.push(MemberRecord::Current(GroupMember {
            user_id,
            role,
            joined_at,
        }));
    }

    /// Rewrites the member record for `user_id` with the new role, emitting
    /// the current shape regardless of what was stored.
    pub fn set_role(&mut self, user_id: Uuid, role: Role) {
        let created_at = self.created_at;
        for record in &mut self.members {
            match record {
                MemberRecord::Current(member) if member.user_id == user_id => {
                    member.role = role;
                    return;
                }
                MemberRecord::Legacy(legacy) if legacy.id == user_id => {
                    *record = MemberRecord::Current(GroupMember {
                        user_id,
                        role,
                        joined_at: created_at,
                    });
                    return;
                }
                _ => {}
            }
        }
    }

    pub fn remove_member(&mut self, user_id: Uuid) {
        self.members.retain(|record| record.user_id() != user_id);
    }

    /// Count of members currently holding the founder role, either shape.
    pub fn founder_count(&self) -> usize {
        self.normalized_members()
            .iter()
            .filter(|m| m.role == Role::Founder)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn legacy_group() -> Group {
        serde_json::from_value(json!({
            "id": "0b8ffbf0-3a27-43c4-a85e-9f42be8da6dd",
            "name": "Hiking crew",
            "description": "weekend hikes",
            "members": [
                {
                    "id": "4bd5a6b2-31c6-4ae5-9d6e-2c1a5f3c3a01",
                    "name": "Ola",
                    "email": "ola@example.com"
                }
            ],
            "createdAt": "2020-05-01T10:00:00Z",
            "createdBy": "4bd5a6b2-31c6-4ae5-9d6e-2c1a5f3c3a01"
        }))
        .unwrap()
    }

    #[test]
    fn legacy_record_parses_as_legacy_shape() {
        let group = legacy_group();
        assert!(matches!(group.members[0], MemberRecord::Legacy(_)));
    }

    #[test]
    fn legacy_member_normalizes_to_founder_at_group_creation() {
        let group = legacy_group();
        let members = group.normalized_members();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].role, Role::Founder);
        assert_eq!(members[0].joined_at, group.created_at);
        assert_eq!(
            members[0].user_id.to_string(),
            "4bd5a6b2-31c6-4ae5-9d6e-2c1a5f3c3a01"
        );
    }

    #[test]
    fn normalization_matches_equivalent_current_shape() {
        let legacy = legacy_group();
        let user_id = legacy.members[0].user_id();

        let mut current = legacy.clone();
        current.members = vec![MemberRecord::Current(GroupMember {
            user_id,
            role: Role::Founder,
            joined_at: legacy.created_at,
        })];

        assert_eq!(legacy.normalized_members(), current.normalized_members());
    }

    #[test]
    fn role_of_sees_both_shapes() {
        let mut group = legacy_group();
        let legacy_id = group.members[0].user_id();
        let newcomer = Uuid::new_v4();
        group.push_member(newcomer, Role::Member, Utc::now());

        assert_eq!(group.role_of(legacy_id), Some(Role::Founder));
        assert_eq!(group.role_of(newcomer), Some(Role::Member));
        assert_eq!(group.role_of(Uuid::new_v4()), None);
    }

    #[test]
    fn set_role_rewrites_legacy_record_in_current_shape() {
        let mut group = legacy_group();
        let legacy_id = group.members[0].user_id();
        group.set_role(legacy_id, Role::Admin);

        match &group.members[0] {
            MemberRecord::Current(member) => {
                assert_eq!(member.role, Role::Admin);
                assert_eq!(member.joined_at, group.created_at);
            }
            MemberRecord::Legacy(_) => panic!("record not rewritten"),
        }
    }

    #[test]
    fn legacy_profile_fields_survive_round_trip() {
        let group = legacy_group();
        let value = serde_json::to_value(&group).unwrap();
        assert_eq!(value["members"][0]["email"], "ola@example.com");
    }

    #[test]
    fn role_round_trip() {
        for role in [Role::Founder, Role::Admin, Role::Member] {
            assert_eq!(Role::try_from(role.as_str()).unwrap(), role);
        }
        assert!(Role::try_from("owner").is_err());
    }
}
