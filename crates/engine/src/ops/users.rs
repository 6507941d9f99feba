use uuid::Uuid;

use crate::{EngineError, ResultEngine, User};

use super::{Engine, access::require_user, normalize_required_text};

impl Engine {
    /// Maps request credentials to a user, `None` when they resolve to
    /// nobody. The HTTP layer turns `None` into 401.
    pub async fn resolve_actor(
        &self,
        username: &str,
        password: &str,
    ) -> ResultEngine<Option<User>> {
        self.read(|doc| {
            Ok(doc
                .users
                .iter()
                .find(|u| u.username == username && u.password == password)
                .cloned())
        })
        .await
    }

    pub async fn register_user(&self, username: &str, password: &str) -> ResultEngine<User> {
        let username = normalize_required_text(username, "username")?;
        if password.is_empty() {
            return Err(EngineError::InvalidInput(
                "password must not be empty".to_string(),
            ));
        }
        let password = password.to_string();

        self.mutate(move |doc| {
            if doc.user_by_username(&username).is_some() {
                return Err(EngineError::InvalidInput(
                    "username already taken".to_string(),
                ));
            }
            let user = User::new(username, password);
            doc.users.push(user.clone());
            Ok(user)
        })
        .await
    }

    /// Records a friendship in both users' friend sets.
    ///
    /// The full friend-request flow lives outside this engine; this is the
    /// minimal write the invitation precondition reads from.
    pub async fn add_friend(&self, actor_id: Uuid, username: &str) -> ResultEngine<()> {
        let username = username.to_string();

        self.mutate(move |doc| {
            require_user(doc, actor_id)?;
            let other = doc
                .user_by_username(&username)
                .ok_or_else(|| EngineError::NotFound("user".to_string()))?;
            let other_id = other.id;
            if other_id == actor_id {
                return Err(EngineError::InvalidInput(
                    "cannot befriend yourself".to_string(),
                ));
            }

            for (a, b) in [(actor_id, other_id), (other_id, actor_id)] {
                if let Some(user) = doc.user_mut(a)
                    && !user.friends.contains(&b)
                {
                    user.friends.push(b);
                }
            }
            Ok(())
        })
        .await
    }
}
