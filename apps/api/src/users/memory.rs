//! In-memory `UserStore` for handler and service tests.

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::models::user::User;
use crate::recommend::skill::{Skill, UserSkills};
use crate::users::store::{
    normalize_username, sort_roster, UserSkillProvider, UserStore, UserStoreError,
};

#[derive(Default)]
pub struct MemoryUserStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    users: Vec<User>,
    skills: HashMap<Uuid, BTreeSet<Skill>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Inner {
    fn roster_mut(&mut self, user_id: Uuid) -> Result<&mut BTreeSet<Skill>, UserStoreError> {
        self.skills
            .get_mut(&user_id)
            .ok_or(UserStoreError::UserNotFound(user_id))
    }
}

#[async_trait]
impl UserSkillProvider for MemoryUserStore {
    async fn current_skills(&self, user_id: Uuid) -> Result<UserSkills, UserStoreError> {
        let inner = self.inner.lock().await;
        inner
            .skills
            .get(&user_id)
            .map(|roster| roster.iter().cloned().collect())
            .ok_or(UserStoreError::UserNotFound(user_id))
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create_user(&self, username: &str) -> Result<User, UserStoreError> {
        let username = normalize_username(username)?;
        let mut inner = self.inner.lock().await;

        if inner.users.iter().any(|u| u.username == username) {
            return Err(UserStoreError::UsernameTaken(username.to_string()));
        }

        let user = User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            created_at: Utc::now(),
        };
        inner.users.push(user.clone());
        inner.skills.insert(user.id, BTreeSet::new());
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<User, UserStoreError> {
        let username = normalize_username(username)?;
        let inner = self.inner.lock().await;
        inner
            .users
            .iter()
            .find(|u| u.username == username)
            .cloned()
            .ok_or_else(|| UserStoreError::UsernameNotFound(username.to_string()))
    }

    async fn list_skills(&self, user_id: Uuid) -> Result<Vec<Skill>, UserStoreError> {
        let mut inner = self.inner.lock().await;
        let mut skills: Vec<Skill> = inner.roster_mut(user_id)?.iter().cloned().collect();
        sort_roster(&mut skills);
        Ok(skills)
    }

    async fn add_skill(&self, user_id: Uuid, skill: &Skill) -> Result<(), UserStoreError> {
        let mut inner = self.inner.lock().await;
        if !inner.roster_mut(user_id)?.insert(skill.clone()) {
            return Err(UserStoreError::DuplicateSkill(skill.label().to_string()));
        }
        Ok(())
    }

    async fn remove_skill(&self, user_id: Uuid, skill: &Skill) -> Result<(), UserStoreError> {
        let mut inner = self.inner.lock().await;
        if !inner.roster_mut(user_id)?.remove(skill) {
            return Err(UserStoreError::SkillNotOnRoster(skill.label().to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skill(s: &str) -> Skill {
        Skill::parse(s).unwrap()
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let store = MemoryUserStore::new();
        store.create_user("ada").await.unwrap();
        assert!(matches!(
            store.create_user(" ada ").await,
            Err(UserStoreError::UsernameTaken(_))
        ));
    }

    #[tokio::test]
    async fn test_roster_rejects_duplicates_by_normalized_key() {
        let store = MemoryUserStore::new();
        let user = store.create_user("ada").await.unwrap();

        store.add_skill(user.id, &skill("Python")).await.unwrap();
        assert!(matches!(
            store.add_skill(user.id, &skill("  python")).await,
            Err(UserStoreError::DuplicateSkill(_))
        ));
    }

    #[tokio::test]
    async fn test_remove_missing_skill_fails() {
        let store = MemoryUserStore::new();
        let user = store.create_user("ada").await.unwrap();
        assert!(matches!(
            store.remove_skill(user.id, &skill("sql")).await,
            Err(UserStoreError::SkillNotOnRoster(_))
        ));
    }

    #[tokio::test]
    async fn test_unknown_user_surfaces_not_found() {
        let store = MemoryUserStore::new();
        let id = Uuid::new_v4();
        assert!(matches!(
            store.current_skills(id).await,
            Err(UserStoreError::UserNotFound(found)) if found == id
        ));
    }
}
