//! User identity and skill roster storage.
//!
//! `UserStore` is the pluggable backend carried in `AppState` as `Arc<dyn UserStore>`.
//! The recommendation path only needs the narrower `UserSkillProvider` half.

use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::user::User;
use crate::recommend::skill::{Skill, UserSkills};

#[derive(Debug, Error)]
pub enum UserStoreError {
    #[error("user {0} not found")]
    UserNotFound(Uuid),

    #[error("user '{0}' not found")]
    UsernameNotFound(String),

    #[error("username is required")]
    EmptyUsername,

    #[error("username '{0}' already exists")]
    UsernameTaken(String),

    #[error("skill '{0}' is already on the roster")]
    DuplicateSkill(String),

    #[error("skill '{0}' is not on the roster")]
    SkillNotOnRoster(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Supplies the skill snapshot a recommendation pass runs against.
#[async_trait]
pub trait UserSkillProvider: Send + Sync {
    async fn current_skills(&self, user_id: Uuid) -> Result<UserSkills, UserStoreError>;
}

#[async_trait]
pub trait UserStore: UserSkillProvider {
    async fn create_user(&self, username: &str) -> Result<User, UserStoreError>;

    async fn find_by_username(&self, username: &str) -> Result<User, UserStoreError>;

    /// Skills on the roster, sorted by label.
    async fn list_skills(&self, user_id: Uuid) -> Result<Vec<Skill>, UserStoreError>;

    /// Fails with `DuplicateSkill` if the normalized skill is already present.
    async fn add_skill(&self, user_id: Uuid, skill: &Skill) -> Result<(), UserStoreError>;

    async fn remove_skill(&self, user_id: Uuid, skill: &Skill) -> Result<(), UserStoreError>;
}

/// Trims a username; blank input is rejected.
pub fn normalize_username(raw: &str) -> Result<&str, UserStoreError> {
    let username = raw.trim();
    if username.is_empty() {
        return Err(UserStoreError::EmptyUsername);
    }
    Ok(username)
}

/// Orders a roster by label, byte-wise. Backends sort here rather than in SQL
/// so the order does not depend on the database collation.
pub fn sort_roster(skills: &mut [Skill]) {
    skills.sort_by(|a, b| a.label().cmp(b.label()));
}

/// Parses stored roster labels. A label that no longer parses is skipped with a
/// warning instead of failing the whole roster.
fn roster_from_labels(user_id: Uuid, labels: &[String]) -> Vec<Skill> {
    let mut skills: Vec<Skill> = labels
        .iter()
        .filter_map(|label| match Skill::parse(label) {
            Ok(skill) => Some(skill),
            Err(e) => {
                warn!("Skipping stored skill {label:?} for user {user_id}: {e}");
                None
            }
        })
        .collect();
    sort_roster(&mut skills);
    skills
}

// ────────────────────────────────────────────────────────────────────────────
// PostgreSQL backend
// ────────────────────────────────────────────────────────────────────────────

/// Skills are stored by label. Labels are derived from the normalized key, so
/// the `(user_id, skill)` unique constraint enforces uniqueness by key.
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn ensure_user(&self, user_id: Uuid) -> Result<(), UserStoreError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

        if exists {
            Ok(())
        } else {
            Err(UserStoreError::UserNotFound(user_id))
        }
    }
}

#[async_trait]
impl UserSkillProvider for PgUserStore {
    async fn current_skills(&self, user_id: Uuid) -> Result<UserSkills, UserStoreError> {
        Ok(UserSkills::new(self.list_skills(user_id).await?))
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create_user(&self, username: &str) -> Result<User, UserStoreError> {
        let username = normalize_username(username)?;

        let result = sqlx::query_as::<_, User>(
            "INSERT INTO users (id, username) VALUES ($1, $2) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(username)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(user) => {
                info!("Created user {} ({})", user.id, user.username);
                Ok(user)
            }
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(UserStoreError::UsernameTaken(username.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_username(&self, username: &str) -> Result<User, UserStoreError> {
        let username = normalize_username(username)?;

        sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| UserStoreError::UsernameNotFound(username.to_string()))
    }

    async fn list_skills(&self, user_id: Uuid) -> Result<Vec<Skill>, UserStoreError> {
        self.ensure_user(user_id).await?;

        let labels: Vec<String> =
            sqlx::query_scalar("SELECT skill FROM user_skills WHERE user_id = $1")
                .bind(user_id)
                .fetch_all(&self.pool)
                .await?;

        Ok(roster_from_labels(user_id, &labels))
    }

    async fn add_skill(&self, user_id: Uuid, skill: &Skill) -> Result<(), UserStoreError> {
        self.ensure_user(user_id).await?;

        let inserted = sqlx::query(
            "INSERT INTO user_skills (user_id, skill) VALUES ($1, $2) ON CONFLICT (user_id, skill) DO NOTHING",
        )
        .bind(user_id)
        .bind(skill.label())
        .execute(&self.pool)
        .await?
        .rows_affected();

        if inserted == 0 {
            return Err(UserStoreError::DuplicateSkill(skill.label().to_string()));
        }

        info!("Added skill '{skill}' for user {user_id}");
        Ok(())
    }

    async fn remove_skill(&self, user_id: Uuid, skill: &Skill) -> Result<(), UserStoreError> {
        self.ensure_user(user_id).await?;

        let deleted = sqlx::query("DELETE FROM user_skills WHERE user_id = $1 AND skill = $2")
            .bind(user_id)
            .bind(skill.label())
            .execute(&self.pool)
            .await?
            .rows_affected();

        if deleted == 0 {
            return Err(UserStoreError::SkillNotOnRoster(skill.label().to_string()));
        }

        info!("Removed skill '{skill}' for user {user_id}");
        Ok(())
    }
}
