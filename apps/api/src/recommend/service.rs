//! Glue between the user-skill collaborator and the pure engine.

use tracing::debug;
use uuid::Uuid;

use crate::recommend::career::Catalog;
use crate::recommend::engine::{recommend, Recommendation};
use crate::recommend::skill::UserSkills;
use crate::users::store::{UserSkillProvider, UserStoreError};

#[derive(Debug, Clone)]
pub struct UserRecommendations {
    pub user_id: Uuid,
    pub user_skills: UserSkills,
    pub recommendations: Vec<Recommendation>,
}

/// Fetches the user's current skills, ranks the catalog, and keeps the first
/// `limit` entries. `UserNotFound` and storage failures are returned unchanged.
pub async fn recommend_for_user<P>(
    users: &P,
    catalog: &Catalog,
    user_id: Uuid,
    limit: usize,
) -> Result<UserRecommendations, UserStoreError>
where
    P: UserSkillProvider + ?Sized,
{
    let user_skills = users.current_skills(user_id).await?;
    let recommendations = top(recommend(&user_skills, catalog), limit);

    debug!(
        "Ranked {} careers for user {user_id} ({} skills)",
        recommendations.len(),
        user_skills.len()
    );

    Ok(UserRecommendations {
        user_id,
        user_skills,
        recommendations,
    })
}

/// Keeps the first `limit` ranked entries.
pub fn top(mut recommendations: Vec<Recommendation>, limit: usize) -> Vec<Recommendation> {
    recommendations.truncate(limit);
    recommendations
}
