//! Axum route handlers for the Recommendation API.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::recommend::career::LearningResource;
use crate::recommend::engine::{recommend, Recommendation};
use crate::recommend::service::{recommend_for_user, top};
use crate::recommend::skill::{Skill, UserSkills};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct AdHocRequest {
    #[serde(default)]
    pub skills: Vec<String>,
    pub limit: Option<usize>,
}

/// Wire form of a `Recommendation`. The score is rounded to three decimals.
#[derive(Debug, Serialize)]
pub struct RecommendationView {
    pub career: String,
    pub display_name: String,
    pub score: f64,
    pub matched_skills: Vec<Skill>,
    pub missing_skills: Vec<Skill>,
    pub next_steps: Vec<LearningResource>,
}

impl From<Recommendation> for RecommendationView {
    fn from(rec: Recommendation) -> Self {
        Self {
            career: rec.career,
            display_name: rec.display_name,
            score: round_score(rec.score),
            matched_skills: rec.matched_skills,
            missing_skills: rec.missing_skills,
            next_steps: rec.next_steps,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserRecommendationsResponse {
    pub user_id: Uuid,
    pub user_skills: UserSkills,
    pub recommendations: Vec<RecommendationView>,
}

#[derive(Debug, Serialize)]
pub struct AdHocResponse {
    pub recommendations: Vec<RecommendationView>,
}

fn round_score(score: f64) -> f64 {
    (score * 1000.0).round() / 1000.0
}

/// Requested limit, or the configured default. Zero is rejected.
fn resolve_limit(requested: Option<usize>, default: usize) -> Result<usize, AppError> {
    match requested {
        Some(0) => Err(AppError::Validation(
            "limit must be at least 1".to_string(),
        )),
        Some(limit) => Ok(limit),
        None => Ok(default),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/users/:id/recommendations
///
/// Ranks the current catalog snapshot against the user's stored skills.
pub async fn handle_user_recommendations(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Query(params): Query<LimitQuery>,
) -> Result<Json<UserRecommendationsResponse>, AppError> {
    let limit = resolve_limit(params.limit, state.config.recommendation_limit)?;
    let catalog = state.catalog.snapshot().await;

    let result = recommend_for_user(state.users.as_ref(), &catalog, user_id, limit).await?;

    Ok(Json(UserRecommendationsResponse {
        user_id: result.user_id,
        user_skills: result.user_skills,
        recommendations: result.recommendations.into_iter().map(Into::into).collect(),
    }))
}

/// POST /api/v1/recommendations
///
/// Ranks the catalog against a skill list supplied in the request body.
pub async fn handle_adhoc_recommendations(
    State(state): State<AppState>,
    Json(request): Json<AdHocRequest>,
) -> Result<Json<AdHocResponse>, AppError> {
    let limit = resolve_limit(request.limit, state.config.recommendation_limit)?;
    let user_skills = UserSkills::parse_all(&request.skills)?;
    let catalog = state.catalog.snapshot().await;

    let recommendations = top(recommend(&user_skills, &catalog), limit);

    Ok(Json(AdHocResponse {
        recommendations: recommendations.into_iter().map(Into::into).collect(),
    }))
}
