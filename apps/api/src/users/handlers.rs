//! Axum route handlers for users and their skill rosters.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::User;
use crate::recommend::skill::Skill;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UsernameRequest {
    #[serde(default)]
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SkillRequest {
    #[serde(default)]
    pub skill: String,
}

#[derive(Debug, Serialize)]
pub struct SkillListResponse {
    pub user_id: Uuid,
    pub skills: Vec<Skill>,
}

#[derive(Debug, Serialize)]
pub struct SkillChangeResponse {
    pub message: &'static str,
    pub skill: Skill,
}

/// POST /api/v1/users
pub async fn handle_create_user(
    State(state): State<AppState>,
    Json(req): Json<UsernameRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let user = state.users.create_user(&req.username).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// POST /api/v1/login
///
/// Looks the user up by name. There is no credential check.
pub async fn handle_login(
    State(state): State<AppState>,
    Json(req): Json<UsernameRequest>,
) -> Result<Json<UserResponse>, AppError> {
    let user = state.users.find_by_username(&req.username).await?;
    Ok(Json(user.into()))
}

/// GET /api/v1/users/:id/skills
pub async fn handle_list_skills(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<SkillListResponse>, AppError> {
    let skills = state.users.list_skills(user_id).await?;
    Ok(Json(SkillListResponse { user_id, skills }))
}

/// POST /api/v1/users/:id/skills
pub async fn handle_add_skill(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(req): Json<SkillRequest>,
) -> Result<Json<SkillChangeResponse>, AppError> {
    let skill = Skill::parse(&req.skill)
        .map_err(|_| AppError::Validation("skill is required".to_string()))?;

    state.users.add_skill(user_id, &skill).await?;

    Ok(Json(SkillChangeResponse {
        message: "skill added",
        skill,
    }))
}

/// DELETE /api/v1/users/:id/skills/:skill
pub async fn handle_remove_skill(
    State(state): State<AppState>,
    Path((user_id, raw_skill)): Path<(Uuid, String)>,
) -> Result<Json<SkillChangeResponse>, AppError> {
    let skill = Skill::parse(&raw_skill)
        .map_err(|_| AppError::Validation("skill is required".to_string()))?;

    state.users.remove_skill(user_id, &skill).await?;

    Ok(Json(SkillChangeResponse {
        message: "skill removed",
        skill,
    }))
}
