use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CareerRow {
    pub id: i64,
    pub slug: String,
    pub display_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CareerSkillRow {
    pub career_id: i64,
    pub skill: String,
    pub position: i32,
}

/// `career_id = NULL` marks a resource shared by every career.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResourceRow {
    pub id: i64,
    pub skill: String,
    pub career_id: Option<i64>,
    pub title: String,
    pub url: String,
}
