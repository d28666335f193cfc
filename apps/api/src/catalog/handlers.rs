use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::recommend::career::{Career, Catalog, LearningResource, ResourceProvider};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CareerListing {
    #[serde(flatten)]
    pub career: Career,
    /// Resources registered for this career's skills, in requirement order.
    pub resources: Vec<LearningResource>,
}

#[derive(Debug, Serialize)]
pub struct ReloadResponse {
    pub careers: usize,
    pub resources: usize,
}

fn listing(catalog: &Catalog, career: &Career) -> CareerListing {
    let lookup = catalog.resources_for(career.id());
    CareerListing {
        career: career.clone(),
        resources: career
            .required_skills()
            .iter()
            .filter_map(|skill| lookup.lookup(skill).cloned())
            .collect(),
    }
}

/// GET /api/v1/careers
pub async fn handle_list_careers(State(state): State<AppState>) -> Json<Vec<CareerListing>> {
    let catalog = state.catalog.snapshot().await;
    let listings = catalog
        .careers()
        .iter()
        .map(|career| listing(&catalog, career))
        .collect();
    Json(listings)
}

/// GET /api/v1/careers/:id
pub async fn handle_get_career(
    State(state): State<AppState>,
    Path(career_id): Path<String>,
) -> Result<Json<CareerListing>, AppError> {
    let catalog = state.catalog.snapshot().await;
    let career = catalog
        .career(&career_id)
        .ok_or_else(|| AppError::NotFound(format!("Career {career_id} not found")))?;
    Ok(Json(listing(&catalog, career)))
}

/// POST /api/v1/catalog/reload
///
/// Re-reads the catalog from its provider. A failed reload leaves the current
/// snapshot in place.
pub async fn handle_reload_catalog(
    State(state): State<AppState>,
) -> Result<Json<ReloadResponse>, AppError> {
    let catalog = state.catalog.reload().await?;
    info!("Catalog reloaded");

    Ok(Json(ReloadResponse {
        careers: catalog.career_count(),
        resources: catalog.resource_count(),
    }))
}
