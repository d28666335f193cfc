//! Catalog providers: where a `Catalog` snapshot comes from.
//!
//! A provider returns careers and resources together as one validated snapshot,
//! so a caller never sees requirements from one version and resources from another.
//!
//! Default: `PgCatalogProvider`. `StaticCatalogProvider` serves the built-in
//! seed catalog (`CATALOG_SOURCE=static`).

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;

use crate::catalog::seed::seed_catalog;
use crate::models::catalog::{CareerRow, CareerSkillRow, ResourceRow};
use crate::recommend::career::{Career, Catalog, CatalogError, LearningResource};
use crate::recommend::skill::Skill;

#[derive(Debug, Error)]
pub enum CatalogLoadError {
    #[error("catalog unavailable: {0}")]
    Unavailable(String),

    #[error(transparent)]
    Invalid(#[from] CatalogError),
}

#[async_trait]
pub trait CatalogProvider: Send + Sync {
    async fn load_catalog(&self) -> Result<Catalog, CatalogLoadError>;

    /// Short backend label for logs.
    fn backend(&self) -> &'static str;
}

// ────────────────────────────────────────────────────────────────────────────
// StaticCatalogProvider
// ────────────────────────────────────────────────────────────────────────────

pub struct StaticCatalogProvider(Catalog);

impl StaticCatalogProvider {
    /// Serves the built-in seed catalog.
    pub fn seeded() -> Result<Self, CatalogError> {
        seed_catalog().map(Self)
    }
}

#[async_trait]
impl CatalogProvider for StaticCatalogProvider {
    async fn load_catalog(&self) -> Result<Catalog, CatalogLoadError> {
        Ok(self.0.clone())
    }

    fn backend(&self) -> &'static str {
        "static"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// PgCatalogProvider
// ────────────────────────────────────────────────────────────────────────────

/// Reads `careers`, `career_skills` and `resources` inside one read-only
/// transaction so the three queries observe the same data.
pub struct PgCatalogProvider {
    pool: PgPool,
}

impl PgCatalogProvider {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_rows(
        &self,
    ) -> Result<(Vec<CareerRow>, Vec<CareerSkillRow>, Vec<ResourceRow>), sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ READ ONLY")
            .execute(&mut *tx)
            .await?;

        let careers =
            sqlx::query_as::<_, CareerRow>("SELECT id, slug, display_name FROM careers ORDER BY id")
                .fetch_all(&mut *tx)
                .await?;

        let skills = sqlx::query_as::<_, CareerSkillRow>(
            "SELECT career_id, skill, position FROM career_skills ORDER BY career_id, position",
        )
        .fetch_all(&mut *tx)
        .await?;

        let resources = sqlx::query_as::<_, ResourceRow>(
            "SELECT id, skill, career_id, title, url FROM resources ORDER BY id",
        )
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok((careers, skills, resources))
    }
}

#[async_trait]
impl CatalogProvider for PgCatalogProvider {
    async fn load_catalog(&self) -> Result<Catalog, CatalogLoadError> {
        let (careers, skills, resources) = self
            .fetch_rows()
            .await
            .map_err(|e| CatalogLoadError::Unavailable(e.to_string()))?;

        Ok(assemble_catalog(careers, skills, resources)?)
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}

/// Turns catalog rows into a validated `Catalog`.
///
/// `careers` is expected in definition order and `skills` in `position` order per
/// career. A career row without skill rows fails as `InvalidCareerDefinition`.
pub fn assemble_catalog(
    careers: Vec<CareerRow>,
    skills: Vec<CareerSkillRow>,
    resources: Vec<ResourceRow>,
) -> Result<Catalog, CatalogError> {
    let mut skills_by_career: HashMap<i64, Vec<String>> = HashMap::new();
    for row in skills {
        skills_by_career
            .entry(row.career_id)
            .or_default()
            .push(row.skill);
    }

    let slugs: HashMap<i64, String> = careers
        .iter()
        .map(|c| (c.id, c.slug.clone()))
        .collect();

    let mut builder = Catalog::builder();
    for row in careers {
        let required = skills_by_career.remove(&row.id).unwrap_or_default();
        builder = builder.career(Career::parse(row.slug, row.display_name, required)?);
    }

    for row in resources {
        let skill = Skill::parse(&row.skill).map_err(|e| CatalogError::InvalidResource {
            skill: row.skill.clone(),
            reason: e.to_string(),
        })?;
        let resource = LearningResource::new(skill, row.title, row.url)?;

        builder = match row.career_id {
            None => builder.resource(resource),
            Some(career_id) => {
                let slug = slugs.get(&career_id).cloned().unwrap_or_else(|| career_id.to_string());
                builder.career_resource(slug, resource)
            }
        };
    }

    builder.build()
}
