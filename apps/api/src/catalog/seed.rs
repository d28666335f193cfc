//! Built-in career catalog, used to seed the database and by `StaticCatalogProvider`.

use anyhow::{Context, Result};
use sqlx::PgPool;
use tracing::info;

use crate::recommend::career::{Career, Catalog, CatalogError, LearningResource};
use crate::recommend::skill::Skill;

pub struct SeedCareer {
    pub slug: &'static str,
    pub display_name: &'static str,
    pub skills: &'static [&'static str],
}

pub const SEED_CAREERS: &[SeedCareer] = &[
    SeedCareer {
        slug: "servicenow-developer",
        display_name: "ServiceNow Developer",
        skills: &[
            "Troubleshooting",
            "Creativity",
            "Scripting",
            "Configuration",
            "Integration",
            "Flexibility",
        ],
    },
    SeedCareer {
        slug: "biomedical-equipment-technician",
        display_name: "Biomedical Equipment Technician",
        skills: &[
            "Troubleshooting",
            "Schematics",
            "Hardware",
            "Organization",
            "Adaptability",
            "Magnets",
        ],
    },
    SeedCareer {
        slug: "penguin-counter",
        display_name: "Penguin Counter",
        skills: &[
            "Basic Statistics",
            "Patience",
            "Attention to Detail",
            "Resistance to Cold",
            "Computer",
        ],
    },
];

/// (skill, title, url), shared by every career.
pub const SEED_RESOURCES: &[(&str, &str, &str)] = &[
    ("Troubleshooting", "Root Cause Analysis Basics", "https://example.com/root-cause-analysis"),
    ("Creativity", "Creative Problem Solving Toolkit", "https://example.com/creative-problem-solving"),
    ("Scripting", "Intro to Scripting Concepts", "https://example.com/scripting-intro"),
    ("Configuration", "Configuration Management Overview", "https://example.com/config-management"),
    ("Integration", "API Integration Fundamentals", "https://example.com/api-integration"),
    ("Flexibility", "Working in Agile Environments", "https://example.com/agile-flexibility"),
    ("Schematics", "Reading Technical Schematics", "https://example.com/schematics"),
    ("Hardware", "Hardware Fundamentals", "https://example.com/hardware-fundamentals"),
    ("Organization", "Basic Technical Documentation Skills", "https://example.com/documentation"),
    ("Adaptability", "Adaptability at Work", "https://example.com/adaptability"),
    ("Magnets", "MRI Safety and Magnet Awareness", "https://example.com/mri-safety"),
    ("Basic Statistics", "Statistics for Beginners", "https://example.com/basic-stats"),
    ("Patience", "Developing Focus and Patience", "https://example.com/patience"),
    ("Attention to Detail", "Quality Checking Techniques", "https://example.com/attention-to-detail"),
    ("Resistance to Cold", "Cold Weather Field Readiness", "https://example.com/cold-weather"),
    ("Computer", "Computer Basics Refresher", "https://example.com/computer-basics"),
];

/// Builds the seed data as an in-memory catalog.
pub fn seed_catalog() -> Result<Catalog, CatalogError> {
    let mut builder = Catalog::builder();

    for seed in SEED_CAREERS {
        builder = builder.career(Career::parse(seed.slug, seed.display_name, seed.skills)?);
    }

    for (skill, title, url) in SEED_RESOURCES {
        let skill = Skill::parse(skill).map_err(|e| CatalogError::InvalidResource {
            skill: skill.to_string(),
            reason: e.to_string(),
        })?;
        builder = builder.resource(LearningResource::new(skill, *title, *url)?);
    }

    builder.build()
}

/// Inserts the seed catalog. Rows that already exist are left untouched, so this
/// is safe to run on every startup.
pub async fn seed_database(pool: &PgPool) -> Result<()> {
    // Validate before writing anything
    let catalog = seed_catalog().context("built-in seed catalog is invalid")?;

    let mut tx = pool.begin().await?;

    for career in catalog.careers() {
        sqlx::query(
            "INSERT INTO careers (slug, display_name) VALUES ($1, $2) ON CONFLICT (slug) DO NOTHING",
        )
        .bind(career.id())
        .bind(career.display_name())
        .execute(&mut *tx)
        .await?;

        let career_id: i64 = sqlx::query_scalar("SELECT id FROM careers WHERE slug = $1")
            .bind(career.id())
            .fetch_one(&mut *tx)
            .await?;

        for (position, skill) in career.required_skills().iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO career_skills (career_id, skill, position)
                VALUES ($1, $2, $3)
                ON CONFLICT (career_id, skill) DO NOTHING
                "#,
            )
            .bind(career_id)
            .bind(skill.label())
            .bind(position as i32)
            .execute(&mut *tx)
            .await?;
        }
    }

    for (skill, title, url) in SEED_RESOURCES {
        let skill = Skill::parse(skill)?;
        sqlx::query(
            r#"
            INSERT INTO resources (skill, title, url)
            VALUES ($1, $2, $3)
            ON CONFLICT (skill) WHERE career_id IS NULL DO NOTHING
            "#,
        )
        .bind(skill.label())
        .bind(*title)
        .bind(*url)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    info!(
        "Seeded catalog: {} careers, {} resources",
        catalog.career_count(),
        catalog.resource_count()
    );
    Ok(())
}
