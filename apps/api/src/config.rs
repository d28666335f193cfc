use std::str::FromStr;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub port: u16,
    pub rust_log: String,
    /// Page size for recommendation responses when the caller gives no `limit`.
    pub recommendation_limit: usize,
    /// Insert the built-in catalog at startup (idempotent).
    pub seed_catalog: bool,
    pub catalog_source: CatalogSource,
}

/// Where the career catalog is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogSource {
    /// `careers`, `career_skills` and `resources` tables.
    Database,
    /// The built-in seed catalog, never touching the catalog tables.
    Static,
}

impl FromStr for CatalogSource {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "database" | "db" | "postgres" => Ok(CatalogSource::Database),
            "static" | "builtin" => Ok(CatalogSource::Static),
            other => anyhow::bail!("unknown catalog source '{other}'"),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            database_max_connections: env_or("DATABASE_MAX_CONNECTIONS", 10)?,
            port: env_or("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            recommendation_limit: env_or("RECOMMENDATION_LIMIT", 3)?,
            seed_catalog: match std::env::var("SEED_CATALOG") {
                Ok(v) => parse_flag(&v).context("SEED_CATALOG must be true or false")?,
                Err(_) => true,
            },
            catalog_source: match std::env::var("CATALOG_SOURCE") {
                Ok(v) => v.parse().context("CATALOG_SOURCE must be 'database' or 'static'")?,
                Err(_) => CatalogSource::Database,
            },
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}

fn parse_flag(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("unrecognized flag value '{other}'"),
    }
}
