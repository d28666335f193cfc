//! Catalog entities: careers, learning resources, and the validated catalog snapshot.
//!
//! Everything here is validated once at construction. Downstream code (matcher,
//! selector, engine) assumes a `Catalog` is well-formed and never re-checks it.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use thiserror::Error;

use crate::recommend::skill::Skill;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("invalid career definition '{career}': {reason}")]
    InvalidCareerDefinition { career: String, reason: String },

    #[error("duplicate career identifier '{0}'")]
    DuplicateCareer(String),

    #[error("invalid learning resource for '{skill}': {reason}")]
    InvalidResource { skill: String, reason: String },
}

/// A learning resource that closes the gap for one skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LearningResource {
    pub skill: Skill,
    pub title: String,
    pub url: String,
}

impl LearningResource {
    pub fn new(
        skill: Skill,
        title: impl Into<String>,
        url: impl Into<String>,
    ) -> Result<Self, CatalogError> {
        let title = title.into().trim().to_string();
        let url = url.into().trim().to_string();

        if title.is_empty() || url.is_empty() {
            return Err(CatalogError::InvalidResource {
                skill: skill.label().to_string(),
                reason: "title and url are required".to_string(),
            });
        }

        Ok(Self { skill, title, url })
    }
}

/// A target job role and the skills it requires, in definition order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Career {
    id: String,
    display_name: String,
    required_skills: Vec<Skill>,
}

impl Career {
    /// Rejects an empty identifier, an empty requirement list, and duplicate
    /// requirements (by normalized key).
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        required_skills: Vec<Skill>,
    ) -> Result<Self, CatalogError> {
        let id = id.into().trim().to_string();
        let display_name = display_name.into().trim().to_string();

        let invalid = |reason: String| CatalogError::InvalidCareerDefinition {
            career: id.clone(),
            reason,
        };

        if id.is_empty() {
            return Err(invalid("identifier cannot be empty".to_string()));
        }
        if required_skills.is_empty() {
            return Err(invalid("required skills cannot be empty".to_string()));
        }

        {
            let mut seen = HashSet::with_capacity(required_skills.len());
            for skill in &required_skills {
                if !seen.insert(skill.key()) {
                    return Err(invalid(format!("duplicate required skill '{skill}'")));
                }
            }
        }

        let display_name = if display_name.is_empty() {
            id.clone()
        } else {
            display_name
        };

        Ok(Self {
            id,
            display_name,
            required_skills,
        })
    }

    /// Builds a career from raw skill text. Blank skill text makes the career invalid.
    pub fn parse<I, S>(
        id: impl Into<String>,
        display_name: impl Into<String>,
        raw_skills: I,
    ) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let id = id.into();
        let skills = raw_skills
            .into_iter()
            .map(|s| Skill::parse(s.as_ref()))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| CatalogError::InvalidCareerDefinition {
                career: id.clone(),
                reason: e.to_string(),
            })?;
        Career::new(id, display_name, skills)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn required_skills(&self) -> &[Skill] {
        &self.required_skills
    }
}

/// Resolves the learning resource registered for a skill.
pub trait ResourceProvider {
    fn lookup(&self, skill: &Skill) -> Option<&LearningResource>;
}

impl ResourceProvider for HashMap<Skill, LearningResource> {
    fn lookup(&self, skill: &Skill) -> Option<&LearningResource> {
        self.get(skill)
    }
}

/// Resource view for one career: career-specific entries win over global ones.
pub struct CareerResources<'a> {
    overrides: Option<&'a HashMap<Skill, LearningResource>>,
    global: &'a HashMap<Skill, LearningResource>,
}

impl ResourceProvider for CareerResources<'_> {
    fn lookup(&self, skill: &Skill) -> Option<&LearningResource> {
        self.overrides
            .and_then(|o| o.get(skill))
            .or_else(|| self.global.get(skill))
    }
}

/// Validated, read-only catalog snapshot: careers in definition order plus the
/// resource mappings that belong to the same version.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    careers: Vec<Career>,
    global_resources: HashMap<Skill, LearningResource>,
    career_resources: HashMap<String, HashMap<Skill, LearningResource>>,
}

impl Catalog {
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    pub fn careers(&self) -> &[Career] {
        &self.careers
    }

    pub fn career(&self, id: &str) -> Option<&Career> {
        self.careers.iter().find(|c| c.id == id)
    }

    pub fn resources_for(&self, career_id: &str) -> CareerResources<'_> {
        CareerResources {
            overrides: self.career_resources.get(career_id),
            global: &self.global_resources,
        }
    }

    pub fn career_count(&self) -> usize {
        self.careers.len()
    }

    pub fn resource_count(&self) -> usize {
        self.global_resources.len()
            + self
                .career_resources
                .values()
                .map(HashMap::len)
                .sum::<usize>()
    }
}

/// Collects careers and resources and validates them as a whole.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    careers: Vec<Career>,
    global_resources: Vec<LearningResource>,
    career_resources: Vec<(String, LearningResource)>,
}

impl CatalogBuilder {
    pub fn career(mut self, career: Career) -> Self {
        self.careers.push(career);
        self
    }

    /// Registers a resource used for this skill under every career.
    pub fn resource(mut self, resource: LearningResource) -> Self {
        self.global_resources.push(resource);
        self
    }

    /// Registers a resource used for this skill under one career only.
    pub fn career_resource(
        mut self,
        career_id: impl Into<String>,
        resource: LearningResource,
    ) -> Self {
        self.career_resources.push((career_id.into(), resource));
        self
    }

    pub fn build(self) -> Result<Catalog, CatalogError> {
        let mut ids = HashSet::with_capacity(self.careers.len());
        for career in &self.careers {
            if !ids.insert(career.id.clone()) {
                return Err(CatalogError::DuplicateCareer(career.id.clone()));
            }
        }

        let mut global_resources = HashMap::with_capacity(self.global_resources.len());
        for resource in self.global_resources {
            let skill = resource.skill.clone();
            if global_resources.insert(skill.clone(), resource).is_some() {
                return Err(duplicate_resource(&skill));
            }
        }

        let mut career_resources: HashMap<String, HashMap<Skill, LearningResource>> =
            HashMap::new();
        for (career_id, resource) in self.career_resources {
            if !ids.contains(career_id.as_str()) {
                return Err(CatalogError::InvalidResource {
                    skill: resource.skill.label().to_string(),
                    reason: format!("unknown career '{career_id}'"),
                });
            }
            let skill = resource.skill.clone();
            if career_resources
                .entry(career_id)
                .or_default()
                .insert(skill.clone(), resource)
                .is_some()
            {
                return Err(duplicate_resource(&skill));
            }
        }

        Ok(Catalog {
            careers: self.careers,
            global_resources,
            career_resources,
        })
    }
}

fn duplicate_resource(skill: &Skill) -> CatalogError {
    CatalogError::InvalidResource {
        skill: skill.label().to_string(),
        reason: "more than one resource registered".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skill(s: &str) -> Skill {
        Skill::parse(s).unwrap()
    }

    fn resource(s: &str, title: &str) -> LearningResource {
        LearningResource::new(skill(s), title, format!("https://example.com/{s}")).unwrap()
    }

    #[test]
    fn test_career_rejects_empty_requirements() {
        let err = Career::new("empty", "Empty", vec![]).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::InvalidCareerDefinition { ref career, .. } if career == "empty"
        ));
    }

    #[test]
    fn test_career_rejects_duplicate_requirements_by_key() {
        let err = Career::parse("analyst", "Analyst", ["SQL", " sql "]).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidCareerDefinition { .. }));
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_career_rejects_blank_skill_text() {
        let err = Career::parse("analyst", "Analyst", ["python", "  "]).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidCareerDefinition { .. }));
    }

    #[test]
    fn test_career_preserves_definition_order() {
        let career = Career::parse("analyst", "Data Analyst", ["SQL", "Python", "Excel"]).unwrap();
        let keys: Vec<_> = career.required_skills().iter().map(Skill::key).collect();
        assert_eq!(keys, ["sql", "python", "excel"]);
    }

    #[test]
    fn test_display_name_falls_back_to_id() {
        let career = Career::parse("analyst", " ", ["sql"]).unwrap();
        assert_eq!(career.display_name(), "analyst");
    }

    #[test]
    fn test_resource_requires_title_and_url() {
        assert!(LearningResource::new(skill("sql"), "", "https://x").is_err());
        assert!(LearningResource::new(skill("sql"), "SQL 101", " ").is_err());
    }

    #[test]
    fn test_builder_rejects_duplicate_career_ids() {
        let a = Career::parse("analyst", "A", ["sql"]).unwrap();
        let b = Career::parse("analyst", "B", ["excel"]).unwrap();
        let err = Catalog::builder().career(a).career(b).build().unwrap_err();
        assert_eq!(err, CatalogError::DuplicateCareer("analyst".to_string()));
    }

    #[test]
    fn test_builder_rejects_duplicate_global_resource() {
        let err = Catalog::builder()
            .resource(resource("sql", "One"))
            .resource(resource("SQL", "Two"))
            .build()
            .unwrap_err();
        assert!(matches!(err, CatalogError::InvalidResource { .. }));
    }

    #[test]
    fn test_builder_rejects_override_for_unknown_career() {
        let err = Catalog::builder()
            .career_resource("ghost", resource("sql", "SQL"))
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("ghost"));
    }

    #[test]
    fn test_career_override_wins_over_global() {
        let analyst = Career::parse("analyst", "Analyst", ["sql", "excel"]).unwrap();
        let dba = Career::parse("dba", "DBA", ["sql"]).unwrap();
        let catalog = Catalog::builder()
            .career(analyst)
            .career(dba)
            .resource(resource("sql", "SQL Basics"))
            .career_resource("dba", resource("sql", "Query Tuning"))
            .build()
            .unwrap();

        let sql = skill("sql");
        assert_eq!(
            catalog.resources_for("analyst").lookup(&sql).unwrap().title,
            "SQL Basics"
        );
        assert_eq!(
            catalog.resources_for("dba").lookup(&sql).unwrap().title,
            "Query Tuning"
        );
        assert!(catalog.resources_for("analyst").lookup(&skill("excel")).is_none());
        assert_eq!(catalog.resource_count(), 2);
        assert_eq!(catalog.career_count(), 2);
    }
}
