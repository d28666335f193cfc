//! Recommendation engine: ranks every career in a catalog snapshot for one user.
//!
//! Pure and synchronous: no I/O, no logging, no state kept between calls.
//!
//! Algorithm, per career in catalog definition order:
//! 1. `match_skills` → matched / missing
//! 2. drop the career if nothing matched
//! 3. `coverage_score` → matched / required
//! 4. `select_next_steps` over the missing skills (capped)
//!
//! Then a stable sort: score desc, matched count desc, catalog order.

use std::cmp::Ordering;

use serde::Serialize;

use crate::recommend::career::{Career, Catalog, LearningResource};
use crate::recommend::matcher::{match_skills, SkillMatch};
use crate::recommend::next_steps::select_next_steps;
use crate::recommend::scorer::{compare_coverage, coverage_score};
use crate::recommend::skill::{Skill, UserSkills};

/// One ranked career for a user. Transient: built per call, never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub career: String,
    pub display_name: String,
    pub score: f64,
    pub matched_skills: Vec<Skill>,
    pub missing_skills: Vec<Skill>,
    pub next_steps: Vec<LearningResource>,
}

impl Recommendation {
    pub fn required_count(&self) -> usize {
        self.matched_skills.len() + self.missing_skills.len()
    }
}

/// Ranks all careers in `catalog` that share at least one skill with `user`.
/// No truncation happens here; callers page or limit the result themselves.
pub fn recommend(user: &UserSkills, catalog: &Catalog) -> Vec<Recommendation> {
    if user.is_empty() {
        return Vec::new();
    }

    let mut recommendations: Vec<Recommendation> = catalog
        .careers()
        .iter()
        .filter_map(|career| evaluate(user, career, catalog))
        .collect();

    // sort_by is stable, so remaining ties keep catalog order
    recommendations.sort_by(rank);
    recommendations
}

fn evaluate(user: &UserSkills, career: &Career, catalog: &Catalog) -> Option<Recommendation> {
    let SkillMatch { matched, missing } = match_skills(user, career);
    if matched.is_empty() {
        return None;
    }

    let score = coverage_score(matched.len(), career.required_skills().len());
    let next_steps = if missing.is_empty() {
        Vec::new()
    } else {
        select_next_steps(&missing, &catalog.resources_for(career.id()))
    };

    Some(Recommendation {
        career: career.id().to_string(),
        display_name: career.display_name().to_string(),
        score,
        matched_skills: matched,
        missing_skills: missing,
        next_steps,
    })
}

fn rank(a: &Recommendation, b: &Recommendation) -> Ordering {
    let coverage = |r: &Recommendation| (r.matched_skills.len(), r.required_count());
    compare_coverage(coverage(b), coverage(a))
        .then_with(|| b.matched_skills.len().cmp(&a.matched_skills.len()))
}
