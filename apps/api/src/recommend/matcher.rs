//! Partitions a career's required skills against a user's skill snapshot.

use crate::recommend::career::Career;
use crate::recommend::skill::{Skill, UserSkills};

/// Matched and missing skills for one career, each in the career's definition order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillMatch {
    pub matched: Vec<Skill>,
    pub missing: Vec<Skill>,
}

/// Splits `career.required_skills()` into the skills the user holds and the ones
/// they lack. The two halves are disjoint and together equal the requirement list.
pub fn match_skills(user: &UserSkills, career: &Career) -> SkillMatch {
    let (matched, missing) = career
        .required_skills()
        .iter()
        .cloned()
        .partition(|skill| user.contains(skill));

    SkillMatch { matched, missing }
}
