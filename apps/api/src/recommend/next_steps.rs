//! Chooses which learning resources to surface for a career's missing skills.

use crate::recommend::career::{LearningResource, ResourceProvider};
use crate::recommend::skill::Skill;

/// Upper bound on next-step resources per recommendation.
pub const MAX_NEXT_STEPS: usize = 3;

/// Resolves resources for `missing` in the order given (the career's definition
/// order) and keeps the first `MAX_NEXT_STEPS`. Skills without a registered
/// resource are skipped, so they never take a slot.
pub fn select_next_steps(
    missing: &[Skill],
    resources: &impl ResourceProvider,
) -> Vec<LearningResource> {
    missing
        .iter()
        .filter_map(|skill| resources.lookup(skill))
        .take(MAX_NEXT_STEPS)
        .cloned()
        .collect()
}
