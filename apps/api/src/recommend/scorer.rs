//! Coverage scoring: how much of a career's requirement list the user already holds.

use std::cmp::Ordering;

/// `matched / required` as a ratio in `[0, 1]`. Careers with different numbers of
/// requirements stay comparable: 2 of 2 and 5 of 5 both score 1.0.
///
/// `required` is never zero for a validated career; zero is treated as no coverage.
pub fn coverage_score(matched: usize, required: usize) -> f64 {
    if required == 0 {
        return 0.0;
    }
    (matched.min(required) as f64) / (required as f64)
}

/// Compares two `(matched, required)` coverage ratios exactly, without going
/// through floating point, so 1/3 and 2/6 compare equal.
pub fn compare_coverage(a: (usize, usize), b: (usize, usize)) -> Ordering {
    let (a_matched, a_required) = a;
    let (b_matched, b_required) = b;
    (a_matched as u128 * b_required as u128).cmp(&(b_matched as u128 * a_required as u128))
}
