//! Modified Palmer index selection.
//!
//! The classical index must revisit earlier periods once a spell's fate is
//! known. The modified index instead blends the established spell with the
//! competing potential spell, weighted by the probability that the
//! established spell has ended, so each period's value is final when
//! emitted.

use crate::state::SPELL_THRESHOLD;

/// Selects the modified Palmer index for one period.
///
/// * `|x3| <= 0.5`: the potential spell with the larger magnitude (ties go
///   to `x1`).
/// * `x3 > 0.5`: `(1 - p)·x3 + p·x2`.
/// * `x3 < -0.5`: `(1 - p)·x3 + p·x1`.
///
/// Any NaN argument yields NaN.
pub fn select_pmdi(x1: f64, x2: f64, x3: f64, prob_spell_end: f64) -> f64 {
    if x1.is_nan() || x2.is_nan() || x3.is_nan() || prob_spell_end.is_nan() {
        return f64::NAN;
    }
    let p = prob_spell_end;
    if x3.abs() <= SPELL_THRESHOLD {
        if x1.abs() >= x2.abs() { x1 } else { x2 }
    } else if x3 > 0.0 {
        (1.0 - p) * x3 + p * x2
    } else {
        (1.0 - p) * x3 + p * x1
    }
}
