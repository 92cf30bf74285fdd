//! Wet/dry spell accounting.
//!
//! One call to [`advance`] moves a location's [`SpellState`] forward by a
//! single period. The step is a small decision tree:
//!
//! ```text
//!              prior |X3| <= 0.5 ?
//!              ├── yes ─▶ fresh accounting (new-spell test)
//!              └── no ──▶ provisional X3 = df·X3 + Z/3
//!                         ├── |X3| <= 0.5          ─▶ Collapsed
//!                         ├── Z beyond end threshold ─▶ EndedEarly
//!                         └── spell-end probability p
//!                             ├── p = 1 ─▶ Ended
//!                             ├── p = 0 ─▶ Reaffirmed
//!                             └── else  ─▶ Eroding
//! ```
//!
//! Every branch produces a complete [`AccountingResult`]; nothing falls
//! through.

use tracing::trace;

use crate::error::SpellError;
use crate::period::{PeriodConstants, PeriodType};
use crate::state::{AccountingResult, SPELL_THRESHOLD, SpellState, SpellTransition};

/// |X1| or |X2| at or above this value starts a new spell.
pub const NEW_SPELL_THRESHOLD: f64 = 1.0;

/// Offset between the Z-index and the effective wetness/dryness it adds.
const EFFECTIVE_OFFSET: f64 = 0.15;

/// Offset of the Z-index needed to end a spell in a single period.
const END_OFFSET: f64 = 1.5;

/// Probabilities this close to 0 or 1 snap to the bound.
const PROB_TOLERANCE: f64 = 0.001;

/// Added to a zero denominator before dividing.
const ZERO_NUDGE: f64 = 1e-5;

/// Advances the spell accounting by one period.
///
/// Non-finite `z_index` or prior state yields
/// [`AccountingResult::missing`] without further computation.
///
/// # Example
///
/// ```
/// use palmer_spell::{PeriodType, SpellState, SpellTransition, advance};
///
/// let r = advance(PeriodType::Week, 3.5, &SpellState::ZERO);
/// assert_eq!(r.transition, SpellTransition::Started);
/// assert!((r.x3() - 3.5 / 3.0).abs() < 1e-12);
/// ```
pub fn advance(period: PeriodType, z_index: f64, prior: &SpellState) -> AccountingResult {
    if !z_index.is_finite() || !prior.is_finite() {
        trace!(%period, z_index, "non-finite input, spell accounting missing");
        return AccountingResult::missing();
    }

    let PeriodConstants { df, zewt } = period.constants();
    let prior = prior.normalized();
    let (x1, x2) = potential_spells(df, &prior, z_index);

    let result = if prior.x3.abs() <= SPELL_THRESHOLD {
        fresh_accounting(x1, x2)
    } else {
        established_accounting(df, zewt, z_index, &prior, x1, x2)
    };

    trace!(
        %period,
        z_index,
        transition = ?result.transition,
        x3 = result.state.x3,
        prob_spell_end = result.prob_spell_end,
        "advanced spell accounting"
    );
    result
}

/// Like [`advance`], resolving the period type from a tag first.
///
/// # Errors
///
/// Returns [`SpellError::UnknownPeriodType`] if `tag` is not a
/// recognised period type.
pub fn advance_tagged(
    tag: &str,
    z_index: f64,
    prior: &SpellState,
) -> Result<AccountingResult, SpellError> {
    let period = PeriodType::parse(tag)?;
    Ok(advance(period, z_index, prior))
}

/// Returns the established-spell value implied by the potential spells.
///
/// A potential spell is established once its magnitude reaches 1. When both
/// do, the larger magnitude wins and an exact tie goes to the wet spell.
/// Returns 0 if neither qualifies.
pub fn new_spell_x3(x1: f64, x2: f64) -> f64 {
    let wet = x1.abs() >= NEW_SPELL_THRESHOLD;
    let dry = x2.abs() >= NEW_SPELL_THRESHOLD;
    match (wet, dry) {
        (true, true) if x1.abs() >= x2.abs() => x1,
        (true, true) => x2,
        (true, false) => x1,
        (false, true) => x2,
        (false, false) => 0.0,
    }
}

/// Potential wet (X1 >= 0) and dry (X2 <= 0) spell values for this period.
fn potential_spells(df: f64, prior: &SpellState, z_index: f64) -> (f64, f64) {
    let x1 = (df * prior.x1 + z_index / 3.0).max(0.0);
    let x2 = (df * prior.x2 + z_index / 3.0).min(0.0);
    (x1, x2)
}

/// Accounting when no spell was established: only the new-spell test runs.
fn fresh_accounting(x1: f64, x2: f64) -> AccountingResult {
    let x3 = new_spell_x3(x1, x2);
    let transition = if x3 == 0.0 {
        SpellTransition::Quiescent
    } else {
        SpellTransition::Started
    };
    AccountingResult {
        state: SpellState::new(x1, x2, x3, 0.0),
        prob_spell_end: 0.0,
        transition,
    }
}

/// How an established spell fared this period.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Outcome {
    Collapsed,
    EndedEarly,
    Ended,
    Reaffirmed,
    Eroding { uaccum: f64, prob: f64 },
}

fn established_accounting(
    df: f64,
    zewt: f64,
    z_index: f64,
    prior: &SpellState,
    x1: f64,
    x2: f64,
) -> AccountingResult {
    let x3 = df * prior.x3 + z_index / 3.0;
    let wet = prior.x3 > 0.0;
    let z_eff = if wet {
        zewt * prior.x3 + END_OFFSET
    } else {
        zewt * prior.x3 - END_OFFSET
    };

    let spell_collapses = x3.abs() <= SPELL_THRESHOLD;
    let spell_ends_early = if wet {
        z_index <= z_eff
    } else {
        z_index >= z_eff
    };

    let outcome = if spell_collapses {
        Outcome::Collapsed
    } else if spell_ends_early {
        Outcome::EndedEarly
    } else {
        let (uaccum, prob) = erosion(z_index, z_eff, prior.uaccum, wet);
        if prob == 1.0 {
            Outcome::Ended
        } else if prob == 0.0 {
            Outcome::Reaffirmed
        } else {
            Outcome::Eroding { uaccum, prob }
        }
    };

    match outcome {
        Outcome::Collapsed => spell_over(x1, x2, SpellTransition::Collapsed),
        Outcome::EndedEarly => spell_over(x1, x2, SpellTransition::EndedEarly),
        Outcome::Ended => spell_over(x1, x2, SpellTransition::Ended),
        Outcome::Reaffirmed => AccountingResult {
            state: SpellState::new(0.0, 0.0, x3, 0.0),
            prob_spell_end: 0.0,
            transition: SpellTransition::Reaffirmed,
        },
        Outcome::Eroding { uaccum, prob } => AccountingResult {
            state: SpellState::new(x1, x2, x3, uaccum),
            prob_spell_end: prob,
            transition: SpellTransition::Eroding,
        },
    }
}

/// The established spell has ended; a new one may start in its place.
fn spell_over(x1: f64, x2: f64, transition: SpellTransition) -> AccountingResult {
    AccountingResult {
        state: SpellState::new(x1, x2, new_spell_x3(x1, x2), 0.0),
        prob_spell_end: 1.0,
        transition,
    }
}

/// Accumulated effective wetness/dryness against the spell and the
/// resulting spell-end probability.
///
/// `tracking_end` holds when a previous period already began eroding the
/// spell; otherwise accumulation is only seeded by a Z-index that works
/// against the spell.
fn erosion(z_index: f64, z_eff: f64, prior_uaccum: f64, wet: bool) -> (f64, f64) {
    let u = if wet {
        z_index - EFFECTIVE_OFFSET
    } else {
        z_index + EFFECTIVE_OFFSET
    };

    let tracking_end = prior_uaccum != 0.0;
    if tracking_end {
        let uaccum = prior_uaccum + u;
        let carried = if z_eff + prior_uaccum == 0.0 {
            prior_uaccum + ZERO_NUDGE
        } else {
            prior_uaccum
        };
        (uaccum, clamp_probability(uaccum / (z_eff + carried)))
    } else {
        let against_spell = if wet {
            z_index < EFFECTIVE_OFFSET
        } else {
            z_index > -EFFECTIVE_OFFSET
        };
        let uaccum = if against_spell { u } else { 0.0 };
        let z_eff = if z_eff == 0.0 { z_eff + ZERO_NUDGE } else { z_eff };
        (uaccum, clamp_probability(uaccum / z_eff))
    }
}

/// Snaps a surrogate probability onto `[0, 1]`.
///
/// Values within [`PROB_TOLERANCE`] of a bound, or beyond it, become
/// exactly that bound.
fn clamp_probability(p: f64) -> f64 {
    if p >= 1.0 - PROB_TOLERANCE {
        1.0
    } else if p <= PROB_TOLERANCE {
        0.0
    } else {
        p
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const EPS: f64 = 1e-9;

    fn state(x1: f64, x2: f64, x3: f64, uaccum: f64) -> SpellState {
        SpellState::new(x1, x2, x3, uaccum)
    }

    // -----------------------------------------------------------------------
    // New-spell test
    // -----------------------------------------------------------------------

    #[test]
    fn new_spell_none_below_threshold() {
        assert_eq!(new_spell_x3(0.99, -0.99), 0.0);
        assert_eq!(new_spell_x3(0.0, 0.0), 0.0);
    }

    #[test]
    fn new_spell_single_crossing() {
        assert_eq!(new_spell_x3(1.0, -0.2), 1.0);
        assert_eq!(new_spell_x3(0.3, -1.4), -1.4);
    }

    #[test]
    fn new_spell_larger_magnitude_wins() {
        assert_eq!(new_spell_x3(1.2, -1.5), -1.5);
        assert_eq!(new_spell_x3(1.6, -1.5), 1.6);
    }

    #[test]
    fn new_spell_exact_tie_favours_wet() {
        assert_eq!(new_spell_x3(1.5, -1.5), 1.5);
    }

    // -----------------------------------------------------------------------
    // Probability helpers
    // -----------------------------------------------------------------------

    #[test]
    fn clamp_probability_snaps_to_bounds() {
        assert_eq!(clamp_probability(0.0005), 0.0);
        assert_eq!(clamp_probability(-0.4), 0.0);
        assert_eq!(clamp_probability(0.9995), 1.0);
        assert_eq!(clamp_probability(1.7), 1.0);
        assert_eq!(clamp_probability(0.5), 0.5);
        assert_eq!(clamp_probability(0.002), 0.002);
    }

    #[test]
    fn erosion_nudges_zero_end_threshold() {
        let (uaccum, p) = erosion(-0.5, 0.0, 0.0, true);
        assert_abs_diff_eq!(uaccum, -0.65, epsilon = EPS);
        // -0.65 / 1e-5 is far below zero.
        assert_eq!(p, 0.0);
    }

    #[test]
    fn erosion_nudges_zero_tracking_denominator() {
        let (uaccum, p) = erosion(0.0, -0.5, 0.5, true);
        assert_abs_diff_eq!(uaccum, 0.35, epsilon = EPS);
        assert!(p.is_finite());
        assert_eq!(p, 1.0);
    }

    #[test]
    fn erosion_not_seeded_by_supporting_z() {
        let (uaccum, p) = erosion(0.15, -3.0, 0.0, true);
        assert_eq!(uaccum, 0.0);
        assert_eq!(p, 0.0);
        let (uaccum, p) = erosion(-0.15, 3.0, 0.0, false);
        assert_eq!(uaccum, 0.0);
        assert_eq!(p, 0.0);
    }

    // -----------------------------------------------------------------------
    // Fresh accounting (no established spell)
    // -----------------------------------------------------------------------

    #[test]
    fn weekly_wet_spell_starts() {
        let r = advance(PeriodType::Week, 3.5, &SpellState::ZERO);
        assert_eq!(r.transition, SpellTransition::Started);
        assert_abs_diff_eq!(r.x1(), 3.5 / 3.0, epsilon = EPS);
        assert_eq!(r.x2(), 0.0);
        assert_abs_diff_eq!(r.x3(), r.x1(), epsilon = EPS);
        assert_eq!(r.uaccum(), 0.0);
        assert_eq!(r.prob_spell_end, 0.0);
    }

    #[test]
    fn small_z_starts_nothing() {
        let r = advance(PeriodType::Month, -1.2, &SpellState::ZERO);
        assert_eq!(r.transition, SpellTransition::Quiescent);
        assert_eq!(r.x1(), 0.0);
        assert_abs_diff_eq!(r.x2(), -0.4, epsilon = EPS);
        assert_eq!(r.x3(), 0.0);
        assert_eq!(r.prob_spell_end, 0.0);
    }

    #[test]
    fn competing_starts_pick_larger_magnitude() {
        // x1 = 0.897 * 3 - 1.1 = 1.591, x2 = 0.897 * -0.2 - 1.1 = -1.2794
        let r = advance(PeriodType::Month, -3.3, &state(3.0, -0.2, 0.0, 0.0));
        assert_eq!(r.transition, SpellTransition::Started);
        assert_abs_diff_eq!(r.x1(), 1.591, epsilon = EPS);
        assert_abs_diff_eq!(r.x2(), -1.2794, epsilon = EPS);
        assert_abs_diff_eq!(r.x3(), 1.591, epsilon = EPS);
    }

    #[test]
    fn dead_spell_accumulation_is_discarded() {
        let r = advance(PeriodType::Month, 0.3, &state(0.0, 0.0, 0.4, -2.0));
        assert_eq!(r.uaccum(), 0.0);
        assert_eq!(r.prob_spell_end, 0.0);
        assert_eq!(r.x3(), 0.0);
    }

    #[test]
    fn dead_spell_is_idempotent() {
        let mut s = SpellState::ZERO;
        for _ in 0..100 {
            let r = advance(PeriodType::Month, 0.0, &s);
            assert_eq!(r.transition, SpellTransition::Quiescent);
            s = r.state;
        }
        assert_eq!(s, SpellState::ZERO);
    }

    // -----------------------------------------------------------------------
    // Established spell
    // -----------------------------------------------------------------------

    #[test]
    fn monthly_wet_spell_collapses() {
        let r = advance(PeriodType::Month, -3.0, &state(0.0, 0.0, 1.1667, 0.0));
        assert_eq!(r.transition, SpellTransition::Collapsed);
        assert_eq!(r.prob_spell_end, 1.0);
        assert_eq!(r.uaccum(), 0.0);
        assert_eq!(r.x1(), 0.0);
        assert_abs_diff_eq!(r.x2(), -1.0, epsilon = EPS);
        // x2 reaches the threshold, so a dry spell takes over.
        assert_abs_diff_eq!(r.x3(), -1.0, epsilon = EPS);
    }

    #[test]
    fn wet_spell_flipped_by_extreme_dryness_ends_early() {
        // Provisional x3 = 0.897 - 2 = -1.103 escapes the collapse band,
        // but Z = -6 is far below the end threshold -1.191.
        let r = advance(PeriodType::Month, -6.0, &state(0.0, 0.0, 1.0, 0.0));
        assert_eq!(r.transition, SpellTransition::EndedEarly);
        assert_eq!(r.prob_spell_end, 1.0);
        assert_abs_diff_eq!(r.x2(), -2.0, epsilon = EPS);
        assert_abs_diff_eq!(r.x3(), -2.0, epsilon = EPS);
        assert_eq!(r.uaccum(), 0.0);
    }

    #[test]
    fn pentad_placeholder_slope_ends_spell_early() {
        // Provisional x3 = 1.9656 - 1.4567 = 0.5089 stays established, but
        // the weekly slope puts the end threshold at -4.35.
        let r = advance(PeriodType::Pentad, -4.37, &state(0.0, 0.0, 2.0, 0.0));
        assert_eq!(r.transition, SpellTransition::EndedEarly);
        assert_abs_diff_eq!(r.x2(), -4.37 / 3.0, epsilon = EPS);
        assert_abs_diff_eq!(r.x3(), r.x2(), epsilon = EPS);
    }

    #[test]
    fn supporting_wetness_reaffirms_wet_spell() {
        let r = advance(PeriodType::Month, 1.0, &state(0.4, -0.3, 2.0, 0.0));
        assert_eq!(r.transition, SpellTransition::Reaffirmed);
        assert_eq!(r.prob_spell_end, 0.0);
        assert_eq!(r.x1(), 0.0);
        assert_eq!(r.x2(), 0.0);
        assert_eq!(r.uaccum(), 0.0);
        assert_abs_diff_eq!(r.x3(), 0.897 * 2.0 + 1.0 / 3.0, epsilon = EPS);
    }

    #[test]
    fn supporting_dryness_reaffirms_dry_spell() {
        let r = advance(PeriodType::Month, -1.0, &state(0.0, 0.0, -2.0, 0.0));
        assert_eq!(r.transition, SpellTransition::Reaffirmed);
        assert_abs_diff_eq!(r.x3(), -1.794 - 1.0 / 3.0, epsilon = EPS);
    }

    #[test]
    fn dryness_seeds_erosion_of_wet_spell() {
        let r = advance(PeriodType::Month, -1.0, &state(0.0, 0.0, 2.0, 0.0));
        assert_eq!(r.transition, SpellTransition::Eroding);
        assert_abs_diff_eq!(r.uaccum(), -1.15, epsilon = EPS);
        // z_eff = -2.691 * 2 + 1.5
        assert_abs_diff_eq!(r.prob_spell_end, -1.15 / -3.882, epsilon = EPS);
        assert_abs_diff_eq!(r.x3(), 1.794 - 1.0 / 3.0, epsilon = EPS);
        assert_eq!(r.x1(), 0.0);
        assert_abs_diff_eq!(r.x2(), -1.0 / 3.0, epsilon = EPS);
    }

    #[test]
    fn wetness_seeds_erosion_of_dry_spell() {
        let r = advance(PeriodType::Month, 1.0, &state(0.0, 0.0, -2.0, 0.0));
        assert_eq!(r.transition, SpellTransition::Eroding);
        assert_abs_diff_eq!(r.uaccum(), 1.15, epsilon = EPS);
        assert_abs_diff_eq!(r.prob_spell_end, 1.15 / 3.882, epsilon = EPS);
        assert!(r.uaccum() * r.x3() < 0.0);
    }

    #[test]
    fn tracked_erosion_accumulates() {
        let prior = state(0.0, -1.0 / 3.0, 1.794 - 1.0 / 3.0, -1.15);
        let r = advance(PeriodType::Month, -2.0, &prior);
        assert_eq!(r.transition, SpellTransition::Eroding);

        let z_eff = -2.691 * prior.x3 + 1.5;
        let uaccum = -1.15 + (-2.0 - 0.15);
        assert_abs_diff_eq!(r.uaccum(), uaccum, epsilon = EPS);
        assert_abs_diff_eq!(r.prob_spell_end, uaccum / (z_eff - 1.15), epsilon = EPS);
        assert_abs_diff_eq!(r.x3(), 0.897 * prior.x3 - 2.0 / 3.0, epsilon = EPS);
        assert_abs_diff_eq!(r.x2(), 0.897 * prior.x2 - 2.0 / 3.0, epsilon = EPS);
    }

    #[test]
    fn tracked_erosion_of_dry_spell_accumulates() {
        // z_eff = -2.691 * -2 - 1.5 = 3.882
        let r = advance(PeriodType::Month, 2.0, &state(0.3, 0.0, -2.0, 1.0));
        assert_eq!(r.transition, SpellTransition::Eroding);
        assert_abs_diff_eq!(r.uaccum(), 3.15, epsilon = EPS);
        assert_abs_diff_eq!(r.prob_spell_end, 3.15 / 4.882, epsilon = EPS);
        assert_abs_diff_eq!(r.x3(), -1.794 + 2.0 / 3.0, epsilon = EPS);
        assert_abs_diff_eq!(r.x1(), 0.897 * 0.3 + 2.0 / 3.0, epsilon = EPS);
        assert_eq!(r.x2(), 0.0);
    }

    #[test]
    fn tracked_erosion_of_dry_spell_reaching_one_ends_it() {
        // Z = 3.8 stays below z_eff = 3.882, so only the probability ends it:
        // uaccum = 2.0 + 3.95 over 3.882 + 2.0 exceeds 1.
        let r = advance(PeriodType::Month, 3.8, &state(0.0, 0.0, -2.0, 2.0));
        assert_eq!(r.transition, SpellTransition::Ended);
        assert_eq!(r.prob_spell_end, 1.0);
        assert_eq!(r.uaccum(), 0.0);
        assert_eq!(r.x2(), 0.0);
        // x1 = 3.8 / 3 qualifies, so a wet spell takes over.
        assert_abs_diff_eq!(r.x1(), 3.8 / 3.0, epsilon = EPS);
        assert_abs_diff_eq!(r.x3(), 3.8 / 3.0, epsilon = EPS);
    }

    #[test]
    fn tracked_erosion_of_dry_spell_reversed_reaffirms_it() {
        // uaccum = 0.5 + (-1.0 + 0.15) = -0.35, so p < 0 snaps to 0.
        let r = advance(PeriodType::Month, -1.0, &state(0.0, 0.0, -2.0, 0.5));
        assert_eq!(r.transition, SpellTransition::Reaffirmed);
        assert_eq!(r.prob_spell_end, 0.0);
        assert_eq!(r.uaccum(), 0.0);
        assert_eq!(r.x1(), 0.0);
        assert_eq!(r.x2(), 0.0);
        assert_abs_diff_eq!(r.x3(), -1.794 - 1.0 / 3.0, epsilon = EPS);
    }

    #[test]
    fn dry_spell_flipped_by_extreme_wetness_ends_early() {
        // Provisional x3 = -0.897 + 2 = 1.103 escapes the collapse band,
        // and Z = 6 is above the end threshold 2.691 - 1.5 = 1.191.
        let r = advance(PeriodType::Month, 6.0, &state(0.0, 0.0, -1.0, 0.0));
        assert_eq!(r.transition, SpellTransition::EndedEarly);
        assert_eq!(r.prob_spell_end, 1.0);
        assert_eq!(r.uaccum(), 0.0);
        assert_abs_diff_eq!(r.x1(), 2.0, epsilon = EPS);
        assert_eq!(r.x2(), 0.0);
        assert_abs_diff_eq!(r.x3(), 2.0, epsilon = EPS);
    }

    #[test]
    fn tracked_erosion_reaching_one_ends_spell() {
        // z_eff = -1.7292; Z - 0.15 below it pushes p past 1.
        let r = advance(PeriodType::Month, -1.65, &state(0.0, -0.5, 1.2, -1.0));
        assert_eq!(r.transition, SpellTransition::Ended);
        assert_eq!(r.prob_spell_end, 1.0);
        assert_eq!(r.uaccum(), 0.0);
        assert_abs_diff_eq!(r.x2(), -0.9985, epsilon = EPS);
        // Neither potential spell qualifies to replace it.
        assert_eq!(r.x3(), 0.0);
    }

    #[test]
    fn tracked_erosion_reversed_reaffirms_spell() {
        let r = advance(PeriodType::Month, 3.0, &state(0.2, -0.4, 1.5, -0.5));
        assert_eq!(r.transition, SpellTransition::Reaffirmed);
        assert_eq!(r.prob_spell_end, 0.0);
        assert_eq!(r.x1(), 0.0);
        assert_eq!(r.x2(), 0.0);
        assert_eq!(r.uaccum(), 0.0);
    }

    #[test]
    fn reinforcing_accumulation_is_ignored_on_entry() {
        let with = advance(PeriodType::Month, -1.0, &state(0.0, 0.0, 2.0, 0.7));
        let without = advance(PeriodType::Month, -1.0, &state(0.0, 0.0, 2.0, 0.0));
        assert_eq!(with, without);
    }

    // -----------------------------------------------------------------------
    // Missing data and contract
    // -----------------------------------------------------------------------

    #[test]
    fn nan_z_index_is_missing() {
        let r = advance(PeriodType::Week, f64::NAN, &SpellState::ZERO);
        assert!(r.is_missing());
        assert!(r.x1().is_nan() && r.x2().is_nan() && r.x3().is_nan());
        assert!(r.uaccum().is_nan() && r.prob_spell_end.is_nan());
    }

    #[test]
    fn non_finite_prior_is_missing() {
        for prior in [
            state(f64::NAN, 0.0, 0.0, 0.0),
            state(0.0, f64::NAN, 0.0, 0.0),
            state(0.0, 0.0, f64::NAN, 0.0),
            state(0.0, 0.0, 2.0, f64::NAN),
            state(0.0, 0.0, f64::INFINITY, 0.0),
        ] {
            assert!(advance(PeriodType::Month, 1.0, &prior).is_missing());
        }
        assert!(advance(PeriodType::Month, f64::NEG_INFINITY, &SpellState::ZERO).is_missing());
    }

    #[test]
    fn missing_period_does_not_poison_restart() {
        let r = advance(PeriodType::Month, f64::NAN, &SpellState::ZERO);
        assert!(r.is_missing());
        let restarted = advance(PeriodType::Month, 3.5, &SpellState::ZERO);
        assert_eq!(restarted.transition, SpellTransition::Started);
    }

    #[test]
    fn tagged_advance_matches_enum() {
        let tagged = advance_tagged("Weekly", 3.5, &SpellState::ZERO).unwrap();
        let direct = advance(PeriodType::Week, 3.5, &SpellState::ZERO);
        assert_eq!(tagged, direct);
    }

    #[test]
    fn tagged_advance_rejects_unknown_tag() {
        let err = advance_tagged("daily", 1.0, &SpellState::ZERO).unwrap_err();
        assert!(matches!(err, SpellError::UnknownPeriodType { .. }));
    }
}
