//! Calibration of CAFEC coefficients and the climatic characteristic K.
//!
//! Calibration runs per calendar slot (a month, week or pentad of the year)
//! over a record of water-balance periods falling in that slot. Slots are
//! then weighted together to derive K, which scales moisture departures to
//! comparable Z-index values across slots and sites.

use tracing::debug;

use crate::cafec::{Coefficients, cafec_precip, moisture_departure};
use crate::error::BalanceError;
use crate::water_balance::WaterBalance;

/// Palmer's empirical weighting constant for twelve monthly slots.
pub const K_WEIGHT: f64 = 17.67;

/// One observed period used for calibration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationPeriod {
    pub precip: f64,
    pub pet: f64,
    pub balance: WaterBalance,
}

impl CalibrationPeriod {
    fn is_finite(&self) -> bool {
        self.precip.is_finite() && self.pet.is_finite() && self.balance.is_finite()
    }
}

/// Calibrated climatology of one calendar slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotClimatology {
    coefficients: Coefficients,
    mean_abs_departure: f64,
    k_prime: f64,
    n_periods: usize,
}

impl SlotClimatology {
    /// Calibrates one slot from its periods.
    ///
    /// Non-finite periods are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`BalanceError::EmptyData`] if no period is finite, or
    /// [`BalanceError::Degenerate`] if K' cannot be formed (no
    /// precipitation and no loss, or zero mean departure).
    #[tracing::instrument(skip(periods), fields(n = periods.len()))]
    pub fn calibrate(periods: &[CalibrationPeriod]) -> Result<Self, BalanceError> {
        let valid: Vec<&CalibrationPeriod> = periods.iter().filter(|p| p.is_finite()).collect();
        if valid.is_empty() {
            return Err(BalanceError::EmptyData);
        }
        let n = valid.len() as f64;

        let sum = |f: fn(&CalibrationPeriod) -> f64| valid.iter().map(|p| f(p)).sum::<f64>();
        let precip = sum(|p| p.precip);
        let pet = sum(|p| p.pet);
        let et = sum(|p| p.balance.et);
        let r = sum(|p| p.balance.r);
        let pr = sum(|p| p.balance.pr);
        let ro = sum(|p| p.balance.ro);
        let pro = sum(|p| p.balance.pro);
        let l = sum(|p| p.balance.l);
        let pl = sum(|p| p.balance.pl);

        let coefficients = Coefficients::new(
            ratio(et, pet, 1.0),
            ratio(r, pr, 1.0),
            ratio(ro, pro, 1.0),
            ratio(l, pl, 0.0),
        );

        let mean_abs_departure = valid
            .iter()
            .map(|p| {
                let p_hat = cafec_precip(&p.balance, p.pet, &coefficients);
                moisture_departure(p.precip, p_hat).abs()
            })
            .sum::<f64>()
            / n;

        let supply = precip + l;
        if supply <= 0.0 {
            return Err(BalanceError::Degenerate {
                reason: "no precipitation or soil loss in calibration slot".to_string(),
            });
        }
        if mean_abs_departure <= 0.0 {
            return Err(BalanceError::Degenerate {
                reason: "mean |D| is zero".to_string(),
            });
        }
        let t = (pet + r + ro) / supply;
        let k_prime = 1.5 * ((t + 2.8) / mean_abs_departure).log10() + 0.5;

        debug!(
            n_periods = valid.len(),
            alpha = coefficients.alpha,
            beta = coefficients.beta,
            gamma = coefficients.gamma,
            delta = coefficients.delta,
            mean_abs_departure,
            k_prime,
            "calibrated slot"
        );

        Ok(Self {
            coefficients,
            mean_abs_departure,
            k_prime,
            n_periods: valid.len(),
        })
    }

    pub fn coefficients(&self) -> &Coefficients {
        &self.coefficients
    }

    /// Mean absolute moisture departure over the calibration record.
    pub fn mean_abs_departure(&self) -> f64 {
        self.mean_abs_departure
    }

    /// Palmer's first approximation of the climatic characteristic.
    pub fn k_prime(&self) -> f64 {
        self.k_prime
    }

    /// Number of finite periods used.
    pub fn n_periods(&self) -> usize {
        self.n_periods
    }
}

/// `num / den`, or a fallback for a zero denominator.
///
/// `both_zero` applies when the numerator is zero too; a non-zero numerator
/// over zero gives 0.
fn ratio(num: f64, den: f64, both_zero: f64) -> f64 {
    if den != 0.0 {
        num / den
    } else if num == 0.0 {
        both_zero
    } else {
        0.0
    }
}

/// Derives the climatic characteristic K for every slot.
///
/// `K = 17.67·K′ / (12·mean(D̄·K′))`, which reduces to Palmer's
/// `17.67·K′ / Σ D̄·K′` for twelve monthly slots.
///
/// # Errors
///
/// Returns [`BalanceError::EmptyData`] for no slots, or
/// [`BalanceError::Degenerate`] if the weights sum to a non-positive or
/// non-finite value.
pub fn climatic_characteristics(slots: &[SlotClimatology]) -> Result<Vec<f64>, BalanceError> {
    if slots.is_empty() {
        return Err(BalanceError::EmptyData);
    }
    let weight: f64 = slots
        .iter()
        .map(|s| s.mean_abs_departure * s.k_prime)
        .sum();
    if !weight.is_finite() || weight <= 0.0 {
        return Err(BalanceError::Degenerate {
            reason: format!("sum of mean |D| x K' is {weight}"),
        });
    }
    let scale = K_WEIGHT * slots.len() as f64 / 12.0 / weight;
    Ok(slots.iter().map(|s| s.k_prime * scale).collect())
}
