//! CAFEC precipitation, moisture departure and the Z-index.
//!
//! CAFEC ("climatically appropriate for existing conditions") precipitation
//! is the amount that would have kept the site at its climatological
//! moisture state given this period's potential terms.

use crate::water_balance::WaterBalance;

/// Water-balance coefficients of one calendar slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coefficients {
    /// Evapotranspiration coefficient, ET/PET.
    pub alpha: f64,
    /// Recharge coefficient, R/PR.
    pub beta: f64,
    /// Runoff coefficient, RO/PRO.
    pub gamma: f64,
    /// Loss coefficient, L/PL.
    pub delta: f64,
}

impl Coefficients {
    pub fn new(alpha: f64, beta: f64, gamma: f64, delta: f64) -> Self {
        Self {
            alpha,
            beta,
            gamma,
            delta,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.alpha.is_finite()
            && self.beta.is_finite()
            && self.gamma.is_finite()
            && self.delta.is_finite()
    }
}

/// CAFEC precipitation: `α·PET + β·PR + γ·PRO − δ·PL`.
///
/// Returns NaN if any input is non-finite.
pub fn cafec_precip(wb: &WaterBalance, pet: f64, coeffs: &Coefficients) -> f64 {
    if !pet.is_finite()
        || !wb.pr.is_finite()
        || !wb.pro.is_finite()
        || !wb.pl.is_finite()
        || !coeffs.is_finite()
    {
        return f64::NAN;
    }
    coeffs.alpha * pet + coeffs.beta * wb.pr + coeffs.gamma * wb.pro - coeffs.delta * wb.pl
}

/// Moisture departure `D = P − P̂`. Returns NaN if either input is non-finite.
pub fn moisture_departure(precip: f64, cafec: f64) -> f64 {
    if !precip.is_finite() || !cafec.is_finite() {
        return f64::NAN;
    }
    precip - cafec
}

/// Z-index `Z = D·K`. Returns NaN if either input is non-finite.
pub fn z_index(departure: f64, k: f64) -> f64 {
    if !departure.is_finite() || !k.is_finite() {
        return f64::NAN;
    }
    departure * k
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::water_balance::SoilMoisture;
    use approx::assert_abs_diff_eq;

    fn balance(pr: f64, pro: f64, pl: f64) -> WaterBalance {
        WaterBalance {
            et: 0.0,
            pr,
            r: 0.0,
            pro,
            ro: 0.0,
            pl,
            l: 0.0,
            soil: SoilMoisture {
                upper: 0.0,
                lower: 0.0,
            },
        }
    }

    #[test]
    fn cafec_combines_potential_terms() {
        let c = Coefficients::new(0.9, 0.5, 0.2, 0.4);
        let wb = balance(2.0, 4.0, 1.5);
        let p_hat = cafec_precip(&wb, 3.0, &c);
        assert_abs_diff_eq!(p_hat, 0.9 * 3.0 + 0.5 * 2.0 + 0.2 * 4.0 - 0.4 * 1.5, epsilon = 1e-12);
    }

    #[test]
    fn departure_and_z() {
        assert_abs_diff_eq!(moisture_departure(2.5, 3.4), -0.9, epsilon = 1e-12);
        assert_abs_diff_eq!(z_index(-0.9, 1.8), -1.62, epsilon = 1e-12);
    }

    #[test]
    fn nan_propagates() {
        let c = Coefficients::new(0.9, 0.5, 0.2, 0.4);
        assert!(cafec_precip(&WaterBalance::missing(), 3.0, &c).is_nan());
        assert!(cafec_precip(&balance(1.0, 1.0, 1.0), f64::NAN, &c).is_nan());
        let bad = Coefficients::new(f64::NAN, 0.5, 0.2, 0.4);
        assert!(cafec_precip(&balance(1.0, 1.0, 1.0), 3.0, &bad).is_nan());
        assert!(moisture_departure(f64::NAN, 1.0).is_nan());
        assert!(moisture_departure(1.0, f64::INFINITY).is_nan());
        assert!(z_index(1.0, f64::NAN).is_nan());
    }
}
