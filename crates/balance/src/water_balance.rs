//! Two-layer soil water balance.
//!
//! The soil column holds `awc` inches of available water split into an
//! upper layer (1 inch by default) and a lower layer holding the rest.
//! Surplus precipitation recharges the upper layer first; evaporative demand
//! drains the upper layer first, and draws on the lower layer only in
//! proportion to its moisture relative to the whole column.

use crate::error::BalanceError;

/// Default upper-layer capacity in inches.
pub const DEFAULT_UPPER_CAPACITY: f64 = 1.0;

/// Soil water holding capacity of a site.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoilProfile {
    awc: f64,
    upper_capacity: f64,
}

impl SoilProfile {
    /// Creates a profile with total available water capacity `awc`.
    ///
    /// The upper layer holds [`DEFAULT_UPPER_CAPACITY`] or the whole `awc`
    /// if that is smaller.
    ///
    /// # Errors
    ///
    /// Returns [`BalanceError::InvalidAwc`] unless `awc` is finite and
    /// positive.
    pub fn new(awc: f64) -> Result<Self, BalanceError> {
        if !awc.is_finite() || awc <= 0.0 {
            return Err(BalanceError::InvalidAwc { awc });
        }
        Ok(Self {
            awc,
            upper_capacity: DEFAULT_UPPER_CAPACITY.min(awc),
        })
    }

    /// Sets the upper-layer capacity.
    ///
    /// # Errors
    ///
    /// Returns [`BalanceError::InvalidCapacity`] unless `capacity` is in
    /// `(0, awc]`.
    pub fn with_upper_capacity(mut self, capacity: f64) -> Result<Self, BalanceError> {
        if !capacity.is_finite() || capacity <= 0.0 || capacity > self.awc {
            return Err(BalanceError::InvalidCapacity {
                capacity,
                awc: self.awc,
            });
        }
        self.upper_capacity = capacity;
        Ok(self)
    }

    /// Total available water capacity.
    pub fn awc(&self) -> f64 {
        self.awc
    }

    /// Upper-layer capacity.
    pub fn upper_capacity(&self) -> f64 {
        self.upper_capacity
    }

    /// Lower-layer capacity.
    pub fn lower_capacity(&self) -> f64 {
        self.awc - self.upper_capacity
    }

    /// Both layers at field capacity.
    pub fn saturated(&self) -> SoilMoisture {
        SoilMoisture {
            upper: self.upper_capacity,
            lower: self.lower_capacity(),
        }
    }
}

/// Moisture held in each soil layer, in inches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoilMoisture {
    pub upper: f64,
    pub lower: f64,
}

impl SoilMoisture {
    pub const MISSING: SoilMoisture = SoilMoisture {
        upper: f64::NAN,
        lower: f64::NAN,
    };

    /// Total moisture in the column.
    pub fn total(&self) -> f64 {
        self.upper + self.lower
    }

    pub fn is_finite(&self) -> bool {
        self.upper.is_finite() && self.lower.is_finite()
    }
}

/// Water-balance terms for one period.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaterBalance {
    /// Evapotranspiration.
    pub et: f64,
    /// Potential recharge.
    pub pr: f64,
    /// Recharge.
    pub r: f64,
    /// Potential runoff.
    pub pro: f64,
    /// Runoff.
    pub ro: f64,
    /// Potential loss.
    pub pl: f64,
    /// Loss.
    pub l: f64,
    /// Soil moisture at the end of the period.
    pub soil: SoilMoisture,
}

impl WaterBalance {
    /// The all-NaN record returned for non-finite input.
    pub fn missing() -> Self {
        Self {
            et: f64::NAN,
            pr: f64::NAN,
            r: f64::NAN,
            pro: f64::NAN,
            ro: f64::NAN,
            pl: f64::NAN,
            l: f64::NAN,
            soil: SoilMoisture::MISSING,
        }
    }

    /// Returns `true` if every term is finite.
    pub fn is_finite(&self) -> bool {
        [self.et, self.pr, self.r, self.pro, self.ro, self.pl, self.l]
            .iter()
            .all(|v| v.is_finite())
            && self.soil.is_finite()
    }
}

/// Runs the soil water balance for one period.
///
/// `pet` and `precip` are in inches; negative values are treated as zero.
/// `prior` moisture is clamped into each layer's capacity. Any non-finite
/// input yields [`WaterBalance::missing`].
pub fn water_balance(
    profile: &SoilProfile,
    pet: f64,
    precip: f64,
    prior: &SoilMoisture,
) -> WaterBalance {
    if !pet.is_finite() || !precip.is_finite() || !prior.is_finite() {
        return WaterBalance::missing();
    }
    let pet = pet.max(0.0);
    let precip = precip.max(0.0);
    let awc = profile.awc();
    let upper_cap = profile.upper_capacity();
    let lower_cap = profile.lower_capacity();

    let ss = prior.upper.clamp(0.0, upper_cap);
    let su = prior.lower.clamp(0.0, lower_cap);

    let pr = awc - (ss + su);
    let pro = ss + su;
    let pl_upper = pet.min(ss);
    let pl_lower = ((pet - pl_upper) * su / awc).min(su);
    let pl = pl_upper + pl_lower;

    if precip >= pet {
        let surplus = precip - pet;
        let r_upper = surplus.min(upper_cap - ss);
        let r_lower = (surplus - r_upper).min(lower_cap - su);
        let r = r_upper + r_lower;
        WaterBalance {
            et: pet,
            pr,
            r,
            pro,
            ro: surplus - r,
            pl,
            l: 0.0,
            soil: SoilMoisture {
                upper: ss + r_upper,
                lower: su + r_lower,
            },
        }
    } else {
        let demand = pet - precip;
        let l_upper = demand.min(ss);
        let l_lower = ((demand - l_upper) * su / awc).min(su);
        let l = l_upper + l_lower;
        WaterBalance {
            et: precip + l,
            pr,
            r: 0.0,
            pro,
            ro: 0.0,
            pl,
            l,
            soil: SoilMoisture {
                upper: ss - l_upper,
                lower: su - l_lower,
            },
        }
    }
}
