//! Pure conversion functions: TOML config structs -> crate API types.

use anyhow::{Context, Result, bail};

use palmer_balance::{Coefficients, SoilMoisture, SoilProfile};
use palmer_spell::SpellState;

use crate::config::{ClimatologyToml, InitialToml, SiteToml};

/// Climatology of one calendar slot ready for Z-index computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotParams {
    pub coefficients: Coefficients,
    pub k: f64,
}

/// Builds a [`SoilProfile`] from the TOML site configuration.
pub fn build_profile(site: &SiteToml) -> Result<SoilProfile> {
    let profile = SoilProfile::new(site.awc).context("invalid [site].awc")?;
    match site.upper_capacity {
        Some(c) => profile
            .with_upper_capacity(c)
            .context("invalid [site].upper_capacity"),
        None => Ok(profile),
    }
}

/// Initial soil moisture; layers default to field capacity.
pub fn initial_soil(site: &SiteToml, profile: &SoilProfile) -> SoilMoisture {
    let saturated = profile.saturated();
    SoilMoisture {
        upper: site.initial_upper.unwrap_or(saturated.upper),
        lower: site.initial_lower.unwrap_or(saturated.lower),
    }
}

/// Initial spell state from the `[initial]` table.
pub fn initial_state(initial: &InitialToml) -> SpellState {
    SpellState::new(initial.x1, initial.x2, initial.x3, initial.uaccum)
}

/// Converts configured per-slot climatology, validating each slot.
pub fn build_slot_params(climatology: &ClimatologyToml) -> Result<Vec<SlotParams>> {
    if climatology.slot.is_empty() {
        bail!("[[climatology.slot]] must list at least one slot");
    }
    climatology
        .slot
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let coefficients = Coefficients::new(s.alpha, s.beta, s.gamma, s.delta);
            if !coefficients.is_finite() || !s.k.is_finite() {
                bail!("climatology slot {} has non-finite parameters", i + 1);
            }
            Ok(SlotParams {
                coefficients,
                k: s.k,
            })
        })
        .collect()
}
