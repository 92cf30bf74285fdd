use serde::Deserialize;

use palmer_spell::PeriodType;

/// Top-level site configuration (`palmer.toml`).
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PalmerConfig {
    /// Accounting period: `week`, `month` or `pentad`.
    pub period: PeriodType,

    /// Soil and initial moisture of the site.
    pub site: SiteToml,

    /// Spell state at the start of the record.
    #[serde(default)]
    pub initial: InitialToml,

    /// Per-slot climatology. Calibrated from the input record if omitted.
    #[serde(default)]
    pub climatology: Option<ClimatologyToml>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteToml {
    pub awc: f64,
    #[serde(default)]
    pub upper_capacity: Option<f64>,
    #[serde(default)]
    pub initial_upper: Option<f64>,
    #[serde(default)]
    pub initial_lower: Option<f64>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct InitialToml {
    #[serde(default)]
    pub x1: f64,
    #[serde(default)]
    pub x2: f64,
    #[serde(default)]
    pub x3: f64,
    #[serde(default)]
    pub uaccum: f64,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClimatologyToml {
    pub slot: Vec<SlotToml>,
}

/// Coefficients and climatic characteristic of one calendar slot.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SlotToml {
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
    pub delta: f64,
    pub k: f64,
}

/// Input record for one location.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeriesToml {
    pub period: Vec<PeriodToml>,
}

/// One period's observations. Missing values are written as `nan`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PeriodToml {
    /// 1-based calendar slot (month, week or pentad of the year).
    pub slot: usize,
    pub precip: f64,
    pub pet: f64,
}
