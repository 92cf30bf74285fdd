//! Accounting period types and their persistence constants.
//!
//! Each period type resolves to a duration factor `df` (the share of the
//! previous period's index carried forward) and an effective-wetness slope
//! `zewt` used to derive the Z-index needed to end an established spell.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::SpellError;

/// Persistence constants for one period type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeriodConstants {
    /// Duration factor, `0 < df < 1`.
    pub df: f64,
    /// Effective-wetness slope (negative).
    pub zewt: f64,
}

/// Length of the accounting period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum PeriodType {
    /// Weekly accounting.
    Week,
    /// Monthly accounting.
    Month,
    /// Five-day accounting.
    ///
    /// **Provisional:** `zewt` reuses the weekly slope and has not been
    /// validated climatologically. See [`PeriodType::is_provisional`].
    Pentad,
}

impl PeriodType {
    /// All period types, in tag-matching order.
    pub const ALL: [PeriodType; 3] = [Self::Week, Self::Month, Self::Pentad];

    /// Returns the `df` / `zewt` pair for this period type.
    pub fn constants(self) -> PeriodConstants {
        match self {
            Self::Week => PeriodConstants {
                df: 0.975,
                zewt: -2.925,
            },
            Self::Month => PeriodConstants {
                df: 0.897,
                zewt: -2.691,
            },
            // zewt is a placeholder copied from the weekly value.
            Self::Pentad => PeriodConstants {
                df: 0.9828,
                zewt: -2.925,
            },
        }
    }

    /// Lower-case tag for this period type.
    pub fn name(self) -> &'static str {
        match self {
            Self::Week => "week",
            Self::Month => "month",
            Self::Pentad => "pentad",
        }
    }

    /// Returns `true` when this period type's constants are unverified.
    ///
    /// Only [`PeriodType::Pentad`] is provisional: its `zewt` is the weekly
    /// slope rather than a climatologically derived value.
    pub fn is_provisional(self) -> bool {
        matches!(self, Self::Pentad)
    }

    /// Resolves a period-type tag.
    ///
    /// Matching is a case-insensitive substring test against `week`,
    /// `month` and `pentad`, tried in that order, so `"Weekly"` and
    /// `"MONTHLY"` both resolve.
    ///
    /// # Errors
    ///
    /// Returns [`SpellError::UnknownPeriodType`] if none match.
    pub fn parse(tag: &str) -> Result<Self, SpellError> {
        let lower = tag.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|p| lower.contains(p.name()))
            .ok_or_else(|| SpellError::UnknownPeriodType {
                tag: tag.to_string(),
            })
    }
}

impl FromStr for PeriodType {
    type Err = SpellError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PeriodType {
    type Error = SpellError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl fmt::Display for PeriodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
