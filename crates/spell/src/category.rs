//! Palmer (1965) moisture classes for index values.

use serde::Serialize;

/// Moisture class of a Palmer-scale index value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DroughtCategory {
    ExtremeDrought,
    SevereDrought,
    ModerateDrought,
    MildDrought,
    IncipientDrought,
    NearNormal,
    IncipientWet,
    SlightlyWet,
    ModeratelyWet,
    VeryWet,
    ExtremelyWet,
}

impl DroughtCategory {
    /// Classifies an index value. Returns `None` for NaN.
    ///
    /// Wet class limits are inclusive on the lower bound and dry class
    /// limits inclusive on the upper bound, so `0.5` is incipient wet and
    /// `-0.5` incipient drought.
    pub fn from_index(value: f64) -> Option<Self> {
        if value.is_nan() {
            return None;
        }
        let cat = if value >= 4.0 {
            Self::ExtremelyWet
        } else if value >= 3.0 {
            Self::VeryWet
        } else if value >= 2.0 {
            Self::ModeratelyWet
        } else if value >= 1.0 {
            Self::SlightlyWet
        } else if value >= 0.5 {
            Self::IncipientWet
        } else if value > -0.5 {
            Self::NearNormal
        } else if value > -1.0 {
            Self::IncipientDrought
        } else if value > -2.0 {
            Self::MildDrought
        } else if value > -3.0 {
            Self::ModerateDrought
        } else if value > -4.0 {
            Self::SevereDrought
        } else {
            Self::ExtremeDrought
        };
        Some(cat)
    }

    /// Human-readable class name.
    pub fn label(self) -> &'static str {
        match self {
            Self::ExtremeDrought => "extreme drought",
            Self::SevereDrought => "severe drought",
            Self::ModerateDrought => "moderate drought",
            Self::MildDrought => "mild drought",
            Self::IncipientDrought => "incipient drought",
            Self::NearNormal => "near normal",
            Self::IncipientWet => "incipient wet spell",
            Self::SlightlyWet => "slightly wet",
            Self::ModeratelyWet => "moderately wet",
            Self::VeryWet => "very wet",
            Self::ExtremelyWet => "extremely wet",
        }
    }

    /// Returns `true` for the drought classes.
    pub fn is_drought(self) -> bool {
        self < Self::NearNormal
    }
}
