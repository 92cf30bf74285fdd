//! Error types for the palmer-balance crate.

/// Error type for contract violations in the palmer-balance crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BalanceError {
    /// Returned when the available water capacity is not finite and positive.
    #[error("invalid available water capacity: {awc} (must be finite and > 0)")]
    InvalidAwc {
        /// The rejected capacity.
        awc: f64,
    },

    /// Returned when the upper-layer capacity is outside (0, AWC].
    #[error("invalid upper-layer capacity: {capacity} (must be in (0, {awc}])")]
    InvalidCapacity {
        /// The rejected upper-layer capacity.
        capacity: f64,
        /// Total available water capacity.
        awc: f64,
    },

    /// Returned when a calibration slot has no finite periods.
    #[error("calibration slot has no finite periods")]
    EmptyData,

    /// Returned when a climatology cannot be derived from the record.
    #[error("degenerate climatology: {reason}")]
    Degenerate {
        /// Description of the problem.
        reason: String,
    },
}
