//! Error types for the palmer-spell crate.

/// Error type for contract violations in the palmer-spell crate.
///
/// Missing or non-finite *data* is never an error: it propagates as NaN
/// through [`AccountingResult::missing`](crate::AccountingResult::missing).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpellError {
    /// Returned when a period-type tag matches none of week/month/pentad.
    #[error("unknown period type: {tag:?} (expected week, month or pentad)")]
    UnknownPeriodType {
        /// The unrecognised tag as supplied.
        tag: String,
    },
}
