//! Spell accounting and modified index selection for the Palmer drought
//! index.
//!
//! Each period, a location's Z-index moves three accounting series forward:
//! X1 (potential wet spell), X2 (potential dry spell) and X3 (established
//! spell), plus UACCUM, the effective wetness or dryness eroding X3. The
//! modified Palmer index (PMDI) is then a probability-weighted blend of
//! those series that never needs revising.
//!
//! # Pipeline
//!
//! ```text
//!  ┌──────────────┐     ┌────────────────┐     ┌──────────────┐
//!  │   Z-index     │────▶│   accounting   │────▶│     pmdi     │
//!  │  (upstream)   │     │   (advance)    │     │ (select_pmdi)│
//!  └──────────────┘     └────────────────┘     └──────────────┘
//!                              ▲      │
//!                              └──────┘ SpellState, next period
//! ```
//!
//! # Quick start
//!
//! ```rust
//! use palmer_spell::{PeriodType, SpellState, advance};
//!
//! let mut state = SpellState::ZERO;
//! for z in [3.5, 1.0, -0.4, -2.5] {
//!     let result = advance(PeriodType::Month, z, &state);
//!     let _pmdi = result.pmdi();
//!     state = result.state;
//! }
//! assert!(state.x1 >= 0.0 && state.x2 <= 0.0);
//! ```
//!
//! Every function is pure. Non-finite inputs yield an all-NaN result rather
//! than an error; [`SpellError`] is reserved for contract violations such as
//! unknown period-type tags.

pub mod accounting;
pub mod category;
pub mod error;
pub mod period;
pub mod pmdi;
pub mod state;

pub use accounting::{NEW_SPELL_THRESHOLD, advance, advance_tagged, new_spell_x3};
pub use category::DroughtCategory;
pub use error::SpellError;
pub use period::{PeriodConstants, PeriodType};
pub use pmdi::select_pmdi;
pub use state::{AccountingResult, SPELL_THRESHOLD, Spell, SpellState, SpellTransition};
