//! Soil water balance and Z-index computation for the Palmer drought index.
//!
//! This crate supplies the per-period Z-index consumed by `palmer-spell`:
//!
//! ```text
//!  ┌───────────────┐     ┌──────────────────┐     ┌──────────────┐
//!  │ water_balance  │────▶│  cafec / D       │────▶│   z_index    │
//!  │ (two layers)   │     │ (coefficients)   │     │   (D · K)    │
//!  └───────────────┘     └──────────────────┘     └──────────────┘
//!                                ▲
//!                        ┌───────┴────────┐
//!                        │  climatology   │
//!                        │ (calibration)  │
//!                        └────────────────┘
//! ```
//!
//! # Quick start
//!
//! ```rust
//! use palmer_balance::{Coefficients, SoilProfile, cafec_precip, moisture_departure,
//!     water_balance, z_index};
//!
//! let profile = SoilProfile::new(6.0).unwrap();
//! let wb = water_balance(&profile, 3.2, 1.1, &profile.saturated());
//! let coeffs = Coefficients::new(0.95, 0.4, 0.3, 0.35);
//! let d = moisture_departure(1.1, cafec_precip(&wb, 3.2, &coeffs));
//! let z = z_index(d, 1.2);
//! assert!(z.is_finite());
//! ```
//!
//! Units are inches of water. Non-finite data propagates as NaN; only
//! invalid site parameters or an uncalibratable record produce a
//! [`BalanceError`].

pub mod cafec;
pub mod climatology;
pub mod error;
pub mod water_balance;

pub use cafec::{Coefficients, cafec_precip, moisture_departure, z_index};
pub use climatology::{CalibrationPeriod, K_WEIGHT, SlotClimatology, climatic_characteristics};
pub use error::BalanceError;
pub use water_balance::{DEFAULT_UPPER_CAPACITY, SoilMoisture, SoilProfile, WaterBalance, water_balance};
