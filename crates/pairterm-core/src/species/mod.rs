//! # Species Module
//!
//! Typed entry points for the supported species pairs, built on the generic engine.
//!
//! ## Overview
//!
//! Each species pair is nothing more than a descriptor table plus its calibrated constants.
//! This module owns those tables, the parameter structs they are built from, and the presets of
//! the published MB-pol and MB-nrg fits. Fitted polynomial coefficients are never embedded;
//! callers supply a [`Polynomial`](crate::core::polynomial::Polynomial), typically a
//! [`MonomialPolynomial`](crate::core::polynomial::MonomialPolynomial) loaded from CSV.
//!
//! ## Supported Pairs
//!
//! - [`water_water`] - MB-pol water dimer, 31 variables, controlled by the O-O distance
//! - [`water_ion`] - MB-nrg water with a monatomic ion, 8 variables, controlled by O-ion
//! - [`ion_ion`] - MB-nrg ion pair, a single exponential variable
//!
//! ## Configuration
//!
//! - [`params`] - Parameter structs and TOML loading ([`SpeciesParams`])
//! - [`presets`] - Named calibrated constants, e.g. `h2o-h2o` or `h2o-na-pol0`

pub mod ion_ion;
pub mod params;
pub mod presets;
pub mod water_ion;
pub mod water_water;

pub use ion_ion::IonIon;
pub use params::{ParamLoadError, SpeciesParams};
pub use water_ion::WaterIon;
pub use water_water::{Water, WaterWater};
