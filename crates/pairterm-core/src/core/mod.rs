//! # Core Module
//!
//! Stateless numerical building blocks shared by every two-body term.
//!
//! ## Overview
//!
//! Every species pair evaluated by this crate is assembled from the same handful of pieces.
//! Interatomic separations are turned into scalar [`primitives`], rigid monomers carry massless
//! virtual sites placed by a [`frame`], the whole term is faded out near the cutoff by a
//! [`switching`] function, and the scalars are combined by an external [`polynomial`] basis.
//! The [`sites`] module gives every real atom and virtual site a name instead of an offset.
//!
//! ## Key Components
//!
//! - [`primitives`] - Exponential and screened-Coulomb distance variables with their adjoint
//! - [`frame`] - Virtual-site placement and the exact transpose that redistributes gradients
//! - [`switching`] - Half-cosine cutoff ramp and its derivative
//! - [`polynomial`] - The polynomial evaluator contract and a sparse monomial implementation
//! - [`sites`] - Body/role site enumeration and fixed-size site buffers
//!
//! ## Conventions
//!
//! Positions are `Point3<f64>` in Angstroms and gradients are `Vector3<f64>` in energy per
//! Angstrom. A gradient is always the derivative of the energy with respect to a position,
//! i.e. the negative of the force.

pub mod frame;
pub mod polynomial;
pub mod primitives;
pub mod sites;
pub mod switching;
