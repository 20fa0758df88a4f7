//! # PairTerm Core Library
//!
//! Short-range two-body polynomial energy terms for water and ion interactions,
//! evaluated together with their exact analytic gradients with respect to atomic positions.
//!
//! ## Architectural Philosophy
//!
//! The library is organized in three layers, each depending only on the ones below it.
//!
//! - **[`core`]: The Foundation.** Stateless numerical building blocks: primitive distance
//!   variables, the rigid-frame map that places virtual sites (and its adjoint), the cutoff
//!   switching function, the polynomial evaluator contract, and named site indexing.
//!
//! - **[`engine`]: The Logic Core.** A single generic pair-term driver parameterized by a
//!   descriptor table. It builds the variables, invokes the polynomial, pushes the derivatives
//!   back onto real atoms, applies the switch, and optionally decomposes the result into a
//!   pairwise force matrix.
//!
//! - **[`species`]: The Public API.** Typed entry points for the water–water, water–ion and
//!   ion–ion terms, their parameter sets, and the calibrated presets of the published fits.

pub mod core;
pub mod engine;
pub mod species;

#[cfg(test)]
pub(crate) mod test_utils;
