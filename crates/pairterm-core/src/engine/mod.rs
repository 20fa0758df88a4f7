//! # Engine Module
//!
//! The generic two-body driver that turns a descriptor table and a fitted polynomial into an
//! energy and exact gradients on real atoms.
//!
//! ## Overview
//!
//! Every species pair follows the same recipe. A [`descriptor`] lists which sites each
//! primitive variable couples, which real atoms control the cutoff, and how virtual sites are
//! placed. The [`driver`] walks that table: it places virtual sites, builds the variables,
//! evaluates the polynomial, pushes derivatives back onto sites, folds the virtual-site
//! gradients onto real atoms, and applies the switch. Adding a new species pair only means
//! writing a new table.
//!
//! ## Architecture
//!
//! - **Descriptors** ([`descriptor`]) - Validated per-pair variable tables and their builder
//! - **Driver** ([`driver`]) - Single-pair evaluation and the output types
//! - **Force Matrix** ([`force_matrix`]) - Optional pairwise decomposition of the gradient
//! - **Batches** ([`batch`]) - Evaluating many independent pairs, in parallel when enabled
//! - **Error Handling** ([`error`]) - Descriptor validation and evaluation errors
//!
//! ## Guarantees
//!
//! - Energies and gradients are exactly zero once the controlling distance exceeds the cutoff
//! - Gradients on all real atoms sum to zero up to rounding
//! - Evaluation allocates nothing on the heap and never mutates the term, so one term can be
//!   shared freely between threads

pub mod batch;
pub mod descriptor;
pub mod driver;
pub mod error;
pub mod force_matrix;
