use super::params::WaterIonParams;
use super::water_water::Water;
use crate::core::polynomial::Polynomial;
use crate::core::sites::{BodyKind, Site, SiteRole};
use crate::engine::descriptor::PairDescriptor;
use crate::engine::driver::{PairOutput, PairTerm};
use crate::engine::error::{DescriptorError, EngineError};
use crate::engine::force_matrix::ForceMatrix;
use nalgebra::Point3;
use std::slice;

const O: Site = Site::a(SiteRole::Anchor);
const H1: Site = Site::a(SiteRole::Peripheral1);
const H2: Site = Site::a(SiteRole::Peripheral2);
const LP1: Site = Site::a(SiteRole::Virtual1);
const LP2: Site = Site::a(SiteRole::Virtual2);
const ION: Site = Site::b(SiteRole::Anchor);

/// The 8-variable MB-nrg water-ion table, in the order of the fitted basis.
pub fn descriptor(params: &WaterIonParams) -> Result<PairDescriptor, DescriptorError> {
    let p = params;
    PairDescriptor::builder(BodyKind::Monomer, BodyKind::Point)
        .cutoffs(p.cutoffs.inner, p.cutoffs.outer)
        .controlling(O, ION)
        .frame_weights(p.frame)
        .exponential(H1, H2, p.k_hh_intra, p.d_hh_intra)
        .exponential(O, H1, p.k_oh_intra, p.d_oh_intra)
        .exponential(O, H2, p.k_oh_intra, p.d_oh_intra)
        .screened_coulomb(ION, H1, p.k_ion_h, p.d_ion_h)
        .screened_coulomb(ION, H2, p.k_ion_h, p.d_ion_h)
        .screened_coulomb(ION, O, p.k_ion_o, p.d_ion_o)
        .exponential(ION, LP1, p.k_ion_lone_pair, p.d_ion_lone_pair)
        .exponential(ION, LP2, p.k_ion_lone_pair, p.d_ion_lone_pair)
        .build()
}

/// An MB-nrg two-body term between a rigid water and a monatomic ion.
#[derive(Debug, Clone)]
pub struct WaterIon<P> {
    term: PairTerm<P>,
}

impl<P: Polynomial> WaterIon<P> {
    pub fn new(params: &WaterIonParams, polynomial: P) -> Result<Self, EngineError> {
        let term = PairTerm::new(descriptor(params)?, polynomial)?;
        Ok(Self { term })
    }

    pub fn term(&self) -> &PairTerm<P> {
        &self.term
    }

    /// Oxygen-ion distance beyond which the term vanishes.
    pub fn cutoff(&self) -> f64 {
        self.term.cutoff()
    }

    /// Energy, gradients on `[O, H1, H2]` (body A) and on the ion (body B).
    pub fn evaluate(&self, water: &Water, ion: &Point3<f64>) -> PairOutput {
        self.term.evaluate_unchecked(water, slice::from_ref(ion))
    }

    pub fn evaluate_with_force_matrix(
        &self,
        water: &Water,
        ion: &Point3<f64>,
    ) -> (PairOutput, ForceMatrix) {
        self.term
            .evaluate_with_force_matrix_unchecked(water, slice::from_ref(ion))
    }
}
