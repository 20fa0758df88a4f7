use super::params::IonIonParams;
use crate::core::polynomial::Polynomial;
use crate::core::sites::{Body, BodyKind, Site};
use crate::engine::descriptor::PairDescriptor;
use crate::engine::driver::{PairOutput, PairTerm};
use crate::engine::error::{DescriptorError, EngineError};
use nalgebra::Point3;
use std::slice;

/// A single exponential variable between the two ions.
pub fn descriptor(params: &IonIonParams) -> Result<PairDescriptor, DescriptorError> {
    let a = Site::anchor_of(Body::A);
    let b = Site::anchor_of(Body::B);
    PairDescriptor::builder(BodyKind::Point, BodyKind::Point)
        .cutoffs(params.cutoffs.inner, params.cutoffs.outer)
        .controlling(a, b)
        .exponential(a, b, params.decay, params.reference)
        .build()
}

/// An MB-nrg two-body term between two monatomic ions.
#[derive(Debug, Clone)]
pub struct IonIon<P> {
    term: PairTerm<P>,
}

impl<P: Polynomial> IonIon<P> {
    pub fn new(params: &IonIonParams, polynomial: P) -> Result<Self, EngineError> {
        let term = PairTerm::new(descriptor(params)?, polynomial)?;
        Ok(Self { term })
    }

    pub fn term(&self) -> &PairTerm<P> {
        &self.term
    }

    pub fn cutoff(&self) -> f64 {
        self.term.cutoff()
    }

    pub fn evaluate(&self, a: &Point3<f64>, b: &Point3<f64>) -> PairOutput {
        self.term
            .evaluate_unchecked(slice::from_ref(a), slice::from_ref(b))
    }
}
