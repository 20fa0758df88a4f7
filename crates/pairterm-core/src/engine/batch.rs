use super::driver::{PairOutput, PairTerm};
use super::error::EngineError;
use crate::core::polynomial::Polynomial;
use nalgebra::Point3;
use tracing::{info, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Real-atom positions of both bodies of one pair.
#[derive(Debug, Clone, PartialEq)]
pub struct PairGeometry {
    pub a: Vec<Point3<f64>>,
    pub b: Vec<Point3<f64>>,
}

impl PairGeometry {
    pub fn new(a: Vec<Point3<f64>>, b: Vec<Point3<f64>>) -> Self {
        Self { a, b }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BatchOutput {
    pub total_energy: f64,
    /// One output per input pair, in input order.
    pub outputs: Vec<PairOutput>,
}

impl BatchOutput {
    /// Number of pairs that were inside the cutoff.
    pub fn interacting(&self) -> usize {
        self.outputs.iter().filter(|o| o.energy != 0.0).count()
    }
}

impl<P: Polynomial> PairTerm<P> {
    /// Evaluates many independent pairs with one shared term.
    ///
    /// Every pair is validated before any work starts, so an error leaves nothing half done.
    #[instrument(skip_all, name = "pair_batch", fields(pairs = pairs.len()))]
    pub fn evaluate_batch(&self, pairs: &[PairGeometry]) -> Result<BatchOutput, EngineError> {
        for pair in pairs {
            self.check_atom_counts(&pair.a, &pair.b)?;
        }

        #[cfg(not(feature = "parallel"))]
        let iterator = pairs.iter();

        #[cfg(feature = "parallel")]
        let iterator = pairs.par_iter();

        let outputs: Vec<PairOutput> = iterator
            .map(|pair| self.evaluate_unchecked(&pair.a, &pair.b))
            .collect();
        let total_energy = outputs.iter().map(|o| o.energy).sum();

        let result = BatchOutput {
            total_energy,
            outputs,
        };
        info!(
            total_energy,
            interacting = result.interacting(),
            "Evaluated pair batch"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::polynomial::MonomialPolynomial;
    use crate::core::sites::{Body, BodyKind, Site};
    use crate::engine::descriptor::PairDescriptor;
    use crate::test_utils::assert_close;

    fn ion_pair_term() -> PairTerm<MonomialPolynomial> {
        let descriptor = PairDescriptor::builder(BodyKind::Point, BodyKind::Point)
            .cutoffs(7.0, 8.0)
            .controlling(Site::anchor_of(Body::A), Site::anchor_of(Body::B))
            .exponential(Site::anchor_of(Body::A), Site::anchor_of(Body::B), 0.5, 5.5)
            .build()
            .unwrap();
        let polynomial = MonomialPolynomial::univariate(&[1.0, -0.5, 0.25], 1);
        PairTerm::new(descriptor, polynomial).unwrap()
    }

    fn pair(distance: f64) -> PairGeometry {
        PairGeometry::new(
            vec![Point3::origin()],
            vec![Point3::new(distance, 0.0, 0.0)],
        )
    }

    #[test]
    fn batch_matches_individual_evaluations() {
        let term = ion_pair_term();
        let pairs: Vec<_> = [3.0, 5.0, 7.5, 8.5].into_iter().map(pair).collect();
        let batch = term.evaluate_batch(&pairs).unwrap();

        assert_eq!(batch.outputs.len(), 4);
        let mut expected_total = 0.0;
        for (pair, output) in pairs.iter().zip(&batch.outputs) {
            let single = term.evaluate(&pair.a, &pair.b).unwrap();
            assert_eq!(*output, single);
            expected_total += single.energy;
        }
        assert_close(batch.total_energy, expected_total, 1e-12);
        assert_eq!(batch.interacting(), 3);
    }

    #[test]
    fn batch_rejects_malformed_pairs_before_evaluating() {
        let term = ion_pair_term();
        let pairs = vec![
            pair(3.0),
            PairGeometry::new(vec![Point3::origin(), Point3::origin()], vec![Point3::origin()]),
        ];
        assert_eq!(
            term.evaluate_batch(&pairs),
            Err(EngineError::AtomCountMismatch {
                body: Body::A,
                expected: 1,
                found: 2
            })
        );
    }

    #[test]
    fn empty_batch_has_zero_energy() {
        let batch = ion_pair_term().evaluate_batch(&[]).unwrap();
        assert_eq!(batch.total_energy, 0.0);
        assert!(batch.outputs.is_empty());
    }
}
