use super::params::WaterWaterParams;
use crate::core::polynomial::Polynomial;
use crate::core::sites::{BodyKind, Site, SiteRole};
use crate::engine::descriptor::PairDescriptor;
use crate::engine::driver::{PairOutput, PairTerm};
use crate::engine::error::{DescriptorError, EngineError};
use crate::engine::force_matrix::ForceMatrix;
use nalgebra::Point3;

/// Oxygen, first hydrogen, second hydrogen.
pub type Water = [Point3<f64>; 3];

const OA: Site = Site::a(SiteRole::Anchor);
const HA1: Site = Site::a(SiteRole::Peripheral1);
const HA2: Site = Site::a(SiteRole::Peripheral2);
const XA1: Site = Site::a(SiteRole::Virtual1);
const XA2: Site = Site::a(SiteRole::Virtual2);
const OB: Site = Site::b(SiteRole::Anchor);
const HB1: Site = Site::b(SiteRole::Peripheral1);
const HB2: Site = Site::b(SiteRole::Peripheral2);
const XB1: Site = Site::b(SiteRole::Virtual1);
const XB2: Site = Site::b(SiteRole::Virtual2);

/// The 31-variable MB-pol dimer table, in the order of the fitted basis.
pub fn descriptor(params: &WaterWaterParams) -> Result<PairDescriptor, DescriptorError> {
    let p = params;
    let intra = p.d0_intra;
    let inter = p.d0_inter;

    let mut builder = PairDescriptor::builder(BodyKind::Monomer, BodyKind::Monomer)
        .cutoffs(p.cutoffs.inner, p.cutoffs.outer)
        .controlling(OA, OB)
        .frame_weights(p.frame)
        .exponential(HA1, HA2, p.k_hh_intra, intra)
        .exponential(HB1, HB2, p.k_hh_intra, intra)
        .exponential(OA, HA1, p.k_oh_intra, intra)
        .exponential(OA, HA2, p.k_oh_intra, intra)
        .exponential(OB, HB1, p.k_oh_intra, intra)
        .exponential(OB, HB2, p.k_oh_intra, intra);

    for (first, second) in [(HA1, HB1), (HA1, HB2), (HA2, HB1), (HA2, HB2)] {
        builder = builder.screened_coulomb(first, second, p.k_hh_coul, inter);
    }
    for (first, second) in [(OA, HB1), (OA, HB2), (OB, HA1), (OB, HA2)] {
        builder = builder.screened_coulomb(first, second, p.k_oh_coul, inter);
    }
    builder = builder.screened_coulomb(OA, OB, p.k_oo_coul, inter);

    #[rustfmt::skip]
    let lone_pair_hydrogen = [
        (XA1, HB1), (XA1, HB2), (XA2, HB1), (XA2, HB2),
        (XB1, HA1), (XB1, HA2), (XB2, HA1), (XB2, HA2),
    ];
    for (first, second) in lone_pair_hydrogen {
        builder = builder.exponential(first, second, p.k_xh_main, inter);
    }
    for (first, second) in [(OA, XB1), (OA, XB2), (OB, XA1), (OB, XA2)] {
        builder = builder.exponential(first, second, p.k_xo_main, inter);
    }
    for (first, second) in [(XA1, XB1), (XA1, XB2), (XA2, XB1), (XA2, XB2)] {
        builder = builder.exponential(first, second, p.k_xx_main, inter);
    }

    builder.build()
}

/// The MB-pol two-body term between two rigid water monomers.
#[derive(Debug, Clone)]
pub struct WaterWater<P> {
    term: PairTerm<P>,
}

impl<P: Polynomial> WaterWater<P> {
    pub fn new(params: &WaterWaterParams, polynomial: P) -> Result<Self, EngineError> {
        let term = PairTerm::new(descriptor(params)?, polynomial)?;
        Ok(Self { term })
    }

    pub fn term(&self) -> &PairTerm<P> {
        &self.term
    }

    /// Oxygen-oxygen distance beyond which the term vanishes.
    pub fn cutoff(&self) -> f64 {
        self.term.cutoff()
    }

    pub fn evaluate(&self, a: &Water, b: &Water) -> PairOutput {
        self.term.evaluate_unchecked(a, b)
    }

    /// Like [`WaterWater::evaluate`], with the 6x6 pairwise decomposition
    /// `O_a, H_a1, H_a2, O_b, H_b1, H_b2`.
    pub fn evaluate_with_force_matrix(&self, a: &Water, b: &Water) -> (PairOutput, ForceMatrix) {
        self.term.evaluate_with_force_matrix_unchecked(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::polynomial::MonomialPolynomial;
    use crate::species::presets::H2O_H2O;
    use crate::test_utils::{assert_close, assert_vec_close, central_difference, direction, water};
    use nalgebra::Vector3;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const ARITY: usize = 31;

    fn polynomial(rng: &mut StdRng) -> MonomialPolynomial {
        let mut terms = Vec::new();
        for i in 0..ARITY {
            let mut linear = [0u32; ARITY];
            linear[i] = 1;
            terms.push((rng.gen_range(-2.0..2.0), linear));

            let mut pair = [0u32; ARITY];
            pair[i] += 1;
            pair[rng.gen_range(0..ARITY)] += 1;
            terms.push((rng.gen_range(-0.5..0.5), pair));

            let mut cubic = [0u32; ARITY];
            cubic[i] += 2;
            cubic[rng.gen_range(0..ARITY)] += 1;
            terms.push((rng.gen_range(-0.1..0.1), cubic));
        }
        MonomialPolynomial::new(ARITY, terms).unwrap()
    }

    fn dimer(rng: &mut StdRng, distance: f64) -> (Water, Water) {
        let a = water(rng, Point3::new(0.3, -0.2, 0.1));
        let center = a[0] + direction(rng) * distance;
        let b = water(rng, center);
        (a, b)
    }

    fn model(seed: u64) -> (WaterWater<MonomialPolynomial>, StdRng) {
        let mut rng = StdRng::seed_from_u64(seed);
        let model = WaterWater::new(&H2O_H2O, polynomial(&mut rng)).unwrap();
        (model, rng)
    }

    #[test]
    fn descriptor_follows_the_fitted_variable_order() {
        let descriptor = descriptor(&H2O_H2O).unwrap();
        let variables = descriptor.variables();
        assert_eq!(variables.len(), ARITY);

        assert_eq!((variables[0].first, variables[0].second), (HA1, HA2));
        assert_eq!((variables[5].first, variables[5].second), (OB, HB2));
        assert_eq!((variables[14].first, variables[14].second), (OA, OB));
        assert_eq!((variables[19].first, variables[19].second), (XB1, HA1));
        assert_eq!((variables[26].first, variables[26].second), (OB, XA2));
        assert_eq!((variables[30].first, variables[30].second), (XA2, XB2));

        assert_eq!(variables[3].reference, 1.0);
        assert_eq!(variables[6].reference, 4.0);
        assert_eq!(variables[14].decay, H2O_H2O.k_oo_coul);
        assert_eq!(descriptor.controlling(), (OA, OB));
    }

    #[test]
    fn new_rejects_polynomial_of_wrong_arity() {
        let polynomial = MonomialPolynomial::univariate(&[1.0], 1);
        assert!(matches!(
            WaterWater::new(&H2O_H2O, polynomial),
            Err(EngineError::ArityMismatch {
                expected: 31,
                found: 1
            })
        ));
    }

    #[test]
    fn cutoff_is_outer_switching_radius() {
        let (model, _) = model(20);
        assert_eq!(model.cutoff(), 6.5);
    }

    #[test]
    fn energy_and_gradients_vanish_beyond_cutoff() {
        let (model, mut rng) = model(21);
        let (a, b) = dimer(&mut rng, 6.7);
        let output = model.evaluate(&a, &b);
        assert_eq!(output.energy, 0.0);
        assert!(
            output
                .gradient_a
                .as_slice()
                .iter()
                .chain(output.gradient_b.as_slice())
                .all(|g| *g == Vector3::zeros())
        );
    }

    #[test]
    fn gradients_conserve_momentum() {
        let (model, mut rng) = model(22);
        for distance in [2.9, 3.2, 4.0, 5.0, 6.0, 6.4] {
            let (a, b) = dimer(&mut rng, distance);
            let output = model.evaluate(&a, &b);
            let scale = output.gradient_a.as_slice().iter().map(|g| g.norm()).fold(1.0, f64::max);
            assert!(output.net_gradient().norm() <= 1e-9 * scale);
        }
    }

    #[test]
    fn gradients_match_finite_differences() {
        let (model, mut rng) = model(23);
        for distance in [2.9, 4.2, 5.1, 6.2] {
            let (a, b) = dimer(&mut rng, distance);
            let output = model.evaluate(&a, &b);
            for i in 0..3 {
                let numeric_a = central_difference(&a[i], |p| {
                    let mut moved = a;
                    moved[i] = *p;
                    model.evaluate(&moved, &b).energy
                });
                let numeric_b = central_difference(&b[i], |p| {
                    let mut moved = b;
                    moved[i] = *p;
                    model.evaluate(&a, &moved).energy
                });
                assert_vec_close(&output.gradient_a[i], &numeric_a, 1e-5);
                assert_vec_close(&output.gradient_b[i], &numeric_b, 1e-5);
            }
        }
    }

    #[test]
    fn force_matrix_rows_sum_to_gradients() {
        let (model, mut rng) = model(24);
        for distance in [2.8, 3.5, 4.4, 5.0, 5.9, 6.45, 7.5] {
            let (a, b) = dimer(&mut rng, distance);
            let (output, matrix) = model.evaluate_with_force_matrix(&a, &b);
            assert_close(output.energy, model.evaluate(&a, &b).energy, 1e-14);
            for i in 0..3 {
                assert_vec_close(&matrix.row_sum(i), &output.gradient_a[i], 1e-9);
                assert_vec_close(&matrix.row_sum(3 + i), &output.gradient_b[i], 1e-9);
            }
        }
    }

    #[test]
    fn swapping_monomers_preserves_energy_for_symmetric_polynomials() {
        let constant = (0.7, [0u32; ARITY]);
        let mut oo = [0u32; ARITY];
        oo[14] = 2;
        let polynomial = MonomialPolynomial::new(ARITY, [constant, (1.3, oo)]).unwrap();
        let model = WaterWater::new(&H2O_H2O, polynomial).unwrap();

        let mut rng = StdRng::seed_from_u64(25);
        let (a, b) = dimer(&mut rng, 5.2);
        assert_close(
            model.evaluate(&a, &b).energy,
            model.evaluate(&b, &a).energy,
            1e-12,
        );
    }
}
