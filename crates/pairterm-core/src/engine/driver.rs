use super::descriptor::{MAX_VARIABLES, PairDescriptor};
use super::error::EngineError;
use super::force_matrix::{ForceMatrix, RawForceMatrix};
use crate::core::frame::RigidFrame;
use crate::core::polynomial::Polynomial;
use crate::core::primitives::PrimitiveVariable;
use crate::core::sites::{Body, Site, SiteBuffer, SiteRole};
use nalgebra::{Point3, Vector3};
use std::ops::Index;
use tracing::trace;

/// Gradients on the real atoms of one body, in the order the atoms were given.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyGradient {
    atoms: [Vector3<f64>; 3],
    len: usize,
}

impl BodyGradient {
    fn zeros(len: usize) -> Self {
        Self {
            atoms: [Vector3::zeros(); 3],
            len,
        }
    }

    #[inline]
    pub fn as_slice(&self) -> &[Vector3<f64>] {
        &self.atoms[..self.len]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn sum(&self) -> Vector3<f64> {
        self.as_slice().iter().sum()
    }
}

impl Index<usize> for BodyGradient {
    type Output = Vector3<f64>;

    fn index(&self, index: usize) -> &Vector3<f64> {
        &self.as_slice()[index]
    }
}

/// Switched energy of one pair and its gradient on every real atom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairOutput {
    pub energy: f64,
    pub gradient_a: BodyGradient,
    pub gradient_b: BodyGradient,
}

impl PairOutput {
    pub(crate) fn zeros(descriptor: &PairDescriptor) -> Self {
        Self {
            energy: 0.0,
            gradient_a: BodyGradient::zeros(descriptor.body_kind(Body::A).real_atoms()),
            gradient_b: BodyGradient::zeros(descriptor.body_kind(Body::B).real_atoms()),
        }
    }

    #[inline]
    pub fn gradient(&self, body: Body) -> &BodyGradient {
        match body {
            Body::A => &self.gradient_a,
            Body::B => &self.gradient_b,
        }
    }

    /// Sum of all gradients; zero up to rounding for a translation-invariant term.
    pub fn net_gradient(&self) -> Vector3<f64> {
        self.gradient_a.sum() + self.gradient_b.sum()
    }
}

/// Intermediate state of one evaluation, before the switch is applied.
#[derive(Debug, Clone)]
pub(crate) struct Evaluation {
    pub raw_energy: f64,
    pub switch_value: f64,
    pub switch_slope: f64,
    /// `p(ctrl1) - p(ctrl2)`.
    pub separation: Vector3<f64>,
    pub distance: f64,
    /// Unswitched gradients; virtual-site slots are already folded onto the real atoms.
    pub gradients: SiteBuffer<Vector3<f64>>,
    pub frames: [Option<RigidFrame>; 2],
}

impl Evaluation {
    /// Gradient of the switch factor times the raw energy, applied to the first controlling site.
    pub fn switch_gradient(&self) -> Vector3<f64> {
        self.separation * (self.switch_slope * self.raw_energy / self.distance)
    }
}

/// A two-body polynomial term: one descriptor table plus one fitted polynomial.
///
/// The same driver evaluates every species pair. For each call it places the virtual sites,
/// builds the primitive variables listed by the descriptor, evaluates the polynomial, pushes
/// the variable derivatives back onto the sites, folds the virtual-site gradients onto the real
/// atoms through the rigid frame, and finally multiplies by the switch while adding the switch
/// derivative on the controlling pair.
#[derive(Debug, Clone)]
pub struct PairTerm<P> {
    descriptor: PairDescriptor,
    polynomial: P,
}

impl<P: Polynomial> PairTerm<P> {
    pub fn new(descriptor: PairDescriptor, polynomial: P) -> Result<Self, EngineError> {
        if polynomial.arity() != descriptor.arity() {
            return Err(EngineError::ArityMismatch {
                expected: descriptor.arity(),
                found: polynomial.arity(),
            });
        }
        Ok(Self {
            descriptor,
            polynomial,
        })
    }

    #[inline]
    pub fn descriptor(&self) -> &PairDescriptor {
        &self.descriptor
    }

    #[inline]
    pub fn polynomial(&self) -> &P {
        &self.polynomial
    }

    /// Separation of the controlling pair above which the term is exactly zero.
    #[inline]
    pub fn cutoff(&self) -> f64 {
        self.descriptor.switching().outer()
    }

    /// Separation of the controlling pair below which the switch is exactly one.
    #[inline]
    pub fn inner_cutoff(&self) -> f64 {
        self.descriptor.switching().inner()
    }

    pub fn evaluate(
        &self,
        a: &[Point3<f64>],
        b: &[Point3<f64>],
    ) -> Result<PairOutput, EngineError> {
        self.check_atom_counts(a, b)?;
        Ok(self.evaluate_unchecked(a, b))
    }

    /// Evaluates the term and decomposes the gradient into pairwise contributions between
    /// real atoms.
    pub fn evaluate_with_force_matrix(
        &self,
        a: &[Point3<f64>],
        b: &[Point3<f64>],
    ) -> Result<(PairOutput, ForceMatrix), EngineError> {
        self.check_atom_counts(a, b)?;
        Ok(self.evaluate_with_force_matrix_unchecked(a, b))
    }

    pub(crate) fn evaluate_unchecked(&self, a: &[Point3<f64>], b: &[Point3<f64>]) -> PairOutput {
        match self.evaluate_unswitched(a, b, None) {
            Some(evaluation) => self.finish(&evaluation),
            None => PairOutput::zeros(&self.descriptor),
        }
    }

    pub(crate) fn evaluate_with_force_matrix_unchecked(
        &self,
        a: &[Point3<f64>],
        b: &[Point3<f64>],
    ) -> (PairOutput, ForceMatrix) {
        let mut raw = RawForceMatrix::zeros();
        match self.evaluate_unswitched(a, b, Some(&mut raw)) {
            Some(evaluation) => {
                raw.fold_virtual_sites(&evaluation.frames);
                let matrix = raw.into_switched(
                    &self.descriptor,
                    evaluation.switch_value,
                    evaluation.switch_gradient(),
                );
                (self.finish(&evaluation), matrix)
            }
            None => (
                PairOutput::zeros(&self.descriptor),
                ForceMatrix::zeros(&self.descriptor),
            ),
        }
    }

    pub(crate) fn check_atom_counts(
        &self,
        a: &[Point3<f64>],
        b: &[Point3<f64>],
    ) -> Result<(), EngineError> {
        for (body, atoms) in [(Body::A, a), (Body::B, b)] {
            let expected = self.descriptor.body_kind(body).real_atoms();
            if atoms.len() != expected {
                return Err(EngineError::AtomCountMismatch {
                    body,
                    expected,
                    found: atoms.len(),
                });
            }
        }
        Ok(())
    }

    /// Runs everything up to (but excluding) the switch. Returns `None` beyond the cutoff.
    ///
    /// When `matrix` is given, every variable's contribution is recorded between the two sites
    /// it couples, virtual sites included.
    pub(crate) fn evaluate_unswitched(
        &self,
        a: &[Point3<f64>],
        b: &[Point3<f64>],
        mut matrix: Option<&mut RawForceMatrix>,
    ) -> Option<Evaluation> {
        let descriptor = &self.descriptor;
        let (first, second) = descriptor.controlling();
        let separation = atom(a, b, first) - atom(a, b, second);
        let distance = separation.norm();

        if distance > descriptor.switching().outer() {
            trace!(distance, "Pair beyond cutoff, skipping");
            return None;
        }

        let mut sites = SiteBuffer::origin();
        let mut frames = [None, None];
        for (body, atoms) in [(Body::A, a), (Body::B, b)] {
            let kind = descriptor.body_kind(body);
            for (&role, position) in kind.real_roles().iter().zip(atoms) {
                sites[Site::new(body, role)] = *position;
            }
            if kind.has_virtual_sites() {
                let frame = RigidFrame::new(&atoms[0], &atoms[1], &atoms[2], descriptor.frame_weights());
                let (v1, v2) = frame.place();
                sites[Site::new(body, SiteRole::Virtual1)] = v1;
                sites[Site::new(body, SiteRole::Virtual2)] = v2;
                frames[body as usize] = Some(frame);
            }
        }

        let arity = descriptor.arity();
        let mut primitives = [PrimitiveVariable::default(); MAX_VARIABLES];
        let mut values = [0.0; MAX_VARIABLES];
        for (i, variable) in descriptor.variables().iter().enumerate() {
            let primitive = PrimitiveVariable::new(
                variable.kind,
                variable.decay,
                variable.reference,
                &sites[variable.first],
                &sites[variable.second],
            );
            values[i] = primitive.value();
            primitives[i] = primitive;
        }

        let mut derivatives = [0.0; MAX_VARIABLES];
        let raw_energy = self
            .polynomial
            .evaluate(&values[..arity], &mut derivatives[..arity]);

        let mut gradients = SiteBuffer::zeros();
        for ((variable, primitive), &d_energy) in descriptor
            .variables()
            .iter()
            .zip(&primitives)
            .zip(&derivatives[..arity])
        {
            let contribution = primitive.distribute(
                d_energy,
                gradients.as_mut_slice(),
                variable.first.index(),
                variable.second.index(),
            );
            if let Some(matrix) = matrix.as_deref_mut() {
                matrix.record(variable.first, variable.second, contribution);
            }
        }

        for body in Body::BOTH {
            if let Some(frame) = &frames[body as usize] {
                fold_frame(&mut gradients, body, frame);
            }
        }

        let (switch_value, switch_slope) = descriptor.switching().evaluate(distance);
        trace!(distance, raw_energy, switch_value, "Evaluated pair term");

        Some(Evaluation {
            raw_energy,
            switch_value,
            switch_slope,
            separation,
            distance,
            gradients,
            frames,
        })
    }

    fn finish(&self, evaluation: &Evaluation) -> PairOutput {
        let mut gradients = evaluation.gradients;
        for gradient in gradients.as_mut_slice() {
            *gradient *= evaluation.switch_value;
        }

        let (first, second) = self.descriptor.controlling();
        let switch_gradient = evaluation.switch_gradient();
        gradients[first] += switch_gradient;
        gradients[second] -= switch_gradient;

        let mut output = PairOutput::zeros(&self.descriptor);
        output.energy = evaluation.switch_value * evaluation.raw_energy;
        for (body, target) in [
            (Body::A, &mut output.gradient_a),
            (Body::B, &mut output.gradient_b),
        ] {
            for (slot, &role) in target
                .atoms
                .iter_mut()
                .zip(self.descriptor.body_kind(body).real_roles())
            {
                *slot = gradients[Site::new(body, role)];
            }
        }
        output
    }
}

#[inline]
fn atom(a: &[Point3<f64>], b: &[Point3<f64>], site: Site) -> Point3<f64> {
    match site.body {
        Body::A => a[site.role as usize],
        Body::B => b[site.role as usize],
    }
}

fn fold_frame(gradients: &mut SiteBuffer<Vector3<f64>>, body: Body, frame: &RigidFrame) {
    let v1 = Site::new(body, SiteRole::Virtual1);
    let v2 = Site::new(body, SiteRole::Virtual2);
    let [anchor, peripheral1, peripheral2] = frame.distribute(&gradients[v1], &gradients[v2]);

    gradients[Site::new(body, SiteRole::Anchor)] += anchor;
    gradients[Site::new(body, SiteRole::Peripheral1)] += peripheral1;
    gradients[Site::new(body, SiteRole::Peripheral2)] += peripheral2;
    gradients[v1] = Vector3::zeros();
    gradients[v2] = Vector3::zeros();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::frame::FrameWeights;
    use crate::core::polynomial::MonomialPolynomial;
    use crate::core::sites::BodyKind;
    use crate::test_utils::{assert_close, assert_vec_close, central_difference, direction, water};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const WEIGHTS: FrameWeights = FrameWeights::new(-9.721486914088159e-02, 9.859272078406150e-02);

    /// A small water-ion style table touching every kind of site.
    fn descriptor() -> PairDescriptor {
        let o = Site::a(SiteRole::Anchor);
        let h1 = Site::a(SiteRole::Peripheral1);
        let h2 = Site::a(SiteRole::Peripheral2);
        let x = Site::b(SiteRole::Anchor);
        PairDescriptor::builder(BodyKind::Monomer, BodyKind::Point)
            .cutoffs(5.0, 6.0)
            .controlling(o, x)
            .frame_weights(WEIGHTS)
            .exponential(h1, h2, 0.3, 1.0)
            .exponential(o, h1, 0.4, 0.9)
            .screened_coulomb(x, h1, 0.8, 6.0)
            .screened_coulomb(x, h2, 0.8, 6.0)
            .screened_coulomb(x, o, 0.9, 6.5)
            .exponential(x, Site::a(SiteRole::Virtual1), 1.0, 5.0)
            .exponential(x, Site::a(SiteRole::Virtual2), 1.0, 5.0)
            .build()
            .unwrap()
    }

    fn polynomial(rng: &mut StdRng, arity: usize) -> MonomialPolynomial {
        let mut terms = Vec::new();
        for i in 0..arity {
            let mut linear = vec![0u32; arity];
            linear[i] = 1;
            terms.push((rng.gen_range(-1.0..1.0), linear));
            for j in i..arity {
                let mut quadratic = vec![0u32; arity];
                quadratic[i] += 1;
                quadratic[j] += 1;
                terms.push((rng.gen_range(-0.5..0.5), quadratic));
            }
        }
        MonomialPolynomial::new(arity, terms).unwrap()
    }

    fn term(rng: &mut StdRng) -> PairTerm<MonomialPolynomial> {
        let descriptor = descriptor();
        let polynomial = polynomial(rng, descriptor.arity());
        PairTerm::new(descriptor, polynomial).unwrap()
    }

    fn configuration(rng: &mut StdRng, distance: f64) -> ([Point3<f64>; 3], [Point3<f64>; 1]) {
        let water = water(rng, Point3::origin());
        let ion = water[0] + direction(rng) * distance;
        (water, [ion])
    }

    fn energy(term: &PairTerm<MonomialPolynomial>, a: &[Point3<f64>], b: &[Point3<f64>]) -> f64 {
        term.evaluate(a, b).unwrap().energy
    }

    #[test]
    fn new_rejects_polynomial_with_wrong_arity() {
        let descriptor = descriptor();
        let polynomial = MonomialPolynomial::univariate(&[1.0, 2.0], 1);
        assert_eq!(
            PairTerm::new(descriptor, polynomial).err(),
            Some(EngineError::ArityMismatch {
                expected: 7,
                found: 1
            })
        );
    }

    #[test]
    fn evaluate_rejects_wrong_atom_counts() {
        let mut rng = StdRng::seed_from_u64(1);
        let term = term(&mut rng);
        let (water, ion) = configuration(&mut rng, 3.0);
        assert_eq!(
            term.evaluate(&water[..2], &ion).err(),
            Some(EngineError::AtomCountMismatch {
                body: Body::A,
                expected: 3,
                found: 2
            })
        );
        assert_eq!(
            term.evaluate(&water, &[ion[0], ion[0]]).err(),
            Some(EngineError::AtomCountMismatch {
                body: Body::B,
                expected: 1,
                found: 2
            })
        );
    }

    #[test]
    fn evaluate_returns_exact_zeros_beyond_cutoff() {
        let mut rng = StdRng::seed_from_u64(2);
        let term = term(&mut rng);
        let (water, ion) = configuration(&mut rng, 6.01);
        let output = term.evaluate(&water, &ion).unwrap();
        assert_eq!(output.energy, 0.0);
        assert!(output.gradient_a.as_slice().iter().all(|g| *g == Vector3::zeros()));
        assert_eq!(output.gradient_b[0], Vector3::zeros());
        assert_eq!(output.gradient_a.len(), 3);
        assert_eq!(output.gradient_b.len(), 1);
    }

    #[test]
    fn evaluate_returns_zero_exactly_at_cutoff() {
        let mut rng = StdRng::seed_from_u64(3);
        let term = term(&mut rng);
        let water = [
            Point3::origin(),
            Point3::new(0.757, 0.586, 0.0),
            Point3::new(-0.757, 0.586, 0.0),
        ];
        let ion = [Point3::new(0.0, 0.0, 6.0)];
        let output = term.evaluate(&water, &ion).unwrap();
        assert_eq!(output.energy, 0.0);
        assert_eq!(output.net_gradient(), Vector3::zeros());
    }

    #[test]
    fn switch_is_one_inside_inner_cutoff() {
        let mut rng = StdRng::seed_from_u64(4);
        let term = term(&mut rng);
        let (water, ion) = configuration(&mut rng, 3.0);
        let evaluation = term.evaluate_unswitched(&water, &ion, None).unwrap();
        let output = term.evaluate(&water, &ion).unwrap();
        assert_eq!(evaluation.switch_value, 1.0);
        assert_eq!(output.energy, evaluation.raw_energy);
    }

    #[test]
    fn folded_gradients_leave_virtual_slots_empty() {
        let mut rng = StdRng::seed_from_u64(5);
        let term = term(&mut rng);
        let (water, ion) = configuration(&mut rng, 3.5);
        let evaluation = term.evaluate_unswitched(&water, &ion, None).unwrap();
        for body in Body::BOTH {
            for role in [SiteRole::Virtual1, SiteRole::Virtual2] {
                assert_eq!(evaluation.gradients[Site::new(body, role)], Vector3::zeros());
            }
        }
    }

    #[test]
    fn gradients_sum_to_zero() {
        let mut rng = StdRng::seed_from_u64(6);
        let term = term(&mut rng);
        for distance in [2.5, 4.0, 5.2, 5.5, 5.9] {
            let (water, ion) = configuration(&mut rng, distance);
            let output = term.evaluate(&water, &ion).unwrap();
            assert_vec_close(&output.net_gradient(), &Vector3::zeros(), 1e-10);
        }
    }

    #[test]
    fn gradients_match_finite_differences_inside_and_across_the_switch() {
        let mut rng = StdRng::seed_from_u64(7);
        let term = term(&mut rng);
        for distance in [2.8, 4.5, 5.3, 5.8] {
            let (water, ion) = configuration(&mut rng, distance);
            let output = term.evaluate(&water, &ion).unwrap();

            for i in 0..3 {
                let numeric = central_difference(&water[i], |p| {
                    let mut moved = water;
                    moved[i] = *p;
                    energy(&term, &moved, &ion)
                });
                assert_vec_close(&output.gradient_a[i], &numeric, 1e-6);
            }
            let numeric = central_difference(&ion[0], |p| energy(&term, &water, &[*p]));
            assert_vec_close(&output.gradient_b[0], &numeric, 1e-6);
        }
    }

    #[test]
    fn energy_is_invariant_under_rigid_translation() {
        let mut rng = StdRng::seed_from_u64(8);
        let term = term(&mut rng);
        let (water, ion) = configuration(&mut rng, 5.1);
        let shift = Vector3::new(10.0, -3.0, 7.5);
        let moved_water = water.map(|p| p + shift);
        let moved_ion = ion.map(|p| p + shift);
        assert_close(
            energy(&term, &moved_water, &moved_ion),
            energy(&term, &water, &ion),
            1e-10,
        );
    }

    #[test]
    fn cutoffs_come_from_the_descriptor() {
        let mut rng = StdRng::seed_from_u64(9);
        let term = term(&mut rng);
        assert_eq!(term.cutoff(), 6.0);
        assert_eq!(term.inner_cutoff(), 5.0);
        assert_eq!(term.descriptor().arity(), term.polynomial().arity());
    }
}
