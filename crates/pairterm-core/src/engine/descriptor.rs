use super::error::DescriptorError;
use crate::core::frame::FrameWeights;
use crate::core::primitives::VariableKind;
use crate::core::sites::{Body, BodyKind, MAX_REAL_ATOMS, Site};
use crate::core::switching::SwitchingFunction;
use tracing::debug;

/// Upper bound on the number of primitive variables of one pair term.
pub const MAX_VARIABLES: usize = 32;

/// One row of a descriptor table: which sites a primitive variable couples and how.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VariableDescriptor {
    pub kind: VariableKind,
    pub first: Site,
    pub second: Site,
    /// Decay rate `k` in inverse Angstroms.
    pub decay: f64,
    /// Reference distance `r0` in Angstroms.
    pub reference: f64,
}

/// Everything the generic driver needs to know about one species pair.
///
/// A descriptor lists the two body kinds, the primitive variables in the order the polynomial
/// expects them, the pair of real atoms whose separation controls the cutoff, the switching
/// radii, and the virtual-site weights used by monomer bodies. It is validated once at build
/// time so the evaluation path never has to check it.
#[derive(Debug, Clone, PartialEq)]
pub struct PairDescriptor {
    bodies: [BodyKind; 2],
    variables: Vec<VariableDescriptor>,
    controlling: (Site, Site),
    switching: SwitchingFunction,
    frame_weights: FrameWeights,
}

impl PairDescriptor {
    pub fn builder(a: BodyKind, b: BodyKind) -> PairDescriptorBuilder {
        PairDescriptorBuilder::new(a, b)
    }

    #[inline]
    pub fn body_kind(&self, body: Body) -> BodyKind {
        self.bodies[body as usize]
    }

    #[inline]
    pub fn variables(&self) -> &[VariableDescriptor] {
        &self.variables
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.variables.len()
    }

    #[inline]
    pub fn controlling(&self) -> (Site, Site) {
        self.controlling
    }

    #[inline]
    pub fn switching(&self) -> &SwitchingFunction {
        &self.switching
    }

    #[inline]
    pub fn frame_weights(&self) -> FrameWeights {
        self.frame_weights
    }

    pub fn real_atom_count(&self) -> usize {
        self.bodies.iter().map(|kind| kind.real_atoms()).sum()
    }

    /// Real atoms of body A followed by real atoms of body B.
    pub fn real_sites(&self) -> impl Iterator<Item = Site> + '_ {
        Body::BOTH.into_iter().flat_map(move |body| {
            self.body_kind(body)
                .real_roles()
                .iter()
                .map(move |&role| Site::new(body, role))
        })
    }

    /// Position of a real atom in the ordering of [`PairDescriptor::real_sites`].
    pub fn real_index(&self, site: Site) -> Option<usize> {
        let kind = self.body_kind(site.body);
        if site.is_virtual() || !kind.has_role(site.role) {
            return None;
        }
        let offset = match site.body {
            Body::A => 0,
            Body::B => self.body_kind(Body::A).real_atoms(),
        };
        Some(offset + site.role as usize)
    }
}

#[derive(Debug, Clone)]
pub struct PairDescriptorBuilder {
    bodies: [BodyKind; 2],
    variables: Vec<VariableDescriptor>,
    controlling: Option<(Site, Site)>,
    cutoffs: Option<(f64, f64)>,
    frame_weights: Option<FrameWeights>,
}

impl PairDescriptorBuilder {
    pub fn new(a: BodyKind, b: BodyKind) -> Self {
        Self {
            bodies: [a, b],
            variables: Vec::new(),
            controlling: None,
            cutoffs: None,
            frame_weights: None,
        }
    }

    pub fn controlling(mut self, first: Site, second: Site) -> Self {
        self.controlling = Some((first, second));
        self
    }
    pub fn cutoffs(mut self, inner: f64, outer: f64) -> Self {
        self.cutoffs = Some((inner, outer));
        self
    }
    pub fn frame_weights(mut self, weights: FrameWeights) -> Self {
        self.frame_weights = Some(weights);
        self
    }

    pub fn variable(
        mut self,
        kind: VariableKind,
        first: Site,
        second: Site,
        decay: f64,
        reference: f64,
    ) -> Self {
        self.variables.push(VariableDescriptor {
            kind,
            first,
            second,
            decay,
            reference,
        });
        self
    }
    pub fn exponential(self, first: Site, second: Site, decay: f64, reference: f64) -> Self {
        self.variable(VariableKind::Exponential, first, second, decay, reference)
    }
    pub fn screened_coulomb(self, first: Site, second: Site, decay: f64, reference: f64) -> Self {
        self.variable(VariableKind::ScreenedCoulomb, first, second, decay, reference)
    }

    pub fn build(self) -> Result<PairDescriptor, DescriptorError> {
        let (inner, outer) = self
            .cutoffs
            .ok_or(DescriptorError::MissingParameter("cutoffs"))?;
        let switching = SwitchingFunction::new(inner, outer)?;

        let (first, second) = self
            .controlling
            .ok_or(DescriptorError::MissingParameter("controlling"))?;

        let needs_frame = self.bodies.iter().any(|kind| kind.has_virtual_sites());
        let frame_weights = match self.frame_weights {
            Some(weights) => weights,
            None if needs_frame => {
                return Err(DescriptorError::MissingParameter("frame_weights"));
            }
            None => FrameWeights::new(0.0, 0.0),
        };

        for site in [first, second] {
            self.check_site(site)?;
            if site.is_virtual() {
                return Err(DescriptorError::VirtualControllingSite(site));
            }
        }
        if first.body == second.body {
            return Err(DescriptorError::ControllingSitesOnSameBody { first, second });
        }

        if self.variables.is_empty() {
            return Err(DescriptorError::NoVariables);
        }
        if self.variables.len() > MAX_VARIABLES {
            return Err(DescriptorError::TooManyVariables {
                max: MAX_VARIABLES,
                found: self.variables.len(),
            });
        }
        for (index, variable) in self.variables.iter().enumerate() {
            self.check_site(variable.first)?;
            self.check_site(variable.second)?;
            if variable.first == variable.second {
                return Err(DescriptorError::SelfInteraction {
                    index,
                    site: variable.first,
                });
            }
        }

        debug_assert!(self.bodies.iter().map(|k| k.real_atoms()).sum::<usize>() <= MAX_REAL_ATOMS);

        debug!(
            "Built pair descriptor: {:?}-{:?}, {} variables, cutoffs {}..{} A",
            self.bodies[0],
            self.bodies[1],
            self.variables.len(),
            inner,
            outer
        );

        Ok(PairDescriptor {
            bodies: self.bodies,
            variables: self.variables,
            controlling: (first, second),
            switching,
            frame_weights,
        })
    }

    fn check_site(&self, site: Site) -> Result<(), DescriptorError> {
        let kind = self.bodies[site.body as usize];
        if kind.has_role(site.role) {
            Ok(())
        } else {
            Err(DescriptorError::UnknownSite { site, kind })
        }
    }
}
