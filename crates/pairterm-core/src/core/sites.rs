use nalgebra::{Point3, Vector3};
use std::fmt;
use std::ops::{Index, IndexMut};

/// Sites reserved per body: anchor, two peripherals and two virtual sites.
pub const SITES_PER_BODY: usize = 5;
/// Sites of both bodies of a pair.
pub const MAX_SITES: usize = 2 * SITES_PER_BODY;
/// Real atoms of both bodies of a pair.
pub const MAX_REAL_ATOMS: usize = 6;

/// One of the two interacting bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Body {
    A = 0,
    B = 1,
}

impl Body {
    pub const BOTH: [Body; 2] = [Body::A, Body::B];

    pub fn other(self) -> Self {
        match self {
            Body::A => Body::B,
            Body::B => Body::A,
        }
    }
}

/// The role of a site within its body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SiteRole {
    /// The central atom (the oxygen of a water, or the ion itself).
    Anchor = 0,
    Peripheral1 = 1,
    Peripheral2 = 2,
    Virtual1 = 3,
    Virtual2 = 4,
}

impl SiteRole {
    pub fn is_virtual(self) -> bool {
        matches!(self, SiteRole::Virtual1 | SiteRole::Virtual2)
    }
}

/// What kind of particle a body is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyKind {
    /// A rigid three-atom monomer carrying two virtual sites.
    Monomer,
    /// A single point particle.
    Point,
}

impl BodyKind {
    /// Number of real atoms the caller provides for this body.
    pub fn real_atoms(self) -> usize {
        match self {
            BodyKind::Monomer => 3,
            BodyKind::Point => 1,
        }
    }

    pub fn has_virtual_sites(self) -> bool {
        matches!(self, BodyKind::Monomer)
    }

    pub fn has_role(self, role: SiteRole) -> bool {
        match self {
            BodyKind::Monomer => true,
            BodyKind::Point => role == SiteRole::Anchor,
        }
    }

    pub fn real_roles(self) -> &'static [SiteRole] {
        match self {
            BodyKind::Monomer => &[SiteRole::Anchor, SiteRole::Peripheral1, SiteRole::Peripheral2],
            BodyKind::Point => &[SiteRole::Anchor],
        }
    }
}

/// A named site of a two-body system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Site {
    pub body: Body,
    pub role: SiteRole,
}

impl Site {
    pub const fn new(body: Body, role: SiteRole) -> Self {
        Self { body, role }
    }

    pub const fn a(role: SiteRole) -> Self {
        Self::new(Body::A, role)
    }

    pub const fn b(role: SiteRole) -> Self {
        Self::new(Body::B, role)
    }

    /// Position of this site in a [`SiteBuffer`].
    #[inline]
    pub const fn index(self) -> usize {
        self.body as usize * SITES_PER_BODY + self.role as usize
    }

    pub fn is_virtual(self) -> bool {
        self.role.is_virtual()
    }

    pub fn anchor_of(body: Body) -> Self {
        Self::new(body, SiteRole::Anchor)
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let role = match self.role {
            SiteRole::Anchor => "anchor",
            SiteRole::Peripheral1 => "peripheral-1",
            SiteRole::Peripheral2 => "peripheral-2",
            SiteRole::Virtual1 => "virtual-1",
            SiteRole::Virtual2 => "virtual-2",
        };
        let body = match self.body {
            Body::A => "a",
            Body::B => "b",
        };
        write!(f, "{body}.{role}")
    }
}

/// Fixed-size per-site storage for both bodies, indexed by [`Site`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SiteBuffer<T> {
    slots: [T; MAX_SITES],
}

impl<T: Copy> SiteBuffer<T> {
    pub fn filled(value: T) -> Self {
        Self {
            slots: [value; MAX_SITES],
        }
    }

    pub fn as_slice(&self) -> &[T] {
        &self.slots
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.slots
    }
}

impl SiteBuffer<Point3<f64>> {
    pub fn origin() -> Self {
        Self::filled(Point3::origin())
    }
}

impl SiteBuffer<Vector3<f64>> {
    pub fn zeros() -> Self {
        Self::filled(Vector3::zeros())
    }
}

impl<T> Index<Site> for SiteBuffer<T> {
    type Output = T;

    fn index(&self, site: Site) -> &T {
        &self.slots[site.index()]
    }
}

impl<T> IndexMut<Site> for SiteBuffer<T> {
    fn index_mut(&mut self, site: Site) -> &mut T {
        &mut self.slots[site.index()]
    }
}
