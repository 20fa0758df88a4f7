use nalgebra::{Point3, Vector3};
use serde::Deserialize;

/// Mixing weights that position the two virtual sites of a rigid monomer.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FrameWeights {
    /// Weight of the bond bisector, shared by both virtual sites.
    pub in_plane: f64,
    /// Weight of the bond cross product, added to the first site and subtracted from the second.
    pub out_of_plane: f64,
}

impl FrameWeights {
    pub const fn new(in_plane: f64, out_of_plane: f64) -> Self {
        Self {
            in_plane,
            out_of_plane,
        }
    }
}

/// The local frame of a rigid three-site monomer (one anchor, two peripherals).
///
/// A frame is a linear map between the monomer's real atoms and its two virtual sites:
///
/// ```text
/// v1 = anchor + in_plane/2 * (b1 + b2) + out_of_plane * (b1 x b2)
/// v2 = anchor + in_plane/2 * (b1 + b2) - out_of_plane * (b1 x b2)
/// ```
///
/// with `b1 = p1 - anchor` and `b2 = p2 - anchor`. [`RigidFrame::place`] applies the map and
/// [`RigidFrame::distribute`] applies its transposed Jacobian, so gradients collected on the
/// virtual sites can be moved onto the atoms that generated them. Both directions share the
/// same bond vectors and weights.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigidFrame {
    anchor: Point3<f64>,
    bond1: Vector3<f64>,
    bond2: Vector3<f64>,
    weights: FrameWeights,
}

impl RigidFrame {
    pub fn new(
        anchor: &Point3<f64>,
        peripheral1: &Point3<f64>,
        peripheral2: &Point3<f64>,
        weights: FrameWeights,
    ) -> Self {
        Self {
            anchor: *anchor,
            bond1: peripheral1 - anchor,
            bond2: peripheral2 - anchor,
            weights,
        }
    }

    pub fn from_atoms(atoms: &[Point3<f64>; 3], weights: FrameWeights) -> Self {
        Self::new(&atoms[0], &atoms[1], &atoms[2], weights)
    }

    #[inline]
    pub fn bonds(&self) -> (Vector3<f64>, Vector3<f64>) {
        (self.bond1, self.bond2)
    }

    #[inline]
    pub fn weights(&self) -> FrameWeights {
        self.weights
    }

    /// Positions of the two virtual sites.
    #[inline]
    pub fn place(&self) -> (Point3<f64>, Point3<f64>) {
        let in_plane = self.anchor + (self.bond1 + self.bond2) * (0.5 * self.weights.in_plane);
        let out_of_plane = self.bond1.cross(&self.bond2) * self.weights.out_of_plane;

        (in_plane + out_of_plane, in_plane - out_of_plane)
    }

    /// Moves the gradients of the two virtual sites onto `[anchor, peripheral1, peripheral2]`.
    ///
    /// The three returned vectors always sum to `g1 + g2`.
    #[inline]
    pub fn distribute(&self, g1: &Vector3<f64>, g2: &Vector3<f64>) -> [Vector3<f64>; 3] {
        let sum = g1 + g2;
        let difference = g1 - g2;

        let in_plane = sum * (0.5 * self.weights.in_plane);
        let torque1 = self.bond2.cross(&difference) * self.weights.out_of_plane;
        let torque2 = self.bond1.cross(&difference) * self.weights.out_of_plane;

        let peripheral1 = in_plane + torque1;
        let peripheral2 = in_plane - torque2;
        let anchor = sum - (peripheral1 + peripheral2);

        [anchor, peripheral1, peripheral2]
    }
}
