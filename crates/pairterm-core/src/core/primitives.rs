use nalgebra::{Point3, Vector3};
use serde::Deserialize;

/// The functional form of a primitive distance variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VariableKind {
    /// `exp(k * (r0 - r))`
    Exponential,
    /// `exp(k * (r0 - r)) / r`
    ScreenedCoulomb,
}

/// One scalar polynomial input built from the separation of two sites.
///
/// The variable keeps the derivative of its value with respect to the first site. The
/// derivative with respect to the second site is its negative, so a single vector is enough
/// to push an energy derivative back onto both sites.
///
/// Both forms divide by the separation; the two sites must never coincide.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PrimitiveVariable {
    value: f64,
    gradient: Vector3<f64>,
}

impl PrimitiveVariable {
    pub fn new(
        kind: VariableKind,
        k: f64,
        r0: f64,
        first: &Point3<f64>,
        second: &Point3<f64>,
    ) -> Self {
        match kind {
            VariableKind::Exponential => Self::exponential(k, r0, first, second),
            VariableKind::ScreenedCoulomb => Self::screened_coulomb(k, r0, first, second),
        }
    }

    #[inline]
    pub fn exponential(k: f64, r0: f64, first: &Point3<f64>, second: &Point3<f64>) -> Self {
        let separation = first - second;
        let r = separation.norm();

        let value = (k * (r0 - r)).exp();
        let factor = -k * value / r;

        Self {
            value,
            gradient: separation * factor,
        }
    }

    #[inline]
    pub fn screened_coulomb(k: f64, r0: f64, first: &Point3<f64>, second: &Point3<f64>) -> Self {
        let separation = first - second;
        let r = separation.norm();

        let r_inv = 1.0 / r;
        let value = (k * (r0 - r)).exp() * r_inv;
        let factor = -(k + r_inv) * value * r_inv;

        Self {
            value,
            gradient: separation * factor,
        }
    }

    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Derivative of the value with respect to the first site.
    #[inline]
    pub fn gradient(&self) -> Vector3<f64> {
        self.gradient
    }

    /// Chain-rule contribution of this variable to the first site, given `dE/dvalue`.
    #[inline]
    pub fn contribution(&self, d_energy: f64) -> Vector3<f64> {
        self.gradient * d_energy
    }

    /// Adds `dE/dvalue * dvalue/dsite` into the accumulator of both sites and returns the
    /// vector added to the first one (the second one receives its negative).
    #[inline]
    pub fn distribute(
        &self,
        d_energy: f64,
        gradients: &mut [Vector3<f64>],
        first: usize,
        second: usize,
    ) -> Vector3<f64> {
        let d = self.contribution(d_energy);
        gradients[first] += d;
        gradients[second] -= d;
        d
    }
}
