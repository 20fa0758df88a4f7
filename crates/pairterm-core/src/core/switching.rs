use serde::Deserialize;
use std::f64::consts::PI;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone, Copy)]
pub enum SwitchError {
    #[error("Switching radii must be finite and non-negative (inner = {inner}, outer = {outer})")]
    NonFinite { inner: f64, outer: f64 },
    #[error("Inner switching radius {inner} must be smaller than the outer radius {outer}")]
    Inverted { inner: f64, outer: f64 },
}

/// Where a distance falls relative to the switching band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Inside,
    Transition,
    Outside,
}

/// Half-cosine ramp that fades a term from 1 at `inner` to 0 at `outer`.
///
/// Both the value and its first derivative are continuous everywhere; the derivative vanishes
/// at both edges of the band.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "RawSwitch")]
pub struct SwitchingFunction {
    inner: f64,
    outer: f64,
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RawSwitch {
    inner: f64,
    outer: f64,
}

impl TryFrom<RawSwitch> for SwitchingFunction {
    type Error = SwitchError;

    fn try_from(raw: RawSwitch) -> Result<Self, Self::Error> {
        Self::new(raw.inner, raw.outer)
    }
}

impl SwitchingFunction {
    pub fn new(inner: f64, outer: f64) -> Result<Self, SwitchError> {
        if !inner.is_finite() || !outer.is_finite() || inner < 0.0 {
            return Err(SwitchError::NonFinite { inner, outer });
        }
        if inner >= outer {
            return Err(SwitchError::Inverted { inner, outer });
        }
        Ok(Self { inner, outer })
    }

    #[inline]
    pub fn inner(&self) -> f64 {
        self.inner
    }

    #[inline]
    pub fn outer(&self) -> f64 {
        self.outer
    }

    #[inline]
    pub fn region(&self, r: f64) -> Region {
        if r <= self.inner {
            Region::Inside
        } else if r >= self.outer {
            Region::Outside
        } else {
            Region::Transition
        }
    }

    /// Returns `(value, d value / d r)`.
    #[inline]
    pub fn evaluate(&self, r: f64) -> (f64, f64) {
        match self.region(r) {
            Region::Inside => (1.0, 0.0),
            Region::Outside => (0.0, 0.0),
            Region::Transition => {
                let scale = PI / (self.outer - self.inner);
                let x = (r - self.inner) * scale;
                ((1.0 + x.cos()) / 2.0, -x.sin() * scale / 2.0)
            }
        }
    }
}
