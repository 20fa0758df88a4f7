use nalgebra::{Point3, Vector3};
use rand::Rng;
use rand::rngs::StdRng;

const STEP: f64 = 1e-6;

pub fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    let scale = expected.abs().max(1.0);
    assert!(
        (actual - expected).abs() <= tolerance * scale,
        "expected {expected}, got {actual} (tolerance {tolerance})"
    );
}

pub fn assert_vec_close(actual: &Vector3<f64>, expected: &Vector3<f64>, tolerance: f64) {
    for i in 0..3 {
        let scale = expected[i].abs().max(1.0);
        assert!(
            (actual[i] - expected[i]).abs() <= tolerance * scale,
            "component {i}: expected {expected:?}, got {actual:?} (tolerance {tolerance})"
        );
    }
}

/// Central-difference gradient of a scalar function of one point.
pub fn central_difference<F>(point: &Point3<f64>, f: F) -> Vector3<f64>
where
    F: Fn(&Point3<f64>) -> f64,
{
    let mut gradient = Vector3::zeros();
    for axis in 0..3 {
        let mut plus = *point;
        let mut minus = *point;
        plus[axis] += STEP;
        minus[axis] -= STEP;
        gradient[axis] = (f(&plus) - f(&minus)) / (2.0 * STEP);
    }
    gradient
}

/// A slightly distorted water monomer (O, H1, H2) centered at `oxygen`.
pub fn water(rng: &mut StdRng, oxygen: Point3<f64>) -> [Point3<f64>; 3] {
    let jitter = |rng: &mut StdRng| {
        Vector3::new(
            rng.gen_range(-0.05..0.05),
            rng.gen_range(-0.05..0.05),
            rng.gen_range(-0.05..0.05),
        )
    };
    let h1 = oxygen + Vector3::new(0.757, 0.586, 0.0) + jitter(rng);
    let h2 = oxygen + Vector3::new(-0.757, 0.586, 0.0) + jitter(rng);
    [oxygen + jitter(rng), h1, h2]
}

/// A random unit vector.
pub fn direction(rng: &mut StdRng) -> Vector3<f64> {
    loop {
        let v = Vector3::new(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        );
        let norm = v.norm();
        if norm > 0.1 && norm <= 1.0 {
            return v / norm;
        }
    }
}
