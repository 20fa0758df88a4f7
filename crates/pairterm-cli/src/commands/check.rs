use super::load_term;
use crate::cli::CheckArgs;
use crate::error::{CliError, Result};
use crate::geometry;
use nalgebra::Point3;
use pairterm::core::polynomial::Polynomial;
use pairterm::core::sites::Body;
use pairterm::engine::batch::PairGeometry;
use pairterm::engine::driver::PairTerm;
use tracing::{debug, info, warn};

pub fn run(args: CheckArgs) -> Result<()> {
    if args.step.is_nan() || args.step <= 0.0 {
        return Err(CliError::Argument(format!(
            "Finite-difference step must be positive, got {}",
            args.step
        )));
    }

    let (_, term) = load_term(&args.term)?;
    let pairs = geometry::load(&args.term.geometry)?;

    let mut max_error: f64 = 0.0;
    for (index, pair) in pairs.iter().enumerate() {
        let error = max_gradient_error(&term, pair, args.step)?;
        debug!("Pair {}: largest gradient deviation {:.3e}", index + 1, error);
        println!("Pair {}: max deviation {:.3e}", index + 1, error);
        max_error = max_error.max(error);
    }

    info!(
        "Checked {} pair(s); largest deviation {:.3e} (tolerance {:.3e}).",
        pairs.len(),
        max_error,
        args.tolerance
    );

    if max_error > args.tolerance {
        warn!("Analytic gradients disagree with finite differences.");
        return Err(CliError::GradientCheck {
            max_error,
            tolerance: args.tolerance,
        });
    }
    Ok(())
}

/// Largest deviation between the analytic gradient of one pair and its central-difference
/// estimate, relative to the estimate's magnitude where that exceeds one.
fn max_gradient_error<P: Polynomial>(
    term: &PairTerm<P>,
    pair: &PairGeometry,
    step: f64,
) -> Result<f64> {
    let analytic = term.evaluate(&pair.a, &pair.b)?;
    let mut displaced = pair.clone();
    let mut max_error: f64 = 0.0;

    for body in Body::BOTH {
        for atom in 0..analytic.gradient(body).len() {
            for axis in 0..3 {
                let original = atoms(pair, body)[atom];

                atoms_mut(&mut displaced, body)[atom][axis] = original[axis] + step;
                let plus = term.evaluate(&displaced.a, &displaced.b)?.energy;
                atoms_mut(&mut displaced, body)[atom][axis] = original[axis] - step;
                let minus = term.evaluate(&displaced.a, &displaced.b)?.energy;
                atoms_mut(&mut displaced, body)[atom] = original;

                let numeric = (plus - minus) / (2.0 * step);
                let exact = analytic.gradient(body)[atom][axis];
                let error = (exact - numeric).abs() / numeric.abs().max(1.0);
                max_error = max_error.max(error);
            }
        }
    }
    Ok(max_error)
}

fn atoms(pair: &PairGeometry, body: Body) -> &[Point3<f64>] {
    match body {
        Body::A => &pair.a,
        Body::B => &pair.b,
    }
}

fn atoms_mut(pair: &mut PairGeometry, body: Body) -> &mut [Point3<f64>] {
    match body {
        Body::A => &mut pair.a,
        Body::B => &mut pair.b,
    }
}
