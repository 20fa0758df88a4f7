use super::load_term;
use crate::cli::EvalArgs;
use crate::error::Result;
use crate::geometry;
use nalgebra::Vector3;
use pairterm::core::sites::Body;
use pairterm::engine::driver::PairOutput;
use pairterm::engine::force_matrix::ForceMatrix;
use std::fmt::Write;
use tracing::info;

pub fn run(args: EvalArgs) -> Result<()> {
    let (params, term) = load_term(&args.term)?;
    let pairs = geometry::load(&args.term.geometry)?;

    let mut report = String::new();
    let _ = writeln!(
        report,
        "Species: {} ({})",
        args.term.species.species,
        params.kind_name()
    );

    if args.force_matrix {
        let mut total_energy = 0.0;
        for (index, pair) in pairs.iter().enumerate() {
            let (output, matrix) = term.evaluate_with_force_matrix(&pair.a, &pair.b)?;
            total_energy += output.energy;
            write_pair(&mut report, index, &output);
            write_force_matrix(&mut report, &matrix);
        }
        write_total(&mut report, pairs.len(), total_energy);
    } else {
        let batch = term.evaluate_batch(&pairs)?;
        for (index, output) in batch.outputs.iter().enumerate() {
            write_pair(&mut report, index, output);
        }
        write_total(&mut report, pairs.len(), batch.total_energy);
    }

    info!("Evaluated {} pair(s).", pairs.len());
    print!("{report}");
    Ok(())
}

fn format_vector(v: &Vector3<f64>) -> String {
    format!("{:>20.12e} {:>20.12e} {:>20.12e}", v.x, v.y, v.z)
}

fn write_pair(report: &mut String, index: usize, output: &PairOutput) {
    let _ = writeln!(report, "Pair {}: energy = {:.12e}", index + 1, output.energy);
    for body in Body::BOTH {
        let label = match body {
            Body::A => 'a',
            Body::B => 'b',
        };
        for (atom, gradient) in output.gradient(body).as_slice().iter().enumerate() {
            let _ = writeln!(report, "  d/d{label}[{atom}] {}", format_vector(gradient));
        }
    }
}

fn write_force_matrix(report: &mut String, matrix: &ForceMatrix) {
    let _ = writeln!(report, "  force matrix (row atom, column partner):");
    for (row, site) in matrix.sites().iter().enumerate() {
        for (column, partner) in matrix.sites().iter().enumerate() {
            let _ = writeln!(
                report,
                "    {:<16} {:<16} {}",
                site.to_string(),
                partner.to_string(),
                format_vector(&matrix.get(row, column))
            );
        }
    }
}

fn write_total(report: &mut String, count: usize, total_energy: f64) {
    let _ = writeln!(report, "Total over {count} pair(s): {total_energy:.12e}");
}
