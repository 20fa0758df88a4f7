pub mod check;
pub mod cutoff;
pub mod eval;
pub mod presets;

use crate::cli::TermArgs;
use crate::error::Result;
use pairterm::core::polynomial::MonomialPolynomial;
use pairterm::engine::driver::PairTerm;
use pairterm::engine::error::EngineError;
use pairterm::species::SpeciesParams;
use tracing::info;

/// Resolves the species, loads the coefficient table, and assembles the term.
pub(crate) fn load_term(args: &TermArgs) -> Result<(SpeciesParams, PairTerm<MonomialPolynomial>)> {
    let params = SpeciesParams::resolve(&args.species.species)?;
    let polynomial = MonomialPolynomial::from_csv_path(&args.polynomial)?;
    let descriptor = params.descriptor().map_err(EngineError::from)?;
    let term = PairTerm::new(descriptor, polynomial)?;
    info!(
        "Built {} term from '{}' with {} polynomial terms (cutoff {} A).",
        params.kind_name(),
        args.species.species,
        term.polynomial().len(),
        term.cutoff()
    );
    Ok((params, term))
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::cli::{SpeciesArgs, TermArgs};
    use std::path::Path;

    /// A linear polynomial in one variable, usable with every ion-ion preset.
    pub const ION_ION_CSV: &str = "coefficient,x0\n0.5,0\n2.0,1\n-0.3,2\n";

    pub const ION_ION_GEOMETRY: &str = r#"
        [[pairs]]
        a = [[0.0, 0.0, 0.0]]
        b = [[4.0, 0.0, 0.0]]

        [[pairs]]
        a = [[0.0, 0.0, 0.0]]
        b = [[0.0, 7.5, 0.0]]

        [[pairs]]
        a = [[0.0, 0.0, 0.0]]
        b = [[0.0, 0.0, 9.0]]
    "#;

    pub fn term_args(dir: &Path, species: &str, csv: &str, geometry: &str) -> TermArgs {
        let polynomial = dir.join("poly.csv");
        let geometry_path = dir.join("geometry.toml");
        std::fs::write(&polynomial, csv).unwrap();
        std::fs::write(&geometry_path, geometry).unwrap();
        TermArgs {
            species: SpeciesArgs {
                species: species.to_string(),
            },
            polynomial,
            geometry: geometry_path,
        }
    }
}
