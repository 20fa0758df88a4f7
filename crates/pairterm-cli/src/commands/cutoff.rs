use crate::cli::SpeciesArgs;
use crate::error::Result;
use pairterm::species::SpeciesParams;
use tracing::info;

pub fn run(args: SpeciesArgs) -> Result<()> {
    let params = SpeciesParams::resolve(&args.species)?;
    info!("Resolved '{}' as a {} pair.", args.species, params.kind_name());
    print!("{}", render(&args.species, &params));
    Ok(())
}

fn render(name: &str, params: &SpeciesParams) -> String {
    let cutoffs = params.cutoffs();
    format!(
        "{name} ({kind})\n  switching starts: {inner:.3} A\n  cutoff:           {outer:.3} A\n",
        kind = params.kind_name(),
        inner = cutoffs.inner,
        outer = cutoffs.outer,
    )
}
