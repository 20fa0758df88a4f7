use crate::error::Result;
use pairterm::species::presets;
use tracing::info;

pub fn run() -> Result<()> {
    let names = presets::names();
    info!("Listing {} built-in presets.", names.len());
    print!("{}", render(&names));
    Ok(())
}

fn render(names: &[&str]) -> String {
    let mut text = format!("{:<16} {:<12} {:>8} {:>8}\n", "NAME", "KIND", "INNER", "OUTER");
    for (name, params) in names
        .iter()
        .filter_map(|&name| presets::get(name).map(|p| (name, p)))
    {
        let cutoffs = params.cutoffs();
        text.push_str(&format!(
            "{:<16} {:<12} {:>8.2} {:>8.2}\n",
            name,
            params.kind_name(),
            cutoffs.inner,
            cutoffs.outer
        ));
    }
    text
}
