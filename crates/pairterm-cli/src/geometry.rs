use crate::error::{CliError, Result};
use nalgebra::Point3;
use pairterm::engine::batch::PairGeometry;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
struct FilePair {
    a: Vec<[f64; 3]>,
    b: Vec<[f64; 3]>,
}

impl From<FilePair> for PairGeometry {
    fn from(p: FilePair) -> Self {
        let convert = |atoms: Vec<[f64; 3]>| atoms.into_iter().map(Point3::from).collect();
        PairGeometry::new(convert(p.a), convert(p.b))
    }
}

#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum GeometryFile {
    Batch { pairs: Vec<FilePair> },
    Single(FilePair),
}

/// Reads pair geometries from a TOML file.
///
/// A file either holds one pair as top-level `a`/`b` arrays of `[x, y, z]` positions, or many
/// pairs as a `[[pairs]]` array of tables with the same keys.
pub fn load(path: &Path) -> Result<Vec<PairGeometry>> {
    let content = std::fs::read_to_string(path)?;
    let pairs = parse(&content).map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e.into(),
    })?;
    if pairs.is_empty() {
        return Err(CliError::Argument(format!(
            "Geometry file '{}' contains no pairs",
            path.display()
        )));
    }
    debug!("Loaded {} pair(s) from '{}'", pairs.len(), path.display());
    Ok(pairs)
}

fn parse(content: &str) -> std::result::Result<Vec<PairGeometry>, toml::de::Error> {
    let file: GeometryFile = toml::from_str(content)?;
    Ok(match file {
        GeometryFile::Batch { pairs } => pairs.into_iter().map(PairGeometry::from).collect(),
        GeometryFile::Single(pair) => vec![pair.into()],
    })
}
