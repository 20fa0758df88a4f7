use super::presets;
use super::{ion_ion, water_ion, water_water};
use crate::core::frame::FrameWeights;
use crate::core::sites::BodyKind;
use crate::engine::descriptor::PairDescriptor;
use crate::engine::error::DescriptorError;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Inner and outer radius of the switching band, in Angstroms.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Cutoffs {
    pub inner: f64,
    pub outer: f64,
}

impl Cutoffs {
    pub const fn new(inner: f64, outer: f64) -> Self {
        Self { inner, outer }
    }
}

/// Constants of the MB-pol water dimer term.
///
/// Intramolecular variables use `d0_intra` as reference distance, all intermolecular ones use
/// `d0_inter`. The `x` in a name refers to the lone-pair virtual sites.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct WaterWaterParams {
    pub k_hh_intra: f64,
    pub k_oh_intra: f64,
    pub k_hh_coul: f64,
    pub k_oh_coul: f64,
    pub k_oo_coul: f64,
    pub k_xh_main: f64,
    pub k_xo_main: f64,
    pub k_xx_main: f64,
    pub d0_intra: f64,
    pub d0_inter: f64,
    pub frame: FrameWeights,
    pub cutoffs: Cutoffs,
}

/// Constants of an MB-nrg water-ion term.
///
/// Every variable class carries its own decay rate `k_*` and reference distance `d_*`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct WaterIonParams {
    pub k_hh_intra: f64,
    pub k_oh_intra: f64,
    pub k_ion_h: f64,
    pub k_ion_o: f64,
    pub k_ion_lone_pair: f64,
    pub d_hh_intra: f64,
    pub d_oh_intra: f64,
    pub d_ion_h: f64,
    pub d_ion_o: f64,
    pub d_ion_lone_pair: f64,
    pub frame: FrameWeights,
    pub cutoffs: Cutoffs,
}

/// Constants of an MB-nrg ion-ion term: a single exponential variable.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct IonIonParams {
    pub decay: f64,
    pub reference: f64,
    pub cutoffs: Cutoffs,
}

/// Parameters of any supported species pair, as read from a file or a preset.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum SpeciesParams {
    WaterWater(WaterWaterParams),
    WaterIon(WaterIonParams),
    IonIon(IonIonParams),
}

#[derive(Debug, Error)]
pub enum ParamLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Unknown preset '{0}'")]
    UnknownPreset(String),
}

impl SpeciesParams {
    pub fn load(path: &Path) -> Result<Self, ParamLoadError> {
        let display = path.to_string_lossy().to_string();
        let content = std::fs::read_to_string(path).map_err(|e| ParamLoadError::Io {
            path: display.clone(),
            source: e,
        })?;
        Self::from_toml_str(&content, &display)
    }

    pub fn from_toml_str(content: &str, origin: &str) -> Result<Self, ParamLoadError> {
        let params: Self = toml::from_str(content).map_err(|e| ParamLoadError::Toml {
            path: origin.to_string(),
            source: e,
        })?;
        debug!("Loaded {} parameters from '{}'", params.kind_name(), origin);
        Ok(params)
    }

    pub fn preset(name: &str) -> Result<Self, ParamLoadError> {
        presets::get(name)
            .copied()
            .ok_or_else(|| ParamLoadError::UnknownPreset(name.to_string()))
    }

    /// Looks `name_or_path` up as a preset first, then as a TOML file.
    pub fn resolve(name_or_path: &str) -> Result<Self, ParamLoadError> {
        match presets::get(name_or_path) {
            Some(params) => {
                debug!("Using built-in preset '{}'", name_or_path);
                Ok(*params)
            }
            None => Self::load(Path::new(name_or_path)),
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            SpeciesParams::WaterWater(_) => "water-water",
            SpeciesParams::WaterIon(_) => "water-ion",
            SpeciesParams::IonIon(_) => "ion-ion",
        }
    }

    pub fn body_kinds(&self) -> [BodyKind; 2] {
        match self {
            SpeciesParams::WaterWater(_) => [BodyKind::Monomer, BodyKind::Monomer],
            SpeciesParams::WaterIon(_) => [BodyKind::Monomer, BodyKind::Point],
            SpeciesParams::IonIon(_) => [BodyKind::Point, BodyKind::Point],
        }
    }

    pub fn cutoffs(&self) -> Cutoffs {
        match self {
            SpeciesParams::WaterWater(p) => p.cutoffs,
            SpeciesParams::WaterIon(p) => p.cutoffs,
            SpeciesParams::IonIon(p) => p.cutoffs,
        }
    }

    /// The descriptor table of this species pair, in the variable order of its fitted basis.
    pub fn descriptor(&self) -> Result<PairDescriptor, DescriptorError> {
        match self {
            SpeciesParams::WaterWater(p) => water_water::descriptor(p),
            SpeciesParams::WaterIon(p) => water_ion::descriptor(p),
            SpeciesParams::IonIon(p) => ion_ion::descriptor(p),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sites::Body;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    const ION_ION_TOML: &str = r#"
        kind = "ion-ion"
        decay = 0.5
        reference = 5.5

        [cutoffs]
        inner = 7.0
        outer = 8.0
    "#;

    #[test]
    fn load_succeeds_with_valid_toml() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("ion.toml");
        let mut file = File::create(&file_path).unwrap();
        write!(file, "{ION_ION_TOML}").unwrap();

        let params = SpeciesParams::load(&file_path).unwrap();
        assert_eq!(
            params,
            SpeciesParams::IonIon(IonIonParams {
                decay: 0.5,
                reference: 5.5,
                cutoffs: Cutoffs::new(7.0, 8.0),
            })
        );
        assert_eq!(params.kind_name(), "ion-ion");
        assert_eq!(params.body_kinds(), [BodyKind::Point, BodyKind::Point]);
    }

    #[test]
    fn load_water_ion_with_nested_tables() {
        let content = r#"
            kind = "water-ion"
            k-hh-intra = 0.1
            k-oh-intra = 0.2
            k-ion-h = 0.3
            k-ion-o = 0.4
            k-ion-lone-pair = 0.5
            d-hh-intra = 1.0
            d-oh-intra = 1.1
            d-ion-h = 6.0
            d-ion-o = 6.5
            d-ion-lone-pair = 5.0

            [frame]
            in-plane = -0.1
            out-of-plane = 0.1

            [cutoffs]
            inner = 5.0
            outer = 6.0
        "#;
        let params = SpeciesParams::from_toml_str(content, "inline").unwrap();
        let SpeciesParams::WaterIon(water_ion) = params else {
            panic!("expected water-ion parameters, got {params:?}");
        };
        assert_eq!(water_ion.k_ion_lone_pair, 0.5);
        assert_eq!(water_ion.frame, FrameWeights::new(-0.1, 0.1));
        assert_eq!(params.cutoffs(), Cutoffs::new(5.0, 6.0));
    }

    #[test]
    fn load_fails_for_nonexistent_file() {
        let result = SpeciesParams::load(Path::new("no/such/params.toml"));
        assert!(matches!(result, Err(ParamLoadError::Io { .. })));
    }

    #[test]
    fn load_fails_for_unknown_kind() {
        let result = SpeciesParams::from_toml_str("kind = \"ion-water\"\n", "inline");
        assert!(matches!(result, Err(ParamLoadError::Toml { .. })));
    }

    #[test]
    fn load_fails_for_unknown_field() {
        let content = ION_ION_TOML.replace("reference = 5.5", "reference = 5.5\nscale = 2.0");
        let result = SpeciesParams::from_toml_str(&content, "inline");
        assert!(matches!(result, Err(ParamLoadError::Toml { .. })));
    }

    #[test]
    fn load_fails_for_missing_field() {
        let content = ION_ION_TOML.replace("decay = 0.5", "");
        let result = SpeciesParams::from_toml_str(&content, "inline");
        assert!(matches!(result, Err(ParamLoadError::Toml { .. })));
    }

    #[test]
    fn preset_lookup_fails_for_unknown_name() {
        let result = SpeciesParams::preset("h2o-xe-pol0");
        assert!(matches!(result, Err(ParamLoadError::UnknownPreset(name)) if name == "h2o-xe-pol0"));
    }

    #[test]
    fn resolve_prefers_presets_and_falls_back_to_files() {
        let preset = SpeciesParams::resolve("li-li").unwrap();
        assert_eq!(preset.kind_name(), "ion-ion");

        let dir = tempdir().unwrap();
        let file_path = dir.path().join("custom.toml");
        std::fs::write(&file_path, ION_ION_TOML).unwrap();
        let loaded = SpeciesParams::resolve(file_path.to_str().unwrap()).unwrap();
        assert_eq!(loaded.cutoffs(), Cutoffs::new(7.0, 8.0));

        assert!(matches!(
            SpeciesParams::resolve("not-a-preset-or-file"),
            Err(ParamLoadError::Io { .. })
        ));
    }

    #[test]
    fn descriptor_matches_body_kinds_for_every_kind() {
        for name in ["h2o-h2o", "h2o-na-pol0", "k-br"] {
            let params = SpeciesParams::preset(name).unwrap();
            let descriptor = params.descriptor().unwrap();
            let [a, b] = params.body_kinds();
            assert_eq!(descriptor.body_kind(Body::A), a);
            assert_eq!(descriptor.body_kind(Body::B), b);
            assert_eq!(descriptor.switching().outer(), params.cutoffs().outer);
        }
    }
}
