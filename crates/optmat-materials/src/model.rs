//! Model resolution: configuration → dispersion model variant.
//!
//! Resolution is pure. It reads parameters and literature presets but never
//! touches files or catalogs; binding those resources is done by
//! [`Material`](crate::material::Material).
//!
//! ## Model tags
//!
//! | Tag | Keys | Variant |
//! |-----|------|---------|
//! | `dielectric` | `e` or `RI` | [`ModelSpec::Constant`] |
//! | `pec` | none | [`ModelSpec::Constant`] at [`PEC_PERMITTIVITY`] |
//! | `drude` | `e`, `wp`, `gp` | [`ModelSpec::Drude`] |
//! | `drude_lorentz` | `e`, `wp`, `gp`, `ss`, `ws`, `gs` | [`ModelSpec::DrudeLorentz`] |
//! | `haftel` | `e1` (or `e`), `tau`, `sp`, optional `wp`, `gp` | [`ModelSpec::Haftel`] |
//! | `gold_d` | none | Vial Drude gold |
//! | `gold_vial_dl` | none | Vial Drude-Lorentz gold |
//! | `gold_rakic`, `silver_rakic`, `aluminium_dl`, `tungsten_dl` | none | Rakić Lorentz-Drude |
//! | `gold_dl`, `silver_dl` | optional `bound_check` | catalog records `DL/Au/Stewart`, `DL/Ag/Vial` |
//! | `gold_jc`, `aluminium_rak` | optional `interpolation` | Johnson & Christy gold, Rakić aluminium tables |
//! | `gold_palik`, `aluminium_mcp` | optional `data_dir`, `interpolation` | Palik gold, McPeak aluminium tables read from `data_dir` |
//! | `tabulated` | `data_file` or `dataset`, optional `interpolation` | [`ModelSpec::Dataset`] |
//! | `rii` | `shelf`, `book`, `page`, optional `bound_check` | [`ModelSpec::Catalog`] |
//!
//! Appending [`NO_LOSS_SUFFIX`] to any tag selects the same model with its
//! loss suppressed.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::catalog::CatalogSelector;
use crate::config::MaterialConfig;
use crate::dispersion::{DrudeLorentzParams, DrudeParams, HaftelParams};
use crate::presets;
use crate::provider::MaterialError;
use crate::spline::InterpolationKind;

/// Permittivity standing in for a perfect electric conductor.
pub const PEC_PERMITTIVITY: f64 = -1e8;

/// Tag suffix requesting the near-lossless override.
pub const NO_LOSS_SUFFIX: &str = "_noloss";

/// Relative tolerance of the `e == RI²` consistency check.
const RI_TOLERANCE: f64 = 1e-12;

/// Directory searched for measured tables when `data_dir` is unset.
pub const DEFAULT_DATA_DIR: &str = "data";

/// File name of the Palik gold table inside the data directory.
pub const PALIK_GOLD_FILE: &str = "Palik_Au.json";

/// File name of the McPeak aluminium table inside the data directory.
pub const MCPEAK_ALUMINIUM_FILE: &str = "McPeak_Al.json";

/// Tabulated data shipped with the crate or read from disk.
#[derive(Debug, Clone, PartialEq)]
pub enum DatasetSource {
    /// Johnson & Christy (1972) gold.
    JohnsonChristyGold,
    /// Rakić (1998) aluminium.
    RakicAluminium,
    /// JSON pair-array file (see [`crate::curve`]).
    File(PathBuf),
}

impl DatasetSource {
    /// Bundled dataset by name.
    pub fn bundled(name: &str) -> Option<Self> {
        match name {
            "gold_jc" | "Au_JC" => Some(Self::JohnsonChristyGold),
            "aluminium_rak" | "Al_Rakic" => Some(Self::RakicAluminium),
            _ => None,
        }
    }
}

/// A resolved dispersion model.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelSpec {
    /// Frequency-independent permittivity.
    Constant { e: f64 },
    Drude(DrudeParams),
    DrudeLorentz(DrudeLorentzParams),
    Haftel(HaftelParams),
    /// Interpolated $(n, k)$ table.
    Dataset {
        source: DatasetSource,
        kind: InterpolationKind,
    },
    /// Record from an external catalog.
    Catalog {
        selector: CatalogSelector,
        bound_check: bool,
    },
    /// Tag with no registered model; fails on evaluation.
    Unknown(String),
}

impl ModelSpec {
    /// Short family name used in logs.
    pub fn family(&self) -> &'static str {
        match self {
            Self::Constant { .. } => "constant",
            Self::Drude(_) => "drude",
            Self::DrudeLorentz(_) => "drude-lorentz",
            Self::Haftel(_) => "haftel",
            Self::Dataset { .. } => "dataset",
            Self::Catalog { .. } => "catalog",
            Self::Unknown(_) => "unknown",
        }
    }
}

/// Model tag together with its resolved variant.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedModel {
    /// Tag as configured, including any suffix.
    pub tag: String,
    pub spec: ModelSpec,
    /// Set by [`NO_LOSS_SUFFIX`].
    pub no_loss: bool,
}

impl ResolvedModel {
    /// Resolve the `model` tag of `config`.
    ///
    /// Unknown tags resolve to [`ModelSpec::Unknown`] and are reported when
    /// evaluated. Missing, ill-typed or conflicting parameters of a known
    /// model fail here.
    pub fn resolve(config: &MaterialConfig) -> Result<Self, MaterialError> {
        let tag = config.model()?;
        let (base, no_loss) = match tag.strip_suffix(NO_LOSS_SUFFIX) {
            Some(base) => (base, true),
            None => (tag, false),
        };
        let spec = match MODELS.iter().find(|(name, _)| *name == base) {
            Some((_, resolver)) => resolver(config)?,
            None => ModelSpec::Unknown(tag.to_owned()),
        };
        Ok(Self {
            tag: tag.to_owned(),
            spec,
            no_loss,
        })
    }
}

impl fmt::Display for ResolvedModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.tag, self.spec.family())
    }
}

type Resolver = fn(&MaterialConfig) -> Result<ModelSpec, MaterialError>;

/// Registered model tags.
const MODELS: &[(&str, Resolver)] = &[
    ("dielectric", dielectric),
    ("pec", pec),
    ("drude", drude),
    ("drude_lorentz", drude_lorentz),
    ("haftel", haftel),
    ("gold_d", gold_d),
    ("gold_dl", gold_dl),
    ("gold_vial_dl", gold_vial_dl),
    ("gold_rakic", gold_rakic),
    ("silver_dl", silver_dl),
    ("silver_rakic", silver_rakic),
    ("aluminium_dl", aluminium_dl),
    ("tungsten_dl", tungsten_dl),
    ("gold_jc", gold_jc),
    ("aluminium_rak", aluminium_rak),
    ("gold_palik", gold_palik),
    ("aluminium_mcp", aluminium_mcp),
    ("tabulated", tabulated),
    ("rii", rii),
];

/// Tags accepted by [`ResolvedModel::resolve`], without suffixes.
pub fn model_tags() -> impl Iterator<Item = &'static str> {
    MODELS.iter().map(|(name, _)| *name)
}

fn dielectric(config: &MaterialConfig) -> Result<ModelSpec, MaterialError> {
    let e = match (config.number("e")?, config.number("RI")?) {
        (Some(e), Some(ri)) => {
            let e_ri = ri * ri;
            if (e - e_ri).abs() > RI_TOLERANCE * e.abs().max(e_ri.abs()) {
                return Err(MaterialError::config(format!(
                    "e must be RI ** 2 (e = {}, RI = {})",
                    e, ri
                )));
            }
            e
        }
        (Some(e), None) => e,
        (None, Some(ri)) => ri * ri,
        (None, None) => return Err(MaterialError::config("'RI' or 'e' must be specified")),
    };
    Ok(ModelSpec::Constant { e })
}

fn pec(_: &MaterialConfig) -> Result<ModelSpec, MaterialError> {
    Ok(ModelSpec::Constant { e: PEC_PERMITTIVITY })
}

fn drude_params(config: &MaterialConfig) -> Result<DrudeParams, MaterialError> {
    Ok(DrudeParams {
        e: config.require_number("e")?,
        wp: config.require_number("wp")?,
        gp: config.require_number("gp")?,
    })
}

fn drude(config: &MaterialConfig) -> Result<ModelSpec, MaterialError> {
    Ok(ModelSpec::Drude(drude_params(config)?))
}

fn drude_lorentz(config: &MaterialConfig) -> Result<ModelSpec, MaterialError> {
    let core = drude_params(config)?;
    let ss = config.require_list("ss")?;
    let ws = config.require_list("ws")?;
    let gs = config.require_list("gs")?;
    DrudeLorentzParams::from_sequences(core, &ss, &ws, &gs)
        .map(ModelSpec::DrudeLorentz)
        .ok_or_else(|| {
            MaterialError::config(format!(
                "'ss', 'ws' and 'gs' must have equal length ({}, {}, {})",
                ss.len(),
                ws.len(),
                gs.len()
            ))
        })
}

fn haftel(config: &MaterialConfig) -> Result<ModelSpec, MaterialError> {
    let e1 = match config.number("e1")? {
        Some(e1) => e1,
        None => config
            .number("e")?
            .ok_or_else(|| MaterialError::config("'e1' or 'e' must be specified for model 'haftel'"))?,
    };
    Ok(ModelSpec::Haftel(HaftelParams {
        e1,
        tau: config.require_number("tau")?,
        sp: config.require_number("sp")?,
        wp: config.number("wp")?.unwrap_or(0.0),
        gp: config.number("gp")?.unwrap_or(0.0),
    }))
}

fn gold_d(_: &MaterialConfig) -> Result<ModelSpec, MaterialError> {
    Ok(ModelSpec::Drude(presets::gold_drude_vial()))
}

fn gold_dl(config: &MaterialConfig) -> Result<ModelSpec, MaterialError> {
    catalog_record(config, CatalogSelector::new("DL", "Au", "Stewart"))
}

fn gold_vial_dl(_: &MaterialConfig) -> Result<ModelSpec, MaterialError> {
    Ok(ModelSpec::DrudeLorentz(presets::gold_drude_lorentz_vial()))
}

fn gold_rakic(_: &MaterialConfig) -> Result<ModelSpec, MaterialError> {
    Ok(ModelSpec::DrudeLorentz(presets::gold_rakic()))
}

fn silver_dl(config: &MaterialConfig) -> Result<ModelSpec, MaterialError> {
    catalog_record(config, CatalogSelector::new("DL", "Ag", "Vial"))
}

fn silver_rakic(_: &MaterialConfig) -> Result<ModelSpec, MaterialError> {
    Ok(ModelSpec::DrudeLorentz(presets::silver_rakic()))
}

fn aluminium_dl(_: &MaterialConfig) -> Result<ModelSpec, MaterialError> {
    Ok(ModelSpec::DrudeLorentz(presets::aluminium_rakic()))
}

fn tungsten_dl(_: &MaterialConfig) -> Result<ModelSpec, MaterialError> {
    Ok(ModelSpec::DrudeLorentz(presets::tungsten_rakic()))
}

fn gold_jc(config: &MaterialConfig) -> Result<ModelSpec, MaterialError> {
    Ok(ModelSpec::Dataset {
        source: DatasetSource::JohnsonChristyGold,
        kind: config.interpolation()?,
    })
}

fn aluminium_rak(config: &MaterialConfig) -> Result<ModelSpec, MaterialError> {
    Ok(ModelSpec::Dataset {
        source: DatasetSource::RakicAluminium,
        kind: config.interpolation()?,
    })
}

/// Measured table shipped as a JSON file under `data_dir`.
fn data_dir_table(config: &MaterialConfig, file: &str) -> Result<ModelSpec, MaterialError> {
    let dir = config.text("data_dir")?.unwrap_or(DEFAULT_DATA_DIR);
    Ok(ModelSpec::Dataset {
        source: DatasetSource::File(Path::new(dir).join(file)),
        kind: config.interpolation()?,
    })
}

fn gold_palik(config: &MaterialConfig) -> Result<ModelSpec, MaterialError> {
    data_dir_table(config, PALIK_GOLD_FILE)
}

fn aluminium_mcp(config: &MaterialConfig) -> Result<ModelSpec, MaterialError> {
    data_dir_table(config, MCPEAK_ALUMINIUM_FILE)
}

fn tabulated(config: &MaterialConfig) -> Result<ModelSpec, MaterialError> {
    let source = match (config.text("data_file")?, config.text("dataset")?) {
        (Some(path), None) => DatasetSource::File(PathBuf::from(path)),
        (None, Some(name)) => DatasetSource::bundled(name)
            .ok_or_else(|| MaterialError::NotFound(format!("bundled dataset '{}'", name)))?,
        (Some(_), Some(_)) => {
            return Err(MaterialError::config("give either 'data_file' or 'dataset', not both"))
        }
        (None, None) => {
            return Err(MaterialError::config(
                "'data_file' or 'dataset' must be specified for model 'tabulated'",
            ))
        }
    };
    Ok(ModelSpec::Dataset {
        source,
        kind: config.interpolation()?,
    })
}

fn catalog_record(config: &MaterialConfig, selector: CatalogSelector) -> Result<ModelSpec, MaterialError> {
    Ok(ModelSpec::Catalog {
        selector,
        bound_check: config.bound_check()?,
    })
}

fn rii(config: &MaterialConfig) -> Result<ModelSpec, MaterialError> {
    let selector = CatalogSelector::new(
        config.require_text("shelf")?,
        config.require_text("book")?,
        config.require_text("page")?,
    );
    catalog_record(config, selector)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(config: MaterialConfig) -> Result<ModelSpec, MaterialError> {
        ResolvedModel::resolve(&config).map(|m| m.spec)
    }

    #[test]
    fn test_dielectric_from_index() {
        let spec = resolve(MaterialConfig::new("dielectric").with("RI", 1.5)).unwrap();
        assert_eq!(spec, ModelSpec::Constant { e: 2.25 });
        // default model
        let spec = resolve(MaterialConfig::default().with("e", 4.0)).unwrap();
        assert_eq!(spec, ModelSpec::Constant { e: 4.0 });
    }

    #[test]
    fn test_dielectric_conflict() {
        let err = resolve(MaterialConfig::new("dielectric").with("e", 2.0).with("RI", 1.5)).unwrap_err();
        assert!(matches!(err, MaterialError::Config(ref m) if m.contains("RI ** 2")));
        // consistent pair is accepted
        assert!(resolve(MaterialConfig::new("dielectric").with("e", 1.333 * 1.333).with("RI", 1.333)).is_ok());
    }

    #[test]
    fn test_dielectric_requires_a_value() {
        assert!(matches!(resolve(MaterialConfig::new("dielectric")), Err(MaterialError::Config(_))));
    }

    #[test]
    fn test_pec() {
        assert_eq!(resolve(MaterialConfig::new("pec")).unwrap(), ModelSpec::Constant { e: -1e8 });
    }

    #[test]
    fn test_drude_lorentz_parameters() {
        let spec = resolve(
            MaterialConfig::new("drude_lorentz")
                .with("e", 1.0)
                .with("wp", 10.0)
                .with("gp", 0.1)
                .with("ss", [0.5, 0.2])
                .with("ws", [3.0, 5.0])
                .with("gs", [0.3, 0.4]),
        )
        .unwrap();
        let p = match spec {
            ModelSpec::DrudeLorentz(p) => p,
            other => panic!("expected Drude-Lorentz, got {:?}", other),
        };
        assert_eq!(p.oscillators.len(), 2);
        assert_eq!(p.oscillators[1].w, 5.0);
        assert_eq!(p.oscillators[1].g, 0.4);
    }

    #[test]
    fn test_drude_lorentz_length_mismatch() {
        let err = resolve(
            MaterialConfig::new("drude_lorentz")
                .with("e", 1.0)
                .with("wp", 10.0)
                .with("gp", 0.1)
                .with("ss", [0.5, 0.2])
                .with("ws", [3.0])
                .with("gs", [0.3, 0.4]),
        )
        .unwrap_err();
        assert!(matches!(err, MaterialError::Config(_)));
    }

    #[test]
    fn test_missing_drude_parameter() {
        let err = resolve(MaterialConfig::new("drude").with("e", 1.0).with("wp", 2.0)).unwrap_err();
        assert!(matches!(err, MaterialError::Config(ref m) if m.contains("'gp'")));
    }

    #[test]
    fn test_haftel_accepts_e_for_e1() {
        let spec = resolve(MaterialConfig::new("haftel").with("e", 3.0).with("tau", 1.0).with("sp", 2.0)).unwrap();
        assert_eq!(
            spec,
            ModelSpec::Haftel(HaftelParams { e1: 3.0, tau: 1.0, sp: 2.0, wp: 0.0, gp: 0.0 })
        );
        assert!(resolve(MaterialConfig::new("haftel").with("tau", 1.0).with("sp", 2.0)).is_err());
    }

    #[test]
    fn test_presets_resolve_without_parameters() {
        for tag in [
            "gold_d",
            "gold_vial_dl",
            "gold_rakic",
            "silver_rakic",
            "aluminium_dl",
            "tungsten_dl",
            "gold_jc",
            "aluminium_rak",
        ] {
            let spec = resolve(MaterialConfig::new(tag)).unwrap();
            assert!(!matches!(spec, ModelSpec::Unknown(_)), "{tag} did not resolve");
        }
    }

    #[test]
    fn test_no_loss_suffix() {
        let m = ResolvedModel::resolve(&MaterialConfig::new("gold_vial_dl_noloss")).unwrap();
        assert!(m.no_loss);
        assert_eq!(m.tag, "gold_vial_dl_noloss");
        assert_eq!(m.spec, ModelSpec::DrudeLorentz(presets::gold_drude_lorentz_vial()));
    }

    #[test]
    fn test_unknown_tag_resolves_lazily() {
        // Parameters are not inspected for unknown tags.
        let m = ResolvedModel::resolve(&MaterialConfig::new("gold_hagemann")).unwrap();
        assert_eq!(m.spec, ModelSpec::Unknown("gold_hagemann".into()));
    }

    #[test]
    fn test_rii_selector() {
        let spec = resolve(
            MaterialConfig::new("rii")
                .with("shelf", "main")
                .with("book", "SiO2")
                .with("page", "Malitson")
                .with("bound_check", false),
        )
        .unwrap();
        assert_eq!(
            spec,
            ModelSpec::Catalog {
                selector: CatalogSelector::new("main", "SiO2", "Malitson"),
                bound_check: false,
            }
        );
        assert!(resolve(MaterialConfig::new("rii").with("shelf", "main")).is_err());
    }

    #[test]
    fn test_tabulated_sources() {
        let spec = resolve(MaterialConfig::new("tabulated").with("data_file", "al.json")).unwrap();
        assert_eq!(
            spec,
            ModelSpec::Dataset {
                source: DatasetSource::File(PathBuf::from("al.json")),
                kind: InterpolationKind::Cubic,
            }
        );
        let spec = resolve(
            MaterialConfig::new("tabulated")
                .with("dataset", "gold_jc")
                .with("interpolation", "linear"),
        )
        .unwrap();
        assert_eq!(
            spec,
            ModelSpec::Dataset {
                source: DatasetSource::JohnsonChristyGold,
                kind: InterpolationKind::Linear,
            }
        );
        assert!(matches!(
            resolve(MaterialConfig::new("tabulated").with("dataset", "nope")),
            Err(MaterialError::NotFound(_))
        ));
        assert!(resolve(MaterialConfig::new("tabulated")).is_err());
    }

    #[test]
    fn test_drude_lorentz_catalog_presets() {
        assert_eq!(
            resolve(MaterialConfig::new("gold_dl")).unwrap(),
            ModelSpec::Catalog {
                selector: CatalogSelector::new("DL", "Au", "Stewart"),
                bound_check: true,
            }
        );
        assert_eq!(
            resolve(MaterialConfig::new("silver_dl").with("bound_check", false)).unwrap(),
            ModelSpec::Catalog {
                selector: CatalogSelector::new("DL", "Ag", "Vial"),
                bound_check: false,
            }
        );
    }

    #[test]
    fn test_data_dir_tables() {
        assert_eq!(
            resolve(MaterialConfig::new("gold_palik")).unwrap(),
            ModelSpec::Dataset {
                source: DatasetSource::File(Path::new(DEFAULT_DATA_DIR).join(PALIK_GOLD_FILE)),
                kind: InterpolationKind::Cubic,
            }
        );
        assert_eq!(
            resolve(MaterialConfig::new("aluminium_mcp").with("data_dir", "/opt/nk")).unwrap(),
            ModelSpec::Dataset {
                source: DatasetSource::File(PathBuf::from("/opt/nk/McPeak_Al.json")),
                kind: InterpolationKind::Cubic,
            }
        );
        assert!(resolve(MaterialConfig::new("gold_palik").with("data_dir", 1.0)).is_err());
    }

    #[test]
    fn test_model_must_be_a_string() {
        let cfg = MaterialConfig::default().with("model", 3.0).with("e", 2.0);
        assert!(matches!(
            ResolvedModel::resolve(&cfg),
            Err(MaterialError::Config(ref m)) if m.contains("'model'")
        ));
    }

    #[test]
    fn test_tag_table_has_no_duplicates() {
        let mut tags: Vec<_> = model_tags().collect();
        let n = tags.len();
        tags.sort_unstable();
        tags.dedup();
        assert_eq!(tags.len(), n);
    }
}
