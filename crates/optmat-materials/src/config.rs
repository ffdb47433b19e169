//! Material configuration: a string-keyed parameter mapping.
//!
//! A configuration can be built in code:
//!
//! ```
//! use optmat_materials::config::MaterialConfig;
//!
//! let water = MaterialConfig::new("dielectric").with("RI", 1.333);
//! assert_eq!(water.model().unwrap(), "dielectric");
//! ```
//!
//! or read from TOML, either as a single flat table
//!
//! ```toml
//! model = "drude"
//! e = 9.0685
//! wp = 45.178
//! gp = 0.3848
//! ```
//!
//! or as a library of named tables (see [`MaterialConfig::library_from_toml_str`]).

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::provider::MaterialError;
use crate::spline::InterpolationKind;

/// Model used when the `model` key is absent.
pub const DEFAULT_MODEL: &str = "dielectric";

/// A single configuration value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Number(f64),
    List(Vec<f64>),
    Text(String),
}

impl ParamValue {
    fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "a boolean",
            Self::Number(_) => "a number",
            Self::List(_) => "a list of numbers",
            Self::Text(_) => "a string",
        }
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<Vec<f64>> for ParamValue {
    fn from(v: Vec<f64>) -> Self {
        Self::List(v)
    }
}

impl From<&[f64]> for ParamValue {
    fn from(v: &[f64]) -> Self {
        Self::List(v.to_vec())
    }
}

impl<const N: usize> From<[f64; N]> for ParamValue {
    fn from(v: [f64; N]) -> Self {
        Self::List(v.to_vec())
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

/// Named parameters selecting and configuring a dispersion model.
///
/// Recognised keys: `model`, `im_factor`, `bound_check`, `interpolation`,
/// plus the model-specific keys listed in [`crate::model`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct MaterialConfig {
    params: BTreeMap<String, ParamValue>,
}

impl MaterialConfig {
    /// Start a configuration for the given model tag.
    pub fn new(model: &str) -> Self {
        Self::default().with("model", model)
    }

    /// Builder-style insertion.
    pub fn with(mut self, key: &str, value: impl Into<ParamValue>) -> Self {
        self.params.insert(key.to_owned(), value.into());
        self
    }

    /// Parse a flat TOML table.
    pub fn from_toml_str(content: &str) -> Result<Self, MaterialError> {
        Ok(toml::from_str(content)?)
    }

    /// Parse a TOML document of named material tables.
    ///
    /// ```toml
    /// [water]
    /// RI = 1.333
    ///
    /// [gold]
    /// model = "gold_vial_dl"
    /// im_factor = 0.5
    /// ```
    pub fn library_from_toml_str(content: &str) -> Result<BTreeMap<String, Self>, MaterialError> {
        Ok(toml::from_str(content)?)
    }

    /// Load a flat TOML configuration file.
    pub fn load(path: &Path) -> Result<Self, MaterialError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.params.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    /// Model tag, `"dielectric"` when unset.
    pub fn model(&self) -> Result<&str, MaterialError> {
        Ok(self.text("model")?.unwrap_or(DEFAULT_MODEL))
    }

    fn type_error(key: &str, expected: &str, found: &ParamValue) -> MaterialError {
        MaterialError::config(format!(
            "'{}' must be {}, found {}",
            key,
            expected,
            found.kind()
        ))
    }

    fn missing(&self, key: &str) -> MaterialError {
        MaterialError::config(format!(
            "'{}' must be specified for model '{}'",
            key,
            self.model().unwrap_or(DEFAULT_MODEL)
        ))
    }

    pub fn number(&self, key: &str) -> Result<Option<f64>, MaterialError> {
        match self.params.get(key) {
            None => Ok(None),
            Some(ParamValue::Number(v)) => Ok(Some(*v)),
            Some(other) => Err(Self::type_error(key, "a number", other)),
        }
    }

    pub fn require_number(&self, key: &str) -> Result<f64, MaterialError> {
        self.number(key)?.ok_or_else(|| self.missing(key))
    }

    /// A list of numbers; a bare number is read as a one-element list.
    pub fn list(&self, key: &str) -> Result<Option<Vec<f64>>, MaterialError> {
        match self.params.get(key) {
            None => Ok(None),
            Some(ParamValue::List(v)) => Ok(Some(v.clone())),
            Some(ParamValue::Number(v)) => Ok(Some(vec![*v])),
            Some(other) => Err(Self::type_error(key, "a list of numbers", other)),
        }
    }

    pub fn require_list(&self, key: &str) -> Result<Vec<f64>, MaterialError> {
        self.list(key)?.ok_or_else(|| self.missing(key))
    }

    pub fn text(&self, key: &str) -> Result<Option<&str>, MaterialError> {
        match self.params.get(key) {
            None => Ok(None),
            Some(ParamValue::Text(v)) => Ok(Some(v.as_str())),
            Some(other) => Err(Self::type_error(key, "a string", other)),
        }
    }

    pub fn require_text(&self, key: &str) -> Result<&str, MaterialError> {
        self.text(key)?.ok_or_else(|| self.missing(key))
    }

    pub fn flag(&self, key: &str) -> Result<Option<bool>, MaterialError> {
        match self.params.get(key) {
            None => Ok(None),
            Some(ParamValue::Bool(v)) => Ok(Some(*v)),
            Some(other) => Err(Self::type_error(key, "a boolean", other)),
        }
    }

    /// Imaginary-part scale factor, default 1.
    pub fn im_factor(&self) -> Result<f64, MaterialError> {
        Ok(self.number("im_factor")?.unwrap_or(1.0))
    }

    /// Whether catalog wavelengths are range-checked, default true.
    pub fn bound_check(&self) -> Result<bool, MaterialError> {
        Ok(self.flag("bound_check")?.unwrap_or(true))
    }

    pub fn interpolation(&self) -> Result<InterpolationKind, MaterialError> {
        match self.text("interpolation")? {
            None => Ok(InterpolationKind::default()),
            Some(name) => InterpolationKind::from_name(name).ok_or_else(|| {
                MaterialError::config(format!("Unknown interpolation kind '{}'", name))
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = MaterialConfig::default();
        assert_eq!(cfg.model().unwrap(), "dielectric");
        assert_eq!(cfg.im_factor().unwrap(), 1.0);
        assert!(cfg.bound_check().unwrap());
        assert_eq!(cfg.interpolation().unwrap(), InterpolationKind::Cubic);
    }

    #[test]
    fn test_typed_access() {
        let cfg = MaterialConfig::new("drude_lorentz")
            .with("e", 5.0)
            .with("ss", [1.0, 2.0])
            .with("ws", 3.0)
            .with("shelf", "DL");
        assert_eq!(cfg.require_number("e").unwrap(), 5.0);
        assert_eq!(cfg.require_list("ss").unwrap(), vec![1.0, 2.0]);
        assert_eq!(cfg.require_list("ws").unwrap(), vec![3.0]);
        assert_eq!(cfg.require_text("shelf").unwrap(), "DL");
        assert!(matches!(cfg.require_number("shelf"), Err(MaterialError::Config(_))));
        assert!(matches!(cfg.require_number("wp"), Err(MaterialError::Config(ref m)) if m.contains("'wp'")));
    }

    #[test]
    fn test_flat_toml() {
        let cfg = MaterialConfig::from_toml_str(
            r#"
            model = "drude_lorentz"
            e = 1
            wp = 2.5
            gp = 0.1
            ss = [1.0, 2]
            bound_check = false
            interpolation = "linear"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.model().unwrap(), "drude_lorentz");
        assert_eq!(cfg.require_number("e").unwrap(), 1.0);
        assert_eq!(cfg.require_list("ss").unwrap(), vec![1.0, 2.0]);
        assert!(!cfg.bound_check().unwrap());
        assert_eq!(cfg.interpolation().unwrap(), InterpolationKind::Linear);
    }

    #[test]
    fn test_library_toml() {
        let lib = MaterialConfig::library_from_toml_str(
            r#"
            [water]
            RI = 1.333

            [gold]
            model = "gold_vial_dl"
            im_factor = 0.5
            "#,
        )
        .unwrap();
        assert_eq!(lib.len(), 2);
        assert_eq!(lib["water"].model().unwrap(), "dielectric");
        assert_eq!(lib["gold"].im_factor().unwrap(), 0.5);
    }

    #[test]
    fn test_ill_typed_model() {
        let cfg = MaterialConfig::from_toml_str("model = 3\ne = 2.0").unwrap();
        assert!(matches!(cfg.model(), Err(MaterialError::Config(ref m)) if m.contains("'model'")));
    }

    #[test]
    fn test_load_file() {
        let path = std::env::temp_dir().join("optmat_config_load_test.toml");
        std::fs::write(&path, "model = \"drude\"\ne = 1.5\nwp = 8.0\ngp = 0.2\n").unwrap();

        let cfg = MaterialConfig::load(&path).unwrap();
        assert_eq!(cfg.model().unwrap(), "drude");
        assert!(cfg.contains("wp"));
        assert!(!cfg.contains("ss"));
        assert_eq!(cfg.get("gp"), Some(&ParamValue::Number(0.2)));
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(MaterialConfig::load(&path), Err(MaterialError::Io(_))));
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            MaterialConfig::from_toml_str("model = "),
            Err(MaterialError::Toml(_))
        ));
    }

    #[test]
    fn test_unknown_interpolation() {
        let cfg = MaterialConfig::new("gold_jc").with("interpolation", "spline");
        assert!(cfg.interpolation().is_err());
    }
}
