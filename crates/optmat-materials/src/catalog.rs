//! Refractive-index catalog interface and a built-in in-memory catalog.
//!
//! A catalog maps a `(shelf, book, page)` selector to a published dataset.
//! Each record is a [`MaterialProvider`] over wavelength (µm) plus metadata
//! telling the evaluator whether the refractive index or the permittivity
//! is the authoritative quantity.
//!
//! ## Formula indices
//!
//! | Index | Quantity | Form |
//! |-------|----------|------|
//! | 1 | $n$ | Sellmeier, $n^2 - 1 = C_1 + \sum_i C_{2i}\lambda^2/(\lambda^2 - C_{2i+1}^2)$ |
//! | 2 | $n$ | Sellmeier-2, $n^2 - 1 = C_1 + \sum_i C_{2i}\lambda^2/(\lambda^2 - C_{2i+1})$ |
//! | 21 | $\epsilon$ | Drude, coefficients `[e, wp, gp]` |
//! | 22 | $\epsilon$ | Drude-Lorentz, `[e, wp, gp, s1, w1, g1, ...]` |
//!
//! Drude coefficients are in rad/µm.

use std::collections::HashMap;
use std::f64::consts::PI;
use std::fmt;
use std::sync::Arc;

use num_complex::Complex64;

use crate::curve::CurveInterpolator;
use crate::dispersion::{self, DrudeLorentzParams, DrudeParams};
use crate::johnson_christy;
use crate::presets;
use crate::provider::{MaterialError, MaterialProvider};
use crate::spline::InterpolationKind;

/// Highest formula index whose record yields a refractive index directly.
pub const MAX_INDEX_FORMULA: u32 = 20;

/// Identifier of a catalog dataset.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CatalogSelector {
    pub shelf: String,
    pub book: String,
    pub page: String,
}

impl CatalogSelector {
    pub fn new(shelf: impl Into<String>, book: impl Into<String>, page: impl Into<String>) -> Self {
        Self {
            shelf: shelf.into(),
            book: book.into(),
            page: page.into(),
        }
    }
}

impl fmt::Display for CatalogSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.shelf, self.book, self.page)
    }
}

/// How a record's data was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tabulation {
    /// Closed-form fit.
    Formula,
    /// Measured $(n, k)$ samples.
    Nk,
}

/// Record metadata consulted by the evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordMetadata {
    pub tabulated: Tabulation,
    /// Formula index, 0 for measured data.
    pub formula: u32,
}

impl RecordMetadata {
    /// True when $n(\lambda)^2$ is authoritative over $\epsilon(\lambda)$:
    /// a refractive-index formula that carries no loss.
    pub fn index_formula(&self) -> bool {
        self.tabulated == Tabulation::Formula && self.formula <= MAX_INDEX_FORMULA
    }
}

/// A resolved catalog dataset.
pub trait CatalogRecord: MaterialProvider {
    fn metadata(&self) -> RecordMetadata;
}

/// Source of catalog records.
pub trait Catalog {
    fn lookup(&self, selector: &CatalogSelector) -> Result<Arc<dyn CatalogRecord>, MaterialError>;
}

#[derive(Debug, Clone, PartialEq)]
enum Formula {
    Sellmeier(Vec<f64>),
    Sellmeier2(Vec<f64>),
    Drude(DrudeParams),
    DrudeLorentz(DrudeLorentzParams),
}

impl Formula {
    fn index(&self) -> u32 {
        match self {
            Self::Sellmeier(_) => 1,
            Self::Sellmeier2(_) => 2,
            Self::Drude(_) => 21,
            Self::DrudeLorentz(_) => 22,
        }
    }
}

/// Sum $C_1 + \sum_i C_{2i}\lambda^2/(\lambda^2 - \mathrm{pole}(C_{2i+1}))$.
fn sellmeier_sum(c: &[f64], lam: f64, pole: impl Fn(f64) -> f64) -> f64 {
    let l2 = lam * lam;
    let c1 = c.first().copied().unwrap_or(0.0);
    c.get(1..)
        .unwrap_or(&[])
        .chunks_exact(2)
        .fold(c1, |acc, pair| acc + pair[0] * l2 / (l2 - pole(pair[1])))
}

/// A dataset backed by a closed-form dispersion formula.
#[derive(Debug, Clone)]
pub struct FormulaRecord {
    name: String,
    formula: Formula,
    range: (f64, f64),
}

impl FormulaRecord {
    /// Build from a formula index and its raw coefficients.
    pub fn from_coefficients(
        name: impl Into<String>,
        index: u32,
        coefficients: &[f64],
        range: (f64, f64),
    ) -> Result<Self, MaterialError> {
        let formula = match index {
            1 | 2 => {
                if coefficients.is_empty() || coefficients.len() % 2 == 0 {
                    return Err(MaterialError::DataError(format!(
                        "Sellmeier formula needs 1 + 2m coefficients, got {}",
                        coefficients.len()
                    )));
                }
                if index == 1 {
                    Formula::Sellmeier(coefficients.to_vec())
                } else {
                    Formula::Sellmeier2(coefficients.to_vec())
                }
            }
            21 => match coefficients {
                &[e, wp, gp] => Formula::Drude(DrudeParams { e, wp, gp }),
                _ => {
                    return Err(MaterialError::DataError(
                        "Drude formula needs exactly 3 coefficients".into(),
                    ))
                }
            },
            22 => {
                if coefficients.len() < 3 || (coefficients.len() - 3) % 3 != 0 {
                    return Err(MaterialError::DataError(format!(
                        "Drude-Lorentz formula needs 3 + 3m coefficients, got {}",
                        coefficients.len()
                    )));
                }
                let drude = DrudeParams {
                    e: coefficients[0],
                    wp: coefficients[1],
                    gp: coefficients[2],
                };
                let rest = &coefficients[3..];
                let ss: Vec<f64> = rest.iter().step_by(3).copied().collect();
                let ws: Vec<f64> = rest.iter().skip(1).step_by(3).copied().collect();
                let gs: Vec<f64> = rest.iter().skip(2).step_by(3).copied().collect();
                // rest.len() is a multiple of 3
                let params = DrudeLorentzParams::from_sequences(drude, &ss, &ws, &gs)
                    .ok_or_else(|| MaterialError::DataError("Oscillator mismatch".into()))?;
                Formula::DrudeLorentz(params)
            }
            other => {
                return Err(MaterialError::DataError(format!(
                    "Unsupported dispersion formula {}",
                    other
                )))
            }
        };
        Ok(Self {
            name: name.into(),
            formula,
            range,
        })
    }

    pub fn drude(name: impl Into<String>, params: DrudeParams, range: (f64, f64)) -> Self {
        Self {
            name: name.into(),
            formula: Formula::Drude(params),
            range,
        }
    }

    pub fn drude_lorentz(name: impl Into<String>, params: DrudeLorentzParams, range: (f64, f64)) -> Self {
        Self {
            name: name.into(),
            formula: Formula::DrudeLorentz(params),
            range,
        }
    }
}

impl MaterialProvider for FormulaRecord {
    fn name(&self) -> &str {
        &self.name
    }

    fn wavelength_range(&self) -> (f64, f64) {
        self.range
    }

    fn dielectric_function(&self, wavelength_um: f64) -> Result<Complex64, MaterialError> {
        match &self.formula {
            Formula::Sellmeier(_) | Formula::Sellmeier2(_) => {
                let n = self.refractive_index(wavelength_um)?;
                Ok(n * n)
            }
            Formula::Drude(p) => Ok(dispersion::drude(2.0 * PI / wavelength_um, p)),
            Formula::DrudeLorentz(p) => Ok(dispersion::drude_lorentz(2.0 * PI / wavelength_um, p)),
        }
    }

    fn refractive_index(&self, wavelength_um: f64) -> Result<Complex64, MaterialError> {
        let n2 = match &self.formula {
            Formula::Sellmeier(c) => 1.0 + sellmeier_sum(c, wavelength_um, |b| b * b),
            Formula::Sellmeier2(c) => 1.0 + sellmeier_sum(c, wavelength_um, |b| b),
            Formula::Drude(_) | Formula::DrudeLorentz(_) => {
                return Ok(self.dielectric_function(wavelength_um)?.sqrt())
            }
        };
        Ok(Complex64::from(n2).sqrt())
    }
}

impl CatalogRecord for FormulaRecord {
    fn metadata(&self) -> RecordMetadata {
        RecordMetadata {
            tabulated: Tabulation::Formula,
            formula: self.formula.index(),
        }
    }
}

/// A dataset of measured $(n, k)$ samples.
#[derive(Debug, Clone)]
pub struct TabulatedRecord {
    name: String,
    curve: CurveInterpolator,
}

impl TabulatedRecord {
    pub fn new(name: impl Into<String>, curve: CurveInterpolator) -> Self {
        Self {
            name: name.into(),
            curve,
        }
    }
}

impl MaterialProvider for TabulatedRecord {
    fn name(&self) -> &str {
        &self.name
    }

    fn wavelength_range(&self) -> (f64, f64) {
        let (w_min, w_max) = self.curve.frequency_range();
        (2.0 * PI / w_max, 2.0 * PI / w_min)
    }

    fn dielectric_function(&self, wavelength_um: f64) -> Result<Complex64, MaterialError> {
        let n = self.refractive_index(wavelength_um)?;
        Ok(n * n)
    }

    fn refractive_index(&self, wavelength_um: f64) -> Result<Complex64, MaterialError> {
        self.curve.interpolate(2.0 * PI / wavelength_um)
    }
}

impl CatalogRecord for TabulatedRecord {
    fn metadata(&self) -> RecordMetadata {
        RecordMetadata {
            tabulated: Tabulation::Nk,
            formula: 0,
        }
    }
}

/// Catalog held in memory.
#[derive(Default, Clone)]
pub struct InMemoryCatalog {
    records: HashMap<CatalogSelector, Arc<dyn CatalogRecord>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, selector: CatalogSelector, record: Arc<dyn CatalogRecord>) {
        self.records.insert(selector, record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The datasets shipped with this crate.
    pub fn builtin() -> Result<Self, MaterialError> {
        // Rakić fits cover 0.1–6 eV; Vial fits cover 500–1000 nm.
        const RAKIC_RANGE: (f64, f64) = (0.2066, 12.4);
        const VIAL_RANGE: (f64, f64) = (0.5, 1.0);

        let mut catalog = Self::new();
        catalog.insert(
            CatalogSelector::new("main", "SiO2", "Malitson"),
            Arc::new(FormulaRecord::from_coefficients(
                "SiO2 (Malitson 1965)",
                1,
                &[0.0, 0.6961663, 0.0684043, 0.4079426, 0.1162414, 0.8974794, 9.896161],
                (0.21, 6.7),
            )?),
        );
        catalog.insert(
            CatalogSelector::new("main", "Au", "Johnson"),
            Arc::new(TabulatedRecord::new(
                "Au (Johnson & Christy 1972)",
                johnson_christy::gold(InterpolationKind::Cubic)?,
            )),
        );
        catalog.insert(
            CatalogSelector::new("Drude", "Au", "Vial"),
            Arc::new(FormulaRecord::drude("Au (Vial 2005, Drude)", presets::gold_drude_vial(), VIAL_RANGE)),
        );
        let lorentz_drude = [
            ("Au", "Vial", "Au (Vial 2005, Drude-Lorentz)", presets::gold_drude_lorentz_vial(), VIAL_RANGE),
            ("Au", "Rakic", "Au (Rakić 1998)", presets::gold_rakic(), RAKIC_RANGE),
            ("Ag", "Rakic", "Ag (Rakić 1998)", presets::silver_rakic(), RAKIC_RANGE),
            ("Al", "Rakic", "Al (Rakić 1998)", presets::aluminium_rakic(), RAKIC_RANGE),
            ("W", "Rakic", "W (Rakić 1998)", presets::tungsten_rakic(), RAKIC_RANGE),
        ];
        for (book, page, name, params, range) in lorentz_drude {
            catalog.insert(
                CatalogSelector::new("DL", book, page),
                Arc::new(FormulaRecord::drude_lorentz(name, params, range)),
            );
        }
        Ok(catalog)
    }
}

impl Catalog for InMemoryCatalog {
    fn lookup(&self, selector: &CatalogSelector) -> Result<Arc<dyn CatalogRecord>, MaterialError> {
        self.records
            .get(selector)
            .cloned()
            .ok_or_else(|| MaterialError::NotFound(selector.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_malitson_silica() {
        let catalog = InMemoryCatalog::builtin().unwrap();
        let record = catalog.lookup(&CatalogSelector::new("main", "SiO2", "Malitson")).unwrap();
        assert!(record.metadata().index_formula());
        let n = record.refractive_index(1.0).unwrap();
        assert_relative_eq!(n.re, 1.450417409406875, max_relative = 1e-12);
        assert_eq!(n.im, 0.0);
        assert_relative_eq!(record.dielectric_function(1.0).unwrap().re, 2.1037106615105503, max_relative = 1e-12);
    }

    #[test]
    fn test_drude_records_use_permittivity() {
        let catalog = InMemoryCatalog::builtin().unwrap();
        let record = catalog.lookup(&CatalogSelector::new("DL", "Al", "Rakic")).unwrap();
        let meta = record.metadata();
        assert_eq!(meta, RecordMetadata { tabulated: Tabulation::Formula, formula: 22 });
        assert!(!meta.index_formula());
        let eps = record.dielectric_function(1.0).unwrap();
        let n = record.refractive_index(1.0).unwrap();
        assert_relative_eq!((n * n).re, eps.re, max_relative = 1e-12);
    }

    #[test]
    fn test_tabulated_record_metadata_and_range() {
        let catalog = InMemoryCatalog::builtin().unwrap();
        let record = catalog.lookup(&CatalogSelector::new("main", "Au", "Johnson")).unwrap();
        assert!(!record.metadata().index_formula());
        let (lo, hi) = record.wavelength_range();
        assert!(lo < 0.32 && hi > 1.9);
        assert!(record.check_range(0.1).is_err());
        assert!(record.check_range(1.0).is_ok());
    }

    #[test]
    fn test_unknown_selector() {
        let catalog = InMemoryCatalog::builtin().unwrap();
        let err = catalog.lookup(&CatalogSelector::new("main", "Unobtainium", "X")).err().unwrap();
        assert!(matches!(err, MaterialError::NotFound(ref s) if s == "main/Unobtainium/X"));
    }

    #[test]
    fn test_coefficient_parsing() {
        let dl = FormulaRecord::from_coefficients("dl", 22, &[1.0, 2.0, 0.1, 0.5, 3.0, 0.2], (0.1, 10.0)).unwrap();
        assert_eq!(dl.metadata().formula, 22);
        let direct = dispersion::drude_lorentz(
            2.0 * PI,
            &DrudeLorentzParams::from_sequences(DrudeParams { e: 1.0, wp: 2.0, gp: 0.1 }, &[0.5], &[3.0], &[0.2]).unwrap(),
        );
        assert_eq!(dl.dielectric_function(1.0).unwrap(), direct);

        assert!(FormulaRecord::from_coefficients("x", 22, &[1.0, 2.0, 0.1, 0.5], (0.1, 1.0)).is_err());
        assert!(FormulaRecord::from_coefficients("x", 21, &[1.0, 2.0], (0.1, 1.0)).is_err());
        assert!(FormulaRecord::from_coefficients("x", 1, &[0.0, 1.0], (0.1, 1.0)).is_err());
        assert!(FormulaRecord::from_coefficients("x", 9, &[0.0], (0.1, 1.0)).is_err());
    }

    #[test]
    fn test_sellmeier2_uses_unsquared_pole() {
        let rec = FormulaRecord::from_coefficients("s2", 2, &[0.0, 1.0, 0.25], (0.1, 10.0)).unwrap();
        // n² = 1 + 1·4/(4 - 0.25)
        let n2 = rec.dielectric_function(2.0).unwrap().re;
        assert_relative_eq!(n2, 1.0 + 4.0 / 3.75, max_relative = 1e-12);
    }
}
