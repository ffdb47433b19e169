//! The material evaluator.
//!
//! [`Material`] turns a [`MaterialConfig`] into a callable permittivity
//! $\epsilon(\omega)$. Construction resolves the model and binds any
//! external resource (dataset file, catalog record) once; evaluation is then
//! a bounded computation with no I/O.
//!
//! ## Loss policy
//!
//! Every formula or data-derived result has its imaginary part scaled by
//! `im_factor` and then floored at [`IM_FLOOR`], keeping the medium
//! strictly passive. A NaN imaginary part is floored too. Models tagged with the no-loss suffix have the floored
//! imaginary part further multiplied by [`NO_LOSS_SCALE`]. Constant models
//! and loss-free refractive-index formulas are returned untouched.
//!
//! ## Caching
//!
//! The last result is memoised against the real part of the frequency.
//! Evaluation takes `&mut self`; to evaluate from several threads give each
//! its own clone.

use std::f64::consts::PI;
use std::fmt;
use std::sync::Arc;

use num_complex::Complex64;

use crate::catalog::{Catalog, CatalogRecord, InMemoryCatalog};
use crate::config::MaterialConfig;
use crate::curve::CurveInterpolator;
use crate::dispersion;
use crate::johnson_christy;
use crate::model::{DatasetSource, ModelSpec, ResolvedModel};
use crate::provider::{MaterialError, MaterialProvider};
use crate::rakic;

/// Smallest imaginary part returned for lossy models.
pub const IM_FLOOR: f64 = 1.0e-12;

/// Scale applied to the imaginary part of no-loss models.
pub const NO_LOSS_SCALE: f64 = 1.0e-6;

/// One-entry memo of the last evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum CacheSlot {
    #[default]
    Empty,
    Valid { frequency: f64, value: Complex64 },
}

impl CacheSlot {
    fn lookup(&self, frequency: f64) -> Option<Complex64> {
        match *self {
            Self::Valid { frequency: f, value } if f == frequency => Some(value),
            _ => None,
        }
    }
}

/// External resource attached at construction.
#[derive(Clone)]
enum Binding {
    None,
    Curve(CurveInterpolator),
    Record(Arc<dyn CatalogRecord>),
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Curve(c) => write!(f, "Curve({:?})", c.frequency_range()),
            Self::Record(r) => write!(f, "Record({:?})", r.name()),
        }
    }
}

/// Frequency-dependent complex permittivity of one material.
#[derive(Debug, Clone)]
pub struct Material {
    model: ResolvedModel,
    binding: Binding,
    im_factor: f64,
    cache: CacheSlot,
}

impl Material {
    /// Build a material, resolving catalog selectors against the built-in
    /// catalog.
    pub fn new(config: &MaterialConfig) -> Result<Self, MaterialError> {
        let model = ResolvedModel::resolve(config)?;
        let builtin;
        let catalog: Option<&dyn Catalog> = match model.spec {
            ModelSpec::Catalog { .. } => {
                builtin = InMemoryCatalog::builtin()?;
                Some(&builtin)
            }
            _ => None,
        };
        Self::bind(model, config, catalog)
    }

    /// Build a material, resolving catalog selectors against `catalog`.
    pub fn with_catalog(config: &MaterialConfig, catalog: &dyn Catalog) -> Result<Self, MaterialError> {
        Self::bind(ResolvedModel::resolve(config)?, config, Some(catalog))
    }

    fn bind(
        model: ResolvedModel,
        config: &MaterialConfig,
        catalog: Option<&dyn Catalog>,
    ) -> Result<Self, MaterialError> {
        let binding = match &model.spec {
            ModelSpec::Dataset { source, kind } => Binding::Curve(match source {
                DatasetSource::JohnsonChristyGold => johnson_christy::gold(*kind)?,
                DatasetSource::RakicAluminium => rakic::aluminium(*kind)?,
                DatasetSource::File(path) => CurveInterpolator::load_json(path, *kind)?,
            }),
            ModelSpec::Catalog { selector, .. } => {
                let catalog = catalog.ok_or_else(|| {
                    MaterialError::config(format!("no catalog available for '{}'", selector))
                })?;
                let record = catalog.lookup(selector)?;
                log::debug!("bound catalog record {} ({})", selector, record.name());
                Binding::Record(record)
            }
            _ => Binding::None,
        };

        let im_factor = config.im_factor()?;
        if im_factor < 0.0 {
            log::warn!("negative im_factor {} for {}", im_factor, model.tag);
        }
        log::debug!("resolved material {}", model);

        Ok(Self {
            model,
            binding,
            im_factor,
            cache: CacheSlot::Empty,
        })
    }

    /// Configured model tag.
    pub fn model(&self) -> &str {
        &self.model.tag
    }

    pub fn spec(&self) -> &ModelSpec {
        &self.model.spec
    }

    pub fn im_factor(&self) -> f64 {
        self.im_factor
    }

    /// Change the imaginary-part scale. Clears the cache.
    pub fn set_im_factor(&mut self, factor: f64) {
        if factor < 0.0 {
            log::warn!("negative im_factor {} for {}", factor, self.model.tag);
        }
        self.im_factor = factor;
        self.cache = CacheSlot::Empty;
    }

    /// Current cache state.
    pub fn cache(&self) -> CacheSlot {
        self.cache
    }

    /// Relative permittivity at angular frequency `w` (rad/µm).
    pub fn evaluate(&mut self, w: f64) -> Result<Complex64, MaterialError> {
        if let Some(eps) = self.cache.lookup(w) {
            log::trace!("{}: cache hit at w = {}", self.model.tag, w);
            return Ok(eps);
        }
        let eps = self.compute(w)?;
        self.cache = CacheSlot::Valid {
            frequency: w,
            value: eps,
        };
        Ok(eps)
    }

    /// As [`evaluate`](Self::evaluate) for a frequency carried as a complex
    /// number; only the real part is used.
    pub fn evaluate_complex(&mut self, w: Complex64) -> Result<Complex64, MaterialError> {
        self.evaluate(w.re)
    }

    /// Permittivity at each frequency in turn.
    pub fn evaluate_many(&mut self, ws: &[f64]) -> Result<Vec<Complex64>, MaterialError> {
        ws.iter().map(|&w| self.evaluate(w)).collect()
    }

    /// Complex refractive index $\sqrt{\epsilon}$, principal branch.
    pub fn refractive_index(&mut self, w: f64) -> Result<Complex64, MaterialError> {
        Ok(self.evaluate(w)?.sqrt())
    }

    fn compute(&self, w: f64) -> Result<Complex64, MaterialError> {
        log::trace!("{}: computing at w = {}", self.model.tag, w);
        match (&self.model.spec, &self.binding) {
            (ModelSpec::Constant { e }, _) => Ok(Complex64::from(*e)),
            (ModelSpec::Unknown(tag), _) => Err(MaterialError::config(format!(
                "The model {} is not implemented",
                tag
            ))),
            (ModelSpec::Drude(p), _) => Ok(self.apply_loss_policy(dispersion::drude(check_frequency(w)?, p))),
            (ModelSpec::DrudeLorentz(p), _) => {
                Ok(self.apply_loss_policy(dispersion::drude_lorentz(check_frequency(w)?, p)))
            }
            (ModelSpec::Haftel(p), _) => Ok(self.apply_loss_policy(dispersion::haftel(check_frequency(w)?, p))),
            (ModelSpec::Dataset { .. }, Binding::Curve(curve)) => {
                let n = curve.interpolate(check_frequency(w)?)?;
                Ok(self.apply_loss_policy(n * n))
            }
            (ModelSpec::Catalog { bound_check, .. }, Binding::Record(record)) => {
                let wavelength = 2.0 * PI / check_frequency(w)?;
                if *bound_check {
                    record.check_range(wavelength)?;
                }
                if record.metadata().index_formula() {
                    let n = record.refractive_index(wavelength)?;
                    Ok(n * n)
                } else {
                    Ok(self.apply_loss_policy(record.dielectric_function(wavelength)?))
                }
            }
            (spec, binding) => Err(MaterialError::DataError(format!(
                "{} model has no bound data ({:?})",
                spec.family(),
                binding
            ))),
        }
    }

    fn apply_loss_policy(&self, eps: Complex64) -> Complex64 {
        let mut im = self.im_factor * eps.im;
        if !(im >= IM_FLOOR) {
            im = IM_FLOOR;
        }
        if self.model.no_loss {
            im *= NO_LOSS_SCALE;
        }
        Complex64::new(eps.re, im)
    }
}

/// Reject frequencies at which the dispersion formulas divide by zero.
fn check_frequency(w: f64) -> Result<f64, MaterialError> {
    if w == 0.0 || !w.is_finite() {
        return Err(MaterialError::Domain { frequency: w });
    }
    Ok(w)
}
