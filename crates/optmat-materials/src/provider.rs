//! Error type and the wavelength-domain provider trait.
//!
//! Catalog records implement [`MaterialProvider`], which returns
//! wavelength-dependent complex dielectric functions and refractive indices.
//! Wavelengths are in micrometres throughout this crate.

use num_complex::Complex64;
use thiserror::Error;

/// Errors from material construction and evaluation.
#[derive(Debug, Error)]
pub enum MaterialError {
    /// Unknown model tag, missing or conflicting parameters.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Frequency for which a dispersion formula is undefined.
    #[error("Angular frequency {frequency} is outside the model domain")]
    Domain { frequency: f64 },

    #[error("Value {value} is outside the data range [{min}, {max}]")]
    OutOfRange { value: f64, min: f64, max: f64 },

    #[error("Material not found: {0}")]
    NotFound(String),

    #[error("Data error: {0}")]
    DataError(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid dataset file: {0}")]
    Json(#[from] serde_json::Error),
}

impl MaterialError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// Provides wavelength-dependent material properties.
///
/// Implementations include closed-form dispersion formulas and tabulated
/// measured data.
pub trait MaterialProvider: Send + Sync {
    /// Human-readable name of this material.
    fn name(&self) -> &str;

    /// Wavelength range over which data is valid (µm).
    fn wavelength_range(&self) -> (f64, f64);

    /// Complex dielectric function $\epsilon(\lambda)$ at a given wavelength.
    fn dielectric_function(&self, wavelength_um: f64) -> Result<Complex64, MaterialError>;

    /// Complex refractive index $\tilde{n} = n + ik$ at a given wavelength.
    ///
    /// Default implementation derives from $\epsilon = \tilde{n}^2$.
    fn refractive_index(&self, wavelength_um: f64) -> Result<Complex64, MaterialError> {
        let eps = self.dielectric_function(wavelength_um)?;
        Ok(eps.sqrt())
    }

    /// Fails with [`MaterialError::OutOfRange`] outside
    /// [`wavelength_range`](Self::wavelength_range).
    fn check_range(&self, wavelength_um: f64) -> Result<(), MaterialError> {
        let (min, max) = self.wavelength_range();
        if wavelength_um < min || wavelength_um > max || wavelength_um.is_nan() {
            return Err(MaterialError::OutOfRange {
                value: wavelength_um,
                min,
                max,
            });
        }
        Ok(())
    }
}
