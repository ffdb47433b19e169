//! # Optmat Materials
//!
//! Complex relative permittivity $\epsilon(\omega)$ of optical materials,
//! selected from a single configuration object and evaluated at arbitrary
//! angular frequency $\omega = 2\pi/\lambda$ ($\lambda$ in µm).
//!
//! ```
//! use optmat_materials::{Material, MaterialConfig};
//!
//! let mut gold = Material::new(&MaterialConfig::new("gold_vial_dl")).unwrap();
//! let eps = gold.evaluate(2.0 * std::f64::consts::PI).unwrap();
//! assert!(eps.re < 0.0 && eps.im > 0.0);
//! ```
//!
//! ## Available models
//!
//! | Family | Tags | Module |
//! |--------|------|--------|
//! | Constant | `dielectric`, `pec` | [`model`] |
//! | Drude / Drude-Lorentz / Haftel | `drude`, `drude_lorentz`, `haftel` | [`dispersion`] |
//! | Literature presets | `gold_d`, `gold_vial_dl`, `gold_rakic`, `silver_rakic`, `aluminium_dl`, `tungsten_dl` | [`presets`] |
//! | Tabulated $(n, k)$ | `gold_jc`, `aluminium_rak`, `gold_palik`, `aluminium_mcp`, `tabulated` | [`curve`], [`johnson_christy`], [`rakic`] |
//! | Catalog records | `rii`, `gold_dl`, `silver_dl` | [`catalog`] |
//!
//! ## Interpolation
//!
//! Tabulated data is interpolated using natural cubic splines
//! ([`spline::CubicSpline`]) over angular frequency. Queries outside the
//! tabulated range are rejected rather than extrapolated.

pub mod catalog;
pub mod config;
pub mod curve;
pub mod dispersion;
pub mod johnson_christy;
pub mod material;
pub mod model;
pub mod presets;
pub mod provider;
pub mod rakic;
pub mod spline;

pub use config::MaterialConfig;
pub use material::Material;
pub use provider::MaterialError;
