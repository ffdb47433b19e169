//! Interpolated refractive-index curves over angular frequency.
//!
//! A [`CurveInterpolator`] holds a frequency-ascending table of
//! $(\omega, n, k)$ samples and returns $\tilde n = n + ik$ at arbitrary
//! frequencies inside the table. Queries outside the sampled range are an
//! error; nothing is extrapolated.
//!
//! ## Dataset files
//!
//! Bundled tables are stored wavelength-ascending as one pair array per
//! quantity:
//!
//! ```json
//! { "n": [[0.30, 1.53], [0.40, 1.47]], "k": [[0.30, 1.89], [0.40, 1.95]] }
//! ```
//!
//! Wavelengths are in µm; on load they are converted to $\omega = 2\pi/\lambda$
//! and reversed into frequency order.

use std::f64::consts::PI;
use std::path::Path;

use num_complex::Complex64;
use serde::Deserialize;

use crate::provider::MaterialError;
use crate::spline::{Interpolant, InterpolationKind};

/// On-disk dataset layout: `(λ, value)` pairs per quantity.
#[derive(Debug, Deserialize)]
struct PairTable {
    n: Vec<[f64; 2]>,
    k: Vec<[f64; 2]>,
}

/// Interpolator for a tabulated complex refractive index.
#[derive(Debug, Clone)]
pub struct CurveInterpolator {
    ws: Vec<f64>,
    ns: Vec<f64>,
    ks: Vec<f64>,
    n_interp: Interpolant,
    k_interp: Interpolant,
}

impl CurveInterpolator {
    /// Build from a frequency-ascending table.
    ///
    /// # Arguments
    /// * `ws` - Strictly increasing angular frequencies.
    /// * `ns` - Real part of the refractive index at each frequency.
    /// * `ks` - Extinction coefficient at each frequency.
    pub fn new(
        ws: Vec<f64>,
        ns: Vec<f64>,
        ks: Vec<f64>,
        kind: InterpolationKind,
    ) -> Result<Self, MaterialError> {
        let n_interp = Interpolant::new(kind, ws.clone(), ns.clone())?;
        let k_interp = Interpolant::new(kind, ws.clone(), ks.clone())?;
        Ok(Self {
            ws,
            ns,
            ks,
            n_interp,
            k_interp,
        })
    }

    /// Build from wavelength-ascending `(λ, n)` and `(λ, k)` pairs.
    ///
    /// Both series must be sampled on the same wavelength grid.
    pub fn from_wavelength_pairs(
        n_pairs: &[[f64; 2]],
        k_pairs: &[[f64; 2]],
        kind: InterpolationKind,
    ) -> Result<Self, MaterialError> {
        if n_pairs.len() != k_pairs.len() {
            return Err(MaterialError::DataError(format!(
                "n and k tables differ in length ({} != {})",
                n_pairs.len(),
                k_pairs.len()
            )));
        }
        if let Some((i, _)) = n_pairs
            .iter()
            .zip(k_pairs)
            .enumerate()
            .find(|(_, (n, k))| n[0] != k[0])
        {
            return Err(MaterialError::DataError(format!(
                "n and k tables use different wavelengths at row {}",
                i
            )));
        }
        if let Some(&[lam, _]) = n_pairs.iter().find(|p| !(p[0] > 0.0)) {
            return Err(MaterialError::DataError(format!(
                "Wavelength {} must be positive",
                lam
            )));
        }

        let ws = n_pairs.iter().rev().map(|p| 2.0 * PI / p[0]).collect();
        let ns = n_pairs.iter().rev().map(|p| p[1]).collect();
        let ks = k_pairs.iter().rev().map(|p| p[1]).collect();
        Self::new(ws, ns, ks, kind)
    }

    /// Parse a JSON dataset (see module docs).
    pub fn from_json_str(json: &str, kind: InterpolationKind) -> Result<Self, MaterialError> {
        let table: PairTable = serde_json::from_str(json)?;
        Self::from_wavelength_pairs(&table.n, &table.k, kind)
    }

    /// Load a JSON dataset file.
    pub fn load_json(path: &Path, kind: InterpolationKind) -> Result<Self, MaterialError> {
        let content = std::fs::read_to_string(path)?;
        log::debug!("loaded dataset {}", path.display());
        Self::from_json_str(&content, kind)
    }

    /// Sampled angular frequencies, ascending.
    pub fn frequencies(&self) -> &[f64] {
        &self.ws
    }

    /// Frequency range `(min, max)` covered by the table.
    pub fn frequency_range(&self) -> (f64, f64) {
        (self.ws[0], self.ws[self.ws.len() - 1])
    }

    /// Tabulated $(n, k)$ at sample `i`.
    pub fn sample(&self, i: usize) -> Option<(f64, f64)> {
        Some((*self.ns.get(i)?, *self.ks.get(i)?))
    }

    /// Complex refractive index $n + ik$ at angular frequency `w`.
    pub fn interpolate(&self, w: f64) -> Result<Complex64, MaterialError> {
        let (min, max) = self.frequency_range();
        if !(w >= min && w <= max) {
            return Err(MaterialError::OutOfRange {
                value: w,
                min,
                max,
            });
        }
        Ok(Complex64::new(
            self.n_interp.evaluate(w),
            self.k_interp.evaluate(w),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> CurveInterpolator {
        CurveInterpolator::new(
            vec![1.0, 2.0, 3.0, 4.0],
            vec![1.5, 1.4, 1.2, 0.9],
            vec![0.0, 0.1, 0.4, 1.0],
            InterpolationKind::Cubic,
        )
        .unwrap()
    }

    #[test]
    fn test_grid_points_are_exact() {
        let curve = table();
        for (i, &w) in curve.frequencies().iter().enumerate() {
            let (n, k) = curve.sample(i).unwrap();
            assert_eq!(curve.interpolate(w).unwrap(), Complex64::new(n, k));
        }
    }

    #[test]
    fn test_out_of_range_is_an_error() {
        let curve = table();
        assert!(matches!(
            curve.interpolate(0.5),
            Err(MaterialError::OutOfRange { min, max, .. }) if min == 1.0 && max == 4.0
        ));
        assert!(curve.interpolate(4.5).is_err());
        assert!(curve.interpolate(f64::NAN).is_err());
    }

    #[test]
    fn test_wavelength_pairs_are_reversed_into_frequency_order() {
        let n = [[0.5, 1.2], [1.0, 1.4], [2.0, 1.5]];
        let k = [[0.5, 0.3], [1.0, 0.2], [2.0, 0.1]];
        let curve = CurveInterpolator::from_wavelength_pairs(&n, &k, InterpolationKind::Linear)
            .unwrap();
        assert_eq!(curve.frequencies(), &[PI, 2.0 * PI, 4.0 * PI]);
        assert_eq!(curve.sample(0), Some((1.5, 0.1)));
        assert_eq!(curve.interpolate(4.0 * PI).unwrap(), Complex64::new(1.2, 0.3));
    }

    #[test]
    fn test_mismatched_grids_are_rejected() {
        let n = [[0.5, 1.2], [1.0, 1.4]];
        let k = [[0.5, 0.3], [1.1, 0.2]];
        assert!(CurveInterpolator::from_wavelength_pairs(&n, &k, InterpolationKind::Cubic).is_err());
        let k_short = [[0.5, 0.3]];
        assert!(
            CurveInterpolator::from_wavelength_pairs(&n, &k_short, InterpolationKind::Cubic)
                .is_err()
        );
    }

    #[test]
    fn test_json_dataset() {
        let json = r#"{"n": [[0.4, 1.47], [0.5, 0.97], [0.6, 0.25]],
                       "k": [[0.4, 1.95], [0.5, 1.87], [0.6, 2.98]]}"#;
        let curve = CurveInterpolator::from_json_str(json, InterpolationKind::Cubic).unwrap();
        let nk = curve.interpolate(2.0 * PI / 0.5).unwrap();
        assert!((nk.re - 0.97).abs() < 1e-12);
        assert!((nk.im - 1.87).abs() < 1e-12);

        assert!(matches!(
            CurveInterpolator::from_json_str("{\"n\": []}", InterpolationKind::Cubic),
            Err(MaterialError::Json(_))
        ));
    }
}
