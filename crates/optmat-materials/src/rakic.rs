//! Rakić tabulated optical constants for aluminium.
//!
//! A. D. Rakić, A. B. Djurišić, J. M. Elazar and M. L. Majewski,
//! *Appl. Opt.* **37**, 5271 (1998).
//!
//! The $(n, k)$ values are the paper's Brendel-Borman fit sampled on a
//! wavelength grid, stored wavelength-ascending as published tables are and
//! reversed into frequency order on construction.

use std::f64::consts::PI;

use crate::curve::CurveInterpolator;
use crate::provider::MaterialError;
use crate::spline::InterpolationKind;

/// (λ/µm, n, k) for Al, 0.2–12 µm.
const ALUMINIUM: &[(f64, f64, f64)] = &[
    (0.2, 0.11555, 2.2014),
    (0.225, 0.1439, 2.5261),
    (0.25, 0.17463, 2.8456),
    (0.3, 0.24755, 3.4765),
    (0.35, 0.34259, 4.1),
    (0.4, 0.46551, 4.7122),
    (0.45, 0.61687, 5.3036),
    (0.5, 0.78832, 5.8655),
    (0.55, 0.96529, 6.3996),
    (0.6, 1.1413, 6.9255),
    (0.65, 1.3416, 7.4735),
    (0.7, 1.6595, 8.0452),
    (0.75, 2.2293, 8.4429),
    (0.8, 2.7147, 8.2729),
    (0.825, 2.691, 8.088),
    (0.85, 2.5073, 7.9984),
    (0.875, 2.263, 8.0482),
    (0.9, 2.0331, 8.2102),
    (0.95, 1.7028, 8.7024),
    (1.0, 1.5133, 9.2639),
    (1.1, 1.3438, 10.396),
    (1.2, 1.3009, 11.503),
    (1.4, 1.3777, 13.657),
    (1.6, 1.5691, 15.754),
    (1.8, 1.8302, 17.806),
    (2.0, 2.1419, 19.82),
    (2.5, 3.0822, 24.705),
    (3.0, 4.1884, 29.389),
    (4.0, 6.6933, 38.2),
    (5.0, 9.3492, 46.368),
    (6.0, 11.985, 54.065),
    (8.0, 17.065, 68.685),
    (10.0, 22.185, 82.834),
    (12.0, 27.702, 96.614),
];

/// Aluminium refractive-index curve over angular frequency.
pub fn aluminium(kind: InterpolationKind) -> Result<CurveInterpolator, MaterialError> {
    let ws = ALUMINIUM.iter().rev().map(|&(lam, _, _)| 2.0 * PI / lam).collect();
    let ns = ALUMINIUM.iter().rev().map(|&(_, n, _)| n).collect();
    let ks = ALUMINIUM.iter().rev().map(|&(_, _, k)| k).collect();
    CurveInterpolator::new(ws, ns, ks, kind)
}
