//! Johnson & Christy tabulated optical constants for gold.
//!
//! P. B. Johnson and R. W. Christy, *Phys. Rev. B* **6**, 4370 (1972).
//!
//! The table is embedded at compile time as photon energy with $(n, k)$,
//! ascending in energy, which is already ascending in angular frequency.

use crate::curve::CurveInterpolator;
use crate::presets::ev_to_angular;
use crate::provider::MaterialError;
use crate::spline::InterpolationKind;

/// (E/eV, n, k) for Au, 0.31–1.94 µm.
const GOLD: &[(f64, f64, f64)] = &[
    (0.64, 0.92, 13.78),
    (0.77, 0.56, 11.21),
    (0.89, 0.43, 9.519),
    (1.02, 0.35, 8.145),
    (1.14, 0.27, 7.150),
    (1.26, 0.22, 6.350),
    (1.39, 0.17, 5.663),
    (1.51, 0.16, 5.083),
    (1.64, 0.14, 4.542),
    (1.76, 0.13, 4.103),
    (1.88, 0.14, 3.697),
    (2.01, 0.21, 3.272),
    (2.13, 0.29, 2.863),
    (2.26, 0.43, 2.455),
    (2.38, 0.62, 2.081),
    (2.50, 1.04, 1.833),
    (2.63, 1.31, 1.849),
    (2.75, 1.38, 1.914),
    (2.88, 1.45, 1.948),
    (3.00, 1.46, 1.958),
    (3.12, 1.47, 1.952),
    (3.25, 1.46, 1.933),
    (3.37, 1.48, 1.895),
    (3.50, 1.50, 1.866),
    (3.62, 1.48, 1.871),
    (3.74, 1.48, 1.883),
    (3.87, 1.54, 1.898),
    (3.99, 1.53, 1.893),
];

/// Gold refractive-index curve over angular frequency.
pub fn gold(kind: InterpolationKind) -> Result<CurveInterpolator, MaterialError> {
    let ws = GOLD.iter().map(|&(e, _, _)| ev_to_angular(e)).collect();
    let ns = GOLD.iter().map(|&(_, n, _)| n).collect();
    let ks = GOLD.iter().map(|&(_, _, k)| k).collect();
    CurveInterpolator::new(ws, ns, ks, kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gold_is_metallic_in_near_infrared() {
        let curve = gold(InterpolationKind::Cubic).unwrap();
        // 1 µm sits inside the table.
        let nk = curve.interpolate(2.0 * std::f64::consts::PI).unwrap();
        let eps = nk * nk;
        assert!(eps.re < -30.0, "Au ε₁ at 1 µm should be strongly negative, got {:.2}", eps.re);
        assert!(eps.im > 0.0);
    }

    #[test]
    fn test_gold_range() {
        let curve = gold(InterpolationKind::Linear).unwrap();
        let (lo, hi) = curve.frequency_range();
        assert_eq!(lo, ev_to_angular(0.64));
        assert_eq!(hi, ev_to_angular(3.99));
    }
}
