//! Literature dispersion parameters for elemental metals.
//!
//! All constants are converted to the crate's working units, angular
//! frequency $\omega = 2\pi/\lambda$ with $\lambda$ in µm.
//!
//! ## Sources
//!
//! | Preset | Model | Reference |
//! |--------|-------|-----------|
//! | [`gold_drude_vial`] | Drude | A. Vial *et al.*, *Phys. Rev. B* **71**, 085416 (2005) |
//! | [`gold_drude_lorentz_vial`] | Drude-Lorentz | A. Vial *et al.*, *Phys. Rev. B* **71**, 085416 (2005) |
//! | [`gold_rakic`], [`silver_rakic`], [`aluminium_rakic`], [`tungsten_rakic`] | Lorentz-Drude | A. D. Rakić *et al.*, *Appl. Opt.* **37**, 5271 (1998) |

use crate::dispersion::{DrudeLorentzParams, DrudeParams, Oscillator};

/// Speed of light in units of $10^8$ m/s.
pub const C0: f64 = 2.99792458;

/// $\hbar c$ in eV·µm.
pub const HBAR_C_EV_UM: f64 = 0.197_326_980_4;

/// Convert an ordinary frequency in PHz to angular frequency in rad/µm.
pub fn phz_to_angular(f_phz: f64) -> f64 {
    2.0 * std::f64::consts::PI * f_phz / C0 * 10.0
}

/// Convert a photon energy in eV to angular frequency in rad/µm.
pub fn ev_to_angular(energy_ev: f64) -> f64 {
    energy_ev / HBAR_C_EV_UM
}

/// Gold, Drude fit over 500–1000 nm (Vial 2005).
pub fn gold_drude_vial() -> DrudeParams {
    DrudeParams {
        e: 9.0685,
        wp: phz_to_angular(2.1556),
        gp: phz_to_angular(0.01836),
    }
}

/// Gold, Drude plus one Lorentz oscillator (Vial 2005).
pub fn gold_drude_lorentz_vial() -> DrudeLorentzParams {
    DrudeLorentzParams {
        drude: DrudeParams {
            e: 5.9673,
            wp: phz_to_angular(2.1136),
            gp: phz_to_angular(0.01592),
        },
        oscillators: vec![Oscillator {
            s: 1.09,
            w: phz_to_angular(0.65007),
            g: phz_to_angular(0.10486),
        }],
    }
}

/// Rakić Lorentz-Drude table row set, energies in eV.
struct RakicTable {
    /// Plasma energy $\hbar\omega_p$.
    wp: f64,
    /// Intraband oscillator strength $f_0$.
    f0: f64,
    /// Intraband damping $\Gamma_0$.
    g0: f64,
    /// Interband terms $(f_j, \Gamma_j, \omega_j)$.
    terms: &'static [(f64, f64, f64)],
}

impl RakicTable {
    /// Map onto the Drude-Lorentz form with $\epsilon_\infty = 1$:
    /// $\omega_{p,D} = \sqrt{f_0}\,\omega_p$ and
    /// $\Delta\epsilon_j = f_j \omega_p^2 / \omega_j^2$.
    fn to_params(&self) -> DrudeLorentzParams {
        let wp = ev_to_angular(self.wp);
        DrudeLorentzParams {
            drude: DrudeParams {
                e: 1.0,
                wp: self.f0.sqrt() * wp,
                gp: ev_to_angular(self.g0),
            },
            oscillators: self
                .terms
                .iter()
                .map(|&(f, gamma, omega)| {
                    let w = ev_to_angular(omega);
                    Oscillator {
                        s: f * wp * wp / (w * w),
                        w,
                        g: ev_to_angular(gamma),
                    }
                })
                .collect(),
        }
    }
}

const RAKIC_AU: RakicTable = RakicTable {
    wp: 9.03,
    f0: 0.760,
    g0: 0.053,
    terms: &[
        (0.024, 0.241, 0.415),
        (0.010, 0.345, 0.830),
        (0.071, 0.870, 2.969),
        (0.601, 2.494, 4.304),
        (4.384, 2.214, 13.32),
    ],
};

const RAKIC_AG: RakicTable = RakicTable {
    wp: 9.01,
    f0: 0.845,
    g0: 0.048,
    terms: &[
        (0.065, 3.886, 0.816),
        (0.124, 0.452, 4.481),
        (0.011, 0.065, 8.185),
        (0.840, 0.916, 9.083),
        (5.646, 2.419, 20.29),
    ],
};

const RAKIC_AL: RakicTable = RakicTable {
    wp: 14.98,
    f0: 0.523,
    g0: 0.047,
    terms: &[
        (0.227, 0.333, 0.162),
        (0.050, 0.312, 1.544),
        (0.166, 1.351, 1.808),
        (0.030, 3.382, 3.473),
    ],
};

const RAKIC_W: RakicTable = RakicTable {
    wp: 13.22,
    f0: 0.206,
    g0: 0.064,
    terms: &[
        (0.054, 0.530, 1.004),
        (0.166, 1.281, 1.917),
        (0.706, 3.332, 3.580),
        (2.590, 5.836, 7.498),
    ],
};

pub fn gold_rakic() -> DrudeLorentzParams {
    RAKIC_AU.to_params()
}

pub fn silver_rakic() -> DrudeLorentzParams {
    RAKIC_AG.to_params()
}

pub fn aluminium_rakic() -> DrudeLorentzParams {
    RAKIC_AL.to_params()
}

pub fn tungsten_rakic() -> DrudeLorentzParams {
    RAKIC_W.to_params()
}
