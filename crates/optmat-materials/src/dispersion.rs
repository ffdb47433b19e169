//! Closed-form dispersion models.
//!
//! Every function here is a pure map from angular frequency $\omega$ and a
//! parameter set to the raw complex relative permittivity. Loss scaling and
//! the passivity floor are applied by [`Material`](crate::material::Material),
//! not here. The time convention is $e^{-i\omega t}$, so absorbing media have
//! $\mathrm{Im}\,\epsilon > 0$.
//!
//! All formulas divide by $\omega$; callers must not pass zero.

use num_complex::Complex64;

/// Free-electron (Drude) parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrudeParams {
    /// Background permittivity $\epsilon_\infty$.
    pub e: f64,
    /// Plasma frequency $\omega_p$.
    pub wp: f64,
    /// Damping rate $\gamma_p$.
    pub gp: f64,
}

/// A single Lorentz oscillator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oscillator {
    /// Oscillator strength $\Delta\epsilon$.
    pub s: f64,
    /// Resonance frequency.
    pub w: f64,
    /// Linewidth.
    pub g: f64,
}

/// Drude core plus bound-electron Lorentz oscillators.
#[derive(Debug, Clone, PartialEq)]
pub struct DrudeLorentzParams {
    pub drude: DrudeParams,
    /// Summed in order.
    pub oscillators: Vec<Oscillator>,
}

impl DrudeLorentzParams {
    /// Build from index-aligned strength, resonance and linewidth sequences.
    ///
    /// Returns `None` when the three sequences differ in length.
    pub fn from_sequences(drude: DrudeParams, ss: &[f64], ws: &[f64], gs: &[f64]) -> Option<Self> {
        if ss.len() != ws.len() || ss.len() != gs.len() {
            return None;
        }
        let oscillators = ss
            .iter()
            .zip(ws)
            .zip(gs)
            .map(|((&s, &w), &g)| Oscillator { s, w, g })
            .collect();
        Some(Self { drude, oscillators })
    }
}

/// Drude core plus a Debye-type relaxation term.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HaftelParams {
    /// Static background permittivity $\epsilon_1$.
    pub e1: f64,
    /// Relaxation time $\tau$.
    pub tau: f64,
    /// Relaxation strength.
    pub sp: f64,
    /// Plasma frequency of the optional Drude core (0 disables it).
    pub wp: f64,
    /// Damping of the optional Drude core.
    pub gp: f64,
}

/// Drude term $\omega_p^2 / (\omega^2 + i\gamma_p\omega)$.
fn drude_term(w: f64, wp: f64, gp: f64) -> Complex64 {
    Complex64::from(wp * wp) / Complex64::new(w * w, gp * w)
}

/// $\epsilon(\omega) = \epsilon_\infty - \omega_p^2 / (\omega^2 + i\gamma_p\omega)$
pub fn drude(w: f64, p: &DrudeParams) -> Complex64 {
    Complex64::from(p.e) - drude_term(w, p.wp, p.gp)
}

/// $\epsilon(\omega) = \epsilon_D(\omega) - \sum_j \Delta\epsilon_j\,\omega_j^2 / (\omega^2 - \omega_j^2 + i\gamma_j\omega)$
pub fn drude_lorentz(w: f64, p: &DrudeLorentzParams) -> Complex64 {
    p.oscillators.iter().fold(drude(w, &p.drude), |eps, osc| {
        eps - Complex64::from(osc.s * osc.w * osc.w) / Complex64::new(w * w - osc.w * osc.w, osc.g * w)
    })
}

/// $\epsilon(\omega) = \epsilon_1 - \omega_p^2 / (\omega^2 + i\gamma_p\omega) + s / (1 - i\omega\tau)$
pub fn haftel(w: f64, p: &HaftelParams) -> Complex64 {
    let mut eps = Complex64::from(p.e1) + Complex64::from(p.sp) / Complex64::new(1.0, -w * p.tau);
    if p.wp != 0.0 {
        eps -= drude_term(w, p.wp, p.gp);
    }
    eps
}
