//! Fixed-step numerical integration of the Schrödinger equation for
//! Hamiltonians implementing [`HBuild`].
//!
//! The last index of a 2D array corresponds to time. Integration is via
//! fourth-order Runge-Kutta on the supplied time grid, with the state
//! renormalized after every step.

use ndarray as nd;
use num_complex::Complex64 as C64;
use tracing::debug;
use crate::{
    error::{ RamanError, RamanResult },
    hamiltonian::HBuild,
};

/// Euclidean length of a state vector.
pub fn state_norm(psi: &nd::Array1<C64>) -> f64 {
    psi.iter().map(|a| a.norm_sqr()).sum::<f64>().sqrt()
}

fn rhs(h: &nd::Array2<C64>, psi: &nd::Array1<C64>) -> nd::Array1<C64> {
    -C64::i() * h.dot(psi)
}

fn check_inputs<H>(psi0: &nd::Array1<C64>, hbuilder: &H, t: &nd::Array1<f64>)
    -> RamanResult<()>
where H: HBuild
{
    RamanError::check_len("initial state", hbuilder.dim(), psi0.len())?;
    if t.is_empty() {
        return Err(RamanError::InvalidConfig("empty time grid".into()));
    }
    if t.iter().zip(t.iter().skip(1)).any(|(tk, tkp1)| !(tkp1 > tk)) {
        return Err(RamanError::InvalidConfig(
            "time grid must be strictly increasing".into()));
    }
    if state_norm(psi0) == 0.0 {
        return Err(RamanError::InvalidConfig("initial state has zero norm".into()));
    }
    Ok(())
}

// one RK4 step from `tk` to `tk + dtk`, renormalized
fn step<H>(hbuilder: &H, psi: &nd::Array1<C64>, tk: f64, dtk: f64)
    -> nd::Array1<C64>
where H: HBuild
{
    let hk = hbuilder.build_at(tk);
    let hkp1h = hbuilder.build_at(tk + dtk / 2.0);
    let hkp1 = hbuilder.build_at(tk + dtk);
    let k1 = rhs(&hk, psi);
    let k2 = rhs(&hkp1h, &(psi + &k1 * (dtk / 2.0)));
    let k3 = rhs(&hkp1h, &(psi + &k2 * (dtk / 2.0)));
    let k4 = rhs(&hkp1, &(psi + &k3 * dtk));
    let psi_new = psi + (k1 + k2 * 2.0 + k3 * 2.0 + k4) * (dtk / 6.0);
    let norm = state_norm(&psi_new);
    psi_new / C64::from(norm)
}

/// Numerically integrate the Schrödinger equation for a time-dependent
/// Hamiltonian, returning the state at every point of `t`.
///
/// The initial state is normalized before integration.
pub fn evolve<H>(psi0: &nd::Array1<C64>, hbuilder: &H, t: &nd::Array1<f64>)
    -> RamanResult<nd::Array2<C64>>
where H: HBuild
{
    check_inputs(psi0, hbuilder, t)?;
    debug!(dim = psi0.len(), steps = t.len(), "integrating");
    let mut psi: nd::Array2<C64> = nd::Array2::zeros((psi0.len(), t.len()));
    let mut psi_old: nd::Array1<C64> = psi0 / C64::from(state_norm(psi0));
    psi.column_mut(0).assign(&psi_old);
    let iter = t.iter().zip(t.iter().skip(1)).enumerate();
    for (k, (&tk, &tkp1)) in iter {
        psi_old = step(hbuilder, &psi_old, tk, tkp1 - tk);
        psi.column_mut(k + 1).assign(&psi_old);
    }
    Ok(psi)
}

/// Like [`evolve`], but map each state through `x` as it is computed instead
/// of storing it.
pub fn evolve_reduced<H, X, T>(
    psi0: &nd::Array1<C64>,
    hbuilder: &H,
    t: &nd::Array1<f64>,
    x: X,
) -> RamanResult<Vec<T>>
where
    H: HBuild,
    X: Fn(&nd::Array1<C64>) -> T,
{
    check_inputs(psi0, hbuilder, t)?;
    debug!(dim = psi0.len(), steps = t.len(), "integrating (reduced)");
    let mut psi_old: nd::Array1<C64> = psi0 / C64::from(state_norm(psi0));
    let mut x_t: Vec<T> = Vec::with_capacity(t.len());
    x_t.push(x(&psi_old));
    for (&tk, &tkp1) in t.iter().zip(t.iter().skip(1)) {
        psi_old = step(hbuilder, &psi_old, tk, tkp1 - tk);
        x_t.push(x(&psi_old));
    }
    Ok(x_t)
}

/// Compute the probability of every basis state at every time, with time as
/// the last axis.
pub fn populations(psi: &nd::Array2<C64>) -> nd::Array2<f64> {
    psi.mapv(|a| a.norm_sqr())
}
