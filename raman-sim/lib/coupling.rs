//! Effective two-photon couplings between ground sublevels, obtained by
//! adiabatic elimination of the intermediate levels.
//!
//! For ground sublevels `i`, `j` driven by fields `E1`, `E2`, the effective
//! coupling is the second-order sum
//! ```text
//! C(i, j, E1, E2) = Σ_k -1 / (4 Δ_k) * v(i, E1)_k * conj(v(j, E2)_k)
//! ```
//! over intermediate levels `k` with detunings `Δ_k`, where `v(i, E)_k` is the
//! single-photon coupling from `i` to `k`. Diagonal entries are AC Stark shifts
//! and off-diagonal entries are stimulated Raman couplings.

use std::ops::Deref;
use ndarray as nd;
use num_complex::Complex64 as C64;
use tracing::debug;
use crate::{
    error::{ RamanError, RamanResult },
    field::{ ElectricField, FieldCoupling },
    levels::{ AtomicLevelTable, GroundLevelSet },
};

/// Computes effective couplings between the sublevels of a [`GroundLevelSet`]
/// through the levels of an [`AtomicLevelTable`].
#[derive(Copy, Clone, Debug)]
pub struct GroundCoupling<'a> {
    levels: &'a AtomicLevelTable,
    ground: &'a GroundLevelSet,
}

impl<'a> GroundCoupling<'a> {
    /// Create a new `GroundCoupling`.
    pub fn new(levels: &'a AtomicLevelTable, ground: &'a GroundLevelSet)
        -> Self
    {
        Self { levels, ground }
    }

    /// Return the intermediate level table.
    pub fn levels(&self) -> &'a AtomicLevelTable { self.levels }

    /// Return the ground level set.
    pub fn ground(&self) -> &'a GroundLevelSet { self.ground }

    /// Compute the single-photon couplings from the `i`-th ground sublevel to
    /// every intermediate level under field `field`.
    pub fn intermediate_rabi(&self, i: usize, field: &ElectricField)
        -> RamanResult<nd::Array1<C64>>
    {
        let fc = FieldCoupling::new(self.ground.get_spin(i)?, *field);
        Ok(
            self.levels.iter()
                .map(|lev| fc.coupling(lev.spin, lev.dipole))
                .collect()
        )
    }

    /// Perform the detuning-weighted sum over intermediate levels for two
    /// vectors of single-photon couplings.
    ///
    /// *Panics* if either vector's length differs from the number of
    /// intermediate levels.
    pub fn intermediate_sum(&self, v1: &nd::Array1<C64>, v2: &nd::Array1<C64>)
        -> C64
    {
        assert_eq!(v1.len(), self.levels.len());
        assert_eq!(v2.len(), self.levels.len());
        self.levels.iter().zip(v1).zip(v2)
            .map(|((lev, a), b)| *a * b.conj() * (-1.0 / (4.0 * lev.detuning)))
            .sum()
    }

    /// Compute the effective coupling `C(i, j, E1, E2)`.
    pub fn effective_coupling(
        &self,
        i: usize,
        j: usize,
        e1: &ElectricField,
        e2: &ElectricField,
    ) -> RamanResult<C64>
    {
        let v1 = self.intermediate_rabi(i, e1)?;
        let v2 = self.intermediate_rabi(j, e2)?;
        Ok(self.intermediate_sum(&v1, &v2))
    }

    /// Compute the AC Stark shift `C(i, i, E, E)` of the `i`-th sublevel.
    ///
    /// This is real up to rounding.
    pub fn stark_shift(&self, i: usize, field: &ElectricField)
        -> RamanResult<f64>
    {
        self.effective_coupling(i, i, field, field).map(|s| s.re)
    }

    /// Compute the coupling matrix for a single pump/Stokes pair.
    ///
    /// The carrier row and column hold pump-Stokes couplings, the remaining
    /// block holds Stokes-Stokes couplings, and the carrier diagonal entry is
    /// the pump-only Stark shift.
    pub fn coupling_matrix(&self, pump: &ElectricField, stokes: &ElectricField)
        -> RamanResult<CouplingMatrix>
    {
        let n = self.ground.len();
        let vp: Vec<nd::Array1<C64>>
            = (0..n).map(|i| self.intermediate_rabi(i, pump))
            .collect::<RamanResult<_>>()?;
        let vs: Vec<nd::Array1<C64>>
            = (0..n).map(|i| self.intermediate_rabi(i, stokes))
            .collect::<RamanResult<_>>()?;
        let mut mat: nd::Array2<C64> = nd::Array2::zeros((n, n));
        mat[[0, 0]] = self.intermediate_sum(&vp[0], &vp[0]);
        for i in 1..n {
            mat[[0, i]] = self.intermediate_sum(&vp[0], &vs[i]);
            mat[[i, 0]] = mat[[0, i]].conj();
            for j in 1..n {
                mat[[i, j]] = self.intermediate_sum(&vs[i], &vs[j]);
            }
        }
        Ok(CouplingMatrix(mat))
    }
}

/// Square matrix of effective couplings between ground sublevels.
#[derive(Clone, Debug, PartialEq)]
pub struct CouplingMatrix(nd::Array2<C64>);

impl Deref for CouplingMatrix {
    type Target = nd::Array2<C64>;

    fn deref(&self) -> &Self::Target { &self.0 }
}

impl From<CouplingMatrix> for nd::Array2<C64> {
    fn from(mat: CouplingMatrix) -> Self { mat.0 }
}

impl CouplingMatrix {
    /// Return `true` if `self[i, j] == conj(self[j, i])` for all `i`, `j`, to
    /// within absolute tolerance `tol`.
    pub fn is_hermitian(&self, tol: f64) -> bool {
        self.0.indexed_iter()
            .all(|((i, j), a)| (a - self.0[[j, i]].conj()).norm() <= tol)
    }

    /// Return the diagonal (Stark shift) entries.
    pub fn stark_shifts(&self) -> nd::Array1<f64> {
        self.0.diag().mapv(|s| s.re)
    }
}

/// All coupling data needed to assemble a multi-tone Raman Hamiltonian.
///
/// Tones are indexed by `c` in `0..T` for `T` Stokes fields, all paired with a
/// single pump field. Ground sublevel index 0 is the carrier.
#[derive(Clone, Debug, PartialEq)]
pub struct RamanCouplings {
    /// Stark shifts: the pump-only shift for the carrier, and the sum over
    /// tones of Stokes-only shifts for every other sublevel.
    pub stark: nd::Array1<f64>,
    /// `carrier[[c, i]] = C(i, 0, E_c, E_P)`; zero for `i = 0`.
    pub carrier: nd::Array2<C64>,
    /// `cross[[c1, c2, i, j]] = C(i, j, E_c1, E_c2)`; zero when `i = 0` or
    /// `j = 0`.
    pub cross: nd::Array4<C64>,
    /// Two-photon detunings `δ_c,i`; zero for `i = 0`.
    pub detunings: nd::Array2<f64>,
    /// Phase of each tone.
    pub phases: Vec<f64>,
}

impl RamanCouplings {
    /// Compute all couplings and detunings for a pump field and a set of
    /// Stokes tones with nominal detunings and phases.
    ///
    /// The detuning of tone `c` for sublevel `i` is
    /// ```text
    /// δ_c,i = Δ_c + (E_ref - E_i) + (s_ref - s_i)
    /// ```
    /// where `E` are static ground energies, `s` are Stark shifts, and `ref` is
    /// the [reference sublevel][GroundLevelSet::reference].
    pub fn compute(
        gc: &GroundCoupling,
        pump: &ElectricField,
        stokes: &[ElectricField],
        detunings: &[f64],
        phases: &[f64],
    ) -> RamanResult<Self>
    {
        let ntones = stokes.len();
        RamanError::check_len("tone detunings", ntones, detunings.len())?;
        RamanError::check_len("tone phases", ntones, phases.len())?;
        let ground = gc.ground();
        let n = ground.len();

        let vp: Vec<nd::Array1<C64>>
            = (0..n).map(|i| gc.intermediate_rabi(i, pump))
            .collect::<RamanResult<_>>()?;
        // vs[c][i]
        let vs: Vec<Vec<nd::Array1<C64>>>
            = stokes.iter()
            .map(|e| {
                (0..n).map(|i| gc.intermediate_rabi(i, e))
                    .collect::<RamanResult<Vec<_>>>()
            })
            .collect::<RamanResult<_>>()?;

        let mut stark: nd::Array1<f64> = nd::Array1::zeros(n);
        stark[0] = gc.intermediate_sum(&vp[0], &vp[0]).re;
        for i in 1..n {
            stark[i]
                = vs.iter()
                .map(|vc| gc.intermediate_sum(&vc[i], &vc[i]).re)
                .sum();
        }

        let mut carrier: nd::Array2<C64> = nd::Array2::zeros((ntones, n));
        for (c, vc) in vs.iter().enumerate() {
            for i in 1..n {
                carrier[[c, i]] = gc.intermediate_sum(&vc[i], &vp[0]);
            }
        }

        let mut cross: nd::Array4<C64> = nd::Array4::zeros((ntones, ntones, n, n));
        for (c1, vc1) in vs.iter().enumerate() {
            for (c2, vc2) in vs.iter().enumerate() {
                for i in 1..n {
                    for j in 1..n {
                        cross[[c1, c2, i, j]]
                            = gc.intermediate_sum(&vc1[i], &vc2[j]);
                    }
                }
            }
        }

        let reference = ground.reference();
        let e_ref = ground.reference_energy();
        let mut dets: nd::Array2<f64> = nd::Array2::zeros((ntones, n));
        for (c, &delta) in detunings.iter().enumerate() {
            for (i, &e_i) in ground.values().enumerate().skip(1) {
                dets[[c, i]]
                    = delta + (e_ref - e_i) + (stark[reference] - stark[i]);
            }
        }
        debug!(
            tones = ntones,
            sublevels = n,
            carrier_stark = stark[0],
            "computed Raman couplings"
        );

        Ok(Self {
            stark,
            carrier,
            cross,
            detunings: dets,
            phases: phases.to_vec(),
        })
    }

    /// Return the number of tones.
    pub fn num_tones(&self) -> usize { self.phases.len() }

    /// Return the number of ground sublevels.
    pub fn num_levels(&self) -> usize { self.stark.len() }
}
