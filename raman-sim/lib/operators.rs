//! Tensor-product operators and states over the joint electronic-motional
//! Hilbert space of an ion chain.
//!
//! The space is the ordered product of `N` electronic slots of dimension `D_e`
//! (one per ion) followed by `M` motional slots of dimension `D_F` (one per
//! mode). Ions and modes are numbered from 1; electronic and Fock basis states
//! are numbered from 0.

use itertools::Itertools;
use ndarray::{ self as nd, linalg::kron };
use num_complex::Complex64 as C64;
use num_traits::{ One, Zero };
use crate::error::{ RamanError, RamanResult };

/// Annihilation operator on a Fock space truncated to `n` states.
pub fn destroy(n: usize) -> nd::Array2<C64> {
    let mut a: nd::Array2<C64> = nd::Array2::zeros((n, n));
    (1..n).for_each(|k| { a[[k - 1, k]] = (k as f64).sqrt().into(); });
    a
}

/// Creation operator on a Fock space truncated to `n` states.
pub fn create(n: usize) -> nd::Array2<C64> { dagger(&destroy(n)) }

/// Identity on a space of dimension `n`.
pub fn eye(n: usize) -> nd::Array2<C64> { nd::Array2::eye(n) }

/// The `k`-th basis vector of a space of dimension `n`.
///
/// *Panics* if `k >= n`.
pub fn basis(n: usize, k: usize) -> nd::Array1<C64> {
    let mut v: nd::Array1<C64> = nd::Array1::zeros(n);
    v[k] = C64::one();
    v
}

/// Compute the outer product `|a><b|` of two state vectors.
pub fn outer_prod(a: &nd::Array1<C64>, b: &nd::Array1<C64>)
    -> nd::Array2<C64>
{
    let mut out: nd::Array2<C64> = nd::Array2::zeros((a.len(), b.len()));
    out.iter_mut()
        .zip(a.iter().cartesian_product(b))
        .for_each(|(o, (ai, bj))| { *o = *ai * bj.conj(); });
    out
}

/// Conjugate transpose.
pub fn dagger(a: &nd::Array2<C64>) -> nd::Array2<C64> {
    a.t().mapv(|x| x.conj())
}

/// Kronecker product of a sequence of matrices, in order.
pub fn tensor<I>(ops: I) -> nd::Array2<C64>
where I: IntoIterator<Item = nd::Array2<C64>>
{
    ops.into_iter()
        .fold(nd::array![[C64::one()]], |acc, op| kron(&acc, &op))
}

/// Kronecker product of a sequence of vectors, in order.
pub fn tensor_vec<I>(vecs: I) -> nd::Array1<C64>
where I: IntoIterator<Item = nd::Array1<C64>>
{
    vecs.into_iter()
        .fold(nd::array![C64::one()], |acc, v| {
            acc.iter().cartesian_product(v.iter())
                .map(|(a, b)| *a * *b)
                .collect()
        })
}

/// Truncated Bose-Einstein density matrix with mean phonon number `nbar` on
/// `n` Fock states, renormalized to unit trace.
fn thermal_fock(n: usize, nbar: f64) -> nd::Array2<C64> {
    let ratio = nbar / (1.0 + nbar);
    let probs: nd::Array1<f64>
        = (0..n).map(|k| ratio.powi(k as i32)).collect();
    let total = probs.sum();
    nd::Array2::from_diag(&probs.mapv(|p| C64::from(p / total)))
}

/// Coherent state with amplitude `alpha` on `n` Fock states, renormalized
/// after truncation.
fn coherent_fock(n: usize, alpha: C64) -> nd::Array1<C64> {
    let mut amps: nd::Array1<C64> = nd::Array1::zeros(n);
    let mut c = C64::one();
    for (k, a) in amps.iter_mut().enumerate() {
        if k > 0 { c *= alpha / (k as f64).sqrt(); }
        *a = c;
    }
    let norm = amps.iter().map(|a| a.norm_sqr()).sum::<f64>().sqrt();
    amps / C64::from(norm)
}

/// A Pauli axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PauliAxis {
    X,
    Y,
    Z,
    I,
}

impl PauliAxis {
    fn matrix(self) -> nd::Array2<C64> {
        let o = C64::zero();
        let l = C64::one();
        let i = C64::i();
        match self {
            Self::X => nd::array![[o, l], [l, o]],
            Self::Y => nd::array![[o, -i], [i, o]],
            Self::Z => nd::array![[l, o], [o, -l]],
            Self::I => nd::array![[l, o], [o, l]],
        }
    }
}

/// Builds operators and states on the space of `N` ions with `D_e` electronic
/// levels each and `M` motional modes truncated to `D_F` Fock states each.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct OperatorAlgebra {
    ions: usize,
    levels: usize,
    modes: usize,
    fock: usize,
    edim: usize,
    dim: usize,
}

impl OperatorAlgebra {
    /// Create a new `OperatorAlgebra`.
    ///
    /// Requires at least one ion with at least two levels, at most one mode
    /// per ion, and at least two Fock states if there are any modes.
    pub fn new(ions: usize, levels: usize, modes: usize, fock: usize)
        -> RamanResult<Self>
    {
        if ions == 0 {
            return Err(RamanError::InvalidSpace(
                "at least one ion is required".into()));
        }
        if levels < 2 {
            return Err(RamanError::InvalidSpace(format!(
                "electronic dimension must be at least 2; got {}", levels)));
        }
        if modes > ions {
            return Err(RamanError::InvalidSpace(format!(
                "{} mode(s) exceeds the number of ions ({})", modes, ions)));
        }
        if modes > 0 && fock < 2 {
            return Err(RamanError::InvalidSpace(format!(
                "Fock dimension must be at least 2; got {}", fock)));
        }
        let too_large = || RamanError::InvalidSpace(format!(
            "{} ion(s) x {} level(s) with {} mode(s) x {} Fock state(s) \
            overflows the space dimension",
            ions, levels, modes, fock));
        let edim
            = u32::try_from(ions).ok()
            .and_then(|n| levels.checked_pow(n))
            .ok_or_else(too_large)?;
        let dim
            = u32::try_from(modes).ok()
            .and_then(|m| fock.checked_pow(m))
            .and_then(|mdim| edim.checked_mul(mdim))
            .ok_or_else(too_large)?;
        Ok(Self { ions, levels, modes, fock, edim, dim })
    }

    /// Return the number of ions.
    pub fn num_ions(&self) -> usize { self.ions }

    /// Return the electronic dimension of each ion.
    pub fn num_levels(&self) -> usize { self.levels }

    /// Return the number of motional modes.
    pub fn num_modes(&self) -> usize { self.modes }

    /// Return the Fock space truncation of each mode.
    pub fn fock_dim(&self) -> usize { self.fock }

    /// Return the dimension of the full space.
    pub fn dim(&self) -> usize { self.dim }

    /// Return the dimension of the electronic part of the space.
    pub fn electronic_dim(&self) -> usize { self.edim }

    // tensor `op` into the slot of ion `ion` (1-based) or mode `mode`
    // (1-based), with identities elsewhere
    fn embed(
        &self,
        ion: Option<(usize, &nd::Array2<C64>)>,
        mode: Option<(usize, &nd::Array2<C64>)>,
    ) -> nd::Array2<C64>
    {
        let ion_ops
            = (1..=self.ions)
            .map(|k| match ion {
                Some((i, op)) if i == k => op.clone(),
                _ => eye(self.levels),
            });
        let mode_ops
            = (1..=self.modes)
            .map(|k| match mode {
                Some((m, op)) if m == k => op.clone(),
                _ => eye(self.fock),
            });
        tensor(ion_ops.chain(mode_ops))
    }

    /// Identity on the full space.
    pub fn identity(&self) -> nd::Array2<C64> { eye(self.dim()) }

    /// Annihilation operator of the `mode`-th motional mode.
    pub fn annihilate(&self, mode: usize) -> RamanResult<nd::Array2<C64>> {
        RamanError::check_mode(mode, self.modes)?;
        Ok(self.embed(None, Some((mode, &destroy(self.fock)))))
    }

    /// Creation operator of the `mode`-th motional mode.
    pub fn create(&self, mode: usize) -> RamanResult<nd::Array2<C64>> {
        RamanError::check_mode(mode, self.modes)?;
        Ok(self.embed(None, Some((mode, &create(self.fock)))))
    }

    /// Electronic lowering operator `Σ_n √n |n - 1><n|` of the `ion`-th ion.
    pub fn lowering(&self, ion: usize) -> RamanResult<nd::Array2<C64>> {
        RamanError::check_ion(ion, self.ions)?;
        Ok(self.embed(Some((ion, &destroy(self.levels))), None))
    }

    /// Electronic raising operator of the `ion`-th ion.
    pub fn raising(&self, ion: usize) -> RamanResult<nd::Array2<C64>> {
        RamanError::check_ion(ion, self.ions)?;
        Ok(self.embed(Some((ion, &create(self.levels))), None))
    }

    /// Pauli operator on the `ion`-th ion.
    ///
    /// The X, Y, and Z operators act on the two lowest electronic levels and
    /// are zero on all others; [`PauliAxis::I`] is the identity on the whole
    /// electronic slot.
    pub fn pauli(&self, axis: PauliAxis, ion: usize)
        -> RamanResult<nd::Array2<C64>>
    {
        RamanError::check_ion(ion, self.ions)?;
        let op
            = if axis == PauliAxis::I {
                eye(self.levels)
            } else {
                let mut op: nd::Array2<C64>
                    = nd::Array2::zeros((self.levels, self.levels));
                op.slice_mut(nd::s![..2, ..2]).assign(&axis.matrix());
                op
            };
        Ok(self.embed(Some((ion, &op)), None))
    }

    fn check_states(&self, what: &'static str, states: &[usize], dim: usize)
        -> RamanResult<()>
    {
        states.iter().try_for_each(|s| RamanError::check_state(*s, dim))
            .and_then(|_| RamanError::check_len(what, self.ions, states.len()))
    }

    /// Electronic transition operator `|state1><state2|` with identity on all
    /// motional slots.
    ///
    /// A `None` at position `k` in either list places the identity on the
    /// `k`-th ion instead.
    pub fn coupling(&self, state1: &[Option<usize>], state2: &[Option<usize>])
        -> RamanResult<nd::Array2<C64>>
    {
        RamanError::check_len("coupling bra states", self.ions, state1.len())?;
        RamanError::check_len("coupling ket states", self.ions, state2.len())?;
        state1.iter().chain(state2).flatten()
            .try_for_each(|s| RamanError::check_state(*s, self.levels))?;
        let ion_ops: Vec<nd::Array2<C64>>
            = state1.iter().zip(state2)
            .map(|(s1, s2)| match (s1, s2) {
                (Some(i), Some(j))
                    => outer_prod(&basis(self.levels, *i), &basis(self.levels, *j)),
                _ => eye(self.levels),
            })
            .collect();
        let mode_ops = (0..self.modes).map(|_| eye(self.fock));
        Ok(tensor(ion_ops.into_iter().chain(mode_ops)))
    }

    /// Basis state from per-ion electronic levels and per-mode Fock numbers.
    pub fn ket(&self, electronic: &[usize], motional: &[usize])
        -> RamanResult<nd::Array1<C64>>
    {
        self.check_states("ket electronic states", electronic, self.levels)?;
        motional.iter()
            .try_for_each(|n| RamanError::check_state(*n, self.fock))?;
        RamanError::check_len("ket motional states", self.modes, motional.len())?;
        let vecs
            = electronic.iter().map(|e| basis(self.levels, *e))
            .chain(motional.iter().map(|n| basis(self.fock, *n)));
        Ok(tensor_vec(vecs))
    }

    /// Density matrix of the basis state given by [`Self::ket`].
    pub fn density_pure(&self, electronic: &[usize], motional: &[usize])
        -> RamanResult<nd::Array2<C64>>
    {
        let psi = self.ket(electronic, motional)?;
        Ok(outer_prod(&psi, &psi))
    }

    /// Projector onto an electronic basis state, with identity on all
    /// motional slots.
    pub fn projection(&self, electronic: &[usize])
        -> RamanResult<nd::Array2<C64>>
    {
        self.check_states("projection states", electronic, self.levels)?;
        let state: Vec<Option<usize>>
            = electronic.iter().copied().map(Some).collect();
        self.coupling(&state, &state)
    }

    fn electronic_projectors<'a>(&'a self, electronic: &'a [usize])
        -> impl Iterator<Item = nd::Array2<C64>> + 'a
    {
        electronic.iter()
            .map(|e| {
                let v = basis(self.levels, *e);
                outer_prod(&v, &v)
            })
    }

    /// Electronic basis state tensored with a thermal state of mean phonon
    /// number `nbar` in every mode.
    pub fn thermal_density(&self, nbar: f64, electronic: &[usize])
        -> RamanResult<nd::Array2<C64>>
    {
        self.check_states("thermal electronic states", electronic, self.levels)?;
        if !(0.0..self.fock as f64).contains(&nbar) {
            return Err(RamanError::InvalidPhononNumber { nbar, dim: self.fock });
        }
        let mode_ops = (0..self.modes).map(|_| thermal_fock(self.fock, nbar));
        Ok(tensor(self.electronic_projectors(electronic).chain(mode_ops)))
    }

    /// Electronic basis state tensored with a coherent state in each mode.
    pub fn coherent_density(&self, alphas: &[C64], electronic: &[usize])
        -> RamanResult<nd::Array2<C64>>
    {
        self.check_states("coherent electronic states", electronic, self.levels)?;
        RamanError::check_len("coherent amplitudes", self.modes, alphas.len())?;
        let mode_ops
            = alphas.iter()
            .map(|alpha| {
                let v = coherent_fock(self.fock, *alpha);
                outer_prod(&v, &v)
            });
        Ok(tensor(self.electronic_projectors(electronic).chain(mode_ops)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: &nd::Array2<C64>, b: &nd::Array2<C64>) -> bool {
        a.dim() == b.dim()
            && a.iter().zip(b).all(|(x, y)| (x - y).norm() < 1e-12)
    }

    fn trace(a: &nd::Array2<C64>) -> C64 { a.diag().sum() }

    #[test]
    fn space_validation() {
        assert!(OperatorAlgebra::new(0, 4, 0, 2).is_err());
        assert!(OperatorAlgebra::new(1, 1, 0, 2).is_err());
        assert!(OperatorAlgebra::new(1, 2, 2, 3).is_err());
        assert!(matches!(
            OperatorAlgebra::new(2, 2, 1, 1),
            Err(RamanError::InvalidSpace(_))
        ));
        let op = OperatorAlgebra::new(2, 4, 1, 5).unwrap();
        assert_eq!(op.dim(), 80);
        assert_eq!(op.electronic_dim(), 16);
        assert!(matches!(
            OperatorAlgebra::new(64, 2, 0, 0),
            Err(RamanError::InvalidSpace(_))
        ));
        assert!(matches!(
            OperatorAlgebra::new(2, 1 << 20, 2, 1 << 20),
            Err(RamanError::InvalidSpace(_))
        ));
    }

    #[test]
    fn ladder_operators() {
        let op = OperatorAlgebra::new(2, 3, 2, 4).unwrap();
        for m in 1..=2 {
            let a = op.annihilate(m).unwrap();
            let ad = op.create(m).unwrap();
            assert!(close(&ad, &dagger(&a)));
        }
        assert!(close(&op.identity(), &eye(9 * 16)));
        assert!(matches!(
            op.annihilate(3),
            Err(RamanError::InvalidModeIndex { index: 3, count: 2 })
        ));
        assert!(op.create(0).is_err());
        assert!(matches!(
            op.raising(3),
            Err(RamanError::InvalidIonIndex { index: 3, count: 2 })
        ));
        // [a, a†] = 1 below the truncation edge
        let a = destroy(4);
        let comm = a.dot(&create(4)) - create(4).dot(&a);
        for k in 0..3 {
            assert!((comm[[k, k]] - C64::one()).norm() < 1e-12);
        }
    }

    #[test]
    fn sentinel_coupling_is_identity() {
        let op = OperatorAlgebra::new(2, 4, 1, 3).unwrap();
        let all = [None, None];
        assert!(close(&op.coupling(&all, &all).unwrap(), &op.identity()));
        let partial = op.coupling(&[Some(1), None], &[None, Some(2)]).unwrap();
        assert!(close(&partial, &op.identity()));
        assert!(matches!(
            op.coupling(&[Some(0)], &[Some(0), None]),
            Err(RamanError::DimensionMismatch { .. })
        ));
        assert!(matches!(
            op.coupling(&[Some(4), None], &[Some(0), None]),
            Err(RamanError::InvalidStateIndex { index: 4, dim: 4 })
        ));
        // out-of-range levels are rejected even opposite a sentinel
        assert!(matches!(
            op.coupling(&[Some(99), None], &[None, None]),
            Err(RamanError::InvalidStateIndex { index: 99, dim: 4 })
        ));
        assert!(matches!(
            op.coupling(&[None, None], &[None, Some(7)]),
            Err(RamanError::InvalidStateIndex { index: 7, dim: 4 })
        ));
    }

    #[test]
    fn coupling_maps_basis_states() {
        let op = OperatorAlgebra::new(2, 4, 1, 3).unwrap();
        let flip = op.coupling(&[Some(2), None], &[Some(0), None]).unwrap();
        let psi0 = op.ket(&[0, 3], &[1]).unwrap();
        let psi1 = op.ket(&[2, 3], &[1]).unwrap();
        let out = flip.dot(&psi0);
        assert!(out.iter().zip(&psi1).all(|(a, b)| (a - b).norm() < 1e-12));
        assert!(flip.dot(&psi1).iter().all(|a| a.norm() < 1e-12));
    }

    #[test]
    fn no_modes() {
        let op = OperatorAlgebra::new(2, 2, 0, 0).unwrap();
        assert_eq!(op.dim(), 4);
        assert!(matches!(
            op.annihilate(1),
            Err(RamanError::InvalidModeIndex { index: 1, count: 0 })
        ));
        assert!(op.create(1).is_err());
        let sm = op.lowering(1).unwrap();
        let sp = op.raising(1).unwrap();
        assert!(close(&sp, &dagger(&sm)));
        let z = op.pauli(PauliAxis::Z, 2).unwrap();
        assert!(close(&z, &tensor([eye(2), PauliAxis::Z.matrix()])));
        assert!(close(&op.pauli(PauliAxis::I, 1).unwrap(), &op.identity()));
        assert!(op.ket(&[0, 1], &[]).is_ok());
    }

    #[test]
    fn pauli_on_multilevel() {
        let op = OperatorAlgebra::new(1, 4, 0, 0).unwrap();
        let x = op.pauli(PauliAxis::X, 1).unwrap();
        assert_eq!(x[[0, 1]], C64::one());
        assert_eq!(x[[1, 0]], C64::one());
        assert_eq!(x[[2, 2]], C64::zero());
        assert_eq!(x[[3, 3]], C64::zero());
        let y = op.pauli(PauliAxis::Y, 1).unwrap();
        assert!(close(&y, &dagger(&y)));
    }

    #[test]
    fn mixed_states() {
        let op = OperatorAlgebra::new(2, 4, 2, 6).unwrap();
        let rho = op.thermal_density(0.5, &[0, 1]).unwrap();
        assert!((trace(&rho) - C64::one()).norm() < 1e-12);
        assert!(close(&rho, &dagger(&rho)));
        let vac = op.thermal_density(0.0, &[0, 1]).unwrap();
        assert!(close(&vac, &op.density_pure(&[0, 1], &[0, 0]).unwrap()));
        assert!(matches!(
            op.thermal_density(6.0, &[0, 0]),
            Err(RamanError::InvalidPhononNumber { .. })
        ));
        assert!(op.thermal_density(-0.1, &[0, 0]).is_err());

        let alphas = [C64::new(0.5, 0.2), C64::zero()];
        let coh = op.coherent_density(&alphas, &[1, 1]).unwrap();
        assert!((trace(&coh) - C64::one()).norm() < 1e-12);
        // pure: Tr(ρ²) = 1
        assert!((trace(&coh.dot(&coh)) - C64::one()).norm() < 1e-10);
        assert!(op.coherent_density(&alphas[..1], &[1, 1]).is_err());
    }

    #[test]
    fn projection_is_idempotent() {
        let op = OperatorAlgebra::new(2, 3, 1, 3).unwrap();
        let p = op.projection(&[1, 2]).unwrap();
        assert!(close(&p.dot(&p), &p));
        assert!((trace(&p) - C64::from(3.0)).norm() < 1e-12);
        assert!(op.projection(&[1]).is_err());
    }
}
