//! Time-dependent Hamiltonians expressed as sums of constant operators with
//! oscillating scalar coefficients.

use ndarray as nd;
use num_complex::Complex64 as C64;
use crate::error::{ RamanError, RamanResult };

pub mod single;
pub use single::SingleQubitBuilder;

pub mod phonon;
pub use phonon::PhononBuilder;

/// Terms whose amplitude falls below this magnitude are dropped.
pub const AMPLITUDE_CUTOFF: f64 = 1e-15;

/// Basic requirements for any Hamiltonian builder.
pub trait HBuild {
    /// Return the dimension of the space the Hamiltonian acts on.
    fn dim(&self) -> usize;

    /// Build the Hamiltonian matrix at a given time.
    fn build_at(&self, t: f64) -> nd::Array2<C64>;

    /// Build the Hamiltonian array, with time as the last axis.
    fn build(&self, time: &nd::Array1<f64>) -> nd::Array3<C64> {
        let n = self.dim();
        let mut H: nd::Array3<C64> = nd::Array3::zeros((n, n, time.len()));
        H.axis_iter_mut(nd::Axis(2))
            .zip(time)
            .for_each(|(mut Ht, t)| { Ht.assign(&self.build_at(*t)); });
        H
    }
}

/// Pure oscillation `t ↦ exp(i (ω t + φ))`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Oscillator {
    /// Angular frequency `ω`.
    pub frequency: f64,
    /// Phase offset `φ`.
    pub phase: f64,
}

impl Oscillator {
    pub fn new(frequency: f64, phase: f64) -> Self { Self { frequency, phase } }

    /// A constant, unit coefficient.
    pub fn constant() -> Self { Self::new(0.0, 0.0) }

    /// Evaluate at time `t`.
    pub fn at(&self, t: f64) -> C64 {
        C64::cis(self.frequency * t + self.phase)
    }

    /// Return the complex conjugate oscillation.
    pub fn conj(&self) -> Self { Self::new(-self.frequency, -self.phase) }
}

/// A single term `amplitude * osc(t) * op`.
#[derive(Clone, Debug, PartialEq)]
pub struct HamiltonianTerm {
    pub op: nd::Array2<C64>,
    pub amplitude: C64,
    pub osc: Oscillator,
}

impl HamiltonianTerm {
    /// Return the scalar coefficient at time `t`.
    pub fn coeff_at(&self, t: f64) -> C64 { self.amplitude * self.osc.at(t) }

    /// Return the Hermitian conjugate term.
    pub fn dagger(&self) -> Self {
        Self {
            op: self.op.t().mapv(|a| a.conj()),
            amplitude: self.amplitude.conj(),
            osc: self.osc.conj(),
        }
    }
}

/// Ordered list of [`HamiltonianTerm`]s on a space of fixed dimension, whose
/// sum is the Hamiltonian.
#[derive(Clone, Debug, PartialEq)]
pub struct HamiltonianTermList {
    dim: usize,
    terms: Vec<HamiltonianTerm>,
}

impl HamiltonianTermList {
    /// Create a new, empty list for operators of dimension `dim`.
    pub fn new(dim: usize) -> Self { Self { dim, terms: Vec::new() } }

    /// Append a single term.
    ///
    /// Returns `Ok(false)` without appending if `|amplitude|` is below
    /// [`AMPLITUDE_CUTOFF`].
    pub fn push(&mut self, op: nd::Array2<C64>, amplitude: C64, osc: Oscillator)
        -> RamanResult<bool>
    {
        let (r, c) = op.dim();
        RamanError::check_len("term operator rows", self.dim, r)?;
        RamanError::check_len("term operator columns", self.dim, c)?;
        if amplitude.norm() < AMPLITUDE_CUTOFF { return Ok(false); }
        self.terms.push(HamiltonianTerm { op, amplitude, osc });
        Ok(true)
    }

    /// Append a term and its Hermitian conjugate.
    pub fn push_hermitian(
        &mut self,
        op: nd::Array2<C64>,
        amplitude: C64,
        osc: Oscillator,
    ) -> RamanResult<bool>
    {
        let (r, c) = op.dim();
        RamanError::check_len("term operator rows", self.dim, r)?;
        RamanError::check_len("term operator columns", self.dim, c)?;
        if amplitude.norm() < AMPLITUDE_CUTOFF { return Ok(false); }
        let term = HamiltonianTerm { op, amplitude, osc };
        let herm = term.dagger();
        self.terms.push(term);
        self.terms.push(herm);
        Ok(true)
    }

    /// Return the number of terms.
    pub fn len(&self) -> usize { self.terms.len() }

    /// Return `true` if there are no terms.
    pub fn is_empty(&self) -> bool { self.terms.is_empty() }

    /// Return an iterator over all terms.
    pub fn iter(&self) -> std::slice::Iter<'_, HamiltonianTerm> {
        self.terms.iter()
    }

    /// Return `true` if the total Hamiltonian at time `t` is Hermitian to
    /// within absolute tolerance `tol`.
    pub fn is_hermitian_at(&self, t: f64, tol: f64) -> bool {
        let H = self.build_at(t);
        H.indexed_iter()
            .all(|((i, j), a)| (a - H[[j, i]].conj()).norm() <= tol)
    }
}

impl<'a> IntoIterator for &'a HamiltonianTermList {
    type Item = &'a HamiltonianTerm;
    type IntoIter = std::slice::Iter<'a, HamiltonianTerm>;

    fn into_iter(self) -> Self::IntoIter { self.terms.iter() }
}

impl HBuild for HamiltonianTermList {
    fn dim(&self) -> usize { self.dim }

    fn build_at(&self, t: f64) -> nd::Array2<C64> {
        let mut H: nd::Array2<C64> = nd::Array2::zeros((self.dim, self.dim));
        self.terms.iter()
            .for_each(|term| { H.scaled_add(term.coeff_at(t), &term.op); });
        H
    }
}
