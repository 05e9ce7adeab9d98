//! Single-ion Raman Hamiltonian on the ground sublevels, without motion.

use ndarray as nd;
use num_complex::Complex64 as C64;
use tracing::{ debug, warn };
use crate::{
    config::Experiment,
    coupling::{ GroundCoupling, RamanCouplings },
    error::{ RamanError, RamanResult },
    hamiltonian::{ HamiltonianTermList, Oscillator },
    levels::{ AtomicLevelTable, GroundLevelSet },
    operators::{ basis, outer_prod },
};

/// Builds the interaction-picture Hamiltonian of a single ion driven by a pump
/// and one or more Stokes tones.
///
/// For each tone `c` and sublevel `i > 0` there is a carrier term
/// ```text
/// Ω_c,i |i><0| exp(i (δ_c,i t + φ_c)) + h.c.
/// ```
/// and for every pair of tones and every `i != j`, both `> 0`, a Raman term
/// ```text
/// Ω_c1c2,ij |i><j| exp(i ((δ_c1,i - δ_c2,j) t + φ_c2 - φ_c1))
/// ```
/// which together with its `(c2, c1, j, i)` partner is Hermitian.
#[derive(Clone, Debug)]
pub struct SingleQubitBuilder {
    couplings: RamanCouplings,
}

impl SingleQubitBuilder {
    /// Compute all couplings for an experiment.
    ///
    /// Fails with [`RamanError::NotBichromatic`] if the experiment is not
    /// configured for a bichromatic drive.
    pub fn new(
        expm: &Experiment,
        levels: &AtomicLevelTable,
        ground: &GroundLevelSet,
    ) -> RamanResult<Self>
    {
        if !expm.bichromatic {
            warn!("rejecting single-qubit build: experiment is not bichromatic");
            return Err(RamanError::NotBichromatic);
        }
        expm.validate()?;
        let gc = GroundCoupling::new(levels, ground);
        let couplings = RamanCouplings::compute(
            &gc,
            &expm.pump_field(),
            &expm.stokes_fields(),
            &expm.detunings,
            &expm.phases(),
        )?;
        Ok(Self { couplings })
    }

    /// Return the computed couplings.
    pub fn couplings(&self) -> &RamanCouplings { &self.couplings }

    /// Return the dimension of the space.
    pub fn dim(&self) -> usize { self.couplings.num_levels() }

    fn transition(&self, i: usize, j: usize) -> nd::Array2<C64> {
        let n = self.dim();
        outer_prod(&basis(n, i), &basis(n, j))
    }

    /// Assemble the Hamiltonian.
    pub fn terms(&self) -> RamanResult<HamiltonianTermList> {
        let rc = &self.couplings;
        let n = self.dim();
        let ntones = rc.num_tones();
        let mut H = HamiltonianTermList::new(n);
        for c in 0..ntones {
            for i in 1..n {
                H.push_hermitian(
                    self.transition(i, 0),
                    rc.carrier[[c, i]],
                    Oscillator::new(rc.detunings[[c, i]], rc.phases[c]),
                )?;
            }
        }
        for c1 in 0..ntones {
            for c2 in 0..ntones {
                for i in 1..n {
                    for j in (1..n).filter(|j| *j != i) {
                        H.push(
                            self.transition(i, j),
                            rc.cross[[c1, c2, i, j]],
                            Oscillator::new(
                                rc.detunings[[c1, i]] - rc.detunings[[c2, j]],
                                rc.phases[c2] - rc.phases[c1],
                            ),
                        )?;
                    }
                }
            }
        }
        debug!(dim = n, terms = H.len(), "assembled single-qubit Hamiltonian");
        Ok(H)
    }

    /// Return the initial state: all population in the carrier level.
    pub fn initial_state(&self) -> nd::Array1<C64> { basis(self.dim(), 0) }
}
