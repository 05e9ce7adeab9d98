//! Multi-ion Raman Hamiltonian with coupling to shared motional modes.

use ndarray as nd;
use num_complex::Complex64 as C64;
use tracing::{ debug, warn };
use crate::{
    config::Experiment,
    coupling::{ GroundCoupling, RamanCouplings },
    error::{ RamanError, RamanResult },
    hamiltonian::{ HamiltonianTermList, Oscillator },
    levels::{ AtomicLevelTable, GroundLevelSet },
    operators::OperatorAlgebra,
};

/// Builds the interaction-picture Hamiltonian of an ion chain whose ground
/// sublevels are driven by a pump and one or more Stokes tones, with each
/// transition dressed by the motional sidebands of every mode.
///
/// Every ion sees the same couplings. For ion `k`, tone `c`, and sublevel `i >
/// 0`, the carrier term of [`SingleQubitBuilder`][super::SingleQubitBuilder]
/// acts on ion `k` alone, and for each mode the blue and red sideband terms
/// ```text
/// Ω_c,i |i><0|_k ⊗ (i η a†) exp(i ((δ_c,i + ν) t + φ_c)) + h.c.
/// Ω_c,i |i><0|_k ⊗ (i η a)  exp(i ((δ_c,i - ν) t + φ_c)) + h.c.
/// ```
/// are added alongside the single-ion Raman terms between sublevels.
#[derive(Clone, Debug)]
pub struct PhononBuilder {
    algebra: OperatorAlgebra,
    couplings: RamanCouplings,
    lamb_dicke: Vec<f64>,
    mode_freqs: Vec<f64>,
}

impl PhononBuilder {
    /// Compute all couplings for an experiment and set up the joint space of
    /// `expm.ions` ions and `expm.modes` modes.
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
            warn!("rejecting phonon build: experiment is not bichromatic");
            return Err(RamanError::NotBichromatic);
        }
        expm.validate()?;
        let algebra = OperatorAlgebra::new(
            expm.ions, ground.len(), expm.modes, expm.fock_dim)?;
        let gc = GroundCoupling::new(levels, ground);
        let couplings = RamanCouplings::compute(
            &gc,
            &expm.pump_field(),
            &expm.stokes_fields(),
            &expm.detunings,
            &expm.phases(),
        )?;
        Ok(Self {
            algebra,
            couplings,
            lamb_dicke: expm.lamb_dicke.clone(),
            mode_freqs: expm.mode_freqs.clone(),
        })
    }

    /// Return the operator algebra of the joint space.
    pub fn algebra(&self) -> &OperatorAlgebra { &self.algebra }

    /// Return the computed couplings.
    pub fn couplings(&self) -> &RamanCouplings { &self.couplings }

    /// Return the dimension of the joint space.
    pub fn dim(&self) -> usize { self.algebra.dim() }

    /// Return the motional factors `(op, frequency)` of the `mode`-th mode:
    /// the identity at zero frequency, `i η a†` at `+ν`, and `i η a` at `-ν`.
    pub fn motional_factors(&self, mode: usize)
        -> RamanResult<[(nd::Array2<C64>, f64); 3]>
    {
        let a = self.algebra.annihilate(mode)?;
        let ad = self.algebra.create(mode)?;
        let ieta = C64::i() * self.lamb_dicke[mode - 1];
        let nu = self.mode_freqs[mode - 1];
        Ok([
            (self.algebra.identity(), 0.0),
            (ad * ieta, nu),
            (a * ieta, -nu),
        ])
    }

    fn ion_transition(&self, ion: usize, i: usize, j: usize)
        -> RamanResult<nd::Array2<C64>>
    {
        let n = self.algebra.num_ions();
        let state1: Vec<Option<usize>>
            = (1..=n).map(|k| (k == ion).then_some(i)).collect();
        let state2: Vec<Option<usize>>
            = (1..=n).map(|k| (k == ion).then_some(j)).collect();
        self.algebra.coupling(&state1, &state2)
    }

    /// Assemble the Hamiltonian.
    pub fn terms(&self) -> RamanResult<HamiltonianTermList> {
        let rc = &self.couplings;
        let nlevels = rc.num_levels();
        let ntones = rc.num_tones();
        let sidebands: Vec<(nd::Array2<C64>, f64)>
            = (1..=self.algebra.num_modes())
            .map(|m| self.motional_factors(m))
            .collect::<RamanResult<Vec<_>>>()?
            .into_iter()
            .flat_map(|[_, blue, red]| [blue, red])
            .collect();

        let mut H = HamiltonianTermList::new(self.dim());
        for ion in 1..=self.algebra.num_ions() {
            for i in 1..nlevels {
                let up = self.ion_transition(ion, i, 0)?;
                for c in 0..ntones {
                    let omega = rc.carrier[[c, i]];
                    let delta = rc.detunings[[c, i]];
                    let phase = rc.phases[c];
                    H.push_hermitian(
                        up.clone(), omega, Oscillator::new(delta, phase))?;
                    for (factor, nu) in sidebands.iter() {
                        H.push_hermitian(
                            up.dot(factor),
                            omega,
                            Oscillator::new(delta + nu, phase),
                        )?;
                    }
                }
            }
            for i in 1..nlevels {
                for j in (1..nlevels).filter(|j| *j != i) {
                    let flip = self.ion_transition(ion, i, j)?;
                    for c1 in 0..ntones {
                        for c2 in 0..ntones {
                            H.push(
                                flip.clone(),
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
        }
        debug!(dim = self.dim(), terms = H.len(), "assembled phonon Hamiltonian");
        Ok(H)
    }

    /// Return the initial state: every ion in the carrier level and every mode
    /// in vacuum.
    pub fn initial_state(&self) -> RamanResult<nd::Array1<C64>> {
        self.algebra.ket(
            &vec![0; self.algebra.num_ions()],
            &vec![0; self.algebra.num_modes()],
        )
    }
}
