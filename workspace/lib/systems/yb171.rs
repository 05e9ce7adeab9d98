//! Bichromatic Raman experiments on ytterbium-171.

use raman_sim::Experiment;

/// Nominal detuning of each tone from the reference two-photon resonance.
pub const TONE_DETUNING: f64 = 2.85;

/// Pump and Stokes field amplitude.
pub const FIELD: f64 = 15000.0;

/// Frequency of the single motional mode.
pub const MODE_FREQ: f64 = 3.0;

/// Lamb-Dicke parameter of the single motional mode.
pub const LAMB_DICKE: f64 = 0.1;

/// x-polarized pump with two y-polarized Stokes tones at `±detuning`.
pub fn single_qubit(detuning: f64) -> Experiment {
    Experiment {
        bichromatic: true,
        ions: 1,
        modes: 0,
        fock_dim: 2,
        mode_freqs: Vec::new(),
        detunings: vec![-detuning, detuning],
        pump: [FIELD, 0.0, 0.0],
        stokes: vec![[0.0, FIELD, 0.0]; 2],
        phases: vec![0.0; 2],
        lamb_dicke: Vec::new(),
        time_max: 200.0,
        time_steps: 40000,
        atom: None,
    }
}

/// Two ions sharing a single motional mode, driven as in [`single_qubit`].
pub fn gate(fock_dim: usize) -> Experiment {
    Experiment {
        ions: 2,
        modes: 1,
        fock_dim,
        mode_freqs: vec![MODE_FREQ],
        lamb_dicke: vec![LAMB_DICKE],
        time_max: 50.0,
        time_steps: 10000,
        ..single_qubit(TONE_DETUNING)
    }
}
