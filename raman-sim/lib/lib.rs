#![allow(non_snake_case)]

//! Effective Hamiltonians for trapped ions driven by bichromatic stimulated
//! Raman transitions.
//!
//! Two-photon couplings between ground sublevels are computed by adiabatically
//! eliminating a table of intermediate levels ([`coupling`]), then assembled
//! into time-dependent Hamiltonians on either a single ion ([`hamiltonian::single`])
//! or an ion chain coupled to shared motional modes ([`hamiltonian::phonon`]).
//! The resulting term lists can be integrated with [`rabi::evolve`].

pub mod error;
pub mod spin;
pub mod clebsch;
pub mod field;
pub mod levels;
pub mod coupling;
pub mod operators;
pub mod hamiltonian;
pub mod config;
pub mod rabi;

pub use error::{ RamanError, RamanResult };
pub use config::Experiment;
pub use hamiltonian::{ HBuild, HamiltonianTermList, PhononBuilder, SingleQubitBuilder };
