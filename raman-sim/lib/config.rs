//! Experiment parameters, loadable from TOML.
//!
//! A minimal single-qubit configuration looks like
//! ```toml
//! bichromatic = true
//! detunings = [-2.85, 2.85]
//! pump = [15000.0, 0.0, 0.0]
//! stokes = [[0.0, 15000.0, 0.0], [0.0, 15000.0, 0.0]]
//! time_max = 200.0
//! time_steps = 4000
//! ```
//! Motional modes are added with `modes`, `fock_dim`, `mode_freqs`, and
//! `lamb_dicke`. An optional `[atom]` table replaces the built-in ytterbium-171
//! level data.

use std::path::Path;
use ndarray as nd;
use serde::Deserialize;
use tracing::debug;
use crate::{
    error::{ RamanError, RamanResult },
    field::ElectricField,
    levels::{
        AtomicLevelTable,
        GroundLevelSet,
        yb171_ground,
        yb171_intermediate,
    },
};

fn default_fock_dim() -> usize { 20 }

fn default_ions() -> usize { 2 }

/// Level data overriding the built-in ytterbium-171 tables, as parallel
/// columns.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct AtomConfig {
    /// Intermediate level total angular momenta.
    pub f: Vec<f64>,
    /// Intermediate level projections.
    pub m: Vec<f64>,
    /// Intermediate level reduced dipole elements.
    pub dipole: Vec<f64>,
    /// Intermediate level detunings.
    pub detuning: Vec<f64>,
    /// Ground sublevel total angular momenta.
    pub ground_f: Vec<f64>,
    /// Ground sublevel projections.
    pub ground_m: Vec<f64>,
    /// Ground sublevel energies.
    pub ground_energy: Vec<f64>,
    /// Index of the ground sublevel anchoring two-photon detunings.
    pub reference: usize,
}

/// Parameters of a single Raman experiment.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Experiment {
    /// Whether the drive is bichromatic; builders reject `false`.
    pub bichromatic: bool,
    /// Number of ions in multi-qubit simulations.
    #[serde(default = "default_ions")]
    pub ions: usize,
    /// Number of motional modes.
    #[serde(default)]
    pub modes: usize,
    /// Fock space truncation of each mode.
    #[serde(default = "default_fock_dim")]
    pub fock_dim: usize,
    /// Frequency of each mode.
    #[serde(default)]
    pub mode_freqs: Vec<f64>,
    /// Nominal two-photon detuning of each tone.
    pub detunings: Vec<f64>,
    /// Real Cartesian pump field.
    pub pump: [f64; 3],
    /// Real Cartesian field of each Stokes tone.
    pub stokes: Vec<[f64; 3]>,
    /// Phase of each tone; all zero if omitted.
    #[serde(default)]
    pub phases: Vec<f64>,
    /// Lamb-Dicke parameter of each mode.
    #[serde(default)]
    pub lamb_dicke: Vec<f64>,
    /// Total evolution time.
    pub time_max: f64,
    /// Number of points in the time grid.
    pub time_steps: usize,
    #[serde(default)]
    pub atom: Option<AtomConfig>,
}

impl Experiment {
    /// Parse and [validate][Self::validate] a TOML string.
    pub fn from_toml_str(s: &str) -> RamanResult<Self> {
        let expm: Self = toml::from_str(s)?;
        expm.validate()?;
        Ok(expm)
    }

    /// Read, parse, and [validate][Self::validate] a TOML file.
    pub fn load<P>(path: P) -> RamanResult<Self>
    where P: AsRef<Path>
    {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading experiment");
        let s = std::fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    /// Check that all per-tone and per-mode lists have consistent lengths and
    /// that all scalar parameters are in range.
    pub fn validate(&self) -> RamanResult<()> {
        let ntones = self.stokes.len();
        if ntones == 0 {
            return Err(RamanError::InvalidConfig(
                "at least one Stokes tone is required".into()));
        }
        RamanError::check_len("tone detunings", ntones, self.detunings.len())?;
        if !self.phases.is_empty() {
            RamanError::check_len("tone phases", ntones, self.phases.len())?;
        }
        RamanError::check_len("mode frequencies", self.modes, self.mode_freqs.len())?;
        RamanError::check_len("Lamb-Dicke parameters", self.modes, self.lamb_dicke.len())?;
        if self.ions == 0 {
            return Err(RamanError::InvalidConfig("ions must be positive".into()));
        }
        if !self.time_max.is_finite() || self.time_max < 0.0 {
            return Err(RamanError::InvalidConfig(format!(
                "time_max must be finite and non-negative; got {}",
                self.time_max,
            )));
        }
        if self.time_steps == 0 {
            return Err(RamanError::InvalidConfig(
                "time_steps must be positive".into()));
        }
        Ok(())
    }

    /// Return the number of Stokes tones.
    pub fn num_tones(&self) -> usize { self.stokes.len() }

    /// Return the pump field.
    pub fn pump_field(&self) -> ElectricField { self.pump.into() }

    /// Return the field of each Stokes tone.
    pub fn stokes_fields(&self) -> Vec<ElectricField> {
        self.stokes.iter().copied().map(ElectricField::from).collect()
    }

    /// Return the phase of each tone, defaulting to zero.
    pub fn phases(&self) -> Vec<f64> {
        if self.phases.is_empty() {
            vec![0.0; self.stokes.len()]
        } else {
            self.phases.clone()
        }
    }

    /// Return the sideband frequencies `[0, ν, -ν]` of each mode.
    pub fn interaction_frequencies(&self) -> Vec<[f64; 3]> {
        self.mode_freqs.iter().map(|nu| [0.0, *nu, -*nu]).collect()
    }

    /// Return `time_steps` evenly spaced times from 0 to `time_max`.
    pub fn time_grid(&self) -> nd::Array1<f64> {
        nd::Array1::linspace(0.0, self.time_max, self.time_steps)
    }

    /// Return the intermediate and ground level data, either from the `[atom]`
    /// table or the built-in ytterbium-171 values.
    pub fn levels(&self) -> RamanResult<(AtomicLevelTable, GroundLevelSet)> {
        if let Some(atom) = &self.atom {
            let levels = AtomicLevelTable::from_columns(
                &atom.f, &atom.m, &atom.dipole, &atom.detuning)?;
            let ground = GroundLevelSet::from_columns(
                &atom.ground_f, &atom.ground_m, &atom.ground_energy,
                atom.reference,
            )?;
            Ok((levels, ground))
        } else {
            Ok((yb171_intermediate(), yb171_ground()))
        }
    }
}
