//! Collection of all error types.
//!
//! All errors derive [`thiserror::Error`], making them composable when allowed
//! and compatible with application code using [`anyhow`][anyhow].
//!
//! [anyhow]: https://crates.io/crates/anyhow

use thiserror::Error;

/// Returned from all fallible operations in this crate.
#[derive(Debug, Error)]
pub enum RamanError {
    /// Returned when a `(F, m)` pair does not describe a valid angular
    /// momentum state.
    #[error("invalid quantum numbers: F = {f}, m = {m}")]
    InvalidQuantumNumbers { f: f64, m: f64 },

    /// Returned when a motional mode number falls outside `1..=count`.
    #[error("mode number {index} out of range for {count} motional mode(s)")]
    InvalidModeIndex { index: usize, count: usize },

    /// Returned when an ion number falls outside `1..=count`.
    #[error("ion number {index} out of range for {count} ion(s)")]
    InvalidIonIndex { index: usize, count: usize },

    /// Returned when a ground level index falls outside `0..count`.
    #[error("ground level index {index} out of range for {count} level(s)")]
    InvalidLevelIndex { index: usize, count: usize },

    /// Returned when a single-slot basis state index falls outside `0..dim`.
    #[error("basis state index {index} out of range for dimension {dim}")]
    InvalidStateIndex { index: usize, dim: usize },

    /// Returned when a list of per-slot data has the wrong length.
    #[error("{what}: expected length {expected}, got {got}")]
    DimensionMismatch { what: &'static str, expected: usize, got: usize },

    /// Returned when an operator space is constructed with unsupported
    /// dimensions.
    #[error("invalid operator space: {0}")]
    InvalidSpace(String),

    /// Returned when a thermal state is requested with a mean phonon number
    /// that cannot be represented in the truncated Fock space.
    #[error("mean phonon number must be non-negative and less than {dim}; got {nbar}")]
    InvalidPhononNumber { nbar: f64, dim: usize },

    /// Returned when the columns of an intermediate level table have unequal
    /// lengths.
    #[error("level table columns have unequal lengths: F {f}, m {m}, dipole {dipole}, detuning {detuning}")]
    LevelTableLength { f: usize, m: usize, dipole: usize, detuning: usize },

    /// Returned when an intermediate level has zero detuning.
    #[error("intermediate level {0} has zero detuning")]
    ZeroDetuning(usize),

    /// Returned when a Hamiltonian is requested for an experiment that does not
    /// use a bichromatic drive.
    #[error("experiment is not configured for a bichromatic drive")]
    NotBichromatic,

    /// Returned when an experiment configuration holds an out-of-range value.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// [`toml::de::Error`]
    #[error("config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// [`std::io::Error`]
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand for results carrying a [`RamanError`].
pub type RamanResult<T> = Result<T, RamanError>;

impl RamanError {
    pub(crate) fn check_mode(index: usize, count: usize) -> RamanResult<()> {
        (1..=count).contains(&index).then_some(())
            .ok_or(Self::InvalidModeIndex { index, count })
    }

    pub(crate) fn check_ion(index: usize, count: usize) -> RamanResult<()> {
        (1..=count).contains(&index).then_some(())
            .ok_or(Self::InvalidIonIndex { index, count })
    }

    pub(crate) fn check_level(index: usize, count: usize) -> RamanResult<()> {
        (index < count).then_some(())
            .ok_or(Self::InvalidLevelIndex { index, count })
    }

    pub(crate) fn check_state(index: usize, dim: usize) -> RamanResult<()> {
        (index < dim).then_some(())
            .ok_or(Self::InvalidStateIndex { index, dim })
    }

    pub(crate) fn check_len(what: &'static str, expected: usize, got: usize)
        -> RamanResult<()>
    {
        (expected == got).then_some(())
            .ok_or(Self::DimensionMismatch { what, expected, got })
    }
}
