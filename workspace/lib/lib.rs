#![allow(non_snake_case)]

//! Shared helpers for the simulation programs.

use ndarray as nd;
use num_complex::Complex64 as C64;
use raman_sim::operators::OperatorAlgebra;
use tracing_subscriber::{ fmt, prelude::*, EnvFilter };

pub use ndarray_npy;

pub mod systems;

/// Create a directory and all its parents if they don't already exist,
/// propagating any error.
#[macro_export]
macro_rules! mkdir {
    ( $dir:expr ) => {
        std::fs::create_dir_all(&$dir)?
    }
}

/// Write a set of named arrays to a `.npz` archive, propagating any error.
///
/// ```ignore
/// write_npz!(
///     outdir.join("data.npz"),
///     arrays: {
///         "time" => &time,
///         "pop" => &pop,
///     }
/// );
/// ```
#[macro_export]
macro_rules! write_npz {
    (
        $filename:expr,
        arrays: { $( $name:expr => $array:expr ),+ $(,)? }
    ) => {
        {
            let mut npz = $crate::ndarray_npy::NpzWriter::new(
                std::fs::File::create($filename)?);
            $( npz.add_array($name, $array)?; )+
            npz.finish()?;
        }
    }
}

/// Install a formatting subscriber filtered by `RUST_LOG`, falling back to
/// `level`.
pub fn init_logging(level: &str) {
    let filter
        = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .init();
}

/// Return the `slot`-th digit of basis index `index` in the mixed-radix
/// decomposition over `dims`, the last slot varying fastest.
fn digit(index: usize, dims: &[usize], slot: usize) -> usize {
    let stride: usize = dims[slot + 1..].iter().product();
    (index / stride) % dims[slot]
}

fn slot_dims(algebra: &OperatorAlgebra) -> Vec<usize> {
    std::iter::repeat(algebra.num_levels()).take(algebra.num_ions())
        .chain(std::iter::repeat(algebra.fock_dim()).take(algebra.num_modes()))
        .collect()
}

/// Reduce a joint state to the level populations of each ion, as an array of
/// shape `(ions, levels)`.
pub fn ion_populations(psi: &nd::Array1<C64>, algebra: &OperatorAlgebra)
    -> nd::Array2<f64>
{
    let dims = slot_dims(algebra);
    let mut pop: nd::Array2<f64>
        = nd::Array2::zeros((algebra.num_ions(), algebra.num_levels()));
    for (idx, a) in psi.iter().enumerate() {
        let p = a.norm_sqr();
        for ion in 0..algebra.num_ions() {
            pop[[ion, digit(idx, &dims, ion)]] += p;
        }
    }
    pop
}

/// Reduce a joint state to the mean phonon number of each mode.
pub fn mean_phonons(psi: &nd::Array1<C64>, algebra: &OperatorAlgebra)
    -> nd::Array1<f64>
{
    let dims = slot_dims(algebra);
    let ions = algebra.num_ions();
    let mut nbar: nd::Array1<f64> = nd::Array1::zeros(algebra.num_modes());
    for (idx, a) in psi.iter().enumerate() {
        let p = a.norm_sqr();
        for mode in 0..algebra.num_modes() {
            nbar[mode] += p * digit(idx, &dims, ions + mode) as f64;
        }
    }
    nbar
}
