#![allow(non_snake_case)]

use std::path::PathBuf;
use itertools::Itertools;
use ndarray as nd;
use raman_sim::{ rabi, SingleQubitBuilder };
use rayon::iter::{ IntoParallelIterator, ParallelIterator };
use tracing::info;
use lib::{ mkdir, write_npz, systems::yb171 };

const NPOINTS: usize = 64;

// minimum carrier population reached over the pulse, i.e. one minus the
// maximum transfer out of |0, 0>
fn min_carrier(detuning: f64) -> anyhow::Result<f64> {
    let expm = yb171::single_qubit(detuning);
    let (levels, ground) = expm.levels()?;
    let builder = SingleQubitBuilder::new(&expm, &levels, &ground)?;
    let H = builder.terms()?;
    let carrier
        = rabi::evolve_reduced(
            &builder.initial_state(), &H, &expm.time_grid(), |psi| psi[0].norm_sqr())?;
    Ok(carrier.into_iter().fold(f64::INFINITY, f64::min))
}

fn main() -> anyhow::Result<()> {
    lib::init_logging("info");

    let detunings: nd::Array1<f64> = nd::Array1::linspace(0.5, 6.0, NPOINTS);
    let min_pop: nd::Array1<f64>
        = detunings.to_vec()
        .into_par_iter()
        .map(min_carrier)
        .collect::<anyhow::Result<Vec<f64>>>()?
        .into();
    let (k_best, best)
        = min_pop.iter().copied().enumerate()
        .min_by(|l, r| l.1.total_cmp(&r.1))
        .ok_or_else(|| anyhow::anyhow!("empty sweep"))?;
    info!(
        detuning = detunings[k_best],
        min_carrier = best,
        "best transfer"
    );
    info!(
        "sweep: {}",
        detunings.iter().zip(&min_pop)
            .map(|(d, p)| format!("{:.3}:{:.3}", d, p))
            .join(" ")
    );

    let outdir = PathBuf::from("output");
    mkdir!(outdir);
    write_npz!(
        outdir.join("raman_sweep.npz"),
        arrays: {
            "detuning" => &detunings,
            "min_carrier" => &min_pop,
        }
    );

    info!("done");
    Ok(())
}
