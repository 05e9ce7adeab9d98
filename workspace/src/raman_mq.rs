#![allow(non_snake_case)]

use std::path::PathBuf;
use ndarray as nd;
use raman_sim::{ rabi, Experiment, PhononBuilder };
use tracing::info;
use lib::{
    mkdir,
    write_npz,
    ion_populations,
    mean_phonons,
    systems::yb171,
};

fn main() -> anyhow::Result<()> {
    lib::init_logging("info");

    let expm: Experiment
        = match std::env::args().nth(1) {
            Some(path) => Experiment::load(path)?,
            None => yb171::gate(5),
        };
    let (levels, ground) = expm.levels()?;
    let builder = PhononBuilder::new(&expm, &levels, &ground)?;
    let algebra = *builder.algebra();
    let H = builder.terms()?;
    info!(dim = builder.dim(), terms = H.len(), "built phonon Hamiltonian");

    let time = expm.time_grid();
    let psi0 = builder.initial_state()?;
    let reduced: Vec<(nd::Array2<f64>, nd::Array1<f64>)>
        = rabi::evolve_reduced(&psi0, &H, &time, |psi| {
            (ion_populations(psi, &algebra), mean_phonons(psi, &algebra))
        })?;

    // time goes last
    let nt = time.len();
    let mut pop: nd::Array3<f64>
        = nd::Array3::zeros((algebra.num_ions(), algebra.num_levels(), nt));
    let mut nbar: nd::Array2<f64> = nd::Array2::zeros((algebra.num_modes(), nt));
    for (k, (pop_k, nbar_k)) in reduced.iter().enumerate() {
        pop.slice_mut(nd::s![.., .., k]).assign(pop_k);
        nbar.slice_mut(nd::s![.., k]).assign(nbar_k);
    }

    let outdir = PathBuf::from("output");
    mkdir!(outdir);
    write_npz!(
        outdir.join("raman_mq.npz"),
        arrays: {
            "time" => &time,
            "pop" => &pop,
            "nbar" => &nbar,
        }
    );

    info!("done");
    Ok(())
}
