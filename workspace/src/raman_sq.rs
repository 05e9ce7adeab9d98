#![allow(non_snake_case)]

use std::path::PathBuf;
use raman_sim::{ rabi, Experiment, SingleQubitBuilder };
use tracing::info;
use lib::{ mkdir, write_npz, systems::yb171 };

fn main() -> anyhow::Result<()> {
    lib::init_logging("info");

    let expm: Experiment
        = match std::env::args().nth(1) {
            Some(path) => Experiment::load(path)?,
            None => yb171::single_qubit(yb171::TONE_DETUNING),
        };
    let (levels, ground) = expm.levels()?;
    let builder = SingleQubitBuilder::new(&expm, &levels, &ground)?;
    let H = builder.terms()?;
    info!(terms = H.len(), "built single-qubit Hamiltonian");

    let time = expm.time_grid();
    let psi = rabi::evolve(&builder.initial_state(), &H, &time)?;
    let pop = rabi::populations(&psi);

    let outdir = PathBuf::from("output");
    mkdir!(outdir);
    write_npz!(
        outdir.join("raman_sq.npz"),
        arrays: {
            "time" => &time,
            "pop" => &pop,
            "stark" => &builder.couplings().stark,
            "detunings" => &builder.couplings().detunings,
        }
    );

    info!("done");
    Ok(())
}
