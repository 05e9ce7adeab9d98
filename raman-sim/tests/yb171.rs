#![allow(non_snake_case)]

use num_complex::Complex64 as C64;
use raman_sim::{
    coupling::GroundCoupling,
    field::ElectricField,
    rabi,
    Experiment,
    HBuild,
    PhononBuilder,
    SingleQubitBuilder,
};

const SINGLE: &str = r#"
    bichromatic = true
    detunings = [-2.85, 2.85]
    pump = [15000.0, 0.0, 0.0]
    stokes = [[0.0, 15000.0, 0.0], [0.0, 15000.0, 0.0]]
    phases = [0.0, 0.0]
    time_max = 2.0
    time_steps = 201
"#;

const GATE: &str = r#"
    bichromatic = true
    modes = 1
    fock_dim = 3
    mode_freqs = [3.0]
    detunings = [-2.85, 2.85]
    pump = [15000.0, 0.0, 0.0]
    stokes = [[0.0, 15000.0, 0.0], [0.0, 15000.0, 0.0]]
    lamb_dicke = [0.1]
    time_max = 0.5
    time_steps = 51
"#;

#[test]
fn pump_couplings() {
    let expm = Experiment::from_toml_str(SINGLE).unwrap();
    let (levels, ground) = expm.levels().unwrap();
    let gc = GroundCoupling::new(&levels, &ground);
    let ep = expm.pump_field();
    let stark = gc.effective_coupling(0, 0, &ep, &ep).unwrap();
    assert!(stark.re != 0.0);
    assert!(stark.im.abs() <= 1e-12 * stark.re.abs());
    let none = gc.effective_coupling(0, 1, &ep, &ElectricField::zero()).unwrap();
    assert_eq!(none, C64::new(0.0, 0.0));
}

#[test]
fn single_qubit_dynamics() {
    let expm = Experiment::from_toml_str(SINGLE).unwrap();
    let (levels, ground) = expm.levels().unwrap();
    let builder = SingleQubitBuilder::new(&expm, &levels, &ground).unwrap();
    let H = builder.terms().unwrap();
    assert_eq!(H.dim(), 4);
    let t = expm.time_grid();
    let psi = rabi::evolve(&builder.initial_state(), &H, &t).unwrap();
    assert_eq!(psi.dim(), (4, 201));
    let p = rabi::populations(&psi);
    for col in p.columns() {
        assert!((col.sum() - 1.0).abs() < 1e-10);
    }
    assert_eq!(p[[0, 0]], 1.0);
}

#[test]
fn phonon_dynamics() {
    let expm = Experiment::from_toml_str(GATE).unwrap();
    let (levels, ground) = expm.levels().unwrap();
    let builder = PhononBuilder::new(&expm, &levels, &ground).unwrap();
    let H = builder.terms().unwrap();
    assert_eq!(H.dim(), 4 * 4 * 3);
    let psi0 = builder.initial_state().unwrap();
    let t = expm.time_grid();
    let norms
        = rabi::evolve_reduced(&psi0, &H, &t, |psi| {
            psi.iter().map(|a| a.norm_sqr()).sum::<f64>()
        })
        .unwrap();
    assert_eq!(norms.len(), 51);
    assert!(norms.iter().all(|n| (n - 1.0).abs() < 1e-10));
}
