//! Closed-form Clebsch-Gordan coefficients for rank-1 spherical tensor (i.e.
//! electric dipole) transitions.
//!
//! The coefficients here follow a fixed table of nine closed forms, one for
//! each combination of `F1 - F2 ∈ {+1, 0, -1}` and tensor component
//! `q ∈ {+1, 0, -1}`. Relative to the textbook coefficient `<F2, m2; 1, q | F1,
//! m1>`, six of the nine entries carry an additional factor `1 / sqrt(2 F1 +
//! 1)`; only the `(+1, +1)`, `(+1, 0)`, and `(0, +1)` entries are bare. Coupling
//! strengths computed downstream are calibrated against this table, so it is
//! reproduced as-is. See [`crate::spin::cg`] for the textbook values.

use crate::spin::Spin;

/// Names a spherical component of a rank-1 tensor operator, i.e. a specific
/// electric dipole transition.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Transition {
    SigmaMinus,
    Pi,
    SigmaPlus,
}

impl Transition {
    /// All components, in order of ascending `q`.
    pub const ALL: [Self; 3] = [Self::SigmaMinus, Self::Pi, Self::SigmaPlus];

    /// Convert to an equivalent Δm value, quantified as a number of halves.
    ///
    /// See also [`Spin::halves`].
    pub fn to_spin_halves(&self) -> i32 {
        match *self {
            Self::SigmaMinus => -2,
            Self::Pi => 0,
            Self::SigmaPlus => 2,
        }
    }

    /// Return the spherical tensor index `q`.
    pub fn q(&self) -> i32 { self.to_spin_halves() / 2 }

    /// Return the photon spin state `|1, q>` associated with the component.
    pub fn photon(&self) -> Spin {
        Spin::new(2, self.to_spin_halves())
            .expect("Transition::photon: |q| <= 1 is always valid")
    }
}

/// Compute the coefficient `<F1, m1 | 1, q; F2, m2>` coupling `state2 = |F2,
/// m2>` to `state1 = |F1, m1>` through tensor component `q`.
///
/// Neither state is assumed to lie above the other: the dipole elements in
/// [`crate::field`] pass the ground sublevel as `state1` and the intermediate
/// level as `state2`.
///
/// Returns zero for two spinless states, for `|F1 - F2| > 1`, for `m1 != m2 +
/// q`, and for half-integer differences in total spin. Since [`Spin`]s are
/// validated on construction, the `F2 = 0` singularities of the `F1 = F2` and
/// `F1 = F2 - 1` forms cannot be reached: `F1 = F2 = 0` is caught by the first
/// rule, and `F1 = F2 - 1` requires `F2 >= 1`.
pub fn coefficient(state1: Spin, state2: Spin, q: Transition) -> f64 {
    use Transition::*;
    let (tf1, tm1) = state1.halves();
    let (tf2, tm2) = state2.halves();
    if tf1 == 0 && tf2 == 0 { return 0.0; }
    let df = i64::from(tf1) - i64::from(tf2);
    if df.abs() > 2 { return 0.0; }
    if tm1 != tm2 + q.to_spin_halves() { return 0.0; }

    let (f1, m1) = state1.f();
    let (f2, _) = state2.f();
    let norm = (2.0 * f1 + 1.0).sqrt();
    match (df, q) {
        (2, SigmaPlus) =>
            ((f2 + m1) * (f2 + m1 + 1.0)
                / ((2.0 * f2 + 1.0) * (2.0 * f2 + 2.0))).sqrt(),
        (2, Pi) =>
            ((f2 - m1 + 1.0) * (f2 + m1 + 1.0)
                / ((2.0 * f2 + 1.0) * (f2 + 1.0))).sqrt(),
        (2, SigmaMinus) =>
            ((f2 - m1) * (f2 - m1 + 1.0)
                / ((2.0 * f2 + 1.0) * (2.0 * f2 + 2.0))).sqrt() / norm,
        (0, SigmaPlus) =>
            -((f2 + m1) * (f2 - m1 + 1.0)
                / (2.0 * f2 * (f2 + 1.0))).sqrt(),
        (0, Pi) =>
            m1 / (f2 * (f2 + 1.0)).sqrt() / norm,
        (0, SigmaMinus) =>
            ((f2 - m1) * (f2 + m1 + 1.0)
                / (2.0 * f2 * (f2 + 1.0))).sqrt() / norm,
        (-2, SigmaPlus) =>
            ((f2 - m1) * (f2 - m1 + 1.0)
                / (2.0 * f2 * (2.0 * f2 + 1.0))).sqrt() / norm,
        (-2, Pi) =>
            -((f2 - m1) * (f2 + m1)
                / (f2 * (2.0 * f2 + 1.0))).sqrt() / norm,
        (-2, SigmaMinus) =>
            ((f2 + m1) * (f2 + m1 + 1.0)
                / (2.0 * f2 * (2.0 * f2 + 1.0))).sqrt() / norm,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spin::{ cg, SpinTotal };

    fn s(f: u32, m: i32) -> Spin { Spin::integer(f, m).unwrap() }

    #[test]
    fn tabulated_values() {
        assert!((coefficient(s(1, 1), s(0, 0), Transition::SigmaPlus) - 1.0).abs() < 1e-15);
        assert_eq!(coefficient(s(1, 0), s(1, 0), Transition::Pi), 0.0);
        // <1,0|1,0;0,0> = 1 before the extra normalization
        assert!(
            (coefficient(s(1, 0), s(0, 0), Transition::Pi) - 1.0).abs() < 1e-15);
    }

    #[test]
    fn selection_rules() {
        assert_eq!(coefficient(s(0, 0), s(0, 0), Transition::Pi), 0.0);
        assert_eq!(coefficient(s(2, 0), s(0, 0), Transition::Pi), 0.0);
        assert_eq!(coefficient(s(1, 1), s(1, 1), Transition::SigmaPlus), 0.0);
        assert_eq!(coefficient(s(1, 0), s(1, -1), Transition::Pi), 0.0);
        let half = Spin::new(1, 1).unwrap();
        assert_eq!(coefficient(half, s(1, 0), Transition::SigmaPlus), 0.0);
    }

    #[test]
    fn agrees_with_wigner_symbols() {
        let bare = |df: i64, q: Transition| {
            matches!(
                (df, q),
                (2, Transition::SigmaPlus)
                | (2, Transition::Pi)
                | (0, Transition::SigmaPlus)
            )
        };
        for f1 in 0..=3_u32 {
            for f2 in 0..=3_u32 {
                if (f1 as i64 - f2 as i64).abs() > 1 || f1 + f2 == 0 {
                    continue;
                }
                let df = 2 * (f1 as i64 - f2 as i64);
                let norm = (2.0 * f64::from(f1) + 1.0).sqrt();
                for s1 in SpinTotal::integer(f1).projections() {
                    for s2 in SpinTotal::integer(f2).projections() {
                        for q in Transition::ALL {
                            let c = coefficient(s1, s2, q);
                            if s1.proj().halves()
                                != s2.proj().halves() + q.to_spin_halves()
                            {
                                assert_eq!(c, 0.0);
                                continue;
                            }
                            let expected = cg(s2, q.photon(), s1);
                            let expected
                                = if bare(df, q) { expected }
                                else { expected / norm };
                            assert!(
                                (c - expected).abs() < 1e-12,
                                "F1 = {}, F2 = {}, {:?}: {} != {}",
                                f1, f2, q, c, expected,
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn half_integer_spins() {
        let s1 = Spin::new(3, 1).unwrap();
        let s2 = Spin::new(1, -1).unwrap();
        let expected = cg(s2, Transition::SigmaPlus.photon(), s1);
        let c = coefficient(s1, s2, Transition::SigmaPlus);
        assert!((c - expected).abs() < 1e-12);
    }
}
