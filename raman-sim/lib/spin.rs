//! Definitions for angular momentum quantum numbers and related quantities.

use wigner_symbols::ClebschGordan;
use crate::error::{ RamanError, RamanResult };

/// A single spin-projection quantum number.
///
/// This type is backed by a single `i32` representing the number of halves.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SpinProj(i32);

impl SpinProj {
    /// Create a new spin projection from a number of halves.
    pub fn new(m: i32) -> Self { Self(m) }

    /// Return `self` as a bare number of halves.
    pub fn halves(self) -> i32 { self.0 }

    /// Return `self` as an `f64`.
    ///
    /// This reflects the "true" value of the projection quantum number; i.e.
    /// there is a relative factor of 2 between this and [`Self::halves`].
    pub fn f(self) -> f64 { f64::from(self.0) / 2.0 }
}

/// A single total-spin quantum number.
///
/// This type is backed by a single `u32` representing the number of halves.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SpinTotal(u32);

impl SpinTotal {
    /// Create a new total spin from a number of halves.
    pub fn new(j: u32) -> Self { Self(j) }

    /// Create a new integer total spin.
    pub fn integer(f: u32) -> Self { Self(2 * f) }

    /// Return `self` as a bare number of halves.
    pub fn halves(self) -> u32 { self.0 }

    /// Return `self` as an `f64`.
    pub fn f(self) -> f64 { f64::from(self.0) / 2.0 }

    /// Return an iterator over all [`Spin`]s with this total, by ascending
    /// projection number.
    pub fn projections(self) -> impl Iterator<Item = Spin> {
        let j = self.0 as i32;
        (-j..=j).step_by(2).map(move |m| Spin(self, SpinProj(m)))
    }
}

/// A `(total, projection)` spin quantum number pair.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Spin(SpinTotal, SpinProj);

impl Spin {
    /// Create a new spin from numbers of halves if the given spin-projection
    /// number is valid for the given total-spin number.
    pub fn new(j: u32, m: i32) -> Option<Self> {
        let j_i64 = i64::from(j);
        let m_i64 = i64::from(m);
        (
            (-j_i64..=j_i64).contains(&m_i64)
            && (m_i64 - j_i64) % 2 == 0
        )
        .then_some(Self(SpinTotal(j), SpinProj(m)))
    }

    /// Create a new integer spin `|F, m>`.
    pub fn integer(f: u32, m: i32) -> Option<Self> {
        Self::new(f.checked_mul(2)?, m.checked_mul(2)?)
    }

    /// Create a new spin from real-valued quantum numbers, which must be
    /// integers or half-integers.
    pub fn from_f64(f: f64, m: f64) -> RamanResult<Self> {
        let bad = || RamanError::InvalidQuantumNumbers { f, m };
        let tf = 2.0 * f;
        let tm = 2.0 * m;
        if
            !tf.is_finite() || !tm.is_finite()
            || tf.fract() != 0.0 || tm.fract() != 0.0
            || tf < 0.0 || tf > f64::from(u32::MAX / 2)
            || tm.abs() > tf
        {
            return Err(bad());
        }
        Self::new(tf as u32, tm as i32).ok_or_else(bad)
    }

    /// Return the [total-spin][SpinTotal] quantum number.
    pub fn total(self) -> SpinTotal { self.0 }

    /// Return the [spin-projection][SpinProj] quantum number.
    pub fn proj(self) -> SpinProj { self.1 }

    /// Return `self` as a bare pair of halves.
    pub fn halves(self) -> (u32, i32) { (self.0.halves(), self.1.halves()) }

    /// Return `self` as a `(f64, f64)`.
    pub fn f(self) -> (f64, f64) { (self.0.f(), self.1.f()) }
}

impl From<Spin> for (f64, f64) {
    fn from(jm: Spin) -> Self { jm.f() }
}

/// Calculate the Clebsch-Gordan coefficient `<s1; s2 | s3>` for the angular
/// momentum addition `s1 + s2 = s3`.
pub fn cg(s1: Spin, s2: Spin, s3: Spin) -> f64 {
    ClebschGordan {
        tj1: s1.total().halves() as i32,
        tm1: s1.proj().halves(),
        tj2: s2.total().halves() as i32,
        tm2: s2.proj().halves(),
        tj12: s3.total().halves() as i32,
        tm12: s3.proj().halves(),
    }
    .value()
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spin_validation() {
        assert!(Spin::integer(1, -1).is_some());
        assert!(Spin::integer(1, 2).is_none());
        assert!(Spin::new(1, 1).is_some());
        assert!(Spin::new(1, 0).is_none());
        assert!(Spin::from_f64(0.5, -0.5).is_ok());
        assert!(matches!(
            Spin::from_f64(1.0, 0.5),
            Err(RamanError::InvalidQuantumNumbers { .. })
        ));
        assert!(Spin::from_f64(-1.0, 0.0).is_err());
        assert!(Spin::from_f64(0.3, 0.0).is_err());
    }

    #[test]
    fn projections_cover_all_states() {
        let ms: Vec<i32>
            = SpinTotal::integer(2).projections()
            .map(|s| s.proj().halves() / 2)
            .collect();
        assert_eq!(ms, vec![-2, -1, 0, 1, 2]);
        assert_eq!(SpinTotal::integer(0).projections().count(), 1);
    }

    #[test]
    fn cg_known_values() {
        let up = Spin::new(1, 1).unwrap();
        let dn = Spin::new(1, -1).unwrap();
        let triplet0 = Spin::integer(1, 0).unwrap();
        let singlet = Spin::integer(0, 0).unwrap();
        let r = std::f64::consts::FRAC_1_SQRT_2;
        assert!((cg(up, dn, triplet0) - r).abs() < 1e-12);
        assert!((cg(up, dn, singlet) - r).abs() < 1e-12);
        assert!((cg(dn, up, singlet) + r).abs() < 1e-12);
    }
}
