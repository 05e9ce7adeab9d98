//! Atomic level structure: the intermediate (excited) levels that are
//! adiabatically eliminated, and the ground sublevels the effective dynamics
//! act on.

use std::ops::Deref;
use indexmap::IndexMap;
use crate::{
    error::{ RamanError, RamanResult },
    spin::{ Spin, SpinTotal },
};

/// A single intermediate level.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IntermediateLevel {
    /// Angular momentum state.
    pub spin: Spin,
    /// Reduced dipole matrix element.
    pub dipole: f64,
    /// Signed single-photon detuning from the level; never zero.
    pub detuning: f64,
}

/// Ordered table of [`IntermediateLevel`]s.
///
/// Immutable once constructed.
#[derive(Clone, Debug, PartialEq)]
pub struct AtomicLevelTable {
    levels: Vec<IntermediateLevel>,
}

impl AtomicLevelTable {
    /// Create a new table, checking that no level has zero detuning.
    pub fn new<I>(levels: I) -> RamanResult<Self>
    where I: IntoIterator<Item = IntermediateLevel>
    {
        let levels: Vec<IntermediateLevel> = levels.into_iter().collect();
        if let Some(k) = levels.iter().position(|lev| lev.detuning == 0.0) {
            return Err(RamanError::ZeroDetuning(k));
        }
        Ok(Self { levels })
    }

    /// Create a new table from parallel columns of quantum numbers, dipole
    /// elements, and detunings.
    pub fn from_columns(f: &[f64], m: &[f64], dipole: &[f64], detuning: &[f64])
        -> RamanResult<Self>
    {
        let n = f.len();
        if m.len() != n || dipole.len() != n || detuning.len() != n {
            return Err(RamanError::LevelTableLength {
                f: n,
                m: m.len(),
                dipole: dipole.len(),
                detuning: detuning.len(),
            });
        }
        let levels: Vec<IntermediateLevel>
            = f.iter().zip(m).zip(dipole).zip(detuning)
            .map(|(((&f, &m), &dipole), &detuning)| {
                Spin::from_f64(f, m)
                    .map(|spin| IntermediateLevel { spin, dipole, detuning })
            })
            .collect::<RamanResult<_>>()?;
        Self::new(levels)
    }

    /// Return the number of levels.
    pub fn len(&self) -> usize { self.levels.len() }

    /// Return `true` if there are no levels.
    pub fn is_empty(&self) -> bool { self.levels.is_empty() }

    /// Return an iterator over all levels.
    pub fn iter(&self) -> std::slice::Iter<'_, IntermediateLevel> {
        self.levels.iter()
    }

    /// Get a particular level by index.
    pub fn get(&self, index: usize) -> Option<&IntermediateLevel> {
        self.levels.get(index)
    }
}

impl<'a> IntoIterator for &'a AtomicLevelTable {
    type Item = &'a IntermediateLevel;
    type IntoIter = std::slice::Iter<'a, IntermediateLevel>;

    fn into_iter(self) -> Self::IntoIter { self.levels.iter() }
}

/// Ordered collection of ground sublevels with static energy offsets.
///
/// Index 0 is the carrier level (addressed by the pump field) and one
/// designated sublevel is the reference against which two-photon detunings are
/// measured. Backed by an [`IndexMap`], accessible via [`Deref`].
#[derive(Clone, Debug, PartialEq)]
pub struct GroundLevelSet {
    energies: IndexMap<Spin, f64>,
    reference: usize,
}

impl Deref for GroundLevelSet {
    type Target = IndexMap<Spin, f64>;

    fn deref(&self) -> &Self::Target { &self.energies }
}

impl GroundLevelSet {
    /// Create a new set from `(state, energy)` pairs and the index of the
    /// reference sublevel.
    ///
    /// Each state may appear only once.
    pub fn new<I>(levels: I, reference: usize) -> RamanResult<Self>
    where I: IntoIterator<Item = (Spin, f64)>
    {
        let levels: Vec<(Spin, f64)> = levels.into_iter().collect();
        let count = levels.len();
        let energies: IndexMap<Spin, f64> = levels.into_iter().collect();
        RamanError::check_len("distinct ground levels", count, energies.len())?;
        RamanError::check_level(reference, energies.len())?;
        Ok(Self { energies, reference })
    }

    /// Create a new set from parallel columns of quantum numbers and energies.
    pub fn from_columns(f: &[f64], m: &[f64], energy: &[f64], reference: usize)
        -> RamanResult<Self>
    {
        RamanError::check_len("ground level m column", f.len(), m.len())?;
        RamanError::check_len("ground level energy column", f.len(), energy.len())?;
        let levels: Vec<(Spin, f64)>
            = f.iter().zip(m).zip(energy)
            .map(|((&f, &m), &e)| Spin::from_f64(f, m).map(|s| (s, e)))
            .collect::<RamanResult<_>>()?;
        Self::new(levels, reference)
    }

    /// Get the state at a particular index.
    pub fn get_spin(&self, index: usize) -> RamanResult<Spin> {
        self.energies.get_index(index)
            .map(|(s, _)| *s)
            .ok_or(RamanError::InvalidLevelIndex {
                index, count: self.energies.len() })
    }

    /// Get the energy of the state at a particular index.
    pub fn get_energy_index(&self, index: usize) -> Option<f64> {
        self.energies.get_index(index).map(|(_, e)| *e)
    }

    /// Return the index of the reference sublevel.
    pub fn reference(&self) -> usize { self.reference }

    /// Return the energy of the reference sublevel.
    pub fn reference_energy(&self) -> f64 {
        self.energies[self.reference]
    }

    /// Return the carrier (pump-addressed) state.
    pub fn carrier(&self) -> Option<Spin> {
        self.energies.get_index(0).map(|(s, _)| *s)
    }

    /// Return an iterator over all states, in order.
    pub fn spins(&self) -> impl Iterator<Item = Spin> + '_ {
        self.energies.keys().copied()
    }
}

/// Dipole element shared by the `F = 0` and `F = 1` manifolds of ytterbium-171's
/// `6s6p ³P₁` level.
const YB171_DIPOLE_LOW: f64 = 3.49;

/// Dipole element of the `F = 2` manifold.
const YB171_DIPOLE_HIGH: f64 = 4.66;

/// Hyperfine splitting of the ground `F = 1` manifold above `F = 0`.
pub const YB171_GROUND_SPLITTING: f64 = 12640.0;

/// Ground sublevels of ytterbium-171: `|0, 0>`, then `|1, -1>`, `|1, 0>`,
/// `|1, 1>`, with `|1, 0>` as the reference.
pub fn yb171_ground() -> GroundLevelSet {
    let carrier = (SpinTotal::integer(0), 0.0);
    let upper = (SpinTotal::integer(1), YB171_GROUND_SPLITTING);
    let energies: IndexMap<Spin, f64>
        = [carrier, upper].into_iter()
        .flat_map(|(tot, e)| tot.projections().map(move |s| (s, e)))
        .collect();
    GroundLevelSet { energies, reference: 2 }
}

/// Intermediate levels of ytterbium-171 used for the Raman transitions: the
/// four `F = 0, 1` states detuned by `-33e6` and the five `F = 2` states plus
/// the three `F = 1` partners detuned by `66e6`.
pub fn yb171_intermediate() -> AtomicLevelTable {
    let lower
        = [SpinTotal::integer(0), SpinTotal::integer(1)].into_iter()
        .flat_map(SpinTotal::projections)
        .map(|spin| IntermediateLevel {
            spin,
            dipole: YB171_DIPOLE_LOW,
            detuning: -33e6,
        });
    let upper
        = [SpinTotal::integer(1), SpinTotal::integer(2)].into_iter()
        .flat_map(SpinTotal::projections)
        .map(|spin| IntermediateLevel {
            spin,
            dipole: YB171_DIPOLE_HIGH,
            detuning: 66e6,
        });
    AtomicLevelTable { levels: lower.chain(upper).collect() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yb171_tables() {
        let ground = yb171_ground();
        assert_eq!(ground.len(), 4);
        assert_eq!(ground.reference(), 2);
        assert_eq!(ground.carrier(), Spin::integer(0, 0));
        assert_eq!(ground.get_spin(3).unwrap(), Spin::integer(1, 1).unwrap());
        assert_eq!(ground.reference_energy(), YB171_GROUND_SPLITTING);

        let inter = yb171_intermediate();
        assert_eq!(inter.len(), 12);
        let f: Vec<f64> = inter.iter().map(|lev| lev.spin.total().f()).collect();
        assert_eq!(f, vec![0., 1., 1., 1., 1., 1., 1., 2., 2., 2., 2., 2.]);
        let m: Vec<f64> = inter.iter().map(|lev| lev.spin.proj().f()).collect();
        assert_eq!(m, vec![0., -1., 0., 1., -1., 0., 1., -2., -1., 0., 1., 2.]);
        assert!(inter.iter().take(4).all(|lev| lev.detuning == -33e6));
        assert!(inter.iter().skip(4).all(|lev| lev.dipole == 4.66));
    }

    #[test]
    fn column_validation() {
        assert!(matches!(
            AtomicLevelTable::from_columns(&[0.0, 1.0], &[0.0], &[1.0, 1.0], &[1.0, 1.0]),
            Err(RamanError::LevelTableLength { f: 2, m: 1, .. })
        ));
        assert!(matches!(
            AtomicLevelTable::from_columns(&[1.0], &[0.0], &[1.0], &[0.0]),
            Err(RamanError::ZeroDetuning(0))
        ));
        assert!(matches!(
            AtomicLevelTable::from_columns(&[1.0], &[2.0], &[1.0], &[1.0]),
            Err(RamanError::InvalidQuantumNumbers { .. })
        ));
        let table
            = AtomicLevelTable::from_columns(&[0.5], &[-0.5], &[2.0], &[-1.0])
            .unwrap();
        assert_eq!(table.get(0).unwrap().spin, Spin::new(1, -1).unwrap());
    }

    #[test]
    fn ground_validation() {
        assert!(matches!(
            GroundLevelSet::from_columns(&[0.0, 1.0], &[0.0, 0.0], &[0.0, 1.0], 2),
            Err(RamanError::InvalidLevelIndex { index: 2, count: 2 })
        ));
        assert!(matches!(
            GroundLevelSet::from_columns(&[0.0, 1.0], &[0.0], &[0.0, 1.0], 0),
            Err(RamanError::DimensionMismatch { .. })
        ));
        // repeated (F, m) rows
        assert!(matches!(
            GroundLevelSet::from_columns(
                &[1.0, 1.0, 1.0], &[0.0, 0.0, 1.0], &[0.0, 5.0, 1.0], 0),
            Err(RamanError::DimensionMismatch { expected: 3, got: 2, .. })
        ));
        let ground = yb171_ground();
        assert!(ground.get_spin(4).is_err());
    }
}
