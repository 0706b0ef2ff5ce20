//! Relaxation constraints: classify the atoms of a supercell against a
//! spherical region and turn the result into the per-atom data consumed by
//! a structural relaxation, where fixed atoms have their force components
//! zeroed and their weight reduced.

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

use crate::{Error, Structure};

mod sphere;
pub use self::sphere::{SphereParameters, SphereClassification};

/// Everything a relaxation input needs to know about one atom: its species,
/// its fractional position, and the mask multiplying the force acting on it
/// (1 leaves a component free, 0 zeroes it).
#[derive(Debug, Clone, PartialEq)]
#[derive(serde::Deserialize, serde::Serialize, schemars::JsonSchema)]
pub struct ConstraintRecord {
    /// Element symbol of the atom
    pub species: String,
    /// Fractional position of the atom
    pub position: [f64; 3],
    /// Force mask of the atom, applied component-wise
    pub mask: [i32; 3],
}

/// Relaxation constraints for a whole supercell, derived from a
/// [`SphereClassification`].
///
/// Free atoms keep a mask of `[1, 1, 1]` and their canonical mass; fixed
/// atoms get a mask of `[0, 0, 0]` and their mass halved. The mass
/// adjustment is applied to a copy owned by the constraints, the canonical
/// structure is never modified.
#[derive(Debug, Clone)]
pub struct Constraints {
    /// Force mask, `n_atoms x 3` of 0/1 values
    force_mask: Array2<i32>,
    /// Adjusted atomic masses, halved for fixed atoms
    masses: Array1<f64>,
    /// Combined species/position/mask records, one per atom
    records: Vec<ConstraintRecord>,
}

impl Constraints {
    /// Build the relaxation constraints of `structure` from a
    /// `classification` of its atoms.
    ///
    /// This fails with [`Error::Precondition`] when the classification does
    /// not describe the same number of atoms as the structure.
    pub fn new(
        structure: &Structure,
        classification: &SphereClassification,
    ) -> Result<Constraints, Error> {
        if classification.len() != structure.size() {
            return Err(Error::Precondition(format!(
                "the classification describes {} atoms, but the structure contains {}",
                classification.len(), structure.size()
            )));
        }

        let n_atoms = structure.size();
        let mut force_mask = Array2::ones((n_atoms, 3));
        let mut masses = structure.masses().to_owned();
        for atom in 0..n_atoms {
            if !classification.is_free(atom) {
                force_mask.row_mut(atom).fill(0);
                masses[atom] /= 2.0;
            }
        }

        let mut records = Vec::with_capacity(n_atoms);
        for (atom, symbol) in structure.species().iter().enumerate() {
            let position = structure.fractional();
            records.push(ConstraintRecord {
                species: symbol.clone(),
                position: [
                    position[[atom, 0]],
                    position[[atom, 1]],
                    position[[atom, 2]],
                ],
                mask: [
                    force_mask[[atom, 0]],
                    force_mask[[atom, 1]],
                    force_mask[[atom, 2]],
                ],
            });
        }

        return Ok(Constraints {
            force_mask: force_mask,
            masses: masses,
            records: records,
        });
    }

    /// Get the number of atoms these constraints apply to
    pub fn len(&self) -> usize {
        self.masses.len()
    }

    /// Check if there are no atoms in these constraints
    pub fn is_empty(&self) -> bool {
        self.masses.is_empty()
    }

    /// Get the force mask as a `n_atoms x 3` array of 0/1 values, where 0
    /// zeroes the corresponding force component during relaxation
    pub fn force_mask(&self) -> ArrayView2<'_, i32> {
        self.force_mask.view()
    }

    /// Get the adjusted atomic masses: the canonical mass for free atoms,
    /// half of it for fixed atoms
    pub fn masses(&self) -> ArrayView1<'_, f64> {
        self.masses.view()
    }

    /// Get the combined species/position/mask records, one per atom, in the
    /// order of the canonical structure
    pub fn records(&self) -> &[ConstraintRecord] {
        &self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PeriodicImages;
    use crate::systems::test_utils::test_structure;
    use ndarray::array;

    fn classify(structure: &Structure, center: [f64; 3], radius: f64) -> SphereClassification {
        let mut images = PeriodicImages::new(structure);
        let parameters = SphereParameters { center: center, radius: radius };
        return SphereClassification::compute(&mut images, &parameters).unwrap();
    }

    #[test]
    fn all_fixed() {
        let structure = test_structure("CsCl");
        let classification = classify(&structure, [0.0, 0.0, 0.0], 0.0);
        let constraints = Constraints::new(&structure, &classification).unwrap();

        assert_eq!(constraints.len(), 2);
        assert_eq!(constraints.force_mask(), array![[0, 0, 0], [0, 0, 0]]);
        assert_eq!(constraints.masses(), array![132.91 / 2.0, 35.45 / 2.0]);

        // the canonical structure keeps its masses
        assert_eq!(structure.masses(), array![132.91, 35.45]);
    }

    #[test]
    fn mixed_free_and_fixed() {
        // radius 1 around the origin only contains Cs
        let structure = test_structure("CsCl");
        let classification = classify(&structure, [0.0, 0.0, 0.0], 1.0);
        let constraints = Constraints::new(&structure, &classification).unwrap();

        assert_eq!(constraints.force_mask(), array![[1, 1, 1], [0, 0, 0]]);
        assert_eq!(constraints.masses(), array![132.91, 35.45 / 2.0]);

        assert_eq!(constraints.records(), [
            ConstraintRecord {
                species: "Cs".into(),
                position: [0.0, 0.0, 0.0],
                mask: [1, 1, 1],
            },
            ConstraintRecord {
                species: "Cl".into(),
                position: [0.5, 0.5, 0.5],
                mask: [0, 0, 0],
            },
        ]);
    }

    #[test]
    fn mismatched_classification() {
        let structure = test_structure("CsCl");
        let classification = classify(&structure, [0.0, 0.0, 0.0], 1.0);

        let other = test_structure("xenon");
        let error = Constraints::new(&other, &classification).unwrap_err();
        assert!(matches!(error, Error::Precondition(_)));
        assert_eq!(
            error.to_string(),
            "precondition not satisfied: the classification describes 2 atoms, \
            but the structure contains 1"
        );
    }
}
