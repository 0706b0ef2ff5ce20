use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

use crate::elements;
use crate::Error;

mod cell;
pub use self::cell::{UnitCell, CellShape};

#[cfg(test)]
pub(crate) mod test_utils;

/// A `Structure` is the canonical description of a periodic supercell: the
/// species of the atoms, the unit cell, the atomic positions and the atomic
/// masses.
///
/// Positions are stored both in fractional coordinates (as given) and in
/// cartesian coordinates (derived through the cell at construction). The
/// fields are only set at construction, so the two coordinate sets can
/// never get out of sync.
#[derive(Debug, Clone, PartialEq)]
pub struct Structure {
    /// Element symbol for each atom
    species: Vec<String>,
    /// The periodic cell
    cell: UnitCell,
    /// Fractional atomic positions, `n_atoms x 3`
    fractional: Array2<f64>,
    /// Cartesian atomic positions, `n_atoms x 3`, derived from `fractional`
    cartesian: Array2<f64>,
    /// Atomic mass of each atom
    masses: Array1<f64>,
}

impl Structure {
    /// Create a new `Structure` from the species, cell and fractional
    /// positions of its atoms, taking the mass of each atom from the
    /// built-in table.
    ///
    /// This fails with [`Error::UnknownElement`] if one of the species is
    /// not in the table (use [`Structure::with_masses`] to provide masses
    /// for such species), and with [`Error::DimensionMismatch`] if the
    /// arrays do not agree on the number of atoms.
    pub fn new(species: Vec<String>, cell: UnitCell, fractional: Array2<f64>) -> Result<Structure, Error> {
        let masses = species.iter()
            .map(|symbol| elements::atomic_mass(symbol))
            .collect::<Result<Vec<f64>, Error>>()?;
        return Structure::with_masses(species, cell, fractional, Array1::from(masses));
    }

    /// Create a new `Structure` with an explicit mass for each atom,
    /// bypassing the built-in mass table entirely.
    pub fn with_masses(
        species: Vec<String>,
        cell: UnitCell,
        fractional: Array2<f64>,
        masses: Array1<f64>,
    ) -> Result<Structure, Error> {
        if fractional.ncols() != 3 {
            return Err(Error::DimensionMismatch(format!(
                "expected 3 columns in the fractional positions array, got {}",
                fractional.ncols()
            )));
        }

        if species.len() != fractional.nrows() {
            return Err(Error::DimensionMismatch(format!(
                "got {} species for {} atomic positions",
                species.len(), fractional.nrows()
            )));
        }

        if masses.len() != species.len() {
            return Err(Error::DimensionMismatch(format!(
                "got {} masses for {} atoms",
                masses.len(), species.len()
            )));
        }

        let cartesian = cell.cartesian_all(fractional.view());
        return Ok(Structure {
            species: species,
            cell: cell,
            fractional: fractional,
            cartesian: cartesian,
            masses: masses,
        });
    }

    /// Get the number of atoms in this structure
    pub fn size(&self) -> usize {
        self.species.len()
    }

    /// Get the element symbols, one for each atom
    pub fn species(&self) -> &[String] {
        &self.species
    }

    /// Get the unit cell of this structure
    pub fn cell(&self) -> &UnitCell {
        &self.cell
    }

    /// Get the fractional atomic positions, one row per atom
    pub fn fractional(&self) -> ArrayView2<'_, f64> {
        self.fractional.view()
    }

    /// Get the cartesian atomic positions, one row per atom
    pub fn cartesian(&self) -> ArrayView2<'_, f64> {
        self.cartesian.view()
    }

    /// Get the atomic masses, one for each atom
    pub fn masses(&self) -> ArrayView1<'_, f64> {
        self.masses.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn masses_from_table() {
        let species = vec!["Cs".to_string(), "Cl".to_string()];
        let positions = array![[0.0, 0.0, 0.0], [0.5, 0.5, 0.5]];
        let structure = Structure::new(species, UnitCell::cubic(4.0), positions).unwrap();

        assert_eq!(structure.size(), 2);
        assert_eq!(structure.species(), ["Cs", "Cl"]);
        assert_eq!(structure.masses()[0], 132.91);
        assert_eq!(structure.masses()[1], 35.45);
    }

    #[test]
    fn cartesian_positions() {
        let species = vec!["C".to_string()];
        let positions = array![[0.5, 0.25, 0.75]];
        let structure = Structure::new(species, UnitCell::orthorhombic(2.0, 4.0, 8.0), positions).unwrap();

        assert_eq!(structure.cartesian(), array![[1.0, 1.0, 6.0]]);
        assert_eq!(structure.fractional(), array![[0.5, 0.25, 0.75]]);
    }

    #[test]
    fn unknown_species() {
        let species = vec!["C".to_string(), "Xx".to_string()];
        let positions = array![[0.0, 0.0, 0.0], [0.5, 0.5, 0.5]];
        let error = Structure::new(species, UnitCell::cubic(4.0), positions).unwrap_err();
        assert!(matches!(error, Error::UnknownElement(_)));

        // the same species work when masses are given explicitly
        let species = vec!["C".to_string(), "Xx".to_string()];
        let positions = array![[0.0, 0.0, 0.0], [0.5, 0.5, 0.5]];
        let structure = Structure::with_masses(
            species, UnitCell::cubic(4.0), positions, array![12.011, 42.0],
        ).unwrap();
        assert_eq!(structure.masses()[1], 42.0);
    }

    #[test]
    fn dimension_mismatches() {
        let positions = array![[0.0, 0.0, 0.0], [0.5, 0.5, 0.5]];
        let error = Structure::new(
            vec!["C".to_string()], UnitCell::cubic(4.0), positions,
        ).unwrap_err();
        assert!(matches!(error, Error::DimensionMismatch(_)));

        let positions = array![[0.0, 0.0], [0.5, 0.5]];
        let error = Structure::new(
            vec!["C".to_string(), "C".to_string()], UnitCell::cubic(4.0), positions,
        ).unwrap_err();
        assert!(matches!(error, Error::DimensionMismatch(_)));

        let positions = array![[0.0, 0.0, 0.0], [0.5, 0.5, 0.5]];
        let error = Structure::with_masses(
            vec!["C".to_string(), "C".to_string()], UnitCell::cubic(4.0), positions,
            array![12.011],
        ).unwrap_err();
        assert!(matches!(error, Error::DimensionMismatch(_)));
    }
}
