//! Periodic replication of a supercell: the 3x3x3 set of nearest periodic
//! images used when classifying atoms against a spherical region, and the
//! independent M x M x M tiling used to lay out a larger piece of the
//! crystal.

use ndarray::{s, Array1, Array2, Array4, Array5};
use ndarray::{ArrayView1, ArrayView2, ArrayView4, ArrayViewMut4};

use crate::{Error, Structure, Vector3D};

/// The 27 nearest periodic images of a supercell, arranged as a 3x3x3 cube
/// of blocks.
///
/// The image with block index `(i, j, k)` is the canonical supercell
/// translated by `(i - 1) a + (j - 1) b + (k - 1) c`, where `a`, `b` and
/// `c` are the cell vectors. Block indices run over `{0, 1, 2}` on each
/// axis, so the central block `(1, 1, 1)` holds the canonical supercell
/// itself, untranslated.
///
/// Every image carries a copy of the canonical atomic masses. These copies
/// are independent per image: classifying the images against a spherical
/// region attenuates the mass of each out-of-sphere image atom in place,
/// while the canonical structure is left untouched.
#[derive(Debug, Clone)]
pub struct PeriodicImages {
    /// Element symbols of the canonical atoms, identical in every image
    species: Vec<String>,
    /// Cartesian positions of every image, `(3, 3, 3, n_atoms, 3)`
    cartesian: Array5<f64>,
    /// Fractional positions of every image, `(3, 3, 3, n_atoms, 3)`
    fractional: Array5<f64>,
    /// Atomic masses of every image, `(3, 3, 3, n_atoms)`
    masses: Array4<f64>,
}

impl PeriodicImages {
    /// Build the 27 periodic images of `structure`.
    ///
    /// Cartesian positions are translated by whole cell vectors, while the
    /// fractional positions of an image are the canonical ones shifted by
    /// the integer block offsets. The two descriptions stay consistent,
    /// and the central block reproduces the canonical structure exactly.
    #[time_graph::instrument(name = "PeriodicImages::new")]
    pub fn new(structure: &Structure) -> PeriodicImages {
        let n_atoms = structure.size();
        let [a, b, c] = structure.cell().vectors();

        let mut cartesian = Array5::zeros((3, 3, 3, n_atoms, 3));
        let mut fractional = Array5::zeros((3, 3, 3, n_atoms, 3));
        let mut masses = Array4::zeros((3, 3, 3, n_atoms));

        let shifts = [-1.0, 0.0, 1.0];
        for (i, &x) in shifts.iter().enumerate() {
            for (j, &y) in shifts.iter().enumerate() {
                for (k, &z) in shifts.iter().enumerate() {
                    for (atom, row) in structure.cartesian().rows().into_iter().enumerate() {
                        let image = Vector3D::new(row[0], row[1], row[2]) + x * a + y * b + z * c;
                        cartesian[[i, j, k, atom, 0]] = image[0];
                        cartesian[[i, j, k, atom, 1]] = image[1];
                        cartesian[[i, j, k, atom, 2]] = image[2];
                    }

                    for (atom, row) in structure.fractional().rows().into_iter().enumerate() {
                        fractional[[i, j, k, atom, 0]] = row[0] + x;
                        fractional[[i, j, k, atom, 1]] = row[1] + y;
                        fractional[[i, j, k, atom, 2]] = row[2] + z;
                    }

                    masses.slice_mut(s![i, j, k, ..]).assign(&structure.masses());
                }
            }
        }

        return PeriodicImages {
            species: structure.species().to_vec(),
            cartesian: cartesian,
            fractional: fractional,
            masses: masses,
        };
    }

    /// Get the number of atoms in the canonical supercell
    pub fn size(&self) -> usize {
        self.species.len()
    }

    /// Get the element symbols of the canonical atoms. All images share
    /// these symbols.
    pub fn species(&self) -> &[String] {
        &self.species
    }

    /// Get the cartesian positions of the atoms in the image with block
    /// index `(i, j, k)`, as a `n_atoms x 3` array
    pub fn image_cartesian(&self, i: usize, j: usize, k: usize) -> ArrayView2<'_, f64> {
        self.cartesian.slice(s![i, j, k, .., ..])
    }

    /// Get the fractional positions of the atoms in the image with block
    /// index `(i, j, k)`, as a `n_atoms x 3` array
    pub fn image_fractional(&self, i: usize, j: usize, k: usize) -> ArrayView2<'_, f64> {
        self.fractional.slice(s![i, j, k, .., ..])
    }

    /// Get the atomic masses of the atoms in the image with block index
    /// `(i, j, k)`
    pub fn image_masses(&self, i: usize, j: usize, k: usize) -> ArrayView1<'_, f64> {
        self.masses.slice(s![i, j, k, ..])
    }

    /// Get the atomic masses of all the images, as a `(3, 3, 3, n_atoms)`
    /// array
    pub fn masses(&self) -> ArrayView4<'_, f64> {
        self.masses.view()
    }

    pub(crate) fn masses_mut(&mut self) -> ArrayViewMut4<'_, f64> {
        self.masses.view_mut()
    }

    /// Get the cartesian positions of all 27 images as a single
    /// `27 n_atoms x 3` array.
    ///
    /// Rows are ordered by block index in row-major order: the image
    /// `(i, j, k)` contributes `n_atoms` contiguous rows starting at row
    /// `(9 i + 3 j + k) n_atoms`, so the canonical supercell starts at row
    /// `13 n_atoms`.
    pub fn flat_cartesian(&self) -> ArrayView2<'_, f64> {
        let n_atoms = self.size();
        return self.cartesian.view()
            .into_shape_with_order((27 * n_atoms, 3))
            .expect("image positions are always contiguous");
    }

    /// Get the fractional positions of all 27 images as a single
    /// `27 n_atoms x 3` array, with the same row ordering as
    /// [`PeriodicImages::flat_cartesian`].
    pub fn flat_fractional(&self) -> ArrayView2<'_, f64> {
        let n_atoms = self.size();
        return self.fractional.view()
            .into_shape_with_order((27 * n_atoms, 3))
            .expect("image positions are always contiguous");
    }

    /// Get the atomic masses of all 27 images as a single `27 n_atoms`
    /// array, with the same row ordering as
    /// [`PeriodicImages::flat_cartesian`].
    pub fn flat_masses(&self) -> ArrayView1<'_, f64> {
        let n_atoms = self.size();
        return self.masses.view()
            .into_shape_with_order(27 * n_atoms)
            .expect("image masses are always contiguous");
    }

    /// Get the element symbols of all 27 images as a single `27 n_atoms`
    /// vector, with the same row ordering as
    /// [`PeriodicImages::flat_cartesian`].
    pub fn flat_species(&self) -> Vec<String> {
        let mut species = Vec::with_capacity(27 * self.species.len());
        for _ in 0..27 {
            species.extend_from_slice(&self.species);
        }
        return species;
    }
}

/// A supercell tiled `mul` times along each cell vector, covering the
/// positive octant only: block `(i, j, k)` is the canonical supercell
/// translated by `i a + j b + k c` with `i, j, k` in `[0, mul)`.
///
/// This is independent from [`PeriodicImages`]: the tiling is meant for
/// laying out a larger piece of the crystal (for example to visualize a
/// defect together with its surroundings), not for classification.
#[derive(Debug, Clone)]
pub struct TiledSupercell {
    /// Element symbols, one per row of `cartesian`
    species: Vec<String>,
    /// Cartesian positions, `mul^3 n_atoms x 3`
    cartesian: Array2<f64>,
    /// Atomic masses, one per row of `cartesian`
    masses: Array1<f64>,
    /// Number of repetitions along each cell vector
    mul: usize,
}

impl TiledSupercell {
    /// Default number of repetitions along each cell vector
    pub const DEFAULT_MUL: usize = 2;

    /// Tile `structure` by repeating it `mul` times along each cell
    /// vector.
    ///
    /// The block `(i, j, k)` contributes `n_atoms` contiguous rows
    /// starting at row `(i mul² + j mul + k) n_atoms`. This fails with
    /// [`Error::InvalidParameter`] when `mul` is zero.
    #[time_graph::instrument(name = "TiledSupercell::new")]
    pub fn new(structure: &Structure, mul: usize) -> Result<TiledSupercell, Error> {
        if mul == 0 {
            return Err(Error::InvalidParameter(
                "a tiled supercell must repeat the structure at least once, got mul=0".into()
            ));
        }

        let n_atoms = structure.size();
        let [a, b, c] = structure.cell().vectors();
        let n_blocks = mul * mul * mul;

        let mut cartesian = Array2::zeros((n_blocks * n_atoms, 3));
        let mut masses = Array1::zeros(n_blocks * n_atoms);
        let mut species = Vec::with_capacity(n_blocks * n_atoms);

        for i in 0..mul {
            for j in 0..mul {
                for k in 0..mul {
                    let block = mul * mul * i + mul * j + k;
                    let start = block * n_atoms;

                    for (atom, row) in structure.cartesian().rows().into_iter().enumerate() {
                        let image = Vector3D::new(row[0], row[1], row[2])
                            + i as f64 * a + j as f64 * b + k as f64 * c;
                        cartesian[[start + atom, 0]] = image[0];
                        cartesian[[start + atom, 1]] = image[1];
                        cartesian[[start + atom, 2]] = image[2];
                    }

                    masses.slice_mut(s![start..start + n_atoms]).assign(&structure.masses());
                    species.extend_from_slice(structure.species());
                }
            }
        }

        return Ok(TiledSupercell {
            species: species,
            cartesian: cartesian,
            masses: masses,
            mul: mul,
        });
    }

    /// Get the total number of atoms in the tiling
    pub fn size(&self) -> usize {
        self.species.len()
    }

    /// Get the number of repetitions along each cell vector
    pub fn mul(&self) -> usize {
        self.mul
    }

    /// Get the element symbols, one per atom of the tiling
    pub fn species(&self) -> &[String] {
        &self.species
    }

    /// Get the cartesian positions of all the atoms in the tiling
    pub fn cartesian(&self) -> ArrayView2<'_, f64> {
        self.cartesian.view()
    }

    /// Get the atomic masses of all the atoms in the tiling
    pub fn masses(&self) -> ArrayView1<'_, f64> {
        self.masses.view()
    }
}
