//! Deformations of a supercell: rotations and strains applied to the cell
//! vectors, and Gaussian-shaped out-of-plane perturbations applied to the
//! atomic positions, as used to prepare strained or wrinkled 2D materials.

use ndarray::{Array2, ArrayView2};

use crate::{Error, Matrix3, Structure, UnitCell, Vector3D};

/// A `CellDeformer` applies geometric transformations to a supercell.
///
/// The deformer keeps the cell and positions it was created from, and every
/// operation starts over from them: calling [`CellDeformer::rotate`] twice
/// returns the same cell both times instead of composing the two rotations.
/// Deformations that should compose must be applied through a new deformer
/// built from the previous result.
#[derive(Debug, Clone)]
pub struct CellDeformer {
    /// The pristine cell
    cell: UnitCell,
    /// Pristine fractional positions, `n_atoms x 3`
    fractional: Array2<f64>,
    /// Pristine cartesian positions, `n_atoms x 3`, derived from `fractional`
    cartesian: Array2<f64>,
}

impl CellDeformer {
    /// Create a deformer for the given cell and fractional atomic positions.
    ///
    /// This fails with [`Error::DimensionMismatch`] if the positions do not
    /// have one row of 3 coordinates per atom.
    pub fn new(cell: UnitCell, fractional: Array2<f64>) -> Result<CellDeformer, Error> {
        if fractional.ncols() != 3 {
            return Err(Error::DimensionMismatch(format!(
                "expected 3 columns in the fractional positions array, got {}",
                fractional.ncols()
            )));
        }

        let cartesian = cell.cartesian_all(fractional.view());
        return Ok(CellDeformer {
            cell: cell,
            fractional: fractional,
            cartesian: cartesian,
        });
    }

    /// Create a deformer for the cell and atomic positions of `structure`
    pub fn from_structure(structure: &Structure) -> CellDeformer {
        CellDeformer {
            cell: *structure.cell(),
            fractional: structure.fractional().to_owned(),
            cartesian: structure.cartesian().to_owned(),
        }
    }

    /// Get the pristine cell this deformer starts from
    pub fn cell(&self) -> &UnitCell {
        &self.cell
    }

    /// Get the pristine fractional positions this deformer starts from
    pub fn fractional(&self) -> ArrayView2<'_, f64> {
        self.fractional.view()
    }

    /// Rotate the cell by `alpha` around the x axis, then `beta` around the
    /// y axis, then `gamma` around the z axis, all in degrees.
    ///
    /// Rotating the crystal moves the cell vectors (the new cell matrix is
    /// `C·Rᵗ`) while the fractional positions, being relative to the cell
    /// vectors, stay the same.
    pub fn rotate(&self, alpha: f64, beta: f64, gamma: f64) -> Result<UnitCell, Error> {
        let rotation = rotation_z(gamma) * rotation_y(beta) * rotation_x(alpha);
        return UnitCell::new(self.cell.matrix() * rotation.transposed());
    }

    /// Strain the cell by the same factor `1 + strain` along both in-plane
    /// (x and y) directions, leaving z unchanged.
    ///
    /// A strain of -1 collapses the cell and fails with
    /// [`Error::SingularCell`].
    pub fn homogeneous_strain(&self, strain: f64) -> Result<UnitCell, Error> {
        let strain_matrix = Matrix3::new([
            [1.0 + strain, 0.0, 0.0],
            [0.0, 1.0 + strain, 0.0],
            [0.0, 0.0, 1.0],
        ]);
        return UnitCell::new(self.cell.matrix() * strain_matrix.transposed());
    }

    /// Strain the cell by `1 + strain` along a single in-plane direction at
    /// `theta` degrees from the x axis, for example along the symmetry axis
    /// of the material.
    ///
    /// The strain direction is handled by rotating into the strained frame
    /// and back: the new cell matrix is `C·(R⁻¹SR)ᵗ` with `R` the rotation
    /// by `theta` around z and `S = diag(1 + strain, 1, 1)`.
    pub fn uniaxial_strain(&self, strain: f64, theta: f64) -> Result<UnitCell, Error> {
        let strain_matrix = Matrix3::new([
            [1.0 + strain, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
        ]);
        let rotation = rotation_z(theta);
        let combined = rotation.inverse() * strain_matrix * rotation;
        return UnitCell::new(self.cell.matrix() * combined.transposed());
    }

    /// Displace the atoms out of plane along a Gaussian ridge: each atom's z
    /// coordinate gains `amp·exp(-(y - peak_y)²/2std²)`, with the ridge
    /// direction rotated by `theta` degrees from the x axis.
    ///
    /// Returns the fractional positions of the displaced atoms in the
    /// pristine cell; the cell itself is unchanged.
    pub fn gaussian_wrinkle(&self, amp: f64, std: f64, peak: [f64; 2], theta: f64) -> Array2<f64> {
        let rotation = rotation_z(theta);
        let inverse = rotation.inverse();

        let mut cartesian = self.cartesian.clone();
        for mut row in cartesian.rows_mut() {
            let mut position = rotation * Vector3D::new(row[0], row[1], row[2]);
            position[2] += gaussian(amp, std, peak[1], position[1]);
            let position = inverse * position;

            row[0] = position[0];
            row[1] = position[1];
            row[2] = position[2];
        }

        return self.cell.fractional_all(cartesian.view());
    }

    /// Displace the atoms out of plane along a localized 2D Gaussian bump
    /// centered on `peak`: each atom's z coordinate gains
    /// `amp·exp(-(x - peak_x)²/2std²)·exp(-(y - peak_y)²/2std²)`.
    ///
    /// Returns the fractional positions of the displaced atoms in the
    /// pristine cell; the cell itself is unchanged.
    pub fn gaussian_bump(&self, amp: f64, std: f64, peak: [f64; 2]) -> Array2<f64> {
        let mut cartesian = self.cartesian.clone();
        for mut row in cartesian.rows_mut() {
            row[2] += gaussian(amp, std, peak[0], row[0])
                * gaussian(amp, std, peak[1], row[1])
                / amp;
        }

        return self.cell.fractional_all(cartesian.view());
    }
}

/// Evaluate a Gaussian of amplitude `amp`, standard deviation `std` and
/// center `peak` at `x`
fn gaussian(amp: f64, std: f64, peak: f64, x: f64) -> f64 {
    amp * f64::exp(-0.5 * (x - peak) * (x - peak) / (std * std))
}

/// Get the largest curvature of the Gaussian profile
/// `z(t) = amp·exp(-t²/2std²)`, in inverse length units.
///
/// This estimates how sharply a wrinkle of the given amplitude and width
/// bends the material. The curvature `|z″| / (1 + z′²)^(3/2)` is sampled
/// over 1000 points of `t ∈ [-10, 10]`, so `std` should be well below 10
/// for the maximum to be reliable.
pub fn max_gaussian_curvature(amp: f64, std: f64) -> f64 {
    let mut max = 0.0;
    for i in 0..1000 {
        let t = -10.0 + 20.0 * (i as f64) / 999.0;
        let envelope = amp * f64::exp(-0.5 * t * t / (std * std));
        let slope = -t / (std * std) * envelope;
        let second = (t * t / std.powi(4) - 1.0 / (std * std)) * envelope;

        let curvature = f64::abs(second) / (1.0 + slope * slope).powf(1.5);
        if curvature > max {
            max = curvature;
        }
    }
    return max;
}

/// Rotation matrix by `angle` degrees around the x axis
fn rotation_x(angle: f64) -> Matrix3 {
    let (sin, cos) = angle.to_radians().sin_cos();
    Matrix3::new([
        [1.0, 0.0, 0.0],
        [0.0, cos, -sin],
        [0.0, sin, cos],
    ])
}

/// Rotation matrix by `angle` degrees around the y axis
fn rotation_y(angle: f64) -> Matrix3 {
    let (sin, cos) = angle.to_radians().sin_cos();
    Matrix3::new([
        [cos, 0.0, sin],
        [0.0, 1.0, 0.0],
        [-sin, 0.0, cos],
    ])
}

/// Rotation matrix by `angle` degrees around the z axis
fn rotation_z(angle: f64) -> Matrix3 {
    let (sin, cos) = angle.to_radians().sin_cos();
    Matrix3::new([
        [cos, -sin, 0.0],
        [sin, cos, 0.0],
        [0.0, 0.0, 1.0],
    ])
}
