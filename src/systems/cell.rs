//! The `UnitCell` type represents the periodic box of a supercell, with
//! full 3D periodic boundary conditions.
use std::f64;

use ndarray::{Array2, ArrayView2};

use crate::{Error, Matrix3, Vector3D};

/// The shape of a cell, following how the cell vectors are laid out in the
/// cell matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
#[allow(clippy::module_name_repetitions)]
pub enum CellShape {
    /// Orthorhombic unit cell, with cuboid shape
    Orthorhombic,
    /// Triclinic unit cell, with arbitrary parallelepiped shape
    Triclinic,
}

/// An `UnitCell` defines the periodic repeat unit of a supercell.
///
/// The cell is stored as a matrix where **rows** are the cell vectors, so
/// that converting a row vector of fractional coordinates to cartesian
/// coordinates is a multiplication by this matrix on the right:
/// `cartesian = fractional · M`; and the reverse conversion is
/// `fractional = cartesian · M⁻¹`. Both directions are pre-computed at
/// construction, which requires the matrix to be invertible.
#[derive(Debug, Clone, Copy, PartialEq)]
#[allow(clippy::module_name_repetitions)]
pub struct UnitCell {
    /// Unit cell matrix
    matrix: Matrix3,
    /// Transpose of the unit cell matrix, cached from matrix
    transpose: Matrix3,
    /// Inverse of the transpose of the unit cell matrix, cached from matrix
    inverse: Matrix3,
    /// Unit cell shape
    shape: CellShape,
}

impl UnitCell {
    /// Create a unit cell from the given matrix, where rows are the cell
    /// vectors.
    ///
    /// This fails with [`Error::SingularCell`] when the cell vectors do not
    /// span a volume, since such a cell can not convert cartesian
    /// coordinates back to fractional ones.
    pub fn new(matrix: Matrix3) -> Result<UnitCell, Error> {
        let determinant = matrix.determinant();
        if f64::abs(determinant) <= 1e-9 || determinant.is_nan() {
            return Err(Error::SingularCell(format!(
                "the determinant of the cell matrix is {}", determinant
            )));
        }

        let is_close_0 = |value| f64::abs(value) < 1e-6;
        let is_diagonal = |matrix: Matrix3| {
            is_close_0(matrix[0][1]) && is_close_0(matrix[0][2]) &&
            is_close_0(matrix[1][0]) && is_close_0(matrix[1][2]) &&
            is_close_0(matrix[2][0]) && is_close_0(matrix[2][1])
        };

        let shape = if is_diagonal(matrix) {
            CellShape::Orthorhombic
        } else {
            CellShape::Triclinic
        };

        return Ok(UnitCell {
            matrix: matrix,
            transpose: matrix.transposed(),
            inverse: matrix.transposed().inverse(),
            shape: shape,
        });
    }

    /// Create an orthorhombic unit cell, with side lengths `a, b, c`.
    pub fn orthorhombic(a: f64, b: f64, c: f64) -> UnitCell {
        assert!(a > 0.0 && b > 0.0 && c > 0.0, "Cell lengths must be positive");
        let matrix = Matrix3::new([
            [a, 0.0, 0.0],
            [0.0, b, 0.0],
            [0.0, 0.0, c]
        ]);
        UnitCell {
            matrix: matrix,
            transpose: matrix,
            inverse: matrix.inverse(),
            shape: CellShape::Orthorhombic,
        }
    }

    /// Create a cubic unit cell, with side lengths `length, length, length`.
    pub fn cubic(length: f64) -> UnitCell {
        UnitCell::orthorhombic(length, length, length)
    }

    /// Create a triclinic unit cell, with side lengths `a, b, c` and angles
    /// `alpha, beta, gamma` in degrees.
    pub fn triclinic(a: f64, b: f64, c: f64, alpha: f64, beta: f64, gamma: f64) -> Result<UnitCell, Error> {
        assert!(a > 0.0 && b > 0.0 && c > 0.0, "Cell lengths must be positive");
        let cos_alpha = alpha.to_radians().cos();
        let cos_beta = beta.to_radians().cos();
        let (sin_gamma, cos_gamma) = gamma.to_radians().sin_cos();

        let b_x = b * cos_gamma;
        let b_y = b * sin_gamma;

        let c_x = c * cos_beta;
        let c_y = c * (cos_alpha - cos_beta * cos_gamma) / sin_gamma;
        let c_z = f64::sqrt(c * c - c_y * c_y - c_x * c_x);

        return UnitCell::new(Matrix3::new([
            [a,   0.0, 0.0],
            [b_x, b_y, 0.0],
            [c_x, c_y, c_z],
        ]));
    }

    /// Get the cell shape
    pub fn shape(&self) -> CellShape {
        self.shape
    }

    /// Get the first length of the cell (i.e. the norm of the first vector of
    /// the cell)
    pub fn a(&self) -> f64 {
        match self.shape {
            CellShape::Triclinic => self.a_vector().norm(),
            CellShape::Orthorhombic => self.matrix[0][0],
        }
    }

    /// Get the second length of the cell (i.e. the norm of the second vector of
    /// the cell)
    pub fn b(&self) -> f64 {
        match self.shape {
            CellShape::Triclinic => self.b_vector().norm(),
            CellShape::Orthorhombic => self.matrix[1][1],
        }
    }

    /// Get the third length of the cell (i.e. the norm of the third vector of
    /// the cell)
    pub fn c(&self) -> f64 {
        match self.shape {
            CellShape::Triclinic => self.c_vector().norm(),
            CellShape::Orthorhombic => self.matrix[2][2],
        }
    }

    /// Get the first angle of the cell
    pub fn alpha(&self) -> f64 {
        match self.shape {
            CellShape::Triclinic => {
                let b = self.b_vector();
                let c = self.c_vector();
                angle(b, c).to_degrees()
            }
            CellShape::Orthorhombic => 90.0,
        }
    }

    /// Get the second angle of the cell
    pub fn beta(&self) -> f64 {
        match self.shape {
            CellShape::Triclinic => {
                let a = self.a_vector();
                let c = self.c_vector();
                angle(a, c).to_degrees()
            }
            CellShape::Orthorhombic => 90.0,
        }
    }

    /// Get the third angle of the cell
    pub fn gamma(&self) -> f64 {
        match self.shape {
            CellShape::Triclinic => {
                let a = self.a_vector();
                let b = self.b_vector();
                angle(a, b).to_degrees()
            }
            CellShape::Orthorhombic => 90.0,
        }
    }

    /// Get the volume of the cell
    pub fn volume(&self) -> f64 {
        let volume = match self.shape {
            CellShape::Orthorhombic => self.a() * self.b() * self.c(),
            CellShape::Triclinic => {
                // The volume is the mixed product of the three cell vectors
                let a = self.a_vector();
                let b = self.b_vector();
                let c = self.c_vector();
                a * (b ^ c)
            }
        };
        return f64::abs(volume);
    }

    /// Get the matricial representation of the unit cell
    pub fn matrix(&self) -> Matrix3 {
        self.matrix
    }

    /// Get the three cell vectors (the rows of the cell matrix)
    pub fn vectors(&self) -> [Vector3D; 3] {
        [self.a_vector(), self.b_vector(), self.c_vector()]
    }

    /// Get the first vector of the cell
    fn a_vector(&self) -> Vector3D {
        self.matrix[0].into()
    }

    /// Get the second vector of the cell
    fn b_vector(&self) -> Vector3D {
        self.matrix[1].into()
    }

    /// Get the third vector of the cell
    fn c_vector(&self) -> Vector3D {
        self.matrix[2].into()
    }
}

/// Conversion between fractional and cartesian coordinates
impl UnitCell {
    /// Get the fractional representation of the `vector` in this cell
    pub fn fractional(&self, vector: Vector3D) -> Vector3D {
        // this needs to use the inverse of the transpose of the matrix, since
        // we only have code to multiply a vector by a matrix on the left
        return self.inverse * vector;
    }

    /// Get the Cartesian representation of the `fractional` vector in this
    /// cell
    pub fn cartesian(&self, fractional: Vector3D) -> Vector3D {
        // this needs to use the inverse of the transpose of the matrix, since
        // we only have code to multiply a vector by a matrix on the left
        return self.transpose * fractional;
    }

    /// Convert a whole `n_atoms x 3` array of fractional coordinates to
    /// cartesian coordinates, one row per atom.
    pub fn cartesian_all(&self, fractional: ArrayView2<'_, f64>) -> Array2<f64> {
        assert_eq!(fractional.ncols(), 3, "expected one row of 3 coordinates per atom");
        let mut cartesian = Array2::zeros(fractional.raw_dim());
        for (mut converted, row) in cartesian.rows_mut().into_iter().zip(fractional.rows()) {
            let vector = self.cartesian(Vector3D::new(row[0], row[1], row[2]));
            converted[0] = vector[0];
            converted[1] = vector[1];
            converted[2] = vector[2];
        }
        return cartesian;
    }

    /// Convert a whole `n_atoms x 3` array of cartesian coordinates to
    /// fractional coordinates, one row per atom.
    pub fn fractional_all(&self, cartesian: ArrayView2<'_, f64>) -> Array2<f64> {
        assert_eq!(cartesian.ncols(), 3, "expected one row of 3 coordinates per atom");
        let mut fractional = Array2::zeros(cartesian.raw_dim());
        for (mut converted, row) in fractional.rows_mut().into_iter().zip(cartesian.rows()) {
            let vector = self.fractional(Vector3D::new(row[0], row[1], row[2]));
            converted[0] = vector[0];
            converted[1] = vector[1];
            converted[2] = vector[2];
        }
        return fractional;
    }
}

/// Get the angles between the vectors `u` and `v`.
fn angle(u: Vector3D, v: Vector3D) -> f64 {
    let un = u.normalized();
    let vn = v.normalized();
    f64::acos(un * vn)
}
