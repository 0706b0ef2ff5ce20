use std::ops::{Add, Index, IndexMut, Mul, Sub};
use std::ops::{AddAssign, SubAssign};

use approx::{AbsDiffEq, RelativeEq, UlpsEq};

use super::Vector3D;

/// A 3x3 matrix type, stored in row-major order
///
/// A `Matrix3` implements the usual algebraic operations:
///
/// ```
/// # use cellgeom::{Matrix3, Vector3D};
/// let unit = Matrix3::one();
/// let matrix = Matrix3::new([
///     [2.0, 0.0, 0.0],
///     [0.0, 4.0, 0.0],
///     [0.0, 0.0, 8.0],
/// ]);
///
/// assert_eq!(matrix * unit, matrix);
/// assert_eq!(matrix.determinant(), 64.0);
/// assert_eq!(matrix * matrix.inverse(), unit);
///
/// let vector = Vector3D::new(1.0, 1.0, 1.0);
/// assert_eq!(matrix * vector, Vector3D::new(2.0, 4.0, 8.0));
/// ```
///
/// Rows are accessed by indexing: `matrix[i]` is the i-th row, and
/// `matrix[i][j]` the element at row `i` and column `j`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix3([[f64; 3]; 3]);

impl Matrix3 {
    /// Create a new `Matrix3` from the given rows
    #[inline]
    pub fn new(data: [[f64; 3]; 3]) -> Matrix3 {
        Matrix3(data)
    }

    /// Create a new `Matrix3` with all components set to zero
    #[inline]
    pub fn zero() -> Matrix3 {
        Matrix3::new([[0.0; 3]; 3])
    }

    /// Create an identity `Matrix3`
    #[inline]
    pub fn one() -> Matrix3 {
        Matrix3::new([
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
        ])
    }

    /// Compute the determinant of this matrix
    pub fn determinant(&self) -> f64 {
        self[0][0] * (self[1][1] * self[2][2] - self[2][1] * self[1][2])
            - self[0][1] * (self[1][0] * self[2][2] - self[1][2] * self[2][0])
            + self[0][2] * (self[1][0] * self[2][1] - self[1][1] * self[2][0])
    }

    /// Compute the inverse of this matrix
    ///
    /// # Panics
    ///
    /// If the matrix is not invertible
    pub fn inverse(&self) -> Matrix3 {
        let determinant = self.determinant();
        assert!(f64::abs(determinant) > 1e-30, "this matrix is not invertible");

        let inverse_determinant = 1.0 / determinant;
        let mut result = Matrix3::zero();
        result[0][0] = inverse_determinant * (self[1][1] * self[2][2] - self[2][1] * self[1][2]);
        result[0][1] = inverse_determinant * (self[0][2] * self[2][1] - self[0][1] * self[2][2]);
        result[0][2] = inverse_determinant * (self[0][1] * self[1][2] - self[0][2] * self[1][1]);
        result[1][0] = inverse_determinant * (self[1][2] * self[2][0] - self[1][0] * self[2][2]);
        result[1][1] = inverse_determinant * (self[0][0] * self[2][2] - self[0][2] * self[2][0]);
        result[1][2] = inverse_determinant * (self[1][0] * self[0][2] - self[0][0] * self[1][2]);
        result[2][0] = inverse_determinant * (self[1][0] * self[2][1] - self[2][0] * self[1][1]);
        result[2][1] = inverse_determinant * (self[2][0] * self[0][1] - self[0][0] * self[2][1]);
        result[2][2] = inverse_determinant * (self[0][0] * self[1][1] - self[1][0] * self[0][1]);
        return result;
    }

    /// Compute the transpose of this matrix
    pub fn transposed(&self) -> Matrix3 {
        Matrix3::new([
            [self[0][0], self[1][0], self[2][0]],
            [self[0][1], self[1][1], self[2][1]],
            [self[0][2], self[1][2], self[2][2]],
        ])
    }
}

impl From<[[f64; 3]; 3]> for Matrix3 {
    fn from(data: [[f64; 3]; 3]) -> Matrix3 {
        Matrix3(data)
    }
}

impl From<Matrix3> for [[f64; 3]; 3] {
    fn from(matrix: Matrix3) -> [[f64; 3]; 3] {
        matrix.0
    }
}

impl Index<usize> for Matrix3 {
    type Output = [f64; 3];
    #[inline]
    fn index(&self, index: usize) -> &[f64; 3] {
        &self.0[index]
    }
}

impl IndexMut<usize> for Matrix3 {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut [f64; 3] {
        &mut self.0[index]
    }
}

impl_arithmetic!(
    Matrix3, Matrix3, Add, add, Matrix3,
    self, other,
    {
        let mut result = Matrix3::zero();
        for i in 0..3 {
            for j in 0..3 {
                result[i][j] = self[i][j] + other[i][j];
            }
        }
        result
    }
);

impl_arithmetic!(
    Matrix3, Matrix3, Sub, sub, Matrix3,
    self, other,
    {
        let mut result = Matrix3::zero();
        for i in 0..3 {
            for j in 0..3 {
                result[i][j] = self[i][j] - other[i][j];
            }
        }
        result
    }
);

impl_arithmetic!(
    Matrix3, Matrix3, Mul, mul, Matrix3,
    self, other,
    {
        let mut result = Matrix3::zero();
        for i in 0..3 {
            for j in 0..3 {
                result[i][j] = self[i][0] * other[0][j]
                    + self[i][1] * other[1][j]
                    + self[i][2] * other[2][j];
            }
        }
        result
    }
);

impl_arithmetic!(
    Matrix3, Vector3D, Mul, mul, Vector3D,
    self, other,
    Vector3D::new(
        self[0][0] * other[0] + self[0][1] * other[1] + self[0][2] * other[2],
        self[1][0] * other[0] + self[1][1] * other[1] + self[1][2] * other[2],
        self[2][0] * other[0] + self[2][1] * other[1] + self[2][2] * other[2],
    )
);

impl_inplace_arithmetic!(
    Matrix3, Matrix3, AddAssign, add_assign,
    self, other,
    {
        for i in 0..3 {
            for j in 0..3 {
                self[i][j] += other[i][j];
            }
        }
    }
);

impl_inplace_arithmetic!(
    Matrix3, Matrix3, SubAssign, sub_assign,
    self, other,
    {
        for i in 0..3 {
            for j in 0..3 {
                self[i][j] -= other[i][j];
            }
        }
    }
);

lsh_scal_arithmetic!(
    Matrix3, Mul, mul, Matrix3,
    self, other,
    {
        let mut result = Matrix3::zero();
        for i in 0..3 {
            for j in 0..3 {
                result[i][j] = self[i][j] * other;
            }
        }
        result
    }
);

rhs_scal_arithmetic!(
    Matrix3, Mul, mul, Matrix3,
    self, other,
    {
        let mut result = Matrix3::zero();
        for i in 0..3 {
            for j in 0..3 {
                result[i][j] = self * other[i][j];
            }
        }
        result
    }
);

impl AbsDiffEq for Matrix3 {
    type Epsilon = <f64 as AbsDiffEq>::Epsilon;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        for i in 0..3 {
            for j in 0..3 {
                if !f64::abs_diff_eq(&self[i][j], &other[i][j], epsilon) {
                    return false;
                }
            }
        }
        return true;
    }
}

impl RelativeEq for Matrix3 {
    fn default_max_relative() -> Self::Epsilon {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: Self::Epsilon, max_relative: Self::Epsilon) -> bool {
        for i in 0..3 {
            for j in 0..3 {
                if !f64::relative_eq(&self[i][j], &other[i][j], epsilon, max_relative) {
                    return false;
                }
            }
        }
        return true;
    }
}

impl UlpsEq for Matrix3 {
    fn default_max_ulps() -> u32 {
        f64::default_max_ulps()
    }

    fn ulps_eq(&self, other: &Self, epsilon: Self::Epsilon, max_ulps: u32) -> bool {
        for i in 0..3 {
            for j in 0..3 {
                if !f64::ulps_eq(&self[i][j], &other[i][j], epsilon, max_ulps) {
                    return false;
                }
            }
        }
        return true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_ulps_eq;

    #[test]
    fn zero_one() {
        let zero = Matrix3::zero();
        let one = Matrix3::one();
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(zero[i][j], 0.0);
                if i == j {
                    assert_eq!(one[i][j], 1.0);
                } else {
                    assert_eq!(one[i][j], 0.0);
                }
            }
        }
    }

    #[test]
    fn index() {
        let mut matrix = Matrix3::zero();
        matrix[1][2] = 4.0;
        assert_eq!(matrix[1], [0.0, 0.0, 4.0]);
        assert_eq!(matrix[1][2], 4.0);
    }

    #[test]
    fn add_sub() {
        let a = Matrix3::new([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]);
        let one = Matrix3::one();

        let sum = a + one;
        assert_eq!(sum[0], [2.0, 2.0, 3.0]);
        assert_eq!(sum[1], [4.0, 6.0, 6.0]);
        assert_eq!(sum[2], [7.0, 8.0, 10.0]);

        assert_eq!(sum - one, a);

        let mut b = a;
        b += one;
        assert_eq!(b, sum);
        b -= one;
        assert_eq!(b, a);
    }

    #[test]
    fn multiplication() {
        let a = Matrix3::new([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]);
        let one = Matrix3::one();

        assert_eq!(a * one, a);
        assert_eq!(one * a, a);

        let b = Matrix3::new([[2.0, 0.0, 0.0], [0.0, 2.0, 0.0], [0.0, 0.0, 2.0]]);
        assert_eq!(a * b, 2.0 * a);
        assert_eq!(b * a, a * 2.0);
    }

    #[test]
    fn multiply_vector() {
        let rotation = Matrix3::new([
            [0.0, -1.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0],
        ]);
        let x = Vector3D::new(1.0, 0.0, 0.0);
        assert_eq!(rotation * x, Vector3D::new(0.0, 1.0, 0.0));

        let diagonal = Matrix3::new([
            [2.0, 0.0, 0.0],
            [0.0, 3.0, 0.0],
            [0.0, 0.0, 4.0],
        ]);
        assert_eq!(diagonal * Vector3D::new(1.0, 1.0, 1.0), Vector3D::new(2.0, 3.0, 4.0));
    }

    #[test]
    fn determinant() {
        assert_eq!(Matrix3::one().determinant(), 1.0);
        assert_eq!(Matrix3::zero().determinant(), 0.0);

        let matrix = Matrix3::new([[2.0, 0.0, 0.0], [0.0, 3.0, 0.0], [0.0, 0.0, 4.0]]);
        assert_eq!(matrix.determinant(), 24.0);

        // two identical rows
        let matrix = Matrix3::new([[1.0, 2.0, 3.0], [1.0, 2.0, 3.0], [7.0, 8.0, 9.0]]);
        assert_eq!(matrix.determinant(), 0.0);
    }

    #[test]
    fn transposed() {
        let matrix = Matrix3::new([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]);
        let transposed = matrix.transposed();
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(matrix[i][j], transposed[j][i]);
            }
        }
        assert_eq!(transposed.transposed(), matrix);
    }

    #[test]
    fn inverse() {
        let identity = Matrix3::one();
        assert_eq!(identity.inverse(), identity);

        let matrix = Matrix3::new([
            [1.2, 0.0, 0.0],
            [0.8, 3.5, 0.0],
            [-2.0, 0.4, 1.7],
        ]);
        let inverse = matrix.inverse();
        assert_ulps_eq!(matrix * inverse, Matrix3::one(), epsilon = 1e-15);
        assert_ulps_eq!(inverse * matrix, Matrix3::one(), epsilon = 1e-15);
    }

    #[test]
    #[should_panic(expected = "this matrix is not invertible")]
    fn inverse_singular() {
        let _ = Matrix3::zero().inverse();
    }
}
