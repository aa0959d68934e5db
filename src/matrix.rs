//! Dense matrices over GF(p).
//!
//! Everything the codec needs from linear algebra lives here: the
//! Vandermonde generator, matrix products, and Gauss-Jordan inversion.
//! Matrices own their elements; taking a submatrix or augmenting
//! copies the values.

use std::fmt;

use num::bigint::BigUint;
use num::{One, Zero};

use crate::{field::PrimeField, Error};

// ======================================================================
// Matrix - PUBLIC

/// Dense row-major matrix of field elements.
///
/// A matrix always has at least one row and one column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<BigUint>,
}

impl Matrix {
    /// Creates a matrix of zeros.
    pub fn zeros(rows: usize, cols: usize) -> Result<Self, Error> {
        if rows == 0 {
            return Err(Error::InvalidRowSize);
        }
        if cols == 0 {
            return Err(Error::InvalidColSize);
        }
        Ok(Self {
            rows,
            cols,
            data: vec![BigUint::zero(); rows * cols],
        })
    }

    /// Creates an identity matrix of the given size.
    pub fn identity(size: usize) -> Result<Self, Error> {
        let mut m = Self::zeros(size, size)?;
        for i in 0..size {
            m.set(i, i, BigUint::one());
        }
        Ok(m)
    }

    /// Creates a matrix from the given row-major data.
    pub fn from_data(data: Vec<Vec<BigUint>>) -> Result<Self, Error> {
        if data.is_empty() {
            return Err(Error::InvalidRowSize);
        }
        let cols = data[0].len();
        if cols == 0 {
            return Err(Error::InvalidColSize);
        }
        for row in &data {
            if row.len() != cols {
                return Err(Error::ColSizeMismatch {
                    cols,
                    got: row.len(),
                });
            }
        }
        let rows = data.len();
        Ok(Self {
            rows,
            cols,
            data: data.into_iter().flatten().collect(),
        })
    }

    /// Creates a Vandermonde matrix with `M[i][j] = (i+1)^j mod p`.
    ///
    /// Any subset of rows forming a square matrix is invertible, since
    /// its determinant is a product of pairwise differences of the
    /// distinct evaluation points `i+1`. This is what makes every
    /// k-subset of shares decodable.
    pub fn vandermonde(rows: usize, cols: usize, field: &PrimeField) -> Result<Self, Error> {
        let mut m = Self::zeros(rows, cols)?;
        for r in 0..rows {
            let x = BigUint::from(r + 1);
            for c in 0..cols {
                m.set(r, c, field.pow(&x, c as u64));
            }
        }
        Ok(m)
    }

    /// Returns the number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the element at row `r`, column `c`.
    pub fn get(&self, r: usize, c: usize) -> &BigUint {
        &self.data[r * self.cols + c]
    }

    /// Replaces the element at row `r`, column `c`.
    pub fn set(&mut self, r: usize, c: usize, value: BigUint) {
        self.data[r * self.cols + c] = value;
    }

    /// Returns row `r` as a slice.
    pub fn row(&self, r: usize) -> &[BigUint] {
        &self.data[r * self.cols..(r + 1) * self.cols]
    }

    /// Returns `true` if the matrix is square.
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Multiplies this matrix (on the left) by another (on the right)
    /// over GF(p) and returns the product.
    ///
    /// Fails with [`Error::DimensionMismatch`] when the column count
    /// on the left differs from the row count on the right.
    pub fn multiply(&self, right: &Matrix, field: &PrimeField) -> Result<Matrix, Error> {
        if self.cols != right.rows {
            return Err(Error::DimensionMismatch {
                left: self.cols,
                right: right.rows,
            });
        }
        let mut result = Matrix::zeros(self.rows, right.cols)?;
        for r in 0..self.rows {
            for c in 0..right.cols {
                let mut acc = BigUint::zero();
                for i in 0..self.cols {
                    acc = field.add(&acc, &field.mul(self.get(r, i), right.get(i, c)));
                }
                result.set(r, c, acc);
            }
        }
        Ok(result)
    }

    /// Returns the concatenation of this matrix and `right`.
    ///
    /// Fails with [`Error::DimensionMismatch`] when the row counts
    /// differ.
    pub fn augment(&self, right: &Matrix) -> Result<Matrix, Error> {
        if self.rows != right.rows {
            return Err(Error::DimensionMismatch {
                left: self.rows,
                right: right.rows,
            });
        }
        let mut result = Matrix::zeros(self.rows, self.cols + right.cols)?;
        for r in 0..self.rows {
            for c in 0..self.cols {
                result.set(r, c, self.get(r, c).clone());
            }
            for c in 0..right.cols {
                result.set(r, self.cols + c, right.get(r, c).clone());
            }
        }
        Ok(result)
    }

    /// Returns a copy of the rectangle `[rmin, rmax) x [cmin, cmax)`.
    pub fn submatrix(
        &self,
        rmin: usize,
        cmin: usize,
        rmax: usize,
        cmax: usize,
    ) -> Result<Matrix, Error> {
        if rmin >= rmax || rmax > self.rows {
            return Err(Error::InvalidRowSize);
        }
        if cmin >= cmax || cmax > self.cols {
            return Err(Error::InvalidColSize);
        }
        let mut result = Matrix::zeros(rmax - rmin, cmax - cmin)?;
        for r in rmin..rmax {
            for c in cmin..cmax {
                result.set(r - rmin, c - cmin, self.get(r, c).clone());
            }
        }
        Ok(result)
    }

    /// Exchanges two rows in place.
    pub fn swap_rows(&mut self, r1: usize, r2: usize) -> Result<(), Error> {
        if r1 >= self.rows || r2 >= self.rows {
            return Err(Error::InvalidRowSize);
        }
        if r1 == r2 {
            return Ok(());
        }
        for c in 0..self.cols {
            self.data.swap(r1 * self.cols + c, r2 * self.cols + c);
        }
        Ok(())
    }

    /// Returns the inverse of this matrix over GF(p).
    ///
    /// The matrix is augmented with the identity, brought to reduced
    /// row echelon form by Gauss-Jordan elimination, and the right
    /// half is returned.
    ///
    /// Fails with [`Error::NotSquare`] for a non-square matrix and
    /// [`Error::Singular`] when no inverse exists.
    pub fn invert(&self, field: &PrimeField) -> Result<Matrix, Error> {
        if !self.is_square() {
            return Err(Error::NotSquare {
                rows: self.rows,
                cols: self.cols,
            });
        }
        let size = self.rows;
        let mut work = self.augment(&Matrix::identity(size)?)?;
        work.gauss_jordan(field)?;
        work.submatrix(0, size, size, size * 2)
    }
}

// ======================================================================
// Matrix - PRIVATE

impl Matrix {
    /// Full Gauss-Jordan elimination in GF(p), in place.
    ///
    /// In a prime field there is no magnitude to pivot on; any
    /// non-zero pivot works, so the search takes the first non-zero
    /// row at or below the diagonal.
    fn gauss_jordan(&mut self, field: &PrimeField) -> Result<(), Error> {
        for r in 0..self.rows {
            if self.get(r, r).is_zero() {
                for below in r + 1..self.rows {
                    if !self.get(below, r).is_zero() {
                        self.swap_rows(r, below)?;
                        break;
                    }
                }
            }
            if self.get(r, r).is_zero() {
                return Err(Error::Singular);
            }

            // Scale the pivot row so the pivot becomes 1.
            if !self.get(r, r).is_one() {
                let scale = field.inv(self.get(r, r))?;
                for c in 0..self.cols {
                    let value = field.mul(self.get(r, c), &scale);
                    self.set(r, c, value);
                }
            }

            // Clear the pivot column from every other row.
            let pivot_row = self.row(r).to_vec();
            for other in 0..self.rows {
                if other == r || self.get(other, r).is_zero() {
                    continue;
                }
                let factor = self.get(other, r).clone();
                for c in 0..self.cols {
                    let value = field.sub(self.get(other, c), &field.mul(&factor, &pivot_row[c]));
                    self.set(other, c, value);
                }
            }
        }
        Ok(())
    }
}

// ======================================================================
// Matrix - IMPL DISPLAY

impl fmt::Display for Matrix {
    /// Renders rows as `[a, b, c]` separated by `,\n`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.rows {
            if r > 0 {
                write!(f, ",\n")?;
            }
            write!(f, "[")?;
            for c in 0..self.cols {
                if c > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", self.get(r, c))?;
            }
            write!(f, "]")?;
        }
        Ok(())
    }
}

// ======================================================================
// TESTS

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{big, bigs};

    fn gf29() -> PrimeField {
        PrimeField::new(big(29))
    }

    fn from_rows(rows: &[&[u64]]) -> Matrix {
        Matrix::from_data(rows.iter().map(|row| bigs(row)).collect()).unwrap()
    }

    // ============================================================
    // constructors

    #[test]
    fn zeros_rejects_empty_dimensions() {
        assert_eq!(Matrix::zeros(0, 3).err(), Some(Error::InvalidRowSize));
        assert_eq!(Matrix::zeros(3, 0).err(), Some(Error::InvalidColSize));
    }

    #[test]
    fn from_data_rejects_bad_shapes() {
        assert_eq!(
            Matrix::from_data(Vec::new()).err(),
            Some(Error::InvalidRowSize)
        );
        assert_eq!(
            Matrix::from_data(vec![Vec::new()]).err(),
            Some(Error::InvalidColSize)
        );
        assert_eq!(
            Matrix::from_data(vec![bigs(&[1, 2]), bigs(&[3])]).err(),
            Some(Error::ColSizeMismatch { cols: 2, got: 1 })
        );
    }

    #[test]
    fn identity_has_ones_on_diagonal() {
        let m = Matrix::identity(3).unwrap();
        for r in 0..3 {
            for c in 0..3 {
                let expected = if r == c { big(1) } else { big(0) };
                assert_eq!(m.get(r, c), &expected);
            }
        }
    }

    #[test]
    fn vandermonde_entries() {
        let m = Matrix::vandermonde(5, 3, &gf29()).unwrap();
        let expected = from_rows(&[
            &[1, 1, 1],
            &[1, 2, 4],
            &[1, 3, 9],
            &[1, 4, 16],
            &[1, 5, 25],
        ]);
        assert_eq!(m, expected);
    }

    // ============================================================
    // multiply

    #[test]
    fn multiply_reduces_mod_p() {
        let a = from_rows(&[&[1, 2], &[3, 4]]);
        let b = from_rows(&[&[5, 6], &[7, 8]]);
        // [[19, 22], [43, 50]] mod 29
        let expected = from_rows(&[&[19, 22], &[14, 21]]);
        assert_eq!(a.multiply(&b, &gf29()).unwrap(), expected);
    }

    #[test]
    fn multiply_rejects_dimension_mismatch() {
        let a = from_rows(&[&[1, 2], &[3, 4]]);
        let b = from_rows(&[&[1, 2]]);
        assert_eq!(
            a.multiply(&b, &gf29()).err(),
            Some(Error::DimensionMismatch { left: 2, right: 1 })
        );
    }

    // ============================================================
    // augment / submatrix / swap_rows

    #[test]
    fn augment_concatenates_columns() {
        let a = from_rows(&[&[1, 2], &[3, 4]]);
        let b = from_rows(&[&[5], &[6]]);
        assert_eq!(a.augment(&b).unwrap(), from_rows(&[&[1, 2, 5], &[3, 4, 6]]));
    }

    #[test]
    fn augment_rejects_row_mismatch() {
        let a = from_rows(&[&[1, 2], &[3, 4]]);
        let b = from_rows(&[&[5]]);
        assert_eq!(
            a.augment(&b).err(),
            Some(Error::DimensionMismatch { left: 2, right: 1 })
        );
    }

    #[test]
    fn submatrix_copies_rectangle() {
        let m = from_rows(&[&[1, 2, 3], &[4, 5, 6], &[7, 8, 9]]);
        assert_eq!(m.submatrix(1, 1, 3, 3).unwrap(), from_rows(&[&[5, 6], &[8, 9]]));
        assert_eq!(m.submatrix(0, 0, 4, 3).err(), Some(Error::InvalidRowSize));
        assert_eq!(m.submatrix(0, 2, 2, 2).err(), Some(Error::InvalidColSize));
    }

    #[test]
    fn swap_rows_exchanges_rows() {
        let mut m = from_rows(&[&[1, 2], &[3, 4]]);
        m.swap_rows(0, 1).unwrap();
        assert_eq!(m, from_rows(&[&[3, 4], &[1, 2]]));
        assert_eq!(m.swap_rows(0, 2).err(), Some(Error::InvalidRowSize));
    }

    // ============================================================
    // invert

    #[test]
    fn invert_small_matrix() {
        let field = gf29();
        let m = from_rows(&[&[1, 2], &[3, 4]]);
        let inverse = m.invert(&field).unwrap();

        assert_eq!(inverse, from_rows(&[&[27, 1], &[16, 14]]));
        assert_eq!(
            m.multiply(&inverse, &field).unwrap(),
            Matrix::identity(2).unwrap()
        );
    }

    #[test]
    fn invert_large_matrix() {
        let field = gf29();
        let m = from_rows(&[&[1, 2, 3], &[4, 5, 6], &[7, 8, 10]]);
        let inverse = m.invert(&field).unwrap();

        assert_eq!(
            m.multiply(&inverse, &field).unwrap(),
            Matrix::identity(3).unwrap()
        );
        assert_eq!(
            inverse.multiply(&m, &field).unwrap(),
            Matrix::identity(3).unwrap()
        );
    }

    #[test]
    fn invert_identity_is_identity() {
        let identity = Matrix::identity(3).unwrap();
        assert_eq!(identity.invert(&gf29()).unwrap(), identity);
    }

    #[test]
    fn invert_needs_row_swap_for_zero_pivot() {
        let field = gf29();
        let m = from_rows(&[&[0, 1], &[1, 0]]);
        let inverse = m.invert(&field).unwrap();
        assert_eq!(
            m.multiply(&inverse, &field).unwrap(),
            Matrix::identity(2).unwrap()
        );
    }

    #[test]
    fn invert_singular_matrix_fails() {
        let m = from_rows(&[&[1, 2], &[2, 4]]);
        assert_eq!(m.invert(&gf29()).err(), Some(Error::Singular));
    }

    #[test]
    fn invert_rejects_non_square() {
        let m = from_rows(&[&[1, 2, 3], &[4, 5, 6]]);
        assert_eq!(
            m.invert(&gf29()).err(),
            Some(Error::NotSquare { rows: 2, cols: 3 })
        );
    }

    #[test]
    fn invert_vandermonde_row_subset() {
        // Any square subset of Vandermonde rows must be invertible.
        let field = gf29();
        let vandermonde = Matrix::vandermonde(7, 3, &field).unwrap();
        let m = Matrix::from_data(vec![
            vandermonde.row(1).to_vec(),
            vandermonde.row(4).to_vec(),
            vandermonde.row(6).to_vec(),
        ])
        .unwrap();
        let inverse = m.invert(&field).unwrap();
        assert_eq!(
            m.multiply(&inverse, &field).unwrap(),
            Matrix::identity(3).unwrap()
        );
    }

    // ============================================================
    // display

    #[test]
    fn display_renders_rows() {
        let m = from_rows(&[&[1, 2], &[3, 4]]);
        assert_eq!(m.to_string(), "[1, 2],\n[3, 4]");
    }
}
