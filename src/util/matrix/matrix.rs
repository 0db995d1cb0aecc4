use ::std::ops::{Add, Index, IndexMut, Mul, Neg, RangeInclusive, Sub};
use ::itertools::Itertools;
use ::tabla_assert_close::{CheckClose, CheckCloseError, Tolerances};
use ::tabla_slice_math::{self as slice_math, DimensionError, Dims};

use crate::IndexError;

/// Owned matrix type with C layout.
///
/// Storage is never handed out mutably; reads go through `&[f64]` views or
/// deliberate copies, and only the `*_equals` methods and `set` mutate.
// please resist the urge to go n-dimensional
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    // c-contiguous, row-contiguous data
    data: Vec<f64>,
    // invariant: height * width == data.len()
    height: usize,
    width: usize,
}

/// Borrowed, possibly transposed view of a `Matrix`.
#[derive(Debug, Copy, Clone)]
pub struct MatrixRef<'a> {
    slice: &'a [f64],
    dims: (usize, usize),
    strides: (usize, usize),
}

//==================================================================================================
// Construction

impl Matrix {
    /// An `height x width` matrix of zeros.
    pub fn new(height: usize, width: usize) -> Self
    { Matrix::new_filled((height, width), 0.0) }

    pub fn new_filled((height, width): (usize, usize), fill: f64) -> Self
    { Matrix { data: vec![fill; height * width], height, width } }

    pub fn from_row_major_data((height, width): (usize, usize), data: Vec<f64>) -> Result<Self, DimensionError>
    {
        if data.len() != height * width {
            return Err(DimensionError {
                op: "from_row_major_data",
                left: Dims::Matrix(height, width),
                right: Dims::Vector(data.len()),
            });
        }
        Ok(Matrix { data, height, width })
    }

    /// Build from a rectangular array of rows.
    ///
    /// An empty array produces a `0x0` matrix.  Ragged input is rejected.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self, DimensionError>
    {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.as_ref().len());

        let mut data = Vec::with_capacity(height * width);
        for row in rows {
            let row = row.as_ref();
            if row.len() != width {
                return Err(DimensionError {
                    op: "from_rows",
                    left: Dims::Vector(width),
                    right: Dims::Vector(row.len()),
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Matrix { data, height, width })
    }

    /// Build from a one-dimensional array packed by columns (Fortran order).
    pub fn from_column_packed(values: &[f64], height: usize) -> Result<Self, DimensionError>
    {
        let width = match height {
            0 => 0,
            _ => values.len() / height,
        };
        if height * width != values.len() {
            return Err(DimensionError {
                op: "from_column_packed",
                left: Dims::Matrix(height, width),
                right: Dims::Vector(values.len()),
            });
        }

        let column_major = MatrixRef { slice: values, dims: (height, width), strides: (1, height) };
        Ok(column_major.to_owned_matrix())
    }

    /// An `n x 1` matrix.
    pub fn from_column(values: &[f64]) -> Self
    { Matrix { data: values.to_vec(), height: values.len(), width: 1 } }

    /// Ones on the main diagonal and zeros elsewhere.  Need not be square.
    pub fn identity(height: usize, width: usize) -> Self
    {
        let mut out = Matrix::new(height, width);
        for i in 0..usize::min(height, width) {
            out[(i, i)] = 1.0;
        }
        out
    }

    /// The outer product `a b^T`, with `a` taken as a column and `b` as a row.
    pub fn outer(a: &[f64], b: &[f64]) -> Self
    {
        let data = a.iter().cartesian_product(b).map(|(x, y)| x * y).collect();
        Matrix { data, height: a.len(), width: b.len() }
    }
}

//==================================================================================================
// Access

impl Matrix {
    pub fn dims(&self) -> (usize, usize) { (self.height, self.width) }
    pub fn num_rows(&self) -> usize { self.height }
    pub fn num_cols(&self) -> usize { self.width }
    pub fn is_square(&self) -> bool { self.height == self.width }
    pub fn size(&self) -> usize { self.data.len() }

    pub fn row_major_data(&self) -> &[f64] { &self.data }

    pub fn view(&self) -> MatrixRef<'_>
    { MatrixRef { slice: &self.data, dims: self.dims(), strides: (self.width, 1) } }

    /// Iterate over the rows as slices.
    pub fn rows(&self) -> impl ExactSizeIterator<Item=&[f64]> + '_
    {
        // (not `chunks`, which panics for zero-width matrices)
        let width = self.width;
        (0..self.height).map(move |r| &self.data[r * width..(r + 1) * width])
    }

    fn check_index(&self, row: usize, col: usize) -> Result<(), IndexError>
    {
        match row < self.height && col < self.width {
            true => Ok(()),
            false => Err(self.index_error(row, col)),
        }
    }

    fn index_error(&self, row: usize, col: usize) -> IndexError
    { IndexError { row, col, num_rows: self.height, num_cols: self.width } }

    pub fn get(&self, row: usize, col: usize) -> Result<f64, IndexError>
    {
        self.check_index(row, col)?;
        Ok(self.data[row * self.width + col])
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<(), IndexError>
    {
        self.check_index(row, col)?;
        self.data[row * self.width + col] = value;
        Ok(())
    }

    pub fn row(&self, row: usize) -> Result<&[f64], IndexError>
    { self.row_from(row, 0) }

    /// The part of a row starting at column `start`.  `start` may equal the width.
    pub fn row_from(&self, row: usize, start: usize) -> Result<&[f64], IndexError>
    {
        if row >= self.height || start > self.width {
            return Err(self.index_error(row, start));
        }
        Ok(&self.data[row * self.width + start..(row + 1) * self.width])
    }

    pub fn column(&self, col: usize) -> Result<Vec<f64>, IndexError>
    { self.column_from(0, col) }

    /// The part of a column starting at row `start`.  `start` may equal the height.
    pub fn column_from(&self, start: usize, col: usize) -> Result<Vec<f64>, IndexError>
    {
        if col >= self.width || start > self.height {
            return Err(self.index_error(start, col));
        }
        Ok((start..self.height).map(|r| self[(r, col)]).collect())
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>>
    { self.rows().map(|row| row.to_vec()).collect() }

    pub fn row_packed(&self) -> Vec<f64>
    { self.data.clone() }

    pub fn column_packed(&self) -> Vec<f64>
    { self.to_transpose().data }

    /// Copy out `A[rows, cols]`, where both ranges are inclusive.
    pub fn submatrix(&self, rows: RangeInclusive<usize>, cols: RangeInclusive<usize>) -> Result<Matrix, IndexError>
    {
        let rows: Vec<usize> = rows.collect();
        let cols: Vec<usize> = cols.collect();
        self.select(&rows, &cols)
    }

    /// Copy out the rows and columns at the given indices, in the given order.
    pub fn select(&self, rows: &[usize], cols: &[usize]) -> Result<Matrix, IndexError>
    {
        let mut data = Vec::with_capacity(rows.len() * cols.len());
        for &r in rows {
            for &c in cols {
                data.push(self.get(r, c)?);
            }
        }
        Ok(Matrix { data, height: rows.len(), width: cols.len() })
    }

    /// Overwrite the block whose top-left corner is at `(row, col)`.
    pub fn set_submatrix(&mut self, row: usize, col: usize, block: &Matrix) -> Result<&mut Self, IndexError>
    {
        if block.size() > 0 {
            let last = (row + block.height - 1, col + block.width - 1);
            self.check_index(last.0, last.1)?;
        }
        for (r, block_row) in block.rows().enumerate() {
            let start = (row + r) * self.width + col;
            self.data[start..start + block.width].copy_from_slice(block_row);
        }
        Ok(self)
    }

    pub fn to_transpose(&self) -> Matrix
    { self.view().transpose().to_owned_matrix() }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    #[inline(always)] // inlining should often remove bounds checks
    fn index(&self, (r, c): (usize, usize)) -> &f64
    {
        assert!(r < self.height && c < self.width, "{}", self.index_error(r, c));
        &self.data[r * self.width + c]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    #[inline(always)]
    fn index_mut(&mut self, (r, c): (usize, usize)) -> &mut f64
    {
        assert!(r < self.height && c < self.width, "{}", self.index_error(r, c));
        &mut self.data[r * self.width + c]
    }
}

//==================================================================================================
// Views

impl<'a> MatrixRef<'a> {
    pub fn dims(&self) -> (usize, usize) { self.dims }
    pub fn num_rows(&self) -> usize { self.dims.0 }
    pub fn num_cols(&self) -> usize { self.dims.1 }

    /// Swap the roles of rows and columns without copying.
    pub fn transpose(self) -> MatrixRef<'a>
    {
        let MatrixRef { slice, dims, strides } = self;
        MatrixRef { slice, dims: (dims.1, dims.0), strides: (strides.1, strides.0) }
    }

    /// Iterate over the elements of row `r` of the view.
    pub fn row_iter(&self, r: usize) -> impl Iterator<Item=f64> + 'a
    {
        assert!(r < self.dims.0, "row {} out of bounds for view of dims {:?}", r, self.dims);
        let MatrixRef { slice, dims, strides } = *self;
        (0..dims.1).map(move |c| slice[r * strides.0 + c * strides.1])
    }

    pub fn to_owned_matrix(&self) -> Matrix
    {
        let (height, width) = self.dims;
        let data = (0..height).flat_map(|r| self.row_iter(r)).collect();
        Matrix { data, height, width }
    }
}

impl<'a> Index<(usize, usize)> for MatrixRef<'a> {
    type Output = f64;

    #[inline(always)]
    fn index(&self, (r, c): (usize, usize)) -> &f64
    {
        assert!(r < self.dims.0 && c < self.dims.1, "index {:?} out of bounds for view of dims {:?}", (r, c), self.dims);
        &self.slice[r * self.strides.0 + c * self.strides.1]
    }
}

//==================================================================================================
// Arithmetic

impl Matrix {
    fn check_same_dims(&self, op: &'static str, other: &Matrix) -> Result<(), DimensionError>
    {
        match self.dims() == other.dims() {
            true => Ok(()),
            false => Err(DimensionError::matrices(op, self.dims(), other.dims())),
        }
    }

    fn zip_map(&self, other: &Matrix, f: impl Fn(f64, f64) -> f64) -> Matrix
    {
        let data = self.data.iter().zip_eq(&other.data).map(|(&a, &b)| f(a, b)).collect();
        Matrix { data, ..*self }
    }

    fn map(&self, f: impl Fn(f64) -> f64) -> Matrix
    { Matrix { data: self.data.iter().map(|&a| f(a)).collect(), ..*self } }

    pub fn plus(&self, other: &Matrix) -> Result<Matrix, DimensionError>
    {
        self.check_same_dims("plus", other)?;
        Ok(self.zip_map(other, |a, b| a + b))
    }

    pub fn minus(&self, other: &Matrix) -> Result<Matrix, DimensionError>
    {
        self.check_same_dims("minus", other)?;
        Ok(self.zip_map(other, |a, b| a - b))
    }

    pub fn plus_equals(&mut self, other: &Matrix) -> Result<&mut Self, DimensionError>
    {
        self.check_same_dims("plus_equals", other)?;
        for (a, &b) in self.data.iter_mut().zip(&other.data) {
            *a += b;
        }
        Ok(self)
    }

    pub fn minus_equals(&mut self, other: &Matrix) -> Result<&mut Self, DimensionError>
    {
        self.check_same_dims("minus_equals", other)?;
        for (a, &b) in self.data.iter_mut().zip(&other.data) {
            *a -= b;
        }
        Ok(self)
    }

    pub fn times(&self, s: f64) -> Matrix
    { self.map(|a| s * a) }

    pub fn times_equals(&mut self, s: f64) -> &mut Self
    {
        for a in &mut self.data {
            *a *= s;
        }
        self
    }

    /// Matrix product.  Entry `(i, j)` is row `i` of `self` dotted with column `j` of `other`.
    pub fn multiply(&self, other: &Matrix) -> Result<Matrix, DimensionError>
    {
        if self.width != other.height {
            return Err(DimensionError::matrices("multiply", self.dims(), other.dims()));
        }

        let other_t = other.view().transpose();
        let mut data = Vec::with_capacity(self.height * other.width);
        for row in self.rows() {
            for c in 0..other.width {
                data.push(row.iter().zip_eq(other_t.row_iter(c)).map(|(a, b)| a * b).sum::<f64>());
            }
        }
        Ok(Matrix { data, height: self.height, width: other.width })
    }

    /// In-place product `self = self * other`.  The shape of `self` may change.
    pub fn multiply_equals(&mut self, other: &Matrix) -> Result<&mut Self, DimensionError>
    {
        *self = self.multiply(other)?;
        Ok(self)
    }

    /// Product with a column vector.
    ///
    /// The length of `b` is validated against the number of *rows*.  For a
    /// non-square matrix the row dot products then fail on the column count,
    /// so the call only succeeds for square matrices.
    pub fn multiply_vector(&self, b: &[f64]) -> Result<Vec<f64>, DimensionError>
    {
        if b.len() != self.height {
            return Err(DimensionError {
                op: "multiply_vector",
                left: Dims::Matrix(self.height, self.width),
                right: Dims::Vector(b.len()),
            });
        }
        self.rows().map(|row| slice_math::dot(row, b)).collect()
    }

    /// Largest absolute value of any element, or `0.0` for an empty matrix.
    pub fn max_norm(&self) -> f64
    { self.rows().map(slice_math::max_abs).fold(0.0, f64::max) }

    /// `max_norm` of `self - other`.
    pub fn max_abs_diff(&self, other: &Matrix) -> Result<f64, DimensionError>
    { self.minus(other).map(|diff| diff.max_norm()) }
}

// The operator impls panic on mismatched shapes, like the rest of std's operators.

impl<'a, 'b> Mul<&'b Matrix> for &'a Matrix {
    type Output = Matrix;

    fn mul(self, rhs: &'b Matrix) -> Matrix
    {
        match self.multiply(rhs) {
            Ok(out) => out,
            Err(e) => panic!("{}", e),
        }
    }
}

impl<'a, 'b> Add<&'b Matrix> for &'a Matrix {
    type Output = Matrix;

    fn add(self, rhs: &'b Matrix) -> Matrix
    {
        match self.plus(rhs) {
            Ok(out) => out,
            Err(e) => panic!("{}", e),
        }
    }
}

impl<'a, 'b> Sub<&'b Matrix> for &'a Matrix {
    type Output = Matrix;

    fn sub(self, rhs: &'b Matrix) -> Matrix
    {
        match self.minus(rhs) {
            Ok(out) => out,
            Err(e) => panic!("{}", e),
        }
    }
}

impl<'a> Mul<f64> for &'a Matrix {
    type Output = Matrix;

    fn mul(self, s: f64) -> Matrix { self.times(s) }
}

impl<'a> Neg for &'a Matrix {
    type Output = Matrix;

    fn neg(self) -> Matrix { self.map(|a| -a) }
}

impl CheckClose for Matrix {
    fn check_close(&self, other: &Matrix, tol: Tolerances) -> Result<(), CheckCloseError>
    {
        if self.dims() != other.dims() {
            return Err(CheckCloseError::ShapeMismatch {
                path: vec![],
                left: vec![self.height, self.width],
                right: vec![other.height, other.width],
            });
        }
        for (r, (a, b)) in self.rows().zip(other.rows()).enumerate() {
            a.check_close(b, tol).map_err(|e| e.within(r))?;
        }
        Ok(())
    }
}
