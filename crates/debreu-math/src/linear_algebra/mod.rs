//! Linear algebra utilities.
//!
//! Dense LU factorization with partial pivoting, numerical rank, and
//! block-diagonal assembly on top of `nalgebra` matrices.

use log::debug;
use nalgebra::{DMatrix, DVector};

use crate::error::{MathError, MathResult};

/// Pivots smaller than this fraction of the largest matrix entry are
/// treated as zero.
pub const SINGULAR_PIVOT_TOLERANCE: f64 = 1e-12;

/// LU factorization `P·A = L·U` computed with partial (row) pivoting.
///
/// `L` (unit lower triangular) and `U` are packed into a single matrix; the
/// row permutation is stored as the source row of each factored row.
#[derive(Debug, Clone)]
pub struct LuFactorization {
    lu: DMatrix<f64>,
    permutation: Vec<usize>,
    swaps: usize,
}

impl LuFactorization {
    /// Factors a square matrix.
    ///
    /// Fails with [`MathError::NotSquare`] for rectangular input and with
    /// [`MathError::SingularMatrix`] when no pivot above
    /// [`SINGULAR_PIVOT_TOLERANCE`] (relative to the largest entry) exists.
    pub fn new(matrix: &DMatrix<f64>) -> MathResult<Self> {
        let n = matrix.nrows();
        if n != matrix.ncols() {
            return Err(MathError::NotSquare {
                rows: n,
                cols: matrix.ncols(),
            });
        }

        let scale = matrix.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
        let threshold = SINGULAR_PIVOT_TOLERANCE * scale;

        let mut lu = matrix.clone();
        let mut permutation: Vec<usize> = (0..n).collect();
        let mut swaps = 0;

        for k in 0..n {
            let mut pivot_row = k;
            for i in k + 1..n {
                if lu[(i, k)].abs() > lu[(pivot_row, k)].abs() {
                    pivot_row = i;
                }
            }

            let pivot_abs = lu[(pivot_row, k)].abs();
            if pivot_abs.is_nan() || pivot_abs <= threshold {
                debug!("LU breakdown at column {} of {}x{} matrix", k, n, n);
                return Err(MathError::SingularMatrix { column: k });
            }

            if pivot_row != k {
                lu.swap_rows(k, pivot_row);
                permutation.swap(k, pivot_row);
                swaps += 1;
            }

            let pivot = lu[(k, k)];
            for i in k + 1..n {
                let factor = lu[(i, k)] / pivot;
                lu[(i, k)] = factor;
                for j in k + 1..n {
                    lu[(i, j)] -= factor * lu[(k, j)];
                }
            }
        }

        Ok(Self {
            lu,
            permutation,
            swaps,
        })
    }

    /// Dimension of the factored matrix.
    pub fn dim(&self) -> usize {
        self.lu.nrows()
    }

    /// Unit lower triangular factor `L`.
    pub fn l(&self) -> DMatrix<f64> {
        let n = self.dim();
        DMatrix::from_fn(n, n, |i, j| match i.cmp(&j) {
            std::cmp::Ordering::Greater => self.lu[(i, j)],
            std::cmp::Ordering::Equal => 1.0,
            std::cmp::Ordering::Less => 0.0,
        })
    }

    /// Upper triangular factor `U`.
    pub fn u(&self) -> DMatrix<f64> {
        self.lu.upper_triangle()
    }

    /// Row permutation: row `i` of `P·A` is row `permutation()[i]` of `A`.
    pub fn permutation(&self) -> &[usize] {
        &self.permutation
    }

    /// Determinant of the original matrix.
    pub fn determinant(&self) -> f64 {
        let sign = if self.swaps % 2 == 0 { 1.0 } else { -1.0 };
        sign * self.lu.diagonal().iter().product::<f64>()
    }

    /// Solves `A·x = b` by forward and back substitution.
    pub fn solve(&self, b: &DVector<f64>) -> MathResult<DVector<f64>> {
        let n = self.dim();
        if b.len() != n {
            return Err(MathError::DimensionMismatch {
                rows1: n,
                cols1: n,
                rows2: b.len(),
                cols2: 1,
            });
        }

        // Ly = Pb
        let mut y = DVector::zeros(n);
        for i in 0..n {
            let mut sum = b[self.permutation[i]];
            for j in 0..i {
                sum -= self.lu[(i, j)] * y[j];
            }
            y[i] = sum;
        }

        // Ux = y
        let mut x = DVector::zeros(n);
        for i in (0..n).rev() {
            let mut sum = y[i];
            for j in i + 1..n {
                sum -= self.lu[(i, j)] * x[j];
            }
            x[i] = sum / self.lu[(i, i)];
        }

        Ok(x)
    }
}

/// Solves a linear system `A·x = b` using LU decomposition with partial pivoting.
pub fn solve_linear_system(a: &DMatrix<f64>, b: &DVector<f64>) -> MathResult<DVector<f64>> {
    LuFactorization::new(a)?.solve(b)
}

/// Default rank tolerance: `max(rows, cols) · ε · σ_max`.
pub fn default_rank_tolerance(matrix: &DMatrix<f64>, largest_singular_value: f64) -> f64 {
    let dim = matrix.nrows().max(matrix.ncols()) as f64;
    dim * f64::EPSILON * largest_singular_value
}

/// Numerical rank: the number of singular values above `tolerance`.
///
/// With `tolerance = None` the threshold is [`default_rank_tolerance`].
/// Empty matrices have rank zero.
pub fn matrix_rank(matrix: &DMatrix<f64>, tolerance: Option<f64>) -> usize {
    if matrix.nrows() == 0 || matrix.ncols() == 0 {
        return 0;
    }

    let singular_values = matrix.singular_values();
    let largest = singular_values.iter().fold(0.0_f64, |acc, s| acc.max(*s));
    let tol = tolerance.unwrap_or_else(|| default_rank_tolerance(matrix, largest));

    singular_values.iter().filter(|s| **s > tol).count()
}

/// Assembles matrices along the diagonal of a zero matrix.
///
/// Blocks need not be square; empty blocks contribute nothing.
pub fn block_diagonal(blocks: &[DMatrix<f64>]) -> DMatrix<f64> {
    let rows = blocks.iter().map(|b| b.nrows()).sum();
    let cols = blocks.iter().map(|b| b.ncols()).sum();
    let mut result = DMatrix::zeros(rows, cols);

    let (mut r, mut c) = (0, 0);
    for block in blocks {
        let (nr, nc) = block.shape();
        result.view_mut((r, c), (nr, nc)).copy_from(block);
        r += nr;
        c += nc;
    }

    result
}
