//! Small dense and banded linear solvers.
//!
//! The systems that show up in curve construction are tiny (one row per
//! control point), so plain Gaussian elimination and the Thomas algorithm are
//! all that is needed. Right-hand sides are generic so the same solver handles
//! scalar data (spline second derivatives) and 2D points at once.

use crate::error::CurveError;
use num_traits::Float;
use std::ops::{Div, Mul, Sub};

/// Solves a tridiagonal system with the Thomas algorithm.
///
/// Row `i` reads `sub[i] * x[i-1] + diag[i] * x[i] + sup[i] * x[i+1] = rhs[i]`;
/// `sub[0]` and `sup[n-1]` are ignored. All slices must have the same length.
///
/// No pivoting is performed, so the matrix should be diagonally dominant
/// (every system built in this crate is). A vanishing pivot yields
/// [`CurveError::SingularSystem`].
pub fn solve_tridiagonal<F, T>(sub: &[F], diag: &[F], sup: &[F], rhs: &[T]) -> Result<Vec<T>, CurveError>
where
    F: Float,
    T: Copy + Sub<Output = T> + Mul<F, Output = T> + Div<F, Output = T>,
{
    let n = diag.len();
    debug_assert!(sub.len() == n && sup.len() == n && rhs.len() == n);
    if n == 0 {
        return Ok(Vec::new());
    }

    let mut c_prime = vec![F::zero(); n];
    let mut d_prime: Vec<T> = Vec::with_capacity(n);

    if diag[0].abs() <= F::epsilon() {
        return Err(CurveError::SingularSystem);
    }
    c_prime[0] = sup[0] / diag[0];
    d_prime.push(rhs[0] / diag[0]);

    // Forward sweep
    for i in 1..n {
        let denom = diag[i] - sub[i] * c_prime[i - 1];
        if denom.abs() <= F::epsilon() {
            return Err(CurveError::SingularSystem);
        }
        if i < n - 1 {
            c_prime[i] = sup[i] / denom;
        }
        let d = (rhs[i] - d_prime[i - 1] * sub[i]) / denom;
        d_prime.push(d);
    }

    // Back substitution
    let mut x = d_prime;
    for i in (0..n - 1).rev() {
        x[i] = x[i] - x[i + 1] * c_prime[i];
    }
    Ok(x)
}

/// Solves `A X = B` by Gaussian elimination with partial pivoting.
///
/// `a` is a square matrix given as rows; `b` holds one row per equation with
/// any number of right-hand-side columns. Returns `X` in the same row layout
/// as `b`.
pub fn solve_dense<F: Float>(mut a: Vec<Vec<F>>, mut b: Vec<Vec<F>>) -> Result<Vec<Vec<F>>, CurveError> {
    let n = a.len();
    debug_assert!(a.iter().all(|row| row.len() == n) && b.len() == n);
    if n == 0 {
        return Ok(b);
    }
    let cols = b[0].len();

    let scale = a
        .iter()
        .flat_map(|row| row.iter())
        .fold(F::zero(), |m, v| m.max(v.abs()));
    let tolerance = scale * F::epsilon() * F::from(n).unwrap_or_else(F::one);

    for k in 0..n {
        let pivot_row = (k..n)
            .max_by(|&i, &j| {
                a[i][k]
                    .abs()
                    .partial_cmp(&a[j][k].abs())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .unwrap_or(k);
        let pivot = a[pivot_row][k].abs();
        if pivot.is_nan() || pivot <= tolerance {
            return Err(CurveError::SingularSystem);
        }
        a.swap(k, pivot_row);
        b.swap(k, pivot_row);

        for i in k + 1..n {
            let factor = a[i][k] / a[k][k];
            if factor == F::zero() {
                continue;
            }
            for j in k..n {
                a[i][j] = a[i][j] - factor * a[k][j];
            }
            for c in 0..cols {
                b[i][c] = b[i][c] - factor * b[k][c];
            }
        }
    }

    let mut x = vec![vec![F::zero(); cols]; n];
    for i in (0..n).rev() {
        for c in 0..cols {
            let mut sum = b[i][c];
            for j in i + 1..n {
                sum = sum - a[i][j] * x[j][c];
            }
            x[i][c] = sum / a[i][i];
        }
    }
    Ok(x)
}

/// Least-squares solution of the overdetermined system `M X ≈ B`.
///
/// Forms the normal equations `(MᵀM) X = MᵀB` and solves them with
/// [`solve_dense`]. `m` has one row per equation and `unknowns` columns.
pub fn least_squares<F: Float>(m: &[Vec<F>], b: &[Vec<F>], unknowns: usize) -> Result<Vec<Vec<F>>, CurveError> {
    debug_assert_eq!(m.len(), b.len());
    let cols = b.first().map_or(0, Vec::len);

    let mut mtm = vec![vec![F::zero(); unknowns]; unknowns];
    let mut mtb = vec![vec![F::zero(); cols]; unknowns];

    for (row, rhs) in m.iter().zip(b) {
        for i in 0..unknowns {
            if row[i] == F::zero() {
                continue;
            }
            for j in 0..unknowns {
                mtm[i][j] = mtm[i][j] + row[i] * row[j];
            }
            for c in 0..cols {
                mtb[i][c] = mtb[i][c] + row[i] * rhs[c];
            }
        }
    }

    solve_dense(mtm, mtb)
}
