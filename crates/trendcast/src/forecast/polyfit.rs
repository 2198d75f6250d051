//! Polynomial least squares via Householder QR.
//!
//! The design matrix is the Vandermonde matrix of the abscissae, stored column
//! by column. QR works on that matrix directly, so its condition number enters
//! the error once; the normal equations `XᵀX β = Xᵀy` would square it.
//! Abscissae are expected to be rescaled to [−1, 1] by the caller, which keeps
//! the columns of comparable magnitude.

use crate::error::{Error, Result};

/// Relative threshold on the diagonal of R below which the design is treated
/// as rank deficient.
pub(crate) const RANK_TOLERANCE: f64 = 1e-10;

/// Builds the columns `[1, x, x², …, x^degree]`.
pub(crate) fn vandermonde_columns(x: &[f64], degree: usize) -> Vec<Vec<f64>> {
    let mut columns = Vec::with_capacity(degree + 1);
    let mut current = vec![1.0; x.len()];
    for _ in 0..degree {
        let next = current.iter().zip(x).map(|(c, xi)| c * xi).collect();
        columns.push(std::mem::replace(&mut current, next));
    }
    columns.push(current);
    columns
}

/// Fits a polynomial of `degree` to `(x, y)` and returns its coefficients in
/// ascending powers.
///
/// # Errors
///
/// - `Error::InsufficientData` if there are fewer than `degree + 1` points
/// - `Error::SingularDesign` if the Vandermonde matrix is rank deficient
pub(crate) fn polyfit(x: &[f64], y: &[f64], degree: usize) -> Result<Vec<f64>> {
    let required = degree.saturating_add(1);
    if x.len() < required {
        return Err(Error::InsufficientData {
            required,
            actual: x.len(),
            operation: "polynomial fit",
        });
    }
    let columns = vandermonde_columns(x, degree);
    least_squares(columns, y.to_vec())
}

/// Solves `min ‖A β − b‖₂` for a tall matrix given as columns.
///
/// Householder reflections reduce `A` to upper-triangular `R` in place while
/// the same reflections are applied to `b`; `β` then follows by back
/// substitution on the leading square block.
pub(crate) fn least_squares(mut columns: Vec<Vec<f64>>, mut rhs: Vec<f64>) -> Result<Vec<f64>> {
    let m = columns.len();
    let n = rhs.len();
    debug_assert!(columns.iter().all(|c| c.len() == n));
    if m == 0 || n < m {
        return Err(Error::SingularDesign {
            degree: m.saturating_sub(1),
        });
    }

    let mut diagonal = vec![0.0; m];
    for k in 0..m {
        let norm = columns[k][k..].iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm == 0.0 {
            // nothing left to reflect; the rank check below rejects it
            continue;
        }
        let alpha = if columns[k][k] > 0.0 { -norm } else { norm };

        let mut reflector = columns[k][k..].to_vec();
        reflector[0] -= alpha;
        let reflector_sq: f64 = reflector.iter().map(|v| v * v).sum();

        if reflector_sq > 0.0 {
            for column in columns.iter_mut().skip(k + 1) {
                apply_reflector(&reflector, reflector_sq, &mut column[k..]);
            }
            apply_reflector(&reflector, reflector_sq, &mut rhs[k..]);
        }

        diagonal[k] = alpha;
        columns[k][k] = alpha;
    }

    let max_diag = diagonal.iter().fold(0.0_f64, |acc, d| acc.max(d.abs()));
    log::trace!("householder diagonal {diagonal:?}, max {max_diag}");
    if !max_diag.is_finite()
        || max_diag == 0.0
        || diagonal.iter().any(|d| d.abs() <= RANK_TOLERANCE * max_diag)
    {
        return Err(Error::SingularDesign { degree: m - 1 });
    }

    // back substitution on R β = (Qᵀ b)[..m]
    let mut beta = vec![0.0; m];
    for row in (0..m).rev() {
        let tail: f64 = (row + 1..m).map(|j| columns[j][row] * beta[j]).sum();
        beta[row] = (rhs[row] - tail) / columns[row][row];
    }

    if beta.iter().any(|b| !b.is_finite()) {
        return Err(Error::NonFiniteResult {
            context: "least-squares coefficients",
        });
    }
    Ok(beta)
}

/// Applies `I − 2 v vᵀ / (vᵀv)` to `target`.
#[inline]
fn apply_reflector(reflector: &[f64], reflector_sq: f64, target: &mut [f64]) {
    let dot: f64 = reflector.iter().zip(target.iter()).map(|(v, t)| v * t).sum();
    let factor = 2.0 * dot / reflector_sq;
    for (t, v) in target.iter_mut().zip(reflector) {
        *t -= factor * v;
    }
}

/// Evaluates a polynomial with ascending coefficients at `x` (Horner's rule).
#[inline]
pub(crate) fn horner(coefficients: &[f64], x: f64) -> f64 {
    coefficients.iter().rev().fold(0.0, |acc, c| acc * x + c)
}
