//! Dense least-squares support shared by the forecasting and attribution
//! engines. Small systems only (a handful of coefficients), so the normal
//! equations with Gaussian elimination are accurate enough and keep the fit
//! closed-form and deterministic.

/// Relative pivot threshold below which a system is treated as singular.
const PIVOT_TOLERANCE: f64 = 1e-10;

/// Solves `min ||X b - y||^2` for `b` via the normal equations
/// `(X^T X) b = X^T y`. Rows of `design` are observations. Returns `None`
/// when `X^T X` is singular or too ill-conditioned to pivot.
pub(crate) fn least_squares(design: &[Vec<f64>], targets: &[f64]) -> Option<Vec<f64>> {
    if design.is_empty() || design.len() != targets.len() {
        return None;
    }
    let p = design[0].len();

    let mut xtx = vec![vec![0.0; p]; p];
    let mut xty = vec![0.0; p];
    for (row, &y) in design.iter().zip(targets) {
        for i in 0..p {
            xty[i] += row[i] * y;
            for j in i..p {
                xtx[i][j] += row[i] * row[j];
            }
        }
    }
    // X^T X is symmetric; mirror the upper triangle.
    for i in 0..p {
        for j in 0..i {
            xtx[i][j] = xtx[j][i];
        }
    }

    solve(xtx, xty)
}

/// Gaussian elimination with partial pivoting on a square system.
pub(crate) fn solve(mut a: Vec<Vec<f64>>, mut b: Vec<f64>) -> Option<Vec<f64>> {
    let n = b.len();
    let scale = a
        .iter()
        .flatten()
        .fold(0.0f64, |acc, &v| acc.max(v.abs()))
        .max(1.0);

    for col in 0..n {
        let pivot_row = (col..n)
            .max_by(|&r, &s| a[r][col].abs().total_cmp(&a[s][col].abs()))?;
        if a[pivot_row][col].abs() <= PIVOT_TOLERANCE * scale {
            return None;
        }
        a.swap(col, pivot_row);
        b.swap(col, pivot_row);

        for row in (col + 1)..n {
            let factor = a[row][col] / a[col][col];
            if factor == 0.0 {
                continue;
            }
            for k in col..n {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut x = vec![0.0; n];
    for row in (0..n).rev() {
        let mut acc = b[row];
        for col in (row + 1)..n {
            acc -= a[row][col] * x[col];
        }
        x[row] = acc / a[row][row];
    }
    Some(x)
}

pub(crate) fn dot(row: &[f64], coefficients: &[f64]) -> f64 {
    row.iter()
        .zip(coefficients)
        .map(|(a, b)| a * b)
        .sum()
}

pub(crate) fn residual_sum_of_squares(
    design: &[Vec<f64>],
    targets: &[f64],
    coefficients: &[f64],
) -> f64 {
    design
        .iter()
        .zip(targets)
        .map(|(row, &y)| {
            let r = y - dot(row, coefficients);
            r * r
        })
        .sum()
}
