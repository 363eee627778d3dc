//! Ordinary least squares with an intercept.
//!
//! Features and target are centered and every feature column is scaled to
//! unit norm, so columns in the thousands and columns near 0.05 are treated
//! alike. The normal equations of the scaled problem (a correlation matrix)
//! are solved with Gaussian elimination (partial pivoting), coefficients are
//! mapped back to the original units, and the intercept is recovered from
//! the means. A feature whose pivot vanishes (constant or collinear with
//! earlier ones) gets a zero coefficient instead of failing the fit.

use serde::{Deserialize, Serialize};

/// Pivot magnitude on the unit-diagonal scaled system below which a column
/// is treated as linearly dependent.
const PIVOT_EPS: f64 = 1e-10;

/// Relative norm below which a centered column counts as constant.
const CONSTANT_EPS: f64 = 1e-12;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fit {
    pub intercept: f64,
    pub coefficients: Vec<f64>,
}

impl Fit {
    pub fn predict(&self, x: &[f64]) -> f64 {
        self.intercept
            + self
                .coefficients
                .iter()
                .zip(x)
                .map(|(b, v)| b * v)
                .sum::<f64>()
    }
}

/// Fit `y ≈ intercept + Σ bᵢ xᵢ`. `x` is row-major with `n_features` columns.
/// Returns `None` for an empty design.
pub fn fit(x: &[Vec<f64>], y: &[f64], n_features: usize) -> Option<Fit> {
    let n = x.len().min(y.len());
    if n == 0 {
        return None;
    }
    let nf = n as f64;

    let mut x_mean = vec![0.0; n_features];
    for row in &x[..n] {
        for (m, v) in x_mean.iter_mut().zip(row) {
            *m += v;
        }
    }
    x_mean.iter_mut().for_each(|m| *m /= nf);
    let y_mean = y[..n].iter().sum::<f64>() / nf;

    // Per-column norm of the centered data; 0 marks a constant column.
    let mut norms = vec![0.0; n_features];
    for row in &x[..n] {
        for j in 0..n_features {
            norms[j] += (row[j] - x_mean[j]).powi(2);
        }
    }
    for (norm, mean) in norms.iter_mut().zip(&x_mean) {
        *norm = norm.sqrt();
        if *norm <= CONSTANT_EPS * mean.abs().max(1.0) * nf.sqrt() {
            *norm = 0.0;
        }
    }

    // Augmented normal-equation matrix [ZᵀZ | Zᵀy] on centered, unit-norm columns.
    let mut a = vec![vec![0.0; n_features + 1]; n_features];
    for (row, &yv) in x[..n].iter().zip(&y[..n]) {
        let z: Vec<f64> = (0..n_features)
            .map(|j| {
                if norms[j] > 0.0 {
                    (row[j] - x_mean[j]) / norms[j]
                } else {
                    0.0
                }
            })
            .collect();
        let yc = yv - y_mean;
        for i in 0..n_features {
            for j in 0..n_features {
                a[i][j] += z[i] * z[j];
            }
            a[i][n_features] += z[i] * yc;
        }
    }

    let coefficients: Vec<f64> = solve(a, n_features)
        .into_iter()
        .zip(&norms)
        .map(|(g, &norm)| if norm > 0.0 { g / norm } else { 0.0 })
        .collect();
    let intercept = y_mean
        - coefficients
            .iter()
            .zip(&x_mean)
            .map(|(b, m)| b * m)
            .sum::<f64>();

    Some(Fit {
        intercept,
        coefficients,
    })
}

/// Gauss-Jordan elimination on an augmented `k × (k+1)` matrix whose
/// diagonal is 1 (or 0 for constant columns). Dependent columns are left
/// free and set to 0.
fn solve(mut a: Vec<Vec<f64>>, k: usize) -> Vec<f64> {
    let mut pivot_row_of = vec![None; k];
    let mut row = 0;
    for col in 0..k {
        if row == k {
            break;
        }
        let best = (row..k)
            .max_by(|&p, &q| a[p][col].abs().total_cmp(&a[q][col].abs()))
            .unwrap_or(row);
        if a[best][col].abs() <= PIVOT_EPS {
            continue;
        }
        a.swap(row, best);

        let piv = a[row][col];
        for v in a[row].iter_mut() {
            *v /= piv;
        }
        for r in 0..k {
            if r != row {
                let factor = a[r][col];
                if factor != 0.0 {
                    for c in 0..=k {
                        a[r][c] -= factor * a[row][c];
                    }
                }
            }
        }
        pivot_row_of[col] = Some(row);
        row += 1;
    }

    pivot_row_of
        .into_iter()
        .map(|p| p.map(|r| a[r][k]).unwrap_or(0.0))
        .collect()
}

/// Coefficient of determination of `fit` on (`x`, `y`). A constant target
/// scores 1.0 when predicted exactly and 0.0 otherwise.
pub fn r_squared(fit: &Fit, x: &[Vec<f64>], y: &[f64]) -> Option<f64> {
    if y.is_empty() {
        return None;
    }
    let mean = y.iter().sum::<f64>() / y.len() as f64;
    let ss_tot: f64 = y.iter().map(|v| (v - mean).powi(2)).sum();
    let ss_res: f64 = x
        .iter()
        .zip(y)
        .map(|(row, v)| (v - fit.predict(row)).powi(2))
        .sum();
    Some(if ss_tot > 1e-12 {
        1.0 - ss_res / ss_tot
    } else if ss_res > 1e-12 {
        0.0
    } else {
        1.0
    })
}
