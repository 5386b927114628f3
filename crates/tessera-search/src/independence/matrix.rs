//! Dense linear algebra for the Fisher Z test.

/// Sample covariance (n - 1 denominator) of equal-length columns.
pub fn covariance_matrix(columns: &[Vec<f64>]) -> Vec<Vec<f64>> {
    let p = columns.len();
    let n = columns.first().map_or(0, Vec::len);
    let means: Vec<f64> = columns
        .iter()
        .map(|c| c.iter().sum::<f64>() / n.max(1) as f64)
        .collect();
    let denom = n.saturating_sub(1).max(1) as f64;

    let mut cov = vec![vec![0.0; p]; p];
    for i in 0..p {
        for j in i..p {
            let s: f64 = columns[i]
                .iter()
                .zip(&columns[j])
                .map(|(a, b)| (a - means[i]) * (b - means[j]))
                .sum();
            cov[i][j] = s / denom;
            cov[j][i] = cov[i][j];
        }
    }
    cov
}

/// Rows and columns `indices` of `matrix`, in that order.
pub fn submatrix(matrix: &[Vec<f64>], indices: &[usize]) -> Vec<Vec<f64>> {
    indices
        .iter()
        .map(|&i| indices.iter().map(|&j| matrix[i][j]).collect())
        .collect()
}

/// Gauss-Jordan inverse with partial pivoting. `None` if singular to
/// within a tolerance scaled by the largest diagonal entry.
pub fn invert(matrix: &[Vec<f64>]) -> Option<Vec<Vec<f64>>> {
    let n = matrix.len();
    let scale = (0..n).map(|i| matrix[i][i].abs()).fold(0.0_f64, f64::max);
    if scale == 0.0 || !scale.is_finite() {
        return None;
    }
    let tolerance = scale * 1e-12;

    let mut a: Vec<Vec<f64>> = matrix.to_vec();
    let mut inv: Vec<Vec<f64>> = (0..n)
        .map(|i| (0..n).map(|j| if i == j { 1.0 } else { 0.0 }).collect())
        .collect();

    for col in 0..n {
        let pivot = (col..n).max_by(|&r, &s| a[r][col].abs().total_cmp(&a[s][col].abs()))?;
        if a[pivot][col].abs() <= tolerance {
            return None;
        }
        a.swap(col, pivot);
        inv.swap(col, pivot);

        let d = a[col][col];
        for k in 0..n {
            a[col][k] /= d;
            inv[col][k] /= d;
        }
        for row in 0..n {
            if row == col {
                continue;
            }
            let factor = a[row][col];
            if factor == 0.0 {
                continue;
            }
            let (pivot_row, pivot_inv) = (a[col].clone(), inv[col].clone());
            for k in 0..n {
                a[row][k] -= factor * pivot_row[k];
                inv[row][k] -= factor * pivot_inv[k];
            }
        }
    }
    Some(inv)
}
