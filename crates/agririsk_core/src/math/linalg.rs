//! Dense linear algebra for small regression problems.
//!
//! Feature counts in this pipeline are in the tens, so a plain row-major
//! `Vec<f64>` and an O(n³) Cholesky factorisation are sufficient.

/// Row-major dense matrix.
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Zero matrix of the given shape.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Build from row-major data.
    ///
    /// Returns `None` if `data.len() != rows * cols`.
    pub fn from_row_major(rows: usize, cols: usize, data: Vec<f64>) -> Option<Self> {
        if data.len() != rows * cols {
            return None;
        }
        Some(Self { rows, cols, data })
    }

    /// Build from equal-length columns.
    ///
    /// Returns `None` if the columns differ in length.
    ///
    /// # Examples
    ///
    /// ```
    /// use agririsk_core::math::Matrix;
    ///
    /// let m = Matrix::from_columns(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
    /// assert_eq!(m.row(1), &[2.0, 4.0]);
    /// ```
    pub fn from_columns(columns: &[Vec<f64>]) -> Option<Self> {
        let cols = columns.len();
        let rows = columns.first().map_or(0, Vec::len);
        if columns.iter().any(|c| c.len() != rows) {
            return None;
        }
        let mut data = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            data.extend(columns.iter().map(|c| c[i]));
        }
        Some(Self { rows, cols, data })
    }

    /// Number of rows.
    pub fn n_rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn n_cols(&self) -> usize {
        self.cols
    }

    /// Element at `(i, j)`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.cols + j]
    }

    /// Borrow row `i`.
    #[inline]
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// Copy of column `j`.
    pub fn column(&self, j: usize) -> Vec<f64> {
        (0..self.rows).map(|i| self.get(i, j)).collect()
    }

    /// New matrix holding the given rows in order.
    pub fn select_rows(&self, indices: &[usize]) -> Matrix {
        let mut data = Vec::with_capacity(indices.len() * self.cols);
        for &i in indices {
            data.extend_from_slice(self.row(i));
        }
        Matrix {
            rows: indices.len(),
            cols: self.cols,
            data,
        }
    }

    /// Column means. Empty matrices yield NaN means.
    pub fn column_means(&self) -> Vec<f64> {
        let mut sums = vec![0.0; self.cols];
        for i in 0..self.rows {
            for (s, x) in sums.iter_mut().zip(self.row(i)) {
                *s += x;
            }
        }
        let n = self.rows as f64;
        sums.into_iter().map(|s| s / n).collect()
    }

    /// Gram matrix XᵀX as nested rows.
    pub fn gram(&self) -> Vec<Vec<f64>> {
        let mut g = vec![vec![0.0; self.cols]; self.cols];
        for i in 0..self.rows {
            let r = self.row(i);
            for a in 0..self.cols {
                let ra = r[a];
                if ra == 0.0 {
                    continue;
                }
                for b in a..self.cols {
                    g[a][b] += ra * r[b];
                }
            }
        }
        for a in 0..self.cols {
            for b in 0..a {
                g[a][b] = g[b][a];
            }
        }
        g
    }

    /// Xᵀv.
    pub fn t_mul_vec(&self, v: &[f64]) -> Vec<f64> {
        let mut out = vec![0.0; self.cols];
        for (i, vi) in v.iter().enumerate().take(self.rows) {
            for (o, x) in out.iter_mut().zip(self.row(i)) {
                *o += x * vi;
            }
        }
        out
    }

    /// Xw.
    pub fn mul_vec(&self, w: &[f64]) -> Vec<f64> {
        (0..self.rows)
            .map(|i| self.row(i).iter().zip(w).map(|(x, b)| x * b).sum())
            .collect()
    }

    /// Apply `f(j, x)` to every element of column `j`.
    pub fn map_columns(&mut self, f: impl Fn(usize, f64) -> f64) {
        for i in 0..self.rows {
            for j in 0..self.cols {
                let idx = i * self.cols + j;
                self.data[idx] = f(j, self.data[idx]);
            }
        }
    }
}

/// Solve `A x = b` for symmetric positive-definite `A` by Cholesky
/// decomposition.
///
/// Returns `None` if `A` is not positive definite or the shapes disagree.
///
/// # Examples
///
/// ```
/// use agririsk_core::math::solve_cholesky;
///
/// let a = vec![vec![4.0, 2.0], vec![2.0, 3.0]];
/// let x = solve_cholesky(&a, &[2.0, 1.0]).unwrap();
/// assert!((x[0] - 0.5).abs() < 1e-12);
/// assert!(x[1].abs() < 1e-12);
/// ```
pub fn solve_cholesky(a: &[Vec<f64>], b: &[f64]) -> Option<Vec<f64>> {
    let n = b.len();
    if a.len() != n || a.iter().any(|r| r.len() != n) {
        return None;
    }
    if n == 0 {
        return Some(Vec::new());
    }

    // A = L Lᵀ
    let mut l = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in 0..=i {
            let mut sum = a[i][j];
            for k in 0..j {
                sum -= l[i][k] * l[j][k];
            }
            if i == j {
                if sum <= 0.0 || !sum.is_finite() {
                    return None;
                }
                l[i][j] = sum.sqrt();
            } else {
                l[i][j] = sum / l[j][j];
            }
        }
    }

    // L y = b
    let mut y = vec![0.0; n];
    for i in 0..n {
        let mut sum = b[i];
        for j in 0..i {
            sum -= l[i][j] * y[j];
        }
        y[i] = sum / l[i][i];
    }

    // Lᵀ x = y
    let mut x = vec![0.0; n];
    for i in (0..n).rev() {
        let mut sum = y[i];
        for j in (i + 1)..n {
            sum -= l[j][i] * x[j];
        }
        x[i] = sum / l[i][i];
    }

    Some(x)
}
