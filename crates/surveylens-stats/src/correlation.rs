//! Pearson and Spearman correlation.

use crate::rank::Ranking;

/// Pearson product-moment correlation of two equally long samples.
///
/// # Arguments
///
/// * `x` - The first sample
/// * `y` - The second sample, paired with `x` by position
///
/// # Returns
///
/// The coefficient in `[-1, 1]`, or `NaN` if the samples differ in length,
/// hold fewer than two pairs, or either sample has zero variance.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    if x.len() != y.len() || x.len() < 2 {
        return f64::NAN;
    }
    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (a, b) in x.iter().zip(y) {
        let dx = a - mean_x;
        let dy = b - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    if var_x == 0.0 || var_y == 0.0 {
        return f64::NAN;
    }
    (cov / (var_x * var_y).sqrt()).clamp(-1.0, 1.0)
}

/// Spearman rank correlation: Pearson correlation of the average ranks.
///
/// # Examples
///
/// ```
/// # use surveylens_stats::correlation::spearman;
/// let rho = spearman(&[1.0, 2.0, 3.0, 4.0], &[10.0, 20.0, 25.0, 100.0]);
/// assert!((rho - 1.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn spearman(x: &[f64], y: &[f64]) -> f64 {
    if x.len() != y.len() {
        return f64::NAN;
    }
    pearson(&Ranking::new(x).ranks, &Ranking::new(y).ranks)
}

/// Spearman correlation matrix over equally long columns.
///
/// # Arguments
///
/// * `columns` - One sample per variable, all paired by position
///
/// # Returns
///
/// A symmetric matrix whose entry `[i][j]` is the correlation of
/// `columns[i]` and `columns[j]`. Diagonal entries are `1.0` unless the
/// column is constant, in which case its whole row and column are `NaN`.
#[must_use]
pub fn spearman_matrix<S>(columns: &[S]) -> Vec<Vec<f64>>
where
    S: AsRef<[f64]>,
{
    let ranks = columns
        .iter()
        .map(|column| Ranking::new(column.as_ref()).ranks)
        .collect::<Vec<_>>();
    ranks
        .iter()
        .map(|a| ranks.iter().map(|b| pearson(a, b)).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pearson_linear() {
        let r = pearson(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]);
        assert!((r - 1.0).abs() < 1e-12);
        let r = pearson(&[1.0, 2.0, 3.0], &[3.0, 2.0, 1.0]);
        assert!((r + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_undefined_correlations() {
        assert!(pearson(&[1.0], &[2.0]).is_nan());
        assert!(pearson(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]).is_nan());
        assert!(spearman(&[1.0, 2.0], &[1.0]).is_nan());
    }

    #[test]
    fn test_spearman_with_ties() {
        // scipy.stats.spearmanr([1, 2, 2, 3], [1, 3, 2, 4]) = 0.9486832980505138
        let rho = spearman(&[1.0, 2.0, 2.0, 3.0], &[1.0, 3.0, 2.0, 4.0]);
        assert!((rho - 0.948_683_298).abs() < 1e-9);
    }

    #[test]
    fn test_matrix_is_symmetric() {
        let columns = [
            vec![1.0, 2.0, 3.0, 4.0, 5.0],
            vec![5.0, 3.0, 4.0, 1.0, 2.0],
            vec![2.0, 2.0, 3.0, 5.0, 4.0],
        ];
        let matrix = spearman_matrix(&columns);
        assert_eq!(matrix.len(), 3);
        for i in 0..3 {
            assert!((matrix[i][i] - 1.0).abs() < 1e-12);
            for j in 0..3 {
                assert!((matrix[i][j] - matrix[j][i]).abs() < 1e-12);
            }
        }
    }
}
