//! Contingency tables, Pearson's chi-square test of independence and
//! Cramér's V.

use crate::distribution::chi_square_upper_tail;

/// A two-way table of observed counts.
///
/// Rows and columns are positional; labelling them is up to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContingencyTable {
    counts: Vec<Vec<u64>>,
}

/// Result of a chi-square test of independence.
#[derive(Debug, Clone, Copy)]
pub struct ChiSquareTest {
    /// Pearson chi-square statistic, without continuity correction.
    pub statistic: f64,
    /// Degrees of freedom, `(rows - 1) * (cols - 1)`.
    pub dof: usize,
    /// Upper-tail p-value.
    pub p_value: f64,
    /// Cramér's V, `sqrt((chi2 / n) / min(rows - 1, cols - 1))`.
    pub cramers_v: f64,
    /// Total number of observations.
    pub n: u64,
}

impl ContingencyTable {
    /// Creates a table from row-major counts.
    ///
    /// Rows shorter than the longest row are padded with zeros.
    #[must_use]
    pub fn new(mut counts: Vec<Vec<u64>>) -> Self {
        let cols = counts.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut counts {
            row.resize(cols, 0);
        }
        Self { counts }
    }

    /// Number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.counts.len()
    }

    /// Number of columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.counts.first().map_or(0, Vec::len)
    }

    /// Total number of observations.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.iter().flatten().sum()
    }

    /// Returns a copy of the table without rows and columns whose margin is zero.
    #[must_use]
    pub fn without_empty_margins(&self) -> Self {
        let keep_cols = (0..self.cols())
            .filter(|&c| self.counts.iter().any(|row| row[c] > 0))
            .collect::<Vec<_>>();
        let counts = self
            .counts
            .iter()
            .filter(|row| row.iter().any(|&v| v > 0))
            .map(|row| keep_cols.iter().map(|&c| row[c]).collect())
            .collect();
        Self { counts }
    }

    /// Runs Pearson's chi-square test of independence.
    ///
    /// Empty rows and columns are dropped first. No continuity correction is
    /// applied.
    ///
    /// # Returns
    ///
    /// * `Some(ChiSquareTest)` - if at least two rows and two columns remain
    /// * `None` - otherwise
    ///
    /// # Examples
    ///
    /// ```
    /// # use surveylens_stats::contingency::ContingencyTable;
    /// let table = ContingencyTable::new(vec![vec![50, 0], vec![0, 50]]);
    /// let test = table.chi_square().unwrap();
    /// assert!((test.statistic - 100.0).abs() < 1e-9);
    /// assert!((test.cramers_v - 1.0).abs() < 1e-9);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn chi_square(&self) -> Option<ChiSquareTest> {
        let table = self.without_empty_margins();
        let rows = table.rows();
        let cols = table.cols();
        if rows < 2 || cols < 2 {
            return None;
        }

        let n = table.total();
        let total = n as f64;
        let row_sums = table
            .counts
            .iter()
            .map(|row| row.iter().sum::<u64>() as f64)
            .collect::<Vec<_>>();
        let col_sums = (0..cols)
            .map(|c| table.counts.iter().map(|row| row[c]).sum::<u64>() as f64)
            .collect::<Vec<_>>();

        let mut statistic = 0.0;
        for (row, row_sum) in table.counts.iter().zip(&row_sums) {
            for (&observed, col_sum) in row.iter().zip(&col_sums) {
                let expected = row_sum * col_sum / total;
                let diff = observed as f64 - expected;
                statistic += diff * diff / expected;
            }
        }

        let dof = (rows - 1) * (cols - 1);
        let p_value = chi_square_upper_tail(statistic, dof as f64);
        let min_dim = (rows - 1).min(cols - 1) as f64;
        let cramers_v = (statistic / total / min_dim).sqrt();

        Some(ChiSquareTest {
            statistic,
            dof,
            p_value,
            cramers_v,
            n,
        })
    }
}
