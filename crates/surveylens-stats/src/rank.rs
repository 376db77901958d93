/// Average ranks of a sample together with its tie structure.
///
/// Ranks are 1-based. Tied values share the mean of the ranks they occupy,
/// which is the convention used by rank-based tests and Spearman correlation.
#[derive(Debug, Clone)]
pub struct Ranking {
    /// Rank of each input value, in input order.
    pub ranks: Vec<f64>,
    /// Sizes of every group of tied values (groups of size 1 included).
    pub tie_sizes: Vec<usize>,
}

impl Ranking {
    /// Ranks `values`, assigning average ranks to ties.
    ///
    /// # Examples
    ///
    /// ```
    /// # use surveylens_stats::rank::Ranking;
    /// let ranking = Ranking::new(&[10.0, 20.0, 10.0, 30.0]);
    /// assert_eq!(ranking.ranks, vec![1.5, 3.0, 1.5, 4.0]);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn new(values: &[f64]) -> Self {
        let mut order = (0..values.len()).collect::<Vec<_>>();
        order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

        let mut ranks = vec![0.0; values.len()];
        let mut tie_sizes = vec![];
        let mut start = 0;
        while start < order.len() {
            let mut end = start + 1;
            while end < order.len() && values[order[end]] == values[order[start]] {
                end += 1;
            }
            // positions start..end hold ranks start+1..=end
            let avg = (start + 1 + end) as f64 / 2.0;
            for &idx in &order[start..end] {
                ranks[idx] = avg;
            }
            tie_sizes.push(end - start);
            start = end;
        }

        Self { ranks, tie_sizes }
    }

    /// Sum of `t^3 - t` over all tie groups.
    ///
    /// Zero when the sample has no ties. Used to correct the variance of
    /// rank statistics.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn tie_term(&self) -> f64 {
        self.tie_sizes
            .iter()
            .filter(|&&t| t > 1)
            .map(|&t| {
                let t = t as f64;
                t * t * t - t
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_ties() {
        let ranking = Ranking::new(&[3.0, 1.0, 2.0]);
        assert_eq!(ranking.ranks, vec![3.0, 1.0, 2.0]);
        assert_eq!(ranking.tie_term(), 0.0);
    }

    #[test]
    fn test_all_tied() {
        let ranking = Ranking::new(&[5.0; 4]);
        assert_eq!(ranking.ranks, vec![2.5; 4]);
        assert_eq!(ranking.tie_sizes, vec![4]);
        assert_eq!(ranking.tie_term(), 60.0);
    }

    #[test]
    fn test_empty() {
        let ranking = Ranking::new(&[]);
        assert!(ranking.ranks.is_empty());
        assert!(ranking.tie_sizes.is_empty());
    }
}
