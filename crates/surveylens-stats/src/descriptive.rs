//! Location and spread of a numeric sample.

/// Summary of the numeric codes given to one question.
///
/// Spread uses the sample (`n - 1`) denominator, so both `variance` and
/// `std_dev` are `NaN` for a single observation.
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptiveStats {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Middle value; the mean of the two middle values for even counts.
    pub median: f64,
    pub variance: f64,
    pub std_dev: f64,
}

impl DescriptiveStats {
    /// Summarizes `values` in any order. `None` for an empty sample.
    ///
    /// # Examples
    ///
    /// ```
    /// # use surveylens_stats::descriptive::DescriptiveStats;
    /// let stats = DescriptiveStats::new([4.0, 1.0, 3.0, 2.0]).unwrap();
    /// assert_eq!((stats.min, stats.max), (1.0, 4.0));
    /// assert_eq!(stats.mean, 2.5);
    /// assert_eq!(stats.median, 2.5);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut sample = values.into_iter().collect::<Vec<_>>();
        sample.sort_by(f64::total_cmp);
        let (&min, &max) = (sample.first()?, sample.last()?);

        let count = sample.len();
        let n = count as f64;
        let mean = sample.iter().sum::<f64>() / n;
        let half = count / 2;
        let median = match count % 2 {
            0 => f64::midpoint(sample[half - 1], sample[half]),
            _ => sample[half],
        };
        let squares = sample.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>();
        let variance = if count > 1 { squares / (n - 1.0) } else { f64::NAN };

        Some(Self {
            count,
            min,
            max,
            mean,
            median,
            variance,
            std_dev: variance.sqrt(),
        })
    }
}
