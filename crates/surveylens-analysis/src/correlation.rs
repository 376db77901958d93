//! Rank correlations between survey answers.

use surveylens_data::{codebook::Codebook, dataset::Subset};
use surveylens_stats::correlation::{spearman, spearman_matrix as rank_matrix};

use crate::{
    aggregate::item_label,
    catalog::{self, SATISFACTION_LABEL},
};

/// Spearman correlation of `a` and `b` over respondents answering both.
///
/// Returns the coefficient and the number of pairs used. The coefficient is
/// `NaN` with fewer than two pairs.
#[must_use]
pub fn pairwise_spearman(subset: &Subset<'_>, a: &str, b: &str) -> (f64, usize) {
    let (x, y): (Vec<f64>, Vec<f64>) = subset
        .iter()
        .filter_map(|r| Some((r.number(a)?, r.number(b)?)))
        .unzip();
    if x.len() < 2 {
        return (f64::NAN, x.len());
    }
    (spearman(&x, &y), x.len())
}

/// A labelled Spearman correlation matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    pub codes: Vec<String>,
    pub labels: Vec<String>,
    /// `values[i][j]` correlates `codes[i]` with `codes[j]`.
    pub values: Vec<Vec<f64>>,
    /// Respondents answering every variable.
    pub n: usize,
}

/// Display label of a correlated variable.
fn variable_label<'a>(codebook: &'a Codebook, code: &'a str) -> &'a str {
    if code == catalog::SATISFACTION {
        SATISFACTION_LABEL
    } else {
        item_label(codebook, code)
    }
}

/// Spearman matrix of `codes` over respondents answering all of them.
///
/// With fewer than two such respondents every entry is `NaN`.
#[must_use]
pub fn spearman_matrix<S>(subset: &Subset<'_>, codebook: &Codebook, codes: &[S]) -> CorrelationMatrix
where
    S: AsRef<str>,
{
    let codes = codes.iter().map(|c| c.as_ref().to_owned()).collect::<Vec<_>>();
    let labels = codes
        .iter()
        .map(|c| variable_label(codebook, c).to_owned())
        .collect();

    let rows = subset
        .iter()
        .filter_map(|r| codes.iter().map(|c| r.number(c)).collect::<Option<Vec<_>>>())
        .collect::<Vec<_>>();
    let n = rows.len();
    let values = if n < 2 {
        vec![vec![f64::NAN; codes.len()]; codes.len()]
    } else {
        let columns = (0..codes.len())
            .map(|j| rows.iter().map(|row| row[j]).collect::<Vec<_>>())
            .collect::<Vec<_>>();
        rank_matrix(&columns)
    };

    CorrelationMatrix {
        codes,
        labels,
        values,
        n,
    }
}

/// The importance items followed by overall satisfaction.
#[must_use]
pub fn importance_satisfaction_codes() -> Vec<String> {
    let mut codes = catalog::feature_items(catalog::IMPORTANCE);
    codes.push(catalog::SATISFACTION.to_owned());
    codes
}
