//! Cross-tabulation of feature metrics by respondent segment.
//!
//! Respondents are partitioned by the resolved label of a segmentation
//! variable. For every category and every feature item a metric is computed
//! on that category alone, giving a long table that can be pivoted into a
//! feature × category matrix.

use std::collections::BTreeMap;

use surveylens_data::{codebook::Codebook, dataset::Subset};

use crate::{
    aggregate::{item_label, percent, top2_box},
    catalog::SELECTED_CODE,
};

/// Per-feature metric of the segment breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum SegmentMetric {
    /// Top-2-box share of the importance rating (over non-missing answers).
    #[display("Top2Box")]
    Top2Box,
    /// Share of the category that ticked the feature as fulfilled.
    #[display("Fulfilled")]
    Fulfilled,
}

impl SegmentMetric {
    /// Value of the metric for one item on one category.
    #[must_use]
    pub fn compute(self, subset: &Subset<'_>, code: &str) -> f64 {
        match self {
            Self::Top2Box => top2_box(subset, code),
            Self::Fulfilled => percent(
                subset.count_answered(code, SELECTED_CODE) as u64,
                subset.len() as u64,
            ),
        }
    }
}

/// One row of the long segment table.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentRecord {
    pub category: String,
    pub feature: String,
    pub metric: SegmentMetric,
    pub value: f64,
}

/// Splits `subset` by the resolved label of `segment`.
///
/// Labels come from the value meanings; codes without a meaning keep their
/// text and empty cells form the `Missing` category. Categories iterate in
/// lexicographic order.
#[must_use]
pub fn partition<'a>(
    subset: &Subset<'a>,
    codebook: &Codebook,
    segment: &str,
) -> BTreeMap<String, Subset<'a>> {
    let values = codebook.values();
    let mut labels = BTreeMap::<String, Vec<usize>>::new();
    for respondent in subset.iter() {
        let label = values.resolve_or_code(segment, respondent.value(segment));
        labels.entry(label).or_default().push(respondent.index());
    }
    labels
        .into_iter()
        .map(|(label, rows)| {
            let members = subset.filter(|r| rows.binary_search(&r.index()).is_ok());
            (label, members)
        })
        .collect()
}

/// Long table of `metrics` per category and item.
///
/// # Arguments
///
/// * `subset` - The respondents to break down
/// * `codebook` - Source of category and feature labels
/// * `segment` - The variable whose answers form the categories
/// * `metrics` - Each metric paired with the item codes it is computed on
///
/// # Returns
///
/// One record per category, metric and item, with categories in
/// lexicographic order. Empty categories produce no records.
#[must_use]
pub fn segment_table(
    subset: &Subset<'_>,
    codebook: &Codebook,
    segment: &str,
    metrics: &[(SegmentMetric, Vec<String>)],
) -> Vec<SegmentRecord> {
    let mut records = vec![];
    for (category, members) in partition(subset, codebook, segment) {
        if members.is_empty() {
            continue;
        }
        for (metric, items) in metrics {
            for code in items {
                records.push(SegmentRecord {
                    category: category.clone(),
                    feature: item_label(codebook, code).to_owned(),
                    metric: *metric,
                    value: metric.compute(&members, code),
                });
            }
        }
    }
    records
}

/// Wide view of one metric: rows are features, columns are categories.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentMatrix {
    pub features: Vec<String>,
    pub categories: Vec<String>,
    /// `values[feature][category]`.
    pub values: Vec<Vec<f64>>,
}

/// Pivots the records of `metric` into a matrix.
///
/// Without an explicit order, features keep their first-appearance order
/// and categories are sorted. With an order, exactly the listed labels are
/// used. Missing combinations are `0.0`.
///
/// # Examples
///
/// ```
/// # use surveylens_analysis::segment::{pivot, SegmentMetric, SegmentRecord};
/// let records = vec![SegmentRecord {
///     category: "a".to_owned(),
///     feature: "Kontext".to_owned(),
///     metric: SegmentMetric::Top2Box,
///     value: 40.0,
/// }];
/// let matrix = pivot(&records, SegmentMetric::Top2Box, None, Some(&["b", "a"]));
/// assert_eq!(matrix.values, vec![vec![0.0, 40.0]]);
/// ```
#[must_use]
pub fn pivot(
    records: &[SegmentRecord],
    metric: SegmentMetric,
    feature_order: Option<&[&str]>,
    category_order: Option<&[&str]>,
) -> SegmentMatrix {
    let records = records
        .iter()
        .filter(|r| r.metric == metric)
        .collect::<Vec<_>>();

    let features = match feature_order {
        Some(order) => order.iter().map(|f| (*f).to_owned()).collect(),
        None => {
            let mut features = Vec::<String>::new();
            for r in &records {
                if !features.contains(&r.feature) {
                    features.push(r.feature.clone());
                }
            }
            features
        }
    };
    let categories = match category_order {
        Some(order) => order.iter().map(|c| (*c).to_owned()).collect(),
        None => {
            let mut categories = records
                .iter()
                .map(|r| r.category.clone())
                .collect::<Vec<_>>();
            categories.sort();
            categories.dedup();
            categories
        }
    };

    let values = features
        .iter()
        .map(|feature| {
            categories
                .iter()
                .map(|category| {
                    records
                        .iter()
                        .find(|r| &r.feature == feature && &r.category == category)
                        .map_or(0.0, |r| r.value)
                })
                .collect()
        })
        .collect();

    SegmentMatrix {
        features,
        categories,
        values,
    }
}
