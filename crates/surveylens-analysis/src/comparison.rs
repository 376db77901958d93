//! Importance versus expectation comparison per feature.
//!
//! Three views of the same eight features, computed over users:
//! the top-2-box importance rating, the share of users naming the feature
//! among the most important ones, and the share of users who see it
//! fulfilled today. The views are joined on the feature label.

use surveylens_data::{codebook::Codebook, dataset::Subset};

use crate::{
    aggregate::{Denominator, FeatureShare, feature_shares, multi_select, top2_box_family},
    catalog::{self, feature_items},
};

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum MergeError {
    #[display("no feature label is shared by '{left}' and '{right}'")]
    EmptyIntersection { left: String, right: String },
}

/// One feature of the comparison table.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRow {
    pub feature: String,
    /// Top-2-box share of the importance rating.
    pub importance: f64,
    /// Percent of users naming the feature among the most important.
    pub most_important: f64,
    /// Percent of users seeing the feature fulfilled.
    pub fulfilled: f64,
}

impl ComparisonRow {
    /// Gap between wish and reality in percentage points.
    #[must_use]
    pub fn gap(&self) -> f64 {
        self.most_important - self.fulfilled
    }
}

/// Inner join of two share lists on the feature label.
///
/// Rows keep the order of `left`. Labels are compared exactly.
///
/// # Arguments
///
/// * `left`, `right` - The share lists to join
/// * `left_name`, `right_name` - Names of the two sides in the error
///
/// # Returns
///
/// `(feature, left percent, right percent)` per shared label.
///
/// # Errors
///
/// [`MergeError::EmptyIntersection`] if no label is shared.
pub fn join_shares(
    left: &[FeatureShare],
    right: &[FeatureShare],
    left_name: &str,
    right_name: &str,
) -> Result<Vec<(String, f64, f64)>, MergeError> {
    let joined = left
        .iter()
        .filter_map(|l| {
            right
                .iter()
                .find(|r| r.feature == l.feature)
                .map(|r| (l.feature.clone(), l.percent, r.percent))
        })
        .collect::<Vec<_>>();
    if joined.is_empty() {
        return Err(MergeError::EmptyIntersection {
            left: left_name.to_owned(),
            right: right_name.to_owned(),
        });
    }
    Ok(joined)
}

/// Builds the comparison table over `users`.
///
/// The importance shares are joined with the "most important" shares, and
/// the result with the "fulfilled" shares. Either join coming out empty is a
/// [`MergeError`].
pub fn compare_features(
    users: &Subset<'_>,
    codebook: &Codebook,
) -> Result<Vec<ComparisonRow>, MergeError> {
    let importance = top2_box_family(users, codebook, &feature_items(catalog::IMPORTANCE));
    let most_important = respondent_shares(users, codebook, catalog::MOST_IMPORTANT);
    let fulfilled = respondent_shares(users, codebook, catalog::FULFILLED);

    let wished = join_shares(
        &importance,
        &most_important,
        catalog::IMPORTANCE,
        catalog::MOST_IMPORTANT,
    )?;
    let rows = wished
        .into_iter()
        .filter_map(|(feature, importance, most_important)| {
            let done = fulfilled.iter().find(|s| s.feature == feature)?;
            Some(ComparisonRow {
                feature,
                importance,
                most_important,
                fulfilled: done.percent,
            })
        })
        .collect::<Vec<_>>();
    if rows.is_empty() {
        return Err(MergeError::EmptyIntersection {
            left: format!("{}+{}", catalog::IMPORTANCE, catalog::MOST_IMPORTANT),
            right: catalog::FULFILLED.to_owned(),
        });
    }
    Ok(rows)
}

/// Percent of `users` ticking each option of the multi-select question `prefix`.
fn respondent_shares(users: &Subset<'_>, codebook: &Codebook, prefix: &str) -> Vec<FeatureShare> {
    catalog::multi_select_specs()
        .into_iter()
        .find(|spec| spec.prefix == prefix)
        .map(|spec| {
            let spec = spec.with_denominator(Denominator::Respondents);
            feature_shares(&multi_select(users, codebook, &spec).distribution)
        })
        .unwrap_or_default()
}

/// Sorts rows by [`ComparisonRow::gap`], largest first.
pub fn sort_by_gap(rows: &mut [ComparisonRow]) {
    rows.sort_by(|a, b| b.gap().total_cmp(&a.gap()));
}

#[cfg(test)]
mod tests {
    use surveylens_data::{
        codebook::{Codebook, ValueMeaningMap, VariableDescriptor, VariableType},
        labels::SHORT_LABELS,
    };

    use super::*;
    use crate::{
        catalog::{FEATURE_ORDER, Population},
        fixtures,
    };

    fn share(feature: &str, percent: f64) -> FeatureShare {
        FeatureShare {
            feature: feature.to_owned(),
            percent,
        }
    }

    #[test]
    fn test_join_keeps_left_order() {
        let left = [share("b", 1.0), share("a", 2.0), share("c", 3.0)];
        let right = [share("a", 20.0), share("b", 10.0)];
        let joined = join_shares(&left, &right, "L", "R").unwrap();
        assert_eq!(
            joined,
            [("b".to_owned(), 1.0, 10.0), ("a".to_owned(), 2.0, 20.0)]
        );
    }

    #[test]
    fn test_join_empty_intersection() {
        let err = join_shares(&[share("a", 1.0)], &[share("b", 1.0)], "L", "R").unwrap_err();
        assert!(matches!(err, MergeError::EmptyIntersection { .. }));
        assert_eq!(err.to_string(), "no feature label is shared by 'L' and 'R'");
    }

    #[test]
    fn test_compare_features_on_survey() {
        let dataset = fixtures::survey();
        let codebook = fixtures::codebook();
        let users = Population::Users.select(&dataset);
        let mut rows = compare_features(&users, &codebook).unwrap();
        let features = rows.iter().map(|r| r.feature.as_str()).collect::<Vec<_>>();
        assert_eq!(features, FEATURE_ORDER);
        for row in &rows {
            assert!((0.0..=100.0).contains(&row.most_important));
            assert!((0.0..=100.0).contains(&row.fulfilled));
        }

        sort_by_gap(&mut rows);
        assert!(rows.windows(2).all(|w| w[0].gap() >= w[1].gap()));
    }

    #[test]
    fn test_compare_features_without_shared_labels() {
        // the "most important" items carry labels unrelated to the ratings
        let mut variables = vec![];
        for (i, (long, _)) in SHORT_LABELS.iter().enumerate() {
            variables.push(VariableDescriptor::new(
                format!("A301_{:02}", i + 1),
                format!("Wichtigkeit: {long}"),
                VariableType::Ordinal,
            ));
            variables.push(VariableDescriptor::new(
                format!("A302_{:02}", i + 1),
                format!("Option {i}"),
                VariableType::Dichotomous,
            ));
        }
        let codebook = Codebook::new(variables, ValueMeaningMap::new());
        let dataset = fixtures::survey();
        let users = Population::Users.select(&dataset);
        let err = compare_features(&users, &codebook).unwrap_err();
        assert!(matches!(err, MergeError::EmptyIntersection { ref right, .. } if right == "A302"));
    }
}
