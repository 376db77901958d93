//! Aggregation engine.
//!
//! Four ways of turning a respondent subset into a result table:
//!
//! 1. [`top2_box`] / [`top2_box_family`]: share of favorable answers on a
//!    5-point item
//! 2. [`single_choice`]: frequency distribution of one question, labelled
//!    through the codebook
//! 3. [`multi_select`] with [`Denominator::Selections`]: share of all ticks
//!    given in a multi-select question
//! 4. [`multi_select`] with [`Denominator::Respondents`]: share of
//!    respondents who ticked an option
//!
//! Percentages are returned unrounded; rounding happens when a table is
//! written. A zero denominator always yields `0.0`.

use std::collections::HashMap;

use surveylens_data::{
    codebook::Codebook,
    dataset::Subset,
    labels::{OTHER_TOKEN, display_label, is_other},
};
use surveylens_stats::descriptive::DescriptiveStats;

use crate::catalog::{Population, SELECTED_CODE};

/// Answer codes counted as favorable by [`top2_box`].
pub const TOP2_CODES: [f64; 2] = [1.0, 2.0];

/// `part / whole * 100`, or `0.0` if `whole` is zero.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

/// Share of one feature, keyed by its display label.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureShare {
    pub feature: String,
    pub percent: f64,
}

/// Percentage of non-missing numeric answers to `code` that are 1 or 2.
///
/// # Arguments
///
/// * `subset` - The respondents to count over
/// * `code` - The rating variable, with 1 and 2 as its two best answers
///
/// # Returns
///
/// The share of favorable answers in percent, or `0.0` when no respondent
/// gave a numeric answer. Non-numeric answers count as missing.
#[must_use]
pub fn top2_box(subset: &Subset<'_>, code: &str) -> f64 {
    let values = subset.numbers(code);
    let favorable = values.iter().filter(|v| TOP2_CODES.contains(v)).count();
    percent(favorable as u64, values.len() as u64)
}

/// [`top2_box`] for each item code, labelled with the item's display label.
#[must_use]
pub fn top2_box_family<S>(subset: &Subset<'_>, codebook: &Codebook, items: &[S]) -> Vec<FeatureShare>
where
    S: AsRef<str>,
{
    items
        .iter()
        .map(AsRef::<str>::as_ref)
        .filter(|code| subset.dataset().has_column(code))
        .map(|code| FeatureShare {
            feature: item_label(codebook, code).to_owned(),
            percent: top2_box(subset, code),
        })
        .collect()
}

/// Display label of an item: the codebook label without its group prefix,
/// shortened if it is one of the curated feature names.
#[must_use]
pub fn item_label<'a>(codebook: &'a Codebook, code: &'a str) -> &'a str {
    display_label(codebook.label(code).unwrap_or(code))
}

/// One row of a frequency table.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryCount {
    pub category: String,
    pub count: u64,
    pub percent: f64,
}

/// A frequency table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Distribution {
    pub rows: Vec<CategoryCount>,
}

/// How percentages are treated when a distribution is reindexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PercentBase {
    /// Keep the percentages computed before reindexing.
    Keep,
    /// Recompute percentages over the counts left after reindexing.
    Recompute,
}

/// A distribution rearranged to a fixed category order.
#[derive(Debug, Clone, PartialEq)]
pub struct Reindexed {
    pub distribution: Distribution,
    /// Observed categories the order does not mention. They are not part of
    /// `distribution`.
    pub dropped: Vec<String>,
}

impl Distribution {
    /// Builds a distribution from counts, computing percentages over `base`.
    #[must_use]
    pub fn from_counts<I>(counts: I, base: u64) -> Self
    where
        I: IntoIterator<Item = (String, u64)>,
    {
        let rows = counts
            .into_iter()
            .map(|(category, count)| CategoryCount {
                percent: percent(count, base),
                category,
                count,
            })
            .collect();
        Self { rows }
    }

    /// Sum of all counts.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.rows.iter().map(|r| r.count).sum()
    }

    #[must_use]
    pub fn get(&self, category: &str) -> Option<&CategoryCount> {
        self.rows.iter().find(|r| r.category == category)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rearranges the rows to `order`.
    ///
    /// Categories in `order` that were not observed get a zero row.
    /// Observed categories missing from `order` are removed and reported in
    /// [`Reindexed::dropped`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use surveylens_analysis::aggregate::{Distribution, PercentBase};
    /// let dist = Distribution::from_counts([("b".to_owned(), 3), ("x".to_owned(), 1)], 4);
    /// let re = dist.reindex(&["a", "b"], PercentBase::Recompute);
    /// assert_eq!(re.distribution.rows[0].count, 0);
    /// assert_eq!(re.distribution.rows[1].percent, 100.0);
    /// assert_eq!(re.dropped, ["x"]);
    /// ```
    #[must_use]
    pub fn reindex(&self, order: &[&str], base: PercentBase) -> Reindexed {
        let rows = order
            .iter()
            .map(|&category| {
                self.get(category).cloned().unwrap_or(CategoryCount {
                    category: category.to_owned(),
                    count: 0,
                    percent: 0.0,
                })
            })
            .collect::<Vec<_>>();
        let dropped = self
            .rows
            .iter()
            .filter(|r| !order.contains(&r.category.as_str()))
            .map(|r| r.category.clone())
            .collect();

        let mut distribution = Self { rows };
        if base == PercentBase::Recompute {
            let total = distribution.total();
            for row in &mut distribution.rows {
                row.percent = percent(row.count, total);
            }
        }
        Reindexed {
            distribution,
            dropped,
        }
    }
}

/// Frequency distribution of a single-choice question.
///
/// Every respondent of `subset` is counted once: answers are resolved through
/// the value meanings (unknown codes and empty cells become `Missing`) and
/// then normalized for display. Percentages are over `subset.len()`. Rows are
/// ordered by count, descending, and then by label.
#[must_use]
pub fn single_choice(subset: &Subset<'_>, codebook: &Codebook, code: &str) -> Distribution {
    let values = codebook.values();
    let mut counts = HashMap::<&str, u64>::new();
    for respondent in subset.iter() {
        let label = display_label(values.resolve(code, respondent.value(code)).as_str());
        *counts.entry(label).or_default() += 1;
    }

    let mut counts = counts
        .into_iter()
        .map(|(label, count)| (label.to_owned(), count))
        .collect::<Vec<_>>();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    Distribution::from_counts(counts, subset.len() as u64)
}

/// Mean, median and standard deviation of the numeric answers to `code`.
#[must_use]
pub fn ordinal_summary(subset: &Subset<'_>, code: &str) -> Option<DescriptiveStats> {
    DescriptiveStats::new(subset.numbers(code))
}

/// Denominator of multi-select percentages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denominator {
    /// Total number of ticks across all options.
    Selections,
    /// Number of respondents in the subset.
    Respondents,
}

/// Configuration of a multi-select aggregation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MultiSelectSpec {
    /// Family prefix, e.g. `A302` for `A302_01..`.
    pub prefix: &'static str,
    pub population: Population,
    pub denominator: Denominator,
    /// Merge every option whose label contains the "other" token into one row.
    pub merge_other: bool,
    /// Fixed output order. Percentages are kept as computed before reindexing.
    pub order: Option<&'static [&'static str]>,
    /// Decimal digits of the written percentages.
    pub precision: u8,
}

impl MultiSelectSpec {
    /// The same question with a different denominator.
    #[must_use]
    pub fn with_denominator(self, denominator: Denominator) -> Self {
        Self {
            denominator,
            ..self
        }
    }
}

/// Result of a multi-select aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiSelect {
    pub distribution: Distribution,
    /// Labels removed by reindexing to [`MultiSelectSpec::order`].
    pub dropped: Vec<String>,
    /// Size of the subset the ticks were counted in.
    pub respondents: usize,
}

/// Counts ticks per option of a multi-select question.
///
/// Options are taken from the codebook family in codebook order. An option
/// counts as ticked when its numeric answer equals
/// [`SELECTED_CODE`](crate::catalog::SELECTED_CODE).
///
/// # Arguments
///
/// * `subset` - The population the question was asked to
/// * `codebook` - Source of the option items and their labels
/// * `spec` - Denominator, "Other" merging and fixed order of the question
///
/// # Returns
///
/// The distribution in the fixed order when `spec` has one (options outside
/// it are reported in `dropped`), otherwise in codebook order.
#[must_use]
pub fn multi_select(subset: &Subset<'_>, codebook: &Codebook, spec: &MultiSelectSpec) -> MultiSelect {
    let mut counts: Vec<(String, u64)> = vec![];
    for item in codebook.family(spec.prefix) {
        let ticked = subset.count_answered(&item.code, SELECTED_CODE) as u64;
        let label = display_label(&item.label);
        let label = if spec.merge_other && is_other(label) {
            OTHER_TOKEN
        } else {
            label
        };
        match counts.iter_mut().find(|(l, _)| l == label) {
            Some((_, count)) => *count += ticked,
            None => counts.push((label.to_owned(), ticked)),
        }
    }

    let base = match spec.denominator {
        Denominator::Selections => counts.iter().map(|(_, c)| c).sum(),
        Denominator::Respondents => subset.len() as u64,
    };
    let distribution = Distribution::from_counts(counts, base);

    let (distribution, dropped) = match spec.order {
        Some(order) => {
            let reindexed = distribution.reindex(order, PercentBase::Keep);
            (reindexed.distribution, reindexed.dropped)
        }
        None => (distribution, vec![]),
    };
    MultiSelect {
        distribution,
        dropped,
        respondents: subset.len(),
    }
}

/// Shares of a multi-select distribution as feature shares.
#[must_use]
pub fn feature_shares(distribution: &Distribution) -> Vec<FeatureShare> {
    distribution
        .rows
        .iter()
        .map(|r| FeatureShare {
            feature: r.category.clone(),
            percent: r.percent,
        })
        .collect()
}
