//! Per-question descriptive summaries.
//!
//! Every nominal, ordinal or dichotomous question that is not part of a
//! per-feature or multi-select family gets a frequency distribution over its
//! population. Ordinal questions also get mean, median and standard
//! deviation of their numeric codes.

use surveylens_data::{
    codebook::{Codebook, VariableDescriptor, VariableType},
    dataset::Dataset,
};
use surveylens_stats::descriptive::DescriptiveStats;

use crate::{
    aggregate::{Distribution, PercentBase, ordinal_summary, single_choice},
    catalog::{self, MULTI_SELECT_FAMILIES, Population, category_order},
};

/// Questions summarized by [`describe_question`], in codebook order.
#[must_use]
pub fn descriptive_targets(codebook: &Codebook) -> Vec<&VariableDescriptor> {
    codebook
        .variables()
        .iter()
        .filter(|v| v.var_type.is_categorical())
        .filter(|v| {
            v.family()
                .is_none_or(|p| p != catalog::IMPORTANCE && !MULTI_SELECT_FAMILIES.contains(&p))
        })
        .collect()
}

/// Frequency table of one question, with numeric statistics for ordinal ones.
#[derive(Debug, Clone)]
pub struct QuestionSummary {
    pub code: String,
    pub population: Population,
    pub respondents: usize,
    pub distribution: Distribution,
    pub stats: Option<DescriptiveStats>,
}

/// Summarizes `variable` over its population.
///
/// Returns `None` if the population is empty.
#[must_use]
pub fn describe_question(
    dataset: &Dataset,
    codebook: &Codebook,
    variable: &VariableDescriptor,
) -> Option<QuestionSummary> {
    let population = Population::for_question(&variable.code);
    let subset = population.select(dataset);
    if subset.is_empty() {
        return None;
    }
    let stats = match variable.var_type {
        VariableType::Ordinal => ordinal_summary(&subset, &variable.code),
        _ => None,
    };
    Some(QuestionSummary {
        code: variable.code.clone(),
        population,
        respondents: subset.len(),
        distribution: single_choice(&subset, codebook, &variable.code),
        stats,
    })
}

/// How a question's distribution is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartStyle {
    Pie,
    Bar {
        /// Category order and percentage treatment applied before drawing.
        reindex: Option<(&'static [&'static str], PercentBase)>,
        /// Vertical bars labelled with their counts.
        numbered: bool,
    },
}

impl ChartStyle {
    /// Chart style of the distribution of `code`.
    #[must_use]
    pub fn for_question(code: &str) -> Self {
        match code {
            catalog::USER_FLAG | catalog::GENDER => Self::Pie,
            catalog::FREQUENCY => Self::Bar {
                reindex: category_order(code).map(|o| (o, PercentBase::Keep)),
                numbered: true,
            },
            catalog::SATISFACTION | catalog::RECOMMENDATION | catalog::AGE => Self::Bar {
                reindex: category_order(code).map(|o| (o, PercentBase::Recompute)),
                numbered: false,
            },
            _ => Self::Bar {
                reindex: None,
                numbered: false,
            },
        }
    }
}
