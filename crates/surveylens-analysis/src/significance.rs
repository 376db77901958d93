//! Significance tests of feature ratings across segment categories.
//!
//! For every `(segment, variable)` pair one test is chosen:
//!
//! - ordinal ratings, two non-empty categories: Mann-Whitney U with `r`
//! - ordinal ratings, more categories: Kruskal-Wallis H with `eta^2`
//! - ticked/not ticked items: chi-square test of independence with Cramér's V
//!
//! Pairs that cannot be tested (fewer than two non-empty categories, a
//! degenerate contingency table) produce no result row. They are reported
//! as [`SkippedTest`]s.

use std::collections::BTreeMap;

use surveylens_data::{codebook::MISSING_SENTINEL, dataset::Subset};
use surveylens_stats::{
    contingency::ContingencyTable,
    rank_tests::{KruskalWallis, MannWhitneyU},
    round::round_to,
};

use crate::catalog::SELECTED_CODE;

/// Decimal digits of the reported test statistic.
pub const STATISTIC_DIGITS: u8 = 2;
/// Decimal digits of p-values and effect sizes.
pub const P_VALUE_DIGITS: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum TestKind {
    #[display("Mann-Whitney-U")]
    MannWhitneyU,
    #[display("Kruskal-Wallis")]
    KruskalWallis,
    #[display("Chi-Square")]
    ChiSquare,
}

/// Effect size reported next to a test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    /// `r = |z| / sqrt(n)` of a Mann-Whitney test.
    R(f64),
    /// `eta^2` of a Kruskal-Wallis test.
    EtaSquared(f64),
    /// Cramér's V of a chi-square test.
    CramersV(f64),
}

impl Effect {
    #[must_use]
    pub fn value(self) -> f64 {
        match self {
            Self::R(v) | Self::EtaSquared(v) | Self::CramersV(v) => v,
        }
    }

    fn map(self, f: impl FnOnce(f64) -> f64) -> Self {
        match self {
            Self::R(v) => Self::R(f(v)),
            Self::EtaSquared(v) => Self::EtaSquared(f(v)),
            Self::CramersV(v) => Self::CramersV(f(v)),
        }
    }
}

/// One row of the test results table.
#[derive(Debug, Clone, PartialEq)]
pub struct TestResult {
    pub segment: String,
    pub variable: String,
    pub test: TestKind,
    pub statistic: f64,
    pub p_value: f64,
    pub effect: Effect,
}

impl TestResult {
    /// Rounds the statistic to [`STATISTIC_DIGITS`] and p-value and effect
    /// to [`P_VALUE_DIGITS`].
    #[must_use]
    pub fn rounded(self) -> Self {
        Self {
            statistic: round_to(self.statistic, STATISTIC_DIGITS),
            p_value: round_to(self.p_value, P_VALUE_DIGITS),
            effect: self.effect.map(|v| round_to(v, P_VALUE_DIGITS)),
            ..self
        }
    }
}

/// Why a `(segment, variable)` pair produced no result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum SkipReason {
    #[display("fewer than two categories with answers")]
    TooFewGroups,
    #[display("contingency table has a degenerate dimension")]
    DegenerateTable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedTest {
    pub segment: String,
    pub variable: String,
    pub reason: SkipReason,
}

/// Results and skipped pairs of a test run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TestRun {
    pub results: Vec<TestResult>,
    pub skipped: Vec<SkippedTest>,
}

/// Splits `subset` by the raw code of `segment`, in lexicographic order.
///
/// Respondents without an answer to `segment`, or answering with the
/// missing sentinel, are left out.
#[must_use]
pub fn segment_groups<'a>(subset: &Subset<'a>, segment: &str) -> BTreeMap<String, Subset<'a>> {
    let mut codes = BTreeMap::<String, Vec<usize>>::new();
    for respondent in subset.iter() {
        let code = respondent.value(segment).code();
        if let Some(code) = code.filter(|c| c != MISSING_SENTINEL) {
            codes.entry(code).or_default().push(respondent.index());
        }
    }
    codes
        .into_iter()
        .map(|(code, rows)| {
            let members = subset.filter(|r| rows.binary_search(&r.index()).is_ok());
            (code, members)
        })
        .collect()
}

/// Rank test of the numeric answers to `variable` across `groups`.
///
/// Groups without a numeric answer are ignored. Two remaining groups get a
/// Mann-Whitney U test, more get a Kruskal-Wallis test.
///
/// # Errors
///
/// [`SkipReason::TooFewGroups`] if fewer than two groups remain.
pub fn rank_test(
    groups: &BTreeMap<String, Subset<'_>>,
    segment: &str,
    variable: &str,
) -> Result<TestResult, SkipReason> {
    let samples = groups
        .values()
        .map(|g| g.numbers(variable))
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>();

    let (test, statistic, p_value, effect) = match samples.as_slice() {
        [] | [_] => return Err(SkipReason::TooFewGroups),
        [x, y] => {
            let mw = MannWhitneyU::new(x, y).ok_or(SkipReason::TooFewGroups)?;
            (TestKind::MannWhitneyU, mw.u, mw.p_value, Effect::R(mw.effect_r))
        }
        _ => {
            let kw = KruskalWallis::new(&samples).ok_or(SkipReason::TooFewGroups)?;
            (
                TestKind::KruskalWallis,
                kw.h,
                kw.p_value,
                Effect::EtaSquared(kw.eta_squared),
            )
        }
    };
    Ok(TestResult {
        segment: segment.to_owned(),
        variable: variable.to_owned(),
        test,
        statistic,
        p_value,
        effect,
    })
}

/// Chi-square test of category against "ticked" for `variable`.
///
/// Respondents whose answer is not the selected code, including missing
/// answers, count as not ticked.
///
/// # Errors
///
/// [`SkipReason::DegenerateTable`] if the table has fewer than two
/// non-empty rows or columns, for example when nobody ticked the option.
pub fn chi_square_test(
    groups: &BTreeMap<String, Subset<'_>>,
    segment: &str,
    variable: &str,
) -> Result<TestResult, SkipReason> {
    let counts = groups
        .values()
        .map(|g| {
            let ticked = g.count_answered(variable, SELECTED_CODE) as u64;
            vec![g.len() as u64 - ticked, ticked]
        })
        .collect();
    let test = ContingencyTable::new(counts)
        .chi_square()
        .ok_or(SkipReason::DegenerateTable)?;
    Ok(TestResult {
        segment: segment.to_owned(),
        variable: variable.to_owned(),
        test: TestKind::ChiSquare,
        statistic: test.statistic,
        p_value: test.p_value,
        effect: Effect::CramersV(test.cramers_v),
    })
}

/// Runs rank tests on `rank_variables` and chi-square tests on
/// `binary_variables` for every segment. Results are rounded.
#[must_use]
pub fn run_tests<S>(
    subset: &Subset<'_>,
    segments: &[&str],
    rank_variables: &[S],
    binary_variables: &[S],
) -> TestRun
where
    S: AsRef<str>,
{
    let mut run = TestRun::default();
    for &segment in segments {
        let groups = segment_groups(subset, segment);
        let rank = rank_variables.iter().map(|v| (v.as_ref(), rank_test as TestFn));
        let binary = binary_variables
            .iter()
            .map(|v| (v.as_ref(), chi_square_test as TestFn));
        for (variable, test) in rank.chain(binary) {
            match test(&groups, segment, variable) {
                Ok(result) => run.results.push(result.rounded()),
                Err(reason) => run.skipped.push(SkippedTest {
                    segment: segment.to_owned(),
                    variable: variable.to_owned(),
                    reason,
                }),
            }
        }
    }
    run
}

type TestFn = fn(&BTreeMap<String, Subset<'_>>, &str, &str) -> Result<TestResult, SkipReason>;
