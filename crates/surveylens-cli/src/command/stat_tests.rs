use surveylens_analysis::{
    catalog::{self, Population, SEGMENTS, feature_items},
    significance::{Effect, TestResult, run_tests},
};

use super::Survey;
use crate::{
    chart::{self, ColorScale},
    export,
    util::Artifacts,
};

#[derive(Debug, serde::Serialize)]
struct TestRow<'a> {
    segment: &'a str,
    variable: &'a str,
    test: String,
    statistic: Option<f64>,
    p_value: Option<f64>,
    effect_r: Option<f64>,
    effect_eta2: Option<f64>,
    cramers_v: Option<f64>,
}

impl<'a> From<&'a TestResult> for TestRow<'a> {
    fn from(result: &'a TestResult) -> Self {
        let finite = |v: f64| v.is_finite().then_some(v);
        let (mut effect_r, mut effect_eta2, mut cramers_v) = (None, None, None);
        match result.effect {
            Effect::R(v) => effect_r = finite(v),
            Effect::EtaSquared(v) => effect_eta2 = finite(v),
            Effect::CramersV(v) => cramers_v = finite(v),
        }
        Self {
            segment: &result.segment,
            variable: &result.variable,
            test: result.test.to_string(),
            statistic: finite(result.statistic),
            p_value: finite(result.p_value),
            effect_r,
            effect_eta2,
            cramers_v,
        }
    }
}

pub(crate) fn run(survey: &Survey) -> anyhow::Result<Artifacts> {
    let mut artifacts = Artifacts::default();
    let users = Population::Users.select(&survey.dataset);
    if users.is_empty() {
        artifacts.skip("no users in the dataset");
        return Ok(artifacts);
    }

    let rank_variables = feature_items(catalog::IMPORTANCE);
    let binary_variables = feature_items(catalog::FULFILLED);
    let run = run_tests(&users, &SEGMENTS, &rank_variables, &binary_variables);
    for skipped in &run.skipped {
        tracing::debug!(
            segment = %skipped.segment,
            variable = %skipped.variable,
            "test skipped: {}",
            skipped.reason
        );
    }
    tracing::info!(
        results = run.results.len(),
        skipped = run.skipped.len(),
        "significance tests done"
    );

    let dir = export::output_dir(&survey.out_dir, "stats")?;
    let rows = run.results.iter().map(TestRow::from).collect::<Vec<_>>();
    let csv_path = dir.join("stat_tests_results.csv");
    export::write_csv(&csv_path, &rows)?;
    artifacts.push(&csv_path);
    if run.results.is_empty() {
        artifacts.skip("no segment/variable pair could be tested");
        return Ok(artifacts);
    }

    let variables = rank_variables
        .iter()
        .chain(&binary_variables)
        .filter(|v| run.results.iter().any(|r| &r.variable == *v))
        .cloned()
        .collect::<Vec<_>>();
    let segments = SEGMENTS.map(str::to_owned);
    let lookup = |variable: &str, segment: &str| {
        run.results
            .iter()
            .find(|r| r.variable == variable && r.segment == segment)
    };

    let effects = variables
        .iter()
        .map(|v| {
            segments
                .iter()
                .map(|s| lookup(v, s).map_or(0.0, |r| r.effect.value()))
                .collect()
        })
        .collect::<Vec<Vec<f64>>>();
    let bar_path = dir.join("effect_sizes_barplot.svg");
    chart::draw_grouped(
        &bar_path,
        "Effektstärken nach Segment",
        &variables,
        &segments,
        &effects,
        "Effektstärke",
    )?;
    tracing::info!("wrote {}", bar_path.display());
    artifacts.push(&bar_path);

    let p_values = variables
        .iter()
        .map(|v| {
            segments
                .iter()
                .map(|s| lookup(v, s).map_or(f64::NAN, |r| r.p_value))
                .collect()
        })
        .collect::<Vec<Vec<f64>>>();
    let heatmap_path = dir.join("pvalues_heatmap.svg");
    chart::draw_heatmap(
        &heatmap_path,
        "p-Werte der Signifikanztests",
        &variables,
        &segments,
        &p_values,
        ColorScale::Sequential,
        3,
    )?;
    tracing::info!("wrote {}", heatmap_path.display());
    artifacts.push(&heatmap_path);
    Ok(artifacts)
}

#[cfg(test)]
mod tests {
    use surveylens_analysis::significance::TestKind;

    use super::*;

    #[test]
    fn test_only_the_matching_effect_column_is_filled() {
        let result = TestResult {
            segment: "A602".to_owned(),
            variable: "A301_01".to_owned(),
            test: TestKind::MannWhitneyU,
            statistic: 4.0,
            p_value: f64::NAN,
            effect: Effect::R(0.25),
        };
        let row = TestRow::from(&result);
        assert_eq!(row.test, "Mann-Whitney-U");
        assert_eq!(row.effect_r, Some(0.25));
        assert_eq!(row.effect_eta2, None);
        assert_eq!(row.cramers_v, None);
        assert_eq!(row.p_value, None);
    }
}
