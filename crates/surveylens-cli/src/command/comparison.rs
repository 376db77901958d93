use surveylens_analysis::{
    catalog::Population,
    comparison::{compare_features, sort_by_gap},
};

use super::Survey;
use crate::{
    chart,
    export::{self, cell},
    util::Artifacts,
};

const DIGITS: u8 = 2;
const SERIES: [&str; 3] = ["Wichtigkeit (Top-2)", "Am wichtigsten", "Erfüllt"];

#[derive(Debug, serde::Serialize)]
struct ComparisonRecord<'a> {
    feature: &'a str,
    importance_top2: Option<f64>,
    most_important: Option<f64>,
    fulfilled: Option<f64>,
    gap: Option<f64>,
}

pub(crate) fn run(survey: &Survey) -> anyhow::Result<Artifacts> {
    let mut artifacts = Artifacts::default();
    let users = Population::Users.select(&survey.dataset);
    if users.is_empty() {
        artifacts.skip("no users in the dataset");
        return Ok(artifacts);
    }
    let mut rows = match compare_features(&users, &survey.codebook) {
        Ok(rows) => rows,
        Err(err) => {
            artifacts.skip(err.to_string());
            return Ok(artifacts);
        }
    };

    let dir = export::output_dir(&survey.out_dir, "comparison")?;
    let records = rows
        .iter()
        .map(|r| ComparisonRecord {
            feature: &r.feature,
            importance_top2: cell(r.importance, DIGITS),
            most_important: cell(r.most_important, DIGITS),
            fulfilled: cell(r.fulfilled, DIGITS),
            gap: cell(r.gap(), DIGITS),
        })
        .collect::<Vec<_>>();
    let csv_path = dir.join("comparison_A301_302_305.csv");
    export::write_csv(&csv_path, &records)?;
    artifacts.push(&csv_path);

    sort_by_gap(&mut rows);
    let features = rows.iter().map(|r| r.feature.clone()).collect::<Vec<_>>();
    let series = SERIES.map(str::to_owned);
    let values = rows
        .iter()
        .map(|r| vec![r.importance, r.most_important, r.fulfilled])
        .collect::<Vec<_>>();
    let svg_path = dir.join("comparison_A301_302_305.svg");
    chart::draw_grouped(
        &svg_path,
        &format!("Wichtigkeit, Wunsch und Erfüllung (n = {})", users.len()),
        &features,
        &series,
        &values,
        "Prozent",
    )?;
    tracing::info!("wrote {}", svg_path.display());
    artifacts.push(&svg_path);
    Ok(artifacts)
}
