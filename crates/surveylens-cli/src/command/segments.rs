use surveylens_analysis::{
    catalog::{self, FEATURE_ORDER, FREQUENCY_ORDER, Population, SEGMENTS, feature_items},
    segment::{SegmentMetric, pivot, segment_table},
};

use super::Survey;
use crate::{
    chart,
    export::{self, cell},
    util::Artifacts,
};

const DIGITS: u8 = 2;

#[derive(Debug, serde::Serialize)]
struct SegmentRow<'a> {
    category: &'a str,
    feature: &'a str,
    metric: String,
    value: Option<f64>,
}

pub(crate) fn run(survey: &Survey) -> anyhow::Result<Artifacts> {
    let mut artifacts = Artifacts::default();
    let users = Population::Users.select(&survey.dataset);
    if users.is_empty() {
        artifacts.skip("no users in the dataset");
        return Ok(artifacts);
    }
    let dir = export::output_dir(&survey.out_dir, "segments")?;
    let metrics = [
        (SegmentMetric::Top2Box, feature_items(catalog::IMPORTANCE)),
        (SegmentMetric::Fulfilled, feature_items(catalog::FULFILLED)),
    ];

    for segment in SEGMENTS {
        let records = segment_table(&users, &survey.codebook, segment, &metrics);
        let rows = records
            .iter()
            .map(|r| SegmentRow {
                category: &r.category,
                feature: &r.feature,
                metric: r.metric.to_string(),
                value: cell(r.value, DIGITS),
            })
            .collect::<Vec<_>>();
        let csv_path = dir.join(format!("segment_{segment}.csv"));
        export::write_csv(&csv_path, &rows)?;
        artifacts.push(&csv_path);

        let category_order = (segment == catalog::FREQUENCY).then_some(&FREQUENCY_ORDER[..]);
        for (metric, _) in &metrics {
            let matrix = pivot(&records, *metric, Some(&FEATURE_ORDER), category_order);
            let svg_path = dir.join(format!("{segment}_{metric}.svg"));
            chart::draw_grouped(
                &svg_path,
                &format!("{metric} nach {segment}"),
                &matrix.features,
                &matrix.categories,
                &matrix.values,
                "Prozent",
            )?;
            tracing::info!("wrote {}", svg_path.display());
            artifacts.push(&svg_path);
        }
    }
    Ok(artifacts)
}
