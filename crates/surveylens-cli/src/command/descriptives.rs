use std::path::Path;

use surveylens_analysis::{
    aggregate::{Distribution, MultiSelectSpec, multi_select},
    catalog::multi_select_specs,
    descriptives::{ChartStyle, QuestionSummary, describe_question, descriptive_targets},
};
use surveylens_data::labels::normalize_label;

use super::Survey;
use crate::{
    chart::{self, Bar},
    export::{self, cell},
    util::Artifacts,
};

const PERCENT_DIGITS: u8 = 2;
const STAT_DIGITS: u8 = 2;

#[derive(Debug, serde::Serialize)]
struct DistributionRow<'a> {
    category: &'a str,
    count: u64,
    percent: Option<f64>,
    mean: Option<f64>,
    median: Option<f64>,
    std: Option<f64>,
}

#[derive(Debug, serde::Serialize)]
struct GroupRow<'a> {
    category: &'a str,
    count: u64,
    percent: Option<f64>,
}

pub(crate) fn run(survey: &Survey) -> anyhow::Result<Artifacts> {
    let dir = export::output_dir(&survey.out_dir, "descriptives")?;
    let mut artifacts = Artifacts::default();

    for variable in descriptive_targets(&survey.codebook) {
        let Some(summary) = describe_question(&survey.dataset, &survey.codebook, variable) else {
            tracing::warn!(variable = %variable.code, "no respondents, skipping");
            continue;
        };
        let title = format!("{}: {}", variable.code, normalize_label(&variable.label));
        write_question(&dir, &title, &summary, &mut artifacts)?;
    }

    for spec in multi_select_specs() {
        write_group(survey, &dir, &spec, &mut artifacts)?;
    }
    Ok(artifacts)
}

fn write_question(
    dir: &Path,
    title: &str,
    summary: &QuestionSummary,
    artifacts: &mut Artifacts,
) -> anyhow::Result<()> {
    let code = &summary.code;
    let stats = summary.stats.as_ref();
    let rows = summary
        .distribution
        .rows
        .iter()
        .map(|r| DistributionRow {
            category: &r.category,
            count: r.count,
            percent: cell(r.percent, PERCENT_DIGITS),
            mean: stats.and_then(|s| cell(s.mean, STAT_DIGITS)),
            median: stats.and_then(|s| cell(s.median, STAT_DIGITS)),
            std: stats.and_then(|s| cell(s.std_dev, STAT_DIGITS)),
        })
        .collect::<Vec<_>>();
    let csv_path = dir.join(format!("{code}_descriptives.csv"));
    export::write_csv(&csv_path, &rows)?;
    artifacts.push(&csv_path);

    let svg_path = dir.join(format!("{code}_distribution.svg"));
    match ChartStyle::for_question(code) {
        ChartStyle::Pie => {
            let labels = summary
                .distribution
                .rows
                .iter()
                .map(|r| r.category.clone())
                .collect::<Vec<_>>();
            let shares = summary
                .distribution
                .rows
                .iter()
                .map(|r| r.percent)
                .collect::<Vec<_>>();
            chart::draw_pie(&svg_path, title, &labels, &shares)?;
        }
        ChartStyle::Bar { reindex, numbered } => {
            let distribution = match reindex {
                Some((order, base)) => {
                    let reindexed = summary.distribution.reindex(order, base);
                    if !reindexed.dropped.is_empty() {
                        tracing::warn!(
                            variable = %code,
                            "categories outside the fixed order are not charted: {}",
                            reindexed.dropped.join(", ")
                        );
                    }
                    reindexed.distribution
                }
                None => summary.distribution.clone(),
            };
            chart::draw_bars(&svg_path, title, &bars(&distribution), numbered)?;
        }
    }
    tracing::info!("wrote {}", svg_path.display());
    artifacts.push(&svg_path);
    Ok(())
}

fn write_group(
    survey: &Survey,
    dir: &Path,
    spec: &MultiSelectSpec,
    artifacts: &mut Artifacts,
) -> anyhow::Result<()> {
    let prefix = spec.prefix;
    let subset = spec.population.select(&survey.dataset);
    if subset.is_empty() {
        tracing::warn!(question = prefix, "no {} in the dataset, skipping", spec.population);
        return Ok(());
    }
    let result = multi_select(&subset, &survey.codebook, spec);
    if result.distribution.is_empty() {
        tracing::warn!(question = prefix, "no options in the codebook, skipping");
        return Ok(());
    }
    if !result.dropped.is_empty() {
        tracing::warn!(
            question = prefix,
            "options outside the fixed order are left out: {}",
            result.dropped.join(", ")
        );
    }

    let rows = result
        .distribution
        .rows
        .iter()
        .map(|r| GroupRow {
            category: &r.category,
            count: r.count,
            percent: cell(r.percent, spec.precision),
        })
        .collect::<Vec<_>>();
    let csv_path = dir.join(format!("{prefix}_group.csv"));
    export::write_csv(&csv_path, &rows)?;
    artifacts.push(&csv_path);

    let svg_path = dir.join(format!("{prefix}_group.svg"));
    let title = format!("{prefix} ({}, n = {})", spec.population, result.respondents);
    chart::draw_bars(&svg_path, &title, &bars(&result.distribution), spec.order.is_some())?;
    tracing::info!("wrote {}", svg_path.display());
    artifacts.push(&svg_path);
    Ok(())
}

fn bars(distribution: &Distribution) -> Vec<Bar> {
    distribution
        .rows
        .iter()
        .map(|r| Bar {
            label: r.category.clone(),
            percent: r.percent,
            count: r.count,
        })
        .collect()
}
