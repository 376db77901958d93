use std::path::PathBuf;

use chrono::Utc;

use super::{ANALYSES, Survey};
use crate::util::{AnalysisReport, Output, RunSummary, Status};

/// Runs every analysis. A failing analysis is logged and recorded; the
/// remaining ones still run.
pub(crate) fn run(survey: &Survey, summary: Option<Option<PathBuf>>) -> anyhow::Result<()> {
    let mut reports = vec![];
    for (name, analysis) in ANALYSES {
        tracing::info!("running {name}");
        let report = AnalysisReport::new(name, analysis(survey));
        log_report(&report);
        reports.push(report);
    }

    let failed = reports.iter().filter(|r| r.status == Status::Failed).count();
    tracing::info!(
        analyses = reports.len(),
        failed,
        "run finished, output in {}",
        survey.out_dir.display()
    );
    if let Some(output) = summary {
        save_summary(survey, reports, output)?;
    }
    Ok(())
}

/// The reason of a skipped analysis was already logged when it stopped.
fn log_report(report: &AnalysisReport) {
    let name = report.name;
    let files = report.files.len();
    match report.status {
        Status::Ok => tracing::info!(files, "{name} finished"),
        Status::Skipped => tracing::info!(files, "{name} stopped early"),
        Status::Failed => tracing::error!(
            "{name} failed: {}",
            report.message.as_deref().unwrap_or_default()
        ),
    }
}

/// Writes the run summary to `output`, or to stdout.
pub(crate) fn save_summary(
    survey: &Survey,
    analyses: Vec<AnalysisReport>,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let summary = RunSummary {
        generated_at: Utc::now(),
        dataset: survey.data_path.clone(),
        respondents: survey.dataset.len(),
        analyses,
    };
    Output::save_json(&summary, output)
}
