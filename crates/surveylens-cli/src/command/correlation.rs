use surveylens_analysis::{
    catalog::{FREQUENCY, SATISFACTION},
    correlation::{importance_satisfaction_codes, pairwise_spearman, spearman_matrix},
};

use super::Survey;
use crate::{
    chart::{self, ColorScale},
    export::{self, cell},
    util::Artifacts,
};

const DIGITS: u8 = 3;

pub(crate) fn run(survey: &Survey) -> anyhow::Result<Artifacts> {
    let dir = export::output_dir(&survey.out_dir, "correlation")?;
    let mut artifacts = Artifacts::default();
    let everyone = survey.dataset.all();

    let (rho, n) = pairwise_spearman(&everyone, FREQUENCY, SATISFACTION);
    let rho_text = cell(rho, DIGITS).map_or_else(|| "n/a".to_owned(), |r| format!("{r:.3}"));
    let text_path = dir.join(format!("corr_{FREQUENCY}_{SATISFACTION}.txt"));
    export::write_text(
        &text_path,
        &format!("Spearman rho ({FREQUENCY}, {SATISFACTION}): {rho_text} (n = {n})\n"),
    )?;
    artifacts.push(&text_path);

    let matrix = spearman_matrix(&everyone, &survey.codebook, &importance_satisfaction_codes());
    if matrix.n < 2 {
        tracing::warn!(n = matrix.n, "too few complete answers, correlations are undefined");
    }
    let mut header = vec![String::new()];
    header.extend(matrix.labels.iter().cloned());
    let records = matrix
        .labels
        .iter()
        .zip(&matrix.values)
        .map(|(label, row)| {
            let mut record = vec![label.clone()];
            record.extend(row.iter().map(|v| cell(*v, DIGITS).map(|v| v.to_string()).unwrap_or_default()));
            record
        })
        .collect::<Vec<_>>();
    let csv_path = dir.join("corr_matrix_A301_A401.csv");
    export::write_records(&csv_path, &header, &records)?;
    artifacts.push(&csv_path);

    let svg_path = dir.join("heatmap_A301_A401.svg");
    chart::draw_heatmap(
        &svg_path,
        &format!("Spearman-Korrelation (n = {})", matrix.n),
        &matrix.labels,
        &matrix.labels,
        &matrix.values,
        ColorScale::Diverging,
        2,
    )?;
    tracing::info!("wrote {}", svg_path.display());
    artifacts.push(&svg_path);
    Ok(artifacts)
}
