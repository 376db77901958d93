use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use surveylens_analysis::catalog::MULTI_SELECT_FAMILIES;
use surveylens_data::{codebook::Codebook, dataset::Dataset, loader};

use crate::util::{AnalysisReport, Artifacts};

mod all;
mod comparison;
mod correlation;
mod descriptives;
#[cfg(test)]
mod fixtures;
mod segments;
mod stat_tests;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[clap(flatten)]
    input: InputArgs,
    /// Which analysis to run (all of them when omitted)
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Distributions of every single-choice and multi-select question
    Descriptives,
    /// Spearman correlations of importance ratings and satisfaction
    Correlation,
    /// Importance, wish and fulfilment per feature
    Comparison,
    /// Feature metrics broken down by age, gender and usage frequency
    Segments,
    /// Significance tests of feature ratings across segments
    StatTests,
    /// Every analysis, continuing past failures
    All,
}

/// Input files and output location shared by all analyses.
#[derive(Debug, Clone, Args)]
pub(crate) struct InputArgs {
    /// Survey dataset (xlsx/xls/ods workbook or delimited text)
    #[arg(long, global = true, default_value = "data/data_chatbot_quality_2025-05-09.xlsx")]
    data: PathBuf,
    /// Variables table of the codebook (VAR, LABEL, TYPE)
    #[arg(long, global = true, default_value = "data/variables_chatbot_quality_2025-05-09.csv")]
    variables: PathBuf,
    /// Values table of the codebook (VAR, RESPONSE, MEANING)
    #[arg(long, global = true, default_value = "data/values_chatbot_quality_2025-05-09.csv")]
    values: PathBuf,
    /// Field delimiter of the codebook tables ("tab" or a single character)
    #[arg(long, global = true, default_value = "tab", value_parser = parse_delimiter)]
    codebook_delimiter: u8,
    /// Field delimiter of a delimited-text dataset
    #[arg(long, global = true, default_value = ",", value_parser = parse_delimiter)]
    data_delimiter: u8,
    /// Root directory of all figures and tables
    #[arg(long, global = true, default_value = "figures")]
    out_dir: PathBuf,
    /// Write a JSON run summary to this file, or to stdout without a value
    #[arg(long, global = true, num_args = 0..=1)]
    summary: Option<Option<PathBuf>>,
}

fn parse_delimiter(s: &str) -> Result<u8, String> {
    match s {
        "tab" | "\\t" | "\t" => Ok(b'\t'),
        _ => match s.as_bytes() {
            [b] if b.is_ascii() => Ok(*b),
            _ => Err(format!("expected \"tab\" or a single ASCII character, got {s:?}")),
        },
    }
}

/// The loaded dataset and codebook.
#[derive(Debug)]
pub(crate) struct Survey {
    pub dataset: Dataset,
    pub codebook: Codebook,
    pub data_path: PathBuf,
    pub out_dir: PathBuf,
}

impl InputArgs {
    fn load(&self) -> anyhow::Result<Survey> {
        let codebook = loader::read_codebook(&self.variables, &self.values, self.codebook_delimiter)
            .context("Failed to read the codebook")?
            .with_multi_select_families(&MULTI_SELECT_FAMILIES);
        let dataset = loader::read_dataset(&self.data, self.data_delimiter)
            .context("Failed to read the dataset")?;
        tracing::info!(
            respondents = dataset.len(),
            variables = codebook.variables().len(),
            "loaded {}",
            self.data.display()
        );
        Ok(Survey {
            dataset,
            codebook,
            data_path: self.data.clone(),
            out_dir: self.out_dir.clone(),
        })
    }
}

/// An analysis run over the loaded survey.
pub(crate) type Analysis = fn(&Survey) -> anyhow::Result<Artifacts>;

pub(crate) const ANALYSES: [(&str, Analysis); 5] = [
    ("descriptives", descriptives::run),
    ("correlation", correlation::run),
    ("comparison", comparison::run),
    ("segments", segments::run),
    ("stat-tests", stat_tests::run),
];

impl Mode {
    /// The single analysis this mode runs, `None` for [`Mode::All`].
    fn analysis(&self) -> Option<(&'static str, Analysis)> {
        let name = match self {
            Self::Descriptives => "descriptives",
            Self::Correlation => "correlation",
            Self::Comparison => "comparison",
            Self::Segments => "segments",
            Self::StatTests => "stat-tests",
            Self::All => return None,
        };
        ANALYSES.into_iter().find(|(n, _)| *n == name)
    }
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    let survey = args.input.load()?;
    let summary = args.input.summary.clone();
    let mode = args.mode.unwrap_or(Mode::All);
    let Some((name, analysis)) = mode.analysis() else {
        return all::run(&survey, summary);
    };

    let artifacts = analysis(&survey)?;
    if let Some(output) = summary {
        all::save_summary(&survey, vec![AnalysisReport::new(name, Ok(artifacts))], output)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_cli_definition() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_parse_delimiter() {
        assert_eq!(parse_delimiter("tab"), Ok(b'\t'));
        assert_eq!(parse_delimiter(";"), Ok(b';'));
        assert!(parse_delimiter(";;").is_err());
        assert!(parse_delimiter("é").is_err());
    }

    #[test]
    fn test_every_mode_has_an_analysis() {
        for mode in [
            Mode::Descriptives,
            Mode::Correlation,
            Mode::Comparison,
            Mode::Segments,
            Mode::StatTests,
        ] {
            assert!(mode.analysis().is_some(), "{mode:?}");
        }
        assert!(Mode::All.analysis().is_none());
    }

    #[test]
    fn test_summary_flag() {
        let args = CommandArgs::parse_from(["surveylens", "all", "--summary"]);
        assert_eq!(args.input.summary, Some(None));
        let args = CommandArgs::parse_from(["surveylens", "--summary", "run.json", "segments"]);
        assert_eq!(args.input.summary, Some(Some(PathBuf::from("run.json"))));
        assert!(matches!(args.mode, Some(Mode::Segments)));
        let args = CommandArgs::parse_from(["surveylens"]);
        assert!(args.mode.is_none());
        assert_eq!(args.input.codebook_delimiter, b'\t');
    }
}
