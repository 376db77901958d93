use std::{
    fs::File,
    io::{self, BufWriter, StdoutLock, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context;
use chrono::{DateTime, Utc};

/// Where the run summary goes.
#[derive(Debug)]
pub enum Output {
    Stdout(StdoutLock<'static>),
    File { writer: BufWriter<File>, path: PathBuf },
}

impl Output {
    /// Serializes `value` as pretty JSON to `path`, or to stdout without one.
    pub fn save_json<T>(value: &T, path: Option<PathBuf>) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        let mut output = match path {
            Some(path) => Self::create(path)?,
            None => Self::Stdout(io::stdout().lock()),
        };
        output.write_json(value)
    }

    fn create(path: PathBuf) -> anyhow::Result<Self> {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create summary file: {}", path.display()))?;
        Ok(Self::File {
            writer: BufWriter::new(file),
            path,
        })
    }

    fn target(&self) -> String {
        match self {
            Self::Stdout(_) => "stdout".to_owned(),
            Self::File { path, .. } => path.display().to_string(),
        }
    }

    fn write_json<T>(&mut self, value: &T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        serde_json::to_writer_pretty(&mut *self, value)
            .with_context(|| format!("Failed to write the run summary to {}", self.target()))?;
        writeln!(self)
            .and_then(|()| self.flush())
            .with_context(|| format!("Failed to finish the run summary in {}", self.target()))?;
        if let Self::File { path, .. } = self {
            tracing::info!("wrote {}", path.display());
        }
        Ok(())
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Stdout(writer) => writer.write(buf),
            Self::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Stdout(writer) => writer.flush(),
            Self::File { writer, .. } => writer.flush(),
        }
    }
}

/// Outcome of one analysis in the run summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Ok,
    Skipped,
    Failed,
}

/// Files written by an analysis, and why it stopped early if it did.
#[derive(Debug, Default)]
pub struct Artifacts {
    pub files: Vec<PathBuf>,
    pub skipped: Option<String>,
}

impl Artifacts {
    pub fn push(&mut self, path: impl AsRef<Path>) {
        self.files.push(path.as_ref().to_path_buf());
    }

    pub fn skip(&mut self, reason: impl Into<String>) {
        let reason = reason.into();
        tracing::warn!("{reason}");
        self.skipped = Some(reason);
    }
}

#[derive(Debug, serde::Serialize)]
pub struct AnalysisReport {
    pub name: &'static str,
    pub status: Status,
    pub message: Option<String>,
    pub files: Vec<PathBuf>,
}

impl AnalysisReport {
    /// Report of an analysis that returned, successfully or not.
    pub fn new(name: &'static str, result: anyhow::Result<Artifacts>) -> Self {
        match result {
            Ok(Artifacts { files, skipped: None }) => Self {
                name,
                status: Status::Ok,
                message: None,
                files,
            },
            Ok(Artifacts {
                files,
                skipped: Some(reason),
            }) => Self {
                name,
                status: Status::Skipped,
                message: Some(reason),
                files,
            },
            Err(err) => Self {
                name,
                status: Status::Failed,
                message: Some(format!("{err:#}")),
                files: vec![],
            },
        }
    }
}

#[derive(Debug, serde::Serialize)]
pub struct RunSummary {
    pub generated_at: DateTime<Utc>,
    pub dataset: PathBuf,
    pub respondents: usize,
    pub analyses: Vec<AnalysisReport>,
}
