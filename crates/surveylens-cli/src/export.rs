//! CSV and text output of result tables.

use std::{
    fs::{self, File},
    io::{BufWriter, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context;
use surveylens_stats::round::round_to;

/// Byte-order mark written ahead of every CSV so spreadsheets detect UTF-8.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Creates `dir` (and parents) and returns it.
pub(crate) fn output_dir(base: &Path, name: &str) -> anyhow::Result<PathBuf> {
    let dir = base.join(name);
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
    Ok(dir)
}

fn create(path: &Path) -> anyhow::Result<BufWriter<File>> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    Ok(BufWriter::new(file))
}

/// Writes `rows` as a CSV file with a header derived from the row type.
pub(crate) fn write_csv<T>(path: &Path, rows: &[T]) -> anyhow::Result<()>
where
    T: serde::Serialize,
{
    let mut writer = create(path)?;
    writer
        .write_all(UTF8_BOM)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    let mut csv = csv::Writer::from_writer(writer);
    for row in rows {
        csv.serialize(row)
            .with_context(|| format!("Failed to write CSV row to {}", path.display()))?;
    }
    csv.flush()
        .with_context(|| format!("Failed to flush {}", path.display()))?;
    tracing::info!("wrote {}", path.display());
    Ok(())
}

/// Writes a CSV file from a header and string records.
pub(crate) fn write_records(path: &Path, header: &[String], records: &[Vec<String>]) -> anyhow::Result<()> {
    let mut writer = create(path)?;
    writer
        .write_all(UTF8_BOM)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    let mut csv = csv::Writer::from_writer(writer);
    for record in std::iter::once(header).chain(records.iter().map(Vec::as_slice)) {
        csv.write_record(record)
            .with_context(|| format!("Failed to write CSV row to {}", path.display()))?;
    }
    csv.flush()
        .with_context(|| format!("Failed to flush {}", path.display()))?;
    tracing::info!("wrote {}", path.display());
    Ok(())
}

/// Writes a plain text report.
pub(crate) fn write_text(path: &Path, text: &str) -> anyhow::Result<()> {
    fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!("wrote {}", path.display());
    Ok(())
}

/// Rounded value, or `None` for values that are not finite.
#[must_use]
pub(crate) fn cell(value: f64, digits: u8) -> Option<f64> {
    value.is_finite().then(|| round_to(value, digits))
}
