//! Reading the survey export from disk.
//!
//! The respondent table comes either as a workbook (read with `calamine`) or
//! as delimited text. In both cases the first row holds variable codes and
//! the second row holds metadata that is skipped. The codebook tables are
//! delimited text in whatever encoding the survey tool produced, so they are
//! decoded with a fallback chain before parsing.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use calamine::{Data, Reader, open_workbook_auto};
use encoding_rs::{Encoding, UTF_16LE, WINDOWS_1252};
use serde::Deserialize;

use crate::{
    codebook::{Codebook, ValueMeaningMap, VariableDescriptor, VariableType},
    dataset::Dataset,
    value::RawValue,
};

const WORKBOOK_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xlsb", "xls", "ods"];

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum LoadError {
    #[display("failed to read {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
    #[display("{}: no supported text encoding decodes the file", path.display())]
    Encoding { path: PathBuf },
    #[display("{}: malformed delimited table: {source}", path.display())]
    Csv { path: PathBuf, source: csv::Error },
    #[display("{}: cannot read workbook: {source}", path.display())]
    Workbook {
        path: PathBuf,
        source: calamine::Error,
    },
    #[display("{}: table has no header row", path.display())]
    EmptyTable { path: PathBuf },
    #[display("{}: required column '{column}' is missing", path.display())]
    MissingColumn { path: PathBuf, column: String },
}

/// Decodes a text file of unknown encoding.
///
/// Tried in order: a byte-order mark, UTF-16LE without a mark (detected by
/// NUL high bytes, which strict UTF-8 would accept), strict UTF-8, and
/// finally Windows-1252.
#[must_use]
pub fn decode_text(bytes: &[u8]) -> Option<String> {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        let (text, had_errors) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
        if !had_errors {
            return Some(text.into_owned());
        }
    }
    if looks_like_utf16le(bytes) {
        let (text, had_errors) = UTF_16LE.decode_without_bom_handling(bytes);
        if !had_errors {
            return Some(text.into_owned());
        }
    }
    if let Ok(text) = std::str::from_utf8(bytes) {
        return Some(text.to_owned());
    }
    let (text, had_errors) = WINDOWS_1252.decode_without_bom_handling(bytes);
    (!had_errors).then(|| text.into_owned())
}

fn looks_like_utf16le(bytes: &[u8]) -> bool {
    if bytes.len() < 2 || bytes.len() % 2 != 0 {
        return false;
    }
    let sample = &bytes[..bytes.len().min(256)];
    let pairs = sample.len() / 2;
    let high_nul = sample.chunks_exact(2).filter(|p| p[1] == 0).count();
    let low_nul = sample.chunks_exact(2).filter(|p| p[0] == 0).count();
    high_nul * 2 > pairs && low_nul * 4 < pairs
}

fn read_text(path: &Path) -> Result<String, LoadError> {
    let bytes = fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_owned(),
        source,
    })?;
    decode_text(&bytes).ok_or_else(|| LoadError::Encoding {
        path: path.to_owned(),
    })
}

fn delimited_reader(text: &str, delimiter: u8, has_headers: bool) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(has_headers)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes())
}

fn require_columns(
    path: &Path,
    reader: &mut csv::Reader<&[u8]>,
    columns: &[&str],
) -> Result<(), LoadError> {
    let headers = reader.headers().map_err(|source| LoadError::Csv {
        path: path.to_owned(),
        source,
    })?;
    if headers.is_empty() {
        return Err(LoadError::EmptyTable {
            path: path.to_owned(),
        });
    }
    for column in columns {
        if !headers.iter().any(|h| h == *column) {
            return Err(LoadError::MissingColumn {
                path: path.to_owned(),
                column: (*column).to_owned(),
            });
        }
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
struct VariableRecord {
    #[serde(rename = "VAR")]
    var: String,
    #[serde(rename = "LABEL", default)]
    label: String,
    #[serde(rename = "TYPE", default)]
    var_type: String,
}

#[derive(Debug, Deserialize)]
struct ValueRecord {
    #[serde(rename = "VAR")]
    var: String,
    #[serde(rename = "RESPONSE")]
    response: String,
    #[serde(rename = "MEANING", default)]
    meaning: String,
}

/// Reads the Variables table (`VAR`, `LABEL`, `TYPE`).
pub fn read_variables(path: &Path, delimiter: u8) -> Result<Vec<VariableDescriptor>, LoadError> {
    let text = read_text(path)?;
    let mut reader = delimited_reader(&text, delimiter, true);
    require_columns(path, &mut reader, &["VAR", "LABEL", "TYPE"])?;

    let mut variables = vec![];
    for record in reader.deserialize::<VariableRecord>() {
        let record = record.map_err(|source| LoadError::Csv {
            path: path.to_owned(),
            source,
        })?;
        if record.var.is_empty() {
            continue;
        }
        variables.push(VariableDescriptor::new(
            record.var,
            record.label,
            VariableType::parse(&record.var_type),
        ));
    }
    Ok(variables)
}

/// Reads the Values table (`VAR`, `RESPONSE`, `MEANING`).
pub fn read_values(path: &Path, delimiter: u8) -> Result<ValueMeaningMap, LoadError> {
    let text = read_text(path)?;
    let mut reader = delimited_reader(&text, delimiter, true);
    require_columns(path, &mut reader, &["VAR", "RESPONSE", "MEANING"])?;

    let mut values = ValueMeaningMap::new();
    for record in reader.deserialize::<ValueRecord>() {
        let record = record.map_err(|source| LoadError::Csv {
            path: path.to_owned(),
            source,
        })?;
        if record.var.is_empty() {
            continue;
        }
        values.insert(&record.var, &record.response, record.meaning);
    }
    Ok(values)
}

/// Reads both codebook tables.
pub fn read_codebook(
    variables: &Path,
    values: &Path,
    delimiter: u8,
) -> Result<Codebook, LoadError> {
    Ok(Codebook::new(
        read_variables(variables, delimiter)?,
        read_values(values, delimiter)?,
    ))
}

/// Reads the respondent table.
///
/// Workbook formats are recognized by extension; anything else is parsed as
/// delimited text with `delimiter`.
pub fn read_dataset(path: &Path, delimiter: u8) -> Result<Dataset, LoadError> {
    let is_workbook = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            WORKBOOK_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        });
    if is_workbook {
        read_workbook(path)
    } else {
        read_delimited_dataset(path, delimiter)
    }
}

fn read_workbook(path: &Path) -> Result<Dataset, LoadError> {
    let workbook_error = |source: calamine::Error| LoadError::Workbook {
        path: path.to_owned(),
        source,
    };
    let mut workbook = open_workbook_auto(path).map_err(workbook_error)?;
    let Some(sheet_name) = workbook.sheet_names().first().cloned() else {
        return Err(LoadError::EmptyTable {
            path: path.to_owned(),
        });
    };
    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(workbook_error)?;

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Err(LoadError::EmptyTable {
            path: path.to_owned(),
        });
    };
    let columns = header.iter().map(|cell| cell_value(cell).to_string()).collect();
    let body = rows
        .skip(1)
        .map(|row| row.iter().map(cell_value).collect())
        .collect();
    Ok(Dataset::new(columns, body))
}

#[expect(clippy::cast_precision_loss)]
fn cell_value(cell: &Data) -> RawValue {
    match cell {
        Data::Empty | Data::Error(_) => RawValue::Empty,
        Data::Float(f) => RawValue::Number(*f),
        Data::Int(i) => RawValue::Number(*i as f64),
        Data::String(s) => RawValue::from_text(s),
        other => RawValue::Text(other.to_string()),
    }
}

fn read_delimited_dataset(path: &Path, delimiter: u8) -> Result<Dataset, LoadError> {
    let text = read_text(path)?;
    let mut reader = delimited_reader(&text, delimiter, false);
    let mut records = reader.records();
    let csv_error = |source: csv::Error| LoadError::Csv {
        path: path.to_owned(),
        source,
    };

    let Some(header) = records.next().transpose().map_err(csv_error)? else {
        return Err(LoadError::EmptyTable {
            path: path.to_owned(),
        });
    };
    let columns = header.iter().map(str::to_owned).collect();

    let mut body = vec![];
    for record in records.skip(1) {
        let record = record.map_err(csv_error)?;
        body.push(record.iter().map(RawValue::from_text).collect());
    }
    Ok(Dataset::new(columns, body))
}
