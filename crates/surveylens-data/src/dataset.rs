//! In-memory respondent table.
//!
//! A [`Dataset`] is loaded once and then only read. Analyses work on
//! [`Subset`]s, which borrow the dataset and store row positions, so filtering
//! never copies respondent data.

use std::collections::HashMap;

use crate::value::RawValue;

static EMPTY: RawValue = RawValue::Empty;

/// The loaded survey table: one column per variable code, one row per respondent.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    columns: Vec<String>,
    index: HashMap<String, usize>,
    rows: Vec<Vec<RawValue>>,
}

impl Dataset {
    /// Builds a dataset from a header of variable codes and respondent rows.
    ///
    /// Rows shorter than the header are padded with empty cells; surplus
    /// cells are dropped. If a code appears twice, lookups resolve to its
    /// first column.
    #[must_use]
    pub fn new(columns: Vec<String>, mut rows: Vec<Vec<RawValue>>) -> Self {
        let mut index = HashMap::with_capacity(columns.len());
        for (i, code) in columns.iter().enumerate() {
            index.entry(code.clone()).or_insert(i);
        }
        for row in &mut rows {
            row.resize(columns.len(), RawValue::Empty);
        }
        Self {
            columns,
            index,
            rows,
        }
    }

    /// Variable codes in column order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn has_column(&self, code: &str) -> bool {
        self.index.contains_key(code)
    }

    /// Number of respondents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterates over all respondents in row order.
    pub fn respondents(&self) -> impl Iterator<Item = Respondent<'_>> {
        (0..self.rows.len()).map(|row| Respondent { dataset: self, row })
    }

    /// A subset containing every respondent.
    #[must_use]
    pub fn all(&self) -> Subset<'_> {
        Subset {
            dataset: self,
            rows: (0..self.rows.len()).collect(),
        }
    }

    /// A subset of the respondents matching `predicate`.
    pub fn subset<F>(&self, predicate: F) -> Subset<'_>
    where
        F: Fn(&Respondent<'_>) -> bool,
    {
        Subset {
            dataset: self,
            rows: self
                .respondents()
                .filter(|r| predicate(r))
                .map(|r| r.row)
                .collect(),
        }
    }

    fn cell(&self, row: usize, code: &str) -> &RawValue {
        self.index
            .get(code)
            .and_then(|&col| self.rows.get(row).and_then(|r| r.get(col)))
            .unwrap_or(&EMPTY)
    }
}

/// One row of the respondent table.
#[derive(Debug, Clone, Copy)]
pub struct Respondent<'a> {
    dataset: &'a Dataset,
    row: usize,
}

impl<'a> Respondent<'a> {
    /// Position of the respondent in the loaded table.
    #[must_use]
    pub fn index(&self) -> usize {
        self.row
    }

    /// Raw answer to variable `code`. Unknown variables read as empty.
    #[must_use]
    pub fn value(&self, code: &str) -> &'a RawValue {
        self.dataset.cell(self.row, code)
    }

    /// Numeric answer to variable `code`, if any.
    #[must_use]
    pub fn number(&self, code: &str) -> Option<f64> {
        self.value(code).as_number()
    }

    /// Returns `true` if the numeric answer to `code` equals `expected`.
    #[must_use]
    pub fn answered(&self, code: &str, expected: f64) -> bool {
        self.number(code).is_some_and(|v| v == expected)
    }
}

/// A filtered view of a [`Dataset`].
#[derive(Debug, Clone)]
pub struct Subset<'a> {
    dataset: &'a Dataset,
    rows: Vec<usize>,
}

impl<'a> Subset<'a> {
    #[must_use]
    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    /// Number of respondents in the subset.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Respondent<'a>> + '_ {
        let dataset = self.dataset;
        self.rows.iter().map(move |&row| Respondent { dataset, row })
    }

    /// Narrows the subset further.
    #[must_use]
    pub fn filter<F>(&self, predicate: F) -> Subset<'a>
    where
        F: Fn(&Respondent<'a>) -> bool,
    {
        Subset {
            dataset: self.dataset,
            rows: self
                .iter()
                .filter(|r| predicate(r))
                .map(|r| r.row)
                .collect(),
        }
    }

    /// Non-missing numeric answers to `code`, in row order.
    #[must_use]
    pub fn numbers(&self, code: &str) -> Vec<f64> {
        self.iter().filter_map(|r| r.number(code)).collect()
    }

    /// Number of respondents whose numeric answer to `code` equals `expected`.
    #[must_use]
    pub fn count_answered(&self, code: &str, expected: f64) -> usize {
        self.iter().filter(|r| r.answered(code, expected)).count()
    }
}
