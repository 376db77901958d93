//! Codebook: variable descriptors and response meanings.
//!
//! The codebook is built once from the Variables and Values tables and then
//! consulted read-only. Meaning lookup is total: every `(variable, raw value)`
//! pair resolves to a [`ResponseLabel`], with [`ResponseLabel::Missing`] as
//! the explicit fallback.

use std::{collections::HashMap, fmt};

use crate::value::{RawValue, normalize_code};

/// Response code the survey tool writes for unanswered items.
pub const MISSING_SENTINEL: &str = "-9";

/// Display label for answers without a meaning.
pub const MISSING_LABEL: &str = "Missing";

/// Measurement type of a survey variable.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub enum VariableType {
    Nominal,
    Ordinal,
    Dichotomous,
    /// One binary item of a multi-select question.
    MultiSelectItem,
    /// Any other type the survey tool exports (free text, metric, dates).
    Other(String),
}

impl VariableType {
    /// Parses the `TYPE` column of the Variables table. Case-insensitive.
    ///
    /// ```
    /// # use surveylens_data::codebook::VariableType;
    /// assert_eq!(VariableType::parse("ORDINAL"), VariableType::Ordinal);
    /// assert_eq!(VariableType::parse("multi-select-item"), VariableType::MultiSelectItem);
    /// assert_eq!(VariableType::parse("TEXT"), VariableType::Other("TEXT".to_owned()));
    /// ```
    #[must_use]
    pub fn parse(s: &str) -> Self {
        let trimmed = s.trim();
        match trimmed.to_ascii_uppercase().as_str() {
            "NOMINAL" => Self::Nominal,
            "ORDINAL" => Self::Ordinal,
            "DICHOTOMOUS" => Self::Dichotomous,
            "MULTI-SELECT-ITEM" | "MULTISELECT" | "MULTI-SELECT" => Self::MultiSelectItem,
            _ => Self::Other(trimmed.to_owned()),
        }
    }

    /// Returns `true` for the types that get a single-choice distribution.
    #[must_use]
    pub fn is_categorical(&self) -> bool {
        matches!(self, Self::Nominal | Self::Ordinal | Self::Dichotomous)
    }
}

/// One row of the Variables table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableDescriptor {
    pub code: String,
    pub label: String,
    pub var_type: VariableType,
}

impl VariableDescriptor {
    #[must_use]
    pub fn new(code: impl Into<String>, label: impl Into<String>, var_type: VariableType) -> Self {
        Self {
            code: code.into(),
            label: label.into(),
            var_type,
        }
    }

    /// Family prefix of a sub-variable code such as `A301_04`.
    ///
    /// Returns `None` unless the code has the shape `{PREFIX}_{digits}`.
    ///
    /// ```
    /// # use surveylens_data::codebook::{VariableDescriptor, VariableType};
    /// let item = VariableDescriptor::new("A301_04", "x", VariableType::Ordinal);
    /// assert_eq!(item.family(), Some("A301"));
    /// let single = VariableDescriptor::new("A401", "x", VariableType::Ordinal);
    /// assert_eq!(single.family(), None);
    /// ```
    #[must_use]
    pub fn family(&self) -> Option<&str> {
        family_prefix(&self.code)
    }
}

/// Family prefix of `code`, see [`VariableDescriptor::family`].
#[must_use]
pub fn family_prefix(code: &str) -> Option<&str> {
    let (prefix, suffix) = code.rsplit_once('_')?;
    (!prefix.is_empty() && !suffix.is_empty() && suffix.bytes().all(|b| b.is_ascii_digit()))
        .then_some(prefix)
}

/// Result of resolving a raw answer through the codebook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseLabel<'a> {
    /// The codebook meaning of the answer.
    Meaning(&'a str),
    /// Unanswered, sentinel, or a code the codebook does not know.
    Missing,
}

impl<'a> ResponseLabel<'a> {
    #[must_use]
    pub fn as_str(&self) -> &'a str {
        match self {
            Self::Meaning(meaning) => *meaning,
            Self::Missing => MISSING_LABEL,
        }
    }

    #[must_use]
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

impl fmt::Display for ResponseLabel<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mapping from `(variable code, response code)` to a meaning.
#[derive(Debug, Clone, Default)]
pub struct ValueMeaningMap {
    meanings: HashMap<String, HashMap<String, String>>,
}

impl ValueMeaningMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a meaning. Later entries for the same pair replace earlier ones.
    pub fn insert(&mut self, var: &str, response: &str, meaning: impl Into<String>) {
        self.meanings
            .entry(var.trim().to_owned())
            .or_default()
            .insert(normalize_code(response), meaning.into());
    }

    /// Meaning of a response code given as text.
    #[must_use]
    pub fn lookup(&self, var: &str, response: &str) -> Option<&str> {
        self.meanings
            .get(var)?
            .get(&normalize_code(response))
            .map(String::as_str)
    }

    /// Resolves a raw answer. Empty cells are looked up as the missing sentinel.
    ///
    /// ```
    /// # use surveylens_data::{codebook::{ResponseLabel, ValueMeaningMap}, value::RawValue};
    /// let mut map = ValueMeaningMap::new();
    /// map.insert("A101", "1", "Ja");
    /// assert_eq!(map.resolve("A101", &RawValue::Number(1.0)), ResponseLabel::Meaning("Ja"));
    /// assert_eq!(map.resolve("A101", &RawValue::Number(3.0)), ResponseLabel::Missing);
    /// assert_eq!(map.resolve("A101", &RawValue::Empty), ResponseLabel::Missing);
    /// ```
    #[must_use]
    pub fn resolve(&self, var: &str, raw: &RawValue) -> ResponseLabel<'_> {
        let code = raw.code().unwrap_or_else(|| MISSING_SENTINEL.to_owned());
        self.meanings
            .get(var)
            .and_then(|responses| responses.get(&code))
            .map_or(ResponseLabel::Missing, |m| ResponseLabel::Meaning(m.as_str()))
    }

    /// Like [`Self::resolve`], but unmapped non-missing answers keep their code text.
    #[must_use]
    pub fn resolve_or_code(&self, var: &str, raw: &RawValue) -> String {
        match self.resolve(var, raw) {
            ResponseLabel::Meaning(meaning) => meaning.to_owned(),
            ResponseLabel::Missing => raw
                .code()
                .filter(|code| code != MISSING_SENTINEL)
                .unwrap_or_else(|| MISSING_LABEL.to_owned()),
        }
    }

    /// Number of variables with at least one meaning.
    #[must_use]
    pub fn len(&self) -> usize {
        self.meanings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.meanings.is_empty()
    }
}

/// Variable descriptors together with the value meanings.
#[derive(Debug, Clone, Default)]
pub struct Codebook {
    variables: Vec<VariableDescriptor>,
    by_code: HashMap<String, usize>,
    values: ValueMeaningMap,
}

impl Codebook {
    #[must_use]
    pub fn new(variables: Vec<VariableDescriptor>, values: ValueMeaningMap) -> Self {
        let mut by_code = HashMap::with_capacity(variables.len());
        for (i, var) in variables.iter().enumerate() {
            by_code.entry(var.code.clone()).or_insert(i);
        }
        Self {
            variables,
            by_code,
            values,
        }
    }

    /// Marks every sub-variable of the given families as a multi-select item.
    #[must_use]
    pub fn with_multi_select_families(mut self, prefixes: &[&str]) -> Self {
        for var in &mut self.variables {
            if var.family().is_some_and(|p| prefixes.contains(&p)) {
                var.var_type = VariableType::MultiSelectItem;
            }
        }
        self
    }

    /// Variables in codebook order.
    #[must_use]
    pub fn variables(&self) -> &[VariableDescriptor] {
        &self.variables
    }

    #[must_use]
    pub fn variable(&self, code: &str) -> Option<&VariableDescriptor> {
        self.by_code.get(code).map(|&i| &self.variables[i])
    }

    /// Label of `code`, if the codebook knows the variable.
    #[must_use]
    pub fn label(&self, code: &str) -> Option<&str> {
        self.variable(code).map(|v| v.label.as_str())
    }

    /// Sub-variables `{prefix}_NN` in codebook order.
    pub fn family<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a VariableDescriptor> + 'a {
        self.variables
            .iter()
            .filter(move |v| v.family() == Some(prefix))
    }

    #[must_use]
    pub fn values(&self) -> &ValueMeaningMap {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codebook() -> Codebook {
        let mut values = ValueMeaningMap::new();
        values.insert("A101", "1", "Ja");
        values.insert("A101", "2", "Nein");
        values.insert("A101", "-9", "nicht beantwortet");
        Codebook::new(
            vec![
                VariableDescriptor::new("A101", "Nutzung", VariableType::Dichotomous),
                VariableDescriptor::new("A302_01", "Wichtig: Schnelligkeit", VariableType::Dichotomous),
                VariableDescriptor::new("A302_02", "Wichtig: Genauigkeit", VariableType::Dichotomous),
                VariableDescriptor::new("A3021", "Unrelated", VariableType::Nominal),
            ],
            values,
        )
    }

    #[test]
    fn test_family_lookup() {
        let codebook = codebook();
        let codes = codebook.family("A302").map(|v| v.code.as_str()).collect::<Vec<_>>();
        assert_eq!(codes, ["A302_01", "A302_02"]);
        assert_eq!(codebook.family("A999").count(), 0);
    }

    #[test]
    fn test_family_prefix_shapes() {
        assert_eq!(family_prefix("A501_10"), Some("A501"));
        assert_eq!(family_prefix("A501_"), None);
        assert_eq!(family_prefix("A501_x"), None);
        assert_eq!(family_prefix("_01"), None);
    }

    #[test]
    fn test_multi_select_marking() {
        let codebook = codebook().with_multi_select_families(&["A302"]);
        assert!(codebook.variable("A302_01").unwrap().var_type.is_multi_select_item());
        assert!(codebook.variable("A101").unwrap().var_type.is_dichotomous());
    }

    #[test]
    fn test_resolve_is_total() {
        let codebook = codebook();
        let values = codebook.values();
        assert_eq!(values.resolve("A101", &RawValue::Text("2".to_owned())).as_str(), "Nein");
        // the sentinel has a meaning here, so empty cells resolve to it
        assert_eq!(values.resolve("A101", &RawValue::Empty).as_str(), "nicht beantwortet");
        assert_eq!(values.resolve("A999", &RawValue::Number(1.0)), ResponseLabel::Missing);
    }

    #[test]
    fn test_resolve_or_code() {
        let values = codebook().values().clone();
        assert_eq!(values.resolve_or_code("A601", &RawValue::Number(3.0)), "3");
        assert_eq!(values.resolve_or_code("A601", &RawValue::Empty), MISSING_LABEL);
        assert_eq!(values.resolve_or_code("A601", &RawValue::Number(-9.0)), MISSING_LABEL);
    }

    #[test]
    fn test_float_codes_match_integer_responses() {
        let mut values = ValueMeaningMap::new();
        values.insert("A401", "1.0", "Sehr zufrieden");
        assert_eq!(values.lookup("A401", "1"), Some("Sehr zufrieden"));
        assert_eq!(values.resolve("A401", &RawValue::Number(1.0)).as_str(), "Sehr zufrieden");
    }
}
