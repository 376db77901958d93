use std::fmt;

/// A single raw cell of the respondent table.
///
/// Cells keep the shape they had in the source file. Numeric interpretation
/// happens on demand through [`RawValue::as_number`], mirroring a coercing
/// conversion where anything non-numeric becomes missing.
#[derive(Debug, Clone, PartialEq, derive_more::IsVariant)]
pub enum RawValue {
    /// No answer was recorded.
    Empty,
    /// A numeric cell.
    Number(f64),
    /// A textual cell.
    Text(String),
}

impl RawValue {
    /// Interprets a text field from a delimited file.
    ///
    /// Blank fields become [`RawValue::Empty`], fields that parse as a finite
    /// number become [`RawValue::Number`], everything else is kept as text.
    ///
    /// # Examples
    ///
    /// ```
    /// # use surveylens_data::value::RawValue;
    /// assert_eq!(RawValue::from_text(" 2 "), RawValue::Number(2.0));
    /// assert_eq!(RawValue::from_text(""), RawValue::Empty);
    /// assert_eq!(RawValue::from_text("n/a"), RawValue::Text("n/a".to_owned()));
    /// ```
    #[must_use]
    pub fn from_text(field: &str) -> Self {
        let trimmed = field.trim();
        if trimmed.is_empty() {
            return Self::Empty;
        }
        match parse_finite(trimmed) {
            Some(n) => Self::Number(n),
            None => Self::Text(field.to_owned()),
        }
    }

    /// Numeric value of the cell, or `None` if it is missing or non-numeric.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Empty => None,
            Self::Number(n) => n.is_finite().then_some(*n),
            Self::Text(text) => parse_finite(text.trim()),
        }
    }

    /// Textual response code used to look up value meanings.
    ///
    /// Integral numbers are rendered without a fractional part, so `1.0`
    /// yields `"1"`. Returns `None` for missing cells.
    ///
    /// # Examples
    ///
    /// ```
    /// # use surveylens_data::value::RawValue;
    /// assert_eq!(RawValue::Number(3.0).code().as_deref(), Some("3"));
    /// assert_eq!(RawValue::Number(2.5).code().as_deref(), Some("2.5"));
    /// assert_eq!(RawValue::Empty.code(), None);
    /// ```
    #[must_use]
    pub fn code(&self) -> Option<String> {
        match self {
            Self::Empty => None,
            Self::Number(n) => Some(number_code(*n)),
            Self::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_owned())
                }
            }
        }
    }

    /// Returns `true` if the cell carries no usable answer.
    #[must_use]
    pub fn is_missing(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Number(n) => n.is_nan(),
            Self::Text(text) => text.trim().is_empty(),
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Number(n) => f.write_str(&number_code(*n)),
            Self::Text(text) => f.write_str(text),
        }
    }
}

/// Normalizes a response code from the codebook so it matches [`RawValue::code`].
///
/// ```
/// # use surveylens_data::value::normalize_code;
/// assert_eq!(normalize_code("1.0"), "1");
/// assert_eq!(normalize_code(" -9"), "-9");
/// assert_eq!(normalize_code("yes"), "yes");
/// ```
#[must_use]
pub fn normalize_code(code: &str) -> String {
    RawValue::from_text(code)
        .code()
        .unwrap_or_else(|| code.trim().to_owned())
}

fn parse_finite(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|n| n.is_finite())
}

#[expect(clippy::cast_possible_truncation)]
fn number_code(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_coercion() {
        assert_eq!(RawValue::Number(4.0).as_number(), Some(4.0));
        assert_eq!(RawValue::Text("5".to_owned()).as_number(), Some(5.0));
        assert_eq!(RawValue::Text("five".to_owned()).as_number(), None);
        assert_eq!(RawValue::Text("NaN".to_owned()).as_number(), None);
        assert_eq!(RawValue::Empty.as_number(), None);
    }

    #[test]
    fn test_non_finite_text_stays_text() {
        assert!(RawValue::from_text("inf").is_text());
        assert!(RawValue::from_text("nan").is_text());
    }

    #[test]
    fn test_missing() {
        assert!(RawValue::Empty.is_missing());
        assert!(RawValue::Text("  ".to_owned()).is_missing());
        assert!(!RawValue::Number(0.0).is_missing());
    }

    #[test]
    fn test_display_matches_code() {
        assert_eq!(RawValue::Number(-9.0).to_string(), "-9");
        assert_eq!(RawValue::Text("x".to_owned()).to_string(), "x");
        assert_eq!(RawValue::Empty.to_string(), "");
    }
}
