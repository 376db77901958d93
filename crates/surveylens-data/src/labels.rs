//! Label normalization for display.
//!
//! Long codebook labels of grouped items look like
//! `"Wie wichtig sind Ihnen ...: Genauigkeit der Antworten"`. For charts and
//! tables only the part after the group prefix is kept, and the eight
//! feature labels shared by the importance and expectation questions are
//! replaced by curated short names.

/// Separator between a group prefix and the item label.
pub const GROUP_SEPARATOR: &str = ": ";

/// Token marking the catch-all option of a multi-select question.
pub const OTHER_TOKEN: &str = "Andere";

/// Curated long-form to short-form feature names.
pub const SHORT_LABELS: [(&str, &str); 8] = [
    ("Schnelligkeit der Antworten", "Geschwindigkeit"),
    ("Genauigkeit der Antworten", "Genauigkeit"),
    ("Fähigkeit, Probleme effektiv zu lösen", "Problemlösung"),
    ("Natürliche, menschliche Interaktion", "Menschlichkeit"),
    ("Einfache Bedienung (Auswahloptionen)", "Bedienbarkeit"),
    ("Kontextverständnis (Chatverlauf wird genutzt)", "Kontext"),
    ("Freundlichkeit / Tonalität der Antwort", "Tonalität"),
    ("Datenschutz & Vertrauenswürdigkeit", "Datenschutz"),
];

/// Strips the group prefix, keeping everything after the first `": "`.
///
/// ```
/// # use surveylens_data::labels::normalize_label;
/// assert_eq!(normalize_label("Group: Feature"), "Feature");
/// assert_eq!(normalize_label("Feature"), "Feature");
/// ```
#[must_use]
pub fn normalize_label(label: &str) -> &str {
    label
        .split_once(GROUP_SEPARATOR)
        .map_or(label, |(_, item)| item)
}

/// Replaces one of the eight curated feature labels by its short form.
#[must_use]
pub fn short_label(label: &str) -> &str {
    SHORT_LABELS
        .iter()
        .find(|(long, _)| *long == label)
        .map_or(label, |(_, short)| short)
}

/// [`normalize_label`] followed by [`short_label`].
///
/// ```
/// # use surveylens_data::labels::display_label;
/// assert_eq!(display_label("Wichtigkeit: Genauigkeit der Antworten"), "Genauigkeit");
/// assert_eq!(display_label("Alter"), "Alter");
/// ```
#[must_use]
pub fn display_label(label: &str) -> &str {
    short_label(normalize_label(label))
}

/// Returns `true` if the label names the catch-all option.
#[must_use]
pub fn is_other(label: &str) -> bool {
    label.contains(OTHER_TOKEN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_splits_on_first_separator() {
        assert_eq!(normalize_label("A: B: C"), "B: C");
        assert_eq!(normalize_label("no separator:here"), "no separator:here");
        assert_eq!(normalize_label(""), "");
        assert_eq!(normalize_label(": tail"), "tail");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for label in ["Group: Feature", "Feature", "Wichtigkeit: Kontext", ""] {
            let once = normalize_label(label);
            assert_eq!(normalize_label(once), once);
        }
    }

    #[test]
    fn test_short_labels() {
        for (long, short) in SHORT_LABELS {
            assert_eq!(short_label(long), short);
            assert_eq!(display_label(&format!("Prefix: {long}")), short);
        }
        assert_eq!(short_label("Geschwindigkeit"), "Geschwindigkeit");
        assert_eq!(short_label("schnelligkeit der antworten"), "schnelligkeit der antworten");
    }

    #[test]
    fn test_other_detection() {
        assert!(is_other("Andere"));
        assert!(is_other("Andere: bitte angeben"));
        assert!(!is_other("Online-Shops / E-Commerce"));
    }
}
