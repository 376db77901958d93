//! Fixed question catalog of the chatbot quality survey.
//!
//! Variable codes, respondent populations, multi-select configurations and
//! the category orders used for charts. All of it is static data.

use surveylens_data::dataset::{Dataset, Subset};

use crate::aggregate::{Denominator, MultiSelectSpec};

/// Uses service chatbots (1 = yes, 2 = no).
pub const USER_FLAG: &str = "A101";
pub const USER_CODE: f64 = 1.0;
pub const NON_USER_CODE: f64 = 2.0;

/// Code of a ticked multi-select item.
pub const SELECTED_CODE: f64 = 2.0;

/// Usage frequency.
pub const FREQUENCY: &str = "A202";
/// Kinds of websites where chatbots were used (multi-select, users).
pub const WEBSITE_KINDS: &str = "A203";
/// Importance of each feature, 5-point scale (one item per feature).
pub const IMPORTANCE: &str = "A301";
/// Features rated most important (multi-select, users).
pub const MOST_IMPORTANT: &str = "A302";
/// Features currently fulfilled (multi-select, users).
pub const FULFILLED: &str = "A305";
/// Overall satisfaction.
pub const SATISFACTION: &str = "A401";
/// Would recommend.
pub const RECOMMENDATION: &str = "A402";
/// Reasons for not using chatbots (multi-select, non-users).
pub const NON_USE_REASONS: &str = "A501";
pub const AGE: &str = "A601";
pub const GENDER: &str = "A602";

/// Segmentation variables for the cross-tabulations and significance tests.
pub const SEGMENTS: [&str; 3] = [AGE, GENDER, FREQUENCY];

/// Multi-select question families.
pub const MULTI_SELECT_FAMILIES: [&str; 4] = [WEBSITE_KINDS, MOST_IMPORTANT, FULFILLED, NON_USE_REASONS];

/// Number of features rated in the importance and expectation questions.
pub const FEATURE_COUNT: usize = 8;

/// Short label of [`SATISFACTION`] in the correlation heatmap.
pub const SATISFACTION_LABEL: &str = "Zufriedenheit";

pub const FEATURE_ORDER: [&str; FEATURE_COUNT] = [
    "Geschwindigkeit",
    "Genauigkeit",
    "Problemlösung",
    "Menschlichkeit",
    "Bedienbarkeit",
    "Kontext",
    "Tonalität",
    "Datenschutz",
];

pub const NON_USE_REASONS_ORDER: [&str; 9] = [
    "Ich bevorzuge persönlichen Kontakt (z.B. Hotline, E-Mail)",
    "Ich finde Service-Chatbots zu kompliziert oder unpraktisch",
    "Ich traue Service-Chatbots nicht zu, mir wirklich helfen zu können",
    "Ich habe bisher keine Service-Chatbots auf Webseiten gesehen",
    "Datenschutzbedenken oder mangelndes Vertrauen",
    "Ich habe negative Erfahrungen selber gemacht",
    "Ich habe negative Erfahrungen von anderen gehört",
    "Ich wusste nicht, dass Service-Chatbots hilfreich sein können",
    "Andere",
];

pub const WEBSITE_KINDS_ORDER: [&str; 5] = [
    "Online-Shops / E-Commerce",
    "Kundenservice-Portale (Telekommunikation, Banken, Versicherungen)",
    "Buchungsseiten (Reisen, Hotels, Tickets)",
    "Webseiten von Behörden oder öffentlichen Einrichtungen",
    "Andere",
];

pub const FREQUENCY_ORDER: [&str; 5] = [
    "Mehrmals pro Woche",
    "Einmal pro Woche",
    "Einmal pro Monat",
    "Seltener als einmal im Monat",
    "Ich nutze sie nur, wenn ich keine Alternative finde",
];

pub const SATISFACTION_ORDER: [&str; 5] = [
    "Sehr zufrieden",
    "Zufrieden",
    "Neutral",
    "Unzufrieden",
    "Sehr unzufrieden",
];

pub const RECOMMENDATION_ORDER: [&str; 5] = [
    "Ja, definitiv",
    "Eher ja",
    "Weiß nicht",
    "Eher nein",
    "Nein, definitiv nicht",
];

pub const AGE_ORDER: [&str; 5] = [
    "18-25 Jahre",
    "26-35 Jahre",
    "36-45 Jahre",
    "46-55 Jahre",
    "Über 55 Jahre",
];

/// Respondents an analysis is computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Population {
    #[display("all respondents")]
    All,
    #[display("users")]
    Users,
    #[display("non-users")]
    NonUsers,
}

impl Population {
    /// Selects the respondents of this population.
    #[must_use]
    pub fn select(self, dataset: &Dataset) -> Subset<'_> {
        match self {
            Self::All => dataset.all(),
            Self::Users => dataset.subset(|r| r.answered(USER_FLAG, USER_CODE)),
            Self::NonUsers => dataset.subset(|r| r.answered(USER_FLAG, NON_USER_CODE)),
        }
    }

    /// Population of a single-choice question: demographics and the user
    /// flag itself cover everyone, the rest was only asked to users.
    #[must_use]
    pub fn for_question(code: &str) -> Self {
        if [USER_FLAG, AGE, GENDER].contains(&code) {
            Self::All
        } else {
            Self::Users
        }
    }
}

/// Item codes `{prefix}_01` to `{prefix}_08` of a per-feature question.
#[must_use]
pub fn feature_items(prefix: &str) -> Vec<String> {
    (1..=FEATURE_COUNT)
        .map(|i| format!("{prefix}_{i:02}"))
        .collect()
}

/// Fixed category order of a single-choice question, if it has one.
#[must_use]
pub fn category_order(code: &str) -> Option<&'static [&'static str]> {
    match code {
        FREQUENCY => Some(&FREQUENCY_ORDER),
        SATISFACTION => Some(&SATISFACTION_ORDER),
        RECOMMENDATION => Some(&RECOMMENDATION_ORDER),
        AGE => Some(&AGE_ORDER),
        _ => None,
    }
}

/// Descriptive configuration of every multi-select question.
#[must_use]
pub fn multi_select_specs() -> [MultiSelectSpec; 4] {
    [
        MultiSelectSpec {
            prefix: NON_USE_REASONS,
            population: Population::NonUsers,
            denominator: Denominator::Selections,
            merge_other: true,
            order: Some(&NON_USE_REASONS_ORDER),
            precision: 1,
        },
        MultiSelectSpec {
            prefix: WEBSITE_KINDS,
            population: Population::Users,
            denominator: Denominator::Selections,
            merge_other: true,
            order: Some(&WEBSITE_KINDS_ORDER),
            precision: 1,
        },
        MultiSelectSpec {
            prefix: MOST_IMPORTANT,
            population: Population::Users,
            denominator: Denominator::Selections,
            merge_other: false,
            order: None,
            precision: 2,
        },
        MultiSelectSpec {
            prefix: FULFILLED,
            population: Population::Users,
            denominator: Denominator::Selections,
            merge_other: false,
            order: None,
            precision: 2,
        },
    ]
}

#[cfg(test)]
mod tests {
    use surveylens_data::value::RawValue;

    use super::*;

    #[test]
    fn test_feature_items() {
        let items = feature_items(IMPORTANCE);
        assert_eq!(items.len(), 8);
        assert_eq!(items[0], "A301_01");
        assert_eq!(items[7], "A301_08");
    }

    #[test]
    fn test_population_for_question() {
        assert_eq!(Population::for_question(USER_FLAG), Population::All);
        assert_eq!(Population::for_question(GENDER), Population::All);
        assert_eq!(Population::for_question(SATISFACTION), Population::Users);
    }

    #[test]
    fn test_population_select() {
        let dataset = Dataset::new(
            vec![USER_FLAG.to_owned()],
            vec![
                vec![RawValue::Number(1.0)],
                vec![RawValue::Number(2.0)],
                vec![RawValue::Empty],
            ],
        );
        assert_eq!(Population::All.select(&dataset).len(), 3);
        assert_eq!(Population::Users.select(&dataset).len(), 1);
        assert_eq!(Population::NonUsers.select(&dataset).len(), 1);
    }

    #[test]
    fn test_merged_families_end_with_other() {
        for spec in multi_select_specs() {
            if let Some(order) = spec.order {
                assert!(spec.merge_other);
                assert_eq!(order.last(), Some(&surveylens_data::labels::OTHER_TOKEN));
            }
        }
    }
}
