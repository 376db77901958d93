//! Synthetic survey data for unit tests.

use surveylens_data::{
    codebook::{Codebook, ValueMeaningMap, VariableDescriptor, VariableType},
    dataset::Dataset,
    labels::SHORT_LABELS,
    value::RawValue,
};

use crate::catalog::{
    AGE, AGE_ORDER, FREQUENCY, FREQUENCY_ORDER, FULFILLED, GENDER, IMPORTANCE, MOST_IMPORTANT,
    NON_USE_REASONS, NON_USE_REASONS_ORDER, RECOMMENDATION, RECOMMENDATION_ORDER, SATISFACTION,
    SATISFACTION_ORDER, USER_FLAG, WEBSITE_KINDS, WEBSITE_KINDS_ORDER,
};

pub(crate) const GENDERS: [&str; 3] = ["männlich", "weiblich", "divers"];

/// Builds a dataset from optional numbers; `None` becomes an empty cell.
pub(crate) fn dataset(columns: &[&str], rows: &[&[Option<f64>]]) -> Dataset {
    Dataset::new(
        columns.iter().map(|c| (*c).to_owned()).collect(),
        rows.iter()
            .map(|row| {
                row.iter()
                    .map(|v| v.map_or(RawValue::Empty, RawValue::Number))
                    .collect()
            })
            .collect(),
    )
}

fn item(prefix: &str, index: usize) -> String {
    format!("{prefix}_{index:02}")
}

/// Codebook covering every variable of [`survey`].
pub(crate) fn codebook() -> Codebook {
    let mut variables = vec![];
    let mut values = ValueMeaningMap::new();

    let mut single = |code: &str, label: &str, var_type: VariableType, meanings: &[&str]| {
        variables.push(VariableDescriptor::new(code, label, var_type));
        for (i, meaning) in meanings.iter().enumerate() {
            values.insert(code, &(i + 1).to_string(), *meaning);
        }
    };
    single(USER_FLAG, "Nutzung von Service-Chatbots", VariableType::Dichotomous, &["Ja", "Nein"]);
    single(FREQUENCY, "Nutzungshäufigkeit", VariableType::Ordinal, &FREQUENCY_ORDER);
    single(SATISFACTION, "Zufriedenheit insgesamt", VariableType::Ordinal, &SATISFACTION_ORDER);
    single(RECOMMENDATION, "Weiterempfehlung", VariableType::Ordinal, &RECOMMENDATION_ORDER);
    single(AGE, "Alter", VariableType::Nominal, &AGE_ORDER);
    single(GENDER, "Geschlecht", VariableType::Nominal, &GENDERS);

    for (i, kind) in WEBSITE_KINDS_ORDER.iter().enumerate() {
        variables.push(VariableDescriptor::new(
            item(WEBSITE_KINDS, i + 1),
            format!("Webseiten: {kind}"),
            VariableType::Dichotomous,
        ));
    }
    for (prefix, group, var_type) in [
        (IMPORTANCE, "Wichtigkeit", VariableType::Ordinal),
        (MOST_IMPORTANT, "Am wichtigsten", VariableType::Dichotomous),
        (FULFILLED, "Erfüllt", VariableType::Dichotomous),
    ] {
        for (i, (long, _)) in SHORT_LABELS.iter().enumerate() {
            variables.push(VariableDescriptor::new(
                item(prefix, i + 1),
                format!("{group}: {long}"),
                var_type.clone(),
            ));
        }
    }
    let reasons = NON_USE_REASONS_ORDER
        .iter()
        .filter(|r| **r != "Andere")
        .map(|r| (*r).to_owned())
        .chain(["Andere".to_owned(), "Andere Gründe (Freitext)".to_owned()]);
    for (i, reason) in reasons.enumerate() {
        variables.push(VariableDescriptor::new(
            item(NON_USE_REASONS, i + 1),
            format!("Gründe: {reason}"),
            VariableType::Dichotomous,
        ));
    }

    Codebook::new(variables, values)
}

/// Twelve respondents: eight users answering the user block, four
/// non-users answering the non-use reasons.
#[expect(clippy::cast_precision_loss)]
pub(crate) fn survey() -> Dataset {
    let mut columns = vec![
        USER_FLAG.to_owned(),
        FREQUENCY.to_owned(),
        SATISFACTION.to_owned(),
        RECOMMENDATION.to_owned(),
        AGE.to_owned(),
        GENDER.to_owned(),
    ];
    columns.extend((1..=5).map(|j| item(WEBSITE_KINDS, j)));
    for prefix in [IMPORTANCE, MOST_IMPORTANT, FULFILLED] {
        columns.extend((1..=8).map(|j| item(prefix, j)));
    }
    columns.extend((1..=10).map(|j| item(NON_USE_REASONS, j)));

    let code = |v: usize| RawValue::Number(v as f64);
    let tick = |selected: bool| RawValue::Number(if selected { 2.0 } else { 1.0 });

    let mut rows = vec![];
    for i in 0..8 {
        let mut row = vec![
            code(1),
            code(i % 5 + 1),
            code(i % 4 + 1),
            code(i % 5 + 1),
            code(i % 3 + 1),
            code(i % 2 + 1),
        ];
        row.extend((1..=5).map(|j| tick((i + j) % 3 == 0)));
        row.extend((1..=8).map(|j| code((i + j) % 5 + 1)));
        row.extend((1..=8).map(|j| tick((i * j) % 4 == 1)));
        row.extend((1..=8).map(|j| tick((i + 2 * j) % 3 == 0)));
        row.extend((1..=10).map(|_| RawValue::Empty));
        rows.push(row);
    }
    for i in 0..4 {
        let mut row = vec![
            code(2),
            RawValue::Empty,
            RawValue::Empty,
            RawValue::Empty,
            code(i % 5 + 1),
            code(i % 2 + 1),
        ];
        row.extend((0..5 + 3 * 8).map(|_| RawValue::Empty));
        row.extend((1..=8).map(|j| tick((i + j) % 2 == 0)));
        row.push(tick(i == 0));
        row.push(tick(i == 1));
        rows.push(row);
    }
    Dataset::new(columns, rows)
}

/// Ten respondents: six users with a satisfaction rating, four non-users.
pub(crate) fn scenario() -> Dataset {
    dataset(
        &[USER_FLAG, SATISFACTION],
        &[
            &[Some(1.0), Some(1.0)],
            &[Some(1.0), Some(2.0)],
            &[Some(1.0), Some(2.0)],
            &[Some(1.0), Some(3.0)],
            &[Some(1.0), Some(5.0)],
            &[Some(1.0), Some(2.0)],
            &[Some(2.0), None],
            &[Some(2.0), None],
            &[Some(2.0), None],
            &[Some(2.0), None],
        ],
    )
}
