//! A small survey export written to a temporary directory.

use std::{
    fmt::Write as _,
    fs,
    path::PathBuf,
    sync::atomic::{AtomicUsize, Ordering},
};

use surveylens_analysis::catalog::{
    AGE, AGE_ORDER, FREQUENCY, FREQUENCY_ORDER, FULFILLED, GENDER, IMPORTANCE, MOST_IMPORTANT,
    SATISFACTION, SATISFACTION_ORDER, USER_FLAG,
};
use surveylens_data::labels::SHORT_LABELS;

use super::{InputArgs, Survey};

const FEATURE_GROUPS: [(&str, &str, &str); 3] = [
    (IMPORTANCE, "Wichtigkeit", "ORDINAL"),
    (MOST_IMPORTANT, "Am wichtigsten", "DICHOTOMOUS"),
    (FULFILLED, "Erfüllt", "DICHOTOMOUS"),
];

/// Variables table, Values table and a twelve-respondent dataset: eight
/// users answering every user question and four non-users.
pub(crate) struct SurveyDir {
    pub root: PathBuf,
}

impl SurveyDir {
    pub fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        let root = std::env::temp_dir().join(format!("surveylens-cli-{}-{n}", std::process::id()));
        let _ = fs::remove_dir_all(&root);
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("variables.tsv"), variables()).unwrap();
        fs::write(root.join("values.tsv"), values()).unwrap();
        fs::write(root.join("data.csv"), data()).unwrap();
        Self { root }
    }

    pub fn out_dir(&self) -> PathBuf {
        self.root.join("figures")
    }

    pub fn survey(&self) -> Survey {
        InputArgs {
            data: self.root.join("data.csv"),
            variables: self.root.join("variables.tsv"),
            values: self.root.join("values.tsv"),
            codebook_delimiter: b'\t',
            data_delimiter: b',',
            out_dir: self.out_dir(),
            summary: None,
        }
        .load()
        .unwrap()
    }
}

impl Drop for SurveyDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.root);
    }
}

fn item(prefix: &str, index: usize) -> String {
    format!("{prefix}_{index:02}")
}

fn variables() -> String {
    let mut text = "VAR\tLABEL\tTYPE\n".to_owned();
    for (code, label, var_type) in [
        (USER_FLAG, "Nutzung von Service-Chatbots", "DICHOTOMOUS"),
        (FREQUENCY, "Nutzungshäufigkeit", "ORDINAL"),
        (SATISFACTION, "Zufriedenheit insgesamt", "ORDINAL"),
        (AGE, "Alter", "NOMINAL"),
        (GENDER, "Geschlecht", "NOMINAL"),
    ] {
        writeln!(text, "{code}\t{label}\t{var_type}").unwrap();
    }
    for (prefix, group, var_type) in FEATURE_GROUPS {
        for (i, (long, _)) in SHORT_LABELS.iter().enumerate() {
            writeln!(text, "{}\t{group}: {long}\t{var_type}", item(prefix, i + 1)).unwrap();
        }
    }
    text
}

fn values() -> String {
    let mut text = "VAR\tRESPONSE\tMEANING\n".to_owned();
    let genders = ["männlich", "weiblich", "divers"];
    for (code, meanings) in [
        (USER_FLAG, &["Ja", "Nein"][..]),
        (FREQUENCY, &FREQUENCY_ORDER[..]),
        (SATISFACTION, &SATISFACTION_ORDER[..]),
        (AGE, &AGE_ORDER[..]),
        (GENDER, &genders[..]),
    ] {
        for (i, meaning) in meanings.iter().enumerate() {
            writeln!(text, "{code}\t{}\t{meaning}", i + 1).unwrap();
        }
    }
    text
}

fn data() -> String {
    let mut columns = vec![
        USER_FLAG.to_owned(),
        FREQUENCY.to_owned(),
        SATISFACTION.to_owned(),
        AGE.to_owned(),
        GENDER.to_owned(),
    ];
    for (prefix, _, _) in FEATURE_GROUPS {
        columns.extend((1..=8).map(|j| item(prefix, j)));
    }
    let width = columns.len();

    let mut rows = vec![columns.join(","), vec!["meta"; width].join(",")];
    for i in 0..8_usize {
        let mut row = vec![
            "1".to_owned(),
            (i % 5 + 1).to_string(),
            (i % 4 + 1).to_string(),
            (i % 3 + 1).to_string(),
            (i % 2 + 1).to_string(),
        ];
        row.extend((1..=8).map(|j| ((i + j) % 5 + 1).to_string()));
        row.extend((1..=8).map(|j| if (i * j) % 4 == 1 { "2" } else { "1" }.to_owned()));
        row.extend((1..=8).map(|j| if (i + 2 * j) % 3 == 0 { "2" } else { "1" }.to_owned()));
        rows.push(row.join(","));
    }
    for i in 0..4_usize {
        let mut row = vec![
            "2".to_owned(),
            String::new(),
            String::new(),
            (i % 5 + 1).to_string(),
            (i % 2 + 1).to_string(),
        ];
        row.resize(width, String::new());
        rows.push(row.join(","));
    }
    rows.join("\n") + "\n"
}
