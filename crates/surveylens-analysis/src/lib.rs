//! Analyses of the chatbot quality survey.
//!
//! Each analysis takes the loaded [`Dataset`](surveylens_data::dataset::Dataset)
//! and [`Codebook`](surveylens_data::codebook::Codebook) and produces plain
//! result values. Nothing here writes files or logs; conditions such as an
//! empty population or an untestable segment are part of the returned values.
//!
//! # Modules
//!
//! - [`catalog`]: Question codes, populations, fixed category orders
//! - [`aggregate`]: Top-2-box, single-choice and multi-select tables
//! - [`descriptives`]: Per-question distributions and ordinal statistics
//! - [`correlation`]: Spearman correlations between answers
//! - [`comparison`]: Importance versus expectation per feature
//! - [`segment`]: Feature metrics broken down by respondent segment
//! - [`significance`]: Rank and chi-square tests across segments
//!
//! # Examples
//!
//! ```
//! use surveylens_analysis::aggregate::top2_box;
//! use surveylens_data::{dataset::Dataset, value::RawValue};
//!
//! let dataset = Dataset::new(
//!     vec!["A301_01".to_owned()],
//!     [1.0, 2.0, 4.0, 5.0]
//!         .into_iter()
//!         .map(|v| vec![RawValue::Number(v)])
//!         .collect(),
//! );
//! assert_eq!(top2_box(&dataset.all(), "A301_01"), 50.0);
//! ```

pub mod aggregate;
pub mod catalog;
pub mod comparison;
pub mod correlation;
pub mod descriptives;
pub mod segment;
pub mod significance;

#[cfg(test)]
mod fixtures;
