//! Survey data model and loaders.
//!
//! - [`value`]: Raw cell values and numeric coercion
//! - [`dataset`]: The respondent table and borrowed subsets of it
//! - [`codebook`]: Variable descriptors and the value meaning map
//! - [`labels`]: Display-label normalization
//! - [`loader`]: Reading the dataset and codebook tables from disk
//!
//! # Examples
//!
//! ```
//! use surveylens_data::{dataset::Dataset, value::RawValue};
//!
//! let dataset = Dataset::new(
//!     vec!["A101".to_owned()],
//!     vec![vec![RawValue::Number(1.0)], vec![RawValue::Number(2.0)]],
//! );
//! let users = dataset.subset(|r| r.answered("A101", 1.0));
//! assert_eq!(users.len(), 1);
//! ```

pub mod codebook;
pub mod dataset;
pub mod labels;
pub mod loader;
pub mod value;
