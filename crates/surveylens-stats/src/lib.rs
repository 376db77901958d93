//! Statistical routines for survey analysis.
//!
//! This crate provides the numeric building blocks used by the survey
//! analyses, independent of any dataset representation:
//!
//! - **Descriptive statistics**: count, mean, median and sample standard deviation
//! - **Ranking**: average ranks with tie bookkeeping
//! - **Rank tests**: Mann-Whitney U and Kruskal-Wallis H with effect sizes
//! - **Contingency tables**: Pearson chi-square test of independence and Cramér's V
//! - **Correlation**: Pearson and Spearman coefficients, Spearman matrices
//!
//! # Modules
//!
//! - [`descriptive`]: Descriptive statistics for summarizing samples
//! - [`rank`]: Average ranks and tie correction terms
//! - [`rank_tests`]: Two-sample and k-sample rank tests
//! - [`contingency`]: Chi-square test and Cramér's V
//! - [`correlation`]: Correlation coefficients and matrices
//! - [`distribution`]: Tail probabilities of the normal and chi-square distributions
//! - [`round`]: Presentation rounding
//!
//! # Examples
//!
//! ## Comparing two groups
//!
//! ```
//! use surveylens_stats::rank_tests::MannWhitneyU;
//!
//! let test = MannWhitneyU::new(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]).unwrap();
//! assert!(test.p_value < 0.05);
//! ```
//!
//! ## Measuring association in a contingency table
//!
//! ```
//! use surveylens_stats::contingency::ContingencyTable;
//!
//! let table = ContingencyTable::new(vec![vec![25, 25], vec![25, 25]]);
//! let test = table.chi_square().unwrap();
//! assert!(test.cramers_v.abs() < 1e-12);
//! ```
//!
//! ## Computing descriptive statistics
//!
//! ```
//! use surveylens_stats::descriptive::DescriptiveStats;
//!
//! let stats = DescriptiveStats::new([1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
//! assert_eq!(stats.mean, 3.0);
//! ```

pub mod contingency;
pub mod correlation;
pub mod descriptive;
pub mod distribution;
pub mod rank;
pub mod round;
