//! Parsers for the comma-separated data tables.
//!
//! This module provides parsers for:
//!
//! - **Disease table**: `disease,symptom1,symptom2,...` rows building the [`Corpus`]
//! - **Doctor table**: `disease,doctorName,hospital,address` referral records
//! - **List tables**: `disease,item1,item2,...` rows for precautions, tablets, and reasons
//!
//! ## Example
//!
//! ```rust
//! use symptom_solver::parsing::corpus::parse_disease_table;
//! use symptom_solver::Disease;
//!
//! let corpus = parse_disease_table("Flu,fever,cough\nFlu,fever,ache\n").unwrap();
//! assert_eq!(corpus.occurrences(&Disease::new("Flu")), 2);
//! ```
//!
//! ## Row Format
//!
//! | Rule | Behavior |
//! |------|----------|
//! | Delimiter | `,` with no quoting or escaping |
//! | Whitespace | Each field is trimmed |
//! | Blank lines | Skipped |
//! | Empty disease name | Kept; the row is keyed by `""` |
//! | Empty inner field | Kept as an empty string |
//! | Trailing `,` | Ends the row; no empty field follows it |
//!
//! [`Corpus`]: crate::core::Corpus

pub mod care;
pub mod corpus;
pub mod table;

pub use table::{ParseError, Row};
