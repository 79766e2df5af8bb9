//! Core data types for symptom-based disease identification.
//!
//! This module provides the fundamental types used throughout the library:
//!
//! - [`Disease`]: The identifier naming a condition, used as the key for every table
//! - [`Corpus`]: Disease to symptom-set associations with occurrence counts
//! - [`CandidateSet`]: Diseases consistent with the symptoms reported so far
//! - [`Prediction`]: Either a resolved disease or an explicit "no match"
//! - [`DoctorContact`]: A referral record from the doctor table
//!
//! ## Symptom Matching
//!
//! Symptoms are plain strings compared by **exact equality**. There is no
//! case folding, stemming, or synonym handling; the data tables and the
//! user's input must use the same spelling.

pub mod corpus;
pub mod types;

pub use corpus::{Corpus, SymptomSet};
pub use types::{CandidateSet, Disease, DoctorContact, Prediction};
