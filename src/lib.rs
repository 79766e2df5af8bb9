//! # symptom-solver
//!
//! A library for predicting a likely disease from a list of reported symptoms.
//!
//! Given a small labeled table of disease to symptom associations, the engine
//! keeps the diseases whose symptom set covers everything the user reported,
//! then compares two independent scorers. When they agree the answer is
//! immediate; when they disagree the engine asks for more symptoms and
//! narrows the candidates until one remains.
//!
//! ## Features
//!
//! - **Superset filtering**: Only diseases with every reported symptom stay in play
//! - **Likelihood scoring**: Frequency prior plus per-symptom evidence in log space
//! - **Neighbor voting**: Majority vote among the top-k diseases by symptom overlap
//! - **Refinement**: Follow-up questions through a pluggable [`matching::Clarifier`]
//! - **Care lookups**: Precautions, tablets, reasons, and doctor referrals per disease
//!
//! ## Example
//!
//! ```rust
//! use symptom_solver::{KnowledgeBase, PredictionEngine, Prediction};
//! use symptom_solver::matching::clarify::ScriptedClarifier;
//!
//! // Load the embedded sample dataset
//! let kb = KnowledgeBase::load_embedded().unwrap();
//! let engine = PredictionEngine::new(&kb.corpus);
//!
//! // "fever" and "chills" together only match one disease, so no
//! // follow-up questions are needed
//! let symptoms = vec!["fever".to_string(), "chills".to_string()];
//! let report = engine.predict(symptoms, &mut ScriptedClarifier::default()).unwrap();
//!
//! if let Prediction::Disease(disease) = &report.prediction {
//!     println!("{disease}: {:?}", kb.lookup_precautions(disease));
//! }
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: Knowledge base storage and candidate filtering
//! - [`core`]: Core data types for diseases, symptom sets, and predictions
//! - [`matching`]: Prediction engine, scorers, and refinement
//! - [`parsing`]: Parsers for the comma-separated data tables
//! - [`cli`]: Command-line interface implementation

pub mod catalog;
pub mod cli;
pub mod core;
pub mod matching;
pub mod parsing;
pub mod utils;

// Re-export commonly used types for convenience
pub use catalog::store::KnowledgeBase;
pub use crate::core::corpus::Corpus;
pub use crate::core::types::*;
pub use matching::engine::{PredictionConfig, PredictionEngine};
pub use matching::refinement::{PredictionReport, Resolution};
