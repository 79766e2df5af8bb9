//! Disease prediction engine and scoring strategies.
//!
//! This module provides the core decision logic:
//!
//! - [`PredictionEngine`]: Main entry point; filters, reconciles, and refines
//! - [`LikelihoodScorer`]: Frequency prior plus per-symptom evidence
//! - [`NeighborVoter`]: Majority vote among the top-k overlapping diseases
//! - [`Clarifier`]: Source of follow-up answers when results are ambiguous
//!
//! ## Prediction Algorithm
//!
//! 1. **Candidate filtering**: Keep diseases whose symptom set contains every
//!    reported symptom
//! 2. **Short circuit**: No candidates gives "no match"; one candidate is the answer
//! 3. **Reconciliation**: Run both scorers; if they agree, that is the answer
//! 4. **Refinement**: Otherwise ask for more symptoms and re-filter the
//!    candidates, falling back to reconciliation when the user declines
//!
//! ## Tie Breaks
//!
//! - **Likelihood**: The first disease in name order with the top score
//! - **Neighbor ranking**: Overlap count descending, then disease name descending
//! - **Neighbor tally**: The first disease in name order with the most votes
//!
//! ## Example
//!
//! ```rust
//! use symptom_solver::{Corpus, Disease, PredictionEngine, Prediction};
//! use symptom_solver::matching::clarify::{Clarification, ScriptedClarifier};
//!
//! let corpus = Corpus::from_rows([
//!     ("Flu", vec!["fever", "cough"]),
//!     ("Malaria", vec!["fever", "chills"]),
//!     ("Malaria", vec!["fever", "chills"]),
//! ]);
//! let engine = PredictionEngine::new(&corpus);
//!
//! let mut answers = ScriptedClarifier::new([
//!     Clarification::MoreSymptoms(vec!["chills".to_string()]),
//! ]);
//! let report = engine.predict(vec!["fever".to_string()], &mut answers).unwrap();
//! assert_eq!(report.prediction, Prediction::Disease(Disease::new("Malaria")));
//! ```

pub mod clarify;
pub mod engine;
pub mod likelihood;
pub mod neighbor;
pub mod refinement;
pub mod scoring;

pub use clarify::{Clarification, Clarifier};
pub use engine::{PredictionConfig, PredictionEngine, Verdict};
pub use likelihood::LikelihoodScorer;
pub use neighbor::NeighborVoter;
pub use refinement::{PredictionError, PredictionReport, Resolution};
pub use scoring::{Scorer, ScoringScope};
