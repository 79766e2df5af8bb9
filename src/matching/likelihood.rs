//! Frequency-weighted log-likelihood scoring.
//!
//! Each disease starts from its prior, `ln(occurrences / total_rows)`. Every
//! reported symptom present in the disease's symptom set adds
//! `ln(1 / (|set| + 1))`. Symptoms absent from the set add nothing. This is a
//! pseudo-likelihood, not a calibrated Naive Bayes posterior.

use tracing::debug;

use crate::core::corpus::{has_symptom, Corpus};
use crate::core::types::{CandidateSet, Disease};
use crate::matching::scoring::{count_to_f64, scoped_entries, Scorer};

/// Log-score of one disease for a symptom list
#[must_use]
pub fn log_score(corpus: &Corpus, disease: &Disease, set: &[String], symptoms: &[String]) -> f64 {
    let prior = (count_to_f64(corpus.occurrences(disease)) / count_to_f64(corpus.total_rows())).ln();
    let evidence = (1.0 / (count_to_f64(set.len()) + 1.0)).ln();

    symptoms
        .iter()
        .filter(|s| has_symptom(set, s))
        .fold(prior, |score, _| score + evidence)
}

/// Ranks diseases by prior plus per-symptom evidence
#[derive(Debug, Clone, Copy, Default)]
pub struct LikelihoodScorer;

impl LikelihoodScorer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Scores for every ranked disease, highest first.
    ///
    /// Equal scores keep disease-name order.
    #[must_use]
    pub fn rank(
        &self,
        corpus: &Corpus,
        symptoms: &[String],
        within: Option<&CandidateSet>,
    ) -> Vec<(Disease, f64)> {
        let mut scores: Vec<(Disease, f64)> = scoped_entries(corpus, within)
            .map(|(d, set)| (d.clone(), log_score(corpus, d, set, symptoms)))
            .collect();

        // Stable sort keeps name order for ties
        scores.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scores
    }
}

impl Scorer for LikelihoodScorer {
    fn name(&self) -> &'static str {
        "likelihood"
    }

    /// The first disease, in name order, with the strictly greatest score
    fn best(
        &self,
        corpus: &Corpus,
        symptoms: &[String],
        within: Option<&CandidateSet>,
    ) -> Option<Disease> {
        let mut best: Option<(&Disease, f64)> = None;

        for (disease, set) in scoped_entries(corpus, within) {
            let score = log_score(corpus, disease, set, symptoms);
            debug!(disease = %disease, score, "Likelihood score");
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((disease, score));
            }
        }

        best.map(|(d, _)| d.clone())
    }
}
