use serde::{Deserialize, Serialize};

use crate::core::corpus::Corpus;
use crate::core::types::{CandidateSet, Disease};

/// Safely convert usize to f64 for probability calculations
///
/// Counts in a symptom corpus are far below the range where f64 loses
/// integer precision.
#[inline]
pub(crate) fn count_to_f64(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

/// Which diseases the scorers rank during reconciliation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ScoringScope {
    /// Rank every disease in the corpus, ignoring the candidate filter
    #[default]
    #[value(name = "full")]
    FullCorpus,
    /// Rank only the diseases in the active candidate set
    Candidates,
}

impl ScoringScope {
    /// The restriction to hand to a scorer for the given candidates
    #[must_use]
    pub fn restrict<'c>(self, candidates: &'c CandidateSet) -> Option<&'c CandidateSet> {
        match self {
            Self::FullCorpus => None,
            Self::Candidates => Some(candidates),
        }
    }
}

/// A strategy that picks one disease for a symptom list
pub trait Scorer {
    /// Short name used in logs and reports
    fn name(&self) -> &'static str;

    /// Best-scoring disease, or `None` when there is nothing to rank.
    ///
    /// With `within`, only those diseases are ranked.
    fn best(
        &self,
        corpus: &Corpus,
        symptoms: &[String],
        within: Option<&CandidateSet>,
    ) -> Option<Disease>;
}

/// Corpus entries in disease-name order, optionally limited to `within`
pub(crate) fn scoped_entries<'c>(
    corpus: &'c Corpus,
    within: Option<&'c CandidateSet>,
) -> impl Iterator<Item = (&'c Disease, &'c [String])> {
    corpus
        .iter()
        .filter(move |(d, _)| within.map_or(true, |w| w.contains(*d)))
}
