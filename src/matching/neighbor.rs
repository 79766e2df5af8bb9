//! Majority vote among the top-k diseases by raw symptom overlap.

use std::collections::BTreeMap;
use tracing::debug;

use crate::core::corpus::{has_symptom, Corpus};
use crate::core::types::{CandidateSet, Disease};
use crate::matching::scoring::{scoped_entries, Scorer};

/// Default number of neighbors allowed to vote
pub const DEFAULT_NEIGHBORS: usize = 3;

/// Number of reported symptoms found in a symptom set.
///
/// Each reported symptom is tested once, so a symptom reported twice counts twice.
#[must_use]
pub fn match_count(set: &[String], symptoms: &[String]) -> usize {
    symptoms.iter().filter(|s| has_symptom(set, s)).count()
}

/// Lets the `k` best-overlapping diseases vote
#[derive(Debug, Clone, Copy)]
pub struct NeighborVoter {
    k: usize,
}

impl Default for NeighborVoter {
    fn default() -> Self {
        Self::new(DEFAULT_NEIGHBORS)
    }
}

impl NeighborVoter {
    #[must_use]
    pub fn new(k: usize) -> Self {
        Self { k }
    }

    #[must_use]
    pub fn k(&self) -> usize {
        self.k
    }

    /// `(match_count, disease)` pairs sorted by count descending, then by
    /// disease name descending.
    #[must_use]
    pub fn rank(
        &self,
        corpus: &Corpus,
        symptoms: &[String],
        within: Option<&CandidateSet>,
    ) -> Vec<(usize, Disease)> {
        let mut ranked: Vec<(usize, Disease)> = scoped_entries(corpus, within)
            .map(|(d, set)| (match_count(set, symptoms), d.clone()))
            .collect();

        ranked.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| b.1.cmp(&a.1)));
        ranked
    }
}

impl Scorer for NeighborVoter {
    fn name(&self) -> &'static str {
        "neighbors"
    }

    /// Winner of the tally over the first `min(k, n)` ranked diseases.
    ///
    /// The tally is read in disease-name order and the first entry with the
    /// strictly highest vote count wins.
    fn best(
        &self,
        corpus: &Corpus,
        symptoms: &[String],
        within: Option<&CandidateSet>,
    ) -> Option<Disease> {
        let ranked = self.rank(corpus, symptoms, within);

        let mut votes: BTreeMap<&Disease, usize> = BTreeMap::new();
        for (count, disease) in ranked.iter().take(self.k) {
            debug!(disease = %disease, matches = count, "Neighbor vote");
            *votes.entry(disease).or_default() += 1;
        }

        let mut best: Option<(&Disease, usize)> = None;
        for (disease, count) in votes {
            if best.map_or(true, |(_, top)| count > top) {
                best = Some((disease, count));
            }
        }

        best.map(|(d, _)| d.clone())
    }
}
