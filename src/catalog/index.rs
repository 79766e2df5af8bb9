use tracing::debug;

use crate::core::corpus::{contains_all, Corpus};
use crate::core::types::CandidateSet;

/// Finds the diseases whose symptom set covers every reported symptom
pub struct CandidateFilter<'a> {
    corpus: &'a Corpus,
}

impl<'a> CandidateFilter<'a> {
    pub fn new(corpus: &'a Corpus) -> Self {
        Self { corpus }
    }

    /// Diseases whose symptom set is a superset of `symptoms`.
    ///
    /// With `within`, only those diseases are tested; otherwise the whole
    /// corpus is. An empty symptom list matches every disease that has a
    /// symptom set.
    #[must_use]
    pub fn filter(&self, symptoms: &[String], within: Option<&CandidateSet>) -> CandidateSet {
        let candidates: CandidateSet = match within {
            Some(restrict) => restrict
                .iter()
                .filter(|d| {
                    self.corpus
                        .symptoms(d)
                        .is_some_and(|set| contains_all(set, symptoms))
                })
                .cloned()
                .collect(),
            None => self
                .corpus
                .iter()
                .filter(|(_, set)| contains_all(set, symptoms))
                .map(|(d, _)| d.clone())
                .collect(),
        };

        debug!(
            symptoms = symptoms.len(),
            candidates = candidates.len(),
            "Filtered candidates"
        );
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Disease;

    fn symptoms(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    fn make_corpus() -> Corpus {
        Corpus::from_rows([
            ("Flu", vec!["fever", "cough"]),
            ("Malaria", vec!["fever", "chills"]),
            ("Cold", vec!["cough", "sneeze"]),
            ("Ghost", vec![]),
        ])
    }

    #[test]
    fn test_empty_query_matches_all_with_symptom_set() {
        let corpus = make_corpus();
        let candidates = CandidateFilter::new(&corpus).filter(&[], None);
        let expected: CandidateSet = corpus.diseases().cloned().collect();
        assert_eq!(candidates, expected);
        assert!(!candidates.contains(&Disease::new("Ghost")));
    }

    #[test]
    fn test_superset_match() {
        let corpus = make_corpus();
        let filter = CandidateFilter::new(&corpus);

        let fever = filter.filter(&symptoms(&["fever"]), None);
        assert_eq!(fever.len(), 2);
        assert!(fever.contains(&Disease::new("Flu")));
        assert!(fever.contains(&Disease::new("Malaria")));

        let both = filter.filter(&symptoms(&["chills", "fever"]), None);
        assert_eq!(both.len(), 1);
        assert!(both.contains(&Disease::new("Malaria")));
    }

    #[test]
    fn test_unknown_symptom_matches_nothing() {
        let corpus = make_corpus();
        let candidates = CandidateFilter::new(&corpus).filter(&symptoms(&["rash"]), None);
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_restricted_filter_only_tests_given_diseases() {
        let corpus = make_corpus();
        let filter = CandidateFilter::new(&corpus);
        let within: CandidateSet = [Disease::new("Flu")].into_iter().collect();

        let candidates = filter.filter(&symptoms(&["cough"]), Some(&within));
        assert_eq!(candidates, within);
    }

    #[test]
    fn test_filter_is_monotonic() {
        let corpus = make_corpus();
        let filter = CandidateFilter::new(&corpus);

        let mut query = Vec::new();
        let mut previous = filter.filter(&query, None);
        for extra in ["fever", "chills", "cough"] {
            query.push(extra.to_string());
            let next = filter.filter(&query, None);
            assert!(next.is_subset(&previous));
            previous = next;
        }
        assert!(previous.is_empty());
    }
}
