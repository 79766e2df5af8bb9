use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::types::Disease;

/// Symptom identifiers recorded for one disease, in source order.
///
/// Duplicates from the source rows are kept: the scorers work on raw sizes
/// and membership, not on distinct symptoms.
pub type SymptomSet = Vec<String>;

/// Disease to symptom associations plus the row counts used as priors
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Corpus {
    /// Disease -> accumulated symptoms. Only diseases with at least one
    /// symptom entry appear here.
    symptoms: BTreeMap<Disease, SymptomSet>,

    /// Disease -> number of source rows naming it
    occurrences: BTreeMap<Disease, usize>,

    /// Sum of all occurrence counts
    total_rows: usize,
}

impl Corpus {
    /// Create an empty corpus
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a corpus from `(disease, symptoms)` rows
    pub fn from_rows<'a, I, S>(rows: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, S)>,
        S: IntoIterator<Item = &'a str>,
    {
        let mut corpus = Self::new();
        for (disease, symptoms) in rows {
            corpus.add_row(Disease::new(disease), symptoms.into_iter().map(str::to_string));
        }
        corpus
    }

    /// Record one source row.
    ///
    /// The row always counts toward the disease's occurrence count and the
    /// total, even when it carries no symptoms.
    pub fn add_row(&mut self, disease: Disease, symptoms: impl IntoIterator<Item = String>) {
        let mut symptoms = symptoms.into_iter().peekable();
        if symptoms.peek().is_some() {
            self.symptoms
                .entry(disease.clone())
                .or_default()
                .extend(symptoms);
        }
        *self.occurrences.entry(disease).or_default() += 1;
        self.total_rows += 1;
    }

    /// Symptom set for a disease, if it has one
    #[must_use]
    pub fn symptoms(&self, disease: &Disease) -> Option<&[String]> {
        self.symptoms.get(disease).map(Vec::as_slice)
    }

    /// Number of source rows for a disease (0 if unknown)
    #[must_use]
    pub fn occurrences(&self, disease: &Disease) -> usize {
        self.occurrences.get(disease).copied().unwrap_or(0)
    }

    /// Total number of source rows across all diseases
    #[must_use]
    pub fn total_rows(&self) -> usize {
        self.total_rows
    }

    /// Iterate diseases with a symptom set, in disease-name order
    pub fn iter(&self) -> impl Iterator<Item = (&Disease, &[String])> {
        self.symptoms.iter().map(|(d, s)| (d, s.as_slice()))
    }

    /// Diseases with a symptom set, in disease-name order
    pub fn diseases(&self) -> impl Iterator<Item = &Disease> {
        self.symptoms.keys()
    }

    /// Number of diseases with a symptom set
    #[must_use]
    pub fn len(&self) -> usize {
        self.symptoms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symptoms.is_empty()
    }
}

/// Exact-string membership test against a symptom set
#[must_use]
pub fn has_symptom(set: &[String], symptom: &str) -> bool {
    set.iter().any(|s| s == symptom)
}

/// True if `set` contains every symptom in `query`
#[must_use]
pub fn contains_all(set: &[String], query: &[String]) -> bool {
    query.iter().all(|s| has_symptom(set, s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_rows_accumulate() {
        let corpus = Corpus::from_rows([
            ("Flu", vec!["fever", "cough"]),
            ("Flu", vec!["fever", "ache"]),
            ("Cold", vec!["sneeze"]),
        ]);

        let flu = Disease::new("Flu");
        assert_eq!(
            corpus.symptoms(&flu).unwrap(),
            &["fever", "cough", "fever", "ache"]
        );
        assert_eq!(corpus.occurrences(&flu), 2);
        assert_eq!(corpus.total_rows(), 3);
        assert_eq!(corpus.len(), 2);
    }

    #[test]
    fn test_row_without_symptoms_counts_but_has_no_set() {
        let corpus = Corpus::from_rows([("Ghost", vec![]), ("Flu", vec!["fever"])]);

        let ghost = Disease::new("Ghost");
        assert!(corpus.symptoms(&ghost).is_none());
        assert_eq!(corpus.occurrences(&ghost), 1);
        assert_eq!(corpus.total_rows(), 2);
        assert_eq!(corpus.diseases().collect::<Vec<_>>(), vec![&Disease::new("Flu")]);
    }

    #[test]
    fn test_total_is_sum_of_occurrences() {
        let corpus = Corpus::from_rows([
            ("A", vec!["x"]),
            ("B", vec!["y"]),
            ("A", vec!["z"]),
            ("C", vec![]),
        ]);
        let sum: usize = ["A", "B", "C"]
            .iter()
            .map(|d| corpus.occurrences(&Disease::new(*d)))
            .sum();
        assert_eq!(sum, corpus.total_rows());
    }

    #[test]
    fn test_contains_all() {
        let set: Vec<String> = vec!["fever".into(), "cough".into()];
        assert!(contains_all(&set, &[]));
        assert!(contains_all(&set, &["cough".into(), "fever".into()]));
        assert!(!contains_all(&set, &["fever".into(), "chills".into()]));
        assert!(!contains_all(&set, &["Fever".into()]));
    }
}
