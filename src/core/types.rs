use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Identifier naming a condition in the knowledge base
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Disease(pub String);

impl Disease {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Disease {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Disease {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Diseases consistent with the symptoms supplied so far.
///
/// Iteration is in disease-name order, which is also the order candidates
/// are presented to the user.
pub type CandidateSet = BTreeSet<Disease>;

/// Outcome of one prediction session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "disease", rename_all = "snake_case")]
pub enum Prediction {
    /// A single disease was selected
    Disease(Disease),
    /// No disease is consistent with the reported symptoms
    NoMatch,
}

impl Prediction {
    #[must_use]
    pub fn disease(&self) -> Option<&Disease> {
        match self {
            Self::Disease(d) => Some(d),
            Self::NoMatch => None,
        }
    }
}

impl std::fmt::Display for Prediction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Disease(d) => write!(f, "{d}"),
            Self::NoMatch => write!(f, "No matching disease found."),
        }
    }
}

/// Referral record from the doctor table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoctorContact {
    pub doctor_name: String,
    pub hospital: String,
    pub address: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prediction_display() {
        assert_eq!(Prediction::Disease(Disease::new("Flu")).to_string(), "Flu");
        assert_eq!(Prediction::NoMatch.to_string(), "No matching disease found.");
    }

    #[test]
    fn test_prediction_serializes_with_kind_tag() {
        let json = serde_json::to_string(&Prediction::Disease(Disease::new("Flu"))).unwrap();
        assert_eq!(json, r#"{"kind":"disease","disease":"Flu"}"#);

        let json = serde_json::to_string(&Prediction::NoMatch).unwrap();
        assert_eq!(json, r#"{"kind":"no_match"}"#);
    }

    #[test]
    fn test_candidate_set_orders_by_name() {
        let set: CandidateSet = ["Malaria", "Flu", "Dengue"]
            .into_iter()
            .map(Disease::from)
            .collect();
        let names: Vec<&str> = set.iter().map(Disease::as_str).collect();
        assert_eq!(names, vec!["Dengue", "Flu", "Malaria"]);
    }
}
