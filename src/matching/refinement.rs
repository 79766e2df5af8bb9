//! Interactive narrowing of an ambiguous candidate set.
//!
//! The loop runs as an explicit state machine over a [`Session`] rather than
//! through recursion, so any number of rounds uses constant stack:
//!
//! | State | Meaning | Next |
//! |-------|---------|------|
//! | `Seeking` | Two or more candidates; ask for more symptoms | any |
//! | `Resolved` | Exactly one candidate left | done |
//! | `Exhausted` | No candidates left | done (`NoMatch`) |
//! | `Fallback` | User declined; compare the scorers again | done if they agree, else `Seeking` |
//!
//! A disagreeing fallback re-enters `Seeking` with the same candidates, so a
//! user who keeps declining is asked again each time. Every such cycle
//! issues a fresh prompt. `PredictionConfig::max_declines` bounds it.

use serde::{Deserialize, Serialize};
use std::io;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::core::types::{CandidateSet, Disease, Prediction};
use crate::matching::clarify::{Clarification, Clarifier};
use crate::matching::engine::{PredictionEngine, Verdict};

#[derive(Error, Debug)]
pub enum PredictionError {
    #[error("Failed to read clarification: {0}")]
    Input(#[source] io::Error),

    #[error("Input ended while {candidates} candidate diseases were still possible")]
    InputClosed { candidates: usize },
}

/// How a session reached its prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    /// No disease matched the initial symptoms
    NoCandidate,
    /// The initial symptoms matched exactly one disease
    SingleCandidate,
    /// Both scorers picked the same disease
    ScorerAgreement,
    /// Additional symptoms narrowed the candidates to one
    Refined,
    /// Additional symptoms ruled out every candidate
    Exhausted,
    /// The decline limit was reached with the scorers still disagreeing;
    /// the likelihood pick was taken
    DeclineLimit,
}

/// Final state of a prediction session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionReport {
    pub prediction: Prediction,
    pub resolution: Resolution,
    /// Every symptom considered, including those added during refinement
    pub symptoms: Vec<String>,
    /// Candidates when the session ended
    pub candidates: CandidateSet,
    /// Number of clarification prompts issued
    pub rounds: usize,
    /// Number of prompts the user declined
    pub declines: u32,
    /// Most recent scorer comparison, if one was made
    pub verdict: Option<Verdict>,
}

/// Transient state owned by one prediction session
#[derive(Debug, Clone)]
pub struct Session {
    /// Append-only within the session
    pub symptoms: Vec<String>,
    /// Shrinks or stays equal as symptoms are added
    pub candidates: CandidateSet,
    pub rounds: usize,
    pub declines: u32,
    pub verdict: Option<Verdict>,
}

impl Session {
    #[must_use]
    pub fn new(symptoms: Vec<String>, candidates: CandidateSet) -> Self {
        Self {
            symptoms,
            candidates,
            rounds: 0,
            declines: 0,
            verdict: None,
        }
    }

    #[must_use]
    pub fn finish(self, prediction: Prediction, resolution: Resolution) -> PredictionReport {
        PredictionReport {
            prediction,
            resolution,
            symptoms: self.symptoms,
            candidates: self.candidates,
            rounds: self.rounds,
            declines: self.declines,
            verdict: self.verdict,
        }
    }
}

enum RefinementState {
    Seeking,
    Resolved(Disease),
    Exhausted,
    Fallback,
}

impl PredictionEngine<'_> {
    /// Narrow `session.candidates` with the clarifier until they resolve,
    /// run out, or the scorers agree after a decline
    pub(crate) fn refine<C: Clarifier + ?Sized>(
        &self,
        mut session: Session,
        clarifier: &mut C,
    ) -> Result<PredictionReport, PredictionError> {
        loop {
            match self.step(&mut session, clarifier)? {
                RefinementState::Seeking => {}
                RefinementState::Resolved(disease) => {
                    info!(disease = %disease, rounds = session.rounds, "Refined to one candidate");
                    return Ok(session.finish(Prediction::Disease(disease), Resolution::Refined));
                }
                RefinementState::Exhausted => {
                    info!(rounds = session.rounds, "Refinement ruled out every candidate");
                    return Ok(session.finish(Prediction::NoMatch, Resolution::Exhausted));
                }
                RefinementState::Fallback => {
                    let verdict = self.verdict(&session.symptoms, &session.candidates);
                    if let Some(disease) = verdict.agreed().cloned() {
                        info!(disease = %disease, "Scorers agree after decline");
                        session.verdict = Some(verdict);
                        return Ok(session
                            .finish(Prediction::Disease(disease), Resolution::ScorerAgreement));
                    }

                    if self
                        .config()
                        .max_declines
                        .is_some_and(|limit| session.declines >= limit)
                    {
                        warn!(
                            declines = session.declines,
                            "Decline limit reached with scorers disagreeing; taking likelihood pick"
                        );
                        let prediction = verdict
                            .likelihood
                            .clone()
                            .map_or(Prediction::NoMatch, Prediction::Disease);
                        session.verdict = Some(verdict);
                        return Ok(session.finish(prediction, Resolution::DeclineLimit));
                    }

                    debug!("Scorers still disagree; asking again");
                    session.verdict = Some(verdict);
                }
            }
        }
    }

    fn step<C: Clarifier + ?Sized>(
        &self,
        session: &mut Session,
        clarifier: &mut C,
    ) -> Result<RefinementState, PredictionError> {
        if session.candidates.is_empty() {
            return Ok(RefinementState::Exhausted);
        }
        if session.candidates.len() == 1 {
            if let Some(disease) = session.candidates.first() {
                return Ok(RefinementState::Resolved(disease.clone()));
            }
        }

        session.rounds += 1;
        let answer = clarifier.clarify(&session.candidates).map_err(|e| {
            if e.kind() == io::ErrorKind::UnexpectedEof {
                PredictionError::InputClosed {
                    candidates: session.candidates.len(),
                }
            } else {
                PredictionError::Input(e)
            }
        })?;

        match answer {
            Clarification::MoreSymptoms(extra) => {
                debug!(added = extra.len(), round = session.rounds, "More symptoms supplied");
                session.symptoms.extend(extra);
                // Re-test every current candidate against the full extended list
                session.candidates = self.candidates(&session.symptoms, Some(&session.candidates));
                Ok(RefinementState::Seeking)
            }
            Clarification::Decline => {
                session.declines += 1;
                Ok(RefinementState::Fallback)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::corpus::Corpus;
    use crate::matching::clarify::ScriptedClarifier;
    use crate::matching::engine::PredictionConfig;
    use crate::matching::scoring::Scorer;

    struct Pick(&'static str);

    impl Scorer for Pick {
        fn name(&self) -> &'static str {
            "pick"
        }

        fn best(&self, _: &Corpus, _: &[String], _: Option<&CandidateSet>) -> Option<Disease> {
            Some(Disease::new(self.0))
        }
    }

    fn symptoms(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    fn more(list: &[&str]) -> Clarification {
        Clarification::MoreSymptoms(symptoms(list))
    }

    fn make_corpus() -> Corpus {
        Corpus::from_rows([
            ("A", vec!["shared", "only_a"]),
            ("B", vec!["shared", "only_b"]),
            ("C", vec!["shared", "only_a", "only_c"]),
        ])
    }

    fn disagreeing(corpus: &Corpus, config: PredictionConfig) -> PredictionEngine<'_> {
        PredictionEngine::with_scorers(corpus, config, Box::new(Pick("A")), Box::new(Pick("B")))
    }

    #[test]
    fn test_symptom_unique_to_one_candidate_resolves() {
        let corpus = make_corpus();
        let engine = disagreeing(&corpus, PredictionConfig::default());
        let mut clarifier = ScriptedClarifier::new([more(&["only_b"])]);

        let report = engine.predict(symptoms(&["shared"]), &mut clarifier).unwrap();
        assert_eq!(report.prediction, Prediction::Disease(Disease::new("B")));
        assert_eq!(report.resolution, Resolution::Refined);
        assert_eq!(report.rounds, 1);
        assert_eq!(report.symptoms, symptoms(&["shared", "only_b"]));
    }

    #[test]
    fn test_multiple_rounds_shrink_candidates() {
        let corpus = make_corpus();
        let engine = disagreeing(&corpus, PredictionConfig::default());
        let mut clarifier = ScriptedClarifier::new([more(&["only_a"]), more(&["only_c"])]);

        let report = engine.predict(symptoms(&["shared"]), &mut clarifier).unwrap();
        assert_eq!(report.prediction, Prediction::Disease(Disease::new("C")));
        assert_eq!(report.rounds, 2);

        let prompts = clarifier.prompts();
        assert_eq!(prompts[0].len(), 3);
        assert_eq!(prompts[1].len(), 2);
        assert!(prompts[1].is_subset(&prompts[0]));
    }

    #[test]
    fn test_unmatched_symptom_exhausts() {
        let corpus = make_corpus();
        let engine = disagreeing(&corpus, PredictionConfig::default());
        let mut clarifier = ScriptedClarifier::new([more(&["rash"])]);

        let report = engine.predict(symptoms(&["shared"]), &mut clarifier).unwrap();
        assert_eq!(report.prediction, Prediction::NoMatch);
        assert_eq!(report.resolution, Resolution::Exhausted);
        assert!(report.candidates.is_empty());
    }

    #[test]
    fn test_decline_reprompts_while_scorers_disagree() {
        let corpus = make_corpus();
        let engine = disagreeing(&corpus, PredictionConfig::default());
        let mut clarifier = ScriptedClarifier::new([
            Clarification::Decline,
            Clarification::Decline,
            more(&["only_b"]),
        ]);

        let report = engine.predict(symptoms(&["shared"]), &mut clarifier).unwrap();
        assert_eq!(report.prediction, Prediction::Disease(Disease::new("B")));
        assert_eq!(report.declines, 2);
        assert_eq!(report.rounds, 3);

        // The same candidates are offered after each decline
        let prompts = clarifier.prompts();
        assert_eq!(prompts[0], prompts[1]);
        assert_eq!(prompts[1], prompts[2]);
    }

    #[test]
    fn test_decline_limit_takes_likelihood_pick() {
        let corpus = make_corpus();
        let config = PredictionConfig {
            max_declines: Some(1),
            ..PredictionConfig::default()
        };
        let engine = disagreeing(&corpus, config);
        let mut clarifier = ScriptedClarifier::new([Clarification::Decline]);

        let report = engine.predict(symptoms(&["shared"]), &mut clarifier).unwrap();
        assert_eq!(report.prediction, Prediction::Disease(Disease::new("A")));
        assert_eq!(report.resolution, Resolution::DeclineLimit);
        assert_eq!(clarifier.remaining(), 0);
    }

    #[test]
    fn test_zero_decline_limit_still_offers_one_decline() {
        let corpus = make_corpus();
        let config = PredictionConfig {
            max_declines: Some(0),
            ..PredictionConfig::default()
        };
        let engine = disagreeing(&corpus, config);
        let mut clarifier = ScriptedClarifier::new([Clarification::Decline]);

        let report = engine.predict(symptoms(&["shared"]), &mut clarifier).unwrap();
        assert_eq!(report.resolution, Resolution::DeclineLimit);
        assert_eq!(report.declines, 1);
        assert_eq!(clarifier.prompts().len(), 1);
    }

    #[test]
    fn test_clarifier_running_out_is_an_error() {
        let corpus = make_corpus();
        let engine = disagreeing(&corpus, PredictionConfig::default());
        let mut clarifier = ScriptedClarifier::default();

        let err = engine.predict(symptoms(&["shared"]), &mut clarifier).unwrap_err();
        assert!(matches!(err, PredictionError::InputClosed { candidates: 3 }));
    }

    #[test]
    fn test_empty_answer_keeps_candidates() {
        let corpus = make_corpus();
        let engine = disagreeing(&corpus, PredictionConfig::default());
        let mut clarifier = ScriptedClarifier::new([more(&[]), more(&["only_b"])]);

        let report = engine.predict(symptoms(&["shared"]), &mut clarifier).unwrap();
        assert_eq!(report.prediction, Prediction::Disease(Disease::new("B")));
        assert_eq!(clarifier.prompts()[0], clarifier.prompts()[1]);
    }
}
