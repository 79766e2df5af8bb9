use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::catalog::index::CandidateFilter;
use crate::core::corpus::Corpus;
use crate::core::types::{CandidateSet, Disease, Prediction};
use crate::matching::clarify::Clarifier;
use crate::matching::likelihood::LikelihoodScorer;
use crate::matching::neighbor::{NeighborVoter, DEFAULT_NEIGHBORS};
use crate::matching::refinement::{PredictionError, PredictionReport, Resolution, Session};
use crate::matching::scoring::{Scorer, ScoringScope};

/// Configuration for the prediction engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionConfig {
    /// Number of top-overlap diseases allowed to vote
    pub neighbors: usize,
    /// Which diseases the scorers rank when reconciling
    pub scoring_scope: ScoringScope,
    /// Declines (with scorers still disagreeing) allowed before the session
    /// settles on the likelihood pick. `None` keeps asking.
    ///
    /// The limit is checked after each decline, so the first decline is
    /// always offered and `Some(0)` behaves like `Some(1)`.
    pub max_declines: Option<u32>,
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            neighbors: DEFAULT_NEIGHBORS,
            scoring_scope: ScoringScope::default(),
            max_declines: None,
        }
    }
}

/// The two scorers' picks for one reconciliation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub likelihood: Option<Disease>,
    pub neighbors: Option<Disease>,
}

impl Verdict {
    /// The shared pick, if both scorers produced the same disease
    #[must_use]
    pub fn agreed(&self) -> Option<&Disease> {
        match (&self.likelihood, &self.neighbors) {
            (Some(a), Some(b)) if a == b => Some(a),
            _ => None,
        }
    }
}

/// The main prediction engine
pub struct PredictionEngine<'a> {
    corpus: &'a Corpus,
    /// Configuration including neighbor count and scoring scope
    config: PredictionConfig,
    likelihood: Box<dyn Scorer + 'a>,
    neighbors: Box<dyn Scorer + 'a>,
}

impl<'a> PredictionEngine<'a> {
    /// Create a new engine with default configuration
    pub fn new(corpus: &'a Corpus) -> Self {
        Self::with_config(corpus, PredictionConfig::default())
    }

    /// Create a new engine with custom configuration
    pub fn with_config(corpus: &'a Corpus, config: PredictionConfig) -> Self {
        let voter = NeighborVoter::new(config.neighbors);
        Self::with_scorers(corpus, config, Box::new(LikelihoodScorer), Box::new(voter))
    }

    /// Create an engine with caller-supplied scorers
    pub fn with_scorers(
        corpus: &'a Corpus,
        config: PredictionConfig,
        likelihood: Box<dyn Scorer + 'a>,
        neighbors: Box<dyn Scorer + 'a>,
    ) -> Self {
        Self {
            corpus,
            config,
            likelihood,
            neighbors,
        }
    }

    #[must_use]
    pub fn config(&self) -> &PredictionConfig {
        &self.config
    }

    #[must_use]
    pub fn corpus(&self) -> &Corpus {
        self.corpus
    }

    /// Diseases consistent with `symptoms`, optionally within a prior round's set
    #[must_use]
    pub fn candidates(&self, symptoms: &[String], within: Option<&CandidateSet>) -> CandidateSet {
        CandidateFilter::new(self.corpus).filter(symptoms, within)
    }

    /// Run a full prediction session for the reported symptoms
    ///
    /// # Errors
    ///
    /// Returns `PredictionError` if the clarifier fails or runs out of
    /// answers while the candidates are still ambiguous.
    pub fn predict<C: Clarifier + ?Sized>(
        &self,
        symptoms: Vec<String>,
        clarifier: &mut C,
    ) -> Result<PredictionReport, PredictionError> {
        let candidates = self.candidates(&symptoms, None);
        self.reconcile(symptoms, candidates, clarifier)
    }

    /// Settle on one disease for an already-filtered candidate set.
    ///
    /// Empty candidates give `NoMatch` and a single candidate is returned
    /// without scoring. Otherwise the scorers are compared, and if they
    /// disagree the session enters refinement.
    ///
    /// # Errors
    ///
    /// Returns `PredictionError` if refinement needs an answer the clarifier
    /// cannot provide.
    pub fn reconcile<C: Clarifier + ?Sized>(
        &self,
        symptoms: Vec<String>,
        candidates: CandidateSet,
        clarifier: &mut C,
    ) -> Result<PredictionReport, PredictionError> {
        let mut session = Session::new(symptoms, candidates);

        match session.candidates.len() {
            0 => {
                info!("No disease matches the reported symptoms");
                return Ok(session.finish(Prediction::NoMatch, Resolution::NoCandidate));
            }
            1 => {
                if let Some(disease) = session.candidates.first().cloned() {
                    info!(disease = %disease, "Single candidate");
                    return Ok(
                        session.finish(Prediction::Disease(disease), Resolution::SingleCandidate)
                    );
                }
            }
            _ => {}
        }

        let verdict = self.verdict(&session.symptoms, &session.candidates);
        if let Some(disease) = verdict.agreed().cloned() {
            info!(disease = %disease, "Scorers agree");
            session.verdict = Some(verdict);
            return Ok(session.finish(Prediction::Disease(disease), Resolution::ScorerAgreement));
        }
        session.verdict = Some(verdict);

        self.refine(session, clarifier)
    }

    /// Both scorers' picks for the current symptoms, ranked over the scope
    /// chosen by `scoring_scope`
    #[must_use]
    pub fn verdict(&self, symptoms: &[String], candidates: &CandidateSet) -> Verdict {
        let within = self.config.scoring_scope.restrict(candidates);
        let verdict = Verdict {
            likelihood: self.likelihood.best(self.corpus, symptoms, within),
            neighbors: self.neighbors.best(self.corpus, symptoms, within),
        };
        debug!(
            likelihood = ?verdict.likelihood,
            neighbors = ?verdict.neighbors,
            scorer_a = self.likelihood.name(),
            scorer_b = self.neighbors.name(),
            "Scorer verdict"
        );
        verdict
    }
}
