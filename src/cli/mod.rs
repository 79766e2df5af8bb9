//! Command-line interface for symptom-solver.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **predict**: Predict a disease from symptoms, interactively or scripted
//! - **score**: Show both scorers' rankings for a symptom list
//! - **lookup**: Show precautions, tablets, reasons, and doctor info for a disease
//! - **catalog**: List or export the loaded knowledge base
//!
//! ## Usage
//!
//! ```text
//! # Interactive session using the embedded dataset
//! symptom-solver predict
//!
//! # Scripted session; "--refine no" declines a follow-up question
//! symptom-solver predict --symptoms fever --refine chills
//!
//! # JSON output for scripting
//! symptom-solver predict --symptoms fever,chills --format json
//!
//! # Use your own tables
//! symptom-solver predict --data-dir ./data
//!
//! # Inspect the scorers
//! symptom-solver score --symptoms fever,headache
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::catalog::store::{DataSources, KnowledgeBase};
use crate::matching::engine::PredictionConfig;
use crate::matching::neighbor::DEFAULT_NEIGHBORS;
use crate::matching::scoring::ScoringScope;

pub mod catalog;
pub mod lookup;
pub mod predict;
pub mod score;

#[derive(Parser)]
#[command(name = "symptom-solver")]
#[command(version)]
#[command(about = "Predict a likely disease from reported symptoms")]
#[command(
    long_about = "symptom-solver predicts a likely disease from a list of reported symptoms.\n\nIt filters a disease table down to the conditions consistent with every symptom, compares a frequency-weighted likelihood score with a nearest-neighbor vote, and asks for more symptoms when the two disagree. The predicted disease is then used to look up precautions, tablets, possible reasons, and a doctor referral.\n\nThe bundled dataset is a demonstration sample, not medical advice."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Predict a disease from reported symptoms
    Predict(predict::PredictArgs),

    /// Rank all diseases with both scorers without prompting
    Score(score::ScoreArgs),

    /// Show care information for a disease
    Lookup(lookup::LookupArgs),

    /// Inspect the knowledge base
    Catalog(catalog::CatalogArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Where to read the data tables from
#[derive(clap::Args, Debug, Default)]
pub struct DataArgs {
    /// Directory holding disease_data.csv, doctors_data.csv,
    /// precautions_data.csv, tablets_data.csv and reasons_data.csv
    /// (embedded sample dataset when omitted)
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Disease table (overrides --data-dir)
    #[arg(long)]
    pub disease_table: Option<PathBuf>,

    /// Doctor table (overrides --data-dir)
    #[arg(long)]
    pub doctor_table: Option<PathBuf>,

    /// Precautions table (overrides --data-dir)
    #[arg(long)]
    pub precautions_table: Option<PathBuf>,

    /// Tablets table (overrides --data-dir)
    #[arg(long)]
    pub tablets_table: Option<PathBuf>,

    /// Reasons table (overrides --data-dir)
    #[arg(long)]
    pub reasons_table: Option<PathBuf>,
}

impl DataArgs {
    fn uses_files(&self) -> bool {
        self.data_dir.is_some()
            || self.disease_table.is_some()
            || self.doctor_table.is_some()
            || self.precautions_table.is_some()
            || self.tablets_table.is_some()
            || self.reasons_table.is_some()
    }

    /// File locations, or `None` for the embedded dataset
    #[must_use]
    pub fn sources(&self) -> Option<DataSources> {
        if !self.uses_files() {
            return None;
        }

        let dir = self.data_dir.clone().unwrap_or_else(|| PathBuf::from("."));
        let mut sources = DataSources::from_dir(&dir);
        let overrides = [
            (&self.disease_table, &mut sources.diseases),
            (&self.doctor_table, &mut sources.doctors),
            (&self.precautions_table, &mut sources.precautions),
            (&self.tablets_table, &mut sources.tablets),
            (&self.reasons_table, &mut sources.reasons),
        ];
        for (path, slot) in overrides {
            if let Some(path) = path {
                slot.clone_from(path);
            }
        }
        Some(sources)
    }

    /// Load the knowledge base these arguments describe
    ///
    /// # Errors
    ///
    /// Returns an error only if the embedded dataset fails to parse.
    pub fn load(&self, verbose: bool) -> anyhow::Result<KnowledgeBase> {
        let kb = match self.sources() {
            Some(sources) => KnowledgeBase::load_from_sources(&sources),
            None => KnowledgeBase::load_embedded()?,
        };

        if verbose {
            eprintln!(
                "Loaded {} diseases from {} rows",
                kb.corpus.len(),
                kb.corpus.total_rows()
            );
        }
        for kind in kb.unavailable() {
            eprintln!("Warning: {kind} table not available.");
        }

        Ok(kb)
    }
}

/// Prediction engine settings
#[derive(clap::Args, Debug)]
pub struct EngineArgs {
    /// Number of top-overlap diseases allowed to vote
    #[arg(short = 'k', long, default_value_t = DEFAULT_NEIGHBORS)]
    pub neighbors: usize,

    /// Which diseases the scorers rank: the whole corpus or only the
    /// current candidates
    #[arg(long, value_enum, default_value = "full")]
    pub scope: ScoringScope,

    /// Stop after this many declined follow-up questions and take the
    /// likelihood pick (asks indefinitely when omitted)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_declines: Option<u32>,
}

impl EngineArgs {
    #[must_use]
    pub fn config(&self) -> PredictionConfig {
        PredictionConfig {
            neighbors: self.neighbors,
            scoring_scope: self.scope,
            max_declines: self.max_declines,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::store::TableKind;
    use std::path::Path;

    #[test]
    fn test_no_paths_means_embedded() {
        assert!(DataArgs::default().sources().is_none());
    }

    #[test]
    fn test_override_replaces_one_table() {
        let args = DataArgs {
            data_dir: Some(PathBuf::from("/data")),
            tablets_table: Some(PathBuf::from("/other/pills.csv")),
            ..DataArgs::default()
        };
        let sources = args.sources().unwrap();
        assert_eq!(sources.path(TableKind::Diseases), Path::new("/data/disease_data.csv"));
        assert_eq!(sources.path(TableKind::Tablets), Path::new("/other/pills.csv"));
    }

    #[test]
    fn test_cli_parses_predict() {
        let cli = Cli::try_parse_from([
            "symptom-solver",
            "predict",
            "--symptoms",
            "fever",
            "--refine",
            "chills",
            "--refine",
            "no",
            "--scope",
            "candidates",
            "-k",
            "5",
        ])
        .unwrap();
        match cli.command {
            Commands::Predict(args) => {
                assert_eq!(args.symptoms.as_deref(), Some("fever"));
                assert_eq!(args.refine, vec!["chills", "no"]);
                let config = args.engine.config();
                assert_eq!(config.neighbors, 5);
                assert_eq!(config.scoring_scope, ScoringScope::Candidates);
            }
            _ => panic!("expected predict"),
        }
    }

    #[test]
    fn test_max_declines_must_be_positive() {
        let parse = |value: &str| {
            Cli::try_parse_from([
                "symptom-solver",
                "predict",
                "--symptoms",
                "fever",
                "--max-declines",
                value,
            ])
        };
        assert!(parse("0").is_err());

        let cli = parse("2").unwrap();
        let Commands::Predict(args) = cli.command else {
            panic!("expected predict");
        };
        assert_eq!(args.engine.config().max_declines, Some(2));
    }
}
