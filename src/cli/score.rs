//! Score command - rank every disease with both scorers at once.
//!
//! This command never prompts. It shows the candidate set, the full
//! likelihood ranking, the neighbor ranking, and whether the two picks
//! agree. Useful for understanding why a session entered refinement.

use clap::Args;

use crate::cli::{DataArgs, EngineArgs, OutputFormat};
use crate::core::types::{CandidateSet, Disease};
use crate::matching::engine::PredictionEngine;
use crate::matching::likelihood::LikelihoodScorer;
use crate::matching::neighbor::NeighborVoter;
use crate::utils::validation::parse_symptom_list;

/// Arguments for the score command
#[derive(Args)]
pub struct ScoreArgs {
    /// Comma-separated symptoms
    #[arg(short, long, required = true)]
    pub symptoms: String,

    /// Number of ranked diseases to show per scorer
    #[arg(short = 'n', long, default_value = "10")]
    pub max_rows: usize,

    #[command(flatten)]
    pub data: DataArgs,

    #[command(flatten)]
    pub engine: EngineArgs,
}

/// Execute score subcommand
///
/// # Errors
///
/// Returns an error if the knowledge base cannot be loaded or output fails.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: ScoreArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let kb = args.data.load(verbose)?;
    let config = args.engine.config();
    let symptoms = parse_symptom_list(&args.symptoms);

    let engine = PredictionEngine::with_config(&kb.corpus, config.clone());
    let candidates = engine.candidates(&symptoms, None);
    let verdict = engine.verdict(&symptoms, &candidates);

    let within = config.scoring_scope.restrict(&candidates);
    let likelihood = LikelihoodScorer.rank(&kb.corpus, &symptoms, within);
    let voter = NeighborVoter::new(config.neighbors);
    let neighbors = voter.rank(&kb.corpus, &symptoms, within);

    match format {
        OutputFormat::Text => {
            print_candidates(&candidates);

            println!("\nLikelihood ranking (log score):");
            for (i, (disease, score)) in likelihood.iter().take(args.max_rows).enumerate() {
                println!("   #{:<2} {:<24} {:>10.4}", i + 1, disease.as_str(), score);
            }

            println!(
                "\nNeighbor ranking (symptom matches, top {} vote):",
                voter.k()
            );
            for (i, (matches, disease)) in neighbors.iter().take(args.max_rows).enumerate() {
                let marker = if i < voter.k() { "*" } else { " " };
                println!("  {marker}#{:<2} {:<24} {:>3}", i + 1, disease.as_str(), matches);
            }

            let show = |d: &Option<Disease>| {
                d.as_ref().map_or_else(|| "Unknown".to_string(), ToString::to_string)
            };
            println!("\nLikelihood pick: {}", show(&verdict.likelihood));
            println!("Neighbor pick:   {}", show(&verdict.neighbors));
            match verdict.agreed() {
                Some(d) => println!("Scorers agree on {d}."),
                None => println!("Scorers disagree; a prediction session would ask for more symptoms."),
            }
        }
        OutputFormat::Json => {
            let json = serde_json::json!({
                "symptoms": symptoms,
                "candidates": candidates,
                "scope": config.scoring_scope,
                "likelihood": likelihood
                    .iter()
                    .take(args.max_rows)
                    .map(|(d, s)| serde_json::json!({ "disease": d, "score": s }))
                    .collect::<Vec<_>>(),
                "neighbors": neighbors
                    .iter()
                    .take(args.max_rows)
                    .map(|(m, d)| serde_json::json!({ "disease": d, "matches": m }))
                    .collect::<Vec<_>>(),
                "verdict": verdict,
                "agreed": verdict.agreed(),
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Tsv => {
            println!("scorer\trank\tdisease\tvalue");
            for (i, (disease, score)) in likelihood.iter().take(args.max_rows).enumerate() {
                println!("likelihood\t{}\t{}\t{:.6}", i + 1, disease, score);
            }
            for (i, (matches, disease)) in neighbors.iter().take(args.max_rows).enumerate() {
                println!("neighbors\t{}\t{}\t{}", i + 1, disease, matches);
            }
        }
    }

    Ok(())
}

fn print_candidates(candidates: &CandidateSet) {
    if candidates.is_empty() {
        println!("Candidates: none (no disease has every symptom)");
        return;
    }
    let names: Vec<&str> = candidates.iter().map(|d| d.as_str()).collect();
    println!("Candidates ({}): {}", names.len(), names.join(", "));
}
