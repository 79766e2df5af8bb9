use std::io::{BufRead, Write};

use clap::Args;

use crate::catalog::store::KnowledgeBase;
use crate::cli::lookup::{care_json, print_care_text, print_doctor_text, CareSections};
use crate::cli::{DataArgs, EngineArgs, OutputFormat};
use crate::core::types::Prediction;
use crate::matching::clarify::{Clarification, ConsoleClarifier, ScriptedClarifier};
use crate::matching::engine::PredictionEngine;
use crate::matching::refinement::{PredictionReport, Resolution};
use crate::utils::validation::parse_symptom_list;

#[derive(Args)]
pub struct PredictArgs {
    /// Comma-separated symptoms. When omitted, the session is interactive.
    #[arg(short, long)]
    pub symptoms: Option<String>,

    /// Scripted answer to a follow-up question: a comma-separated symptom
    /// list, or "no" to decline. Repeat for later rounds.
    #[arg(long = "refine", value_name = "SYMPTOMS|no", requires = "symptoms")]
    pub refine: Vec<String>,

    /// Include the doctor referral (skips the question in interactive mode)
    #[arg(long)]
    pub doctor: bool,

    /// Include possible reasons (skips the question in interactive mode)
    #[arg(long)]
    pub reasons: bool,

    #[command(flatten)]
    pub data: DataArgs,

    #[command(flatten)]
    pub engine: EngineArgs,
}

/// Execute predict subcommand
///
/// # Errors
///
/// Returns an error if the knowledge base cannot be loaded, input ends
/// while a question is pending, or output fails.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: PredictArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let kb = args.data.load(verbose)?;

    if kb.corpus.is_empty() {
        eprintln!("Warning: Disease table is empty, no diseases to match against.");
    }

    let engine = PredictionEngine::with_config(&kb.corpus, args.engine.config());

    match &args.symptoms {
        Some(list) => run_scripted(&args, &kb, &engine, list, format, verbose),
        None => run_interactive(&args, &kb, &engine, verbose),
    }
}

/// Parse one `--refine` value
fn parse_refine_answer(answer: &str) -> Clarification {
    let trimmed = answer.trim();
    if trimmed.eq_ignore_ascii_case("no") || trimmed.eq_ignore_ascii_case("n") {
        Clarification::Decline
    } else {
        Clarification::MoreSymptoms(parse_symptom_list(trimmed))
    }
}

fn run_scripted(
    args: &PredictArgs,
    kb: &KnowledgeBase,
    engine: &PredictionEngine<'_>,
    list: &str,
    format: OutputFormat,
    verbose: bool,
) -> anyhow::Result<()> {
    let symptoms = parse_symptom_list(list);
    let mut clarifier = ScriptedClarifier::new(args.refine.iter().map(|a| parse_refine_answer(a)));

    let report = engine.predict(symptoms, &mut clarifier)?;

    if verbose {
        print_session_summary(&report);
    }
    if clarifier.remaining() > 0 {
        eprintln!(
            "Note: {} --refine answer(s) were not needed.",
            clarifier.remaining()
        );
    }

    let sections = CareSections {
        precautions: true,
        tablets: true,
        doctor: args.doctor,
        reasons: args.reasons,
    };

    match format {
        OutputFormat::Text => {
            println!("Predicted Disease: {}", report.prediction);
            if let Prediction::Disease(disease) = &report.prediction {
                print_care_text(kb, disease, sections);
            }
        }
        OutputFormat::Json => print_json_report(kb, &report, sections)?,
        OutputFormat::Tsv => print_tsv_report(&report),
    }

    Ok(())
}

fn run_interactive(
    args: &PredictArgs,
    kb: &KnowledgeBase,
    engine: &PredictionEngine<'_>,
    verbose: bool,
) -> anyhow::Result<()> {
    let mut console = ConsoleClarifier::stdio();
    let symptoms = console.read_symptoms("Enter symptoms (comma-separated): ")?;

    let report = engine.predict(symptoms, &mut console)?;
    if verbose {
        print_session_summary(&report);
    }

    console.say(&format!("\nPredicted Disease: {}", report.prediction))?;
    let Prediction::Disease(disease) = &report.prediction else {
        return Ok(());
    };

    let care = CareSections {
        precautions: true,
        tablets: true,
        doctor: false,
        reasons: false,
    };
    print_care_text(kb, disease, care);

    if args.doctor || ask(&mut console, "Do you want hospital and doctor prescription?")? {
        print_doctor_text(kb, disease);
    }
    if args.reasons || ask(&mut console, "Do you want to know the reasons for this disease?")? {
        let reasons = CareSections {
            precautions: false,
            tablets: false,
            doctor: false,
            reasons: true,
        };
        print_care_text(kb, disease, reasons);
    }

    Ok(())
}

/// A closed input at a final yes/no question counts as "no"
fn ask<R: BufRead, W: Write>(
    console: &mut ConsoleClarifier<R, W>,
    question: &str,
) -> anyhow::Result<bool> {
    match console.ask_yes_no(&format!("\n{question}")) {
        Ok(answer) => Ok(answer),
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => Ok(false),
        Err(e) => Err(e.into()),
    }
}

fn print_session_summary(report: &PredictionReport) {
    eprintln!(
        "Resolution: {:?} after {} round(s), {} decline(s)",
        report.resolution, report.rounds, report.declines
    );
    eprintln!("Symptoms considered: {}", report.symptoms.join(", "));
    if let Some(verdict) = &report.verdict {
        eprintln!(
            "Last verdict: likelihood={}, neighbors={}",
            verdict.likelihood.as_ref().map_or("-", |d| d.as_str()),
            verdict.neighbors.as_ref().map_or("-", |d| d.as_str()),
        );
    }
}

fn print_json_report(
    kb: &KnowledgeBase,
    report: &PredictionReport,
    sections: CareSections,
) -> anyhow::Result<()> {
    let mut json = serde_json::to_value(report)?;
    if let Prediction::Disease(disease) = &report.prediction {
        json["care"] = care_json(kb, disease, sections);
    }
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

fn print_tsv_report(report: &PredictionReport) {
    println!("prediction\tresolution\trounds\tdeclines\tsymptoms\tcandidates");
    let prediction = report
        .prediction
        .disease()
        .map_or_else(String::new, ToString::to_string);
    let candidates: Vec<&str> = report.candidates.iter().map(|d| d.as_str()).collect();
    println!(
        "{}\t{}\t{}\t{}\t{}\t{}",
        prediction,
        resolution_label(report.resolution),
        report.rounds,
        report.declines,
        report.symptoms.join(","),
        candidates.join(","),
    );
}

fn resolution_label(resolution: Resolution) -> &'static str {
    match resolution {
        Resolution::NoCandidate => "no_candidate",
        Resolution::SingleCandidate => "single_candidate",
        Resolution::ScorerAgreement => "scorer_agreement",
        Resolution::Refined => "refined",
        Resolution::Exhausted => "exhausted",
        Resolution::DeclineLimit => "decline_limit",
    }
}
