use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::catalog::store::{KnowledgeBase, TableKind};
use crate::cli::{DataArgs, OutputFormat};

#[derive(Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: CatalogCommands,
}

#[derive(Subcommand)]
pub enum CatalogCommands {
    /// List all diseases with their symptom sets
    List {
        #[command(flatten)]
        data: DataArgs,

        /// Only show diseases whose symptom set contains this symptom
        #[arg(long)]
        symptom: Option<String>,
    },

    /// Export the knowledge base to JSON
    Export {
        /// Output file path (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        data: DataArgs,
    },
}

/// Execute catalog subcommand
///
/// # Errors
///
/// Returns an error if the knowledge base cannot be loaded or written.
pub fn run(args: CatalogArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    match args.command {
        CatalogCommands::List { data, symptom } => {
            let kb = data.load(verbose)?;
            run_list(&kb, symptom.as_deref(), format)
        }
        CatalogCommands::Export { output, data } => {
            let kb = data.load(verbose)?;
            run_export(&kb, output)
        }
    }
}

fn run_list(kb: &KnowledgeBase, symptom: Option<&str>, format: OutputFormat) -> anyhow::Result<()> {
    let entries: Vec<(&str, usize, &[String])> = kb
        .corpus
        .iter()
        .filter(|(_, set)| symptom.map_or(true, |s| set.iter().any(|x| x == s)))
        .map(|(d, set)| (d.as_str(), kb.corpus.occurrences(d), set))
        .collect();

    match format {
        OutputFormat::Text => {
            println!(
                "{} diseases, {} rows\n",
                kb.corpus.len(),
                kb.corpus.total_rows()
            );
            for (disease, rows, set) in &entries {
                println!("{disease} ({rows} rows)");
                println!("   Symptoms: {}", set.join(", "));
            }
            for kind in TableKind::ALL {
                if !kb.is_available(kind) {
                    println!("\nNote: {kind} table was not available.");
                }
            }
        }
        OutputFormat::Json => {
            let json: Vec<serde_json::Value> = entries
                .iter()
                .map(|(disease, rows, set)| {
                    serde_json::json!({
                        "disease": disease,
                        "rows": rows,
                        "symptoms": set,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Tsv => {
            println!("disease\trows\tsymptoms");
            for (disease, rows, set) in &entries {
                println!("{disease}\t{rows}\t{}", set.join(","));
            }
        }
    }

    Ok(())
}

fn run_export(kb: &KnowledgeBase, output: Option<PathBuf>) -> anyhow::Result<()> {
    let json = kb.to_json()?;
    match output {
        Some(path) => {
            std::fs::write(&path, json)?;
            eprintln!("Exported knowledge base to {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
