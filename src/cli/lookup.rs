//! Lookup command - show the care information recorded for one disease.

use clap::Args;

use crate::catalog::store::KnowledgeBase;
use crate::cli::{DataArgs, OutputFormat};
use crate::core::types::Disease;

#[derive(Args)]
pub struct LookupArgs {
    /// Disease name, exactly as it appears in the tables
    #[arg(required = true)]
    pub disease: String,

    #[command(flatten)]
    pub data: DataArgs,
}

/// Which care sections to render
#[derive(Debug, Clone, Copy)]
pub struct CareSections {
    pub precautions: bool,
    pub tablets: bool,
    pub doctor: bool,
    pub reasons: bool,
}

impl CareSections {
    pub const ALL: Self = Self {
        precautions: true,
        tablets: true,
        doctor: true,
        reasons: true,
    };
}

/// Execute lookup subcommand
///
/// # Errors
///
/// Returns an error if the knowledge base cannot be loaded or output fails.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: LookupArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let kb = args.data.load(verbose)?;
    let disease = Disease::new(args.disease.trim());

    match format {
        OutputFormat::Text => print_care_text(&kb, &disease, CareSections::ALL),
        OutputFormat::Json => {
            let json = care_json(&kb, &disease, CareSections::ALL);
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Tsv => print_care_tsv(&kb, &disease),
    }

    Ok(())
}

pub(crate) fn print_care_text(kb: &KnowledgeBase, disease: &Disease, sections: CareSections) {
    if sections.precautions {
        print_list(
            kb.lookup_precautions(disease),
            &format!("Precautions for {disease}:"),
            &format!("No precautions available for {disease}."),
        );
    }
    if sections.tablets {
        print_list(
            kb.lookup_tablets(disease),
            &format!("Recommended Tablets for {disease}:"),
            &format!("No tablet recommendations available for {disease}."),
        );
    }
    if sections.doctor {
        print_doctor_text(kb, disease);
    }
    if sections.reasons {
        print_list(
            kb.lookup_reasons(disease),
            &format!("Possible Reasons for {disease}:"),
            &format!("No reasons available for {disease}."),
        );
    }
}

pub(crate) fn print_doctor_text(kb: &KnowledgeBase, disease: &Disease) {
    match kb.lookup_doctor(disease) {
        Some(contact) => {
            println!("\nDoctor Recommendation for {disease}:");
            println!("Doctor Name: {}", contact.doctor_name);
            println!("Hospital: {}", contact.hospital);
            println!("Address: {}", contact.address);
        }
        None => println!("\nNo doctor data available for {disease}."),
    }
}

fn print_list(items: Option<&[String]>, heading: &str, missing: &str) {
    match items {
        Some(items) => {
            println!("\n{heading}");
            for item in items {
                println!("- {item}");
            }
        }
        None => println!("\n{missing}"),
    }
}

pub(crate) fn care_json(
    kb: &KnowledgeBase,
    disease: &Disease,
    sections: CareSections,
) -> serde_json::Value {
    let mut json = serde_json::json!({ "disease": disease });
    if sections.precautions {
        json["precautions"] = serde_json::json!(kb.lookup_precautions(disease));
    }
    if sections.tablets {
        json["tablets"] = serde_json::json!(kb.lookup_tablets(disease));
    }
    if sections.doctor {
        json["doctor"] = serde_json::json!(kb.lookup_doctor(disease));
    }
    if sections.reasons {
        json["reasons"] = serde_json::json!(kb.lookup_reasons(disease));
    }
    json
}

fn print_care_tsv(kb: &KnowledgeBase, disease: &Disease) {
    println!("disease\tsection\tvalue");
    let lists = [
        ("precaution", kb.lookup_precautions(disease)),
        ("tablet", kb.lookup_tablets(disease)),
        ("reason", kb.lookup_reasons(disease)),
    ];
    for (section, items) in lists {
        for item in items.unwrap_or_default() {
            println!("{disease}\t{section}\t{item}");
        }
    }
    if let Some(contact) = kb.lookup_doctor(disease) {
        println!("{disease}\tdoctor_name\t{}", contact.doctor_name);
        println!("{disease}\thospital\t{}", contact.hospital);
        println!("{disease}\taddress\t{}", contact.address);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_care_json_missing_sections_are_null() {
        let kb = KnowledgeBase::load_embedded().unwrap();
        let json = care_json(&kb, &Disease::new("Nonexistent"), CareSections::ALL);
        assert_eq!(json["disease"], "Nonexistent");
        assert!(json["precautions"].is_null());
        assert!(json["doctor"].is_null());
    }

    #[test]
    fn test_care_json_honors_sections() {
        let kb = KnowledgeBase::load_embedded().unwrap();
        let sections = CareSections {
            doctor: false,
            reasons: false,
            ..CareSections::ALL
        };
        let json = care_json(&kb, &Disease::new("Flu"), sections);
        assert!(json["precautions"].is_array());
        assert!(json.get("doctor").is_none());
        assert!(json.get("reasons").is_none());
    }
}
