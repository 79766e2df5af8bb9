use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

use crate::core::corpus::Corpus;
use crate::core::types::{Disease, DoctorContact};
use crate::parsing::care::{doctor_table_from_rows, list_table_from_rows, DoctorTable, ListTable};
use crate::parsing::corpus::corpus_from_rows;
use crate::parsing::table::{parse_rows, parse_rows_file, ParseError, Row};

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to load {kind} table: {source}")]
    Table {
        kind: TableKind,
        #[source]
        source: ParseError,
    },

    #[error("Failed to export knowledge base: {0}")]
    Export(#[from] serde_json::Error),
}

/// Knowledge base version for compatibility checking
pub const KNOWLEDGE_BASE_VERSION: &str = "1.0.0";

/// The five data tables the knowledge base is built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    Diseases,
    Doctors,
    Precautions,
    Tablets,
    Reasons,
}

impl TableKind {
    pub const ALL: [Self; 5] = [
        Self::Diseases,
        Self::Doctors,
        Self::Precautions,
        Self::Tablets,
        Self::Reasons,
    ];

    /// Conventional file name inside a data directory
    #[must_use]
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Diseases => "disease_data.csv",
            Self::Doctors => "doctors_data.csv",
            Self::Precautions => "precautions_data.csv",
            Self::Tablets => "tablets_data.csv",
            Self::Reasons => "reasons_data.csv",
        }
    }

    fn embedded(self) -> &'static str {
        // Validated at compile time via build.rs
        match self {
            Self::Diseases => include_str!("../../data/disease_data.csv"),
            Self::Doctors => include_str!("../../data/doctors_data.csv"),
            Self::Precautions => include_str!("../../data/precautions_data.csv"),
            Self::Tablets => include_str!("../../data/tablets_data.csv"),
            Self::Reasons => include_str!("../../data/reasons_data.csv"),
        }
    }
}

impl std::fmt::Display for TableKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Diseases => write!(f, "disease"),
            Self::Doctors => write!(f, "doctor"),
            Self::Precautions => write!(f, "precautions"),
            Self::Tablets => write!(f, "tablets"),
            Self::Reasons => write!(f, "reasons"),
        }
    }
}

/// File locations for each table
#[derive(Debug, Clone)]
pub struct DataSources {
    pub diseases: PathBuf,
    pub doctors: PathBuf,
    pub precautions: PathBuf,
    pub tablets: PathBuf,
    pub reasons: PathBuf,
}

impl DataSources {
    /// Conventional file names inside `dir`
    pub fn from_dir(dir: &Path) -> Self {
        Self {
            diseases: dir.join(TableKind::Diseases.file_name()),
            doctors: dir.join(TableKind::Doctors.file_name()),
            precautions: dir.join(TableKind::Precautions.file_name()),
            tablets: dir.join(TableKind::Tablets.file_name()),
            reasons: dir.join(TableKind::Reasons.file_name()),
        }
    }

    #[must_use]
    pub fn path(&self, kind: TableKind) -> &Path {
        match kind {
            TableKind::Diseases => &self.diseases,
            TableKind::Doctors => &self.doctors,
            TableKind::Precautions => &self.precautions,
            TableKind::Tablets => &self.tablets,
            TableKind::Reasons => &self.reasons,
        }
    }
}

/// Serializable knowledge base format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeBaseData {
    pub version: String,
    pub created_at: String,
    pub corpus: Corpus,
    pub doctors: DoctorTable,
    pub precautions: ListTable,
    pub tablets: ListTable,
    pub reasons: ListTable,
}

/// The corpus and the auxiliary care tables, read-only once built
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    /// Disease -> symptoms with occurrence counts
    pub corpus: Corpus,

    /// Disease -> referral record
    pub doctors: DoctorTable,

    /// Disease -> precautions
    pub precautions: ListTable,

    /// Disease -> suggested tablets
    pub tablets: ListTable,

    /// Disease -> possible causes
    pub reasons: ListTable,

    /// Tables that failed to load and were replaced with empty ones
    unavailable: Vec<TableKind>,
}

impl KnowledgeBase {
    /// Knowledge base with only a corpus and empty care tables
    #[must_use]
    pub fn new(corpus: Corpus) -> Self {
        Self {
            corpus,
            ..Self::default()
        }
    }

    /// Load the embedded sample dataset
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Table` if an embedded table exceeds the row limit.
    pub fn load_embedded() -> Result<Self, CatalogError> {
        let mut kb = Self::default();
        for kind in TableKind::ALL {
            let rows = parse_rows(kind.embedded())
                .map_err(|source| CatalogError::Table { kind, source })?;
            kb.install(kind, rows);
        }
        Ok(kb)
    }

    /// Load every table from disk.
    ///
    /// A table that cannot be read is logged, marked unavailable, and left
    /// empty; the remaining tables still load.
    #[must_use]
    pub fn load_from_sources(sources: &DataSources) -> Self {
        let mut kb = Self::default();
        for kind in TableKind::ALL {
            let path = sources.path(kind);
            match parse_rows_file(path) {
                Ok(rows) => {
                    info!("Loaded {} rows from {} table", rows.len(), kind);
                    kb.install(kind, rows);
                }
                Err(e) => {
                    warn!(
                        "{} table unavailable ({}): {}",
                        kind,
                        path.display(),
                        e
                    );
                    kb.unavailable.push(kind);
                }
            }
        }
        kb
    }

    fn install(&mut self, kind: TableKind, rows: Vec<Row>) {
        match kind {
            TableKind::Diseases => self.corpus = corpus_from_rows(rows),
            TableKind::Doctors => self.doctors = doctor_table_from_rows(rows),
            TableKind::Precautions => self.precautions = list_table_from_rows(rows),
            TableKind::Tablets => self.tablets = list_table_from_rows(rows),
            TableKind::Reasons => self.reasons = list_table_from_rows(rows),
        }
    }

    #[must_use]
    pub fn with_doctors(mut self, doctors: DoctorTable) -> Self {
        self.doctors = doctors;
        self
    }

    #[must_use]
    pub fn with_precautions(mut self, precautions: ListTable) -> Self {
        self.precautions = precautions;
        self
    }

    #[must_use]
    pub fn with_tablets(mut self, tablets: ListTable) -> Self {
        self.tablets = tablets;
        self
    }

    #[must_use]
    pub fn with_reasons(mut self, reasons: ListTable) -> Self {
        self.reasons = reasons;
        self
    }

    /// Tables that failed to load
    #[must_use]
    pub fn unavailable(&self) -> &[TableKind] {
        &self.unavailable
    }

    #[must_use]
    pub fn is_available(&self, kind: TableKind) -> bool {
        !self.unavailable.contains(&kind)
    }

    #[must_use]
    pub fn lookup_precautions(&self, disease: &Disease) -> Option<&[String]> {
        self.precautions.get(disease).map(Vec::as_slice)
    }

    #[must_use]
    pub fn lookup_tablets(&self, disease: &Disease) -> Option<&[String]> {
        self.tablets.get(disease).map(Vec::as_slice)
    }

    #[must_use]
    pub fn lookup_reasons(&self, disease: &Disease) -> Option<&[String]> {
        self.reasons.get(disease).map(Vec::as_slice)
    }

    #[must_use]
    pub fn lookup_doctor(&self, disease: &Disease) -> Option<&DoctorContact> {
        self.doctors.get(disease)
    }

    /// Export knowledge base to JSON
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Export` if serialization fails.
    pub fn to_json(&self) -> Result<String, CatalogError> {
        let data = KnowledgeBaseData {
            version: KNOWLEDGE_BASE_VERSION.to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            corpus: self.corpus.clone(),
            doctors: self.doctors.clone(),
            precautions: self.precautions.clone(),
            tablets: self.tablets.clone(),
            reasons: self.reasons.clone(),
        };
        Ok(serde_json::to_string_pretty(&data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_embedded() {
        let kb = KnowledgeBase::load_embedded().unwrap();
        assert!(!kb.corpus.is_empty());
        assert!(kb.unavailable().is_empty());

        let flu = Disease::new("Flu");
        assert_eq!(kb.corpus.occurrences(&flu), 2);
        assert!(kb.lookup_precautions(&flu).is_some());
        assert!(kb.lookup_tablets(&flu).is_some());
        assert!(kb.lookup_reasons(&flu).is_some());
        assert!(kb.lookup_doctor(&flu).is_some());
    }

    #[test]
    fn test_lookup_missing_disease() {
        let kb = KnowledgeBase::load_embedded().unwrap();
        let unknown = Disease::new("Nonexistent");
        assert!(kb.lookup_precautions(&unknown).is_none());
        assert!(kb.lookup_doctor(&unknown).is_none());
    }

    #[test]
    fn test_missing_files_degrade() {
        let sources = DataSources::from_dir(Path::new("/nonexistent/data"));
        let kb = KnowledgeBase::load_from_sources(&sources);

        assert!(kb.corpus.is_empty());
        assert_eq!(kb.unavailable(), &TableKind::ALL);
        assert!(!kb.is_available(TableKind::Doctors));
    }

    #[test]
    fn test_sources_from_dir() {
        let sources = DataSources::from_dir(Path::new("/data"));
        assert_eq!(sources.path(TableKind::Tablets), Path::new("/data/tablets_data.csv"));
    }

    #[test]
    fn test_to_json() {
        let kb = KnowledgeBase::load_embedded().unwrap();
        let json = kb.to_json().unwrap();

        assert!(json.contains("\"version\""));
        assert!(json.contains("\"corpus\""));
        assert!(json.contains("Malaria"));
    }
}
