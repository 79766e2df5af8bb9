//! Knowledge base storage and candidate filtering.
//!
//! The knowledge base holds the disease corpus and the four auxiliary care
//! tables. A small sample dataset is embedded in the binary, but custom
//! tables can be loaded from a directory or from individual files.
//!
//! ## Embedded Dataset
//!
//! The default dataset covers a handful of common conditions (Flu, Common
//! Cold, Malaria, Dengue, Typhoid, Migraine, Gastroenteritis, Allergy) and
//! is intended for demonstration and testing, not clinical use.
//!
//! ## Example
//!
//! ```rust
//! use symptom_solver::KnowledgeBase;
//! use symptom_solver::catalog::index::CandidateFilter;
//!
//! let kb = KnowledgeBase::load_embedded().unwrap();
//! let symptoms = vec!["fever".to_string(), "chills".to_string()];
//!
//! let candidates = CandidateFilter::new(&kb.corpus).filter(&symptoms, None);
//! assert!(candidates.iter().any(|d| d.as_str() == "Malaria"));
//! ```
//!
//! ## Missing Tables
//!
//! A table that cannot be read is logged and treated as empty. Lookups
//! against it report "not available" for every disease; prediction keeps
//! working as long as the disease table loaded.

pub mod index;
pub mod store;
