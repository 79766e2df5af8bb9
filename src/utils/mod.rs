//! Centralized input helpers shared by the parsers, the engine, and the CLI.

pub mod validation;
