//! Shared text utilities: tokenization and section/contact detection.

pub mod normalizer;
pub mod sections;
