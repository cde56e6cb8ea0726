//! # PTCG Common Library
//!
//! Shared code for the set-data tools including:
//! - Catalog input models (sets, raw cards)
//! - Output artifact models (set records, creature entries)
//! - Artifact persistence with atomic checkpoints
//! - Configuration loading
//! - Error types

pub mod artifact;
pub mod config;
pub mod error;
pub mod models;

pub use error::{Error, Result};
