//! INB toolkit common types and errors.
//!
//! This crate provides foundational types shared across the inb crates:
//! - Unified error type with stable CLI exit codes
//! - Output format specifications

pub mod error;
pub mod output;

pub use error::{Error, Result};
pub use output::OutputFormat;
