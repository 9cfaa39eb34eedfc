//! Output format selection for the CLI surface.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Report encodings the CLI can emit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Machine-readable JSON report.
    #[default]
    Json,
    /// Flat CSV table, one row per grid point.
    Csv,
}

impl OutputFormat {
    /// Returns the display name for this format.
    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
