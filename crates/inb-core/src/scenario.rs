//! Typed scenario files binding strategies to a sweep.
//!
//! A scenario is the JSON boundary between the numeric core and whatever
//! collects parameters upstream: a treatment threshold, a probability grid,
//! and one or more strategies to compare. Parameter collection and chart
//! rendering stay on the other side of this boundary.

use inb_math::{FormulaError, Strategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::envelope::{self, CurvePoint, EnvelopeError};
use crate::sweep::{self, ProbabilityGrid, SweepError, DEFAULT_GRID_POINTS};

/// Schema version for scenario files.
pub const SCENARIO_SCHEMA_VERSION: &str = "1.0.0";

/// Errors from scenario loading and evaluation.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("invalid JSON: {0}")]
    Parse(String),

    #[error("unsupported schema version {found}, expected {expected}")]
    SchemaVersion {
        found: String,
        expected: &'static str,
    },

    #[error("treatment threshold {value} outside the open interval (0, 1)")]
    Threshold { value: f64 },

    #[error("no strategies selected")]
    NoStrategies,

    #[error("strategy {index}: {source}")]
    Strategy { index: usize, source: FormulaError },

    #[error("sweep failed: {0}")]
    Sweep(#[from] SweepError),

    #[error("envelope failed: {0}")]
    Envelope(#[from] EnvelopeError),
}

/// Sweep range and resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    #[serde(default = "default_min")]
    pub min: f64,

    #[serde(default = "default_max")]
    pub max: f64,

    #[serde(default = "default_points")]
    pub points: usize,
}

fn default_min() -> f64 {
    0.0
}

fn default_max() -> f64 {
    1.0
}

fn default_points() -> usize {
    DEFAULT_GRID_POINTS
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            min: default_min(),
            max: default_max(),
            points: default_points(),
        }
    }
}

/// Complete sweep scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub schema_version: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    pub treatment_threshold: f64,

    #[serde(default)]
    pub grid: GridSpec,

    pub strategies: Vec<Strategy>,
}

/// Labelled INB curve over the report grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedCurve {
    pub label: String,
    pub values: Vec<f64>,
}

/// Everything an external renderer needs to draw the comparison: the grid,
/// one raw curve per strategy, and the envelope across them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepReport {
    pub treatment_threshold: f64,
    pub points: Vec<f64>,
    pub curves: Vec<NamedCurve>,
    pub hull: Vec<f64>,
}

impl SweepReport {
    /// Display-filtered points for one curve (negatives dropped).
    pub fn display_curve(&self, index: usize) -> Option<Vec<CurvePoint>> {
        self.curves
            .get(index)
            .map(|curve| envelope::display_points(&self.points, &curve.values))
    }

    /// Display-filtered points of the envelope.
    pub fn display_hull(&self) -> Vec<CurvePoint> {
        envelope::display_points(&self.points, &self.hull)
    }
}

impl Scenario {
    /// Load a scenario from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ScenarioError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ScenarioError::Io(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::parse_json(&content)
    }

    /// Parse a scenario from a JSON string.
    pub fn parse_json(json: &str) -> Result<Self, ScenarioError> {
        serde_json::from_str(json).map_err(|e| ScenarioError::Parse(e.to_string()))
    }

    /// Semantic validation, run before any evaluation (fail fast).
    pub fn validate(&self) -> Result<(), ScenarioError> {
        if let Some(version) = &self.schema_version {
            if version != SCENARIO_SCHEMA_VERSION {
                return Err(ScenarioError::SchemaVersion {
                    found: version.clone(),
                    expected: SCENARIO_SCHEMA_VERSION,
                });
            }
        }
        if !(self.treatment_threshold > 0.0 && self.treatment_threshold < 1.0) {
            return Err(ScenarioError::Threshold {
                value: self.treatment_threshold,
            });
        }
        if self.strategies.is_empty() {
            return Err(ScenarioError::NoStrategies);
        }
        for (index, strategy) in self.strategies.iter().enumerate() {
            strategy
                .validate()
                .map_err(|source| ScenarioError::Strategy { index, source })?;
        }
        ProbabilityGrid::linspace(self.grid.min, self.grid.max, self.grid.points)?;
        Ok(())
    }

    /// Evaluate every strategy over the grid and assemble the report.
    pub fn sweep(&self) -> Result<SweepReport, ScenarioError> {
        self.validate()?;
        let grid = ProbabilityGrid::linspace(self.grid.min, self.grid.max, self.grid.points)?;

        let mut curves = Vec::with_capacity(self.strategies.len());
        for strategy in &self.strategies {
            let values = sweep::evaluate(strategy, self.treatment_threshold, &grid)?;
            info!(mode = strategy.mode.name(), "strategy evaluated");
            curves.push(NamedCurve {
                label: strategy.mode.name().to_string(),
                values,
            });
        }

        let raw: Vec<&[f64]> = curves.iter().map(|c| c.values.as_slice()).collect();
        let hull = envelope::hull(&raw)?;

        Ok(SweepReport {
            treatment_threshold: self.treatment_threshold,
            points: grid.points().to_vec(),
            curves,
            hull,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Helper ─────────────────────────────────────────────────────

    fn minimal_scenario_json() -> &'static str {
        r#"{
            "schema_version": "1.0.0",
            "treatment_threshold": 0.5,
            "grid": {"min": 0.0, "max": 1.0, "points": 11},
            "strategies": [
                {
                    "mode": "single",
                    "tests": [{"sensitivity": 0.8, "specificity": 0.8}],
                    "costing": {"normalized": [0.1]}
                },
                {
                    "mode": "dual_conjunctive",
                    "tests": [
                        {"sensitivity": 0.8, "specificity": 0.8},
                        {"sensitivity": 0.9, "specificity": 0.7}
                    ],
                    "costing": {"normalized": [0.1, 0.05]}
                }
            ]
        }"#
    }

    #[test]
    fn parse_minimal_scenario() {
        let scenario = Scenario::parse_json(minimal_scenario_json()).unwrap();
        assert_eq!(scenario.strategies.len(), 2);
        assert!((scenario.treatment_threshold - 0.5).abs() < 1e-12);
        assert!(scenario.validate().is_ok());
    }

    #[test]
    fn grid_defaults_apply() {
        let json = r#"{
            "treatment_threshold": 0.5,
            "strategies": [{
                "mode": "single",
                "tests": [{"sensitivity": 0.8, "specificity": 0.8}],
                "costing": {"normalized": [0.1]}
            }]
        }"#;
        let scenario = Scenario::parse_json(json).unwrap();
        assert_eq!(scenario.grid, GridSpec::default());
        assert_eq!(scenario.grid.points, DEFAULT_GRID_POINTS);
        assert!(scenario.schema_version.is_none());
    }

    #[test]
    fn parse_invalid_json() {
        assert!(matches!(
            Scenario::parse_json("{not json}"),
            Err(ScenarioError::Parse(_))
        ));
    }

    #[test]
    fn from_file_nonexistent() {
        let result = Scenario::from_file(std::path::Path::new("/nonexistent/scenario.json"));
        assert!(matches!(result, Err(ScenarioError::Io(_))));
    }

    // ── validation ─────────────────────────────────────────────────

    #[test]
    fn schema_version_mismatch_rejected() {
        let mut scenario = Scenario::parse_json(minimal_scenario_json()).unwrap();
        scenario.schema_version = Some("9.0.0".to_string());
        assert!(matches!(
            scenario.validate(),
            Err(ScenarioError::SchemaVersion { .. })
        ));
    }

    #[test]
    fn boundary_threshold_rejected() {
        for bad in [0.0, 1.0, -0.2, f64::NAN] {
            let mut scenario = Scenario::parse_json(minimal_scenario_json()).unwrap();
            scenario.treatment_threshold = bad;
            assert!(matches!(
                scenario.validate(),
                Err(ScenarioError::Threshold { .. })
            ));
        }
    }

    #[test]
    fn empty_strategies_rejected() {
        let mut scenario = Scenario::parse_json(minimal_scenario_json()).unwrap();
        scenario.strategies.clear();
        assert!(matches!(
            scenario.validate(),
            Err(ScenarioError::NoStrategies)
        ));
    }

    #[test]
    fn mismatched_panel_rejected_with_index() {
        let mut scenario = Scenario::parse_json(minimal_scenario_json()).unwrap();
        scenario.strategies[1].tests.pop();
        match scenario.validate() {
            Err(ScenarioError::Strategy { index, .. }) => assert_eq!(index, 1),
            other => panic!("expected strategy error, got {other:?}"),
        }
    }

    #[test]
    fn bad_grid_rejected() {
        let mut scenario = Scenario::parse_json(minimal_scenario_json()).unwrap();
        scenario.grid.min = 0.9;
        scenario.grid.max = 0.1;
        assert!(matches!(scenario.validate(), Err(ScenarioError::Sweep(_))));
    }

    // ── sweep ──────────────────────────────────────────────────────

    #[test]
    fn sweep_produces_report() {
        let scenario = Scenario::parse_json(minimal_scenario_json()).unwrap();
        let report = scenario.sweep().unwrap();
        assert_eq!(report.points.len(), 11);
        assert_eq!(report.curves.len(), 2);
        assert_eq!(report.hull.len(), 11);
        assert_eq!(report.curves[0].label, "single");
        assert_eq!(report.curves[1].label, "dual_conjunctive");
        for curve in &report.curves {
            assert_eq!(curve.values.len(), 11);
        }
    }

    #[test]
    fn report_hull_dominates_curves() {
        let scenario = Scenario::parse_json(minimal_scenario_json()).unwrap();
        let report = scenario.sweep().unwrap();
        for curve in &report.curves {
            for (h, v) in report.hull.iter().zip(&curve.values) {
                assert!(h >= v);
            }
        }
    }

    #[test]
    fn report_display_filters_negatives() {
        let scenario = Scenario::parse_json(minimal_scenario_json()).unwrap();
        let report = scenario.sweep().unwrap();
        // at p = 0 every strategy pays its testing cost for nothing
        assert!(report.curves[0].values[0] < 0.0);
        let shown = report.display_curve(0).unwrap();
        assert!(shown.iter().all(|pt| pt.inb >= 0.0));
        assert!(shown.len() < report.points.len());
        assert!(report.display_hull().iter().all(|pt| pt.inb >= 0.0));
    }

    #[test]
    fn display_curve_out_of_range_is_none() {
        let scenario = Scenario::parse_json(minimal_scenario_json()).unwrap();
        let report = scenario.sweep().unwrap();
        assert!(report.display_curve(5).is_none());
    }

    #[test]
    fn report_serde_roundtrip() {
        let scenario = Scenario::parse_json(minimal_scenario_json()).unwrap();
        let report = scenario.sweep().unwrap();
        let json = serde_json::to_string(&report).unwrap();
        let back: SweepReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.points.len(), report.points.len());
        assert_eq!(back.curves.len(), report.curves.len());
    }
}
