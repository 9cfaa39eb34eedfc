//! INB sweep and envelope evaluation engine.
//!
//! This crate provides:
//! - Probability grids and INB curve evaluation over them
//! - The pointwise-maximum envelope ("hull") across selected strategies
//! - Typed scenario files binding strategies to a sweep

pub mod envelope;
pub mod scenario;
pub mod sweep;

pub use envelope::{display_points, hull, CurvePoint, EnvelopeError};
pub use scenario::{
    GridSpec, NamedCurve, Scenario, ScenarioError, SweepReport, SCENARIO_SCHEMA_VERSION,
};
pub use sweep::{evaluate, ProbabilityGrid, SweepError, DEFAULT_GRID_POINTS};
