//! Cost models for test strategies.
//!
//! Two parameterizations share one combinatorial skeleton: costs either
//! arrive pre-divided by the treatment's net benefit (a single ratio per
//! test), or as explicit monetary cost and harm valued against the
//! willingness to pay for a QALY. The skeleton only ever sees a per-test
//! unit cost and a benefit scale, so the explicit model is a strict
//! generalization of the normalized one.

use serde::{Deserialize, Serialize};

/// Monetary cost and harm of administering one test.
///
/// Harm is expressed in QALYs and monetized through the valuation's
/// willingness to pay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TestPrice {
    pub cost: f64,
    pub harm: f64,
}

impl TestPrice {
    pub fn new(cost: f64, harm: f64) -> Self {
        Self { cost, harm }
    }
}

/// Health-economic valuation of the treatment decision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Valuation {
    /// Willingness to pay for one QALY.
    pub willingness_to_pay: f64,
    /// QALY gain from treating a diseased patient.
    pub qaly_gain: f64,
    /// Cost of the treatment itself.
    pub treatment_cost: f64,
}

impl Valuation {
    /// Net benefit of treating a diseased patient:
    /// `willingness_to_pay * qaly_gain - treatment_cost`.
    pub fn net_benefit(&self) -> f64 {
        self.willingness_to_pay * self.qaly_gain - self.treatment_cost
    }

    /// Valuation under which explicit costs behave as plain ratios
    /// (net benefit of exactly one).
    pub fn unit() -> Self {
        Self {
            willingness_to_pay: 1.0,
            qaly_gain: 1.0,
            treatment_cost: 0.0,
        }
    }
}

/// Cost model attached to a strategy's test panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Costing {
    /// Per-test cost-to-benefit ratios; INB comes out in units of the
    /// treatment's net benefit.
    Normalized(Vec<f64>),
    /// Per-test monetary cost and harm, plus the valuation that scales the
    /// benefit term.
    Explicit {
        prices: Vec<TestPrice>,
        valuation: Valuation,
    },
}

impl Costing {
    /// Number of tests the model prices.
    pub fn len(&self) -> usize {
        match self {
            Costing::Normalized(ratios) => ratios.len(),
            Costing::Explicit { prices, .. } => prices.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Per-test unit cost in the model's INB unit.
    ///
    /// Normalized ratios are already in benefit units; explicit prices
    /// monetize harm through the willingness to pay.
    pub fn unit_costs(&self) -> Vec<f64> {
        match self {
            Costing::Normalized(ratios) => ratios.clone(),
            Costing::Explicit { prices, valuation } => prices
                .iter()
                .map(|t| t.cost + valuation.willingness_to_pay * t.harm)
                .collect(),
        }
    }

    /// Multiplier applied to the structural benefit term.
    pub fn benefit_scale(&self) -> f64 {
        match self {
            Costing::Normalized(_) => 1.0,
            Costing::Explicit { valuation, .. } => valuation.net_benefit(),
        }
    }
}
