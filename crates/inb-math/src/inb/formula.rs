//! Piecewise incremental net benefit evaluation.
//!
//! # Mathematical Foundation
//!
//! ```text
//! odds  = p_rx / (1 - p_rx)
//! kappa = sum_t cost_t * (p * w_ill_t + (1 - p) * w_well_t)
//!
//! p <  p_rx:  INB = b * ( p * Se - (1 - p) * (1 - Sp) * odds) - kappa
//! p >= p_rx:  INB = b * (-p * (1 - Se) + (1 - p) * Sp * odds) - kappa
//! ```
//!
//! `Se`/`Sp` are the rule-level sensitivity and specificity of the combined
//! panel, `w_*` the per-test administration weights, and `b` the benefit
//! scale of the cost model. Below the treatment threshold the default is to
//! withhold treatment, so the rule gains by catching true positives; at or
//! above it the default is to treat, so the rule gains by sparing true
//! negatives. The threshold itself belongs to the upper branch.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::inb::combine::{CombinationMode, TestAccuracy};
use crate::inb::cost::{Costing, TestPrice, Valuation};

/// Errors from INB evaluation.
#[derive(Debug, Error)]
pub enum FormulaError {
    #[error("probability of illness {value} outside [0, 1]")]
    ProbabilityOutOfRange { value: f64 },

    #[error("treatment threshold {value} outside the open interval (0, 1)")]
    ThresholdOutOfRange { value: f64 },

    #[error("{mode} strategy combines {expected} tests, got {actual}")]
    PanelSizeMismatch {
        mode: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("{mode} strategy prices {expected} tests, got {actual}")]
    CostingSizeMismatch {
        mode: &'static str,
        expected: usize,
        actual: usize,
    },
}

/// Odds form of the treatment threshold, `p_rx / (1 - p_rx)`.
///
/// Rejects thresholds outside the open interval (0, 1); the upper boundary
/// would divide by zero.
pub fn threshold_odds(p_rx: f64) -> Result<f64, FormulaError> {
    if !(p_rx > 0.0 && p_rx < 1.0) {
        return Err(FormulaError::ThresholdOutOfRange { value: p_rx });
    }
    Ok(p_rx / (1.0 - p_rx))
}

fn check_probability(p: f64) -> Result<(), FormulaError> {
    if !(0.0..=1.0).contains(&p) {
        return Err(FormulaError::ProbabilityOutOfRange { value: p });
    }
    Ok(())
}

/// A fully parameterized testing strategy: a combination rule over a panel
/// of tests plus the cost model pricing them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Strategy {
    pub mode: CombinationMode,
    pub tests: Vec<TestAccuracy>,
    pub costing: Costing,
}

impl Strategy {
    /// Build a strategy under the cost-normalized parameterization.
    pub fn normalized(
        mode: CombinationMode,
        tests: Vec<TestAccuracy>,
        cost_ratios: Vec<f64>,
    ) -> Result<Self, FormulaError> {
        let strategy = Self {
            mode,
            tests,
            costing: Costing::Normalized(cost_ratios),
        };
        strategy.validate()?;
        Ok(strategy)
    }

    /// Build a strategy under the cost/harm-explicit parameterization.
    pub fn explicit(
        mode: CombinationMode,
        tests: Vec<TestAccuracy>,
        prices: Vec<TestPrice>,
        valuation: Valuation,
    ) -> Result<Self, FormulaError> {
        let strategy = Self {
            mode,
            tests,
            costing: Costing::Explicit { prices, valuation },
        };
        strategy.validate()?;
        Ok(strategy)
    }

    /// Check panel and cost-model sizes against the mode's arity.
    pub fn validate(&self) -> Result<(), FormulaError> {
        let expected = self.mode.arity();
        if self.tests.len() != expected {
            return Err(FormulaError::PanelSizeMismatch {
                mode: self.mode.name(),
                expected,
                actual: self.tests.len(),
            });
        }
        if self.costing.len() != expected {
            return Err(FormulaError::CostingSizeMismatch {
                mode: self.mode.name(),
                expected,
                actual: self.costing.len(),
            });
        }
        Ok(())
    }

    /// Expected sequential testing cost at illness probability `p`.
    ///
    /// Each test's unit cost is weighted by the probability it is actually
    /// administered, conditional on illness status.
    pub fn expected_test_cost(&self, p: f64) -> f64 {
        let weights = self.mode.administration_weights(&self.tests);
        self.costing
            .unit_costs()
            .iter()
            .zip(weights)
            .map(|(cost, (ill, well))| cost * (p * ill + (1.0 - p) * well))
            .sum()
    }

    /// Incremental net benefit of this strategy at illness probability `p`
    /// under treatment threshold `p_rx`, relative to the no-test default.
    pub fn inb(&self, p: f64, p_rx: f64) -> Result<f64, FormulaError> {
        self.validate()?;
        check_probability(p)?;
        let odds = threshold_odds(p_rx)?;

        let rule_se = self.mode.rule_sensitivity(&self.tests);
        let rule_sp = self.mode.rule_specificity(&self.tests);
        let kappa = self.expected_test_cost(p);
        let scale = self.costing.benefit_scale();

        let structural = if p < p_rx {
            p * rule_se - (1.0 - p) * (1.0 - rule_sp) * odds
        } else {
            -p * (1.0 - rule_se) + (1.0 - p) * rule_sp * odds
        };
        Ok(scale * structural - kappa)
    }
}
