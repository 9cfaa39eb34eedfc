//! Combination rules for multi-test decision strategies.
//!
//! A strategy combines up to three tests into one treat/no-treat rule. The
//! helpers here compute the rule-level sensitivity and specificity of the
//! combined panel and the probability that each test in the sequence is
//! actually administered, conditional on illness status.
//!
//! All helpers assume the panel holds exactly [`CombinationMode::arity`]
//! tests; [`crate::Strategy`] enforces this before evaluation.

use serde::{Deserialize, Serialize};

/// Sensitivity and specificity of one diagnostic test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TestAccuracy {
    pub sensitivity: f64,
    pub specificity: f64,
}

impl TestAccuracy {
    pub fn new(sensitivity: f64, specificity: f64) -> Self {
        Self {
            sensitivity,
            specificity,
        }
    }
}

/// How a panel of tests is combined into a single treatment rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombinationMode {
    /// One test; treat on a positive result.
    Single,
    /// Two tests; treat only if both are positive.
    Conjunctive2,
    /// Two tests; treat if either is positive.
    Disjunctive2,
    /// Three tests; treat only if all three are positive.
    Conjunctive3,
    /// Three tests; treat if any is positive.
    Disjunctive3,
    /// Three tests; treat if at least two are positive.
    Majority3,
}

impl CombinationMode {
    /// All available combination modes.
    pub const ALL: &'static [CombinationMode] = &[
        CombinationMode::Single,
        CombinationMode::Conjunctive2,
        CombinationMode::Disjunctive2,
        CombinationMode::Conjunctive3,
        CombinationMode::Disjunctive3,
        CombinationMode::Majority3,
    ];

    /// Returns the display name for this mode.
    pub fn name(&self) -> &'static str {
        match self {
            CombinationMode::Single => "single",
            CombinationMode::Conjunctive2 => "dual_conjunctive",
            CombinationMode::Disjunctive2 => "dual_disjunctive",
            CombinationMode::Conjunctive3 => "triple_conjunctive",
            CombinationMode::Disjunctive3 => "triple_disjunctive",
            CombinationMode::Majority3 => "triple_majority",
        }
    }

    /// Number of tests the mode combines.
    pub fn arity(&self) -> usize {
        match self {
            CombinationMode::Single => 1,
            CombinationMode::Conjunctive2 | CombinationMode::Disjunctive2 => 2,
            CombinationMode::Conjunctive3
            | CombinationMode::Disjunctive3
            | CombinationMode::Majority3 => 3,
        }
    }

    /// Probability that a diseased patient ends up ruled positive
    /// (rule-level sensitivity).
    ///
    /// Conjunctive rules need every test positive, so sensitivities
    /// multiply. Disjunctive rules need any test positive, so the miss
    /// probabilities multiply. The majority rule uses the
    /// inclusion-exclusion form of "at least two of three positive".
    pub fn rule_sensitivity(&self, tests: &[TestAccuracy]) -> f64 {
        match self {
            CombinationMode::Single => tests[0].sensitivity,
            CombinationMode::Conjunctive2 | CombinationMode::Conjunctive3 => {
                tests.iter().map(|t| t.sensitivity).product()
            }
            CombinationMode::Disjunctive2 | CombinationMode::Disjunctive3 => {
                1.0 - tests.iter().map(|t| 1.0 - t.sensitivity).product::<f64>()
            }
            CombinationMode::Majority3 => {
                let (i, j, k) = (
                    tests[0].sensitivity,
                    tests[1].sensitivity,
                    tests[2].sensitivity,
                );
                i * j + i * k + j * k - 2.0 * i * j * k
            }
        }
    }

    /// Probability that a healthy patient ends up ruled negative
    /// (rule-level specificity).
    ///
    /// Mirror image of [`rule_sensitivity`](Self::rule_sensitivity): the
    /// conjunctive rule's false positives multiply, the disjunctive rule's
    /// specificities multiply.
    pub fn rule_specificity(&self, tests: &[TestAccuracy]) -> f64 {
        match self {
            CombinationMode::Single => tests[0].specificity,
            CombinationMode::Conjunctive2 | CombinationMode::Conjunctive3 => {
                1.0 - tests.iter().map(|t| 1.0 - t.specificity).product::<f64>()
            }
            CombinationMode::Disjunctive2 | CombinationMode::Disjunctive3 => {
                tests.iter().map(|t| t.specificity).product()
            }
            CombinationMode::Majority3 => {
                let (i, j, k) = (
                    tests[0].specificity,
                    tests[1].specificity,
                    tests[2].specificity,
                );
                i * j + i * k + j * k - 2.0 * i * j * k
            }
        }
    }

    /// Probability that each test in the sequence is administered, as
    /// `(diseased, healthy)` conditional pairs. The first test always runs.
    ///
    /// Conjunctive sequences continue only after a positive result,
    /// disjunctive sequences only after a negative one. The majority rule
    /// runs two tests unconditionally and the tiebreaker only when they
    /// disagree.
    pub fn administration_weights(&self, tests: &[TestAccuracy]) -> Vec<(f64, f64)> {
        match self {
            CombinationMode::Single => vec![(1.0, 1.0)],
            CombinationMode::Conjunctive2 | CombinationMode::Conjunctive3 => {
                let mut weights = Vec::with_capacity(tests.len());
                let (mut ill, mut well) = (1.0, 1.0);
                for t in tests {
                    weights.push((ill, well));
                    ill *= t.sensitivity;
                    well *= 1.0 - t.specificity;
                }
                weights
            }
            CombinationMode::Disjunctive2 | CombinationMode::Disjunctive3 => {
                let mut weights = Vec::with_capacity(tests.len());
                let (mut ill, mut well) = (1.0, 1.0);
                for t in tests {
                    weights.push((ill, well));
                    ill *= 1.0 - t.sensitivity;
                    well *= t.specificity;
                }
                weights
            }
            CombinationMode::Majority3 => {
                let (i, j) = (tests[0], tests[1]);
                let disagree_ill = i.sensitivity * (1.0 - j.sensitivity)
                    + (1.0 - i.sensitivity) * j.sensitivity;
                let disagree_well = i.specificity * (1.0 - j.specificity)
                    + (1.0 - i.specificity) * j.specificity;
                vec![(1.0, 1.0), (1.0, 1.0), (disagree_ill, disagree_well)]
            }
        }
    }
}
