//! Rule predicates expressed as data

use serde::{Deserialize, Serialize};
use std::fmt;

use super::indicators::IndicatorColumn;

/// One side of a comparison
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Operand {
    Close,
    Indicator(IndicatorColumn),
    Constant(f64),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Close => write!(f, "close"),
            Operand::Indicator(column) => write!(f, "{}", column),
            Operand::Constant(value) => write!(f, "{}", value),
        }
    }
}

/// Comparison operations (strict; rules never use inclusive bounds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum Comparison {
    GreaterThan,
    LessThan,
}

impl Comparison {
    pub fn apply(&self, lhs: f64, rhs: f64) -> bool {
        match self {
            Comparison::GreaterThan => lhs > rhs,
            Comparison::LessThan => lhs < rhs,
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Comparison::GreaterThan => write!(f, ">"),
            Comparison::LessThan => write!(f, "<"),
        }
    }
}

/// A single clause `lhs <comparison> rhs`; a rule is the AND of its clauses
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub lhs: Operand,
    pub comparison: Comparison,
    pub rhs: Operand,
}

impl Condition {
    pub fn greater(lhs: Operand, rhs: Operand) -> Self {
        Self {
            lhs,
            comparison: Comparison::GreaterThan,
            rhs,
        }
    }

    pub fn less(lhs: Operand, rhs: Operand) -> Self {
        Self {
            lhs,
            comparison: Comparison::LessThan,
            rhs,
        }
    }

    /// Indicator is above its own previous-period value
    pub fn rising(period: usize) -> Self {
        Self::greater(
            Operand::Indicator(IndicatorColumn::Sma { period }),
            Operand::Indicator(IndicatorColumn::SmaPrev { period }),
        )
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.lhs, self.comparison, self.rhs)
    }
}

/// Result of evaluating one condition against a snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConditionOutcome {
    pub condition: Condition,
    pub lhs: f64,
    pub rhs: f64,
    pub passed: bool,
}
