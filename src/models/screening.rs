use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

use super::timeframe::Timeframe;

/// Why a timeframe could not be evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    InsufficientData,
    StaleData,
    InvalidValue,
    IndicatorComputation,
    RuleEvaluation,
    Data,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::InsufficientData => "insufficient_data",
            FailureKind::StaleData => "stale_data",
            FailureKind::InvalidValue => "invalid_value",
            FailureKind::IndicatorComputation => "indicator_computation",
            FailureKind::RuleEvaluation => "rule_evaluation",
            FailureKind::Data => "data",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome for one (symbol, timeframe) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeframeVerdict {
    Satisfied,
    NotSatisfied,
    /// The pipeline failed before a verdict could be reached; counts as unsatisfied
    Unavailable(FailureKind),
}

impl TimeframeVerdict {
    pub fn from_bool(satisfied: bool) -> Self {
        if satisfied {
            TimeframeVerdict::Satisfied
        } else {
            TimeframeVerdict::NotSatisfied
        }
    }

    pub fn is_satisfied(&self) -> bool {
        matches!(self, TimeframeVerdict::Satisfied)
    }

    /// Boundary form: `Some(bool)` when evaluated, `None` when unknown
    pub fn as_option(&self) -> Option<bool> {
        match self {
            TimeframeVerdict::Satisfied => Some(true),
            TimeframeVerdict::NotSatisfied => Some(false),
            TimeframeVerdict::Unavailable(_) => None,
        }
    }

    pub fn failure(&self) -> Option<FailureKind> {
        match self {
            TimeframeVerdict::Unavailable(kind) => Some(*kind),
            _ => None,
        }
    }

    /// Metric label for this verdict
    pub fn outcome_label(&self) -> &'static str {
        match self {
            TimeframeVerdict::Satisfied => "satisfied",
            TimeframeVerdict::NotSatisfied => "not_satisfied",
            TimeframeVerdict::Unavailable(kind) => kind.as_str(),
        }
    }
}

impl Serialize for TimeframeVerdict {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_option().serialize(serializer)
    }
}

/// `true` when at least `quorum` timeframes are satisfied
pub fn quorum_reached(satisfied_count: usize, quorum: usize) -> bool {
    satisfied_count >= quorum
}

/// Aggregated screening decision for one symbol
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScreeningResult {
    pub symbol: String,
    pub verdicts: BTreeMap<Timeframe, TimeframeVerdict>,
    pub satisfied_count: usize,
    pub passed: bool,
}

impl ScreeningResult {
    pub fn new(
        symbol: impl Into<String>,
        verdicts: BTreeMap<Timeframe, TimeframeVerdict>,
        quorum: usize,
    ) -> Self {
        let satisfied_count = verdicts.values().filter(|v| v.is_satisfied()).count();
        Self {
            symbol: symbol.into(),
            verdicts,
            satisfied_count,
            passed: quorum_reached(satisfied_count, quorum),
        }
    }

    pub fn verdict(&self, timeframe: Timeframe) -> Option<TimeframeVerdict> {
        self.verdicts.get(&timeframe).copied()
    }

    /// True when at least one timeframe was satisfied
    pub fn any_satisfied(&self) -> bool {
        self.satisfied_count > 0
    }
}
