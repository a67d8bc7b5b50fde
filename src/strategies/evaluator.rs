//! Timeframe rule evaluation against the latest indicator snapshot

use crate::error::RuleEvaluationError;
use crate::models::{
    Condition, ConditionOutcome, EnrichedSeries, IndicatorSnapshot, Operand, Timeframe,
};

pub struct ConditionEvaluator;

impl ConditionEvaluator {
    /// Evaluate the timeframe's rule predicate on the final row of `series`
    pub fn evaluate(
        series: &EnrichedSeries,
        timeframe: Timeframe,
    ) -> Result<bool, RuleEvaluationError> {
        let snapshot = series.snapshot().ok_or(RuleEvaluationError::EmptySeries)?;
        Self::evaluate_snapshot(&snapshot, timeframe)
    }

    /// Evaluate the timeframe's rule predicate on a snapshot
    pub fn evaluate_snapshot(
        snapshot: &IndicatorSnapshot,
        timeframe: Timeframe,
    ) -> Result<bool, RuleEvaluationError> {
        Ok(Self::explain(snapshot, timeframe)?
            .iter()
            .all(|outcome| outcome.passed))
    }

    /// Per-condition outcomes.
    ///
    /// Every input is resolved before any verdict is formed, so a missing or
    /// non-finite value is reported even when an earlier clause already failed.
    pub fn explain(
        snapshot: &IndicatorSnapshot,
        timeframe: Timeframe,
    ) -> Result<Vec<ConditionOutcome>, RuleEvaluationError> {
        timeframe
            .rules()
            .into_iter()
            .map(|condition| Self::evaluate_condition(condition, snapshot))
            .collect()
    }

    fn evaluate_condition(
        condition: Condition,
        snapshot: &IndicatorSnapshot,
    ) -> Result<ConditionOutcome, RuleEvaluationError> {
        let lhs = Self::resolve(condition.lhs, snapshot)?;
        let rhs = Self::resolve(condition.rhs, snapshot)?;
        Ok(ConditionOutcome {
            condition,
            lhs,
            rhs,
            passed: condition.comparison.apply(lhs, rhs),
        })
    }

    fn resolve(operand: Operand, snapshot: &IndicatorSnapshot) -> Result<f64, RuleEvaluationError> {
        let value = match operand {
            Operand::Close => snapshot.close,
            Operand::Indicator(column) => snapshot
                .get(column)
                .ok_or(RuleEvaluationError::MissingInput(column))?,
            Operand::Constant(value) => value,
        };

        if !value.is_finite() {
            return Err(RuleEvaluationError::NonFinite {
                operand: operand.to_string(),
                value,
            });
        }
        Ok(value)
    }
}
