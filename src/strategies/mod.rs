//! Rule predicates that turn indicator snapshots into verdicts.

pub mod evaluator;

pub use evaluator::ConditionEvaluator;
