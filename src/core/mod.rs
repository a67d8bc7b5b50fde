//! Run orchestration: the bounded per-symbol runtime and its cron scheduler

pub mod runtime;
pub mod scheduler;

pub use runtime::*;
pub use scheduler::*;
