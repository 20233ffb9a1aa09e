//! Evaluation configuration.

/// How the rules of a set are scheduled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EvalMode {
    /// One rule at a time, in rule-set order, on the calling thread.
    #[default]
    Sequential,
    /// Whole rules run concurrently on a worker pool.
    Parallel,
}

/// Configuration for a [`RuleEvaluator`](crate::RuleEvaluator).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvalConfig {
    /// Scheduling mode used by [`RuleEvaluator::run`](crate::RuleEvaluator::run).
    pub mode: EvalMode,
    /// Worker count for parallel runs. `None` uses the global pool.
    pub threads: Option<usize>,
}

impl EvalConfig {
    /// Creates a sequential configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parallel configuration using the global pool.
    #[must_use]
    pub fn parallel() -> Self {
        Self {
            mode: EvalMode::Parallel,
            threads: None,
        }
    }

    /// Builder method to set the mode.
    #[must_use]
    pub fn with_mode(mut self, mode: EvalMode) -> Self {
        self.mode = mode;
        self
    }

    /// Builder method to use a dedicated pool with `threads` workers.
    #[must_use]
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }
}
