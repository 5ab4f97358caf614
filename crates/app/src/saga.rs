//! Best-effort saga coordination.
//!
//! A saga runs a sequence of independent steps and records a typed outcome
//! per step. One step's failure never aborts the remainder and completed
//! steps are not compensated; the report hands the caller the full picture
//! of partial success.

use serde::{Deserialize, Serialize};

/// Outcome of one saga step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum StepOutcome {
    Completed,
    Failed { error: String },
}

/// One executed step, labelled by whatever the workflow tracks per step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SagaStep<L> {
    pub label: L,
    pub outcome: StepOutcome,
}

/// Accumulated outcomes of a saga run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SagaReport<L> {
    pub steps: Vec<SagaStep<L>>,
}

impl<L> SagaReport<L> {
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Run one isolated step, recording its outcome.
    pub fn run_step<F, E>(&mut self, label: L, step: F)
    where
        F: FnOnce() -> Result<(), E>,
        E: core::fmt::Display,
    {
        let outcome = match step() {
            Ok(()) => StepOutcome::Completed,
            Err(error) => StepOutcome::Failed {
                error: error.to_string(),
            },
        };
        self.steps.push(SagaStep { label, outcome });
    }

    pub fn completed(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| s.outcome == StepOutcome::Completed)
            .count()
    }

    pub fn failed(&self) -> usize {
        self.steps.len() - self.completed()
    }

    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }
}

impl<L> Default for SagaReport<L> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failures_are_recorded_and_do_not_stop_later_steps() {
        let mut report: SagaReport<&str> = SagaReport::new();
        report.run_step("first", || Ok::<(), String>(()));
        report.run_step("second", || Err("store unavailable".to_string()));
        report.run_step("third", || Ok::<(), String>(()));

        assert_eq!(report.completed(), 2);
        assert_eq!(report.failed(), 1);
        assert!(report.has_failures());
        assert_eq!(
            report.steps[1].outcome,
            StepOutcome::Failed {
                error: "store unavailable".to_string()
            }
        );
    }
}
