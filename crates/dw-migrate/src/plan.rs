//! Step planning: which scripts a run applies, in which order.

use crate::catalog::{Catalog, MigrationScript};
use dw_core::{Direction, Version};

/// One script application within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannedStep<'c> {
    /// Script being applied
    pub script: &'c MigrationScript,
    /// Which half of the script runs
    pub direction: Direction,
    /// Version recorded once the step succeeds
    pub target: Option<Version>,
}

impl PlannedStep<'_> {
    /// SQL executed by this step
    pub fn sql(&self) -> &str {
        self.script.sql(self.direction)
    }
}

/// Ordered steps for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepPlan<'c> {
    steps: Vec<PlannedStep<'c>>,
}

impl<'c> StepPlan<'c> {
    /// Compute the steps that move `current` by at most `steps` scripts.
    ///
    /// Up takes versions above `current` in ascending order. Down takes
    /// versions at or below `current` in descending order, each step
    /// recording the next lower catalog version.
    pub fn build(
        catalog: &'c Catalog,
        current: Option<Version>,
        direction: Direction,
        steps: usize,
    ) -> Self {
        let scripts = catalog.scripts();
        let steps = match direction {
            Direction::Up => scripts
                .iter()
                .filter(|s| Some(s.version) > current)
                .take(steps)
                .map(|script| PlannedStep {
                    script,
                    direction,
                    target: Some(script.version),
                })
                .collect(),
            Direction::Down => match current {
                None => Vec::new(),
                Some(c) => scripts
                    .iter()
                    .rev()
                    .filter(|s| s.version <= c)
                    .take(steps)
                    .map(|script| PlannedStep {
                        script,
                        direction,
                        target: catalog.previous(script.version).map(|p| p.version),
                    })
                    .collect(),
            },
        };
        Self { steps }
    }

    /// Steps in execution order
    pub fn steps(&self) -> &[PlannedStep<'c>] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Version the store records after the whole plan succeeds
    pub fn final_target(&self) -> Option<Option<Version>> {
        self.steps.last().map(|s| s.target)
    }
}

#[cfg(test)]
#[path = "plan_test.rs"]
mod tests;
