//! Terminal result of a stepper run.

use crate::error::MigrateError;
use dw_core::Version;

/// How a run ended.
///
/// A failing script ends the run with `Failed`, not an `Err`. Steps applied
/// before it stay committed.
#[derive(Debug)]
pub enum Outcome {
    /// Every planned step applied
    Applied {
        from: Option<Version>,
        to: Option<Version>,
        steps: usize,
    },
    /// Nothing to do in the requested direction
    NoChange,
    /// A step failed; earlier steps stay applied
    Failed {
        /// Version of the script that failed
        version: Version,
        /// Version before the run started
        from: Option<Version>,
        /// Last version committed before the failure
        reached: Option<Version>,
        error: MigrateError,
    },
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, Outcome::Failed { .. })
    }
}
