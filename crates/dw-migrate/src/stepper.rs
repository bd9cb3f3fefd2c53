//! Stepper engine: applies planned scripts one at a time and keeps the
//! version store in step with the schema.
//!
//! Each step runs as:
//!
//! 1. `mark_dirty` (autocommitted on its own)
//! 2. `BEGIN` when the backend has transactional DDL
//! 3. the script's statements
//! 4. `set_version(target)` then `clear_dirty`
//! 5. `COMMIT`
//!
//! A failure in 2, 3 or 5 rolls the transaction back and leaves the store at
//! the last committed version with the dirty flag set. A failed version write
//! in 4 rolls back the same way but aborts the run with an error.

use crate::catalog::Catalog;
use crate::error::{CatalogError, MigrateError, MigrateResult, StoreError};
use crate::observer::{NoopObserver, StepEvent, StepObserver, StepStatus};
use crate::outcome::Outcome;
use crate::plan::{PlannedStep, StepPlan};
use crate::store::{SchemaVersion, VersionStore};
use dw_core::version::display_version;
use dw_core::{Direction, Version};
use dw_db::{Database, DbError};
use std::sync::Arc;
use std::time::Instant;

/// Why a single step stopped.
enum StepFailure {
    /// The script, `BEGIN` or `COMMIT` failed; reported as an outcome
    Script(DbError),
    /// The version record could not be written; aborts the run
    Store(StoreError),
}

/// Moves the schema forward or backward through the catalog.
pub struct Stepper<'c> {
    catalog: &'c Catalog,
    db: Arc<dyn Database>,
    store: VersionStore,
    observer: Arc<dyn StepObserver>,
}

impl<'c> Stepper<'c> {
    /// Create a stepper over `catalog`.
    ///
    /// `store` should be backed by the same `db` so that version updates share
    /// the script's transaction.
    pub fn new(catalog: &'c Catalog, db: Arc<dyn Database>, store: VersionStore) -> Self {
        Self {
            catalog,
            db,
            store,
            observer: Arc::new(NoopObserver),
        }
    }

    /// Receive step notifications on `observer`
    pub fn with_observer(mut self, observer: Arc<dyn StepObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// The catalog this stepper plans against
    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    /// Read the persisted schema state without changing it.
    pub async fn current(&self) -> MigrateResult<SchemaVersion> {
        Ok(self.store.current().await?)
    }

    /// Steps a run from `current` would apply. Pure; no database contact.
    pub fn plan(&self, current: Option<Version>, direction: Direction, steps: usize) -> StepPlan<'c> {
        StepPlan::build(self.catalog, current, direction, steps)
    }

    /// Apply up to `steps` scripts in `direction`.
    ///
    /// Returns `Err` when the run cannot start (bad argument, dirty or
    /// unreadable store, catalog mismatch) or a version write fails. A failing
    /// script yields `Ok(Outcome::Failed)`.
    pub async fn run(&self, direction: Direction, steps: usize) -> MigrateResult<Outcome> {
        if steps == 0 {
            return Err(MigrateError::InvalidArgument(
                "step count must be at least 1".to_string(),
            ));
        }

        self.store.ensure().await?;
        let state = self.store.current().await?;
        if state.dirty {
            return Err(MigrateError::DirtyState {
                version: state.version,
            });
        }
        if let Some(version) = state.version {
            if !self.catalog.contains(version) {
                return Err(CatalogError::AppliedVersionMissing { version }.into());
            }
        }

        let plan = self.plan(state.version, direction, steps);
        if plan.is_empty() {
            log::info!(
                "No {} migrations to apply at version {}",
                direction,
                display_version(state.version)
            );
            return Ok(Outcome::NoChange);
        }

        log::debug!(
            "Planned {} {} step(s) from version {} on {}",
            plan.len(),
            direction,
            display_version(state.version),
            self.db.db_type()
        );

        let mut reached = state.version;
        for step in plan.steps() {
            self.notify(step, StepStatus::Started);
            let started = Instant::now();

            let applied = match self.store.mark_dirty().await {
                Ok(()) => self.apply(step).await,
                Err(e) => Err(StepFailure::Store(e)),
            };
            match applied {
                Ok(()) => {
                    reached = step.target;
                    self.notify(
                        step,
                        StepStatus::Applied {
                            elapsed: started.elapsed(),
                        },
                    );
                }
                Err(StepFailure::Script(source)) => {
                    let error = MigrateError::ScriptExecution {
                        version: step.script.version,
                        direction,
                        source,
                    };
                    self.notify(step, StepStatus::Failed { error: &error });
                    return Ok(Outcome::Failed {
                        version: step.script.version,
                        from: state.version,
                        reached,
                        error,
                    });
                }
                Err(StepFailure::Store(e)) => {
                    let error = MigrateError::from(e);
                    self.notify(step, StepStatus::Failed { error: &error });
                    return Err(error);
                }
            }
        }

        Ok(Outcome::Applied {
            from: state.version,
            to: reached,
            steps: plan.len(),
        })
    }

    /// Run one step's script and record its target version.
    async fn apply(&self, step: &PlannedStep<'c>) -> Result<(), StepFailure> {
        let transactional = self.db.supports_transactional_ddl();
        if transactional {
            self.db.begin().await.map_err(StepFailure::Script)?;
        }

        if let Err(failure) = self.apply_in_scope(step).await {
            if transactional {
                self.rollback_quietly().await;
            }
            return Err(failure);
        }

        if transactional {
            if let Err(e) = self.db.commit().await {
                self.rollback_quietly().await;
                return Err(StepFailure::Script(e));
            }
        }
        Ok(())
    }

    async fn apply_in_scope(&self, step: &PlannedStep<'c>) -> Result<(), StepFailure> {
        let sql = step.sql();
        if sql.trim().is_empty() {
            log::debug!("Migration {} has an empty {} script", step.script.version, step.direction);
        } else {
            self.db
                .execute_batch(sql)
                .await
                .map_err(StepFailure::Script)?;
        }

        self.store
            .set_version(step.target)
            .await
            .map_err(StepFailure::Store)?;
        self.store.clear_dirty().await.map_err(StepFailure::Store)
    }

    async fn rollback_quietly(&self) {
        if let Err(e) = self.db.rollback().await {
            log::warn!("Rollback failed: {e}");
        }
    }

    fn notify(&self, step: &PlannedStep<'c>, status: StepStatus<'_>) {
        self.observer.on_step(&StepEvent {
            version: step.script.version,
            name: &step.script.name,
            direction: step.direction,
            status,
        });
    }
}

#[cfg(test)]
#[path = "stepper_test.rs"]
mod tests;
