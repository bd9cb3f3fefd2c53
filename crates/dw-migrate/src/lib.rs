//! dw-migrate - Migration stepping engine for Driftwood
//!
//! Tracks the schema version applied to a database, decides which scripts
//! move it toward a requested target, applies them one transaction at a time,
//! and reports how the run ended.
//!
//! ```text
//! Catalog ──► StepPlan ──► Stepper ──► Outcome ──► Report
//!                            │
//!                       VersionStore
//! ```

pub mod catalog;
pub mod error;
pub mod observer;
pub mod outcome;
pub mod plan;
pub mod report;
pub mod stepper;
pub mod store;

pub use catalog::{write_script_pair, Catalog, MigrationScript};
pub use error::{
    CatalogError, CatalogResult, MigrateError, MigrateResult, StoreError, StoreResult,
};
pub use observer::{LogObserver, NoopObserver, StepEvent, StepObserver, StepStatus};
pub use outcome::Outcome;
pub use plan::{PlannedStep, StepPlan};
pub use report::{Report, ReportStatus};
pub use stepper::Stepper;
pub use store::{SchemaVersion, VersionStore};
