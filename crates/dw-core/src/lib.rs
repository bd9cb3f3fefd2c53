//! dw-core - Core library for Driftwood
//!
//! This crate provides the shared vocabulary used across all Driftwood
//! components: schema [`Version`] numbers, migration [`Direction`], and the
//! `driftwood.yml` [`Config`].

pub mod config;
pub mod direction;
pub mod error;
pub mod version;

pub use config::{Config, DatabaseConfig, MigrationsConfig, ServerConfig};
pub use direction::Direction;
pub use error::{CoreError, CoreResult};
pub use version::Version;
