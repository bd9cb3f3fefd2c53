//! Command implementations

pub(crate) mod common;
pub mod create;
pub mod force;
#[cfg(feature = "serve")]
pub mod serve;
pub mod step;
pub mod version;
