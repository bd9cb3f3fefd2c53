//! Error types for dw-introspect

use dw_db::DbError;
use thiserror::Error;

/// Introspection errors
#[derive(Error, Debug)]
pub enum IntrospectError {
    /// Catalog query failed (I001)
    #[error("[I001] Error querying database: {0}")]
    Query(#[from] DbError),

    /// Template render failed (I002)
    #[error("[I002] Error rendering template: {0}")]
    Render(String),
}

/// Result type alias for IntrospectError
pub type IntrospectResult<T> = Result<T, IntrospectError>;

impl From<minijinja::Error> for IntrospectError {
    fn from(err: minijinja::Error) -> Self {
        IntrospectError::Render(err.to_string())
    }
}
