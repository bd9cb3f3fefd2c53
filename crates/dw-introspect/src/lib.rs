//! dw-introspect - Catalog introspection for Driftwood
//!
//! Lists the user tables and columns of a database from its
//! `information_schema` and renders them as plain HTML pages. Reads catalog
//! metadata only; never touches the schema version record.

pub mod error;
pub mod query;
pub mod render;

pub use error::{IntrospectError, IntrospectResult};
pub use query::{list_columns, list_tables, ColumnInfo, TableInfo};
pub use render::PageRenderer;
