//! HTML rendering of table and column listings.

use crate::error::IntrospectResult;
use crate::query::{ColumnInfo, TableInfo};
use minijinja::{context, Environment};

const TABLES_TEMPLATE: &str = "tables.html";
const COLUMNS_TEMPLATE: &str = "table_schemas.html";

/// Renders listing pages.
///
/// Templates use the `.html` extension so every interpolated value is
/// HTML-escaped.
pub struct PageRenderer {
    env: Environment<'static>,
}

impl PageRenderer {
    /// Build a renderer with the bundled templates.
    pub fn new() -> IntrospectResult<Self> {
        let mut env = Environment::new();
        env.add_template(TABLES_TEMPLATE, include_str!("templates/tables.html"))?;
        env.add_template(COLUMNS_TEMPLATE, include_str!("templates/table_schemas.html"))?;
        Ok(Self { env })
    }

    /// Render the `/tables` page
    pub fn render_tables(&self, tables: &[TableInfo]) -> IntrospectResult<String> {
        let template = self.env.get_template(TABLES_TEMPLATE)?;
        Ok(template.render(context! { tables => tables })?)
    }

    /// Render the `/table-schemas` page
    pub fn render_columns(&self, columns: &[ColumnInfo]) -> IntrospectResult<String> {
        let template = self.env.get_template(COLUMNS_TEMPLATE)?;
        Ok(template.render(context! { columns => columns })?)
    }
}

#[cfg(test)]
#[path = "render_test.rs"]
mod tests;
