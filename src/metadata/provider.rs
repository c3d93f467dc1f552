//! SchemaProvider trait definition.
//!
//! The SchemaProvider trait abstracts over different ways of fetching
//! schema metadata. Production implementations run `INFORMATION_SCHEMA`
//! queries through a connection layer; [`StaticSchemaProvider`] serves
//! synthetic schemas from memory for tests and embedded use.

use async_trait::async_trait;
use thiserror::Error;

use super::types::{ColumnDef, ForeignKeyDef};

/// Errors raised by a provider while introspecting a schema.
///
/// These are startup/operational faults, not per-request validation
/// errors: a failed introspection query means the graph cannot be built
/// or extended, independent of any caller input.
#[derive(Debug, Error)]
pub enum IntrospectionError {
    #[error("introspection query failed: {0}")]
    Query(String),

    #[error("schema not found: {0}")]
    SchemaNotFound(String),
}

/// Result type for introspection operations.
pub type IntrospectionResult<T> = Result<T, IntrospectionError>;

/// Trait for fetching schema metadata.
///
/// All methods are async because real implementations go through the
/// persistence layer; the graph itself never blocks after construction.
#[async_trait]
pub trait SchemaProvider: Send + Sync {
    /// List all table names under a schema.
    async fn list_tables(&self, schema: &str) -> IntrospectionResult<Vec<String>>;

    /// All `(table, column, native type)` rows under a schema.
    async fn schema_columns(&self, schema: &str) -> IntrospectionResult<Vec<ColumnDef>>;

    /// Column rows for a single table.
    async fn table_columns(&self, schema: &str, table: &str)
        -> IntrospectionResult<Vec<ColumnDef>>;

    /// Foreign-key rows for a single table.
    async fn table_foreign_keys(
        &self,
        schema: &str,
        table: &str,
    ) -> IntrospectionResult<Vec<ForeignKeyDef>>;

    /// All foreign-key rows under a schema.
    ///
    /// Default implementation lists tables and fetches per-table keys in
    /// parallel using `join_all`, preserving table enumeration order in
    /// the combined result.
    async fn schema_foreign_keys(&self, schema: &str) -> IntrospectionResult<Vec<ForeignKeyDef>> {
        let tables = self.list_tables(schema).await?;

        let futures: Vec<_> = tables
            .iter()
            .map(|table| self.table_foreign_keys(schema, table))
            .collect();

        let results = futures::future::join_all(futures).await;

        let mut all_keys = Vec::new();
        for result in results {
            all_keys.extend(result?);
        }

        Ok(all_keys)
    }
}

/// In-memory [`SchemaProvider`] backed by fixed column and foreign-key
/// rows. Tables are enumerated in first-seen column order, which makes
/// graph construction (and therefore join tie-breaking) deterministic.
#[derive(Debug, Clone, Default)]
pub struct StaticSchemaProvider {
    schema: String,
    columns: Vec<ColumnDef>,
    foreign_keys: Vec<ForeignKeyDef>,
}

impl StaticSchemaProvider {
    pub fn new(schema: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            columns: Vec::new(),
            foreign_keys: Vec::new(),
        }
    }

    pub fn with_column(
        mut self,
        table: impl Into<String>,
        column: impl Into<String>,
        native_type: impl Into<String>,
    ) -> Self {
        self.columns.push(ColumnDef::new(table, column, native_type));
        self
    }

    pub fn with_foreign_key(
        mut self,
        table: impl Into<String>,
        column: impl Into<String>,
        referenced_table: impl Into<String>,
        referenced_column: impl Into<String>,
    ) -> Self {
        self.foreign_keys.push(ForeignKeyDef::new(
            table,
            column,
            referenced_table,
            referenced_column,
        ));
        self
    }

    fn check_schema(&self, schema: &str) -> IntrospectionResult<()> {
        if schema == self.schema {
            Ok(())
        } else {
            Err(IntrospectionError::SchemaNotFound(schema.to_string()))
        }
    }
}

#[async_trait]
impl SchemaProvider for StaticSchemaProvider {
    async fn list_tables(&self, schema: &str) -> IntrospectionResult<Vec<String>> {
        self.check_schema(schema)?;
        let mut tables: Vec<String> = Vec::new();
        for col in &self.columns {
            if !tables.iter().any(|t| t == &col.table) {
                tables.push(col.table.clone());
            }
        }
        Ok(tables)
    }

    async fn schema_columns(&self, schema: &str) -> IntrospectionResult<Vec<ColumnDef>> {
        self.check_schema(schema)?;
        Ok(self.columns.clone())
    }

    async fn table_columns(
        &self,
        schema: &str,
        table: &str,
    ) -> IntrospectionResult<Vec<ColumnDef>> {
        self.check_schema(schema)?;
        Ok(self
            .columns
            .iter()
            .filter(|c| c.table == table)
            .cloned()
            .collect())
    }

    async fn table_foreign_keys(
        &self,
        schema: &str,
        table: &str,
    ) -> IntrospectionResult<Vec<ForeignKeyDef>> {
        self.check_schema(schema)?;
        Ok(self
            .foreign_keys
            .iter()
            .filter(|fk| fk.table == table)
            .cloned()
            .collect())
    }
}
