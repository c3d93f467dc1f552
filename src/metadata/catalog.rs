//! Type catalog: `(table, column)` → semantic type.

use std::collections::HashMap;

use super::types::SemanticType;

/// Per-table column type store.
///
/// Absence of an entry is a valid, checkable state — downstream value
/// formatting treats unknown columns as non-textual rather than failing.
#[derive(Debug, Clone, Default)]
pub struct TypeCatalog {
    tables: HashMap<String, HashMap<String, SemanticType>>,
}

impl TypeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the normalized semantic type for a column.
    ///
    /// Re-registering the same `(table, column)` with the same native
    /// type is idempotent; a different native type overwrites.
    pub fn register(&mut self, table: &str, column: &str, native_type: &str) {
        self.tables
            .entry(table.to_string())
            .or_default()
            .insert(column.to_string(), SemanticType::from_native(native_type));
    }

    /// Look up the semantic type of a column, if known.
    pub fn lookup(&self, table: &str, column: &str) -> Option<&SemanticType> {
        self.tables.get(table)?.get(column)
    }

    /// Number of tables with at least one registered column.
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
