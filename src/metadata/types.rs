//! Semantic column types and introspection row types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Normalized type class of a column, used to decide value-formatting
/// rules (quoting for textual types, bare literals for numeric ones).
///
/// Native type names that don't fold into one of the known families
/// pass through unchanged as [`SemanticType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SemanticType {
    Int,
    Float,
    Str,
    Date,
    Bool,
    Other(String),
}

impl SemanticType {
    /// Fold a native column type name into its semantic type.
    ///
    /// Parenthesized length/precision forms (`varchar(255)`,
    /// `decimal(10,2)`) normalize the same as their bare names.
    pub fn from_native(native: &str) -> Self {
        let lowered = native.trim().to_ascii_lowercase();
        let base = match lowered.find('(') {
            Some(pos) => lowered[..pos].trim_end().to_string(),
            None => lowered,
        };

        match base.as_str() {
            "int" | "integer" | "bigint" | "smallint" | "tinyint" | "mediumint" => Self::Int,
            "float" | "double" | "real" | "decimal" | "numeric" => Self::Float,
            "char" | "varchar" | "text" | "tinytext" | "mediumtext" | "longtext" => Self::Str,
            "date" | "datetime" | "timestamp" => Self::Date,
            "bool" | "boolean" => Self::Bool,
            _ => Self::Other(native.to_string()),
        }
    }

    /// Whether values of this type are quoted in generated SQL.
    pub fn is_textual(&self) -> bool {
        matches!(self, Self::Str | Self::Date)
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int => write!(f, "INT"),
            Self::Float => write!(f, "FLOAT"),
            Self::Str => write!(f, "STR"),
            Self::Date => write!(f, "DATE"),
            Self::Bool => write!(f, "BOOL"),
            Self::Other(raw) => write!(f, "{}", raw),
        }
    }
}

/// One column row from schema introspection:
/// `(table, column, native type)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDef {
    pub table: String,
    pub column: String,
    pub native_type: String,
}

impl ColumnDef {
    pub fn new(
        table: impl Into<String>,
        column: impl Into<String>,
        native_type: impl Into<String>,
    ) -> Self {
        Self {
            table: table.into(),
            column: column.into(),
            native_type: native_type.into(),
        }
    }
}

/// One foreign-key row from schema introspection:
/// `(table, column, referenced table, referenced column)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKeyDef {
    pub table: String,
    pub column: String,
    pub referenced_table: String,
    pub referenced_column: String,
}

impl ForeignKeyDef {
    pub fn new(
        table: impl Into<String>,
        column: impl Into<String>,
        referenced_table: impl Into<String>,
        referenced_column: impl Into<String>,
    ) -> Self {
        Self {
            table: table.into(),
            column: column.into(),
            referenced_table: referenced_table.into(),
            referenced_column: referenced_column.into(),
        }
    }
}
