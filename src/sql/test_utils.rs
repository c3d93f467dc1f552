//! Test utilities for emitted-SQL validation.
//!
//! Provides a helper for validating that compiled query text is
//! syntactically correct, using sqlparser-rs for roundtrip validation
//! against the MySQL dialect this system targets.

use sqlparser::dialect::MySqlDialect;
use sqlparser::parser::Parser;

/// Validates that a SQL string parses under the MySQL dialect.
///
/// Returns an error carrying the parser diagnostic and the offending
/// SQL if parsing fails.
pub fn validate_sql(sql: &str) -> Result<(), String> {
    Parser::parse_sql(&MySqlDialect {}, sql)
        .map(|_| ())
        .map_err(|e| format!("Invalid SQL: {}\nSQL: {}", e, sql))
}
