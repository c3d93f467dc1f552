//! Wire-facing request specification types.
//!
//! These deserialize directly from the JSON the request-handling layer
//! receives; validation against the schema graph happens when they are
//! turned into terms, not here.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Comparison operator carried by a constraint.
///
/// `SUBSTRING`/`PREFIX`/`SUFFIX` are pattern requests on textual
/// columns; term validation rewrites them to `LIKE` with the value
/// wrapped accordingly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstraintOp {
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = "!=")]
    Ne,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Le,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Ge,
    #[serde(rename = "SUBSTRING")]
    Substring,
    #[serde(rename = "PREFIX")]
    Prefix,
    #[serde(rename = "SUFFIX")]
    Suffix,
    #[serde(rename = "LIKE")]
    Like,
}

impl ConstraintOp {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::Substring => "SUBSTRING",
            Self::Prefix => "PREFIX",
            Self::Suffix => "SUFFIX",
            Self::Like => "LIKE",
        }
    }

    /// Operators that request pattern matching on textual columns.
    pub fn is_pattern(&self) -> bool {
        matches!(self, Self::Substring | Self::Prefix | Self::Suffix)
    }
}

impl fmt::Display for ConstraintOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// Aggregate function applied to a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AggregateKind {
    Count,
    Sum,
    Avg,
    Min,
    Max,
}

impl AggregateKind {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Count => "COUNT",
            Self::Sum => "SUM",
            Self::Avg => "AVG",
            Self::Min => "MIN",
            Self::Max => "MAX",
        }
    }
}

impl fmt::Display for AggregateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// Sort direction for ordering clauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// One selected column, with an optional caller-chosen output alias.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeSpec {
    pub attribute: String,
    #[serde(default)]
    pub alias: Option<String>,
}

/// One filter: `attribute operator value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintSpec {
    pub attribute: String,
    pub operator: ConstraintOp,
    pub value: String,
}

/// One aggregation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationSpec {
    pub attribute: String,
    #[serde(rename = "type")]
    pub kind: AggregateKind,
}

/// Per-table ordering entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderingSpec {
    pub attribute: String,
    pub sort: SortDirection,
}

/// One table's fragment of a read request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSpec {
    pub table: String,
    #[serde(default)]
    pub attributes: Vec<AttributeSpec>,
    #[serde(default)]
    pub constraints: Vec<ConstraintSpec>,
    #[serde(default)]
    pub group_by: Vec<String>,
    #[serde(default)]
    pub aggregations: Vec<AggregationSpec>,
    #[serde(default)]
    pub order_by: Vec<OrderingSpec>,
}

/// One assignment of an update request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateAssignmentSpec {
    pub attribute: String,
    pub value: String,
}

/// A single-table update request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateSpec {
    pub table: String,
    pub updates: Vec<UpdateAssignmentSpec>,
    #[serde(default)]
    pub constraints: Vec<ConstraintSpec>,
}

/// Global ordering entry: references a table from any fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalOrderingSpec {
    pub table_name: String,
    pub attribute: String,
    pub sort: SortDirection,
}

/// Request-wide options, separate from the per-table fragments.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QueryOptions {
    #[serde(default)]
    pub order_by: Vec<GlobalOrderingSpec>,
    #[serde(default)]
    pub limit: Option<u64>,
}

/// Physical name of a per-principal table: `u_<principal>_<table>`.
///
/// An empty principal leaves the name untouched (shared tables).
pub fn user_table_name(principal: &str, table: &str) -> String {
    if principal.is_empty() {
        table.to_string()
    } else {
        format!("u_{}_{}", principal, table)
    }
}
