//! Validated query terms: one table's contribution to a read request.

use crate::metadata::{SchemaGraph, SemanticType};

use super::error::{TermError, TermResult};
use super::request::{AggregateKind, ConstraintOp, SortDirection, TableSpec};

/// A selected column (qualified) with its optional output alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub column: String,
    pub alias: Option<String>,
}

/// A validated filter: the value is already formatted for its column's
/// semantic type, and pattern operators are already rewritten to LIKE.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    pub column: String,
    pub operator: ConstraintOp,
    pub value: String,
}

/// An aggregate function applied to a qualified column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregation {
    pub column: String,
    pub kind: AggregateKind,
}

/// A per-table ordering entry over a qualified column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ordering {
    pub column: String,
    pub direction: SortDirection,
}

/// The validated representation of one table's request fragment.
///
/// Every column reference is qualified as `table.column`, and every
/// constraint value has been formatted according to the semantic type
/// of its target column — an unformatted value never reaches the
/// clause assembler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryTerm {
    pub table_name: String,
    pub attributes: Vec<Attribute>,
    pub constraints: Vec<Constraint>,
    pub aggregations: Vec<Aggregation>,
    pub group_by: Vec<String>,
    pub order_by: Vec<Ordering>,
}

impl QueryTerm {
    /// Validate one table fragment against the schema graph.
    ///
    /// Fails with [`TermError::EmptyAttributes`] when nothing is
    /// selected, or [`TermError::InvalidConstraintValue`] when a
    /// non-numeric value targets a non-textual column.
    pub fn from_spec(spec: &TableSpec, graph: &SchemaGraph) -> TermResult<Self> {
        if spec.attributes.is_empty() {
            return Err(TermError::EmptyAttributes {
                table: spec.table.clone(),
            });
        }

        let attributes = spec
            .attributes
            .iter()
            .map(|a| Attribute {
                column: qualify(&spec.table, &a.attribute),
                alias: a.alias.clone(),
            })
            .collect();

        let constraints = spec
            .constraints
            .iter()
            .map(|c| {
                let column = qualify(&spec.table, &c.attribute);
                let (operator, value) =
                    format_comparison(graph, &spec.table, &c.attribute, c.operator, &c.value)?;
                Ok(Constraint {
                    column,
                    operator,
                    value,
                })
            })
            .collect::<TermResult<Vec<_>>>()?;

        let aggregations = spec
            .aggregations
            .iter()
            .map(|a| Aggregation {
                column: qualify(&spec.table, &a.attribute),
                kind: a.kind,
            })
            .collect();

        let group_by = spec
            .group_by
            .iter()
            .map(|attr| qualify(&spec.table, attr))
            .collect();

        let order_by = spec
            .order_by
            .iter()
            .map(|o| Ordering {
                column: qualify(&spec.table, &o.attribute),
                direction: o.sort,
            })
            .collect();

        Ok(Self {
            table_name: spec.table.clone(),
            attributes,
            constraints,
            aggregations,
            group_by,
            order_by,
        })
    }

    /// The aggregate kind registered for a qualified column, if any.
    ///
    /// Used by the SELECT builder to decide whether to wrap the column
    /// in an aggregate function.
    pub fn check_aggregation(&self, column: &str) -> Option<AggregateKind> {
        self.aggregations
            .iter()
            .find(|agg| agg.column == column)
            .map(|agg| agg.kind)
    }
}

/// Qualify an attribute with its owning table: `table.column`.
pub(crate) fn qualify(table: &str, attribute: &str) -> String {
    format!("{}.{}", table, attribute)
}

/// Whether `value` is a bare numeric literal: optional sign, digits,
/// optional fractional part.
pub(crate) fn is_numeric_literal(value: &str) -> bool {
    let digits = value.strip_prefix('-').unwrap_or(value);
    if digits.is_empty() {
        return false;
    }
    match digits.split_once('.') {
        Some((int_part, frac_part)) => {
            !int_part.is_empty()
                && !frac_part.is_empty()
                && int_part.chars().all(|c| c.is_ascii_digit())
                && frac_part.chars().all(|c| c.is_ascii_digit())
        }
        None => digits.chars().all(|c| c.is_ascii_digit()),
    }
}

/// Format a comparison value by the semantic type of its column.
///
/// Textual columns (STR/DATE): the value is quoted; pattern operators
/// wrap it in `%` wildcards and rewrite to LIKE. Everything else,
/// including columns of unknown type, must be a numeric literal passed
/// through bare.
pub(crate) fn format_comparison(
    graph: &SchemaGraph,
    table: &str,
    attribute: &str,
    operator: ConstraintOp,
    value: &str,
) -> TermResult<(ConstraintOp, String)> {
    let textual = graph
        .type_of(table, attribute)
        .map(SemanticType::is_textual)
        .unwrap_or(false);

    if textual {
        let formatted = match operator {
            ConstraintOp::Substring => format!("'%{}%'", value),
            ConstraintOp::Prefix => format!("'{}%'", value),
            ConstraintOp::Suffix => format!("'%{}'", value),
            _ => format!("'{}'", value),
        };
        let operator = if operator.is_pattern() {
            ConstraintOp::Like
        } else {
            operator
        };
        Ok((operator, formatted))
    } else if is_numeric_literal(value) {
        Ok((operator, value.to_string()))
    } else {
        Err(TermError::InvalidConstraintValue {
            column: qualify(table, attribute),
            value: value.to_string(),
        })
    }
}
