//! Validated update terms: a restricted term for a single-table update.

use crate::metadata::{SchemaGraph, SemanticType};

use super::error::{TermError, TermResult};
use super::request::UpdateSpec;
use super::term::{self, Constraint};

/// One validated assignment: qualified column and formatted new value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateAssignment {
    pub column: String,
    pub value: String,
}

/// The validated representation of a single-table update request.
///
/// Carries assignments plus the constraints for the WHERE clause; no
/// attributes, aggregations, or grouping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTerm {
    pub table_name: String,
    pub updates: Vec<UpdateAssignment>,
    pub constraints: Vec<Constraint>,
}

impl UpdateTerm {
    /// Validate an update request against the schema graph.
    ///
    /// Assignment values follow the same type-directed formatting as
    /// constraints, without the pattern-operator rewrites (these are
    /// assignments, not comparisons).
    pub fn from_spec(spec: &UpdateSpec, graph: &SchemaGraph) -> TermResult<Self> {
        if spec.updates.is_empty() {
            return Err(TermError::EmptyUpdates {
                table: spec.table.clone(),
            });
        }

        let updates = spec
            .updates
            .iter()
            .map(|u| {
                let column = term::qualify(&spec.table, &u.attribute);
                let value = format_assignment(graph, &spec.table, &u.attribute, &u.value)?;
                Ok(UpdateAssignment { column, value })
            })
            .collect::<TermResult<Vec<_>>>()?;

        let constraints = spec
            .constraints
            .iter()
            .map(|c| {
                let column = term::qualify(&spec.table, &c.attribute);
                let (operator, value) =
                    term::format_comparison(graph, &spec.table, &c.attribute, c.operator, &c.value)?;
                Ok(Constraint {
                    column,
                    operator,
                    value,
                })
            })
            .collect::<TermResult<Vec<_>>>()?;

        Ok(Self {
            table_name: spec.table.clone(),
            updates,
            constraints,
        })
    }
}

/// Format an assignment value: quoted for textual columns, bare numeric
/// literal for everything else.
fn format_assignment(
    graph: &SchemaGraph,
    table: &str,
    attribute: &str,
    value: &str,
) -> TermResult<String> {
    let textual = graph
        .type_of(table, attribute)
        .map(SemanticType::is_textual)
        .unwrap_or(false);

    if textual {
        Ok(format!("'{}'", value))
    } else if term::is_numeric_literal(value) {
        Ok(value.to_string())
    } else {
        Err(TermError::InvalidUpdateValue {
            column: term::qualify(table, attribute),
            value: value.to_string(),
        })
    }
}
