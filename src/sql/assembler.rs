//! The clause assembler: SELECT/FROM/JOIN/WHERE/GROUP BY/ORDER BY/LIMIT
//! for reads, UPDATE/SET/WHERE for updates.
//!
//! Assembly is a two-phase pipeline: the SELECT phase produces the
//! select text together with a read-only [`AliasIndex`], and the ORDER
//! BY phase consumes that index so ordering can reference either a raw
//! column or its previously emitted alias.

use std::collections::HashMap;

use thiserror::Error;
use tracing::debug;

use crate::metadata::{PathError, SchemaGraph};
use crate::query::{
    AggregateKind, QueryOptions, QueryTerm, TableSpec, TermError, UpdateSpec, UpdateTerm,
};

/// Mapping from qualified column to the output alias emitted for it.
///
/// Populated while building the SELECT fragment (first write wins on
/// collisions), consumed read-only while building ORDER BY.
pub type AliasIndex = HashMap<String, String>;

/// Errors that can occur during query compilation.
///
/// All variants are caller-input errors (4xx-equivalent): the request
/// is rejected before any execution is attempted, never partially
/// applied.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("empty request: no table fragments supplied")]
    EmptyRequest,

    #[error(transparent)]
    Term(#[from] TermError),

    #[error(transparent)]
    Path(#[from] PathError),
}

/// Result type for compilation.
pub type CompileResult<T> = Result<T, CompileError>;

/// A compiled read query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledQuery {
    /// The query text, ready to execute verbatim.
    pub sql: String,
    /// Number of table fragments the query originated from; the output
    /// shaping layer strips table-name prefixes when exactly one table
    /// was involved.
    pub term_count: usize,
}

/// Compiles request specifications into query text against a borrowed
/// schema graph snapshot.
pub struct QueryCompiler<'a> {
    graph: &'a SchemaGraph,
}

impl<'a> QueryCompiler<'a> {
    pub fn new(graph: &'a SchemaGraph) -> Self {
        Self { graph }
    }

    /// Compile an ordered list of table fragments plus global options
    /// into a read query.
    ///
    /// Compiling the same request twice against an unchanged graph
    /// yields byte-identical text.
    pub fn compile(
        &self,
        specs: &[TableSpec],
        options: &QueryOptions,
    ) -> CompileResult<CompiledQuery> {
        if specs.is_empty() {
            return Err(CompileError::EmptyRequest);
        }

        let terms = specs
            .iter()
            .map(|spec| QueryTerm::from_spec(spec, self.graph))
            .collect::<Result<Vec<_>, _>>()?;

        let (select, aliases) = select_clause(&terms);

        let mut clauses = vec![
            format!("SELECT {}", select),
            format!("FROM {}", terms[0].table_name),
        ];

        if let Some(join) = self.join_clause(&terms)? {
            clauses.push(join);
        }
        if let Some(filter) = where_clause(&terms) {
            clauses.push(filter);
        }
        if let Some(group) = group_by_clause(&terms) {
            clauses.push(group);
        }
        if let Some(order) = order_by_clause(options, &aliases) {
            clauses.push(order);
        }
        if let Some(limit) = options.limit {
            clauses.push(format!("LIMIT {}", limit));
        }

        let sql = clauses.join("\n");
        debug!(terms = terms.len(), bytes = sql.len(), "query compiled");

        Ok(CompiledQuery {
            sql,
            term_count: terms.len(),
        })
    }

    /// Compile a single-table update statement.
    pub fn compile_update(&self, spec: &UpdateSpec) -> CompileResult<String> {
        let term = UpdateTerm::from_spec(spec, self.graph)?;

        let assignments = term
            .updates
            .iter()
            .map(|u| format!("{}={}", u.column, u.value))
            .collect::<Vec<_>>()
            .join(",");

        let mut sql = format!("UPDATE {}\nSET {}", term.table_name, assignments);

        if !term.constraints.is_empty() {
            let conditions = term
                .constraints
                .iter()
                .map(|c| format!("{} {} {}", c.column, c.operator, c.value))
                .collect::<Vec<_>>()
                .join(" AND ");
            sql.push_str(&format!("\nWHERE {}", conditions));
        }

        sql.push(';');
        debug!(table = %term.table_name, bytes = sql.len(), "update compiled");

        Ok(sql)
    }

    /// Stitch consecutive terms together through the join resolver.
    ///
    /// A resolver returning an empty fragment (source equals
    /// destination) contributes nothing.
    fn join_clause(&self, terms: &[QueryTerm]) -> CompileResult<Option<String>> {
        let mut fragments = Vec::new();

        for pair in terms.windows(2) {
            let path = self.graph.join_path(&pair[0].table_name, &pair[1].table_name)?;
            let fragment = path.to_join_fragment();
            if !fragment.is_empty() {
                fragments.push(fragment);
            }
        }

        if fragments.is_empty() {
            Ok(None)
        } else {
            Ok(Some(fragments.join(" ")))
        }
    }
}

/// Phase 1: the SELECT list plus the alias index it emitted.
///
/// Items appear in term order then attribute order; aggregated columns
/// are wrapped in their aggregate function. Every item carries an
/// alias — the caller-supplied one, or an underscore-joined default.
fn select_clause(terms: &[QueryTerm]) -> (String, AliasIndex) {
    let mut items = Vec::new();
    let mut aliases = AliasIndex::new();

    for term in terms {
        for attr in &term.attributes {
            let kind = term.check_aggregation(&attr.column);
            let expr = match kind {
                Some(kind) => format!("{}({})", kind, attr.column),
                None => attr.column.clone(),
            };
            let alias = attr
                .alias
                .clone()
                .unwrap_or_else(|| default_alias(kind, &attr.column));

            aliases
                .entry(attr.column.clone())
                .or_insert_with(|| alias.clone());
            items.push(format!("{} AS {}", expr, alias));
        }
    }

    (items.join(","), aliases)
}

/// Default output alias: underscore-joined aggregate kind (if any) and
/// qualified column parts, e.g. `SUM_sales_amount`.
fn default_alias(kind: Option<AggregateKind>, column: &str) -> String {
    let mut parts: Vec<&str> = Vec::new();
    let kind_sql = kind.map(|k| k.as_sql());
    if let Some(k) = kind_sql {
        parts.push(k);
    }
    parts.extend(column.split('.'));
    parts.join("_")
}

fn where_clause(terms: &[QueryTerm]) -> Option<String> {
    let conditions: Vec<String> = terms
        .iter()
        .flat_map(|t| t.constraints.iter())
        .map(|c| format!("{} {} {}", c.column, c.operator, c.value))
        .collect();

    if conditions.is_empty() {
        None
    } else {
        Some(format!("WHERE {}", conditions.join(" AND ")))
    }
}

fn group_by_clause(terms: &[QueryTerm]) -> Option<String> {
    let columns: Vec<&str> = terms
        .iter()
        .flat_map(|t| t.group_by.iter())
        .map(String::as_str)
        .collect();

    if columns.is_empty() {
        None
    } else {
        Some(format!("GROUP BY {}", columns.join(",")))
    }
}

/// Phase 2: ORDER BY from the global options, resolving each attribute
/// through the alias index recorded by the SELECT phase; attributes
/// never selected are used verbatim.
fn order_by_clause(options: &QueryOptions, aliases: &AliasIndex) -> Option<String> {
    if options.order_by.is_empty() {
        return None;
    }

    let entries: Vec<String> = options
        .order_by
        .iter()
        .map(|o| {
            let qualified = format!("{}.{}", o.table_name, o.attribute);
            let name = aliases
                .get(&qualified)
                .cloned()
                .unwrap_or_else(|| o.attribute.clone());
            format!("{} {}", name, o.sort)
        })
        .collect();

    Some(format!("ORDER BY {}", entries.join(",")))
}
