//! The schema graph: tables as nodes, foreign keys as edges.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use tracing::debug;

use super::catalog::TypeCatalog;
use super::provider::{IntrospectionResult, SchemaProvider};
use super::types::{ForeignKeyDef, SemanticType};

/// A table node in the schema graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableNode {
    pub name: String,
}

/// A navigable foreign-key relationship between two tables.
///
/// The underlying constraint is one-directional; edges are inserted in
/// both directions when discovered, so the graph reads symmetrically.
/// Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FkEdge {
    pub from_table: String,
    pub from_column: String,
    pub to_table: String,
    pub to_column: String,
}

impl FkEdge {
    /// The join condition this edge represents: `from.col=to.col`.
    pub fn condition(&self) -> String {
        format!(
            "{}.{}={}.{}",
            self.from_table, self.from_column, self.to_table, self.to_column
        )
    }

    /// The same relationship walked in the opposite direction.
    pub fn reversed(&self) -> FkEdge {
        FkEdge {
            from_table: self.to_table.clone(),
            from_column: self.to_column.clone(),
            to_table: self.from_table.clone(),
            to_column: self.from_column.clone(),
        }
    }
}

impl std::fmt::Display for FkEdge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.condition())
    }
}

/// Typed graph of tables, columns, and foreign-key relationships.
///
/// Built once from schema introspection via [`SchemaGraph::build`];
/// extended additively via [`SchemaGraph::register_table`] when a new
/// table is created mid-session. Nothing is ever removed.
#[derive(Debug, Clone, Default)]
pub struct SchemaGraph {
    graph: DiGraph<TableNode, FkEdge>,

    /// Index: table name → NodeIndex
    table_index: HashMap<String, NodeIndex>,

    catalog: TypeCatalog,
}

impl SchemaGraph {
    /// Create an empty graph. Mostly useful for tests; production code
    /// goes through [`SchemaGraph::build`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Introspect every table, column, and foreign key reachable under
    /// `schema` and populate the catalog and edge lists.
    ///
    /// A schema with zero foreign keys is not an error; it yields a
    /// graph of isolated table nodes.
    pub async fn build(
        provider: &dyn SchemaProvider,
        schema: &str,
    ) -> IntrospectionResult<Self> {
        let mut graph = Self::new();

        for col in provider.schema_columns(schema).await? {
            graph.catalog.register(&col.table, &col.column, &col.native_type);
            graph.ensure_table(&col.table);
        }

        for fk in provider.schema_foreign_keys(schema).await? {
            graph.add_foreign_key(&fk);
        }

        debug!(
            schema,
            tables = graph.table_count(),
            edges = graph.edge_count(),
            "schema graph built"
        );

        Ok(graph)
    }

    /// Introspect one table's columns and add them to the type catalog.
    ///
    /// Used when a new table is created mid-session. No edges are added:
    /// derived tables are leaves by construction, so join inference
    /// involving them fails with `NoPathFound` unless they were part of
    /// the original schema.
    pub async fn register_table(
        &mut self,
        provider: &dyn SchemaProvider,
        schema: &str,
        table: &str,
    ) -> IntrospectionResult<()> {
        let columns = provider.table_columns(schema, table).await?;
        for col in &columns {
            self.catalog.register(&col.table, &col.column, &col.native_type);
        }
        self.ensure_table(table);

        debug!(table, columns = columns.len(), "table registered");
        Ok(())
    }

    /// Node for `name`, creating an isolated one if missing.
    pub(crate) fn ensure_table(&mut self, name: &str) -> NodeIndex {
        if let Some(&idx) = self.table_index.get(name) {
            return idx;
        }
        let idx = self.graph.add_node(TableNode {
            name: name.to_string(),
        });
        self.table_index.insert(name.to_string(), idx);
        idx
    }

    /// Insert a discovered foreign key as a bidirectional pair of edges.
    pub fn add_foreign_key(&mut self, fk: &ForeignKeyDef) {
        let edge = FkEdge {
            from_table: fk.table.clone(),
            from_column: fk.column.clone(),
            to_table: fk.referenced_table.clone(),
            to_column: fk.referenced_column.clone(),
        };
        let from_idx = self.ensure_table(&fk.table);
        let to_idx = self.ensure_table(&fk.referenced_table);

        self.graph.add_edge(from_idx, to_idx, edge.clone());
        self.graph.add_edge(to_idx, from_idx, edge.reversed());
    }

    /// All outgoing edges of `table`, in insertion order. Unknown or
    /// isolated tables yield an empty list, not an error.
    pub fn edges_from(&self, table: &str) -> Vec<FkEdge> {
        let Some(&idx) = self.table_index.get(table) else {
            return Vec::new();
        };
        // petgraph iterates outgoing edges most-recent-first; reverse to
        // restore insertion order so tie-breaks stay introspection-ordered.
        let mut edges: Vec<FkEdge> = self.graph.edges(idx).map(|e| e.weight().clone()).collect();
        edges.reverse();
        edges
    }

    /// Outgoing `(target index, edge)` pairs of a node, insertion-ordered.
    pub(crate) fn outgoing(&self, idx: NodeIndex) -> Vec<(NodeIndex, &FkEdge)> {
        let mut out: Vec<(NodeIndex, &FkEdge)> = self
            .graph
            .edges(idx)
            .map(|e| (e.target(), e.weight()))
            .collect();
        out.reverse();
        out
    }

    pub(crate) fn node_index(&self, table: &str) -> Option<NodeIndex> {
        self.table_index.get(table).copied()
    }

    /// Whether `table` is present as a node.
    pub fn contains_table(&self, table: &str) -> bool {
        self.table_index.contains_key(table)
    }

    /// Semantic type of a column, if the catalog knows it.
    pub fn type_of(&self, table: &str, column: &str) -> Option<&SemanticType> {
        self.catalog.lookup(table, column)
    }

    pub fn catalog(&self) -> &TypeCatalog {
        &self.catalog
    }

    pub fn table_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

/// Shared schema graph: one writer (table registration), many readers
/// (query compilation). Mutations are rare relative to reads, so a
/// plain reader-writer lock is sufficient.
pub type SharedSchemaGraph = Arc<RwLock<SchemaGraph>>;

/// Wrap a built graph for cross-request sharing.
pub fn shared(graph: SchemaGraph) -> SharedSchemaGraph {
    Arc::new(RwLock::new(graph))
}
