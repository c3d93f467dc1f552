//! Schema metadata: type catalog, schema graph, and join-path resolution.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        SchemaGraph                              │
//! │  ┌───────────────────────────────────────────────────────────┐  │
//! │  │  TypeCatalog                │  FK edge graph (petgraph)    │  │
//! │  │  (table, column) → type     │  table ──edge──► table       │  │
//! │  └───────────────────────────────────────────────────────────┘  │
//! │        built once via SchemaProvider, extended additively       │
//! └─────────────────────────────────────────────────────────────────┘
//!                           │
//!                           ▼
//!                join_path(a, b)  →  "JOIN t ON a.x=t.y ..."
//! ```
//!
//! The [`SchemaProvider`] trait abstracts over the introspection source:
//! a live `INFORMATION_SCHEMA` behind a connection pool in production,
//! or [`StaticSchemaProvider`] for synthetic schemas in tests.

mod catalog;
mod graph;
mod paths;
mod provider;
mod types;

pub use catalog::TypeCatalog;
pub use graph::{shared, FkEdge, SchemaGraph, SharedSchemaGraph, TableNode};
pub use paths::{JoinPath, JoinStep, PathError, PathResult};
pub use provider::{
    IntrospectionError, IntrospectionResult, SchemaProvider, StaticSchemaProvider,
};
pub use types::{ColumnDef, ForeignKeyDef, SemanticType};
