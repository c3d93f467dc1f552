//! # Querygraph
//!
//! A schema-graph metadata engine and structured-query compiler.
//!
//! Callers describe a multi-table data request as a structured
//! specification (tables, columns, filters, aggregations, grouping,
//! ordering) instead of hand-written SQL. The crate compiles that
//! specification into executable query text against a relational schema
//! whose table relationships are discovered at runtime.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │              Request Specification                       │
//! │   (tables, attributes, constraints, aggregations, ...)   │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [query term model]
//! ┌─────────────────────────────────────────────────────────┐
//! │        Validated Query Terms (typed, qualified)          │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [join resolver]      ┌──────────────┐
//! ┌───────────────────────────────────────────┐   │ SchemaGraph  │
//! │   Join Path (BFS over foreign-key edges)  │◄──│ + TypeCatalog│
//! └───────────────────────────────────────────┘   └──────────────┘
//!                          │
//!                          ▼ [clause assembler]
//! ┌─────────────────────────────────────────────────────────┐
//! │        SELECT / FROM / JOIN / WHERE / ... text           │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! The graph is built once from schema introspection (via a
//! [`metadata::SchemaProvider`]) and extended additively when new tables
//! are registered mid-session. Query execution, connection management,
//! and authorization are the caller's concern; this crate never touches
//! a live database.

pub mod metadata;
pub mod query;
pub mod sql;

pub use metadata::{
    FkEdge, IntrospectionError, JoinPath, PathError, SchemaGraph, SchemaProvider, SemanticType,
    SharedSchemaGraph, StaticSchemaProvider, TypeCatalog,
};
pub use query::{QueryOptions, QueryTerm, TableSpec, TermError, UpdateSpec, UpdateTerm};
pub use sql::{CompileError, CompileResult, CompiledQuery, QueryCompiler};
