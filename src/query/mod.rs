//! Request model: wire-facing specifications and validated query terms.
//!
//! A request arrives as an ordered list of per-table [`TableSpec`]
//! fragments plus a global [`QueryOptions`]. Each fragment becomes a
//! [`QueryTerm`] validated against the schema graph, with every column
//! qualified as `table.column` and every constraint value formatted
//! according to its column's semantic type before it can reach the
//! clause assembler.

mod error;
mod request;
mod term;
mod update;

pub use error::{TermError, TermResult};
pub use request::{
    user_table_name, AggregateKind, AggregationSpec, AttributeSpec, ConstraintOp, ConstraintSpec,
    GlobalOrderingSpec, OrderingSpec, QueryOptions, SortDirection, TableSpec,
    UpdateAssignmentSpec, UpdateSpec,
};
pub use term::{Aggregation, Attribute, Constraint, Ordering, QueryTerm};
pub use update::{UpdateAssignment, UpdateTerm};
