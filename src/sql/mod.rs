//! Clause assembly: compose final query text from validated terms.

mod assembler;
pub mod test_utils;

pub use assembler::{
    AliasIndex, CompileError, CompileResult, CompiledQuery, QueryCompiler,
};
