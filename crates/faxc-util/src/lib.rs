//! faxc-util - Core Utilities and Foundation Types
//!
//! This crate provides the foundation types shared by every phase of the
//! compiler: interned identifiers (`Symbol`), typed indices (`Idx` /
//! `IndexVec`), source locations (`Span` / `SourceMap`), globally unique
//! definition ids (`DefId`), and diagnostic reporting (`Handler` /
//! `DiagnosticBuilder`). None of it is phase-specific; the lexer, the AST
//! layer and the semantic core all build on the same handful of types so
//! that a `Span` or a `Symbol` means the same thing everywhere.

pub mod def_id;
pub mod diagnostic;
pub mod error;
pub mod index_vec;
pub mod span;
pub mod symbol;

pub use def_id::{DefId, DefIdGenerator};
pub use diagnostic::{Diagnostic, DiagnosticBuilder, Handler, Level};
pub use error::{DiagnosticError, DiagnosticResult, IndexVecError, IndexVecResult, SourceMapError, SourceMapResult, SymbolError, SymbolResult};
pub use index_vec::{Idx, IndexVec};
pub use span::{FileId, SourceFile, SourceMap, Span};
pub use symbol::Symbol;

// Re-export commonly used hash collections so downstream crates don't need
// a direct `rustc-hash` dependency just to name the type.
pub use rustc_hash::FxHashMap;
pub use rustc_hash::FxHashSet;
