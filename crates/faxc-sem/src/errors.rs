//! Error taxonomy for the semantic core.
//!
//! A single error variant carries a `kind` and a `Position`; the taxonomy
//! is stable so that callers (tests, the driver's diagnostic reporting)
//! can match on `kind` without parsing messages. Human-readable rendering
//! goes through one formatter, [`SemaError`]'s `Display` impl.

use faxc_ast::{BinOp, Path, Position, Ty, UnOp};
use faxc_util::Symbol;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum SemaErrorKind {
    #[error("unresolved identifier `{0}`")]
    UnresolvedIdent(String),

    #[error("unresolved path `{0}`")]
    UnresolvedPath(Path),

    #[error("`this` used outside of a class")]
    UnresolvedThis,

    #[error("`super` used without an enclosing `extends`")]
    UnresolvedSuper,

    #[error("no member `{1}` on type `{0}`")]
    UnresolvedField(Ty, String),

    #[error("cannot access a member on non-object type `{0}`")]
    CannotField(Ty),

    #[error("field `{0}` has neither a type annotation nor an initializer")]
    UnresolvedFieldType(String),

    #[error("operator `{op:?}` is not defined for `{lhs}` and `{rhs}`")]
    CannotBinOp { op: BinOp, lhs: Ty, rhs: Ty },

    #[error("operator `{op:?}` is not defined for `{ty}`")]
    CannotUnOp { op: UnOp, ty: Ty },

    #[error("cannot assign to a constant binding")]
    CannotAssign,

    #[error("invalid assignment target")]
    InvalidLHS,

    #[error("cannot call a value of non-function type `{0}`")]
    CannotCall(Ty),

    #[error("cannot index a non-tuple, or index by a non-constant expression")]
    CannotIndex,

    #[error("cannot cast `{0}` to the requested type")]
    CannotCastTo(Ty),

    #[error("expected `{wanted}`, found `{got}`")]
    Expected { wanted: Ty, got: Ty },

    #[error("no constructor on `{path}` matches the given argument types")]
    NoMatchingConstr { path: Path, arg_tys: Vec<Ty> },

    #[error("call arguments do not match `{callee}`'s parameters")]
    FunctionArgsMismatch {
        callee: Ty,
        wanted: Vec<Ty>,
        got: Vec<Ty>,
    },

    #[error("function body type does not match the declared return type, and no explicit `return` covers every path")]
    NoReturn,

    #[error("variable or field type resolves to `void`")]
    VoidVar,

    #[error("duplicate type path `{0}` in the type table")]
    DuplicateTypePath(Path),
}

#[derive(Debug, Clone, Error)]
#[error("{kind} at {pos:?}")]
pub struct SemaError {
    pub kind: SemaErrorKind,
    pub pos: Position,
}

impl SemaError {
    pub fn new(kind: SemaErrorKind, pos: Position) -> Self {
        Self { kind, pos }
    }

    pub fn unresolved_ident(name: Symbol, pos: Position) -> Self {
        Self::new(SemaErrorKind::UnresolvedIdent(name.as_str().to_string()), pos)
    }
}

pub type SemaResult<T> = Result<T, SemaError>;
