//! Typed AST (TAST): the untyped tree plus a resolved type (`ety`) on
//! every expression, with positions retained unchanged from the node
//! that produced them. This is the contract surface codegen consumes,
//! together with the populated [`crate::type_table::TypeTable`].

use faxc_ast::{BinOp, Const, MemberMod, Path, Position, Ty, TypeDefKind, UnOp, Variability};
use faxc_util::Symbol;

/// A single typed expression: its resolved type plus the position of the
/// untyped node it was derived from.
#[derive(Debug, Clone)]
pub struct TExpr {
    pub kind: TExprKind,
    pub ety: Ty,
    pub pos: Position,
}

impl TExpr {
    pub fn new(kind: TExprKind, ety: Ty, pos: Position) -> Self {
        Self { kind, ety, pos }
    }
}

#[derive(Debug, Clone)]
pub enum TExprKind {
    TEThis,
    TESuper,
    TEConst(Const),
    /// `edef` stays `TEIdent(name)` even when the identifier was resolved
    /// by class-name synthesis (i.e. `ety = Class(path)`); only `ety`
    /// distinguishes a static-receiver use from an ordinary variable.
    TEIdent(Symbol),
    TEField(Box<TExpr>, Symbol),
    TEArrayIndex(Box<TExpr>, Box<TExpr>),
    TEBinOp(BinOp, Box<TExpr>, Box<TExpr>),
    TEUnOp(UnOp, Box<TExpr>),
    TEBlock(Vec<TExpr>),
    TECall(Box<TExpr>, Vec<TExpr>),
    TEParen(Box<TExpr>),
    TEIf(Box<TExpr>, Box<TExpr>, Option<Box<TExpr>>),
    TEWhile(Box<TExpr>, Box<TExpr>),
    /// `ety` of the `TEVar` node itself is always `Void`; the bound
    /// name's recorded type (init's type, or the checked-equal
    /// annotation) lives in the scope frame, not on this node.
    TEVar(Variability, Symbol, Box<TExpr>),
    TENew(Path, Vec<TExpr>),
    TETuple(Vec<TExpr>),
    TECast(Box<TExpr>, Ty),
    TEBreak,
    TEContinue,
    TEReturn(Option<Box<TExpr>>),
}

/// A typed member, carrying its final member type `tmty`.
#[derive(Debug, Clone)]
pub enum TypedMember {
    TMVar {
        variability: Variability,
        tmty: Ty,
        init: Option<TExpr>,
    },
    TMFunc {
        tmty: Ty,
        params: Vec<(Symbol, Ty)>,
        body: TExpr,
    },
    TMConstr {
        tmty: Ty,
        params: Vec<(Symbol, Ty)>,
        body: TExpr,
    },
}

impl TypedMember {
    pub fn tmty(&self) -> &Ty {
        match self {
            TypedMember::TMVar { tmty, .. }
            | TypedMember::TMFunc { tmty, .. }
            | TypedMember::TMConstr { tmty, .. } => tmty,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TypedMemberDef {
    pub name: Symbol,
    pub member: TypedMember,
    pub mods: Vec<MemberMod>,
    pub pos: Position,
}

#[derive(Debug, Clone)]
pub struct TypedTypeDef {
    pub path: Path,
    pub kind: TypeDefKind,
    pub mods: Vec<MemberMod>,
    pub members: Vec<TypedMemberDef>,
    pub pos: Position,
}

/// The output of typing one compilation unit: every definition typed,
/// plus the populated Type Table that indexed them.
#[derive(Debug, Clone)]
pub struct TypedModule {
    pub package: Path,
    pub imports: Vec<Path>,
    pub defs: Vec<TypedTypeDef>,
}
