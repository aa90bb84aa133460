//! Type Lattice & Predicates.
//!
//! The structural operations over [`Ty`] used throughout the typer:
//! numeric-ness, equality, and castability (including the inheritance
//! walk needed for an upcast).

use faxc_ast::{CallConv, Prim, Ty};
use faxc_util::FxHashSet;

use crate::type_table::TypeTable;

/// True for the numeric primitives `Int`, `Float`, `Short`; false for
/// everything else, including `Bool`.
pub fn is_numeric(ty: &Ty) -> bool {
    matches!(
        ty,
        Ty::Prim(Prim::Int) | Ty::Prim(Prim::Float) | Ty::Prim(Prim::Short)
    )
}

/// Structural equality: paths segment-wise, tuples elementwise,
/// functions param-wise plus return type plus calling convention.
///
/// `Ty`'s derived `PartialEq` already implements exactly this (it
/// recurses into `Path`, `Vec<Ty>` and the `Func` fields structurally),
/// so this is a named alias for the operation the spec calls out rather
/// than a separate algorithm.
pub fn ty_equal(a: &Ty, b: &Ty) -> bool {
    a == b
}

/// Can a value of type `source` be cast to `target`?
///
/// - Two numeric primitives: always castable.
/// - `Path(P)` to `Path(Q)`: castable if `Q` is `P`'s direct superclass,
///   one of its declared interfaces, or reachable by recursing up `P`'s
///   `extends` chain. The chain walk tracks visited paths so a cyclic
///   `extends` (a malformed program, but one the parser cannot rule out)
///   terminates instead of looping forever.
/// - Anything else: not castable.
pub fn can_cast(table: &TypeTable, source: &Ty, target: &Ty) -> bool {
    if is_numeric(source) && is_numeric(target) {
        return true;
    }
    match (source, target) {
        (Ty::Path(p), Ty::Path(q)) => can_cast_path(table, p, q, &mut FxHashSet::default()),
        _ => false,
    }
}

fn can_cast_path(
    table: &TypeTable,
    from: &faxc_ast::Path,
    to: &faxc_ast::Path,
    visited: &mut FxHashSet<faxc_ast::Path>,
) -> bool {
    if !visited.insert(from.clone()) {
        return false;
    }
    let Some(def) = table.get(from) else {
        return false;
    };
    let faxc_ast::TypeDefKind::Class { extends, implements } = &def.kind else {
        return false;
    };
    if implements.iter().any(|i| i == to) {
        return true;
    }
    match extends {
        Some(s) if s == to => true,
        Some(s) => can_cast_path(table, s, to, visited),
        None => false,
    }
}

/// The function-call calling convention implied by a `CallConv("vararg")`
/// attribute; any other (or absent) value means `Normal`.
pub fn call_conv_from_attr(attr: Option<&str>) -> CallConv {
    match attr {
        Some("vararg") => CallConv::VarArgs,
        _ => CallConv::Normal,
    }
}
