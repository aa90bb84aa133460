//! Hand-built `faxc_ast::Module` samples.
//!
//! This workspace has no lexer or parser, so the driver cannot turn
//! `.fax` source text into an AST itself. These fixtures play the role
//! `base.mo` plays in the source this core is modeled on: small,
//! representative modules built directly as AST values, used by the
//! `check` subcommand's `--fixture` flag and by the integration tests.

use faxc_ast::{
    BinOp, Const, Expr, ExprKind, MemberDef, MemberKind, MemberMod, Module, Param, Path, Position,
    Prim, Ty, TypeDef, TypeDefKind, Variability,
};
use faxc_util::Symbol;

fn pos() -> Position {
    Position::DUMMY
}

fn sym(s: &str) -> Symbol {
    Symbol::intern(s)
}

fn int_lit(i: i64) -> Expr {
    Expr::new(ExprKind::Const(Const::Int(i)), pos())
}

/// All fixtures known to the driver, keyed by the name passed to
/// `--fixture`.
pub const FIXTURE_NAMES: &[&str] = &[
    "base",
    "vararg",
    "bad-super",
    "bad-assign",
    "bad-return",
    "bad-void-var",
];

pub fn by_name(name: &str) -> Option<Module> {
    match name {
        "base" => Some(base()),
        "vararg" => Some(vararg()),
        "bad-super" => Some(bad_super()),
        "bad-assign" => Some(bad_assign()),
        "bad-return" => Some(bad_return()),
        "bad-void-var" => Some(bad_void_var()),
        _ => None,
    }
}

/// `class Base { var a: int; new(x: int, y: int) { this.a = x; } }`
/// `class Main extends Base { new() { super(1, 2); } }`
///
/// Exercises inheritance-aware field resolution and `super` delegation.
pub fn base() -> Module {
    let base_ctor_body = Expr::new(
        ExprKind::BinOp(
            BinOp::Assign,
            Box::new(Expr::new(
                ExprKind::Field(Box::new(Expr::new(ExprKind::This, pos())), sym("a")),
                pos(),
            )),
            Box::new(Expr::new(ExprKind::Ident(sym("x")), pos())),
        ),
        pos(),
    );
    let base = TypeDef {
        path: Path::top_level(sym("Base")),
        kind: TypeDefKind::Class {
            extends: None,
            implements: Vec::new(),
        },
        mods: Vec::new(),
        members: vec![
            MemberDef {
                name: sym("a"),
                kind: MemberKind::Var(Variability::Variable, Some(Ty::Prim(Prim::Int)), None),
                mods: Vec::new(),
                atts: Vec::new(),
                pos: pos(),
            },
            MemberDef {
                name: sym("new"),
                kind: MemberKind::Constr(
                    vec![
                        Param {
                            name: sym("x"),
                            ty: Ty::Prim(Prim::Int),
                        },
                        Param {
                            name: sym("y"),
                            ty: Ty::Prim(Prim::Int),
                        },
                    ],
                    base_ctor_body,
                ),
                mods: Vec::new(),
                atts: Vec::new(),
                pos: pos(),
            },
        ],
        pos: pos(),
    };

    let main_ctor_body = Expr::new(
        ExprKind::Call(
            Box::new(Expr::new(ExprKind::Super, pos())),
            vec![int_lit(1), int_lit(2)],
        ),
        pos(),
    );
    let main = TypeDef {
        path: Path::top_level(sym("Main")),
        kind: TypeDefKind::Class {
            extends: Some(Path::top_level(sym("Base"))),
            implements: Vec::new(),
        },
        mods: Vec::new(),
        members: vec![MemberDef {
            name: sym("new"),
            kind: MemberKind::Constr(Vec::new(), main_ctor_body),
            mods: Vec::new(),
            atts: Vec::new(),
            pos: pos(),
        }],
        pos: pos(),
    };

    Module {
        package: Path::top_level(sym("")),
        imports: Vec::new(),
        defs: vec![base, main],
    }
}

/// `extern static func printf(fmt: string, ...);` called with extra
/// trailing arguments beyond its one checked parameter.
pub fn vararg() -> Module {
    let printf_decl = MemberDef {
        name: sym("printf"),
        kind: MemberKind::Func(
            vec![Param {
                name: sym("fmt"),
                ty: Ty::Prim(Prim::String),
            }],
            Ty::void(),
            Expr::new(ExprKind::Block(Vec::new()), pos()),
        ),
        mods: vec![MemberMod::Static, MemberMod::Extern],
        atts: vec![(sym("CallConv"), Const::String(sym("vararg")))],
        pos: pos(),
    };
    let call = Expr::new(
        ExprKind::Call(
            Box::new(Expr::new(ExprKind::Ident(sym("printf")), pos())),
            vec![
                Expr::new(ExprKind::Const(Const::String(sym("%d"))), pos()),
                int_lit(1),
                int_lit(2),
            ],
        ),
        pos(),
    );
    let main_fn = MemberDef {
        name: sym("main"),
        kind: MemberKind::Func(Vec::new(), Ty::void(), call),
        mods: vec![MemberMod::Static],
        atts: Vec::new(),
        pos: pos(),
    };
    let program = TypeDef {
        path: Path::top_level(sym("Program")),
        kind: TypeDefKind::Struct,
        mods: Vec::new(),
        members: vec![printf_decl, main_fn],
        pos: pos(),
    };

    Module {
        package: Path::top_level(sym("")),
        imports: Vec::new(),
        defs: vec![program],
    }
}

/// `class Base { }` (no constructor) extended by a `Main` whose
/// constructor calls `super(1, 2)` — expected to fail with
/// `NoMatchingConstr`.
pub fn bad_super() -> Module {
    let base = TypeDef {
        path: Path::top_level(sym("Base")),
        kind: TypeDefKind::Class {
            extends: None,
            implements: Vec::new(),
        },
        mods: Vec::new(),
        members: Vec::new(),
        pos: pos(),
    };
    let main_ctor_body = Expr::new(
        ExprKind::Call(
            Box::new(Expr::new(ExprKind::Super, pos())),
            vec![int_lit(1), int_lit(2)],
        ),
        pos(),
    );
    let main = TypeDef {
        path: Path::top_level(sym("Main")),
        kind: TypeDefKind::Class {
            extends: Some(Path::top_level(sym("Base"))),
            implements: Vec::new(),
        },
        mods: Vec::new(),
        members: vec![MemberDef {
            name: sym("new"),
            kind: MemberKind::Constr(Vec::new(), main_ctor_body),
            mods: Vec::new(),
            atts: Vec::new(),
            pos: pos(),
        }],
        pos: pos(),
    };

    Module {
        package: Path::top_level(sym("")),
        imports: Vec::new(),
        defs: vec![base, main],
    }
}

/// `class Base { const a: int; new(a: int) { this.a = a; } }` —
/// expected to fail with `CannotAssign` since `a` is declared constant.
pub fn bad_assign() -> Module {
    let ctor_body = Expr::new(
        ExprKind::BinOp(
            BinOp::Assign,
            Box::new(Expr::new(
                ExprKind::Field(Box::new(Expr::new(ExprKind::This, pos())), sym("a")),
                pos(),
            )),
            Box::new(Expr::new(ExprKind::Ident(sym("a")), pos())),
        ),
        pos(),
    );
    let base = TypeDef {
        path: Path::top_level(sym("Base")),
        kind: TypeDefKind::Class {
            extends: None,
            implements: Vec::new(),
        },
        mods: Vec::new(),
        members: vec![
            MemberDef {
                name: sym("a"),
                kind: MemberKind::Var(Variability::Constant, Some(Ty::Prim(Prim::Int)), None),
                mods: Vec::new(),
                atts: Vec::new(),
                pos: pos(),
            },
            MemberDef {
                name: sym("new"),
                kind: MemberKind::Constr(
                    vec![Param {
                        name: sym("a"),
                        ty: Ty::Prim(Prim::Int),
                    }],
                    ctor_body,
                ),
                mods: Vec::new(),
                atts: Vec::new(),
                pos: pos(),
            },
        ],
        pos: pos(),
    };

    Module {
        package: Path::top_level(sym("")),
        imports: Vec::new(),
        defs: vec![base],
    }
}

/// `struct Program { func f(): int { } }` — an empty body typed as
/// `void`, which does not match the declared `int` return and never
/// executes an explicit `return`. Expected to fail with `NoReturn`.
pub fn bad_return() -> Module {
    let f = MemberDef {
        name: sym("f"),
        kind: MemberKind::Func(
            Vec::new(),
            Ty::Prim(Prim::Int),
            Expr::new(ExprKind::Block(Vec::new()), pos()),
        ),
        mods: Vec::new(),
        atts: Vec::new(),
        pos: pos(),
    };
    let program = TypeDef {
        path: Path::top_level(sym("Program")),
        kind: TypeDefKind::Struct,
        mods: Vec::new(),
        members: vec![f],
        pos: pos(),
    };

    Module {
        package: Path::top_level(sym("")),
        imports: Vec::new(),
        defs: vec![program],
    }
}

/// `struct Program { func f() { var x = null; } }` — `null`'s type is
/// `void`, which is not a legal variable type. Expected to fail with
/// `VoidVar`.
pub fn bad_void_var() -> Module {
    let body = Expr::new(
        ExprKind::Block(vec![Expr::new(
            ExprKind::Var(
                Variability::Variable,
                None,
                sym("x"),
                Box::new(Expr::new(ExprKind::Const(Const::Null), pos())),
            ),
            pos(),
        )]),
        pos(),
    );
    let f = MemberDef {
        name: sym("f"),
        kind: MemberKind::Func(Vec::new(), Ty::void(), body),
        mods: Vec::new(),
        atts: Vec::new(),
        pos: pos(),
    };
    let program = TypeDef {
        path: Path::top_level(sym("Program")),
        kind: TypeDefKind::Struct,
        mods: Vec::new(),
        members: vec![f],
        pos: pos(),
    };

    Module {
        package: Path::top_level(sym("")),
        imports: Vec::new(),
        defs: vec![program],
    }
}
