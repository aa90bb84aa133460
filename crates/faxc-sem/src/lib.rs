//! faxc-sem — semantic analysis and typing core.
//!
//! This crate consumes the untyped AST `faxc-ast` defines and produces a
//! fully-typed tree (the TAST in [`tast`]) in which every expression
//! carries a resolved type, every identifier is bound to a declaration,
//! and every field/constructor selection is resolved to a concrete
//! member of a concrete type.
//!
//! The crate is organized leaves-first, matching the four cooperating
//! components of the core:
//!
//! - [`predicates`] — the type lattice and its structural predicates
//!   (`is_numeric`, `ty_equal`, `can_cast`).
//! - [`type_table`] — the `path -> TypeDef` map, populated once per
//!   module before any member body is typed.
//! - [`scope`] — the scope stack and the ambient typing context
//!   (`this`, static/constructor flags, has-returned).
//! - The [`Typer`] in this module — the recursive expression/member
//!   checker that ties the other three together.
//!
//! The single entry point is [`type_module`]: index every top-level type
//! declaration, then type each one in turn, collecting one [`SemaError`]
//! per definition that fails rather than aborting the whole module (the
//! core itself still aborts a *single* definition's typing at its first
//! error, per the fail-fast rule in the spec's concurrency section).

pub mod errors;
pub mod predicates;
pub mod scope;
pub mod tast;
pub mod type_table;

pub use errors::{SemaError, SemaErrorKind, SemaResult};
pub use predicates::{can_cast, call_conv_from_attr, is_numeric, ty_equal};
pub use scope::{Context, ScopeStack};
pub use tast::{TExpr, TExprKind, TypedMember, TypedMemberDef, TypedModule, TypedTypeDef};
pub use type_table::TypeTable;

use faxc_ast::{
    BinOp, CallConv, Const, Expr, ExprKind, MemberDef, MemberKind, MemberMod, Module, Param, Path,
    Position, Ty, TypeDef, TypeDefKind, UnOp, Variability,
};
use faxc_util::Symbol;

/// Types one compilation unit.
///
/// Indexes every top-level type declaration first (so intra-module
/// references resolve regardless of declaration order), then types each
/// definition. A definition whose typing fails is skipped — its error is
/// recorded in the returned `Vec<SemaError>` — so the caller sees every
/// definition's diagnostics in one pass instead of stopping at the first.
/// A module-level indexing failure (a duplicate type path) aborts before
/// any definition is typed, since every later lookup depends on the
/// table being complete.
pub fn type_module(module: &Module) -> (TypedModule, TypeTable, Vec<SemaError>) {
    let mut table = TypeTable::new();
    if let Err(e) = table.index_module(module) {
        return (
            TypedModule {
                package: module.package.clone(),
                imports: module.imports.clone(),
                defs: Vec::new(),
            },
            table,
            vec![e],
        );
    }

    let mut defs = Vec::new();
    let mut errors = Vec::new();
    {
        let mut typer = Typer::new(&table);
        for def in &module.defs {
            match typer.type_type_def(def) {
                Ok(typed) => defs.push(typed),
                Err(e) => errors.push(e),
            }
        }
    }

    (
        TypedModule {
            package: module.package.clone(),
            imports: module.imports.clone(),
            defs,
        },
        table,
        errors,
    )
}

/// The recursive expression/member checker. Holds the type table
/// (read-only for the whole typer's lifetime), the scope stack, and the
/// ambient context flags described in the spec's Scope Stack & Context
/// component.
pub struct Typer<'a> {
    table: &'a TypeTable,
    scope: ScopeStack,
    ctx: Context,
}

impl<'a> Typer<'a> {
    pub fn new(table: &'a TypeTable) -> Self {
        Self {
            table,
            scope: ScopeStack::new(),
            ctx: Context::new(),
        }
    }

    // ------------------------------------------------------------------
    // Type-definition and member typing
    // ------------------------------------------------------------------

    /// Types one top-level type declaration: sets `this_path`, then types
    /// each member in declaration order.
    pub fn type_type_def(&mut self, def: &TypeDef) -> SemaResult<TypedTypeDef> {
        self.ctx.this_path = Some(def.path.clone());

        let mut members = Vec::with_capacity(def.members.len());
        for member in &def.members {
            let typed = self.type_member(&def.path, member)?;
            members.push(TypedMemberDef {
                name: member.name,
                member: typed,
                mods: member.mods.clone(),
                pos: member.pos,
            });
        }

        Ok(TypedTypeDef {
            path: def.path.clone(),
            kind: def.kind.clone(),
            mods: def.mods.clone(),
            members,
            pos: def.pos,
        })
    }

    fn type_member(&mut self, _owner: &Path, member: &MemberDef) -> SemaResult<TypedMember> {
        self.ctx.enter_member(member.has_mod(MemberMod::Static));

        match &member.kind {
            MemberKind::Func(params, ret, body) => {
                self.scope.push_scope();
                for p in params {
                    self.scope.bind(p.name, Variability::Constant, p.ty.clone());
                }
                let t_body = self.type_expr(body);
                self.scope.pop_scope();
                let t_body = t_body?;

                if !ty_equal(&t_body.ety, ret) && !self.ctx.has_returned {
                    return Err(SemaError::new(SemaErrorKind::NoReturn, body.pos));
                }

                let conv = call_conv_from_attr(call_conv_attr_str(member));
                let tmty = Ty::func(params.iter().map(|p| p.ty.clone()).collect(), ret.clone(), conv);
                Ok(TypedMember::TMFunc {
                    tmty,
                    params: params.iter().map(|p| (p.name, p.ty.clone())).collect(),
                    body: t_body,
                })
            }
            MemberKind::Constr(params, body) => {
                self.scope.push_scope();
                self.ctx.in_constructor = true;
                for p in params {
                    self.scope.bind(p.name, Variability::Constant, p.ty.clone());
                }
                let t_body = self.type_expr(body);
                self.scope.pop_scope();
                let t_body = t_body?;

                let tmty = Ty::func(
                    params.iter().map(|p| p.ty.clone()).collect(),
                    Ty::void(),
                    CallConv::Normal,
                );
                Ok(TypedMember::TMConstr {
                    tmty,
                    params: params.iter().map(|p| (p.name, p.ty.clone())).collect(),
                    body: t_body,
                })
            }
            MemberKind::Var(v, Some(t), None) => {
                check_not_void(t, member.pos)?;
                Ok(TypedMember::TMVar {
                    variability: *v,
                    tmty: t.clone(),
                    init: None,
                })
            }
            MemberKind::Var(v, ann, Some(init)) => {
                let t_init = self.type_expr(init)?;
                if let Some(t) = ann {
                    if !ty_equal(t, &t_init.ety) {
                        return Err(SemaError::new(
                            SemaErrorKind::Expected {
                                wanted: t.clone(),
                                got: t_init.ety.clone(),
                            },
                            member.pos,
                        ));
                    }
                }
                check_not_void(&t_init.ety, member.pos)?;
                Ok(TypedMember::TMVar {
                    variability: *v,
                    tmty: t_init.ety.clone(),
                    init: Some(t_init),
                })
            }
            MemberKind::Var(_, None, None) => Err(SemaError::new(
                SemaErrorKind::UnresolvedFieldType(member.name.as_str().to_string()),
                member.pos,
            )),
        }
    }

    // ------------------------------------------------------------------
    // Member resolution (field lookup, inheritance-aware)
    // ------------------------------------------------------------------

    /// Finds the declared member named `name` on `path`, walking the
    /// `extends` chain child-first. Returns the member declaration plus
    /// the path of the type that actually declares it.
    fn find_member_decl(&self, path: &Path, name: Symbol) -> Option<(&'a MemberDef, Path)> {
        let def = self.table.get(path)?;
        if let Some(m) = def.members.iter().find(|m| m.name == name) {
            return Some((m, path.clone()));
        }
        if let TypeDefKind::Class {
            extends: Some(s), ..
        } = &def.kind
        {
            return self.find_member_decl(s, name);
        }
        None
    }

    /// `resolve_field`: inheritance-aware lookup used by `Field` typing
    /// and by `find_var`'s step 2 (member resolution on `this`).
    fn resolve_field(&mut self, ty: &Ty, name: Symbol, pos: Position) -> SemaResult<(Variability, Ty)> {
        let Some(path) = ty.underlying_path() else {
            return Err(SemaError::new(SemaErrorKind::CannotField(ty.clone()), pos));
        };
        if self.table.get(path).is_none() {
            return Err(SemaError::new(
                SemaErrorKind::UnresolvedPath(path.clone()),
                pos,
            ));
        }
        let Some((member, owner)) = self.find_member_decl(path, name) else {
            return Err(SemaError::new(
                SemaErrorKind::UnresolvedField(ty.clone(), name.as_str().to_string()),
                pos,
            ));
        };
        self.member_sig(&owner, member)
    }

    /// Member type extraction (spec 4.4): the `(variability, type)` pair
    /// implied by a member declaration. For a field with no annotation,
    /// this types the field's own initializer — in the owning type's
    /// context, not the caller's — to recover its type.
    fn member_sig(&mut self, owner: &Path, member: &'a MemberDef) -> SemaResult<(Variability, Ty)> {
        match &member.kind {
            MemberKind::Var(v, Some(t), _) => Ok((*v, t.clone())),
            MemberKind::Var(v, None, Some(init)) => {
                let is_static = member.has_mod(MemberMod::Static);
                let t_init = self.type_expr_as_owner(owner, is_static, init)?;
                Ok((*v, t_init.ety))
            }
            MemberKind::Var(_, None, None) => Err(SemaError::new(
                SemaErrorKind::UnresolvedFieldType(member.name.as_str().to_string()),
                member.pos,
            )),
            MemberKind::Func(params, ret, _) => {
                let conv = call_conv_from_attr(call_conv_attr_str(member));
                Ok((
                    Variability::Constant,
                    Ty::func(params.iter().map(|p| p.ty.clone()).collect(), ret.clone(), conv),
                ))
            }
            MemberKind::Constr(params, _) => Ok((
                Variability::Constant,
                Ty::func(
                    params.iter().map(|p| p.ty.clone()).collect(),
                    Ty::void(),
                    CallConv::Normal,
                ),
            )),
        }
    }

    /// Types `expr` as if `owner` were the enclosing type, restoring this
    /// typer's previous context afterwards. Used only by `member_sig`
    /// when a field's type must be recovered from an initializer that
    /// lives on a type other than the one currently being typed.
    fn type_expr_as_owner(&mut self, owner: &Path, is_static: bool, expr: &Expr) -> SemaResult<TExpr> {
        let saved_this = self.ctx.this_path.clone();
        let saved_static = self.ctx.in_static;
        let saved_ctor = self.ctx.in_constructor;
        let saved_ret = self.ctx.has_returned;

        self.ctx.this_path = Some(owner.clone());
        self.ctx.in_static = is_static;
        self.ctx.in_constructor = false;
        self.ctx.has_returned = false;

        let result = self.type_expr(expr);

        self.ctx.this_path = saved_this;
        self.ctx.in_static = saved_static;
        self.ctx.in_constructor = saved_ctor;
        self.ctx.has_returned = saved_ret;

        result
    }

    /// `find_var` (spec 4.3): scope stack, then member resolution on
    /// `this`, then class-name synthesis, then `UnresolvedIdent`.
    fn find_var(&mut self, name: Symbol, pos: Position) -> SemaResult<(Variability, Ty)> {
        if let Some((v, t)) = self.scope.find(name) {
            return Ok((*v, t.clone()));
        }
        if let Some(this_path) = self.ctx.this_path.clone() {
            if let Ok(hit) = self.resolve_field(&Ty::Path(this_path), name, pos) {
                return Ok(hit);
            }
        }
        if self.table.contains(&Path::top_level(name)) {
            return Ok((Variability::Constant, Ty::Class(Path::top_level(name))));
        }
        Err(SemaError::unresolved_ident(name, pos))
    }

    // ------------------------------------------------------------------
    // The expression recursion
    // ------------------------------------------------------------------

    pub fn type_expr(&mut self, e: &Expr) -> SemaResult<TExpr> {
        match &e.kind {
            ExprKind::This => self.type_this(e.pos),
            ExprKind::Super => self.type_super(e.pos),
            ExprKind::Const(c) => Ok(type_const(c, e.pos)),
            ExprKind::Ident(name) => {
                let (_, ty) = self.find_var(*name, e.pos)?;
                Ok(TExpr::new(TExprKind::TEIdent(*name), ty, e.pos))
            }
            ExprKind::Field(obj, name) => {
                let t_obj = self.type_expr(obj)?;
                let (_, ty) = self.resolve_field(&t_obj.ety, *name, e.pos)?;
                Ok(TExpr::new(TExprKind::TEField(Box::new(t_obj), *name), ty, e.pos))
            }
            ExprKind::ArrayIndex(obj, idx) => self.type_array_index(obj, idx, e.pos),
            ExprKind::BinOp(op, a, b) => self.type_binop(*op, a, b, e.pos),
            ExprKind::UnOp(op, a) => self.type_unop(*op, a, e.pos),
            ExprKind::Block(exprs) => self.type_block(exprs, e.pos),
            ExprKind::Call(callee, args) => self.type_call(callee, args, e.pos),
            ExprKind::Paren(inner) => {
                let t_inner = self.type_expr(inner)?;
                let ety = t_inner.ety.clone();
                Ok(TExpr::new(TExprKind::TEParen(Box::new(t_inner)), ety, e.pos))
            }
            ExprKind::If(cond, then, else_) => self.type_if(cond, then, else_.as_deref(), e.pos),
            ExprKind::While(cond, body) => self.type_while(cond, body, e.pos),
            ExprKind::Var(v, ann, name, init) => self.type_var_decl(*v, ann.as_ref(), *name, init, e.pos),
            ExprKind::New(path, args) => self.type_new(path, args, e.pos),
            ExprKind::Tuple(items) => {
                let t_items = items
                    .iter()
                    .map(|i| self.type_expr(i))
                    .collect::<SemaResult<Vec<_>>>()?;
                let ety = Ty::Tuple(t_items.iter().map(|i| i.ety.clone()).collect());
                Ok(TExpr::new(TExprKind::TETuple(t_items), ety, e.pos))
            }
            ExprKind::Cast(inner, target) => {
                let t_inner = self.type_expr(inner)?;
                if !can_cast(self.table, &t_inner.ety, target) {
                    return Err(SemaError::new(
                        SemaErrorKind::CannotCastTo(target.clone()),
                        e.pos,
                    ));
                }
                Ok(TExpr::new(
                    TExprKind::TECast(Box::new(t_inner), target.clone()),
                    target.clone(),
                    e.pos,
                ))
            }
            ExprKind::Break => Ok(TExpr::new(TExprKind::TEBreak, Ty::void(), e.pos)),
            ExprKind::Continue => Ok(TExpr::new(TExprKind::TEContinue, Ty::void(), e.pos)),
            ExprKind::Return(payload) => {
                self.ctx.has_returned = true;
                let t_payload = payload.as_deref().map(|p| self.type_expr(p)).transpose()?;
                Ok(TExpr::new(
                    TExprKind::TEReturn(t_payload.map(Box::new)),
                    Ty::void(),
                    e.pos,
                ))
            }
        }
    }

    fn type_this(&self, pos: Position) -> SemaResult<TExpr> {
        let path = self
            .ctx
            .this_path
            .clone()
            .ok_or_else(|| SemaError::new(SemaErrorKind::UnresolvedThis, pos))?;
        Ok(TExpr::new(TExprKind::TEThis, Ty::Path(path), pos))
    }

    fn type_super(&self, pos: Position) -> SemaResult<TExpr> {
        let path = self
            .ctx
            .this_path
            .as_ref()
            .ok_or_else(|| SemaError::new(SemaErrorKind::UnresolvedSuper, pos))?;
        let def = self
            .table
            .get(path)
            .ok_or_else(|| SemaError::new(SemaErrorKind::UnresolvedSuper, pos))?;
        match &def.kind {
            TypeDefKind::Class {
                extends: Some(s), ..
            } => Ok(TExpr::new(TExprKind::TESuper, Ty::Path(s.clone()), pos)),
            _ => Err(SemaError::new(SemaErrorKind::UnresolvedSuper, pos)),
        }
    }

    fn type_array_index(&mut self, obj: &Expr, idx: &Expr, pos: Position) -> SemaResult<TExpr> {
        let t_obj = self.type_expr(obj)?;
        let Ty::Tuple(tys) = &t_obj.ety else {
            return Err(SemaError::new(SemaErrorKind::CannotIndex, pos));
        };
        let ExprKind::Const(Const::Int(k)) = &idx.kind else {
            return Err(SemaError::new(SemaErrorKind::CannotIndex, pos));
        };
        let k = *k;
        if k < 0 || (k as usize) >= tys.len() {
            return Err(SemaError::new(SemaErrorKind::CannotIndex, pos));
        }
        let ety = tys[k as usize].clone();
        let t_idx = self.type_expr(idx)?;
        Ok(TExpr::new(
            TExprKind::TEArrayIndex(Box::new(t_obj), Box::new(t_idx)),
            ety,
            pos,
        ))
    }

    /// Types an assignment target. `Ident` and `Field` are the only
    /// valid forms; anything else is `InvalidLHS` before either side is
    /// even typed against the other.
    fn type_lvalue(&mut self, e: &Expr) -> SemaResult<(TExpr, Variability)> {
        match &e.kind {
            ExprKind::Ident(name) => {
                let (v, ty) = self.find_var(*name, e.pos)?;
                Ok((TExpr::new(TExprKind::TEIdent(*name), ty, e.pos), v))
            }
            ExprKind::Field(obj, name) => {
                let t_obj = self.type_expr(obj)?;
                let (v, ty) = self.resolve_field(&t_obj.ety, *name, e.pos)?;
                Ok((
                    TExpr::new(TExprKind::TEField(Box::new(t_obj), *name), ty, e.pos),
                    v,
                ))
            }
            _ => Err(SemaError::new(SemaErrorKind::InvalidLHS, e.pos)),
        }
    }

    fn type_binop(&mut self, op: BinOp, a: &Expr, b: &Expr, pos: Position) -> SemaResult<TExpr> {
        if op.is_assign() {
            let (t_lhs, variability) = self.type_lvalue(a)?;
            if variability != Variability::Variable {
                return Err(SemaError::new(SemaErrorKind::CannotAssign, a.pos));
            }
            let t_rhs = self.type_expr(b)?;
            if !ty_equal(&t_lhs.ety, &t_rhs.ety) {
                return Err(SemaError::new(
                    SemaErrorKind::CannotBinOp {
                        op,
                        lhs: t_lhs.ety.clone(),
                        rhs: t_rhs.ety.clone(),
                    },
                    pos,
                ));
            }
            let ety = t_lhs.ety.clone();
            return Ok(TExpr::new(
                TExprKind::TEBinOp(op, Box::new(t_lhs), Box::new(t_rhs)),
                ety,
                pos,
            ));
        }

        let t_a = self.type_expr(a)?;
        let t_b = self.type_expr(b)?;
        let ety = match op {
            BinOp::Add | BinOp::Sub | BinOp::Mul | BinOp::Div => {
                if !is_numeric(&t_a.ety) || !is_numeric(&t_b.ety) || !ty_equal(&t_a.ety, &t_b.ety) {
                    return Err(SemaError::new(
                        SemaErrorKind::CannotBinOp {
                            op,
                            lhs: t_a.ety.clone(),
                            rhs: t_b.ety.clone(),
                        },
                        pos,
                    ));
                }
                t_a.ety.clone()
            }
            BinOp::Eq | BinOp::Lt => {
                if !ty_equal(&t_a.ety, &t_b.ety) {
                    return Err(SemaError::new(
                        SemaErrorKind::CannotBinOp {
                            op,
                            lhs: t_a.ety.clone(),
                            rhs: t_b.ety.clone(),
                        },
                        pos,
                    ));
                }
                Ty::bool_()
            }
            BinOp::Assign => unreachable!("handled above"),
        };
        Ok(TExpr::new(
            TExprKind::TEBinOp(op, Box::new(t_a), Box::new(t_b)),
            ety,
            pos,
        ))
    }

    fn type_unop(&mut self, op: UnOp, a: &Expr, pos: Position) -> SemaResult<TExpr> {
        let t_a = self.type_expr(a)?;
        let ok = match op {
            UnOp::Neg => is_numeric(&t_a.ety),
            UnOp::Not => ty_equal(&t_a.ety, &Ty::bool_()),
        };
        if !ok {
            return Err(SemaError::new(
                SemaErrorKind::CannotUnOp {
                    op,
                    ty: t_a.ety.clone(),
                },
                pos,
            ));
        }
        let ety = t_a.ety.clone();
        Ok(TExpr::new(TExprKind::TEUnOp(op, Box::new(t_a)), ety, pos))
    }

    fn type_block(&mut self, exprs: &[Expr], pos: Position) -> SemaResult<TExpr> {
        let t_exprs = exprs
            .iter()
            .map(|e| self.type_expr(e))
            .collect::<SemaResult<Vec<_>>>()?;
        let ety = t_exprs.last().map(|e| e.ety.clone()).unwrap_or_else(Ty::void);
        Ok(TExpr::new(TExprKind::TEBlock(t_exprs), ety, pos))
    }

    fn type_if(
        &mut self,
        cond: &Expr,
        then: &Expr,
        else_: Option<&Expr>,
        pos: Position,
    ) -> SemaResult<TExpr> {
        let t_cond = self.type_expr(cond)?;
        if !ty_equal(&t_cond.ety, &Ty::bool_()) {
            return Err(SemaError::new(
                SemaErrorKind::Expected {
                    wanted: Ty::bool_(),
                    got: t_cond.ety.clone(),
                },
                cond.pos,
            ));
        }
        let t_then = self.type_expr(then)?;
        let ety = t_then.ety.clone();
        let t_else = else_.map(|e| self.type_expr(e)).transpose()?;
        Ok(TExpr::new(
            TExprKind::TEIf(Box::new(t_cond), Box::new(t_then), t_else.map(Box::new)),
            ety,
            pos,
        ))
    }

    fn type_while(&mut self, cond: &Expr, body: &Expr, pos: Position) -> SemaResult<TExpr> {
        let t_cond = self.type_expr(cond)?;
        if !ty_equal(&t_cond.ety, &Ty::bool_()) {
            return Err(SemaError::new(
                SemaErrorKind::Expected {
                    wanted: Ty::bool_(),
                    got: t_cond.ety.clone(),
                },
                cond.pos,
            ));
        }
        let t_body = self.type_expr(body)?;
        Ok(TExpr::new(
            TExprKind::TEWhile(Box::new(t_cond), Box::new(t_body)),
            Ty::void(),
            pos,
        ))
    }

    fn type_var_decl(
        &mut self,
        v: Variability,
        ann: Option<&Ty>,
        name: Symbol,
        init: &Expr,
        pos: Position,
    ) -> SemaResult<TExpr> {
        let t_init = self.type_expr(init)?;
        if let Some(t) = ann {
            if !ty_equal(t, &t_init.ety) {
                return Err(SemaError::new(
                    SemaErrorKind::Expected {
                        wanted: t.clone(),
                        got: t_init.ety.clone(),
                    },
                    pos,
                ));
            }
        }
        check_not_void(&t_init.ety, pos)?;
        self.scope.bind(name, v, t_init.ety.clone());
        Ok(TExpr::new(
            TExprKind::TEVar(v, name, Box::new(t_init)),
            Ty::void(),
            pos,
        ))
    }

    fn type_call(&mut self, callee: &Expr, args: &[Expr], pos: Position) -> SemaResult<TExpr> {
        if matches!(callee.kind, ExprKind::Super) {
            return self.type_super_call(args, callee.pos, pos);
        }

        let t_callee = self.type_expr(callee)?;
        let Ty::Func { params, ret, conv } = &t_callee.ety else {
            return Err(SemaError::new(
                SemaErrorKind::CannotCall(t_callee.ety.clone()),
                callee.pos,
            ));
        };
        let params = params.clone();
        let ret = (**ret).clone();
        let conv = *conv;

        let t_args = args
            .iter()
            .map(|a| self.type_expr(a))
            .collect::<SemaResult<Vec<_>>>()?;
        let arg_tys: Vec<Ty> = t_args.iter().map(|a| a.ety.clone()).collect();

        let matches = match conv {
            CallConv::Normal => {
                arg_tys.len() == params.len()
                    && arg_tys.iter().zip(&params).all(|(a, p)| ty_equal(a, p))
            }
            CallConv::VarArgs => {
                arg_tys.len() >= params.len()
                    && arg_tys
                        .iter()
                        .zip(&params)
                        .all(|(a, p)| ty_equal(a, p))
            }
        };
        if !matches {
            return Err(SemaError::new(
                SemaErrorKind::FunctionArgsMismatch {
                    callee: t_callee.ety.clone(),
                    wanted: params,
                    got: arg_tys,
                },
                pos,
            ));
        }

        Ok(TExpr::new(
            TExprKind::TECall(Box::new(t_callee), t_args),
            ret,
            pos,
        ))
    }

    fn type_super_call(&mut self, args: &[Expr], callee_pos: Position, pos: Position) -> SemaResult<TExpr> {
        let this_path = self
            .ctx
            .this_path
            .clone()
            .ok_or_else(|| SemaError::new(SemaErrorKind::UnresolvedSuper, callee_pos))?;
        let def = self
            .table
            .get(&this_path)
            .ok_or_else(|| SemaError::new(SemaErrorKind::UnresolvedSuper, callee_pos))?;
        let TypeDefKind::Class {
            extends: Some(super_path),
            ..
        } = &def.kind
        else {
            return Err(SemaError::new(SemaErrorKind::UnresolvedSuper, callee_pos));
        };
        let super_path = super_path.clone();

        let t_args = args
            .iter()
            .map(|a| self.type_expr(a))
            .collect::<SemaResult<Vec<_>>>()?;
        let arg_tys: Vec<Ty> = t_args.iter().map(|a| a.ety.clone()).collect();

        let ctor = self
            .table
            .get(&super_path)
            .into_iter()
            .flat_map(|d| d.members.iter())
            .find(|m| matches!(&m.kind, MemberKind::Constr(ps, _) if param_tys_match(ps, &arg_tys)));

        if ctor.is_none() {
            return Err(SemaError::new(
                SemaErrorKind::NoMatchingConstr {
                    path: super_path,
                    arg_tys,
                },
                pos,
            ));
        }

        let t_callee = TExpr::new(TExprKind::TESuper, Ty::Path(super_path), callee_pos);
        Ok(TExpr::new(
            TExprKind::TECall(Box::new(t_callee), t_args),
            Ty::void(),
            pos,
        ))
    }

    fn type_new(&mut self, path: &Path, args: &[Expr], pos: Position) -> SemaResult<TExpr> {
        let def = self.table.lookup(path, pos)?;
        let t_args = args
            .iter()
            .map(|a| self.type_expr(a))
            .collect::<SemaResult<Vec<_>>>()?;
        let arg_tys: Vec<Ty> = t_args.iter().map(|a| a.ety.clone()).collect();

        let ctor_found = def
            .members
            .iter()
            .any(|m| matches!(&m.kind, MemberKind::Constr(ps, _) if param_tys_match(ps, &arg_tys)));

        if !ctor_found {
            return Err(SemaError::new(
                SemaErrorKind::NoMatchingConstr {
                    path: path.clone(),
                    arg_tys,
                },
                pos,
            ));
        }

        Ok(TExpr::new(
            TExprKind::TENew(path.clone(), t_args),
            Ty::Path(path.clone()),
            pos,
        ))
    }
}

fn param_tys_match(params: &[Param], arg_tys: &[Ty]) -> bool {
    params.len() == arg_tys.len()
        && params.iter().zip(arg_tys).all(|(p, a)| ty_equal(&p.ty, a))
}

fn call_conv_attr_str(member: &MemberDef) -> Option<&str> {
    match member.attr(Symbol::intern("CallConv"))? {
        Const::String(s) => Some(s.as_str()),
        _ => None,
    }
}

fn check_not_void(ty: &Ty, pos: Position) -> SemaResult<()> {
    if ty_equal(ty, &Ty::void()) {
        Err(SemaError::new(SemaErrorKind::VoidVar, pos))
    } else {
        Ok(())
    }
}

fn type_const(c: &Const, pos: Position) -> TExpr {
    let ty = match c {
        Const::Int(_) => Ty::Prim(faxc_ast::Prim::Int),
        Const::Float(_) => Ty::Prim(faxc_ast::Prim::Float),
        Const::String(_) => Ty::Prim(faxc_ast::Prim::String),
        Const::Bool(_) => Ty::Prim(faxc_ast::Prim::Bool),
        Const::Null => Ty::void(),
    };
    TExpr::new(TExprKind::TEConst(c.clone()), ty, pos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use faxc_ast::{LineCol, MemberMod, Position};

    fn pos() -> Position {
        Position::DUMMY
    }

    fn sym(s: &str) -> Symbol {
        Symbol::intern(s)
    }

    fn const_expr(c: Const) -> Expr {
        Expr::new(ExprKind::Const(c), pos())
    }

    fn int_lit(i: i64) -> Expr {
        const_expr(Const::Int(i))
    }

    fn base_main_module() -> Module {
        // class Base { var a: int; new(x: int, y: int) { this.a = x; } }
        // class Main extends Base { new() { super(1, 2); } }
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
                    kind: MemberKind::Var(Variability::Variable, Some(Ty::Prim(faxc_ast::Prim::Int)), None),
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
                                ty: Ty::Prim(faxc_ast::Prim::Int),
                            },
                            Param {
                                name: sym("y"),
                                ty: Ty::Prim(faxc_ast::Prim::Int),
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

    #[test]
    fn inherited_field_assignment_resolves_through_extends() {
        let module = base_main_module();
        let (typed, _table, errors) = type_module(&module);
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
        assert_eq!(typed.defs.len(), 2);
    }

    #[test]
    fn super_call_with_no_matching_constructor_is_rejected() {
        // class Base { } (no ctor with two ints)
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
        let module = Module {
            package: Path::top_level(sym("")),
            imports: Vec::new(),
            defs: vec![base, main],
        };
        let (_typed, _table, errors) = type_module(&module);
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            errors[0].kind,
            SemaErrorKind::NoMatchingConstr { .. }
        ));
    }

    #[test]
    fn assigning_to_a_constant_field_is_rejected() {
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
                    kind: MemberKind::Var(Variability::Constant, Some(Ty::Prim(faxc_ast::Prim::Int)), None),
                    mods: Vec::new(),
                    atts: Vec::new(),
                    pos: pos(),
                },
                MemberDef {
                    name: sym("new"),
                    kind: MemberKind::Constr(
                        vec![Param {
                            name: sym("a"),
                            ty: Ty::Prim(faxc_ast::Prim::Int),
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
        let module = Module {
            package: Path::top_level(sym("")),
            imports: Vec::new(),
            defs: vec![base],
        };
        let (_typed, _table, errors) = type_module(&module);
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0].kind, SemaErrorKind::CannotAssign));
    }

    #[test]
    fn missing_return_is_rejected_empty_body_accepted_then_only() {
        // func f(): int { } -- body is Void, no return -> NoReturn
        let f = MemberDef {
            name: sym("f"),
            kind: MemberKind::Func(Vec::new(), Ty::Prim(faxc_ast::Prim::Int), Expr::new(ExprKind::Block(Vec::new()), pos())),
            mods: Vec::new(),
            atts: Vec::new(),
            pos: pos(),
        };
        let owner = TypeDef {
            path: Path::top_level(sym("S")),
            kind: TypeDefKind::Struct,
            mods: Vec::new(),
            members: vec![f],
            pos: pos(),
        };
        let module = Module {
            package: Path::top_level(sym("")),
            imports: Vec::new(),
            defs: vec![owner],
        };
        let (_typed, _table, errors) = type_module(&module);
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0].kind, SemaErrorKind::NoReturn));
    }

    #[test]
    fn if_without_else_takes_the_then_branch_type() {
        // func f(): int { if true { 1 } } -- accepted, block type is Int (then-branch)
        let body = Expr::new(
            ExprKind::Block(vec![Expr::new(
                ExprKind::If(
                    Box::new(Expr::new(ExprKind::Const(Const::Bool(true)), pos())),
                    Box::new(Expr::new(ExprKind::Block(vec![int_lit(1)]), pos())),
                    None,
                ),
                pos(),
            )]),
            pos(),
        );
        let f = MemberDef {
            name: sym("f"),
            kind: MemberKind::Func(Vec::new(), Ty::Prim(faxc_ast::Prim::Int), body),
            mods: Vec::new(),
            atts: Vec::new(),
            pos: pos(),
        };
        let owner = TypeDef {
            path: Path::top_level(sym("S")),
            kind: TypeDefKind::Struct,
            mods: Vec::new(),
            members: vec![f],
            pos: pos(),
        };
        let module = Module {
            package: Path::top_level(sym("")),
            imports: Vec::new(),
            defs: vec![owner],
        };
        let (_typed, _table, errors) = type_module(&module);
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    }

    #[test]
    fn null_initialized_var_is_rejected_as_void() {
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
        let owner = TypeDef {
            path: Path::top_level(sym("S")),
            kind: TypeDefKind::Struct,
            mods: Vec::new(),
            members: vec![f],
            pos: pos(),
        };
        let module = Module {
            package: Path::top_level(sym("")),
            imports: Vec::new(),
            defs: vec![owner],
        };
        let (_typed, _table, errors) = type_module(&module);
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0].kind, SemaErrorKind::VoidVar));
    }

    #[test]
    fn tuple_index_out_of_range_is_rejected() {
        let body = Expr::new(
            ExprKind::ArrayIndex(
                Box::new(Expr::new(ExprKind::Tuple(vec![int_lit(1), int_lit(2)]), pos())),
                Box::new(int_lit(2)),
            ),
            pos(),
        );
        let f = MemberDef {
            name: sym("f"),
            kind: MemberKind::Func(Vec::new(), Ty::Prim(faxc_ast::Prim::Int), body),
            mods: Vec::new(),
            atts: Vec::new(),
            pos: pos(),
        };
        let owner = TypeDef {
            path: Path::top_level(sym("S")),
            kind: TypeDefKind::Struct,
            mods: Vec::new(),
            members: vec![f],
            pos: pos(),
        };
        let module = Module {
            package: Path::top_level(sym("")),
            imports: Vec::new(),
            defs: vec![owner],
        };
        let (_typed, _table, errors) = type_module(&module);
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0].kind, SemaErrorKind::CannotIndex));
    }

    #[test]
    fn vararg_call_accepts_extra_trailing_arguments() {
        // extern static func printf(fmt: string, ...);
        // usage: printf("%d", 1, 2)
        let printf_decl = MemberDef {
            name: sym("printf"),
            kind: MemberKind::Func(
                vec![Param {
                    name: sym("fmt"),
                    ty: Ty::Prim(faxc_ast::Prim::String),
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
        let owner = TypeDef {
            path: Path::top_level(sym("Program")),
            kind: TypeDefKind::Struct,
            mods: Vec::new(),
            members: vec![printf_decl, main_fn],
            pos: pos(),
        };
        let module = Module {
            package: Path::top_level(sym("")),
            imports: Vec::new(),
            defs: vec![owner],
        };
        let (_typed, _table, errors) = type_module(&module);
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    }

    #[test]
    fn duplicate_member_name_picks_the_first_declared() {
        let ty = Ty::Prim(faxc_ast::Prim::Int);
        let owner = TypeDef {
            path: Path::top_level(sym("S")),
            kind: TypeDefKind::Struct,
            mods: Vec::new(),
            members: vec![
                MemberDef {
                    name: sym("a"),
                    kind: MemberKind::Var(Variability::Variable, Some(ty.clone()), None),
                    mods: Vec::new(),
                    atts: Vec::new(),
                    pos: pos(),
                },
                MemberDef {
                    name: sym("a"),
                    kind: MemberKind::Var(Variability::Constant, Some(Ty::Prim(faxc_ast::Prim::Bool)), None),
                    mods: Vec::new(),
                    atts: Vec::new(),
                    pos: pos(),
                },
            ],
            pos: pos(),
        };
        let mut table = TypeTable::new();
        let module = Module {
            package: Path::top_level(sym("")),
            imports: Vec::new(),
            defs: vec![owner],
        };
        table.index_module(&module).unwrap();
        let mut typer = Typer::new(&table);
        let (v, t) = typer
            .resolve_field(&Ty::Path(Path::top_level(sym("S"))), sym("a"), pos())
            .unwrap();
        assert_eq!(v, Variability::Variable);
        assert_eq!(t, ty);
    }

    #[test]
    fn duplicate_type_path_is_rejected_at_index_time() {
        let a = TypeDef {
            path: Path::top_level(sym("Dup")),
            kind: TypeDefKind::Struct,
            mods: Vec::new(),
            members: Vec::new(),
            pos: pos(),
        };
        let b = TypeDef {
            path: Path::top_level(sym("Dup")),
            kind: TypeDefKind::Struct,
            mods: Vec::new(),
            members: Vec::new(),
            pos: Position::new(faxc_util::FileId::DUMMY, LineCol::new(2, 0), LineCol::new(2, 1)),
        };
        let module = Module {
            package: Path::top_level(sym("")),
            imports: Vec::new(),
            defs: vec![a, b],
        };
        let (_typed, _table, errors) = type_module(&module);
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0].kind, SemaErrorKind::DuplicateTypePath(_)));
    }
}
