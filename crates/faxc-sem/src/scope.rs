//! Scope Stack & Context: the stack of name -> (variability, type) frames,
//! plus the ambient flags carried while typing a member body.

use faxc_ast::{Path, Ty, Variability};
use faxc_util::Symbol;
use indexmap::IndexMap;

/// One level of the scope stack: the bindings introduced by an enclosing
/// block or parameter list. A name bound twice in the same frame (e.g. a
/// re-declared local) simply overwrites the earlier binding; shadowing
/// across frames is handled by `ScopeStack::find`, which searches from
/// the top of the stack down.
#[derive(Debug, Default)]
pub struct Frame {
    bindings: IndexMap<Symbol, (Variability, Ty)>,
}

impl Frame {
    fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, name: Symbol, variability: Variability, ty: Ty) {
        self.bindings.insert(name, (variability, ty));
    }

    pub fn get(&self, name: Symbol) -> Option<&(Variability, Ty)> {
        self.bindings.get(&name)
    }
}

/// A stack of scope frames. Names resolve top-of-stack downward: an
/// inner frame shadows an outer one.
#[derive(Debug, Default)]
pub struct ScopeStack {
    frames: Vec<Frame>,
}

impl ScopeStack {
    pub fn new() -> Self {
        Self { frames: Vec::new() }
    }

    pub fn push_scope(&mut self) {
        self.frames.push(Frame::new());
    }

    pub fn pop_scope(&mut self) {
        self.frames.pop();
    }

    /// Bind a name in the current (innermost) frame.
    ///
    /// # Panics
    ///
    /// Panics if called with no frame pushed; every caller binds inside a
    /// `push_scope`/`pop_scope` pair.
    pub fn bind(&mut self, name: Symbol, variability: Variability, ty: Ty) {
        self.frames
            .last_mut()
            .expect("bind called with no active scope frame")
            .bind(name, variability, ty);
    }

    /// Search the scope stack only (step 1 of `find_var`); does not touch
    /// member resolution or the type table.
    pub fn find(&self, name: Symbol) -> Option<&(Variability, Ty)> {
        self.frames.iter().rev().find_map(|f| f.get(name))
    }
}

/// Ambient flags carried while typing the body of a single member.
#[derive(Debug, Default)]
pub struct Context {
    /// The enclosing type's path, set while typing its members.
    pub this_path: Option<Path>,
    /// True while typing a member with the `Static` modifier.
    pub in_static: bool,
    /// True within a constructor body.
    pub in_constructor: bool,
    /// Set to true once a `Return` has been typed in the current body.
    pub has_returned: bool,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the per-member flags before typing a new member's body.
    /// `this_path` is left untouched: it is set once per type definition,
    /// not once per member.
    pub fn enter_member(&mut self, is_static: bool) {
        self.in_static = is_static;
        self.in_constructor = false;
        self.has_returned = false;
    }
}
