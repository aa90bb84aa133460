//! Type Table: a process-local `path -> TypeDef` mapping populated eagerly
//! before any member body is typed, and read-only afterwards.

use faxc_ast::{Module, Path, TypeDef};
use indexmap::IndexMap;

use crate::errors::{SemaError, SemaErrorKind};

/// Maps fully-qualified type paths to their untyped declaration.
///
/// Insertion order is preserved (hence `IndexMap`, not a hasher-ordered
/// map) so that diagnostics and codegen that iterate the table see types
/// in the order the module declared them.
#[derive(Debug, Default)]
pub struct TypeTable {
    defs: IndexMap<Path, TypeDef>,
}

impl TypeTable {
    pub fn new() -> Self {
        Self {
            defs: IndexMap::new(),
        }
    }

    /// Index phase: insert every top-level type declaration of a module.
    ///
    /// A duplicate path is a compile error (the source this core was
    /// modeled on silently keeps the first declaration and drops the
    /// rest; this core instead reports `UnresolvedPath`-adjacent
    /// diagnostics rather than doing that silently — see the duplicate
    /// path design note).
    pub fn index_module(&mut self, module: &Module) -> Result<(), SemaError> {
        for def in &module.defs {
            if self.defs.contains_key(&def.path) {
                return Err(SemaError::new(
                    SemaErrorKind::DuplicateTypePath(def.path.clone()),
                    def.pos,
                ));
            }
            self.defs.insert(def.path.clone(), def.clone());
        }
        Ok(())
    }

    /// Lookup a type declaration by path.
    pub fn get(&self, path: &Path) -> Option<&TypeDef> {
        self.defs.get(path)
    }

    /// Lookup a type declaration by path, reporting `pos` (the position of
    /// the AST node that referenced the path) on failure rather than a
    /// placeholder, so diagnostics point at the offending source.
    pub fn lookup(&self, path: &Path, pos: faxc_ast::Position) -> Result<&TypeDef, SemaError> {
        self.get(path)
            .ok_or_else(|| SemaError::new(SemaErrorKind::UnresolvedPath(path.clone()), pos))
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.defs.contains_key(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Path, &TypeDef)> {
        self.defs.iter()
    }
}
