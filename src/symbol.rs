use std::collections::HashMap;
use std::fmt;

/// A Jack type: a primitive or a class name (spec.md §3 SymbolEntry).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Type {
    Int,
    Char,
    Boolean,
    Class(String),
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Int => write!(f, "int"),
            Type::Char => write!(f, "char"),
            Type::Boolean => write!(f, "boolean"),
            Type::Class(name) => write!(f, "{}", name),
        }
    }
}

/// The storage kind of a symbol; maps 1:1 onto a VM segment (spec.md §3).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    Static,
    Field,
    Arg,
    Local,
}

impl Kind {
    /// The VM segment this kind is accessed through (spec.md §3 SymbolEntry).
    pub fn segment(self) -> crate::vm::Segment {
        use crate::vm::Segment;
        match self {
            Kind::Static => Segment::Static,
            Kind::Field => Segment::This,
            Kind::Arg => Segment::Argument,
            Kind::Local => Segment::Local,
        }
    }

    fn is_class_scoped(self) -> bool {
        matches!(self, Kind::Static | Kind::Field)
    }
}

#[derive(Clone, Debug)]
struct Entry {
    ty: Type,
    kind: Kind,
    index: u16,
}

/// Two-scope identifier registry with per-kind running indices
/// (spec.md §3 SymbolTable, §4.2).
#[derive(Default)]
pub struct SymbolTable {
    class_scope: HashMap<String, Entry>,
    subroutine_scope: HashMap<String, Entry>,
    static_count: u16,
    field_count: u16,
    arg_count: u16,
    local_count: u16,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear the subroutine scope and reset its counters. Called on entry to
    /// every subroutine declaration (spec.md §3 Lifecycle, §4.2).
    pub fn start_subroutine(&mut self) {
        self.subroutine_scope.clear();
        self.arg_count = 0;
        self.local_count = 0;
    }

    /// Define a new identifier in the scope implied by `kind`.
    ///
    /// Returns `Err(())` if `name` is already defined in that scope — the
    /// engine turns this into a fatal diagnostic (spec.md §4.2, §4.3.3).
    pub fn define(&mut self, name: &str, ty: Type, kind: Kind) -> Result<(), ()> {
        let (scope, counter) = if kind.is_class_scoped() {
            (
                &mut self.class_scope,
                match kind {
                    Kind::Static => &mut self.static_count,
                    Kind::Field => &mut self.field_count,
                    _ => unreachable!(),
                },
            )
        } else {
            (
                &mut self.subroutine_scope,
                match kind {
                    Kind::Arg => &mut self.arg_count,
                    Kind::Local => &mut self.local_count,
                    _ => unreachable!(),
                },
            )
        };

        if scope.contains_key(name) {
            return Err(());
        }

        let index = *counter;
        *counter += 1;
        scope.insert(
            name.to_string(),
            Entry {
                ty,
                kind,
                index,
            },
        );
        Ok(())
    }

    pub fn var_count(&self, kind: Kind) -> u16 {
        match kind {
            Kind::Static => self.static_count,
            Kind::Field => self.field_count,
            Kind::Arg => self.arg_count,
            Kind::Local => self.local_count,
        }
    }

    fn lookup(&self, name: &str) -> Option<&Entry> {
        // Subroutine scope shadows class scope (spec.md §3 Invariants).
        self.subroutine_scope
            .get(name)
            .or_else(|| self.class_scope.get(name))
    }

    pub fn kind_of(&self, name: &str) -> Option<Kind> {
        self.lookup(name).map(|e| e.kind)
    }

    pub fn type_of(&self, name: &str) -> Option<&Type> {
        self.lookup(name).map(|e| &e.ty)
    }

    pub fn index_of(&self, name: &str) -> Option<u16> {
        self.lookup(name).map(|e| e.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_scope_persists_subroutine_scope_resets() {
        let mut table = SymbolTable::new();
        table.define("x", Type::Int, Kind::Field).unwrap();
        table.define("n", Type::Int, Kind::Arg).unwrap();
        assert_eq!(table.var_count(Kind::Field), 1);
        assert_eq!(table.var_count(Kind::Arg), 1);

        table.start_subroutine();
        assert_eq!(table.var_count(Kind::Arg), 0);
        assert_eq!(table.var_count(Kind::Local), 0);
        // class scope survives across subroutines
        assert_eq!(table.var_count(Kind::Field), 1);
        assert_eq!(table.kind_of("x"), Some(Kind::Field));
    }

    #[test]
    fn subroutine_scope_shadows_class_scope() {
        let mut table = SymbolTable::new();
        table.define("x", Type::Int, Kind::Field).unwrap();
        table.start_subroutine();
        table.define("x", Type::Boolean, Kind::Local).unwrap();
        assert_eq!(table.kind_of("x"), Some(Kind::Local));
        assert_eq!(table.type_of("x"), Some(&Type::Boolean));
        assert_eq!(table.index_of("x"), Some(0));
    }

    #[test]
    fn redefinition_in_same_scope_is_an_error() {
        let mut table = SymbolTable::new();
        table.define("x", Type::Int, Kind::Static).unwrap();
        assert!(table.define("x", Type::Int, Kind::Static).is_err());
    }

    #[test]
    fn indices_are_dense_per_kind() {
        let mut table = SymbolTable::new();
        table.define("a", Type::Int, Kind::Static).unwrap();
        table.define("b", Type::Int, Kind::Field).unwrap();
        table.define("c", Type::Int, Kind::Static).unwrap();
        assert_eq!(table.index_of("a"), Some(0));
        assert_eq!(table.index_of("b"), Some(0));
        assert_eq!(table.index_of("c"), Some(1));
    }

    #[test]
    fn unknown_identifier_resolves_to_absent() {
        let table = SymbolTable::new();
        assert_eq!(table.kind_of("nope"), None);
        assert_eq!(table.type_of("nope"), None);
        assert_eq!(table.index_of("nope"), None);
    }
}
