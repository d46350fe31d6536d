//! Modules: the owning container for signal declarations.
//!
//! A [`Module`] keeps an ordered, append-only registry of its signals and the
//! continuous assignments that drive them. Elaboration is sequential, so the
//! registry is plain `&mut` state with no locking.

use fixgen_common::{Ident, Interner};

use crate::arena::Arena;
use crate::error::AstError;
use crate::expr::Expr;
use crate::ids::{ModuleId, ModuleKey, SignalId};
use crate::signal::{Signal, SignalKind};
use crate::stmt::Assignment;

/// Everything needed to declare a signal, minus its ID.
#[derive(Debug, Clone)]
pub struct SignalDecl<'a> {
    /// The signal name, unique within the module.
    pub name: &'a str,
    /// The declaration kind.
    pub kind: SignalKind,
    /// The bit width.
    pub width: u32,
    /// Array length, for memories.
    pub length: Option<u32>,
    /// Whether the signal is signed.
    pub signed: bool,
    /// Initial value, for registers.
    pub init: Option<Expr>,
}

/// A hardware module under construction.
#[derive(Debug, Clone)]
pub struct Module {
    id: ModuleId,
    key: ModuleKey,
    name: String,
    names: Interner,
    signals: Arena<SignalId, Signal>,
    assignments: Vec<Assignment>,
}

impl Module {
    /// Creates an empty module.
    pub fn new(id: ModuleId, name: impl Into<String>) -> Self {
        Self {
            id,
            key: ModuleKey::fresh(),
            name: name.into(),
            names: Interner::new(),
            signals: Arena::new(),
            assignments: Vec::new(),
        }
    }

    /// The ID the module was created with.
    pub fn id(&self) -> ModuleId {
        self.id
    }

    /// The identity of this module value, distinct from every other module
    /// created in the process.
    pub fn key(&self) -> ModuleKey {
        self.key
    }

    /// The module name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registers a new signal and returns its ID.
    ///
    /// Fails if the name is already taken or the width is zero.
    pub fn declare(&mut self, decl: SignalDecl<'_>) -> Result<SignalId, AstError> {
        if decl.width == 0 {
            return Err(AstError::ZeroWidth {
                name: decl.name.to_string(),
            });
        }
        if self.names.get(decl.name).is_some() {
            return Err(AstError::DuplicateSignal {
                name: decl.name.to_string(),
                module: self.name.clone(),
            });
        }
        let name = self.names.intern(decl.name);
        let id = self.signals.next_id();
        Ok(self.signals.alloc(Signal {
            id,
            name,
            kind: decl.kind,
            width: decl.width,
            length: decl.length,
            signed: decl.signed,
            init: decl.init,
        }))
    }

    /// Registers a new signal and returns its declaration.
    pub fn declare_signal(&mut self, decl: SignalDecl<'_>) -> Result<&Signal, AstError> {
        let id = self.declare(decl)?;
        Ok(&self.signals[id])
    }

    /// Returns the signal with the given ID, if it belongs to this module.
    pub fn signal(&self, id: SignalId) -> Option<&Signal> {
        self.signals.get(id)
    }

    /// Looks a signal up by name.
    pub fn signal_by_name(&self, name: &str) -> Option<&Signal> {
        let ident = self.names.get(name)?;
        self.signals.values().find(|s| s.name == ident)
    }

    /// Resolves an interned name.
    pub fn resolve(&self, ident: Ident) -> &str {
        self.names.resolve(ident)
    }

    /// Iterates over declared signals in registration order.
    pub fn signals(&self) -> impl Iterator<Item = &Signal> {
        self.signals.values()
    }

    /// Number of declared signals.
    pub fn signal_count(&self) -> usize {
        self.signals.len()
    }

    /// Records a continuous assignment.
    pub fn add_assignment(&mut self, assignment: Assignment) {
        self.assignments.push(assignment);
    }

    /// Continuous assignments in the order they were added.
    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decl(name: &str, kind: SignalKind) -> SignalDecl<'_> {
        SignalDecl {
            name,
            kind,
            width: 8,
            length: None,
            signed: true,
            init: None,
        }
    }

    #[test]
    fn declare_appends_in_order() {
        let mut m = Module::new(ModuleId::from_raw(0), "top");
        let a = m.declare(decl("a", SignalKind::Input)).unwrap();
        let b = m.declare(decl("b", SignalKind::Wire)).unwrap();
        assert_eq!(a.as_raw(), 0);
        assert_eq!(b.as_raw(), 1);
        let names: Vec<_> = m.signals().map(|s| m.resolve(s.name)).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn duplicate_name_rejected() {
        let mut m = Module::new(ModuleId::from_raw(0), "top");
        m.declare(decl("acc", SignalKind::Reg)).unwrap();
        let err = m.declare(decl("acc", SignalKind::Wire)).unwrap_err();
        assert!(matches!(err, AstError::DuplicateSignal { .. }));
        assert_eq!(m.signal_count(), 1);
    }

    #[test]
    fn zero_width_rejected() {
        let mut m = Module::new(ModuleId::from_raw(0), "top");
        let mut d = decl("x", SignalKind::Wire);
        d.width = 0;
        assert!(matches!(m.declare(d), Err(AstError::ZeroWidth { .. })));
        assert_eq!(m.signal_count(), 0);
    }

    #[test]
    fn declare_signal_returns_declaration() {
        let mut m = Module::new(ModuleId::from_raw(0), "top");
        let s = m.declare_signal(decl("q", SignalKind::Output)).unwrap();
        assert_eq!(s.kind, SignalKind::Output);
        assert_eq!(s.width, 8);
        let name = s.name;
        assert_eq!(m.resolve(name), "q");
    }

    #[test]
    fn lookup_by_name() {
        let mut m = Module::new(ModuleId::from_raw(0), "top");
        let id = m.declare(decl("coef", SignalKind::Reg)).unwrap();
        assert_eq!(m.signal_by_name("coef").map(|s| s.id), Some(id));
        assert!(m.signal_by_name("missing").is_none());
    }

    #[test]
    fn assignments_recorded() {
        let mut m = Module::new(ModuleId::from_raw(0), "top");
        let id = m.declare(decl("y", SignalKind::Wire)).unwrap();
        m.add_assignment(Assignment {
            target: id,
            value: Expr::int(1),
        });
        assert_eq!(m.assignments().len(), 1);
        assert_eq!(m.assignments()[0].target, id);
    }
}
