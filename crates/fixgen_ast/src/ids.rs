//! Identity of modules and of the signals they declare.
//!
//! [`SignalId`]s are handed out by a module's registry in declaration order,
//! starting at `0`, so comparing two IDs from the same module compares their
//! declaration order. [`ModuleId`] is chosen by whoever builds the module and
//! is not guaranteed to be unique. [`ModuleKey`] is: every
//! [`Module::new`](crate::module::Module::new) draws a fresh one.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::arena::ArenaId;
use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize,
        )]
        pub struct $name(u32);

        impl $name {
            /// Wraps a raw index.
            pub fn from_raw(index: u32) -> Self {
                Self(index)
            }

            /// The raw index.
            pub fn as_raw(self) -> u32 {
                self.0
            }
        }

        impl ArenaId for $name {
            fn from_raw(index: u32) -> Self {
                Self(index)
            }

            fn as_raw(self) -> u32 {
                self.0
            }
        }
    };
}

define_id!(
    /// Caller-assigned ID of a module.
    ModuleId
);

define_id!(
    /// Position of a signal in its module's registry.
    SignalId
);

/// Process-unique identity of one module value.
///
/// Two modules built with the same [`ModuleId`] still have distinct keys.
/// A cloned module shares the key of its original.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ModuleKey(u64);

impl ModuleKey {
    pub(crate) fn fresh() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::{Module, SignalDecl};
    use crate::signal::SignalKind;

    fn wire(name: &str) -> SignalDecl<'_> {
        SignalDecl {
            name,
            kind: SignalKind::Wire,
            width: 4,
            length: None,
            signed: false,
            init: None,
        }
    }

    #[test]
    fn signal_ids_follow_declaration_order() {
        let mut m = Module::new(ModuleId::from_raw(0), "top");
        let ids: Vec<SignalId> = ["c", "a", "b"]
            .into_iter()
            .map(|name| m.declare(wire(name)).unwrap())
            .collect();
        assert_eq!(ids.iter().map(|id| id.as_raw()).collect::<Vec<_>>(), vec![0, 1, 2]);
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
        let names: Vec<&str> = m.signals().map(|s| m.resolve(s.name)).collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }

    #[test]
    fn signal_ids_restart_per_module() {
        let mut a = Module::new(ModuleId::from_raw(0), "a");
        let mut b = Module::new(ModuleId::from_raw(1), "b");
        a.declare(wire("x")).unwrap();
        let ya = a.declare(wire("y")).unwrap();
        let yb = b.declare(wire("y")).unwrap();
        assert_eq!(ya, SignalId::from_raw(1));
        assert_eq!(yb, SignalId::from_raw(0));
    }

    #[test]
    fn shared_module_id_still_gets_distinct_keys() {
        let a = Module::new(ModuleId::from_raw(0), "a");
        let b = Module::new(ModuleId::from_raw(0), "b");
        assert_eq!(a.id(), b.id());
        assert_ne!(a.key(), b.key());
        assert_eq!(a.clone().key(), a.key());
    }

    #[test]
    fn id_serde_roundtrip() {
        let id = SignalId::from_raw(99);
        let json = serde_json::to_string(&id).unwrap();
        let restored: SignalId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, restored);
    }
}
