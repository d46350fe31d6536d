//! Signal declarations.
//!
//! A [`Signal`] is a named input, output, inout, register or wire owned by a
//! [`Module`](crate::module::Module). Expressions refer to it through a
//! [`SignalRef`](crate::expr::SignalRef).

use fixgen_common::Ident;
use serde::{Deserialize, Serialize};

use crate::expr::{Expr, SignalRef};
use crate::ids::SignalId;

/// The declaration kind of a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalKind {
    /// A module input port.
    Input,
    /// A module output port.
    Output,
    /// A bidirectional port.
    Inout,
    /// A register (sequential storage).
    Reg,
    /// A combinational wire.
    Wire,
}

impl SignalKind {
    /// Returns `true` for the three port kinds.
    pub fn is_port(self) -> bool {
        matches!(self, SignalKind::Input | SignalKind::Output | SignalKind::Inout)
    }
}

/// A declared signal within a module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    /// The ID of this signal within its module.
    pub id: SignalId,
    /// The signal name.
    pub name: Ident,
    /// The declaration kind.
    pub kind: SignalKind,
    /// The bit width.
    pub width: u32,
    /// Array length, for memories.
    pub length: Option<u32>,
    /// Whether the signal is declared signed.
    pub signed: bool,
    /// Initial value; only meaningful for registers.
    pub init: Option<Expr>,
}

impl Signal {
    /// The reference used to mention this signal inside an expression.
    pub fn signal_ref(&self) -> SignalRef {
        SignalRef {
            id: self.id,
            kind: self.kind,
            width: self.width,
            signed: self.signed,
        }
    }

    /// A variable node for this signal.
    pub fn expr(&self) -> Expr {
        Expr::signal(self.signal_ref())
    }
}
