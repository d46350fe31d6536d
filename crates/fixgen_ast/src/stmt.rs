//! Assignments and port bindings that drive signals.

use serde::{Deserialize, Serialize};

use crate::expr::{Expr, SignalRef};
use crate::ids::SignalId;

/// A procedural assignment to a signal, for use inside an always block.
///
/// `blocking` selects `=` over `<=`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subst {
    /// The driven signal.
    pub target: SignalRef,
    /// The value expression.
    pub value: Expr,
    /// Whether this is a blocking assignment.
    pub blocking: bool,
}

/// A continuous assignment (`assign target = value;`) registered with a module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    /// The driven signal.
    pub target: SignalId,
    /// The value expression.
    pub value: Expr,
}

/// A port binding (`.port(value)`) for an instance of the module that
/// declares `port`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    /// The bound port.
    pub port: SignalRef,
    /// The expression connected to it.
    pub value: Expr,
}
