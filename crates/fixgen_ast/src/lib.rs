//! The AST core of fixgen: expression nodes, signals and modules.
//!
//! [`Expr`] is the generic expression DAG that generated hardware is built
//! from; [`Module`] owns the signals it declares; [`eval_expr`] computes the
//! value of a tree for given signal values. Fixed-point semantics live one
//! layer up, in `fixgen_fixed`.

#![warn(missing_docs)]

pub mod arena;
pub mod const_value;
pub mod error;
pub mod eval;
pub mod expr;
pub mod ids;
pub mod module;
pub mod signal;
pub mod stmt;

pub use const_value::ConstValue;
pub use error::{AstError, EvalError};
pub use eval::{eval_expr, EvalEnv, EvalValue};
pub use expr::{BinaryOp, Expr, ExprKind, SignalRef, UnaryOp};
pub use ids::{ModuleId, ModuleKey, SignalId};
pub use module::{Module, SignalDecl};
pub use signal::{Signal, SignalKind};
pub use stmt::{Assignment, Connection, Subst};
