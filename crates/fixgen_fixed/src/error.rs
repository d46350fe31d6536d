//! Errors raised while building fixed-point expressions.

use fixgen_ast::AstError;

/// An error from the fixed-point layer.
#[derive(Debug, thiserror::Error)]
pub enum FixedError {
    /// A conversion was asked for a negative binary point.
    #[error("invalid argument: point must not be negative, got {point}")]
    InvalidArgument {
        /// The rejected point.
        point: i32,
    },

    /// A value already has the representation the conversion produces.
    #[error("type mismatch: {reason}")]
    TypeMismatch {
        /// What was wrong with the operand.
        reason: String,
    },

    /// A signal was driven from a module that does not own it.
    #[error("signal {signal} is not declared in module `{module}`")]
    ForeignSignal {
        /// Raw ID of the signal.
        signal: u32,
        /// Name of the module the assignment was offered to.
        module: String,
    },

    /// Declaring the underlying signal failed.
    #[error(transparent)]
    Ast(#[from] AstError),
}
