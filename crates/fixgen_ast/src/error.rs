//! Error types for module construction and constant evaluation.

/// Errors raised while registering objects with a module.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AstError {
    /// A signal with the same name is already declared in the module.
    #[error("signal `{name}` is already defined in module `{module}`")]
    DuplicateSignal {
        /// The clashing name.
        name: String,
        /// The module that already declares it.
        module: String,
    },

    /// A declaration asked for a zero-width signal.
    #[error("signal `{name}` must be at least one bit wide")]
    ZeroWidth {
        /// The offending name.
        name: String,
    },
}

/// Errors raised by the constant evaluator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    /// A signal in the expression has no value in the environment.
    #[error("no value bound for signal {0}")]
    UnboundSignal(u32),

    /// Integer division by zero.
    #[error("division by zero")]
    DivisionByZero,

    /// The operation is not defined for the operand kinds it got.
    #[error("unsupported: {reason}")]
    Unsupported {
        /// What was attempted.
        reason: String,
    },
}
