//! Constant evaluation of expression trees.
//!
//! [`eval_expr`] walks an [`Expr`] and computes its value given concrete raw
//! bit patterns for the signals it mentions. Integers are carried as
//! `(value, width, signed)` triples on `i128`; widths follow
//! [`Expr::bit_length`], so sums and products never wrap. This exists to check
//! that generated arithmetic means what it should; it is not a simulator.

use std::collections::HashMap;

use crate::const_value::ConstValue;
use crate::error::EvalError;
use crate::expr::{BinaryOp, Expr, ExprKind, UnaryOp, MAX_WIDTH};
use crate::ids::SignalId;

/// The value of an evaluated expression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EvalValue {
    /// An integer of a given width, already sign-extended if `signed`.
    Int {
        /// The value.
        value: i128,
        /// The bit width.
        width: u32,
        /// Whether `value` is read as two's complement.
        signed: bool,
    },
    /// A real number.
    Real(f64),
}

impl EvalValue {
    /// Builds an integer value, truncating to `width` bits and sign-extending
    /// when `signed`.
    pub fn int(value: i128, width: u32, signed: bool) -> Self {
        let width = width.clamp(1, MAX_WIDTH);
        EvalValue::Int {
            value: normalize(value, width, signed),
            width,
            signed,
        }
    }

    /// The integer value, if this is an integer.
    pub fn as_int(&self) -> Option<i128> {
        match *self {
            EvalValue::Int { value, .. } => Some(value),
            EvalValue::Real(_) => None,
        }
    }

    /// The integer value with its bits read as two's complement at its own width.
    pub fn as_signed(&self) -> Option<i128> {
        match *self {
            EvalValue::Int { value, width, .. } => Some(normalize(value, width, true)),
            EvalValue::Real(_) => None,
        }
    }

    /// The real value, converting integers.
    pub fn as_real(&self) -> f64 {
        match *self {
            EvalValue::Int { value, .. } => value as f64,
            EvalValue::Real(r) => r,
        }
    }

    /// Whether the value counts as true in a condition.
    pub fn is_true(&self) -> bool {
        match *self {
            EvalValue::Int { value, .. } => value != 0,
            EvalValue::Real(r) => r != 0.0,
        }
    }

    fn bits(&self) -> u128 {
        match *self {
            EvalValue::Int { value, width, .. } => (value as u128) & mask(width),
            EvalValue::Real(r) => r as i128 as u128,
        }
    }
}

/// Raw signal values used by [`eval_expr`].
#[derive(Debug, Clone, Default)]
pub struct EvalEnv {
    values: HashMap<SignalId, i128>,
}

impl EvalEnv {
    /// Creates an empty environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds the raw bit pattern of a signal.
    ///
    /// The value is truncated to the signal's width on use, so `-3` and the
    /// width-bit two's complement pattern of `-3` are interchangeable.
    pub fn with(mut self, id: SignalId, raw: i128) -> Self {
        self.values.insert(id, raw);
        self
    }
}

fn mask(width: u32) -> u128 {
    if width >= 128 {
        u128::MAX
    } else {
        (1u128 << width) - 1
    }
}

fn normalize(value: i128, width: u32, signed: bool) -> i128 {
    let width = width.clamp(1, MAX_WIDTH);
    let bits = (value as u128) & mask(width);
    if signed && (bits >> (width - 1)) & 1 == 1 {
        (bits as i128) - (1i128 << width)
    } else {
        bits as i128
    }
}

/// Evaluates `expr` against the raw signal values in `env`.
pub fn eval_expr(env: &EvalEnv, expr: &Expr) -> Result<EvalValue, EvalError> {
    let width = expr.bit_length();
    match expr.kind() {
        ExprKind::Signal(s) => {
            let raw = env
                .values
                .get(&s.id)
                .copied()
                .ok_or(EvalError::UnboundSignal(s.id.as_raw()))?;
            Ok(EvalValue::int(raw, s.width, s.signed))
        }

        ExprKind::Literal(ConstValue::Int { value, signed, .. }) => {
            Ok(EvalValue::int(*value as i128, width, *signed))
        }
        ExprKind::Literal(ConstValue::Real(r)) => Ok(EvalValue::Real(*r)),

        ExprKind::Unary { op, operand } => {
            let val = eval_expr(env, operand)?;
            eval_unary(*op, val)
        }

        ExprKind::Binary { op, lhs, rhs } => {
            let l = eval_expr(env, lhs)?;
            let r = eval_expr(env, rhs)?;
            eval_binary(*op, l, r, width)
        }

        ExprKind::Mux {
            condition,
            true_val,
            false_val,
        } => {
            let chosen = if eval_expr(env, condition)?.is_true() {
                eval_expr(env, true_val)?
            } else {
                eval_expr(env, false_val)?
            };
            match chosen {
                EvalValue::Real(_) => Ok(chosen),
                EvalValue::Int { .. } => {
                    let signed = expr.is_signed();
                    let value = if signed {
                        chosen.as_int().unwrap_or_default()
                    } else {
                        chosen.bits() as i128
                    };
                    Ok(EvalValue::int(value, width, signed))
                }
            }
        }

        ExprKind::Repeat { expr: inner, count } => {
            let val = eval_expr(env, inner)?;
            let unit = inner.bit_length();
            let pattern = val.bits();
            let mut out = 0u128;
            for _ in 0..*count {
                out = (out << unit) | pattern;
            }
            Ok(EvalValue::int(out as i128, width, false))
        }

        ExprKind::Index { expr: inner, index } => {
            let val = eval_expr(env, inner)?;
            let bit = match val {
                EvalValue::Int { value, .. } => (value >> (*index).min(MAX_WIDTH)) & 1,
                EvalValue::Real(_) => return Err(unsupported("bit select of a real")),
            };
            Ok(EvalValue::int(bit, 1, false))
        }

        ExprKind::Slice { expr: inner, lsb, .. } => {
            let val = eval_expr(env, inner)?;
            let value = match val {
                EvalValue::Int { value, .. } => value >> (*lsb).min(MAX_WIDTH),
                EvalValue::Real(_) => return Err(unsupported("part select of a real")),
            };
            Ok(EvalValue::int(value, width, false))
        }

        ExprKind::Signed(inner) => match eval_expr(env, inner)? {
            EvalValue::Int { value, width, .. } => Ok(EvalValue::int(value, width, true)),
            EvalValue::Real(_) => Err(unsupported("$signed of a real")),
        },

        ExprKind::ToReal(inner) => Ok(EvalValue::Real(eval_expr(env, inner)?.as_real())),
    }
}

fn unsupported(reason: &str) -> EvalError {
    EvalError::Unsupported {
        reason: reason.to_string(),
    }
}

fn eval_unary(op: UnaryOp, val: EvalValue) -> Result<EvalValue, EvalError> {
    match (op, val) {
        (UnaryOp::Uplus, v) => Ok(v),
        (UnaryOp::Uminus, EvalValue::Real(r)) => Ok(EvalValue::Real(-r)),
        (UnaryOp::Uminus, EvalValue::Int { value, width, signed }) => {
            Ok(EvalValue::int(-value, width, signed))
        }
        (UnaryOp::Not, EvalValue::Int { value, width, signed }) => {
            Ok(EvalValue::int(!value, width, signed))
        }
        (UnaryOp::LogicalNot, v) => Ok(EvalValue::int(i128::from(!v.is_true()), 1, false)),
        (UnaryOp::Not, EvalValue::Real(_)) => Err(unsupported("bitwise NOT of a real")),
    }
}

fn eval_binary(
    op: BinaryOp,
    l: EvalValue,
    r: EvalValue,
    width: u32,
) -> Result<EvalValue, EvalError> {
    if let (EvalValue::Int { .. }, EvalValue::Int { .. }) = (l, r) {
        return eval_binary_int(op, l, r, width);
    }
    let (a, b) = (l.as_real(), r.as_real());
    let flag = |c: bool| -> Result<EvalValue, EvalError> {
        Ok(EvalValue::int(i128::from(c), 1, false))
    };
    match op {
        BinaryOp::Plus => Ok(EvalValue::Real(a + b)),
        BinaryOp::Minus => Ok(EvalValue::Real(a - b)),
        BinaryOp::Times => Ok(EvalValue::Real(a * b)),
        BinaryOp::Divide => Ok(EvalValue::Real(a / b)),
        BinaryOp::LessThan => flag(a < b),
        BinaryOp::GreaterThan => flag(a > b),
        BinaryOp::LessEq => flag(a <= b),
        BinaryOp::GreaterEq => flag(a >= b),
        BinaryOp::Eq => flag(a == b),
        BinaryOp::NotEq => flag(a != b),
        BinaryOp::And | BinaryOp::Sll | BinaryOp::Srl | BinaryOp::Sra => {
            Err(unsupported("bitwise operation on a real"))
        }
    }
}

fn eval_binary_int(
    op: BinaryOp,
    l: EvalValue,
    r: EvalValue,
    width: u32,
) -> Result<EvalValue, EvalError> {
    let (
        EvalValue::Int {
            width: lw,
            signed: ls,
            ..
        },
        EvalValue::Int { signed: rs, .. },
    ) = (l, r)
    else {
        return Err(unsupported("integer operation on a real"));
    };

    // Mixed signedness makes the whole operation unsigned.
    let signed = ls && rs;
    let (a, b) = if signed {
        (l.as_int().unwrap_or_default(), r.as_int().unwrap_or_default())
    } else {
        (l.bits() as i128, r.bits() as i128)
    };
    let flag = |c: bool| -> Result<EvalValue, EvalError> {
        Ok(EvalValue::int(i128::from(c), 1, false))
    };
    let amount = (r.bits().min(MAX_WIDTH as u128)) as u32;

    match op {
        BinaryOp::Plus => Ok(EvalValue::int(a.wrapping_add(b), width, signed)),
        BinaryOp::Minus => Ok(EvalValue::int(a.wrapping_sub(b), width, signed)),
        BinaryOp::Times => Ok(EvalValue::int(a.wrapping_mul(b), width, signed)),
        BinaryOp::Divide => {
            if b == 0 {
                Err(EvalError::DivisionByZero)
            } else {
                Ok(EvalValue::int(a / b, width, signed))
            }
        }
        BinaryOp::And => Ok(EvalValue::int(a & b, width, signed)),
        BinaryOp::LessThan => flag(a < b),
        BinaryOp::GreaterThan => flag(a > b),
        BinaryOp::LessEq => flag(a <= b),
        BinaryOp::GreaterEq => flag(a >= b),
        BinaryOp::Eq => flag(a == b),
        BinaryOp::NotEq => flag(a != b),
        BinaryOp::Sll => {
            let shifted = l.as_int().unwrap_or_default() << amount.min(MAX_WIDTH - 1);
            Ok(EvalValue::int(shifted, width, ls))
        }
        BinaryOp::Srl => {
            let shifted = (l.bits() >> amount) as i128;
            Ok(EvalValue::int(shifted, lw, ls))
        }
        BinaryOp::Sra => {
            let shifted = if ls {
                l.as_int().unwrap_or_default() >> amount
            } else {
                (l.bits() >> amount) as i128
            };
            Ok(EvalValue::int(shifted, lw, ls))
        }
    }
}
