//! Expression trees for generated hardware.
//!
//! An [`Expr`] is a cheap-to-clone handle to an immutable [`ExprKind`] node.
//! Cloning an `Expr` shares the node, so a sub-expression used twice is
//! referenced twice rather than copied, and the resulting graph is a DAG.

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::const_value::ConstValue;
use crate::ids::SignalId;
use crate::signal::SignalKind;

/// Widths never grow past this when inferred.
pub const MAX_WIDTH: u32 = 127;

/// A unary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOp {
    /// Unary plus (`+a`).
    Uplus,
    /// Two's-complement negation (`-a`).
    Uminus,
    /// Bitwise NOT (`~a`).
    Not,
    /// Logical NOT (`!a`).
    LogicalNot,
}

/// A binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    /// Addition (`+`).
    Plus,
    /// Subtraction (`-`).
    Minus,
    /// Multiplication (`*`).
    Times,
    /// Division (`/`).
    Divide,
    /// Less than (`<`).
    LessThan,
    /// Greater than (`>`).
    GreaterThan,
    /// Less than or equal (`<=`).
    LessEq,
    /// Greater than or equal (`>=`).
    GreaterEq,
    /// Equality (`==`).
    Eq,
    /// Inequality (`!=`).
    NotEq,
    /// Bitwise AND (`&`).
    And,
    /// Logical left shift (`<<`).
    Sll,
    /// Logical right shift (`>>`).
    Srl,
    /// Arithmetic right shift (`>>>`).
    Sra,
}

impl BinaryOp {
    /// Returns `true` for the six comparison operators.
    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            BinaryOp::LessThan
                | BinaryOp::GreaterThan
                | BinaryOp::LessEq
                | BinaryOp::GreaterEq
                | BinaryOp::Eq
                | BinaryOp::NotEq
        )
    }

    /// Returns `true` for the three shift operators.
    pub fn is_shift(self) -> bool {
        matches!(self, BinaryOp::Sll | BinaryOp::Srl | BinaryOp::Sra)
    }
}

/// A reference to a declared signal, as it appears inside an expression.
///
/// Width and signedness are copied from the declaration so that expression
/// queries do not need the owning module.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalRef {
    /// The referenced signal.
    pub id: SignalId,
    /// The declaration kind.
    pub kind: SignalKind,
    /// The declared bit width.
    pub width: u32,
    /// Whether the signal is declared signed.
    pub signed: bool,
}

/// The node payload behind an [`Expr`] handle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExprKind {
    /// A variable node: input, output, inout, reg or wire.
    Signal(SignalRef),
    /// A literal constant.
    Literal(ConstValue),
    /// A unary operation.
    Unary {
        /// The operator.
        op: UnaryOp,
        /// The operand.
        operand: Expr,
    },
    /// A binary operation.
    Binary {
        /// The operator.
        op: BinaryOp,
        /// The left-hand side.
        lhs: Expr,
        /// The right-hand side.
        rhs: Expr,
    },
    /// A conditional select (`cond ? a : b`).
    Mux {
        /// The select condition.
        condition: Expr,
        /// The value when the condition is true.
        true_val: Expr,
        /// The value when the condition is false.
        false_val: Expr,
    },
    /// A bit repeat (`{count{expr}}`).
    Repeat {
        /// The repeated pattern.
        expr: Expr,
        /// The number of repetitions; never zero.
        count: u32,
    },
    /// A single-bit select (`expr[index]`).
    Index {
        /// The expression being indexed.
        expr: Expr,
        /// The bit position.
        index: u32,
    },
    /// A part select (`expr[msb:lsb]`).
    Slice {
        /// The expression being sliced.
        expr: Expr,
        /// The high bit (inclusive).
        msb: u32,
        /// The low bit (inclusive).
        lsb: u32,
    },
    /// Reinterpret the operand's bits as signed (`$signed(expr)`).
    Signed(Expr),
    /// Integer-to-real conversion (`$itor(expr)`).
    ToReal(Expr),
}

/// A shared handle to an immutable expression node.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Expr(Rc<ExprKind>);

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl Expr {
    /// Wraps a node payload in a new handle.
    pub fn new(kind: ExprKind) -> Self {
        Expr(Rc::new(kind))
    }

    /// Returns the node payload.
    pub fn kind(&self) -> &ExprKind {
        &self.0
    }

    /// Returns `true` if both handles point at the same node.
    pub fn ptr_eq(a: &Expr, b: &Expr) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }

    /// A variable node for a declared signal.
    pub fn signal(signal: SignalRef) -> Self {
        Expr::new(ExprKind::Signal(signal))
    }

    /// A literal node.
    pub fn literal(value: ConstValue) -> Self {
        Expr::new(ExprKind::Literal(value))
    }

    /// An unsized, signed integer literal.
    pub fn int(value: i64) -> Self {
        Expr::literal(ConstValue::int(value))
    }

    /// A sized, unsigned integer literal.
    pub fn sized(value: i64, width: u32) -> Self {
        Expr::literal(ConstValue::sized(value, width))
    }

    /// A real literal.
    pub fn real(value: f64) -> Self {
        Expr::literal(ConstValue::Real(value))
    }

    /// A unary operation.
    pub fn unary(op: UnaryOp, operand: Expr) -> Self {
        Expr::new(ExprKind::Unary { op, operand })
    }

    /// A binary operation.
    pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Self {
        Expr::new(ExprKind::Binary { op, lhs, rhs })
    }

    /// A conditional select.
    pub fn mux(condition: Expr, true_val: Expr, false_val: Expr) -> Self {
        Expr::new(ExprKind::Mux {
            condition,
            true_val,
            false_val,
        })
    }

    /// A bit repeat. `count` must be non-zero.
    pub fn repeat(expr: Expr, count: u32) -> Self {
        debug_assert!(count > 0, "zero-width repeat");
        Expr::new(ExprKind::Repeat { expr, count })
    }

    /// A single-bit select.
    pub fn index(expr: Expr, index: u32) -> Self {
        Expr::new(ExprKind::Index { expr, index })
    }

    /// A part select `[msb:lsb]`.
    pub fn slice(expr: Expr, msb: u32, lsb: u32) -> Self {
        Expr::new(ExprKind::Slice { expr, msb, lsb })
    }

    /// Reinterpret as signed.
    pub fn signed(expr: Expr) -> Self {
        Expr::new(ExprKind::Signed(expr))
    }

    /// Integer-to-real conversion.
    pub fn to_real(expr: Expr) -> Self {
        Expr::new(ExprKind::ToReal(expr))
    }

    /// Two's-complement negation spelled as `~expr + 1`.
    pub fn twos_complement(expr: Expr) -> Self {
        Expr::binary(
            BinaryOp::Plus,
            Expr::unary(UnaryOp::Not, expr),
            Expr::int(1),
        )
    }

    /// Returns the literal value if this is a literal node.
    pub fn as_literal(&self) -> Option<ConstValue> {
        match self.kind() {
            ExprKind::Literal(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns `true` if this node is a real literal.
    pub fn is_real_literal(&self) -> bool {
        matches!(self.kind(), ExprKind::Literal(ConstValue::Real(_)))
    }

    /// Returns `true` if the node kind supports a direct bit select.
    ///
    /// Only variable nodes do; everything else has its bits extracted
    /// with a shift and a mask.
    pub fn supports_bit_select(&self) -> bool {
        matches!(self.kind(), ExprKind::Signal(_))
    }

    /// Whether the value of this node is signed.
    ///
    /// Arithmetic is signed only when every operand is; comparisons, selects
    /// and repeats are unsigned; shifts take the signedness of their left side.
    pub fn is_signed(&self) -> bool {
        match self.kind() {
            ExprKind::Signal(s) => s.signed,
            ExprKind::Literal(v) => v.is_signed(),
            ExprKind::Unary { op, operand } => match op {
                UnaryOp::LogicalNot => false,
                _ => operand.is_signed(),
            },
            ExprKind::Binary { op, lhs, rhs } => {
                if op.is_comparison() {
                    false
                } else if op.is_shift() {
                    lhs.is_signed()
                } else {
                    lhs.is_signed() && rhs.is_signed()
                }
            }
            ExprKind::Mux {
                true_val,
                false_val,
                ..
            } => true_val.is_signed() && false_val.is_signed(),
            ExprKind::Repeat { .. } | ExprKind::Index { .. } | ExprKind::Slice { .. } => false,
            ExprKind::Signed(_) | ExprKind::ToReal(_) => true,
        }
    }

    /// The number of bits this node produces.
    ///
    /// Sums, products and left shifts by a literal amount grow so that the
    /// full result fits. Capped at [`MAX_WIDTH`].
    pub fn bit_length(&self) -> u32 {
        let width = match self.kind() {
            ExprKind::Signal(s) => s.width,
            ExprKind::Literal(v) => v.bit_length(),
            ExprKind::Unary { op, operand } => match op {
                UnaryOp::LogicalNot => 1,
                _ => operand.bit_length(),
            },
            ExprKind::Binary { op, lhs, rhs } => {
                let (l, r) = (lhs.bit_length(), rhs.bit_length());
                match op {
                    BinaryOp::Plus | BinaryOp::Minus => l.max(r) + 1,
                    BinaryOp::Times => l + r,
                    BinaryOp::Divide | BinaryOp::And => l.max(r),
                    BinaryOp::Sll => match rhs.as_literal() {
                        Some(ConstValue::Int { value, .. }) if value > 0 => {
                            l.saturating_add(value.min(MAX_WIDTH as i64) as u32)
                        }
                        _ => l,
                    },
                    BinaryOp::Srl | BinaryOp::Sra => l,
                    _ => 1,
                }
            }
            ExprKind::Mux {
                true_val,
                false_val,
                ..
            } => true_val.bit_length().max(false_val.bit_length()),
            ExprKind::Repeat { expr, count } => expr.bit_length().saturating_mul(*count),
            ExprKind::Index { .. } => 1,
            ExprKind::Slice { msb, lsb, .. } => msb.saturating_sub(*lsb) + 1,
            ExprKind::Signed(inner) => inner.bit_length(),
            ExprKind::ToReal(_) => 64,
        };
        width.min(MAX_WIDTH)
    }
}

impl From<ConstValue> for Expr {
    fn from(value: ConstValue) -> Self {
        Expr::literal(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sig(id: u32, width: u32, signed: bool) -> Expr {
        Expr::signal(SignalRef {
            id: SignalId::from_raw(id),
            kind: SignalKind::Wire,
            width,
            signed,
        })
    }

    #[test]
    fn clone_shares_node() {
        let a = sig(0, 8, true);
        let b = a.clone();
        assert!(Expr::ptr_eq(&a, &b));
    }

    #[test]
    fn shared_subexpression_counted_once() {
        let a = sig(0, 8, true);
        let sum = Expr::binary(BinaryOp::Plus, a.clone(), a.clone());
        match sum.kind() {
            ExprKind::Binary { lhs, rhs, .. } => {
                assert!(Expr::ptr_eq(lhs, rhs));
                assert!(Expr::ptr_eq(lhs, &a));
            }
            other => panic!("expected a binary node, got {other:?}"),
        }
    }

    #[test]
    fn arithmetic_signedness_requires_both() {
        let s = sig(0, 8, true);
        let u = sig(1, 8, false);
        assert!(Expr::binary(BinaryOp::Plus, s.clone(), s.clone()).is_signed());
        assert!(!Expr::binary(BinaryOp::Plus, s.clone(), u.clone()).is_signed());
        assert!(Expr::binary(BinaryOp::Sra, s.clone(), u.clone()).is_signed());
        assert!(!Expr::binary(BinaryOp::LessThan, s.clone(), s).is_signed());
        assert!(Expr::signed(u).is_signed());
    }

    #[test]
    fn bit_length_rules() {
        let a = sig(0, 8, true);
        let b = sig(1, 12, true);
        assert_eq!(Expr::binary(BinaryOp::Plus, a.clone(), b.clone()).bit_length(), 13);
        assert_eq!(Expr::binary(BinaryOp::Times, a.clone(), b.clone()).bit_length(), 20);
        assert_eq!(Expr::binary(BinaryOp::Sll, a.clone(), Expr::int(3)).bit_length(), 11);
        assert_eq!(Expr::binary(BinaryOp::Sra, a.clone(), Expr::int(3)).bit_length(), 8);
        assert_eq!(Expr::binary(BinaryOp::Eq, a.clone(), b).bit_length(), 1);
        assert_eq!(Expr::repeat(Expr::sized(1, 1), 5).bit_length(), 5);
        assert_eq!(Expr::slice(a, 7, 0).bit_length(), 8);
    }

    #[test]
    fn only_signals_support_bit_select() {
        let a = sig(0, 8, true);
        assert!(a.supports_bit_select());
        assert!(!Expr::signed(a).supports_bit_select());
        assert!(!Expr::int(3).supports_bit_select());
    }

    #[test]
    fn twos_complement_shape() {
        let e = Expr::twos_complement(sig(0, 8, true));
        match e.kind() {
            ExprKind::Binary {
                op: BinaryOp::Plus,
                lhs,
                rhs,
            } => {
                assert!(matches!(lhs.kind(), ExprKind::Unary { op: UnaryOp::Not, .. }));
                assert_eq!(rhs.as_literal(), Some(ConstValue::int(1)));
            }
            other => panic!("expected Plus, got {other:?}"),
        }
    }

    #[test]
    fn serde_roundtrip() {
        let e = Expr::mux(
            Expr::binary(BinaryOp::Eq, sig(0, 4, false), Expr::int(0)),
            Expr::real(1.5),
            Expr::to_real(sig(1, 4, true)),
        );
        let json = serde_json::to_string(&e).unwrap();
        let restored: Expr = serde_json::from_str(&json).unwrap();
        assert_eq!(e, restored);
    }
}
