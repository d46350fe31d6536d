//! Additive, comparison and unary operators.
//!
//! All binary operators here share one unification rule: the result takes
//! the larger of the two points, is signed only if both operands are, and
//! the operand with fewer fractional bits is shifted up before the node is
//! built. Ordering comparisons then drop the signed flag of the result;
//! `==` and `!=` keep it.

use fixgen_ast::{BinaryOp, Expr, UnaryOp};
use tracing::trace;

use crate::align::adjust;
use crate::spec::{FixedSpec, Pointed};
use crate::value::{FixedExpr, FixedOp, Value};

fn unify(op: FixedOp, ast: BinaryOp, left: Value, right: Value) -> FixedExpr {
    let (lpoint, rpoint) = (left.point(), right.point());
    let point = lpoint.max(rpoint);
    let signed = left.signed() && right.signed();
    let (ldata, rdata) = adjust(left, right, lpoint, rpoint, signed);
    // Only the result flag of an ordering comparison changes; the operands
    // keep their signedness, so the comparison itself stays signed.
    let signed = signed && !op.is_ordering();
    trace!(?op, lpoint, rpoint, point, signed, "fixed-point binary node");
    FixedExpr::new(
        op,
        Expr::binary(ast, ldata.to_expr(), rdata.to_expr()),
        FixedSpec::new(point, signed),
    )
}

/// `left + right`
pub fn add(left: impl Into<Value>, right: impl Into<Value>) -> FixedExpr {
    unify(FixedOp::Plus, BinaryOp::Plus, left.into(), right.into())
}

/// `left - right`
pub fn sub(left: impl Into<Value>, right: impl Into<Value>) -> FixedExpr {
    unify(FixedOp::Minus, BinaryOp::Minus, left.into(), right.into())
}

/// `left < right`
pub fn lt(left: impl Into<Value>, right: impl Into<Value>) -> FixedExpr {
    unify(FixedOp::LessThan, BinaryOp::LessThan, left.into(), right.into())
}

/// `left <= right`
pub fn le(left: impl Into<Value>, right: impl Into<Value>) -> FixedExpr {
    unify(FixedOp::LessEq, BinaryOp::LessEq, left.into(), right.into())
}

/// `left > right`
pub fn gt(left: impl Into<Value>, right: impl Into<Value>) -> FixedExpr {
    unify(FixedOp::GreaterThan, BinaryOp::GreaterThan, left.into(), right.into())
}

/// `left >= right`
pub fn ge(left: impl Into<Value>, right: impl Into<Value>) -> FixedExpr {
    unify(FixedOp::GreaterEq, BinaryOp::GreaterEq, left.into(), right.into())
}

/// `left == right`
pub fn eq(left: impl Into<Value>, right: impl Into<Value>) -> FixedExpr {
    unify(FixedOp::Eq, BinaryOp::Eq, left.into(), right.into())
}

/// `left != right`
pub fn ne(left: impl Into<Value>, right: impl Into<Value>) -> FixedExpr {
    unify(FixedOp::NotEq, BinaryOp::NotEq, left.into(), right.into())
}

fn unary(op: FixedOp, ast: UnaryOp, value: Value) -> FixedExpr {
    let spec = FixedSpec::new(value.point(), value.signed());
    trace!(?op, point = spec.point, signed = spec.signed, "fixed-point unary node");
    FixedExpr::new(op, Expr::unary(ast, value.to_expr()), spec)
}

/// `-value`, keeping its point and signedness.
pub fn neg(value: impl Into<Value>) -> FixedExpr {
    unary(FixedOp::UnaryMinus, UnaryOp::Uminus, value.into())
}

/// `+value`, keeping its point and signedness.
pub fn pos(value: impl Into<Value>) -> FixedExpr {
    unary(FixedOp::UnaryPlus, UnaryOp::Uplus, value.into())
}
