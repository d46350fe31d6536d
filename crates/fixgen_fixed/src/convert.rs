//! Conversions between scaled fixed-point values, integers and reals.
//!
//! Every conversion folds at compile time when its operand is a literal and
//! builds a node otherwise. The public functions take the point as `i32` and
//! reject negative points with [`FixedError::InvalidArgument`]; the crate
//! itself calls the unchecked `u32` forms.

use fixgen_ast::{BinaryOp, ConstValue, Expr};

use crate::error::FixedError;
use crate::spec::{FixedSpec, Pointed};
use crate::value::{FixedConst, FixedExpr, FixedNode, FixedOp, Literal, Value};

fn check_point(point: i32) -> Result<u32, FixedError> {
    u32::try_from(point).map_err(|_| FixedError::InvalidArgument { point })
}

/// `2^point`, saturating at `i64::MAX`.
pub(crate) fn pow2(point: u32) -> i64 {
    if point < 63 {
        1i64 << point
    } else {
        i64::MAX
    }
}

fn scale_int(value: i64, point: u32) -> i64 {
    let scaled = i128::from(value) * i128::from(pow2(point));
    i64::try_from(scaled).unwrap_or(if value < 0 { i64::MIN } else { i64::MAX })
}

fn scale_real(value: f64, point: u32) -> f64 {
    value * 2f64.powi(point.min(1023) as i32)
}

/// Scales `value` up by `2^point`.
///
/// Literals fold to `trunc(value * 2^point)`; literal nodes are multiplied
/// by a `2^point` literal; other nodes are shifted left, signed unless their
/// spec says otherwise.
pub fn to_fixed(value: impl Into<Value>, point: i32) -> Result<Value, FixedError> {
    let point = check_point(point)?;
    Ok(scale_up(value.into(), point))
}

pub(crate) fn scale_up(value: Value, point: u32) -> Value {
    if point == 0 {
        return value;
    }
    match value {
        Value::Lit(lit) => Value::Lit(scale_literal(lit, point)),
        value => {
            if let Some(e) = value.as_literal_node() {
                return Value::plain(Expr::binary(BinaryOp::Times, e.clone(), Expr::int(pow2(point))));
            }
            let signed = value.signed();
            shift_left(value, point, signed)
        }
    }
}

/// `trunc(lit * 2^point)` as an integer literal.
pub(crate) fn scale_literal(lit: Literal, point: u32) -> Literal {
    if point == 0 {
        return lit;
    }
    match lit {
        Literal::Real(r) => Literal::int(scale_real(r, point).trunc() as i64),
        lit => Literal::int(scale_int(lit.as_int().unwrap_or_default(), point)),
    }
}

/// Scales `value` down by `2^point`, dropping the fractional bits.
///
/// Literals fold with division truncating toward zero; integer literal
/// nodes become a division node; other nodes are shifted right.
pub fn fixed_to_int(value: impl Into<Value>, point: i32) -> Result<Value, FixedError> {
    let point = check_point(point)?;
    Ok(scale_down(value.into(), point))
}

pub(crate) fn scale_down(value: Value, point: u32) -> Value {
    if point == 0 {
        return value;
    }
    match value {
        Value::Lit(Literal::Real(r)) => {
            Value::Lit(Literal::int((r / 2f64.powi(point.min(1023) as i32)).trunc() as i64))
        }
        Value::Lit(lit) => {
            let v = lit.as_int().unwrap_or_default();
            let q = if point < 63 { v / pow2(point) } else { 0 };
            Value::Lit(Literal::int(q))
        }
        value => {
            if let Some(e) = value.as_literal_node() {
                if matches!(e.as_literal(), Some(ConstValue::Int { .. })) {
                    return Value::plain(Expr::binary(BinaryOp::Divide, e.clone(), Expr::int(pow2(point))));
                }
            }
            let signed = value.signed();
            shift_right(value, point, signed)
        }
    }
}

/// The fractional bits of `value` at `point`.
///
/// Literals fold to the non-negative remainder modulo `2^point`; nodes are
/// masked with `point` one-bits. A zero point gives `0`.
pub fn fixed_to_int_low(value: impl Into<Value>, point: i32) -> Result<Value, FixedError> {
    let point = check_point(point)?;
    Ok(low_bits(value.into(), point))
}

pub(crate) fn low_bits(value: Value, point: u32) -> Value {
    if point == 0 {
        return Value::Lit(Literal::int(0));
    }
    match value {
        Value::Lit(Literal::Real(r)) => {
            let m = 2f64.powi(point.min(1023) as i32);
            Value::Lit(Literal::int(r.rem_euclid(m).trunc() as i64))
        }
        Value::Lit(lit) => {
            let v = lit.as_int().unwrap_or_default();
            let low = if point < 63 { v.rem_euclid(pow2(point)) } else { v };
            Value::Lit(Literal::int(low))
        }
        value => Value::plain(mask_low(value.to_expr(), point)),
    }
}

/// `expr & {point{1'b1}}`. `point` must be non-zero.
pub(crate) fn mask_low(expr: Expr, point: u32) -> Expr {
    Expr::binary(BinaryOp::And, expr, Expr::repeat(Expr::sized(1, 1), point))
}

/// The most significant bit of `expr`, by bit select when the node kind
/// allows it and by shift-and-mask otherwise.
pub(crate) fn msb(expr: &Expr) -> Expr {
    let top = expr.bit_length().saturating_sub(1);
    if expr.supports_bit_select() {
        Expr::index(expr.clone(), top)
    } else {
        Expr::binary(
            BinaryOp::And,
            Expr::binary(BinaryOp::Srl, expr.clone(), Expr::int(i64::from(top))),
            Expr::sized(1, 1),
        )
    }
}

/// The real number `value / 2^point`.
///
/// A zero point converts with `$itor`. Otherwise a signed node selects
/// between the non-negative reading and the negated reading of its two's
/// complement on the sign bit; an unsigned node only has the first.
pub fn fixed_to_real(value: impl Into<Value>, point: i32) -> Result<Value, FixedError> {
    let point = check_point(point)?;
    let value = value.into();
    if value.is_real_literal() {
        return Err(FixedError::TypeMismatch {
            reason: "value is already real".to_string(),
        });
    }
    if point == 0 {
        return Ok(Value::plain(Expr::to_real(value.to_expr())));
    }
    if let Value::Lit(lit) = value {
        let v = lit.as_int().unwrap_or_default();
        return Ok(Value::Lit(Literal::Real(v as f64 / 2f64.powi(point.min(1023) as i32))));
    }

    let signed = value.signed();
    let expr = value.to_expr();
    let non_negative = real_reading(&expr, point, signed);
    if !signed {
        return Ok(Value::plain(non_negative));
    }

    let negated = Expr::twos_complement(expr.clone());
    let negative = Expr::binary(
        BinaryOp::Times,
        real_reading(&negated, point, true),
        Expr::to_real(Expr::int(-1)),
    );
    let is_non_negative = Expr::binary(BinaryOp::Eq, msb(&expr), Expr::int(0));
    Ok(Value::plain(Expr::mux(is_non_negative, non_negative, negative)))
}

/// `itor(int part) + itor(frac part) / itor(2^point)`.
fn real_reading(expr: &Expr, point: u32, signed: bool) -> Expr {
    let int_part = shift_right(Value::plain(expr.clone()), point, signed).to_expr();
    let frac_part = mask_low(expr.clone(), point);
    Expr::binary(
        BinaryOp::Plus,
        Expr::to_real(int_part),
        Expr::binary(
            BinaryOp::Divide,
            Expr::to_real(frac_part),
            Expr::to_real(Expr::int(pow2(point))),
        ),
    )
}

/// Shifts `value` left by `size`, folding when both are compile-time integers.
///
/// A fold whose result does not fit in an `i64` is emitted as a shift node
/// instead.
pub fn shift_left(value: impl Into<Value>, size: impl Into<Value>, _signed: bool) -> Value {
    let (value, size) = (value.into(), size.into());
    if let (Some((v, signed)), Some((s, _))) = (value.as_const_int(), size.as_const_int()) {
        if let Some(shifted) = fold_shl(v, s) {
            return Value::Lit(Literal::Int { value: shifted, signed });
        }
    }
    Value::plain(Expr::binary(BinaryOp::Sll, value.to_expr(), size.to_expr()))
}

fn fold_shl(value: i64, size: i64) -> Option<i64> {
    if value == 0 {
        return Some(0);
    }
    let size = u32::try_from(size).ok().filter(|s| *s < 64)?;
    i64::try_from(i128::from(value) << size).ok()
}

/// Shifts `value` right by `size`: arithmetic when `signed`, logical otherwise.
///
/// Compile-time integers fold with an arithmetic shift.
pub fn shift_right(value: impl Into<Value>, size: impl Into<Value>, signed: bool) -> Value {
    let (value, size) = (value.into(), size.into());
    if let (Some((v, lit_signed)), Some((s, _))) = (value.as_const_int(), size.as_const_int()) {
        let shifted = if s >= 0 { v >> s.min(63) } else { v };
        return Value::Lit(Literal::Int {
            value: shifted,
            signed: lit_signed,
        });
    }
    let op = if signed { BinaryOp::Sra } else { BinaryOp::Srl };
    Value::plain(Expr::binary(op, value.to_expr(), size.to_expr()))
}

/// Reinterprets `value` as signed, keeping its point.
///
/// Integer literals are re-tagged, signed operands pass through, and
/// anything else is wrapped in `$signed(..)`.
pub fn to_signed(value: impl Into<Value>) -> Value {
    match value.into() {
        Value::Lit(lit) => match lit.as_int() {
            Some(v) => Value::Lit(Literal::int(v)),
            None => Value::Lit(lit),
        },
        Value::Node(FixedNode::Const(c)) => {
            let mut spec = c.spec();
            spec.signed = true;
            let value = match c.value() {
                ConstValue::Int { value, width, .. } => ConstValue::Int {
                    value,
                    width,
                    signed: true,
                },
                real => real,
            };
            Value::Node(FixedNode::Const(FixedConst::new(value, spec)))
        }
        value => {
            if let Some((v, _)) = value.as_const_int() {
                return Value::plain(Expr::literal(Literal::int(v).to_const()));
            }
            if value.signed() {
                return value;
            }
            let point = value.point();
            Value::Node(FixedNode::Expr(FixedExpr::new(
                FixedOp::Reinterpret,
                Expr::signed(value.to_expr()),
                FixedSpec::new(point, true),
            )))
        }
    }
}
