//! Bringing two operands to a common binary point.

use crate::convert::{shift_left, to_signed};
use crate::value::Value;

/// Left-shifts whichever operand has the smaller point so that both sit at
/// `max(lpoint, rpoint)`.
///
/// The operand that already has the larger point is returned untouched. When
/// `signed` is set, the shifted operand is also reinterpreted as signed.
pub fn adjust(
    left: impl Into<Value>,
    right: impl Into<Value>,
    lpoint: u32,
    rpoint: u32,
    signed: bool,
) -> (Value, Value) {
    let (left, right) = (left.into(), right.into());
    let ldiff = rpoint.saturating_sub(lpoint);
    let rdiff = lpoint.saturating_sub(rpoint);
    (
        rescale(left, ldiff, signed),
        rescale(right, rdiff, signed),
    )
}

fn rescale(value: Value, diff: u32, signed: bool) -> Value {
    if diff == 0 {
        return value;
    }
    let shifted = shift_left(value, diff, signed);
    if signed {
        to_signed(shifted)
    } else {
        shifted
    }
}
