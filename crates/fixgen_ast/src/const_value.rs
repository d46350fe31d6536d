//! Literal values carried by [`ExprKind::Literal`](crate::expr::ExprKind::Literal) nodes.

use serde::{Deserialize, Serialize};

/// Width of an unsized integer literal, as in Verilog.
pub const UNSIZED_WIDTH: u32 = 32;

/// A literal constant in an expression tree.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ConstValue {
    /// An integer literal.
    ///
    /// `width: None` is an unsized literal (`42`); `Some(w)` is a sized one
    /// (`8'd42`). Unsized decimal literals are signed, sized ones usually not.
    Int {
        /// The value.
        value: i64,
        /// Explicit bit width, if any.
        width: Option<u32>,
        /// Whether the literal is signed.
        signed: bool,
    },
    /// A real literal.
    Real(f64),
}

impl ConstValue {
    /// An unsized, signed integer literal.
    pub fn int(value: i64) -> Self {
        ConstValue::Int {
            value,
            width: None,
            signed: true,
        }
    }

    /// A sized, unsigned integer literal.
    pub fn sized(value: i64, width: u32) -> Self {
        ConstValue::Int {
            value,
            width: Some(width),
            signed: false,
        }
    }

    /// Returns the bit width this literal occupies.
    ///
    /// Unsized literals take [`UNSIZED_WIDTH`] bits, or more if the value
    /// needs them. Reals are 64 bits.
    pub fn bit_length(&self) -> u32 {
        match *self {
            ConstValue::Int {
                width: Some(w), ..
            } => w,
            ConstValue::Int {
                value,
                width: None,
                signed,
            } => UNSIZED_WIDTH.max(min_bits(value, signed)),
            ConstValue::Real(_) => 64,
        }
    }

    /// Returns `true` for signed integers and for reals.
    pub fn is_signed(&self) -> bool {
        match *self {
            ConstValue::Int { signed, .. } => signed,
            ConstValue::Real(_) => true,
        }
    }
}

/// Minimum number of bits needed to hold `value`, including a sign bit if `signed`.
pub fn min_bits(value: i64, signed: bool) -> u32 {
    let magnitude = if value < 0 {
        64 - (!value).leading_zeros()
    } else {
        64 - value.leading_zeros()
    };
    let bits = if signed || value < 0 {
        magnitude + 1
    } else {
        magnitude
    };
    bits.max(1)
}
