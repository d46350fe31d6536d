//! Fixed-point signals and arithmetic for fixgen.
//!
//! Signals and constants carry a binary point and a signedness flag. The
//! operators in this crate build AST-core expression trees that keep both
//! operands aligned on a common point, so generated hardware computes in
//! two's-complement fixed point without the caller shifting by hand.
//!
//! ```ignore
//! let mut m = Module::new(ModuleId::from_raw(0), "mac");
//! let x = fixed_input(&mut m, "x", FixedParams::new().width(16).point(8))?;
//! let k = fixed_const(0.75, 8, true, false);
//! let acc = fixed_reg(&mut m, "acc", FixedParams::new().width(32).point(8), None)?;
//! let update = acc.write(acc + x * k);
//! ```

#![warn(missing_docs)]

pub mod align;
pub mod base;
pub mod convert;
pub mod divide;
pub mod error;
pub mod factory;
pub mod multiply;
pub mod ops;
pub mod overlay;
pub mod spec;
pub mod value;

pub use align::adjust;
pub use base::FixedValue;
pub use convert::{
    fixed_to_int, fixed_to_int_low, fixed_to_real, shift_left, shift_right, to_fixed, to_signed,
};
pub use divide::div;
pub use error::FixedError;
pub use factory::{
    fixed_const, fixed_inout, fixed_input, fixed_output, fixed_reg, fixed_wire, FixedParams,
};
pub use multiply::mul;
pub use overlay::{add, eq, ge, gt, le, lt, ne, neg, pos, sub};
pub use spec::{FixedSpec, Pointed};
pub use value::{FixedConst, FixedExpr, FixedNode, FixedOp, FixedSignal, Literal, Value};
