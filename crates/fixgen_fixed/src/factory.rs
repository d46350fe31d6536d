//! Factories for fixed-point signals and constants.
//!
//! Each signal factory declares the signal in its module and returns a
//! [`FixedSignal`] handle. Constants are not registered anywhere.

use fixgen_ast::{ConstValue, Expr, Module, SignalDecl, SignalKind};
use fixgen_config::FixedDefaults;
use tracing::debug;

use crate::base::FixedValue;
use crate::convert::{scale_literal, scale_up};
use crate::error::FixedError;
use crate::spec::FixedSpec;
use crate::value::{FixedConst, FixedNode, FixedSignal, Literal, Value};

/// Shape of a fixed-point signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedParams {
    /// Bit width.
    pub width: u32,
    /// Number of fractional bits.
    pub point: u32,
    /// Array length, for memories.
    pub length: Option<u32>,
    /// Whether the signal is signed.
    pub signed: bool,
}

impl Default for FixedParams {
    fn default() -> Self {
        Self {
            width: 32,
            point: 0,
            length: None,
            signed: true,
        }
    }
}

impl FixedParams {
    /// A 32-bit signed integer (point 0) signal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parameters taken from the `[fixed]` section of `fixgen.toml`.
    pub fn from_config(defaults: &FixedDefaults) -> Self {
        Self {
            width: defaults.width,
            point: defaults.point,
            length: None,
            signed: defaults.signed,
        }
    }

    /// Sets the width.
    pub fn width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    /// Sets the binary point.
    pub fn point(mut self, point: u32) -> Self {
        self.point = point;
        self
    }

    /// Makes the signal an array of `length` entries.
    pub fn length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }

    /// Sets the signedness.
    pub fn signed(mut self, signed: bool) -> Self {
        self.signed = signed;
        self
    }

    fn spec(&self) -> FixedSpec {
        FixedSpec {
            width: Some(self.width),
            point: self.point,
            signed: self.signed,
            length: self.length,
        }
    }
}

fn declare(
    m: &mut Module,
    name: &str,
    kind: SignalKind,
    params: FixedParams,
    init: Option<Expr>,
) -> Result<FixedSignal, FixedError> {
    let signal = m.declare_signal(SignalDecl {
        name,
        kind,
        width: params.width,
        length: params.length,
        signed: params.signed,
        init,
    })?;
    let (signal, ident) = (signal.signal_ref(), signal.name);
    debug!(
        module = m.name(),
        signal = name,
        ?kind,
        width = params.width,
        point = params.point,
        signed = params.signed,
        "declared fixed-point signal"
    );
    Ok(FixedSignal::new(signal, ident, m.id(), m.key(), params.spec()))
}

/// Declares a fixed-point input port.
pub fn fixed_input(
    m: &mut Module,
    name: &str,
    params: FixedParams,
) -> Result<FixedSignal, FixedError> {
    declare(m, name, SignalKind::Input, params, None)
}

/// Declares a fixed-point output port.
pub fn fixed_output(
    m: &mut Module,
    name: &str,
    params: FixedParams,
) -> Result<FixedSignal, FixedError> {
    declare(m, name, SignalKind::Output, params, None)
}

/// Declares a fixed-point bidirectional port.
pub fn fixed_inout(
    m: &mut Module,
    name: &str,
    params: FixedParams,
) -> Result<FixedSignal, FixedError> {
    declare(m, name, SignalKind::Inout, params, None)
}

/// Declares a fixed-point register.
///
/// An initial value that is not already a fixed-point constant is scaled to
/// the register's point first.
pub fn fixed_reg(
    m: &mut Module,
    name: &str,
    params: FixedParams,
    initval: Option<Value>,
) -> Result<FixedSignal, FixedError> {
    let init = initval.map(|v| match v {
        Value::Node(FixedNode::Const(c)) => c.expr(),
        other => scale_up(other, params.point).to_expr(),
    });
    declare(m, name, SignalKind::Reg, params, init)
}

/// Declares a fixed-point wire.
pub fn fixed_wire(
    m: &mut Module,
    name: &str,
    params: FixedParams,
) -> Result<FixedSignal, FixedError> {
    declare(m, name, SignalKind::Wire, params, None)
}

/// A fixed-point constant at `point`.
///
/// Unless `raw` is set, `value` is a number in natural units and is stored
/// multiplied by `2^point`; with `raw` it is stored as given.
pub fn fixed_const(value: impl Into<Literal>, point: u32, signed: bool, raw: bool) -> FixedConst {
    let lit = value.into();
    let stored = if raw { lit } else { scale_literal(lit, point) };
    let value = match stored {
        Literal::Real(r) => ConstValue::Real(r),
        lit => ConstValue::Int {
            value: lit.as_int().unwrap_or_default(),
            width: None,
            signed,
        },
    };
    FixedConst::new(value, FixedSpec::new(point, signed))
}
