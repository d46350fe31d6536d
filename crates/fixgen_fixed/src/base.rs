//! Behavior shared by every fixed-point-aware node, and signal writes.

use fixgen_ast::{Assignment, BinaryOp, Connection, Expr, Module, Subst};
use tracing::trace;

use crate::convert::{mask_low, shift_left, shift_right};
use crate::error::FixedError;
use crate::spec::Pointed;
use crate::value::{FixedConst, FixedExpr, FixedNode, FixedSignal, Value};

/// A node with a binary point that can take part in generated hardware.
pub trait FixedValue: Pointed {
    /// The AST-core expression for this node.
    fn expr(&self) -> Expr;

    /// The integer part: `self >>> point`.
    fn int_part(&self) -> Expr {
        Expr::binary(BinaryOp::Sra, self.expr(), Expr::int(i64::from(self.point())))
    }

    /// The fractional bits: `self & {point{1'b1}}`, or `self & 0` when the
    /// point is zero.
    fn dec_part(&self) -> Expr {
        match self.point() {
            0 => Expr::binary(BinaryOp::And, self.expr(), Expr::int(0)),
            point => mask_low(self.expr(), point),
        }
    }

    /// The raw bits `self[width-1:0]`, or `self[0:0]` without a width.
    fn raw(&self) -> Expr {
        let width = self.width().unwrap_or(1).max(1);
        Expr::slice(self.expr(), width - 1, 0)
    }

    /// Rescales a value being written into this node from its own point to
    /// this node's point.
    ///
    /// The result is a mux over the two points, shifting left when this node
    /// has more fractional bits, right when it has fewer, and passing the
    /// value through when they agree.
    fn adjust_incoming(&self, value: impl Into<Value>) -> Expr
    where
        Self: Sized,
    {
        let value = value.into();
        let (lpoint, rpoint) = (i64::from(self.point()), i64::from(value.point()));
        let rsigned = value.signed();
        let (lp, rp) = (Expr::int(lpoint), Expr::int(rpoint));

        let ldiff = Expr::mux(
            Expr::binary(BinaryOp::LessEq, lp.clone(), rp.clone()),
            Expr::int(0),
            Expr::int(lpoint - rpoint),
        );
        let rdiff = Expr::mux(
            Expr::binary(BinaryOp::GreaterEq, lp.clone(), rp.clone()),
            Expr::int(0),
            Expr::int(rpoint - lpoint),
        );
        let widened = shift_left(value.clone(), ldiff, rsigned).to_expr();
        let narrowed = shift_right(value.clone(), rdiff, rsigned).to_expr();

        Expr::mux(
            Expr::binary(BinaryOp::GreaterThan, lp.clone(), rp.clone()),
            widened,
            Expr::mux(
                Expr::binary(BinaryOp::LessThan, lp, rp),
                narrowed,
                value.to_expr(),
            ),
        )
    }
}

impl FixedValue for FixedSignal {
    fn expr(&self) -> Expr {
        Expr::signal(self.signal_ref())
    }
}

impl FixedValue for FixedConst {
    fn expr(&self) -> Expr {
        Expr::literal(self.value())
    }
}

impl FixedValue for FixedExpr {
    fn expr(&self) -> Expr {
        self.node().clone()
    }
}

impl FixedValue for FixedNode {
    fn expr(&self) -> Expr {
        match self {
            FixedNode::Signal(s) => s.expr(),
            FixedNode::Const(c) => c.expr(),
            FixedNode::Expr(e) => e.expr(),
            FixedNode::Plain(e) => e.clone(),
        }
    }
}

impl FixedSignal {
    /// A non-blocking write, rescaled to this signal's point.
    pub fn write(&self, value: impl Into<Value>) -> Subst {
        self.subst(self.adjust_incoming(value), false)
    }

    /// A blocking write, rescaled to this signal's point.
    pub fn write_blocking(&self, value: impl Into<Value>) -> Subst {
        self.subst(self.adjust_incoming(value), true)
    }

    /// A non-blocking write of the value's bits as they are.
    pub fn write_raw(&self, value: impl Into<Value>) -> Subst {
        self.subst(value.into().to_expr(), false)
    }

    /// Binds `value` to this port, rescaled to its point.
    pub fn connect(&self, value: impl Into<Value>) -> Connection {
        Connection {
            port: self.signal_ref(),
            value: self.adjust_incoming(value),
        }
    }

    fn declared_in(&self, module: &Module) -> bool {
        module.key() == self.owner()
            && module.id() == self.module()
            && module
                .signal(self.id())
                .is_some_and(|s| s.name == self.name() && s.signal_ref() == self.signal_ref())
    }

    fn subst(&self, value: Expr, blocking: bool) -> Subst {
        Subst {
            target: self.signal_ref(),
            value,
            blocking,
        }
    }

    /// Drives this signal continuously from `value`, rescaled to its point.
    ///
    /// `module` must be the module value that declared the signal; another
    /// module with the same ID is rejected.
    pub fn assign(&self, module: &mut Module, value: impl Into<Value>) -> Result<(), FixedError> {
        if !self.declared_in(module) {
            return Err(FixedError::ForeignSignal {
                signal: self.id().as_raw(),
                module: module.name().to_string(),
            });
        }
        let value = self.adjust_incoming(value);
        trace!(
            module = module.name(),
            signal = module.resolve(self.name()),
            "continuous assignment"
        );
        module.add_assignment(Assignment {
            target: self.id(),
            value,
        });
        Ok(())
    }
}
