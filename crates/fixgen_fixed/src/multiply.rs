//! Fixed-point multiplication.

use fixgen_ast::{BinaryOp, Expr};
use tracing::trace;

use crate::convert::to_signed;
use crate::spec::{FixedSpec, Pointed};
use crate::value::{FixedExpr, FixedOp, Value};

/// `left * right`.
///
/// The raw product carries `lpoint + rpoint` fractional bits; shifting it
/// right by `min(lpoint, rpoint)` leaves it at `max(lpoint, rpoint)`. The
/// operands are not aligned first. A signed product is built from signed
/// operands and shifted arithmetically.
pub fn mul(left: impl Into<Value>, right: impl Into<Value>) -> FixedExpr {
    let (left, right) = (left.into(), right.into());
    let (lpoint, rpoint) = (left.point(), right.point());
    let point = lpoint.max(rpoint);
    let shift = lpoint.min(rpoint);
    let signed = left.signed() && right.signed();

    let (ldata, rdata) = if signed {
        (to_signed(left), to_signed(right))
    } else {
        (left, right)
    };
    let product = Expr::binary(BinaryOp::Times, ldata.to_expr(), rdata.to_expr());
    let rescale = if signed { BinaryOp::Sra } else { BinaryOp::Srl };
    let node = Expr::binary(rescale, product, Expr::int(i64::from(shift)));

    trace!(lpoint, rpoint, point, shift, signed, "fixed-point product");
    FixedExpr::new(FixedOp::Times, node, FixedSpec::new(point, signed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::{fixed_const, fixed_wire, FixedParams};
    use fixgen_ast::{eval_expr, EvalEnv, ExprKind, Module, ModuleId};

    #[test]
    fn rescales_by_smaller_point() {
        let mut m = Module::new(ModuleId::from_raw(0), "top");
        let a = fixed_wire(&mut m, "a", FixedParams::new().width(8).point(2)).unwrap();
        let b = fixed_wire(&mut m, "b", FixedParams::new().width(8).point(5)).unwrap();
        let p = mul(a, b);
        assert_eq!(p.point(), 5);
        match p.node().kind() {
            ExprKind::Binary { op, lhs, rhs } => {
                assert_eq!(*op, BinaryOp::Sra);
                assert!(matches!(lhs.kind(), ExprKind::Binary { op: BinaryOp::Times, .. }));
                assert_eq!(rhs.as_literal(), Some(fixgen_ast::ConstValue::int(2)));
            }
            other => panic!("expected Sra, got {other:?}"),
        }
    }

    #[test]
    fn unsigned_product_uses_logical_shift() {
        let mut m = Module::new(ModuleId::from_raw(0), "top");
        let params = FixedParams::new().width(8).point(1).signed(false);
        let a = fixed_wire(&mut m, "a", params).unwrap();
        let b = fixed_wire(&mut m, "b", params).unwrap();
        let p = mul(a, b);
        assert!(!p.signed());
        assert!(matches!(p.node().kind(), ExprKind::Binary { op: BinaryOp::Srl, .. }));
    }

    #[test]
    fn zero_shift_still_wraps_product() {
        let p = mul(3, 4);
        assert_eq!(p.point(), 0);
        assert!(matches!(p.node().kind(), ExprKind::Binary { op: BinaryOp::Sra, .. }));
        assert_eq!(eval_expr(&EvalEnv::new(), p.node()).unwrap().as_int(), Some(12));
    }

    #[test]
    fn constant_times_signal() {
        let mut m = Module::new(ModuleId::from_raw(0), "top");
        let a = fixed_wire(&mut m, "a", FixedParams::new().width(8).point(2)).unwrap();
        let c = fixed_const(-1.5, 2, true, false);
        // -1.5 * -0.5 = 0.75
        let p = mul(c, a);
        let env = EvalEnv::new().with(a.id(), -2);
        assert_eq!(eval_expr(&env, p.node()).unwrap().as_signed(), Some(3));
        assert_eq!(p.point(), 2);
    }
}
