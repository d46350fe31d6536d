//! Fixed-point division.
//!
//! The quotient is computed on magnitudes and the sign restored afterwards:
//!
//! 1. take each operand's sign bit,
//! 2. replace signed operands by their absolute value,
//! 3. divide the magnitudes,
//! 4. negate the quotient if the sign bits differ,
//! 5. shift the quotient left onto the result point.

use fixgen_ast::{BinaryOp, Expr, UnaryOp};
use tracing::trace;

use crate::align::adjust;
use crate::convert::msb;
use crate::spec::{FixedSpec, Pointed};
use crate::value::{FixedExpr, FixedOp, Value};

/// `left / right`, at point `max(lpoint, rpoint)`.
pub fn div(left: impl Into<Value>, right: impl Into<Value>) -> FixedExpr {
    let (left, right) = (left.into(), right.into());
    let (lpoint, rpoint) = (left.point(), right.point());
    let (lsigned, rsigned) = (left.signed(), right.signed());
    let point = lpoint.max(rpoint);
    let signed = lsigned && rsigned;

    let (ldata, rdata, shift) = if lpoint <= rpoint {
        let (l, r) = adjust(left, right, lpoint, rpoint, signed);
        (l.to_expr(), r.to_expr(), point)
    } else {
        (left.to_expr(), right.to_expr(), point - (lpoint - rpoint))
    };

    let lmsb = msb(&ldata);
    let rmsb = msb(&rdata);
    let labs = magnitude(ldata, &lmsb, lsigned);
    let rabs = magnitude(rdata, &rmsb, rsigned);
    let quotient = Expr::binary(BinaryOp::Divide, labs, rabs);

    let mut node = if signed {
        Expr::mux(
            Expr::binary(BinaryOp::Eq, lmsb, rmsb),
            quotient.clone(),
            Expr::twos_complement(quotient),
        )
    } else {
        quotient
    };
    if shift > 0 {
        node = Expr::binary(BinaryOp::Sll, node, Expr::int(i64::from(shift)));
    }

    trace!(lpoint, rpoint, point, shift, signed, "fixed-point quotient");
    FixedExpr::new(FixedOp::Divide, node, FixedSpec::new(point, signed))
}

/// `!sign ? data : ~data + 1` for signed operands, `data` otherwise.
fn magnitude(data: Expr, sign: &Expr, signed: bool) -> Expr {
    if !signed {
        return data;
    }
    Expr::mux(
        Expr::unary(UnaryOp::LogicalNot, sign.clone()),
        data.clone(),
        Expr::twos_complement(data),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::{fixed_wire, FixedParams};
    use fixgen_ast::{eval_expr, EvalEnv, ExprKind, Module, ModuleId};

    fn module() -> Module {
        Module::new(ModuleId::from_raw(0), "top")
    }

    #[test]
    fn signs_combine_by_xor() {
        let mut m = module();
        let a = fixed_wire(&mut m, "a", FixedParams::new().width(8)).unwrap();
        let b = fixed_wire(&mut m, "b", FixedParams::new().width(8)).unwrap();
        let q = div(a, b);
        assert_eq!(q.point(), 0);
        assert!(q.signed());
        for (x, y) in [(7, 2), (-7, 2), (7, -2), (-7, -2), (-128, 3), (0, -5)] {
            let env = EvalEnv::new().with(a.id(), x).with(b.id(), y);
            let got = eval_expr(&env, q.node()).unwrap().as_signed();
            assert_eq!(got, Some(x / y), "{x} / {y}");
        }
    }

    #[test]
    fn unsigned_operands_divide_directly() {
        let mut m = module();
        let params = FixedParams::new().width(8).signed(false);
        let a = fixed_wire(&mut m, "a", params).unwrap();
        let b = fixed_wire(&mut m, "b", params).unwrap();
        let q = div(a, b);
        assert!(!q.signed());
        assert!(matches!(
            q.node().kind(),
            ExprKind::Binary {
                op: BinaryOp::Divide,
                ..
            }
        ));
    }

    #[test]
    fn left_point_not_larger_aligns_then_shifts_by_point() {
        let mut m = module();
        let a = fixed_wire(&mut m, "a", FixedParams::new().width(8).point(1)).unwrap();
        let b = fixed_wire(&mut m, "b", FixedParams::new().width(8).point(2)).unwrap();
        let q = div(a, b);
        assert_eq!(q.point(), 2);
        match q.node().kind() {
            ExprKind::Binary { op, rhs, .. } => {
                assert_eq!(*op, BinaryOp::Sll);
                assert_eq!(rhs.as_literal(), Some(fixgen_ast::ConstValue::int(2)));
            }
            other => panic!("expected Sll, got {other:?}"),
        }
        // 3.0 / -1.5 = -2.0
        let env = EvalEnv::new().with(a.id(), 6).with(b.id(), -6);
        assert_eq!(eval_expr(&env, q.node()).unwrap().as_signed(), Some(-8));
    }

    #[test]
    fn larger_left_point_shifts_by_right_point() {
        let mut m = module();
        let a = fixed_wire(&mut m, "a", FixedParams::new().width(8).point(3)).unwrap();
        let b = fixed_wire(&mut m, "b", FixedParams::new().width(8).point(1)).unwrap();
        let q = div(a, b);
        assert_eq!(q.point(), 3);
        // 2.5 / 0.5 = 5.0, quotient 20/1 at point 2, shifted by 1
        let env = EvalEnv::new().with(a.id(), 20).with(b.id(), 1);
        assert_eq!(eval_expr(&env, q.node()).unwrap().as_signed(), Some(40));
    }

    #[test]
    fn equal_points_do_not_shift() {
        let mut m = module();
        let a = fixed_wire(&mut m, "a", FixedParams::new().width(8)).unwrap();
        let b = fixed_wire(&mut m, "b", FixedParams::new().width(8)).unwrap();
        let q = div(a, b);
        assert!(matches!(q.node().kind(), ExprKind::Mux { .. }));
    }
}
