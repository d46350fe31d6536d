//! End-to-end fixed-point scenarios.
//!
//! Each test declares signals in a module, builds an expression with the
//! fixed-point operators and checks both the shape of the generated tree and
//! the value it computes under the constant evaluator.

use fixgen_ast::{eval_expr, BinaryOp, ConstValue, EvalEnv, Expr, ExprKind, Module, ModuleId};
use fixgen_config::load_config_from_str;
use fixgen_fixed::{
    div, fixed_const, fixed_input, fixed_output, fixed_reg, fixed_to_int, fixed_to_real,
    fixed_wire, mul, FixedParams, FixedValue, Literal, Pointed, Value,
};

fn module(name: &str) -> Module {
    Module::new(ModuleId::from_raw(0), name)
}

fn binary(expr: &Expr) -> (BinaryOp, &Expr, &Expr) {
    match expr.kind() {
        ExprKind::Binary { op, lhs, rhs } => (*op, lhs, rhs),
        other => panic!("expected a binary node, got {other:?}"),
    }
}

// ============================================================================
// Constants
// ============================================================================

#[test]
fn const_stores_scaled_value_and_converts_back() {
    let c = fixed_const(3, 4, true, false);
    assert_eq!(c.as_int(), Some(48));
    assert_eq!(c.point(), 4);

    let back = fixed_to_int(48, 4).unwrap();
    assert_eq!(back, Value::Lit(Literal::int(3)));
}

// ============================================================================
// Point unification
// ============================================================================

#[test]
fn reg_plus_wire_aligns_the_reg() {
    let mut m = module("acc");
    let r = fixed_reg(&mut m, "r", FixedParams::new().width(16).point(2), None).unwrap();
    let w = fixed_wire(&mut m, "w", FixedParams::new().width(16).point(4)).unwrap();

    let sum = r + w;
    assert_eq!(sum.point(), 4);
    assert!(sum.signed());

    let (op, lhs, rhs) = binary(sum.node());
    assert_eq!(op, BinaryOp::Plus);
    let (shift, shifted, amount) = binary(lhs);
    assert_eq!(shift, BinaryOp::Sll);
    assert_eq!(shifted, &r.expr());
    assert_eq!(amount.as_literal(), Some(ConstValue::int(2)));
    assert!(lhs.is_signed());
    assert_eq!(rhs, &w.expr());

    // -1.25 + 0.5625 = -0.6875
    let env = EvalEnv::new().with(r.id(), -5).with(w.id(), 9);
    assert_eq!(eval_expr(&env, sum.node()).unwrap().as_signed(), Some(-11));
}

#[test]
fn mixed_signedness_skips_reinterpretation() {
    let mut m = module("acc");
    let r = fixed_reg(&mut m, "r", FixedParams::new().width(8).point(0).signed(false), None).unwrap();
    let w = fixed_wire(&mut m, "w", FixedParams::new().width(8).point(2)).unwrap();
    let sum = r + w;
    // Mixed signedness: the sum is unsigned and no reinterpretation happens.
    assert!(!sum.signed());
    let (_, lhs, _) = binary(sum.node());
    assert!(!matches!(lhs.kind(), ExprKind::Signed(_)));
}

// ============================================================================
// Multiply
// ============================================================================

#[test]
fn signed_product_shifts_by_smaller_point() {
    let mut m = module("mul");
    let a = fixed_input(&mut m, "a", FixedParams::new().width(8).point(2)).unwrap();
    let b = fixed_input(&mut m, "b", FixedParams::new().width(8).point(3)).unwrap();

    let p = mul(a, b);
    assert_eq!(p, a * b);
    assert_eq!(p.point(), 3);
    let (op, product, amount) = binary(p.node());
    assert_eq!(op, BinaryOp::Sra);
    assert_eq!(binary(product).0, BinaryOp::Times);
    assert_eq!(amount.as_literal(), Some(ConstValue::int(2)));

    // -1.5 * 2.25 = -3.375
    let env = EvalEnv::new().with(a.id(), -6).with(b.id(), 18);
    assert_eq!(eval_expr(&env, p.node()).unwrap().as_signed(), Some(-27));
}

// ============================================================================
// Divide
// ============================================================================

#[test]
fn negative_over_positive_gives_negative_quotient() {
    let mut m = module("div");
    let a = fixed_input(&mut m, "a", FixedParams::new().width(16).point(4)).unwrap();
    let b = fixed_input(&mut m, "b", FixedParams::new().width(16).point(4)).unwrap();

    let q = div(a, b);
    assert_eq!(q.point(), 4);
    assert!(q.signed());

    // -6.0 / 1.5 = -4.0: magnitudes 96 / 24 = 4, shifted onto point 4.
    let env = EvalEnv::new().with(a.id(), -96).with(b.id(), 24);
    assert_eq!(eval_expr(&env, q.node()).unwrap().as_signed(), Some(-64));
}

#[test]
fn divide_matches_integer_division_of_magnitudes() {
    let mut m = module("div");
    let a = fixed_wire(&mut m, "a", FixedParams::new().width(12)).unwrap();
    let b = fixed_wire(&mut m, "b", FixedParams::new().width(12)).unwrap();
    let q = a / b;
    for (x, y) in [(-100i128, 7i128), (100, -7), (-100, -7), (2047, 1), (-2048, 2)] {
        let env = EvalEnv::new().with(a.id(), x).with(b.id(), y);
        let got = eval_expr(&env, q.node()).unwrap().as_signed().unwrap();
        assert_eq!(got.signum(), (x / y).signum(), "{x} / {y}");
        assert_eq!(got.abs(), x.abs() / y.abs(), "{x} / {y}");
    }
}

// ============================================================================
// Pipelines
// ============================================================================

#[test]
fn multiply_accumulate_write() {
    let cfg = load_config_from_str("[fixed]\nwidth = 24\npoint = 8\n").unwrap();
    let params = FixedParams::from_config(&cfg.fixed);

    let mut m = module("mac");
    let x = fixed_input(&mut m, "x", params).unwrap();
    let acc = fixed_reg(&mut m, "acc", params, Some(Value::from(0.5))).unwrap();
    let k = fixed_const(0.75, 8, true, false);

    let next = acc + x * k;
    assert_eq!(next.point(), 8);
    let write = acc.write(&next);
    assert_eq!(write.target, acc.signal_ref());

    // 1.0 + 2.0 * 0.75 = 2.5
    let env = EvalEnv::new().with(x.id(), 512).with(acc.id(), 256);
    assert_eq!(eval_expr(&env, &write.value).unwrap().as_signed(), Some(640));

    let init = m.signal(acc.id()).and_then(|s| s.init.clone());
    assert_eq!(init, Some(Expr::int(128)));
}

#[test]
fn output_driven_at_a_different_point() {
    let mut m = module("scale");
    let x = fixed_input(&mut m, "x", FixedParams::new().width(16).point(8)).unwrap();
    let y = fixed_output(&mut m, "y", FixedParams::new().width(16).point(4)).unwrap();
    y.assign(&mut m, x).unwrap();

    let value = &m.assignments()[0].value;
    // 3.5 at point 8 is 896; at point 4 it is 56.
    let env = EvalEnv::new().with(x.id(), 896);
    assert_eq!(eval_expr(&env, value).unwrap().as_signed(), Some(56));
}

#[test]
fn quotient_to_real() {
    let mut m = module("real");
    let a = fixed_wire(&mut m, "a", FixedParams::new().width(16).point(4)).unwrap();
    let b = fixed_wire(&mut m, "b", FixedParams::new().width(16).point(4)).unwrap();
    let q = a / b;
    let r = fixed_to_real(&q, q.point() as i32).unwrap();
    // -6.0 / 2.0 = -3.0
    let env = EvalEnv::new().with(a.id(), -96).with(b.id(), 32);
    assert_eq!(eval_expr(&env, &r.to_expr()).unwrap().as_real(), -3.0);
}

#[test]
fn fractional_accessors() {
    let mut m = module("parts");
    let x = fixed_wire(&mut m, "x", FixedParams::new().width(8).point(3)).unwrap();
    // 0b0101_0110 is 10.75
    let env = EvalEnv::new().with(x.id(), 0b0101_0110);
    assert_eq!(eval_expr(&env, &x.int_part()).unwrap().as_int(), Some(10));
    assert_eq!(eval_expr(&env, &x.dec_part()).unwrap().as_int(), Some(0b110));
    assert_eq!(eval_expr(&env, &x.raw()).unwrap().as_int(), Some(0b0101_0110));
}
