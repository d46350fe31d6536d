//! Operands of the fixed-point layer.
//!
//! Every operand is a [`Value`]: either a compile-time [`Literal`] or a
//! [`FixedNode`] that wraps an AST-core expression together with its
//! [`FixedSpec`]. Literals and plain expressions have point `0`.

use fixgen_ast::{ConstValue, Expr, ExprKind, ModuleId, ModuleKey, SignalId, SignalKind, SignalRef};
use fixgen_common::Ident;
use serde::{Deserialize, Serialize};

use crate::base::FixedValue;
use crate::spec::{FixedSpec, Pointed};

/// A compile-time number, folded without building any node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    /// An integer. Plain Rust integers become signed literals.
    Int {
        /// The value.
        value: i64,
        /// Whether the literal is signed.
        signed: bool,
    },
    /// A boolean, treated as a one-bit unsigned integer.
    Bool(bool),
    /// A real number.
    Real(f64),
}

impl Literal {
    /// A signed integer literal.
    pub fn int(value: i64) -> Self {
        Literal::Int {
            value,
            signed: true,
        }
    }

    /// An unsigned integer literal.
    pub fn unsigned(value: i64) -> Self {
        Literal::Int {
            value,
            signed: false,
        }
    }

    /// Whether the literal is signed. Reals always are; booleans never are.
    pub fn is_signed(&self) -> bool {
        match *self {
            Literal::Int { signed, .. } => signed,
            Literal::Bool(_) => false,
            Literal::Real(_) => true,
        }
    }

    /// The integer value of an integer or boolean literal.
    pub fn as_int(&self) -> Option<i64> {
        match *self {
            Literal::Int { value, .. } => Some(value),
            Literal::Bool(b) => Some(i64::from(b)),
            Literal::Real(_) => None,
        }
    }

    /// The AST-core literal for this value.
    pub fn to_const(&self) -> ConstValue {
        match *self {
            Literal::Int { value, signed } => ConstValue::Int {
                value,
                width: None,
                signed,
            },
            Literal::Bool(b) => ConstValue::sized(i64::from(b), 1),
            Literal::Real(r) => ConstValue::Real(r),
        }
    }

    /// A literal node for this value.
    pub fn expr(&self) -> Expr {
        Expr::literal(self.to_const())
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Literal::int(value)
    }
}

impl From<i32> for Literal {
    fn from(value: i32) -> Self {
        Literal::int(i64::from(value))
    }
}

impl From<u32> for Literal {
    fn from(value: u32) -> Self {
        Literal::int(i64::from(value))
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Literal::Bool(value)
    }
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Literal::Real(value)
    }
}

/// The operation that produced a [`FixedExpr`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FixedOp {
    /// `a + b`
    Plus,
    /// `a - b`
    Minus,
    /// `a * b`, rescaled after the product.
    Times,
    /// `a / b`, computed on magnitudes.
    Divide,
    /// `a < b`
    LessThan,
    /// `a > b`
    GreaterThan,
    /// `a <= b`
    LessEq,
    /// `a >= b`
    GreaterEq,
    /// `a == b`
    Eq,
    /// `a != b`
    NotEq,
    /// `+a`
    UnaryPlus,
    /// `-a`
    UnaryMinus,
    /// `$signed(a)`, keeping the point of `a`.
    Reinterpret,
}

impl FixedOp {
    /// Returns `true` for `<`, `>`, `<=` and `>=`.
    pub fn is_ordering(self) -> bool {
        matches!(
            self,
            FixedOp::LessThan | FixedOp::GreaterThan | FixedOp::LessEq | FixedOp::GreaterEq
        )
    }
}

/// A fixed-point signal declared in a module.
///
/// The module owns the declaration; this handle only refers to it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedSignal {
    signal: SignalRef,
    name: Ident,
    module: ModuleId,
    owner: ModuleKey,
    spec: FixedSpec,
}

impl FixedSignal {
    pub(crate) fn new(
        signal: SignalRef,
        name: Ident,
        module: ModuleId,
        owner: ModuleKey,
        spec: FixedSpec,
    ) -> Self {
        Self {
            signal,
            name,
            module,
            owner,
            spec,
        }
    }

    /// The ID of the underlying signal.
    pub fn id(&self) -> SignalId {
        self.signal.id
    }

    /// The interned name; resolve it through the owning module.
    pub fn name(&self) -> Ident {
        self.name
    }

    /// The ID of the module that owns the declaration.
    pub fn module(&self) -> ModuleId {
        self.module
    }

    /// The key of the module value that owns the declaration.
    pub fn owner(&self) -> ModuleKey {
        self.owner
    }

    /// The declaration kind.
    pub fn kind(&self) -> SignalKind {
        self.signal.kind
    }

    /// The fixed-point spec of the signal.
    pub fn spec(&self) -> FixedSpec {
        self.spec
    }

    /// The reference used inside expressions.
    pub fn signal_ref(&self) -> SignalRef {
        self.signal
    }
}

/// A fixed-point constant. The stored value is already scaled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FixedConst {
    value: ConstValue,
    spec: FixedSpec,
}

impl FixedConst {
    pub(crate) fn new(value: ConstValue, spec: FixedSpec) -> Self {
        Self { value, spec }
    }

    /// The stored (scaled) value.
    pub fn value(&self) -> ConstValue {
        self.value
    }

    /// The fixed-point spec of the constant.
    pub fn spec(&self) -> FixedSpec {
        self.spec
    }

    /// The stored integer, if the constant is not real.
    pub fn as_int(&self) -> Option<i64> {
        match self.value {
            ConstValue::Int { value, .. } => Some(value),
            ConstValue::Real(_) => None,
        }
    }
}

/// An expression node built by an operator overlay.
///
/// Its width is the inferred bit length of the node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedExpr {
    op: FixedOp,
    node: Expr,
    spec: FixedSpec,
}

impl FixedExpr {
    pub(crate) fn new(op: FixedOp, node: Expr, spec: FixedSpec) -> Self {
        let spec = spec.with_width(node.bit_length());
        Self { op, node, spec }
    }

    /// The operation that produced this node.
    pub fn op(&self) -> FixedOp {
        self.op
    }

    /// The wrapped AST-core node.
    pub fn node(&self) -> &Expr {
        &self.node
    }

    /// The fixed-point spec of the result.
    pub fn spec(&self) -> FixedSpec {
        self.spec
    }
}

/// A node that can appear in a generated tree.
#[derive(Debug, Clone, PartialEq)]
pub enum FixedNode {
    /// A declared fixed-point signal.
    Signal(FixedSignal),
    /// A fixed-point constant.
    Const(FixedConst),
    /// The result of an overlay.
    Expr(FixedExpr),
    /// A plain AST-core expression with point `0`.
    Plain(Expr),
}

/// An operand of the fixed-point layer.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A compile-time literal.
    Lit(Literal),
    /// A node of the generated tree.
    Node(FixedNode),
}

impl Value {
    /// The AST-core expression for this operand.
    pub fn to_expr(&self) -> Expr {
        match self {
            Value::Lit(lit) => lit.expr(),
            Value::Node(node) => node.expr(),
        }
    }

    /// The compile-time integer behind this operand, if any, with its
    /// signedness.
    ///
    /// Besides integer literals this sees through integer literal nodes and
    /// integer fixed-point constants.
    pub fn as_const_int(&self) -> Option<(i64, bool)> {
        match self {
            Value::Lit(lit) => lit.as_int().map(|v| (v, lit.is_signed())),
            Value::Node(FixedNode::Const(c)) => c.as_int().map(|v| (v, c.spec.signed)),
            Value::Node(FixedNode::Plain(e)) => match e.as_literal() {
                Some(ConstValue::Int { value, signed, .. }) => Some((value, signed)),
                _ => None,
            },
            Value::Node(_) => None,
        }
    }

    /// Returns `true` for a real literal, compile-time or not.
    pub fn is_real_literal(&self) -> bool {
        match self {
            Value::Lit(Literal::Real(_)) => true,
            Value::Lit(_) => false,
            Value::Node(FixedNode::Const(c)) => matches!(c.value, ConstValue::Real(_)),
            Value::Node(FixedNode::Plain(e)) => e.is_real_literal(),
            Value::Node(_) => false,
        }
    }

    /// The literal node behind this operand, if it is a plain literal node.
    pub(crate) fn as_literal_node(&self) -> Option<&Expr> {
        match self {
            Value::Node(FixedNode::Plain(e)) if matches!(e.kind(), ExprKind::Literal(_)) => {
                Some(e)
            }
            _ => None,
        }
    }

    pub(crate) fn plain(expr: Expr) -> Self {
        Value::Node(FixedNode::Plain(expr))
    }
}

impl Pointed for FixedSignal {
    fn point(&self) -> u32 {
        self.spec.point
    }

    fn signed(&self) -> bool {
        self.spec.signed
    }

    fn width(&self) -> Option<u32> {
        self.spec.width
    }
}

impl Pointed for FixedConst {
    fn point(&self) -> u32 {
        self.spec.point
    }

    fn signed(&self) -> bool {
        self.spec.signed
    }

    fn width(&self) -> Option<u32> {
        self.spec.width
    }
}

impl Pointed for FixedExpr {
    fn point(&self) -> u32 {
        self.spec.point
    }

    fn signed(&self) -> bool {
        self.spec.signed
    }

    fn width(&self) -> Option<u32> {
        self.spec.width
    }
}

impl Pointed for FixedNode {
    fn point(&self) -> u32 {
        match self {
            FixedNode::Signal(s) => s.point(),
            FixedNode::Const(c) => c.point(),
            FixedNode::Expr(e) => e.point(),
            FixedNode::Plain(_) => 0,
        }
    }

    fn signed(&self) -> bool {
        match self {
            FixedNode::Signal(s) => s.signed(),
            FixedNode::Const(c) => c.signed(),
            FixedNode::Expr(e) => e.signed(),
            FixedNode::Plain(e) => e.is_signed(),
        }
    }

    fn width(&self) -> Option<u32> {
        match self {
            FixedNode::Signal(s) => s.width(),
            FixedNode::Const(c) => c.width(),
            FixedNode::Expr(e) => e.width(),
            FixedNode::Plain(_) => None,
        }
    }
}

impl Pointed for Value {
    fn point(&self) -> u32 {
        match self {
            Value::Lit(_) => 0,
            Value::Node(node) => node.point(),
        }
    }

    fn signed(&self) -> bool {
        match self {
            Value::Lit(lit) => lit.is_signed(),
            Value::Node(node) => node.signed(),
        }
    }

    fn width(&self) -> Option<u32> {
        match self {
            Value::Lit(_) => None,
            Value::Node(node) => node.width(),
        }
    }
}

macro_rules! literal_value_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Lit(Literal::from(value))
                }
            }
        )*
    };
}

literal_value_from!(i64, i32, u32, bool, f64);

impl From<Literal> for Value {
    fn from(lit: Literal) -> Self {
        Value::Lit(lit)
    }
}

impl From<Expr> for Value {
    fn from(expr: Expr) -> Self {
        Value::plain(expr)
    }
}

impl From<FixedNode> for Value {
    fn from(node: FixedNode) -> Self {
        Value::Node(node)
    }
}

impl From<FixedSignal> for Value {
    fn from(signal: FixedSignal) -> Self {
        Value::Node(FixedNode::Signal(signal))
    }
}

impl From<&FixedSignal> for Value {
    fn from(signal: &FixedSignal) -> Self {
        Value::Node(FixedNode::Signal(*signal))
    }
}

impl From<FixedConst> for Value {
    fn from(constant: FixedConst) -> Self {
        Value::Node(FixedNode::Const(constant))
    }
}

impl From<FixedExpr> for Value {
    fn from(expr: FixedExpr) -> Self {
        Value::Node(FixedNode::Expr(expr))
    }
}

impl From<&FixedExpr> for Value {
    fn from(expr: &FixedExpr) -> Self {
        Value::Node(FixedNode::Expr(expr.clone()))
    }
}
