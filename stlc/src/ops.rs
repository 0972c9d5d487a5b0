//! Primitive operators: their fixed signatures, shared with the simple
//! type checker, and their evaluation on literals.

use crate::{
    ast::{BinaryOp, Expr, ExprKind, Type, UnaryOp},
    error::{EvalError, EvalResult},
};

impl UnaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Plus => "+",
            UnaryOp::Minus => "-",
            UnaryOp::FPlus => "+.",
            UnaryOp::FMinus => "-.",
            UnaryOp::Not => "!",
        }
    }

    /// `(domain, codomain)`
    pub fn signature(self) -> (Type, Type) {
        match self {
            UnaryOp::Plus | UnaryOp::Minus => (Type::Int, Type::Int),
            UnaryOp::FPlus | UnaryOp::FMinus => (Type::Float, Type::Float),
            UnaryOp::Not => (Type::Bool, Type::Bool),
        }
    }
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::FAdd => "+.",
            BinaryOp::FSub => "-.",
            BinaryOp::FMul => "*.",
            BinaryOp::FDiv => "/.",
            BinaryOp::Lt => "<",
            BinaryOp::Gt => ">",
            BinaryOp::Le => "≤",
            BinaryOp::Ge => "≥",
            BinaryOp::FLt => "<.",
            BinaryOp::FGt => ">.",
            BinaryOp::FLe => "≤.",
            BinaryOp::FGe => "≥.",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
        }
    }

    /// `(operand, codomain)`; both operands share the same type.
    pub fn signature(self) -> (Type, Type) {
        match self {
            BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div => (Type::Int, Type::Int),
            BinaryOp::FAdd | BinaryOp::FSub | BinaryOp::FMul | BinaryOp::FDiv => {
                (Type::Float, Type::Float)
            }
            BinaryOp::Lt | BinaryOp::Gt | BinaryOp::Le | BinaryOp::Ge => (Type::Int, Type::Bool),
            BinaryOp::FLt | BinaryOp::FGt | BinaryOp::FLe | BinaryOp::FGe => {
                (Type::Float, Type::Bool)
            }
            BinaryOp::And | BinaryOp::Or => (Type::Bool, Type::Bool),
        }
    }
}

// Operands that are stuck on a free variable rather than being values.
fn is_neutral(expr: &Expr) -> bool {
    matches!(
        expr.kind,
        ExprKind::Var(_) | ExprKind::App(..) | ExprKind::Unary(..) | ExprKind::Binary(..)
    )
}

fn mismatch(op: &'static str, operand: &Expr) -> EvalError {
    EvalError::TypeMismatch {
        op,
        operand: operand.to_string(),
    }
}

/// Applies `op` to an irreducible operand.
///
/// Returns `Ok(None)` when the operand is neutral (e.g. a free variable):
/// the operation is stuck but not erroneous.
pub fn eval_unary(op: UnaryOp, operand: &Expr) -> EvalResult<Option<Expr>> {
    if is_neutral(operand) {
        return Ok(None);
    }
    let result = match (op, &operand.kind) {
        (UnaryOp::Plus, ExprKind::Int(v)) => Expr::int(*v),
        (UnaryOp::Minus, ExprKind::Int(v)) => Expr::int(v.wrapping_neg()),
        (UnaryOp::FPlus, ExprKind::Float(v)) => Expr::float(*v),
        (UnaryOp::FMinus, ExprKind::Float(v)) => Expr::float(-v),
        (UnaryOp::Not, ExprKind::Bool(v)) => Expr::boolean(!v),
        _ => return Err(mismatch(op.symbol(), operand)),
    };
    Ok(Some(result))
}

/// Applies `op` to two irreducible operands; see [`eval_unary`].
pub fn eval_binary(op: BinaryOp, left: &Expr, right: &Expr) -> EvalResult<Option<Expr>> {
    if is_neutral(left) || is_neutral(right) {
        return Ok(None);
    }
    let result = match (&left.kind, &right.kind) {
        (ExprKind::Int(a), ExprKind::Int(b)) => eval_int(op, *a, *b)?,
        (ExprKind::Float(a), ExprKind::Float(b)) => eval_float(op, *a, *b),
        (ExprKind::Bool(a), ExprKind::Bool(b)) => eval_bool(op, *a, *b),
        _ => None,
    };
    match result {
        Some(expr) => Ok(Some(expr)),
        None => {
            let operands = Expr::product(left.clone(), right.clone());
            Err(mismatch(op.symbol(), &operands))
        }
    }
}

fn eval_int(op: BinaryOp, a: i64, b: i64) -> EvalResult<Option<Expr>> {
    let result = match op {
        BinaryOp::Add => Expr::int(a.wrapping_add(b)),
        BinaryOp::Sub => Expr::int(a.wrapping_sub(b)),
        BinaryOp::Mul => Expr::int(a.wrapping_mul(b)),
        BinaryOp::Div if b == 0 => return Err(EvalError::DivisionByZero),
        BinaryOp::Div => Expr::int(a.wrapping_div(b)),
        BinaryOp::Lt => Expr::boolean(a < b),
        BinaryOp::Gt => Expr::boolean(a > b),
        BinaryOp::Le => Expr::boolean(a <= b),
        BinaryOp::Ge => Expr::boolean(a >= b),
        _ => return Ok(None),
    };
    Ok(Some(result))
}

fn eval_float(op: BinaryOp, a: f64, b: f64) -> Option<Expr> {
    let result = match op {
        BinaryOp::FAdd => Expr::float(a + b),
        BinaryOp::FSub => Expr::float(a - b),
        BinaryOp::FMul => Expr::float(a * b),
        BinaryOp::FDiv => Expr::float(a / b),
        BinaryOp::FLt => Expr::boolean(a < b),
        BinaryOp::FGt => Expr::boolean(a > b),
        BinaryOp::FLe => Expr::boolean(a <= b),
        BinaryOp::FGe => Expr::boolean(a >= b),
        _ => return None,
    };
    Some(result)
}

fn eval_bool(op: BinaryOp, a: bool, b: bool) -> Option<Expr> {
    match op {
        BinaryOp::And => Some(Expr::boolean(a && b)),
        BinaryOp::Or => Some(Expr::boolean(a || b)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod unary {
        use super::*;

        #[test]
        fn negate_int() {
            let actual = eval_unary(UnaryOp::Minus, &Expr::int(3)).unwrap();
            assert_eq!(actual, Some(Expr::int(-3)));
        }

        #[test]
        fn negate_float() {
            let actual = eval_unary(UnaryOp::FMinus, &Expr::float(1.5)).unwrap();
            assert_eq!(actual, Some(Expr::float(-1.5)));
        }

        #[test]
        fn not() {
            let actual = eval_unary(UnaryOp::Not, &Expr::boolean(true)).unwrap();
            assert_eq!(actual, Some(Expr::boolean(false)));
        }

        #[test]
        fn free_variable_is_stuck() {
            let actual = eval_unary(UnaryOp::Not, &Expr::var("x")).unwrap();
            assert_eq!(actual, None);
        }

        #[test]
        fn wrong_literal_kind() {
            let actual = eval_unary(UnaryOp::Not, &Expr::int(3));
            assert!(matches!(actual, Err(EvalError::TypeMismatch { op: "!", .. })));
        }
    }

    mod binary {
        use super::*;

        #[test]
        fn int_arithmetic() {
            let actual = eval_binary(BinaryOp::Mul, &Expr::int(4), &Expr::int(2)).unwrap();
            assert_eq!(actual, Some(Expr::int(8)));
        }

        #[test]
        fn int_comparison() {
            let actual = eval_binary(BinaryOp::Le, &Expr::int(3), &Expr::int(3)).unwrap();
            assert_eq!(actual, Some(Expr::boolean(true)));
        }

        #[test]
        fn float_comparison() {
            let actual = eval_binary(BinaryOp::FLe, &Expr::float(3.0), &Expr::float(5.0)).unwrap();
            assert_eq!(actual, Some(Expr::boolean(true)));
        }

        #[test]
        fn float_division_by_zero_is_infinite() {
            let actual = eval_binary(BinaryOp::FDiv, &Expr::float(1.0), &Expr::float(0.0)).unwrap();
            assert_eq!(actual, Some(Expr::float(f64::INFINITY)));
        }

        #[test]
        fn int_division_by_zero() {
            let actual = eval_binary(BinaryOp::Div, &Expr::int(1), &Expr::int(0));
            assert_eq!(actual, Err(EvalError::DivisionByZero));
        }

        #[test]
        fn int_overflow_wraps() {
            let actual = eval_binary(BinaryOp::Add, &Expr::int(i64::MAX), &Expr::int(1)).unwrap();
            assert_eq!(actual, Some(Expr::int(i64::MIN)));
        }

        #[test]
        fn bool_connectives() {
            let actual =
                eval_binary(BinaryOp::Or, &Expr::boolean(false), &Expr::boolean(true)).unwrap();
            assert_eq!(actual, Some(Expr::boolean(true)));
        }

        #[test]
        fn float_operator_on_ints() {
            let actual = eval_binary(BinaryOp::FAdd, &Expr::int(1), &Expr::int(2));
            assert!(matches!(actual, Err(EvalError::TypeMismatch { op: "+.", .. })));
        }

        #[test]
        fn mixed_operands() {
            let actual = eval_binary(BinaryOp::Add, &Expr::int(3), &Expr::boolean(true));
            assert!(matches!(actual, Err(EvalError::TypeMismatch { op: "+", .. })));
        }

        #[test]
        fn neutral_operand_is_stuck() {
            let actual = eval_binary(BinaryOp::Add, &Expr::var("x"), &Expr::int(3)).unwrap();
            assert_eq!(actual, None);
        }
    }

    mod signatures {
        use super::*;

        #[test]
        fn comparisons_yield_bool() {
            assert_eq!(BinaryOp::FGe.signature(), (Type::Float, Type::Bool));
            assert_eq!(BinaryOp::Lt.signature(), (Type::Int, Type::Bool));
        }

        #[test]
        fn symbols() {
            assert_eq!(BinaryOp::FLe.to_string(), "≤.");
            assert_eq!(UnaryOp::Not.to_string(), "!");
        }
    }
}
