//! Normal-order (leftmost-outermost) reduction, under binders included.

use crate::{
    ast::{Expr, ExprKind},
    error::{EvalError, EvalResult},
    ops::{eval_binary, eval_unary},
    subst::substitute,
};

/// Evaluation settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvalConfig {
    /// Maximum number of reduction steps; `None` is unbounded.
    pub max_steps: Option<usize>,
}

impl EvalConfig {
    pub fn with_max_steps(max_steps: usize) -> Self {
        Self {
            max_steps: Some(max_steps),
        }
    }
}

/// Performs a single reduction step, if any; the flag tells whether one
/// was performed.
pub fn reduce(expr: Expr) -> EvalResult<(Expr, bool)> {
    let Expr { kind, ty } = expr;
    match kind {
        ExprKind::Unary(op, operand) => {
            let (operand, reduced) = reduce(*operand)?;
            if !reduced {
                if let Some(result) = eval_unary(op, &operand)? {
                    return Ok((result, true));
                }
            }
            let kind = ExprKind::Unary(op, Box::new(operand));
            Ok((Expr { kind, ty }, reduced))
        }
        ExprKind::Binary(op, left, right) => {
            let (left, mut reduced) = reduce(*left)?;
            let right = if reduced {
                *right
            } else {
                let (right, r) = reduce(*right)?;
                reduced = r;
                right
            };
            if !reduced {
                if let Some(result) = eval_binary(op, &left, &right)? {
                    return Ok((result, true));
                }
            }
            let kind = ExprKind::Binary(op, Box::new(left), Box::new(right));
            Ok((Expr { kind, ty }, reduced))
        }
        ExprKind::Abs(name, bound_ty, body) => {
            let (body, reduced) = reduce(*body)?;
            let kind = ExprKind::Abs(name, bound_ty, Box::new(body));
            Ok((Expr { kind, ty }, reduced))
        }
        ExprKind::App(left, right) => match *left {
            // β-reduction: the outermost redex comes first
            Expr {
                kind: ExprKind::Abs(name, _, body),
                ..
            } => Ok((substitute(*body, &right, &name), true)),
            left => {
                let (left, reduced) = reduce(left)?;
                if reduced {
                    let kind = ExprKind::App(Box::new(left), right);
                    return Ok((Expr { kind, ty }, true));
                }
                let (right, reduced) = reduce(*right)?;
                let kind = ExprKind::App(Box::new(left), Box::new(right));
                Ok((Expr { kind, ty }, reduced))
            }
        },
        ExprKind::Product(left, right) => {
            let (left, reduced) = reduce(*left)?;
            if reduced {
                let kind = ExprKind::Product(Box::new(left), right);
                return Ok((Expr { kind, ty }, true));
            }
            let (right, reduced) = reduce(*right)?;
            let kind = ExprKind::Product(Box::new(left), Box::new(right));
            Ok((Expr { kind, ty }, reduced))
        }
        kind @ (ExprKind::Var(_)
        | ExprKind::Unit
        | ExprKind::Int(_)
        | ExprKind::Float(_)
        | ExprKind::Bool(_)) => Ok((Expr { kind, ty }, false)),
    }
}

/// Reduces `expr` to its normal form.
///
/// Terms without a normal form make this loop forever; use [`eval_with`]
/// to bound the number of steps.
pub fn eval(expr: Expr) -> EvalResult<Expr> {
    eval_with(expr, &EvalConfig::default())
}

pub fn eval_with(mut expr: Expr, config: &EvalConfig) -> EvalResult<Expr> {
    let mut steps = 0;
    loop {
        let (next, reduced) = reduce(expr)?;
        if !reduced {
            log::debug!("normal form reached after {} steps", steps);
            return Ok(next);
        }
        steps += 1;
        if let Some(max_steps) = config.max_steps {
            if steps > max_steps {
                log::debug!("giving up after {} steps", max_steps);
                return Err(EvalError::Timeout { steps: max_steps });
            }
        }
        log::trace!("step {}: {}", steps, next);
        expr = next;
    }
}
