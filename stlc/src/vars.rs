use std::collections::HashSet;

use crate::ast::{Expr, ExprKind};

pub type Name = String;

/// Names occurring free in `expr`.
pub fn free_vars(expr: &Expr) -> HashSet<Name> {
    let mut acc = HashSet::new();
    collect_free(expr, &mut acc);
    acc
}

// A binder only removes its name if the name wasn't already in the
// accumulator: otherwise it was collected free from an unrelated part
// of the tree, e.g. the leading y in λx. y (λy. x y z).
fn collect_free(expr: &Expr, acc: &mut HashSet<Name>) {
    match &expr.kind {
        ExprKind::Var(name) => {
            acc.insert(name.clone());
        }
        ExprKind::Abs(name, _, body) => {
            let seen = acc.contains(name);
            collect_free(body, acc);
            if !seen {
                acc.remove(name);
            }
        }
        ExprKind::App(left, right)
        | ExprKind::Binary(_, left, right)
        | ExprKind::Product(left, right) => {
            collect_free(left, acc);
            collect_free(right, acc);
        }
        ExprKind::Unary(_, operand) => collect_free(operand, acc),
        ExprKind::Unit | ExprKind::Int(_) | ExprKind::Float(_) | ExprKind::Bool(_) => {}
    }
}

/// Every name occurring in `expr`, bound or free, binders included.
pub fn all_vars(expr: &Expr) -> HashSet<Name> {
    let mut acc = HashSet::new();
    collect_all(expr, &mut acc);
    acc
}

fn collect_all(expr: &Expr, acc: &mut HashSet<Name>) {
    match &expr.kind {
        ExprKind::Var(name) => {
            acc.insert(name.clone());
        }
        ExprKind::Abs(name, _, body) => {
            acc.insert(name.clone());
            collect_all(body, acc);
        }
        ExprKind::App(left, right)
        | ExprKind::Binary(_, left, right)
        | ExprKind::Product(left, right) => {
            collect_all(left, acc);
            collect_all(right, acc);
        }
        ExprKind::Unary(_, operand) => collect_all(operand, acc),
        ExprKind::Unit | ExprKind::Int(_) | ExprKind::Float(_) | ExprKind::Bool(_) => {}
    }
}

pub fn is_free(expr: &Expr, name: &str) -> bool {
    free_vars(expr).contains(name)
}

/// First of `x0, x1, x2, …` absent from every set in `avoid`.
pub fn fresh_name(avoid: &[&HashSet<Name>]) -> Name {
    let mut i = 0usize;
    loop {
        let name = format!("x{}", i);
        if avoid.iter().all(|set| !set.contains(&name)) {
            return name;
        }
        i += 1;
    }
}
