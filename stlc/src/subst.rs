use std::collections::HashSet;

use crate::{
    ast::{Expr, ExprKind},
    vars::{all_vars, fresh_name, is_free},
};

/// α-renaming `x{new/old}`: every occurrence of `old`, binders included.
///
/// No capture check is performed; callers must pick a `new` that is
/// unused in `expr`.
pub fn rename(expr: Expr, new: &str, old: &str) -> Expr {
    let Expr { kind, ty } = expr;
    let kind = match kind {
        ExprKind::Var(name) if name == old => ExprKind::Var(new.to_string()),
        ExprKind::Abs(name, bound_ty, body) => {
            let name = if name == old { new.to_string() } else { name };
            ExprKind::Abs(name, bound_ty, Box::new(rename(*body, new, old)))
        }
        ExprKind::App(left, right) => ExprKind::App(
            Box::new(rename(*left, new, old)),
            Box::new(rename(*right, new, old)),
        ),
        ExprKind::Binary(op, left, right) => ExprKind::Binary(
            op,
            Box::new(rename(*left, new, old)),
            Box::new(rename(*right, new, old)),
        ),
        ExprKind::Product(left, right) => ExprKind::Product(
            Box::new(rename(*left, new, old)),
            Box::new(rename(*right, new, old)),
        ),
        ExprKind::Unary(op, operand) => ExprKind::Unary(op, Box::new(rename(*operand, new, old))),
        kind @ (ExprKind::Var(_)
        | ExprKind::Unit
        | ExprKind::Int(_)
        | ExprKind::Float(_)
        | ExprKind::Bool(_)) => kind,
    };
    Expr { kind, ty }
}

/// Capture-avoiding substitution `x[y/a]`: replaces the free occurrences
/// of `a` in `expr` with copies of `value`.
///
/// A binder that would capture a free variable of `value` is renamed
/// first, to the first `xN` unused in the body, in `value`, and distinct
/// from `a`.
pub fn substitute(expr: Expr, value: &Expr, a: &str) -> Expr {
    let Expr { kind, ty } = expr;
    let kind = match kind {
        ExprKind::Var(name) if name == a => return value.clone(),
        ExprKind::Abs(name, bound_ty, body) if name == a => ExprKind::Abs(name, bound_ty, body),
        ExprKind::Abs(name, bound_ty, body) if is_free(value, &name) => {
            let substituted = HashSet::from([a.to_string()]);
            let fresh = fresh_name(&[&all_vars(&body), &all_vars(value), &substituted]);
            log::debug!("renaming {} to {} before substituting {} for {}", name, fresh, value, a);
            let body = rename(*body, &fresh, &name);
            ExprKind::Abs(fresh, bound_ty, Box::new(substitute(body, value, a)))
        }
        ExprKind::Abs(name, bound_ty, body) => {
            ExprKind::Abs(name, bound_ty, Box::new(substitute(*body, value, a)))
        }
        ExprKind::App(left, right) => ExprKind::App(
            Box::new(substitute(*left, value, a)),
            Box::new(substitute(*right, value, a)),
        ),
        ExprKind::Binary(op, left, right) => ExprKind::Binary(
            op,
            Box::new(substitute(*left, value, a)),
            Box::new(substitute(*right, value, a)),
        ),
        ExprKind::Product(left, right) => ExprKind::Product(
            Box::new(substitute(*left, value, a)),
            Box::new(substitute(*right, value, a)),
        ),
        ExprKind::Unary(op, operand) => {
            ExprKind::Unary(op, Box::new(substitute(*operand, value, a)))
        }
        kind @ (ExprKind::Var(_)
        | ExprKind::Unit
        | ExprKind::Int(_)
        | ExprKind::Float(_)
        | ExprKind::Bool(_)) => kind,
    };
    Expr { kind, ty }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BinaryOp, Type};

    fn var(name: &str) -> Expr {
        Expr::var(name)
    }

    fn lam(name: &str, body: Expr) -> Expr {
        Expr::abs(name, body)
    }

    fn apps(head: Expr, args: impl IntoIterator<Item = Expr>) -> Expr {
        Expr::apps(head, args)
    }

    mod rename {
        use super::*;

        #[test]
        fn unrelated_variable() {
            assert_eq!(rename(var("z"), "y", "x"), var("z"));
        }

        #[test]
        fn matching_variable() {
            assert_eq!(rename(var("x"), "y", "x"), var("y"));
        }

        #[test]
        fn both_sides_of_applications() {
            // (x y) (y x z) | y, x
            let expr = apps(apps(var("x"), [var("y")]), [apps(var("y"), [var("x"), var("z")])]);
            let expected =
                apps(apps(var("y"), [var("y")]), [apps(var("y"), [var("y"), var("z")])]);
            assert_eq!(rename(expr, "y", "x"), expected);
        }

        #[test]
        fn binder_is_renamed() {
            // λx. x z | y, x
            let expr = lam("x", apps(var("x"), [var("z")]));
            assert_eq!(rename(expr, "y", "x"), lam("y", apps(var("y"), [var("z")])));
        }

        #[test]
        fn absent_name_is_a_no_op() {
            // λx. x z | y, y
            let expr = lam("x", apps(var("x"), [var("z")]));
            assert_eq!(rename(expr.clone(), "y", "y"), expr.clone());
            assert_eq!(rename(expr.clone(), "q", "w"), expr);
        }

        #[test]
        fn inner_binder() {
            // λx. λy. y z foo bar | foo, y
            let expr = lam("x", lam("y", apps(var("y"), [var("z"), var("foo"), var("bar")])));
            let expected =
                lam("x", lam("foo", apps(var("foo"), [var("z"), var("foo"), var("bar")])));
            assert_eq!(rename(expr, "foo", "y"), expected);
        }

        #[test]
        fn keeps_annotations_and_operators() {
            // λx:int. x+3 | y, x
            let plus_three = |name: &str| Expr::binary(BinaryOp::Add, var(name), Expr::int(3));
            let expr = Expr::typed_abs("x", Type::Int, plus_three("x"));
            let expected = Expr::typed_abs("y", Type::Int, plus_three("y"));
            assert_eq!(rename(expr, "y", "x"), expected);
        }
    }

    mod substitute {
        use super::*;

        fn k() -> Expr {
            // λx. λy. x y
            lam("x", lam("y", apps(var("x"), [var("y")])))
        }

        #[test]
        fn matching_variable() {
            assert_eq!(substitute(var("x"), &k(), "x"), k());
        }

        #[test]
        fn unrelated_variable() {
            assert_eq!(substitute(var("y"), &k(), "x"), var("y"));
        }

        #[test]
        fn both_sides_of_an_application() {
            // (x (x y))
            let expr = apps(var("x"), [apps(var("x"), [var("y")])]);
            let expected = apps(k(), [apps(k(), [var("y")])]);
            assert_eq!(substitute(expr, &k(), "x"), expected);
        }

        #[test]
        fn bound_variable_is_shadowed() {
            // λx. λz. x z
            let expr = lam("x", lam("z", apps(var("x"), [var("z")])));
            assert_eq!(substitute(expr.clone(), &k(), "x"), expr);
        }

        #[test]
        fn deeper_bound_variable_is_shadowed() {
            let expr = lam("x", lam("z", apps(var("x"), [var("z")])));
            assert_eq!(substitute(expr.clone(), &k(), "z"), expr);
        }

        #[test]
        fn free_variable_without_conflict() {
            // (λx. λy. x z)[k/z]
            let expr = lam("x", lam("y", apps(var("x"), [var("z")])));
            let expected = lam("x", lam("y", apps(var("x"), [k()])));
            assert_eq!(substitute(expr, &k(), "z"), expected);
        }

        #[test]
        fn capturing_binder_is_renamed() {
            // (λx. λy. x z y)[(λx. λz. x y z)/z] = λx. λx0. x (λx. λz. x y z) x0
            let value = lam("x", lam("z", apps(var("x"), [var("y"), var("z")])));
            let expr = lam("x", lam("y", apps(var("x"), [var("z"), var("y")])));
            let expected = lam("x", lam("x0", apps(var("x"), [value.clone(), var("x0")])));
            assert_eq!(substitute(expr, &value, "z"), expected);
        }

        #[test]
        fn selinger() {
            // (λx. y x)[(λz. x z)/y] = λx0. (λz. x z) x0
            let value = lam("z", apps(var("x"), [var("z")]));
            let expr = lam("x", apps(var("y"), [var("x")]));
            let expected = lam("x0", apps(value.clone(), [var("x0")]));
            assert_eq!(substitute(expr, &value, "y"), expected);
        }

        #[test]
        fn fresh_name_skips_names_used_below() {
            // (λn. x0. y. (n (λz. y) x0))[v/y]
            //   with v = λx0. (n (x1 (λx1. x0. (n (λg. h. (h (g x1))) (λu. x0) (λu. u))) x0))
            let value = lam(
                "x0",
                apps(
                    var("n"),
                    [apps(
                        var("x1"),
                        [
                            lam(
                                "x1",
                                lam(
                                    "x0",
                                    apps(
                                        var("n"),
                                        [
                                            lam(
                                                "g",
                                                lam(
                                                    "h",
                                                    apps(var("h"), [apps(var("g"), [var("x1")])]),
                                                ),
                                            ),
                                            lam("u", var("x0")),
                                            lam("u", var("u")),
                                        ],
                                    ),
                                ),
                            ),
                            var("x0"),
                        ],
                    )],
                ),
            );
            let body = |n: &str| {
                lam(
                    n,
                    lam("x0", lam("y", apps(var(n), [lam("z", var("y")), var("x0")]))),
                )
            };
            assert_eq!(substitute(body("n"), &value, "y"), body("x2"));
        }

        #[test]
        fn fresh_binder_differs_from_substituted_name() {
            // (λf. x0 f)[f/x0]: x0 is excluded so f becomes x1
            let expr = lam("f", apps(var("x0"), [var("f")]));
            let expected = lam("x1", apps(var("f"), [var("x1")]));
            assert_eq!(substitute(expr, &var("f"), "x0"), expected);
        }

        #[test]
        fn through_operators_and_products() {
            let expr = Expr::product(
                Expr::binary(BinaryOp::Add, var("x"), Expr::int(1)),
                Expr::unary(crate::ast::UnaryOp::Minus, var("x")),
            );
            let expected = Expr::product(
                Expr::binary(BinaryOp::Add, Expr::int(2), Expr::int(1)),
                Expr::unary(crate::ast::UnaryOp::Minus, Expr::int(2)),
            );
            assert_eq!(substitute(expr, &Expr::int(2), "x"), expected);
        }
    }
}
