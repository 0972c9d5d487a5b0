//! Syntax-directed checking for the simply typed calculus.
//!
//! Every bound variable carries its declared type (or the `Missing`
//! placeholder), so no type variables are involved: each node's type
//! follows from its children's. Types are written into the tree's slots
//! as they are computed.

use std::collections::HashMap;

use crate::{
    ast::{BinaryOp, Expr, ExprKind, Type, UnaryOp},
    error::{TypeError, TypeResult},
};

/// Types of the bound variables in scope.
pub type Ctx = HashMap<String, Type>;

/// Annotates every node of `expr` with its type, failing on the first
/// ill-typed node.
pub fn infer_stype(mut expr: Expr) -> TypeResult<Expr> {
    SimpleChecker::default().check(&mut expr)?;
    Ok(expr)
}

#[derive(Debug, Default)]
pub struct SimpleChecker {
    ctx: Ctx,
}

impl SimpleChecker {
    pub fn check(&mut self, expr: &mut Expr) -> TypeResult<Type> {
        let ty = match &mut expr.kind {
            ExprKind::Unit => Type::Unit,
            ExprKind::Int(_) => Type::Int,
            ExprKind::Float(_) => Type::Float,
            ExprKind::Bool(_) => Type::Bool,
            ExprKind::Var(name) => self.check_var(name)?,
            ExprKind::Abs(name, bound_ty, body) => {
                self.check_abs(name, bound_ty.as_ref(), body)?
            }
            ExprKind::App(func, arg) => self.check_app(func, arg)?,
            ExprKind::Unary(op, operand) => self.check_unary(*op, operand)?,
            ExprKind::Binary(op, left, right) => self.check_binary(*op, left, right)?,
            ExprKind::Product(left, right) => self.check_product(left, right)?,
        };
        expr.ty = Some(ty.clone());
        Ok(ty)
    }

    // x : τ ∈ Γ
    // ────────── (T-Var)
    // Γ ⊢ x : τ
    fn check_var(&self, name: &str) -> TypeResult<Type> {
        self.ctx
            .get(name)
            .cloned()
            .ok_or_else(|| TypeError::UnboundVariable {
                name: name.to_string(),
            })
    }

    //    Γ, x : τ₁ ⊢ e : τ₂
    // ──────────────────────── (T-Abs)
    // Γ ⊢ λx:τ₁. e : τ₁ → τ₂
    //
    // An unannotated binder is bound to `Type::Missing`, which only
    // matches itself, so any use of it that constrains its type fails.
    fn check_abs(
        &mut self,
        name: &str,
        bound_ty: Option<&Type>,
        body: &mut Expr,
    ) -> TypeResult<Type> {
        let bound_ty = bound_ty.cloned().unwrap_or(Type::Missing);

        let shadowed = self.ctx.insert(name.to_string(), bound_ty.clone());
        let body_ty = self.check(body);
        match shadowed {
            Some(previous) => self.ctx.insert(name.to_string(), previous),
            None => self.ctx.remove(name),
        };

        Ok(Type::arrow(bound_ty, body_ty?))
    }

    // Γ ⊢ e₁ : τ₁ → τ₂    Γ ⊢ e₂ : τ₁
    // ──────────────────────────────── (T-App)
    //         Γ ⊢ e₁ e₂ : τ₂
    fn check_app(&mut self, func: &mut Expr, arg: &mut Expr) -> TypeResult<Type> {
        let func_ty = self.check(func)?;
        let arg_ty = self.check(arg)?;

        match func_ty {
            Type::Arrow(domain, codomain) if *domain == arg_ty => Ok(*codomain),
            Type::Arrow(domain, _) => Err(TypeError::ArgumentTypeMismatch {
                expected: *domain,
                got: arg_ty,
            }),
            ty => Err(TypeError::NotAnArrow { ty }),
        }
    }

    // Γ ⊢ e : τ    op : τ → τ'
    // ───────────────────────── (T-Unary)
    //      Γ ⊢ op e : τ'
    fn check_unary(&mut self, op: UnaryOp, operand: &mut Expr) -> TypeResult<Type> {
        let operand_ty = self.check(operand)?;
        let (domain, codomain) = op.signature();

        if operand_ty != domain {
            return Err(TypeError::OperatorTypeMismatch {
                op: op.symbol(),
                expected: Type::arrow(domain, codomain),
                got: operand_ty,
            });
        }
        Ok(codomain)
    }

    // Γ ⊢ e₁ : τ    Γ ⊢ e₂ : τ    op : τ × τ → τ'
    // ──────────────────────────────────────────── (T-Binary)
    //             Γ ⊢ e₁ op e₂ : τ'
    fn check_binary(
        &mut self,
        op: BinaryOp,
        left: &mut Expr,
        right: &mut Expr,
    ) -> TypeResult<Type> {
        let left_ty = self.check(left)?;
        let right_ty = self.check(right)?;
        let (operand, codomain) = op.signature();

        if left_ty != operand || right_ty != operand {
            return Err(TypeError::OperatorTypeMismatch {
                op: op.symbol(),
                expected: Type::arrow(Type::product(operand.clone(), operand), codomain),
                got: Type::product(left_ty, right_ty),
            });
        }
        Ok(codomain)
    }

    // Γ ⊢ e₁ : τ₁    Γ ⊢ e₂ : τ₂
    // ────────────────────────────── (T-Product)
    // Γ ⊢ 〈e₁, e₂〉 : τ₁ × τ₂
    fn check_product(&mut self, left: &mut Expr, right: &mut Expr) -> TypeResult<Type> {
        let left_ty = self.check(left)?;
        let right_ty = self.check(right)?;
        Ok(Type::product(left_ty, right_ty))
    }
}
