//! Robinson unification over [`Type`]s.
//!
//! Independent from the simple checker: only the type data model is
//! shared.

use std::collections::HashMap;

use itertools::Itertools;

use crate::{
    ast::Type,
    error::{UnifyError, UnifyResult},
};

pub type TyVar = String;
pub type Subst = HashMap<TyVar, Type>;

/// Whether the type variable `var` appears anywhere in `ty`.
pub fn occurs_in(ty: &Type, var: &str) -> bool {
    match ty {
        Type::Var(name) => name == var,
        Type::Arrow(t1, t2) | Type::Product(t1, t2) => occurs_in(t1, var) || occurs_in(t2, var),
        Type::Unit | Type::Bool | Type::Int | Type::Float | Type::Missing => false,
    }
}

pub fn apply_subst(ty: &Type, subst: &Subst) -> Type {
    match ty {
        Type::Var(name) => subst.get(name).cloned().unwrap_or_else(|| ty.clone()),
        Type::Arrow(t1, t2) => Type::arrow(apply_subst(t1, subst), apply_subst(t2, subst)),
        Type::Product(t1, t2) => Type::product(apply_subst(t1, subst), apply_subst(t2, subst)),
        Type::Unit | Type::Bool | Type::Int | Type::Float | Type::Missing => ty.clone(),
    }
}

/// `τ ∘ ρ`: the substitution applying `rho` first, then `tau`.
///
/// The domains of `tau` and `rho` must not bind a variable to two
/// different types; [`mgu`] never composes such substitutions.
pub fn compose_subst(tau: &Subst, rho: &Subst) -> UnifyResult<Subst> {
    let mut result: Subst = rho
        .iter()
        .map(|(var, ty)| (var.clone(), apply_subst(ty, tau)))
        .collect();

    for (var, ty) in tau {
        match result.get(var) {
            Some(existing) if existing != ty => {
                return Err(UnifyError::ConflictingBindings {
                    var: var.clone(),
                    left: existing.clone(),
                    right: ty.clone(),
                });
            }
            Some(_) => {}
            None => {
                result.insert(var.clone(), ty.clone());
            }
        }
    }
    Ok(result)
}

/// Most general unifier of two equally long type sequences, pairwise.
//
// ρ = mgu(A₂…Aₙ, B₂…Bₙ)    τ = mgu(ρ(A₁), ρ(B₁))
// ─────────────────────────────────────────────
//        mgu(A₁…Aₙ, B₁…Bₙ) = τ ∘ ρ
pub fn mgu(left: &[Type], right: &[Type]) -> UnifyResult<Subst> {
    if left.len() != right.len() {
        return Err(UnifyError::ArityMismatch {
            left: left.len(),
            right: right.len(),
        });
    }

    let (Some((a, left_rest)), Some((b, right_rest))) = (left.split_first(), right.split_first())
    else {
        return Ok(Subst::new());
    };
    if left_rest.is_empty() {
        return mgu1(a, b);
    }

    let rho = mgu(left_rest, right_rest)?;
    let tau = mgu1(&apply_subst(a, &rho), &apply_subst(b, &rho))?;
    let subst = compose_subst(&tau, &rho)?;
    log::trace!(
        "mgu({}; {}) = {}",
        left.iter().format(", "),
        right.iter().format(", "),
        pretty_subst(&subst)
    );
    Ok(subst)
}

/// Most general unifier of a single pair of types.
pub fn mgu1(a: &Type, b: &Type) -> UnifyResult<Subst> {
    match (a, b) {
        // case 1: mgu(X; X) = id
        (Type::Var(n), Type::Var(m)) if n == m => Ok(Subst::new()),
        // cases 2, 3: mgu(X; B) = [X ↦ B] if X ∉ B
        (Type::Var(n), other) => bind_var(n, other),
        // cases 4, 5: mgu(A; Y) = [Y ↦ A] if Y ∉ A
        (other, Type::Var(n)) => bind_var(n, other),
        // case 6: mgu(ι; ι) = id
        (Type::Bool, Type::Bool) | (Type::Int, Type::Int) | (Type::Float, Type::Float) => {
            Ok(Subst::new())
        }
        // case 7: mgu(A → B; C → D) = mgu(A, B; C, D)
        (Type::Arrow(a1, a2), Type::Arrow(b1, b2)) => unify_pairs(a1, a2, b1, b2),
        // case 8: mgu(A × B; C × D) = mgu(A, B; C, D)
        (Type::Product(a1, a2), Type::Product(b1, b2)) => unify_pairs(a1, a2, b1, b2),
        // case 9: mgu(*; *) = id
        (Type::Unit, Type::Unit) => Ok(Subst::new()),
        // case 10
        _ => Err(UnifyError::CannotUnify {
            left: a.clone(),
            right: b.clone(),
        }),
    }
}

fn bind_var(var: &TyVar, ty: &Type) -> UnifyResult<Subst> {
    if occurs_in(ty, var) {
        return Err(UnifyError::OccursCheck {
            var: var.clone(),
            ty: ty.clone(),
        });
    }
    log::trace!("binding {} ↦ {}", var, ty);
    Ok(Subst::from([(var.clone(), ty.clone())]))
}

fn unify_pairs(a1: &Type, a2: &Type, b1: &Type, b2: &Type) -> UnifyResult<Subst> {
    mgu(&[a1.clone(), a2.clone()], &[b1.clone(), b2.clone()])
}

fn pretty_subst(subst: &Subst) -> String {
    let entries = subst
        .iter()
        .sorted_by(|(k1, _), (k2, _)| k1.cmp(k2))
        .map(|(k, v)| format!("{} ↦ {}", k, v));
    format!("{{{}}}", entries.format(", "))
}
