//! Runtime core of a small typed λ-calculus with integers, floats,
//! booleans, unit, pairs and primitive operators.
//!
//! Trees are built by an external front end (see [`ast::Expr`]'s
//! constructors), optionally annotated by [`styping::infer_stype`] and
//! reduced to normal form by [`eval::eval`]. [`unify::mgu`] is a separate
//! Robinson unifier over the same [`ast::Type`]s.

pub mod ast;
pub mod error;
pub mod eval;
pub mod ops;
pub mod styping;
pub mod subst;
pub mod unify;
pub mod vars;

pub use ast::{BinaryOp, Expr, ExprKind, Type, UnaryOp};
pub use error::{EvalError, TypeError, UnifyError};
pub use eval::{eval, eval_with, reduce, EvalConfig};
pub use styping::infer_stype;
pub use subst::{rename, substitute};
pub use unify::{mgu, Subst};
pub use vars::{all_vars, free_vars, fresh_name, is_free};
