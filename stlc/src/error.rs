use crate::ast::Type;

pub type EvalResult<T> = std::result::Result<T, EvalError>;
pub type TypeResult<T> = std::result::Result<T, TypeError>;
pub type UnifyResult<T> = std::result::Result<T, UnifyError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("{op} can't be applied to '{operand}'")]
    TypeMismatch { op: &'static str, operand: String },
    #[error("integer division by zero")]
    DivisionByZero,
    #[error("no normal form reached after {steps} steps")]
    Timeout { steps: usize },
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum TypeError {
    #[error("'{name}' isn't bound")]
    UnboundVariable { name: String },
    #[error("{op} : {expected}; got {got}")]
    OperatorTypeMismatch {
        op: &'static str,
        expected: Type,
        got: Type,
    },
    #[error("trying to apply non-arrow '{ty}'")]
    NotAnArrow { ty: Type },
    #[error("can't apply '{got}' where '{expected}' is expected")]
    ArgumentTypeMismatch { expected: Type, got: Type },
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum UnifyError {
    #[error("{var} occurs in {ty}")]
    OccursCheck { var: String, ty: Type },
    #[error("cannot unify '{left}' with '{right}'")]
    CannotUnify { left: Type, right: Type },
    #[error("cannot unify {left} types with {right} types")]
    ArityMismatch { left: usize, right: usize },
    #[error("conflicting bindings for {var}: '{left}' and '{right}'")]
    ConflictingBindings { var: String, left: Type, right: Type },
}
