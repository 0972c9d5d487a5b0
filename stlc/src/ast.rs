use itertools::Itertools;

/// An expression together with its inferred-type slot.
///
/// The slot is `None` until a type pass fills it; literal constructors
/// pre-fill it the way the parser does.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub ty: Option<Type>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Unit,                                       // *
    Int(i64),                                   // 42
    Float(f64),                                 // 4.2
    Bool(bool),                                 // true
    Var(String),                                // x
    Abs(String, Option<Type>, Box<Expr>),       // λx: T. e (None: unannotated)
    App(Box<Expr>, Box<Expr>),                  // e₁ e₂
    Unary(UnaryOp, Box<Expr>),                  // op e
    Binary(BinaryOp, Box<Expr>, Box<Expr>),     // e₁ op e₂
    Product(Box<Expr>, Box<Expr>),              // 〈e₁, e₂〉
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Plus,   // +
    Minus,  // -
    FPlus,  // +.
    FMinus, // -.
    Not,    // !
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    // Integer arithmetic
    Add, // +
    Sub, // -
    Mul, // *
    Div, // /
    // Float arithmetic
    FAdd, // +.
    FSub, // -.
    FMul, // *.
    FDiv, // /.
    // Integer comparison
    Lt, // <
    Gt, // >
    Le, // ≤
    Ge, // ≥
    // Float comparison
    FLt, // <.
    FGt, // >.
    FLe, // ≤.
    FGe, // ≥.
    // Boolean
    And, // &&
    Or,  // ||
}

#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    Unit,                          // *
    Bool,                          // bool
    Int,                           // int
    Float,                         // float
    Var(String),                   // X (unification only)
    Arrow(Box<Type>, Box<Type>),   // A → B
    Product(Box<Type>, Box<Type>), // A × B
    Missing,                       // ? (bound type of an unannotated binder)
}

impl Type {
    pub fn arrow(left: Type, right: Type) -> Self {
        Type::Arrow(Box::new(left), Box::new(right))
    }

    pub fn product(left: Type, right: Type) -> Self {
        Type::Product(Box::new(left), Box::new(right))
    }

    /// Primitive, non-compound types.
    pub fn is_iota(&self) -> bool {
        matches!(self, Type::Unit | Type::Bool | Type::Int | Type::Float)
    }
}

impl Expr {
    pub fn new(kind: ExprKind) -> Self {
        Self { kind, ty: None }
    }

    fn typed(kind: ExprKind, ty: Type) -> Self {
        Self { kind, ty: Some(ty) }
    }

    pub fn unit() -> Self {
        Self::typed(ExprKind::Unit, Type::Unit)
    }

    pub fn int(v: i64) -> Self {
        Self::typed(ExprKind::Int(v), Type::Int)
    }

    pub fn float(v: f64) -> Self {
        Self::typed(ExprKind::Float(v), Type::Float)
    }

    pub fn boolean(v: bool) -> Self {
        Self::typed(ExprKind::Bool(v), Type::Bool)
    }

    pub fn var(name: &str) -> Self {
        Self::new(ExprKind::Var(name.to_string()))
    }

    /// Unannotated abstraction: `λx. body`.
    pub fn abs(name: &str, body: Expr) -> Self {
        Self::new(ExprKind::Abs(name.to_string(), None, Box::new(body)))
    }

    /// Annotated abstraction: `λx:ty. body`.
    pub fn typed_abs(name: &str, ty: Type, body: Expr) -> Self {
        Self::new(ExprKind::Abs(name.to_string(), Some(ty), Box::new(body)))
    }

    pub fn app(left: Expr, right: Expr) -> Self {
        Self::new(ExprKind::App(Box::new(left), Box::new(right)))
    }

    /// Left-associated application chain: `apps(f, [a, b])` is `(f a) b`.
    pub fn apps(head: Expr, args: impl IntoIterator<Item = Expr>) -> Self {
        args.into_iter().fold(head, Self::app)
    }

    pub fn unary(op: UnaryOp, operand: Expr) -> Self {
        Self::new(ExprKind::Unary(op, Box::new(operand)))
    }

    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        Self::new(ExprKind::Binary(op, Box::new(left), Box::new(right)))
    }

    pub fn product(left: Expr, right: Expr) -> Self {
        Self::new(ExprKind::Product(Box::new(left), Box::new(right)))
    }

    /// Right-associated n-tuple: `〈a, b, c〉` is `〈a, 〈b, c〉〉`.
    ///
    /// Returns `None` for an empty sequence; a single element is returned as is.
    pub fn tuple(items: impl IntoIterator<Item = Expr>) -> Option<Self> {
        let mut items: Vec<Expr> = items.into_iter().collect();
        let last = items.pop()?;
        Some(items.into_iter().rev().fold(last, |acc, x| Self::product(x, acc)))
    }

    pub fn is_literal(&self) -> bool {
        matches!(
            self.kind,
            ExprKind::Unit | ExprKind::Int(_) | ExprKind::Float(_) | ExprKind::Bool(_)
        )
    }
}

impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            ExprKind::Unit => write!(f, "*"),
            ExprKind::Int(n) => write!(f, "{}", n),
            ExprKind::Float(x) => write!(f, "{:?}", x),
            ExprKind::Bool(b) => write!(f, "{}", b),
            ExprKind::Var(name) => write!(f, "{}", name),
            ExprKind::Abs(name, Some(ty), body) => write!(f, "λ{}:{}. {}", name, ty, body),
            ExprKind::Abs(name, None, body) => write!(f, "λ{}. {}", name, body),
            ExprKind::App(func, arg) => {
                match func.kind {
                    ExprKind::Abs(..) => write!(f, "({})", func)?,
                    _ => write!(f, "{}", func)?,
                }
                match arg.kind {
                    ExprKind::App(..) | ExprKind::Abs(..) => write!(f, " ({})", arg),
                    _ => write!(f, " {}", arg),
                }
            }
            ExprKind::Unary(op, operand) => write!(f, "{}({})", op, operand),
            ExprKind::Binary(op, left, right) => write!(f, "({} {} {})", left, op, right),
            ExprKind::Product(..) => {
                let mut items = vec![];
                let mut current = self;
                while let ExprKind::Product(left, right) = &current.kind {
                    items.push(left.as_ref());
                    current = right.as_ref();
                }
                items.push(current);
                write!(f, "〈{}〉", items.iter().format(", "))
            }
        }
    }
}

impl std::fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl std::fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl std::fmt::Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Unit => write!(f, "*"),
            Type::Bool => write!(f, "bool"),
            Type::Int => write!(f, "int"),
            Type::Float => write!(f, "float"),
            Type::Missing => write!(f, "?"),
            Type::Var(name) => write!(f, "{}", name),
            Type::Arrow(t1, t2) => match t1.as_ref() {
                Type::Arrow(_, _) => write!(f, "({}) → {}", t1, t2),
                _ => write!(f, "{} → {}", t1, t2),
            },
            Type::Product(t1, t2) => {
                match t1.as_ref() {
                    Type::Arrow(_, _) | Type::Product(_, _) => write!(f, "({})", t1)?,
                    _ => write!(f, "{}", t1)?,
                }
                write!(f, "×")?;
                match t2.as_ref() {
                    Type::Arrow(_, _) => write!(f, "({})", t2),
                    _ => write!(f, "{}", t2),
                }
            }
        }
    }
}
