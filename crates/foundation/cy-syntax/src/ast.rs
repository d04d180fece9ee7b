//! Node definitions

use crate::ops::{BinOpKind, BoolOpKind, CmpOpKind};
use cy_span::Position;
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// A whole source file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    /// Top-level statements in source order
    pub body: Vec<Stmt>,
}

impl Module {
    /// Creates a module from its statements
    #[must_use]
    pub fn new(body: Vec<Stmt>) -> Self {
        Self { body }
    }
}

/// How a name is bound at its use site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display)]
pub enum ExprContext {
    /// Read
    #[default]
    Load,
    /// Assignment target
    Store,
    /// Compound-assignment target
    AugStore,
    /// Positional parameter
    Param,
    /// Keyword-only parameter
    KwOnlyParam,
}

/// Role of a bare identifier token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum NameTokContext {
    /// Name of a class definition
    ClassName,
    /// Name of a function definition
    FunctionName,
    /// `*args` collector
    VarArg,
    /// `**kwargs` collector
    KwArg,
    /// Keyword argument name at a call site
    KeywordName,
}

/// An identifier that is not an expression
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameTok {
    /// Identifier text
    pub id: String,
    /// What the identifier names
    pub ctx: NameTokContext,
    /// Source location
    pub pos: Position,
}

impl NameTok {
    /// Creates an identifier token
    #[must_use]
    pub fn new(id: impl Into<String>, ctx: NameTokContext, pos: Position) -> Self {
        Self {
            id: id.into(),
            ctx,
            pos,
        }
    }
}

/// A block of statements hanging off a compound statement
///
/// Suites are synthetic: their position is whatever the front end reported
/// for the grouping node, or unknown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suite {
    /// Statements in the block
    pub body: Vec<Stmt>,
    /// Source location
    pub pos: Position,
}

impl Suite {
    /// Creates a suite
    #[must_use]
    pub fn new(body: Vec<Stmt>, pos: Position) -> Self {
        Self { body, pos }
    }
}

/// A statement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stmt {
    /// What kind of statement this is
    pub kind: StmtKind,
    /// Source location
    pub pos: Position,
}

impl Stmt {
    /// Creates a statement
    #[must_use]
    pub fn new(kind: StmtKind, pos: Position) -> Self {
        Self { kind, pos }
    }

    /// Wraps an expression as an expression statement at the same location
    #[must_use]
    pub fn expr(value: Expr) -> Self {
        let pos = value.pos;
        Self::new(StmtKind::Expr(value), pos)
    }

    /// The function definition, if this is one
    pub fn as_function_def(&self) -> Option<&FunctionDef> {
        match &self.kind {
            StmtKind::FunctionDef(def) => Some(def),
            _ => None,
        }
    }

    /// The class definition, if this is one
    pub fn as_class_def(&self) -> Option<&ClassDef> {
        match &self.kind {
            StmtKind::ClassDef(def) => Some(def),
            _ => None,
        }
    }
}

/// Statement kinds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StmtKind {
    /// `targets = value`
    Assign {
        /// Assignment targets, all in store context
        targets: Vec<Expr>,
        /// Assigned value
        value: Expr,
    },
    /// `target op= value`
    AugAssign {
        /// Target in aug-store context
        target: Expr,
        /// Operator
        op: BinOpKind,
        /// Right-hand side
        value: Expr,
    },
    /// An expression evaluated for its effect
    Expr(Expr),
    /// `pass`
    Pass,
    /// `if`/`elif`/`else`
    If {
        /// Condition
        test: Expr,
        /// Statements run when the condition holds
        body: Vec<Stmt>,
        /// `elif` chain or `else` block
        orelse: Option<Suite>,
    },
    /// `while` loop
    While {
        /// Loop condition
        test: Expr,
        /// Loop body
        body: Vec<Stmt>,
        /// `else` block
        orelse: Option<Suite>,
    },
    /// `for` loop
    For {
        /// Loop variable(s), in store context
        target: Expr,
        /// Iterated expression
        iter: Expr,
        /// Loop body
        body: Vec<Stmt>,
        /// `else` block
        orelse: Option<Suite>,
        /// `async for`
        is_async: bool,
    },
    /// `assert test, msg`
    Assert {
        /// Asserted condition
        test: Expr,
        /// Failure message
        msg: Option<Expr>,
    },
    /// `return`
    Return {
        /// Returned value
        value: Option<Expr>,
    },
    /// Function definition
    FunctionDef(FunctionDef),
    /// Class definition
    ClassDef(ClassDef),
}

/// `def name(args): body`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionDef {
    /// Function name
    pub name: NameTok,
    /// Parameter list
    pub args: Arguments,
    /// Function body
    pub body: Vec<Stmt>,
    /// Decorators, outermost first
    pub decorators: Vec<Decorator>,
    /// `async def`
    pub is_async: bool,
}

/// `class name(bases): body`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDef {
    /// Class name
    pub name: NameTok,
    /// Base classes
    pub bases: Vec<Expr>,
    /// Class body
    pub body: Vec<Stmt>,
    /// Decorators, outermost first
    pub decorators: Vec<Decorator>,
}

/// A function's parameters
///
/// `defaults` and `annotations` run parallel to `args`; `kw_defaults` and
/// `kwonly_annotations` run parallel to `kwonlyargs`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arguments {
    /// Positional parameters, as names in param context
    pub args: Vec<Expr>,
    /// Default of each positional parameter
    pub defaults: Vec<Option<Expr>>,
    /// Annotation of each positional parameter
    pub annotations: Vec<Option<Expr>>,
    /// `*args`
    pub vararg: Option<NameTok>,
    /// `**kwargs`
    pub kwarg: Option<NameTok>,
    /// Keyword-only parameters
    pub kwonlyargs: Vec<Expr>,
    /// Default of each keyword-only parameter
    pub kw_defaults: Vec<Option<Expr>>,
    /// Annotation of each keyword-only parameter
    pub kwonly_annotations: Vec<Option<Expr>>,
}

/// A decorator applied to a definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decorator {
    /// The decorator callee (or the whole decorator for `@name`)
    pub func: Expr,
    /// Positional call arguments
    pub args: Vec<Expr>,
    /// Keyword call arguments
    pub keywords: Vec<Keyword>,
    /// `*args` call argument
    pub starargs: Option<Expr>,
    /// `**kwargs` call argument
    pub kwargs: Option<Expr>,
    /// Whether the decorator is written as a call, `@dec(...)`
    pub is_call: bool,
    /// Source location
    pub pos: Position,
}

/// `name=value` at a call site
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keyword {
    /// Keyword name
    pub arg: NameTok,
    /// Passed value
    pub value: Expr,
}

/// A call expression
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Call {
    /// Callee
    pub func: Box<Expr>,
    /// Positional arguments
    pub args: Vec<Expr>,
    /// Keyword arguments
    pub keywords: Vec<Keyword>,
    /// `*args`
    pub starargs: Option<Box<Expr>>,
    /// `**kwargs`
    pub kwargs: Option<Box<Expr>>,
}

impl Call {
    /// A call with positional arguments only
    #[must_use]
    pub fn positional(func: Expr, args: Vec<Expr>) -> Self {
        Self {
            func: Box::new(func),
            args,
            keywords: Vec::new(),
            starargs: None,
            kwargs: None,
        }
    }
}

/// A string literal
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrLit {
    /// Literal text
    pub s: String,
    /// `u''` prefix
    pub unicode: bool,
    /// `r''` prefix
    pub raw: bool,
    /// `b''` prefix
    pub binary: bool,
    /// `f''` prefix
    pub fstring: bool,
    /// One node per segment of an interpolated string
    pub fstring_nodes: Vec<Stmt>,
}

/// An expression
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expr {
    /// What kind of expression this is
    pub kind: ExprKind,
    /// Source location
    pub pos: Position,
}

impl Expr {
    /// Creates an expression
    #[must_use]
    pub fn new(kind: ExprKind, pos: Position) -> Self {
        Self { kind, pos }
    }

    /// A plain identifier
    #[must_use]
    pub fn name(id: impl Into<String>, ctx: ExprContext, pos: Position) -> Self {
        Self::new(
            ExprKind::Name {
                id: id.into(),
                ctx,
                reserved: false,
            },
            pos,
        )
    }

    /// A reserved identifier such as `True` or `None`
    #[must_use]
    pub fn reserved(id: impl Into<String>, pos: Position) -> Self {
        Self::new(
            ExprKind::Name {
                id: id.into(),
                ctx: ExprContext::Load,
                reserved: true,
            },
            pos,
        )
    }

    /// The `None` constant
    #[must_use]
    pub fn none(pos: Position) -> Self {
        Self::reserved("None", pos)
    }

    /// An integer literal
    #[must_use]
    pub fn int(value: impl Into<String>, pos: Position) -> Self {
        Self::new(ExprKind::Num(value.into()), pos)
    }

    /// Identifier text, if this is a name
    pub fn name_id(&self) -> Option<&str> {
        match &self.kind {
            ExprKind::Name { id, .. } => Some(id),
            _ => None,
        }
    }
}

/// Expression kinds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExprKind {
    /// Identifier reference
    Name {
        /// Identifier text
        id: String,
        /// Binding context
        ctx: ExprContext,
        /// `True`, `False` and `None`
        reserved: bool,
    },
    /// Integer literal, in decimal
    Num(String),
    /// String literal
    Str(StrLit),
    /// `(a, b)`
    Tuple {
        /// Elements
        elts: Vec<Expr>,
        /// Binding context
        ctx: ExprContext,
        /// Written with a trailing comma
        ends_with_comma: bool,
    },
    /// `[a, b]`
    List {
        /// Elements
        elts: Vec<Expr>,
        /// Binding context
        ctx: ExprContext,
    },
    /// `{a, b}`
    Set {
        /// Elements
        elts: Vec<Expr>,
    },
    /// `{k: v}`
    Dict {
        /// Keys
        keys: Vec<Expr>,
        /// Values, parallel to `keys`
        values: Vec<Expr>,
    },
    /// Call expression
    Call(Call),
    /// `left op right`
    BinOp {
        /// Left operand
        left: Box<Expr>,
        /// Operator
        op: BinOpKind,
        /// Right operand
        right: Box<Expr>,
    },
    /// `a or b`, `a and b`
    BoolOp {
        /// Operator
        op: BoolOpKind,
        /// Operands
        values: Vec<Expr>,
    },
    /// `a < b <= c`
    Compare {
        /// First operand
        left: Box<Expr>,
        /// Operators, one per comparator
        ops: Vec<CmpOpKind>,
        /// Right operands
        comparators: Vec<Expr>,
    },
    /// `body if test else orelse`
    IfExp {
        /// Condition
        test: Box<Expr>,
        /// Value when the condition holds
        body: Box<Expr>,
        /// Value otherwise
        orelse: Box<Expr>,
    },
    /// `await value`
    Await {
        /// Awaited expression
        value: Box<Expr>,
    },
    /// `yield value`
    Yield {
        /// Yielded expression
        value: Option<Box<Expr>>,
    },
}
