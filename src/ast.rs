//! Target AST (C6): the tagged tree emitted code is built from.
//!
//! Shaped directly after Python's `ast` module, since the emission target is
//! a Python-like scripting language driving `meep`. Every node owns its
//! children (`Box`/`Vec`, no shared references) — actions move subtrees by
//! value as they pop and push the value stack.

use std::fmt;

/// Whether a `Name`/`Attribute` is being read or written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ctx {
    Load,
    Store,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOpKind {
    Add,
    Sub,
    Mult,
    Div,
}

impl fmt::Display for BinOpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BinOpKind::Add => "+",
            BinOpKind::Sub => "-",
            BinOpKind::Mult => "*",
            BinOpKind::Div => "/",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOpKind {
    USub,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Eq,
    NotEq,
    Gt,
    GtE,
    Lt,
    LtE,
}

impl fmt::Display for CmpOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CmpOp::Eq => "==",
            CmpOp::NotEq => "!=",
            CmpOp::Gt => ">",
            CmpOp::GtE => ">=",
            CmpOp::Lt => "<",
            CmpOp::LtE => "<=",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoolOpKind {
    And,
    Or,
}

impl fmt::Display for BoolOpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BoolOpKind::And => "and",
            BoolOpKind::Or => "or",
        };
        write!(f, "{}", s)
    }
}

/// A literal value carried by a `Constant` node.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
}

/// An `import x as y` / `from m import x as y` name, `asname` absent when no
/// alias was requested.
#[derive(Debug, Clone, PartialEq)]
pub struct Alias {
    pub name: String,
    pub asname: Option<String>,
}

impl Alias {
    pub fn new(name: impl Into<String>, asname: Option<&str>) -> Self {
        Self {
            name: name.into(),
            asname: asname.map(str::to_string),
        }
    }
}

/// The target AST, per `ASTNode`'s fixed variant catalogue.
#[derive(Debug, Clone, PartialEq)]
pub enum ASTNode {
    Module {
        body: Vec<ASTNode>,
    },
    Import {
        names: Vec<Alias>,
    },
    ImportFrom {
        module: String,
        names: Vec<Alias>,
        level: i32,
    },
    Assign {
        targets: Vec<ASTNode>,
        value: Box<ASTNode>,
    },
    AugAssign {
        target: Box<ASTNode>,
        op: BinOpKind,
        value: Box<ASTNode>,
    },
    Name {
        id: String,
        ctx: Ctx,
    },
    Constant(Literal),
    BinOp {
        left: Box<ASTNode>,
        op: BinOpKind,
        right: Box<ASTNode>,
    },
    UnaryOp {
        op: UnaryOpKind,
        operand: Box<ASTNode>,
    },
    Compare {
        left: Box<ASTNode>,
        ops: Vec<CmpOp>,
        comparators: Vec<ASTNode>,
    },
    BoolOp {
        op: BoolOpKind,
        values: Vec<ASTNode>,
    },
    If {
        test: Box<ASTNode>,
        body: Vec<ASTNode>,
        orelse: Vec<ASTNode>,
    },
    While {
        test: Option<Box<ASTNode>>,
        body: Vec<ASTNode>,
        orelse: Vec<ASTNode>,
    },
    For {
        target: Box<ASTNode>,
        iter: Box<ASTNode>,
        body: Vec<ASTNode>,
        orelse: Vec<ASTNode>,
    },
    Break,
    /// Not part of the minimally-required catalogue; used as the loop-body
    /// filler for `SetProperty`'s unrecognized-property fallback.
    Pass,
    Expr {
        value: Box<ASTNode>,
    },
    Call {
        func: Box<ASTNode>,
        args: Vec<ASTNode>,
        kwargs: Vec<ASTNode>,
    },
    Attribute {
        value: Box<ASTNode>,
        attr: String,
        ctx: Ctx,
    },
    Keyword {
        arg: Option<String>,
        value: Box<ASTNode>,
    },
}

impl ASTNode {
    pub fn name(id: impl Into<String>, ctx: Ctx) -> Self {
        ASTNode::Name { id: id.into(), ctx }
    }

    pub fn constant(value: Literal) -> Self {
        ASTNode::Constant(value)
    }

    pub fn call(func: ASTNode, args: Vec<ASTNode>, kwargs: Vec<ASTNode>) -> Self {
        ASTNode::Call {
            func: Box::new(func),
            args,
            kwargs,
        }
    }

    /// Mutable access to the `body` field shared by `Module`, `If`, `While`
    /// and `For` — the shape `StoreToBody` needs to append a statement
    /// without knowing which of those four it is threading into.
    pub fn body_mut(&mut self) -> Option<&mut Vec<ASTNode>> {
        match self {
            ASTNode::Module { body }
            | ASTNode::If { body, .. }
            | ASTNode::While { body, .. }
            | ASTNode::For { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Mutable access to `If`'s `orelse`, for `StoreToElse`/`HandleElse`.
    pub fn orelse_mut(&mut self) -> Option<&mut Vec<ASTNode>> {
        match self {
            ASTNode::If { orelse, .. } => Some(orelse),
            _ => None,
        }
    }

    pub fn as_if(&self) -> Option<(&ASTNode, &Vec<ASTNode>, &Vec<ASTNode>)> {
        match self {
            ASTNode::If { test, body, orelse } => Some((test, body, orelse)),
            _ => None,
        }
    }

    pub fn is_if(&self) -> bool {
        matches!(self, ASTNode::If { .. })
    }
}
