use curly_source::Position;
use std::fmt;

/// Binary operators. All of them share a single precedence level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Equal,
    NotEqual,
}

impl BinOp {
    pub fn as_str(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Less => "<",
            BinOp::LessEqual => "<=",
            BinOp::Greater => ">",
            BinOp::GreaterEqual => ">=",
            BinOp::Equal => "==",
            BinOp::NotEqual => "!=",
        }
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseType {
    Int,
    Double,
    Bool,
}

/// A type annotation (e.g. `int` or `bool[]`). Parsed but never enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Type {
    pub base: BaseType,
    pub is_array: bool,
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let base = match self.base {
            BaseType::Int => "int",
            BaseType::Double => "double",
            BaseType::Bool => "bool",
        };
        f.write_str(base)?;
        if self.is_array {
            f.write_str("[]")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// An integer literal (e.g. `42`).
    NumberLit { value: i64, pos: Position },
    /// An identifier (e.g. `foo`).
    Identifier { ident: String, pos: Position },
    /// A binary expression (e.g. `1+1`).
    Binary {
        lhs: Box<Expr>,
        op: BinOp,
        rhs: Box<Expr>,
        pos: Position,
    },
    /// An assignment used as an expression (e.g. `x = 1` or the desugared `x++`).
    Assign {
        target: String,
        value: Box<Expr>,
        pos: Position,
    },
    /// A call (e.g. `foo(1, 2)`). Only calls through a plain name can be evaluated.
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
        pos: Position,
    },
    /// An index expression (e.g. `xs[0]`).
    Index {
        array: Box<Expr>,
        index: Box<Expr>,
        pos: Position,
    },
    /// An array literal (e.g. `[1, 2]`).
    ArrayLit { elements: Vec<Expr>, pos: Position },
}

impl Expr {
    pub fn pos(&self) -> Position {
        match self {
            Expr::NumberLit { pos, .. }
            | Expr::Identifier { pos, .. }
            | Expr::Binary { pos, .. }
            | Expr::Assign { pos, .. }
            | Expr::Call { pos, .. }
            | Expr::Index { pos, .. }
            | Expr::ArrayLit { pos, .. } => *pos,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    VarDecl {
        ident: String,
        ty: Type,
        initializer: Expr,
        pos: Position,
    },
    Assign {
        target: String,
        value: Expr,
        pos: Position,
    },
    Return { expr: Expr, pos: Position },
    Print { expr: Expr, pos: Position },
    ExprStmt { expr: Expr, pos: Position },
    For {
        init: Option<Box<Stmt>>,
        condition: Option<Expr>,
        increment: Option<Expr>,
        body: Vec<Stmt>,
        pos: Position,
    },
    While {
        condition: Expr,
        body: Vec<Stmt>,
        pos: Position,
    },
    /// `for (x: int in xs) { ... }`. No grammar rule produces this node.
    ForEach {
        ident: String,
        ty: Type,
        iterable: Expr,
        body: Vec<Stmt>,
        pos: Position,
    },
}

impl Stmt {
    pub fn pos(&self) -> Position {
        match self {
            Stmt::VarDecl { pos, .. }
            | Stmt::Assign { pos, .. }
            | Stmt::Return { pos, .. }
            | Stmt::Print { pos, .. }
            | Stmt::ExprStmt { pos, .. }
            | Stmt::For { pos, .. }
            | Stmt::While { pos, .. }
            | Stmt::ForEach { pos, .. } => *pos,
        }
    }
}

/// Loop bodies are torn down with an explicit work list, so dropping a deeply
/// nested statement uses constant stack.
impl Drop for Stmt {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        detach_children(self, &mut pending);
        while let Some(mut stmt) = pending.pop() {
            detach_children(&mut stmt, &mut pending);
        }
    }
}

fn detach_children(stmt: &mut Stmt, pending: &mut Vec<Stmt>) {
    match stmt {
        Stmt::For { init, body, .. } => {
            if let Some(init) = init.take() {
                pending.push(*init);
            }
            pending.append(body);
        }
        Stmt::While { body, .. } | Stmt::ForEach { body, .. } => pending.append(body),
        _ => {}
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub ident: String,
    pub ty: Type,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FnDeclaration {
    pub ident: String,
    pub params: Vec<Param>,
    /// `None` for functions declared without a return type (`void`).
    pub return_type: Option<Type>,
    pub body: Vec<Stmt>,
    pub pos: Position,
}

/// A top-level node: either a function declaration or a statement to execute immediately.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    FnDeclaration(FnDeclaration),
    Stmt(Stmt),
}
