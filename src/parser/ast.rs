use serde::Serialize;

use crate::span::Spanned;
use crate::typeck::TypeAnnotation;

#[derive(Debug, Clone, Default, Serialize)]
pub struct Program {
    pub stmts: Vec<Spanned<Stmt>>,
}

/// Statements between a block's `:` and its `::`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Block {
    pub stmts: Vec<Spanned<Stmt>>,
}

#[derive(Debug, Clone, Serialize)]
pub enum Stmt {
    VarDecl {
        name: Spanned<String>,
        ty: Spanned<TypeAnnotation>,
        value: Spanned<Expr>,
    },
    Assign {
        target: Spanned<String>,
        value: Spanned<Expr>,
    },
    If {
        condition: Spanned<Expr>,
        then_block: Block,
        else_ifs: Vec<ElseIf>,
        else_block: Option<Block>,
    },
    For {
        var: Spanned<String>,
        start: Spanned<Expr>,
        end: Spanned<Expr>,
        step: Option<Spanned<Expr>>,
        /// `thru`/`through` rather than `to`.
        inclusive: bool,
        body: Block,
    },
    While {
        condition: Spanned<Expr>,
        body: Block,
    },
    Function(FunctionDecl),
    Return(Option<Spanned<Expr>>),
    Expr(Spanned<Expr>),
    Enum(EnumDecl),
    Protocol(ProtocolDecl),
}

#[derive(Debug, Clone, Serialize)]
pub struct ElseIf {
    pub condition: Spanned<Expr>,
    pub block: Block,
}

#[derive(Debug, Clone, Serialize)]
pub struct Param {
    pub name: Spanned<String>,
    pub ty: Spanned<TypeAnnotation>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FunctionDecl {
    pub name: Spanned<String>,
    pub params: Vec<Param>,
    pub return_type: Option<Spanned<TypeAnnotation>>,
    pub body: Block,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnumDecl {
    pub name: Spanned<String>,
    pub conforms: Option<Spanned<String>>,
    pub variants: Vec<Spanned<String>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProtocolDecl {
    pub name: Spanned<String>,
    pub properties: Vec<Param>,
    pub methods: Vec<ProtocolMethod>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProtocolMethod {
    pub name: Spanned<String>,
    pub params: Vec<Param>,
    pub return_type: Option<Spanned<TypeAnnotation>>,
}

#[derive(Debug, Clone, Serialize)]
pub enum Expr {
    Literal(Literal),
    Ident(String),
    Binary {
        op: BinOp,
        lhs: Box<Spanned<Expr>>,
        rhs: Box<Spanned<Expr>>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Spanned<Expr>>,
    },
    Call {
        callee: Spanned<String>,
        args: Vec<Spanned<Expr>>,
    },
    MethodCall {
        receiver: Box<Spanned<Expr>>,
        method: Spanned<String>,
        args: Vec<Spanned<Expr>>,
    },
    Index {
        object: Box<Spanned<Expr>>,
        index: Box<Spanned<Expr>>,
    },
    ArrayLit(Vec<Spanned<Expr>>),
    Cast {
        expr: Box<Spanned<Expr>>,
        target: Spanned<TypeAnnotation>,
    },
    Assign {
        target: Spanned<String>,
        value: Box<Spanned<Expr>>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Literal {
    Int(i64),
    Float(f64),
    Double(f64),
    Str(String),
    Char(char),
    Bool(bool),
    /// The `empty` collection literal.
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    Neq,
    Lt,
    Gt,
    LtEq,
    GtEq,
    And,
    Or,
}

impl BinOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Mod => "%",
            BinOp::Eq => "==",
            BinOp::Neq => "!=",
            BinOp::Lt => "<",
            BinOp::Gt => ">",
            BinOp::LtEq => "<=",
            BinOp::GtEq => ">=",
            BinOp::And => "and",
            BinOp::Or => "or",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum UnaryOp {
    Neg,
    Not,
}
