use std::fmt;
use std::rc::Rc;

use crate::interpreter::env::FrameId;
use crate::parser::ast::FunctionDecl;

/// A user function closed over the frame it was declared in.
#[derive(Debug)]
pub struct Function {
    pub decl: FunctionDecl,
    pub closure: FrameId,
}

impl Function {
    pub fn name(&self) -> &str {
        &self.decl.name.node
    }
}

#[derive(Debug, Clone)]
pub enum Value {
    Int(i64),
    Float(f64),
    Double(f64),
    Bool(bool),
    Char(char),
    Str(String),
    Array(Vec<Value>),
    /// `Set<T>` or, when `ordered`, `OSet<T>`. Items are unique and kept in insertion order.
    Set { items: Vec<Value>, ordered: bool },
    /// Insertion-ordered key/value pairs with unique keys.
    Dict(Vec<(Value, Value)>),
    Function(Rc<Function>),
    Builtin(&'static str),
    Unit,
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "Int",
            Value::Float(_) => "Float",
            Value::Double(_) => "Double",
            Value::Bool(_) => "Bool",
            Value::Char(_) => "Char",
            Value::Str(_) => "String",
            Value::Array(_) => "Array",
            Value::Set { ordered: false, .. } => "Set",
            Value::Set { ordered: true, .. } => "OSet",
            Value::Dict(_) => "Dict",
            Value::Function(_) | Value::Builtin(_) => "Function",
            Value::Unit => "Unit",
        }
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::Float(f) | Value::Double(f) => *f != 0.0,
            Value::Char(_) => true,
            Value::Str(s) => !s.is_empty(),
            Value::Array(items) | Value::Set { items, .. } => !items.is_empty(),
            Value::Dict(entries) => !entries.is_empty(),
            Value::Function(_) | Value::Builtin(_) => true,
            Value::Unit => false,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(f) | Value::Double(f) => Some(*f),
            _ => None,
        }
    }

    /// True for a collection with no elements: the runtime form of `empty`.
    pub fn is_empty_collection(&self) -> bool {
        match self {
            Value::Array(items) | Value::Set { items, .. } => items.is_empty(),
            Value::Dict(entries) => entries.is_empty(),
            _ => false,
        }
    }

    /// Equality as the `==` operator sees it: numbers compare by value across kinds.
    pub fn loose_eq(&self, other: &Value) -> bool {
        match (self.as_f64(), other.as_f64()) {
            (Some(a), Some(b)) => match (self, other) {
                (Value::Int(x), Value::Int(y)) => x == y,
                _ => a == b,
            },
            _ => match (self, other) {
                (Value::Char(c), Value::Str(s)) | (Value::Str(s), Value::Char(c)) => {
                    let mut chars = s.chars();
                    chars.next() == Some(*c) && chars.next().is_none()
                }
                (Value::Array(a), Value::Array(b)) => {
                    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.loose_eq(y))
                }
                _ => self == other,
            },
        }
    }

    fn write_nested(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "{s:?}"),
            Value::Char(c) => write!(f, "{c:?}"),
            other => write!(f, "{other}"),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) | (Value::Double(a), Value::Double(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (
                Value::Set { items: a, ordered: oa },
                Value::Set { items: b, ordered: ob },
            ) => {
                oa == ob
                    && a.len() == b.len()
                    && if *oa { a == b } else { a.iter().all(|x| b.contains(x)) }
            }
            (Value::Dict(a), Value::Dict(b)) => {
                a.len() == b.len() && a.iter().all(|(k, v)| b.iter().any(|(k2, v2)| k == k2 && v == v2))
            }
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::Builtin(a), Value::Builtin(b)) => a == b,
            (Value::Unit, Value::Unit) => true,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) | Value::Double(x) => write!(f, "{x:?}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Char(c) => write!(f, "{c}"),
            Value::Str(s) => write!(f, "{s}"),
            Value::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    item.write_nested(f)?;
                }
                write!(f, "]")
            }
            Value::Set { items, .. } => {
                write!(f, "{{")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    item.write_nested(f)?;
                }
                write!(f, "}}")
            }
            Value::Dict(entries) => {
                write!(f, "[")?;
                if entries.is_empty() {
                    write!(f, ":")?;
                }
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    k.write_nested(f)?;
                    write!(f, ": ")?;
                    v.write_nested(f)?;
                }
                write!(f, "]")
            }
            Value::Function(func) => write!(f, "<func {}>", func.name()),
            Value::Builtin(name) => write!(f, "<builtin {name}>"),
            Value::Unit => write!(f, "()"),
        }
    }
}
