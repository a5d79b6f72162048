//! Tree-walking evaluator.
//!
//! Statements run against an arena of lexical frames (see [`env`]). `return`
//! travels outward as [`Flow::Return`] and is intercepted only at the call
//! boundary. The first runtime error halts the whole run.

pub mod env;
pub mod intrinsics;

use std::collections::HashMap;
use std::io::Write;
use std::rc::Rc;

use tracing::{debug, trace, warn};

use crate::config::InterpreterConfig;
use crate::diagnostics::NoirError;
use crate::parser::ast::*;
use crate::span::{Span, Spanned};
use crate::typeck::{self, TypeAnnotation, TypeError};
use crate::value::{Function, Value};
use env::{Binding, FrameId, Scopes};
use intrinsics::Intrinsics;

/// How a statement finished.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    Normal,
    Return(Option<Value>),
}

pub struct Interpreter<W: Write> {
    scopes: Scopes,
    current: FrameId,
    intrinsics: Intrinsics,
    enums: HashMap<String, EnumDecl>,
    protocols: HashMap<String, ProtocolDecl>,
    config: InterpreterConfig,
    call_depth: usize,
    out: W,
}

impl<W: Write> Interpreter<W> {
    pub fn new(out: W) -> Self {
        Self::with_config(InterpreterConfig::default(), out)
    }

    pub fn with_config(config: InterpreterConfig, out: W) -> Self {
        let scopes = Scopes::new();
        let global = scopes.global();
        let mut interp = Self {
            scopes,
            current: global,
            intrinsics: Intrinsics::standard(),
            enums: HashMap::new(),
            protocols: HashMap::new(),
            config,
            call_depth: 0,
            out,
        };
        let names: Vec<&'static str> = interp.intrinsics.names().collect();
        for name in names {
            interp.scopes.define(
                global,
                name,
                Binding { value: Value::Builtin(name), declared: TypeAnnotation::primitive(typeck::types::FUNCTION) },
            );
        }
        interp
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Value of a global binding, if any.
    pub fn global(&self, name: &str) -> Option<&Value> {
        self.scopes.lookup(self.scopes.global(), name).map(|b| &b.value)
    }

    pub fn interpret(&mut self, program: &Program) -> Result<(), NoirError> {
        for stmt in &program.stmts {
            match self.exec_stmt(stmt) {
                Ok(Flow::Normal) => {}
                Ok(Flow::Return(_)) => {
                    debug!(line = stmt.span.line, "top-level return, halting");
                    break;
                }
                Err(err) => {
                    warn!(%err, "execution halted");
                    return Err(err);
                }
            }
        }
        self.out
            .flush()
            .map_err(|e| NoirError::runtime(format!("failed to flush output: {e}"), None))
    }

    // ---- statements ----

    fn exec_block(&mut self, block: &Block) -> Result<Flow, NoirError> {
        for stmt in &block.stmts {
            if let Flow::Return(value) = self.exec_stmt(stmt)? {
                return Ok(Flow::Return(value));
            }
        }
        Ok(Flow::Normal)
    }

    fn exec_stmt(&mut self, stmt: &Spanned<Stmt>) -> Result<Flow, NoirError> {
        match &stmt.node {
            Stmt::VarDecl { name, ty, value } => {
                let v = self.eval_expr(value)?;
                // An explicit cast has already produced the declared representation.
                let v = if matches!(value.node, Expr::Cast { .. }) {
                    v
                } else {
                    check_assignment(&ty.node, v, stmt.span)?
                };
                self.scopes.define(self.current, name.node.clone(), Binding { value: v, declared: ty.node.clone() });
                Ok(Flow::Normal)
            }
            Stmt::Assign { target, value } => {
                let v = self.eval_expr(value)?;
                self.assign(target, v, stmt.span)?;
                Ok(Flow::Normal)
            }
            Stmt::If { condition, then_block, else_ifs, else_block } => {
                if self.eval_expr(condition)?.is_truthy() {
                    return self.exec_block(then_block);
                }
                for clause in else_ifs {
                    if self.eval_expr(&clause.condition)?.is_truthy() {
                        return self.exec_block(&clause.block);
                    }
                }
                match else_block {
                    Some(block) => self.exec_block(block),
                    None => Ok(Flow::Normal),
                }
            }
            Stmt::While { condition, body } => {
                while self.eval_expr(condition)?.is_truthy() {
                    if let Flow::Return(value) = self.exec_block(body)? {
                        return Ok(Flow::Return(value));
                    }
                }
                Ok(Flow::Normal)
            }
            Stmt::For { var, start, end, step, inclusive, body } => {
                let start = self.eval_bound(start, "start")?;
                let end = self.eval_bound(end, "end")?;
                let step = match step {
                    Some(expr) => self.eval_bound(expr, "step")?,
                    None => 1,
                };
                if step == 0 {
                    return Err(NoirError::runtime("for loop step cannot be zero", Some(stmt.span)));
                }
                let frame = self.scopes.push(self.current);
                let saved = self.current;
                self.current = frame;
                let result = self.run_for(frame, &var.node, start, end, step, *inclusive, body);
                self.current = saved;
                self.scopes.release(frame);
                result
            }
            Stmt::Function(decl) => {
                let func = Function { decl: decl.clone(), closure: self.current };
                debug!(name = %decl.name.node, params = decl.params.len(), "registered function");
                self.scopes.define(
                    self.current,
                    decl.name.node.clone(),
                    Binding {
                        value: Value::Function(Rc::new(func)),
                        declared: TypeAnnotation::primitive(typeck::types::FUNCTION),
                    },
                );
                Ok(Flow::Normal)
            }
            Stmt::Return(value) => {
                let v = match value {
                    Some(expr) => Some(self.eval_expr(expr)?),
                    None => None,
                };
                Ok(Flow::Return(v))
            }
            Stmt::Expr(expr) => {
                self.eval_expr(expr)?;
                Ok(Flow::Normal)
            }
            Stmt::Enum(decl) => {
                let name = &decl.name.node;
                if self.enums.contains_key(name) {
                    return Err(NoirError::runtime(format!("enum '{name}' is already defined"), Some(decl.name.span)));
                }
                if let Some(protocol) = &decl.conforms {
                    if !self.protocols.contains_key(&protocol.node) {
                        return Err(NoirError::runtime(
                            format!("protocol '{}' is not defined", protocol.node),
                            Some(protocol.span),
                        ));
                    }
                    debug!(enum_name = %name, protocol = %protocol.node, "conformance recorded without verification");
                }
                debug!(name = %name, variants = decl.variants.len(), "registered enum");
                self.enums.insert(name.clone(), decl.clone());
                Ok(Flow::Normal)
            }
            Stmt::Protocol(decl) => {
                let name = &decl.name.node;
                if self.protocols.contains_key(name) {
                    return Err(NoirError::runtime(
                        format!("protocol '{name}' is already defined"),
                        Some(decl.name.span),
                    ));
                }
                debug!(name = %name, "registered protocol");
                self.protocols.insert(name.clone(), decl.clone());
                Ok(Flow::Normal)
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn run_for(
        &mut self,
        frame: FrameId,
        var: &str,
        start: i64,
        end: i64,
        step: i64,
        inclusive: bool,
        body: &Block,
    ) -> Result<Flow, NoirError> {
        self.scopes.define(frame, var, Binding { value: Value::Int(start), declared: TypeAnnotation::primitive(typeck::types::INT) });
        let mut i = start;
        loop {
            let in_range = match (step > 0, inclusive) {
                (true, false) => i < end,
                (true, true) => i <= end,
                (false, false) => i > end,
                (false, true) => i >= end,
            };
            if !in_range {
                return Ok(Flow::Normal);
            }
            self.scopes.store(frame, var, Value::Int(i));
            if let Flow::Return(value) = self.exec_block(body)? {
                return Ok(Flow::Return(value));
            }
            i = match i.checked_add(step) {
                Some(next) => next,
                None => return Ok(Flow::Normal),
            };
        }
    }

    fn eval_bound(&mut self, expr: &Spanned<Expr>, what: &str) -> Result<i64, NoirError> {
        match self.eval_expr(expr)? {
            Value::Int(n) => Ok(n),
            other => Err(NoirError::runtime(
                format!("for loop {what} must be Int, found {}", other.type_name()),
                Some(expr.span),
            )),
        }
    }

    /// Store into an existing binding after checking the variable's declared type.
    fn assign(&mut self, target: &Spanned<String>, value: Value, span: Span) -> Result<Value, NoirError> {
        let name = target.node.as_str();
        let (owner, declared) = match self.scopes.resolve(self.current, name) {
            Some(owner) => match self.scopes.lookup(owner, name) {
                Some(binding) => (owner, binding.declared.clone()),
                None => return Err(undefined_variable(target)),
            },
            None => return Err(undefined_variable(target)),
        };
        let value = check_assignment(&declared, value, span)?;
        self.scopes.store(owner, name, value.clone());
        Ok(value)
    }

    // ---- expressions ----

    fn eval_expr(&mut self, expr: &Spanned<Expr>) -> Result<Value, NoirError> {
        match &expr.node {
            Expr::Literal(lit) => Ok(match lit {
                Literal::Int(n) => Value::Int(*n),
                Literal::Float(f) => Value::Float(*f),
                Literal::Double(f) => Value::Double(*f),
                Literal::Str(s) => Value::Str(s.clone()),
                Literal::Char(c) => Value::Char(*c),
                Literal::Bool(b) => Value::Bool(*b),
                Literal::Empty => Value::Array(Vec::new()),
            }),
            Expr::Ident(name) => self
                .scopes
                .lookup(self.current, name)
                .map(|b| b.value.clone())
                .ok_or_else(|| NoirError::runtime(format!("undefined variable '{name}'"), Some(expr.span))),
            Expr::Binary { op: BinOp::And, lhs, rhs } => {
                if !self.eval_expr(lhs)?.is_truthy() {
                    return Ok(Value::Bool(false));
                }
                Ok(Value::Bool(self.eval_expr(rhs)?.is_truthy()))
            }
            Expr::Binary { op: BinOp::Or, lhs, rhs } => {
                if self.eval_expr(lhs)?.is_truthy() {
                    return Ok(Value::Bool(true));
                }
                Ok(Value::Bool(self.eval_expr(rhs)?.is_truthy()))
            }
            Expr::Binary { op, lhs, rhs } => {
                let l = self.eval_expr(lhs)?;
                let r = self.eval_expr(rhs)?;
                binary_op(*op, l, r).map_err(|msg| NoirError::runtime(msg, Some(expr.span)))
            }
            Expr::Unary { op, operand } => {
                let v = self.eval_expr(operand)?;
                match op {
                    UnaryOp::Not => Ok(Value::Bool(!v.is_truthy())),
                    UnaryOp::Neg => match v {
                        Value::Int(n) => n
                            .checked_neg()
                            .map(Value::Int)
                            .ok_or_else(|| NoirError::runtime("integer overflow in negation", Some(expr.span))),
                        Value::Float(f) => Ok(Value::Float(-f)),
                        Value::Double(f) => Ok(Value::Double(-f)),
                        other => Err(NoirError::runtime(
                            format!("cannot negate a value of type {}", other.type_name()),
                            Some(expr.span),
                        )),
                    },
                }
            }
            Expr::Call { callee, args } => {
                // The callee is resolved before any argument runs.
                match self.scopes.lookup(self.current, &callee.node).map(|b| b.value.clone()) {
                    Some(Value::Function(func)) => {
                        let args = self.eval_args(args)?;
                        self.call_function(func, args, expr.span)
                    }
                    Some(Value::Builtin(name)) => {
                        let Some(intrinsic) = self.intrinsics.get(name) else {
                            return Err(NoirError::runtime(format!("unknown builtin '{name}'"), Some(callee.span)));
                        };
                        let args = self.eval_args(args)?;
                        intrinsic(&mut self.out, &args)
                    }
                    Some(other) => Err(NoirError::runtime(
                        format!("'{}' is not callable (found {})", callee.node, other.type_name()),
                        Some(callee.span),
                    )),
                    None => Err(NoirError::runtime(format!("undefined function '{}'", callee.node), Some(callee.span))),
                }
            }
            Expr::MethodCall { receiver, method, args } => self.call_method(receiver, method, args, expr.span),
            Expr::Index { object, index } => {
                let container = self.eval_expr(object)?;
                let key = self.eval_expr(index)?;
                index_value(container, &key).map_err(|msg| NoirError::runtime(msg, Some(expr.span)))
            }
            Expr::ArrayLit(elements) => Ok(Value::Array(self.eval_args(elements)?)),
            Expr::Cast { expr: inner, target } => {
                let v = self.eval_expr(inner)?;
                let from = typeck::type_of(&v);
                typeck::validate_type_cast(v, &from, &target.node).map_err(|e| type_failure(e, expr.span))
            }
            Expr::Assign { target, value } => {
                let v = self.eval_expr(value)?;
                self.assign(target, v, expr.span)
            }
        }
    }

    fn eval_args(&mut self, args: &[Spanned<Expr>]) -> Result<Vec<Value>, NoirError> {
        args.iter().map(|arg| self.eval_expr(arg)).collect()
    }

    fn call_function(&mut self, func: Rc<Function>, args: Vec<Value>, span: Span) -> Result<Value, NoirError> {
        let decl = &func.decl;
        if args.len() != decl.params.len() {
            return Err(NoirError::runtime(
                format!(
                    "function '{}' expects {} argument(s), found {}",
                    func.name(),
                    decl.params.len(),
                    args.len()
                ),
                Some(span),
            ));
        }
        if self.call_depth >= self.config.max_call_depth {
            return Err(NoirError::runtime(
                format!("maximum call depth of {} exceeded", self.config.max_call_depth),
                Some(span),
            ));
        }
        if !self.scopes.is_live(func.closure) {
            return Err(NoirError::runtime(
                format!("function '{}' cannot be called after its defining scope has ended", func.name()),
                Some(span),
            ));
        }

        trace!(name = %func.name(), depth = self.call_depth, "call");
        let frame = self.scopes.push(func.closure);
        let saved = self.current;
        self.current = frame;
        self.call_depth += 1;
        let result = self.run_call(&func, args, span);
        self.call_depth -= 1;
        self.current = saved;
        self.scopes.release(frame);
        result
    }

    fn run_call(&mut self, func: &Function, args: Vec<Value>, span: Span) -> Result<Value, NoirError> {
        let decl = &func.decl;
        for (param, arg) in decl.params.iter().zip(args) {
            let arg_type = typeck::type_of(&arg);
            let value = typeck::validate_assignment(&param.ty.node, arg, &arg_type).map_err(|e| {
                NoirError::runtime(
                    format!("type error in argument '{}' of '{}': {}", param.name.node, func.name(), e.msg),
                    Some(span),
                )
            })?;
            self.scopes.define(
                self.current,
                param.name.node.clone(),
                Binding { value, declared: param.ty.node.clone() },
            );
        }

        let returned = match self.exec_block(&decl.body)? {
            Flow::Return(value) => value,
            Flow::Normal => None,
        };
        match (&decl.return_type, returned) {
            (Some(_), None) => Err(NoirError::runtime(
                format!("function '{}' did not return a value", func.name()),
                Some(span),
            )),
            (Some(ty), Some(value)) => check_assignment(&ty.node, value, span),
            (None, value) => Ok(value.unwrap_or(Value::Unit)),
        }
    }

    fn call_method(
        &mut self,
        receiver: &Spanned<Expr>,
        method: &Spanned<String>,
        args: &[Spanned<Expr>],
        span: Span,
    ) -> Result<Value, NoirError> {
        let target = self.eval_expr(receiver)?;
        let args = self.eval_args(args)?;
        let outcome =
            apply_method(target, &method.node, &args).map_err(|msg| NoirError::runtime(msg, Some(method.span)))?;
        if let Some(updated) = outcome.updated {
            let Expr::Ident(name) = &receiver.node else {
                return Err(NoirError::runtime(
                    format!("method '{}' modifies its receiver, which must be a variable", method.node),
                    Some(receiver.span),
                ));
            };
            self.assign(&Spanned::new(name.clone(), receiver.span), updated, span)?;
        }
        Ok(outcome.result)
    }
}

fn undefined_variable(target: &Spanned<String>) -> NoirError {
    NoirError::runtime(format!("undefined variable '{}'", target.node), Some(target.span))
}

fn type_failure(err: TypeError, span: Span) -> NoirError {
    NoirError::runtime(err.msg, Some(span))
}

fn check_assignment(declared: &TypeAnnotation, value: Value, span: Span) -> Result<Value, NoirError> {
    let value_type = typeck::type_of(&value);
    typeck::validate_assignment(declared, value, &value_type).map_err(|e| type_failure(e, span))
}

// ---- operators ----

fn binary_op(op: BinOp, lhs: Value, rhs: Value) -> Result<Value, String> {
    match op {
        BinOp::Eq => Ok(Value::Bool(lhs.loose_eq(&rhs))),
        BinOp::Neq => Ok(Value::Bool(!lhs.loose_eq(&rhs))),
        BinOp::Lt | BinOp::Gt | BinOp::LtEq | BinOp::GtEq => compare(op, &lhs, &rhs),
        BinOp::Add => match (lhs, rhs) {
            (Value::Str(a), Value::Str(b)) => Ok(Value::Str(a + &b)),
            (Value::Str(mut a), Value::Char(c)) => {
                a.push(c);
                Ok(Value::Str(a))
            }
            (Value::Char(c), Value::Str(b)) => Ok(Value::Str(format!("{c}{b}"))),
            (Value::Char(a), Value::Char(b)) => Ok(Value::Str(format!("{a}{b}"))),
            (Value::Array(mut a), Value::Array(b)) => {
                a.extend(b);
                Ok(Value::Array(a))
            }
            (l, r) => arithmetic(BinOp::Add, l, r),
        },
        BinOp::Sub | BinOp::Mul | BinOp::Div | BinOp::Mod => arithmetic(op, lhs, rhs),
        BinOp::And | BinOp::Or => Ok(Value::Bool(match op {
            BinOp::And => lhs.is_truthy() && rhs.is_truthy(),
            _ => lhs.is_truthy() || rhs.is_truthy(),
        })),
    }
}

fn unsupported(op: BinOp, lhs: &Value, rhs: &Value) -> String {
    format!(
        "unsupported operand types for {}: {} and {}",
        op.symbol(),
        lhs.type_name(),
        rhs.type_name()
    )
}

fn arithmetic(op: BinOp, lhs: Value, rhs: Value) -> Result<Value, String> {
    if let (Value::Int(a), Value::Int(b)) = (&lhs, &rhs) {
        let (a, b) = (*a, *b);
        let result = match op {
            BinOp::Add => a.checked_add(b),
            BinOp::Sub => a.checked_sub(b),
            BinOp::Mul => a.checked_mul(b),
            BinOp::Div if b == 0 => return Err("division by zero".to_string()),
            BinOp::Div => a.checked_div(b),
            BinOp::Mod if b == 0 => return Err("modulo by zero".to_string()),
            BinOp::Mod => a.checked_rem(b),
            _ => return Err(unsupported(op, &lhs, &rhs)),
        };
        return result
            .map(Value::Int)
            .ok_or_else(|| format!("integer overflow in {a} {} {b}", op.symbol()));
    }

    let (Some(a), Some(b)) = (lhs.as_f64(), rhs.as_f64()) else {
        return Err(unsupported(op, &lhs, &rhs));
    };
    let result = match op {
        BinOp::Add => a + b,
        BinOp::Sub => a - b,
        BinOp::Mul => a * b,
        BinOp::Div if b == 0.0 => return Err("division by zero".to_string()),
        BinOp::Div => a / b,
        BinOp::Mod if b == 0.0 => return Err("modulo by zero".to_string()),
        BinOp::Mod => a % b,
        _ => return Err(unsupported(op, &lhs, &rhs)),
    };
    // Int < Float < Double
    if matches!(lhs, Value::Double(_)) || matches!(rhs, Value::Double(_)) {
        Ok(Value::Double(result))
    } else {
        Ok(Value::Float(result))
    }
}

fn compare(op: BinOp, lhs: &Value, rhs: &Value) -> Result<Value, String> {
    use std::cmp::Ordering;

    let ordering = match (lhs, rhs) {
        (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
        (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
        (Value::Char(a), Value::Char(b)) => Some(a.cmp(b)),
        _ => match (lhs.as_f64(), rhs.as_f64()) {
            (Some(a), Some(b)) => a.partial_cmp(&b),
            _ => return Err(unsupported(op, lhs, rhs)),
        },
    };
    // NaN compares false under every ordering.
    let Some(ordering) = ordering else {
        return Ok(Value::Bool(false));
    };
    let result = match op {
        BinOp::Lt => ordering == Ordering::Less,
        BinOp::Gt => ordering == Ordering::Greater,
        BinOp::LtEq => ordering != Ordering::Greater,
        _ => ordering != Ordering::Less,
    };
    Ok(Value::Bool(result))
}

fn index_value(container: Value, key: &Value) -> Result<Value, String> {
    match (container, key) {
        (Value::Array(items), Value::Int(i)) => {
            let len = items.len();
            usize::try_from(*i)
                .ok()
                .and_then(|idx| items.into_iter().nth(idx))
                .ok_or_else(|| format!("index {i} out of bounds for array of length {len}"))
        }
        (Value::Str(s), Value::Int(i)) => {
            let len = s.chars().count();
            usize::try_from(*i)
                .ok()
                .and_then(|idx| s.chars().nth(idx))
                .map(Value::Char)
                .ok_or_else(|| format!("index {i} out of bounds for string of length {len}"))
        }
        (Value::Dict(entries), key) => entries
            .into_iter()
            .find(|(k, _)| k.loose_eq(key))
            .map(|(_, v)| v)
            .ok_or_else(|| format!("key {key} not found in dictionary")),
        (other, key) => Err(format!("cannot index {} with {}", other.type_name(), key.type_name())),
    }
}

// ---- collection and string methods ----

struct MethodOutcome {
    result: Value,
    /// New receiver value for methods that modify it.
    updated: Option<Value>,
}

impl MethodOutcome {
    fn pure(result: Value) -> Self {
        Self { result, updated: None }
    }

    fn mutated(result: Value, updated: Value) -> Self {
        Self { result, updated: Some(updated) }
    }
}

fn arity(method: &str, args: &[Value], expected: usize) -> Result<(), String> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(format!("method '{method}' expects {expected} argument(s), found {}", args.len()))
    }
}

fn position_of(items: &[Value], needle: &Value) -> Option<usize> {
    items.iter().position(|item| item.loose_eq(needle))
}

fn apply_method(receiver: Value, method: &str, args: &[Value]) -> Result<MethodOutcome, String> {
    let type_name = receiver.type_name();
    match (receiver, method) {
        (Value::Array(mut items), "append") => {
            arity(method, args, 1)?;
            items.push(args[0].clone());
            Ok(MethodOutcome::mutated(Value::Unit, Value::Array(items)))
        }
        (Value::Array(mut items), "pop") => {
            arity(method, args, 0)?;
            let last = items.pop().ok_or("cannot pop from an empty array")?;
            Ok(MethodOutcome::mutated(last, Value::Array(items)))
        }
        (Value::Array(mut items), "insert") => {
            arity(method, args, 2)?;
            let len = items.len();
            let idx = match &args[0] {
                Value::Int(i) => usize::try_from(*i).ok().filter(|idx| *idx <= len),
                _ => return Err("insert index must be Int".to_string()),
            }
            .ok_or_else(|| format!("insert index {} out of bounds for array of length {len}", args[0]))?;
            items.insert(idx, args[1].clone());
            Ok(MethodOutcome::mutated(Value::Unit, Value::Array(items)))
        }
        (Value::Array(mut items), "remove") => {
            arity(method, args, 1)?;
            let len = items.len();
            let idx = match &args[0] {
                Value::Int(i) => usize::try_from(*i).ok().filter(|idx| *idx < len),
                _ => return Err("remove index must be Int".to_string()),
            }
            .ok_or_else(|| format!("index {} out of bounds for array of length {len}", args[0]))?;
            let removed = items.remove(idx);
            Ok(MethodOutcome::mutated(removed, Value::Array(items)))
        }
        (Value::Array(items), "contains") => {
            arity(method, args, 1)?;
            Ok(MethodOutcome::pure(Value::Bool(position_of(&items, &args[0]).is_some())))
        }
        (Value::Set { mut items, ordered }, "add") => {
            arity(method, args, 1)?;
            let inserted = position_of(&items, &args[0]).is_none();
            if inserted {
                items.push(args[0].clone());
            }
            Ok(MethodOutcome::mutated(Value::Bool(inserted), Value::Set { items, ordered }))
        }
        (Value::Set { mut items, ordered }, "remove") => {
            arity(method, args, 1)?;
            let removed = match position_of(&items, &args[0]) {
                Some(idx) => {
                    items.remove(idx);
                    true
                }
                None => false,
            };
            Ok(MethodOutcome::mutated(Value::Bool(removed), Value::Set { items, ordered }))
        }
        (Value::Set { items, .. }, "contains") => {
            arity(method, args, 1)?;
            Ok(MethodOutcome::pure(Value::Bool(position_of(&items, &args[0]).is_some())))
        }
        (Value::Dict(mut entries), "put") => {
            arity(method, args, 2)?;
            let (key, value) = (args[0].clone(), args[1].clone());
            match entries.iter_mut().find(|(k, _)| k.loose_eq(&key)) {
                Some(entry) => entry.1 = value,
                None => entries.push((key, value)),
            }
            Ok(MethodOutcome::mutated(Value::Unit, Value::Dict(entries)))
        }
        (Value::Dict(entries), "get") => {
            arity(method, args, 1)?;
            index_value(Value::Dict(entries), &args[0]).map(MethodOutcome::pure)
        }
        (Value::Dict(mut entries), "remove") => {
            arity(method, args, 1)?;
            let idx = entries
                .iter()
                .position(|(k, _)| k.loose_eq(&args[0]))
                .ok_or_else(|| format!("key {} not found in dictionary", args[0]))?;
            let (_, removed) = entries.remove(idx);
            Ok(MethodOutcome::mutated(removed, Value::Dict(entries)))
        }
        (Value::Dict(entries), "contains") => {
            arity(method, args, 1)?;
            Ok(MethodOutcome::pure(Value::Bool(entries.iter().any(|(k, _)| k.loose_eq(&args[0])))))
        }
        (Value::Dict(entries), "keys") => {
            arity(method, args, 0)?;
            Ok(MethodOutcome::pure(Value::Array(entries.into_iter().map(|(k, _)| k).collect())))
        }
        (Value::Dict(entries), "values") => {
            arity(method, args, 0)?;
            Ok(MethodOutcome::pure(Value::Array(entries.into_iter().map(|(_, v)| v).collect())))
        }
        (Value::Str(s), "upper") => {
            arity(method, args, 0)?;
            Ok(MethodOutcome::pure(Value::Str(s.to_uppercase())))
        }
        (Value::Str(s), "lower") => {
            arity(method, args, 0)?;
            Ok(MethodOutcome::pure(Value::Str(s.to_lowercase())))
        }
        (Value::Str(s), "contains") => {
            arity(method, args, 1)?;
            let found = match &args[0] {
                Value::Str(needle) => s.contains(needle.as_str()),
                Value::Char(c) => s.contains(*c),
                other => return Err(format!("String.contains expects String or Char, found {}", other.type_name())),
            };
            Ok(MethodOutcome::pure(Value::Bool(found)))
        }
        (receiver, "count") => {
            arity(method, args, 0)?;
            let n = match &receiver {
                Value::Array(items) | Value::Set { items, .. } => items.len(),
                Value::Dict(entries) => entries.len(),
                Value::Str(s) => s.chars().count(),
                _ => return Err(format!("type {type_name} has no method 'count'")),
            };
            Ok(MethodOutcome::pure(Value::Int(n as i64)))
        }
        (receiver, "isEmpty") => {
            arity(method, args, 0)?;
            match &receiver {
                Value::Str(s) => Ok(MethodOutcome::pure(Value::Bool(s.is_empty()))),
                Value::Array(_) | Value::Set { .. } | Value::Dict(_) => {
                    Ok(MethodOutcome::pure(Value::Bool(receiver.is_empty_collection())))
                }
                _ => Err(format!("type {type_name} has no method 'isEmpty'")),
            }
        }
        _ => Err(format!("type {type_name} has no method '{method}'")),
    }
}
