use crate::parser::ast::*;
use crate::span::Spanned;
use crate::typeck::{TypeAnnotation, TypeArg};

/// Render a `Program` as an indented tree of upper-case node labels, one node per line.
pub fn print_program(program: &Program) -> String {
    let mut pp = PrettyPrinter::new();
    for stmt in &program.stmts {
        pp.emit_stmt(&stmt.node);
    }
    pp.buf
}

struct PrettyPrinter {
    buf: String,
    indent: usize,
}

impl PrettyPrinter {
    fn new() -> Self {
        Self { buf: String::new(), indent: 0 }
    }

    fn line(&mut self, text: &str) {
        for _ in 0..self.indent {
            self.buf.push_str("  ");
        }
        self.buf.push_str(text);
        self.buf.push('\n');
    }

    fn indent(&mut self) {
        self.indent += 1;
    }

    fn dedent(&mut self) {
        self.indent -= 1;
    }

    /// A `LABEL:` line with `body` one level deeper.
    fn section(&mut self, label: &str, body: impl FnOnce(&mut Self)) {
        self.line(label);
        self.indent();
        body(self);
        self.dedent();
    }

    fn emit_block(&mut self, block: &Block) {
        for stmt in &block.stmts {
            self.emit_stmt(&stmt.node);
        }
    }

    fn emit_ident(&mut self, name: &str) {
        self.line(&format!("IDENTIFIER({name})"));
    }

    fn emit_type(&mut self, ty: &TypeAnnotation) {
        self.line(&type_label(ty));
    }

    fn emit_params(&mut self, params: &[Param]) {
        self.section("PARAMETERS:", |pp| {
            for param in params {
                pp.line("PARAMETER");
                pp.indent();
                pp.emit_ident(&param.name.node);
                pp.emit_type(&param.ty.node);
                pp.dedent();
            }
        });
    }

    fn emit_return_type(&mut self, ty: &Option<Spanned<TypeAnnotation>>) {
        if let Some(ty) = ty {
            self.section("RETURN_TYPE:", |pp| pp.emit_type(&ty.node));
        }
    }

    // ── Statements ───────────────────────────────────────────────────

    fn emit_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::VarDecl { name, ty, value } => {
                self.line("VARIABLE_DECLARATION");
                self.indent();
                self.emit_ident(&name.node);
                self.emit_type(&ty.node);
                self.emit_expr(&value.node);
                self.dedent();
            }
            Stmt::Assign { target, value } => {
                self.line("ASSIGNMENT");
                self.indent();
                self.emit_ident(&target.node);
                self.emit_expr(&value.node);
                self.dedent();
            }
            Stmt::If { condition, then_block, else_ifs, else_block } => {
                self.line("IF_STATEMENT");
                self.indent();
                self.section("CONDITION:", |pp| pp.emit_expr(&condition.node));
                self.section("THEN:", |pp| pp.emit_block(then_block));
                for clause in else_ifs {
                    self.section("ELIF_CONDITION:", |pp| pp.emit_expr(&clause.condition.node));
                    self.section("ELIF_BODY:", |pp| pp.emit_block(&clause.block));
                }
                if let Some(block) = else_block {
                    self.section("ELSE:", |pp| pp.emit_block(block));
                }
                self.dedent();
            }
            Stmt::For { var, start, end, step, inclusive, body } => {
                self.line("FOR_LOOP");
                self.indent();
                self.emit_ident(&var.node);
                self.section("FROM:", |pp| pp.emit_expr(&start.node));
                self.section(if *inclusive { "THROUGH:" } else { "TO:" }, |pp| pp.emit_expr(&end.node));
                self.section("STEP:", |pp| match step {
                    Some(step) => pp.emit_expr(&step.node),
                    None => pp.line("DEFAULT"),
                });
                self.section("BODY:", |pp| pp.emit_block(body));
                self.dedent();
            }
            Stmt::While { condition, body } => {
                self.line("WHILE_LOOP");
                self.indent();
                self.section("CONDITION:", |pp| pp.emit_expr(&condition.node));
                self.section("BODY:", |pp| pp.emit_block(body));
                self.dedent();
            }
            Stmt::Function(func) => {
                self.line("FUNCTION_DECLARATION");
                self.indent();
                self.emit_ident(&func.name.node);
                self.emit_params(&func.params);
                self.emit_return_type(&func.return_type);
                self.section("BODY:", |pp| pp.emit_block(&func.body));
                self.dedent();
            }
            Stmt::Return(value) => {
                self.line("RETURN");
                if let Some(value) = value {
                    self.indent();
                    self.emit_expr(&value.node);
                    self.dedent();
                }
            }
            Stmt::Expr(expr) => {
                self.line("EXPRESSION_STATEMENT");
                self.indent();
                self.emit_expr(&expr.node);
                self.dedent();
            }
            Stmt::Enum(decl) => {
                self.line("ENUM_DECLARATION");
                self.indent();
                self.emit_ident(&decl.name.node);
                if let Some(protocol) = &decl.conforms {
                    self.section("CONFORMS:", |pp| pp.emit_ident(&protocol.node));
                }
                self.section("VARIANTS:", |pp| {
                    for variant in &decl.variants {
                        pp.emit_ident(&variant.node);
                    }
                });
                self.dedent();
            }
            Stmt::Protocol(decl) => {
                self.line("PROTOCOL_DECLARATION");
                self.indent();
                self.emit_ident(&decl.name.node);
                self.section("PROPERTIES:", |pp| {
                    for prop in &decl.properties {
                        pp.line("PROPERTY");
                        pp.indent();
                        pp.emit_ident(&prop.name.node);
                        pp.emit_type(&prop.ty.node);
                        pp.dedent();
                    }
                });
                self.section("METHODS:", |pp| {
                    for method in &decl.methods {
                        pp.line("METHOD");
                        pp.indent();
                        pp.emit_ident(&method.name.node);
                        pp.emit_params(&method.params);
                        pp.emit_return_type(&method.return_type);
                        pp.dedent();
                    }
                });
                self.dedent();
            }
        }
    }

    // ── Expressions ──────────────────────────────────────────────────

    fn emit_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Literal(lit) => self.line(&literal_label(lit)),
            Expr::Ident(name) => self.emit_ident(name),
            Expr::Binary { op, lhs, rhs } => {
                self.line(&format!("BINARY_OP({})", binop_name(*op)));
                self.indent();
                self.emit_expr(&lhs.node);
                self.emit_expr(&rhs.node);
                self.dedent();
            }
            Expr::Unary { op, operand } => {
                let name = match op {
                    UnaryOp::Neg => "MINUS",
                    UnaryOp::Not => "NOT",
                };
                self.line(&format!("UNARY_OP({name})"));
                self.indent();
                self.emit_expr(&operand.node);
                self.dedent();
            }
            Expr::Call { callee, args } => {
                self.line("FUNCTION_CALL");
                self.indent();
                self.emit_ident(&callee.node);
                self.emit_args(args);
                self.dedent();
            }
            Expr::MethodCall { receiver, method, args } => {
                self.line("METHOD_CALL");
                self.indent();
                self.section("OBJECT:", |pp| pp.emit_expr(&receiver.node));
                self.section("METHOD:", |pp| pp.emit_ident(&method.node));
                self.emit_args(args);
                self.dedent();
            }
            Expr::Index { object, index } => {
                self.line("ARRAY_ACCESS");
                self.indent();
                self.section("ARRAY:", |pp| pp.emit_expr(&object.node));
                self.section("INDEX:", |pp| pp.emit_expr(&index.node));
                self.dedent();
            }
            Expr::ArrayLit(elements) => {
                self.line("ARRAY_LITERAL");
                self.indent();
                for element in elements {
                    self.emit_expr(&element.node);
                }
                self.dedent();
            }
            Expr::Cast { expr, target } => {
                self.line("TYPE_CAST");
                self.indent();
                self.emit_expr(&expr.node);
                self.section("TO:", |pp| pp.emit_type(&target.node));
                self.dedent();
            }
            Expr::Assign { target, value } => {
                self.line("ASSIGNMENT");
                self.indent();
                self.emit_ident(&target.node);
                self.emit_expr(&value.node);
                self.dedent();
            }
        }
    }

    fn emit_args(&mut self, args: &[Spanned<Expr>]) {
        self.section("ARGUMENTS:", |pp| {
            for arg in args {
                pp.emit_expr(&arg.node);
            }
        });
    }
}

fn type_label(ty: &TypeAnnotation) -> String {
    if ty.parameters.is_empty() {
        return format!("TYPE({})", ty.name);
    }
    let params: Vec<String> = ty
        .parameters
        .iter()
        .map(|arg| match arg {
            TypeArg::Type(inner) => type_label(inner),
            TypeArg::Param(param) => format!("TYPE({})", param.name),
        })
        .collect();
    format!("TYPE({}<{}>)", ty.name, params.join(", "))
}

fn literal_label(lit: &Literal) -> String {
    match lit {
        Literal::Int(n) => format!("INTEGER_LIT({n})"),
        Literal::Float(f) => format!("FLOAT_LIT({f:?})"),
        Literal::Double(f) => format!("DOUBLE_LIT({f:?})"),
        Literal::Str(s) => format!("STRING_LIT({s:?})"),
        Literal::Char(c) => format!("CHAR_LIT({c:?})"),
        Literal::Bool(true) => "TRUE".to_string(),
        Literal::Bool(false) => "FALSE".to_string(),
        Literal::Empty => "EMPTY".to_string(),
    }
}

fn binop_name(op: BinOp) -> &'static str {
    match op {
        BinOp::Add => "PLUS",
        BinOp::Sub => "MINUS",
        BinOp::Mul => "MULTIPLY",
        BinOp::Div => "DIVIDE",
        BinOp::Mod => "MODULO",
        BinOp::Eq => "EQUALS",
        BinOp::Neq => "NOT_EQUALS",
        BinOp::Lt => "LESS",
        BinOp::Gt => "GREATER",
        BinOp::LtEq => "LESS_EQUAL",
        BinOp::GtEq => "GREATER_EQUAL",
        BinOp::And => "AND",
        BinOp::Or => "OR",
    }
}
