pub mod ast;

use std::fmt;

use tracing::{debug, warn};

use crate::diagnostics::NoirError;
use crate::lexer::token::Token;
use crate::span::{Span, Spanned};
use crate::typeck::{TypeAnnotation, TypeArg};
use ast::*;

static EOF: Spanned<Token> = Spanned {
    node: Token::Eof,
    span: Span { start: 0, end: 0, line: 1, column: 1 },
};

/// The construct that opened a `:` ... `::` block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    If,
    ElseIf,
    Else,
    For,
    While,
    Function,
    Enum,
    Protocol,
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BlockKind::If => "if",
            BlockKind::ElseIf => "else if",
            BlockKind::Else => "else",
            BlockKind::For => "for",
            BlockKind::While => "while",
            BlockKind::Function => "function",
            BlockKind::Enum => "enum",
            BlockKind::Protocol => "protocol",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy)]
struct OpenBlock {
    kind: BlockKind,
    span: Span,
}

/// Statements that parsed, plus every error reported along the way. An
/// unterminated block is always the last error.
#[derive(Debug)]
pub struct ParseOutput {
    pub program: Program,
    pub errors: Vec<NoirError>,
}

impl ParseOutput {
    pub fn into_result(self) -> Result<Program, Vec<NoirError>> {
        if self.errors.is_empty() { Ok(self.program) } else { Err(self.errors) }
    }
}

pub struct Parser<'a> {
    tokens: &'a [Spanned<Token>],
    source: &'a str,
    pos: usize,
    block_stack: Vec<OpenBlock>,
    errors: Vec<NoirError>,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Spanned<Token>], source: &'a str) -> Self {
        Self { tokens, source, pos: 0, block_stack: Vec::new(), errors: Vec::new() }
    }

    fn token_at(&self, i: usize) -> &'a Spanned<Token> {
        let tokens = self.tokens;
        tokens.get(i).or_else(|| tokens.last()).unwrap_or(&EOF)
    }

    fn first_significant(&self) -> usize {
        let mut i = self.pos;
        while i < self.tokens.len() && matches!(self.tokens[i].node, Token::Newline) {
            i += 1;
        }
        i
    }

    fn peek(&self) -> &'a Spanned<Token> {
        // Skip newlines when peeking
        self.token_at(self.first_significant())
    }

    /// The token after the one `peek` returns.
    fn peek_second(&self) -> &'a Spanned<Token> {
        self.token_at(self.first_significant() + 1)
    }

    fn peek_raw(&self) -> &'a Spanned<Token> {
        self.token_at(self.pos)
    }

    fn advance(&mut self) -> &'a Spanned<Token> {
        let tok = self.token_at(self.pos);
        if self.pos < self.tokens.len() && !matches!(tok.node, Token::Eof) {
            self.pos += 1;
        }
        tok
    }

    /// Skip newlines, then advance.
    fn bump(&mut self) -> &'a Spanned<Token> {
        self.skip_newlines();
        self.advance()
    }

    fn skip_newlines(&mut self) {
        while self.pos < self.tokens.len() && matches!(self.tokens[self.pos].node, Token::Newline) {
            self.pos += 1;
        }
    }

    fn prev_span(&self) -> Span {
        self.token_at(self.pos.saturating_sub(1)).span
    }

    fn text(&self, span: Span) -> &'a str {
        let source = self.source;
        &source[span.start..span.end]
    }

    fn expect(&mut self, expected: &Token) -> Result<&'a Spanned<Token>, NoirError> {
        self.skip_newlines();
        let tok = self.peek_raw();
        if std::mem::discriminant(&tok.node) == std::mem::discriminant(expected) {
            Ok(self.advance())
        } else {
            Err(NoirError::parse(format!("expected {expected}, found {}", tok.node), tok.span))
        }
    }

    fn expect_ident(&mut self) -> Result<Spanned<String>, NoirError> {
        self.skip_newlines();
        let tok = self.peek_raw();
        match tok.node {
            Token::Ident => {
                self.advance();
                Ok(Spanned::new(self.text(tok.span).to_string(), tok.span))
            }
            _ => Err(NoirError::parse(format!("expected identifier, found {}", tok.node), tok.span)),
        }
    }

    fn consume_statement_end(&mut self) -> Result<(), NoirError> {
        let tok = self.peek_raw();
        match tok.node {
            Token::Newline => {
                self.advance();
                Ok(())
            }
            // The terminator belongs to the enclosing block.
            Token::DoubleColon | Token::Eof => Ok(()),
            // A keyword-led statement may follow on the same line.
            Token::If | Token::For | Token::While | Token::Func | Token::Enum | Token::Protocol | Token::Return => {
                Ok(())
            }
            // So may anything after a statement that closed its own block.
            _ if self.pos > 0 && matches!(self.token_at(self.pos - 1).node, Token::DoubleColon) => Ok(()),
            _ => Err(NoirError::parse(
                format!("expected end of statement, found {}", tok.node),
                tok.span,
            )),
        }
    }

    // ---- block tracking ----

    fn begin_block(&mut self, kind: BlockKind, span: Span) {
        self.block_stack.push(OpenBlock { kind, span });
    }

    fn end_block(&mut self, span: Span) -> Result<(), NoirError> {
        match self.block_stack.pop() {
            Some(_) => Ok(()),
            None => Err(unmatched_terminator(span)),
        }
    }

    /// Consume the `::` closing the innermost block. At end of input the block
    /// stays open and is reported once parsing finishes.
    fn close_block(&mut self) -> Result<(), NoirError> {
        self.skip_newlines();
        let tok = self.peek_raw();
        match tok.node {
            Token::DoubleColon => {
                self.advance();
                self.end_block(tok.span)
            }
            Token::Eof => Ok(()),
            _ => Err(NoirError::parse(format!("expected '::', found {}", tok.node), tok.span)),
        }
    }

    /// Statements up to (not including) the closing `::` or end of input.
    fn parse_block(&mut self) -> Block {
        let mut stmts = Vec::new();
        loop {
            self.skip_newlines();
            if matches!(self.peek_raw().node, Token::DoubleColon | Token::Eof) {
                break;
            }
            if let Some(stmt) = self.parse_statement_recovering() {
                stmts.push(stmt);
            }
        }
        Block { stmts }
    }

    // ---- program & recovery ----

    pub fn parse_program(&mut self) -> ParseOutput {
        let mut stmts = Vec::new();
        loop {
            self.skip_newlines();
            if matches!(self.peek_raw().node, Token::Eof) {
                break;
            }
            if let Some(stmt) = self.parse_statement_recovering() {
                stmts.push(stmt);
            }
        }

        if let Some(open) = self.block_stack.last() {
            self.errors.push(NoirError::parse(
                format!(
                    "missing '::' terminator for {} block starting at line {}, column {}",
                    open.kind, open.span.line, open.span.column
                ),
                open.span,
            ));
        }
        debug!(statements = stmts.len(), errors = self.errors.len(), "parsed program");
        ParseOutput { program: Program { stmts }, errors: std::mem::take(&mut self.errors) }
    }

    fn parse_statement_recovering(&mut self) -> Option<Spanned<Stmt>> {
        let depth = self.block_stack.len();
        match self.parse_statement() {
            Ok(stmt) => Some(stmt),
            Err(err) => {
                warn!(%err, "parse error, skipping statement");
                self.errors.push(err);
                self.block_stack.truncate(depth);
                self.synchronize();
                None
            }
        }
    }

    /// Skip to the next plausible statement start. Inside a block, stop before
    /// a `::` so the enclosing construct can consume it.
    fn synchronize(&mut self) {
        let inside_block = !self.block_stack.is_empty();
        if !(inside_block && matches!(self.peek().node, Token::DoubleColon)) {
            self.advance();
        }
        loop {
            match self.peek().node {
                Token::Eof => return,
                Token::DoubleColon if inside_block => return,
                Token::DoubleColon => {
                    self.bump();
                    self.skip_newlines();
                    return;
                }
                Token::If
                | Token::For
                | Token::While
                | Token::Return
                | Token::Func
                | Token::Enum
                | Token::Protocol
                | Token::Ident => return,
                _ => {
                    self.bump();
                }
            }
        }
    }

    // ---- statements ----

    fn parse_statement(&mut self) -> Result<Spanned<Stmt>, NoirError> {
        let tok = self.peek();
        let stmt = match tok.node {
            Token::If => self.parse_if()?,
            Token::For => self.parse_for()?,
            Token::While => self.parse_while()?,
            Token::Func => self.parse_function()?,
            Token::Enum => self.parse_enum()?,
            Token::Protocol => self.parse_protocol()?,
            Token::Return => self.parse_return()?,
            // Blocks stop before their own `::`, so one seen here has no opener.
            Token::DoubleColon => return Err(unmatched_terminator(tok.span)),
            Token::Ident if matches!(self.peek_second().node, Token::Colon) => self.parse_var_decl()?,
            Token::Ident if matches!(self.peek_second().node, Token::Eq) => self.parse_assign_stmt()?,
            _ => {
                let expr = self.parse_expression()?;
                let span = expr.span;
                Spanned::new(Stmt::Expr(expr), span)
            }
        };
        self.consume_statement_end()?;
        Ok(stmt)
    }

    fn parse_var_decl(&mut self) -> Result<Spanned<Stmt>, NoirError> {
        let name = self.expect_ident()?;
        self.expect(&Token::Colon)?;
        let ty = self.parse_type()?;
        let eq = self.peek_raw();
        if !matches!(eq.node, Token::Eq) {
            return Err(NoirError::parse("variables must be initialized at declaration", eq.span));
        }
        self.advance();
        let value = self.parse_expression()?;
        let span = name.span.to(value.span);
        Ok(Spanned::new(Stmt::VarDecl { name, ty, value }, span))
    }

    fn parse_assign_stmt(&mut self) -> Result<Spanned<Stmt>, NoirError> {
        let target = self.expect_ident()?;
        self.expect(&Token::Eq)?;
        let value = self.parse_expression()?;
        let span = target.span.to(value.span);
        Ok(Spanned::new(Stmt::Assign { target, value }, span))
    }

    fn parse_return(&mut self) -> Result<Spanned<Stmt>, NoirError> {
        let ret = self.bump();
        let value = match self.peek_raw().node {
            Token::Newline | Token::DoubleColon | Token::Eof => None,
            _ => Some(self.parse_expression()?),
        };
        let span = ret.span.to(self.prev_span());
        Ok(Spanned::new(Stmt::Return(value), span))
    }

    fn parse_if(&mut self) -> Result<Spanned<Stmt>, NoirError> {
        let if_tok = self.bump();
        self.begin_block(BlockKind::If, if_tok.span);
        let condition = self.parse_expression()?;
        self.expect(&Token::Colon)?;
        let then_block = self.parse_block();
        self.close_block()?;

        let mut else_ifs = Vec::new();
        let mut else_block = None;
        while matches!(self.peek().node, Token::Else) {
            let else_tok = self.bump();
            if matches!(self.peek_raw().node, Token::If) {
                self.advance();
                self.begin_block(BlockKind::ElseIf, else_tok.span);
                let condition = self.parse_expression()?;
                self.expect(&Token::Colon)?;
                let block = self.parse_block();
                self.close_block()?;
                else_ifs.push(ElseIf { condition, block });
            } else {
                self.begin_block(BlockKind::Else, else_tok.span);
                self.expect(&Token::Colon)?;
                let block = self.parse_block();
                self.close_block()?;
                else_block = Some(block);
                break;
            }
        }

        let span = if_tok.span.to(self.prev_span());
        Ok(Spanned::new(Stmt::If { condition, then_block, else_ifs, else_block }, span))
    }

    fn parse_for(&mut self) -> Result<Spanned<Stmt>, NoirError> {
        let for_tok = self.bump();
        self.begin_block(BlockKind::For, for_tok.span);
        let var = self.expect_ident()?;
        self.expect(&Token::In)?;
        let start = self.parse_expression()?;
        let range_tok = self.peek_raw();
        let inclusive = match range_tok.node {
            Token::To => false,
            Token::Thru => true,
            _ => {
                return Err(NoirError::parse(
                    format!("expected 'to' or 'thru' in for loop range, found {}", range_tok.node),
                    range_tok.span,
                ));
            }
        };
        self.advance();
        let end = self.parse_expression()?;
        let step = if matches!(self.peek_raw().node, Token::By) {
            self.advance();
            Some(self.parse_expression()?)
        } else {
            None
        };
        self.expect(&Token::Colon)?;
        let body = self.parse_block();
        self.close_block()?;
        let span = for_tok.span.to(self.prev_span());
        Ok(Spanned::new(Stmt::For { var, start, end, step, inclusive, body }, span))
    }

    fn parse_while(&mut self) -> Result<Spanned<Stmt>, NoirError> {
        let while_tok = self.bump();
        self.begin_block(BlockKind::While, while_tok.span);
        let condition = self.parse_expression()?;
        self.expect(&Token::Colon)?;
        let body = self.parse_block();
        self.close_block()?;
        let span = while_tok.span.to(self.prev_span());
        Ok(Spanned::new(Stmt::While { condition, body }, span))
    }

    fn parse_function(&mut self) -> Result<Spanned<Stmt>, NoirError> {
        let func_tok = self.bump();
        self.begin_block(BlockKind::Function, func_tok.span);
        let name = self.expect_ident().map_err(|err| {
            NoirError::parse("expected function name after 'func'", err.span().unwrap_or(func_tok.span))
        })?;
        let params = self.parse_params()?;
        let return_type = self.parse_return_type()?;
        self.expect(&Token::Colon)?;
        let body = self.parse_block();
        self.close_block()?;
        let span = func_tok.span.to(self.prev_span());
        Ok(Spanned::new(Stmt::Function(FunctionDecl { name, params, return_type, body }), span))
    }

    fn parse_params(&mut self) -> Result<Vec<Param>, NoirError> {
        self.expect(&Token::LParen)?;
        let mut params = Vec::new();
        loop {
            self.skip_newlines();
            if matches!(self.peek_raw().node, Token::RParen) {
                break;
            }
            if !params.is_empty() {
                self.expect(&Token::Comma)?;
            }
            let name = self.expect_ident()?;
            self.expect(&Token::Colon)?;
            let ty = self.parse_type()?;
            params.push(Param { name, ty });
        }
        self.expect(&Token::RParen)?;
        Ok(params)
    }

    fn parse_return_type(&mut self) -> Result<Option<Spanned<TypeAnnotation>>, NoirError> {
        if matches!(self.peek_raw().node, Token::Arrow) {
            self.advance();
            Ok(Some(self.parse_type()?))
        } else {
            Ok(None)
        }
    }

    fn parse_enum(&mut self) -> Result<Spanned<Stmt>, NoirError> {
        let enum_tok = self.bump();
        self.begin_block(BlockKind::Enum, enum_tok.span);
        let name = self.expect_ident()?;
        let conforms = if matches!(self.peek_raw().node, Token::Conforms) {
            self.advance();
            Some(self.expect_ident()?)
        } else {
            None
        };
        self.expect(&Token::Colon)?;
        let mut variants = Vec::new();
        loop {
            self.skip_newlines();
            let tok = self.peek_raw();
            match tok.node {
                Token::DoubleColon | Token::Eof => break,
                Token::Comma if !variants.is_empty() => {
                    self.advance();
                }
                Token::Ident => variants.push(self.expect_ident()?),
                _ => {
                    return Err(NoirError::parse(
                        format!("expected enum variant name, found {}", tok.node),
                        tok.span,
                    ));
                }
            }
        }
        self.close_block()?;
        let span = enum_tok.span.to(self.prev_span());
        Ok(Spanned::new(Stmt::Enum(EnumDecl { name, conforms, variants }), span))
    }

    fn parse_protocol(&mut self) -> Result<Spanned<Stmt>, NoirError> {
        let proto_tok = self.bump();
        self.begin_block(BlockKind::Protocol, proto_tok.span);
        let name = self.expect_ident()?;
        self.expect(&Token::Colon)?;
        let mut properties = Vec::new();
        let mut methods = Vec::new();
        loop {
            self.skip_newlines();
            let tok = self.peek_raw();
            match tok.node {
                Token::DoubleColon | Token::Eof => break,
                Token::Empty | Token::Comma => {
                    self.advance();
                }
                Token::Ident => {
                    let member = self.expect_ident()?;
                    let next = self.peek_raw();
                    match next.node {
                        Token::Colon => {
                            self.advance();
                            let ty = self.parse_type()?;
                            properties.push(Param { name: member, ty });
                        }
                        Token::LParen => {
                            let params = self.parse_params()?;
                            let return_type = self.parse_return_type()?;
                            methods.push(ProtocolMethod { name: member, params, return_type });
                        }
                        _ => {
                            return Err(NoirError::parse(
                                format!("expected ':' or '(' after member name, found {}", next.node),
                                next.span,
                            ));
                        }
                    }
                }
                _ => {
                    return Err(NoirError::parse(
                        format!("expected protocol member, found {}", tok.node),
                        tok.span,
                    ));
                }
            }
        }
        self.close_block()?;
        let span = proto_tok.span.to(self.prev_span());
        Ok(Spanned::new(Stmt::Protocol(ProtocolDecl { name, properties, methods }), span))
    }

    // ---- types ----

    fn parse_type(&mut self) -> Result<Spanned<TypeAnnotation>, NoirError> {
        let tok = self.bump();
        let ty = match tok.node {
            Token::LBracket => {
                let first = self.parse_type()?.node;
                if matches!(self.peek_raw().node, Token::Colon) {
                    self.advance();
                    let value = self.parse_type()?.node;
                    self.expect(&Token::RBracket)?;
                    TypeAnnotation::dict(first, value)
                } else {
                    self.expect(&Token::RBracket)?;
                    TypeAnnotation::array(first)
                }
            }
            Token::IntType
            | Token::FloatType
            | Token::DoubleType
            | Token::StringType
            | Token::CharType
            | Token::BoolType => TypeAnnotation::primitive(self.text(tok.span)),
            Token::SetType | Token::OSetType => {
                if !matches!(self.peek_raw().node, Token::Lt) {
                    return Err(NoirError::parse(
                        "Set types must specify their element type",
                        self.peek_raw().span,
                    ));
                }
                let args = self.parse_type_args()?;
                TypeAnnotation::new(self.text(tok.span), args)
            }
            Token::Ident => {
                let name = self.text(tok.span);
                if matches!(self.peek_raw().node, Token::Lt) {
                    let args = self.parse_type_args()?;
                    TypeAnnotation::new(name, args)
                } else {
                    TypeAnnotation::primitive(name)
                }
            }
            _ => {
                return Err(NoirError::parse(format!("expected type name, found {}", tok.node), tok.span));
            }
        };
        Ok(Spanned::new(ty, tok.span.to(self.prev_span())))
    }

    /// `<A, B, ...>`; bare single-letter arguments become unresolved parameters.
    fn parse_type_args(&mut self) -> Result<Vec<TypeArg>, NoirError> {
        self.expect(&Token::Lt)?;
        let mut args = Vec::new();
        loop {
            args.push(TypeArg::from_annotation(self.parse_type()?.node));
            if matches!(self.peek_raw().node, Token::Comma) {
                self.advance();
            } else {
                break;
            }
        }
        self.expect(&Token::Gt)?;
        Ok(args)
    }

    // ---- expressions ----

    /// Assignment level: right-associative, target must be a bare identifier.
    pub fn parse_expression(&mut self) -> Result<Spanned<Expr>, NoirError> {
        let lhs = self.parse_expr(0)?;
        let eq = self.peek_raw();
        if !matches!(eq.node, Token::Eq) {
            return Ok(lhs);
        }
        self.advance();
        self.skip_newlines();
        let value = self.parse_expression()?;
        match lhs.node {
            Expr::Ident(name) => {
                let span = lhs.span.to(value.span);
                Ok(Spanned::new(
                    Expr::Assign { target: Spanned::new(name, lhs.span), value: Box::new(value) },
                    span,
                ))
            }
            _ => Err(NoirError::parse("invalid assignment target", eq.span)),
        }
    }

    // Pratt parser for binary operators; operators must stay on the line of their left operand.
    fn parse_expr(&mut self, min_bp: u8) -> Result<Spanned<Expr>, NoirError> {
        let mut lhs = self.parse_unary()?;

        loop {
            let op = match self.peek_raw().node {
                Token::Plus => BinOp::Add,
                Token::Minus => BinOp::Sub,
                Token::Star => BinOp::Mul,
                Token::Slash => BinOp::Div,
                Token::Percent => BinOp::Mod,
                Token::EqEq => BinOp::Eq,
                Token::BangEq => BinOp::Neq,
                Token::Lt => BinOp::Lt,
                Token::Gt => BinOp::Gt,
                Token::LtEq => BinOp::LtEq,
                Token::GtEq => BinOp::GtEq,
                Token::And => BinOp::And,
                Token::Or => BinOp::Or,
                _ => break,
            };

            let (lbp, rbp) = infix_binding_power(op);
            if lbp < min_bp {
                break;
            }

            self.advance(); // consume operator
            self.skip_newlines();

            let rhs = self.parse_expr(rbp)?;
            let span = lhs.span.to(rhs.span);
            lhs = Spanned::new(Expr::Binary { op, lhs: Box::new(lhs), rhs: Box::new(rhs) }, span);
        }

        Ok(lhs)
    }

    fn parse_unary(&mut self) -> Result<Spanned<Expr>, NoirError> {
        let tok = self.peek_raw();
        let op = match tok.node {
            Token::Minus => UnaryOp::Neg,
            Token::Bang => UnaryOp::Not,
            _ => return self.parse_cast(),
        };
        self.advance();
        let operand = self.parse_unary()?;
        let span = tok.span.to(operand.span);
        Ok(Spanned::new(Expr::Unary { op, operand: Box::new(operand) }, span))
    }

    fn parse_cast(&mut self) -> Result<Spanned<Expr>, NoirError> {
        let mut expr = self.parse_postfix()?;
        while matches!(self.peek_raw().node, Token::As) {
            self.advance();
            let target = self.parse_type()?;
            let span = expr.span.to(target.span);
            expr = Spanned::new(Expr::Cast { expr: Box::new(expr), target }, span);
        }
        Ok(expr)
    }

    fn parse_postfix(&mut self) -> Result<Spanned<Expr>, NoirError> {
        let mut expr = self.parse_primary()?;
        loop {
            match self.peek_raw().node {
                Token::LBracket => {
                    self.advance();
                    self.skip_newlines();
                    let index = self.parse_expression()?;
                    let close = self.expect(&Token::RBracket)?;
                    let span = expr.span.to(close.span);
                    expr = Spanned::new(
                        Expr::Index { object: Box::new(expr), index: Box::new(index) },
                        span,
                    );
                }
                Token::Dot => {
                    self.advance();
                    let method = self.expect_ident()?;
                    let open = self.peek_raw();
                    if !matches!(open.node, Token::LParen) {
                        return Err(NoirError::parse(
                            format!("expected '(' after method name '{}'", method.node),
                            open.span,
                        ));
                    }
                    let (args, close) = self.parse_args()?;
                    let span = expr.span.to(close);
                    expr = Spanned::new(
                        Expr::MethodCall { receiver: Box::new(expr), method, args },
                        span,
                    );
                }
                _ => break,
            }
        }
        Ok(expr)
    }

    fn parse_args(&mut self) -> Result<(Vec<Spanned<Expr>>, Span), NoirError> {
        self.expect(&Token::LParen)?;
        let mut args = Vec::new();
        loop {
            self.skip_newlines();
            if matches!(self.peek_raw().node, Token::RParen) {
                break;
            }
            if !args.is_empty() {
                self.expect(&Token::Comma)?;
                self.skip_newlines();
            }
            args.push(self.parse_expression()?);
        }
        let close = self.expect(&Token::RParen)?;
        Ok((args, close.span))
    }

    fn parse_primary(&mut self) -> Result<Spanned<Expr>, NoirError> {
        let tok = self.peek_raw();
        let literal = match &tok.node {
            Token::IntLit(n) => Some(Literal::Int(*n)),
            Token::FloatLit(f) => Some(Literal::Float(*f)),
            Token::DoubleLit(f) => Some(Literal::Double(*f)),
            Token::StringLit(s) => Some(Literal::Str(s.clone())),
            Token::CharLit(c) => Some(Literal::Char(*c)),
            Token::True => Some(Literal::Bool(true)),
            Token::False => Some(Literal::Bool(false)),
            Token::Empty => Some(Literal::Empty),
            _ => None,
        };
        if let Some(lit) = literal {
            self.advance();
            return Ok(Spanned::new(Expr::Literal(lit), tok.span));
        }

        match tok.node {
            Token::Ident => {
                let name = self.expect_ident()?;
                if matches!(self.peek_raw().node, Token::LParen) {
                    let (args, close) = self.parse_args()?;
                    let span = name.span.to(close);
                    Ok(Spanned::new(Expr::Call { callee: name, args }, span))
                } else {
                    Ok(Spanned::new(Expr::Ident(name.node), name.span))
                }
            }
            Token::LParen => {
                self.advance();
                self.skip_newlines();
                let inner = self.parse_expression()?;
                let close = self.expect(&Token::RParen)?;
                Ok(Spanned::new(inner.node, tok.span.to(close.span)))
            }
            Token::LBracket => {
                self.advance();
                let mut elements = Vec::new();
                loop {
                    self.skip_newlines();
                    if matches!(self.peek_raw().node, Token::RBracket) {
                        break;
                    }
                    if !elements.is_empty() {
                        self.expect(&Token::Comma)?;
                        self.skip_newlines();
                    }
                    elements.push(self.parse_expression()?);
                }
                let close = self.expect(&Token::RBracket)?;
                Ok(Spanned::new(Expr::ArrayLit(elements), tok.span.to(close.span)))
            }
            _ => Err(NoirError::parse(format!("expected expression, found {}", tok.node), tok.span)),
        }
    }
}

fn unmatched_terminator(span: Span) -> NoirError {
    NoirError::parse("unexpected '::' terminator with no matching block", span)
}

fn infix_binding_power(op: BinOp) -> (u8, u8) {
    match op {
        BinOp::Or => (1, 2),
        BinOp::And => (3, 4),
        BinOp::Eq | BinOp::Neq => (5, 6),
        BinOp::Lt | BinOp::Gt | BinOp::LtEq | BinOp::GtEq => (7, 8),
        BinOp::Add | BinOp::Sub => (9, 10),
        BinOp::Mul | BinOp::Div | BinOp::Mod => (11, 12),
    }
}
