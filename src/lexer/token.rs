use logos::Logos;

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r]+")]
pub enum Token {
    // Keywords
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("for")]
    For,
    #[token("while")]
    While,
    #[token("return")]
    Return,
    #[token("as")]
    As,
    #[token("in")]
    In,
    #[token("to")]
    To,
    #[token("thru")]
    #[token("through")]
    Thru,
    #[token("by")]
    By,
    #[token("empty")]
    Empty,
    #[token("and")]
    And,
    #[token("or")]
    Or,
    #[token("func")]
    Func,
    #[token("enum")]
    Enum,
    #[token("protocol")]
    Protocol,
    #[token("conforms")]
    Conforms,

    // Type keywords
    #[token("Int")]
    IntType,
    #[token("Float")]
    FloatType,
    #[token("Double")]
    DoubleType,
    #[token("String")]
    StringType,
    #[token("Char")]
    CharType,
    #[token("Bool")]
    BoolType,
    #[token("Set")]
    SetType,
    #[token("OSet")]
    OSetType,

    // Literals
    #[regex(r"[0-9]+", |lex| lex.slice().parse::<i64>().ok())]
    IntLit(i64),

    // A trailing dot with no fraction (`1.`) is still a Float.
    #[regex(r"[0-9]+\.[0-9]{0,7}", |lex| lex.slice().parse::<f64>().ok())]
    FloatLit(f64),

    // More than seven fractional digits.
    #[regex(r"[0-9]+\.[0-9]{8,}", |lex| lex.slice().parse::<f64>().ok())]
    DoubleLit(f64),

    #[regex(r#""([^"\\]|\\.)*""#, |lex| {
        let s = lex.slice();
        unescape(&s[1..s.len() - 1])
    })]
    StringLit(String),

    #[regex(r"'([^'\\\n]|\\.)'", |lex| {
        let s = lex.slice();
        let decoded = unescape(&s[1..s.len() - 1])?;
        let mut chars = decoded.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        }
    })]
    CharLit(char),

    // Identifiers
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,

    // Operators
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("=")]
    Eq,
    #[token("==")]
    EqEq,
    #[token("!=")]
    BangEq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("!")]
    Bang,
    #[token("->")]
    Arrow,

    // Punctuation
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token(":")]
    Colon,
    #[token("::")]
    DoubleColon,

    // Newline (significant for statement termination)
    #[regex(r"\n[\n]*")]
    Newline,

    // Comments (skip)
    #[regex(r"//[^\n]*")]
    Comment,

    /// End-of-input marker appended by `lex`; never produced by the logos lexer.
    Eof,
}

/// Decodes `\n \t \r \" \\`; any other escape yields `None`.
pub fn unescape(raw: &str) -> Option<String> {
    let mut result = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next()? {
                'n' => result.push('\n'),
                't' => result.push('\t'),
                'r' => result.push('\r'),
                '"' => result.push('"'),
                '\\' => result.push('\\'),
                _ => return None,
            }
        } else {
            result.push(c);
        }
    }
    Some(result)
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::If => write!(f, "if"),
            Token::Else => write!(f, "else"),
            Token::True => write!(f, "true"),
            Token::False => write!(f, "false"),
            Token::For => write!(f, "for"),
            Token::While => write!(f, "while"),
            Token::Return => write!(f, "return"),
            Token::As => write!(f, "as"),
            Token::In => write!(f, "in"),
            Token::To => write!(f, "to"),
            Token::Thru => write!(f, "thru"),
            Token::By => write!(f, "by"),
            Token::Empty => write!(f, "empty"),
            Token::And => write!(f, "and"),
            Token::Or => write!(f, "or"),
            Token::Func => write!(f, "func"),
            Token::Enum => write!(f, "enum"),
            Token::Protocol => write!(f, "protocol"),
            Token::Conforms => write!(f, "conforms"),
            Token::IntType => write!(f, "Int"),
            Token::FloatType => write!(f, "Float"),
            Token::DoubleType => write!(f, "Double"),
            Token::StringType => write!(f, "String"),
            Token::CharType => write!(f, "Char"),
            Token::BoolType => write!(f, "Bool"),
            Token::SetType => write!(f, "Set"),
            Token::OSetType => write!(f, "OSet"),
            Token::IntLit(n) => write!(f, "{n}"),
            Token::FloatLit(n) | Token::DoubleLit(n) => write!(f, "{n:?}"),
            Token::StringLit(s) => write!(f, "\"{s}\""),
            Token::CharLit(c) => write!(f, "'{c}'"),
            Token::Ident => write!(f, "identifier"),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Star => write!(f, "*"),
            Token::Slash => write!(f, "/"),
            Token::Percent => write!(f, "%"),
            Token::Eq => write!(f, "="),
            Token::EqEq => write!(f, "=="),
            Token::BangEq => write!(f, "!="),
            Token::Lt => write!(f, "<"),
            Token::Gt => write!(f, ">"),
            Token::LtEq => write!(f, "<="),
            Token::GtEq => write!(f, ">="),
            Token::Bang => write!(f, "!"),
            Token::Arrow => write!(f, "->"),
            Token::LParen => write!(f, "'('"),
            Token::RParen => write!(f, "')'"),
            Token::LBracket => write!(f, "'['"),
            Token::RBracket => write!(f, "']'"),
            Token::Comma => write!(f, "','"),
            Token::Dot => write!(f, "'.'"),
            Token::Colon => write!(f, "':'"),
            Token::DoubleColon => write!(f, "'::'"),
            Token::Newline => write!(f, "newline"),
            Token::Comment => write!(f, "comment"),
            Token::Eof => write!(f, "end of input"),
        }
    }
}

/// Upper-case token kind name used by `noir tokens`.
pub fn kind_name(tok: &Token) -> &'static str {
    match tok {
        Token::If => "IF",
        Token::Else => "ELSE",
        Token::True => "TRUE",
        Token::False => "FALSE",
        Token::For => "FOR",
        Token::While => "WHILE",
        Token::Return => "RETURN",
        Token::As => "AS",
        Token::In => "IN",
        Token::To => "TO",
        Token::Thru => "THRU",
        Token::By => "BY",
        Token::Empty => "EMPTY",
        Token::And => "AND",
        Token::Or => "OR",
        Token::Func => "FUNC",
        Token::Enum => "ENUM",
        Token::Protocol => "PROTOCOL",
        Token::Conforms => "CONFORMS",
        Token::IntType
        | Token::FloatType
        | Token::DoubleType
        | Token::StringType
        | Token::CharType
        | Token::BoolType
        | Token::SetType
        | Token::OSetType => "TYPE",
        Token::IntLit(_) => "INTEGER_LIT",
        Token::FloatLit(_) => "FLOAT_LIT",
        Token::DoubleLit(_) => "DOUBLE_LIT",
        Token::StringLit(_) => "STRING_LIT",
        Token::CharLit(_) => "CHAR_LIT",
        Token::Ident => "IDENTIFIER",
        Token::Plus => "PLUS",
        Token::Minus => "MINUS",
        Token::Star => "MULTIPLY",
        Token::Slash => "DIVIDE",
        Token::Percent => "MODULO",
        Token::Eq => "ASSIGN",
        Token::EqEq => "EQUALS",
        Token::BangEq => "NOT_EQUALS",
        Token::Lt => "LESS",
        Token::Gt => "GREATER",
        Token::LtEq => "LESS_EQUAL",
        Token::GtEq => "GREATER_EQUAL",
        Token::Bang => "NOT",
        Token::Arrow => "ARROW",
        Token::LParen => "LPAREN",
        Token::RParen => "RPAREN",
        Token::LBracket => "LBRACKET",
        Token::RBracket => "RBRACKET",
        Token::Comma => "COMMA",
        Token::Dot => "DOT",
        Token::Colon => "COLON",
        Token::DoubleColon => "DOUBLE_COLON",
        Token::Newline => "NEWLINE",
        Token::Comment => "COMMENT",
        Token::Eof => "EOF",
    }
}
