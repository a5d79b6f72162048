use crate::span::Span;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum NoirError {
    #[error("Lex error at line {}, column {}: {msg}", .span.line, .span.column)]
    Lex { msg: String, span: Span },

    #[error("Parse error at line {}, column {}: {msg}", .span.line, .span.column)]
    Parse { msg: String, span: Span },

    #[error("Runtime error: {msg}")]
    Runtime { msg: String, span: Option<Span> },

    #[error("Config error: {msg}")]
    Config { msg: String },
}

impl NoirError {
    pub fn lex(msg: impl Into<String>, span: Span) -> Self {
        Self::Lex { msg: msg.into(), span }
    }

    pub fn parse(msg: impl Into<String>, span: Span) -> Self {
        Self::Parse { msg: msg.into(), span }
    }

    pub fn runtime(msg: impl Into<String>, span: Option<Span>) -> Self {
        Self::Runtime { msg: msg.into(), span }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config { msg: msg.into() }
    }

    pub fn span(&self) -> Option<Span> {
        match self {
            NoirError::Lex { span, .. } | NoirError::Parse { span, .. } => Some(*span),
            NoirError::Runtime { span, .. } => *span,
            NoirError::Config { .. } => None,
        }
    }

    /// The bare message without the position prefix.
    pub fn message(&self) -> &str {
        match self {
            NoirError::Lex { msg, .. }
            | NoirError::Parse { msg, .. }
            | NoirError::Runtime { msg, .. }
            | NoirError::Config { msg } => msg,
        }
    }
}

/// Render a NoirError with ariadne for nice terminal output.
pub fn render_error(source: &str, filename: &str, err: &NoirError, color: bool) {
    use ariadne::{Config, Label, Report, ReportKind, Source};

    let Some(span) = err.span() else {
        eprintln!("error [{filename}]: {err}");
        return;
    };
    let kind_str = match err {
        NoirError::Lex { .. } => "lex",
        NoirError::Parse { .. } => "parse",
        _ => "runtime",
    };
    let start = span.start.min(source.len());
    let end = span.end.clamp(start, source.len());
    let printed = Report::build(ReportKind::Error, filename, start)
        .with_config(Config::default().with_color(color))
        .with_message(format!("{kind_str} error at line {}, column {}", span.line, span.column))
        .with_label(Label::new((filename, start..end)).with_message(err.message()))
        .finish()
        .eprint((filename, Source::from(source)));
    if printed.is_err() {
        eprintln!("error [{filename}]: {err}");
    }
}
