pub mod span;
pub mod diagnostics;
pub mod lexer;
pub mod parser;
pub mod typeck;
pub mod value;
pub mod interpreter;
pub mod pretty;
pub mod config;

use std::io::Write;

use config::Config;
use diagnostics::NoirError;
use interpreter::Interpreter;
use parser::ast::Program;

/// Lex and parse a source string (lex → parse). A lex error aborts
/// immediately; parse errors are all collected.
pub fn parse_source(source: &str) -> Result<Program, Vec<NoirError>> {
    let tokens = lexer::lex(source).map_err(|e| vec![e])?;
    let mut parser = parser::Parser::new(&tokens, source);
    parser.parse_program().into_result()
}

/// Native stack reserved per permitted call frame on the evaluation thread.
const STACK_PER_CALL: usize = 256 * 1024;
/// Floor for the evaluation thread's stack, covering deep expression nesting.
const MIN_EVAL_STACK: usize = 64 * 1024 * 1024;

/// Parse and execute a program, writing `print` output to `out`. Nothing runs
/// unless the whole program parsed cleanly.
///
/// Evaluation happens on a dedicated thread whose stack grows with
/// `max_call_depth`, so hitting the limit is a runtime error and never a
/// native stack overflow.
pub fn run_source<W: Write + Send>(source: &str, config: &Config, out: W) -> Result<W, Vec<NoirError>> {
    let settings = config.interpreter.clone();
    let stack = settings.max_call_depth.saturating_mul(STACK_PER_CALL).max(MIN_EVAL_STACK);
    std::thread::scope(|scope| -> Result<W, Vec<NoirError>> {
        let handle = std::thread::Builder::new()
            .name("noir-eval".into())
            .stack_size(stack)
            .spawn_scoped(scope, move || -> Result<W, Vec<NoirError>> {
                let program = parse_source(source)?;
                let mut interp = Interpreter::with_config(settings, out);
                interp.interpret(&program).map_err(|e| vec![e])?;
                Ok(interp.into_output())
            })
            .map_err(|e| vec![NoirError::runtime(format!("could not start evaluator: {e}"), None)])?;
        handle
            .join()
            .unwrap_or_else(|_| Err(vec![NoirError::runtime("evaluator thread panicked", None)]))
    })
}
