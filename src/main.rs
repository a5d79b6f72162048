use clap::{ArgAction, Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};

use noir::config::Config;
use noir::diagnostics::{render_error, NoirError};
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(name = "noir", version, about = "The Noir interpreter")]
struct Cli {
    /// Config file (defaults to noir.toml beside the source file)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v warn, -vv info, -vvv debug, -vvvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a .noir source file
    Run {
        /// Source file path
        file: PathBuf,
    },
    /// Print the parsed syntax tree
    Ast {
        /// Source file path
        file: PathBuf,
        /// Emit JSON instead of the indented tree
        #[arg(long)]
        json: bool,
    },
    /// Print the token stream, one token per line
    Tokens {
        /// Source file path
        file: PathBuf,
    },
    /// Lex and parse without running, reporting every error
    Check {
        /// Source file path
        file: PathBuf,
    },
}

impl Commands {
    fn file(&self) -> &Path {
        match self {
            Commands::Run { file } | Commands::Ast { file, .. } | Commands::Tokens { file } | Commands::Check { file } => {
                file
            }
        }
    }
}

fn init_logging(verbose: u8) {
    // Diagnostics are rendered separately, so warnings stay quiet by default.
    let level = match verbose {
        0 => LevelFilter::ERROR,
        1 => LevelFilter::WARN,
        2 => LevelFilter::INFO,
        3 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_max_level(level)
        .init();
}

fn report(source: &str, file: &Path, errors: &[NoirError], color: bool) -> ! {
    let filename = file.to_string_lossy();
    for err in errors {
        render_error(source, &filename, err, color);
    }
    std::process::exit(1);
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let file = cli.command.file().to_path_buf();
    let config = Config::resolve(cli.config.as_deref(), &file).unwrap_or_else(|err| {
        eprintln!("error: {err}");
        std::process::exit(1);
    });
    let color = config.diagnostics.color;

    let source = std::fs::read_to_string(&file).unwrap_or_else(|e| {
        eprintln!("error [{}]: could not read file: {e}", file.display());
        std::process::exit(1);
    });

    match cli.command {
        Commands::Run { .. } => {
            if let Err(errors) = noir::run_source(&source, &config, std::io::stdout()) {
                report(&source, &file, &errors, color);
            }
        }
        Commands::Ast { json, .. } => {
            let program = noir::parse_source(&source).unwrap_or_else(|errors| report(&source, &file, &errors, color));
            let rendered = if json {
                match serde_json::to_string_pretty(&program) {
                    Ok(text) => text + "\n",
                    Err(e) => {
                        eprintln!("error: failed to serialize AST: {e}");
                        std::process::exit(1);
                    }
                }
            } else {
                noir::pretty::print_program(&program)
            };
            print!("{rendered}");
        }
        Commands::Tokens { .. } => {
            let tokens = noir::lexer::lex(&source).unwrap_or_else(|err| report(&source, &file, &[err], color));
            let mut out = std::io::stdout().lock();
            for tok in &tokens {
                let lexeme = source.get(tok.span.start..tok.span.end).unwrap_or("");
                let line = format!(
                    "{}:{} {} {:?}",
                    tok.span.line,
                    tok.span.column,
                    noir::lexer::token::kind_name(&tok.node),
                    lexeme
                );
                if writeln!(out, "{line}").is_err() {
                    std::process::exit(1);
                }
            }
        }
        Commands::Check { .. } => {
            if let Err(errors) = noir::parse_source(&source) {
                report(&source, &file, &errors, color);
            }
            eprintln!("{}: ok", file.display());
        }
    }
}
