use curly_interp::{Interpreter, InterpreterConfig};
use std::io::{self, Read};
use std::{env, fs, process};
use thiserror::Error;

const USAGE: &str = "Usage: curly [--emit=tokens|ast|run] [--max-depth=N] [FILE]";

#[derive(Debug, Error)]
enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("Could not read {path}: {source}")]
    Read { path: String, source: io::Error },
    #[error(transparent)]
    Program(#[from] curly::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Emit {
    Tokens,
    Ast,
    Run,
}

#[derive(Debug)]
struct Options {
    emit: Emit,
    config: InterpreterConfig,
    /// `None` or `-` reads standard input.
    path: Option<String>,
}

fn parse_args(args: impl Iterator<Item = String>) -> Result<Options, CliError> {
    let mut options = Options {
        emit: Emit::Run,
        config: InterpreterConfig::default(),
        path: None,
    };
    for arg in args {
        if let Some(emit) = arg.strip_prefix("--emit=") {
            options.emit = match emit {
                "tokens" => Emit::Tokens,
                "ast" => Emit::Ast,
                "run" => Emit::Run,
                _ => return Err(CliError::Usage(format!("Unknown emit kind '{}'", emit))),
            };
        } else if let Some(depth) = arg.strip_prefix("--max-depth=") {
            let depth = depth
                .parse()
                .map_err(|_| CliError::Usage(format!("Invalid max depth '{}'", depth)))?;
            options.config = options.config.with_max_call_depth(depth);
        } else if arg.starts_with("--") {
            return Err(CliError::Usage(format!("Unknown option '{}'", arg)));
        } else if options.path.is_some() {
            return Err(CliError::Usage("Expected at most one input file".to_string()));
        } else {
            options.path = Some(arg);
        }
    }
    Ok(options)
}

fn read_input(path: Option<&str>) -> Result<String, CliError> {
    match path {
        None | Some("-") => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .map_err(|source| CliError::Read {
                    path: "<stdin>".to_string(),
                    source,
                })?;
            Ok(input)
        }
        Some(path) => fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.to_string(),
            source,
        }),
    }
}

/// Installs a stderr subscriber when `RUST_LOG` is set, e.g. `RUST_LOG=curly_interp=trace`.
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(io::stderr).with_target(true))
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn print_nonempty(text: &str) {
    if !text.is_empty() {
        println!("{}", text);
    }
}

fn try_main() -> Result<(), CliError> {
    let options = parse_args(env::args().skip(1))?;
    let input = read_input(options.path.as_deref())?;

    match options.emit {
        Emit::Tokens => print_nonempty(&curly::emit_tokens(&input)),
        Emit::Ast => print_nonempty(&curly::emit_ast(&input)?),
        Emit::Run => {
            let mut interp = Interpreter::new().with_config(options.config);
            let outcome = curly::run_with(&input, &mut interp)?;
            if let Some(summary) = outcome.summary() {
                println!("{}", summary);
            }
        }
    }
    Ok(())
}

fn main() {
    init_tracing();
    if let Err(err) = try_main() {
        eprintln!("Error: {}", err);
        if let CliError::Usage(_) = err {
            eprintln!("{}", USAGE);
        }
        process::exit(1);
    }
}
