use std::{
    fs,
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::Context;
use clap::Parser;
use rustyline::{DefaultEditor, error::ReadlineError};
use stackcalc::{
    Session, StatementOutcome, compile, error::Error, interpreter::bytecode::disassemble,
};

const BANNER: &str = "Mini Math Compiler
Type expressions, assignments, or print statements.
Examples:
  x = 2 + 3*4
  print x + 1
  print( (1+2)^3 - 4/5 )
  -3 + 4 * 2
Type 'env' to see variables, 'exit' to quit.
";

/// stackcalc compiles arithmetic statements to bytecode and runs them on a
/// stack machine.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Run every line of this file in one session instead of a statement.
    #[arg(short, long, conflicts_with = "statement")]
    file: Option<PathBuf>,

    /// Do not print the banner when starting the interactive loop.
    #[arg(short, long)]
    quiet: bool,

    /// Print the bytecode of each statement before running it.
    #[arg(short, long)]
    emit_bytecode: bool,

    /// A statement to run once. Words are joined with single spaces; without
    /// a statement or file the interactive loop starts.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    statement: Vec<String>,
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    let result = if let Some(path) = &args.file {
        run_file(path, &args)
    } else if args.statement.is_empty() {
        repl(&args)
    } else {
        Ok(run_line(&mut Session::new(), &args.statement.join(" "), &args))
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::FAILURE
        },
    }
}

/// Installs a stderr subscriber filtered by `RUST_LOG`. Nothing is installed
/// when the variable is unset, so results on stdout stay clean.
fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry().with(fmt::layer().with_writer(std::io::stderr)
                                                        .with_target(true)
                                                        .with_level(true))
                                      .with(EnvFilter::from_default_env())
                                      .init();
    }
}

/// Runs one statement and renders its outcome. Returns `false` on failure.
fn run_line(session: &mut Session, line: &str, args: &Args) -> bool {
    if args.emit_bytecode {
        match compile(line) {
            Ok(code) => print!("{}", disassemble(&code)),
            Err(e) => {
                report(&e);
                return false;
            },
        }
    }

    match session.run(line) {
        StatementOutcome::Value(value) | StatementOutcome::Printed(value) => {
            println!("{value}");
            true
        },
        StatementOutcome::Assigned { .. } => true,
        StatementOutcome::Failure(e) => {
            report(&e);
            false
        },
    }
}

fn report(error: &Error) {
    if error.is_internal() {
        tracing::error!(%error, "pipeline invariant violated");
    }
    eprintln!("Error: {error}");
}

/// Runs each non-blank line of `path`, stopping at the first failure.
fn run_file(path: &Path, args: &Args) -> anyhow::Result<bool> {
    let script = fs::read_to_string(path).with_context(|| {
                                              format!("Failed to read the input file '{}'. \
                                                       Perhaps this file does not exist?",
                                                      path.display())
                                          })?;

    let mut session = Session::new();
    for line in script.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if !run_line(&mut session, line, args) {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Adds `line` to the editor history. A failure only costs the entry, so it
/// is logged and the session goes on.
fn remember(editor: &mut DefaultEditor, line: &str) {
    if let Err(error) = editor.add_history_entry(line) {
        tracing::debug!(%error, "history entry not recorded");
    }
}

/// The interactive loop. `env` and `exit` are handled here and never reach
/// the pipeline.
fn repl(args: &Args) -> anyhow::Result<bool> {
    let mut editor = DefaultEditor::new().context("failed to initialise the line editor")?;
    let mut session = Session::new();

    if !args.quiet {
        println!("{BANNER}");
    }

    loop {
        let line = match editor.readline(">>> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => {
                println!("\nBye!");
                break;
            },
            Err(e) => return Err(e).context("failed to read input"),
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        remember(&mut editor, line);

        match line.to_lowercase().as_str() {
            "exit" | "quit" => break,
            "env" => {
                for (name, value) in session.variables() {
                    println!("{name} = {value}");
                }
            },
            _ => {
                run_line(&mut session, line, args);
            },
        }
    }

    Ok(true)
}
