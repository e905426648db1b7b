// ABOUTME: Thin REPL binary over the Actinide Session — not part of the audited core

use actinide::config::{VERSION, WELCOME_MESSAGE, WELCOME_SUBTITLE};
use actinide::printer::display;
use actinide::Session;
use clap::Parser;
use rustyline::error::ReadlineError;
use rustyline::{Config, DefaultEditor};
use std::path::PathBuf;

/// Actinide — an embeddable Lisp/Scheme-dialect interpreter
#[derive(Parser, Debug)]
#[command(name = "actinide")]
#[command(version = VERSION)]
#[command(about = "A Lisp/Scheme-dialect interpreter with a CPS evaluator and unbounded tail recursion")]
struct CliArgs {
    /// Script file to run. Starts an interactive REPL if omitted.
    #[arg(value_name = "FILE")]
    script: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();
    let mut session = Session::with_builtins();

    match args.script {
        Some(path) => run_script(&path, &mut session),
        None => run_repl(&mut session),
    }
}

fn run_script(path: &PathBuf, session: &mut Session) -> Result<(), Box<dyn std::error::Error>> {
    let source = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read script file {}: {e}", path.display()))?;
    session
        .run(&source)
        .map_err(|e| format!("{}: {e}", path.display()))?;
    Ok(())
}

fn run_repl(session: &mut Session) -> Result<(), Box<dyn std::error::Error>> {
    println!("{WELCOME_MESSAGE} v{VERSION}");
    println!("{WELCOME_SUBTITLE}");
    println!("Ctrl-D or (exit) to quit.");

    let config = Config::builder().auto_add_history(true).build();
    let mut rl = DefaultEditor::with_config(config)?;
    let history_file = ".actinide_history";
    let _ = rl.load_history(history_file);

    loop {
        match rl.readline("actinide> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                if trimmed == "(exit)" || trimmed == "(quit)" {
                    break;
                }
                match session.run(&line) {
                    Ok(results) => {
                        for value in &results {
                            println!("=> {}", display(value));
                        }
                    }
                    Err(e) => eprintln!("error: {e}"),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("error: {e}");
                break;
            }
        }
    }

    let _ = rl.save_history(history_file);
    Ok(())
}
