//! CLI module for the lumex translator.

use crate::analyzer::Analysis;
use crate::emit;
use crate::error::Result;
use crate::lumex_grammar;
use crate::parser::Parser as LumexParser;
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use std::process;

/// `lumex <input-file>`: lex, parse, and translate to a meep-driving script.
#[derive(Parser)]
#[command(name = "lumex")]
#[command(about = "Translates a lumerical-style scene script to a meep-driving Python script")]
struct Args {
    /// Path to the input source file.
    input: PathBuf,

    /// Raise log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Main CLI runner for the translator.
pub fn run() {
    let args = Args::parse();
    init_logger(args.verbose);

    if let Err(e) = translate(&args.input) {
        report(&args.input, &e);
        process::exit(1);
    }
}

fn translate(path: &PathBuf) -> Result<()> {
    let source = fs::read_to_string(path)?;
    let analysis = Analysis::build(lumex_grammar::build())?;
    let module = LumexParser::new(&analysis).parse(&source)?;
    print!("{}", emit::emit_module(&module));
    Ok(())
}

fn report(path: &PathBuf, err: &crate::error::LumexError) {
    match err.line() {
        Some(line) => eprintln!("{}:{}: {}", path.display(), line, err),
        None => eprintln!("{}: {}", path.display(), err),
    }
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}
