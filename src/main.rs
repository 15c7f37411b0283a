use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser as _;
use tracing_subscriber::EnvFilter;

use kinako::repl::{Repl, DEFAULT_PROMPT};
use kinako::{parse, tokenize_string, Evaluator};

/// Interpreter for a small expression language with integer variables.
#[derive(clap::Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Program to evaluate; starts an interactive session when omitted
    script: Option<PathBuf>,
    /// Prompt shown by the interactive session
    #[arg(long, default_value = DEFAULT_PROMPT)]
    prompt: String,
    /// File to load line history from and save it to
    #[arg(long)]
    history: Option<PathBuf>,
    /// Print the token stream before evaluating a script
    #[arg(long)]
    dump_tokens: bool,
    /// Print the parsed program before evaluating a script
    #[arg(long)]
    dump_ast: bool,
    /// Raise log verbosity; repeat for more
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    match &args.script {
        Some(path) => run_script(path, &args),
        None => Repl::new(&args.prompt)
            .start(args.history.as_deref())
            .context("interactive session failed"),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_script(path: &Path, args: &Args) -> anyhow::Result<()> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("{} not found. No such file or directory.", path.display()))?;
    if args.dump_tokens {
        println!("Tokens:");
        for token in tokenize_string(&source) {
            println!("{token}");
        }
    }
    let program = parse(&source)?;
    if args.dump_ast {
        println!("\nParsed result:");
        for statement in program.statements.iter() {
            println!("{:?}", statement);
        }
        println!();
    }
    if let Some(value) = Evaluator::new().evaluate(&program) {
        println!("{value}");
    }
    Ok(())
}
