use std::io::{self, Write};
use std::path::Path;

use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as ReplResult};
use tracing::{info, warn};

use crate::{run, Evaluator};

pub const DEFAULT_PROMPT: &str = "> ";

/// Interactive session: one evaluator, and so one environment, for every line read.
#[derive(Debug)]
pub struct Repl {
    evaluator: Evaluator,
    prompt: String,
}

impl Repl {
    pub fn new(prompt: &str) -> Self {
        Self {
            evaluator: Evaluator::new(),
            prompt: prompt.to_string(),
        }
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    /// Evaluates `input` and writes the rendered result followed by a newline.
    /// An empty program writes nothing.
    pub fn print_result<W: Write>(&mut self, input: &str, writer: &mut W) -> io::Result<()> {
        match run(&mut self.evaluator, input) {
            Ok(Some(value)) => writeln!(writer, "{value}"),
            Ok(None) => Ok(()),
            Err(err) => {
                warn!(error = %err, "evaluation aborted");
                writeln!(writer, "error: {err}")
            }
        }
    }

    pub fn start(&mut self, history: Option<&Path>) -> ReplResult<()> {
        let mut rl = DefaultEditor::new()?;
        if let Some(path) = history {
            if rl.load_history(path).is_err() {
                info!(path = %path.display(), "no previous history");
            }
        }
        let mut stdout = io::stdout();
        loop {
            let readline = rl.readline(&self.prompt);
            match readline {
                Ok(line) => {
                    rl.add_history_entry(line.as_str())?;
                    self.print_result(&line, &mut stdout)?;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("CTRL-C");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    println!("CTRL-D");
                    break;
                }
                Err(err) => {
                    println!("Error: {:?}", err);
                    break;
                }
            }
        }
        if let Some(path) = history {
            rl.save_history(path)?;
        }
        Ok(())
    }
}

impl Default for Repl {
    fn default() -> Self {
        Self::new(DEFAULT_PROMPT)
    }
}
