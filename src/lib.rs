mod parser;
pub use parser::{
    parse, tokenize_string, Error, Expression, InfixOperator, Name, Parser, PrefixOperator,
    Program, Statement, Token, TokenType, Tokenizer, VariableDeclaration,
};

mod interpreter;
pub use interpreter::{Environment, EnvironmentError, Evaluator, Value};

pub mod repl;

/// Runs `input` through the whole pipeline against `evaluator`'s environment.
///
/// Returns the value of the last statement, `None` when `input` holds no
/// statements, or the fatal error that aborted parsing.
pub fn run(evaluator: &mut Evaluator, input: &str) -> Result<Option<Value>, Error> {
    let program = parse(input)?;
    Ok(evaluator.evaluate(&program))
}
