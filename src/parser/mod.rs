mod ast;
mod error;
mod grammar;
mod tokenizer;

pub use ast::*;
pub use error::Error;
pub use grammar::{parse, Parser};
pub use tokenizer::{tokenize_string, Token, TokenType, Tokenizer};
