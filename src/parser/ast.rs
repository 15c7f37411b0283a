use super::tokenizer::{Token, TokenType as TT};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Expression(Expression),
    VariableDeclaration(VariableDeclaration),
    /// A statement that failed to parse, kept so that later statements still run.
    Bad(String),
}

impl Statement {
    pub(super) fn bad(msg: &str) -> Self {
        Self::Bad(msg.to_string())
    }
    pub fn is_bad(&self) -> bool {
        matches!(self, Self::Bad(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclaration {
    pub identifier: Name,
    pub type_name: Name,
    pub expression: Option<Expression>,
}

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Name(pub(crate) String);

impl Name {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Name {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Name(\"{}\")", self.0)
    }
}

impl std::fmt::Display for Name {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&Token> for Name {
    fn from(value: &Token) -> Self {
        Self(value.lexeme.clone())
    }
}

impl From<&str> for Name {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Integer(i64),
    Identifier(Name),
    Prefix(PrefixOperator, Box<Expression>),
    Infix(InfixOperator, Box<(Expression, Expression)>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixOperator {
    Negative,
    Not,
}

impl PrefixOperator {
    pub(super) fn from_token_type(typ: TT) -> Option<Self> {
        match typ {
            TT::MINUS => Some(Self::Negative),
            TT::EXCLAMATION => Some(Self::Not),
            _ => None,
        }
    }
}

impl std::fmt::Display for PrefixOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Negative => f.write_str("-"),
            Self::Not => f.write_str("!"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfixOperator {
    Plus,
    Minus,
    Asterisk,
    Slash,
}

impl InfixOperator {
    pub(super) fn from_token_type(typ: TT) -> Option<Self> {
        match typ {
            TT::PLUS => Some(Self::Plus),
            TT::MINUS => Some(Self::Minus),
            TT::STAR => Some(Self::Asterisk),
            TT::SLASH => Some(Self::Slash),
            _ => None,
        }
    }
}

impl std::fmt::Display for InfixOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Asterisk => "*",
            Self::Slash => "/",
        };
        f.write_str(symbol)
    }
}
