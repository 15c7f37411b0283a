// # GRAMMAR
// # =======
//
// program:     statement* ENDMARKER
// statement:   (var_decl | expression) ';'
// var_decl:    'var' NAME NAME ['=' expression]
// expression:  prefix (infix_op expression)*   # equal priorities nest rightwards
// prefix:      NUMBER | NAME | '(' expression ')' | ('-' | '!') expression
// infix_op:    '+' | '-' | '*' | '/'
//
// Expressions are parsed by precedence climbing: every token type that may
// start an expression has a prefix handler, every token type that may continue
// one has an infix handler and a binding priority.

use derivative::Derivative;
use tracing::debug;

use super::ast::*;
use super::error::Error;
use super::tokenizer::{Token, TokenType as TT, Tokenizer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Priority {
    Lowest,
    Additive,
    Multiplicative,
    Prefix,
}

impl Priority {
    fn of(typ: TT) -> Self {
        match typ {
            TT::PLUS | TT::MINUS => Self::Additive,
            TT::STAR | TT::SLASH => Self::Multiplicative,
            _ => Self::Lowest,
        }
    }

    fn weaker(self) -> Self {
        match self {
            Self::Lowest | Self::Additive => Self::Lowest,
            Self::Multiplicative => Self::Additive,
            Self::Prefix => Self::Multiplicative,
        }
    }
}

#[derive(Debug)]
enum Failure {
    Recoverable(String),
    Fatal(Error),
}

impl From<Error> for Failure {
    fn from(value: Error) -> Self {
        Self::Fatal(value)
    }
}

type ParseResult<T> = Result<T, Failure>;

// Deeper expressions are rejected so that parsing and evaluation stay within the stack.
const MAX_DEPTH: usize = 256;

fn recoverable<T>(msg: &str) -> ParseResult<T> {
    Err(Failure::Recoverable(msg.to_string()))
}

type PrefixHandler<'a> = fn(&mut Parser<'a>) -> ParseResult<Expression>;
type InfixHandler<'a> = fn(&mut Parser<'a>, Expression) -> ParseResult<Expression>;

fn prefix_handler<'a>(typ: TT) -> Option<PrefixHandler<'a>> {
    match typ {
        TT::MINUS | TT::EXCLAMATION => Some(Parser::prefix_expression),
        TT::LPAR => Some(Parser::group_expression),
        TT::NAME => Some(Parser::identifier),
        TT::NUMBER => Some(Parser::integer),
        _ => None,
    }
}

fn infix_handler<'a>(typ: TT) -> Option<InfixHandler<'a>> {
    match typ {
        TT::PLUS | TT::MINUS | TT::STAR | TT::SLASH => Some(Parser::infix_expression),
        _ => None,
    }
}

/// Recursive-descent parser holding the current token and one token of lookahead.
#[derive(Derivative)]
#[derivative(Debug)]
pub struct Parser<'a> {
    #[derivative(Debug = "ignore")]
    tokenizer: Tokenizer<'a>,
    current: Token,
    reading: Token,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(mut tokenizer: Tokenizer<'a>) -> Self {
        let current = tokenizer.next_token();
        let reading = tokenizer.next_token();
        Self {
            tokenizer,
            current,
            reading,
            depth: 0,
        }
    }

    /// Parses statements until the input is exhausted.
    ///
    /// Malformed statements are kept as [`Statement::Bad`]; only an integer
    /// literal that does not fit into an `i64` aborts the parse.
    pub fn parse_program(&mut self) -> Result<Program, Error> {
        let mut statements = vec![];
        while !self.current.is(TT::ENDMARKER) {
            statements.push(self.statement()?);
            self.advance();
        }
        Ok(Program { statements })
    }

    fn statement(&mut self) -> Result<Statement, Error> {
        let parsed = match self.current.typ {
            TT::VAR => self.variable_declaration(),
            _ => self.expression_statement(),
        };
        let statement = match parsed {
            Ok(statement) if self.expect_peek(TT::SEMI) => statement,
            Ok(_) => Statement::bad("failed to find semicolon"),
            Err(Failure::Recoverable(msg)) => Statement::Bad(msg),
            Err(Failure::Fatal(err)) => return Err(err),
        };
        if let Statement::Bad(msg) = &statement {
            debug!(message = %msg, at = %self.current, "recovering from bad statement");
            self.synchronize();
        }
        Ok(statement)
    }

    fn variable_declaration(&mut self) -> ParseResult<Statement> {
        if !self.expect_peek(TT::NAME) {
            return recoverable("failed to find identifier of variable");
        }
        let identifier = Name::from(&self.current);
        if !self.expect_peek(TT::NAME) {
            return recoverable("failed to find type name of variable");
        }
        let type_name = Name::from(&self.current);
        let expression = if self.expect_peek(TT::EQUAL) {
            self.advance();
            Some(self.expression(Priority::Lowest)?)
        } else {
            None
        };
        Ok(Statement::VariableDeclaration(VariableDeclaration {
            identifier,
            type_name,
            expression,
        }))
    }

    fn expression_statement(&mut self) -> ParseResult<Statement> {
        self.expression(Priority::Lowest).map(Statement::Expression)
    }

    fn expression(&mut self, priority: Priority) -> ParseResult<Expression> {
        if self.depth >= MAX_DEPTH {
            return recoverable("expression nested too deeply");
        }
        self.depth += 1;
        let result = self.nested_expression(priority);
        self.depth -= 1;
        result
    }

    fn nested_expression(&mut self, priority: Priority) -> ParseResult<Expression> {
        let Some(prefix) = prefix_handler(self.current.typ) else {
            return Err(Failure::Recoverable(format!(
                "failed to find expression: unexpected {}",
                describe(&self.current)
            )));
        };
        let mut expr = prefix(self)?;
        while Priority::of(self.reading.typ) > priority {
            let Some(infix) = infix_handler(self.reading.typ) else {
                break;
            };
            self.advance();
            expr = infix(self, expr)?;
        }
        Ok(expr)
    }

    fn prefix_expression(&mut self) -> ParseResult<Expression> {
        let Some(op) = PrefixOperator::from_token_type(self.current.typ) else {
            return recoverable("failed to find prefix operator");
        };
        self.advance();
        let operand = self.expression(Priority::Prefix)?;
        Ok(Expression::Prefix(op, Box::new(operand)))
    }

    fn infix_expression(&mut self, left: Expression) -> ParseResult<Expression> {
        let Some(op) = InfixOperator::from_token_type(self.current.typ) else {
            return recoverable("failed to find infix operator");
        };
        // Binding the right operand one level weaker lets operators of the
        // same priority nest to the right: `7 + 8 - 9` is `7 + (8 - 9)`.
        let priority = Priority::of(self.current.typ).weaker();
        self.advance();
        let right = self.expression(priority)?;
        Ok(Expression::Infix(op, Box::new((left, right))))
    }

    fn group_expression(&mut self) -> ParseResult<Expression> {
        self.advance();
        let expr = self.expression(Priority::Lowest)?;
        if !self.expect_peek(TT::RPAR) {
            return recoverable("failed to find rparen");
        }
        Ok(expr)
    }

    fn identifier(&mut self) -> ParseResult<Expression> {
        Ok(Expression::Identifier(Name::from(&self.current)))
    }

    fn integer(&mut self) -> ParseResult<Expression> {
        let literal = &self.current.lexeme;
        let value = literal
            .parse::<i64>()
            .map_err(|source| Error::IntegerLiteral {
                literal: literal.clone(),
                source,
            })?;
        Ok(Expression::Integer(value))
    }

    // Skips the rest of a malformed statement, stopping on its ';' or just
    // before the end of input.
    fn synchronize(&mut self) {
        while !self.current.is(TT::SEMI) && !self.reading.is(TT::ENDMARKER) {
            self.advance();
        }
    }

    fn expect_peek(&mut self, typ: TT) -> bool {
        if !self.reading.is(typ) {
            return false;
        }
        self.advance();
        true
    }

    fn advance(&mut self) {
        self.current = std::mem::replace(&mut self.reading, self.tokenizer.next_token());
    }
}

fn describe(token: &Token) -> String {
    match token.typ {
        TT::ENDMARKER => "end of input".to_string(),
        _ => format!("'{}'", token.lexeme),
    }
}

/// Tokenizes and parses `input` in one go.
pub fn parse(input: &str) -> Result<Program, Error> {
    Parser::new(Tokenizer::new(input)).parse_program()
}
