mod environment;
mod value;

pub use environment::{Environment, EnvironmentError};
pub use value::Value;

use tracing::debug;

use crate::parser::{
    Expression, InfixOperator, PrefixOperator, Program, Statement, VariableDeclaration,
};

/// Tree-walking evaluator. Bindings made by one program stay visible to the
/// programs evaluated after it.
#[derive(Debug, Default)]
pub struct Evaluator {
    environment: Environment,
}

impl Evaluator {
    pub fn new() -> Self {
        Self {
            environment: Environment::new(),
        }
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Evaluates every statement in order and returns the value of the last
    /// one, or `None` for an empty program.
    pub fn evaluate(&mut self, program: &Program) -> Option<Value> {
        program
            .statements
            .iter()
            .fold(None, |_, statement| Some(self.evaluate_statement(statement)))
    }

    pub fn evaluate_statement(&mut self, statement: &Statement) -> Value {
        match statement {
            Statement::Expression(expr) => self.evaluate_expr(expr),
            Statement::VariableDeclaration(decl) => self.declare(decl),
            Statement::Bad(msg) => Value::error(msg),
        }
    }

    pub fn evaluate_expr(&mut self, expression: &Expression) -> Value {
        match expression {
            Expression::Integer(value) => Value::Integer(*value),
            Expression::Identifier(name) => match self.environment.get(name.as_str()) {
                Some(value) => value.clone(),
                None => Value::Error(format!("undefined variable: {name}")),
            },
            Expression::Prefix(op, operand) => {
                let operand = self.evaluate_expr(operand);
                prefix(*op, operand)
            }
            Expression::Infix(op, operands) => {
                let (lhs, rhs) = operands.as_ref();
                let left = self.evaluate_expr(lhs);
                let right = self.evaluate_expr(rhs);
                infix(*op, left, right)
            }
        }
    }

    fn declare(&mut self, decl: &VariableDeclaration) -> Value {
        let value = match &decl.expression {
            Some(expr) => self.evaluate_expr(expr),
            None => match zero_value(decl.type_name.as_str()) {
                Some(value) => value,
                None => return Value::Error(format!("unknown type name: {}", decl.type_name)),
            },
        };
        if value.is_error() {
            return value;
        }
        match self.environment.set(decl.identifier.as_str(), value.clone()) {
            Ok(()) => {
                debug!(name = %decl.identifier, value = %value, "bound variable");
                value
            }
            Err(err) => Value::Error(err.to_string()),
        }
    }
}

fn zero_value(type_name: &str) -> Option<Value> {
    match type_name {
        "int" => Some(Value::Integer(0)),
        _ => None,
    }
}

fn prefix(op: PrefixOperator, operand: Value) -> Value {
    match (op, operand) {
        (_, err @ Value::Error(_)) => err,
        (PrefixOperator::Negative, Value::Integer(value)) => value
            .checked_neg()
            .map_or_else(|| Value::error("integer overflow"), Value::Integer),
        (PrefixOperator::Not, Value::Boolean(value)) => Value::Boolean(!value),
        (op, operand) => Value::Error(format!("type mismatch: {op}{}", operand.type_name())),
    }
}

fn infix(op: InfixOperator, left: Value, right: Value) -> Value {
    let (lhs, rhs) = match (left, right) {
        (err @ Value::Error(_), _) | (_, err @ Value::Error(_)) => return err,
        (Value::Integer(lhs), Value::Integer(rhs)) => (lhs, rhs),
        (left, right) => {
            return Value::Error(format!(
                "type mismatch: {} {op} {}",
                left.type_name(),
                right.type_name()
            ))
        }
    };
    let result = match op {
        InfixOperator::Plus => lhs.checked_add(rhs),
        InfixOperator::Minus => lhs.checked_sub(rhs),
        InfixOperator::Asterisk => lhs.checked_mul(rhs),
        InfixOperator::Slash if rhs == 0 => return Value::error("divided by zero"),
        InfixOperator::Slash => lhs.checked_div(rhs),
    };
    result.map_or_else(|| Value::error("integer overflow"), Value::Integer)
}
