use std::collections::HashMap;

use rand::Rng;
use tracing::{debug, trace};

use crate::{
    binding::{
        bound_tree::{BoundBlockStatement, BoundExpression, BoundStatement},
        operators::{BoundBinaryOperator, BoundBinaryOperatorKind, BoundUnaryOperator, BoundUnaryOperatorKind},
    },
    errors::errors::EvaluationError,
    symbols::{
        builtins,
        symbols::{FunctionSymbol, LabelSymbol, TypeSymbol},
    },
    value::{Value, VariableStore},
};

use super::console::{Console, StdConsole};

/// Interprets a lowered program against a caller-owned variable store.
pub struct Evaluator<'a> {
    program: &'a BoundBlockStatement,
    variables: &'a mut VariableStore,
    console: &'a mut dyn Console,
    /// Label -> index of the statement following it
    labels: HashMap<LabelSymbol, usize>,
    last_value: Value,
}

impl<'a> Evaluator<'a> {
    pub fn new(program: &'a BoundBlockStatement, variables: &'a mut VariableStore, console: &'a mut dyn Console) -> Self {
        let mut labels = HashMap::new();
        for (index, statement) in program.statements.iter().enumerate() {
            if let BoundStatement::Label(label) = statement {
                labels.insert(label.clone(), index + 1);
            }
        }
        trace!(labels = labels.len(), "built label table");

        Evaluator {
            program,
            variables,
            console,
            labels,
            last_value: Value::Void,
        }
    }

    fn label_index(&self, label: &LabelSymbol) -> Result<usize, EvaluationError> {
        self.labels
            .get(label)
            .copied()
            .ok_or_else(|| EvaluationError::UnresolvedLabel {
                label: label.name().to_string(),
            })
    }

    /// Runs the program to completion and returns the value of the last
    /// declaration or expression statement executed.
    pub fn evaluate(&mut self) -> Result<Value, EvaluationError> {
        let program = self.program;
        let statements = &program.statements;
        let mut index = 0;

        while index < statements.len() {
            match &statements[index] {
                BoundStatement::VariableDeclaration { variable, initializer } => {
                    let value = self.evaluate_expression(initializer)?;
                    self.variables.insert(variable.clone(), value.clone());
                    self.last_value = value;
                    index += 1;
                }
                BoundStatement::Expression(expression) => {
                    self.last_value = self.evaluate_expression(expression)?;
                    index += 1;
                }
                BoundStatement::Goto(label) => {
                    index = self.label_index(label)?;
                    trace!(%label, index, "goto");
                }
                BoundStatement::ConditionalGoto {
                    label,
                    condition,
                    jump_if_true,
                } => {
                    let condition = self.evaluate_expression(condition)?;
                    let condition = expect_bool("condition", condition)?;

                    if condition == *jump_if_true {
                        index = self.label_index(label)?;
                        trace!(%label, index, "conditional goto taken");
                    } else {
                        index += 1;
                    }
                }
                BoundStatement::Label(_) => index += 1,
                statement @ (BoundStatement::Block(_)
                | BoundStatement::If { .. }
                | BoundStatement::While { .. }
                | BoundStatement::For { .. }) => {
                    return Err(EvaluationError::UnloweredStatement {
                        statement: statement.name(),
                    });
                }
            }
        }

        debug!(value = %self.last_value, "evaluation finished");
        Ok(self.last_value.clone())
    }

    fn evaluate_expression(&mut self, expression: &BoundExpression) -> Result<Value, EvaluationError> {
        match expression {
            BoundExpression::Literal { value } => Ok(value.clone()),
            BoundExpression::Variable { variable } => {
                self.variables
                    .get(variable)
                    .cloned()
                    .ok_or_else(|| EvaluationError::MissingVariable {
                        name: variable.name().to_string(),
                    })
            }
            BoundExpression::Assignment { variable, expression } => {
                let value = self.evaluate_expression(expression)?;
                self.variables.insert(variable.clone(), value.clone());
                Ok(value)
            }
            BoundExpression::Unary { operator, operand } => {
                let operand = self.evaluate_expression(operand)?;
                evaluate_unary(operator, operand)
            }
            BoundExpression::Binary { left, operator, right } => self.evaluate_binary(left, operator, right),
            BoundExpression::Call { function, arguments } => {
                let mut values = Vec::with_capacity(arguments.len());
                for argument in arguments {
                    values.push(self.evaluate_expression(argument)?);
                }
                self.call_builtin(function, values)
            }
            BoundExpression::Error => Err(EvaluationError::InvalidOperand {
                operator: String::from("evaluate"),
                operand: String::from("an error expression"),
            }),
        }
    }

    fn evaluate_binary(
        &mut self,
        left: &BoundExpression,
        operator: &BoundBinaryOperator,
        right: &BoundExpression,
    ) -> Result<Value, EvaluationError> {
        let left = self.evaluate_expression(left)?;

        // && and || skip the right operand once the outcome is known
        if matches!(operator.kind, BoundBinaryOperatorKind::LogicalAnd | BoundBinaryOperatorKind::LogicalOr) {
            let is_and = operator.kind == BoundBinaryOperatorKind::LogicalAnd;
            if expect_bool(&operator.to_string(), left.clone())? != is_and {
                return Ok(left);
            }

            let right = self.evaluate_expression(right)?;
            return expect_bool(&operator.to_string(), right).map(Value::Bool);
        }

        let right = self.evaluate_expression(right)?;
        evaluate_binary(operator, left, right)
    }

    fn call_builtin(&mut self, function: &FunctionSymbol, arguments: Vec<Value>) -> Result<Value, EvaluationError> {
        let mut arguments = arguments.into_iter();

        if *function == *builtins::PRINT {
            let text = match arguments.next() {
                Some(Value::String(text)) => text,
                other => return Err(invalid_operand("print", other.unwrap_or(Value::Void))),
            };
            self.console.print(&text);
            Ok(Value::Void)
        } else if *function == *builtins::INPUT {
            Ok(Value::String(self.console.input()))
        } else if *function == *builtins::RND {
            let max = match arguments.next() {
                Some(Value::Int(max)) => max,
                other => return Err(invalid_operand("rnd", other.unwrap_or(Value::Void))),
            };
            Ok(Value::Int(random_below(max)))
        } else {
            Err(EvaluationError::UnknownFunction {
                name: function.name().to_string(),
            })
        }
    }
}

/// Uniform value in `[0, max)`, or 0 when the range is empty.
fn random_below(max: i32) -> i32 {
    if max <= 0 {
        return 0;
    }

    rand::thread_rng().gen_range(0..max)
}

fn invalid_operand(operator: &str, operand: Value) -> EvaluationError {
    EvaluationError::InvalidOperand {
        operator: operator.to_string(),
        operand: format!("{:?}", operand),
    }
}

fn expect_bool(operator: &str, value: Value) -> Result<bool, EvaluationError> {
    match value {
        Value::Bool(value) => Ok(value),
        other => Err(invalid_operand(operator, other)),
    }
}

fn evaluate_unary(operator: &BoundUnaryOperator, operand: Value) -> Result<Value, EvaluationError> {
    match (operator.kind, operand) {
        (BoundUnaryOperatorKind::Identity, Value::Int(value)) => Ok(Value::Int(value)),
        (BoundUnaryOperatorKind::Negation, Value::Int(value)) => Ok(Value::Int(value.wrapping_neg())),
        (BoundUnaryOperatorKind::LogicalNegation, Value::Bool(value)) => Ok(Value::Bool(!value)),
        (BoundUnaryOperatorKind::OnesComplement, Value::Int(value)) => Ok(Value::Int(!value)),
        (_, operand) => Err(invalid_operand(&operator.to_string(), operand)),
    }
}

fn int_operands(operator: &str, left: Value, right: Value) -> Result<(i32, i32), EvaluationError> {
    match (left, right) {
        (Value::Int(left), Value::Int(right)) => Ok((left, right)),
        (Value::Int(_), other) | (other, _) => Err(invalid_operand(operator, other)),
    }
}

fn bool_operands(operator: &str, left: Value, right: Value) -> Result<(bool, bool), EvaluationError> {
    Ok((expect_bool(operator, left)?, expect_bool(operator, right)?))
}

fn evaluate_binary(operator: &BoundBinaryOperator, left: Value, right: Value) -> Result<Value, EvaluationError> {
    use BoundBinaryOperatorKind::*;

    let symbol = operator.to_string();
    // Bitwise operators mean different things on bools and ints; the bound
    // result type decides which
    let is_boolean = operator.result_type == TypeSymbol::Bool;

    let result = match operator.kind {
        Equals => Value::Bool(left == right),
        NotEquals => Value::Bool(left != right),
        LogicalAnd => {
            let (left, right) = bool_operands(&symbol, left, right)?;
            Value::Bool(left && right)
        }
        LogicalOr => {
            let (left, right) = bool_operands(&symbol, left, right)?;
            Value::Bool(left || right)
        }
        BitwiseAnd | BitwiseOr | BitwiseXor if is_boolean => {
            let (left, right) = bool_operands(&symbol, left, right)?;
            Value::Bool(match operator.kind {
                BitwiseAnd => left & right,
                BitwiseOr => left | right,
                _ => left ^ right,
            })
        }
        BitwiseAnd => {
            let (left, right) = int_operands(&symbol, left, right)?;
            Value::Int(left & right)
        }
        BitwiseOr => {
            let (left, right) = int_operands(&symbol, left, right)?;
            Value::Int(left | right)
        }
        BitwiseXor => {
            let (left, right) = int_operands(&symbol, left, right)?;
            Value::Int(left ^ right)
        }
        Addition => {
            let (left, right) = int_operands(&symbol, left, right)?;
            Value::Int(left.wrapping_add(right))
        }
        Subtraction => {
            let (left, right) = int_operands(&symbol, left, right)?;
            Value::Int(left.wrapping_sub(right))
        }
        Multiplication => {
            let (left, right) = int_operands(&symbol, left, right)?;
            Value::Int(left.wrapping_mul(right))
        }
        Division => {
            let (left, right) = int_operands(&symbol, left, right)?;
            if right == 0 {
                return Err(EvaluationError::DivisionByZero);
            }
            // i32::MIN / -1 is the only other failure
            Value::Int(left.checked_div(right).ok_or(EvaluationError::Overflow { operator: symbol })?)
        }
        Less => {
            let (left, right) = int_operands(&symbol, left, right)?;
            Value::Bool(left < right)
        }
        LessOrEqual => {
            let (left, right) = int_operands(&symbol, left, right)?;
            Value::Bool(left <= right)
        }
        Greater => {
            let (left, right) = int_operands(&symbol, left, right)?;
            Value::Bool(left > right)
        }
        GreaterOrEqual => {
            let (left, right) = int_operands(&symbol, left, right)?;
            Value::Bool(left >= right)
        }
    };

    Ok(result)
}

/// Evaluates `program` using the process console for built-in I/O.
pub fn evaluate(program: &BoundBlockStatement, variables: &mut VariableStore) -> Result<Value, EvaluationError> {
    let mut console = StdConsole;
    evaluate_with(program, variables, &mut console)
}

#[tracing::instrument(level = "debug", skip_all, fields(statements = program.statements.len()))]
pub fn evaluate_with(
    program: &BoundBlockStatement,
    variables: &mut VariableStore,
    console: &mut dyn Console,
) -> Result<Value, EvaluationError> {
    Evaluator::new(program, variables, console).evaluate()
}
