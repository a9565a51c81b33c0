use std::fmt::{Display, Write};

use crate::{
    symbols::symbols::{FunctionSymbol, LabelSymbol, TypeSymbol, VariableSymbol},
    value::Value,
};

use super::operators::{BoundBinaryOperator, BoundUnaryOperator};

#[derive(Debug, Clone, PartialEq)]
pub enum BoundExpression {
    Literal {
        value: Value,
    },
    Variable {
        variable: VariableSymbol,
    },
    Assignment {
        variable: VariableSymbol,
        expression: Box<BoundExpression>,
    },
    Unary {
        operator: BoundUnaryOperator,
        operand: Box<BoundExpression>,
    },
    Binary {
        left: Box<BoundExpression>,
        operator: BoundBinaryOperator,
        right: Box<BoundExpression>,
    },
    Call {
        function: FunctionSymbol,
        arguments: Vec<BoundExpression>,
    },
    /// Stands in for an expression that failed to bind.
    Error,
}

impl BoundExpression {
    pub fn ty(&self) -> TypeSymbol {
        match self {
            BoundExpression::Literal { value } => value.ty(),
            BoundExpression::Variable { variable } => variable.ty(),
            BoundExpression::Assignment { expression, .. } => expression.ty(),
            BoundExpression::Unary { operator, .. } => operator.result_type,
            BoundExpression::Binary { operator, .. } => operator.result_type,
            BoundExpression::Call { function, .. } => function.return_type(),
            BoundExpression::Error => TypeSymbol::Error,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BoundBlockStatement {
    pub statements: Vec<BoundStatement>,
}

impl BoundBlockStatement {
    pub fn new(statements: Vec<BoundStatement>) -> Self {
        BoundBlockStatement { statements }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BoundStatement {
    Block(BoundBlockStatement),
    VariableDeclaration {
        variable: VariableSymbol,
        initializer: BoundExpression,
    },
    Expression(BoundExpression),
    If {
        condition: BoundExpression,
        then_statement: Box<BoundStatement>,
        else_statement: Option<Box<BoundStatement>>,
    },
    While {
        condition: BoundExpression,
        body: Box<BoundStatement>,
    },
    For {
        variable: VariableSymbol,
        lower_bound: BoundExpression,
        upper_bound: BoundExpression,
        body: Box<BoundStatement>,
    },
    Goto(LabelSymbol),
    ConditionalGoto {
        label: LabelSymbol,
        condition: BoundExpression,
        jump_if_true: bool,
    },
    Label(LabelSymbol),
}

impl BoundStatement {
    /// Variant name, used in evaluator faults and tree dumps.
    pub fn name(&self) -> &'static str {
        match self {
            BoundStatement::Block(_) => "Block",
            BoundStatement::VariableDeclaration { .. } => "VariableDeclaration",
            BoundStatement::Expression(_) => "Expression",
            BoundStatement::If { .. } => "If",
            BoundStatement::While { .. } => "While",
            BoundStatement::For { .. } => "For",
            BoundStatement::Goto(_) => "Goto",
            BoundStatement::ConditionalGoto { .. } => "ConditionalGoto",
            BoundStatement::Label(_) => "Label",
        }
    }

    fn write_to(&self, out: &mut String, indent: usize) -> std::fmt::Result {
        let pad = "    ".repeat(indent);

        match self {
            BoundStatement::Block(block) => {
                writeln!(out, "{}{{", pad)?;
                for statement in &block.statements {
                    statement.write_to(out, indent + 1)?;
                }
                writeln!(out, "{}}}", pad)
            }
            BoundStatement::VariableDeclaration { variable, initializer } => {
                let keyword = if variable.is_read_only() { "let" } else { "var" };
                writeln!(out, "{}{} {} = {}", pad, keyword, variable, initializer)
            }
            BoundStatement::Expression(expression) => writeln!(out, "{}{}", pad, expression),
            BoundStatement::If {
                condition,
                then_statement,
                else_statement,
            } => {
                writeln!(out, "{}if {}", pad, condition)?;
                then_statement.write_to(out, indent + 1)?;
                if let Some(else_statement) = else_statement {
                    writeln!(out, "{}else", pad)?;
                    else_statement.write_to(out, indent + 1)?;
                }
                Ok(())
            }
            BoundStatement::While { condition, body } => {
                writeln!(out, "{}while {}", pad, condition)?;
                body.write_to(out, indent + 1)
            }
            BoundStatement::For {
                variable,
                lower_bound,
                upper_bound,
                body,
            } => {
                writeln!(out, "{}for {} = {} to {}", pad, variable, lower_bound, upper_bound)?;
                body.write_to(out, indent + 1)
            }
            BoundStatement::Goto(label) => writeln!(out, "{}goto {}", pad, label),
            BoundStatement::ConditionalGoto {
                label,
                condition,
                jump_if_true,
            } => {
                let keyword = if *jump_if_true { "gotoTrue" } else { "gotoFalse" };
                writeln!(out, "{}{} {} {}", pad, keyword, condition, label)
            }
            // Labels sit one level out so jump targets stand out
            BoundStatement::Label(label) => writeln!(out, "{}{}:", "    ".repeat(indent.saturating_sub(1)), label),
        }
    }
}

impl Display for BoundExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoundExpression::Literal { value: Value::String(text) } => write!(f, "{:?}", text),
            BoundExpression::Literal { value } => write!(f, "{}", value),
            BoundExpression::Variable { variable } => write!(f, "{}", variable),
            BoundExpression::Assignment { variable, expression } => write!(f, "({} = {})", variable, expression),
            BoundExpression::Unary { operator, operand } => write!(f, "{}{}", operator, operand),
            BoundExpression::Binary { left, operator, right } => write!(f, "({} {} {})", left, operator, right),
            BoundExpression::Call { function, arguments } => {
                let arguments: Vec<String> = arguments.iter().map(|a| a.to_string()).collect();
                write!(f, "{}({})", function.name(), arguments.join(", "))
            }
            BoundExpression::Error => write!(f, "?"),
        }
    }
}

impl Display for BoundStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut out = String::new();
        self.write_to(&mut out, 0)?;
        f.write_str(&out)
    }
}

impl Display for BoundBlockStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut out = String::new();
        for statement in &self.statements {
            statement.write_to(&mut out, 1)?;
        }
        f.write_str(&out)
    }
}
