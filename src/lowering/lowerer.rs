use tracing::debug;

use crate::{
    binding::{
        bound_tree::{BoundBlockStatement, BoundExpression, BoundStatement},
        operators::{BoundBinaryOperator, BoundBinaryOperatorKind},
    },
    lexer::tokens::TokenKind,
    symbols::symbols::{LabelSymbol, TypeSymbol, VariableSymbol},
    value::Value,
};

/// Rewrites structured statements into gotos. Holds only the label counter.
#[derive(Debug, Default)]
pub struct Lowerer {
    label_count: usize,
}

impl Lowerer {
    pub fn new() -> Self {
        Lowerer { label_count: 0 }
    }

    fn generate_label(&mut self) -> LabelSymbol {
        self.label_count += 1;
        LabelSymbol::new(format!("Label{}", self.label_count))
    }

    pub fn rewrite_statement(&mut self, statement: BoundStatement) -> BoundStatement {
        match statement {
            BoundStatement::Block(block) => BoundStatement::Block(BoundBlockStatement::new(
                block
                    .statements
                    .into_iter()
                    .map(|s| self.rewrite_statement(s))
                    .collect(),
            )),
            BoundStatement::If {
                condition,
                then_statement,
                else_statement,
            } => self.rewrite_if_statement(condition, *then_statement, else_statement.map(|s| *s)),
            BoundStatement::While { condition, body } => self.rewrite_while_statement(condition, *body),
            BoundStatement::For {
                variable,
                lower_bound,
                upper_bound,
                body,
            } => self.rewrite_for_statement(variable, lower_bound, upper_bound, *body),
            other => other,
        }
    }

    // if <condition>           gotoFalse <condition> end
    //     <then>          =>   <then>
    //                          end:
    //
    // if <condition>           gotoFalse <condition> else
    //     <then>               <then>
    // else                =>   goto end
    //     <else>               else:
    //                          <else>
    //                          end:
    fn rewrite_if_statement(
        &mut self,
        condition: BoundExpression,
        then_statement: BoundStatement,
        else_statement: Option<BoundStatement>,
    ) -> BoundStatement {
        let statements = match else_statement {
            None => {
                let end_label = self.generate_label();
                vec![
                    BoundStatement::ConditionalGoto {
                        label: end_label.clone(),
                        condition,
                        jump_if_true: false,
                    },
                    self.rewrite_statement(then_statement),
                    BoundStatement::Label(end_label),
                ]
            }
            Some(else_statement) => {
                let else_label = self.generate_label();
                let end_label = self.generate_label();
                vec![
                    BoundStatement::ConditionalGoto {
                        label: else_label.clone(),
                        condition,
                        jump_if_true: false,
                    },
                    self.rewrite_statement(then_statement),
                    BoundStatement::Goto(end_label.clone()),
                    BoundStatement::Label(else_label),
                    self.rewrite_statement(else_statement),
                    BoundStatement::Label(end_label),
                ]
            }
        };

        BoundStatement::Block(BoundBlockStatement::new(statements))
    }

    // while <condition>        goto check
    //     <body>               body:
    //                          <body>
    //                     =>   check:
    //                          gotoTrue <condition> body
    //                          end:
    fn rewrite_while_statement(&mut self, condition: BoundExpression, body: BoundStatement) -> BoundStatement {
        let check_label = self.generate_label();
        let body_label = self.generate_label();
        let end_label = self.generate_label();

        BoundStatement::Block(BoundBlockStatement::new(vec![
            BoundStatement::Goto(check_label.clone()),
            BoundStatement::Label(body_label.clone()),
            self.rewrite_statement(body),
            BoundStatement::Label(check_label),
            BoundStatement::ConditionalGoto {
                label: body_label,
                condition,
                jump_if_true: true,
            },
            BoundStatement::Label(end_label),
        ]))
    }

    // for <var> = <lower> to <upper>        {
    //     <body>                                var <var> = <lower>
    //                                  =>       while <var> <= <upper>
    //                                           {
    //                                               <body>
    //                                               <var> = <var> + 1
    //                                           }
    //                                       }
    fn rewrite_for_statement(
        &mut self,
        variable: VariableSymbol,
        lower_bound: BoundExpression,
        upper_bound: BoundExpression,
        body: BoundStatement,
    ) -> BoundStatement {
        let variable_expression = BoundExpression::Variable {
            variable: variable.clone(),
        };

        let condition = BoundExpression::Binary {
            left: Box::new(variable_expression.clone()),
            operator: BoundBinaryOperator::with_result(
                TokenKind::LessEquals,
                BoundBinaryOperatorKind::LessOrEqual,
                TypeSymbol::Int,
                TypeSymbol::Bool,
            ),
            right: Box::new(upper_bound),
        };

        let increment = BoundStatement::Expression(BoundExpression::Assignment {
            variable: variable.clone(),
            expression: Box::new(BoundExpression::Binary {
                left: Box::new(variable_expression),
                operator: BoundBinaryOperator::new(TokenKind::Plus, BoundBinaryOperatorKind::Addition, TypeSymbol::Int),
                right: Box::new(BoundExpression::Literal { value: Value::Int(1) }),
            }),
        });

        let while_statement = BoundStatement::While {
            condition,
            body: Box::new(BoundStatement::Block(BoundBlockStatement::new(vec![body, increment]))),
        };

        let result = BoundStatement::Block(BoundBlockStatement::new(vec![
            BoundStatement::VariableDeclaration {
                variable,
                initializer: lower_bound,
            },
            while_statement,
        ]));

        self.rewrite_statement(result)
    }
}

/// Splices nested blocks into one sequence, preserving order.
fn flatten(statement: BoundStatement) -> BoundBlockStatement {
    let mut statements = vec![];
    let mut stack = vec![statement];

    while let Some(current) = stack.pop() {
        match current {
            BoundStatement::Block(block) => stack.extend(block.statements.into_iter().rev()),
            other => statements.push(other),
        }
    }

    BoundBlockStatement::new(statements)
}

/// Lowers `statement` into a flat block containing no nested blocks and no
/// `if`, `while` or `for`. Every label a jump refers to is present in the
/// result.
#[tracing::instrument(level = "debug", skip_all)]
pub fn lower(statement: BoundStatement) -> BoundBlockStatement {
    let mut lowerer = Lowerer::new();
    let result = flatten(lowerer.rewrite_statement(statement));

    debug!(
        statements = result.statements.len(),
        labels = lowerer.label_count,
        "lowered program"
    );

    result
}
