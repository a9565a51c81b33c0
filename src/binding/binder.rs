use std::sync::Arc;

use tracing::{debug, trace};

use crate::{
    ast::{
        ast::CompilationUnit,
        expressions::{AssignmentExpr, BinaryExpr, CallExpr, ExprSyntax, LiteralExpr, NameExpr, UnaryExpr},
        statements::{BlockStmt, ForStmt, IfStmt, StmtSyntax, VarDeclStmt, WhileStmt},
    },
    errors::errors::DiagnosticBag,
    lexer::tokens::TokenKind,
    symbols::{
        builtins,
        symbols::{Symbol, TypeSymbol, VariableSymbol},
    },
    value::Value,
};

use super::{
    bound_tree::{BoundBlockStatement, BoundExpression, BoundStatement},
    operators::{BoundBinaryOperator, BoundUnaryOperator},
    scope::{ScopeId, ScopeTree},
};

/// Result of binding one submission.
///
/// Holds the previous submission's global scope so later submissions can
/// replay every earlier top-level declaration.
#[derive(Debug)]
pub struct BoundGlobalScope {
    pub previous: Option<Arc<BoundGlobalScope>>,
    pub diagnostics: DiagnosticBag,
    pub variables: Vec<VariableSymbol>,
    pub statement: BoundStatement,
}

impl BoundGlobalScope {
    /// Everything visible at the top level of this submission: built-in
    /// functions, then globals from the oldest submission to this one.
    pub fn symbols(&self) -> Vec<Symbol> {
        let mut chain = vec![];
        let mut current = Some(self);
        while let Some(scope) = current {
            chain.push(scope);
            current = scope.previous.as_deref();
        }

        let mut symbols: Vec<Symbol> = builtins::all().into_iter().map(Symbol::Function).collect();
        for scope in chain.iter().rev() {
            let mut variables = scope.variables.clone();
            variables.sort_by(|a, b| a.name().cmp(b.name()));
            symbols.extend(variables.into_iter().map(Symbol::Variable));
        }

        symbols
    }
}

pub struct Binder {
    scopes: ScopeTree,
    scope: ScopeId,
    diagnostics: DiagnosticBag,
}

impl Binder {
    pub fn new(scopes: ScopeTree, scope: ScopeId) -> Self {
        Binder {
            scopes,
            scope,
            diagnostics: DiagnosticBag::new(),
        }
    }

    fn push_scope(&mut self) {
        self.scope = self.scopes.push(self.scope);
    }

    fn pop_scope(&mut self) {
        if let Some(parent) = self.scopes.pop() {
            self.scope = parent;
        }
    }

    pub fn bind_statement(&mut self, syntax: &StmtSyntax) -> BoundStatement {
        match syntax {
            StmtSyntax::Block(block) => self.bind_block_statement(block),
            StmtSyntax::VariableDeclaration(declaration) => self.bind_variable_declaration(declaration),
            StmtSyntax::If(if_stmt) => self.bind_if_statement(if_stmt),
            StmtSyntax::While(while_stmt) => self.bind_while_statement(while_stmt),
            StmtSyntax::For(for_stmt) => self.bind_for_statement(for_stmt),
            StmtSyntax::Expression(statement) => {
                BoundStatement::Expression(self.bind_expression_internal(&statement.expression, true))
            }
        }
    }

    fn bind_block_statement(&mut self, syntax: &BlockStmt) -> BoundStatement {
        self.push_scope();
        let statements = syntax.statements.iter().map(|s| self.bind_statement(s)).collect();
        self.pop_scope();

        BoundStatement::Block(BoundBlockStatement::new(statements))
    }

    /// Binds `syntax` in its own child scope so nothing it declares leaks.
    fn bind_nested_statement(&mut self, syntax: &StmtSyntax) -> BoundStatement {
        self.push_scope();
        let statement = self.bind_statement(syntax);
        self.pop_scope();

        statement
    }

    fn bind_variable_declaration(&mut self, syntax: &VarDeclStmt) -> BoundStatement {
        let is_read_only = syntax.keyword.kind == TokenKind::Let;
        let initializer = self.bind_expression(&syntax.initializer);
        let variable = VariableSymbol::new(syntax.identifier.value.as_str(), initializer.ty(), is_read_only);

        // A missing name has already been reported by the parser
        if !syntax.identifier.is_missing && !self.scopes.declare_variable(self.scope, variable.clone()) {
            self.diagnostics
                .report_variable_already_declared(syntax.identifier.span, &syntax.identifier.value);
        }

        BoundStatement::VariableDeclaration { variable, initializer }
    }

    fn bind_if_statement(&mut self, syntax: &IfStmt) -> BoundStatement {
        let condition = self.bind_expression_of_type(&syntax.condition, TypeSymbol::Bool);
        let then_statement = self.bind_nested_statement(&syntax.then_statement);
        let else_statement = syntax
            .else_clause
            .as_ref()
            .map(|clause| Box::new(self.bind_nested_statement(&clause.statement)));

        BoundStatement::If {
            condition,
            then_statement: Box::new(then_statement),
            else_statement,
        }
    }

    fn bind_while_statement(&mut self, syntax: &WhileStmt) -> BoundStatement {
        let condition = self.bind_expression_of_type(&syntax.condition, TypeSymbol::Bool);
        let body = self.bind_nested_statement(&syntax.body);

        BoundStatement::While {
            condition,
            body: Box::new(body),
        }
    }

    fn bind_for_statement(&mut self, syntax: &ForStmt) -> BoundStatement {
        let lower_bound = self.bind_expression_of_type(&syntax.lower_bound, TypeSymbol::Int);
        let upper_bound = self.bind_expression_of_type(&syntax.upper_bound, TypeSymbol::Int);

        self.push_scope();

        let variable = VariableSymbol::new(syntax.identifier.value.as_str(), TypeSymbol::Int, true);
        if !syntax.identifier.is_missing {
            // Fresh scope, so this cannot collide
            self.scopes.declare_variable(self.scope, variable.clone());
        }
        let body = self.bind_statement(&syntax.body);

        self.pop_scope();

        BoundStatement::For {
            variable,
            lower_bound,
            upper_bound,
            body: Box::new(body),
        }
    }

    /// Binds an expression that must produce a value.
    pub fn bind_expression(&mut self, syntax: &ExprSyntax) -> BoundExpression {
        self.bind_expression_internal(syntax, false)
    }

    fn bind_expression_internal(&mut self, syntax: &ExprSyntax, can_be_void: bool) -> BoundExpression {
        let result = match syntax {
            ExprSyntax::Literal(literal) => self.bind_literal_expression(literal),
            ExprSyntax::Name(name) => self.bind_name_expression(name),
            ExprSyntax::Assignment(assignment) => self.bind_assignment_expression(assignment),
            ExprSyntax::Unary(unary) => self.bind_unary_expression(unary),
            ExprSyntax::Binary(binary) => self.bind_binary_expression(binary),
            ExprSyntax::Parenthesized(parenthesized) => self.bind_expression(&parenthesized.expression),
            ExprSyntax::Call(call) => self.bind_call_expression(call),
        };

        if !can_be_void && result.ty() == TypeSymbol::Void {
            self.diagnostics.report_expression_must_have_value(syntax.span());
            return BoundExpression::Error;
        }

        result
    }

    /// Binds `syntax` and requires its type to be `ty`. A mismatch is reported
    /// and replaced by an error expression.
    fn bind_expression_of_type(&mut self, syntax: &ExprSyntax, ty: TypeSymbol) -> BoundExpression {
        let result = self.bind_expression(syntax);

        if result.ty() != TypeSymbol::Error && result.ty() != ty {
            self.diagnostics.report_cannot_convert(syntax.span(), result.ty(), ty);
            return BoundExpression::Error;
        }

        result
    }

    fn bind_literal_expression(&mut self, syntax: &LiteralExpr) -> BoundExpression {
        let value = syntax.value.clone().unwrap_or(Value::Int(0));
        BoundExpression::Literal { value }
    }

    fn bind_name_expression(&mut self, syntax: &NameExpr) -> BoundExpression {
        if syntax.identifier.is_missing {
            return BoundExpression::Error;
        }

        let name = &syntax.identifier.value;
        match self.scopes.lookup_variable(self.scope, name) {
            Some(variable) => BoundExpression::Variable {
                variable: variable.clone(),
            },
            None => {
                self.diagnostics.report_undefined_name(syntax.identifier.span, name);
                BoundExpression::Literal { value: Value::Int(0) }
            }
        }
    }

    fn bind_assignment_expression(&mut self, syntax: &AssignmentExpr) -> BoundExpression {
        let expression = self.bind_expression(&syntax.value);
        let name = syntax.identifier.value.as_str();

        let variable = match self.scopes.lookup_variable(self.scope, name).cloned() {
            Some(variable) => variable,
            None => {
                // First assignment declares the variable
                let variable = VariableSymbol::new(name, expression.ty(), false);
                self.scopes.declare_variable(self.scope, variable.clone());
                trace!(variable = name, ty = %expression.ty(), "declared variable on assignment");
                variable
            }
        };

        if variable.is_read_only() {
            self.diagnostics.report_cannot_assign(syntax.equals.span, name);
        }

        if expression.ty() != TypeSymbol::Error && variable.ty() != TypeSymbol::Error && expression.ty() != variable.ty()
        {
            self.diagnostics
                .report_cannot_convert(syntax.value.span(), expression.ty(), variable.ty());
            return BoundExpression::Error;
        }

        BoundExpression::Assignment {
            variable,
            expression: Box::new(expression),
        }
    }

    fn bind_unary_expression(&mut self, syntax: &UnaryExpr) -> BoundExpression {
        let operand = self.bind_expression(&syntax.operand);
        if operand.ty() == TypeSymbol::Error {
            return BoundExpression::Error;
        }

        match BoundUnaryOperator::bind(syntax.operator.kind, operand.ty()) {
            Some(operator) => BoundExpression::Unary {
                operator,
                operand: Box::new(operand),
            },
            None => {
                self.diagnostics.report_undefined_unary_operator(
                    syntax.operator.span,
                    &syntax.operator.value,
                    operand.ty(),
                );
                operand
            }
        }
    }

    fn bind_binary_expression(&mut self, syntax: &BinaryExpr) -> BoundExpression {
        let left = self.bind_expression(&syntax.left);
        let right = self.bind_expression(&syntax.right);
        if left.ty() == TypeSymbol::Error || right.ty() == TypeSymbol::Error {
            return BoundExpression::Error;
        }

        match BoundBinaryOperator::bind(syntax.operator.kind, left.ty(), right.ty()) {
            Some(operator) => BoundExpression::Binary {
                left: Box::new(left),
                operator,
                right: Box::new(right),
            },
            None => {
                self.diagnostics.report_undefined_binary_operator(
                    syntax.operator.span,
                    &syntax.operator.value,
                    left.ty(),
                    right.ty(),
                );
                left
            }
        }
    }

    fn bind_call_expression(&mut self, syntax: &CallExpr) -> BoundExpression {
        let arguments: Vec<BoundExpression> = syntax.arguments.iter().map(|a| self.bind_expression(a)).collect();
        let name = syntax.identifier.value.as_str();

        let Some(function) = self.scopes.lookup_function(self.scope, name).cloned() else {
            self.diagnostics.report_undefined_function(syntax.identifier.span, name);
            return BoundExpression::Error;
        };

        let expected = function.parameters().len();
        if arguments.len() != expected {
            let span = syntax.identifier.span.to(syntax.close.span);
            self.diagnostics
                .report_wrong_argument_count(span, name, expected, arguments.len());
            return BoundExpression::Error;
        }

        let mut has_errors = false;
        for ((argument, syntax), parameter) in arguments.iter().zip(&syntax.arguments).zip(function.parameters()) {
            if argument.ty() == TypeSymbol::Error {
                has_errors = true;
            } else if argument.ty() != parameter.ty {
                self.diagnostics.report_cannot_convert(syntax.span(), argument.ty(), parameter.ty);
                has_errors = true;
            }
        }

        if has_errors {
            return BoundExpression::Error;
        }

        BoundExpression::Call { function, arguments }
    }
}

/// Builds the scope chain a new submission binds in: the root scope with the
/// built-in functions, then one scope per earlier submission, oldest first.
fn create_parent_scopes(previous: Option<&Arc<BoundGlobalScope>>) -> (ScopeTree, ScopeId) {
    let mut chain = vec![];
    let mut current = previous;
    while let Some(global) = current {
        chain.push(global);
        current = global.previous.as_ref();
    }

    let mut scopes = ScopeTree::new();
    let root = scopes.root();
    for function in builtins::all() {
        scopes.declare_function(root, function);
    }

    let mut parent = root;
    for global in chain.iter().rev() {
        let scope = scopes.push(parent);
        for variable in &global.variables {
            scopes.declare_variable(scope, variable.clone());
        }
        parent = scope;
    }

    (scopes, parent)
}

/// Binds the single top-level statement of `unit` in a fresh global scope
/// chained onto `previous`.
#[tracing::instrument(level = "debug", skip_all, fields(chained = previous.is_some()))]
pub fn bind_global_scope(previous: Option<&Arc<BoundGlobalScope>>, unit: &CompilationUnit) -> BoundGlobalScope {
    let (mut scopes, parent) = create_parent_scopes(previous);
    let scope = scopes.push(parent);

    let mut binder = Binder::new(scopes, scope);
    let statement = binder.bind_statement(&unit.statement);
    let variables = binder.scopes.declared_variables(scope);

    debug!(
        variables = variables.len(),
        diagnostics = binder.diagnostics.len(),
        "bound global scope"
    );

    BoundGlobalScope {
        previous: previous.cloned(),
        diagnostics: binder.diagnostics,
        variables,
        statement,
    }
}
