use std::sync::{Arc, OnceLock};

use tracing::debug;

use crate::{
    ast::ast::SyntaxTree,
    binding::{
        binder::{bind_global_scope, BoundGlobalScope},
        bound_tree::BoundBlockStatement,
    },
    errors::errors::{Diagnostic, EvaluationError},
    evaluator::{console::Console, console::StdConsole, evaluator},
    lowering::lowerer::lower,
    value::{Value, VariableStore},
};

/// Outcome of evaluating a submission.
///
/// `value` is `None` exactly when `diagnostics` is non-empty.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationResult {
    pub diagnostics: Vec<Diagnostic>,
    pub value: Option<Value>,
}

#[derive(Debug)]
pub struct Compilation {
    pub previous: Option<Arc<Compilation>>,
    pub syntax_tree: SyntaxTree,
    global_scope: OnceLock<Arc<BoundGlobalScope>>,
}

impl Compilation {
    pub fn new(syntax_tree: SyntaxTree) -> Arc<Compilation> {
        Arc::new(Compilation::with_previous(None, syntax_tree))
    }

    fn with_previous(previous: Option<Arc<Compilation>>, syntax_tree: SyntaxTree) -> Compilation {
        Compilation {
            previous,
            syntax_tree,
            global_scope: OnceLock::new(),
        }
    }

    /// Starts the next submission of a session. Names declared by this
    /// compilation (and its predecessors) are visible to `syntax_tree`.
    pub fn continue_with(self: &Arc<Self>, syntax_tree: SyntaxTree) -> Arc<Compilation> {
        Arc::new(Compilation::with_previous(Some(Arc::clone(self)), syntax_tree))
    }

    /// The bound form of this submission.
    ///
    /// Concurrent first callers may each bind the tree; the first result to be
    /// published is kept and every caller gets that one.
    pub fn global_scope(&self) -> &Arc<BoundGlobalScope> {
        if let Some(scope) = self.global_scope.get() {
            return scope;
        }

        let previous = self.previous.as_deref().map(Compilation::global_scope);
        let bound = Arc::new(bind_global_scope(previous, &self.syntax_tree.root));

        self.global_scope.get_or_init(move || bound)
    }

    /// Syntax diagnostics followed by binding diagnostics.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.syntax_tree
            .diagnostics
            .iter()
            .chain(self.global_scope().diagnostics.iter())
            .cloned()
            .collect()
    }

    pub fn lowered_program(&self) -> BoundBlockStatement {
        lower(self.global_scope().statement.clone())
    }

    pub fn evaluate(&self, variables: &mut VariableStore) -> Result<EvaluationResult, EvaluationError> {
        let mut console = StdConsole;
        self.evaluate_with(variables, &mut console)
    }

    /// Evaluates the submission unless it has diagnostics, in which case the
    /// store is left untouched and no value is produced.
    pub fn evaluate_with(
        &self,
        variables: &mut VariableStore,
        console: &mut dyn Console,
    ) -> Result<EvaluationResult, EvaluationError> {
        let diagnostics = self.diagnostics();
        if !diagnostics.is_empty() {
            debug!(diagnostics = diagnostics.len(), "skipping evaluation");
            return Ok(EvaluationResult {
                diagnostics,
                value: None,
            });
        }

        let program = self.lowered_program();
        let value = evaluator::evaluate_with(&program, variables, console)?;

        Ok(EvaluationResult {
            diagnostics: vec![],
            value: Some(value),
        })
    }
}
