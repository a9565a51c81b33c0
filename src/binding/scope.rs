use std::collections::HashMap;

use crate::symbols::symbols::{FunctionSymbol, VariableSymbol};

/// Index of a scope inside a `ScopeTree`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(usize);

/// One symbol table. Both maps are created on first declaration since most
/// scopes never declare a function and many declare nothing at all.
#[derive(Debug, Default)]
pub struct BoundScope {
    parent: Option<ScopeId>,
    variables: Option<HashMap<String, VariableSymbol>>,
    functions: Option<HashMap<String, FunctionSymbol>>,
}

impl BoundScope {
    pub fn parent(&self) -> Option<ScopeId> {
        self.parent
    }
}

/// Arena of scopes linked to their parents by index.
///
/// Scopes are created top-down and discarded bottom-up, so a child is always
/// stored after its parent and popping the last scope never orphans another.
#[derive(Debug)]
pub struct ScopeTree {
    scopes: Vec<BoundScope>,
}

impl Default for ScopeTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeTree {
    /// Creates a tree holding only an empty root scope.
    pub fn new() -> Self {
        ScopeTree {
            scopes: vec![BoundScope::default()],
        }
    }

    pub fn root(&self) -> ScopeId {
        ScopeId(0)
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    pub fn get(&self, scope: ScopeId) -> Option<&BoundScope> {
        self.scopes.get(scope.0)
    }

    /// Opens a new scope nested inside `parent`.
    pub fn push(&mut self, parent: ScopeId) -> ScopeId {
        self.scopes.push(BoundScope {
            parent: Some(parent),
            ..BoundScope::default()
        });

        ScopeId(self.scopes.len() - 1)
    }

    /// Discards the innermost scope and returns its parent. The root is never
    /// popped.
    pub fn pop(&mut self) -> Option<ScopeId> {
        if self.scopes.len() <= 1 {
            return None;
        }

        self.scopes.pop().and_then(|scope| scope.parent)
    }

    /// Declares `variable` in `scope`. Returns false if the name is already
    /// taken in that very scope; ancestors are not consulted.
    pub fn declare_variable(&mut self, scope: ScopeId, variable: VariableSymbol) -> bool {
        let Some(scope) = self.scopes.get_mut(scope.0) else {
            return false;
        };

        let variables = scope.variables.get_or_insert_with(HashMap::new);
        if variables.contains_key(variable.name()) {
            return false;
        }

        variables.insert(variable.name().to_string(), variable);
        true
    }

    pub fn declare_function(&mut self, scope: ScopeId, function: FunctionSymbol) -> bool {
        let Some(scope) = self.scopes.get_mut(scope.0) else {
            return false;
        };

        let functions = scope.functions.get_or_insert_with(HashMap::new);
        if functions.contains_key(function.name()) {
            return false;
        }

        functions.insert(function.name().to_string(), function);
        true
    }

    /// Nearest declaration of `name`, searching outwards from `scope`.
    pub fn lookup_variable(&self, scope: ScopeId, name: &str) -> Option<&VariableSymbol> {
        let mut current = Some(scope);

        while let Some(id) = current {
            let scope = self.scopes.get(id.0)?;
            if let Some(variable) = scope.variables.as_ref().and_then(|v| v.get(name)) {
                return Some(variable);
            }
            current = scope.parent;
        }

        None
    }

    pub fn lookup_function(&self, scope: ScopeId, name: &str) -> Option<&FunctionSymbol> {
        let mut current = Some(scope);

        while let Some(id) = current {
            let scope = self.scopes.get(id.0)?;
            if let Some(function) = scope.functions.as_ref().and_then(|f| f.get(name)) {
                return Some(function);
            }
            current = scope.parent;
        }

        None
    }

    /// Variables declared directly in `scope`, in no particular order.
    pub fn declared_variables(&self, scope: ScopeId) -> Vec<VariableSymbol> {
        self.scopes
            .get(scope.0)
            .and_then(|scope| scope.variables.as_ref())
            .map(|variables| variables.values().cloned().collect())
            .unwrap_or_default()
    }

    pub fn declared_functions(&self, scope: ScopeId) -> Vec<FunctionSymbol> {
        self.scopes
            .get(scope.0)
            .and_then(|scope| scope.functions.as_ref())
            .map(|functions| functions.values().cloned().collect())
            .unwrap_or_default()
    }
}
