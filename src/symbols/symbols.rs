use std::{
    fmt::{Debug, Display},
    hash::{Hash, Hasher},
    sync::Arc,
};

/// The closed set of static types.
///
/// `Error` marks an expression that failed to bind. It propagates without
/// producing further diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeSymbol {
    Error,
    Void,
    Bool,
    Int,
    String,
}

impl TypeSymbol {
    pub fn name(&self) -> &'static str {
        match self {
            TypeSymbol::Error => "?",
            TypeSymbol::Void => "void",
            TypeSymbol::Bool => "bool",
            TypeSymbol::Int => "int",
            TypeSymbol::String => "string",
        }
    }
}

impl Display for TypeSymbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug)]
struct VariableData {
    name: String,
    ty: TypeSymbol,
    is_read_only: bool,
}

/// A declared variable.
///
/// Cloning shares the declaration. Two symbols are equal only if they come
/// from the same declaration, so same-named variables in different scopes
/// occupy different slots in the variable store.
#[derive(Clone)]
pub struct VariableSymbol(Arc<VariableData>);

impl VariableSymbol {
    pub fn new(name: impl Into<String>, ty: TypeSymbol, is_read_only: bool) -> Self {
        VariableSymbol(Arc::new(VariableData {
            name: name.into(),
            ty,
            is_read_only,
        }))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn ty(&self) -> TypeSymbol {
        self.0.ty
    }

    pub fn is_read_only(&self) -> bool {
        self.0.is_read_only
    }
}

impl PartialEq for VariableSymbol {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for VariableSymbol {}

impl Hash for VariableSymbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Arc::as_ptr(&self.0).hash(state);
    }
}

impl Debug for VariableSymbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.0.name, self.0.ty)
    }
}

impl Display for VariableSymbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSymbol {
    pub name: String,
    pub ty: TypeSymbol,
}

impl ParameterSymbol {
    pub fn new(name: impl Into<String>, ty: TypeSymbol) -> Self {
        ParameterSymbol { name: name.into(), ty }
    }
}

#[derive(Debug)]
struct FunctionData {
    name: String,
    parameters: Vec<ParameterSymbol>,
    return_type: TypeSymbol,
}

/// A callable function signature. Compared by identity like variables.
#[derive(Clone)]
pub struct FunctionSymbol(Arc<FunctionData>);

impl FunctionSymbol {
    pub fn new(name: impl Into<String>, parameters: Vec<ParameterSymbol>, return_type: TypeSymbol) -> Self {
        FunctionSymbol(Arc::new(FunctionData {
            name: name.into(),
            parameters,
            return_type,
        }))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn parameters(&self) -> &[ParameterSymbol] {
        &self.0.parameters
    }

    pub fn return_type(&self) -> TypeSymbol {
        self.0.return_type
    }
}

impl PartialEq for FunctionSymbol {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for FunctionSymbol {}

impl Hash for FunctionSymbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Arc::as_ptr(&self.0).hash(state);
    }
}

impl Debug for FunctionSymbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

impl Display for FunctionSymbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parameters = self
            .0
            .parameters
            .iter()
            .map(|p| format!("{}: {}", p.name, p.ty))
            .collect::<Vec<String>>()
            .join(", ");

        write!(f, "{}({}): {}", self.0.name, parameters, self.0.return_type)
    }
}

/// A jump target. The name is for display only; identity decides equality.
#[derive(Clone)]
pub struct LabelSymbol(Arc<str>);

impl LabelSymbol {
    pub fn new(name: impl AsRef<str>) -> Self {
        LabelSymbol(Arc::from(name.as_ref()))
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl PartialEq for LabelSymbol {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for LabelSymbol {}

impl Hash for LabelSymbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Thin pointer, the length is irrelevant to identity
        Arc::as_ptr(&self.0).cast::<u8>().hash(state);
    }
}

impl Debug for LabelSymbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Display for LabelSymbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Variable,
    Function,
    Parameter,
    Type,
}

/// Any named entity a scope or global scope can hand out for inspection.
#[derive(Debug, Clone, PartialEq)]
pub enum Symbol {
    Variable(VariableSymbol),
    Function(FunctionSymbol),
    Parameter(ParameterSymbol),
    Type(TypeSymbol),
}

impl Symbol {
    pub fn kind(&self) -> SymbolKind {
        match self {
            Symbol::Variable(_) => SymbolKind::Variable,
            Symbol::Function(_) => SymbolKind::Function,
            Symbol::Parameter(_) => SymbolKind::Parameter,
            Symbol::Type(_) => SymbolKind::Type,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Symbol::Variable(variable) => variable.name(),
            Symbol::Function(function) => function.name(),
            Symbol::Parameter(parameter) => &parameter.name,
            Symbol::Type(ty) => ty.name(),
        }
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Symbol::Variable(variable) => write!(f, "{:?}", variable),
            Symbol::Function(function) => write!(f, "{}", function),
            Symbol::Parameter(parameter) => write!(f, "{}: {}", parameter.name, parameter.ty),
            Symbol::Type(ty) => write!(f, "{}", ty),
        }
    }
}
