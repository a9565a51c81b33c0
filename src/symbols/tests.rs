use std::collections::HashMap;

use super::builtins;
use super::symbols::{LabelSymbol, Symbol, SymbolKind, TypeSymbol, VariableSymbol};

#[test]
fn test_type_names() {
    assert_eq!(TypeSymbol::Error.to_string(), "?");
    assert_eq!(TypeSymbol::Void.to_string(), "void");
    assert_eq!(TypeSymbol::Bool.to_string(), "bool");
    assert_eq!(TypeSymbol::Int.to_string(), "int");
    assert_eq!(TypeSymbol::String.to_string(), "string");
}

#[test]
fn test_variables_compare_by_identity() {
    let outer = VariableSymbol::new("x", TypeSymbol::Int, false);
    let inner = VariableSymbol::new("x", TypeSymbol::Int, false);

    assert_ne!(outer, inner);
    assert_eq!(outer, outer.clone());

    let mut store = HashMap::new();
    store.insert(outer.clone(), 1);
    store.insert(inner.clone(), 2);

    assert_eq!(store.len(), 2);
    assert_eq!(store[&outer], 1);
    assert_eq!(store[&inner], 2);
}

#[test]
fn test_labels_compare_by_identity() {
    let first = LabelSymbol::new("Label1");
    let second = LabelSymbol::new("Label1");

    assert_ne!(first, second);
    assert_eq!(first, first.clone());
    assert_eq!(first.name(), second.name());
}

#[test]
fn test_builtin_signatures() {
    let print = builtins::PRINT.clone();
    assert_eq!(print.to_string(), "print(text: string): void");
    assert_eq!(builtins::INPUT.to_string(), "input(): string");
    assert_eq!(builtins::RND.to_string(), "rnd(max: int): int");

    // Statics hand out the same identity every time
    assert_eq!(print, builtins::PRINT.clone());
    assert_ne!(print, builtins::INPUT.clone());
    assert_eq!(builtins::all().len(), 3);
}

#[test]
fn test_symbol_kinds() {
    let variable = Symbol::Variable(VariableSymbol::new("count", TypeSymbol::Int, true));
    let function = Symbol::Function(builtins::RND.clone());
    let parameter = Symbol::Parameter(builtins::RND.parameters()[0].clone());
    let ty = Symbol::Type(TypeSymbol::Bool);

    assert_eq!(variable.kind(), SymbolKind::Variable);
    assert_eq!(function.kind(), SymbolKind::Function);
    assert_eq!(parameter.kind(), SymbolKind::Parameter);
    assert_eq!(ty.kind(), SymbolKind::Type);

    assert_eq!(variable.name(), "count");
    assert_eq!(function.name(), "rnd");
    assert_eq!(parameter.name(), "max");
    assert_eq!(ty.name(), "bool");
    assert_eq!(variable.to_string(), "count: int");
}
