use lazy_static::lazy_static;

use super::symbols::{FunctionSymbol, ParameterSymbol, TypeSymbol};

lazy_static! {
    pub static ref PRINT: FunctionSymbol = FunctionSymbol::new(
        "print",
        vec![ParameterSymbol::new("text", TypeSymbol::String)],
        TypeSymbol::Void
    );
    pub static ref INPUT: FunctionSymbol = FunctionSymbol::new("input", vec![], TypeSymbol::String);
    pub static ref RND: FunctionSymbol = FunctionSymbol::new(
        "rnd",
        vec![ParameterSymbol::new("max", TypeSymbol::Int)],
        TypeSymbol::Int
    );
}

/// Every built-in function, in declaration order.
pub fn all() -> Vec<FunctionSymbol> {
    vec![PRINT.clone(), INPUT.clone(), RND.clone()]
}
