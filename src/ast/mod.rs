/// AST (Abstract Syntax Tree) module
/// Contains the syntax tree produced by the parser
///
/// Submodules:
/// - ast: `SyntaxTree`, `CompilationUnit` and generic node traversal
/// - expressions: expression node definitions
/// - statements: statement node definitions
pub mod ast;
pub mod expressions;
pub mod statements;
