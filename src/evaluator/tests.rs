use std::collections::VecDeque;

use pretty_assertions::assert_eq;

use super::{
    console::Console,
    evaluator::{evaluate_with, Evaluator},
};
use crate::{
    ast::ast::SyntaxTree,
    binding::{
        binder::bind_global_scope,
        bound_tree::{BoundBlockStatement, BoundExpression, BoundStatement},
    },
    errors::errors::EvaluationError,
    lowering::lowerer::lower,
    symbols::symbols::{LabelSymbol, TypeSymbol, VariableSymbol},
    value::{Value, VariableStore},
};

/// Console that records output and replays scripted input.
#[derive(Default)]
struct ScriptedConsole {
    output: Vec<String>,
    input: VecDeque<String>,
}

impl Console for ScriptedConsole {
    fn print(&mut self, text: &str) {
        self.output.push(text.to_string());
    }

    fn input(&mut self) -> String {
        self.input.pop_front().unwrap_or_default()
    }
}

fn compile(source: &str) -> BoundBlockStatement {
    let tree = SyntaxTree::parse(source);
    assert!(tree.diagnostics.is_empty(), "{:?}", tree.diagnostics);

    let global = bind_global_scope(None, &tree.root);
    assert!(global.diagnostics.is_empty(), "{:?}", global.diagnostics);

    lower(global.statement)
}

fn run_with(source: &str, console: &mut ScriptedConsole) -> Result<Value, EvaluationError> {
    let program = compile(source);
    let mut variables = VariableStore::new();
    evaluate_with(&program, &mut variables, console)
}

fn run(source: &str) -> Value {
    run_with(source, &mut ScriptedConsole::default()).unwrap()
}

#[test]
fn test_arithmetic() {
    assert_eq!(run("1 + 2 * 3"), Value::Int(7));
    assert_eq!(run("(1 + 2) * 3"), Value::Int(9));
    assert_eq!(run("10 / 3"), Value::Int(3));
    assert_eq!(run("-7 / 2"), Value::Int(-3));
    assert_eq!(run("+5 - -5"), Value::Int(10));
    assert_eq!(run("~0"), Value::Int(-1));
}

#[test]
fn test_integer_overflow_wraps() {
    assert_eq!(run("2147483647 + 1"), Value::Int(i32::MIN));
    assert_eq!(run("-2147483647 - 2"), Value::Int(i32::MAX));
}

#[test]
fn test_division_faults() {
    let mut console = ScriptedConsole::default();
    assert_eq!(run_with("1 / 0", &mut console), Err(EvaluationError::DivisionByZero));

    let result = run_with("(-2147483647 - 1) / -1", &mut console);
    assert!(matches!(result, Err(EvaluationError::Overflow { .. })));
}

#[test]
fn test_comparison_and_equality() {
    assert_eq!(run("12 == 3"), Value::Bool(false));
    assert_eq!(run("3 != 4"), Value::Bool(true));
    assert_eq!(run("2 <= 2"), Value::Bool(true));
    assert_eq!(run("2 > 3"), Value::Bool(false));
    assert_eq!(run("\"ab\" == \"ab\""), Value::Bool(true));
    assert_eq!(run("true != false"), Value::Bool(true));
}

#[test]
fn test_bitwise_duality() {
    assert_eq!(run("1 & 1"), Value::Int(1));
    assert_eq!(run("1 & 2"), Value::Int(0));
    assert_eq!(run("1 | 2"), Value::Int(3));
    assert_eq!(run("3 ^ 1"), Value::Int(2));
    assert_eq!(run("true & false"), Value::Bool(false));
    assert_eq!(run("true | false"), Value::Bool(true));
    assert_eq!(run("true ^ true"), Value::Bool(false));
}

#[test]
fn test_logical_operators_short_circuit() {
    assert_eq!(run("{ var a = false false && (a = true) a }"), Value::Bool(false));
    assert_eq!(run("{ var a = false true || (a = true) a }"), Value::Bool(false));
    assert_eq!(run("{ var a = false true && (a = true) a }"), Value::Bool(true));
    assert_eq!(run("!true || !false"), Value::Bool(true));
}

#[test]
fn test_assignment_is_an_expression() {
    assert_eq!(run("(a = 10) * a"), Value::Int(100));
    assert_eq!(run("{ var a = 0 var b = 0 a = b = 7 a + b }"), Value::Int(14));
}

#[test]
fn test_last_value_wins() {
    assert_eq!(run("{ var a = 5 }"), Value::Int(5));
    assert_eq!(run("{ 1 2 3 }"), Value::Int(3));
    assert_eq!(run("{ }"), Value::Void);
}

#[test]
fn test_control_flow() {
    assert_eq!(run("{ var x = 0 if x == 0 x = 10 else x = 20 x }"), Value::Int(10));
    assert_eq!(run("{ var x = 1 if x == 0 x = 10 else x = 20 x }"), Value::Int(20));
    assert_eq!(run("{ var x = 1 if x == 0 x = 10 x }"), Value::Int(1));
    assert_eq!(
        run("{ var i = 0 var sum = 0 while i < 5 { i = i + 1 sum = sum + i } sum }"),
        Value::Int(15)
    );
    assert_eq!(run("{ var n = 0 while false n = 1 n }"), Value::Int(0));
}

#[test]
fn test_for_loop_is_inclusive() {
    assert_eq!(run("{ var result = 0 for i = 1 to 5 result = result + i result }"), Value::Int(15));
    assert_eq!(run("{ var result = 0 for i = 5 to 1 result = result + i result }"), Value::Int(0));
    assert_eq!(
        run("{ var result = 0 for i = 1 to 3 for j = 1 to 3 result = result + i * j result }"),
        Value::Int(36)
    );
}

#[test]
fn test_variables_written_to_store() {
    let program = compile("{ var a = 1 a = a + 41 }");
    let mut variables = VariableStore::new();
    let mut console = ScriptedConsole::default();

    evaluate_with(&program, &mut variables, &mut console).unwrap();

    // The block's own scope holds `a`; it still lands in the store
    assert_eq!(variables.len(), 1);
    assert_eq!(variables.values().next(), Some(&Value::Int(42)));
}

#[test]
fn test_shadowed_variables_have_separate_slots() {
    assert_eq!(run("{ var a = 1 { var a = 2 } a }"), Value::Int(1));
}

#[test]
fn test_print_and_input() {
    let mut console = ScriptedConsole {
        input: VecDeque::from(vec![String::from("Ada")]),
        ..ScriptedConsole::default()
    };

    let value = run_with("{ var name = input() print(name) print(\"bye\") }", &mut console).unwrap();

    assert_eq!(value, Value::Void);
    assert_eq!(console.output, vec!["Ada", "bye"]);
}

#[test]
fn test_rnd_stays_in_range() {
    for _ in 0..50 {
        let value = run("rnd(6)").as_int().unwrap();
        assert!((0..6).contains(&value));
    }

    assert_eq!(run("rnd(0)"), Value::Int(0));
    assert_eq!(run("rnd(-3)"), Value::Int(0));
}

#[test]
fn test_unresolved_label_is_a_fault() {
    let program = BoundBlockStatement::new(vec![BoundStatement::Goto(LabelSymbol::new("Label1"))]);
    let mut variables = VariableStore::new();
    let mut console = ScriptedConsole::default();

    let result = Evaluator::new(&program, &mut variables, &mut console).evaluate();
    assert_eq!(
        result,
        Err(EvaluationError::UnresolvedLabel {
            label: String::from("Label1")
        })
    );
}

#[test]
fn test_label_with_same_name_is_not_the_target() {
    let program = BoundBlockStatement::new(vec![
        BoundStatement::Goto(LabelSymbol::new("end")),
        BoundStatement::Label(LabelSymbol::new("end")),
    ]);
    let mut variables = VariableStore::new();
    let mut console = ScriptedConsole::default();

    let result = evaluate_with(&program, &mut variables, &mut console);
    assert!(matches!(result, Err(EvaluationError::UnresolvedLabel { .. })));
}

#[test]
fn test_missing_variable_is_a_fault() {
    let variable = VariableSymbol::new("ghost", TypeSymbol::Int, false);
    let program = BoundBlockStatement::new(vec![BoundStatement::Expression(BoundExpression::Variable { variable })]);
    let mut variables = VariableStore::new();
    let mut console = ScriptedConsole::default();

    let result = evaluate_with(&program, &mut variables, &mut console);
    assert_eq!(
        result,
        Err(EvaluationError::MissingVariable {
            name: String::from("ghost")
        })
    );
}

#[test]
fn test_unlowered_statement_is_a_fault() {
    let program = BoundBlockStatement::new(vec![BoundStatement::While {
        condition: BoundExpression::Literal { value: Value::Bool(false) },
        body: Box::new(BoundStatement::Block(BoundBlockStatement::default())),
    }]);
    let mut variables = VariableStore::new();
    let mut console = ScriptedConsole::default();

    let result = evaluate_with(&program, &mut variables, &mut console);
    assert_eq!(result, Err(EvaluationError::UnloweredStatement { statement: "While" }));
}
