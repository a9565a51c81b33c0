use std::{
    io::{self, BufRead, Write},
    sync::Arc,
};

use quill::{
    ast::ast::SyntaxTree,
    compilation::compilation::Compilation,
    errors::errors::Diagnostic,
    get_line_at_position,
    value::{Value, VariableStore},
};
use tracing::{debug, error};

fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    // Silent unless RUST_LOG is set
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_level(true).with_writer(io::stderr))
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn main() {
    init_tracing();

    let mut repl = Repl::default();
    repl.run(io::stdin().lock());
}

#[derive(Default)]
struct Repl {
    previous: Option<Arc<Compilation>>,
    variables: VariableStore,
    show_tree: bool,
    show_program: bool,
}

enum Command {
    Continue,
    Exit,
}

impl Repl {
    fn run(&mut self, input: impl BufRead) {
        let mut lines = input.lines();
        let mut text = String::new();

        loop {
            prompt(if text.is_empty() { "» " } else { "· " });

            let line = match lines.next() {
                Some(Ok(line)) => line,
                Some(Err(err)) => {
                    error!("failed to read input: {}", err);
                    break;
                }
                None => break,
            };

            let is_blank = line.trim().is_empty();

            if text.is_empty() {
                if is_blank {
                    continue;
                }

                if line.trim_start().starts_with('#') {
                    match self.run_meta_command(line.trim()) {
                        Command::Continue => continue,
                        Command::Exit => break,
                    }
                }
            }

            text.push_str(&line);
            text.push('\n');

            let tree = SyntaxTree::parse(&text);

            // Keep reading while the only problem is running out of input
            if !is_blank && tree.is_incomplete() {
                continue;
            }

            self.submit(tree);
            text.clear();
        }
    }

    fn run_meta_command(&mut self, command: &str) -> Command {
        match command {
            "#showTree" => {
                self.show_tree = !self.show_tree;
                println!("{}", if self.show_tree { "Showing parse trees." } else { "Not showing parse trees." });
            }
            "#showProgram" => {
                self.show_program = !self.show_program;
                println!("{}", if self.show_program { "Showing bound tree." } else { "Not showing bound tree." });
            }
            "#cls" => {
                print!("\x1B[2J\x1B[1;1H");
                flush();
            }
            "#reset" => {
                self.previous = None;
                self.variables.clear();
                println!("Session reset.");
            }
            "#exit" => return Command::Exit,
            _ => println!("Invalid command {}.", command),
        }

        Command::Continue
    }

    fn submit(&mut self, tree: SyntaxTree) {
        let compilation = match &self.previous {
            Some(previous) => previous.continue_with(tree),
            None => Compilation::new(tree),
        };

        if self.show_tree {
            print!("{}", compilation.syntax_tree.print_tree());
        }

        if self.show_program {
            print!("{}", compilation.lowered_program());
        }

        match compilation.evaluate(&mut self.variables) {
            Ok(result) if result.diagnostics.is_empty() => {
                if let Some(value) = result.value.filter(|value| *value != Value::Void) {
                    println!("{}", value);
                }
                self.previous = Some(compilation);
            }
            Ok(result) => {
                debug!(diagnostics = result.diagnostics.len(), "submission rejected");
                for diagnostic in &result.diagnostics {
                    display_error(diagnostic, &compilation.syntax_tree.text);
                }
            }
            Err(err) => {
                error!("evaluation aborted: {}", err);
                println!("Internal error: {}", err);
            }
        }
    }
}

fn prompt(text: &str) {
    print!("{}", text);
    flush();
}

fn flush() {
    if let Err(err) = io::stdout().flush() {
        debug!("failed to flush stdout: {}", err);
    }
}

fn display_error(diagnostic: &Diagnostic, text: &str) {
    /*
        Error: UndefinedName (Variable 'x' doesn't exist.)
          |
        2 | x + 1
          | ^
    */

    let span = diagnostic.get_span();
    let (line, line_text, line_pos) = get_line_at_position(text, span.start);

    let line_str = line.to_string();
    let padding = line_str.len() + 2;

    println!("Error: {} ({})", diagnostic.get_error_name(), diagnostic);
    println!("{:>padding$}", "|");

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    println!("{} | {}", line_str, line_text_removed.trim_end());

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;
    let underline = span.length().max(1);

    println!("{:>padding$} {:->arrows$}{}", "|", "^", "^".repeat(underline - 1));
}

fn remove_starting_whitespace(string: &str) -> (&str, usize) {
    let trimmed = string.trim_start_matches([' ', '\t']);
    (trimmed, string.len() - trimmed.len())
}
