//! The `lex`, `parse` and `check` subcommands.
//!
//! Each command writes its report to `out` and records diagnostics in the
//! session; the caller decides how to emit them.

use std::fmt::Write as _;
use std::io::{self, Write};
use std::path::Path;
use std::str::FromStr;

use kiln_ir::{Declaration, Document, Expression, Statement, Type};
use kiln_parse::Item;
use kiln_stack::ensure_sufficient_stack;

use crate::session::Session;

/// A driver subcommand.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Command {
    /// Print the pre-scanned items.
    Lex,
    /// Print an outline of the parsed document.
    Parse,
    /// Parse and run the semantic checks.
    Check,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lex" => Ok(Command::Lex),
            "parse" => Ok(Command::Parse),
            "check" => Ok(Command::Check),
            other => Err(format!("unknown command `{other}`")),
        }
    }
}

/// Run `command` on `path`. Returns whether it succeeded.
pub fn run(
    command: Command,
    session: &mut Session,
    path: &Path,
    out: &mut impl Write,
) -> io::Result<bool> {
    match command {
        Command::Lex => {
            let Some(items) = session.load(path).and_then(|file| session.scan(&file)) else {
                return Ok(false);
            };
            writeln!(out, "Items for '{}' ({} items):", path.display(), items.len())?;
            for item in &items {
                writeln!(out, "  {}", describe_item(item))?;
            }
        }
        Command::Parse => {
            let Some(document) = session.load(path).and_then(|file| session.parse(&file)) else {
                return Ok(false);
            };
            out.write_all(outline(&document).as_bytes())?;
        }
        Command::Check => {
            let Some(document) = session.compile(path) else {
                return Ok(false);
            };
            let functions = document.functions().count();
            writeln!(
                out,
                "OK: {} ({functions} function{})",
                path.display(),
                if functions == 1 { "" } else { "s" }
            )?;
        }
    }
    Ok(true)
}

fn describe_item(item: &Item) -> String {
    let position = item.context().position().unwrap_or_default();
    match item {
        Item::Terminal(terminal) => {
            format!("{position:<14} {:<12} `{}`", terminal.kind.name(), terminal.value)
        }
        Item::Declaration(declaration) => {
            let name = match declaration {
                Declaration::Include(include) => &include.head.name.value,
                Declaration::Inline(inline) => &inline.head.name.value,
                Declaration::Function(function) => &function.keyword.value,
            };
            format!("{position:<14} {:<12} #{name}", "Directive")
        }
    }
}

/// One line per declaration and statement; infix expressions are fully
/// parenthesized so the parsed grouping is visible.
pub fn outline(document: &Document) -> String {
    let mut out = String::new();
    for declaration in &document.declarations {
        match declaration {
            Declaration::Include(include) => {
                let _ = writeln!(
                    out,
                    "include {}{}{}",
                    include.quote.opener(),
                    include.path.value,
                    include.quote.closer()
                );
            }
            Declaration::Inline(inline) => {
                let lines = inline.body.as_ref().map_or(0, |b| b.context.spans().len());
                let _ = writeln!(out, "inline {} ({lines} lines)", inline.tag.value);
            }
            Declaration::Function(function) => {
                let arguments: Vec<String> = function
                    .arguments
                    .iter()
                    .map(|a| format!("{} {}", a.name.value, render_type(&a.ty)))
                    .collect();
                let _ = write!(out, "fun {}({})", function.name.value, arguments.join(", "));
                if let Some(returns) = &function.returns {
                    let types: Vec<String> =
                        returns.types.iter().map(|t| render_type(&t.ty)).collect();
                    let _ = write!(out, " ({})", types.join(", "));
                }
                out.push('\n');
                for statement in &function.statements {
                    let Statement::Return(ret) = statement;
                    let values: Vec<String> = ret
                        .values
                        .items
                        .iter()
                        .map(|item| render_expression(&item.expression))
                        .collect();
                    if values.is_empty() {
                        out.push_str("  return\n");
                    } else {
                        let _ = writeln!(out, "  return {}", values.join(", "));
                    }
                }
            }
        }
    }
    out
}

fn render_type(ty: &Type) -> String {
    format!("{}{}", "*".repeat(ty.pointer_depth()), ty.base.value)
}

fn render_expression(expression: &Expression) -> String {
    ensure_sufficient_stack(|| match expression {
        Expression::Terminal(terminal) => terminal.value.clone(),
        Expression::Infix(infix) => format!(
            "({} {} {})",
            render_expression(&infix.left),
            infix.operator.value,
            render_expression(&infix.right)
        ),
    })
}
