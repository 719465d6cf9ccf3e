use super::*;
use kiln_ir::{build, compare_documents, Declaration, Expression, Operator, Statement};
use pretty_assertions::assert_eq;

fn parse_text(text: &str) -> Result<Document, Diagnostic> {
    let file = SourceFile::new("t.kn", text);
    parse(&file, &DirectiveRegistry::with_builtins())
}

fn parsed(text: &str) -> Document {
    parse_text(text).unwrap_or_else(|e| panic!("{e}"))
}

fn failure(text: &str) -> Diagnostic {
    match parse_text(text) {
        Err(diagnostic) => diagnostic,
        Ok(document) => panic!("{text:?} parsed as {document:?}"),
    }
}

fn assert_parses_to(text: &str, expected: Vec<Declaration>) {
    let document = parsed(text);
    if let Err(diagnostic) = compare_documents(&document, &build::document(expected)) {
        panic!("{diagnostic}");
    }
}

/// `fun f() { return <expression> }`
fn returns(expression: Expression) -> Vec<Declaration> {
    vec![build::function(
        "f",
        Vec::new(),
        None,
        vec![build::ret(vec![expression])],
    )]
}

#[test]
fn include_document() {
    assert_parses_to(
        "#include <stdio.h>\n",
        vec![build::include_angle("stdio.h")],
    );
}

#[test]
fn add_function() {
    assert_parses_to(
        "fun add(a int, b int) (int) { return a + b }",
        vec![build::function(
            "add",
            vec![("a", build::ty("int")), ("b", build::ty("int"))],
            Some(vec![build::ty("int")]),
            vec![build::ret(vec![build::infix(
                build::var("a"),
                Operator::Add,
                build::var("b"),
            )])],
        )],
    );
}

#[test]
fn mixed_document() {
    assert_parses_to(
        "#include \"util.h\"\n\
         \n\
         #inline c\n\
         static int x;\n\
         #end-inline c\n\
         \n\
         // entry point\n\
         fun main(argc int, argv **char) (int, int) {\n\
         \x20 return 0, 1,\n\
         \x20 return\n\
         }\n",
        vec![
            build::include_quote("util.h"),
            build::inline("c", Some("static int x;")),
            build::function(
                "main",
                vec![("argc", build::ty("int")), ("argv", build::pointer(2, "char"))],
                Some(vec![build::ty("int"), build::ty("int")]),
                vec![
                    build::ret_trailing(vec![build::num("0"), build::num("1")]),
                    build::ret(Vec::new()),
                ],
            ),
        ],
    );
}

#[test]
fn empty_return_types() {
    assert_parses_to(
        "fun f() () {}",
        vec![build::function("f", Vec::new(), Some(Vec::new()), Vec::new())],
    );
    assert_parses_to(
        "fun f() {}",
        vec![build::function("f", Vec::new(), None, Vec::new())],
    );
}

#[test]
fn additive_chain_is_left_associative() {
    assert_parses_to(
        "fun f() { return a + b + 3 }",
        returns(build::infix(
            build::infix(build::var("a"), Operator::Add, build::var("b")),
            Operator::Add,
            build::num("3"),
        )),
    );
    assert_parses_to(
        "fun f() { return a - b - c }",
        returns(build::infix(
            build::infix(build::var("a"), Operator::Sub, build::var("b")),
            Operator::Sub,
            build::var("c"),
        )),
    );
}

#[test]
fn tighter_operators_bind_first() {
    assert_parses_to(
        "fun f() { return a + b * c }",
        returns(build::infix(
            build::var("a"),
            Operator::Add,
            build::infix(build::var("b"), Operator::Mul, build::var("c")),
        )),
    );
    assert_parses_to(
        "fun f() { return a || b && c == d }",
        returns(build::infix(
            build::var("a"),
            Operator::Or,
            build::infix(
                build::var("b"),
                Operator::And,
                build::infix(build::var("c"), Operator::Eq, build::var("d")),
            ),
        )),
    );
    assert_parses_to(
        "fun f() { return x << 1 + 2 < 0x10 }",
        returns(build::infix(
            build::infix(
                build::var("x"),
                Operator::Shl,
                build::infix(build::num("1"), Operator::Add, build::num("2")),
            ),
            Operator::Lt,
            build::num("0x10"),
        )),
    );
}

#[test]
fn literal_operands() {
    assert_parses_to(
        "fun f() { return 1.5 * 017, \"s\" }",
        vec![build::function(
            "f",
            Vec::new(),
            None,
            vec![build::ret(vec![
                build::infix(
                    Expression::Terminal(build::float("1.5")),
                    Operator::Mul,
                    build::num("017"),
                ),
                Expression::Terminal(build::string("s")),
            ])],
        )],
    );
}

#[test]
fn length_mismatch_on_parsed_tree() {
    let document = parsed("fun f() { return a, b, c }");
    let expected = build::document(vec![build::function(
        "f",
        Vec::new(),
        None,
        vec![build::ret(vec![build::var("a"), build::var("b")])],
    )]);
    let diagnostic = compare_documents(&document, &expected)
        .err()
        .unwrap_or_else(|| panic!("trees unexpectedly compared equal"));
    assert_eq!(
        diagnostic.to_string(),
        "t.kn:1:18: error: expected 2 expressions, got 3\n\
         \x20  1 | fun f() { return a, b, c }\n\
         \x20    |                  ^^ ^^ ^\n"
    );
}

#[test]
fn parsed_trees_equal_their_detached_copies() {
    let document = parsed(
        "#include <a.h>\nfun f(p *int) (int) {\n  return p + 1 * 2, q,\n}\n#inline x\ny\n#end-inline x\n",
    );
    assert_eq!(compare_documents(&document, &document.detached()), Ok(()));
    assert_eq!(document.functions().count(), 1);
}

#[test]
fn missing_punctuation() {
    let diagnostic = failure("fun f a int) {}");
    assert_eq!(diagnostic.code, Some(ErrorCode::E3001));
    assert_eq!(diagnostic.message, "expected `(`, got `a`");
    assert_eq!(diagnostic.position().as_deref(), Some("t.kn:1:7"));

    let diagnostic = failure("fun (a int) {}");
    assert_eq!(diagnostic.message, "expected a function name, got `(`");

    let diagnostic = failure("fun f(a, b int) {}");
    assert_eq!(diagnostic.message, "expected a type, got `,`");
}

#[test]
fn end_of_input_shows_leading_lines() {
    let diagnostic = failure("fun f(a int) {\n  return a\n");
    assert_eq!(diagnostic.code, Some(ErrorCode::E3002));
    assert_eq!(
        diagnostic.to_string(),
        "t.kn:2:11: error: expected a statement or `}`, got end of input\n\
         \x20  1 | fun f(a int) {\n\
         \x20  2 |   return a\\n\n\
         \x20    |           ^^\n"
    );
}

#[test]
fn statement_and_expression_errors() {
    let diagnostic = failure("fun f() { return a + }");
    assert_eq!(diagnostic.code, Some(ErrorCode::E3003));
    assert_eq!(diagnostic.message, "expected an expression, got `}`");

    let diagnostic = failure("fun f() { return a b }");
    assert_eq!(diagnostic.code, Some(ErrorCode::E3001));
    assert_eq!(diagnostic.message, "expected a statement or `}`, got `b`");

    let diagnostic = failure("fun f() { return a = b }");
    assert_eq!(diagnostic.message, "expected a statement or `}`, got `=`");

    let diagnostic = failure("return 1");
    assert_eq!(diagnostic.message, "expected `fun` or a directive, got `return`");
    assert_eq!(diagnostic.position().as_deref(), Some("t.kn:1:1"));
}

#[test]
fn directive_inside_function() {
    let diagnostic = failure("fun f() {\n#include <a.h>\n}\n");
    assert_eq!(diagnostic.code, Some(ErrorCode::E3004));
    assert_eq!(diagnostic.message, "expected a statement or `}`, got a directive");
    assert_eq!(diagnostic.position().as_deref(), Some("t.kn:2:1"));
    assert_eq!(
        diagnostic.note.as_deref(),
        Some("directives are only allowed at the top level")
    );
}

#[test]
fn lower_layers_fail_through_parse() {
    assert_eq!(failure("fun f() { return 08 }").code, Some(ErrorCode::E1003));
    assert_eq!(failure("#include stdio.h").code, Some(ErrorCode::E2004));
    assert_eq!(failure("#inline c\n").code, Some(ErrorCode::E2009));
}

#[test]
fn very_long_operator_chain() {
    let terms = 100_000;
    let text = format!("fun f() {{ return {} }}", vec!["a"; terms].join(" + "));
    let document = parsed(&text);

    let Some(function) = document.functions().next() else {
        panic!("no function parsed");
    };
    let Statement::Return(statement) = &function.statements[0];
    let expression = &statement.values.items[0].expression;
    assert_eq!(expression.terminals().len(), 2 * terms - 1);
    assert_eq!(compare_documents(&document, &document.detached()), Ok(()));

    let span = expression.context();
    assert_eq!(span.position().as_deref(), Some("t.kn:1:18"));
    drop(document);
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    const OPERATORS: &[Operator] = &[
        Operator::Or,
        Operator::And,
        Operator::BitOr,
        Operator::BitXor,
        Operator::BitAnd,
        Operator::Eq,
        Operator::NotEq,
        Operator::Lt,
        Operator::GtEq,
        Operator::Shl,
        Operator::Shr,
        Operator::Add,
        Operator::Sub,
        Operator::Mul,
        Operator::Div,
        Operator::Mod,
    ];

    fn operand() -> impl Strategy<Value = String> {
        prop_oneof!["[a-z][0-9]", "[1-9][0-9]{0,3}"]
    }

    /// In-order operand and operator values.
    fn flatten(expression: &Expression, out: &mut Vec<String>) {
        match expression {
            Expression::Terminal(terminal) => out.push(terminal.value.clone()),
            Expression::Infix(infix) => {
                flatten(&infix.left, out);
                out.push(infix.operator.value.clone());
                flatten(&infix.right, out);
            }
        }
    }

    fn precedence(expression: &Expression) -> Option<u8> {
        match expression {
            Expression::Terminal(_) => None,
            Expression::Infix(infix) => infix.operator.as_operator().and_then(Operator::precedence),
        }
    }

    /// Left children bind at least as tightly as their parent, right
    /// children strictly tighter.
    fn well_nested(expression: &Expression) -> bool {
        let Expression::Infix(infix) = expression else {
            return true;
        };
        let own = precedence(expression);
        precedence(&infix.left).map_or(true, |p| Some(p) >= own)
            && precedence(&infix.right).map_or(true, |p| Some(p) > own)
            && well_nested(&infix.left)
            && well_nested(&infix.right)
    }

    proptest! {
        #[test]
        fn infix_chains_keep_token_order_and_precedence(
            first in operand(),
            rest in prop::collection::vec(
                (prop::sample::select(OPERATORS.to_vec()), operand()),
                0..8,
            ),
        ) {
            let mut tokens = vec![first];
            for (operator, operand) in rest {
                tokens.push(operator.as_symbol().to_string());
                tokens.push(operand);
            }
            let text = format!("fun f() {{ return {} }}", tokens.join(" "));
            let document = parsed(&text);

            let Some(function) = document.functions().next() else {
                panic!("no function in {text:?}");
            };
            let Statement::Return(statement) = &function.statements[0];
            prop_assert_eq!(statement.values.len(), 1);
            let expression = &statement.values.items[0].expression;

            let mut flat = Vec::new();
            flatten(expression, &mut flat);
            prop_assert_eq!(flat, tokens);
            prop_assert!(well_nested(expression));
            prop_assert!(compare_documents(&document, &document.detached()).is_ok());
        }
    }
}
