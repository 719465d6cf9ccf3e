use super::*;
use kiln_ir::{build, Node, QuoteKind};
use kiln_source::SourceFile;
use pretty_assertions::assert_eq;

/// Run the directive on the first `#` of `text` with the built-in registry.
fn run_with(text: &str, registry: &DirectiveRegistry) -> (Result<Declaration, Diagnostic>, CursorState) {
    let file = SourceFile::new("t.kn", text);
    let mut cursor = Cursor::new(&file);
    cursor.skip_whitespace();
    cursor.eat_while(|c| c != '#');
    let result = scan_directive(&mut cursor, registry);
    (result, cursor.state())
}

fn run(text: &str) -> Result<Declaration, Diagnostic> {
    run_with(text, &DirectiveRegistry::with_builtins()).0
}

fn parsed(text: &str) -> Declaration {
    run(text).unwrap_or_else(|e| panic!("{e}"))
}

fn failure(text: &str) -> Diagnostic {
    match run(text) {
        Err(diagnostic) => diagnostic,
        Ok(declaration) => panic!("{text:?} scanned as {declaration:?}"),
    }
}

fn related_position(diagnostic: &Diagnostic) -> Option<String> {
    diagnostic.related.as_deref().and_then(Diagnostic::position)
}

#[test]
fn include_angle() {
    let declaration = parsed("#include <stdio.h>");
    assert_eq!(
        declaration.equal_to(&Context::default(), &build::include_angle("stdio.h")),
        Ok(())
    );
    let Declaration::Include(include) = declaration else {
        panic!("not an include");
    };
    assert_eq!(include.quote, QuoteKind::Angle);
    assert_eq!(include.opener.value, "<");
    assert_eq!(include.closer.value, ">");
    assert_eq!(include.path.value, "stdio.h");
    assert_eq!(include.path.context.position().as_deref(), Some("t.kn:1:11"));
    assert_eq!(include.head.name.value, "include");
}

#[test]
fn include_quote_with_indent_and_comment() {
    let declaration = parsed("  #include   \"lib/util.h\"  // local\n");
    assert_eq!(
        declaration.equal_to(&Context::default(), &build::include_quote("lib/util.h")),
        Ok(())
    );
}

#[test]
fn include_without_quote() {
    let diagnostic = failure("#include stdio.h");
    assert_eq!(diagnostic.code, Some(ErrorCode::E2004));
    assert_eq!(
        diagnostic.to_string(),
        "t.kn:1:10: error: unexpected `s`, expected `<` or `\"`\n\
         \x20  1 | #include stdio.h\n\
         \x20    |          ^\n"
    );

    let diagnostic = failure("#include");
    assert_eq!(diagnostic.code, Some(ErrorCode::E2004));
    assert_eq!(diagnostic.position().as_deref(), Some("t.kn:1:9"));
}

#[test]
fn include_unterminated() {
    let diagnostic = failure("#include <stdio.h\nfun");
    assert_eq!(diagnostic.code, Some(ErrorCode::E2005));
    assert_eq!(diagnostic.message, "expected `>` before the end of the line");
    assert_eq!(diagnostic.position().as_deref(), Some("t.kn:1:18"));
    assert_eq!(related_position(&diagnostic).as_deref(), Some("t.kn:1:10"));
}

#[test]
fn include_mismatched_closer() {
    let diagnostic = failure("#include <stdio.h\"");
    assert_eq!(diagnostic.code, Some(ErrorCode::E2006));
    assert_eq!(diagnostic.message, "mismatched `\"`, expected `>`");
    assert_eq!(diagnostic.position().as_deref(), Some("t.kn:1:18"));
    assert_eq!(
        diagnostic.related.as_deref().map(|d| d.message.as_str()),
        Some("opened with `<` here")
    );
    assert_eq!(related_position(&diagnostic).as_deref(), Some("t.kn:1:10"));

    assert_eq!(failure("#include \"a.h>").code, Some(ErrorCode::E2006));
}

#[test]
fn include_empty_path() {
    let diagnostic = failure("#include <>");
    assert_eq!(diagnostic.code, Some(ErrorCode::E2007));
    assert_eq!(diagnostic.message, "empty include path");
    assert_eq!(diagnostic.position().as_deref(), Some("t.kn:1:10"));
}

#[test]
fn include_trailing_input() {
    let diagnostic = failure("#include <a.h> extra  ");
    assert_eq!(diagnostic.code, Some(ErrorCode::E2010));
    assert_eq!(diagnostic.message, "unexpected `extra` after `#include`");
    assert_eq!(diagnostic.position().as_deref(), Some("t.kn:1:16"));
}

#[test]
fn hash_must_start_the_line() {
    let diagnostic = failure("x #include <a.h>");
    assert_eq!(diagnostic.code, Some(ErrorCode::E2001));
    assert_eq!(
        diagnostic.message,
        "`#` must be the first non-whitespace character on its line"
    );
    assert_eq!(diagnostic.position().as_deref(), Some("t.kn:1:3"));
}

#[test]
fn missing_directive_name() {
    let diagnostic = failure("# include");
    assert_eq!(diagnostic.code, Some(ErrorCode::E2002));
    assert_eq!(diagnostic.position().as_deref(), Some("t.kn:1:2"));
    assert_eq!(failure("#").position().as_deref(), Some("t.kn:1:2"));
}

#[test]
fn unknown_directive_lists_known_names() {
    let diagnostic = failure("#pragma once");
    assert_eq!(diagnostic.code, Some(ErrorCode::E2003));
    assert_eq!(diagnostic.message, "unknown directive `#pragma`");
    assert_eq!(diagnostic.position().as_deref(), Some("t.kn:1:2"));
    assert_eq!(
        diagnostic.note.as_deref(),
        Some("known directives: include, inline")
    );
}

fn pragma(cursor: &mut Cursor<'_>, head: DirectiveHead) -> Result<Declaration, Diagnostic> {
    cursor.eat_while(|_| true);
    Ok(Declaration::Inline(kiln_ir::InlineDirective {
        head,
        tag: Terminal::unlocated(TerminalKind::Identifier, "pragma"),
        body: None,
        end: cursor.here(),
    }))
}

#[test]
fn registries_are_independent() {
    let builtins = DirectiveRegistry::with_builtins();
    assert_eq!(builtins.names(), vec!["include", "inline"]);
    assert_eq!(DirectiveRegistry::default().len(), 2);

    let mut custom = DirectiveRegistry::empty();
    assert!(custom.is_empty());
    assert!(custom.register("pragma", pragma).is_none());
    assert!(custom.register("pragma", pragma).is_some());
    assert!(custom.contains("pragma"));
    assert!(!custom.contains("include"));
    assert!(!builtins.contains("pragma"));

    let (result, state) = run_with("#pragma once", &custom);
    assert!(result.is_ok());
    assert_eq!(state, CursorState::new(0, 12));

    let (result, _) = run_with("#include <a.h>", &custom);
    assert_eq!(result.err().and_then(|d| d.code), Some(ErrorCode::E2003));
}

#[test]
fn inline_block_keeps_lines_verbatim() {
    let (result, state) = run_with(
        "#inline c\nint x;\n\n  int y; // kept\n#end-inline c\nfun",
        &DirectiveRegistry::with_builtins(),
    );
    let declaration = result.unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(
        declaration.equal_to(
            &Context::default(),
            &build::inline("c", Some("int x;\n\n  int y; // kept"))
        ),
        Ok(())
    );
    assert_eq!(state, CursorState::new(4, 13));

    let Declaration::Inline(inline) = declaration else {
        panic!("not an inline block");
    };
    assert_eq!(inline.end.position().as_deref(), Some("t.kn:5:1"));
    let body_lines: Vec<usize> = inline
        .body
        .iter()
        .flat_map(|b| b.context.spans())
        .map(|span| span.line().number())
        .collect();
    assert_eq!(body_lines, vec![2, 3, 4]);
}

#[test]
fn inline_empty_block_has_no_body() {
    let declaration = parsed("#inline c\n#end-inline c\n");
    assert_eq!(
        declaration.equal_to(&Context::default(), &build::inline("c", None)),
        Ok(())
    );
}

#[test]
fn inline_closer_allows_surrounding_whitespace() {
    let declaration = parsed("#inline asm\n#end-inline c\n   #end-inline   asm  \n");
    assert_eq!(
        declaration.equal_to(
            &Context::default(),
            &build::inline("asm", Some("#end-inline c"))
        ),
        Ok(())
    );
}

#[test]
fn inline_unterminated_names_the_closer() {
    let diagnostic = failure("#inline c");
    assert_eq!(diagnostic.code, Some(ErrorCode::E2009));
    assert_eq!(
        diagnostic.message,
        "expected `#end-inline c` before the end of input"
    );
    assert_eq!(diagnostic.position().as_deref(), Some("t.kn:1:10"));
    assert_eq!(related_position(&diagnostic).as_deref(), Some("t.kn:1:1"));

    let diagnostic = failure("#inline c\nint x;\n#end-inline cpp");
    assert_eq!(diagnostic.position().as_deref(), Some("t.kn:3:16"));
}

#[test]
fn inline_requires_tag_and_end_of_line() {
    let diagnostic = failure("#inline\n#end-inline");
    assert_eq!(diagnostic.code, Some(ErrorCode::E2008));
    assert_eq!(diagnostic.position().as_deref(), Some("t.kn:1:8"));

    let diagnostic = failure("#inline c d\n#end-inline c");
    assert_eq!(diagnostic.code, Some(ErrorCode::E2010));
    assert_eq!(diagnostic.message, "unexpected `d` after `#inline`");
}
