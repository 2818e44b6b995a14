// Integration tests for the Blorbo front end

use blorbo::parser::ast::{Expr, Program, Stmt};
use blorbo::parser::token::TokenKind;
use blorbo::parser::parse::MAX_NESTING_DEPTH;
use blorbo::{parse, scan, LexError, ParseError};

fn parse_source(source: &str) -> Program {
    let tokens = scan(source).expect("Lexing failed");
    parse(tokens).expect("Parsing failed")
}

fn parse_error(source: &str) -> ParseError {
    let tokens = scan(source).expect("Lexing failed");
    parse(tokens).expect_err("Parsing should fail")
}

const SAMPLE: &str = r#"
// Greatest common divisor, recursively
fn gcd(a, b) {
    if (b == 0) return a;
    return gcd(b, a % b);
}

var greeting = "hello
world";
var flags = 1 << 4 | 2 & ~mask ^ 3 >> 1;
var done = false;

{
    var ok = !done and gcd(12, 18) >= 6 or null;
    ok = ok != true;
}

print(greeting)(done);
"#;

#[test]
fn test_sample_program_parses() {
    let program = parse_source(SAMPLE);

    // fn, three vars, a block and one expression statement
    assert_eq!(program.stmts.len(), 6);
    assert!(matches!(program.stmts[0], Stmt::Fn { .. }));
    assert!(matches!(program.stmts[1], Stmt::Var { .. }));
    assert!(matches!(program.stmts[4], Stmt::Block { ref body } if body.len() == 2));
    assert!(matches!(
        program.stmts[5],
        Stmt::Expr {
            value: Expr::Call { .. }
        }
    ));
}

#[test]
fn test_sample_program_shape() {
    let program = parse_source(SAMPLE);
    let lines: Vec<String> = program.stmts.iter().map(|s| s.to_string()).collect();

    assert_eq!(
        lines[0],
        "(fn gcd (a b) (block (if (== b 0) (return a)) (return (call gcd b (% a b)))))"
    );
    assert_eq!(lines[1], "(var greeting \"hello\\nworld\")");
    assert_eq!(lines[2], "(var flags (| (<< 1 4) (^ (& 2 (~ mask)) (>> 3 1))))");
    assert_eq!(lines[3], "(var done false)");
    assert_eq!(
        lines[4],
        "(block (var ok (or (and (! done) (>= (call gcd 12 18) 6)) null)) (= ok (!= ok true)))"
    );
    assert_eq!(lines[5], "(call (call print greeting) done)");
}

#[test]
fn test_tokens_carry_lines() {
    let program = parse_source(SAMPLE);
    match &program.stmts[2] {
        Stmt::Var { name, .. } => {
            assert_eq!(name.text, "flags");
            // The multi-line string above spans lines 8-9.
            assert_eq!(name.line, 10);
        }
        other => panic!("Expected variable declaration, got {:?}", other),
    }
}

#[test]
fn test_whitespace_and_comments_do_not_change_the_tree() {
    let compact = "fn f(a,b){return a+b*2;}var x=f(1,2);if(x>3)x=0;else{x=1;}";
    let spaced = r#"
        fn   f ( a , // first
                 b )   // second
        {
            return a +
                   b * 2 ;   // sum
        }
        // declaration follows
        var x = f ( 1 , 2 ) ;
        if ( x > 3 )
            x = 0 ;
        else {
            x = 1 ;
        }
    "#;

    let left = parse_source(compact).to_string();
    let right = parse_source(spaced).to_string();
    assert_eq!(left, right);
}

#[test]
fn test_top_level_statement_count() {
    let program = parse_source("var a = 1; { a; } a = 2; fn g() {} if (a) {} return a;");
    assert_eq!(program.stmts.len(), 6);
}

#[test]
fn test_comment_only_line_lexes_to_nothing() {
    let tokens = scan("// comment\n42;").unwrap();
    let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![TokenKind::Number, TokenKind::Semicolon, TokenKind::Eof]
    );
    assert_eq!(tokens[0].text, "42");
}

#[test]
fn test_syntax_error_line() {
    let err = parse_error("var x = 1;\nvar y = );");
    assert_eq!(err.line(), 2);
}

#[test]
fn test_rejections() {
    assert_eq!(
        parse_error("1 = 2;"),
        ParseError::InvalidAssignmentTarget { line: 1 }
    );
    assert_eq!(
        parse_error("fn f(1) {}"),
        ParseError::InvalidParameterName { line: 1 }
    );
}

#[test]
fn test_unterminated_string_terminates() {
    let errors = scan("\"abc").unwrap_err();
    assert_eq!(errors.first(), &LexError::UnterminatedString { line: 1 });
}

#[test]
fn test_missing_paren_messages() {
    assert_eq!(
        parse_error("if x) y;").to_string(),
        "expected '(' after 'if' on line 1"
    );
    assert_eq!(
        parse_error("if (x y;").to_string(),
        "expected ')' after if condition on line 1"
    );
    assert_eq!(
        parse_error("fn (a) {}").to_string(),
        "expected function name on line 1"
    );
    assert_eq!(
        parse_error("fn f a) {}").to_string(),
        "expected '(' after function name on line 1"
    );
    assert_eq!(
        parse_error("fn f(a {}").to_string(),
        "expected ')' after parameters on line 1"
    );
    assert_eq!(
        parse_error("return 1").to_string(),
        "expected ';' after return value on line 1"
    );
    assert_eq!(
        parse_error("(1 + 2;").to_string(),
        "expected ')' after expression on line 1"
    );
}

#[test]
fn test_return_requires_value() {
    assert!(matches!(
        parse_error("fn f() { return; }"),
        ParseError::ExpectedExpression { .. }
    ));
}

#[test]
fn test_deep_nesting_is_an_error_not_a_crash() {
    // One '(' per line: the limit is hit while the parser looks at the next
    // '(' after MAX_NESTING_DEPTH - 1 of them.
    let depth = 5_000;
    let source = format!("{}x{};", "(\n".repeat(depth), ")".repeat(depth));
    let err = parse_error(&source);
    assert_eq!(err, ParseError::NestingTooDeep { line: MAX_NESTING_DEPTH });
    assert_eq!(
        err.to_string(),
        format!("nesting too deep on line {MAX_NESTING_DEPTH}")
    );

    let nested = "fn f(a) { if (a) { return -(a); } }";
    let mut source = String::new();
    for _ in 0..10 {
        source.push_str("{ ");
    }
    source.push_str(nested);
    source.push_str(&" }".repeat(10));
    assert_eq!(parse_source(&source).stmts.len(), 1);
}

#[test]
fn test_independent_parses_run_concurrently() {
    let sources = ["var a = 1;", "fn f(x) { return x; }", "a = b = c;", "1 = 2;"];

    let handles: Vec<_> = sources
        .iter()
        .map(|source| {
            let source = source.to_string();
            std::thread::spawn(move || scan(&source).map(parse).map(|r| r.is_ok()))
        })
        .collect();

    let results: Vec<bool> = handles
        .into_iter()
        .map(|h| h.join().unwrap().unwrap())
        .collect();
    assert_eq!(results, vec![true, true, true, false]);
}
