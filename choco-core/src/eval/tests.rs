use std::{path::PathBuf, rc::Rc};

use crate::{
    environment::prelude::Value,
    lexer::prelude::Token,
    utils::prelude::{Error, ErrorEmitter, VectorErrorEmitterIO},
};

use super::prelude::{interpret, interpret_from_stream, Evaluator, SyntaxErrorType};

fn run(input: &str) -> (String, Vec<Error>) {
    let errors = VectorErrorEmitterIO::new();
    let emitter = ErrorEmitter::new(PathBuf::from("test.choco"), Rc::new(errors.clone()));

    let out = interpret(input, Vec::new(), emitter).expect("writing to a vector cannot fail");

    (String::from_utf8(out).unwrap(), errors.take())
}

fn output(input: &str) -> String {
    let (out, errors) = run(input);
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");

    out
}

fn error_types(errors: &[Error]) -> Vec<SyntaxErrorType> {
    errors.iter()
        .map(|error| match error {
            Error::Syntax { error, .. } => error.error.clone(),
            other => panic!("expected a syntax error, got {other:?}"),
        })
        .collect()
}

#[test]
fn test_puts_renders_values() {
    let input = r#"
        puts 1
        puts 2.5
        puts "hi"
        puts true
        puts [1, "a", [2, false]]
        puts unbound
    "#;

    assert_eq!(output(input), "1\n2.5\nhi\ntrue\n[1, a, [2, false]]\nnil\n");
}

#[test]
fn test_arithmetic() {
    let input = r#"
        puts 1 + 2 * 3
        puts (1 + 2) * 3
        puts 10 / 4
        puts 10 / 3
        puts 5 % 3
        puts 5.5 % 2
        puts -7 % 3
        puts 10 / 0
        puts 10 % 0
        puts 2 - 5
    "#;

    assert_eq!(output(input), "7\n9\n2.5\n3.333333\n2\n1.5\n-1\n10\n10\n-3\n");
}

#[test]
fn test_string_operators() {
    let input = r#"
        puts "a" + "b" + "c"
        puts "a" - "b"
        puts "a" + 1
        puts 1 + "a"
        puts "x" * 2
    "#;

    assert_eq!(output(input), "abc\na\na\n1\nx\n");
}

#[test]
fn test_comparisons() {
    let input = r#"
        puts 1 < 2
        puts 2 <= 2
        puts 3 > 4
        puts 3 >= 4
        puts 1 == 1
        puts 1 != 1
        puts "a" == "a"
        puts "a" != "b"
        puts "a" < "b"
        puts true == true
        puts true < false
        puts 1 == "1"
        puts 1 != "1"
    "#;

    let expected = [
        "true", "true", "false", "false", "true", "false",
        "true", "true", "false", "true", "false", "false", "false",
    ];

    assert_eq!(output(input), format!("{}\n", expected.join("\n")));
}

#[test]
fn test_logical_operators() {
    let input = r#"
        puts true && 1
        puts 0 || false
        puts "x" || false
        puts [1] && true
        puts 2 && -1
        puts false || true && false
    "#;

    assert_eq!(output(input), "true\nfalse\nfalse\nfalse\ntrue\nfalse\n");
}

#[test]
fn test_logical_operators_evaluate_both_sides() {
    let input = r#"
        fn side() { puts "side"; return true }
        puts false && side()
    "#;

    assert_eq!(output(input), "side\nfalse\n");
}

#[test]
fn test_prefix_operators() {
    let input = r#"
        puts !true
        puts !false
        puts !0
        puts !unbound
        puts -"s"
        puts --3
        puts -(2 + 3)
    "#;

    assert_eq!(output(input), "false\ntrue\nfalse\nfalse\ns\n3\n-5\n");
}

#[test]
fn test_if_truthiness() {
    let input = r#"
        if 0 { puts "zero" } else { puts "no zero" }
        if "" { puts "empty" } else { puts "no empty" }
        if -1 { puts "neg" }
        if "s" { puts "str" }
        if true { puts "bool" }
        if [1] { puts "arr" } else { puts "no arr" }
        if missing { puts "nil" } else { puts "no nil" }
    "#;

    assert_eq!(output(input), "no zero\nno empty\nneg\nstr\nbool\nno arr\nno nil\n");
}

#[test]
fn test_if_skips_unchosen_else() {
    let input = r#"
        let x = 1
        if x == 1 {
            puts "one"
        } else {
            puts "other"
        }
        puts "after"
    "#;

    assert_eq!(output(input), "one\nafter\n");
}

#[test]
fn test_else_if_chain() {
    let input = r#"
        fn grade(n) {
            if n > 90 {
                return "A"
            } else if n > 80 {
                return "B"
            } else {
                return "C"
            }
        }

        puts grade(95)
        puts grade(85)
        puts grade(10)

        let x = 5
        if x > 1 { puts "big" } else if x > 0 { puts "small" }
        puts "end"
    "#;

    assert_eq!(output(input), "A\nB\nC\nbig\nend\n");
}

#[test]
fn test_block_variables_stay_visible() {
    let input = r#"
        if true { let inside = "if" }
        for k in 0..2 { }
        puts inside
        puts k
    "#;

    assert_eq!(output(input), "if\n1\n");
}

#[test]
fn test_while() {
    let input = r#"
        let i = 0
        while i < 3 {
            puts i
            i = i + 1
        }
        puts "done"
    "#;

    assert_eq!(output(input), "0\n1\n2\ndone\n");
}

#[test]
fn test_while_requires_literal_true() {
    let input = r#"
        while 1 { puts "number" }
        while "yes" { puts "string" }
        puts "done"
    "#;

    assert_eq!(output(input), "done\n");
}

#[test]
fn test_for_ranges() {
    let input = r#"
        for i in 0..3 { puts i }
        for i in 1..1 { puts i }
        for i in 3..1 { puts i }
        for i in 0.7..2.9 { puts i }
        for i in "a"..3 { puts i }
        let n = 2
        for i in n..n + 2 { puts i * 10 }
    "#;

    assert_eq!(output(input), "0\n1\n2\n0\n1\n20\n30\n");
}

#[test]
fn test_for_variable_uses_existing_binding() {
    let input = r#"
        let i = 100
        fn count() { for i in 0..2 { } }
        count()
        puts i
    "#;

    assert_eq!(output(input), "1\n");
}

#[test]
fn test_recursion_resumes_caller() {
    let input = r#"
        fn fact(n) {
            if n <= 1 { return 1 }
            return n * fact(n - 1)
        }

        puts fact(5)
        puts "after"
    "#;

    assert_eq!(output(input), "120\nafter\n");
}

#[test]
fn test_fibonacci() {
    let input = r#"
        fn fib(n) {
            if n < 2 { return n }
            return fib(n - 1) + fib(n - 2)
        }

        for i in 0..10 { puts fib(i) }
    "#;

    assert_eq!(output(input), "0\n1\n1\n2\n3\n5\n8\n13\n21\n34\n");
}

#[test]
fn test_function_as_value() {
    let input = r#"
        fn double(x) { return x * 2; }
        let f = double;
        puts f(4);
        let name = "double"
        puts name(3)
        puts f
    "#;

    assert_eq!(output(input), "8\n6\ndouble\n");
}

#[test]
fn test_chained_calls() {
    let input = r#"
        fn two() { return 2 }
        fn id(f) { return f }
        puts id(two)()
    "#;

    assert_eq!(output(input), "2\n");
}

#[test]
fn test_non_callable_call_is_ignored() {
    let input = r#"
        let x = 5
        puts x(1, 2)
        puts "undeclared"(1)
    "#;

    assert_eq!(output(input), "5\nundeclared\n");
}

#[test]
fn test_argument_binding() {
    let input = r#"
        fn show(a, b) {
            puts a
            puts b
        }

        show(1)
        show(1, 2, 3)
    "#;

    assert_eq!(output(input), "1\nnil\n1\n2\n");
}

#[test]
fn test_missing_return_is_nil() {
    let input = r#"
        fn noop() { }
        fn work() { let y = 1 }
        puts noop()
        puts work()
    "#;

    assert_eq!(output(input), "nil\nnil\n");
}

#[test]
fn test_function_scope() {
    let input = r#"
        let g = 1
        fn f() {
            let local = 5
            g = 2
        }
        f()
        puts g
        puts local
    "#;

    assert_eq!(output(input), "2\nnil\n");
}

#[test]
fn test_parameters_shadow_globals() {
    let input = r#"
        let x = 10
        fn f(x) {
            x = x + 1
            return x
        }
        puts f(1)
        puts x
    "#;

    assert_eq!(output(input), "2\n10\n");
}

#[test]
fn test_last_declaration_wins() {
    let input = r#"
        fn f() { return 1 }
        fn f() { return 2 }
        puts f()
    "#;

    assert_eq!(output(input), "2\n");
}

#[test]
fn test_return_stops_loops() {
    let input = r#"
        fn first_over(limit) {
            for i in 0..10 {
                if i > limit { return i }
            }
            return -1
        }

        fn third() {
            let i = 0
            while true {
                i = i + 1
                if i == 3 { return i }
            }
        }

        puts first_over(3)
        puts first_over(20)
        puts third()
    "#;

    assert_eq!(output(input), "4\n-1\n3\n");
}

#[test]
fn test_top_level_return_halts() {
    let input = r#"
        puts 1
        return 5
        puts 2
    "#;

    assert_eq!(output(input), "1\n");
}

#[test]
fn test_calls_inside_array_literal() {
    let input = r#"
        fn sum_to(n) {
            let total = 0
            for i in 1..n + 1 { total = total + i }
            return total
        }

        let results = [sum_to(3), sum_to(4)]
        puts results
        puts total
    "#;

    assert_eq!(output(input), "[6, 10]\nnil\n");
}

#[test]
fn test_interpolation() {
    let input = r##"
        let x = 1
        let s = "v=#{x}"
        x = 2
        puts s
        puts "a #{x} b #{x}"
        puts "#{missing}!"
        puts "#{x"
        puts "no placeholders"
    "##;

    assert_eq!(output(input), "v=1\na 2 b 2\nnil!\n#{x\nno placeholders\n");
}

#[test]
fn test_interpolation_inside_function() {
    let input = r#"
        fn greet(name) { puts "hello, #{name}" }
        greet("world")
        greet([1, 2])
    "#;

    assert_eq!(output(input), "hello, world\nhello, [1, 2]\n");
}

#[test]
fn test_array_indexing() {
    let input = r#"
        puts [10, 20, 30][1]
        puts [10, 20, 30][5]
        puts [10, 20, 30][-1]
        puts [1, 2][1.9]
        let m = [[1, 2], [3, 4]]
        puts m[1][0]
        puts "str"[0]
        puts m["0"]
    "#;

    assert_eq!(output(input), "20\n[10, 20, 30]\n[10, 20, 30]\n2\n3\nstr\n[[1, 2], [3, 4]]\n");
}

#[test]
fn test_optional_semicolons() {
    assert_eq!(output(";; puts 1;; puts 2"), "1\n2\n");
    assert_eq!(output("let a = 1; let b = 2; puts a + b;"), "3\n");
}

#[test]
fn test_unknown_characters_are_ignored() {
    assert_eq!(output("puts 1 & 2"), "1\n");
}

#[test]
fn test_missing_brace_after_if() {
    let (out, errors) = run("if true puts \"x\"\nputs \"after\"");

    assert_eq!(out, "x\nafter\n");
    assert_eq!(error_types(&errors), vec![SyntaxErrorType::ExpectedBraceAfterCondition]);
}

#[test]
fn test_malformed_for() {
    let (out, errors) = run("for i 0..3 { }\nputs \"after\"");
    assert_eq!(error_types(&errors)[0], SyntaxErrorType::ExpectedIn);
    assert!(out.ends_with("after\n"));

    let (_, errors) = run("for i in 0 3 { }");
    assert_eq!(error_types(&errors)[0], SyntaxErrorType::ExpectedRange);

    let (_, errors) = run("for i in 0..3 puts i");
    assert_eq!(error_types(&errors)[0], SyntaxErrorType::ExpectedBraceAfterRange);
}

#[test]
fn test_stray_tokens_are_skipped() {
    let (out, errors) = run("puts 1 } puts 2");

    assert_eq!(out, "1\n2\n");
    assert_eq!(
        error_types(&errors),
        vec![SyntaxErrorType::UnexpectedToken { token: Token::RBrace }]
    );
}

#[test]
fn test_unbalanced_braces_end_the_program() {
    assert_eq!(output("if true { puts 1"), "1\n");
    assert_eq!(output("fn broken(a { puts 2"), "");
}

#[test]
fn test_syntax_error_diagnostic() {
    let (_, errors) = run("let a = 1\nif a puts a");

    let pretty = errors[0].pretty_string();

    assert!(pretty.contains("Syntax error"), "{pretty}");
    assert!(pretty.contains("Expected '{' after if condition"), "{pretty}");
    assert!(pretty.contains("test.choco"), "{pretty}");
}

#[test]
fn test_evaluator_keeps_state_between_runs() -> Result<(), Error> {
    let mut evaluator = Evaluator::new(Vec::new(), ErrorEmitter::null());

    evaluator.run("fn inc(x) { return x + 1 }")?;
    evaluator.run("let y = inc(1)")?;
    evaluator.run("puts inc(y)")?;
    evaluator.run("return 0")?;
    evaluator.run("puts \"still running\"")?;

    assert_eq!(evaluator.env().get("y"), Value::number(2.0));
    assert!(evaluator.functions().contains("inc"));
    assert_eq!(evaluator.error_count(), 0);
    assert_eq!(String::from_utf8_lossy(evaluator.output()), "3\nstill running\n");

    Ok(())
}

#[test]
fn test_interpret_from_stream() {
    let path = std::env::temp_dir().join(format!("choco-eval-{}.choco", std::process::id()));
    std::fs::write(&path, "let who = \"file\"\nputs \"from #{who}\"\n").unwrap();

    let out = interpret_from_stream(path.clone(), Vec::new(), Rc::new(VectorErrorEmitterIO::new()));
    let _ = std::fs::remove_file(&path);

    assert_eq!(String::from_utf8(out.unwrap()).unwrap(), "from file\n");
}

#[test]
fn test_missing_file() {
    let path = PathBuf::from("definitely/not/here.choco");

    match interpret_from_stream(path.clone(), Vec::new(), Rc::new(VectorErrorEmitterIO::new())) {
        Err(Error::StdIo { path: err_path, err }) => {
            assert_eq!(err_path, path);
            assert_eq!(err, std::io::ErrorKind::NotFound);
        },
        other => panic!("expected an io error, got {other:?}"),
    }
}
