//! End-to-end pipeline properties, asserted over `clean`'s emitted text.

use jsclean::clean;

fn cleaned(source: &str) -> String {
    clean(source, "test.js").expect("clean failed")
}

// ---------------------------------------------------------------------------
// Idempotence: cleaning canonical output changes nothing.
// ---------------------------------------------------------------------------

#[test]
fn clean_is_idempotent() {
    let sources = [
        "var a = 0x1F, b = \"x\";\nif (a > 30) { alert(b + \"!\"); } else { skip(); }\nwhile (ok) step();",
        "x = obj['1prop'];",
        "cond ? (a(), b()) : c();",
        "for (var i = 0, n = len; i < n; i++) f(i), g(i);",
    ];
    for source in sources {
        let once = cleaned(source);
        let twice = cleaned(&once);
        assert_eq!(once, twice, "not idempotent for {source:?}");
    }
}

// ---------------------------------------------------------------------------
// Literal folding
// ---------------------------------------------------------------------------

#[test]
fn literal_expressions_fold() {
    assert_eq!(cleaned("var x = 0x10 + 2;"), "var x = 18;\n");
    assert_eq!(cleaned("x = 'a' + 'b' + 'c';"), "x = 'abc';\n");
    assert_eq!(cleaned("x = 1 + 2 * 3 - 4 / 2;"), "x = 5;\n");
    assert_eq!(cleaned("x = 'n' + 1 + 2;"), "x = 'n12';\n");
}

#[test]
fn folding_follows_js_coercion() {
    assert_eq!(cleaned("x = '5' - 2;"), "x = 3;\n");
    assert_eq!(cleaned("x = '5' + 2;"), "x = '52';\n");
    assert_eq!(cleaned("x = 1 / 0;"), "x = Infinity;\n");
    assert_eq!(cleaned("x = 0 == '';"), "x = true;\n");
    assert_eq!(cleaned("x = 0 === '';"), "x = false;\n");
    assert_eq!(cleaned("x = 5 | 8;"), "x = 13;\n");
}

#[test]
fn open_expressions_do_not_fold() {
    assert_eq!(cleaned("x = y + 1;"), "x = y + 1;\n");
    assert_eq!(cleaned("x = f() * 2;"), "x = f() * 2;\n");
}

// ---------------------------------------------------------------------------
// Dead branches
// ---------------------------------------------------------------------------

#[test]
fn truthy_test_keeps_only_the_then_branch() {
    assert_eq!(
        cleaned("if (1 < 2) { a(); b(); } else { c(); }"),
        "a();\nb();\n"
    );
}

#[test]
fn falsy_test_keeps_only_the_else_branch() {
    assert_eq!(cleaned("if (1 > 2) { a(); } else { b(); }"), "b();\n");
}

#[test]
fn falsy_test_without_else_removes_the_statement() {
    assert_eq!(cleaned("if (false) { a(); } b();"), "b();\n");
}

#[test]
fn live_branch_contents_are_cleaned_too() {
    assert_eq!(
        cleaned("if ('on') { var p = 1, q = 2; }"),
        "var p = 1;\nvar q = 2;\n"
    );
}

// ---------------------------------------------------------------------------
// Canonicalization and member access
// ---------------------------------------------------------------------------

#[test]
fn literal_spellings_canonicalize() {
    assert_eq!(cleaned("x = 1e3;"), "x = 1000;\n");
    assert_eq!(cleaned("x = 0777;"), "x = 511;\n");
    assert_eq!(cleaned("x = \"quoted\";"), "x = 'quoted';\n");
}

#[test]
fn bracket_access_with_identifier_key_becomes_dot_access() {
    assert_eq!(cleaned("x = obj[\"prop_1\"];"), "x = obj.prop_1;\n");
    assert_eq!(cleaned("o['a']['b'] = 1;"), "o.a.b = 1;\n");
}

#[test]
fn bracket_access_with_awkward_keys_stays() {
    assert_eq!(cleaned("x = obj['1prop'];"), "x = obj['1prop'];\n");
    assert_eq!(cleaned("x = obj['a b'];"), "x = obj['a b'];\n");
    assert_eq!(cleaned("x = obj[k];"), "x = obj[k];\n");
}

// ---------------------------------------------------------------------------
// Block wrapping
// ---------------------------------------------------------------------------

#[test]
fn bare_bodies_get_blocks() {
    assert_eq!(cleaned("if (x) y();"), "if (x) {\n    y();\n}\n");
    assert_eq!(cleaned("while (x) y();"), "while (x) {\n    y();\n}\n");
    assert_eq!(
        cleaned("for (k in o) f(k);"),
        "for (k in o) {\n    f(k);\n}\n"
    );
}

// ---------------------------------------------------------------------------
// Flattening
// ---------------------------------------------------------------------------

#[test]
fn declarations_split_one_per_statement() {
    assert_eq!(cleaned("let a = 1, b = 2;"), "let a = 1;\nlet b = 2;\n");
    assert_eq!(
        cleaned("var x, y = f(), z;"),
        "var x;\nvar y = f();\nvar z;\n"
    );
}

#[test]
fn statement_sequences_split_in_order() {
    assert_eq!(cleaned("a(), b(), c();"), "a();\nb();\nc();\n");
}

#[test]
fn nested_sequences_hoist_before_their_statement() {
    assert_eq!(cleaned("x = (a(), b());"), "a();\nx = b();\n");
}

#[test]
fn repeating_and_conditional_positions_keep_their_sequences() {
    assert_eq!(
        cleaned("while (i++, i < 3) { f(i); }"),
        "while (i++, i < 3) {\n    f(i);\n}\n"
    );
    assert_eq!(
        cleaned("for (i = 0; i < n; i++, j++) { f(i); }"),
        "for (i = 0; i < n; i++, j++) {\n    f(i);\n}\n"
    );
    assert_eq!(cleaned("x = c && (a(), b());"), "x = c && (a(), b());\n");
}

#[test]
fn literal_left_logical_operands_decide() {
    assert_eq!(cleaned("x = null && f();"), "x = null;\n");
    assert_eq!(cleaned("x = 'cached' || load();"), "x = 'cached';\n");
    assert_eq!(cleaned("x = 1 && f();"), "x = f();\n");
}

#[test]
fn ternary_with_sequence_branch_becomes_if_else() {
    assert_eq!(
        cleaned("cond ? (a(), b()) : c();"),
        "if (cond) {\n    a();\n    b();\n} else {\n    c();\n}\n"
    );
}

// ---------------------------------------------------------------------------
// Idiom rewrites
// ---------------------------------------------------------------------------

#[test]
fn string_reverse_idiom_folds_to_a_literal() {
    assert_eq!(
        cleaned("x = \"hello\".split('').reverse().join('');"),
        "x = 'olleh';\n"
    );
}

#[test]
fn alert_calls_become_console_log() {
    assert_eq!(
        cleaned("alert(\"hello\".split('').reverse().join(''));"),
        "console.log('olleh');\n"
    );
}

// ---------------------------------------------------------------------------
// Whole-program shape
// ---------------------------------------------------------------------------

#[test]
fn obfuscated_sample_normalizes_end_to_end() {
    // Dead branches fold away entirely, the surviving ternary branch is
    // flattened to plain statements, and every literal ends up canonical.
    let source = "var msg = \"!dlrow ,olleH\".split(\"\").reverse().join(\"\"), n = 0x2A;\n\
                  if (1 < 2) alert(msg); else die();\n\
                  true ? (log(n), done()) : skip();";
    let expected = "var msg = 'Hello, world!';\n\
                    var n = 42;\n\
                    console.log(msg);\n\
                    log(n);\n\
                    done();\n";
    assert_eq!(cleaned(source), expected);
}

#[test]
fn parse_errors_carry_a_location() {
    let err = clean("var x = `template`;", "input.js").unwrap_err();
    let message = err.to_string();
    assert!(message.contains("input.js"), "{message}");
    assert!(message.contains("1:"), "{message}");
}
