//! Declaration and sequence flattening, plus the targeted obfuscation-idiom
//! rewrites. These run as the second pipeline stage, over a re-parse of the
//! normalized first-stage output.

use crate::diagnostics::PassError;
use crate::eval::quote_string;
use crate::parser::arena::NodeArena;
use crate::parser::ast::{Node, NodeIndex, NodeKind, NodeList};
use crate::scanner::SyntaxKind;
use crate::walker::{RewriteRule, RuleAction, WalkPath};

/// Splits `var a = 1, b = 2;` into one declaration statement per declarator,
/// same keyword, original order. For-header declarations are not in a
/// statement list and stay combined.
pub struct DeclarationSplit;

impl RewriteRule for DeclarationSplit {
    fn name(&self) -> &'static str {
        "declaration-split"
    }

    fn kinds(&self) -> &'static [NodeKind] {
        &[NodeKind::VariableStatement]
    }

    fn apply(
        &self,
        arena: &mut NodeArena,
        node: NodeIndex,
        path: &WalkPath,
    ) -> Result<RuleAction, PassError> {
        let Node::VariableStatement {
            keyword,
            declarations,
        } = arena.get(node).clone()
        else {
            return Ok(RuleAction::Keep);
        };
        if declarations.len() < 2 {
            return Ok(RuleAction::Keep);
        }
        if path.nearest_list_statement(arena, node) != Some(node) {
            return Ok(RuleAction::Keep);
        }
        let statements = declarations
            .nodes
            .iter()
            .map(|&declarator| {
                arena.add(Node::VariableStatement {
                    keyword,
                    declarations: NodeList::new(vec![declarator]),
                })
            })
            .collect();
        Ok(RuleAction::ReplaceWithMany(statements))
    }
}

/// Splits an expression statement over a comma-operator chain into one
/// expression statement per element.
pub struct StatementSequenceFlattener;

impl RewriteRule for StatementSequenceFlattener {
    fn name(&self) -> &'static str {
        "statement-sequence-flattener"
    }

    fn kinds(&self) -> &'static [NodeKind] {
        &[NodeKind::ExpressionStatement]
    }

    fn apply(
        &self,
        arena: &mut NodeArena,
        node: NodeIndex,
        path: &WalkPath,
    ) -> Result<RuleAction, PassError> {
        let Node::ExpressionStatement { expression } = *arena.get(node) else {
            return Ok(RuleAction::Keep);
        };
        let Node::SequenceExpression { expressions } = arena.get(expression).clone() else {
            return Ok(RuleAction::Keep);
        };
        if path.nearest_list_statement(arena, node) != Some(node) {
            return Ok(RuleAction::Keep);
        }
        let statements = expressions
            .nodes
            .iter()
            .map(|&element| arena.alloc_expression_statement(element))
            .collect();
        Ok(RuleAction::ReplaceWithMany(statements))
    }
}

/// Hoists a comma-operator chain found in expression position: all but the
/// last element become expression statements spliced before the nearest
/// enclosing statement, and the chain's slot is replaced by its last
/// element. Fires only when an enclosing statement-list slot exists and the
/// chain sits in a position evaluated exactly once per execution of that
/// statement.
pub struct NestedSequenceFlattener;

// Hoisting is only sound when everything between the anchor statement and
// the sequence runs exactly once, unconditionally, each time the statement
// executes. Re-evaluated slots (loop conditions, for-incrementors) and
// conditionally-evaluated slots (short-circuit right operands, ternary
// branches) disqualify the position.
fn hoist_is_safe(
    arena: &NodeArena,
    path: &WalkPath,
    anchor: NodeIndex,
    node: NodeIndex,
) -> bool {
    let ancestors = path.ancestors();
    let Some(start) = ancestors.iter().position(|&a| a == anchor) else {
        return false;
    };
    let chain = &ancestors[start..];
    for (i, &parent) in chain.iter().enumerate() {
        let child = chain.get(i + 1).copied().unwrap_or(node);
        match *arena.get(parent) {
            Node::WhileStatement { expression, .. } if child == expression => return false,
            Node::DoStatement { expression, .. } if child == expression => return false,
            Node::ForStatement {
                condition,
                incrementor,
                ..
            } if Some(child) == condition || Some(child) == incrementor => return false,
            Node::BinaryExpression {
                operator, right, ..
            } if child == right
                && matches!(
                    operator,
                    SyntaxKind::AmpersandAmpersandToken | SyntaxKind::BarBarToken
                ) =>
            {
                return false;
            }
            Node::ConditionalExpression {
                when_true,
                when_false,
                ..
            } if child == when_true || child == when_false => return false,
            _ => {}
        }
    }
    true
}

impl RewriteRule for NestedSequenceFlattener {
    fn name(&self) -> &'static str {
        "nested-sequence-flattener"
    }

    fn kinds(&self) -> &'static [NodeKind] {
        &[NodeKind::SequenceExpression]
    }

    fn apply(
        &self,
        arena: &mut NodeArena,
        node: NodeIndex,
        path: &WalkPath,
    ) -> Result<RuleAction, PassError> {
        let Node::SequenceExpression { expressions } = arena.get(node).clone() else {
            return Ok(RuleAction::Keep);
        };
        let Some((&last, rest)) = expressions.nodes.split_last() else {
            return Ok(RuleAction::Keep);
        };
        let Some(anchor) = path.nearest_list_statement(arena, node) else {
            return Ok(RuleAction::Keep);
        };
        if !hoist_is_safe(arena, path, anchor, node) {
            return Ok(RuleAction::Keep);
        }
        let statements: Vec<NodeIndex> = rest
            .iter()
            .map(|&element| arena.alloc_expression_statement(element))
            .collect();
        let last_node = arena.get(last).clone();
        arena.replace(node, last_node);
        Ok(RuleAction::SpliceBefore { anchor, statements })
    }
}

/// Folds `'lit'.split(sep).reverse().join(sep)` with literal, equal
/// separators to the reversed string literal. The general folder cannot
/// evaluate method calls, so this shape is matched structurally.
pub struct StringReverseIdiom;

// Receiver and single string-literal argument of a `recv.method(arg)` call,
// when the callee names `method`.
fn match_method_call(
    arena: &NodeArena,
    call: NodeIndex,
    method: &str,
) -> Option<(NodeIndex, Option<String>)> {
    let Node::CallExpression {
        expression,
        arguments,
    } = arena.get(call).clone()
    else {
        return None;
    };
    let Node::PropertyAccessExpression {
        expression: receiver,
        name,
    } = *arena.get(expression)
    else {
        return None;
    };
    if arena.identifier_text(name) != Some(method) {
        return None;
    }
    let argument = match arguments.nodes.as_slice() {
        [] => None,
        [single] => Some(arena.string_value(*single)?.to_owned()),
        _ => return None,
    };
    Some((receiver, argument))
}

impl RewriteRule for StringReverseIdiom {
    fn name(&self) -> &'static str {
        "string-reverse-idiom"
    }

    fn kinds(&self) -> &'static [NodeKind] {
        &[NodeKind::CallExpression]
    }

    fn apply(
        &self,
        arena: &mut NodeArena,
        node: NodeIndex,
        _path: &WalkPath,
    ) -> Result<RuleAction, PassError> {
        let Some((reverse_call, Some(join_separator))) = match_method_call(arena, node, "join")
        else {
            return Ok(RuleAction::Keep);
        };
        let Some((split_call, None)) = match_method_call(arena, reverse_call, "reverse") else {
            return Ok(RuleAction::Keep);
        };
        let Some((subject, Some(split_separator))) = match_method_call(arena, split_call, "split")
        else {
            return Ok(RuleAction::Keep);
        };
        if split_separator != join_separator {
            return Ok(RuleAction::Keep);
        }
        let Some(value) = arena.string_value(subject) else {
            return Ok(RuleAction::Keep);
        };
        let reversed: String = if split_separator.is_empty() {
            value.chars().rev().collect()
        } else {
            let mut segments: Vec<&str> = value.split(split_separator.as_str()).collect();
            segments.reverse();
            segments.join(&split_separator)
        };
        arena.replace(
            node,
            Node::StringLiteral {
                text: quote_string(&reversed, '\''),
                value: reversed,
            },
        );
        Ok(RuleAction::Revisit)
    }
}

/// Rewrites `alert(...)` to `console.log(...)`, arguments unchanged.
pub struct AlertRewrite;

impl RewriteRule for AlertRewrite {
    fn name(&self) -> &'static str {
        "alert-rewrite"
    }

    fn kinds(&self) -> &'static [NodeKind] {
        &[NodeKind::CallExpression]
    }

    fn apply(
        &self,
        arena: &mut NodeArena,
        node: NodeIndex,
        _path: &WalkPath,
    ) -> Result<RuleAction, PassError> {
        let Node::CallExpression { expression, .. } = *arena.get(node) else {
            return Ok(RuleAction::Keep);
        };
        if arena.identifier_text(expression) != Some("alert") {
            return Ok(RuleAction::Keep);
        }
        let console = arena.alloc_identifier("console");
        let console_log = arena.alloc_property_access(console, "log");
        if let Node::CallExpression { expression, .. } = arena.get_mut(node) {
            *expression = console_log;
        }
        Ok(RuleAction::Revisit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitter::{EmitOptions, Printer};
    use crate::parser::ParserState;
    use crate::transforms::stage_b_rules;
    use crate::walker::TreeWalker;

    fn flatten(source: &str) -> String {
        let mut parser = ParserState::new(source, "test.js").expect("scanner init");
        let root = parser.parse_source_file().expect("parse failed");
        let mut arena = parser.into_arena();
        TreeWalker::new(stage_b_rules())
            .run(&mut arena, root)
            .expect("walk failed");
        Printer::new(&arena, &EmitOptions::default()).print_source_file(root)
    }

    #[test]
    fn declarations_split_in_order() {
        assert_eq!(
            flatten("let a = 1, b = 2;"),
            "let a = 1;\nlet b = 2;\n"
        );
        assert_eq!(
            flatten("var x, y = f(), z;"),
            "var x;\nvar y = f();\nvar z;\n"
        );
    }

    #[test]
    fn single_declarator_statements_stay_whole() {
        assert_eq!(flatten("const a = 1;"), "const a = 1;\n");
    }

    #[test]
    fn for_header_declarations_stay_combined() {
        assert_eq!(
            flatten("for (var i = 0, n = len; i < n; i++) { f(i); }"),
            "for (var i = 0, n = len; i < n; i++) {\n    f(i);\n}\n"
        );
    }

    #[test]
    fn statement_sequences_split() {
        assert_eq!(flatten("a(), b(), c();"), "a();\nb();\nc();\n");
    }

    #[test]
    fn sequences_inside_blocks_split() {
        assert_eq!(
            flatten("if (x) { a(), b(); }"),
            "if (x) {\n    a();\n    b();\n}\n"
        );
    }

    #[test]
    fn nested_sequences_hoist_before_the_statement() {
        assert_eq!(flatten("x = (a(), b(), c());"), "a();\nb();\nx = c();\n");
        assert_eq!(flatten("return;"), "return;\n");
    }

    #[test]
    fn hoisted_elements_are_flattened_recursively() {
        assert_eq!(
            flatten("x = (a(), (b(), c()));"),
            "a();\nb();\nx = c();\n"
        );
    }

    #[test]
    fn sequences_in_reevaluated_positions_stay_put() {
        assert_eq!(
            flatten("while (i++, i < 3) { f(i); }"),
            "while (i++, i < 3) {\n    f(i);\n}\n"
        );
        assert_eq!(
            flatten("do { f(i); } while (i++, i < 3);"),
            "do {\n    f(i);\n} while (i++, i < 3);\n"
        );
        assert_eq!(
            flatten("for (i = 0; i < n; i++, j++) { f(i); }"),
            "for (i = 0; i < n; i++, j++) {\n    f(i);\n}\n"
        );
        assert_eq!(
            flatten("for (i = 0; (j++, i < n); i++) { f(i); }"),
            "for (i = 0; j++, i < n; i++) {\n    f(i);\n}\n"
        );
    }

    #[test]
    fn sequences_in_conditional_positions_stay_put() {
        assert_eq!(flatten("x = c && (a(), b());"), "x = c && (a(), b());\n");
        assert_eq!(flatten("x = c || (a(), b());"), "x = c || (a(), b());\n");
        assert_eq!(
            flatten("x = c ? (a(), b()) : d;"),
            "x = c ? (a(), b()) : d;\n"
        );
        assert_eq!(
            flatten("x = c ? d : (a(), b());"),
            "x = c ? d : (a(), b());\n"
        );
    }

    #[test]
    fn run_once_header_slots_still_hoist() {
        assert_eq!(
            flatten("for (s(), i = 0; i < n; i++) { f(i); }"),
            "s();\nfor (i = 0; i < n; i++) {\n    f(i);\n}\n"
        );
        assert_eq!(
            flatten("if ((a(), b())) { c(); }"),
            "a();\nif (b()) {\n    c();\n}\n"
        );
    }

    #[test]
    fn string_reverse_idiom_folds() {
        assert_eq!(
            flatten("x = 'hello'.split('').reverse().join('');"),
            "x = 'olleh';\n"
        );
        assert_eq!(
            flatten("x = 'ab,cd'.split(',').reverse().join(',');"),
            "x = 'cd,ab';\n"
        );
    }

    #[test]
    fn mismatched_separators_do_not_fold() {
        assert_eq!(
            flatten("x = 'hello'.split('').reverse().join('-');"),
            "x = 'hello'.split('').reverse().join('-');\n"
        );
    }

    #[test]
    fn non_literal_subjects_do_not_fold() {
        assert_eq!(
            flatten("x = s.split('').reverse().join('');"),
            "x = s.split('').reverse().join('');\n"
        );
    }

    #[test]
    fn alert_becomes_console_log() {
        assert_eq!(flatten("alert('hi');"), "console.log('hi');\n");
        assert_eq!(flatten("alert(a, b);"), "console.log(a, b);\n");
    }

    #[test]
    fn property_alerts_are_not_rewritten() {
        assert_eq!(flatten("win.alert('hi');"), "win.alert('hi');\n");
    }
}
