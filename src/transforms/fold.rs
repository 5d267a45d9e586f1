//! Literal folding and dead-branch elimination.

use crate::diagnostics::PassError;
use crate::eval::{format_number, quote_string, try_evaluate, JsValue};
use crate::parser::arena::NodeArena;
use crate::parser::ast::{Node, NodeIndex, NodeKind};
use crate::scanner::SyntaxKind;
use crate::walker::{RewriteRule, RuleAction, WalkPath};

/// The node a computed value folds to. `undefined` has no literal form and
/// becomes the global identifier.
fn literal_node(value: JsValue) -> Node {
    match value {
        JsValue::Number(n) => Node::NumericLiteral {
            text: format_number(n),
            value: n,
        },
        JsValue::Str(s) => Node::StringLiteral {
            text: quote_string(&s, '\''),
            value: s,
        },
        JsValue::Bool(b) => Node::BooleanLiteral { value: b },
        JsValue::Null => Node::NullLiteral,
        JsValue::Undefined => Node::Identifier {
            text: "undefined".into(),
        },
    }
}

/// Replaces closed literal expressions with their computed value and
/// selects the live branch of if statements with literal tests.
///
/// Registered on binary expressions and if statements. Evaluation is
/// recursive over the whole subtree, so one pre-order visit folds nested
/// shapes like `(1 + 2) + 3` completely.
pub struct LiteralFolder;

impl RewriteRule for LiteralFolder {
    fn name(&self) -> &'static str {
        "literal-folder"
    }

    fn kinds(&self) -> &'static [NodeKind] {
        &[NodeKind::BinaryExpression, NodeKind::IfStatement]
    }

    fn apply(
        &self,
        arena: &mut NodeArena,
        node: NodeIndex,
        _path: &WalkPath,
    ) -> Result<RuleAction, PassError> {
        match arena.kind(node) {
            NodeKind::BinaryExpression => {
                if let Some(value) = try_evaluate(arena, node) {
                    arena.replace(node, literal_node(value));
                    return Ok(RuleAction::Revisit);
                }
                // A literal left operand decides `&&`/`||` even when the
                // right side is open: either the left value is the result
                // and the right side never runs, or the result is exactly
                // the right operand.
                let Node::BinaryExpression {
                    left,
                    operator,
                    right,
                } = *arena.get(node)
                else {
                    return Ok(RuleAction::Keep);
                };
                let left_wins_when = match operator {
                    SyntaxKind::AmpersandAmpersandToken => false,
                    SyntaxKind::BarBarToken => true,
                    _ => return Ok(RuleAction::Keep),
                };
                let Some(left_value) = try_evaluate(arena, left) else {
                    return Ok(RuleAction::Keep);
                };
                if left_value.truthy() == left_wins_when {
                    arena.replace(node, literal_node(left_value));
                } else {
                    let right_node = arena.get(right).clone();
                    arena.replace(node, right_node);
                }
                Ok(RuleAction::Revisit)
            }
            NodeKind::IfStatement => {
                let Node::IfStatement {
                    expression,
                    then_statement,
                    else_statement,
                } = *arena.get(node)
                else {
                    return Ok(RuleAction::Keep);
                };
                let Some(value) = try_evaluate(arena, expression) else {
                    return Ok(RuleAction::Keep);
                };
                let taken = if value.truthy() {
                    Some(then_statement)
                } else {
                    else_statement
                };
                let statements = match taken {
                    // `if (falsy) { ... }` with no else: drop the statement.
                    None => Vec::new(),
                    Some(branch) => match arena.statement_list(branch) {
                        Some(list) => list.nodes.clone(),
                        None => vec![branch],
                    },
                };
                Ok(RuleAction::ReplaceWithMany(statements))
            }
            _ => Ok(RuleAction::Keep),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitter::{EmitOptions, Printer};
    use crate::parser::ParserState;
    use crate::walker::TreeWalker;

    fn fold(source: &str) -> String {
        let mut parser = ParserState::new(source, "test.js").expect("scanner init");
        let root = parser.parse_source_file().expect("parse failed");
        let mut arena = parser.into_arena();
        TreeWalker::new(vec![Box::new(LiteralFolder)])
            .run(&mut arena, root)
            .expect("walk failed");
        Printer::new(&arena, &EmitOptions::default()).print_source_file(root)
    }

    #[test]
    fn arithmetic_folds() {
        assert_eq!(fold("x = 1 + 2 * 3;"), "x = 7;\n");
        assert_eq!(fold("x = 10 / 4;"), "x = 2.5;\n");
        assert_eq!(fold("x = 1 / 0;"), "x = Infinity;\n");
    }

    #[test]
    fn nested_literal_subtrees_fold_in_one_walk() {
        assert_eq!(fold("x = (1 + 2) + (3 + 4);"), "x = 10;\n");
    }

    #[test]
    fn string_concatenation_folds() {
        assert_eq!(fold("x = 'a' + 'b' + 1;"), "x = 'ab1';\n");
        assert_eq!(fold("x = 1 + 2 + 'px';"), "x = '3px';\n");
    }

    #[test]
    fn comparisons_fold_to_booleans() {
        assert_eq!(fold("x = 1 < 2;"), "x = true;\n");
        assert_eq!(fold("x = '1' == 1;"), "x = true;\n");
        assert_eq!(fold("x = '1' === 1;"), "x = false;\n");
    }

    #[test]
    fn logical_operators_return_operands() {
        assert_eq!(fold("x = 0 || 'fallback';"), "x = 'fallback';\n");
        assert_eq!(fold("x = 1 && 2;"), "x = 2;\n");
        assert_eq!(fold("x = null && f();"), "x = null;\n");
    }

    #[test]
    fn literal_left_operand_short_circuits() {
        assert_eq!(fold("x = null && f();"), "x = null;\n");
        assert_eq!(fold("x = 0 && g(y);"), "x = 0;\n");
        assert_eq!(fold("x = 'cached' || load();"), "x = 'cached';\n");
        assert_eq!(fold("x = 1 && f();"), "x = f();\n");
        assert_eq!(fold("x = false || g(y);"), "x = g(y);\n");
        assert_eq!(fold("x = a && f();"), "x = a && f();\n");
    }

    #[test]
    fn open_subtrees_stay_put() {
        assert_eq!(fold("x = y + 1;"), "x = y + 1;\n");
        assert_eq!(fold("x = f() + 2;"), "x = f() + 2;\n");
    }

    #[test]
    fn truthy_test_keeps_then_branch() {
        assert_eq!(fold("if (1 < 2) { a(); } else { b(); }"), "a();\n");
        assert_eq!(fold("if ('yes') { a(); b(); }"), "a();\nb();\n");
    }

    #[test]
    fn falsy_test_keeps_else_or_nothing() {
        assert_eq!(fold("if (1 > 2) { a(); } else { b(); }"), "b();\n");
        assert_eq!(fold("if (false) { a(); } c();"), "c();\n");
    }

    #[test]
    fn bare_branch_statement_is_substituted() {
        assert_eq!(fold("if (true) a();"), "a();\n");
    }

    #[test]
    fn spliced_branch_statements_are_folded_too() {
        assert_eq!(fold("if (true) { x = 1 + 1; }"), "x = 2;\n");
    }

    #[test]
    fn open_test_leaves_the_if_alone() {
        assert_eq!(
            fold("if (x) { a(); }"),
            "if (x) {\n    a();\n}\n"
        );
    }
}
