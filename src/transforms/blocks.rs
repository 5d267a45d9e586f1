//! Block normalization.

use crate::diagnostics::PassError;
use crate::parser::arena::NodeArena;
use crate::parser::ast::{Node, NodeIndex, NodeKind};
use crate::walker::{RewriteRule, RuleAction, WalkPath};

/// Wraps bare single-statement loop bodies and if branches in blocks so
/// later passes can splice statements into them. An absent else branch is
/// left absent.
pub struct BlockNormalizer;

fn ensure_block(arena: &mut NodeArena, statement: NodeIndex, changed: &mut bool) -> NodeIndex {
    if arena.kind(statement) == NodeKind::Block {
        statement
    } else {
        *changed = true;
        arena.alloc_block(vec![statement])
    }
}

impl RewriteRule for BlockNormalizer {
    fn name(&self) -> &'static str {
        "block-normalizer"
    }

    fn kinds(&self) -> &'static [NodeKind] {
        &[
            NodeKind::IfStatement,
            NodeKind::WhileStatement,
            NodeKind::DoStatement,
            NodeKind::ForStatement,
            NodeKind::ForInStatement,
        ]
    }

    fn apply(
        &self,
        arena: &mut NodeArena,
        node: NodeIndex,
        _path: &WalkPath,
    ) -> Result<RuleAction, PassError> {
        let mut changed = false;
        let current = arena.get(node).clone();
        let replacement = match current {
            Node::IfStatement {
                expression,
                then_statement,
                else_statement,
            } => Node::IfStatement {
                expression,
                then_statement: ensure_block(arena, then_statement, &mut changed),
                else_statement: else_statement.map(|e| ensure_block(arena, e, &mut changed)),
            },
            Node::WhileStatement {
                expression,
                statement,
            } => Node::WhileStatement {
                expression,
                statement: ensure_block(arena, statement, &mut changed),
            },
            Node::DoStatement {
                statement,
                expression,
            } => Node::DoStatement {
                statement: ensure_block(arena, statement, &mut changed),
                expression,
            },
            Node::ForStatement {
                initializer,
                condition,
                incrementor,
                statement,
            } => Node::ForStatement {
                initializer,
                condition,
                incrementor,
                statement: ensure_block(arena, statement, &mut changed),
            },
            Node::ForInStatement {
                initializer,
                expression,
                statement,
            } => Node::ForInStatement {
                initializer,
                expression,
                statement: ensure_block(arena, statement, &mut changed),
            },
            _ => return Ok(RuleAction::Keep),
        };
        if !changed {
            return Ok(RuleAction::Keep);
        }
        arena.replace(node, replacement);
        Ok(RuleAction::Revisit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitter::{EmitOptions, Printer};
    use crate::parser::ParserState;
    use crate::walker::TreeWalker;

    fn normalize(source: &str) -> String {
        let mut parser = ParserState::new(source, "test.js").expect("scanner init");
        let root = parser.parse_source_file().expect("parse failed");
        let mut arena = parser.into_arena();
        TreeWalker::new(vec![Box::new(BlockNormalizer)])
            .run(&mut arena, root)
            .expect("walk failed");
        Printer::new(&arena, &EmitOptions::default()).print_source_file(root)
    }

    #[test]
    fn bare_if_branches_are_wrapped() {
        assert_eq!(normalize("if (x) y();"), "if (x) {\n    y();\n}\n");
        assert_eq!(
            normalize("if (x) y(); else z();"),
            "if (x) {\n    y();\n} else {\n    z();\n}\n"
        );
    }

    #[test]
    fn absent_else_stays_absent() {
        assert_eq!(normalize("if (x) { y(); }"), "if (x) {\n    y();\n}\n");
    }

    #[test]
    fn loop_bodies_are_wrapped() {
        assert_eq!(normalize("while (x) y();"), "while (x) {\n    y();\n}\n");
        assert_eq!(
            normalize("for (i = 0; i < 3; i++) f(i);"),
            "for (i = 0; i < 3; i++) {\n    f(i);\n}\n"
        );
        assert_eq!(
            normalize("for (k in o) f(k);"),
            "for (k in o) {\n    f(k);\n}\n"
        );
        assert_eq!(
            normalize("do f(); while (x);"),
            "do {\n    f();\n} while (x);\n"
        );
    }

    #[test]
    fn nested_bodies_normalize_recursively() {
        assert_eq!(
            normalize("while (a) if (b) c();"),
            "while (a) {\n    if (b) {\n        c();\n    }\n}\n"
        );
    }

    #[test]
    fn already_blocked_code_is_untouched() {
        let source = "while (x) {\n    y();\n}\n";
        assert_eq!(normalize(source), source);
    }
}
