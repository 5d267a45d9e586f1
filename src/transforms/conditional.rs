//! Conditional elevation.

use crate::diagnostics::PassError;
use crate::parser::arena::NodeArena;
use crate::parser::ast::{Node, NodeIndex, NodeKind};
use crate::walker::{RewriteRule, RuleAction, WalkPath};

/// Promotes a statement-position ternary with a comma-operator chain in at
/// least one branch into an if/else statement. Both branches become blocks
/// holding one expression statement each, regardless of which branch held
/// the sequence, so the output shape is uniform. The flattener then splits
/// the sequences inside those blocks in the next stage.
pub struct ConditionalElevation;

impl RewriteRule for ConditionalElevation {
    fn name(&self) -> &'static str {
        "conditional-elevation"
    }

    fn kinds(&self) -> &'static [NodeKind] {
        &[NodeKind::ExpressionStatement]
    }

    fn apply(
        &self,
        arena: &mut NodeArena,
        node: NodeIndex,
        _path: &WalkPath,
    ) -> Result<RuleAction, PassError> {
        let Node::ExpressionStatement { expression } = *arena.get(node) else {
            return Ok(RuleAction::Keep);
        };
        let Node::ConditionalExpression {
            condition,
            when_true,
            when_false,
        } = *arena.get(expression)
        else {
            return Ok(RuleAction::Keep);
        };
        let has_sequence_branch = arena.kind(when_true) == NodeKind::SequenceExpression
            || arena.kind(when_false) == NodeKind::SequenceExpression;
        if !has_sequence_branch {
            return Ok(RuleAction::Keep);
        }

        let then_statement = arena.alloc_expression_statement(when_true);
        let then_block = arena.alloc_block(vec![then_statement]);
        let else_statement = arena.alloc_expression_statement(when_false);
        let else_block = arena.alloc_block(vec![else_statement]);
        arena.replace(
            node,
            Node::IfStatement {
                expression: condition,
                then_statement: then_block,
                else_statement: Some(else_block),
            },
        );
        Ok(RuleAction::Revisit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitter::{EmitOptions, Printer};
    use crate::parser::ParserState;
    use crate::walker::TreeWalker;

    fn elevate(source: &str) -> String {
        let mut parser = ParserState::new(source, "test.js").expect("scanner init");
        let root = parser.parse_source_file().expect("parse failed");
        let mut arena = parser.into_arena();
        TreeWalker::new(vec![Box::new(ConditionalElevation)])
            .run(&mut arena, root)
            .expect("walk failed");
        Printer::new(&arena, &EmitOptions::default()).print_source_file(root)
    }

    #[test]
    fn sequence_branch_promotes_to_if_else() {
        assert_eq!(
            elevate("cond ? (a(), b()) : c();"),
            "if (cond) {\n    a(), b();\n} else {\n    c();\n}\n"
        );
    }

    #[test]
    fn sequence_in_the_else_branch_also_triggers() {
        assert_eq!(
            elevate("cond ? a() : (b(), c());"),
            "if (cond) {\n    a();\n} else {\n    b(), c();\n}\n"
        );
    }

    #[test]
    fn plain_ternary_statements_are_left_alone() {
        assert_eq!(elevate("cond ? a() : b();"), "cond ? a() : b();\n");
    }

    #[test]
    fn ternaries_in_expression_position_are_left_alone() {
        assert_eq!(
            elevate("x = cond ? (a(), b()) : c();"),
            "x = cond ? (a(), b()) : c();\n"
        );
    }
}
