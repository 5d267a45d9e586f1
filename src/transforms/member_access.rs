//! Member access normalization.

use crate::diagnostics::PassError;
use crate::eval::is_identifier_text;
use crate::parser::arena::NodeArena;
use crate::parser::ast::{Node, NodeIndex, NodeKind};
use crate::walker::{RewriteRule, RuleAction, WalkPath};

/// Rewrites `obj["key"]` to `obj.key` when the key is identifier-shaped:
/// first character not a digit, every character ASCII alphanumeric, `_` or
/// `$`. Keys that are reserved words still qualify; the bracket form is
/// only kept for keys the dot form cannot spell.
pub struct MemberAccessNormalizer;

impl RewriteRule for MemberAccessNormalizer {
    fn name(&self) -> &'static str {
        "member-access-normalizer"
    }

    fn kinds(&self) -> &'static [NodeKind] {
        &[NodeKind::ElementAccessExpression]
    }

    fn apply(
        &self,
        arena: &mut NodeArena,
        node: NodeIndex,
        _path: &WalkPath,
    ) -> Result<RuleAction, PassError> {
        let Node::ElementAccessExpression {
            expression,
            argument_expression,
        } = *arena.get(node)
        else {
            return Ok(RuleAction::Keep);
        };
        let Some(key) = arena.string_value(argument_expression) else {
            return Ok(RuleAction::Keep);
        };
        if !is_identifier_text(key) {
            return Ok(RuleAction::Keep);
        }
        let key = key.to_owned();
        let name = arena.alloc_identifier(key);
        arena.replace(node, Node::PropertyAccessExpression { expression, name });
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
        TreeWalker::new(vec![Box::new(MemberAccessNormalizer)])
            .run(&mut arena, root)
            .expect("walk failed");
        Printer::new(&arena, &EmitOptions::default()).print_source_file(root)
    }

    #[test]
    fn identifier_shaped_keys_become_dot_access() {
        assert_eq!(normalize("x = obj['prop_1'];"), "x = obj.prop_1;\n");
        assert_eq!(normalize("x = obj['$a'];"), "x = obj.$a;\n");
    }

    #[test]
    fn chained_accesses_normalize_throughout() {
        assert_eq!(normalize("x = a['b']['c'];"), "x = a.b.c;\n");
        assert_eq!(normalize("f(a['b'])['c'] = 1;"), "f(a.b).c = 1;\n");
    }

    #[test]
    fn non_identifier_keys_stay_bracketed() {
        assert_eq!(normalize("x = obj['1prop'];"), "x = obj['1prop'];\n");
        assert_eq!(normalize("x = obj['a-b'];"), "x = obj['a-b'];\n");
        assert_eq!(normalize("x = obj[''];"), "x = obj[''];\n");
    }

    #[test]
    fn computed_and_numeric_indices_are_untouched() {
        assert_eq!(normalize("x = obj[key];"), "x = obj[key];\n");
        assert_eq!(normalize("x = arr[0];"), "x = arr[0];\n");
    }
}
