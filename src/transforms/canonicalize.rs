//! Literal spelling canonicalization.

use crate::diagnostics::PassError;
use crate::eval::{format_number, quote_string};
use crate::parser::arena::NodeArena;
use crate::parser::ast::{Node, NodeIndex, NodeKind};
use crate::walker::{RewriteRule, RuleAction, WalkPath};

/// Rewrites numeric literals to their canonical decimal spelling (hex,
/// legacy octal, exponent and redundant forms all collapse) and string
/// literals to the canonical single-quoted spelling. Literals already
/// canonical are left untouched, which keeps the pass idempotent.
pub struct LiteralCanonicalizer;

impl RewriteRule for LiteralCanonicalizer {
    fn name(&self) -> &'static str {
        "literal-canonicalizer"
    }

    fn kinds(&self) -> &'static [NodeKind] {
        &[NodeKind::NumericLiteral, NodeKind::StringLiteral]
    }

    fn apply(
        &self,
        arena: &mut NodeArena,
        node: NodeIndex,
        _path: &WalkPath,
    ) -> Result<RuleAction, PassError> {
        match arena.get(node).clone() {
            Node::NumericLiteral { value, text } => {
                let canonical = format_number(value);
                if text == canonical {
                    return Ok(RuleAction::Keep);
                }
                arena.replace(
                    node,
                    Node::NumericLiteral {
                        value,
                        text: canonical,
                    },
                );
                Ok(RuleAction::Revisit)
            }
            Node::StringLiteral { value, text } => {
                let canonical = quote_string(&value, '\'');
                if text == canonical {
                    return Ok(RuleAction::Keep);
                }
                arena.replace(
                    node,
                    Node::StringLiteral {
                        text: canonical,
                        value,
                    },
                );
                Ok(RuleAction::Revisit)
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

    fn canonicalize(source: &str) -> String {
        let mut parser = ParserState::new(source, "test.js").expect("scanner init");
        let root = parser.parse_source_file().expect("parse failed");
        let mut arena = parser.into_arena();
        TreeWalker::new(vec![Box::new(LiteralCanonicalizer)])
            .run(&mut arena, root)
            .expect("walk failed");
        Printer::new(&arena, &EmitOptions::default()).print_source_file(root)
    }

    #[test]
    fn hex_octal_and_exponent_become_decimal() {
        assert_eq!(canonicalize("x = 0x10;"), "x = 16;\n");
        assert_eq!(canonicalize("x = 0777;"), "x = 511;\n");
        assert_eq!(canonicalize("x = 1e3;"), "x = 1000;\n");
    }

    #[test]
    fn redundant_numeric_forms_collapse() {
        assert_eq!(canonicalize("x = 1.50;"), "x = 1.5;\n");
        assert_eq!(canonicalize("x = 016;"), "x = 14;\n");
    }

    #[test]
    fn canonical_numbers_survive_unchanged() {
        assert_eq!(canonicalize("x = 42;"), "x = 42;\n");
        assert_eq!(canonicalize("x = 2.5;"), "x = 2.5;\n");
    }

    #[test]
    fn strings_are_requoted() {
        assert_eq!(canonicalize("x = \"abc\";"), "x = 'abc';\n");
        assert_eq!(canonicalize("x = \"it's\";"), "x = 'it\\'s';\n");
    }
}
