//! Canonical source re-emission.
//!
//! The tree carries no parenthesization, so the printer re-derives
//! parentheses from the JavaScript precedence and associativity tables.
//! Output style is fixed apart from [`EmitOptions`]: statement terminators
//! are always present, strings are single-quoted by default, object keys
//! are quoted only when not identifier-shaped, and one statement is
//! printed per line with four-space indentation.

use crate::eval::{is_identifier_text, quote_string};
use crate::parser::ast::{Node, NodeIndex, NodeKind, NodeList};
use crate::parser::arena::NodeArena;
use crate::scanner::SyntaxKind;

/// Rendering options. `render` output is deterministic for fixed options.
#[derive(Clone, Debug)]
pub struct EmitOptions {
    pub indent_width: usize,
    pub single_quote: bool,
}

impl Default for EmitOptions {
    fn default() -> EmitOptions {
        EmitOptions {
            indent_width: 4,
            single_quote: true,
        }
    }
}

// Expression precedence levels, lowest binds loosest. The binary operator
// range (4..=13) matches the parser's climbing table.
const PREC_COMMA: u8 = 1;
const PREC_ASSIGN: u8 = 2;
const PREC_COND: u8 = 3;
const PREC_UNARY: u8 = 14;
const PREC_POSTFIX: u8 = 15;
const PREC_CALL: u8 = 17;
const PREC_MEMBER: u8 = 18;
const PREC_PRIMARY: u8 = 20;

fn binary_operator_precedence(kind: SyntaxKind) -> u8 {
    use SyntaxKind::*;
    match kind {
        BarBarToken => 4,
        AmpersandAmpersandToken => 5,
        BarToken => 6,
        CaretToken => 7,
        AmpersandToken => 8,
        EqualsEqualsToken
        | ExclamationEqualsToken
        | EqualsEqualsEqualsToken
        | ExclamationEqualsEqualsToken => 9,
        LessThanToken | GreaterThanToken | LessThanEqualsToken | GreaterThanEqualsToken
        | InKeyword | InstanceofKeyword => 10,
        LessThanLessThanToken
        | GreaterThanGreaterThanToken
        | GreaterThanGreaterThanGreaterThanToken => 11,
        PlusToken | MinusToken => 12,
        AsteriskToken | SlashToken | PercentToken => 13,
        _ => 0,
    }
}

pub struct Printer<'a> {
    arena: &'a NodeArena,
    options: &'a EmitOptions,
    output: String,
    indent: usize,
    at_line_start: bool,
}

impl<'a> Printer<'a> {
    pub fn new(arena: &'a NodeArena, options: &'a EmitOptions) -> Printer<'a> {
        Printer {
            arena,
            options,
            output: String::new(),
            indent: 0,
            at_line_start: true,
        }
    }

    /// Print a whole source file.
    pub fn print_source_file(mut self, root: NodeIndex) -> String {
        let statements: Vec<NodeIndex> = self
            .arena
            .statement_list(root)
            .map(|list| list.nodes.clone())
            .unwrap_or_default();
        for stmt in statements {
            self.emit_statement(stmt);
        }
        self.output
    }

    // =========================================================================
    // Low-level writing
    // =========================================================================

    fn write(&mut self, text: &str) {
        if self.at_line_start && !text.is_empty() {
            for _ in 0..self.indent * self.options.indent_width {
                self.output.push(' ');
            }
            self.at_line_start = false;
        }
        self.output.push_str(text);
    }

    fn write_line(&mut self) {
        self.output.push('\n');
        self.at_line_start = true;
    }

    fn quote(&self) -> char {
        if self.options.single_quote { '\'' } else { '"' }
    }

    // =========================================================================
    // Statements — each emission finishes its line(s)
    // =========================================================================

    pub fn emit_statement(&mut self, index: NodeIndex) {
        match self.arena.get(index).clone() {
            Node::ExpressionStatement { expression } => {
                // An expression statement must not begin with `{` or
                // `function`; wrap in parens when it would.
                let needs_parens = matches!(
                    self.leftmost_kind(expression),
                    NodeKind::ObjectLiteralExpression | NodeKind::FunctionExpression
                );
                if needs_parens {
                    self.write("(");
                    self.emit_expression(expression, PREC_COMMA);
                    self.write(")");
                } else {
                    self.emit_expression(expression, PREC_COMMA);
                }
                self.write(";");
                self.write_line();
            }
            Node::VariableStatement {
                keyword,
                declarations,
            } => {
                self.emit_variable_declarations(keyword, &declarations);
                self.write(";");
                self.write_line();
            }
            Node::Block { statements } => {
                self.write("{");
                self.write_line();
                self.indent += 1;
                for &stmt in &statements.nodes {
                    self.emit_statement(stmt);
                }
                self.indent -= 1;
                self.write("}");
                self.write_line();
            }
            Node::IfStatement {
                expression,
                then_statement,
                else_statement,
            } => {
                self.write("if (");
                self.emit_expression(expression, PREC_COMMA);
                self.write(")");
                self.emit_embedded_statement(then_statement, else_statement.is_some());
                if let Some(else_statement) = else_statement {
                    self.write("else");
                    if self.arena.kind(else_statement) == NodeKind::IfStatement {
                        self.write(" ");
                        self.emit_statement(else_statement);
                    } else {
                        self.emit_embedded_statement(else_statement, false);
                    }
                }
            }
            Node::WhileStatement {
                expression,
                statement,
            } => {
                self.write("while (");
                self.emit_expression(expression, PREC_COMMA);
                self.write(")");
                self.emit_embedded_statement(statement, false);
            }
            Node::DoStatement {
                statement,
                expression,
            } => {
                self.write("do");
                self.emit_embedded_statement(statement, true);
                self.write("while (");
                self.emit_expression(expression, PREC_COMMA);
                self.write(");");
                self.write_line();
            }
            Node::ForStatement {
                initializer,
                condition,
                incrementor,
                statement,
            } => {
                self.write("for (");
                if let Some(initializer) = initializer {
                    self.emit_for_initializer(initializer);
                }
                self.write(";");
                if let Some(condition) = condition {
                    self.write(" ");
                    self.emit_expression(condition, PREC_COMMA);
                }
                self.write(";");
                if let Some(incrementor) = incrementor {
                    self.write(" ");
                    self.emit_expression(incrementor, PREC_COMMA);
                }
                self.write(")");
                self.emit_embedded_statement(statement, false);
            }
            Node::ForInStatement {
                initializer,
                expression,
                statement,
            } => {
                self.write("for (");
                self.emit_for_initializer(initializer);
                self.write(" in ");
                self.emit_expression(expression, PREC_ASSIGN);
                self.write(")");
                self.emit_embedded_statement(statement, false);
            }
            Node::ReturnStatement { expression } => {
                self.write("return");
                if let Some(expression) = expression {
                    self.write(" ");
                    self.emit_expression(expression, PREC_COMMA);
                }
                self.write(";");
                self.write_line();
            }
            Node::BreakStatement => {
                self.write("break;");
                self.write_line();
            }
            Node::ContinueStatement => {
                self.write("continue;");
                self.write_line();
            }
            Node::ThrowStatement { expression } => {
                self.write("throw ");
                self.emit_expression(expression, PREC_COMMA);
                self.write(";");
                self.write_line();
            }
            Node::EmptyStatement => {
                self.write(";");
                self.write_line();
            }
            Node::FunctionDeclaration {
                name,
                parameters,
                body,
            } => {
                self.write("function ");
                self.emit_expression(name, PREC_PRIMARY);
                self.emit_parameter_list(&parameters);
                self.write(" ");
                self.emit_statement(body);
            }
            // A non-statement node in statement position would be a pass
            // defect; print it as an expression statement rather than panic.
            _ => {
                self.emit_expression(index, PREC_COMMA);
                self.write(";");
                self.write_line();
            }
        }
    }

    /// Loop/conditional bodies: blocks print inline after the header,
    /// bare statements go on their own indented line.
    fn emit_embedded_statement(&mut self, body: NodeIndex, has_trailer: bool) {
        if self.arena.kind(body) == NodeKind::Block {
            self.write(" ");
            let Node::Block { statements } = self.arena.get(body).clone() else {
                return;
            };
            self.write("{");
            self.write_line();
            self.indent += 1;
            for &stmt in &statements.nodes {
                self.emit_statement(stmt);
            }
            self.indent -= 1;
            self.write("}");
            if has_trailer {
                self.write(" ");
            } else {
                self.write_line();
            }
        } else {
            self.write_line();
            self.indent += 1;
            self.emit_statement(body);
            self.indent -= 1;
        }
    }

    fn emit_for_initializer(&mut self, initializer: NodeIndex) {
        if let Node::VariableStatement {
            keyword,
            declarations,
        } = self.arena.get(initializer).clone()
        {
            self.emit_variable_declarations(keyword, &declarations);
        } else {
            self.emit_expression(initializer, PREC_COMMA);
        }
    }

    fn emit_variable_declarations(&mut self, keyword: SyntaxKind, declarations: &NodeList) {
        self.write(keyword.keyword_text().unwrap_or("var"));
        self.write(" ");
        for (i, &decl) in declarations.nodes.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            let Node::VariableDeclaration { name, initializer } = self.arena.get(decl).clone()
            else {
                continue;
            };
            self.emit_expression(name, PREC_PRIMARY);
            if let Some(initializer) = initializer {
                self.write(" = ");
                self.emit_expression(initializer, PREC_ASSIGN);
            }
        }
    }

    fn emit_parameter_list(&mut self, parameters: &NodeList) {
        self.write("(");
        for (i, &param) in parameters.nodes.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.emit_expression(param, PREC_PRIMARY);
        }
        self.write(")");
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    fn expression_precedence(&self, index: NodeIndex) -> u8 {
        match self.arena.get(index) {
            Node::SequenceExpression { .. } => PREC_COMMA,
            Node::BinaryExpression { operator, .. } => {
                if operator.is_assignment_operator() {
                    PREC_ASSIGN
                } else {
                    binary_operator_precedence(*operator)
                }
            }
            Node::ConditionalExpression { .. } => PREC_COND,
            Node::PrefixUnaryExpression { .. } => PREC_UNARY,
            Node::PostfixUnaryExpression { .. } => PREC_POSTFIX,
            Node::CallExpression { .. } => PREC_CALL,
            Node::NewExpression { .. }
            | Node::PropertyAccessExpression { .. }
            | Node::ElementAccessExpression { .. } => PREC_MEMBER,
            _ => PREC_PRIMARY,
        }
    }

    /// First lexical token's node kind, for the `{`/`function` statement
    /// restriction.
    fn leftmost_kind(&self, index: NodeIndex) -> NodeKind {
        let mut current = index;
        loop {
            current = match self.arena.get(current) {
                Node::BinaryExpression { left, .. } => *left,
                Node::SequenceExpression { expressions } => match expressions.nodes.first() {
                    Some(first) => *first,
                    None => return NodeKind::SequenceExpression,
                },
                Node::ConditionalExpression { condition, .. } => *condition,
                Node::CallExpression { expression, .. }
                | Node::PropertyAccessExpression { expression, .. }
                | Node::ElementAccessExpression { expression, .. } => *expression,
                Node::PostfixUnaryExpression { operand, .. } => *operand,
                _ => return self.arena.kind(current),
            };
        }
    }

    pub fn emit_expression(&mut self, index: NodeIndex, min_precedence: u8) {
        if self.expression_precedence(index) < min_precedence {
            self.write("(");
            self.emit_expression(index, PREC_COMMA);
            self.write(")");
            return;
        }

        match self.arena.get(index).clone() {
            Node::Identifier { text } => self.write(&text),
            Node::NumericLiteral { text, .. } => self.write(&text),
            Node::StringLiteral { value, .. } => {
                let quoted = quote_string(&value, self.quote());
                self.write(&quoted);
            }
            Node::BooleanLiteral { value } => self.write(if value { "true" } else { "false" }),
            Node::NullLiteral => self.write("null"),
            Node::ThisExpression => self.write("this"),
            Node::SequenceExpression { expressions } => {
                for (i, &expr) in expressions.nodes.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    self.emit_expression(expr, PREC_ASSIGN);
                }
            }
            Node::BinaryExpression {
                left,
                operator,
                right,
            } => {
                if operator.is_assignment_operator() {
                    self.emit_expression(left, PREC_UNARY);
                    self.write(" ");
                    self.write(operator.operator_text());
                    self.write(" ");
                    self.emit_expression(right, PREC_ASSIGN);
                } else {
                    let precedence = binary_operator_precedence(operator);
                    self.emit_expression(left, precedence);
                    self.write(" ");
                    self.write(operator.operator_text());
                    self.write(" ");
                    self.emit_expression(right, precedence + 1);
                }
            }
            Node::ConditionalExpression {
                condition,
                when_true,
                when_false,
            } => {
                self.emit_expression(condition, PREC_COND + 1);
                self.write(" ? ");
                self.emit_expression(when_true, PREC_ASSIGN);
                self.write(" : ");
                self.emit_expression(when_false, PREC_ASSIGN);
            }
            Node::PrefixUnaryExpression { operator, operand } => {
                let text = operator.operator_text();
                self.write(text);
                if text.ends_with(|c: char| c.is_ascii_alphabetic())
                    || self.needs_space_after_sign(operator, operand)
                {
                    self.write(" ");
                }
                self.emit_expression(operand, PREC_UNARY);
            }
            Node::PostfixUnaryExpression { operator, operand } => {
                self.emit_expression(operand, PREC_POSTFIX);
                self.write(operator.operator_text());
            }
            Node::CallExpression {
                expression,
                arguments,
            } => {
                // `(new X)(…)` must keep its parens: without them the
                // argument list would bind to the `new`.
                let callee_is_bare_new = matches!(
                    self.arena.get(expression),
                    Node::NewExpression { arguments: None, .. }
                );
                if callee_is_bare_new {
                    self.write("(");
                    self.emit_expression(expression, PREC_COMMA);
                    self.write(")");
                } else {
                    self.emit_expression(expression, PREC_CALL);
                }
                self.emit_argument_list(&arguments);
            }
            Node::NewExpression {
                expression,
                arguments,
            } => {
                self.write("new ");
                self.emit_expression(expression, PREC_MEMBER);
                if let Some(arguments) = arguments {
                    self.emit_argument_list(&arguments);
                }
            }
            Node::PropertyAccessExpression { expression, name } => {
                // A dot directly after an integer literal would read as a
                // decimal point.
                if self.arena.kind(expression) == NodeKind::NumericLiteral {
                    self.write("(");
                    self.emit_expression(expression, PREC_COMMA);
                    self.write(")");
                } else {
                    self.emit_expression(expression, PREC_CALL);
                }
                self.write(".");
                self.emit_expression(name, PREC_PRIMARY);
            }
            Node::ElementAccessExpression {
                expression,
                argument_expression,
            } => {
                self.emit_expression(expression, PREC_CALL);
                self.write("[");
                self.emit_expression(argument_expression, PREC_COMMA);
                self.write("]");
            }
            Node::ArrayLiteralExpression { elements } => {
                self.write("[");
                for (i, &element) in elements.nodes.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    self.emit_expression(element, PREC_ASSIGN);
                }
                self.write("]");
            }
            Node::ObjectLiteralExpression { properties } => {
                if properties.is_empty() {
                    self.write("{}");
                    return;
                }
                self.write("{ ");
                for (i, &property) in properties.nodes.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    self.emit_expression(property, PREC_PRIMARY);
                }
                self.write(" }");
            }
            Node::PropertyAssignment { name, initializer } => {
                self.emit_object_key(name);
                self.write(": ");
                self.emit_expression(initializer, PREC_ASSIGN);
            }
            Node::FunctionExpression {
                name,
                parameters,
                body,
            } => {
                self.write("function ");
                if let Some(name) = name {
                    self.emit_expression(name, PREC_PRIMARY);
                }
                self.emit_parameter_list(&parameters);
                self.write(" ");
                self.emit_function_body(body);
            }
            // Statement nodes never reach expression position; emit
            // nothing rather than panic on a defective tree.
            _ => {}
        }
    }

    /// Keys are quoted only when not identifier-shaped.
    fn emit_object_key(&mut self, name: NodeIndex) {
        match self.arena.get(name).clone() {
            Node::StringLiteral { value, .. } => {
                if is_identifier_text(&value) {
                    self.write(&value);
                } else {
                    let quoted = quote_string(&value, self.quote());
                    self.write(&quoted);
                }
            }
            Node::NumericLiteral { text, .. } => self.write(&text),
            Node::Identifier { text } => self.write(&text),
            _ => {}
        }
    }

    fn emit_function_body(&mut self, body: NodeIndex) {
        let Node::Block { statements } = self.arena.get(body).clone() else {
            return;
        };
        if statements.is_empty() {
            self.write("{}");
            return;
        }
        self.write("{");
        self.write_line();
        self.indent += 1;
        for &stmt in &statements.nodes {
            self.emit_statement(stmt);
        }
        self.indent -= 1;
        self.write("}");
    }

    fn emit_argument_list(&mut self, arguments: &NodeList) {
        self.write("(");
        for (i, &argument) in arguments.nodes.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.emit_expression(argument, PREC_ASSIGN);
        }
        self.write(")");
    }

    /// `- -x`, `- --x` and `-(-1)` need a separating space so the minus
    /// signs do not fuse into `--`.
    fn needs_space_after_sign(&self, operator: SyntaxKind, operand: NodeIndex) -> bool {
        let fused_prefix = match operator {
            SyntaxKind::MinusToken => SyntaxKind::MinusToken,
            SyntaxKind::PlusToken => SyntaxKind::PlusToken,
            _ => return false,
        };
        match self.arena.get(operand) {
            Node::PrefixUnaryExpression { operator, .. } => {
                *operator == fused_prefix
                    || (fused_prefix == SyntaxKind::MinusToken
                        && *operator == SyntaxKind::MinusMinusToken)
                    || (fused_prefix == SyntaxKind::PlusToken
                        && *operator == SyntaxKind::PlusPlusToken)
            }
            Node::NumericLiteral { text, .. } => {
                fused_prefix == SyntaxKind::MinusToken && text.starts_with('-')
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ParserState;

    fn render(source: &str) -> String {
        let mut parser = ParserState::new(source, "test.js").expect("scanner init");
        let root = parser.parse_source_file().expect("parse failed");
        let arena = parser.into_arena();
        Printer::new(&arena, &EmitOptions::default()).print_source_file(root)
    }

    #[test]
    fn precedence_parens_are_restored() {
        assert_eq!(render("x = (1 + 2) * 3;"), "x = (1 + 2) * 3;\n");
        assert_eq!(render("x = 1 + 2 * 3;"), "x = 1 + 2 * 3;\n");
        assert_eq!(render("x = a - (b - c);"), "x = a - (b - c);\n");
    }

    #[test]
    fn redundant_parens_disappear() {
        assert_eq!(render("x = ((1)) + (2 * 3);"), "x = 1 + 2 * 3;\n");
    }

    #[test]
    fn sequence_in_statement_position_has_no_parens() {
        assert_eq!(render("a(), b();"), "a(), b();\n");
    }

    #[test]
    fn nested_sequence_keeps_parens() {
        assert_eq!(render("x = (a, b);"), "x = (a, b);\n");
    }

    #[test]
    fn strings_are_single_quoted() {
        assert_eq!(render("x = \"it's\";"), "x = 'it\\'s';\n");
    }

    #[test]
    fn object_keys_minimally_quoted() {
        assert_eq!(
            render("x = { 'a': 1, 'b-c': 2, 3: 4 };"),
            "x = { a: 1, 'b-c': 2, 3: 4 };\n"
        );
    }

    #[test]
    fn blocks_and_bodies() {
        assert_eq!(
            render("if (x) { y(); } else { z(); }"),
            "if (x) {\n    y();\n} else {\n    z();\n}\n"
        );
        assert_eq!(render("while (x) { y(); }"), "while (x) {\n    y();\n}\n");
    }

    #[test]
    fn else_if_chains_stay_flat() {
        assert_eq!(
            render("if (a) { b(); } else if (c) { d(); }"),
            "if (a) {\n    b();\n} else if (c) {\n    d();\n}\n"
        );
    }

    #[test]
    fn do_while_round_trips() {
        assert_eq!(render("do { a(); } while (x);"), "do {\n    a();\n} while (x);\n");
    }

    #[test]
    fn for_headers() {
        assert_eq!(
            render("for (var i = 0; i < 3; i++) { f(i); }"),
            "for (var i = 0; i < 3; i++) {\n    f(i);\n}\n"
        );
        assert_eq!(
            render("for (var k in o) { f(k); }"),
            "for (var k in o) {\n    f(k);\n}\n"
        );
    }

    #[test]
    fn function_expression_statement_is_parenthesized() {
        // The tree has no parens, so the statement restriction re-wraps the
        // whole expression.
        assert_eq!(
            render("(function () { a(); })();"),
            "(function () {\n    a();\n}());\n"
        );
    }

    #[test]
    fn function_keyword_is_spaced_from_the_parameter_list() {
        assert_eq!(
            render("x = function () { a(); };"),
            "x = function () {\n    a();\n};\n"
        );
        assert_eq!(
            render("x = function f() { a(); };"),
            "x = function f() {\n    a();\n};\n"
        );
    }

    #[test]
    fn unary_minus_does_not_fuse() {
        assert_eq!(render("x = -(-y);"), "x = - -y;\n");
        assert_eq!(render("x = 1 - -2;"), "x = 1 - -2;\n");
    }

    #[test]
    fn bare_new_callee_keeps_parens() {
        assert_eq!(render("x = (new F)();"), "x = (new F)();\n");
        assert_eq!(render("x = new F().g();"), "x = new F().g();\n");
    }

    #[test]
    fn conditional_expression_shapes() {
        assert_eq!(render("x = a ? b : c;"), "x = a ? b : c;\n");
        assert_eq!(render("x = (a = b) ? c : d;"), "x = (a = b) ? c : d;\n");
    }
}
