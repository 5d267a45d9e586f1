//! Recursive-descent parser for the ES5-era grammar subset.
//!
//! Produces a [`NodeArena`] plus the root `SourceFile` index. Precedence
//! climbing handles binary and assignment operators; a `no_in` flag is
//! threaded through expression parsing so `for (x in y)` headers are not
//! misread as `in` relational expressions. Statement termination follows a
//! simplified automatic-semicolon-insertion rule: an explicit `;`, a `}`,
//! end of file, or a preceding line break all end a statement.
//!
//! Out-of-subset syntax (regex literals, template strings, classes, arrow
//! functions, destructuring, `switch`, `try`, labels) is rejected with a
//! located [`ParseError`] rather than guessed at.

pub mod arena;
pub mod ast;

pub use arena::NodeArena;
pub use ast::{Node, NodeIndex, NodeKind, NodeList};

use crate::diagnostics::ParseError;
use crate::scanner::{Scanner, SyntaxKind, Token};
use crate::span::{Span, line_column_at};
use tracing::trace;

pub struct ParserState<'a> {
    source: &'a str,
    file_name: &'a str,
    scanner: Scanner<'a>,
    arena: NodeArena,
    token: Token,
    prev_token_end: u32,
}

impl<'a> ParserState<'a> {
    pub fn new(source: &'a str, file_name: &'a str) -> Result<ParserState<'a>, ParseError> {
        let mut scanner = Scanner::new(source, file_name);
        let token = scanner.scan()?;
        Ok(ParserState {
            source,
            file_name,
            scanner,
            arena: NodeArena::new(),
            token,
            prev_token_end: 0,
        })
    }

    pub fn into_arena(self) -> NodeArena {
        self.arena
    }

    /// Parse the whole source file and return the root index.
    pub fn parse_source_file(&mut self) -> Result<NodeIndex, ParseError> {
        let mut statements = Vec::new();
        while self.token.kind != SyntaxKind::EndOfFile {
            statements.push(self.parse_statement()?);
        }
        trace!(nodes = self.arena.len(), "parsed source file");
        let root = self.arena.add(Node::SourceFile {
            statements: NodeList::new(statements),
        });
        self.arena
            .set_span(root, Span::new(0, self.source.len() as u32));
        Ok(root)
    }

    // =========================================================================
    // Token plumbing
    // =========================================================================

    fn next_token(&mut self) -> Result<(), ParseError> {
        self.prev_token_end = self.token.span.end;
        self.token = self.scanner.scan()?;
        Ok(())
    }

    fn eat(&mut self, kind: SyntaxKind) -> Result<bool, ParseError> {
        if self.token.kind == kind {
            self.next_token()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn expect(&mut self, kind: SyntaxKind) -> Result<(), ParseError> {
        if self.token.kind == kind {
            self.next_token()
        } else {
            let expected = match kind.operator_text() {
                "" => kind.keyword_text().unwrap_or("token"),
                text => text,
            };
            Err(self.error(format!(
                "expected `{expected}` but found `{}`",
                self.token_description()
            )))
        }
    }

    fn token_description(&self) -> String {
        match self.token.kind {
            SyntaxKind::EndOfFile => "end of file".to_string(),
            _ => self.scanner.token_text(&self.token).to_string(),
        }
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError {
            file_name: self.file_name.to_string(),
            message: message.into(),
            span: self.token.span,
            location: line_column_at(self.source, self.token.span.start),
        }
    }

    fn finish(&mut self, index: NodeIndex, start: u32) -> NodeIndex {
        self.arena
            .set_span(index, Span::new(start, self.prev_token_end));
        index
    }

    /// Simplified automatic semicolon insertion.
    fn parse_semicolon(&mut self) -> Result<(), ParseError> {
        if self.eat(SyntaxKind::SemicolonToken)? {
            return Ok(());
        }
        if self.token.kind == SyntaxKind::CloseBraceToken
            || self.token.kind == SyntaxKind::EndOfFile
            || self.token.preceded_by_line_break
        {
            return Ok(());
        }
        Err(self.error(format!(
            "expected `;` but found `{}`",
            self.token_description()
        )))
    }

    // =========================================================================
    // Statements
    // =========================================================================

    fn parse_statement(&mut self) -> Result<NodeIndex, ParseError> {
        let start = self.token.span.start;
        match self.token.kind {
            SyntaxKind::OpenBraceToken => self.parse_block(),
            SyntaxKind::SemicolonToken => {
                self.next_token()?;
                let idx = self.arena.add(Node::EmptyStatement);
                Ok(self.finish(idx, start))
            }
            SyntaxKind::VarKeyword | SyntaxKind::LetKeyword | SyntaxKind::ConstKeyword => {
                let stmt = self.parse_variable_statement(false)?;
                self.parse_semicolon()?;
                Ok(self.finish(stmt, start))
            }
            SyntaxKind::IfKeyword => self.parse_if_statement(),
            SyntaxKind::WhileKeyword => self.parse_while_statement(),
            SyntaxKind::DoKeyword => self.parse_do_statement(),
            SyntaxKind::ForKeyword => self.parse_for_statement(),
            SyntaxKind::FunctionKeyword => self.parse_function_declaration(),
            SyntaxKind::ReturnKeyword => {
                self.next_token()?;
                let expression = if self.token.kind == SyntaxKind::SemicolonToken
                    || self.token.kind == SyntaxKind::CloseBraceToken
                    || self.token.kind == SyntaxKind::EndOfFile
                    || self.token.preceded_by_line_break
                {
                    None
                } else {
                    Some(self.parse_expression(false)?)
                };
                self.parse_semicolon()?;
                let idx = self.arena.add(Node::ReturnStatement { expression });
                Ok(self.finish(idx, start))
            }
            SyntaxKind::BreakKeyword => {
                self.next_token()?;
                self.parse_semicolon()?;
                let idx = self.arena.add(Node::BreakStatement);
                Ok(self.finish(idx, start))
            }
            SyntaxKind::ContinueKeyword => {
                self.next_token()?;
                self.parse_semicolon()?;
                let idx = self.arena.add(Node::ContinueStatement);
                Ok(self.finish(idx, start))
            }
            SyntaxKind::ThrowKeyword => {
                self.next_token()?;
                if self.token.preceded_by_line_break {
                    return Err(self.error("line break not allowed after `throw`"));
                }
                let expression = self.parse_expression(false)?;
                self.parse_semicolon()?;
                let idx = self.arena.add(Node::ThrowStatement { expression });
                Ok(self.finish(idx, start))
            }
            _ => {
                let expression = self.parse_expression(false)?;
                self.parse_semicolon()?;
                let idx = self.arena.add(Node::ExpressionStatement { expression });
                Ok(self.finish(idx, start))
            }
        }
    }

    fn parse_block(&mut self) -> Result<NodeIndex, ParseError> {
        let start = self.token.span.start;
        self.expect(SyntaxKind::OpenBraceToken)?;
        let mut statements = Vec::new();
        while self.token.kind != SyntaxKind::CloseBraceToken {
            if self.token.kind == SyntaxKind::EndOfFile {
                return Err(self.error("unexpected end of file in block"));
            }
            statements.push(self.parse_statement()?);
        }
        self.expect(SyntaxKind::CloseBraceToken)?;
        let idx = self.arena.add(Node::Block {
            statements: NodeList::new(statements),
        });
        Ok(self.finish(idx, start))
    }

    /// Parse `var/let/const` declarations without the trailing semicolon,
    /// so the same routine serves statements and `for` headers.
    fn parse_variable_statement(&mut self, no_in: bool) -> Result<NodeIndex, ParseError> {
        let keyword = self.token.kind;
        self.next_token()?;
        let mut declarations = Vec::new();
        loop {
            let decl_start = self.token.span.start;
            let name = self.parse_identifier()?;
            let initializer = if self.eat(SyntaxKind::EqualsToken)? {
                Some(self.parse_assignment_expression(no_in)?)
            } else {
                None
            };
            let decl = self.arena.add(Node::VariableDeclaration { name, initializer });
            declarations.push(self.finish(decl, decl_start));
            if !self.eat(SyntaxKind::CommaToken)? {
                break;
            }
        }
        Ok(self.arena.add(Node::VariableStatement {
            keyword,
            declarations: NodeList::new(declarations),
        }))
    }

    fn parse_if_statement(&mut self) -> Result<NodeIndex, ParseError> {
        let start = self.token.span.start;
        self.expect(SyntaxKind::IfKeyword)?;
        self.expect(SyntaxKind::OpenParenToken)?;
        let expression = self.parse_expression(false)?;
        self.expect(SyntaxKind::CloseParenToken)?;
        let then_statement = self.parse_statement()?;
        let else_statement = if self.eat(SyntaxKind::ElseKeyword)? {
            Some(self.parse_statement()?)
        } else {
            None
        };
        let idx = self.arena.add(Node::IfStatement {
            expression,
            then_statement,
            else_statement,
        });
        Ok(self.finish(idx, start))
    }

    fn parse_while_statement(&mut self) -> Result<NodeIndex, ParseError> {
        let start = self.token.span.start;
        self.expect(SyntaxKind::WhileKeyword)?;
        self.expect(SyntaxKind::OpenParenToken)?;
        let expression = self.parse_expression(false)?;
        self.expect(SyntaxKind::CloseParenToken)?;
        let statement = self.parse_statement()?;
        let idx = self.arena.add(Node::WhileStatement {
            expression,
            statement,
        });
        Ok(self.finish(idx, start))
    }

    fn parse_do_statement(&mut self) -> Result<NodeIndex, ParseError> {
        let start = self.token.span.start;
        self.expect(SyntaxKind::DoKeyword)?;
        let statement = self.parse_statement()?;
        self.expect(SyntaxKind::WhileKeyword)?;
        self.expect(SyntaxKind::OpenParenToken)?;
        let expression = self.parse_expression(false)?;
        self.expect(SyntaxKind::CloseParenToken)?;
        // The trailing semicolon after do/while is optional in practice.
        self.eat(SyntaxKind::SemicolonToken)?;
        let idx = self.arena.add(Node::DoStatement {
            statement,
            expression,
        });
        Ok(self.finish(idx, start))
    }

    fn parse_for_statement(&mut self) -> Result<NodeIndex, ParseError> {
        let start = self.token.span.start;
        self.expect(SyntaxKind::ForKeyword)?;
        self.expect(SyntaxKind::OpenParenToken)?;

        let initializer = if self.token.kind == SyntaxKind::SemicolonToken {
            None
        } else if matches!(
            self.token.kind,
            SyntaxKind::VarKeyword | SyntaxKind::LetKeyword | SyntaxKind::ConstKeyword
        ) {
            Some(self.parse_variable_statement(true)?)
        } else {
            Some(self.parse_expression(true)?)
        };

        if self.token.kind == SyntaxKind::InKeyword {
            let initializer = initializer
                .ok_or_else(|| self.error("`for (… in …)` requires a loop variable"))?;
            if let Node::VariableStatement { declarations, .. } = self.arena.get(initializer) {
                if declarations.len() != 1 {
                    return Err(
                        self.error("`for (… in …)` allows exactly one declared loop variable")
                    );
                }
            }
            self.next_token()?;
            let expression = self.parse_expression(false)?;
            self.expect(SyntaxKind::CloseParenToken)?;
            let statement = self.parse_statement()?;
            let idx = self.arena.add(Node::ForInStatement {
                initializer,
                expression,
                statement,
            });
            return Ok(self.finish(idx, start));
        }

        self.expect(SyntaxKind::SemicolonToken)?;
        let condition = if self.token.kind == SyntaxKind::SemicolonToken {
            None
        } else {
            Some(self.parse_expression(false)?)
        };
        self.expect(SyntaxKind::SemicolonToken)?;
        let incrementor = if self.token.kind == SyntaxKind::CloseParenToken {
            None
        } else {
            Some(self.parse_expression(false)?)
        };
        self.expect(SyntaxKind::CloseParenToken)?;
        let statement = self.parse_statement()?;
        let idx = self.arena.add(Node::ForStatement {
            initializer,
            condition,
            incrementor,
            statement,
        });
        Ok(self.finish(idx, start))
    }

    fn parse_function_declaration(&mut self) -> Result<NodeIndex, ParseError> {
        let start = self.token.span.start;
        self.expect(SyntaxKind::FunctionKeyword)?;
        let name = self.parse_identifier()?;
        let parameters = self.parse_parameter_list()?;
        let body = self.parse_block()?;
        let idx = self.arena.add(Node::FunctionDeclaration {
            name,
            parameters,
            body,
        });
        Ok(self.finish(idx, start))
    }

    fn parse_parameter_list(&mut self) -> Result<NodeList, ParseError> {
        self.expect(SyntaxKind::OpenParenToken)?;
        let mut parameters = Vec::new();
        if self.token.kind != SyntaxKind::CloseParenToken {
            loop {
                parameters.push(self.parse_identifier()?);
                if !self.eat(SyntaxKind::CommaToken)? {
                    break;
                }
            }
        }
        self.expect(SyntaxKind::CloseParenToken)?;
        Ok(NodeList::new(parameters))
    }

    fn parse_identifier(&mut self) -> Result<NodeIndex, ParseError> {
        if self.token.kind != SyntaxKind::Identifier {
            return Err(self.error(format!(
                "expected identifier but found `{}`",
                self.token_description()
            )));
        }
        let start = self.token.span.start;
        let text = self.scanner.token_value().to_string();
        self.next_token()?;
        let idx = self.arena.add(Node::Identifier { text });
        Ok(self.finish(idx, start))
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    /// Full expression including the comma operator.
    fn parse_expression(&mut self, no_in: bool) -> Result<NodeIndex, ParseError> {
        let first = self.parse_assignment_expression(no_in)?;
        if self.token.kind != SyntaxKind::CommaToken {
            return Ok(first);
        }
        let mut expressions = vec![first];
        while self.eat(SyntaxKind::CommaToken)? {
            expressions.push(self.parse_assignment_expression(no_in)?);
        }
        Ok(self.arena.add(Node::SequenceExpression {
            expressions: NodeList::new(expressions),
        }))
    }

    fn parse_assignment_expression(&mut self, no_in: bool) -> Result<NodeIndex, ParseError> {
        let left = self.parse_conditional_expression(no_in)?;
        if !self.token.kind.is_assignment_operator() {
            return Ok(left);
        }
        if !matches!(
            self.arena.kind(left),
            NodeKind::Identifier
                | NodeKind::PropertyAccessExpression
                | NodeKind::ElementAccessExpression
        ) {
            return Err(self.error("invalid assignment target"));
        }
        let operator = self.token.kind;
        self.next_token()?;
        let right = self.parse_assignment_expression(no_in)?;
        Ok(self.arena.add(Node::BinaryExpression {
            left,
            operator,
            right,
        }))
    }

    fn parse_conditional_expression(&mut self, no_in: bool) -> Result<NodeIndex, ParseError> {
        let condition = self.parse_binary_expression(LOWEST_BINARY_PRECEDENCE, no_in)?;
        if !self.eat(SyntaxKind::QuestionToken)? {
            return Ok(condition);
        }
        let when_true = self.parse_assignment_expression(false)?;
        self.expect(SyntaxKind::ColonToken)?;
        let when_false = self.parse_assignment_expression(no_in)?;
        Ok(self.arena.add(Node::ConditionalExpression {
            condition,
            when_true,
            when_false,
        }))
    }

    fn parse_binary_expression(
        &mut self,
        min_precedence: u8,
        no_in: bool,
    ) -> Result<NodeIndex, ParseError> {
        let mut left = self.parse_unary_expression()?;
        loop {
            let precedence = binary_precedence(self.token.kind, no_in);
            if precedence == 0 || precedence < min_precedence {
                break;
            }
            let operator = self.token.kind;
            self.next_token()?;
            let right = self.parse_binary_expression(precedence + 1, no_in)?;
            left = self.arena.add(Node::BinaryExpression {
                left,
                operator,
                right,
            });
        }
        Ok(left)
    }

    fn parse_unary_expression(&mut self) -> Result<NodeIndex, ParseError> {
        match self.token.kind {
            SyntaxKind::PlusToken
            | SyntaxKind::MinusToken
            | SyntaxKind::TildeToken
            | SyntaxKind::ExclamationToken
            | SyntaxKind::TypeofKeyword
            | SyntaxKind::VoidKeyword
            | SyntaxKind::DeleteKeyword
            | SyntaxKind::PlusPlusToken
            | SyntaxKind::MinusMinusToken => {
                let operator = self.token.kind;
                self.next_token()?;
                let operand = self.parse_unary_expression()?;
                Ok(self
                    .arena
                    .add(Node::PrefixUnaryExpression { operator, operand }))
            }
            _ => self.parse_postfix_expression(),
        }
    }

    fn parse_postfix_expression(&mut self) -> Result<NodeIndex, ParseError> {
        let operand = self.parse_call_or_member_expression(true)?;
        if matches!(
            self.token.kind,
            SyntaxKind::PlusPlusToken | SyntaxKind::MinusMinusToken
        ) && !self.token.preceded_by_line_break
        {
            let operator = self.token.kind;
            self.next_token()?;
            return Ok(self
                .arena
                .add(Node::PostfixUnaryExpression { operator, operand }));
        }
        Ok(operand)
    }

    fn parse_call_or_member_expression(
        &mut self,
        allow_call: bool,
    ) -> Result<NodeIndex, ParseError> {
        let mut expression = if self.token.kind == SyntaxKind::NewKeyword {
            self.parse_new_expression()?
        } else {
            self.parse_primary_expression()?
        };

        loop {
            match self.token.kind {
                SyntaxKind::DotToken => {
                    self.next_token()?;
                    let name = self.parse_property_name_identifier()?;
                    expression = self
                        .arena
                        .add(Node::PropertyAccessExpression { expression, name });
                }
                SyntaxKind::OpenBracketToken => {
                    self.next_token()?;
                    let argument_expression = self.parse_expression(false)?;
                    self.expect(SyntaxKind::CloseBracketToken)?;
                    expression = self.arena.add(Node::ElementAccessExpression {
                        expression,
                        argument_expression,
                    });
                }
                SyntaxKind::OpenParenToken if allow_call => {
                    let arguments = self.parse_arguments()?;
                    expression = self.arena.add(Node::CallExpression {
                        expression,
                        arguments,
                    });
                }
                _ => break,
            }
        }
        Ok(expression)
    }

    /// Property names after `.` accept reserved words (`a.in`, `a.new`),
    /// which are IdentifierName, not Identifier, in the grammar.
    fn parse_property_name_identifier(&mut self) -> Result<NodeIndex, ParseError> {
        let text = if self.token.kind == SyntaxKind::Identifier {
            self.scanner.token_value().to_string()
        } else if let Some(keyword) = self.token.kind.keyword_text() {
            keyword.to_string()
        } else {
            return Err(self.error(format!(
                "expected property name but found `{}`",
                self.token_description()
            )));
        };
        self.next_token()?;
        Ok(self.arena.add(Node::Identifier { text }))
    }

    fn parse_new_expression(&mut self) -> Result<NodeIndex, ParseError> {
        self.expect(SyntaxKind::NewKeyword)?;
        let expression = self.parse_call_or_member_expression(false)?;
        let arguments = if self.token.kind == SyntaxKind::OpenParenToken {
            Some(self.parse_arguments()?)
        } else {
            None
        };
        Ok(self.arena.add(Node::NewExpression {
            expression,
            arguments,
        }))
    }

    fn parse_arguments(&mut self) -> Result<NodeList, ParseError> {
        self.expect(SyntaxKind::OpenParenToken)?;
        let mut arguments = Vec::new();
        if self.token.kind != SyntaxKind::CloseParenToken {
            loop {
                arguments.push(self.parse_assignment_expression(false)?);
                if !self.eat(SyntaxKind::CommaToken)? {
                    break;
                }
            }
        }
        self.expect(SyntaxKind::CloseParenToken)?;
        Ok(NodeList::new(arguments))
    }

    fn parse_primary_expression(&mut self) -> Result<NodeIndex, ParseError> {
        let start = self.token.span.start;
        match self.token.kind {
            SyntaxKind::Identifier => self.parse_identifier(),
            SyntaxKind::NumericLiteral => {
                let value = self.scanner.token_number();
                let text = self.scanner.token_text(&self.token).to_string();
                self.next_token()?;
                let idx = self.arena.add(Node::NumericLiteral { value, text });
                Ok(self.finish(idx, start))
            }
            SyntaxKind::StringLiteral => {
                let value = self.scanner.token_value().to_string();
                let text = self.scanner.token_text(&self.token).to_string();
                self.next_token()?;
                let idx = self.arena.add(Node::StringLiteral { value, text });
                Ok(self.finish(idx, start))
            }
            SyntaxKind::TrueKeyword | SyntaxKind::FalseKeyword => {
                let value = self.token.kind == SyntaxKind::TrueKeyword;
                self.next_token()?;
                let idx = self.arena.add(Node::BooleanLiteral { value });
                Ok(self.finish(idx, start))
            }
            SyntaxKind::NullKeyword => {
                self.next_token()?;
                let idx = self.arena.add(Node::NullLiteral);
                Ok(self.finish(idx, start))
            }
            SyntaxKind::ThisKeyword => {
                self.next_token()?;
                let idx = self.arena.add(Node::ThisExpression);
                Ok(self.finish(idx, start))
            }
            SyntaxKind::OpenParenToken => {
                // Parentheses are not represented in the tree; the emitter
                // restores them from precedence.
                self.next_token()?;
                let expression = self.parse_expression(false)?;
                self.expect(SyntaxKind::CloseParenToken)?;
                Ok(expression)
            }
            SyntaxKind::OpenBracketToken => {
                self.next_token()?;
                let mut elements = Vec::new();
                if self.token.kind != SyntaxKind::CloseBracketToken {
                    loop {
                        if self.token.kind == SyntaxKind::CommaToken {
                            return Err(self.error("array elisions are not supported"));
                        }
                        elements.push(self.parse_assignment_expression(false)?);
                        if !self.eat(SyntaxKind::CommaToken)? {
                            break;
                        }
                        // Trailing comma.
                        if self.token.kind == SyntaxKind::CloseBracketToken {
                            break;
                        }
                    }
                }
                self.expect(SyntaxKind::CloseBracketToken)?;
                let idx = self.arena.add(Node::ArrayLiteralExpression {
                    elements: NodeList::new(elements),
                });
                Ok(self.finish(idx, start))
            }
            SyntaxKind::OpenBraceToken => self.parse_object_literal(),
            SyntaxKind::FunctionKeyword => self.parse_function_expression(),
            _ => Err(self.error(format!(
                "expression expected but found `{}`",
                self.token_description()
            ))),
        }
    }

    fn parse_object_literal(&mut self) -> Result<NodeIndex, ParseError> {
        let start = self.token.span.start;
        self.expect(SyntaxKind::OpenBraceToken)?;
        let mut properties = Vec::new();
        if self.token.kind != SyntaxKind::CloseBraceToken {
            loop {
                let name = self.parse_object_key()?;
                self.expect(SyntaxKind::ColonToken)?;
                let initializer = self.parse_assignment_expression(false)?;
                properties.push(self.arena.add(Node::PropertyAssignment { name, initializer }));
                if !self.eat(SyntaxKind::CommaToken)? {
                    break;
                }
                if self.token.kind == SyntaxKind::CloseBraceToken {
                    break;
                }
            }
        }
        self.expect(SyntaxKind::CloseBraceToken)?;
        let idx = self.arena.add(Node::ObjectLiteralExpression {
            properties: NodeList::new(properties),
        });
        Ok(self.finish(idx, start))
    }

    fn parse_object_key(&mut self) -> Result<NodeIndex, ParseError> {
        match self.token.kind {
            SyntaxKind::StringLiteral => {
                let value = self.scanner.token_value().to_string();
                let text = self.scanner.token_text(&self.token).to_string();
                self.next_token()?;
                Ok(self.arena.add(Node::StringLiteral { value, text }))
            }
            SyntaxKind::NumericLiteral => {
                let value = self.scanner.token_number();
                let text = self.scanner.token_text(&self.token).to_string();
                self.next_token()?;
                Ok(self.arena.add(Node::NumericLiteral { value, text }))
            }
            _ => self.parse_property_name_identifier(),
        }
    }

    fn parse_function_expression(&mut self) -> Result<NodeIndex, ParseError> {
        let start = self.token.span.start;
        self.expect(SyntaxKind::FunctionKeyword)?;
        let name = if self.token.kind == SyntaxKind::Identifier {
            Some(self.parse_identifier()?)
        } else {
            None
        };
        let parameters = self.parse_parameter_list()?;
        let body = self.parse_block()?;
        let idx = self.arena.add(Node::FunctionExpression {
            name,
            parameters,
            body,
        });
        Ok(self.finish(idx, start))
    }
}

const LOWEST_BINARY_PRECEDENCE: u8 = 4;

fn binary_precedence(kind: SyntaxKind, no_in: bool) -> u8 {
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
        | InstanceofKeyword => 10,
        InKeyword => {
            if no_in {
                0
            } else {
                10
            }
        }
        LessThanLessThanToken
        | GreaterThanGreaterThanToken
        | GreaterThanGreaterThanGreaterThanToken => 11,
        PlusToken | MinusToken => 12,
        AsteriskToken | SlashToken | PercentToken => 13,
        _ => 0,
    }
}
