//! Hand-written scanner for the ES5-era grammar subset.
//!
//! Tokens keep their raw source slice (needed by the literal canonicalizer,
//! which compares original spellings against canonical re-emission) and a
//! `preceded_by_line_break` flag that drives automatic semicolon insertion
//! in the parser.

use crate::diagnostics::ParseError;
use crate::span::{Span, line_column_at};
use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use serde::Serialize;

/// Token and operator kinds.
///
/// Node kinds live in a separate enumeration (`parser::ast::NodeKind`);
/// this one covers everything the scanner can produce plus the operator
/// tokens stored inside binary/unary nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[repr(u16)]
pub enum SyntaxKind {
    Unknown = 0,
    EndOfFile,

    Identifier,
    NumericLiteral,
    StringLiteral,

    // Keywords
    VarKeyword,
    LetKeyword,
    ConstKeyword,
    IfKeyword,
    ElseKeyword,
    WhileKeyword,
    DoKeyword,
    ForKeyword,
    InKeyword,
    FunctionKeyword,
    ReturnKeyword,
    NewKeyword,
    TypeofKeyword,
    VoidKeyword,
    DeleteKeyword,
    InstanceofKeyword,
    TrueKeyword,
    FalseKeyword,
    NullKeyword,
    ThisKeyword,
    BreakKeyword,
    ContinueKeyword,
    ThrowKeyword,

    // Punctuation
    OpenBraceToken,
    CloseBraceToken,
    OpenParenToken,
    CloseParenToken,
    OpenBracketToken,
    CloseBracketToken,
    SemicolonToken,
    CommaToken,
    DotToken,
    ColonToken,
    QuestionToken,

    // Operators
    PlusToken,
    MinusToken,
    AsteriskToken,
    SlashToken,
    PercentToken,
    PlusPlusToken,
    MinusMinusToken,
    LessThanToken,
    GreaterThanToken,
    LessThanEqualsToken,
    GreaterThanEqualsToken,
    EqualsEqualsToken,
    ExclamationEqualsToken,
    EqualsEqualsEqualsToken,
    ExclamationEqualsEqualsToken,
    LessThanLessThanToken,
    GreaterThanGreaterThanToken,
    GreaterThanGreaterThanGreaterThanToken,
    AmpersandToken,
    BarToken,
    CaretToken,
    ExclamationToken,
    TildeToken,
    AmpersandAmpersandToken,
    BarBarToken,
    EqualsToken,
    PlusEqualsToken,
    MinusEqualsToken,
    AsteriskEqualsToken,
    SlashEqualsToken,
    PercentEqualsToken,
    LessThanLessThanEqualsToken,
    GreaterThanGreaterThanEqualsToken,
    GreaterThanGreaterThanGreaterThanEqualsToken,
    AmpersandEqualsToken,
    BarEqualsToken,
    CaretEqualsToken,
}

impl SyntaxKind {
    /// Source text of an operator or punctuation token.
    pub fn operator_text(self) -> &'static str {
        use SyntaxKind::*;
        match self {
            OpenBraceToken => "{",
            CloseBraceToken => "}",
            OpenParenToken => "(",
            CloseParenToken => ")",
            OpenBracketToken => "[",
            CloseBracketToken => "]",
            SemicolonToken => ";",
            CommaToken => ",",
            DotToken => ".",
            ColonToken => ":",
            QuestionToken => "?",
            PlusToken => "+",
            MinusToken => "-",
            AsteriskToken => "*",
            SlashToken => "/",
            PercentToken => "%",
            PlusPlusToken => "++",
            MinusMinusToken => "--",
            LessThanToken => "<",
            GreaterThanToken => ">",
            LessThanEqualsToken => "<=",
            GreaterThanEqualsToken => ">=",
            EqualsEqualsToken => "==",
            ExclamationEqualsToken => "!=",
            EqualsEqualsEqualsToken => "===",
            ExclamationEqualsEqualsToken => "!==",
            LessThanLessThanToken => "<<",
            GreaterThanGreaterThanToken => ">>",
            GreaterThanGreaterThanGreaterThanToken => ">>>",
            AmpersandToken => "&",
            BarToken => "|",
            CaretToken => "^",
            ExclamationToken => "!",
            TildeToken => "~",
            AmpersandAmpersandToken => "&&",
            BarBarToken => "||",
            EqualsToken => "=",
            PlusEqualsToken => "+=",
            MinusEqualsToken => "-=",
            AsteriskEqualsToken => "*=",
            SlashEqualsToken => "/=",
            PercentEqualsToken => "%=",
            LessThanLessThanEqualsToken => "<<=",
            GreaterThanGreaterThanEqualsToken => ">>=",
            GreaterThanGreaterThanGreaterThanEqualsToken => ">>>=",
            AmpersandEqualsToken => "&=",
            BarEqualsToken => "|=",
            CaretEqualsToken => "^=",
            InKeyword => "in",
            InstanceofKeyword => "instanceof",
            TypeofKeyword => "typeof",
            VoidKeyword => "void",
            DeleteKeyword => "delete",
            _ => "",
        }
    }

    /// Keyword text for tokens usable as property names (`IdentifierName`
    /// positions accept reserved words in ES5).
    pub fn keyword_text(self) -> Option<&'static str> {
        KEYWORDS
            .iter()
            .find(|(_, kind)| **kind == self)
            .map(|(text, _)| *text)
    }

    pub fn is_assignment_operator(self) -> bool {
        use SyntaxKind::*;
        matches!(
            self,
            EqualsToken
                | PlusEqualsToken
                | MinusEqualsToken
                | AsteriskEqualsToken
                | SlashEqualsToken
                | PercentEqualsToken
                | LessThanLessThanEqualsToken
                | GreaterThanGreaterThanEqualsToken
                | GreaterThanGreaterThanGreaterThanEqualsToken
                | AmpersandEqualsToken
                | BarEqualsToken
                | CaretEqualsToken
        )
    }
}

static KEYWORDS: Lazy<FxHashMap<&'static str, SyntaxKind>> = Lazy::new(|| {
    use SyntaxKind::*;
    let mut map = FxHashMap::default();
    for (text, kind) in [
        ("var", VarKeyword),
        ("let", LetKeyword),
        ("const", ConstKeyword),
        ("if", IfKeyword),
        ("else", ElseKeyword),
        ("while", WhileKeyword),
        ("do", DoKeyword),
        ("for", ForKeyword),
        ("in", InKeyword),
        ("function", FunctionKeyword),
        ("return", ReturnKeyword),
        ("new", NewKeyword),
        ("typeof", TypeofKeyword),
        ("void", VoidKeyword),
        ("delete", DeleteKeyword),
        ("instanceof", InstanceofKeyword),
        ("true", TrueKeyword),
        ("false", FalseKeyword),
        ("null", NullKeyword),
        ("this", ThisKeyword),
        ("break", BreakKeyword),
        ("continue", ContinueKeyword),
        ("throw", ThrowKeyword),
    ] {
        map.insert(text, kind);
    }
    map
});

/// One scanned token. Raw text is recovered through `span` against the
/// original source; decoded values live in the scanner's side fields.
#[derive(Clone, Copy, Debug)]
pub struct Token {
    pub kind: SyntaxKind,
    pub span: Span,
    /// True when at least one line terminator appeared between the
    /// previous token and this one. Drives semicolon insertion.
    pub preceded_by_line_break: bool,
}

pub struct Scanner<'a> {
    source: &'a str,
    file_name: &'a str,
    bytes: &'a [u8],
    pos: usize,
    /// Decoded value of the last string literal or identifier token.
    token_value: String,
    /// Numeric value of the last numeric literal token.
    token_number: f64,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str, file_name: &'a str) -> Scanner<'a> {
        Scanner {
            source,
            file_name,
            bytes: source.as_bytes(),
            pos: 0,
            token_value: String::new(),
            token_number: 0.0,
        }
    }

    /// Decoded text of the last identifier or string literal.
    pub fn token_value(&self) -> &str {
        &self.token_value
    }

    /// Value of the last numeric literal.
    pub fn token_number(&self) -> f64 {
        self.token_number
    }

    /// Raw source slice of a token.
    pub fn token_text(&self, token: &Token) -> &'a str {
        &self.source[token.span.start as usize..token.span.end as usize]
    }

    fn error(&self, message: impl Into<String>, start: usize) -> ParseError {
        let span = Span::new(start as u32, self.pos as u32);
        ParseError {
            file_name: self.file_name.to_string(),
            message: message.into(),
            span,
            location: line_column_at(self.source, span.start),
        }
    }

    fn peek(&self, offset: usize) -> u8 {
        *self.bytes.get(self.pos + offset).unwrap_or(&0)
    }

    /// Skip whitespace and comments, reporting whether a line terminator
    /// was crossed.
    fn skip_trivia(&mut self) -> Result<bool, ParseError> {
        let mut saw_newline = false;
        loop {
            match self.peek(0) {
                b' ' | b'\t' | b'\x0b' | b'\x0c' => self.pos += 1,
                b'\n' => {
                    saw_newline = true;
                    self.pos += 1;
                }
                b'\r' => {
                    saw_newline = true;
                    self.pos += 1;
                }
                b'/' if self.peek(1) == b'/' => {
                    while self.pos < self.bytes.len() && !matches!(self.peek(0), b'\n' | b'\r') {
                        self.pos += 1;
                    }
                }
                b'/' if self.peek(1) == b'*' => {
                    let start = self.pos;
                    self.pos += 2;
                    loop {
                        if self.pos >= self.bytes.len() {
                            return Err(self.error("unterminated block comment", start));
                        }
                        if self.peek(0) == b'*' && self.peek(1) == b'/' {
                            self.pos += 2;
                            break;
                        }
                        if matches!(self.peek(0), b'\n' | b'\r') {
                            saw_newline = true;
                        }
                        self.pos += 1;
                    }
                }
                _ => break,
            }
        }
        Ok(saw_newline)
    }

    /// Scan the next token.
    pub fn scan(&mut self) -> Result<Token, ParseError> {
        let preceded_by_line_break = self.skip_trivia()?;
        let start = self.pos;

        let make = |kind: SyntaxKind, start: usize, end: usize| Token {
            kind,
            span: Span::new(start as u32, end as u32),
            preceded_by_line_break,
        };

        if self.pos >= self.bytes.len() {
            return Ok(make(SyntaxKind::EndOfFile, start, start));
        }

        let ch = self.peek(0);
        let kind = match ch {
            b'{' => self.single(SyntaxKind::OpenBraceToken),
            b'}' => self.single(SyntaxKind::CloseBraceToken),
            b'(' => self.single(SyntaxKind::OpenParenToken),
            b')' => self.single(SyntaxKind::CloseParenToken),
            b'[' => self.single(SyntaxKind::OpenBracketToken),
            b']' => self.single(SyntaxKind::CloseBracketToken),
            b';' => self.single(SyntaxKind::SemicolonToken),
            b',' => self.single(SyntaxKind::CommaToken),
            b':' => self.single(SyntaxKind::ColonToken),
            b'?' => self.single(SyntaxKind::QuestionToken),
            b'~' => self.single(SyntaxKind::TildeToken),
            b'.' => {
                if self.peek(1).is_ascii_digit() {
                    return self.scan_number(start, preceded_by_line_break);
                }
                self.single(SyntaxKind::DotToken)
            }
            b'+' => match self.peek(1) {
                b'+' => self.multi(2, SyntaxKind::PlusPlusToken),
                b'=' => self.multi(2, SyntaxKind::PlusEqualsToken),
                _ => self.single(SyntaxKind::PlusToken),
            },
            b'-' => match self.peek(1) {
                b'-' => self.multi(2, SyntaxKind::MinusMinusToken),
                b'=' => self.multi(2, SyntaxKind::MinusEqualsToken),
                _ => self.single(SyntaxKind::MinusToken),
            },
            b'*' => match self.peek(1) {
                b'=' => self.multi(2, SyntaxKind::AsteriskEqualsToken),
                _ => self.single(SyntaxKind::AsteriskToken),
            },
            b'/' => match self.peek(1) {
                b'=' => self.multi(2, SyntaxKind::SlashEqualsToken),
                _ => self.single(SyntaxKind::SlashToken),
            },
            b'%' => match self.peek(1) {
                b'=' => self.multi(2, SyntaxKind::PercentEqualsToken),
                _ => self.single(SyntaxKind::PercentToken),
            },
            b'<' => match (self.peek(1), self.peek(2)) {
                (b'<', b'=') => self.multi(3, SyntaxKind::LessThanLessThanEqualsToken),
                (b'<', _) => self.multi(2, SyntaxKind::LessThanLessThanToken),
                (b'=', _) => self.multi(2, SyntaxKind::LessThanEqualsToken),
                _ => self.single(SyntaxKind::LessThanToken),
            },
            b'>' => match (self.peek(1), self.peek(2), self.peek(3)) {
                (b'>', b'>', b'=') => {
                    self.multi(4, SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken)
                }
                (b'>', b'>', _) => self.multi(3, SyntaxKind::GreaterThanGreaterThanGreaterThanToken),
                (b'>', b'=', _) => self.multi(3, SyntaxKind::GreaterThanGreaterThanEqualsToken),
                (b'>', _, _) => self.multi(2, SyntaxKind::GreaterThanGreaterThanToken),
                (b'=', _, _) => self.multi(2, SyntaxKind::GreaterThanEqualsToken),
                _ => self.single(SyntaxKind::GreaterThanToken),
            },
            b'=' => match (self.peek(1), self.peek(2)) {
                (b'=', b'=') => self.multi(3, SyntaxKind::EqualsEqualsEqualsToken),
                (b'=', _) => self.multi(2, SyntaxKind::EqualsEqualsToken),
                _ => self.single(SyntaxKind::EqualsToken),
            },
            b'!' => match (self.peek(1), self.peek(2)) {
                (b'=', b'=') => self.multi(3, SyntaxKind::ExclamationEqualsEqualsToken),
                (b'=', _) => self.multi(2, SyntaxKind::ExclamationEqualsToken),
                _ => self.single(SyntaxKind::ExclamationToken),
            },
            b'&' => match self.peek(1) {
                b'&' => self.multi(2, SyntaxKind::AmpersandAmpersandToken),
                b'=' => self.multi(2, SyntaxKind::AmpersandEqualsToken),
                _ => self.single(SyntaxKind::AmpersandToken),
            },
            b'|' => match self.peek(1) {
                b'|' => self.multi(2, SyntaxKind::BarBarToken),
                b'=' => self.multi(2, SyntaxKind::BarEqualsToken),
                _ => self.single(SyntaxKind::BarToken),
            },
            b'^' => match self.peek(1) {
                b'=' => self.multi(2, SyntaxKind::CaretEqualsToken),
                _ => self.single(SyntaxKind::CaretToken),
            },
            b'\'' | b'"' => return self.scan_string(start, preceded_by_line_break),
            b'0'..=b'9' => return self.scan_number(start, preceded_by_line_break),
            c if is_identifier_start(c) => {
                return self.scan_identifier(start, preceded_by_line_break);
            }
            c => {
                self.pos += 1;
                return Err(self.error(format!("unexpected character `{}`", c as char), start));
            }
        };

        Ok(make(kind, start, self.pos))
    }

    fn single(&mut self, kind: SyntaxKind) -> SyntaxKind {
        self.pos += 1;
        kind
    }

    fn multi(&mut self, len: usize, kind: SyntaxKind) -> SyntaxKind {
        self.pos += len;
        kind
    }

    fn scan_identifier(
        &mut self,
        start: usize,
        preceded_by_line_break: bool,
    ) -> Result<Token, ParseError> {
        while is_identifier_part(self.peek(0)) {
            self.pos += 1;
        }
        let text = &self.source[start..self.pos];
        self.token_value = text.to_string();
        let kind = KEYWORDS
            .get(text)
            .copied()
            .unwrap_or(SyntaxKind::Identifier);
        Ok(Token {
            kind,
            span: Span::new(start as u32, self.pos as u32),
            preceded_by_line_break,
        })
    }

    fn scan_number(
        &mut self,
        start: usize,
        preceded_by_line_break: bool,
    ) -> Result<Token, ParseError> {
        if self.peek(0) == b'0' && matches!(self.peek(1), b'x' | b'X') {
            self.pos += 2;
            let digits_start = self.pos;
            while self.peek(0).is_ascii_hexdigit() {
                self.pos += 1;
            }
            if self.pos == digits_start {
                return Err(self.error("hexadecimal literal has no digits", start));
            }
            let digits = &self.source[digits_start..self.pos];
            self.token_number = u64::from_str_radix(digits, 16)
                .map(|v| v as f64)
                .unwrap_or_else(|_| parse_big_radix(digits, 16));
            return Ok(Token {
                kind: SyntaxKind::NumericLiteral,
                span: Span::new(start as u32, self.pos as u32),
                preceded_by_line_break,
            });
        }

        // Legacy octal: leading zero followed only by octal digits.
        if self.peek(0) == b'0' && matches!(self.peek(1), b'0'..=b'7') {
            let mut end = self.pos + 1;
            while matches!(*self.bytes.get(end).unwrap_or(&0), b'0'..=b'7') {
                end += 1;
            }
            // 089 and friends fall back to decimal, as in real engines.
            if !matches!(*self.bytes.get(end).unwrap_or(&0), b'8' | b'9' | b'.') {
                self.pos = end;
                let digits = &self.source[start + 1..self.pos];
                self.token_number = u64::from_str_radix(digits, 8)
                    .map(|v| v as f64)
                    .unwrap_or_else(|_| parse_big_radix(digits, 8));
                return Ok(Token {
                    kind: SyntaxKind::NumericLiteral,
                    span: Span::new(start as u32, self.pos as u32),
                    preceded_by_line_break,
                });
            }
        }

        while self.peek(0).is_ascii_digit() {
            self.pos += 1;
        }
        if self.peek(0) == b'.' {
            self.pos += 1;
            while self.peek(0).is_ascii_digit() {
                self.pos += 1;
            }
        }
        if matches!(self.peek(0), b'e' | b'E') {
            let mut lookahead = 1;
            if matches!(self.peek(1), b'+' | b'-') {
                lookahead = 2;
            }
            if self.peek(lookahead).is_ascii_digit() {
                self.pos += lookahead;
                while self.peek(0).is_ascii_digit() {
                    self.pos += 1;
                }
            } else {
                return Err(self.error("exponent has no digits", start));
            }
        }

        let text = &self.source[start..self.pos];
        self.token_number = text
            .parse::<f64>()
            .map_err(|_| self.error(format!("invalid numeric literal `{text}`"), start))?;
        Ok(Token {
            kind: SyntaxKind::NumericLiteral,
            span: Span::new(start as u32, self.pos as u32),
            preceded_by_line_break,
        })
    }

    fn scan_string(
        &mut self,
        start: usize,
        preceded_by_line_break: bool,
    ) -> Result<Token, ParseError> {
        let quote = self.peek(0);
        self.pos += 1;
        let mut value = String::new();
        loop {
            if self.pos >= self.bytes.len() {
                return Err(self.error("unterminated string literal", start));
            }
            let ch = self.peek(0);
            if ch == quote {
                self.pos += 1;
                break;
            }
            if matches!(ch, b'\n' | b'\r') {
                return Err(self.error("unterminated string literal", start));
            }
            if ch == b'\\' {
                self.pos += 1;
                self.scan_escape(&mut value, start)?;
                continue;
            }
            // Consume one UTF-8 scalar.
            let rest = &self.source[self.pos..];
            let Some(c) = rest.chars().next() else {
                return Err(self.error("unterminated string literal", start));
            };
            value.push(c);
            self.pos += c.len_utf8();
        }
        self.token_value = value;
        Ok(Token {
            kind: SyntaxKind::StringLiteral,
            span: Span::new(start as u32, self.pos as u32),
            preceded_by_line_break,
        })
    }

    fn scan_escape(&mut self, value: &mut String, start: usize) -> Result<(), ParseError> {
        if self.pos >= self.bytes.len() {
            return Err(self.error("unterminated string literal", start));
        }
        let ch = self.peek(0);
        self.pos += 1;
        match ch {
            b'n' => value.push('\n'),
            b't' => value.push('\t'),
            b'r' => value.push('\r'),
            b'b' => value.push('\u{8}'),
            b'f' => value.push('\u{c}'),
            b'v' => value.push('\u{b}'),
            b'0' if !self.peek(0).is_ascii_digit() => value.push('\0'),
            b'x' => {
                let code = self.scan_hex_digits(2, start)?;
                value.push(char::from_u32(code).unwrap_or('\u{fffd}'));
            }
            b'u' => {
                let code = self.scan_hex_digits(4, start)?;
                // Lone surrogates cannot be represented in a Rust string.
                value.push(char::from_u32(code).unwrap_or('\u{fffd}'));
            }
            // Line continuation: backslash-newline disappears.
            b'\n' => {}
            b'\r' => {
                if self.peek(0) == b'\n' {
                    self.pos += 1;
                }
            }
            c => {
                // Identity escape (covers \' \" \\ and anything else).
                let rest = &self.source[self.pos - 1..];
                let decoded = rest.chars().next().unwrap_or(c as char);
                value.push(decoded);
                self.pos = self.pos - 1 + decoded.len_utf8();
            }
        }
        Ok(())
    }

    fn scan_hex_digits(&mut self, count: usize, start: usize) -> Result<u32, ParseError> {
        let mut code = 0u32;
        for _ in 0..count {
            let d = self.peek(0);
            let digit = match d {
                b'0'..=b'9' => (d - b'0') as u32,
                b'a'..=b'f' => (d - b'a' + 10) as u32,
                b'A'..=b'F' => (d - b'A' + 10) as u32,
                _ => return Err(self.error("invalid hexadecimal escape", start)),
            };
            code = code * 16 + digit;
            self.pos += 1;
        }
        Ok(code)
    }
}

fn is_identifier_start(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_' || c == b'$' || c >= 0x80
}

fn is_identifier_part(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_' || c == b'$' || c >= 0x80
}

/// Hex/octal digit strings too long for u64 still need a value; accumulate
/// in f64 the way engines do (with precision loss above 2^53).
fn parse_big_radix(digits: &str, radix: u32) -> f64 {
    let mut value = 0.0f64;
    for d in digits.bytes() {
        let digit = (d as char).to_digit(radix).unwrap_or(0);
        value = value * radix as f64 + digit as f64;
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan_all(source: &str) -> Vec<SyntaxKind> {
        let mut scanner = Scanner::new(source, "test.js");
        let mut kinds = Vec::new();
        loop {
            let token = scanner.scan().expect("scan failed");
            if token.kind == SyntaxKind::EndOfFile {
                break;
            }
            kinds.push(token.kind);
        }
        kinds
    }

    #[test]
    fn scans_punctuation_and_operators() {
        assert_eq!(
            scan_all("a === b >>> 2"),
            vec![
                SyntaxKind::Identifier,
                SyntaxKind::EqualsEqualsEqualsToken,
                SyntaxKind::Identifier,
                SyntaxKind::GreaterThanGreaterThanGreaterThanToken,
                SyntaxKind::NumericLiteral,
            ]
        );
    }

    #[test]
    fn scans_keywords() {
        assert_eq!(
            scan_all("var x = typeof y"),
            vec![
                SyntaxKind::VarKeyword,
                SyntaxKind::Identifier,
                SyntaxKind::EqualsToken,
                SyntaxKind::TypeofKeyword,
                SyntaxKind::Identifier,
            ]
        );
    }

    #[test]
    fn decodes_string_escapes() {
        let mut scanner = Scanner::new(r#""a\x41B\n""#, "test.js");
        let token = scanner.scan().unwrap();
        assert_eq!(token.kind, SyntaxKind::StringLiteral);
        assert_eq!(scanner.token_value(), "aAB\n");
    }

    #[test]
    fn hex_and_octal_numbers() {
        let mut scanner = Scanner::new("0xff 010 1e3 .5", "test.js");
        let mut values = Vec::new();
        loop {
            let token = scanner.scan().unwrap();
            if token.kind == SyntaxKind::EndOfFile {
                break;
            }
            assert_eq!(token.kind, SyntaxKind::NumericLiteral);
            values.push(scanner.token_number());
        }
        assert_eq!(values, vec![255.0, 8.0, 1000.0, 0.5]);
    }

    #[test]
    fn raw_text_is_preserved() {
        let mut scanner = Scanner::new("0x10", "test.js");
        let token = scanner.scan().unwrap();
        assert_eq!(scanner.token_text(&token), "0x10");
    }

    #[test]
    fn tracks_line_breaks_for_asi() {
        let mut scanner = Scanner::new("a\nb", "test.js");
        let first = scanner.scan().unwrap();
        assert!(!first.preceded_by_line_break);
        let second = scanner.scan().unwrap();
        assert!(second.preceded_by_line_break);
    }

    #[test]
    fn skips_comments() {
        assert_eq!(
            scan_all("a // line\n/* block */ b"),
            vec![SyntaxKind::Identifier, SyntaxKind::Identifier]
        );
    }

    #[test]
    fn rejects_unterminated_string() {
        let mut scanner = Scanner::new("'abc", "test.js");
        assert!(scanner.scan().is_err());
    }
}
