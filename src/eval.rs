//! Literal-subtree evaluation with JavaScript semantics.
//!
//! Folding must be exactly as observable as running the original code, so
//! the coercion rules here mirror the ECMAScript abstract operations for
//! the five value types a literal can produce: ToNumber, ToInt32/ToUint32,
//! the `+` string-concatenation rule, the loose-equality table, and the
//! operand-returning `&&`/`||`.
//!
//! Evaluation is *closed*: any operand or operator outside the literal set
//! returns `None` and the caller leaves the tree untouched.

use crate::parser::arena::NodeArena;
use crate::parser::ast::{Node, NodeIndex};
use crate::scanner::SyntaxKind;

/// A value computable from a closed literal expression.
#[derive(Clone, Debug, PartialEq)]
pub enum JsValue {
    Number(f64),
    Str(String),
    Bool(bool),
    Null,
    Undefined,
}

impl JsValue {
    pub fn truthy(&self) -> bool {
        match self {
            JsValue::Number(n) => *n != 0.0 && !n.is_nan(),
            JsValue::Str(s) => !s.is_empty(),
            JsValue::Bool(b) => *b,
            JsValue::Null | JsValue::Undefined => false,
        }
    }

    pub fn to_number(&self) -> f64 {
        match self {
            JsValue::Number(n) => *n,
            JsValue::Str(s) => string_to_number(s),
            JsValue::Bool(true) => 1.0,
            JsValue::Bool(false) => 0.0,
            JsValue::Null => 0.0,
            JsValue::Undefined => f64::NAN,
        }
    }

    pub fn to_js_string(&self) -> String {
        match self {
            JsValue::Number(n) => format_number(*n),
            JsValue::Str(s) => s.clone(),
            JsValue::Bool(true) => "true".to_string(),
            JsValue::Bool(false) => "false".to_string(),
            JsValue::Null => "null".to_string(),
            JsValue::Undefined => "undefined".to_string(),
        }
    }

    fn type_of(&self) -> &'static str {
        match self {
            JsValue::Number(_) => "number",
            JsValue::Str(_) => "string",
            JsValue::Bool(_) => "boolean",
            JsValue::Null => "object",
            JsValue::Undefined => "undefined",
        }
    }
}

/// ECMAScript ToNumber applied to a string.
fn string_to_number(s: &str) -> f64 {
    let t = s.trim_matches(|c: char| c.is_whitespace());
    if t.is_empty() {
        return 0.0;
    }
    if let Some(hex) = t.strip_prefix("0x").or_else(|| t.strip_prefix("0X")) {
        if !hex.is_empty() && hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return u64::from_str_radix(hex, 16).map(|v| v as f64).unwrap_or(f64::NAN);
        }
        return f64::NAN;
    }
    let (sign, rest) = match t.as_bytes()[0] {
        b'+' => (1.0, &t[1..]),
        b'-' => (-1.0, &t[1..]),
        _ => (1.0, t),
    };
    if rest == "Infinity" {
        return sign * f64::INFINITY;
    }
    // Rust's f64 parser accepts forms JS does not ("inf", "NaN", "1e").
    if rest.is_empty()
        || !rest
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'))
    {
        return f64::NAN;
    }
    rest.parse::<f64>().map(|v| sign * v).unwrap_or(f64::NAN)
}

/// ECMAScript ToInt32.
pub fn to_int32(n: f64) -> i32 {
    if !n.is_finite() || n == 0.0 {
        return 0;
    }
    let m = n.trunc();
    let r = m.rem_euclid(4294967296.0);
    // r is integral and in [0, 2^32), hence exact as u32.
    (r as u32) as i32
}

/// ECMAScript ToUint32.
pub fn to_uint32(n: f64) -> u32 {
    to_int32(n) as u32
}

/// Canonical decimal spelling of a number, as the emitter prints it.
///
/// Shortest round-trip decimal without exponent notation; `NaN` and the
/// infinities use their global identifier spellings; negative zero prints
/// as plain `0`.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }
    format!("{n}")
}

/// Quote a string value the way the canonical emitter does.
pub fn quote_string(value: &str, quote: char) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push(quote);
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            '\u{b}' => out.push_str("\\v"),
            '\0' => out.push_str("\\x00"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if (c as u32) < 0x20 => {
                out.push_str(&format!("\\x{:02x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

/// Character-class test for dot-access and bare-object-key eligibility.
/// Deliberately not a reserved-word check: reserved words are legal in
/// ES5 property-name position.
pub fn is_identifier_text(s: &str) -> bool {
    let mut bytes = s.bytes();
    match bytes.next() {
        Some(b) if b.is_ascii_alphabetic() || b == b'_' || b == b'$' => {}
        _ => return false,
    }
    bytes.all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'$')
}

/// Evaluate a closed literal subtree rooted at `index`.
///
/// Returns `None` as soon as anything non-literal or non-closed is found;
/// callers treat that as "do not fold".
pub fn try_evaluate(arena: &NodeArena, index: NodeIndex) -> Option<JsValue> {
    match arena.get(index) {
        Node::NumericLiteral { value, .. } => Some(JsValue::Number(*value)),
        Node::StringLiteral { value, .. } => Some(JsValue::Str(value.clone())),
        Node::BooleanLiteral { value } => Some(JsValue::Bool(*value)),
        Node::NullLiteral => Some(JsValue::Null),
        // The global value identifiers behave as literals for folding.
        Node::Identifier { text } => match text.as_str() {
            "undefined" => Some(JsValue::Undefined),
            "NaN" => Some(JsValue::Number(f64::NAN)),
            "Infinity" => Some(JsValue::Number(f64::INFINITY)),
            _ => None,
        },
        Node::PrefixUnaryExpression { operator, operand } => {
            let value = try_evaluate(arena, *operand)?;
            apply_unary(*operator, value)
        }
        Node::BinaryExpression {
            left,
            operator,
            right,
        } => {
            let left = try_evaluate(arena, *left)?;
            let right = try_evaluate(arena, *right)?;
            apply_binary(*operator, left, right)
        }
        Node::ConditionalExpression {
            condition,
            when_true,
            when_false,
        } => {
            let condition = try_evaluate(arena, *condition)?;
            if condition.truthy() {
                try_evaluate(arena, *when_true)
            } else {
                try_evaluate(arena, *when_false)
            }
        }
        _ => None,
    }
}

fn apply_unary(operator: SyntaxKind, value: JsValue) -> Option<JsValue> {
    use SyntaxKind::*;
    Some(match operator {
        ExclamationToken => JsValue::Bool(!value.truthy()),
        MinusToken => JsValue::Number(-value.to_number()),
        PlusToken => JsValue::Number(value.to_number()),
        TildeToken => JsValue::Number(!to_int32(value.to_number()) as f64),
        TypeofKeyword => JsValue::Str(value.type_of().to_string()),
        VoidKeyword => JsValue::Undefined,
        _ => return None,
    })
}

fn apply_binary(operator: SyntaxKind, left: JsValue, right: JsValue) -> Option<JsValue> {
    use SyntaxKind::*;
    Some(match operator {
        PlusToken => {
            if matches!(left, JsValue::Str(_)) || matches!(right, JsValue::Str(_)) {
                JsValue::Str(left.to_js_string() + &right.to_js_string())
            } else {
                JsValue::Number(left.to_number() + right.to_number())
            }
        }
        MinusToken => JsValue::Number(left.to_number() - right.to_number()),
        AsteriskToken => JsValue::Number(left.to_number() * right.to_number()),
        SlashToken => JsValue::Number(left.to_number() / right.to_number()),
        PercentToken => JsValue::Number(left.to_number() % right.to_number()),

        LessThanToken => compare(&left, &right, |o| o == std::cmp::Ordering::Less)?,
        GreaterThanToken => compare(&left, &right, |o| o == std::cmp::Ordering::Greater)?,
        LessThanEqualsToken => compare(&left, &right, |o| o != std::cmp::Ordering::Greater)?,
        GreaterThanEqualsToken => compare(&left, &right, |o| o != std::cmp::Ordering::Less)?,

        EqualsEqualsToken => JsValue::Bool(loose_eq(&left, &right)),
        ExclamationEqualsToken => JsValue::Bool(!loose_eq(&left, &right)),
        EqualsEqualsEqualsToken => JsValue::Bool(strict_eq(&left, &right)),
        ExclamationEqualsEqualsToken => JsValue::Bool(!strict_eq(&left, &right)),

        AmpersandAmpersandToken => {
            if left.truthy() {
                right
            } else {
                left
            }
        }
        BarBarToken => {
            if left.truthy() {
                left
            } else {
                right
            }
        }

        AmpersandToken => {
            JsValue::Number((to_int32(left.to_number()) & to_int32(right.to_number())) as f64)
        }
        BarToken => {
            JsValue::Number((to_int32(left.to_number()) | to_int32(right.to_number())) as f64)
        }
        CaretToken => {
            JsValue::Number((to_int32(left.to_number()) ^ to_int32(right.to_number())) as f64)
        }
        LessThanLessThanToken => {
            let shift = to_uint32(right.to_number()) & 31;
            JsValue::Number(to_int32(left.to_number()).wrapping_shl(shift) as f64)
        }
        GreaterThanGreaterThanToken => {
            let shift = to_uint32(right.to_number()) & 31;
            JsValue::Number((to_int32(left.to_number()) >> shift) as f64)
        }
        GreaterThanGreaterThanGreaterThanToken => {
            let shift = to_uint32(right.to_number()) & 31;
            JsValue::Number((to_uint32(left.to_number()) >> shift) as f64)
        }
        _ => return None,
    })
}

/// The abstract relational comparison: string/string compares code units,
/// everything else compares as numbers (NaN makes the relation false).
fn compare(
    left: &JsValue,
    right: &JsValue,
    pick: impl Fn(std::cmp::Ordering) -> bool,
) -> Option<JsValue> {
    if let (JsValue::Str(l), JsValue::Str(r)) = (left, right) {
        return Some(JsValue::Bool(pick(l.cmp(r))));
    }
    let (l, r) = (left.to_number(), right.to_number());
    let ordering = l.partial_cmp(&r)?;
    Some(JsValue::Bool(pick(ordering)))
}

fn strict_eq(left: &JsValue, right: &JsValue) -> bool {
    match (left, right) {
        (JsValue::Number(l), JsValue::Number(r)) => l == r,
        (JsValue::Str(l), JsValue::Str(r)) => l == r,
        (JsValue::Bool(l), JsValue::Bool(r)) => l == r,
        (JsValue::Null, JsValue::Null) => true,
        (JsValue::Undefined, JsValue::Undefined) => true,
        _ => false,
    }
}

fn loose_eq(left: &JsValue, right: &JsValue) -> bool {
    match (left, right) {
        (JsValue::Null, JsValue::Undefined) | (JsValue::Undefined, JsValue::Null) => true,
        (JsValue::Number(l), JsValue::Str(r)) => *l == string_to_number(r),
        (JsValue::Str(l), JsValue::Number(r)) => string_to_number(l) == *r,
        (JsValue::Bool(_), _) => loose_eq(&JsValue::Number(left.to_number()), right),
        (_, JsValue::Bool(_)) => loose_eq(left, &JsValue::Number(right.to_number())),
        _ => strict_eq(left, right),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truthiness() {
        assert!(!JsValue::Number(0.0).truthy());
        assert!(!JsValue::Number(f64::NAN).truthy());
        assert!(!JsValue::Str(String::new()).truthy());
        assert!(!JsValue::Null.truthy());
        assert!(!JsValue::Undefined.truthy());
        assert!(JsValue::Number(-1.0).truthy());
        assert!(JsValue::Str("0".to_string()).truthy());
    }

    #[test]
    fn plus_concatenates_when_either_side_is_string() {
        let v = apply_binary(
            SyntaxKind::PlusToken,
            JsValue::Number(1.0),
            JsValue::Str("2".to_string()),
        )
        .unwrap();
        assert_eq!(v, JsValue::Str("12".to_string()));
    }

    #[test]
    fn division_by_zero_is_infinity() {
        let v = apply_binary(
            SyntaxKind::SlashToken,
            JsValue::Number(1.0),
            JsValue::Number(0.0),
        )
        .unwrap();
        assert_eq!(v, JsValue::Number(f64::INFINITY));
    }

    #[test]
    fn to_int32_wraps() {
        assert_eq!(to_int32(4294967296.0), 0);
        assert_eq!(to_int32(2147483648.0), -2147483648);
        assert_eq!(to_int32(-1.5), -1);
        assert_eq!(to_int32(f64::NAN), 0);
        assert_eq!(to_int32(f64::INFINITY), 0);
    }

    #[test]
    fn loose_equality_table() {
        assert!(loose_eq(&JsValue::Null, &JsValue::Undefined));
        assert!(loose_eq(
            &JsValue::Number(1.0),
            &JsValue::Str("1".to_string())
        ));
        assert!(loose_eq(&JsValue::Bool(true), &JsValue::Number(1.0)));
        assert!(!loose_eq(&JsValue::Number(0.0), &JsValue::Null));
        assert!(!loose_eq(&JsValue::Number(f64::NAN), &JsValue::Number(f64::NAN)));
    }

    #[test]
    fn logical_operators_return_operands() {
        let v = apply_binary(
            SyntaxKind::BarBarToken,
            JsValue::Number(0.0),
            JsValue::Str("x".to_string()),
        )
        .unwrap();
        assert_eq!(v, JsValue::Str("x".to_string()));
        let v = apply_binary(
            SyntaxKind::AmpersandAmpersandToken,
            JsValue::Number(0.0),
            JsValue::Str("x".to_string()),
        )
        .unwrap();
        assert_eq!(v, JsValue::Number(0.0));
    }

    #[test]
    fn string_to_number_rules() {
        assert_eq!(string_to_number(""), 0.0);
        assert_eq!(string_to_number("  12 "), 12.0);
        assert_eq!(string_to_number("0x10"), 16.0);
        assert_eq!(string_to_number("-Infinity"), f64::NEG_INFINITY);
        assert!(string_to_number("12px").is_nan());
        assert!(string_to_number("inf").is_nan());
    }

    #[test]
    fn number_formatting() {
        assert_eq!(format_number(3.0), "3");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(0.1), "0.1");
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn string_quoting_is_single_quoted_and_minimal() {
        assert_eq!(quote_string("ab", '\''), "'ab'");
        assert_eq!(quote_string("a'b", '\''), "'a\\'b'");
        assert_eq!(quote_string("a\"b", '\''), "'a\"b'");
        assert_eq!(quote_string("a\nb", '\''), "'a\\nb'");
    }

    #[test]
    fn identifier_shape_test() {
        assert!(is_identifier_text("prop_1"));
        assert!(is_identifier_text("$x"));
        assert!(is_identifier_text("if")); // reserved words allowed by design
        assert!(!is_identifier_text("1prop"));
        assert!(!is_identifier_text("a-b"));
        assert!(!is_identifier_text(""));
    }
}
