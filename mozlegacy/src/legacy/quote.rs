// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! String literal quoting and the property name rule used by `toSource`.

use std::{fmt::Write, sync::LazyLock};

use regex::Regex;

use crate::ecmascript::{
    abstract_operations::type_conversion::to_string,
    builders::ordinary_object_builder::OrdinaryObjectBuilder,
    builtins::{ArgumentsList, Behaviour, Builtin},
    execution::{Agent, ExceptionType, JsResult},
    types::{PropertyKey, String, Value},
};

static IDENTIFIER_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[_$A-Za-z][_$A-Za-z0-9]*$").expect("valid regex"));

/// Appends the escaped form of a single UTF-16 code unit.
fn escape_code_unit(out: &mut std::string::String, code_unit: u16, quote: u16) {
    match code_unit {
        0x08 => out.push_str("\\b"),
        0x09 => out.push_str("\\t"),
        0x0A => out.push_str("\\n"),
        0x0B => out.push_str("\\v"),
        0x0D => out.push_str("\\r"),
        c if c == quote || c == u16::from(b'\\') => {
            out.push('\\');
            out.push(char::from(c as u8));
        }
        c @ 0x20..=0x7E => out.push(char::from(c as u8)),
        c @ ..=0xFF => {
            let _ = write!(out, "\\x{c:02X}");
        }
        c => {
            let _ = write!(out, "\\u{c:04X}");
        }
    }
}

/// Quotes a sequence of code units with `quote` (`"` or `'`).
///
/// The result is always printable ASCII.
pub fn quote_code_units(code_units: impl Iterator<Item = u16>, quote: u8) -> std::string::String {
    let (lower, _) = code_units.size_hint();
    let mut out = std::string::String::with_capacity(lower + 2);
    out.push(char::from(quote));
    for code_unit in code_units {
        escape_code_unit(&mut out, code_unit, u16::from(quote));
    }
    out.push(char::from(quote));
    out
}

/// Quotes a string value with double quotes.
pub fn quote(agent: &Agent, string: String) -> std::string::String {
    quote_code_units(string.code_units(agent), b'"')
}

/// True for the canonical decimal form of an integer in `0..=2^31-1`.
fn is_int32_name(name: &str) -> bool {
    if name.is_empty() || name.len() > 10 || (name.len() > 1 && name.starts_with('0')) {
        return false;
    }
    name.bytes().all(|b| b.is_ascii_digit())
        && name.parse::<i64>().is_ok_and(|n| n <= i64::from(i32::MAX))
}

/// Renders a property key as it appears before the colon of an object
/// literal: bare when it is a plain identifier or an int32 index, single
/// quoted otherwise. Symbol keys are never serialized.
pub(crate) fn property_name_source(agent: &Agent, key: PropertyKey) -> std::string::String {
    match key {
        PropertyKey::Integer(index) if index <= i32::MAX as u32 => index.to_string(),
        PropertyKey::Integer(index) => format!("'{index}'"),
        PropertyKey::String(name) => match name.as_str(agent) {
            Some(name) if IDENTIFIER_NAME.is_match(name) || is_int32_name(name) => name.to_owned(),
            _ => quote_code_units(name.code_units(agent), b'\''),
        },
        PropertyKey::Symbol(_) => unreachable!("object literals are built from string keys"),
    }
}

pub(crate) struct StringPrototypeQuote;
impl Builtin for StringPrototypeQuote {
    const NAME: &'static str = "quote";
    const LENGTH: u8 = 0;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(StringPrototypeQuote::quote);
}

impl StringPrototypeQuote {
    /// `String.prototype.quote ( )`
    fn quote(agent: &mut Agent, this_value: Value, _: ArgumentsList) -> JsResult<Value> {
        // 1. Let O be ? RequireObjectCoercible(this value).
        if this_value.is_nullish() {
            return Err(agent.throw_exception(
                ExceptionType::TypeError,
                "String.prototype.quote called on null or undefined",
            ));
        }
        // 2. Let S be ? ToString(O).
        let s = to_string(agent, this_value)?;
        // 3. Return Quote(S).
        let quoted = quote(agent, s);
        Ok(Value::from_string(agent, quoted))
    }

    pub(crate) fn install(agent: &mut Agent) {
        let this = agent.intrinsics().string_prototype();
        OrdinaryObjectBuilder::new_intrinsic_object(agent, this)
            .with_property_capacity(1)
            .with_builtin_function_property::<StringPrototypeQuote>()
            .build();
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn q(s: &str) -> std::string::String {
        quote_code_units(s.encode_utf16(), b'"')
    }

    #[test]
    fn quote_escapes_control_characters() {
        assert_eq!(q("a\nb"), r#""a\nb""#);
        assert_eq!(q("\u{8}\t\u{b}\r"), r#""\b\t\v\r""#);
        assert_eq!(q("\u{0}\u{c}\u{1f}"), r#""\x00\x0C\x1F""#);
    }

    #[test]
    fn quote_escapes_only_the_chosen_quote() {
        assert_eq!(q(r#"say "hi" it's"#), r#""say \"hi\" it's""#);
        assert_eq!(
            quote_code_units("it's \"x\"".encode_utf16(), b'\''),
            r#"'it\'s "x"'"#
        );
        assert_eq!(q("a\\b"), r#""a\\b""#);
    }

    #[test]
    fn quote_escapes_non_ascii() {
        assert_eq!(q("\u{7f}\u{e9}"), r#""\x7F\xE9""#);
        assert_eq!(q("\u{20ac}"), r#""\u20AC""#);
        assert_eq!(q("\u{1f600}"), r#""\uD83D\uDE00""#);
        let lone_surrogate = [0xD800u16];
        assert_eq!(
            quote_code_units(lone_surrogate.into_iter(), b'"'),
            r#""\uD800""#
        );
    }

    #[test]
    fn int32_names() {
        assert!(is_int32_name("0"));
        assert!(is_int32_name("2147483647"));
        assert!(!is_int32_name("2147483648"));
        assert!(!is_int32_name("01"));
        assert!(!is_int32_name("-1"));
        assert!(!is_int32_name(""));
    }

    #[test]
    fn identifier_names() {
        assert!(IDENTIFIER_NAME.is_match("_$a1"));
        assert!(!IDENTIFIER_NAME.is_match("1a"));
        assert!(!IDENTIFIER_NAME.is_match("b c"));
        assert!(!IDENTIFIER_NAME.is_match("é"));
    }
}
