// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::ecmascript::{
    execution::Agent,
    types::{String, Symbol, Value},
};

/// # [Property key](https://tc39.es/ecma262/#property-key)
///
/// The properties of an object are uniquely identified using property keys. A
/// _property key_ is either a String or a Symbol. Array indexes, the canonical
/// numeric strings from `"0"` to `"4294967294"`, are stored as integers so
/// that own property keys can be ordered without reparsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKey {
    Integer(u32),
    String(String),
    Symbol(Symbol),
}

impl PropertyKey {
    pub fn from_str(agent: &mut Agent, str: &str) -> Self {
        parse_array_index(str)
            .map(PropertyKey::Integer)
            .unwrap_or_else(|| PropertyKey::String(String::from_str(agent, str)))
    }

    pub fn from_string(agent: &mut Agent, string: std::string::String) -> Self {
        parse_array_index(&string)
            .map(PropertyKey::Integer)
            .unwrap_or_else(|| PropertyKey::String(String::from_string(agent, string)))
    }

    /// Converts an interned string into a key, normalising array indexes.
    pub fn from_js_string(agent: &Agent, string: String) -> Self {
        string
            .as_str(agent)
            .and_then(parse_array_index)
            .map_or(PropertyKey::String(string), PropertyKey::Integer)
    }

    pub fn is_array_index(self) -> bool {
        matches!(self, PropertyKey::Integer(_))
    }

    pub fn is_symbol(self) -> bool {
        matches!(self, PropertyKey::Symbol(_))
    }

    /// Returns the key as a language value: integers become their canonical
    /// string form.
    pub fn into_value(self, agent: &mut Agent) -> Value {
        match self {
            PropertyKey::Integer(index) => Value::from_string(agent, index.to_string()),
            PropertyKey::String(s) => Value::String(s),
            PropertyKey::Symbol(s) => Value::Symbol(s),
        }
    }

    /// Lossy text for diagnostics.
    pub fn as_display(self, agent: &mut Agent) -> std::string::String {
        match self {
            PropertyKey::Integer(index) => index.to_string(),
            PropertyKey::String(s) => s.to_string_lossy(agent),
            PropertyKey::Symbol(s) => {
                let descriptive = s.descriptive_string(agent);
                descriptive.to_string_lossy(agent)
            }
        }
    }
}

impl From<u32> for PropertyKey {
    fn from(value: u32) -> Self {
        debug_assert!(value != u32::MAX, "2**32 - 1 is not an array index");
        PropertyKey::Integer(value)
    }
}

impl From<Symbol> for PropertyKey {
    fn from(value: Symbol) -> Self {
        PropertyKey::Symbol(value)
    }
}

/// Returns the array index that `str` is the canonical string of, if any.
pub(crate) fn parse_array_index(str: &str) -> Option<u32> {
    if str.is_empty() || str.len() > 10 || !str.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if str.len() > 1 && str.starts_with('0') {
        return None;
    }
    match str.parse::<u64>() {
        Ok(index) if index < u64::from(u32::MAX) => Some(index as u32),
        _ => None,
    }
}

#[cfg(test)]
mod test {
    use super::parse_array_index;

    #[test]
    fn canonical_array_indexes() {
        assert_eq!(parse_array_index("0"), Some(0));
        assert_eq!(parse_array_index("42"), Some(42));
        assert_eq!(parse_array_index("4294967294"), Some(4294967294));
        assert_eq!(parse_array_index("4294967295"), None);
        assert_eq!(parse_array_index("007"), None);
        assert_eq!(parse_array_index("-1"), None);
        assert_eq!(parse_array_index("+1"), None);
        assert_eq!(parse_array_index("1.0"), None);
        assert_eq!(parse_array_index(""), None);
    }
}
