// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use wtf8::{Wtf8, Wtf8Buf};

use super::Value;
use crate::{ecmascript::execution::Agent, heap::indexes::StringIndex};

/// ### [6.1.4 The String Type](https://tc39.es/ecma262/#sec-ecmascript-language-types-string-type)
///
/// Strings are interned on the heap, so two `String`s compare equal if and
/// only if their contents are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct String(pub(crate) StringIndex);

#[derive(Debug, Clone)]
pub struct StringHeapData {
    data: Wtf8Buf,
    utf16_len: usize,
}

impl StringHeapData {
    pub(crate) fn new(data: Wtf8Buf) -> Self {
        let utf16_len = data.to_ill_formed_utf16().count();
        Self { data, utf16_len }
    }

    pub fn as_wtf8(&self) -> &Wtf8 {
        &self.data
    }

    pub fn utf16_len(&self) -> usize {
        self.utf16_len
    }
}

impl String {
    /// The empty string is always the first string allocated on the heap.
    pub const EMPTY_STRING: Self = Self(StringIndex::from_u32_index(0));

    pub fn from_str(agent: &mut Agent, str: &str) -> Self {
        agent.heap.intern_str(str)
    }

    pub fn from_string(agent: &mut Agent, string: std::string::String) -> Self {
        agent.heap.intern_wtf8_buf(Wtf8Buf::from_string(string))
    }

    pub fn from_wtf8_buf(agent: &mut Agent, buf: Wtf8Buf) -> Self {
        agent.heap.intern_wtf8_buf(buf)
    }

    /// Creates a string from UTF-16 code units. Lone surrogates are kept.
    pub fn from_code_units(agent: &mut Agent, code_units: &[u16]) -> Self {
        agent
            .heap
            .intern_wtf8_buf(Wtf8Buf::from_ill_formed_utf16(code_units))
    }

    pub fn as_wtf8(self, agent: &Agent) -> &Wtf8 {
        agent.heap[self].as_wtf8()
    }

    /// Returns the string as UTF-8 if it contains no lone surrogates.
    pub fn as_str(self, agent: &Agent) -> Option<&str> {
        self.as_wtf8(agent).as_str()
    }

    pub fn to_string_lossy(self, agent: &Agent) -> std::string::String {
        self.as_wtf8(agent).to_string_lossy().into_owned()
    }

    pub fn utf16_len(self, agent: &Agent) -> usize {
        agent.heap[self].utf16_len()
    }

    pub fn is_empty(self) -> bool {
        self == Self::EMPTY_STRING
    }

    pub fn code_units(self, agent: &Agent) -> impl Iterator<Item = u16> + '_ {
        self.as_wtf8(agent).to_ill_formed_utf16()
    }

    pub fn code_unit_at(self, agent: &Agent, index: usize) -> Option<u16> {
        self.code_units(agent).nth(index)
    }

    /// ### [6.1.4.1 StringIndexOf ( string, searchValue, fromIndex )](https://tc39.es/ecma262/#sec-stringindexof)
    ///
    /// Only supports single ASCII characters, which is all the legacy
    /// source splicing needs. Returns a UTF-16 index.
    pub fn index_of_ascii(self, agent: &Agent, search: u8) -> Option<usize> {
        self.code_units(agent).position(|c| c == u16::from(search))
    }

    /// Returns the code units from `start` to the end of the string.
    pub fn substring_from(self, agent: &mut Agent, start: usize) -> Self {
        let code_units: Vec<u16> = self.code_units(agent).skip(start).collect();
        Self::from_code_units(agent, &code_units)
    }

    pub fn concat(agent: &mut Agent, strings: &[Self]) -> Self {
        let mut buf = Wtf8Buf::new();
        for string in strings {
            buf.push_wtf8(string.as_wtf8(agent));
        }
        Self::from_wtf8_buf(agent, buf)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl TryFrom<Value> for String {
    type Error = ();

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(s) => Ok(s),
            _ => Err(()),
        }
    }
}
