// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::{Object, String, Symbol};
use crate::ecmascript::{
    abstract_operations::type_conversion::to_string,
    execution::{Agent, JsResult},
};

/// ### [6.1 ECMAScript Language Types](https://tc39.es/ecma262/#sec-ecmascript-language-types)
///
/// Values are plain handles: heap-allocated parts are referred to by index
/// and stay owned by the [`Agent`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum Value {
    /// ### [6.1.1 The Undefined Type](https://tc39.es/ecma262/#sec-ecmascript-language-types-undefined-type)
    #[default]
    Undefined,
    /// ### [6.1.2 The Null Type](https://tc39.es/ecma262/#sec-ecmascript-language-types-null-type)
    Null,
    /// ### [6.1.3 The Boolean Type](https://tc39.es/ecma262/#sec-ecmascript-language-types-boolean-type)
    Boolean(bool),
    /// ### [6.1.6.1 The Number Type](https://tc39.es/ecma262/#sec-ecmascript-language-types-number-type)
    Number(f64),
    String(String),
    Symbol(Symbol),
    Object(Object),
}

impl Value {
    pub fn from_str(agent: &mut Agent, str: &str) -> Self {
        Value::String(String::from_str(agent, str))
    }

    pub fn from_string(agent: &mut Agent, string: std::string::String) -> Self {
        Value::String(String::from_string(agent, string))
    }

    pub fn is_undefined(self) -> bool {
        matches!(self, Value::Undefined)
    }

    pub fn is_null(self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_nullish(self) -> bool {
        matches!(self, Value::Undefined | Value::Null)
    }

    pub fn is_object(self) -> bool {
        matches!(self, Value::Object(_))
    }

    pub fn is_string(self) -> bool {
        matches!(self, Value::String(_))
    }

    pub fn to_string(self, agent: &mut Agent) -> JsResult<String> {
        to_string(agent, self)
    }

    /// Converts the value to a Rust string, for use in messages and tests.
    pub fn to_display_string(self, agent: &mut Agent) -> JsResult<std::string::String> {
        let string = to_string(agent, self)?;
        Ok(string.to_string_lossy(agent))
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(value.into())
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Number(value.into())
    }
}

impl From<Option<Object>> for Value {
    fn from(value: Option<Object>) -> Self {
        value.map_or(Value::Null, Value::Object)
    }
}
