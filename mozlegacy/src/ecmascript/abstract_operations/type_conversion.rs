// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ### [7.1 Type Conversion](https://tc39.es/ecma262/#sec-type-conversion)
//!
//! The ECMAScript language implicitly performs automatic type conversion as
//! needed. These operations convert between language values; the host object
//! model has no BigInt, so the numeric conversions are all Number based.

use super::{operations_on_objects::get, testing_and_comparison::is_callable};
use crate::ecmascript::{
    abstract_operations::operations_on_objects::call_function,
    builtins::primitive_objects::{PrimitiveObjectData, create_primitive_object},
    execution::{Agent, ExceptionType, JsResult},
    types::{Object, PropertyKey, String, Value},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferredType {
    String = 1,
    Number,
}

/// ### [7.1.1 ToPrimitive ( input \[ , preferredType \] )](https://tc39.es/ecma262/#sec-toprimitive)
///
/// The host object model has no `@@toPrimitive`, so objects always go
/// through OrdinaryToPrimitive.
pub fn to_primitive(
    agent: &mut Agent,
    input: Value,
    preferred_type: Option<PreferredType>,
) -> JsResult<Value> {
    // 1. If input is an Object, then
    if let Ok(input) = Object::try_from(input) {
        // c. If preferredType is not present, let preferredType be NUMBER.
        // d. Return ? OrdinaryToPrimitive(input, preferredType).
        ordinary_to_primitive(agent, input, preferred_type.unwrap_or(PreferredType::Number))
    } else {
        // 2. Return input.
        Ok(input)
    }
}

/// ### [7.1.1.1 OrdinaryToPrimitive ( O, hint )](https://tc39.es/ecma262/#sec-ordinarytoprimitive)
pub fn ordinary_to_primitive(agent: &mut Agent, o: Object, hint: PreferredType) -> JsResult<Value> {
    let to_string_key = PropertyKey::from_str(agent, "toString");
    let value_of_key = PropertyKey::from_str(agent, "valueOf");
    let method_names = match hint {
        // 1. If hint is STRING, then
        // a. Let methodNames be « "toString", "valueOf" ».
        PreferredType::String => [to_string_key, value_of_key],
        // 2. Else,
        // a. Let methodNames be « "valueOf", "toString" ».
        PreferredType::Number => [value_of_key, to_string_key],
    };
    // 3. For each element name of methodNames, do
    for name in method_names {
        // a. Let method be ? Get(O, name).
        let method = get(agent, o, name)?;
        // b. If IsCallable(method) is true, then
        if let Some(method) = is_callable(agent, method) {
            // i. Let result be ? Call(method, O).
            let result = call_function(agent, method, o.into_value(), None)?;
            // ii. If result is not an Object, return result.
            if !result.is_object() {
                return Ok(result);
            }
        }
    }
    // 4. Throw a TypeError exception.
    Err(agent.throw_exception(
        ExceptionType::TypeError,
        "Cannot convert object to primitive value",
    ))
}

/// ### [7.1.2 ToBoolean ( argument )](https://tc39.es/ecma262/#sec-toboolean)
pub fn to_boolean(_agent: &Agent, argument: Value) -> bool {
    match argument {
        // 1. If argument is a Boolean, return argument.
        Value::Boolean(b) => b,
        // 2. If argument is one of undefined, null, +0𝔽, -0𝔽, NaN, 0ℤ, or the
        //    empty String, return false.
        Value::Undefined | Value::Null => false,
        Value::Number(n) => !(n == 0.0 || n.is_nan()),
        Value::String(s) => !s.is_empty(),
        // 4. Return true.
        Value::Symbol(_) | Value::Object(_) => true,
    }
}

/// ### [7.1.4 ToNumber ( argument )](https://tc39.es/ecma262/#sec-tonumber)
pub fn to_number(agent: &mut Agent, argument: Value) -> JsResult<f64> {
    match argument {
        // 1. If argument is a Number, return argument.
        Value::Number(n) => Ok(n),
        // 2. If argument is either a Symbol or a BigInt, throw a TypeError exception.
        Value::Symbol(_) => Err(agent.throw_exception(
            ExceptionType::TypeError,
            "Cannot convert a Symbol value to a number",
        )),
        // 3. If argument is undefined, return NaN.
        Value::Undefined => Ok(f64::NAN),
        // 4. If argument is either null or false, return +0𝔽.
        Value::Null | Value::Boolean(false) => Ok(0.0),
        // 5. If argument is true, return 1𝔽.
        Value::Boolean(true) => Ok(1.0),
        // 6. If argument is a String, return StringToNumber(argument).
        Value::String(s) => Ok(string_to_number(&s.to_string_lossy(agent))),
        // 7. Assert: argument is an Object.
        Value::Object(_) => {
            // 8. Let primValue be ? ToPrimitive(argument, NUMBER).
            let prim_value = to_primitive(agent, argument, Some(PreferredType::Number))?;
            // 9. Assert: primValue is not an Object.
            // 10. Return ? ToNumber(primValue).
            to_number(agent, prim_value)
        }
    }
}

/// ### [7.1.4.1.1 StringToNumber ( str )](https://tc39.es/ecma262/#sec-stringtonumber)
pub(crate) fn string_to_number(str: &str) -> f64 {
    let trimmed = str.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    let (radix, digits) = match trimmed.get(..2) {
        Some("0x" | "0X") => (16, &trimmed[2..]),
        Some("0o" | "0O") => (8, &trimmed[2..]),
        Some("0b" | "0B") => (2, &trimmed[2..]),
        _ => (10, trimmed),
    };
    if radix != 10 {
        return u64::from_str_radix(digits, radix).map_or(f64::NAN, |n| n as f64);
    }
    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    // Rust accepts "inf" and "NaN" spellings that StrDecimalLiteral does not.
    if !trimmed
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'))
    {
        return f64::NAN;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// ### [7.1.5 ToIntegerOrInfinity ( argument )](https://tc39.es/ecma262/#sec-tointegerorinfinity)
pub fn to_integer_or_infinity(agent: &mut Agent, argument: Value) -> JsResult<f64> {
    // 1. Let number be ? ToNumber(argument).
    let number = to_number(agent, argument)?;
    // 2. If number is one of NaN, +0𝔽, or -0𝔽, return 0.
    if number.is_nan() || number == 0.0 {
        return Ok(0.0);
    }
    // 3. If number is one of +∞𝔽 or -∞𝔽, return number.
    // 4. Return truncate(ℝ(number)).
    Ok(number.trunc())
}

/// ### [7.1.7 ToUint32 ( argument )](https://tc39.es/ecma262/#sec-touint32)
pub fn to_uint32(agent: &mut Agent, argument: Value) -> JsResult<u32> {
    // 1. Let number be ? ToNumber(argument).
    let number = to_number(agent, argument)?;
    // 2. If number is not finite or number is either +0𝔽 or -0𝔽, return +0𝔽.
    if !number.is_finite() || number == 0.0 {
        return Ok(0);
    }
    // 3. Let int be truncate(ℝ(number)).
    // 4. Let int32bit be int modulo 2**32.
    // 5. Return 𝔽(int32bit).
    Ok(number.trunc().rem_euclid(4294967296.0) as u32)
}

/// ### [7.1.20 ToLength ( argument )](https://tc39.es/ecma262/#sec-tolength)
pub fn to_length(agent: &mut Agent, argument: Value) -> JsResult<u64> {
    // 1. Let len be ? ToIntegerOrInfinity(argument).
    let len = to_integer_or_infinity(agent, argument)?;
    // 2. If len ≤ 0, return +0𝔽.
    if len <= 0.0 {
        return Ok(0);
    }
    // 3. Return 𝔽(min(len, 2**53 - 1)).
    Ok(len.min(9007199254740991.0) as u64)
}

/// ### [7.1.17 ToString ( argument )](https://tc39.es/ecma262/#sec-tostring)
pub fn to_string(agent: &mut Agent, argument: Value) -> JsResult<String> {
    match argument {
        // 1. If argument is a String, return argument.
        Value::String(s) => Ok(s),
        // 2. If argument is a Symbol, throw a TypeError exception.
        Value::Symbol(_) => Err(agent.throw_exception(
            ExceptionType::TypeError,
            "Cannot convert a Symbol value to a string",
        )),
        // 3. If argument is undefined, return "undefined".
        Value::Undefined => Ok(String::from_str(agent, "undefined")),
        // 4. If argument is null, return "null".
        Value::Null => Ok(String::from_str(agent, "null")),
        // 5. If argument is true, return "true".
        // 6. If argument is false, return "false".
        Value::Boolean(b) => Ok(String::from_str(agent, if b { "true" } else { "false" })),
        // 7. If argument is a Number, return Number::toString(argument, 10).
        Value::Number(n) => Ok(String::from_string(agent, number_to_string(n))),
        // 9. Assert: argument is an Object.
        Value::Object(_) => {
            // 10. Let primValue be ? ToPrimitive(argument, STRING).
            let prim_value = to_primitive(agent, argument, Some(PreferredType::String))?;
            // 11. Assert: primValue is not an Object.
            // 12. Return ? ToString(primValue).
            to_string(agent, prim_value)
        }
    }
}

/// ### [6.1.6.1.20 Number::toString ( x, radix )](https://tc39.es/ecma262/#sec-numeric-types-number-tostring)
///
/// Radix 10 only.
pub fn number_to_string(x: f64) -> std::string::String {
    let mut buffer = ryu_js::Buffer::new();
    buffer.format(x).to_owned()
}

/// ### [7.1.18 ToObject ( argument )](https://tc39.es/ecma262/#sec-toobject)
pub fn to_object(agent: &mut Agent, argument: Value) -> JsResult<Object> {
    let data = match argument {
        Value::Undefined | Value::Null => {
            return Err(agent.throw_exception(
                ExceptionType::TypeError,
                "Argument cannot be converted into an object",
            ));
        }
        Value::Object(o) => return Ok(o),
        Value::Boolean(b) => PrimitiveObjectData::Boolean(b),
        Value::Number(n) => PrimitiveObjectData::Number(n),
        Value::String(s) => PrimitiveObjectData::String(s),
        Value::Symbol(s) => PrimitiveObjectData::Symbol(s),
    };
    Ok(create_primitive_object(agent, data))
}

/// ### [7.1.19 ToPropertyKey ( argument )](https://tc39.es/ecma262/#sec-topropertykey)
pub fn to_property_key(agent: &mut Agent, argument: Value) -> JsResult<PropertyKey> {
    // 1. Let key be ? ToPrimitive(argument, STRING).
    let key = to_primitive(agent, argument, Some(PreferredType::String))?;
    // 2. If key is a Symbol, then
    if let Value::Symbol(symbol) = key {
        // a. Return key.
        return Ok(PropertyKey::Symbol(symbol));
    }
    // 3. Return ! ToString(key).
    let key = to_string(agent, key)?;
    Ok(PropertyKey::from_js_string(agent, key))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn number_formatting() {
        assert_eq!(number_to_string(0.0), "0");
        assert_eq!(number_to_string(-0.0), "0");
        assert_eq!(number_to_string(42.0), "42");
        assert_eq!(number_to_string(1.5), "1.5");
        assert_eq!(number_to_string(f64::NAN), "NaN");
        assert_eq!(number_to_string(f64::INFINITY), "Infinity");
        assert_eq!(number_to_string(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(number_to_string(1e21), "1e+21");
    }

    #[test]
    fn string_to_number_edge_cases() {
        assert_eq!(string_to_number(""), 0.0);
        assert_eq!(string_to_number("  12  "), 12.0);
        assert_eq!(string_to_number("0x10"), 16.0);
        assert_eq!(string_to_number("-Infinity"), f64::NEG_INFINITY);
        assert!(string_to_number("inf").is_nan());
        assert!(string_to_number("12px").is_nan());
    }
}
