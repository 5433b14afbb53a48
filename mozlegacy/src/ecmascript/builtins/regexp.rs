// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! RegExp objects keep their pattern text and flags. Patterns are never
//! compiled; only the flags are validated.

use crate::ecmascript::{
    abstract_operations::{operations_on_objects::get, type_conversion::to_string},
    builders::ordinary_object_builder::OrdinaryObjectBuilder,
    builtins::{
        ArgumentsList, Behaviour, Builtin, BuiltinGetter,
        ordinary::ordinary_object_create_with_intrinsics,
    },
    execution::{Agent, ExceptionType, JsResult, ProtoIntrinsics},
    types::{Object, ObjectKind, PropertyKey, String, Value},
};

#[derive(Debug, Clone, Copy)]
pub struct RegExpHeapData {
    /// \[\[OriginalSource]]
    pub(crate) original_source: String,
    /// \[\[OriginalFlags]]
    pub(crate) original_flags: String,
}

/// ### [22.2.3.1 RegExpCreate ( P, F )](https://tc39.es/ecma262/#sec-regexpcreate)
pub fn regexp_create(agent: &mut Agent, pattern: &str, flags: &str) -> JsResult<Object> {
    // RegExpInitialize step 5. If F contains any code unit other than "d", "g", "i", "m",
    // "s", "u", "v", or "y", or if F contains any code unit more than once, throw a
    // SyntaxError exception.
    let mut seen = 0u16;
    for flag in flags.bytes() {
        let bit = match flag {
            b'd' => 1,
            b'g' => 1 << 1,
            b'i' => 1 << 2,
            b'm' => 1 << 3,
            b's' => 1 << 4,
            b'u' => 1 << 5,
            b'v' => 1 << 6,
            b'y' => 1 << 7,
            _ => 1 << 8,
        };
        if bit == 1 << 8 || seen & bit != 0 {
            return Err(agent.throw_exception_with_message(
                ExceptionType::SyntaxError,
                format!("Invalid regular expression flags '{flags}'"),
            ));
        }
        seen |= bit;
    }
    let original_source = String::from_str(agent, pattern);
    let original_flags = String::from_str(agent, flags);
    Ok(ordinary_object_create_with_intrinsics(
        agent,
        ProtoIntrinsics::RegExp,
        ObjectKind::RegExp(RegExpHeapData {
            original_source,
            original_flags,
        }),
    ))
}

fn regexp_data(agent: &Agent, value: Value) -> Option<RegExpHeapData> {
    match value {
        Value::Object(o) => match agent[o].kind {
            ObjectKind::RegExp(data) => Some(data),
            _ => None,
        },
        _ => None,
    }
}

/// The `/source/flags` text of a RegExp-like object, read through `Get`.
pub(crate) fn regexp_to_string(agent: &mut Agent, r: Object) -> JsResult<String> {
    // 3. Let pattern be ? ToString(? Get(R, "source")).
    let source_key = PropertyKey::from_str(agent, "source");
    let pattern = get(agent, r, source_key)?;
    let pattern = to_string(agent, pattern)?;
    // 4. Let flags be ? ToString(? Get(R, "flags")).
    let flags_key = PropertyKey::from_str(agent, "flags");
    let flags = get(agent, r, flags_key)?;
    let flags = to_string(agent, flags)?;
    // 5. Let result be the string-concatenation of "/", pattern, "/", and flags.
    let slash = String::from_str(agent, "/");
    Ok(String::concat(agent, &[slash, pattern, slash, flags]))
}

pub(crate) struct RegExpPrototype;

struct RegExpPrototypeGetSource;
impl Builtin for RegExpPrototypeGetSource {
    const NAME: &'static str = "source";
    const LENGTH: u8 = 0;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(RegExpPrototype::get_source);
}
impl BuiltinGetter for RegExpPrototypeGetSource {}

struct RegExpPrototypeGetFlags;
impl Builtin for RegExpPrototypeGetFlags {
    const NAME: &'static str = "flags";
    const LENGTH: u8 = 0;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(RegExpPrototype::get_flags);
}
impl BuiltinGetter for RegExpPrototypeGetFlags {}

struct RegExpPrototypeToString;
impl Builtin for RegExpPrototypeToString {
    const NAME: &'static str = "toString";
    const LENGTH: u8 = 0;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(RegExpPrototype::to_string);
}

impl RegExpPrototype {
    /// ### [22.2.6.13 get RegExp.prototype.source](https://tc39.es/ecma262/#sec-get-regexp.prototype.source)
    fn get_source(agent: &mut Agent, this_value: Value, _: ArgumentsList) -> JsResult<Value> {
        // 3. If R does not have an [[OriginalSource]] internal slot, then
        let Some(data) = regexp_data(agent, this_value) else {
            // a. If SameValue(R, %RegExp.prototype%) is true, return "(?:)".
            if this_value == agent.intrinsics().regexp_prototype().into_value() {
                return Ok(Value::from_str(agent, "(?:)"));
            }
            // b. Otherwise, throw a TypeError exception.
            return Err(agent.throw_exception(
                ExceptionType::TypeError,
                "RegExp.prototype.source getter called on non-RegExp",
            ));
        };
        // 6. Return EscapeRegExpPattern(src, flags).
        if data.original_source.is_empty() {
            return Ok(Value::from_str(agent, "(?:)"));
        }
        Ok(Value::String(data.original_source))
    }

    /// ### [22.2.6.4 get RegExp.prototype.flags](https://tc39.es/ecma262/#sec-get-regexp.prototype.flags)
    ///
    /// Reports the flags the object was created with.
    fn get_flags(agent: &mut Agent, this_value: Value, _: ArgumentsList) -> JsResult<Value> {
        // 2. If R is not an Object, throw a TypeError exception.
        if !this_value.is_object() {
            return Err(agent.throw_exception(
                ExceptionType::TypeError,
                "RegExp.prototype.flags getter called on non-object",
            ));
        }
        Ok(Value::String(
            regexp_data(agent, this_value).map_or(String::EMPTY_STRING, |data| data.original_flags),
        ))
    }

    /// ### [22.2.6.17 RegExp.prototype.toString ( )](https://tc39.es/ecma262/#sec-regexp.prototype.tostring)
    fn to_string(agent: &mut Agent, this_value: Value, _: ArgumentsList) -> JsResult<Value> {
        // 1. Let R be the this value.
        // 2. If R is not an Object, throw a TypeError exception.
        let Ok(r) = Object::try_from(this_value) else {
            return Err(agent.throw_exception(
                ExceptionType::TypeError,
                "RegExp.prototype.toString called on non-object",
            ));
        };
        regexp_to_string(agent, r).map(Value::String)
    }

    pub(crate) fn create_intrinsic(agent: &mut Agent) {
        let this = agent.intrinsics().regexp_prototype();
        OrdinaryObjectBuilder::new_intrinsic_object(agent, this)
            .with_property_capacity(3)
            .with_builtin_function_getter_property::<RegExpPrototypeGetFlags>()
            .with_builtin_function_getter_property::<RegExpPrototypeGetSource>()
            .with_builtin_function_property::<RegExpPrototypeToString>()
            .build();
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ecmascript::{abstract_operations::operations_on_objects::invoke, execution::Options};

    #[test]
    fn to_string_uses_source_and_flags() {
        let mut agent = Agent::new(Options::default());
        let regexp = regexp_create(&mut agent, "a+b", "gi").unwrap();
        let key = PropertyKey::from_str(&mut agent, "toString");
        let result = invoke(&mut agent, regexp.into_value(), key, None).unwrap();
        assert_eq!(result.to_display_string(&mut agent).unwrap(), "/a+b/gi");
    }

    #[test]
    fn empty_pattern_prints_as_empty_group() {
        let mut agent = Agent::new(Options::default());
        let regexp = regexp_create(&mut agent, "", "").unwrap();
        let key = PropertyKey::from_str(&mut agent, "toString");
        let result = invoke(&mut agent, regexp.into_value(), key, None).unwrap();
        assert_eq!(result.to_display_string(&mut agent).unwrap(), "/(?:)/");
    }

    #[test]
    fn repeated_flags_are_rejected() {
        let mut agent = Agent::new(Options::default());
        assert!(regexp_create(&mut agent, "a", "gg").is_err());
        assert!(regexp_create(&mut agent, "a", "x").is_err());
    }
}
