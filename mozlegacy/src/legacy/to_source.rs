// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `uneval` and the `toSource` family: serializing values back into source
//! text that evaluates to an equivalent value.

use ahash::AHashSet;
use tracing::trace;

use super::quote::{property_name_source, quote};
use crate::ecmascript::{
    abstract_operations::{
        operations_on_objects::{
            call_function, enumerable_own_keys, get, get_v, has_own_property,
            length_of_array_like,
        },
        testing_and_comparison::{is_array, is_callable},
        type_conversion::{number_to_string, to_object, to_string},
    },
    builders::ordinary_object_builder::OrdinaryObjectBuilder,
    builtins::{
        ArgumentsList, Behaviour, Builtin,
        date::this_time_value,
        fundamental_objects::function_source_text,
        primitive_objects::{this_boolean_value, this_number_value, this_string_value},
        regexp::regexp_to_string,
    },
    execution::{Agent, ExceptionType, JsResult},
    types::{InternalMethods, Object, ObjectKind, PropertyKey, String, Value},
};

/// Serialization state of an agent.
///
/// Composites currently being serialized are kept in `visiting`; meeting
/// one of them again yields a placeholder instead of recursing. `depth`
/// counts the composites entered, so that only the outermost object
/// literal is parenthesised.
#[derive(Debug, Default)]
pub struct SourceContext {
    visiting: AHashSet<Object>,
    depth: u32,
}

impl SourceContext {
    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn is_idle(&self) -> bool {
        self.depth == 0 && self.visiting.is_empty()
    }
}

/// Runs `f` with `object` marked as being serialized. A revisit returns
/// `placeholder` without calling `f`. The mark is removed whether `f`
/// succeeds or throws.
fn with_visit(
    agent: &mut Agent,
    object: Object,
    placeholder: &str,
    f: impl FnOnce(&mut Agent) -> JsResult<std::string::String>,
) -> JsResult<std::string::String> {
    if agent.source_context.visiting.contains(&object) {
        trace!(?object, placeholder, "toSource revisited a composite");
        return Ok(placeholder.to_owned());
    }
    agent.source_context.visiting.insert(object);
    agent.source_context.depth += 1;
    let result = f(agent);
    agent.source_context.visiting.remove(&object);
    agent.source_context.depth -= 1;
    result
}

/// Serializes any value to source text.
///
/// Primitives other than symbols are rendered directly. Symbols and objects
/// go through their `toSource` method, found by ordinary property lookup;
/// a value without a callable `toSource` serializes as `null`.
pub fn uneval(agent: &mut Agent, value: Value) -> JsResult<String> {
    let source = uneval_to_string(agent, value)?;
    Ok(String::from_string(agent, source))
}

fn uneval_to_string(agent: &mut Agent, value: Value) -> JsResult<std::string::String> {
    match value {
        Value::Undefined => Ok("(void 0)".to_owned()),
        Value::Null => Ok("null".to_owned()),
        Value::Boolean(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(number_to_string(n)),
        Value::String(s) => Ok(quote(agent, s)),
        Value::Symbol(_) | Value::Object(_) => {
            let key = PropertyKey::from_str(agent, "toSource");
            let to_source = get_v(agent, value, key)?;
            let Some(to_source) = is_callable(agent, to_source) else {
                return Ok("null".to_owned());
            };
            let result = call_function(agent, to_source, value, None)?;
            let result = to_string(agent, result)?;
            Ok(result.to_string_lossy(agent))
        }
    }
}

/// Returns the text after the function keyword and name: everything from
/// the first `(`, or the whole source when there is none.
fn accessor_tail(source: &str) -> &str {
    source.find('(').map_or(source, |index| &source[index..])
}

fn object_to_source(agent: &mut Agent, object: Object) -> JsResult<std::string::String> {
    with_visit(agent, object, "{}", |agent| {
        let depth = agent.source_context.depth;
        let keys = enumerable_own_keys(agent, object)?;
        let mut entries = Vec::with_capacity(keys.len());
        for key in keys {
            // The key list is a snapshot: a getter may have removed later keys.
            let Some(desc) = object.internal_get_own_property(agent, key)? else {
                continue;
            };
            let name = property_name_source(agent, key);
            if desc.is_accessor_descriptor() {
                let mut accessors = Vec::with_capacity(2);
                if let Some(Some(getter)) = desc.get {
                    let source =
                        function_source_text(agent, getter.into_value()).unwrap_or_default();
                    accessors.push(format!("get {name}{}", accessor_tail(&source)));
                }
                if let Some(Some(setter)) = desc.set {
                    let source =
                        function_source_text(agent, setter.into_value()).unwrap_or_default();
                    accessors.push(format!("set {name}{}", accessor_tail(&source)));
                }
                if !accessors.is_empty() {
                    entries.push(accessors.join(", "));
                }
            } else {
                let value = uneval_to_string(agent, desc.value.unwrap_or_default())?;
                entries.push(format!("{name}:{value}"));
            }
        }
        let body = entries.join(", ");
        if depth > 1 {
            Ok(format!("{{{body}}}"))
        } else {
            Ok(format!("({{{body}}})"))
        }
    })
}

fn array_to_source(agent: &mut Agent, array: Object) -> JsResult<std::string::String> {
    with_visit(agent, array, "[]", |agent| {
        let len = length_of_array_like(agent, array)?;
        let mut source = std::string::String::from("[");
        for index in 0..len {
            let last = index + 1 == len;
            let key = PropertyKey::from(index as u32);
            if has_own_property(agent, array, key)? {
                let element = get(agent, array, key)?;
                source.push_str(&uneval_to_string(agent, element)?);
                if !last {
                    source.push_str(", ");
                }
            } else {
                source.push(',');
                if !last {
                    source.push(' ');
                }
            }
        }
        source.push(']');
        Ok(source)
    })
}

pub(crate) struct GlobalUneval;
impl Builtin for GlobalUneval {
    const NAME: &'static str = "uneval";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ToSource::uneval);
}

struct ObjectPrototypeToSource;
impl Builtin for ObjectPrototypeToSource {
    const NAME: &'static str = "toSource";
    const LENGTH: u8 = 0;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ToSource::object);
}

struct ArrayPrototypeToSource;
impl Builtin for ArrayPrototypeToSource {
    const NAME: &'static str = "toSource";
    const LENGTH: u8 = 0;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ToSource::array);
}

struct FunctionPrototypeToSource;
impl Builtin for FunctionPrototypeToSource {
    const NAME: &'static str = "toSource";
    const LENGTH: u8 = 0;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ToSource::function);
}

struct StringPrototypeToSource;
impl Builtin for StringPrototypeToSource {
    const NAME: &'static str = "toSource";
    const LENGTH: u8 = 0;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ToSource::string);
}

struct NumberPrototypeToSource;
impl Builtin for NumberPrototypeToSource {
    const NAME: &'static str = "toSource";
    const LENGTH: u8 = 0;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ToSource::number);
}

struct BooleanPrototypeToSource;
impl Builtin for BooleanPrototypeToSource {
    const NAME: &'static str = "toSource";
    const LENGTH: u8 = 0;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ToSource::boolean);
}

struct DatePrototypeToSource;
impl Builtin for DatePrototypeToSource {
    const NAME: &'static str = "toSource";
    const LENGTH: u8 = 0;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ToSource::date);
}

struct RegExpPrototypeToSource;
impl Builtin for RegExpPrototypeToSource {
    const NAME: &'static str = "toSource";
    const LENGTH: u8 = 0;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ToSource::regexp);
}

struct ErrorPrototypeToSource;
impl Builtin for ErrorPrototypeToSource {
    const NAME: &'static str = "toSource";
    const LENGTH: u8 = 0;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ToSource::error);
}

pub(crate) struct ToSource;

impl ToSource {
    /// `uneval ( value )`
    fn uneval(agent: &mut Agent, _: Value, arguments: ArgumentsList) -> JsResult<Value> {
        uneval(agent, arguments.get(0)).map(Value::String)
    }

    /// `Object.prototype.toSource ( )`
    fn object(agent: &mut Agent, this_value: Value, _: ArgumentsList) -> JsResult<Value> {
        // 1. If this value is undefined or null, throw a TypeError exception.
        if this_value.is_nullish() {
            return Err(agent.throw_exception(
                ExceptionType::TypeError,
                "Object.prototype.toSource called on null or undefined",
            ));
        }
        // 2. Let O be ! ToObject(this value).
        let o = to_object(agent, this_value)?;
        let source = object_to_source(agent, o)?;
        Ok(Value::from_string(agent, source))
    }

    /// `Array.prototype.toSource ( )`
    fn array(agent: &mut Agent, this_value: Value, _: ArgumentsList) -> JsResult<Value> {
        // 1. If IsArray(this value) is false, throw a TypeError exception.
        let Value::Object(array) = this_value else {
            return Err(agent.throw_exception(ExceptionType::TypeError, "not an array"));
        };
        if !is_array(agent, this_value)? {
            return Err(agent.throw_exception(ExceptionType::TypeError, "not an array"));
        }
        let source = array_to_source(agent, array)?;
        Ok(Value::from_string(agent, source))
    }

    /// `Function.prototype.toSource ( )`
    ///
    /// Anonymous functions are wrapped in parentheses so that the result is
    /// an expression.
    fn function(agent: &mut Agent, this_value: Value, _: ArgumentsList) -> JsResult<Value> {
        let Some(source) = function_source_text(agent, this_value) else {
            return Err(agent.throw_exception(
                ExceptionType::TypeError,
                "Function.prototype.toSource called on incompatible receiver",
            ));
        };
        // The current name decides, so a renamed function is judged by its
        // new name.
        let name_key = PropertyKey::from_str(agent, "name");
        let name = get_v(agent, this_value, name_key)?;
        let anonymous = to_string(agent, name)?.is_empty();
        if anonymous {
            Ok(Value::from_string(agent, format!("({source})")))
        } else {
            Ok(Value::from_string(agent, source))
        }
    }

    /// `String.prototype.toSource ( )`
    fn string(agent: &mut Agent, this_value: Value, _: ArgumentsList) -> JsResult<Value> {
        let s = this_string_value(agent, this_value)?;
        let source = format!("(new String({}))", quote(agent, s));
        Ok(Value::from_string(agent, source))
    }

    /// `Number.prototype.toSource ( )`
    fn number(agent: &mut Agent, this_value: Value, _: ArgumentsList) -> JsResult<Value> {
        let n = this_number_value(agent, this_value)?;
        let source = format!("(new Number({}))", number_to_string(n));
        Ok(Value::from_string(agent, source))
    }

    /// `Boolean.prototype.toSource ( )`
    fn boolean(agent: &mut Agent, this_value: Value, _: ArgumentsList) -> JsResult<Value> {
        let b = this_boolean_value(agent, this_value)?;
        Ok(Value::from_string(agent, format!("(new Boolean({b}))")))
    }

    /// `Date.prototype.toSource ( )`
    fn date(agent: &mut Agent, this_value: Value, _: ArgumentsList) -> JsResult<Value> {
        let t = this_time_value(agent, this_value)?;
        let source = format!("(new Date({}))", number_to_string(t));
        Ok(Value::from_string(agent, source))
    }

    /// `RegExp.prototype.toSource ( )`
    fn regexp(agent: &mut Agent, this_value: Value, _: ArgumentsList) -> JsResult<Value> {
        let regexp = match this_value {
            Value::Object(o) if matches!(agent[o].kind, ObjectKind::RegExp(_)) => o,
            _ => {
                return Err(agent.throw_exception(
                    ExceptionType::TypeError,
                    "RegExp.prototype.toSource called on incompatible receiver",
                ));
            }
        };
        regexp_to_string(agent, regexp).map(Value::String)
    }

    /// `Error.prototype.toSource ( )`
    fn error(agent: &mut Agent, this_value: Value, _: ArgumentsList) -> JsResult<Value> {
        let Value::Object(error) = this_value else {
            return Err(agent.throw_exception(
                ExceptionType::TypeError,
                "Error.prototype.toSource called on non-object",
            ));
        };
        let source = with_visit(agent, error, "{}", |agent| {
            let name_key = PropertyKey::from_str(agent, "name");
            let name = get(agent, error, name_key)?;
            let name = to_string(agent, name)?.to_string_lossy(agent);
            let message_key = PropertyKey::from_str(agent, "message");
            let message = get(agent, error, message_key)?;
            let message = uneval_to_string(agent, message)?;
            Ok(format!("(new {name}({message}))"))
        })?;
        Ok(Value::from_string(agent, source))
    }

    /// Installs `uneval` on the global object and `toSource` on the builtin
    /// prototypes.
    pub(crate) fn install(agent: &mut Agent) {
        let intrinsics = agent.intrinsics();
        OrdinaryObjectBuilder::new_intrinsic_object(agent, intrinsics.global_object())
            .with_builtin_function_property::<GlobalUneval>()
            .build();
        OrdinaryObjectBuilder::new_intrinsic_object(agent, intrinsics.object_prototype())
            .with_builtin_function_property::<ObjectPrototypeToSource>()
            .build();
        OrdinaryObjectBuilder::new_intrinsic_object(agent, intrinsics.array_prototype())
            .with_builtin_function_property::<ArrayPrototypeToSource>()
            .build();
        OrdinaryObjectBuilder::new_intrinsic_object(agent, intrinsics.function_prototype())
            .with_builtin_function_property::<FunctionPrototypeToSource>()
            .build();
        OrdinaryObjectBuilder::new_intrinsic_object(agent, intrinsics.string_prototype())
            .with_builtin_function_property::<StringPrototypeToSource>()
            .build();
        OrdinaryObjectBuilder::new_intrinsic_object(agent, intrinsics.number_prototype())
            .with_builtin_function_property::<NumberPrototypeToSource>()
            .build();
        OrdinaryObjectBuilder::new_intrinsic_object(agent, intrinsics.boolean_prototype())
            .with_builtin_function_property::<BooleanPrototypeToSource>()
            .build();
        OrdinaryObjectBuilder::new_intrinsic_object(agent, intrinsics.date_prototype())
            .with_builtin_function_property::<DatePrototypeToSource>()
            .build();
        OrdinaryObjectBuilder::new_intrinsic_object(agent, intrinsics.regexp_prototype())
            .with_builtin_function_property::<RegExpPrototypeToSource>()
            .build();
        OrdinaryObjectBuilder::new_intrinsic_object(agent, intrinsics.error_prototype())
            .with_builtin_function_property::<ErrorPrototypeToSource>()
            .build();
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn accessor_tail_starts_at_the_parameter_list() {
        assert_eq!(
            accessor_tail("function foo(a) { return a; }"),
            "(a) { return a; }"
        );
        assert_eq!(accessor_tail("{ native }"), "{ native }");
    }
}
