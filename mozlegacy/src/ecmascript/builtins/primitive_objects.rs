// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Boolean, Number, String and Symbol wrapper objects and the prototypes of
//! the first three. The Symbol prototype lives with the fundamental objects.

use crate::ecmascript::{
    abstract_operations::type_conversion::number_to_string,
    builders::ordinary_object_builder::OrdinaryObjectBuilder,
    builtins::{ArgumentsList, Behaviour, Builtin, ordinary::ordinary_object_create_with_intrinsics},
    execution::{Agent, ExceptionType, JsResult, ProtoIntrinsics},
    types::{Object, ObjectKind, String, Symbol, Value},
};

/// The \[\[BooleanData]], \[\[NumberData]], \[\[StringData]] or
/// \[\[SymbolData]] slot of a wrapper object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PrimitiveObjectData {
    Boolean(bool),
    Number(f64),
    String(String),
    Symbol(Symbol),
}

impl From<PrimitiveObjectData> for Value {
    fn from(value: PrimitiveObjectData) -> Self {
        match value {
            PrimitiveObjectData::Boolean(b) => Value::Boolean(b),
            PrimitiveObjectData::Number(n) => Value::Number(n),
            PrimitiveObjectData::String(s) => Value::String(s),
            PrimitiveObjectData::Symbol(s) => Value::Symbol(s),
        }
    }
}

/// Wraps a primitive in a new object whose prototype is the matching
/// intrinsic prototype.
pub fn create_primitive_object(agent: &mut Agent, data: PrimitiveObjectData) -> Object {
    let proto = match data {
        PrimitiveObjectData::Boolean(_) => ProtoIntrinsics::Boolean,
        PrimitiveObjectData::Number(_) => ProtoIntrinsics::Number,
        PrimitiveObjectData::String(_) => ProtoIntrinsics::String,
        PrimitiveObjectData::Symbol(_) => ProtoIntrinsics::Symbol,
    };
    ordinary_object_create_with_intrinsics(agent, proto, ObjectKind::Primitive(data))
}

pub(crate) fn primitive_data(agent: &Agent, value: Value) -> Option<PrimitiveObjectData> {
    match value {
        Value::Object(o) => match agent[o].kind {
            ObjectKind::Primitive(data) => Some(data),
            _ => None,
        },
        _ => None,
    }
}

/// ### [22.1.3.35.1 ThisStringValue ( value )](https://tc39.es/ecma262/#sec-thisstringvalue)
pub(crate) fn this_string_value(agent: &mut Agent, value: Value) -> JsResult<String> {
    match value {
        // 1. If value is a String, return value.
        Value::String(s) => Ok(s),
        // 2. If value is an Object and value has a [[StringData]] internal slot, then
        _ => match primitive_data(agent, value) {
            // b. Return s.
            Some(PrimitiveObjectData::String(s)) => Ok(s),
            // 3. Throw a TypeError exception.
            _ => Err(agent.throw_exception(ExceptionType::TypeError, "Not a String")),
        },
    }
}

/// ### [21.1.3.7.1 ThisNumberValue ( value )](https://tc39.es/ecma262/#sec-thisnumbervalue)
pub(crate) fn this_number_value(agent: &mut Agent, value: Value) -> JsResult<f64> {
    match value {
        Value::Number(n) => Ok(n),
        _ => match primitive_data(agent, value) {
            Some(PrimitiveObjectData::Number(n)) => Ok(n),
            _ => Err(agent.throw_exception(ExceptionType::TypeError, "Not a Number")),
        },
    }
}

/// ### [20.3.3.3.1 ThisBooleanValue ( value )](https://tc39.es/ecma262/#sec-thisbooleanvalue)
pub(crate) fn this_boolean_value(agent: &mut Agent, value: Value) -> JsResult<bool> {
    match value {
        Value::Boolean(b) => Ok(b),
        _ => match primitive_data(agent, value) {
            Some(PrimitiveObjectData::Boolean(b)) => Ok(b),
            _ => Err(agent.throw_exception(ExceptionType::TypeError, "Not a Boolean")),
        },
    }
}

pub(crate) fn this_symbol_value(agent: &mut Agent, value: Value) -> JsResult<Symbol> {
    match value {
        Value::Symbol(s) => Ok(s),
        _ => match primitive_data(agent, value) {
            Some(PrimitiveObjectData::Symbol(s)) => Ok(s),
            _ => Err(agent.throw_exception(ExceptionType::TypeError, "this is not a symbol")),
        },
    }
}

pub(crate) struct BooleanPrototype;

struct BooleanPrototypeToString;
impl Builtin for BooleanPrototypeToString {
    const NAME: &'static str = "toString";
    const LENGTH: u8 = 0;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(BooleanPrototype::to_string);
}

struct BooleanPrototypeValueOf;
impl Builtin for BooleanPrototypeValueOf {
    const NAME: &'static str = "valueOf";
    const LENGTH: u8 = 0;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(BooleanPrototype::value_of);
}

impl BooleanPrototype {
    /// ### [20.3.3.2 Boolean.prototype.toString ( )](https://tc39.es/ecma262/#sec-boolean.prototype.tostring)
    fn to_string(agent: &mut Agent, this_value: Value, _: ArgumentsList) -> JsResult<Value> {
        // 1. Let b be ? ThisBooleanValue(this value).
        let b = this_boolean_value(agent, this_value)?;
        // 2. If b is true, return "true"; else return "false".
        Ok(Value::from_str(agent, if b { "true" } else { "false" }))
    }

    /// ### [20.3.3.3 Boolean.prototype.valueOf ( )](https://tc39.es/ecma262/#sec-boolean.prototype.valueof)
    fn value_of(agent: &mut Agent, this_value: Value, _: ArgumentsList) -> JsResult<Value> {
        // 1. Return ? ThisBooleanValue(this value).
        this_boolean_value(agent, this_value).map(Value::Boolean)
    }

    pub(crate) fn create_intrinsic(agent: &mut Agent) {
        let this = agent.intrinsics().boolean_prototype();
        OrdinaryObjectBuilder::new_intrinsic_object(agent, this)
            .with_property_capacity(2)
            .with_builtin_function_property::<BooleanPrototypeToString>()
            .with_builtin_function_property::<BooleanPrototypeValueOf>()
            .build();
        agent[this].kind = ObjectKind::Primitive(PrimitiveObjectData::Boolean(false));
    }
}

pub(crate) struct NumberPrototype;

struct NumberPrototypeToString;
impl Builtin for NumberPrototypeToString {
    const NAME: &'static str = "toString";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(NumberPrototype::to_string);
}

struct NumberPrototypeValueOf;
impl Builtin for NumberPrototypeValueOf {
    const NAME: &'static str = "valueOf";
    const LENGTH: u8 = 0;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(NumberPrototype::value_of);
}

impl NumberPrototype {
    /// ### [21.1.3.6 Number.prototype.toString ( \[ radix \] )](https://tc39.es/ecma262/#sec-number.prototype.tostring)
    ///
    /// Radix 10 only.
    fn to_string(agent: &mut Agent, this_value: Value, _: ArgumentsList) -> JsResult<Value> {
        // 1. Let x be ? ThisNumberValue(this value).
        let x = this_number_value(agent, this_value)?;
        // 6. Return Number::toString(x, radixMV).
        Ok(Value::from_string(agent, number_to_string(x)))
    }

    /// ### [21.1.3.7 Number.prototype.valueOf ( )](https://tc39.es/ecma262/#sec-number.prototype.valueof)
    fn value_of(agent: &mut Agent, this_value: Value, _: ArgumentsList) -> JsResult<Value> {
        // 1. Return ? ThisNumberValue(this value).
        this_number_value(agent, this_value).map(Value::Number)
    }

    pub(crate) fn create_intrinsic(agent: &mut Agent) {
        let this = agent.intrinsics().number_prototype();
        OrdinaryObjectBuilder::new_intrinsic_object(agent, this)
            .with_property_capacity(2)
            .with_builtin_function_property::<NumberPrototypeToString>()
            .with_builtin_function_property::<NumberPrototypeValueOf>()
            .build();
        agent[this].kind = ObjectKind::Primitive(PrimitiveObjectData::Number(0.0));
    }
}

pub(crate) struct StringPrototype;

struct StringPrototypeToString;
impl Builtin for StringPrototypeToString {
    const NAME: &'static str = "toString";
    const LENGTH: u8 = 0;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(StringPrototype::to_string);
}

struct StringPrototypeValueOf;
impl Builtin for StringPrototypeValueOf {
    const NAME: &'static str = "valueOf";
    const LENGTH: u8 = 0;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(StringPrototype::value_of);
}

impl StringPrototype {
    /// ### [22.1.3.29 String.prototype.toString ( )](https://tc39.es/ecma262/#sec-string.prototype.tostring)
    fn to_string(agent: &mut Agent, this_value: Value, _: ArgumentsList) -> JsResult<Value> {
        // 1. Return ? ThisStringValue(this value).
        this_string_value(agent, this_value).map(Value::String)
    }

    /// ### [22.1.3.35 String.prototype.valueOf ( )](https://tc39.es/ecma262/#sec-string.prototype.valueof)
    fn value_of(agent: &mut Agent, this_value: Value, _: ArgumentsList) -> JsResult<Value> {
        // 1. Return ? ThisStringValue(this value).
        this_string_value(agent, this_value).map(Value::String)
    }

    pub(crate) fn create_intrinsic(agent: &mut Agent) {
        let this = agent.intrinsics().string_prototype();
        OrdinaryObjectBuilder::new_intrinsic_object(agent, this)
            .with_property_capacity(2)
            .with_builtin_function_property::<StringPrototypeToString>()
            .with_builtin_function_property::<StringPrototypeValueOf>()
            .build();
        agent[this].kind = ObjectKind::Primitive(PrimitiveObjectData::String(String::EMPTY_STRING));
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ecmascript::{abstract_operations::type_conversion::to_object, execution::Options};

    #[test]
    fn wrappers_unwrap_to_their_primitive() {
        let mut agent = Agent::new(Options::default());
        let s = Value::from_str(&mut agent, "abc");
        let wrapper = to_object(&mut agent, s).unwrap();
        assert_eq!(
            this_string_value(&mut agent, wrapper.into_value()).unwrap(),
            String::from_str(&mut agent, "abc")
        );
        assert!(this_number_value(&mut agent, wrapper.into_value()).is_err());
    }

    #[test]
    fn prototypes_are_wrappers_themselves() {
        let agent = Agent::new(Options::default());
        let proto = agent.intrinsics().number_prototype().into_value();
        assert_eq!(
            primitive_data(&agent, proto),
            Some(PrimitiveObjectData::Number(0.0))
        );
    }
}
