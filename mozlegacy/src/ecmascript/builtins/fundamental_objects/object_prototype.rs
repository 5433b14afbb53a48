// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::ecmascript::{
    abstract_operations::{
        operations_on_objects::has_own_property,
        testing_and_comparison::{is_array, is_callable},
        type_conversion::{to_object, to_property_key},
    },
    builders::ordinary_object_builder::OrdinaryObjectBuilder,
    builtins::{ArgumentsList, Behaviour, Builtin, PrimitiveObjectData},
    execution::{Agent, JsResult},
    types::{ObjectKind, Value},
};

pub(crate) struct ObjectPrototype;

struct ObjectPrototypeHasOwnProperty;
impl Builtin for ObjectPrototypeHasOwnProperty {
    const NAME: &'static str = "hasOwnProperty";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ObjectPrototype::has_own_property);
}

struct ObjectPrototypeToString;
impl Builtin for ObjectPrototypeToString {
    const NAME: &'static str = "toString";
    const LENGTH: u8 = 0;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ObjectPrototype::to_string);
}

struct ObjectPrototypeValueOf;
impl Builtin for ObjectPrototypeValueOf {
    const NAME: &'static str = "valueOf";
    const LENGTH: u8 = 0;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ObjectPrototype::value_of);
}

impl ObjectPrototype {
    /// ### [20.1.3.2 Object.prototype.hasOwnProperty ( V )](https://tc39.es/ecma262/#sec-object.prototype.hasownproperty)
    fn has_own_property(
        agent: &mut Agent,
        this_value: Value,
        arguments: ArgumentsList,
    ) -> JsResult<Value> {
        // 1. Let P be ? ToPropertyKey(V).
        let p = to_property_key(agent, arguments.get(0))?;
        // 2. Let O be ? ToObject(this value).
        let o = to_object(agent, this_value)?;
        // 3. Return ? HasOwnProperty(O, P).
        has_own_property(agent, o, p).map(Value::Boolean)
    }

    /// ### [20.1.3.6 Object.prototype.toString ( )](https://tc39.es/ecma262/#sec-object.prototype.tostring)
    ///
    /// The builtin tag is reported as is; `@@toStringTag` is not consulted.
    fn to_string(agent: &mut Agent, this_value: Value, _: ArgumentsList) -> JsResult<Value> {
        let tag = match this_value {
            // 1. If the this value is undefined, return "[object Undefined]".
            Value::Undefined => "Undefined",
            // 2. If the this value is null, return "[object Null]".
            Value::Null => "Null",
            _ => {
                // 3. Let O be ! ToObject(this value).
                let o = to_object(agent, this_value)?;
                // 4. Let isArray be ? IsArray(O).
                // 5. If isArray is true, let builtinTag be "Array".
                if is_array(agent, o.into_value())? {
                    "Array"
                } else if is_callable(agent, o.into_value()).is_some() {
                    "Function"
                } else {
                    match &agent[o].kind {
                        ObjectKind::Error(_) => "Error",
                        ObjectKind::Primitive(PrimitiveObjectData::Boolean(_)) => "Boolean",
                        ObjectKind::Primitive(PrimitiveObjectData::Number(_)) => "Number",
                        ObjectKind::Primitive(PrimitiveObjectData::String(_)) => "String",
                        ObjectKind::Primitive(PrimitiveObjectData::Symbol(_)) => "Symbol",
                        ObjectKind::Date(_) => "Date",
                        ObjectKind::RegExp(_) => "RegExp",
                        ObjectKind::Map(_) => "Map",
                        ObjectKind::Set(_) => "Set",
                        _ => "Object",
                    }
                }
            }
        };
        // 17. Return the string-concatenation of "[object ", tag, and "]".
        Ok(Value::from_string(agent, format!("[object {tag}]")))
    }

    /// ### [20.1.3.7 Object.prototype.valueOf ( )](https://tc39.es/ecma262/#sec-object.prototype.valueof)
    fn value_of(agent: &mut Agent, this_value: Value, _: ArgumentsList) -> JsResult<Value> {
        // 1. Return ? ToObject(this value).
        to_object(agent, this_value).map(Value::Object)
    }

    pub(crate) fn create_intrinsic(agent: &mut Agent) {
        let this = agent.intrinsics().object_prototype();
        OrdinaryObjectBuilder::new_intrinsic_object(agent, this)
            .with_property_capacity(3)
            .with_builtin_function_property::<ObjectPrototypeHasOwnProperty>()
            .with_builtin_function_property::<ObjectPrototypeToString>()
            .with_builtin_function_property::<ObjectPrototypeValueOf>()
            .build();
    }
}
