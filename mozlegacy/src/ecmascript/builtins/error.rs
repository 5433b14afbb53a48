// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::ecmascript::{
    abstract_operations::{operations_on_objects::get, type_conversion::to_string},
    builders::ordinary_object_builder::OrdinaryObjectBuilder,
    builtins::{ArgumentsList, Behaviour, Builtin},
    execution::{Agent, ExceptionType, JsResult, create_error_object},
    types::{Object, PropertyKey, String, Value},
};

/// The \[\[ErrorData]] slot.
#[derive(Debug, Clone, Copy)]
pub struct ErrorHeapData {
    pub(crate) kind: ExceptionType,
}

impl ErrorHeapData {
    pub(crate) fn new(kind: ExceptionType) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> ExceptionType {
        self.kind
    }
}

/// Creates an error object of the given kind with an own `message`.
pub fn create_error(agent: &mut Agent, kind: ExceptionType, message: &str) -> Object {
    let message = String::from_str(agent, message);
    create_error_object(agent, kind, Some(message))
}

pub(crate) struct ErrorPrototype;

struct ErrorPrototypeToString;
impl Builtin for ErrorPrototypeToString {
    const NAME: &'static str = "toString";
    const LENGTH: u8 = 0;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ErrorPrototype::to_string);
}

impl ErrorPrototype {
    /// ### [20.5.3.4 Error.prototype.toString ( )](https://tc39.es/ecma262/#sec-error.prototype.tostring)
    fn to_string(agent: &mut Agent, this_value: Value, _: ArgumentsList) -> JsResult<Value> {
        // 1. Let O be the this value.
        // 2. If O is not an Object, throw a TypeError exception.
        let Ok(o) = Object::try_from(this_value) else {
            return Err(agent.throw_exception(
                ExceptionType::TypeError,
                "'this' is not an object",
            ));
        };
        // 3. Let name be ? Get(O, "name").
        let name_key = PropertyKey::from_str(agent, "name");
        let name = get(agent, o, name_key)?;
        // 4. If name is undefined, set name to "Error"; otherwise set name to ? ToString(name).
        let name = if name.is_undefined() {
            String::from_str(agent, "Error")
        } else {
            to_string(agent, name)?
        };
        // 5. Let msg be ? Get(O, "message").
        let message_key = PropertyKey::from_str(agent, "message");
        let msg = get(agent, o, message_key)?;
        // 6. If msg is undefined, set msg to the empty String; otherwise set msg to ? ToString(msg).
        let msg = if msg.is_undefined() {
            String::EMPTY_STRING
        } else {
            to_string(agent, msg)?
        };
        // 7. If name is the empty String, return msg.
        if name.is_empty() {
            return Ok(Value::String(msg));
        }
        // 8. If msg is the empty String, return name.
        if msg.is_empty() {
            return Ok(Value::String(name));
        }
        // 9. Return the string-concatenation of name, the code unit 0x003A (COLON), the code
        //    unit 0x0020 (SPACE), and msg.
        let separator = String::from_str(agent, ": ");
        Ok(Value::String(String::concat(agent, &[name, separator, msg])))
    }

    pub(crate) fn create_intrinsic(agent: &mut Agent) {
        let intrinsics = agent.intrinsics();
        let name_key = PropertyKey::from_str(agent, "name");
        let message_key = PropertyKey::from_str(agent, "message");
        let kinds = [
            ExceptionType::Error,
            ExceptionType::EvalError,
            ExceptionType::RangeError,
            ExceptionType::ReferenceError,
            ExceptionType::SyntaxError,
            ExceptionType::TypeError,
            ExceptionType::UriError,
        ];
        for kind in kinds {
            let this = intrinsics.error_prototype_for(kind);
            let name = Value::from_str(agent, kind.name());
            let builder = OrdinaryObjectBuilder::new_intrinsic_object(agent, this)
                .with_property_capacity(3)
                .with_data_property(name_key, name)
                .with_data_property(message_key, Value::String(String::EMPTY_STRING));
            if kind == ExceptionType::Error {
                builder
                    .with_builtin_function_property::<ErrorPrototypeToString>()
                    .build();
            } else {
                builder.build();
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ecmascript::{abstract_operations::operations_on_objects::invoke, execution::Options};

    #[test]
    fn error_to_string_joins_name_and_message() {
        let mut agent = Agent::new(Options::default());
        let error = create_error(&mut agent, ExceptionType::RangeError, "out of range");
        let key = PropertyKey::from_str(&mut agent, "toString");
        let result = invoke(&mut agent, error.into_value(), key, None).unwrap();
        assert_eq!(
            result.to_display_string(&mut agent).unwrap(),
            "RangeError: out of range"
        );
    }
}
