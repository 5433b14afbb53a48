// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::ecmascript::{
    abstract_operations::testing_and_comparison::is_callable,
    builders::ordinary_object_builder::OrdinaryObjectBuilder,
    builtins::{ArgumentsList, Behaviour, Builtin, builtin_function::native_function_source},
    execution::{Agent, ExceptionType, JsResult},
    types::{ObjectKind, Value},
};

pub(crate) struct FunctionPrototype;

struct FunctionPrototypeToString;
impl Builtin for FunctionPrototypeToString {
    const NAME: &'static str = "toString";
    const LENGTH: u8 = 0;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(FunctionPrototype::to_string);
}

/// Returns the source text of a function object, or `None` if `value` is
/// not callable.
///
/// Builtins without recorded source text and callable proxies report
/// native code.
pub(crate) fn function_source_text(agent: &Agent, value: Value) -> Option<std::string::String> {
    let Value::Object(func) = value else {
        return None;
    };
    match &agent[func].kind {
        ObjectKind::BuiltinFunction(data) => Some(match data.source_text() {
            Some(source_text) => source_text.to_string_lossy(agent),
            None => native_function_source(&data.initial_name().to_string_lossy(agent)),
        }),
        ObjectKind::Proxy(_) => {
            is_callable(agent, value).map(|_| native_function_source(""))
        }
        _ => None,
    }
}

impl FunctionPrototype {
    /// ### [20.2.3.5 Function.prototype.toString ( )](https://tc39.es/ecma262/#sec-function.prototype.tostring)
    fn to_string(agent: &mut Agent, this_value: Value, _: ArgumentsList) -> JsResult<Value> {
        // 1. Let func be the this value.
        // 2. If func is an Object, func has a [[SourceText]] internal slot, func.[[SourceText]]
        //    is a sequence of Unicode code points, and HostHasSourceTextAvailable(func) is
        //    true, then
        // a. Return CodePointsToString(func.[[SourceText]]).
        // 3. If func is a built-in function object, return an implementation-defined String
        //    source code representation of func.
        // 4. If func is an Object and IsCallable(func) is true, return an
        //    implementation-defined String source code representation of func.
        match function_source_text(agent, this_value) {
            Some(source) => Ok(Value::from_string(agent, source)),
            // 5. Throw a TypeError exception.
            None => Err(agent.throw_exception(
                ExceptionType::TypeError,
                "Function.prototype.toString called on incompatible receiver",
            )),
        }
    }

    pub(crate) fn create_intrinsic(agent: &mut Agent) {
        let this = agent.intrinsics().function_prototype();
        OrdinaryObjectBuilder::new_intrinsic_object(agent, this)
            .with_property_capacity(1)
            .with_builtin_function_property::<FunctionPrototypeToString>()
            .build();
    }
}
