// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::{fmt, ops::Deref, rc::Rc};

use crate::{
    ecmascript::{
        execution::{Agent, ExceptionType, JsResult},
        types::{Object, ObjectHeapData, ObjectKind, PropertyKey, StoredProperty, String, Value},
    },
    heap::CreateHeapData,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct ArgumentsList<'a>(pub &'a [Value]);

impl<'a> Deref for ArgumentsList<'a> {
    type Target = &'a [Value];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl ArgumentsList<'_> {
    #[inline]
    pub fn get(&self, index: usize) -> Value {
        *self.0.get(index).unwrap_or(&Value::Undefined)
    }
}

pub type RegularFn = fn(&mut Agent, Value, ArgumentsList<'_>) -> JsResult<Value>;
pub type ConstructorFn =
    fn(&mut Agent, Value, ArgumentsList<'_>, Option<Object>) -> JsResult<Value>;
/// A host closure. Closures capture their environment, so they cannot be
/// plain function pointers.
pub type ClosureFn = Rc<dyn Fn(&mut Agent, Value, ArgumentsList<'_>) -> JsResult<Value>>;

#[derive(Clone)]
pub enum Behaviour {
    Regular(RegularFn),
    Constructor(ConstructorFn),
    Closure(ClosureFn),
}

impl Behaviour {
    pub(crate) fn is_constructor(&self) -> bool {
        matches!(self, Behaviour::Constructor(_))
    }
}

impl fmt::Debug for Behaviour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Behaviour::Regular(func) => f.debug_tuple("Regular").field(func).finish(),
            Behaviour::Constructor(func) => f.debug_tuple("Constructor").field(func).finish(),
            Behaviour::Closure(_) => f.write_str("Closure"),
        }
    }
}

pub trait Builtin {
    const NAME: &'static str;
    const LENGTH: u8;
    const BEHAVIOUR: Behaviour;

    /// Set to Some if this builtin's property key is different from `NAME`.
    const KEY: Option<PropertyKey> = None;

    /// If the builtin function is created as a property then this controls the
    /// property's `[[Writable]]` value.
    const WRITABLE: bool = true;
    /// If the builtin function is created as a property then this controls the
    /// property's `[[Enumerable]]` value.
    const ENUMERABLE: bool = false;
    /// If the builtin function is created as a property then this controls the
    /// property's `[[Configurable]]` value.
    const CONFIGURABLE: bool = true;
}

/// A builtin installed as the getter of an accessor property. `KEY` must be
/// set.
pub trait BuiltinGetter: Builtin {}

#[derive(Debug, Default)]
pub struct BuiltinFunctionArgs<'a> {
    pub length: u32,
    pub name: &'a str,
    pub prototype: Option<Object>,
    pub prefix: Option<&'static str>,
    /// Text returned by `Function.prototype.toString`. Builtins without it
    /// print as native code.
    pub source_text: Option<&'a str>,
}

impl<'a> BuiltinFunctionArgs<'a> {
    pub fn new(length: u32, name: &'a str) -> Self {
        Self {
            length,
            name,
            ..Default::default()
        }
    }

    pub fn with_source_text(self, source_text: &'a str) -> Self {
        Self {
            source_text: Some(source_text),
            ..self
        }
    }
}

#[derive(Debug, Clone)]
pub struct BuiltinFunctionHeapData {
    pub(crate) behaviour: Behaviour,
    pub(crate) initial_name: String,
    pub(crate) source_text: Option<String>,
}

impl BuiltinFunctionHeapData {
    pub fn is_constructor(&self) -> bool {
        // A builtin function has the [[Construct]] method if its behaviour is
        // a constructor behaviour.
        self.behaviour.is_constructor()
    }

    pub fn initial_name(&self) -> String {
        self.initial_name
    }

    pub fn source_text(&self) -> Option<String> {
        self.source_text
    }
}

fn function_data(agent: &Agent, f: Object) -> Option<&BuiltinFunctionHeapData> {
    match &agent[f].kind {
        ObjectKind::BuiltinFunction(data) => Some(data),
        _ => None,
    }
}

/// ### [10.3.1 \[\[Call\]\] ( thisArgument, argumentsList )](https://tc39.es/ecma262/#sec-built-in-function-objects-call-thisargument-argumentslist)
pub(crate) fn builtin_call(
    agent: &mut Agent,
    f: Object,
    this_argument: Value,
    arguments_list: ArgumentsList,
) -> JsResult<Value> {
    // 1. Return ? BuiltinCallOrConstruct(F, thisArgument, argumentsList, undefined).
    builtin_call_or_construct(agent, f, Some(this_argument), arguments_list, None)
}

/// ### [10.3.2 \[\[Construct\]\] ( argumentsList, newTarget )](https://tc39.es/ecma262/#sec-built-in-function-objects-construct-argumentslist-newtarget)
pub(crate) fn builtin_construct(
    agent: &mut Agent,
    f: Object,
    arguments_list: ArgumentsList,
    new_target: Object,
) -> JsResult<Object> {
    // 1. Return ? BuiltinCallOrConstruct(F, uninitialized, argumentsList, newTarget).
    let result = builtin_call_or_construct(agent, f, None, arguments_list, Some(new_target))?;
    Object::try_from(result).map_err(|_| {
        agent.throw_exception(ExceptionType::TypeError, "Constructor did not return an object")
    })
}

/// ### [10.3.3 BuiltinCallOrConstruct ( F, thisArgument, argumentsList, newTarget )](https://tc39.es/ecma262/#sec-builtincallorconstruct)
fn builtin_call_or_construct(
    agent: &mut Agent,
    f: Object,
    this_argument: Option<Value>,
    arguments_list: ArgumentsList,
    new_target: Option<Object>,
) -> JsResult<Value> {
    let Some(heap_data) = function_data(agent, f) else {
        return Err(agent.throw_exception(ExceptionType::TypeError, "Not a function"));
    };
    // 10. Let result be the Completion Record that is the result of evaluating F in a manner that
    //     conforms to the specification of F. If thisArgument is uninitialized, the this value is
    //     uninitialized; otherwise, thisArgument provides the this value. argumentsList provides
    //     the named parameters. newTarget provides the NewTarget value.
    let behaviour = heap_data.behaviour.clone();
    let this_argument = this_argument.unwrap_or(Value::Undefined);
    match behaviour {
        Behaviour::Constructor(func) => func(agent, this_argument, arguments_list, new_target),
        _ if new_target.is_some() => {
            Err(agent.throw_exception(ExceptionType::TypeError, "Not a constructor"))
        }
        Behaviour::Regular(func) => func(agent, this_argument, arguments_list),
        Behaviour::Closure(func) => func(agent, this_argument, arguments_list),
    }
}

/// ### [10.3.4 CreateBuiltinFunction ( behaviour, length, name, additionalInternalSlotsList \[ , realm \[ , prototype \[ , prefix \] \] \] )](https://tc39.es/ecma262/#sec-createbuiltinfunction)
///
/// The abstract operation CreateBuiltinFunction takes arguments behaviour (an
/// Abstract Closure, a set of algorithm steps, or some other definition of a
/// function's behaviour provided in this specification), length (a
/// non-negative integer or +∞), name (a property key or a Private Name), and
/// additionalInternalSlotsList (a List of names of internal slots) and
/// optional arguments realm (a Realm Record), prototype (an Object or null),
/// and prefix (a String) and returns a function object.
pub fn create_builtin_function(
    agent: &mut Agent,
    behaviour: Behaviour,
    args: BuiltinFunctionArgs,
) -> Object {
    // 2. If prototype is not present, set prototype to realm.[[Intrinsics]].[[%Function.prototype%]].
    let prototype = args
        .prototype
        .unwrap_or_else(|| agent.intrinsics().function_prototype());

    // 9. Set func.[[InitialName]] to null.
    // Note: SetFunctionName inlined here: We know name is a string
    let initial_name = if let Some(prefix) = args.prefix {
        // 12. Else,
        // a. Perform SetFunctionName(func, name, prefix).
        String::from_string(agent, format!("{} {}", prefix, args.name))
    } else {
        // 11. If prefix is not present, then
        // a. Perform SetFunctionName(func, name).
        String::from_str(agent, args.name)
    };
    let source_text = args
        .source_text
        .map(|source_text| String::from_str(agent, source_text));

    // 5. Let func be a new built-in function object that, when called, performs the action
    //    described by behaviour using the provided arguments as the values of the corresponding
    //    parameters specified by behaviour. The new function object has internal slots whose names
    //    are the elements of internalSlotsList, and an [[InitialName]] internal slot.
    // 6. Set func.[[Prototype]] to prototype.
    // 7. Set func.[[Extensible]] to true.
    let func = agent.heap.create(ObjectHeapData::new(
        Some(prototype),
        ObjectKind::BuiltinFunction(BuiltinFunctionHeapData {
            behaviour,
            initial_name,
            source_text,
        }),
    ));

    // 10. Perform SetFunctionLength(func, length).
    let length_key = PropertyKey::from_str(agent, "length");
    agent[func].properties.insert(
        length_key,
        StoredProperty::data(args.length.into(), false, false, true),
    );
    let name_key = PropertyKey::from_str(agent, "name");
    agent[func].properties.insert(
        name_key,
        StoredProperty::data(initial_name.into(), false, false, true),
    );

    // 13. Return func.
    func
}

/// Returns the text `Function.prototype.toString` reports for a builtin
/// function without recorded source text.
pub(crate) fn native_function_source(name: &str) -> std::string::String {
    format!("function {name}() {{\n    [native code]\n}}")
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn native_source_format() {
        assert_eq!(
            native_function_source("push"),
            "function push() {\n    [native code]\n}"
        );
        assert_eq!(
            native_function_source(""),
            "function () {\n    [native code]\n}"
        );
    }

    #[test]
    fn missing_arguments_are_undefined() {
        let values = [Value::Null];
        let args = ArgumentsList(&values);
        assert_eq!(args.get(0), Value::Null);
        assert_eq!(args.get(3), Value::Undefined);
        assert_eq!(args.len(), 1);
    }
}
