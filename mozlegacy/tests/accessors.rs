// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

#![cfg(feature = "accessor-methods")]

use mozlegacy::{
    Agent, JsResult, Options,
    ecmascript::{
        abstract_operations::operations_on_objects::{call, get, invoke},
        builtins::{
            ArgumentsList, Behaviour, BuiltinFunctionArgs, create_builtin_function,
            ordinary::ordinary_object_create,
        },
        types::{InternalMethods, Object, PropertyKey, Value},
    },
};

fn answer(_: &mut Agent, _: Value, _: ArgumentsList) -> JsResult<Value> {
    Ok(42.into())
}

fn accessor_function(agent: &mut Agent) -> Object {
    create_builtin_function(
        agent,
        Behaviour::Regular(answer),
        BuiltinFunctionArgs::new(0, "answer"),
    )
}

fn plain(agent: &mut Agent, prototype: Option<Object>) -> Object {
    let prototype = prototype.unwrap_or_else(|| agent.intrinsics().object_prototype());
    ordinary_object_create(agent, Some(prototype))
}

fn invoke_with(
    agent: &mut Agent,
    this: Value,
    method: &str,
    arguments: &[Value],
) -> JsResult<Value> {
    let key = PropertyKey::from_str(agent, method);
    invoke(agent, this, key, Some(ArgumentsList(arguments)))
}

#[test]
fn define_getter_creates_an_enumerable_configurable_accessor() {
    let mut agent = Agent::new(Options::default());
    let o = plain(&mut agent, None);
    let getter = accessor_function(&mut agent);
    let name = Value::from_str(&mut agent, "x");
    invoke_with(
        &mut agent,
        o.into_value(),
        "__defineGetter__",
        &[name, getter.into_value()],
    )
    .unwrap();

    let x = PropertyKey::from_str(&mut agent, "x");
    assert_eq!(get(&mut agent, o, x).unwrap(), Value::from(42));
    let desc = o.internal_get_own_property(&mut agent, x).unwrap().unwrap();
    assert_eq!(desc.get, Some(Some(getter)));
    assert_eq!(desc.enumerable, Some(true));
    assert_eq!(desc.configurable, Some(true));
}

#[test]
fn define_setter_keeps_an_existing_getter() {
    let mut agent = Agent::new(Options::default());
    let o = plain(&mut agent, None);
    let getter = accessor_function(&mut agent);
    let setter = accessor_function(&mut agent);
    let name = Value::from_str(&mut agent, "x");
    invoke_with(
        &mut agent,
        o.into_value(),
        "__defineGetter__",
        &[name, getter.into_value()],
    )
    .unwrap();
    invoke_with(
        &mut agent,
        o.into_value(),
        "__defineSetter__",
        &[name, setter.into_value()],
    )
    .unwrap();
    let x = PropertyKey::from_str(&mut agent, "x");
    let desc = o.internal_get_own_property(&mut agent, x).unwrap().unwrap();
    assert_eq!(desc.get, Some(Some(getter)));
    assert_eq!(desc.set, Some(Some(setter)));
}

#[test]
fn non_callable_accessors_are_rejected() {
    let mut agent = Agent::new(Options::default());
    let o = plain(&mut agent, None);
    let name = Value::from_str(&mut agent, "x");
    let error = invoke_with(
        &mut agent,
        o.into_value(),
        "__defineGetter__",
        &[name, 1.into()],
    )
    .unwrap_err();
    assert!(error.to_string(&mut agent).starts_with("TypeError"));
}

#[test]
fn nullish_this_defines_on_the_global_object() {
    let mut agent = Agent::new(Options::default());
    let object_prototype = agent.intrinsics().object_prototype();
    let key = PropertyKey::from_str(&mut agent, "__defineGetter__");
    let define_getter = get(&mut agent, object_prototype, key).unwrap();
    let getter = accessor_function(&mut agent);
    let name = Value::from_str(&mut agent, "globalAnswer");
    call(
        &mut agent,
        define_getter,
        Value::Undefined,
        Some(ArgumentsList(&[name, getter.into_value()])),
    )
    .unwrap();
    let global = agent.global_object();
    let answer_key = PropertyKey::from_str(&mut agent, "globalAnswer");
    assert_eq!(get(&mut agent, global, answer_key).unwrap(), Value::from(42));
}

#[test]
fn lookup_walks_the_prototype_chain() {
    let mut agent = Agent::new(Options::default());
    let parent = plain(&mut agent, None);
    let child = plain(&mut agent, Some(parent));
    let getter = accessor_function(&mut agent);
    let name = Value::from_str(&mut agent, "x");
    invoke_with(
        &mut agent,
        parent.into_value(),
        "__defineGetter__",
        &[name, getter.into_value()],
    )
    .unwrap();

    let found = invoke_with(&mut agent, child.into_value(), "__lookupGetter__", &[name]).unwrap();
    assert_eq!(found, getter.into_value());
    let found = invoke_with(&mut agent, child.into_value(), "__lookupSetter__", &[name]).unwrap();
    assert_eq!(found, Value::Undefined);
    let other = Value::from_str(&mut agent, "y");
    let found = invoke_with(&mut agent, child.into_value(), "__lookupGetter__", &[other]).unwrap();
    assert_eq!(found, Value::Undefined);
}

#[test]
fn lookup_on_primitives_uses_their_wrapper_prototype() {
    let mut agent = Agent::new(Options::default());
    let getter = accessor_function(&mut agent);
    let string_prototype = agent.intrinsics().string_prototype();
    let name = Value::from_str(&mut agent, "shout");
    invoke_with(
        &mut agent,
        string_prototype.into_value(),
        "__defineGetter__",
        &[name, getter.into_value()],
    )
    .unwrap();
    let s = Value::from_str(&mut agent, "abc");
    let found = invoke_with(&mut agent, s, "__lookupGetter__", &[name]).unwrap();
    assert_eq!(found, getter.into_value());
}
