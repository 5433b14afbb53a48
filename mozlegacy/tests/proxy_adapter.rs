// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::{cell::RefCell, rc::Rc};

use tracing_subscriber::EnvFilter;

use mozlegacy::{
    Agent, JsResult, Options,
    ecmascript::{
        abstract_operations::{
            operations_on_iterator_objects::iterator_to_list,
            operations_on_objects::{
                call, construct, create_array_from_list, create_data_property_or_throw,
                define_property_or_throw, delete_property_or_throw, enumerate_object_properties,
                get, has_own_property, has_property, invoke, set,
            },
            type_conversion::{to_property_key, to_string},
        },
        builtins::{
            ArgumentsList, Behaviour, BuiltinFunctionArgs, create_builtin_function,
            ordinary::ordinary_object_create,
        },
        execution::ExceptionType,
        types::{InternalMethods, Object, PropertyDescriptor, PropertyKey, Value},
    },
    create_shim_iterator, proxy_create, proxy_create_function, uneval,
};

/// Creates an agent, logging derived traps when `RUST_LOG=mozlegacy=trace`.
fn new_agent() -> Agent {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
    Agent::new(Options::default())
}

fn object(agent: &mut Agent, properties: &[(&str, Value)]) -> Object {
    let prototype = agent.intrinsics().object_prototype();
    let o = ordinary_object_create(agent, Some(prototype));
    for (name, value) in properties {
        let key = PropertyKey::from_str(agent, name);
        create_data_property_or_throw(agent, o, key, *value).unwrap();
    }
    o
}

fn function(
    agent: &mut Agent,
    f: impl Fn(&mut Agent, Value, ArgumentsList) -> JsResult<Value> + 'static,
) -> Value {
    create_builtin_function(
        agent,
        Behaviour::Closure(Rc::new(f)),
        BuiltinFunctionArgs::new(0, ""),
    )
    .into_value()
}

fn key(agent: &mut Agent, name: &str) -> PropertyKey {
    PropertyKey::from_str(agent, name)
}

fn display(agent: &mut Agent, value: Value) -> String {
    value.to_display_string(agent).unwrap()
}

fn is_type_error(agent: &mut Agent, result: JsResult<impl Sized>) -> bool {
    match result {
        Ok(_) => false,
        Err(error) => error.to_string(agent).starts_with("TypeError"),
    }
}

/// A handler operation answering `values` as a list of strings.
fn names(agent: &mut Agent, values: &'static [&'static str]) -> Value {
    function(agent, move |agent, _, _| {
        let values: Vec<Value> = values.iter().map(|v| Value::from_str(agent, v)).collect();
        Ok(create_array_from_list(agent, &values).into_value())
    })
}

/// A descriptor operation answering an enumerable data descriptor for
/// `name` and undefined for every other key.
fn descriptor_for(agent: &mut Agent, name: &'static str) -> Value {
    function(agent, move |agent, _, arguments| {
        if display(agent, arguments.get(0)) != name {
            return Ok(Value::Undefined);
        }
        let desc = PropertyDescriptor {
            value: Some(1.into()),
            enumerable: Some(true),
            configurable: Some(true),
            ..Default::default()
        };
        Ok(PropertyDescriptor::from_property_descriptor(agent, Some(desc)))
    })
}

fn own_keys(agent: &mut Agent, proxy: Object) -> Vec<String> {
    proxy
        .internal_own_property_keys(agent)
        .unwrap()
        .into_iter()
        .map(|key| key.as_display(agent))
        .collect()
}

fn enumerated(agent: &mut Agent, proxy: Object) -> Vec<String> {
    let iterator = enumerate_object_properties(agent, proxy).unwrap();
    let names = iterator_to_list(agent, iterator).unwrap();
    names.into_iter().map(|n| display(agent, n)).collect()
}

#[test]
fn get_uses_the_get_operation_with_the_receiver() {
    let mut agent = new_agent();
    let get_op = function(&mut agent, |agent, _, arguments| {
        let name = to_string(agent, arguments.get(1))?.to_string_lossy(agent);
        Ok(Value::from_string(agent, format!("got {name}")))
    });
    let handler = object(&mut agent, &[("get", get_op)]);
    let proxy = proxy_create(&mut agent, handler.into_value(), Value::Null).unwrap();
    let foo = key(&mut agent, "foo");
    let value = get(&mut agent, proxy, foo).unwrap();
    assert_eq!(display(&mut agent, value), "got foo");
}

#[test]
fn get_and_has_derive_from_get_property_descriptor() {
    let mut agent = new_agent();
    let gpd = function(&mut agent, |agent, _, arguments| {
        let name = to_string(agent, arguments.get(0))?.to_string_lossy(agent);
        if name != "x" {
            return Ok(Value::Undefined);
        }
        let prototype = agent.intrinsics().object_prototype();
        let desc = ordinary_object_create(agent, Some(prototype));
        let value_key = PropertyKey::from_str(agent, "value");
        create_data_property_or_throw(agent, desc, value_key, 42.into())?;
        Ok(desc.into_value())
    });
    let handler = object(&mut agent, &[("getPropertyDescriptor", gpd)]);
    let proxy = proxy_create(&mut agent, handler.into_value(), Value::Undefined).unwrap();

    let x = key(&mut agent, "x");
    let y = key(&mut agent, "y");
    assert_eq!(get(&mut agent, proxy, x).unwrap(), Value::from(42));
    assert_eq!(get(&mut agent, proxy, y).unwrap(), Value::Undefined);
    assert!(has_property(&mut agent, proxy, x).unwrap());
    assert!(!has_property(&mut agent, proxy, y).unwrap());
    // getOwnPropertyDescriptor falls back to the inherited descriptor.
    let desc = proxy.internal_get_own_property(&mut agent, x).unwrap().unwrap();
    assert_eq!(desc.value, Some(Value::from(42)));
    assert_eq!(desc.writable, Some(false));
}

#[test]
fn set_without_descriptors_defines_a_fresh_property() {
    let mut agent = new_agent();
    let backing = object(&mut agent, &[]);
    let define = function(&mut agent, move |agent, _, arguments| {
        let key = to_property_key(agent, arguments.get(0))?;
        let desc = PropertyDescriptor::to_property_descriptor(agent, arguments.get(1))?;
        define_property_or_throw(agent, backing, key, desc)?;
        Ok(Value::Undefined)
    });
    let handler = object(&mut agent, &[("defineProperty", define)]);
    let proxy = proxy_create(&mut agent, handler.into_value(), Value::Null).unwrap();

    let z = key(&mut agent, "z");
    set(&mut agent, proxy, z, 5.into(), true).unwrap();
    let desc = backing.internal_get_own_property(&mut agent, z).unwrap().unwrap();
    assert_eq!(desc.value, Some(Value::from(5)));
    assert_eq!(desc.writable, Some(true));
    assert_eq!(desc.enumerable, Some(true));
    assert_eq!(desc.configurable, Some(true));
}

#[test]
fn set_through_an_own_accessor_calls_the_setter_with_the_receiver() {
    let mut agent = new_agent();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let log = seen.clone();
    let setter = function(&mut agent, move |_, this, arguments| {
        log.borrow_mut().push((this, arguments.get(0)));
        Ok(Value::Undefined)
    });
    let Value::Object(setter) = setter else {
        unreachable!()
    };
    let gopd = function(&mut agent, move |agent, _, _| {
        let desc = PropertyDescriptor {
            set: Some(Some(setter)),
            ..Default::default()
        };
        Ok(PropertyDescriptor::from_property_descriptor(agent, Some(desc)))
    });
    let handler = object(&mut agent, &[("getOwnPropertyDescriptor", gopd)]);
    let proxy = proxy_create(&mut agent, handler.into_value(), Value::Null).unwrap();

    let w = key(&mut agent, "w");
    set(&mut agent, proxy, w, 9.into(), true).unwrap();
    assert_eq!(seen.borrow().as_slice(), &[(proxy.into_value(), Value::from(9))]);
}

#[test]
fn set_fails_on_a_read_only_data_property() {
    let mut agent = new_agent();
    let gopd = function(&mut agent, |agent, _, _| {
        let desc = PropertyDescriptor {
            value: Some(1.into()),
            writable: Some(false),
            ..Default::default()
        };
        Ok(PropertyDescriptor::from_property_descriptor(agent, Some(desc)))
    });
    let handler = object(&mut agent, &[("getOwnPropertyDescriptor", gopd)]);
    let proxy = proxy_create(&mut agent, handler.into_value(), Value::Null).unwrap();

    let r = key(&mut agent, "r");
    let result = set(&mut agent, proxy, r, 2.into(), true);
    assert!(is_type_error(&mut agent, result));
}

#[test]
fn missing_operations_throw_when_used() {
    let mut agent = new_agent();
    let handler = object(&mut agent, &[]);
    // Adapting never throws for missing operations.
    let proxy = proxy_create(&mut agent, handler.into_value(), Value::Null).unwrap();

    let a = key(&mut agent, "a");
    let result = get(&mut agent, proxy, a);
    assert!(is_type_error(&mut agent, result));
    let result = has_property(&mut agent, proxy, a);
    assert!(is_type_error(&mut agent, result));
    let result = delete_property_or_throw(&mut agent, proxy, a);
    assert!(is_type_error(&mut agent, result));
    let result = proxy.internal_own_property_keys(&mut agent);
    assert!(is_type_error(&mut agent, result));
}

#[test]
fn set_prototype_of_always_throws() {
    let mut agent = new_agent();
    let handler = object(&mut agent, &[]);
    let proxy = proxy_create(&mut agent, handler.into_value(), Value::Null).unwrap();
    let result = proxy.internal_set_prototype_of(&mut agent, None);
    assert!(is_type_error(&mut agent, result));
}

#[test]
fn proto_becomes_the_prototype() {
    let mut agent = new_agent();
    let handler = object(&mut agent, &[]);
    let proto = object(&mut agent, &[]);
    let proxy = proxy_create(&mut agent, handler.into_value(), proto.into_value()).unwrap();
    assert_eq!(proxy.internal_get_prototype_of(&mut agent).unwrap(), Some(proto));
}

#[test]
fn bad_arguments_are_type_errors() {
    let mut agent = new_agent();
    let result = proxy_create(&mut agent, 1.into(), Value::Null);
    assert!(is_type_error(&mut agent, result));

    let handler = object(&mut agent, &[]);
    let result = proxy_create(&mut agent, handler.into_value(), true.into());
    assert!(is_type_error(&mut agent, result));

    let result = proxy_create_function(&mut agent, handler.into_value(), Value::Null, None);
    assert!(is_type_error(&mut agent, result));
}

#[test]
fn keys_and_descriptors_feed_the_serializer() {
    let mut agent = new_agent();
    let keys = function(&mut agent, |agent, _, _| {
        let a = Value::from_str(agent, "a");
        let b = Value::from_str(agent, "b");
        Ok(create_array_from_list(agent, &[a, b]).into_value())
    });
    let gopd = function(&mut agent, |agent, _, arguments| {
        let desc = PropertyDescriptor {
            value: Some(arguments.get(0)),
            enumerable: Some(true),
            configurable: Some(true),
            ..Default::default()
        };
        Ok(PropertyDescriptor::from_property_descriptor(agent, Some(desc)))
    });
    // Everything else is looked up on Object.prototype, toSource included.
    let get_op = function(&mut agent, |agent, _, arguments| {
        let key = to_property_key(agent, arguments.get(1))?;
        let object_prototype = agent.intrinsics().object_prototype();
        get(agent, object_prototype, key)
    });
    let handler = object(
        &mut agent,
        &[("keys", keys), ("getOwnPropertyDescriptor", gopd), ("get", get_op)],
    );
    let proxy = proxy_create(&mut agent, handler.into_value(), Value::Null).unwrap();
    let source = uneval(&mut agent, proxy.into_value()).unwrap();
    assert_eq!(source.to_string_lossy(&agent), r#"({a:"a", b:"b"})"#);
}

#[test]
fn enumerate_is_materialised_into_an_iterator() {
    let mut agent = new_agent();
    let enumerate = function(&mut agent, |agent, _, _| {
        let p = Value::from_str(agent, "p");
        let q = Value::from_str(agent, "q");
        Ok(create_array_from_list(agent, &[p, q]).into_value())
    });
    let handler = object(&mut agent, &[("enumerate", enumerate)]);
    let proxy = proxy_create(&mut agent, handler.into_value(), Value::Null).unwrap();
    let iterator = enumerate_object_properties(&mut agent, proxy).unwrap();
    let names = iterator_to_list(&mut agent, iterator).unwrap();
    let names: Vec<String> = names.into_iter().map(|n| display(&mut agent, n)).collect();
    assert_eq!(names, ["p", "q"]);
}

#[test]
fn derived_get_calls_the_getter_with_the_receiver() {
    let mut agent = new_agent();
    let getter = function(&mut agent, |_, this, _| Ok(this));
    let Value::Object(getter) = getter else {
        unreachable!()
    };
    let gpd = function(&mut agent, move |agent, _, _| {
        let desc = PropertyDescriptor {
            get: Some(Some(getter)),
            configurable: Some(true),
            ..Default::default()
        };
        Ok(PropertyDescriptor::from_property_descriptor(agent, Some(desc)))
    });
    let handler = object(&mut agent, &[("getPropertyDescriptor", gpd)]);
    let proxy = proxy_create(&mut agent, handler.into_value(), Value::Null).unwrap();
    let x = key(&mut agent, "x");
    assert_eq!(get(&mut agent, proxy, x).unwrap(), proxy.into_value());
}

#[test]
fn has_operation_answers_has() {
    let mut agent = new_agent();
    let has = function(&mut agent, |_, _, _| Ok(true.into()));
    let handler = object(&mut agent, &[("has", has)]);
    let proxy = proxy_create(&mut agent, handler.into_value(), Value::Null).unwrap();
    let anything = key(&mut agent, "anything");
    assert!(has_property(&mut agent, proxy, anything).unwrap());
}

#[test]
fn has_own_uses_the_has_own_operation() {
    let mut agent = new_agent();
    let has_own = function(&mut agent, |agent, _, arguments| {
        Ok((display(agent, arguments.get(0)) == "mine").into())
    });
    let handler = object(&mut agent, &[("hasOwn", has_own)]);
    let proxy = proxy_create(&mut agent, handler.into_value(), Value::Null).unwrap();
    let mine = key(&mut agent, "mine");
    let other = key(&mut agent, "other");
    assert!(has_own_property(&mut agent, proxy, mine).unwrap());
    assert!(!has_own_property(&mut agent, proxy, other).unwrap());
}

#[test]
fn has_own_derives_from_get_own_property_descriptor() {
    let mut agent = new_agent();
    let gopd = descriptor_for(&mut agent, "mine");
    let handler = object(&mut agent, &[("getOwnPropertyDescriptor", gopd)]);
    let proxy = proxy_create(&mut agent, handler.into_value(), Value::Null).unwrap();
    let mine = key(&mut agent, "mine");
    let other = key(&mut agent, "other");
    assert!(has_own_property(&mut agent, proxy, mine).unwrap());
    assert!(!has_own_property(&mut agent, proxy, other).unwrap());
}

#[test]
fn own_keys_derive_from_get_own_property_names() {
    let mut agent = new_agent();
    let gopn = names(&mut agent, &["n", "0"]);
    let handler = object(&mut agent, &[("getOwnPropertyNames", gopn)]);
    let proxy = proxy_create(&mut agent, handler.into_value(), Value::Null).unwrap();
    assert_eq!(own_keys(&mut agent, proxy), ["n", "0"]);
}

#[test]
fn keys_take_precedence_over_get_own_property_names() {
    let mut agent = new_agent();
    let keys = names(&mut agent, &["k"]);
    let gopn = names(&mut agent, &["n"]);
    let handler = object(
        &mut agent,
        &[("getOwnPropertyNames", gopn), ("keys", keys)],
    );
    let proxy = proxy_create(&mut agent, handler.into_value(), Value::Null).unwrap();
    assert_eq!(own_keys(&mut agent, proxy), ["k"]);
}

#[test]
fn delete_property_uses_the_delete_operation() {
    let mut agent = new_agent();
    let deleted = Rc::new(RefCell::new(Vec::new()));
    let log = deleted.clone();
    let delete = function(&mut agent, move |agent, _, arguments| {
        let name = display(agent, arguments.get(0));
        let allowed = name != "fixed";
        log.borrow_mut().push(name);
        Ok(allowed.into())
    });
    let handler = object(&mut agent, &[("delete", delete)]);
    let proxy = proxy_create(&mut agent, handler.into_value(), Value::Null).unwrap();

    let gone = key(&mut agent, "gone");
    delete_property_or_throw(&mut agent, proxy, gone).unwrap();
    let fixed = key(&mut agent, "fixed");
    let result = delete_property_or_throw(&mut agent, proxy, fixed);
    assert!(is_type_error(&mut agent, result));
    assert_eq!(deleted.borrow().as_slice(), ["gone", "fixed"]);
}

#[test]
fn enumerate_uses_the_iterator_from_iterate() {
    let mut agent = new_agent();
    let source = object(&mut agent, &[("u", 1.into()), ("v", 2.into())]);
    let iterator = create_shim_iterator(&mut agent, source.into_value(), true).unwrap();
    let iterate = function(&mut agent, move |_, _, _| Ok(iterator.into_value()));
    let handler = object(&mut agent, &[("iterate", iterate)]);
    let proxy = proxy_create(&mut agent, handler.into_value(), Value::Null).unwrap();
    assert_eq!(
        enumerate_object_properties(&mut agent, proxy).unwrap(),
        iterator
    );
}

#[test]
fn enumerate_filters_property_names_by_enumerability() {
    let mut agent = new_agent();
    let gpn = names(&mut agent, &["shown", "hidden"]);
    let gpd = descriptor_for(&mut agent, "shown");
    let hidden_gpd = function(&mut agent, move |agent, this, arguments| {
        if display(agent, arguments.get(0)) == "hidden" {
            let desc = PropertyDescriptor {
                value: Some(2.into()),
                enumerable: Some(false),
                ..Default::default()
            };
            return Ok(PropertyDescriptor::from_property_descriptor(agent, Some(desc)));
        }
        call(agent, gpd, this, Some(ArgumentsList(&[arguments.get(0)])))
    });
    let handler = object(
        &mut agent,
        &[("getPropertyNames", gpn), ("getPropertyDescriptor", hidden_gpd)],
    );
    let proxy = proxy_create(&mut agent, handler.into_value(), Value::Null).unwrap();
    assert_eq!(enumerated(&mut agent, proxy), ["shown"]);
}

#[test]
fn operations_are_read_when_adapting() {
    let mut agent = new_agent();
    let first = function(&mut agent, |_, _, _| Ok(1.into()));
    let second = function(&mut agent, |_, _, _| Ok(2.into()));
    let handler = object(&mut agent, &[("get", first)]);
    let proxy = proxy_create(&mut agent, handler.into_value(), Value::Null).unwrap();
    let get_key = key(&mut agent, "get");
    set(&mut agent, handler, get_key, second, true).unwrap();
    let anything = key(&mut agent, "anything");
    assert_eq!(get(&mut agent, proxy, anything).unwrap(), Value::from(1));
}

#[test]
fn handler_errors_propagate_unchanged() {
    let mut agent = new_agent();
    let has = function(&mut agent, |agent, _, _| {
        Err(agent.throw_exception(ExceptionType::RangeError, "from the handler"))
    });
    let handler = object(&mut agent, &[("has", has)]);
    let proxy = proxy_create(&mut agent, handler.into_value(), Value::Null).unwrap();
    let k = key(&mut agent, "k");
    let error = has_property(&mut agent, proxy, k).unwrap_err();
    assert_eq!(error.to_string(&mut agent), "RangeError: from the handler");
}

fn make_pair(
    agent: &mut Agent,
    _: Value,
    arguments: ArgumentsList,
    _: Option<Object>,
) -> JsResult<Value> {
    let prototype = agent.intrinsics().object_prototype();
    let pair = ordinary_object_create(agent, Some(prototype));
    let first = PropertyKey::from_str(agent, "first");
    create_data_property_or_throw(agent, pair, first, arguments.get(0))?;
    Ok(pair.into_value())
}

#[test]
fn create_function_calls_and_constructs() {
    let mut agent = new_agent();
    let handler = object(&mut agent, &[]);
    let call_trap = function(&mut agent, |_, this, arguments| {
        Ok(if this.is_undefined() {
            arguments.get(0)
        } else {
            this
        })
    });
    let construct_trap = create_builtin_function(
        &mut agent,
        Behaviour::Constructor(make_pair),
        BuiltinFunctionArgs::new(1, "Pair"),
    );
    let f = proxy_create_function(
        &mut agent,
        handler.into_value(),
        call_trap,
        Some(construct_trap.into_value()),
    )
    .unwrap();

    let result = call(
        &mut agent,
        f.into_value(),
        Value::Undefined,
        Some(ArgumentsList(&[7.into()])),
    )
    .unwrap();
    assert_eq!(result, Value::from(7));

    let pair = construct(&mut agent, f, Some(ArgumentsList(&[3.into()])), None).unwrap();
    let first = key(&mut agent, "first");
    assert_eq!(get(&mut agent, pair, first).unwrap(), Value::from(3));
}

#[test]
fn create_function_treats_an_undefined_construct_trap_as_absent() {
    let mut agent = new_agent();
    let global = agent.global_object();
    let proxy_key = key(&mut agent, "Proxy");
    let proxy_object = get(&mut agent, global, proxy_key).unwrap();
    let handler = object(&mut agent, &[]);
    let pair = create_builtin_function(
        &mut agent,
        Behaviour::Constructor(make_pair),
        BuiltinFunctionArgs::new(1, "Pair"),
    );
    let create_function = key(&mut agent, "createFunction");
    let f = invoke(
        &mut agent,
        proxy_object,
        create_function,
        Some(ArgumentsList(&[
            handler.into_value(),
            pair.into_value(),
            Value::Undefined,
        ])),
    )
    .unwrap();
    let Value::Object(f) = f else {
        unreachable!()
    };

    let constructed = construct(&mut agent, f, Some(ArgumentsList(&[3.into()])), None).unwrap();
    let first = key(&mut agent, "first");
    assert_eq!(get(&mut agent, constructed, first).unwrap(), Value::from(3));
}
