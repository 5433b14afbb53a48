// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use mozlegacy::{
    Agent, JsResult, Options,
    ecmascript::{
        abstract_operations::{
            operations_on_iterator_objects::{
                get_iterator, iterator_complete, iterator_next, iterator_step_value,
                iterator_to_list, iterator_value,
            },
            operations_on_objects::{
                call, construct, create_array_from_list, create_data_property_or_throw,
                delete_property_or_throw, enumerate_object_properties, get, invoke, set,
            },
        },
        builtins::{
            ArgumentsList,
            map::map_set,
            map_create,
            ordinary::ordinary_object_create,
            set::set_add,
            set_create,
        },
        types::{InternalMethods, Object, PropertyKey, Symbol, Value},
    },
    create_shim_iterator, initialize_legacy_extensions, is_iteration_object, uneval,
};

fn object(agent: &mut Agent, properties: &[(&str, Value)]) -> Object {
    let prototype = agent.intrinsics().object_prototype();
    let o = ordinary_object_create(agent, Some(prototype));
    for (name, value) in properties {
        let key = PropertyKey::from_str(agent, name);
        create_data_property_or_throw(agent, o, key, *value).unwrap();
    }
    o
}

/// Drains an iterator through the modern protocol and serializes the
/// values it produced.
fn drain(agent: &mut Agent, iterable: Value) -> String {
    let iterator = get_iterator(agent, iterable).unwrap();
    let values = iterator_to_list(agent, iterator).unwrap();
    let list = create_array_from_list(agent, &values);
    uneval(agent, list.into_value()).unwrap().to_string_lossy(agent)
}

fn numbers(agent: &mut Agent, values: &[i32]) -> Object {
    let values: Vec<Value> = values.iter().map(|v| Value::from(*v)).collect();
    create_array_from_list(agent, &values)
}

fn is_type_error(agent: &mut Agent, result: JsResult<impl Sized>) -> bool {
    match result {
        Ok(_) => false,
        Err(error) => error.to_string(agent).starts_with("TypeError"),
    }
}

#[test]
fn array_keys_and_entries() {
    let mut agent = Agent::new(Options::default());
    let array = numbers(&mut agent, &[10, 20, 30]);
    let keys = create_shim_iterator(&mut agent, array.into_value(), true).unwrap();
    assert_eq!(drain(&mut agent, keys.into_value()), "[0, 1, 2]");
    let entries = create_shim_iterator(&mut agent, array.into_value(), false).unwrap();
    assert_eq!(
        drain(&mut agent, entries.into_value()),
        "[[0, 10], [1, 20], [2, 30]]"
    );
}

#[test]
fn array_length_is_fixed_at_creation() {
    let mut agent = Agent::new(Options::default());
    let array = numbers(&mut agent, &[1, 2]);
    let entries = create_shim_iterator(&mut agent, array.into_value(), false).unwrap();
    create_data_property_or_throw(&mut agent, array, 2.into(), 3.into()).unwrap();
    // Values are read when reached.
    create_data_property_or_throw(&mut agent, array, 1.into(), 5.into()).unwrap();
    assert_eq!(drain(&mut agent, entries.into_value()), "[[0, 1], [1, 5]]");
}

#[test]
fn object_keys_and_entries() {
    let mut agent = Agent::new(Options::default());
    let o = object(&mut agent, &[("a", 1.into()), ("b", 2.into())]);
    let keys = create_shim_iterator(&mut agent, o.into_value(), true).unwrap();
    assert_eq!(drain(&mut agent, keys.into_value()), r#"["a", "b"]"#);
    let entries = create_shim_iterator(&mut agent, o.into_value(), false).unwrap();
    assert_eq!(
        drain(&mut agent, entries.into_value()),
        r#"[["a", 1], ["b", 2]]"#
    );
}

#[test]
fn object_entries_read_values_when_reached() {
    let mut agent = Agent::new(Options::default());
    let o = object(&mut agent, &[("a", 1.into()), ("b", 2.into())]);
    let entries = create_shim_iterator(&mut agent, o.into_value(), false).unwrap();
    let first = iterator_step_value(&mut agent, entries).unwrap().unwrap();
    let first = uneval(&mut agent, first).unwrap().to_string_lossy(&agent);
    assert_eq!(first, r#"["a", 1]"#);

    let b = PropertyKey::from_str(&mut agent, "b");
    set(&mut agent, o, b, 5.into(), true).unwrap();
    let second = iterator_step_value(&mut agent, entries).unwrap().unwrap();
    let second = uneval(&mut agent, second).unwrap().to_string_lossy(&agent);
    assert_eq!(second, r#"["b", 5]"#);
    assert_eq!(iterator_step_value(&mut agent, entries).unwrap(), None);
}

#[test]
fn deleted_keys_are_skipped_and_added_keys_ignored() {
    let mut agent = Agent::new(Options::default());
    let o = object(
        &mut agent,
        &[("a", 1.into()), ("b", 2.into()), ("c", 3.into())],
    );
    let keys = create_shim_iterator(&mut agent, o.into_value(), true).unwrap();
    let b = PropertyKey::from_str(&mut agent, "b");
    delete_property_or_throw(&mut agent, o, b).unwrap();
    let d = PropertyKey::from_str(&mut agent, "d");
    create_data_property_or_throw(&mut agent, o, d, 4.into()).unwrap();
    assert_eq!(drain(&mut agent, keys.into_value()), r#"["a", "c"]"#);
}

#[test]
fn primitives_are_converted_to_objects() {
    let mut agent = Agent::new(Options::default());
    let result = create_shim_iterator(&mut agent, Value::Null, true);
    assert!(is_type_error(&mut agent, result));
    let keys = create_shim_iterator(&mut agent, 1.into(), true).unwrap();
    assert_eq!(drain(&mut agent, keys.into_value()), "[]");
}

#[test]
fn enumeration_walks_the_same_sequence() {
    let mut agent = Agent::new(Options::default());
    let array = numbers(&mut agent, &[7, 8]);
    let keys = create_shim_iterator(&mut agent, array.into_value(), true).unwrap();
    let iterator = enumerate_object_properties(&mut agent, keys).unwrap();
    let values = iterator_to_list(&mut agent, iterator).unwrap();
    assert_eq!(values, vec![Value::from(0), Value::from(1)]);
}

#[test]
fn exhausted_iterators_keep_reporting_done() {
    let mut agent = Agent::new(Options::default());
    let array = numbers(&mut agent, &[1]);
    let keys = create_shim_iterator(&mut agent, array.into_value(), true).unwrap();
    assert_eq!(iterator_step_value(&mut agent, keys).unwrap(), Some(0.into()));
    for _ in 0..2 {
        let result = iterator_next(&mut agent, keys).unwrap();
        assert!(iterator_complete(&mut agent, result).unwrap());
        assert_eq!(iterator_value(&mut agent, result).unwrap(), Value::Undefined);
    }
}

#[test]
fn iteration_objects() {
    let mut agent = Agent::new(Options::default());
    let legacy = initialize_legacy_extensions(&mut agent);
    let plain = object(&mut agent, &[]);
    let array = numbers(&mut agent, &[]);
    let shim = create_shim_iterator(&mut agent, array.into_value(), true).unwrap();
    assert!(is_iteration_object(&mut agent, shim.into_value()).unwrap());
    assert!(is_iteration_object(&mut agent, legacy.iterator_prototype.into_value()).unwrap());
    assert!(!is_iteration_object(&mut agent, plain.into_value()).unwrap());
    assert!(!is_iteration_object(&mut agent, 3.into()).unwrap());

    // Copying the next method does not make an iteration object.
    let next_key = PropertyKey::from_str(&mut agent, "next");
    let result = invoke(&mut agent, plain.into_value(), next_key, None);
    assert!(result.is_err());
    let next = get(&mut agent, legacy.iterator_prototype, next_key).unwrap();
    let result = call(&mut agent, next, plain.into_value(), None);
    assert!(is_type_error(&mut agent, result));
}

#[test]
fn iterator_method_returns_this() {
    let mut agent = Agent::new(Options::default());
    let array = numbers(&mut agent, &[]);
    let shim = create_shim_iterator(&mut agent, array.into_value(), true).unwrap();
    let key = PropertyKey::from_str(&mut agent, "iterator");
    let result = invoke(&mut agent, shim.into_value(), key, None).unwrap();
    assert_eq!(result, shim.into_value());
}

#[test]
fn global_iterator_with_and_without_new() {
    let mut agent = Agent::new(Options::default());
    let global = agent.global_object();
    let key = PropertyKey::from_str(&mut agent, "Iterator");
    let Value::Object(constructor) = get(&mut agent, global, key).unwrap() else {
        panic!("Iterator is not installed");
    };
    let o = object(&mut agent, &[("k", true.into())]);
    let arguments = [o.into_value(), true.into()];
    let called = call(
        &mut agent,
        constructor.into_value(),
        Value::Undefined,
        Some(ArgumentsList(&arguments)),
    )
    .unwrap();
    assert_eq!(drain(&mut agent, called), r#"["k"]"#);
    let constructed = construct(&mut agent, constructor, Some(ArgumentsList(&arguments)), None)
        .unwrap();
    assert_eq!(drain(&mut agent, constructed.into_value()), r#"["k"]"#);

    let prototype_key = PropertyKey::from_str(&mut agent, "prototype");
    let prototype = get(&mut agent, constructor, prototype_key).unwrap();
    assert_eq!(
        constructed.internal_get_prototype_of(&mut agent).unwrap(),
        Object::try_from(prototype).ok()
    );
}

#[test]
fn builtin_iterator_methods() {
    let mut agent = Agent::new(Options::default());
    let array = numbers(&mut agent, &[4, 5]);
    assert_eq!(drain(&mut agent, array.into_value()), "[4, 5]");

    let string = Value::from_str(&mut agent, "hi");
    assert_eq!(drain(&mut agent, string), r#"["h", "i"]"#);

    let set = set_create(&mut agent);
    set_add(&mut agent, set, 1.into()).unwrap();
    set_add(&mut agent, set, 1.into()).unwrap();
    set_add(&mut agent, set, 2.into()).unwrap();
    assert_eq!(drain(&mut agent, set.into_value()), "[1, 2]");
}

#[test]
fn map_iteration_observes_later_insertions() {
    let mut agent = Agent::new(Options::default());
    let map = map_create(&mut agent);
    let one = Value::from_str(&mut agent, "one");
    map_set(&mut agent, map, 1.into(), one).unwrap();
    let iterator = get_iterator(&mut agent, map.into_value()).unwrap();
    let first = iterator_step_value(&mut agent, iterator).unwrap().unwrap();
    let two = Value::from_str(&mut agent, "two");
    map_set(&mut agent, map, 2.into(), two).unwrap();
    let rest = iterator_to_list(&mut agent, iterator).unwrap();
    let mut entries = vec![first];
    entries.extend(rest);
    let list = create_array_from_list(&mut agent, &entries);
    let source = uneval(&mut agent, list.into_value()).unwrap();
    assert_eq!(source.to_string_lossy(&agent), r#"[[1, "one"], [2, "two"]]"#);
}

#[test]
fn legacy_iterator_method_drives_the_modern_protocol() {
    let mut agent = Agent::new(Options::default());
    let array = numbers(&mut agent, &[9]);
    let inner = create_shim_iterator(&mut agent, array.into_value(), false).unwrap();
    let o = object(&mut agent, &[]);
    let key = PropertyKey::from_str(&mut agent, "iterator");
    let iterator_method = {
        let array_prototype = agent.intrinsics().array_prototype();
        get(&mut agent, array_prototype, key).unwrap()
    };
    // An object whose iterator() is Array.prototype.iterator iterates itself
    // as an array-like.
    set(&mut agent, o, key, iterator_method, true).unwrap();
    let length = PropertyKey::from_str(&mut agent, "length");
    set(&mut agent, o, length, 1.into(), true).unwrap();
    set(&mut agent, o, 0.into(), inner.into_value(), true).unwrap();
    let iterator = get_iterator(&mut agent, o.into_value()).unwrap();
    assert_eq!(
        iterator_step_value(&mut agent, iterator).unwrap(),
        Some(inner.into_value())
    );
}

#[test]
fn object_prototype_iterator_getter_is_not_configurable() {
    let mut agent = Agent::new(Options::default());
    let object_prototype = agent.intrinsics().object_prototype();
    let desc = object_prototype
        .internal_get_own_property(&mut agent, PropertyKey::Symbol(Symbol::iterator()))
        .unwrap()
        .unwrap();
    assert!(desc.is_accessor_descriptor());
    assert_eq!(desc.configurable, Some(false));
    let getter = desc.get.flatten().unwrap();
    let name_key = PropertyKey::from_str(&mut agent, "name");
    let name = get(&mut agent, getter, name_key).unwrap();
    assert_eq!(
        name.to_display_string(&mut agent).unwrap(),
        "get [Symbol.iterator]"
    );
}

#[test]
fn extensions_can_be_installed_later() {
    let mut agent = Agent::new(Options {
        disable_legacy_extensions: true,
        ..Default::default()
    });
    assert!(!agent.current_realm().has_legacy_extensions());
    let global = agent.global_object();
    let key = PropertyKey::from_str(&mut agent, "Iterator");
    assert_eq!(get(&mut agent, global, key).unwrap(), Value::Undefined);

    let first = initialize_legacy_extensions(&mut agent);
    let second = initialize_legacy_extensions(&mut agent);
    assert_eq!(first.iterator_prototype, second.iterator_prototype);
    assert!(agent.current_realm().has_legacy_extensions());
    assert_eq!(
        get(&mut agent, global, key).unwrap(),
        first.iterator_constructor.into_value()
    );
}
