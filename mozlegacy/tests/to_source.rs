// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use mozlegacy::{
    Agent, JsResult, Options,
    ecmascript::{
        abstract_operations::operations_on_objects::{
            create_array_from_list, create_data_property_or_throw, define_property_or_throw,
            invoke,
        },
        builtins::{
            ArgumentsList, Behaviour, BuiltinFunctionArgs, PrimitiveObjectData,
            array::array_create, create_builtin_function, create_date, create_error,
            create_primitive_object, ordinary::ordinary_object_create, regexp_create,
        },
        execution::ExceptionType,
        types::{Object, PropertyDescriptor, PropertyKey, Symbol, Value},
    },
    uneval,
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

fn source(agent: &mut Agent, value: impl Into<Value>) -> String {
    uneval(agent, value.into()).unwrap().to_string_lossy(agent)
}

fn function_with_source(agent: &mut Agent, name: &str, text: &str) -> Object {
    fn noop(_: &mut Agent, _: Value, _: ArgumentsList) -> JsResult<Value> {
        Ok(Value::Undefined)
    }
    create_builtin_function(
        agent,
        Behaviour::Regular(noop),
        BuiltinFunctionArgs::new(0, name).with_source_text(text),
    )
}

#[test]
fn primitives() {
    let mut agent = Agent::new(Options::default());
    assert_eq!(source(&mut agent, Value::Undefined), "(void 0)");
    assert_eq!(source(&mut agent, Value::Null), "null");
    assert_eq!(source(&mut agent, true), "true");
    assert_eq!(source(&mut agent, 1.5), "1.5");
    assert_eq!(source(&mut agent, f64::NAN), "NaN");
    let s = Value::from_str(&mut agent, "say \"hi\"\n");
    assert_eq!(source(&mut agent, s), r#""say \"hi\"\n""#);
}

#[test]
fn object_literal_names() {
    let mut agent = Agent::new(Options::default());
    let o = object(&mut agent, &[("a", 1.into()), ("b c", 2.into())]);
    assert_eq!(source(&mut agent, o), "({a:1, 'b c':2})");

    let o = object(&mut agent, &[("7", true.into()), ("$x_1", Value::Null)]);
    assert_eq!(source(&mut agent, o), "({7:true, $x_1:null})");
}

#[test]
fn nested_composites_are_parenthesised_once() {
    let mut agent = Agent::new(Options::default());
    let array = create_array_from_list(&mut agent, &[1.into(), 2.into()]);
    let inner = object(&mut agent, &[("y", array.into_value())]);
    let outer = object(&mut agent, &[("x", inner.into_value())]);
    assert_eq!(source(&mut agent, outer), "({x:{y:[1, 2]}})");
}

#[test]
fn cycles_serialize_as_placeholders() {
    let mut agent = Agent::new(Options::default());
    let o = object(&mut agent, &[]);
    let key = PropertyKey::from_str(&mut agent, "self");
    create_data_property_or_throw(&mut agent, o, key, o.into_value()).unwrap();
    assert_eq!(source(&mut agent, o), "({self:{}})");

    let array = create_array_from_list(&mut agent, &[Value::Undefined]);
    create_data_property_or_throw(&mut agent, array, 0.into(), array.into_value()).unwrap();
    assert_eq!(source(&mut agent, array), "[[]]");
    assert!(agent.source_context().is_idle());
}

#[test]
fn shared_references_are_not_cycles() {
    let mut agent = Agent::new(Options::default());
    let shared = object(&mut agent, &[("n", 1.into())]);
    let o = object(
        &mut agent,
        &[("a", shared.into_value()), ("b", shared.into_value())],
    );
    assert_eq!(source(&mut agent, o), "({a:{n:1}, b:{n:1}})");
}

#[test]
fn array_holes() {
    let mut agent = Agent::new(Options::default());
    let array = array_create(&mut agent, 3, None);
    create_data_property_or_throw(&mut agent, array, 0.into(), 1.into()).unwrap();
    create_data_property_or_throw(&mut agent, array, 2.into(), 3.into()).unwrap();
    assert_eq!(source(&mut agent, array), "[1, , 3]");

    let trailing = array_create(&mut agent, 2, None);
    create_data_property_or_throw(&mut agent, trailing, 0.into(), 1.into()).unwrap();
    assert_eq!(source(&mut agent, trailing), "[1, ,]");
}

#[test]
fn accessors_reuse_function_source() {
    let mut agent = Agent::new(Options::default());
    let getter = function_with_source(&mut agent, "", "function () { return 1; }");
    let setter = function_with_source(&mut agent, "", "function (v) {}");
    let o = object(&mut agent, &[]);
    let key = PropertyKey::from_str(&mut agent, "x");
    let desc = PropertyDescriptor {
        get: Some(Some(getter)),
        set: Some(Some(setter)),
        enumerable: Some(true),
        configurable: Some(true),
        ..Default::default()
    };
    define_property_or_throw(&mut agent, o, key, desc).unwrap();
    assert_eq!(
        source(&mut agent, o),
        "({get x() { return 1; }, set x(v) {}})"
    );
}

#[test]
fn non_enumerable_properties_are_skipped() {
    let mut agent = Agent::new(Options::default());
    let o = object(&mut agent, &[("shown", 1.into())]);
    let key = PropertyKey::from_str(&mut agent, "hidden");
    let desc = PropertyDescriptor {
        value: Some(2.into()),
        enumerable: Some(false),
        ..Default::default()
    };
    define_property_or_throw(&mut agent, o, key, desc).unwrap();
    assert_eq!(source(&mut agent, o), "({shown:1})");
}

#[test]
fn builtin_objects() {
    let mut agent = Agent::new(Options::default());
    let s = Value::from_str(&mut agent, "ab");
    let Value::String(s) = s else { unreachable!() };
    let wrapper = create_primitive_object(&mut agent, PrimitiveObjectData::String(s));
    assert_eq!(source(&mut agent, wrapper), r#"(new String("ab"))"#);

    let wrapper = create_primitive_object(&mut agent, PrimitiveObjectData::Number(-2.5));
    assert_eq!(source(&mut agent, wrapper), "(new Number(-2.5))");

    let wrapper = create_primitive_object(&mut agent, PrimitiveObjectData::Boolean(false));
    assert_eq!(source(&mut agent, wrapper), "(new Boolean(false))");

    let date = create_date(&mut agent, 0.0);
    assert_eq!(source(&mut agent, date), "(new Date(0))");

    let regexp = regexp_create(&mut agent, "a+b", "gi").unwrap();
    assert_eq!(source(&mut agent, regexp), "/a+b/gi");

    let error = create_error(&mut agent, ExceptionType::TypeError, "bad \"thing\"");
    assert_eq!(
        source(&mut agent, error),
        r#"(new TypeError("bad \"thing\""))"#
    );
}

#[test]
fn error_messages_nest_inside_the_error() {
    let mut agent = Agent::new(Options::default());
    let error = create_error(&mut agent, ExceptionType::Error, "");
    let message = object(&mut agent, &[("a", 1.into())]);
    let message_key = PropertyKey::from_str(&mut agent, "message");
    create_data_property_or_throw(&mut agent, error, message_key, message.into_value()).unwrap();
    assert_eq!(source(&mut agent, error), "(new Error({a:1}))");
}

#[test]
fn functions() {
    let mut agent = Agent::new(Options::default());
    let named = function_with_source(&mut agent, "f", "function f(a) { return a; }");
    assert_eq!(source(&mut agent, named), "function f(a) { return a; }");
    let anonymous = function_with_source(&mut agent, "", "function () {}");
    assert_eq!(source(&mut agent, anonymous), "(function () {})");
}

#[test]
fn functions_are_judged_by_their_current_name() {
    let mut agent = Agent::new(Options::default());
    let name_key = PropertyKey::from_str(&mut agent, "name");
    let rename = |agent: &mut Agent, f: Object, name: &str| {
        let desc = PropertyDescriptor {
            value: Some(Value::from_str(agent, name)),
            ..Default::default()
        };
        define_property_or_throw(agent, f, name_key, desc).unwrap();
    };

    let named = function_with_source(&mut agent, "f", "function f() {}");
    rename(&mut agent, named, "");
    assert_eq!(source(&mut agent, named), "(function f() {})");

    let anonymous = function_with_source(&mut agent, "", "function () {}");
    rename(&mut agent, anonymous, "g");
    assert_eq!(source(&mut agent, anonymous), "function () {}");
}

#[test]
fn symbols_serialize_through_object_prototype() {
    let mut agent = Agent::new(Options::default());
    let symbol = Symbol::new(&mut agent, Some("s"));
    assert_eq!(source(&mut agent, Value::Symbol(symbol)), "({})");
}

fn throwing_to_source(agent: &mut Agent, _: Value, _: ArgumentsList) -> JsResult<Value> {
    Err(agent.throw_exception(ExceptionType::Error, "no source"))
}

#[test]
fn throwing_hook_leaves_the_context_idle() {
    let mut agent = Agent::new(Options::default());
    let hook = create_builtin_function(
        &mut agent,
        Behaviour::Regular(throwing_to_source),
        BuiltinFunctionArgs::new(0, "toSource"),
    );
    let inner = object(&mut agent, &[("toSource", hook.into_value())]);
    let outer = object(&mut agent, &[("inner", inner.into_value())]);
    let error = uneval(&mut agent, outer.into_value()).unwrap_err();
    assert_eq!(error.to_string(&mut agent), "Error: no source");
    assert!(agent.source_context().is_idle());

    // A later, unrelated call is unaffected.
    let again = object(&mut agent, &[("x", outer.into_value())]);
    let key = PropertyKey::from_str(&mut agent, "inner");
    create_data_property_or_throw(&mut agent, outer, key, 1.into()).unwrap();
    assert_eq!(source(&mut agent, again), "({x:{inner:1}})");
}

fn nested_to_source(agent: &mut Agent, _: Value, _: ArgumentsList) -> JsResult<Value> {
    let prototype = agent.intrinsics().object_prototype();
    let o = ordinary_object_create(agent, Some(prototype));
    let key = PropertyKey::from_str(agent, "a");
    create_data_property_or_throw(agent, o, key, 1.into())?;
    uneval(agent, o.into_value()).map(Value::String)
}

#[test]
fn hooks_share_the_serialization_context() {
    let mut agent = Agent::new(Options::default());
    let hook = create_builtin_function(
        &mut agent,
        Behaviour::Regular(nested_to_source),
        BuiltinFunctionArgs::new(0, "toSource"),
    );
    let hooked = object(&mut agent, &[("toSource", hook.into_value())]);
    let outer = object(&mut agent, &[("x", hooked.into_value())]);
    assert_eq!(source(&mut agent, outer), "({x:{a:1}})");
    assert_eq!(source(&mut agent, hooked), "({a:1})");
}

#[test]
fn to_source_methods() {
    let mut agent = Agent::new(Options::default());
    let o = object(&mut agent, &[("k", 1.into())]);
    let key = PropertyKey::from_str(&mut agent, "toSource");
    let result = invoke(&mut agent, o.into_value(), key, None).unwrap();
    assert_eq!(result.to_display_string(&mut agent).unwrap(), "({k:1})");

    let global = agent.global_object();
    let uneval_key = PropertyKey::from_str(&mut agent, "uneval");
    let argument = create_array_from_list(&mut agent, &[Value::Null]);
    let result = invoke(
        &mut agent,
        global.into_value(),
        uneval_key,
        Some(ArgumentsList(&[argument.into_value()])),
    )
    .unwrap();
    assert_eq!(result.to_display_string(&mut agent).unwrap(), "[null]");
}

#[cfg(feature = "string-quote")]
#[test]
fn string_quote_method() {
    let mut agent = Agent::new(Options::default());
    let s = Value::from_str(&mut agent, "it's \"x\"\t\u{e9}");
    let key = PropertyKey::from_str(&mut agent, "quote");
    let quoted = invoke(&mut agent, s, key, None).unwrap();
    assert_eq!(
        quoted.to_display_string(&mut agent).unwrap(),
        r#""it's \"x\"\t\xE9""#
    );
    let error = invoke(&mut agent, Value::Null, key, None).unwrap_err();
    assert!(error.to_string(&mut agent).starts_with("TypeError"));
}
