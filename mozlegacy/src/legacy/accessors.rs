// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `Object.prototype.__defineGetter__` and friends.

use ahash::AHashSet;

use crate::ecmascript::{
    abstract_operations::{
        operations_on_objects::define_property_or_throw,
        testing_and_comparison::is_callable,
        type_conversion::{to_object, to_property_key},
    },
    builders::ordinary_object_builder::OrdinaryObjectBuilder,
    builtins::{ArgumentsList, Behaviour, Builtin},
    execution::{Agent, ExceptionType, JsResult},
    types::{InternalMethods, Object, PropertyDescriptor, Value},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AccessorHalf {
    Getter,
    Setter,
}

impl AccessorHalf {
    fn descriptor(self, function: Option<Object>) -> PropertyDescriptor {
        let mut desc = PropertyDescriptor {
            enumerable: Some(true),
            configurable: Some(true),
            ..Default::default()
        };
        match self {
            AccessorHalf::Getter => desc.get = Some(function),
            AccessorHalf::Setter => desc.set = Some(function),
        }
        desc
    }

    fn pick(self, desc: &PropertyDescriptor) -> Option<Object> {
        match self {
            AccessorHalf::Getter => desc.get.flatten(),
            AccessorHalf::Setter => desc.set.flatten(),
        }
    }
}

/// The receiver of the define methods: the global object stands in for
/// null and undefined.
fn define_target(agent: &mut Agent, this_value: Value) -> JsResult<Object> {
    if this_value.is_nullish() {
        return Ok(agent.global_object());
    }
    to_object(agent, this_value)
}

fn define_accessor(
    agent: &mut Agent,
    this_value: Value,
    arguments: ArgumentsList,
    half: AccessorHalf,
) -> JsResult<Value> {
    // 1. Let O be ? ToObject(this value).
    let o = define_target(agent, this_value)?;
    // 2. If IsCallable(getter) is false, throw a TypeError exception.
    let function = match arguments.get(1) {
        Value::Undefined => None,
        function => match is_callable(agent, function) {
            Some(function) => Some(function),
            None => {
                return Err(agent.throw_exception(
                    ExceptionType::TypeError,
                    "accessor function is not callable",
                ));
            }
        },
    };
    // 3. Let desc be PropertyDescriptor { [[Get]]: getter, [[Enumerable]]: true,
    //    [[Configurable]]: true }.
    let desc = half.descriptor(function);
    // 4. Let key be ? ToPropertyKey(P).
    let key = to_property_key(agent, arguments.get(0))?;
    // 5. Perform ? DefinePropertyOrThrow(O, key, desc).
    define_property_or_throw(agent, o, key, desc)?;
    // 6. Return undefined.
    Ok(Value::Undefined)
}

/// Collects `o` and its prototypes, stopping at a cycle.
fn ancestors(agent: &mut Agent, o: Object) -> JsResult<Vec<Object>> {
    let mut chain = Vec::new();
    let mut seen = AHashSet::new();
    let mut current = Some(o);
    while let Some(object) = current {
        if !seen.insert(object) {
            break;
        }
        chain.push(object);
        current = object.internal_get_prototype_of(agent)?;
    }
    Ok(chain)
}

fn lookup_accessor(
    agent: &mut Agent,
    this_value: Value,
    arguments: ArgumentsList,
    half: AccessorHalf,
) -> JsResult<Value> {
    // 1. Let O be ? ToObject(this value).
    let o = to_object(agent, this_value)?;
    // 2. Let key be ? ToPropertyKey(P).
    let key = to_property_key(agent, arguments.get(0))?;
    // 3. Repeat, for O and each of its prototypes,
    for object in ancestors(agent, o)? {
        // a. Let desc be ? O.[[GetOwnProperty]](key).
        let Some(desc) = object.internal_get_own_property(agent, key)? else {
            continue;
        };
        // b. If IsAccessorDescriptor(desc) is true and the half is present, return it.
        if desc.is_accessor_descriptor()
            && let Some(function) = half.pick(&desc)
        {
            return Ok(function.into_value());
        }
    }
    // 4. Return undefined.
    Ok(Value::Undefined)
}

struct ObjectPrototypeDefineGetter;
impl Builtin for ObjectPrototypeDefineGetter {
    const NAME: &'static str = "__defineGetter__";
    const LENGTH: u8 = 2;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(LegacyAccessors::define_getter);
}

struct ObjectPrototypeDefineSetter;
impl Builtin for ObjectPrototypeDefineSetter {
    const NAME: &'static str = "__defineSetter__";
    const LENGTH: u8 = 2;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(LegacyAccessors::define_setter);
}

struct ObjectPrototypeLookupGetter;
impl Builtin for ObjectPrototypeLookupGetter {
    const NAME: &'static str = "__lookupGetter__";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(LegacyAccessors::lookup_getter);
}

struct ObjectPrototypeLookupSetter;
impl Builtin for ObjectPrototypeLookupSetter {
    const NAME: &'static str = "__lookupSetter__";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(LegacyAccessors::lookup_setter);
}

pub(crate) struct LegacyAccessors;

impl LegacyAccessors {
    fn define_getter(
        agent: &mut Agent,
        this_value: Value,
        arguments: ArgumentsList,
    ) -> JsResult<Value> {
        define_accessor(agent, this_value, arguments, AccessorHalf::Getter)
    }

    fn define_setter(
        agent: &mut Agent,
        this_value: Value,
        arguments: ArgumentsList,
    ) -> JsResult<Value> {
        define_accessor(agent, this_value, arguments, AccessorHalf::Setter)
    }

    fn lookup_getter(
        agent: &mut Agent,
        this_value: Value,
        arguments: ArgumentsList,
    ) -> JsResult<Value> {
        lookup_accessor(agent, this_value, arguments, AccessorHalf::Getter)
    }

    fn lookup_setter(
        agent: &mut Agent,
        this_value: Value,
        arguments: ArgumentsList,
    ) -> JsResult<Value> {
        lookup_accessor(agent, this_value, arguments, AccessorHalf::Setter)
    }

    pub(crate) fn install(agent: &mut Agent) {
        let this = agent.intrinsics().object_prototype();
        OrdinaryObjectBuilder::new_intrinsic_object(agent, this)
            .with_property_capacity(4)
            .with_builtin_function_property::<ObjectPrototypeDefineGetter>()
            .with_builtin_function_property::<ObjectPrototypeDefineSetter>()
            .with_builtin_function_property::<ObjectPrototypeLookupGetter>()
            .with_builtin_function_property::<ObjectPrototypeLookupSetter>()
            .build();
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ecmascript::{
        builtins::ordinary::ordinary_object_create, execution::Options, types::PropertyKey,
    };

    #[test]
    fn ancestors_stop_at_the_end_of_the_chain() {
        let mut agent = Agent::new(Options::default());
        let object_prototype = agent.intrinsics().object_prototype();
        let parent = ordinary_object_create(&mut agent, Some(object_prototype));
        let child = ordinary_object_create(&mut agent, Some(parent));
        let chain = ancestors(&mut agent, child).unwrap();
        assert_eq!(chain, vec![child, parent, object_prototype]);
    }

    #[test]
    fn data_properties_do_not_hide_inherited_accessors() {
        let mut agent = Agent::new(Options::default());
        let object_prototype = agent.intrinsics().object_prototype();
        let getter = agent.intrinsics().function_prototype();
        let parent = ordinary_object_create(&mut agent, Some(object_prototype));
        let child = ordinary_object_create(&mut agent, Some(parent));
        let key = PropertyKey::from_str(&mut agent, "x");
        let accessor = AccessorHalf::Getter.descriptor(Some(getter));
        define_property_or_throw(&mut agent, parent, key, accessor).unwrap();
        let data = PropertyDescriptor::new_data_descriptor(1);
        define_property_or_throw(&mut agent, child, key, data).unwrap();
        let name = key.into_value(&mut agent);
        let found = lookup_accessor(
            &mut agent,
            child.into_value(),
            ArgumentsList(&[name]),
            AccessorHalf::Getter,
        )
        .unwrap();
        assert_eq!(found, getter.into_value());
    }
}
