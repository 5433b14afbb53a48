// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The legacy `Iterator` global and the `iterator()` protocol.
//!
//! An iteration object is any object with an own property keyed by the
//! realm's private next symbol. `Iterator.prototype.next` delegates to that
//! property, and `Object.prototype[@@iterator]` bridges the legacy
//! `iterator()` method to the modern protocol.

use std::rc::Rc;

use super::{LegacyIntrinsics, legacy_intrinsics};
use crate::{
    ecmascript::{
        abstract_operations::{
            operations_on_objects::{
                enumerable_own_keys, get_v, has_own_property, invoke, length_of_array_like,
            },
            testing_and_comparison::is_array,
            type_conversion::{to_boolean, to_object, to_string},
        },
        builders::ordinary_object_builder::OrdinaryObjectBuilder,
        builtins::{
            ArgumentsList, Behaviour, Builtin, BuiltinFunctionArgs, BuiltinGetter,
            IterationSource, IteratorHeapData, TrapTable, create_builtin_function, create_proxy,
            iterator::iterator_advance,
        },
        execution::{Agent, ExceptionType, JsResult},
        types::{
            Object, ObjectHeapData, ObjectKind, PropertyKey, StoredProperty, Symbol, Value,
        },
    },
    heap::CreateHeapData,
};

/// Creates an object that iterates over `source` and carries its own next
/// capability.
fn create_iteration_object(
    agent: &mut Agent,
    prototype: Object,
    next_symbol: Symbol,
    source: IterationSource,
) -> Object {
    let object = agent.heap.create(ObjectHeapData::new(
        Some(prototype),
        ObjectKind::Iterator(IteratorHeapData::new(source)),
    ));
    let next = create_builtin_function(
        agent,
        Behaviour::Closure(Rc::new(move |agent, _, _| {
            iterator_advance(agent, object).map(Value::Object)
        })),
        BuiltinFunctionArgs::new(0, "next"),
    );
    agent[object].properties.insert(
        PropertyKey::Symbol(next_symbol),
        StoredProperty::data(next.into_value(), false, false, false),
    );
    object
}

/// Wraps an iteration object so that enumerating it yields its own
/// sequence.
fn create_enumerable_iterator(agent: &mut Agent, source: IterationSource) -> Object {
    let LegacyIntrinsics {
        next_symbol,
        iterator_prototype,
        ..
    } = legacy_intrinsics(agent);
    let instance = create_iteration_object(agent, iterator_prototype, next_symbol, source);
    create_proxy(
        agent,
        instance,
        TrapTable {
            enumerate: Some(Rc::new(|_, target| Ok(target))),
            ..Default::default()
        },
    )
}

/// `Iterator ( obj [ , keysOnly ] )`
///
/// Arrays iterate over their indexes, or `[index, value]` pairs, up to the
/// length they had at creation. Other values are converted to objects and
/// iterate over the enumerable own string keys they had at creation, or
/// `[key, value]` pairs. Values are read when the iterator reaches them.
pub fn create_shim_iterator(agent: &mut Agent, obj: Value, keys_only: bool) -> JsResult<Object> {
    let source = match obj {
        Value::Object(array) if is_array(agent, obj)? => {
            let len = u32::try_from(length_of_array_like(agent, array)?).unwrap_or(u32::MAX);
            if keys_only {
                IterationSource::ArrayKeys { len }
            } else {
                IterationSource::ArrayEntries { array, len }
            }
        }
        _ => {
            let object = to_object(agent, obj)?;
            let keys = enumerable_own_keys(agent, object)?;
            if keys_only {
                IterationSource::ObjectKeys { object, keys }
            } else {
                IterationSource::ObjectEntries { object, keys }
            }
        }
    };
    Ok(create_enumerable_iterator(agent, source))
}

/// Returns true if `value` has the private next capability as an own
/// property.
pub fn is_iteration_object(agent: &mut Agent, value: Value) -> JsResult<bool> {
    let Value::Object(object) = value else {
        return Ok(false);
    };
    let next_symbol = legacy_intrinsics(agent).next_symbol;
    has_own_property(agent, object, PropertyKey::Symbol(next_symbol))
}

/// Allocates %Iterator.prototype% and the `Iterator` constructor. Their
/// properties are installed by [`IteratorShim::install`].
pub(crate) fn allocate(agent: &mut Agent) -> LegacyIntrinsics {
    let next_symbol = Symbol::new(agent, Some("next"));
    let object_prototype = agent.intrinsics().object_prototype();
    let iterator_prototype = create_iteration_object(
        agent,
        object_prototype,
        next_symbol,
        IterationSource::List(Vec::new()),
    );
    let iterator_constructor = create_builtin_function(
        agent,
        Behaviour::Constructor(IteratorShim::constructor),
        BuiltinFunctionArgs::new(2, "Iterator"),
    );
    LegacyIntrinsics {
        next_symbol,
        iterator_prototype,
        iterator_constructor,
    }
}

struct IteratorPrototypeNext;
impl Builtin for IteratorPrototypeNext {
    const NAME: &'static str = "next";
    const LENGTH: u8 = 0;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(IteratorShim::next);
}

struct IteratorPrototypeIterator;
impl Builtin for IteratorPrototypeIterator {
    const NAME: &'static str = "iterator";
    const LENGTH: u8 = 0;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(IteratorShim::iterator);
}

struct ArrayPrototypeIterator;
impl Builtin for ArrayPrototypeIterator {
    const NAME: &'static str = "iterator";
    const LENGTH: u8 = 0;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(IteratorShim::array_values);
}

struct StringPrototypeIterator;
impl Builtin for StringPrototypeIterator {
    const NAME: &'static str = "iterator";
    const LENGTH: u8 = 0;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(IteratorShim::string_code_units);
}

struct MapPrototypeIterator;
impl Builtin for MapPrototypeIterator {
    const NAME: &'static str = "iterator";
    const LENGTH: u8 = 0;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(IteratorShim::map_entries);
}

struct SetPrototypeIterator;
impl Builtin for SetPrototypeIterator {
    const NAME: &'static str = "iterator";
    const LENGTH: u8 = 0;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(IteratorShim::set_values);
}

struct ObjectPrototypeGetIterator;
impl Builtin for ObjectPrototypeGetIterator {
    const NAME: &'static str = "[Symbol.iterator]";
    const KEY: Option<PropertyKey> = Some(PropertyKey::Symbol(Symbol::iterator()));
    const LENGTH: u8 = 0;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(IteratorShim::get_iterator);
    const CONFIGURABLE: bool = false;
}
impl BuiltinGetter for ObjectPrototypeGetIterator {}

pub(crate) struct IteratorShim;

impl IteratorShim {
    fn constructor(
        agent: &mut Agent,
        _: Value,
        arguments: ArgumentsList,
        _: Option<Object>,
    ) -> JsResult<Value> {
        let keys_only = to_boolean(agent, arguments.get(1));
        create_shim_iterator(agent, arguments.get(0), keys_only).map(Value::Object)
    }

    /// `Iterator.prototype.next ( )`
    fn next(agent: &mut Agent, this_value: Value, _: ArgumentsList) -> JsResult<Value> {
        // 1. If this value is not an iteration object, throw a TypeError exception.
        if !is_iteration_object(agent, this_value)? {
            return Err(agent.throw_exception(
                ExceptionType::TypeError,
                "Iterator.prototype.next called on an incompatible receiver",
            ));
        }
        // 2. Return ? Invoke(this value, @@next).
        let next_symbol = legacy_intrinsics(agent).next_symbol;
        invoke(agent, this_value, PropertyKey::Symbol(next_symbol), None)
    }

    /// `Iterator.prototype.iterator ( )`
    fn iterator(_: &mut Agent, this_value: Value, _: ArgumentsList) -> JsResult<Value> {
        Ok(this_value)
    }

    /// `Array.prototype.iterator ( )`
    fn array_values(agent: &mut Agent, this_value: Value, _: ArgumentsList) -> JsResult<Value> {
        let array = to_object(agent, this_value)?;
        Ok(create_enumerable_iterator(agent, IterationSource::ArrayValues(array)).into_value())
    }

    /// `String.prototype.iterator ( )`
    fn string_code_units(
        agent: &mut Agent,
        this_value: Value,
        _: ArgumentsList,
    ) -> JsResult<Value> {
        if this_value.is_nullish() {
            return Err(agent.throw_exception(
                ExceptionType::TypeError,
                "String.prototype.iterator called on null or undefined",
            ));
        }
        let string = to_string(agent, this_value)?;
        Ok(create_enumerable_iterator(agent, IterationSource::StringCodeUnits(string)).into_value())
    }

    /// `Map.prototype.iterator ( )`
    fn map_entries(agent: &mut Agent, this_value: Value, _: ArgumentsList) -> JsResult<Value> {
        match this_value {
            Value::Object(map) if matches!(agent[map].kind, ObjectKind::Map(_)) => {
                Ok(create_enumerable_iterator(agent, IterationSource::MapEntries(map)).into_value())
            }
            _ => Err(agent.throw_exception(
                ExceptionType::TypeError,
                "Map.prototype.iterator called on incompatible receiver",
            )),
        }
    }

    /// `Set.prototype.iterator ( )`
    fn set_values(agent: &mut Agent, this_value: Value, _: ArgumentsList) -> JsResult<Value> {
        match this_value {
            Value::Object(set) if matches!(agent[set].kind, ObjectKind::Set(_)) => {
                Ok(create_enumerable_iterator(agent, IterationSource::SetValues(set)).into_value())
            }
            _ => Err(agent.throw_exception(
                ExceptionType::TypeError,
                "Set.prototype.iterator called on incompatible receiver",
            )),
        }
    }

    /// `get Object.prototype [ @@iterator ]`
    ///
    /// Returns `this.iterator`, so any object with a legacy `iterator()`
    /// method can be iterated with the modern protocol.
    fn get_iterator(agent: &mut Agent, this_value: Value, _: ArgumentsList) -> JsResult<Value> {
        let key = PropertyKey::from_str(agent, "iterator");
        get_v(agent, this_value, key)
    }

    pub(crate) fn install(agent: &mut Agent, legacy: LegacyIntrinsics) {
        let intrinsics = agent.intrinsics();
        let LegacyIntrinsics {
            iterator_prototype,
            iterator_constructor,
            ..
        } = legacy;

        let prototype_key = PropertyKey::from_str(agent, "prototype");
        agent[iterator_constructor].properties.insert(
            prototype_key,
            StoredProperty::data(iterator_prototype.into_value(), false, false, false),
        );
        let constructor_key = PropertyKey::from_str(agent, "constructor");
        OrdinaryObjectBuilder::new_intrinsic_object(agent, iterator_prototype)
            .with_property_capacity(3)
            .with_builtin_function_property::<IteratorPrototypeNext>()
            .with_builtin_function_property::<IteratorPrototypeIterator>()
            .with_data_property(constructor_key, iterator_constructor.into_value())
            .build();

        let iterator_key = PropertyKey::from_str(agent, "Iterator");
        OrdinaryObjectBuilder::new_intrinsic_object(agent, intrinsics.global_object())
            .with_data_property(iterator_key, iterator_constructor.into_value())
            .build();
        OrdinaryObjectBuilder::new_intrinsic_object(agent, intrinsics.array_prototype())
            .with_builtin_function_property::<ArrayPrototypeIterator>()
            .build();
        OrdinaryObjectBuilder::new_intrinsic_object(agent, intrinsics.string_prototype())
            .with_builtin_function_property::<StringPrototypeIterator>()
            .build();
        OrdinaryObjectBuilder::new_intrinsic_object(agent, intrinsics.map_prototype())
            .with_builtin_function_property::<MapPrototypeIterator>()
            .build();
        OrdinaryObjectBuilder::new_intrinsic_object(agent, intrinsics.set_prototype())
            .with_builtin_function_property::<SetPrototypeIterator>()
            .build();
        OrdinaryObjectBuilder::new_intrinsic_object(agent, intrinsics.object_prototype())
            .with_builtin_function_getter_property::<ObjectPrototypeGetIterator>()
            .build();

        // Host iterators answer to the legacy protocol as well.
        agent[intrinsics.list_iterator_prototype()].prototype = Some(iterator_prototype);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ecmascript::{
        abstract_operations::operations_on_iterator_objects::{get_iterator, iterator_to_list},
        execution::Options,
    };

    #[test]
    fn list_iterators_inherit_the_legacy_prototype() {
        let mut agent = Agent::new(Options::default());
        let legacy = legacy_intrinsics(&mut agent);
        let list_iterator_prototype = agent.intrinsics().list_iterator_prototype();
        assert_eq!(
            agent[list_iterator_prototype].prototype,
            Some(legacy.iterator_prototype)
        );
    }

    #[test]
    fn iterator_prototype_is_an_empty_iteration_object() {
        let mut agent = Agent::new(Options::default());
        let prototype = legacy_intrinsics(&mut agent).iterator_prototype;
        assert!(is_iteration_object(&mut agent, prototype.into_value()).unwrap());
        let record = get_iterator(&mut agent, prototype.into_value()).unwrap();
        assert!(iterator_to_list(&mut agent, record).unwrap().is_empty());
    }
}
