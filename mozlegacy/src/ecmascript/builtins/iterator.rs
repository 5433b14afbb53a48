// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Host iterators over lists, arrays, strings, keyed collections and object
//! keys. All of them share %ListIteratorPrototype% and the same state
//! machine: a fresh iterator becomes active on its first step and stays
//! exhausted once it reports completion.

use crate::ecmascript::{
    abstract_operations::{
        operations_on_iterator_objects::create_iter_result_object,
        operations_on_objects::{
            create_array_from_list, get, has_own_property, length_of_array_like,
        },
    },
    builders::ordinary_object_builder::OrdinaryObjectBuilder,
    builtins::{ArgumentsList, Behaviour, Builtin},
    execution::{Agent, ExceptionType, JsResult},
    types::{Object, ObjectHeapData, ObjectKind, PropertyKey, String, Value},
};
use crate::heap::CreateHeapData;

/// What an iterator walks over.
#[derive(Debug, Clone)]
pub enum IterationSource {
    /// A materialised list of values.
    List(Vec<Value>),
    /// Array elements; the length is re-read on every step.
    ArrayValues(Object),
    /// Indexes `0..len` with `len` fixed at creation.
    ArrayKeys { len: u32 },
    /// `[index, array[index]]` pairs for indexes `0..len`.
    ArrayEntries { array: Object, len: u32 },
    /// The code units of a string, each as a one-unit string.
    StringCodeUnits(String),
    /// Snapshotted keys, skipping those deleted before they are reached.
    ObjectKeys { object: Object, keys: Vec<PropertyKey> },
    /// `[key, object[key]]` pairs for snapshotted keys.
    ObjectEntries { object: Object, keys: Vec<PropertyKey> },
    /// Live `[key, value]` entries of a Map.
    MapEntries(Object),
    /// Live values of a Set.
    SetValues(Object),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IteratorState {
    #[default]
    Fresh,
    Active {
        cursor: usize,
    },
    Exhausted,
}

#[derive(Debug, Clone)]
pub struct IteratorHeapData {
    pub(crate) source: IterationSource,
    pub(crate) state: IteratorState,
}

impl IteratorHeapData {
    pub(crate) fn new(source: IterationSource) -> Self {
        Self {
            source,
            state: IteratorState::Fresh,
        }
    }

    pub fn state(&self) -> IteratorState {
        self.state
    }
}

/// Creates an iterator object inheriting from %ListIteratorPrototype%.
pub fn create_list_iterator(agent: &mut Agent, source: IterationSource) -> Object {
    let prototype = agent.intrinsics().list_iterator_prototype();
    agent.heap.create(ObjectHeapData::new(
        Some(prototype),
        ObjectKind::Iterator(IteratorHeapData::new(source)),
    ))
}

/// The element under the cursor, read without calling into script.
enum Element {
    End,
    Hole,
    Value(Value),
    CodeUnit(u16),
    LiveArrayElement(Object),
    ArrayEntry(Object),
    OwnKey {
        object: Object,
        key: PropertyKey,
        entry: bool,
    },
    Pair(Value, Value),
}

fn element_at(source: &IterationSource, agent: &Agent, cursor: usize) -> Element {
    match source {
        IterationSource::List(values) => values.get(cursor).map_or(Element::End, |v| Element::Value(*v)),
        IterationSource::ArrayValues(array) => Element::LiveArrayElement(*array),
        IterationSource::ArrayKeys { len } => {
            if cursor < *len as usize {
                Element::Value(Value::Number(cursor as f64))
            } else {
                Element::End
            }
        }
        IterationSource::ArrayEntries { array, len } => {
            if cursor < *len as usize {
                Element::ArrayEntry(*array)
            } else {
                Element::End
            }
        }
        IterationSource::StringCodeUnits(string) => string
            .code_unit_at(agent, cursor)
            .map_or(Element::End, Element::CodeUnit),
        IterationSource::ObjectKeys { object, keys } => {
            keys.get(cursor).map_or(Element::End, |key| Element::OwnKey {
                object: *object,
                key: *key,
                entry: false,
            })
        }
        IterationSource::ObjectEntries { object, keys } => {
            keys.get(cursor).map_or(Element::End, |key| Element::OwnKey {
                object: *object,
                key: *key,
                entry: true,
            })
        }
        IterationSource::MapEntries(map) => match &agent[*map].kind {
            ObjectKind::Map(data) => match data.entries.get(cursor) {
                Some(Some((key, value))) => Element::Pair(*key, *value),
                Some(None) => Element::Hole,
                None => Element::End,
            },
            _ => Element::End,
        },
        IterationSource::SetValues(set) => match &agent[*set].kind {
            ObjectKind::Set(data) => match data.values.get(cursor) {
                Some(Some(value)) => Element::Value(*value),
                Some(None) => Element::Hole,
                None => Element::End,
            },
            _ => Element::End,
        },
    }
}

fn set_state(agent: &mut Agent, iterator: Object, state: IteratorState) {
    if let ObjectKind::Iterator(data) = &mut agent[iterator].kind {
        data.state = state;
    }
}

/// Advances a host iterator and returns its next `{ value, done }` result.
pub fn iterator_advance(agent: &mut Agent, iterator: Object) -> JsResult<Object> {
    loop {
        let (cursor, element) = {
            let ObjectKind::Iterator(data) = &agent[iterator].kind else {
                return Err(agent.throw_exception(
                    ExceptionType::TypeError,
                    "next called on an incompatible receiver",
                ));
            };
            let cursor = match data.state {
                IteratorState::Fresh => 0,
                IteratorState::Active { cursor } => cursor,
                IteratorState::Exhausted => {
                    return Ok(create_iter_result_object(agent, Value::Undefined, true));
                }
            };
            (cursor, element_at(&data.source, agent, cursor))
        };
        let next = IteratorState::Active { cursor: cursor + 1 };
        let value = match element {
            Element::End => {
                set_state(agent, iterator, IteratorState::Exhausted);
                return Ok(create_iter_result_object(agent, Value::Undefined, true));
            }
            Element::Hole => {
                set_state(agent, iterator, next);
                continue;
            }
            Element::Value(value) => {
                set_state(agent, iterator, next);
                value
            }
            Element::CodeUnit(code_unit) => {
                set_state(agent, iterator, next);
                Value::String(String::from_code_units(agent, &[code_unit]))
            }
            Element::LiveArrayElement(array) => {
                let len = length_of_array_like(agent, array)?;
                if cursor as u64 >= len {
                    set_state(agent, iterator, IteratorState::Exhausted);
                    return Ok(create_iter_result_object(agent, Value::Undefined, true));
                }
                set_state(agent, iterator, next);
                get(agent, array, PropertyKey::from(cursor as u32))?
            }
            Element::ArrayEntry(array) => {
                set_state(agent, iterator, next);
                let value = get(agent, array, PropertyKey::from(cursor as u32))?;
                create_array_from_list(agent, &[Value::Number(cursor as f64), value]).into_value()
            }
            Element::OwnKey { object, key, entry } => {
                set_state(agent, iterator, next);
                if !has_own_property(agent, object, key)? {
                    continue;
                }
                let key_value = key.into_value(agent);
                if entry {
                    let value = get(agent, object, key)?;
                    create_array_from_list(agent, &[key_value, value]).into_value()
                } else {
                    key_value
                }
            }
            Element::Pair(key, value) => {
                set_state(agent, iterator, next);
                create_array_from_list(agent, &[key, value]).into_value()
            }
        };
        return Ok(create_iter_result_object(agent, value, false));
    }
}

pub(crate) struct ListIteratorPrototype;

struct ListIteratorPrototypeNext;
impl Builtin for ListIteratorPrototypeNext {
    const NAME: &'static str = "next";
    const LENGTH: u8 = 0;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ListIteratorPrototype::next);
}

impl ListIteratorPrototype {
    fn next(agent: &mut Agent, this_value: Value, _: ArgumentsList) -> JsResult<Value> {
        let Ok(iterator) = Object::try_from(this_value) else {
            return Err(agent.throw_exception(
                ExceptionType::TypeError,
                "next called on an incompatible receiver",
            ));
        };
        iterator_advance(agent, iterator).map(Value::Object)
    }

    pub(crate) fn create_intrinsic(agent: &mut Agent) {
        let this = agent.intrinsics().list_iterator_prototype();
        OrdinaryObjectBuilder::new_intrinsic_object(agent, this)
            .with_property_capacity(1)
            .with_builtin_function_property::<ListIteratorPrototypeNext>()
            .build();
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ecmascript::{
        abstract_operations::operations_on_iterator_objects::{
            iterator_complete, iterator_to_list,
        },
        execution::Options,
    };

    #[test]
    fn exhausted_iterators_stay_exhausted() {
        let mut agent = Agent::new(Options::default());
        let iterator = create_list_iterator(&mut agent, IterationSource::List(vec![1.into()]));
        let first = iterator_advance(&mut agent, iterator).unwrap();
        assert!(!iterator_complete(&mut agent, first).unwrap());
        for _ in 0..3 {
            let result = iterator_advance(&mut agent, iterator).unwrap();
            assert!(iterator_complete(&mut agent, result).unwrap());
        }
        let ObjectKind::Iterator(data) = &agent[iterator].kind else {
            unreachable!()
        };
        assert_eq!(data.state(), IteratorState::Exhausted);
    }

    #[test]
    fn string_iterators_yield_code_units() {
        let mut agent = Agent::new(Options::default());
        let string = String::from_str(&mut agent, "ab");
        let iterator = create_list_iterator(&mut agent, IterationSource::StringCodeUnits(string));
        let values = iterator_to_list(&mut agent, iterator).unwrap();
        let a = Value::from_str(&mut agent, "a");
        let b = Value::from_str(&mut agent, "b");
        assert_eq!(values, vec![a, b]);
    }
}
