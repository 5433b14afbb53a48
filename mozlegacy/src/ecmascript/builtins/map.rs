// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::ecmascript::{
    abstract_operations::testing_and_comparison::same_value_zero,
    builders::ordinary_object_builder::OrdinaryObjectBuilder,
    builtins::{ArgumentsList, Behaviour, Builtin, ordinary::ordinary_object_create_with_intrinsics},
    execution::{Agent, ExceptionType, JsResult, ProtoIntrinsics},
    types::{Object, ObjectKind, Value},
};

/// The \[\[MapData]] slot. Deleted entries leave a hole so that live
/// iterators keep their position.
#[derive(Debug, Clone, Default)]
pub struct MapHeapData {
    pub(crate) entries: Vec<Option<(Value, Value)>>,
}

impl MapHeapData {
    fn find(&self, key: Value) -> Option<usize> {
        self.entries.iter().position(|entry| {
            entry
                .as_ref()
                .is_some_and(|(existing, _)| same_value_zero(*existing, key))
        })
    }

    /// Live entries in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (Value, Value)> + '_ {
        self.entries.iter().flatten().copied()
    }
}

/// -0 is stored as +0.
pub(crate) fn canonicalize_keyed_collection_key(key: Value) -> Value {
    match key {
        Value::Number(n) if n == 0.0 => Value::Number(0.0),
        _ => key,
    }
}

pub fn map_create(agent: &mut Agent) -> Object {
    ordinary_object_create_with_intrinsics(
        agent,
        ProtoIntrinsics::Map,
        ObjectKind::Map(MapHeapData::default()),
    )
}

/// RequireInternalSlot(M, \[\[MapData]])
fn require_map(agent: &mut Agent, value: Value) -> JsResult<Object> {
    if let Value::Object(o) = value
        && matches!(agent[o].kind, ObjectKind::Map(_))
    {
        return Ok(o);
    }
    Err(agent.throw_exception(ExceptionType::TypeError, "Object is not a Map"))
}

fn map_data(agent: &mut Agent, map: Value) -> JsResult<&mut MapHeapData> {
    let map = require_map(agent, map)?;
    match &mut agent[map].kind {
        ObjectKind::Map(data) => Ok(data),
        _ => unreachable!(),
    }
}

/// ### [24.1.3.9 Map.prototype.set ( key, value )](https://tc39.es/ecma262/#sec-map.prototype.set)
pub fn map_set(agent: &mut Agent, map: Object, key: Value, value: Value) -> JsResult<()> {
    let data = map_data(agent, map.into_value())?;
    // 3. Set key to CanonicalizeKeyedCollectionKey(key).
    let key = canonicalize_keyed_collection_key(key);
    // 4. For each Record { [[Key]], [[Value]] } p of M.[[MapData]], do
    if let Some(index) = data.find(key) {
        // a. If p.[[Key]] is not empty and SameValue(p.[[Key]], key) is true, then
        // i. Set p.[[Value]] to value.
        data.entries[index] = Some((key, value));
    } else {
        // 5. Let p be the Record { [[Key]]: key, [[Value]]: value }.
        // 6. Append p to M.[[MapData]].
        data.entries.push(Some((key, value)));
    }
    Ok(())
}

/// ### [24.1.3.6 Map.prototype.get ( key )](https://tc39.es/ecma262/#sec-map.prototype.get)
pub fn map_get(agent: &mut Agent, map: Object, key: Value) -> JsResult<Value> {
    let data = map_data(agent, map.into_value())?;
    let key = canonicalize_keyed_collection_key(key);
    Ok(data
        .find(key)
        .and_then(|index| data.entries[index])
        .map_or(Value::Undefined, |(_, value)| value))
}

/// ### [24.1.3.7 Map.prototype.has ( key )](https://tc39.es/ecma262/#sec-map.prototype.has)
pub fn map_has(agent: &mut Agent, map: Object, key: Value) -> JsResult<bool> {
    let data = map_data(agent, map.into_value())?;
    Ok(data.find(canonicalize_keyed_collection_key(key)).is_some())
}

/// ### [24.1.3.3 Map.prototype.delete ( key )](https://tc39.es/ecma262/#sec-map.prototype.delete)
pub fn map_delete(agent: &mut Agent, map: Object, key: Value) -> JsResult<bool> {
    let data = map_data(agent, map.into_value())?;
    match data.find(canonicalize_keyed_collection_key(key)) {
        Some(index) => {
            // i. Set p.[[Key]] to empty.
            // ii. Set p.[[Value]] to empty.
            data.entries[index] = None;
            Ok(true)
        }
        None => Ok(false),
    }
}

pub(crate) struct MapPrototype;

struct MapPrototypeDelete;
impl Builtin for MapPrototypeDelete {
    const NAME: &'static str = "delete";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(MapPrototype::delete);
}

struct MapPrototypeGet;
impl Builtin for MapPrototypeGet {
    const NAME: &'static str = "get";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(MapPrototype::get);
}

struct MapPrototypeHas;
impl Builtin for MapPrototypeHas {
    const NAME: &'static str = "has";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(MapPrototype::has);
}

struct MapPrototypeSet;
impl Builtin for MapPrototypeSet {
    const NAME: &'static str = "set";
    const LENGTH: u8 = 2;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(MapPrototype::set);
}

impl MapPrototype {
    fn delete(agent: &mut Agent, this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        let m = require_map(agent, this_value)?;
        map_delete(agent, m, arguments.get(0)).map(Value::Boolean)
    }

    fn get(agent: &mut Agent, this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        let m = require_map(agent, this_value)?;
        map_get(agent, m, arguments.get(0))
    }

    fn has(agent: &mut Agent, this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        let m = require_map(agent, this_value)?;
        map_has(agent, m, arguments.get(0)).map(Value::Boolean)
    }

    fn set(agent: &mut Agent, this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        let m = require_map(agent, this_value)?;
        map_set(agent, m, arguments.get(0), arguments.get(1))?;
        // 7. Return M.
        Ok(this_value)
    }

    pub(crate) fn create_intrinsic(agent: &mut Agent) {
        let this = agent.intrinsics().map_prototype();
        OrdinaryObjectBuilder::new_intrinsic_object(agent, this)
            .with_property_capacity(4)
            .with_builtin_function_property::<MapPrototypeDelete>()
            .with_builtin_function_property::<MapPrototypeGet>()
            .with_builtin_function_property::<MapPrototypeHas>()
            .with_builtin_function_property::<MapPrototypeSet>()
            .build();
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ecmascript::execution::Options;

    #[test]
    fn zero_keys_are_the_same_entry() {
        let mut agent = Agent::new(Options::default());
        let map = map_create(&mut agent);
        map_set(&mut agent, map, Value::Number(-0.0), 1.into()).unwrap();
        map_set(&mut agent, map, Value::Number(0.0), 2.into()).unwrap();
        assert_eq!(
            map_get(&mut agent, map, Value::Number(-0.0)).unwrap(),
            Value::Number(2.0)
        );
        let ObjectKind::Map(data) = &agent[map].kind else {
            unreachable!()
        };
        assert_eq!(data.entries().count(), 1);
    }

    #[test]
    fn deleted_entries_leave_holes() {
        let mut agent = Agent::new(Options::default());
        let map = map_create(&mut agent);
        map_set(&mut agent, map, 1.into(), 1.into()).unwrap();
        map_set(&mut agent, map, 2.into(), 2.into()).unwrap();
        assert!(map_delete(&mut agent, map, 1.into()).unwrap());
        assert!(!map_has(&mut agent, map, 1.into()).unwrap());
        let ObjectKind::Map(data) = &agent[map].kind else {
            unreachable!()
        };
        assert_eq!(data.entries.len(), 2);
    }
}
