// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::ecmascript::{
    abstract_operations::testing_and_comparison::same_value_zero,
    builders::ordinary_object_builder::OrdinaryObjectBuilder,
    builtins::{
        ArgumentsList, Behaviour, Builtin, map::canonicalize_keyed_collection_key,
        ordinary::ordinary_object_create_with_intrinsics,
    },
    execution::{Agent, ExceptionType, JsResult, ProtoIntrinsics},
    types::{Object, ObjectKind, Value},
};

/// The \[\[SetData]] slot. Deleted values leave a hole so that live
/// iterators keep their position.
#[derive(Debug, Clone, Default)]
pub struct SetHeapData {
    pub(crate) values: Vec<Option<Value>>,
}

impl SetHeapData {
    fn find(&self, value: Value) -> Option<usize> {
        self.values
            .iter()
            .position(|entry| entry.is_some_and(|existing| same_value_zero(existing, value)))
    }

    /// Live values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = Value> + '_ {
        self.values.iter().flatten().copied()
    }
}

pub fn set_create(agent: &mut Agent) -> Object {
    ordinary_object_create_with_intrinsics(
        agent,
        ProtoIntrinsics::Set,
        ObjectKind::Set(SetHeapData::default()),
    )
}

/// RequireInternalSlot(S, \[\[SetData]])
fn require_set(agent: &mut Agent, value: Value) -> JsResult<Object> {
    if let Value::Object(o) = value
        && matches!(agent[o].kind, ObjectKind::Set(_))
    {
        return Ok(o);
    }
    Err(agent.throw_exception(ExceptionType::TypeError, "Object is not a Set"))
}

fn set_data(agent: &mut Agent, set: Value) -> JsResult<&mut SetHeapData> {
    let set = require_set(agent, set)?;
    match &mut agent[set].kind {
        ObjectKind::Set(data) => Ok(data),
        _ => unreachable!(),
    }
}

/// ### [24.2.4.1 Set.prototype.add ( value )](https://tc39.es/ecma262/#sec-set.prototype.add)
pub fn set_add(agent: &mut Agent, set: Object, value: Value) -> JsResult<()> {
    let data = set_data(agent, set.into_value())?;
    // 3. Set value to CanonicalizeKeyedCollectionKey(value).
    let value = canonicalize_keyed_collection_key(value);
    // 4. For each element e of S.[[SetData]], do
    // a. If e is not empty and SameValue(e, value) is true, then
    if data.find(value).is_none() {
        // 5. Append value to S.[[SetData]].
        data.values.push(Some(value));
    }
    Ok(())
}

/// ### [24.2.4.8 Set.prototype.has ( value )](https://tc39.es/ecma262/#sec-set.prototype.has)
pub fn set_has(agent: &mut Agent, set: Object, value: Value) -> JsResult<bool> {
    let data = set_data(agent, set.into_value())?;
    Ok(data.find(canonicalize_keyed_collection_key(value)).is_some())
}

/// ### [24.2.4.4 Set.prototype.delete ( value )](https://tc39.es/ecma262/#sec-set.prototype.delete)
pub fn set_delete(agent: &mut Agent, set: Object, value: Value) -> JsResult<bool> {
    let data = set_data(agent, set.into_value())?;
    match data.find(canonicalize_keyed_collection_key(value)) {
        Some(index) => {
            // i. Replace the element of S.[[SetData]] whose value is e with an element whose
            //    value is empty.
            data.values[index] = None;
            Ok(true)
        }
        None => Ok(false),
    }
}

pub(crate) struct SetPrototype;

struct SetPrototypeAdd;
impl Builtin for SetPrototypeAdd {
    const NAME: &'static str = "add";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(SetPrototype::add);
}

struct SetPrototypeDelete;
impl Builtin for SetPrototypeDelete {
    const NAME: &'static str = "delete";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(SetPrototype::delete);
}

struct SetPrototypeHas;
impl Builtin for SetPrototypeHas {
    const NAME: &'static str = "has";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(SetPrototype::has);
}

impl SetPrototype {
    fn add(agent: &mut Agent, this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        let s = require_set(agent, this_value)?;
        set_add(agent, s, arguments.get(0))?;
        // 6. Return S.
        Ok(this_value)
    }

    fn delete(agent: &mut Agent, this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        let s = require_set(agent, this_value)?;
        set_delete(agent, s, arguments.get(0)).map(Value::Boolean)
    }

    fn has(agent: &mut Agent, this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        let s = require_set(agent, this_value)?;
        set_has(agent, s, arguments.get(0)).map(Value::Boolean)
    }

    pub(crate) fn create_intrinsic(agent: &mut Agent) {
        let this = agent.intrinsics().set_prototype();
        OrdinaryObjectBuilder::new_intrinsic_object(agent, this)
            .with_property_capacity(3)
            .with_builtin_function_property::<SetPrototypeAdd>()
            .with_builtin_function_property::<SetPrototypeDelete>()
            .with_builtin_function_property::<SetPrototypeHas>()
            .build();
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ecmascript::execution::Options;

    #[test]
    fn values_are_unique() {
        let mut agent = Agent::new(Options::default());
        let set = set_create(&mut agent);
        set_add(&mut agent, set, 1.into()).unwrap();
        set_add(&mut agent, set, 1.into()).unwrap();
        set_add(&mut agent, set, Value::Number(f64::NAN)).unwrap();
        set_add(&mut agent, set, Value::Number(f64::NAN)).unwrap();
        let ObjectKind::Set(data) = &agent[set].kind else {
            unreachable!()
        };
        assert_eq!(data.values().count(), 2);
    }
}
