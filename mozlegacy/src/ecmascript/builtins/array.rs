// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ### 10.4.2 Array Exotic Objects
//!
//! https://tc39.es/ecma262/#sec-array-exotic-objects
//!
//! Elements are kept in the ordinary property storage under integer keys;
//! only `length` is held in the array's own slot.

use crate::{
    ecmascript::{
        abstract_operations::type_conversion::{to_number, to_uint32},
        builtins::ordinary::{
            ordinary_define_own_property, ordinary_delete, ordinary_get_own_property,
            ordinary_own_property_keys,
        },
        execution::{Agent, ExceptionType, JsResult},
        types::{InternalMethods, Object, ObjectHeapData, ObjectKind, PropertyDescriptor, PropertyKey},
    },
    heap::CreateHeapData,
};

#[derive(Debug, Clone, Copy)]
pub struct ArrayHeapData {
    pub(crate) length: u32,
    pub(crate) length_writable: bool,
}

impl Default for ArrayHeapData {
    fn default() -> Self {
        Self {
            length: 0,
            length_writable: true,
        }
    }
}

fn array_data(agent: &Agent, a: Object) -> ArrayHeapData {
    match &agent[a].kind {
        ObjectKind::Array(data) => *data,
        _ => unreachable!("array internal method called on a non-array"),
    }
}

fn array_data_mut(agent: &mut Agent, a: Object) -> &mut ArrayHeapData {
    match &mut agent[a].kind {
        ObjectKind::Array(data) => data,
        _ => unreachable!("array internal method called on a non-array"),
    }
}

fn is_length_key(agent: &mut Agent, property_key: PropertyKey) -> bool {
    property_key == PropertyKey::from_str(agent, "length")
}

/// ### [10.4.2.2 ArrayCreate ( length \[ , proto \] )](https://tc39.es/ecma262/#sec-arraycreate)
pub fn array_create(agent: &mut Agent, length: u32, proto: Option<Object>) -> Object {
    // 2. If proto is not present, set proto to %Array.prototype%.
    let proto = proto.unwrap_or_else(|| agent.intrinsics().array_prototype());
    // 3. Let A be MakeBasicObject(« [[Prototype]], [[Extensible]] »).
    // 4. Set A.[[Prototype]] to proto.
    // 5. Set A.[[DefineOwnProperty]] as specified in 10.4.2.1.
    // 6. Perform ! OrdinaryDefineOwnProperty(A, "length", PropertyDescriptor { [[Value]]: 𝔽(length), [[Writable]]: true, [[Enumerable]]: false, [[Configurable]]: false }).
    // 7. Return A.
    agent.heap.create(ObjectHeapData::new(
        Some(proto),
        ObjectKind::Array(ArrayHeapData {
            length,
            length_writable: true,
        }),
    ))
}

pub(crate) fn array_get_own_property(
    agent: &mut Agent,
    a: Object,
    property_key: PropertyKey,
) -> Option<PropertyDescriptor> {
    if is_length_key(agent, property_key) {
        let data = array_data(agent, a);
        return Some(PropertyDescriptor {
            value: Some(data.length.into()),
            writable: Some(data.length_writable),
            enumerable: Some(false),
            configurable: Some(false),
            ..Default::default()
        });
    }
    ordinary_get_own_property(agent, a, property_key)
}

/// ### [10.4.2.1 \[\[DefineOwnProperty\]\] ( P, Desc )](https://tc39.es/ecma262/#sec-array-exotic-objects-defineownproperty-p-desc)
pub(crate) fn array_define_own_property(
    agent: &mut Agent,
    a: Object,
    property_key: PropertyKey,
    property_descriptor: PropertyDescriptor,
) -> JsResult<bool> {
    // 1. If P is "length", then
    if is_length_key(agent, property_key) {
        // a. Return ? ArraySetLength(A, Desc).
        return array_set_length(agent, a, property_descriptor);
    }
    // 2. Else if P is an array index, then
    let PropertyKey::Integer(index) = property_key else {
        // 3. Return ! OrdinaryDefineOwnProperty(A, P, Desc).
        return Ok(ordinary_define_own_property(
            agent,
            a,
            property_key,
            property_descriptor,
        ));
    };
    // a. Let lengthDesc be OrdinaryGetOwnProperty(A, "length").
    // c. Let length be lengthDesc.[[Value]].
    let ArrayHeapData {
        length,
        length_writable,
    } = array_data(agent, a);
    // e. If index ≥ length and lengthDesc.[[Writable]] is false, return false.
    if index >= length && !length_writable {
        return Ok(false);
    }
    // f. Let succeeded be ! OrdinaryDefineOwnProperty(A, P, Desc).
    let succeeded = ordinary_define_own_property(agent, a, property_key, property_descriptor);
    // g. If succeeded is false, return false.
    if !succeeded {
        return Ok(false);
    }
    // h. If index ≥ length, then
    if index >= length {
        // i. Set lengthDesc.[[Value]] to index + 1𝔽.
        // ii. Set succeeded to ! OrdinaryDefineOwnProperty(A, "length", lengthDesc).
        array_data_mut(agent, a).length = index + 1;
    }
    // i. Return true.
    Ok(true)
}

/// ### [10.4.2.4 ArraySetLength ( A, Desc )](https://tc39.es/ecma262/#sec-arraysetlength)
fn array_set_length(agent: &mut Agent, a: Object, desc: PropertyDescriptor) -> JsResult<bool> {
    // 1. If Desc does not have a [[Value]] field, then
    let Some(desc_value) = desc.value else {
        // a. Return ! OrdinaryDefineOwnProperty(A, "length", Desc).
        if desc.configurable == Some(true) || desc.enumerable == Some(true) {
            return Ok(false);
        }
        if desc.is_accessor_descriptor() {
            return Ok(false);
        }
        let data = array_data_mut(agent, a);
        if !data.length_writable {
            // Length is already frozen.
            return Ok(desc.writable != Some(true));
        }
        if desc.writable == Some(false) {
            data.length_writable = false;
        }
        return Ok(true);
    };
    // 2. Let newLenDesc be a copy of Desc.
    // 13. If newLenDesc does not have a [[Writable]] field or newLenDesc.[[Writable]] is true, then
    // a. Let newWritable be true.
    let new_writable = desc.writable.unwrap_or(true);
    // 3. Let newLen be ? ToUint32(Desc.[[Value]]).
    let new_len = to_uint32(agent, desc_value)?;
    // 4. Let numberLen be ? ToNumber(Desc.[[Value]]).
    let number_len = to_number(agent, desc_value)?;
    // 5. If SameValueZero(newLen, numberLen) is false, throw a RangeError exception.
    if number_len != f64::from(new_len) {
        return Err(agent.throw_exception(ExceptionType::RangeError, "Invalid array length"));
    }
    if desc.configurable == Some(true) || desc.enumerable == Some(true) {
        return Ok(false);
    }
    // 7. Let oldLenDesc be OrdinaryGetOwnProperty(A, "length").
    // 10. Let oldLen be oldLenDesc.[[Value]].
    let ArrayHeapData {
        length: old_len,
        length_writable: old_len_writable,
    } = array_data(agent, a);
    // 11. If newLen ≥ oldLen, then
    if new_len >= old_len {
        // a. Return ! OrdinaryDefineOwnProperty(A, "length", newLenDesc).
        if !old_len_writable {
            return Ok(new_len == old_len && !new_writable);
        }
        let data = array_data_mut(agent, a);
        data.length = new_len;
        data.length_writable = new_writable;
        return Ok(true);
    }
    // 12. If oldLenDesc.[[Writable]] is false, return false.
    if !old_len_writable {
        return Ok(false);
    }
    // 15. Let succeeded be ! OrdinaryDefineOwnProperty(A, "length", newLenDesc).
    array_data_mut(agent, a).length = new_len;
    // 17. For each own property key P of A such that P is an array index and ! ToUint32(P) ≥ newLen,
    //     in descending numeric index order, do
    let mut indexes = agent[a].properties.integer_keys_from(new_len);
    indexes.sort_unstable_by(|a, b| b.cmp(a));
    for index in indexes {
        // a. Let deleteSucceeded be ! A.[[Delete]](P).
        let delete_succeeded = a.internal_delete(agent, PropertyKey::Integer(index))?;
        // b. If deleteSucceeded is false, then
        if !delete_succeeded {
            let data = array_data_mut(agent, a);
            // i. Set newLenDesc.[[Value]] to ! ToUint32(P) + 1𝔽.
            data.length = index + 1;
            // ii. If newWritable is false, set newLenDesc.[[Writable]] to false.
            data.length_writable &= new_writable;
            // iii. Perform ! OrdinaryDefineOwnProperty(A, "length", newLenDesc).
            // iv. Return false.
            return Ok(false);
        }
    }
    // 18. If newWritable is false, then
    // a. Set succeeded to ! OrdinaryDefineOwnProperty(A, "length", PropertyDescriptor { [[Writable]]: false }).
    array_data_mut(agent, a).length_writable = new_writable;
    // 19. Return true.
    Ok(true)
}

pub(crate) fn array_delete(agent: &mut Agent, a: Object, property_key: PropertyKey) -> bool {
    if is_length_key(agent, property_key) {
        return false;
    }
    ordinary_delete(agent, a, property_key)
}

/// Array indexes, then `length`, then the remaining strings and symbols.
pub(crate) fn array_own_property_keys(agent: &mut Agent, a: Object) -> Vec<PropertyKey> {
    let length_key = PropertyKey::from_str(agent, "length");
    let mut keys = ordinary_own_property_keys(agent, a);
    let first_non_index = keys
        .iter()
        .position(|key| !key.is_array_index())
        .unwrap_or(keys.len());
    keys.insert(first_non_index, length_key);
    keys
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ecmascript::{
        abstract_operations::operations_on_objects::{
            create_data_property_or_throw, length_of_array_like, set,
        },
        execution::Options,
        types::Value,
    };

    #[test]
    fn defining_an_index_grows_length() {
        let mut agent = Agent::new(Options::default());
        let array = array_create(&mut agent, 0, None);
        create_data_property_or_throw(&mut agent, array, PropertyKey::from(4), Value::Null)
            .unwrap();
        assert_eq!(length_of_array_like(&mut agent, array).unwrap(), 5);
    }

    #[test]
    fn shrinking_length_deletes_elements() {
        let mut agent = Agent::new(Options::default());
        let array = array_create(&mut agent, 0, None);
        for index in 0..3 {
            create_data_property_or_throw(&mut agent, array, PropertyKey::from(index), index.into())
                .unwrap();
        }
        let length_key = PropertyKey::from_str(&mut agent, "length");
        set(&mut agent, array, length_key, 1.into(), true).unwrap();
        let keys = array.internal_own_property_keys(&mut agent).unwrap();
        assert_eq!(keys, vec![PropertyKey::Integer(0), length_key]);
    }

    #[test]
    fn invalid_length_throws_range_error() {
        let mut agent = Agent::new(Options::default());
        let array = array_create(&mut agent, 0, None);
        let length_key = PropertyKey::from_str(&mut agent, "length");
        assert!(set(&mut agent, array, length_key, Value::Number(1.5), true).is_err());
    }
}
