// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use ahash::AHashSet;

use super::{
    testing_and_comparison::{is_callable, is_constructor},
    type_conversion::{to_length, to_object},
};
use crate::ecmascript::{
    builtins::{
        ArgumentsList, IterationSource,
        array::array_create,
        iterator::create_list_iterator,
        proxy::{proxy_enumerate, proxy_has_own_property},
    },
    execution::{Agent, ExceptionType, JsResult},
    types::{InternalMethods, Object, PropertyDescriptor, PropertyKey, Value},
};

/// ### [7.3.2 Get ( O, P )](https://tc39.es/ecma262/#sec-get-o-p)
///
/// The abstract operation Get takes arguments O (an Object) and P (a property
/// key) and returns either a normal completion containing an ECMAScript
/// language value or a throw completion. It is used to retrieve the value of a
/// specific property of an object.
pub fn get(agent: &mut Agent, o: Object, p: PropertyKey) -> JsResult<Value> {
    // 1. Return ? O.[[Get]](P, O).
    o.internal_get(agent, p, o.into_value())
}

/// ### [7.3.3 GetV ( V, P )](https://tc39.es/ecma262/#sec-getv)
///
/// The abstract operation GetV takes arguments V (an ECMAScript language
/// value) and P (a property key) and returns either a normal completion
/// containing an ECMAScript language value or a throw completion. If the value
/// is not an object, the property lookup is performed using a wrapper object
/// appropriate for the type of the value.
pub fn get_v(agent: &mut Agent, v: Value, p: PropertyKey) -> JsResult<Value> {
    // 1. Let O be ? ToObject(V).
    let o = to_object(agent, v)?;
    // 2. Return ? O.[[Get]](P, V).
    o.internal_get(agent, p, v)
}

/// ### [7.3.4 Set ( O, P, V, Throw )](https://tc39.es/ecma262/#sec-set-o-p-v-throw)
pub fn set(agent: &mut Agent, o: Object, p: PropertyKey, v: Value, throw: bool) -> JsResult<()> {
    // 1. Let success be ? O.[[Set]](P, V, O).
    let success = o.internal_set(agent, p, v, o.into_value())?;
    // 2. If success is false and Throw is true, throw a TypeError exception.
    if !success && throw {
        let key = p.as_display(agent);
        return Err(agent.throw_exception_with_message(
            ExceptionType::TypeError,
            format!("Could not set property '{key}'."),
        ));
    }
    // 3. Return UNUSED.
    Ok(())
}

/// ### [7.3.5 CreateDataProperty ( O, P, V )](https://tc39.es/ecma262/#sec-createdataproperty)
///
/// > NOTE: This abstract operation creates a property whose attributes are set
/// > to the same defaults used for properties created by the ECMAScript language
/// > assignment operator. Normally, the property will not already exist. If it
/// > does exist and is not configurable or if O is not extensible,
/// > \[\[DefineOwnProperty]] will return false.
pub fn create_data_property(
    agent: &mut Agent,
    object: Object,
    property_key: PropertyKey,
    value: Value,
) -> JsResult<bool> {
    // 1. Let newDesc be the PropertyDescriptor { [[Value]]: V, [[Writable]]: true, [[Enumerable]]: true, [[Configurable]]: true }.
    let new_desc = PropertyDescriptor::new_data_descriptor(value);
    // 2. Return ? O.[[DefineOwnProperty]](P, newDesc).
    object.internal_define_own_property(agent, property_key, new_desc)
}

/// ### [7.3.7 CreateDataPropertyOrThrow ( O, P, V )](https://tc39.es/ecma262/#sec-createdatapropertyorthrow)
pub fn create_data_property_or_throw(
    agent: &mut Agent,
    object: Object,
    property_key: PropertyKey,
    value: Value,
) -> JsResult<()> {
    let success = create_data_property(agent, object, property_key, value)?;
    if !success {
        Err(agent.throw_exception(ExceptionType::TypeError, "Could not create property"))
    } else {
        Ok(())
    }
}

/// ### [7.3.8 DefinePropertyOrThrow ( O, P, desc )](https://tc39.es/ecma262/#sec-definepropertyorthrow)
pub fn define_property_or_throw(
    agent: &mut Agent,
    object: Object,
    property_key: PropertyKey,
    desc: PropertyDescriptor,
) -> JsResult<()> {
    // 1. Let success be ? O.[[DefineOwnProperty]](P, desc).
    let success = object.internal_define_own_property(agent, property_key, desc)?;
    // 2. If success is false, throw a TypeError exception.
    if !success {
        let key = property_key.as_display(agent);
        Err(agent.throw_exception_with_message(
            ExceptionType::TypeError,
            format!("Failed to define property '{key}' on object"),
        ))
    } else {
        // 3. Return UNUSED.
        Ok(())
    }
}

/// ### [7.3.9 DeletePropertyOrThrow ( O, P )](https://tc39.es/ecma262/#sec-deletepropertyorthrow)
pub fn delete_property_or_throw(agent: &mut Agent, o: Object, p: PropertyKey) -> JsResult<()> {
    // 1. Let success be ? O.[[Delete]](P).
    let success = o.internal_delete(agent, p)?;
    // 2. If success is false, throw a TypeError exception.
    if !success {
        Err(agent.throw_exception(ExceptionType::TypeError, "Failed to delete property"))
    } else {
        // 3. Return unused.
        Ok(())
    }
}

/// ### [7.3.11 GetMethod ( V, P )](https://tc39.es/ecma262/#sec-getmethod)
///
/// The abstract operation GetMethod takes arguments V (an ECMAScript language
/// value) and P (a property key) and returns either a normal completion
/// containing either a function object or undefined, or a throw completion.
pub fn get_method(agent: &mut Agent, v: Value, p: PropertyKey) -> JsResult<Option<Object>> {
    // 1. Let func be ? GetV(V, P).
    let func = get_v(agent, v, p)?;
    // 2. If func is either undefined or null, return undefined.
    if func.is_nullish() {
        return Ok(None);
    }
    // 3. If IsCallable(func) is false, throw a TypeError exception.
    let Some(func) = is_callable(agent, func) else {
        return Err(agent.throw_exception(ExceptionType::TypeError, "Not a callable object"));
    };
    // 4. Return func.
    Ok(Some(func))
}

/// ### [7.3.12 HasProperty ( O, P )](https://tc39.es/ecma262/#sec-hasproperty)
pub fn has_property(agent: &mut Agent, o: Object, p: PropertyKey) -> JsResult<bool> {
    // 1. Return ? O.[[HasProperty]](P).
    o.internal_has_property(agent, p)
}

/// ### [7.3.13 HasOwnProperty ( O, P )](https://tc39.es/ecma262/#sec-hasownproperty)
///
/// Proxies with a `hasOwn` trap answer through the trap instead of
/// \[\[GetOwnProperty]].
pub fn has_own_property(agent: &mut Agent, o: Object, p: PropertyKey) -> JsResult<bool> {
    if let Some(result) = proxy_has_own_property(agent, o, p) {
        return result;
    }
    // 1. Let desc be ? O.[[GetOwnProperty]](P).
    let desc = o.internal_get_own_property(agent, p)?;
    // 2. If desc is undefined, return false.
    // 3. Return true.
    Ok(desc.is_some())
}

/// ### [7.3.14 Call ( F, V \[ , argumentsList \] )](https://tc39.es/ecma262/#sec-call)
///
/// The abstract operation Call takes arguments F (an ECMAScript language
/// value) and V (an ECMAScript language value) and optional argument
/// argumentsList (a List of ECMAScript language values) and returns either a
/// normal completion containing an ECMAScript language value or a throw
/// completion.
pub fn call(
    agent: &mut Agent,
    f: Value,
    v: Value,
    arguments_list: Option<ArgumentsList>,
) -> JsResult<Value> {
    // 1. If argumentsList is not present, set argumentsList to a new empty List.
    let arguments_list = arguments_list.unwrap_or_default();
    // 2. If IsCallable(F) is false, throw a TypeError exception.
    let Some(f) = is_callable(agent, f) else {
        return Err(agent.throw_exception(ExceptionType::TypeError, "Not a callable object"));
    };
    // 3. Return ? F.[[Call]](V, argumentsList).
    f.internal_call(agent, v, arguments_list)
}

/// Abstract operation Call specialized for a known function object.
pub fn call_function(
    agent: &mut Agent,
    f: Object,
    v: Value,
    arguments_list: Option<ArgumentsList>,
) -> JsResult<Value> {
    call(agent, f.into_value(), v, arguments_list)
}

/// ### [7.3.15 Construct ( F \[ , argumentsList \[ , newTarget \] \] )](https://tc39.es/ecma262/#sec-construct)
pub fn construct(
    agent: &mut Agent,
    f: Object,
    arguments_list: Option<ArgumentsList>,
    new_target: Option<Object>,
) -> JsResult<Object> {
    if !is_constructor(agent, f.into_value()) {
        return Err(agent.throw_exception(ExceptionType::TypeError, "Not a constructor"));
    }
    // 1. If newTarget is not present, set newTarget to F.
    let new_target = new_target.unwrap_or(f);
    // 2. If argumentsList is not present, set argumentsList to a new empty List.
    let arguments_list = arguments_list.unwrap_or_default();
    // 3. Return ? F.[[Construct]](argumentsList, newTarget).
    f.internal_construct(agent, arguments_list, new_target)
}

/// ### [7.3.17 CreateArrayFromList ( elements )](https://tc39.es/ecma262/#sec-createarrayfromlist)
pub fn create_array_from_list(agent: &mut Agent, elements: &[Value]) -> Object {
    // 1. Let array be ! ArrayCreate(0).
    let array = array_create(agent, 0, None);
    // 2. Let n be 0.
    // 3. For each element e of elements, do
    for (n, e) in elements.iter().enumerate() {
        // a. Perform ! CreateDataPropertyOrThrow(array, ! ToString(𝔽(n)), e).
        create_data_property_or_throw(agent, array, PropertyKey::from(n as u32), *e)
            .expect("fresh arrays accept indexed data properties");
        // b. Set n to n + 1.
    }
    // 4. Return array.
    array
}

/// ### [7.3.18 LengthOfArrayLike ( obj )](https://tc39.es/ecma262/#sec-lengthofarraylike)
pub fn length_of_array_like(agent: &mut Agent, obj: Object) -> JsResult<u64> {
    // 1. Return ℝ(? ToLength(? Get(obj, "length"))).
    let key = PropertyKey::from_str(agent, "length");
    let property = get(agent, obj, key)?;
    to_length(agent, property)
}

/// ### [7.3.19 CreateListFromArrayLike ( obj \[ , elementTypes \] )](https://tc39.es/ecma262/#sec-createlistfromarraylike)
///
/// NOTE: This implementation doesn't support `elementTypes`.
pub fn create_list_from_array_like(agent: &mut Agent, obj: Value) -> JsResult<Vec<Value>> {
    // 2. If obj is not an Object, throw a TypeError exception.
    let Ok(object) = Object::try_from(obj) else {
        return Err(agent.throw_exception(
            ExceptionType::TypeError,
            "CreateListFromArrayLike called on non-object",
        ));
    };
    // 3. Let len be ? LengthOfArrayLike(obj).
    let len = length_of_array_like(agent, object)?;
    if len >= u64::from(u32::MAX) {
        return Err(agent.throw_exception(ExceptionType::RangeError, "Invalid array length"));
    }
    // 4. Let list be a new empty List.
    let mut list = Vec::with_capacity(len as usize);
    // 5. Let index be 0.
    // 6. Repeat, while index < len,
    for index in 0..len as u32 {
        // a. Let indexName be ! ToString(𝔽(index)).
        // b. Let next be ? Get(obj, indexName).
        let next = get(agent, object, PropertyKey::from(index))?;
        // d. Append next to list.
        list.push(next);
    }
    // 7. Return list.
    Ok(list)
}

/// ### [7.3.20 Invoke ( V, P \[ , argumentsList \] )](https://tc39.es/ecma262/#sec-invoke)
pub fn invoke(
    agent: &mut Agent,
    v: Value,
    p: PropertyKey,
    arguments_list: Option<ArgumentsList>,
) -> JsResult<Value> {
    // 1. If argumentsList is not present, set argumentsList to a new empty List.
    // 2. Let func be ? GetV(V, P).
    let func = get_v(agent, v, p)?;
    // 3. Return ? Call(func, V, argumentsList).
    call(agent, func, v, arguments_list)
}

/// ### [7.3.23 EnumerableOwnProperties ( O, kind )](https://tc39.es/ecma262/#sec-enumerableownproperties)
///
/// The KEY kind of the operation, returning keys rather than their string
/// values.
pub fn enumerable_own_keys(agent: &mut Agent, o: Object) -> JsResult<Vec<PropertyKey>> {
    // 1. Let ownKeys be ? O.[[OwnPropertyKeys]]().
    let own_keys = o.internal_own_property_keys(agent)?;
    // 2. Let results be a new empty List.
    let mut results = Vec::with_capacity(own_keys.len());
    // 3. For each element key of ownKeys, do
    for key in own_keys {
        // a. If key is a String, then
        if key.is_symbol() {
            continue;
        }
        // i. Let desc be ? O.[[GetOwnProperty]](key).
        let desc = o.internal_get_own_property(agent, key)?;
        // ii. If desc is not undefined and desc.[[Enumerable]] is true, then
        if desc.is_some_and(|desc| desc.enumerable == Some(true)) {
            // 1. If kind is KEY, then
            // a. Append key to results.
            results.push(key);
        }
    }
    // 4. Return results.
    Ok(results)
}

/// ### [14.7.5.9 EnumerateObjectProperties ( O )](https://tc39.es/ecma262/#sec-enumerate-object-properties)
///
/// Returns an iterator over the enumerable string keys of `o` and its
/// prototype chain. Shadowed keys are visited once. Proxies with an
/// `enumerate` trap produce their own iterator.
pub fn enumerate_object_properties(agent: &mut Agent, o: Object) -> JsResult<Object> {
    if let Some(result) = proxy_enumerate(agent, o) {
        return result;
    }
    let mut visited = AHashSet::new();
    let mut names = Vec::new();
    let mut current = Some(o);
    while let Some(object) = current {
        for key in object.internal_own_property_keys(agent)? {
            if key.is_symbol() || !visited.insert(key) {
                continue;
            }
            let desc = object.internal_get_own_property(agent, key)?;
            if desc.is_some_and(|desc| desc.enumerable == Some(true)) {
                names.push(key.into_value(agent));
            }
        }
        current = object.internal_get_prototype_of(agent)?;
    }
    Ok(create_list_iterator(agent, IterationSource::List(names)))
}
