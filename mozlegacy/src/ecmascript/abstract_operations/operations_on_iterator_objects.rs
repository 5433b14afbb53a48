// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::{
    operations_on_objects::{call_function, create_data_property_or_throw, get, get_method, invoke},
    type_conversion::to_boolean,
};
use crate::ecmascript::{
    builtins::ordinary::ordinary_object_create,
    execution::{Agent, ExceptionType, JsResult},
    types::{Object, PropertyKey, Symbol, Value},
};

/// ### [7.4.3 GetIterator ( obj, kind )](https://tc39.es/ecma262/#sec-getiterator)
///
/// Sync kind only. Returns the iterator object; its `next` method is looked
/// up on every step.
pub fn get_iterator(agent: &mut Agent, obj: Value) -> JsResult<Object> {
    // 2. Else,
    // a. Let method be ? GetMethod(obj, %Symbol.iterator%).
    let method = get_method(agent, obj, PropertyKey::Symbol(Symbol::iterator()))?;
    // 3. If method is undefined, throw a TypeError exception.
    let Some(method) = method else {
        return Err(agent.throw_exception(ExceptionType::TypeError, "Value is not iterable"));
    };
    // 4. Return ? GetIteratorFromMethod(obj, method).
    // 1. Let iterator be ? Call(method, obj).
    let iterator = call_function(agent, method, obj, None)?;
    // 2. If iterator is not an Object, throw a TypeError exception.
    Object::try_from(iterator).map_err(|_| {
        agent.throw_exception(ExceptionType::TypeError, "Iterator result is not an object")
    })
}

/// ### [7.4.4 IteratorNext ( iteratorRecord \[ , value \] )](https://tc39.es/ecma262/#sec-iteratornext)
pub fn iterator_next(agent: &mut Agent, iterator: Object) -> JsResult<Object> {
    // 1. If value is not present, then
    // a. Let result be Completion(Call(iteratorRecord.[[NextMethod]], iteratorRecord.[[Iterator]])).
    let next = PropertyKey::from_str(agent, "next");
    let result = invoke(agent, iterator.into_value(), next, None)?;
    // 5. If result is not an Object, then
    // a. Set iteratorRecord.[[Done]] to true.
    // b. Throw a TypeError exception.
    Object::try_from(result).map_err(|_| {
        agent.throw_exception(ExceptionType::TypeError, "Iterator result is not an object")
    })
}

/// ### [7.4.5 IteratorComplete ( iterResult )](https://tc39.es/ecma262/#sec-iteratorcomplete)
pub fn iterator_complete(agent: &mut Agent, iter_result: Object) -> JsResult<bool> {
    // 1. Return ToBoolean(? Get(iterResult, "done")).
    let done = PropertyKey::from_str(agent, "done");
    let done = get(agent, iter_result, done)?;
    Ok(to_boolean(agent, done))
}

/// ### [7.4.6 IteratorValue ( iterResult )](https://tc39.es/ecma262/#sec-iteratorvalue)
pub fn iterator_value(agent: &mut Agent, iter_result: Object) -> JsResult<Value> {
    // 1. Return ? Get(iterResult, "value").
    let value = PropertyKey::from_str(agent, "value");
    get(agent, iter_result, value)
}

/// ### [7.4.7 IteratorStep ( iteratorRecord )](https://tc39.es/ecma262/#sec-iteratorstep)
///
/// Returns the next result object, or `None` once the iterator is done.
pub fn iterator_step(agent: &mut Agent, iterator: Object) -> JsResult<Option<Object>> {
    // 1. Let result be ? IteratorNext(iteratorRecord).
    let result = iterator_next(agent, iterator)?;
    // 2. Let done be Completion(IteratorComplete(result)).
    let done = iterator_complete(agent, result)?;
    // 5. If done is true, then
    if done {
        // a. Set iteratorRecord.[[Done]] to true.
        // b. Return DONE.
        return Ok(None);
    }
    // 6. Return result.
    Ok(Some(result))
}

/// ### [7.4.8 IteratorStepValue ( iteratorRecord )](https://tc39.es/ecma262/#sec-iteratorstepvalue)
pub fn iterator_step_value(agent: &mut Agent, iterator: Object) -> JsResult<Option<Value>> {
    match iterator_step(agent, iterator)? {
        Some(result) => iterator_value(agent, result).map(Some),
        None => Ok(None),
    }
}

/// ### [7.4.14 CreateIteratorResultObject ( value, done )](https://tc39.es/ecma262/#sec-createiterresultobject)
pub fn create_iter_result_object(agent: &mut Agent, value: Value, done: bool) -> Object {
    // 1. Let obj be OrdinaryObjectCreate(%Object.prototype%).
    let object_prototype = agent.intrinsics().object_prototype();
    let obj = ordinary_object_create(agent, Some(object_prototype));
    // 2. Perform ! CreateDataPropertyOrThrow(obj, "value", value).
    let value_key = PropertyKey::from_str(agent, "value");
    create_data_property_or_throw(agent, obj, value_key, value)
        .expect("fresh ordinary objects accept data properties");
    // 3. Perform ! CreateDataPropertyOrThrow(obj, "done", done).
    let done_key = PropertyKey::from_str(agent, "done");
    create_data_property_or_throw(agent, obj, done_key, done.into())
        .expect("fresh ordinary objects accept data properties");
    // 4. Return obj.
    obj
}

/// ### [7.4.15 IteratorToList ( iteratorRecord )](https://tc39.es/ecma262/#sec-iteratortolist)
pub fn iterator_to_list(agent: &mut Agent, iterator: Object) -> JsResult<Vec<Value>> {
    // 1. Let values be a new empty List.
    let mut values = Vec::new();
    // 2. Repeat,
    // a. Let next be ? IteratorStepValue(iteratorRecord).
    while let Some(next) = iterator_step_value(agent, iterator)? {
        // c. Append next to values.
        values.push(next);
    }
    // b. If next is DONE, then
    // i. Return values.
    Ok(values)
}
