// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::ecmascript::{
    execution::{Agent, JsResult},
    types::{InternalMethods, Object, ObjectKind, Value},
};

/// ### [7.2.2 IsArray ( argument )](https://tc39.es/ecma262/#sec-isarray)
///
/// Proxies are never revoked, so this cannot throw; the signature follows
/// the abstract operation.
pub fn is_array(agent: &Agent, argument: Value) -> JsResult<bool> {
    // 1. If argument is not an Object, return false.
    let Ok(mut object) = Object::try_from(argument) else {
        return Ok(false);
    };
    loop {
        match &agent[object].kind {
            // 2. If argument is an Array exotic object, return true.
            ObjectKind::Array(_) => return Ok(true),
            // 3. If argument is a Proxy exotic object, then
            // b. Let proxyTarget be argument.[[ProxyTarget]].
            // c. Return ? IsArray(proxyTarget).
            ObjectKind::Proxy(data) => object = data.target(),
            // 4. Return false.
            _ => return Ok(false),
        }
    }
}

/// ### [7.2.3 IsCallable ( argument )](https://tc39.es/ecma262/#sec-iscallable)
///
/// Returns the function object if the argument is callable.
pub fn is_callable(agent: &Agent, argument: Value) -> Option<Object> {
    // 1. If argument is not an Object, return false.
    let object = Object::try_from(argument).ok()?;
    // 2. If argument has a [[Call]] internal method, return true.
    let mut current = object;
    loop {
        match &agent[current].kind {
            ObjectKind::BuiltinFunction(_) => return Some(object),
            ObjectKind::Proxy(data) => current = data.target(),
            // 3. Return false.
            _ => return None,
        }
    }
}

/// ### [7.2.4 IsConstructor ( argument )](https://tc39.es/ecma262/#sec-isconstructor)
pub fn is_constructor(agent: &Agent, argument: Value) -> bool {
    // 1. If argument is not an Object, return false.
    let Ok(mut current) = Object::try_from(argument) else {
        return false;
    };
    loop {
        match &agent[current].kind {
            // 2. If argument has a [[Construct]] internal method, return true.
            ObjectKind::BuiltinFunction(data) => return data.is_constructor(),
            ObjectKind::Proxy(data) => current = data.target(),
            // 3. Return false.
            _ => return false,
        }
    }
}

/// ### [7.2.5 IsExtensible ( O )](https://tc39.es/ecma262/#sec-isextensible-o)
pub fn is_extensible(agent: &mut Agent, o: Object) -> JsResult<bool> {
    // 1. Return ? O.[[IsExtensible]]().
    o.internal_is_extensible(agent)
}

/// ### [7.2.9 SameValue ( x, y )](https://tc39.es/ecma262/#sec-samevalue)
pub fn same_value(x: Value, y: Value) -> bool {
    match (x, y) {
        // 2. If x is a Number, then
        // a. Return Number::sameValue(x, y).
        (Value::Number(x), Value::Number(y)) => {
            (x.is_nan() && y.is_nan()) || (x == y && x.is_sign_negative() == y.is_sign_negative())
        }
        // 3. Return SameValueNonNumber(x, y).
        _ => x == y,
    }
}

/// ### [7.2.10 SameValueZero ( x, y )](https://tc39.es/ecma262/#sec-samevaluezero)
pub fn same_value_zero(x: Value, y: Value) -> bool {
    match (x, y) {
        (Value::Number(x), Value::Number(y)) => (x.is_nan() && y.is_nan()) || x == y,
        _ => x == y,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn same_value_distinguishes_zeroes() {
        assert!(same_value(Value::Number(f64::NAN), Value::Number(f64::NAN)));
        assert!(!same_value(Value::Number(0.0), Value::Number(-0.0)));
        assert!(same_value_zero(Value::Number(0.0), Value::Number(-0.0)));
        assert!(!same_value(Value::Null, Value::Undefined));
    }
}
