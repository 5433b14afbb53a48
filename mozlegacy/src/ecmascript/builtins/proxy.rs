// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ### [10.5 Proxy Object Internal Methods and Internal Slots](https://tc39.es/ecma262/#sec-proxy-object-internal-methods-and-internal-slots)
//!
//! Proxies here are host objects: the handler is a [`TrapTable`] of Rust
//! closures rather than a script object, so no trap is looked up by name
//! at call time. A trap that is absent from the table forwards the
//! operation to the target. Proxies are never revoked and the invariants
//! against the target are not enforced.

use std::{fmt, rc::Rc};

use crate::{
    ecmascript::{
        builtins::ArgumentsList,
        execution::{Agent, JsResult},
        types::{
            InternalMethods, Object, ObjectHeapData, ObjectKind, PropertyDescriptor, PropertyKey,
            Value,
        },
    },
    heap::CreateHeapData,
};

pub type GetOwnPropertyTrap =
    Rc<dyn Fn(&mut Agent, Object, PropertyKey) -> JsResult<Option<PropertyDescriptor>>>;
pub type DefinePropertyTrap =
    Rc<dyn Fn(&mut Agent, Object, PropertyKey, PropertyDescriptor) -> JsResult<bool>>;
pub type KeyPredicateTrap = Rc<dyn Fn(&mut Agent, Object, PropertyKey) -> JsResult<bool>>;
pub type GetTrap = Rc<dyn Fn(&mut Agent, Object, PropertyKey, Value) -> JsResult<Value>>;
pub type SetTrap = Rc<dyn Fn(&mut Agent, Object, PropertyKey, Value, Value) -> JsResult<bool>>;
pub type OwnKeysTrap = Rc<dyn Fn(&mut Agent, Object) -> JsResult<Vec<PropertyKey>>>;
pub type EnumerateTrap = Rc<dyn Fn(&mut Agent, Object) -> JsResult<Object>>;
pub type SetPrototypeOfTrap = Rc<dyn Fn(&mut Agent, Object, Option<Object>) -> JsResult<bool>>;
pub type ApplyTrap = Rc<dyn Fn(&mut Agent, Object, Value, ArgumentsList<'_>) -> JsResult<Value>>;
pub type ConstructTrap =
    Rc<dyn Fn(&mut Agent, Object, ArgumentsList<'_>, Object) -> JsResult<Object>>;

/// The traps of a proxy. Every trap receives the proxy target as its first
/// argument after the agent.
#[derive(Clone, Default)]
pub struct TrapTable {
    pub get_own_property_descriptor: Option<GetOwnPropertyTrap>,
    pub define_property: Option<DefinePropertyTrap>,
    pub has: Option<KeyPredicateTrap>,
    /// Consulted by `HasOwnProperty` before `[[GetOwnProperty]]`.
    pub has_own: Option<KeyPredicateTrap>,
    pub get: Option<GetTrap>,
    pub set: Option<SetTrap>,
    pub delete_property: Option<KeyPredicateTrap>,
    pub own_keys: Option<OwnKeysTrap>,
    /// Produces the iterator used for `for-in` enumeration.
    pub enumerate: Option<EnumerateTrap>,
    pub set_prototype_of: Option<SetPrototypeOfTrap>,
    pub apply: Option<ApplyTrap>,
    pub construct: Option<ConstructTrap>,
}

impl fmt::Debug for TrapTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut present = Vec::with_capacity(12);
        let traps = [
            ("getOwnPropertyDescriptor", self.get_own_property_descriptor.is_some()),
            ("defineProperty", self.define_property.is_some()),
            ("has", self.has.is_some()),
            ("hasOwn", self.has_own.is_some()),
            ("get", self.get.is_some()),
            ("set", self.set.is_some()),
            ("deleteProperty", self.delete_property.is_some()),
            ("ownKeys", self.own_keys.is_some()),
            ("enumerate", self.enumerate.is_some()),
            ("setPrototypeOf", self.set_prototype_of.is_some()),
            ("apply", self.apply.is_some()),
            ("construct", self.construct.is_some()),
        ];
        for (name, is_present) in traps {
            if is_present {
                present.push(name);
            }
        }
        f.debug_struct("TrapTable").field("traps", &present).finish()
    }
}

#[derive(Debug, Clone)]
pub struct ProxyHeapData {
    /// \[\[ProxyTarget]]
    pub(crate) target: Object,
    /// \[\[ProxyHandler]]
    pub(crate) handler: Rc<TrapTable>,
}

impl ProxyHeapData {
    pub fn target(&self) -> Object {
        self.target
    }
}

/// ### [10.5.14 ProxyCreate ( target, handler )](https://tc39.es/ecma262/#sec-proxycreate)
///
/// The target must be callable for the proxy to be callable, and a
/// constructor for it to be constructible.
pub fn create_proxy(agent: &mut Agent, target: Object, handler: TrapTable) -> Object {
    // 3. Let P be MakeBasicObject(« [[ProxyHandler]], [[ProxyTarget]] »).
    // 4. Set P's essential internal methods, except for [[Call]] and [[Construct]], to the definitions specified in 10.5.
    // 5. If IsCallable(target) is true, then
    //     a. Set P.[[Call]] as specified in 10.5.12.
    //     b. If IsConstructor(target) is true, then
    //         i. Set P.[[Construct]] as specified in 10.5.13.
    // 6. Set P.[[ProxyTarget]] to target.
    // 7. Set P.[[ProxyHandler]] to handler.
    // 8. Return P.
    agent.heap.create(ObjectHeapData::new(
        None,
        ObjectKind::Proxy(ProxyHeapData {
            target,
            handler: Rc::new(handler),
        }),
    ))
}

fn proxy_parts(agent: &Agent, o: Object) -> (Object, Rc<TrapTable>) {
    match &agent[o].kind {
        ObjectKind::Proxy(data) => (data.target, data.handler.clone()),
        _ => unreachable!("proxy internal method called on a non-proxy"),
    }
}

/// ### [10.5.1 \[\[GetPrototypeOf\]\] ( )](https://tc39.es/ecma262/#sec-proxy-object-internal-methods-and-internal-slots-getprototypeof)
pub(crate) fn proxy_get_prototype_of(agent: &mut Agent, o: Object) -> JsResult<Option<Object>> {
    let (target, _) = proxy_parts(agent, o);
    target.internal_get_prototype_of(agent)
}

/// ### [10.5.2 \[\[SetPrototypeOf\]\] ( V )](https://tc39.es/ecma262/#sec-proxy-object-internal-methods-and-internal-slots-setprototypeof-v)
pub(crate) fn proxy_set_prototype_of(
    agent: &mut Agent,
    o: Object,
    prototype: Option<Object>,
) -> JsResult<bool> {
    // 2. Let target be O.[[ProxyTarget]].
    // 3. Let handler be O.[[ProxyHandler]].
    let (target, handler) = proxy_parts(agent, o);
    // 5. Let trap be ? GetMethod(handler, "setPrototypeOf").
    match &handler.set_prototype_of {
        // 7. Let booleanTrapResult be ToBoolean(? Call(trap, handler, « target, V »)).
        Some(trap) => trap(agent, target, prototype),
        // 6. If trap is undefined, then
        // a. Return ? target.[[SetPrototypeOf]](V).
        None => target.internal_set_prototype_of(agent, prototype),
    }
}

/// ### [10.5.3 \[\[IsExtensible\]\] ( )](https://tc39.es/ecma262/#sec-proxy-object-internal-methods-and-internal-slots-isextensible)
pub(crate) fn proxy_is_extensible(agent: &mut Agent, o: Object) -> JsResult<bool> {
    let (target, _) = proxy_parts(agent, o);
    target.internal_is_extensible(agent)
}

/// ### [10.5.4 \[\[PreventExtensions\]\] ( )](https://tc39.es/ecma262/#sec-proxy-object-internal-methods-and-internal-slots-preventextensions)
pub(crate) fn proxy_prevent_extensions(agent: &mut Agent, o: Object) -> JsResult<bool> {
    let (target, _) = proxy_parts(agent, o);
    target.internal_prevent_extensions(agent)
}

/// ### [10.5.5 \[\[GetOwnProperty\]\] ( P )](https://tc39.es/ecma262/#sec-proxy-object-internal-methods-and-internal-slots-getownproperty-p)
pub(crate) fn proxy_get_own_property(
    agent: &mut Agent,
    o: Object,
    property_key: PropertyKey,
) -> JsResult<Option<PropertyDescriptor>> {
    let (target, handler) = proxy_parts(agent, o);
    // 5. Let trap be ? GetMethod(handler, "getOwnPropertyDescriptor").
    let Some(trap) = &handler.get_own_property_descriptor else {
        // 6. If trap is undefined, then
        // a. Return ? target.[[GetOwnProperty]](P).
        return target.internal_get_own_property(agent, property_key);
    };
    // 7. Let trapResultObj be ? Call(trap, handler, « target, P »).
    let Some(mut result_desc) = trap(agent, target, property_key)? else {
        return Ok(None);
    };
    // 13. Let resultDesc be ? ToPropertyDescriptor(trapResultObj).
    // 14. Perform CompletePropertyDescriptor(resultDesc).
    result_desc.complete_property_descriptor();
    // 20. Return resultDesc.
    Ok(Some(result_desc))
}

/// ### [10.5.6 \[\[DefineOwnProperty\]\] ( P, Desc )](https://tc39.es/ecma262/#sec-proxy-object-internal-methods-and-internal-slots-defineownproperty-p-desc)
pub(crate) fn proxy_define_own_property(
    agent: &mut Agent,
    o: Object,
    property_key: PropertyKey,
    property_descriptor: PropertyDescriptor,
) -> JsResult<bool> {
    let (target, handler) = proxy_parts(agent, o);
    // 5. Let trap be ? GetMethod(handler, "defineProperty").
    match &handler.define_property {
        // 8. Let booleanTrapResult be ToBoolean(? Call(trap, handler, « target, P, descObj »)).
        Some(trap) => trap(agent, target, property_key, property_descriptor),
        // 6. If trap is undefined, then
        // a. Return ? target.[[DefineOwnProperty]](P, Desc).
        None => target.internal_define_own_property(agent, property_key, property_descriptor),
    }
}

/// ### [10.5.7 \[\[HasProperty\]\] ( P )](https://tc39.es/ecma262/#sec-proxy-object-internal-methods-and-internal-slots-hasproperty-p)
pub(crate) fn proxy_has_property(
    agent: &mut Agent,
    o: Object,
    property_key: PropertyKey,
) -> JsResult<bool> {
    let (target, handler) = proxy_parts(agent, o);
    // 5. Let trap be ? GetMethod(handler, "has").
    match &handler.has {
        // 7. Let booleanTrapResult be ToBoolean(? Call(trap, handler, « target, P »)).
        Some(trap) => trap(agent, target, property_key),
        // 6. If trap is undefined, then
        // a. Return ? target.[[HasProperty]](P).
        None => target.internal_has_property(agent, property_key),
    }
}

/// ### [10.5.8 \[\[Get\]\] ( P, Receiver )](https://tc39.es/ecma262/#sec-proxy-object-internal-methods-and-internal-slots-get-p-receiver)
pub(crate) fn proxy_get(
    agent: &mut Agent,
    o: Object,
    property_key: PropertyKey,
    receiver: Value,
) -> JsResult<Value> {
    let (target, handler) = proxy_parts(agent, o);
    // 5. Let trap be ? GetMethod(handler, "get").
    match &handler.get {
        // 7. Let trapResult be ? Call(trap, handler, « target, P, Receiver »).
        Some(trap) => trap(agent, target, property_key, receiver),
        // 6. If trap is undefined, then
        // a. Return ? target.[[Get]](P, Receiver).
        None => target.internal_get(agent, property_key, receiver),
    }
}

/// ### [10.5.9 \[\[Set\]\] ( P, V, Receiver )](https://tc39.es/ecma262/#sec-proxy-object-internal-methods-and-internal-slots-set-p-v-receiver)
pub(crate) fn proxy_set(
    agent: &mut Agent,
    o: Object,
    property_key: PropertyKey,
    value: Value,
    receiver: Value,
) -> JsResult<bool> {
    let (target, handler) = proxy_parts(agent, o);
    // 5. Let trap be ? GetMethod(handler, "set").
    match &handler.set {
        // 7. Let booleanTrapResult be ToBoolean(? Call(trap, handler, « target, P, V, Receiver »)).
        Some(trap) => trap(agent, target, property_key, value, receiver),
        // 6. If trap is undefined, then
        // a. Return ? target.[[Set]](P, V, Receiver).
        None => target.internal_set(agent, property_key, value, receiver),
    }
}

/// ### [10.5.10 \[\[Delete\]\] ( P )](https://tc39.es/ecma262/#sec-proxy-object-internal-methods-and-internal-slots-delete-p)
pub(crate) fn proxy_delete(
    agent: &mut Agent,
    o: Object,
    property_key: PropertyKey,
) -> JsResult<bool> {
    let (target, handler) = proxy_parts(agent, o);
    // 5. Let trap be ? GetMethod(handler, "deleteProperty").
    match &handler.delete_property {
        // 7. Let booleanTrapResult be ToBoolean(? Call(trap, handler, « target, P »)).
        Some(trap) => trap(agent, target, property_key),
        // 6. If trap is undefined, then
        // a. Return ? target.[[Delete]](P).
        None => target.internal_delete(agent, property_key),
    }
}

/// ### [10.5.11 \[\[OwnPropertyKeys\]\] ( )](https://tc39.es/ecma262/#sec-proxy-object-internal-methods-and-internal-slots-ownpropertykeys)
pub(crate) fn proxy_own_property_keys(agent: &mut Agent, o: Object) -> JsResult<Vec<PropertyKey>> {
    let (target, handler) = proxy_parts(agent, o);
    // 5. Let trap be ? GetMethod(handler, "ownKeys").
    match &handler.own_keys {
        // 7. Let trapResultArray be ? Call(trap, handler, « target »).
        // 8. Let trapResult be ? CreateListFromArrayLike(trapResultArray, property-key).
        Some(trap) => trap(agent, target),
        // 6. If trap is undefined, then
        // a. Return ? target.[[OwnPropertyKeys]]().
        None => target.internal_own_property_keys(agent),
    }
}

/// ### [10.5.12 \[\[Call\]\] ( thisArgument, argumentsList )](https://tc39.es/ecma262/#sec-proxy-object-internal-methods-and-internal-slots-call-thisargument-argumentslist)
pub(crate) fn proxy_call(
    agent: &mut Agent,
    o: Object,
    this_argument: Value,
    arguments_list: ArgumentsList,
) -> JsResult<Value> {
    let (target, handler) = proxy_parts(agent, o);
    // 5. Let trap be ? GetMethod(handler, "apply").
    match &handler.apply {
        // 7. Let argArray be CreateArrayFromList(argumentsList).
        // 8. Return ? Call(trap, handler, « target, thisArgument, argArray »).
        Some(trap) => trap(agent, target, this_argument, arguments_list),
        // 6. If trap is undefined, then
        // a. Return ? Call(target, thisArgument, argumentsList).
        None => target.internal_call(agent, this_argument, arguments_list),
    }
}

/// ### [10.5.13 \[\[Construct\]\] ( argumentsList, newTarget )](https://tc39.es/ecma262/#sec-proxy-object-internal-methods-and-internal-slots-construct-argumentslist-newtarget)
pub(crate) fn proxy_construct(
    agent: &mut Agent,
    o: Object,
    arguments_list: ArgumentsList,
    new_target: Object,
) -> JsResult<Object> {
    let (target, handler) = proxy_parts(agent, o);
    // 5. Assert: IsConstructor(target) is true.
    // 6. Let trap be ? GetMethod(handler, "construct").
    match &handler.construct {
        // 9. Let newObj be ? Call(trap, handler, « target, argArray, newTarget »).
        // 10. If newObj is not an Object, throw a TypeError exception.
        Some(trap) => trap(agent, target, arguments_list, new_target),
        // 7. If trap is undefined, then
        // a. Return ? Construct(target, argumentsList, newTarget).
        None => target.internal_construct(agent, arguments_list, new_target),
    }
}

/// Answers `HasOwnProperty` through the `hasOwn` trap when `o` is a proxy
/// that has one.
pub(crate) fn proxy_has_own_property(
    agent: &mut Agent,
    o: Object,
    property_key: PropertyKey,
) -> Option<JsResult<bool>> {
    let ObjectKind::Proxy(data) = &agent[o].kind else {
        return None;
    };
    let (target, handler) = (data.target, data.handler.clone());
    let trap = handler.has_own.as_ref()?;
    Some(trap(agent, target, property_key))
}

/// Produces the enumeration iterator through the `enumerate` trap when `o`
/// is a proxy that has one.
pub(crate) fn proxy_enumerate(agent: &mut Agent, o: Object) -> Option<JsResult<Object>> {
    let ObjectKind::Proxy(data) = &agent[o].kind else {
        return None;
    };
    let (target, handler) = (data.target, data.handler.clone());
    let trap = handler.enumerate.as_ref()?;
    Some(trap(agent, target))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ecmascript::{
        abstract_operations::operations_on_objects::{
            create_data_property_or_throw, get, has_own_property, has_property,
        },
        builtins::ordinary::create_empty_object,
        execution::Options,
    };

    #[test]
    fn absent_traps_forward_to_target() {
        let mut agent = Agent::new(Options::default());
        let target = create_empty_object(&mut agent);
        let key = PropertyKey::from_str(&mut agent, "x");
        create_data_property_or_throw(&mut agent, target, key, 7.into()).unwrap();
        let proxy = create_proxy(&mut agent, target, TrapTable::default());
        assert_eq!(get(&mut agent, proxy, key).unwrap(), Value::Number(7.0));
        assert!(has_own_property(&mut agent, proxy, key).unwrap());
    }

    #[test]
    fn has_trap_overrides_target() {
        let mut agent = Agent::new(Options::default());
        let target = create_empty_object(&mut agent);
        let handler = TrapTable {
            has: Some(Rc::new(|_, _, _| Ok(true))),
            ..Default::default()
        };
        let proxy = create_proxy(&mut agent, target, handler);
        let key = PropertyKey::from_str(&mut agent, "anything");
        assert!(has_property(&mut agent, proxy, key).unwrap());
        assert!(!has_own_property(&mut agent, proxy, key).unwrap());
    }
}
