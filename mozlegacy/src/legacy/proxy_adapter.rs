// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `Proxy.create` and `Proxy.createFunction`.
//!
//! Old-style proxy handlers implement a set of "fundamental" operations
//! (`getOwnPropertyDescriptor`, `defineProperty`, `getOwnPropertyNames`, ...)
//! and optionally "derived" ones (`has`, `get`, `set`, `keys`, ...). Each
//! modern trap is built once, from the first derivation whose handler
//! operations are all present. A trap with no usable derivation throws a
//! `TypeError` when it is invoked.

use std::rc::Rc;

use tracing::trace;

use crate::ecmascript::{
    abstract_operations::{
        operations_on_objects::{
            call, construct, create_list_from_array_like, get, has_property,
        },
        testing_and_comparison::is_callable,
        type_conversion::{to_boolean, to_property_key},
    },
    builders::ordinary_object_builder::OrdinaryObjectBuilder,
    builtins::{
        ArgumentsList, Behaviour, Builtin, BuiltinFunctionArgs, IterationSource,
        create_builtin_function, create_list_iterator, create_proxy,
        ordinary::ordinary_object_create,
        proxy::{
            DefinePropertyTrap, EnumerateTrap, GetOwnPropertyTrap, GetTrap, KeyPredicateTrap,
            OwnKeysTrap, SetPrototypeOfTrap, SetTrap, TrapTable,
        },
    },
    execution::{Agent, ExceptionType, JsResult},
    types::{Object, PropertyDescriptor, PropertyKey, Symbol, Value},
};

/// The operations an old-style handler may implement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegacyTrap {
    GetOwnPropertyDescriptor,
    GetPropertyDescriptor,
    DefineProperty,
    GetOwnPropertyNames,
    Delete,
    Enumerate,
    Iterate,
    GetPropertyNames,
    Keys,
    Has,
    HasOwn,
    Get,
    Set,
}

impl LegacyTrap {
    const ALL: [LegacyTrap; 13] = [
        LegacyTrap::GetOwnPropertyDescriptor,
        LegacyTrap::GetPropertyDescriptor,
        LegacyTrap::DefineProperty,
        LegacyTrap::GetOwnPropertyNames,
        LegacyTrap::Delete,
        LegacyTrap::Enumerate,
        LegacyTrap::Iterate,
        LegacyTrap::GetPropertyNames,
        LegacyTrap::Keys,
        LegacyTrap::Has,
        LegacyTrap::HasOwn,
        LegacyTrap::Get,
        LegacyTrap::Set,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            LegacyTrap::GetOwnPropertyDescriptor => "getOwnPropertyDescriptor",
            LegacyTrap::GetPropertyDescriptor => "getPropertyDescriptor",
            LegacyTrap::DefineProperty => "defineProperty",
            LegacyTrap::GetOwnPropertyNames => "getOwnPropertyNames",
            LegacyTrap::Delete => "delete",
            LegacyTrap::Enumerate => "enumerate",
            LegacyTrap::Iterate => "iterate",
            LegacyTrap::GetPropertyNames => "getPropertyNames",
            LegacyTrap::Keys => "keys",
            LegacyTrap::Has => "has",
            LegacyTrap::HasOwn => "hasOwn",
            LegacyTrap::Get => "get",
            LegacyTrap::Set => "set",
        }
    }
}

/// A legacy handler with its operations read out once.
#[derive(Debug)]
pub struct LegacyHandler {
    object: Object,
    operations: [Option<Value>; LegacyTrap::ALL.len()],
}

impl LegacyHandler {
    /// Reads every operation the handler has, own or inherited.
    pub fn new(agent: &mut Agent, object: Object) -> JsResult<Self> {
        let mut operations = [None; LegacyTrap::ALL.len()];
        for (slot, trap) in operations.iter_mut().zip(LegacyTrap::ALL) {
            let key = PropertyKey::from_str(agent, trap.name());
            if has_property(agent, object, key)? {
                *slot = Some(get(agent, object, key)?);
            }
        }
        Ok(Self { object, operations })
    }

    pub fn has(&self, trap: LegacyTrap) -> bool {
        self.operations[trap as usize].is_some()
    }

    /// Calls a handler operation with the handler as `this`.
    fn call(&self, agent: &mut Agent, trap: LegacyTrap, arguments: &[Value]) -> JsResult<Value> {
        let Some(operation) = self.operations[trap as usize] else {
            return Err(agent.throw_exception_with_message(
                ExceptionType::TypeError,
                format!("Proxy handler does not define '{}'", trap.name()),
            ));
        };
        call(
            agent,
            operation,
            self.object.into_value(),
            Some(ArgumentsList(arguments)),
        )
    }

    /// Calls a descriptor operation and converts its result.
    fn descriptor(
        &self,
        agent: &mut Agent,
        trap: LegacyTrap,
        key: Value,
    ) -> JsResult<Option<PropertyDescriptor>> {
        let result = self.call(agent, trap, &[key])?;
        if result.is_undefined() {
            return Ok(None);
        }
        PropertyDescriptor::to_property_descriptor(agent, result).map(Some)
    }

    /// Calls a name-listing operation and converts its result to a list.
    fn names(&self, agent: &mut Agent, trap: LegacyTrap) -> JsResult<Vec<Value>> {
        let result = self.call(agent, trap, &[])?;
        create_list_from_array_like(agent, result)
    }
}

/// One way of building a modern trap out of handler operations.
struct Derivation<T> {
    requires: &'static [LegacyTrap],
    source: &'static str,
    build: fn(Rc<LegacyHandler>) -> T,
}

fn derive<T>(
    handler: &Rc<LegacyHandler>,
    trap: &'static str,
    derivations: &[Derivation<T>],
    undecidable: fn(&'static str) -> T,
) -> T {
    for derivation in derivations {
        if derivation.requires.iter().all(|op| handler.has(*op)) {
            trace!(trap, source = derivation.source, "derived proxy trap");
            return (derivation.build)(handler.clone());
        }
    }
    trace!(trap, "proxy trap cannot be derived");
    undecidable(trap)
}

fn undecidable(agent: &mut Agent, trap: &str) -> crate::ecmascript::execution::JsError {
    agent.throw_exception_with_message(
        ExceptionType::TypeError,
        format!("Proxy handler cannot answer '{trap}'"),
    )
}

/// `@@iterator` is looked up as `"iterator"` on the legacy side.
fn legacy_key(agent: &mut Agent, key: PropertyKey) -> Value {
    if key == PropertyKey::Symbol(Symbol::iterator()) {
        return Value::from_str(agent, "iterator");
    }
    key.into_value(agent)
}

const GET_OWN_PROPERTY_DESCRIPTOR: &[Derivation<GetOwnPropertyTrap>] = &[
    Derivation {
        requires: &[LegacyTrap::GetOwnPropertyDescriptor],
        source: "getOwnPropertyDescriptor",
        build: |h| {
            Rc::new(move |agent, _, key| {
                let key = key.into_value(agent);
                h.descriptor(agent, LegacyTrap::GetOwnPropertyDescriptor, key)
            })
        },
    },
    Derivation {
        requires: &[LegacyTrap::GetPropertyDescriptor],
        source: "getPropertyDescriptor",
        build: |h| {
            Rc::new(move |agent, _, key| {
                let key = key.into_value(agent);
                h.descriptor(agent, LegacyTrap::GetPropertyDescriptor, key)
            })
        },
    },
];

/// Converts a handler's name list into property keys.
fn to_property_keys(agent: &mut Agent, names: Vec<Value>) -> JsResult<Vec<PropertyKey>> {
    names
        .into_iter()
        .map(|name| to_property_key(agent, name))
        .collect()
}

const OWN_KEYS: &[Derivation<OwnKeysTrap>] = &[
    Derivation {
        requires: &[LegacyTrap::Keys],
        source: "keys",
        build: |h| {
            Rc::new(move |agent, _| {
                let names = h.names(agent, LegacyTrap::Keys)?;
                to_property_keys(agent, names)
            })
        },
    },
    Derivation {
        requires: &[LegacyTrap::GetOwnPropertyNames],
        source: "getOwnPropertyNames",
        build: |h| {
            Rc::new(move |agent, _| {
                let names = h.names(agent, LegacyTrap::GetOwnPropertyNames)?;
                to_property_keys(agent, names)
            })
        },
    },
];

const DEFINE_PROPERTY: &[Derivation<DefinePropertyTrap>] = &[Derivation {
    requires: &[LegacyTrap::DefineProperty],
    source: "defineProperty",
    build: |h| {
        Rc::new(move |agent, _, key, desc| {
            let key = key.into_value(agent);
            let desc = PropertyDescriptor::from_property_descriptor(agent, Some(desc));
            h.call(agent, LegacyTrap::DefineProperty, &[key, desc])?;
            Ok(true)
        })
    },
}];

const DELETE_PROPERTY: &[Derivation<KeyPredicateTrap>] = &[Derivation {
    requires: &[LegacyTrap::Delete],
    source: "delete",
    build: |h| {
        Rc::new(move |agent, _, key| {
            let key = key.into_value(agent);
            let result = h.call(agent, LegacyTrap::Delete, &[key])?;
            Ok(to_boolean(agent, result))
        })
    },
}];

const HAS: &[Derivation<KeyPredicateTrap>] = &[
    Derivation {
        requires: &[LegacyTrap::Has],
        source: "has",
        build: |h| {
            Rc::new(move |agent, _, key| {
                let key = key.into_value(agent);
                let result = h.call(agent, LegacyTrap::Has, &[key])?;
                Ok(to_boolean(agent, result))
            })
        },
    },
    Derivation {
        requires: &[LegacyTrap::GetPropertyDescriptor],
        source: "getPropertyDescriptor",
        build: |h| {
            Rc::new(move |agent, _, key| {
                let key = key.into_value(agent);
                let result = h.call(agent, LegacyTrap::GetPropertyDescriptor, &[key])?;
                Ok(!result.is_undefined())
            })
        },
    },
];

const HAS_OWN: &[Derivation<KeyPredicateTrap>] = &[
    Derivation {
        requires: &[LegacyTrap::HasOwn],
        source: "hasOwn",
        build: |h| {
            Rc::new(move |agent, _, key| {
                let key = key.into_value(agent);
                let result = h.call(agent, LegacyTrap::HasOwn, &[key])?;
                Ok(to_boolean(agent, result))
            })
        },
    },
    Derivation {
        requires: &[LegacyTrap::GetOwnPropertyDescriptor],
        source: "getOwnPropertyDescriptor",
        build: |h| {
            Rc::new(move |agent, _, key| {
                let key = key.into_value(agent);
                let result = h.call(agent, LegacyTrap::GetOwnPropertyDescriptor, &[key])?;
                Ok(!result.is_undefined())
            })
        },
    },
];

const GET: &[Derivation<GetTrap>] = &[
    Derivation {
        requires: &[LegacyTrap::Get],
        source: "get",
        build: |h| {
            Rc::new(move |agent, _, key, receiver| {
                let key = key.into_value(agent);
                h.call(agent, LegacyTrap::Get, &[receiver, key])
            })
        },
    },
    Derivation {
        requires: &[LegacyTrap::GetPropertyDescriptor],
        source: "getPropertyDescriptor",
        build: |h| {
            Rc::new(move |agent, _, key, receiver| {
                let key = legacy_key(agent, key);
                let Some(desc) = h.descriptor(agent, LegacyTrap::GetPropertyDescriptor, key)?
                else {
                    return Ok(Value::Undefined);
                };
                if desc.is_data_descriptor() {
                    return Ok(desc.value.unwrap_or_default());
                }
                match desc.get {
                    Some(Some(getter)) => call(agent, getter.into_value(), receiver, None),
                    _ => Ok(Value::Undefined),
                }
            })
        },
    },
];

/// Assigns through a descriptor found on the handler: a writable data
/// property is redefined with the new value, an accessor calls its setter.
fn set_through_descriptor(
    agent: &mut Agent,
    handler: &LegacyHandler,
    key: Value,
    mut desc: PropertyDescriptor,
    value: Value,
    receiver: Value,
) -> JsResult<bool> {
    if desc.is_data_descriptor() {
        if desc.writable != Some(true) {
            return Ok(false);
        }
        desc.value = Some(value);
        let desc = PropertyDescriptor::from_property_descriptor(agent, Some(desc));
        handler.call(agent, LegacyTrap::DefineProperty, &[key, desc])?;
        return Ok(true);
    }
    match desc.set {
        Some(Some(setter)) => {
            call(
                agent,
                setter.into_value(),
                receiver,
                Some(ArgumentsList(&[value])),
            )?;
            Ok(true)
        }
        _ => Ok(false),
    }
}

const SET: &[Derivation<SetTrap>] = &[
    Derivation {
        requires: &[LegacyTrap::Set],
        source: "set",
        build: |h| {
            Rc::new(move |agent, _, key, value, receiver| {
                let key = key.into_value(agent);
                let result = h.call(agent, LegacyTrap::Set, &[receiver, key, value])?;
                Ok(to_boolean(agent, result))
            })
        },
    },
    Derivation {
        requires: &[],
        source: "getOwnPropertyDescriptor, getPropertyDescriptor and defineProperty",
        build: |h| {
            Rc::new(move |agent, _, key, value, receiver| {
                let key = key.into_value(agent);
                // 1. An own descriptor wins over an inherited one.
                let mut desc = None;
                if h.has(LegacyTrap::GetOwnPropertyDescriptor) {
                    desc = h.descriptor(agent, LegacyTrap::GetOwnPropertyDescriptor, key)?;
                }
                if desc.is_none() && h.has(LegacyTrap::GetPropertyDescriptor) {
                    desc = h.descriptor(agent, LegacyTrap::GetPropertyDescriptor, key)?;
                }
                if let Some(desc) = desc {
                    return set_through_descriptor(agent, &h, key, desc, value, receiver);
                }
                // 2. Otherwise define a fresh enumerable data property.
                let fresh = PropertyDescriptor {
                    value: Some(value),
                    writable: Some(true),
                    enumerable: Some(true),
                    configurable: Some(true),
                    ..Default::default()
                };
                let fresh = PropertyDescriptor::from_property_descriptor(agent, Some(fresh));
                h.call(agent, LegacyTrap::DefineProperty, &[key, fresh])?;
                Ok(true)
            })
        },
    },
];

const ENUMERATE: &[Derivation<EnumerateTrap>] = &[
    Derivation {
        requires: &[LegacyTrap::Enumerate],
        source: "enumerate",
        build: |h| {
            Rc::new(move |agent, _| {
                let names = h.names(agent, LegacyTrap::Enumerate)?;
                Ok(create_list_iterator(agent, IterationSource::List(names)))
            })
        },
    },
    Derivation {
        requires: &[LegacyTrap::Iterate],
        source: "iterate",
        build: |h| {
            Rc::new(move |agent, _| {
                let iterator = h.call(agent, LegacyTrap::Iterate, &[])?;
                Object::try_from(iterator).map_err(|_| {
                    agent.throw_exception(
                        ExceptionType::TypeError,
                        "Proxy handler 'iterate' did not return an object",
                    )
                })
            })
        },
    },
    Derivation {
        requires: &[LegacyTrap::GetPropertyNames, LegacyTrap::GetPropertyDescriptor],
        source: "getPropertyNames",
        build: |h| {
            Rc::new(move |agent, _| {
                let names = h.names(agent, LegacyTrap::GetPropertyNames)?;
                let mut enumerable = Vec::with_capacity(names.len());
                for name in names {
                    let key = to_property_key(agent, name)?.into_value(agent);
                    let desc = h.descriptor(agent, LegacyTrap::GetPropertyDescriptor, key)?;
                    if desc.is_some_and(|desc| desc.enumerable == Some(true)) {
                        enumerable.push(name);
                    }
                }
                Ok(create_list_iterator(agent, IterationSource::List(enumerable)))
            })
        },
    },
];

/// Builds the modern trap table for a legacy handler object. Handler
/// operations are read here, once; traps that cannot be derived throw when
/// invoked.
pub fn adapt(agent: &mut Agent, handler: Object) -> JsResult<TrapTable> {
    let h = Rc::new(LegacyHandler::new(agent, handler)?);
    let set_prototype_of: SetPrototypeOfTrap = Rc::new(|agent, _, _| {
        Err(agent.throw_exception(
            ExceptionType::TypeError,
            "Cannot set the prototype of a legacy proxy",
        ))
    });
    Ok(TrapTable {
        get_own_property_descriptor: Some(derive(
            &h,
            "getOwnPropertyDescriptor",
            GET_OWN_PROPERTY_DESCRIPTOR,
            |trap| Rc::new(move |agent, _, _| Err(undecidable(agent, trap))),
        )),
        define_property: Some(derive(&h, "defineProperty", DEFINE_PROPERTY, |trap| {
            Rc::new(move |agent, _, _, _| Err(undecidable(agent, trap)))
        })),
        has: Some(derive(&h, "has", HAS, |trap| {
            Rc::new(move |agent, _, _| Err(undecidable(agent, trap)))
        })),
        has_own: Some(derive(&h, "hasOwn", HAS_OWN, |trap| {
            Rc::new(move |agent, _, _| Err(undecidable(agent, trap)))
        })),
        get: Some(derive(&h, "get", GET, |trap| {
            Rc::new(move |agent, _, _, _| Err(undecidable(agent, trap)))
        })),
        set: Some(derive(&h, "set", SET, |trap| {
            Rc::new(move |agent, _, _, _, _| Err(undecidable(agent, trap)))
        })),
        delete_property: Some(derive(&h, "deleteProperty", DELETE_PROPERTY, |trap| {
            Rc::new(move |agent, _, _| Err(undecidable(agent, trap)))
        })),
        own_keys: Some(derive(&h, "ownKeys", OWN_KEYS, |trap| {
            Rc::new(move |agent, _| Err(undecidable(agent, trap)))
        })),
        enumerate: Some(derive(&h, "enumerate", ENUMERATE, |trap| {
            Rc::new(move |agent, _| Err(undecidable(agent, trap)))
        })),
        set_prototype_of: Some(set_prototype_of),
        apply: None,
        construct: None,
    })
}

fn require_handler(agent: &mut Agent, handler: Value) -> JsResult<Object> {
    Object::try_from(handler).map_err(|_| {
        agent.throw_exception(ExceptionType::TypeError, "Proxy handler must be an object")
    })
}

/// `Proxy.create ( handler [ , proto ] )`
///
/// An undefined `proto` is treated as null.
pub fn proxy_create(agent: &mut Agent, handler: Value, proto: Value) -> JsResult<Object> {
    // 1. If handler is not an Object, throw a TypeError exception.
    let handler = require_handler(agent, handler)?;
    // 2. If proto is neither an Object nor null, throw a TypeError exception.
    let proto = match proto {
        Value::Object(proto) => Some(proto),
        Value::Null | Value::Undefined => None,
        _ => {
            return Err(agent.throw_exception(
                ExceptionType::TypeError,
                "Proxy prototype must be an object or null",
            ));
        }
    };
    // 3. Let target be ObjectCreate(proto).
    let target = ordinary_object_create(agent, proto);
    // 4. Let traps be the adapted handler.
    let traps = adapt(agent, handler)?;
    // 5. Return ProxyCreate(target, traps).
    Ok(create_proxy(agent, target, traps))
}

fn noop_constructor(
    _: &mut Agent,
    _: Value,
    _: ArgumentsList,
    _: Option<Object>,
) -> JsResult<Value> {
    Ok(Value::Undefined)
}

/// `Proxy.createFunction ( handler, call [ , construct ] )`
///
/// `construct` defaults to `call`.
pub fn proxy_create_function(
    agent: &mut Agent,
    handler: Value,
    call_trap: Value,
    construct_trap: Option<Value>,
) -> JsResult<Object> {
    // 1. If handler is not an Object, throw a TypeError exception.
    let handler = require_handler(agent, handler)?;
    // 2. If IsCallable(call) is false, throw a TypeError exception.
    let Some(call_trap) = is_callable(agent, call_trap) else {
        return Err(agent.throw_exception(ExceptionType::TypeError, "call trap is not callable"));
    };
    // 3. If construct is not present, set construct to call.
    // 4. If IsCallable(construct) is false, throw a TypeError exception.
    let construct_trap = match construct_trap {
        None => call_trap,
        Some(construct_trap) => match is_callable(agent, construct_trap) {
            Some(construct_trap) => construct_trap,
            None => {
                return Err(agent.throw_exception(
                    ExceptionType::TypeError,
                    "construct trap is not callable",
                ));
            }
        },
    };
    // 5. Let target be a new function object that is callable and constructible.
    let target = create_builtin_function(
        agent,
        Behaviour::Constructor(noop_constructor),
        BuiltinFunctionArgs::new(0, ""),
    );
    // 6. Let traps be the adapted handler, with apply and construct set.
    let mut traps = adapt(agent, handler)?;
    traps.apply = Some(Rc::new(move |agent, _, this_argument, arguments| {
        call(agent, call_trap.into_value(), this_argument, Some(arguments))
    }));
    traps.construct = Some(Rc::new(move |agent, _, arguments, _| {
        construct(agent, construct_trap, Some(arguments), None)
    }));
    // 7. Return ProxyCreate(target, traps).
    Ok(create_proxy(agent, target, traps))
}

struct ProxyCreate;
impl Builtin for ProxyCreate {
    const NAME: &'static str = "create";
    const LENGTH: u8 = 2;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ProxyObject::create);
}

struct ProxyCreateFunction;
impl Builtin for ProxyCreateFunction {
    const NAME: &'static str = "createFunction";
    const LENGTH: u8 = 3;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ProxyObject::create_function);
}

/// The global `Proxy` namespace object.
pub(crate) struct ProxyObject;

impl ProxyObject {
    fn create(agent: &mut Agent, _: Value, arguments: ArgumentsList) -> JsResult<Value> {
        proxy_create(agent, arguments.get(0), arguments.get(1)).map(Value::Object)
    }

    fn create_function(agent: &mut Agent, _: Value, arguments: ArgumentsList) -> JsResult<Value> {
        let construct_trap = Some(arguments.get(2)).filter(|trap| !trap.is_undefined());
        proxy_create_function(agent, arguments.get(0), arguments.get(1), construct_trap)
            .map(Value::Object)
    }

    pub(crate) fn install(agent: &mut Agent) {
        let intrinsics = agent.intrinsics();
        let proxy = OrdinaryObjectBuilder::new(agent)
            .with_prototype(intrinsics.object_prototype())
            .with_property_capacity(2)
            .with_builtin_function_property::<ProxyCreate>()
            .with_builtin_function_property::<ProxyCreateFunction>()
            .build();
        let key = PropertyKey::from_str(agent, "Proxy");
        OrdinaryObjectBuilder::new_intrinsic_object(agent, intrinsics.global_object())
            .with_data_property(key, proxy.into_value())
            .build();
    }
}
