// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

mod data;
mod internal_methods;
mod property_key;
mod property_storage;

pub use data::{ObjectHeapData, ObjectKind};
pub(crate) use data::ExoticKind;
pub use internal_methods::InternalMethods;
pub use property_key::PropertyKey;
pub(crate) use property_key::parse_array_index;
pub use property_storage::{PropertyStorage, PropertyValue, StoredProperty};

use super::Value;
use crate::{
    ecmascript::{
        builtins::{
            ArgumentsList,
            array::{
                array_define_own_property, array_delete, array_get_own_property,
                array_own_property_keys,
            },
            builtin_function::{builtin_call, builtin_construct},
            ordinary::{
                ordinary_define_own_property, ordinary_delete, ordinary_get,
                ordinary_get_own_property, ordinary_get_prototype_of, ordinary_has_property,
                ordinary_is_extensible, ordinary_own_property_keys, ordinary_prevent_extensions,
                ordinary_set, ordinary_set_prototype_of,
            },
            proxy,
        },
        execution::{Agent, JsResult},
        types::PropertyDescriptor,
    },
    heap::indexes::ObjectIndex,
};

/// ### [6.1.7 The Object Type](https://tc39.es/ecma262/#sec-object-type)
///
/// A handle to an object on the heap. Which internal methods the object
/// has is decided by its [`ObjectKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Object(pub(crate) ObjectIndex);

impl Object {
    pub fn into_value(self) -> Value {
        Value::Object(self)
    }

    pub(crate) fn exotic_kind(self, agent: &Agent) -> ExoticKind {
        agent[self].kind.exotic_kind()
    }

    pub fn is_proxy(self, agent: &Agent) -> bool {
        matches!(agent[self].kind, ObjectKind::Proxy(_))
    }

    /// Returns true for objects with array exotic internal methods. Use
    /// [`is_array`](crate::ecmascript::abstract_operations::testing_and_comparison::is_array)
    /// to see through proxies.
    pub fn is_array_exotic(self, agent: &Agent) -> bool {
        matches!(agent[self].kind, ObjectKind::Array(_))
    }
}

impl From<Object> for Value {
    fn from(value: Object) -> Self {
        Value::Object(value)
    }
}

impl TryFrom<Value> for Object {
    type Error = ();

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(o) => Ok(o),
            _ => Err(()),
        }
    }
}

impl InternalMethods for Object {
    fn internal_get_prototype_of(self, agent: &mut Agent) -> JsResult<Option<Object>> {
        match self.exotic_kind(agent) {
            ExoticKind::Proxy => proxy::proxy_get_prototype_of(agent, self),
            _ => Ok(ordinary_get_prototype_of(agent, self)),
        }
    }

    fn internal_set_prototype_of(
        self,
        agent: &mut Agent,
        prototype: Option<Object>,
    ) -> JsResult<bool> {
        match self.exotic_kind(agent) {
            ExoticKind::Proxy => proxy::proxy_set_prototype_of(agent, self, prototype),
            _ => Ok(ordinary_set_prototype_of(agent, self, prototype)),
        }
    }

    fn internal_is_extensible(self, agent: &mut Agent) -> JsResult<bool> {
        match self.exotic_kind(agent) {
            ExoticKind::Proxy => proxy::proxy_is_extensible(agent, self),
            _ => Ok(ordinary_is_extensible(agent, self)),
        }
    }

    fn internal_prevent_extensions(self, agent: &mut Agent) -> JsResult<bool> {
        match self.exotic_kind(agent) {
            ExoticKind::Proxy => proxy::proxy_prevent_extensions(agent, self),
            _ => Ok(ordinary_prevent_extensions(agent, self)),
        }
    }

    fn internal_get_own_property(
        self,
        agent: &mut Agent,
        property_key: PropertyKey,
    ) -> JsResult<Option<PropertyDescriptor>> {
        match self.exotic_kind(agent) {
            ExoticKind::Ordinary => Ok(ordinary_get_own_property(agent, self, property_key)),
            ExoticKind::Array => Ok(array_get_own_property(agent, self, property_key)),
            ExoticKind::Proxy => proxy::proxy_get_own_property(agent, self, property_key),
        }
    }

    fn internal_define_own_property(
        self,
        agent: &mut Agent,
        property_key: PropertyKey,
        property_descriptor: PropertyDescriptor,
    ) -> JsResult<bool> {
        match self.exotic_kind(agent) {
            ExoticKind::Ordinary => Ok(ordinary_define_own_property(
                agent,
                self,
                property_key,
                property_descriptor,
            )),
            ExoticKind::Array => {
                array_define_own_property(agent, self, property_key, property_descriptor)
            }
            ExoticKind::Proxy => {
                proxy::proxy_define_own_property(agent, self, property_key, property_descriptor)
            }
        }
    }

    fn internal_has_property(
        self,
        agent: &mut Agent,
        property_key: PropertyKey,
    ) -> JsResult<bool> {
        match self.exotic_kind(agent) {
            ExoticKind::Proxy => proxy::proxy_has_property(agent, self, property_key),
            _ => ordinary_has_property(agent, self, property_key),
        }
    }

    fn internal_get(
        self,
        agent: &mut Agent,
        property_key: PropertyKey,
        receiver: Value,
    ) -> JsResult<Value> {
        match self.exotic_kind(agent) {
            ExoticKind::Proxy => proxy::proxy_get(agent, self, property_key, receiver),
            _ => ordinary_get(agent, self, property_key, receiver),
        }
    }

    fn internal_set(
        self,
        agent: &mut Agent,
        property_key: PropertyKey,
        value: Value,
        receiver: Value,
    ) -> JsResult<bool> {
        match self.exotic_kind(agent) {
            ExoticKind::Proxy => proxy::proxy_set(agent, self, property_key, value, receiver),
            _ => ordinary_set(agent, self, property_key, value, receiver),
        }
    }

    fn internal_delete(self, agent: &mut Agent, property_key: PropertyKey) -> JsResult<bool> {
        match self.exotic_kind(agent) {
            ExoticKind::Ordinary => Ok(ordinary_delete(agent, self, property_key)),
            ExoticKind::Array => Ok(array_delete(agent, self, property_key)),
            ExoticKind::Proxy => proxy::proxy_delete(agent, self, property_key),
        }
    }

    fn internal_own_property_keys(self, agent: &mut Agent) -> JsResult<Vec<PropertyKey>> {
        match self.exotic_kind(agent) {
            ExoticKind::Ordinary => Ok(ordinary_own_property_keys(agent, self)),
            ExoticKind::Array => Ok(array_own_property_keys(agent, self)),
            ExoticKind::Proxy => proxy::proxy_own_property_keys(agent, self),
        }
    }

    fn internal_call(
        self,
        agent: &mut Agent,
        this_argument: Value,
        arguments_list: ArgumentsList,
    ) -> JsResult<Value> {
        match self.exotic_kind(agent) {
            ExoticKind::Proxy => proxy::proxy_call(agent, self, this_argument, arguments_list),
            _ => builtin_call(agent, self, this_argument, arguments_list),
        }
    }

    fn internal_construct(
        self,
        agent: &mut Agent,
        arguments_list: ArgumentsList,
        new_target: Object,
    ) -> JsResult<Object> {
        match self.exotic_kind(agent) {
            ExoticKind::Proxy => proxy::proxy_construct(agent, self, arguments_list, new_target),
            _ => builtin_construct(agent, self, arguments_list, new_target),
        }
    }
}
