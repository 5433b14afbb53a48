// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::builtin_function_builder::BuiltinFunctionBuilder;
use crate::{
    ecmascript::{
        builtins::{Builtin, BuiltinGetter},
        execution::Agent,
        types::{
            Object, ObjectHeapData, ObjectKind, PropertyKey, PropertyValue, StoredProperty, Value,
        },
    },
    heap::CreateHeapData,
};

/// Populates a new or pre-allocated object with properties.
///
/// Intrinsic objects are allocated up front so that their prototypes can
/// refer to each other; their builders fill them in afterwards.
pub struct OrdinaryObjectBuilder<'agent> {
    pub(crate) agent: &'agent mut Agent,
    this: Option<Object>,
    prototype: Option<Option<Object>>,
    extensible: bool,
    properties: Vec<(PropertyKey, StoredProperty)>,
}

impl<'agent> OrdinaryObjectBuilder<'agent> {
    #[must_use]
    pub fn new(agent: &'agent mut Agent) -> Self {
        Self {
            agent,
            this: None,
            prototype: None,
            extensible: true,
            properties: Vec::new(),
        }
    }

    #[must_use]
    pub(crate) fn new_intrinsic_object(agent: &'agent mut Agent, this: Object) -> Self {
        Self {
            agent,
            this: Some(this),
            prototype: None,
            extensible: true,
            properties: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_prototype(self, prototype: Object) -> Self {
        Self {
            prototype: Some(Some(prototype)),
            ..self
        }
    }

    #[must_use]
    pub fn with_extensible(self, extensible: bool) -> Self {
        Self { extensible, ..self }
    }

    #[must_use]
    pub fn with_property_capacity(mut self, cap: usize) -> Self {
        self.properties.reserve_exact(cap);
        self
    }

    /// Adds a writable, non-enumerable, configurable data property.
    #[must_use]
    pub fn with_data_property(self, key: PropertyKey, value: Value) -> Self {
        self.with_property(key, StoredProperty::data(value, true, false, true))
    }

    #[must_use]
    pub fn with_property(mut self, key: PropertyKey, property: StoredProperty) -> Self {
        self.properties.push((key, property));
        self
    }

    #[must_use]
    pub fn with_builtin_function_property<T: Builtin>(mut self) -> Self {
        let (value, key) = {
            let builder = BuiltinFunctionBuilder::new::<T>(self.agent);
            let name = builder.get_name();
            let func = builder.build();
            let key = T::KEY.unwrap_or_else(|| PropertyKey::from_str(self.agent, name));
            (Value::Object(func), key)
        };
        self.with_property(
            key,
            StoredProperty::data(value, T::WRITABLE, T::ENUMERABLE, T::CONFIGURABLE),
        )
    }

    #[must_use]
    pub(crate) fn with_builtin_function_getter_property<T: BuiltinGetter>(mut self) -> Self {
        let getter_function = BuiltinFunctionBuilder::new::<T>(self.agent)
            .with_prefix("get")
            .build();
        let key = T::KEY.unwrap_or_else(|| PropertyKey::from_str(self.agent, T::NAME));
        self.with_property(
            key,
            StoredProperty {
                value: PropertyValue::Accessor {
                    get: Some(getter_function),
                    set: None,
                },
                enumerable: T::ENUMERABLE,
                configurable: T::CONFIGURABLE,
            },
        )
    }

    pub fn build(self) -> Object {
        {
            let slice = self.properties.as_slice();
            let duplicate = (1..slice.len()).find(|first_index| {
                slice[*first_index..]
                    .iter()
                    .any(|(key, _)| *key == slice[first_index - 1].0)
            });
            debug_assert!(duplicate.is_none(), "Duplicate key found: {duplicate:?}");
        }
        let this = match self.this {
            Some(this) => this,
            None => self
                .agent
                .heap
                .create(ObjectHeapData::new(None, ObjectKind::Ordinary)),
        };
        let data = &mut self.agent[this];
        if let Some(prototype) = self.prototype {
            data.prototype = prototype;
        }
        data.extensible = self.extensible;
        for (key, property) in self.properties {
            data.properties.insert(key, property);
        }
        this
    }
}
