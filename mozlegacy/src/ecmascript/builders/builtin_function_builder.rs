// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::ecmascript::{
    builtins::{Behaviour, Builtin, BuiltinFunctionArgs, create_builtin_function},
    execution::Agent,
    types::{Object, PropertyKey, StoredProperty, Value},
};

pub struct BuiltinFunctionBuilder<'agent> {
    pub(crate) agent: &'agent mut Agent,
    name: &'static str,
    length: u8,
    prefix: Option<&'static str>,
    prototype: Option<Object>,
    behaviour: Behaviour,
    properties: Vec<(PropertyKey, Value)>,
}

impl<'agent> BuiltinFunctionBuilder<'agent> {
    #[must_use]
    pub fn new<T: Builtin>(agent: &'agent mut Agent) -> Self {
        Self {
            agent,
            name: T::NAME,
            length: T::LENGTH,
            prefix: None,
            prototype: None,
            behaviour: T::BEHAVIOUR,
            properties: Vec::new(),
        }
    }

    #[must_use]
    pub(crate) fn with_prefix(self, prefix: &'static str) -> Self {
        Self {
            prefix: Some(prefix),
            ..self
        }
    }

    #[must_use]
    pub fn with_prototype(self, prototype: Object) -> Self {
        Self {
            prototype: Some(prototype),
            ..self
        }
    }

    /// Adds a writable, non-enumerable, configurable data property.
    #[must_use]
    pub fn with_data_property(mut self, key: PropertyKey, value: Value) -> Self {
        self.properties.push((key, value));
        self
    }

    pub fn get_name(&self) -> &'static str {
        self.name
    }

    pub fn build(self) -> Object {
        let func = create_builtin_function(
            self.agent,
            self.behaviour,
            BuiltinFunctionArgs {
                length: u32::from(self.length),
                name: self.name,
                prototype: self.prototype,
                prefix: self.prefix,
                source_text: None,
            },
        );
        for (key, value) in self.properties {
            debug_assert!(!self.agent[func].properties.contains(key));
            self.agent[func]
                .properties
                .insert(key, StoredProperty::data(value, true, false, true));
        }
        func
    }
}
