// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use hashbrown::HashMap;

use super::{Object, PropertyKey};
use crate::ecmascript::types::{PropertyDescriptor, Value};

/// The value half of a stored property.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PropertyValue {
    Data { value: Value, writable: bool },
    Accessor { get: Option<Object>, set: Option<Object> },
}

/// A fully populated own property as kept by ordinary objects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StoredProperty {
    pub value: PropertyValue,
    pub enumerable: bool,
    pub configurable: bool,
}

impl StoredProperty {
    pub fn data(value: Value, writable: bool, enumerable: bool, configurable: bool) -> Self {
        Self {
            value: PropertyValue::Data { value, writable },
            enumerable,
            configurable,
        }
    }

    pub fn to_descriptor(self) -> PropertyDescriptor {
        match self.value {
            PropertyValue::Data { value, writable } => PropertyDescriptor {
                value: Some(value),
                writable: Some(writable),
                get: None,
                set: None,
                enumerable: Some(self.enumerable),
                configurable: Some(self.configurable),
            },
            PropertyValue::Accessor { get, set } => PropertyDescriptor {
                value: None,
                writable: None,
                get: Some(get),
                set: Some(set),
                enumerable: Some(self.enumerable),
                configurable: Some(self.configurable),
            },
        }
    }

    /// Builds a stored property from a descriptor, filling absent fields
    /// with their defaults.
    pub fn from_descriptor(descriptor: &PropertyDescriptor) -> Self {
        let value = if descriptor.is_accessor_descriptor() {
            PropertyValue::Accessor {
                get: descriptor.get.flatten(),
                set: descriptor.set.flatten(),
            }
        } else {
            PropertyValue::Data {
                value: descriptor.value.unwrap_or_default(),
                writable: descriptor.writable.unwrap_or(false),
            }
        };
        Self {
            value,
            enumerable: descriptor.enumerable.unwrap_or(false),
            configurable: descriptor.configurable.unwrap_or(false),
        }
    }
}

/// Own properties of an object, kept in insertion order.
///
/// Removal leaves a hole so that indexes held in the lookup table stay
/// valid; holes are skipped when listing keys.
#[derive(Debug, Default)]
pub struct PropertyStorage {
    lookup: HashMap<PropertyKey, usize>,
    entries: Vec<Option<(PropertyKey, StoredProperty)>>,
}

impl PropertyStorage {
    pub fn len(&self) -> usize {
        self.lookup.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lookup.is_empty()
    }

    pub fn contains(&self, key: PropertyKey) -> bool {
        self.lookup.contains_key(&key)
    }

    pub fn get(&self, key: PropertyKey) -> Option<&StoredProperty> {
        let index = *self.lookup.get(&key)?;
        self.entries[index].as_ref().map(|(_, property)| property)
    }

    pub fn get_mut(&mut self, key: PropertyKey) -> Option<&mut StoredProperty> {
        let index = *self.lookup.get(&key)?;
        self.entries[index].as_mut().map(|(_, property)| property)
    }

    /// Inserts or replaces a property. Replacing keeps the original
    /// insertion position.
    pub fn insert(&mut self, key: PropertyKey, property: StoredProperty) {
        if let Some(&index) = self.lookup.get(&key) {
            self.entries[index] = Some((key, property));
            return;
        }
        self.entries.push(Some((key, property)));
        self.lookup.insert(key, self.entries.len() - 1);
    }

    pub fn remove(&mut self, key: PropertyKey) -> Option<StoredProperty> {
        let index = self.lookup.remove(&key)?;
        let (_, property) = self.entries[index].take()?;
        if self.lookup.is_empty() {
            self.entries.clear();
        }
        Some(property)
    }

    /// ### [10.1.11.1 OrdinaryOwnPropertyKeys ( O )](https://tc39.es/ecma262/#sec-ordinaryownpropertykeys)
    ///
    /// Array indexes in ascending order, then strings and then symbols, each
    /// in insertion order.
    pub fn keys(&self) -> Vec<PropertyKey> {
        let mut integers = Vec::new();
        let mut strings = Vec::new();
        let mut symbols = Vec::new();
        for (key, _) in self.entries.iter().flatten() {
            match key {
                PropertyKey::Integer(index) => integers.push(*index),
                PropertyKey::String(_) => strings.push(*key),
                PropertyKey::Symbol(_) => symbols.push(*key),
            }
        }
        integers.sort_unstable();
        let mut keys = Vec::with_capacity(self.len());
        keys.extend(integers.into_iter().map(PropertyKey::Integer));
        keys.extend(strings);
        keys.extend(symbols);
        keys
    }

    /// Keys of the stored array indexes at or above `start`.
    pub fn integer_keys_from(&self, start: u32) -> Vec<u32> {
        self.lookup
            .keys()
            .filter_map(|key| match key {
                PropertyKey::Integer(index) if *index >= start => Some(*index),
                _ => None,
            })
            .collect()
    }
}
