// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::ecmascript::{
    abstract_operations::{
        operations_on_objects::{create_data_property_or_throw, get, has_property},
        testing_and_comparison::is_callable,
        type_conversion::to_boolean,
    },
    builtins::ordinary::ordinary_object_create,
    execution::{Agent, ExceptionType, JsResult},
    types::{Object, PropertyKey, Value},
};

/// ### [6.2.6 The Property Descriptor Specification Type](https://tc39.es/ecma262/#sec-property-descriptor-specification-type)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PropertyDescriptor {
    /// \[\[Value]]
    pub value: Option<Value>,

    /// \[\[Writable]]
    pub writable: Option<bool>,

    /// \[\[Get]]
    ///
    /// Note: double-Option because these fields can be set explicitly undefined
    /// to unset them.
    pub get: Option<Option<Object>>,

    /// \[\[Set]]
    ///
    /// Note: double-Option because these fields can be set explicitly undefined
    /// to unset them.
    pub set: Option<Option<Object>>,

    /// \[\[Enumerable]]
    pub enumerable: Option<bool>,

    /// \[\[Configurable]]
    pub configurable: Option<bool>,
}

impl PropertyDescriptor {
    pub fn new_data_descriptor(value: impl Into<Value>) -> Self {
        Self {
            value: Some(value.into()),
            writable: Some(true),
            get: None,
            set: None,
            enumerable: Some(true),
            configurable: Some(true),
        }
    }

    pub fn new_prototype_method_descriptor(function: Object) -> Self {
        Self {
            value: Some(function.into()),
            writable: Some(true),
            enumerable: Some(false),
            configurable: Some(true),
            ..Default::default()
        }
    }

    /// ### [6.2.6.1 IsAccessorDescriptor ( Desc )](https://tc39.es/ecma262/#sec-isaccessordescriptor)
    pub fn is_accessor_descriptor(&self) -> bool {
        // 1. If Desc is undefined, return false.
        // 2. If Desc has a [[Get]] field, return true.
        // 3. If Desc has a [[Set]] field, return true.
        // 4. Return false.
        self.get.is_some() || self.set.is_some()
    }

    /// ### [6.2.6.2 IsDataDescriptor ( Desc )](https://tc39.es/ecma262/#sec-isdatadescriptor)
    pub fn is_data_descriptor(&self) -> bool {
        // 1. If Desc is undefined, return false.
        // 2. If Desc has a [[Value]] field, return true.
        // 3. If Desc has a [[Writable]] field, return true.
        // 4. Return false.
        self.value.is_some() || self.writable.is_some()
    }

    /// ### [6.2.6.3 IsGenericDescriptor ( Desc )](https://tc39.es/ecma262/#sec-isgenericdescriptor)
    pub fn is_generic_descriptor(&self) -> bool {
        !self.is_accessor_descriptor() && !self.is_data_descriptor()
    }

    /// ### [6.2.6.4 FromPropertyDescriptor ( Desc )](https://tc39.es/ecma262/#sec-frompropertydescriptor)
    ///
    /// Returns undefined for an absent descriptor.
    pub fn from_property_descriptor(agent: &mut Agent, desc: Option<Self>) -> Value {
        // 1. If Desc is undefined, return undefined.
        let Some(desc) = desc else {
            return Value::Undefined;
        };
        // 2. Let obj be OrdinaryObjectCreate(%Object.prototype%).
        let object_prototype = agent.intrinsics().object_prototype();
        let obj = ordinary_object_create(agent, Some(object_prototype));
        let mut entries: Vec<(&str, Value)> = Vec::with_capacity(4);
        // 4. If Desc has a [[Value]] field, then
        if let Some(value) = desc.value {
            entries.push(("value", value));
        }
        // 5. If Desc has a [[Writable]] field, then
        if let Some(writable) = desc.writable {
            entries.push(("writable", writable.into()));
        }
        // 6. If Desc has a [[Get]] field, then
        if let Some(getter) = desc.get {
            entries.push(("get", getter.map_or(Value::Undefined, Value::Object)));
        }
        // 7. If Desc has a [[Set]] field, then
        if let Some(setter) = desc.set {
            entries.push(("set", setter.map_or(Value::Undefined, Value::Object)));
        }
        // 8. If Desc has an [[Enumerable]] field, then
        if let Some(enumerable) = desc.enumerable {
            entries.push(("enumerable", enumerable.into()));
        }
        // 9. If Desc has a [[Configurable]] field, then
        if let Some(configurable) = desc.configurable {
            entries.push(("configurable", configurable.into()));
        }
        for (name, value) in entries {
            let key = PropertyKey::from_str(agent, name);
            // a. Perform ! CreateDataPropertyOrThrow(obj, name, value).
            create_data_property_or_throw(agent, obj, key, value)
                .expect("fresh ordinary objects accept data properties");
        }
        // 10. Return obj.
        Value::Object(obj)
    }

    /// ### [6.2.6.5 ToPropertyDescriptor ( Obj )](https://tc39.es/ecma262/#sec-topropertydescriptor)
    pub fn to_property_descriptor(agent: &mut Agent, obj: Value) -> JsResult<Self> {
        // 1. If Obj is not an Object, throw a TypeError exception.
        let Ok(obj) = Object::try_from(obj) else {
            return Err(agent.throw_exception(
                ExceptionType::TypeError,
                "Property descriptor must be an object",
            ));
        };
        // 2. Let desc be a new Property Descriptor that initially has no
        // fields.
        let mut desc = PropertyDescriptor::default();
        // 3-4. enumerable
        if let Some(enumerable) = get_field(agent, obj, "enumerable")? {
            desc.enumerable = Some(to_boolean(agent, enumerable));
        }
        // 5-6. configurable
        if let Some(configurable) = get_field(agent, obj, "configurable")? {
            desc.configurable = Some(to_boolean(agent, configurable));
        }
        // 7-8. value
        if let Some(value) = get_field(agent, obj, "value")? {
            desc.value = Some(value);
        }
        // 9-10. writable
        if let Some(writable) = get_field(agent, obj, "writable")? {
            desc.writable = Some(to_boolean(agent, writable));
        }
        // 11-12. get
        if let Some(getter) = get_field(agent, obj, "get")? {
            desc.get = Some(to_accessor_function(agent, getter, "getter")?);
        }
        // 13-14. set
        if let Some(setter) = get_field(agent, obj, "set")? {
            desc.set = Some(to_accessor_function(agent, setter, "setter")?);
        }
        // 15. If desc has a [[Get]] field or desc has a [[Set]] field, then
        if desc.is_accessor_descriptor() && desc.is_data_descriptor() {
            // a. If desc has a [[Value]] field or desc has a [[Writable]]
            //    field, throw a TypeError exception.
            return Err(agent.throw_exception(
                ExceptionType::TypeError,
                "Invalid property descriptor. Cannot both specify accessors and a value or writable attribute",
            ));
        }
        // 16. Return desc.
        Ok(desc)
    }

    /// ### [6.2.6.6 CompletePropertyDescriptor ( Desc )](https://tc39.es/ecma262/#sec-completepropertydescriptor)
    pub fn complete_property_descriptor(&mut self) {
        // 2. If IsGenericDescriptor(Desc) is true or IsDataDescriptor(Desc) is true, then
        if self.is_generic_descriptor() || self.is_data_descriptor() {
            // a. If Desc does not have a [[Value]] field, set Desc.[[Value]] to like.[[Value]].
            self.value.get_or_insert(Value::Undefined);
            // b. If Desc does not have a [[Writable]] field, set Desc.[[Writable]] to like.[[Writable]].
            self.writable.get_or_insert(false);
        } else {
            // 3. Else,
            self.get.get_or_insert(None);
            self.set.get_or_insert(None);
        }
        // 4. If Desc does not have an [[Enumerable]] field, set Desc.[[Enumerable]] to like.[[Enumerable]].
        self.enumerable.get_or_insert(false);
        // 5. If Desc does not have a [[Configurable]] field, set Desc.[[Configurable]] to like.[[Configurable]].
        self.configurable.get_or_insert(false);
    }

    pub fn is_fully_populated(&self) -> bool {
        ((self.value.is_some() && self.writable.is_some())
            // A property descriptor can contain just get or set.
            || self.get.is_some() || self.set.is_some())
            && self.enumerable.is_some()
            && self.configurable.is_some()
    }

    pub fn has_fields(&self) -> bool {
        self.value.is_some()
            || self.writable.is_some()
            || self.get.is_some()
            || self.set.is_some()
            || self.enumerable.is_some()
            || self.configurable.is_some()
    }
}

/// `HasProperty(Obj, name)` followed by `Get(Obj, name)`.
fn get_field(agent: &mut Agent, obj: Object, name: &str) -> JsResult<Option<Value>> {
    let key = PropertyKey::from_str(agent, name);
    if !has_property(agent, obj, key)? {
        return Ok(None);
    }
    get(agent, obj, key).map(Some)
}

fn to_accessor_function(agent: &mut Agent, value: Value, what: &str) -> JsResult<Option<Object>> {
    if value.is_undefined() {
        return Ok(None);
    }
    match is_callable(agent, value) {
        Some(function) => Ok(Some(function)),
        None => Err(agent.throw_exception_with_message(
            ExceptionType::TypeError,
            format!("{what} is not callable"),
        )),
    }
}
