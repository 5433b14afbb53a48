// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::{Object, PropertyKey};
use crate::ecmascript::{
    builtins::ArgumentsList,
    execution::{Agent, JsResult},
    types::{PropertyDescriptor, Value},
};

/// ### [6.1.7.2 Object Internal Methods and Internal Slots](https://tc39.es/ecma262/#sec-object-internal-methods-and-internal-slots)
pub trait InternalMethods
where
    Self: Sized + Copy,
{
    /// ## \[\[GetPrototypeOf\]\]
    fn internal_get_prototype_of(self, agent: &mut Agent) -> JsResult<Option<Object>>;

    /// ## \[\[SetPrototypeOf\]\]
    fn internal_set_prototype_of(
        self,
        agent: &mut Agent,
        prototype: Option<Object>,
    ) -> JsResult<bool>;

    /// ## \[\[IsExtensible\]\]
    fn internal_is_extensible(self, agent: &mut Agent) -> JsResult<bool>;

    /// ## \[\[PreventExtensions\]\]
    fn internal_prevent_extensions(self, agent: &mut Agent) -> JsResult<bool>;

    /// ## \[\[GetOwnProperty\]\]
    fn internal_get_own_property(
        self,
        agent: &mut Agent,
        property_key: PropertyKey,
    ) -> JsResult<Option<PropertyDescriptor>>;

    /// ## \[\[DefineOwnProperty\]\]
    fn internal_define_own_property(
        self,
        agent: &mut Agent,
        property_key: PropertyKey,
        property_descriptor: PropertyDescriptor,
    ) -> JsResult<bool>;

    /// ## \[\[HasProperty\]\]
    fn internal_has_property(self, agent: &mut Agent, property_key: PropertyKey)
    -> JsResult<bool>;

    /// ## \[\[Get\]\]
    fn internal_get(
        self,
        agent: &mut Agent,
        property_key: PropertyKey,
        receiver: Value,
    ) -> JsResult<Value>;

    /// ## \[\[Set\]\]
    fn internal_set(
        self,
        agent: &mut Agent,
        property_key: PropertyKey,
        value: Value,
        receiver: Value,
    ) -> JsResult<bool>;

    /// ## \[\[Delete\]\]
    fn internal_delete(self, agent: &mut Agent, property_key: PropertyKey) -> JsResult<bool>;

    /// ## \[\[OwnPropertyKeys\]\]
    fn internal_own_property_keys(self, agent: &mut Agent) -> JsResult<Vec<PropertyKey>>;

    /// ## \[\[Call\]\]
    ///
    /// Only function objects have this method. Callers must check
    /// [`is_callable`](crate::ecmascript::abstract_operations::testing_and_comparison::is_callable)
    /// first.
    fn internal_call(
        self,
        agent: &mut Agent,
        this_argument: Value,
        arguments_list: ArgumentsList,
    ) -> JsResult<Value>;

    /// ## \[\[Construct\]\]
    fn internal_construct(
        self,
        agent: &mut Agent,
        arguments_list: ArgumentsList,
        new_target: Object,
    ) -> JsResult<Object>;
}
