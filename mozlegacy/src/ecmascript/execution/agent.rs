// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::ops::{Index, IndexMut};

use tracing::{debug, trace};

use super::{Intrinsics, Realm};
use crate::{
    ecmascript::{
        abstract_operations::type_conversion::to_string,
        builtins::ErrorHeapData,
        types::{Object, ObjectHeapData, ObjectKind, PropertyKey, StoredProperty, String, Value},
    },
    heap::{CreateHeapData, Heap},
    legacy::{self, SourceContext},
};

#[derive(Debug, Default, Clone, Copy)]
pub struct Options {
    /// Skip installing the legacy extensions on agent creation. They can
    /// still be installed later with
    /// [`initialize_legacy_extensions`](crate::legacy::initialize_legacy_extensions).
    pub disable_legacy_extensions: bool,
    /// Log every created intrinsic at debug level.
    pub print_internals: bool,
}

pub type JsResult<T> = std::result::Result<T, JsError>;

/// A thrown ECMAScript value.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct JsError(pub(crate) Value);

impl JsError {
    pub(crate) fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn value(self) -> Value {
        self.0
    }

    /// Stringifies the thrown value. Errors thrown while stringifying are
    /// swallowed.
    pub fn to_string(self, agent: &mut Agent) -> std::string::String {
        match to_string(agent, self.0) {
            Ok(message) => message.to_string_lossy(agent),
            Err(_) => "<unprintable exception>".to_owned(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExceptionType {
    Error,
    EvalError,
    RangeError,
    ReferenceError,
    SyntaxError,
    TypeError,
    UriError,
}

impl ExceptionType {
    pub const fn name(self) -> &'static str {
        match self {
            ExceptionType::Error => "Error",
            ExceptionType::EvalError => "EvalError",
            ExceptionType::RangeError => "RangeError",
            ExceptionType::ReferenceError => "ReferenceError",
            ExceptionType::SyntaxError => "SyntaxError",
            ExceptionType::TypeError => "TypeError",
            ExceptionType::UriError => "URIError",
        }
    }
}

/// ### [9.7 Agents](https://tc39.es/ecma262/#sec-agents)
///
/// An agent owns the heap and the single realm that the legacy extensions
/// are installed into.
#[derive(Debug)]
pub struct Agent {
    pub(crate) heap: Heap,
    pub(crate) options: Options,
    pub(crate) realm: Realm,
    /// Re-entrancy state of source serialization.
    pub(crate) source_context: SourceContext,
}

impl Agent {
    pub fn new(options: Options) -> Self {
        let mut heap = Heap::new();
        let intrinsics = Intrinsics::allocate(&mut heap);
        let mut agent = Self {
            heap,
            options,
            realm: Realm::new(intrinsics),
            source_context: SourceContext::default(),
        };
        Intrinsics::initialize(&mut agent);
        if !options.disable_legacy_extensions {
            legacy::initialize_legacy_extensions(&mut agent);
        }
        debug!(objects = agent.heap.objects.len(), "agent created");
        agent
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn current_realm(&self) -> &Realm {
        &self.realm
    }

    pub(crate) fn current_realm_mut(&mut self) -> &mut Realm {
        &mut self.realm
    }

    pub fn intrinsics(&self) -> Intrinsics {
        self.realm.intrinsics
    }

    pub fn global_object(&self) -> Object {
        self.realm.intrinsics.global_object()
    }

    pub fn source_context(&self) -> &SourceContext {
        &self.source_context
    }

    /// ### [5.2.3.2 Throw an Exception](https://tc39.es/ecma262/#sec-throw-an-exception)
    pub fn throw_exception(&mut self, kind: ExceptionType, message: &str) -> JsError {
        let message = String::from_str(self, message);
        self.throw_exception_with_string(kind, message)
    }

    pub fn throw_exception_with_message(
        &mut self,
        kind: ExceptionType,
        message: std::string::String,
    ) -> JsError {
        let message = String::from_string(self, message);
        self.throw_exception_with_string(kind, message)
    }

    fn throw_exception_with_string(&mut self, kind: ExceptionType, message: String) -> JsError {
        trace!(kind = kind.name(), message = %message.to_string_lossy(self), "throwing");
        let error = create_error_object(self, kind, Some(message));
        JsError::new(Value::Object(error))
    }
}

/// Allocates an error object of the given kind with an optional own
/// `message` property.
pub(crate) fn create_error_object(
    agent: &mut Agent,
    kind: ExceptionType,
    message: Option<String>,
) -> Object {
    let prototype = agent.intrinsics().error_prototype_for(kind);
    let error = agent.heap.create(ObjectHeapData::new(
        Some(prototype),
        ObjectKind::Error(ErrorHeapData::new(kind)),
    ));
    if let Some(message) = message {
        let key = PropertyKey::from_str(agent, "message");
        agent[error].properties.insert(
            key,
            StoredProperty::data(Value::String(message), true, false, true),
        );
    }
    error
}

impl Index<Object> for Agent {
    type Output = ObjectHeapData;

    fn index(&self, index: Object) -> &Self::Output {
        &self.heap[index]
    }
}

impl IndexMut<Object> for Agent {
    fn index_mut(&mut self, index: Object) -> &mut Self::Output {
        &mut self.heap[index]
    }
}
