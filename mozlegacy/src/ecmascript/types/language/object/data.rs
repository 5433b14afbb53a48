// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::{Object, PropertyStorage};
use crate::ecmascript::builtins::{
    ArrayHeapData, BuiltinFunctionHeapData, DateHeapData, ErrorHeapData, IteratorHeapData,
    MapHeapData, PrimitiveObjectData, ProxyHeapData, RegExpHeapData, SetHeapData,
};

#[derive(Debug)]
pub struct ObjectHeapData {
    pub(crate) prototype: Option<Object>,
    pub(crate) extensible: bool,
    pub(crate) properties: PropertyStorage,
    pub(crate) kind: ObjectKind,
}

impl ObjectHeapData {
    pub(crate) fn new(prototype: Option<Object>, kind: ObjectKind) -> Self {
        Self {
            prototype,
            extensible: true,
            properties: PropertyStorage::default(),
            kind,
        }
    }
}

/// Internal slots beyond the ordinary ones.
#[derive(Debug)]
pub enum ObjectKind {
    Ordinary,
    Array(ArrayHeapData),
    BuiltinFunction(BuiltinFunctionHeapData),
    Proxy(ProxyHeapData),
    Primitive(PrimitiveObjectData),
    Error(ErrorHeapData),
    Date(DateHeapData),
    RegExp(RegExpHeapData),
    Map(MapHeapData),
    Set(SetHeapData),
    Iterator(IteratorHeapData),
}

/// Which set of internal methods an object uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ExoticKind {
    Ordinary,
    Array,
    Proxy,
}

impl ObjectKind {
    pub(crate) fn exotic_kind(&self) -> ExoticKind {
        match self {
            ObjectKind::Array(_) => ExoticKind::Array,
            ObjectKind::Proxy(_) => ExoticKind::Proxy,
            _ => ExoticKind::Ordinary,
        }
    }
}
