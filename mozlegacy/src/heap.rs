// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Arena storage for all heap-allocated values of an [`Agent`].
//!
//! Values never move and are never collected: an index handed out by the
//! heap stays valid for the lifetime of the agent that owns it.
//!
//! [`Agent`]: crate::ecmascript::execution::Agent

pub mod indexes;

use std::ops::{Index, IndexMut};

use ahash::AHashMap;
use wtf8::{Wtf8, Wtf8Buf};

use self::indexes::{ObjectIndex, StringIndex, SymbolIndex};
use crate::ecmascript::types::{
    Object, ObjectHeapData, String, StringHeapData, Symbol, SymbolHeapData,
};

#[derive(Debug)]
pub struct Heap {
    pub(crate) objects: Vec<ObjectHeapData>,
    pub(crate) strings: Vec<StringHeapData>,
    /// Strings are interned: two equal strings always share one index, so
    /// [`String`] equality is index equality.
    string_lookup: AHashMap<Wtf8Buf, StringIndex>,
    pub(crate) symbols: Vec<SymbolHeapData>,
}

/// Well-known symbols are allocated first, in this order, so that their
/// indexes are known statically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub(crate) enum WellKnownSymbolIndexes {
    Iterator,
}

impl WellKnownSymbolIndexes {
    pub(crate) const fn to_symbol(self) -> Symbol {
        Symbol(SymbolIndex::from_u32_index(self as u32))
    }
}

pub trait CreateHeapData<T, F> {
    /// Allocates the given data on the heap and returns a handle to it.
    fn create(&mut self, data: T) -> F;
}

impl Heap {
    pub(crate) fn new() -> Self {
        let mut heap = Self {
            objects: Vec::with_capacity(256),
            strings: Vec::with_capacity(256),
            string_lookup: AHashMap::with_capacity(256),
            symbols: Vec::with_capacity(8),
        };
        let empty = heap.intern_str("");
        debug_assert_eq!(empty, String::EMPTY_STRING);
        let description = heap.intern_str("Symbol.iterator");
        let iterator = heap.create(SymbolHeapData {
            descriptor: Some(description),
        });
        debug_assert_eq!(iterator, WellKnownSymbolIndexes::Iterator.to_symbol());
        heap
    }

    pub(crate) fn intern_str(&mut self, data: &str) -> String {
        self.intern_wtf8(Wtf8::from_str(data))
    }

    pub(crate) fn intern_wtf8(&mut self, data: &Wtf8) -> String {
        let mut buf = Wtf8Buf::with_capacity(data.len());
        buf.push_wtf8(data);
        self.intern_wtf8_buf(buf)
    }

    pub(crate) fn intern_wtf8_buf(&mut self, data: Wtf8Buf) -> String {
        if let Some(index) = self.string_lookup.get(&data) {
            return String(*index);
        }
        self.strings.push(StringHeapData::new(data.clone()));
        let index = StringIndex::last(&self.strings);
        self.string_lookup.insert(data, index);
        String(index)
    }
}

impl CreateHeapData<ObjectHeapData, Object> for Heap {
    fn create(&mut self, data: ObjectHeapData) -> Object {
        self.objects.push(data);
        Object(ObjectIndex::last(&self.objects))
    }
}

impl CreateHeapData<SymbolHeapData, Symbol> for Heap {
    fn create(&mut self, data: SymbolHeapData) -> Symbol {
        self.symbols.push(data);
        Symbol(SymbolIndex::last(&self.symbols))
    }
}

impl Index<Object> for Heap {
    type Output = ObjectHeapData;

    fn index(&self, index: Object) -> &Self::Output {
        self.objects
            .get(index.0.into_index())
            .expect("Object out of bounds")
    }
}

impl IndexMut<Object> for Heap {
    fn index_mut(&mut self, index: Object) -> &mut Self::Output {
        self.objects
            .get_mut(index.0.into_index())
            .expect("Object out of bounds")
    }
}

impl Index<String> for Heap {
    type Output = StringHeapData;

    fn index(&self, index: String) -> &Self::Output {
        self.strings
            .get(index.0.into_index())
            .expect("String out of bounds")
    }
}

impl Index<Symbol> for Heap {
    type Output = SymbolHeapData;

    fn index(&self, index: Symbol) -> &Self::Output {
        self.symbols
            .get(index.0.into_index())
            .expect("Symbol out of bounds")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn strings_are_interned() {
        let mut heap = Heap::new();
        let a = heap.intern_str("hello");
        let b = heap.intern_wtf8_buf(Wtf8Buf::from_str("hello"));
        let c = heap.intern_str("world");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn well_known_symbols_come_first() {
        let heap = Heap::new();
        let iterator = WellKnownSymbolIndexes::Iterator.to_symbol();
        let description = heap[iterator].descriptor.unwrap();
        assert_eq!(
            heap[description].as_wtf8().as_str(),
            Some("Symbol.iterator")
        );
    }
}
