// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    marker::PhantomData,
    num::NonZeroU32,
};

use crate::ecmascript::types::{ObjectHeapData, StringHeapData, SymbolHeapData};

/// Position of a `T` in one of the heap vectors, stored off by one so that
/// `Option<BaseIndex<T>>` stays four bytes wide.
pub struct BaseIndex<T>(NonZeroU32, PhantomData<fn() -> T>);

const _: () = assert!(size_of::<Option<BaseIndex<()>>>() == size_of::<u32>());

impl<T> BaseIndex<T> {
    pub const fn from_u32_index(index: u32) -> Self {
        match NonZeroU32::new(index.wrapping_add(1)) {
            Some(value) => Self(value, PhantomData),
            None => panic!("heap index overflow"),
        }
    }

    pub const fn into_index(self) -> usize {
        self.0.get() as usize - 1
    }

    /// Index of the most recently pushed entry of `heap_vec`.
    pub fn last(heap_vec: &[T]) -> Self {
        let len = u32::try_from(heap_vec.len()).unwrap_or(u32::MAX);
        assert!(len > 0, "no entries allocated");
        Self::from_u32_index(len - 1)
    }
}

// Derives would put bounds on `T`, which is only a marker.
impl<T> Clone for BaseIndex<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for BaseIndex<T> {}

impl<T> PartialEq for BaseIndex<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T> Eq for BaseIndex<T> {}

impl<T> PartialOrd for BaseIndex<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for BaseIndex<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl<T> Hash for BaseIndex<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl<T> fmt::Debug for BaseIndex<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.into_index())
    }
}

pub type ObjectIndex = BaseIndex<ObjectHeapData>;
pub type StringIndex = BaseIndex<StringHeapData>;
pub type SymbolIndex = BaseIndex<SymbolHeapData>;

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn indexes_are_off_by_one() {
        let index = BaseIndex::<()>::from_u32_index(0);
        assert_eq!(index.into_index(), 0);
        assert_eq!(BaseIndex::last(&[(), (), ()]).into_index(), 2);
        assert_eq!(format!("{index:?}"), "#0");
    }
}
