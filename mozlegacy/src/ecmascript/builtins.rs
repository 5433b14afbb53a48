// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ## [10 Ordinary and Exotic Objects Behaviours](https://tc39.es/ecma262/#sec-ordinary-and-exotic-objects-behaviours)
//!
//! Together with the handful of builtin objects the legacy extensions build
//! on.

pub mod array;
pub(crate) mod builtin_function;
pub mod date;
pub mod error;
pub(crate) mod fundamental_objects;
pub mod iterator;
pub mod map;
pub mod ordinary;
pub(crate) mod primitive_objects;
pub mod proxy;
pub mod regexp;
pub mod set;

pub use array::ArrayHeapData;
pub use builtin_function::{
    ArgumentsList, Behaviour, Builtin, BuiltinFunctionArgs, BuiltinFunctionHeapData,
    BuiltinGetter, ClosureFn, ConstructorFn, RegularFn, create_builtin_function,
};
pub(crate) use date::DatePrototype;
pub use date::{DateHeapData, create_date};
pub(crate) use error::ErrorPrototype;
pub use error::{ErrorHeapData, create_error};
pub(crate) use iterator::ListIteratorPrototype;
pub use iterator::{IterationSource, IteratorHeapData, IteratorState, create_list_iterator};
pub(crate) use map::MapPrototype;
pub use map::{MapHeapData, map_create};
pub use primitive_objects::{PrimitiveObjectData, create_primitive_object};
pub use proxy::{ProxyHeapData, TrapTable, create_proxy};
pub(crate) use regexp::RegExpPrototype;
pub use regexp::{RegExpHeapData, regexp_create};
pub(crate) use set::SetPrototype;
pub use set::{SetHeapData, set_create};
