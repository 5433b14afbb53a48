// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

mod function_prototype;
mod object_prototype;
mod symbol_prototype;

pub(crate) use function_prototype::{FunctionPrototype, function_source_text};
pub(crate) use object_prototype::ObjectPrototype;
pub(crate) use symbol_prototype::SymbolPrototype;
