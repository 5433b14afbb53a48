// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mozilla legacy extensions on a small ECMAScript object model.
//!
//! The [`ecmascript`] module holds the object model: values, objects with
//! prototype links, property descriptors, builtin functions and proxies.
//! The [`legacy`] module builds on it:
//!
//! - `uneval` and the `toSource` methods serialize values back to source
//!   text,
//! - `Proxy.create` and `Proxy.createFunction` adapt old-style handlers to
//!   modern proxy traps,
//! - `Iterator` and the `iterator()` methods bridge the old iteration
//!   protocol to `@@iterator`.
//!
//! ```
//! use mozlegacy::{Agent, Options, ecmascript::types::Value, uneval};
//!
//! let mut agent = Agent::new(Options::default());
//! let source = uneval(&mut agent, Value::from(1.5)).unwrap();
//! assert_eq!(source.to_string_lossy(&agent), "1.5");
//! ```

pub mod ecmascript;
pub mod heap;
pub mod legacy;

pub use ecmascript::execution::{Agent, JsError, JsResult, Options};
pub use legacy::{
    LegacyIntrinsics, SourceContext, adapt, create_shim_iterator, initialize_legacy_extensions,
    is_iteration_object, proxy_create, proxy_create_function, uneval,
};
