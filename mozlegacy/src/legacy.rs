// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The Mozilla legacy extensions: source serialization, the
//! `Proxy.create` handler protocol and the `Iterator` shim.

#[cfg(feature = "accessor-methods")]
mod accessors;
pub mod iterator;
pub mod proxy_adapter;
pub mod quote;
pub mod to_source;

pub use iterator::{create_shim_iterator, is_iteration_object};
pub use proxy_adapter::{LegacyTrap, adapt, proxy_create, proxy_create_function};
pub use quote::quote;
pub use to_source::{SourceContext, uneval};

use tracing::debug;

use crate::ecmascript::{
    execution::Agent,
    types::{Object, Symbol},
};

/// Objects the legacy extensions add to a realm.
#[derive(Debug, Clone, Copy)]
pub struct LegacyIntrinsics {
    /// Key of the private next capability of iteration objects.
    pub next_symbol: Symbol,
    /// %Iterator.prototype%
    pub iterator_prototype: Object,
    /// %Iterator%
    pub iterator_constructor: Object,
}

/// Installs the legacy extensions into the agent's realm. Installing twice
/// returns the existing intrinsics.
pub fn initialize_legacy_extensions(agent: &mut Agent) -> LegacyIntrinsics {
    if let Some(legacy) = agent.current_realm().legacy {
        return legacy;
    }
    let legacy = iterator::allocate(agent);
    agent.current_realm_mut().legacy = Some(legacy);

    to_source::ToSource::install(agent);
    #[cfg(feature = "accessor-methods")]
    accessors::LegacyAccessors::install(agent);
    proxy_adapter::ProxyObject::install(agent);
    iterator::IteratorShim::install(agent, legacy);
    #[cfg(feature = "string-quote")]
    quote::StringPrototypeQuote::install(agent);

    debug!(
        accessor_methods = cfg!(feature = "accessor-methods"),
        string_quote = cfg!(feature = "string-quote"),
        "legacy extensions installed"
    );
    legacy
}

/// The realm's legacy intrinsics, installing them on first use.
pub(crate) fn legacy_intrinsics(agent: &mut Agent) -> LegacyIntrinsics {
    initialize_legacy_extensions(agent)
}
