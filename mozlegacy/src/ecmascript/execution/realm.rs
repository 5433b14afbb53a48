// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

mod intrinsics;

pub use intrinsics::{Intrinsics, ProtoIntrinsics};

use crate::legacy::LegacyIntrinsics;

/// ### [9.3 Realms](https://tc39.es/ecma262/#sec-code-realms)
#[derive(Debug)]
pub struct Realm {
    pub(crate) intrinsics: Intrinsics,
    /// Set once the legacy extensions have been installed.
    pub(crate) legacy: Option<LegacyIntrinsics>,
}

impl Realm {
    pub(crate) fn new(intrinsics: Intrinsics) -> Self {
        Self {
            intrinsics,
            legacy: None,
        }
    }

    pub fn intrinsics(&self) -> &Intrinsics {
        &self.intrinsics
    }

    pub fn has_legacy_extensions(&self) -> bool {
        self.legacy.is_some()
    }
}
