// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::{String, Value};
use crate::{
    ecmascript::execution::Agent,
    heap::{CreateHeapData, WellKnownSymbolIndexes, indexes::SymbolIndex},
};

/// ### [6.1.5 The Symbol Type](https://tc39.es/ecma262/#sec-ecmascript-language-types-symbol-type)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Symbol(pub(crate) SymbolIndex);

#[derive(Debug, Clone, Copy)]
pub struct SymbolHeapData {
    pub(crate) descriptor: Option<String>,
}

impl Symbol {
    /// `%Symbol.iterator%`
    pub const fn iterator() -> Self {
        WellKnownSymbolIndexes::Iterator.to_symbol()
    }

    /// Creates a fresh, unique symbol. Symbols are never interned.
    pub fn new(agent: &mut Agent, description: Option<&str>) -> Self {
        let descriptor = description.map(|d| String::from_str(agent, d));
        agent.heap.create(SymbolHeapData { descriptor })
    }

    pub fn description(self, agent: &Agent) -> Option<String> {
        agent.heap[self].descriptor
    }

    /// ### [20.4.3.3.1 SymbolDescriptiveString ( sym )](https://tc39.es/ecma262/#sec-symboldescriptivestring)
    pub fn descriptive_string(self, agent: &mut Agent) -> String {
        let description = match self.description(agent) {
            Some(d) => d.to_string_lossy(agent),
            None => std::string::String::new(),
        };
        String::from_string(agent, format!("Symbol({description})"))
    }
}

impl From<Symbol> for Value {
    fn from(value: Symbol) -> Self {
        Value::Symbol(value)
    }
}
