// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::ecmascript::{
    builders::ordinary_object_builder::OrdinaryObjectBuilder,
    builtins::{ArgumentsList, Behaviour, Builtin, primitive_objects::this_symbol_value},
    execution::{Agent, JsResult},
    types::Value,
};

pub(crate) struct SymbolPrototype;

struct SymbolPrototypeToString;
impl Builtin for SymbolPrototypeToString {
    const NAME: &'static str = "toString";
    const LENGTH: u8 = 0;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(SymbolPrototype::to_string);
}

struct SymbolPrototypeValueOf;
impl Builtin for SymbolPrototypeValueOf {
    const NAME: &'static str = "valueOf";
    const LENGTH: u8 = 0;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(SymbolPrototype::value_of);
}

impl SymbolPrototype {
    /// ### [20.4.3.3 Symbol.prototype.toString ( )](https://tc39.es/ecma262/#sec-symbol.prototype.tostring)
    fn to_string(agent: &mut Agent, this_value: Value, _: ArgumentsList) -> JsResult<Value> {
        // 1. Let sym be ? ThisSymbolValue(this value).
        let sym = this_symbol_value(agent, this_value)?;
        // 2. Return SymbolDescriptiveString(sym).
        Ok(Value::String(sym.descriptive_string(agent)))
    }

    /// ### [20.4.3.4 Symbol.prototype.valueOf ( )](https://tc39.es/ecma262/#sec-symbol.prototype.valueof)
    fn value_of(agent: &mut Agent, this_value: Value, _: ArgumentsList) -> JsResult<Value> {
        // 1. Return ? ThisSymbolValue(this value).
        this_symbol_value(agent, this_value).map(Value::Symbol)
    }

    pub(crate) fn create_intrinsic(agent: &mut Agent) {
        let this = agent.intrinsics().symbol_prototype();
        OrdinaryObjectBuilder::new_intrinsic_object(agent, this)
            .with_property_capacity(2)
            .with_builtin_function_property::<SymbolPrototypeToString>()
            .with_builtin_function_property::<SymbolPrototypeValueOf>()
            .build();
    }
}
