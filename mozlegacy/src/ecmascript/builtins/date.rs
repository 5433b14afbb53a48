// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::ecmascript::{
    builders::ordinary_object_builder::OrdinaryObjectBuilder,
    builtins::{ArgumentsList, Behaviour, Builtin, ordinary::ordinary_object_create_with_intrinsics},
    execution::{Agent, ExceptionType, JsResult, ProtoIntrinsics},
    types::{Object, ObjectKind, Value},
};

/// The \[\[DateValue]] slot: milliseconds since the epoch, or NaN for an
/// invalid date.
#[derive(Debug, Clone, Copy)]
pub struct DateHeapData(pub(crate) f64);

impl DateHeapData {
    pub fn date_value(&self) -> f64 {
        self.0
    }
}

/// ### [21.4.2.1 Date ( ...values )](https://tc39.es/ecma262/#sec-date)
///
/// The one-number form of `new Date(value)`: the time value is clipped as by
/// TimeClip.
pub fn create_date(agent: &mut Agent, ms: f64) -> Object {
    ordinary_object_create_with_intrinsics(
        agent,
        ProtoIntrinsics::Date,
        ObjectKind::Date(DateHeapData(time_clip(ms))),
    )
}

/// ### [21.4.1.31 TimeClip ( time )](https://tc39.es/ecma262/#sec-timeclip)
fn time_clip(time: f64) -> f64 {
    // 1. If time is not finite, return NaN.
    // 2. If abs(ℝ(time)) > 8.64 × 10**15, return NaN.
    if !time.is_finite() || time.abs() > 8.64e15 {
        return f64::NAN;
    }
    // 3. Return 𝔽(! ToIntegerOrInfinity(time)).
    time.trunc() + 0.0
}

/// ### [21.4.4 thisTimeValue ( value )](https://tc39.es/ecma262/#sec-thistimevalue)
pub(crate) fn this_time_value(agent: &mut Agent, value: Value) -> JsResult<f64> {
    if let Value::Object(o) = value
        && let ObjectKind::Date(data) = &agent[o].kind
    {
        return Ok(data.0);
    }
    Err(agent.throw_exception(ExceptionType::TypeError, "this is not a Date object."))
}

pub(crate) struct DatePrototype;

struct DatePrototypeGetTime;
impl Builtin for DatePrototypeGetTime {
    const NAME: &'static str = "getTime";
    const LENGTH: u8 = 0;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(DatePrototype::get_time);
}

struct DatePrototypeValueOf;
impl Builtin for DatePrototypeValueOf {
    const NAME: &'static str = "valueOf";
    const LENGTH: u8 = 0;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(DatePrototype::get_time);
}

impl DatePrototype {
    /// ### [21.4.4.10 Date.prototype.getTime ( )](https://tc39.es/ecma262/#sec-date.prototype.gettime)
    ///
    /// Also `Date.prototype.valueOf`.
    fn get_time(agent: &mut Agent, this_value: Value, _: ArgumentsList) -> JsResult<Value> {
        // 1. Let dateObject be the this value.
        // 2. Perform ? RequireInternalSlot(dateObject, [[DateValue]]).
        // 3. Return dateObject.[[DateValue]].
        this_time_value(agent, this_value).map(Value::Number)
    }

    pub(crate) fn create_intrinsic(agent: &mut Agent) {
        let this = agent.intrinsics().date_prototype();
        OrdinaryObjectBuilder::new_intrinsic_object(agent, this)
            .with_property_capacity(2)
            .with_builtin_function_property::<DatePrototypeGetTime>()
            .with_builtin_function_property::<DatePrototypeValueOf>()
            .build();
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn time_values_are_clipped() {
        assert_eq!(time_clip(1.9), 1.0);
        assert!(time_clip(f64::INFINITY).is_nan());
        assert!(time_clip(9e15).is_nan());
        assert!(time_clip(-0.0).is_sign_positive());
    }
}
