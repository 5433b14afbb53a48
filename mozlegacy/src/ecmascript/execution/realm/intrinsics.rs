// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use tracing::debug;

use crate::{
    ecmascript::{
        builtins::{
            ArrayHeapData, DatePrototype, ErrorPrototype, ListIteratorPrototype, MapPrototype,
            RegExpPrototype, SetPrototype,
            fundamental_objects::{FunctionPrototype, ObjectPrototype, SymbolPrototype},
            primitive_objects::{BooleanPrototype, NumberPrototype, StringPrototype},
        },
        execution::{Agent, ExceptionType},
        types::{Object, ObjectHeapData, ObjectKind},
    },
    heap::{CreateHeapData, Heap},
};

/// Default prototypes for objects created by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtoIntrinsics {
    Array,
    Boolean,
    Date,
    Function,
    Map,
    Number,
    Object,
    RegExp,
    Set,
    String,
    Symbol,
}

/// Well-known intrinsic objects of the realm.
#[derive(Debug, Clone, Copy)]
pub struct Intrinsics {
    /// %Array.prototype%
    array_prototype: Object,
    /// %Boolean.prototype%
    boolean_prototype: Object,
    /// %Date.prototype%
    date_prototype: Object,
    /// %Error.prototype%
    error_prototype: Object,
    /// %EvalError.prototype%
    eval_error_prototype: Object,
    /// %Function.prototype%
    function_prototype: Object,
    /// %ListIteratorPrototype%
    ///
    /// Shared prototype of the iterators handed out for arrays, strings,
    /// maps, sets and enumeration.
    list_iterator_prototype: Object,
    /// %Map.prototype%
    map_prototype: Object,
    /// %Number.prototype%
    number_prototype: Object,
    /// %Object.prototype%
    object_prototype: Object,
    /// %RangeError.prototype%
    range_error_prototype: Object,
    /// %ReferenceError.prototype%
    reference_error_prototype: Object,
    /// %RegExp.prototype%
    regexp_prototype: Object,
    /// %Set.prototype%
    set_prototype: Object,
    /// %String.prototype%
    string_prototype: Object,
    /// %Symbol.prototype%
    symbol_prototype: Object,
    /// %SyntaxError.prototype%
    syntax_error_prototype: Object,
    /// %TypeError.prototype%
    type_error_prototype: Object,
    /// %URIError.prototype%
    uri_error_prototype: Object,
    global_object: Object,
}

impl Intrinsics {
    /// Allocates the intrinsic objects and links their prototypes. They get
    /// their properties in [`Intrinsics::initialize`].
    pub(crate) fn allocate(heap: &mut Heap) -> Self {
        let object_prototype = heap.create(ObjectHeapData::new(None, ObjectKind::Ordinary));
        let ordinary = |heap: &mut Heap| {
            heap.create(ObjectHeapData::new(
                Some(object_prototype),
                ObjectKind::Ordinary,
            ))
        };
        let function_prototype = ordinary(heap);
        let boolean_prototype = ordinary(heap);
        let date_prototype = ordinary(heap);
        let error_prototype = ordinary(heap);
        let list_iterator_prototype = ordinary(heap);
        let map_prototype = ordinary(heap);
        let number_prototype = ordinary(heap);
        let regexp_prototype = ordinary(heap);
        let set_prototype = ordinary(heap);
        let string_prototype = ordinary(heap);
        let symbol_prototype = ordinary(heap);
        let global_object = ordinary(heap);
        let array_prototype = heap.create(ObjectHeapData::new(
            Some(object_prototype),
            ObjectKind::Array(ArrayHeapData::default()),
        ));
        let native_error = |heap: &mut Heap| {
            heap.create(ObjectHeapData::new(
                Some(error_prototype),
                ObjectKind::Ordinary,
            ))
        };
        let eval_error_prototype = native_error(heap);
        let range_error_prototype = native_error(heap);
        let reference_error_prototype = native_error(heap);
        let syntax_error_prototype = native_error(heap);
        let type_error_prototype = native_error(heap);
        let uri_error_prototype = native_error(heap);
        Self {
            array_prototype,
            boolean_prototype,
            date_prototype,
            error_prototype,
            eval_error_prototype,
            function_prototype,
            list_iterator_prototype,
            map_prototype,
            number_prototype,
            object_prototype,
            range_error_prototype,
            reference_error_prototype,
            regexp_prototype,
            set_prototype,
            string_prototype,
            symbol_prototype,
            syntax_error_prototype,
            type_error_prototype,
            uri_error_prototype,
            global_object,
        }
    }

    /// Installs the builtin methods of the intrinsic objects.
    pub(crate) fn initialize(agent: &mut Agent) {
        ObjectPrototype::create_intrinsic(agent);
        FunctionPrototype::create_intrinsic(agent);
        SymbolPrototype::create_intrinsic(agent);
        BooleanPrototype::create_intrinsic(agent);
        NumberPrototype::create_intrinsic(agent);
        StringPrototype::create_intrinsic(agent);
        ErrorPrototype::create_intrinsic(agent);
        DatePrototype::create_intrinsic(agent);
        RegExpPrototype::create_intrinsic(agent);
        MapPrototype::create_intrinsic(agent);
        SetPrototype::create_intrinsic(agent);
        ListIteratorPrototype::create_intrinsic(agent);
        if agent.options.print_internals {
            debug!(intrinsics = ?agent.intrinsics(), "intrinsics initialized");
        }
    }

    pub fn get_intrinsic_default_proto(&self, intrinsic_default_proto: ProtoIntrinsics) -> Object {
        match intrinsic_default_proto {
            ProtoIntrinsics::Array => self.array_prototype(),
            ProtoIntrinsics::Boolean => self.boolean_prototype(),
            ProtoIntrinsics::Date => self.date_prototype(),
            ProtoIntrinsics::Function => self.function_prototype(),
            ProtoIntrinsics::Map => self.map_prototype(),
            ProtoIntrinsics::Number => self.number_prototype(),
            ProtoIntrinsics::Object => self.object_prototype(),
            ProtoIntrinsics::RegExp => self.regexp_prototype(),
            ProtoIntrinsics::Set => self.set_prototype(),
            ProtoIntrinsics::String => self.string_prototype(),
            ProtoIntrinsics::Symbol => self.symbol_prototype(),
        }
    }

    pub fn error_prototype_for(&self, kind: ExceptionType) -> Object {
        match kind {
            ExceptionType::Error => self.error_prototype(),
            ExceptionType::EvalError => self.eval_error_prototype(),
            ExceptionType::RangeError => self.range_error_prototype(),
            ExceptionType::ReferenceError => self.reference_error_prototype(),
            ExceptionType::SyntaxError => self.syntax_error_prototype(),
            ExceptionType::TypeError => self.type_error_prototype(),
            ExceptionType::UriError => self.uri_error_prototype(),
        }
    }

    /// %Array.prototype%
    pub const fn array_prototype(&self) -> Object {
        self.array_prototype
    }

    /// %Boolean.prototype%
    pub const fn boolean_prototype(&self) -> Object {
        self.boolean_prototype
    }

    /// %Date.prototype%
    pub const fn date_prototype(&self) -> Object {
        self.date_prototype
    }

    /// %Error.prototype%
    pub const fn error_prototype(&self) -> Object {
        self.error_prototype
    }

    /// %EvalError.prototype%
    pub const fn eval_error_prototype(&self) -> Object {
        self.eval_error_prototype
    }

    /// %Function.prototype%
    pub const fn function_prototype(&self) -> Object {
        self.function_prototype
    }

    /// %ListIteratorPrototype%
    pub const fn list_iterator_prototype(&self) -> Object {
        self.list_iterator_prototype
    }

    /// %Map.prototype%
    pub const fn map_prototype(&self) -> Object {
        self.map_prototype
    }

    /// %Number.prototype%
    pub const fn number_prototype(&self) -> Object {
        self.number_prototype
    }

    /// %Object.prototype%
    pub const fn object_prototype(&self) -> Object {
        self.object_prototype
    }

    /// %RangeError.prototype%
    pub const fn range_error_prototype(&self) -> Object {
        self.range_error_prototype
    }

    /// %ReferenceError.prototype%
    pub const fn reference_error_prototype(&self) -> Object {
        self.reference_error_prototype
    }

    /// %RegExp.prototype%
    pub const fn regexp_prototype(&self) -> Object {
        self.regexp_prototype
    }

    /// %Set.prototype%
    pub const fn set_prototype(&self) -> Object {
        self.set_prototype
    }

    /// %String.prototype%
    pub const fn string_prototype(&self) -> Object {
        self.string_prototype
    }

    /// %Symbol.prototype%
    pub const fn symbol_prototype(&self) -> Object {
        self.symbol_prototype
    }

    /// %SyntaxError.prototype%
    pub const fn syntax_error_prototype(&self) -> Object {
        self.syntax_error_prototype
    }

    /// %TypeError.prototype%
    pub const fn type_error_prototype(&self) -> Object {
        self.type_error_prototype
    }

    /// %URIError.prototype%
    pub const fn uri_error_prototype(&self) -> Object {
        self.uri_error_prototype
    }

    pub const fn global_object(&self) -> Object {
        self.global_object
    }
}
