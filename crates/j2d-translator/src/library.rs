//! Fixed Java-to-Dart name tables for primitives and well-known library types.

use j2d_dart::{DartArena, DartNode, NodeIndex};
use j2d_java::PrimitiveKind;
use once_cell::sync::Lazy;
use rustc_hash::{FxHashMap, FxHashSet};

#[must_use]
pub const fn primitive_name(kind: PrimitiveKind) -> &'static str {
    match kind {
        PrimitiveKind::Boolean => "bool",
        PrimitiveKind::Byte
        | PrimitiveKind::Short
        | PrimitiveKind::Int
        | PrimitiveKind::Long
        | PrimitiveKind::Char => "int",
        PrimitiveKind::Float | PrimitiveKind::Double => "double",
        PrimitiveKind::Void => "void",
    }
}

/// Add the default-value literal for `dart_type` to the arena.
pub fn default_literal(arena: &mut DartArena, dart_type: &str) -> Option<NodeIndex> {
    let node = match dart_type {
        "int" => DartNode::IntegerLiteral {
            token: "0".to_string(),
        },
        "double" => DartNode::DoubleLiteral {
            token: "0.0".to_string(),
        },
        "bool" => DartNode::BooleanLiteral { value: false },
        _ => return None,
    };
    Some(arena.add(node))
}

/// Library types keyed by qualified name. Simple names of `java.lang` types are
/// also accepted since the resolver may omit the package for them.
static LIBRARY_TYPES: Lazy<FxHashMap<&'static str, &'static str>> = Lazy::new(|| {
    let entries: &[(&str, &str)] = &[
        ("java.lang.Integer", "int"),
        ("java.lang.Long", "int"),
        ("java.lang.Short", "int"),
        ("java.lang.Byte", "int"),
        ("java.lang.Character", "int"),
        ("java.lang.Boolean", "bool"),
        ("java.lang.Float", "double"),
        ("java.lang.Double", "double"),
        ("java.lang.Number", "num"),
        ("java.lang.String", "String"),
        ("java.lang.CharSequence", "String"),
        ("java.lang.StringBuilder", "StringBuffer"),
        ("java.lang.StringBuffer", "StringBuffer"),
        ("java.lang.Object", "Object"),
        ("java.lang.Iterable", "Iterable"),
        ("java.lang.Comparable", "Comparable"),
        ("java.lang.Exception", "Exception"),
        ("java.lang.RuntimeException", "Exception"),
        ("java.lang.IllegalArgumentException", "ArgumentError"),
        ("java.lang.IllegalStateException", "StateError"),
        ("java.lang.UnsupportedOperationException", "UnsupportedError"),
        ("java.lang.IndexOutOfBoundsException", "RangeError"),
        ("java.lang.Error", "Error"),
        ("java.lang.Throwable", "Object"),
        ("java.util.Collection", "Iterable"),
        ("java.util.Iterator", "Iterator"),
        ("java.util.List", "List"),
        ("java.util.ArrayList", "List"),
        ("java.util.LinkedList", "List"),
        ("java.util.Map", "Map"),
        ("java.util.HashMap", "Map"),
        ("java.util.LinkedHashMap", "Map"),
        ("java.util.TreeMap", "Map"),
        ("java.util.Set", "Set"),
        ("java.util.HashSet", "Set"),
        ("java.util.LinkedHashSet", "Set"),
        ("java.util.TreeSet", "Set"),
    ];
    let mut map = FxHashMap::default();
    for &(qualified, dart) in entries {
        map.insert(qualified, dart);
        if let Some(simple) = qualified.strip_prefix("java.lang.") {
            map.insert(simple, dart);
        }
    }
    map
});

/// Dart name for a library type, by qualified or (for `java.lang`) simple name.
#[must_use]
pub fn library_type(name: &str) -> Option<&'static str> {
    LIBRARY_TYPES.get(name).copied()
}

/// Library types whose instances behave like a Dart `List`.
static LIST_TYPES: Lazy<FxHashSet<&'static str>> = Lazy::new(|| {
    [
        "java.util.List",
        "java.util.ArrayList",
        "java.util.LinkedList",
        "java.util.AbstractList",
        "java.util.Collection",
    ]
    .into_iter()
    .collect()
});

static MAP_TYPES: Lazy<FxHashSet<&'static str>> = Lazy::new(|| {
    [
        "java.util.Map",
        "java.util.HashMap",
        "java.util.LinkedHashMap",
        "java.util.TreeMap",
        "java.util.AbstractMap",
    ]
    .into_iter()
    .collect()
});

#[must_use]
pub fn is_list_type(qualified: &str) -> bool {
    LIST_TYPES.contains(qualified)
}

#[must_use]
pub fn is_map_type(qualified: &str) -> bool {
    MAP_TYPES.contains(qualified)
}

pub const OBJECT: &str = "java.lang.Object";
pub const STRING: &str = "java.lang.String";
pub const ENUM: &str = "java.lang.Enum";
pub const PRINT_STREAM: &str = "java.io.PrintStream";
