//! Resolver dump deserialization and merging.

use j2d_java::{
    BindingId, BindingKind, BodyDeclaration, ExpressionKind, JavaType, MergeError, ResolvedProgram,
    Statement, TypeKind, TypeNesting,
};

const POINT_JSON: &str = r#"{
  "bindings": [
    { "kind": "type", "name": "Point", "qualifiedName": "geo.Point", "typeKind": "class", "nesting": "topLevel" },
    { "kind": "field", "name": "x", "declaringType": 0, "modifiers": { "isFinal": true } },
    { "kind": "constructor", "name": "Point", "declaringType": 0, "parameterCount": 1 },
    { "kind": "parameter", "name": "x" }
  ],
  "units": [
    {
      "path": "geo/Point.java",
      "package": "geo",
      "types": [
        {
          "typeKind": "class",
          "name": { "name": "Point", "binding": 0 },
          "body": [
            { "kind": "field", "declaration": {
                "modifiers": { "isFinal": true },
                "ty": { "kind": "primitive", "primitive": "int" },
                "fragments": [ { "name": { "name": "x", "binding": 1 } } ] } },
            { "kind": "method", "declaration": {
                "isConstructor": true,
                "name": { "name": "Point", "binding": 2 },
                "parameters": [ { "ty": { "kind": "primitive", "primitive": "int" }, "name": { "name": "x", "binding": 3 } } ],
                "body": { "statements": [
                  { "kind": "expression", "expression": {
                      "kind": "assignment", "operator": "=",
                      "left": { "kind": "fieldAccess", "target": { "kind": "this" }, "name": { "name": "x", "binding": 1 } },
                      "right": { "kind": "name", "name": { "name": "x", "binding": 3 }, "staticType": { "kind": "primitive", "primitive": "int" } } } }
                ] } } }
          ]
        }
      ]
    }
  ]
}"#;

#[test]
fn test_deserializes_resolver_dump() {
    let program = ResolvedProgram::from_json(POINT_JSON).expect("valid json");
    assert_eq!(program.bindings.len(), 4);
    assert_eq!(program.type_count(), 1);

    let ty = &program.units[0].types[0];
    assert_eq!(ty.type_kind, TypeKind::Class);
    assert_eq!(ty.name.binding, Some(BindingId(0)));

    let field = program.bindings.get(BindingId(1)).expect("field binding");
    assert_eq!(field.kind, BindingKind::Field);
    assert!(field.modifiers.is_final);

    let BodyDeclaration::Method { declaration } = &ty.body[1] else {
        panic!("expected constructor");
    };
    assert!(declaration.is_constructor);
    let statements = &declaration.body.as_ref().expect("body").statements;
    let Statement::Expression { expression } = &statements[0] else {
        panic!("expected expression statement");
    };
    let ExpressionKind::Assignment { right, .. } = &expression.kind else {
        panic!("expected assignment");
    };
    assert_eq!(right.static_type, Some(JavaType::int()));
}

/// `geo.Shape` calling `new Point(1)`, with its own bindings for the
/// referenced `Point` type and constructor.
fn shape_json(point_parameters: usize) -> String {
    format!(
        r#"{{
  "bindings": [
    {{ "kind": "type", "name": "Point", "qualifiedName": "geo.Point", "typeKind": "class" }},
    {{ "kind": "constructor", "name": "Point", "declaringType": 0, "parameterCount": {point_parameters} }},
    {{ "kind": "type", "name": "Shape", "qualifiedName": "geo.Shape", "typeKind": "class", "nesting": "topLevel" }},
    {{ "kind": "method", "name": "make", "declaringType": 2 }}
  ],
  "units": [
    {{
      "path": "geo/Shape.java",
      "package": "geo",
      "types": [
        {{
          "typeKind": "class",
          "name": {{ "name": "Shape", "binding": 2 }},
          "body": [
            {{ "kind": "method", "declaration": {{
                "returnType": {{ "kind": "primitive", "primitive": "void" }},
                "name": {{ "name": "make", "binding": 3 }},
                "body": {{ "statements": [
                  {{ "kind": "expression", "expression": {{
                      "kind": "classInstanceCreation",
                      "ty": {{ "kind": "simple", "name": {{ "name": "Point", "binding": 0 }} }},
                      "constructor": 1,
                      "arguments": [ {{ "kind": "numberLiteral", "token": "1" }} ] }} }}
                ] }} }} }}
          ]
        }}
      ]
    }}
  ]
}}"#
    )
}

fn creation_in(program: &ResolvedProgram, unit: usize) -> (Option<BindingId>, Option<BindingId>) {
    let BodyDeclaration::Method { declaration } = &program.units[unit].types[0].body[0] else {
        panic!("expected method");
    };
    let statements = &declaration.body.as_ref().expect("body").statements;
    let Statement::Expression { expression } = &statements[0] else {
        panic!("expected expression statement");
    };
    let ExpressionKind::ClassInstanceCreation {
        ty, constructor, ..
    } = &expression.kind
    else {
        panic!("expected instance creation");
    };
    let JavaType::Simple { name, .. } = ty else {
        panic!("expected simple type");
    };
    (name.binding, *constructor)
}

#[test]
fn test_merge_unifies_references_with_earlier_declarations() {
    let mut program = ResolvedProgram::from_json(POINT_JSON).expect("valid json");
    let shape = ResolvedProgram::from_json(&shape_json(1)).expect("valid json");
    program.merge(shape).expect("dumps merge");

    // Point and its constructor keep their ids; Shape and make are appended.
    assert_eq!(program.bindings.len(), 6);
    assert_eq!(program.units.len(), 2);
    assert_eq!(creation_in(&program, 1), (Some(BindingId(0)), Some(BindingId(2))));

    assert_eq!(program.units[1].types[0].name.binding, Some(BindingId(4)));
    assert_eq!(
        program.bindings.get(BindingId(5)).and_then(|b| b.declaring_type),
        Some(BindingId(4))
    );
}

#[test]
fn test_merge_adopts_later_declarations() {
    let mut program = ResolvedProgram::from_json(&shape_json(1)).expect("valid json");
    let point = ResolvedProgram::from_json(POINT_JSON).expect("valid json");
    program.merge(point).expect("dumps merge");

    // The field and the constructor parameter are the only new bindings.
    assert_eq!(program.bindings.len(), 6);
    let point_decl = &program.units[1].types[0];
    assert_eq!(point_decl.name.binding, Some(BindingId(0)));

    let BodyDeclaration::Method { declaration } = &point_decl.body[1] else {
        panic!("expected constructor");
    };
    assert_eq!(declaration.name.binding, Some(BindingId(1)));
    assert_eq!(creation_in(&program, 0), (Some(BindingId(0)), Some(BindingId(1))));

    let BodyDeclaration::Field { declaration } = &point_decl.body[0] else {
        panic!("expected field");
    };
    let field = declaration.fragments[0].name.binding.expect("field binding");
    assert_eq!(field, BindingId(4));
    let info = program.bindings.get(field).expect("field info");
    assert_eq!(info.declaring_type, Some(BindingId(0)));
    assert!(info.modifiers.is_final);

    // The declaring dump's facts replace the reference.
    let point = program.bindings.get(BindingId(0)).expect("type info");
    assert_eq!(point.nesting, Some(TypeNesting::TopLevel));
}

#[test]
fn test_merge_rejects_duplicate_declaration() {
    let mut program = ResolvedProgram::from_json(POINT_JSON).expect("valid json");
    let again = ResolvedProgram::from_json(POINT_JSON).expect("valid json");
    let err = program.merge(again).expect_err("Point declared twice");
    assert!(matches!(
        &err,
        MergeError::DuplicateDeclaration { name } if name == "geo.Point"
    ));
    assert!(err.to_string().contains("more than one resolver dump"));
}

#[test]
fn test_merge_rejects_reference_to_missing_member() {
    let mut program = ResolvedProgram::from_json(POINT_JSON).expect("valid json");
    let shape = ResolvedProgram::from_json(&shape_json(2)).expect("valid json");
    let err = program.merge(shape).expect_err("no two-argument Point constructor");
    assert!(matches!(
        &err,
        MergeError::UnresolvedMember { member, owner } if member == "Point" && owner == "geo.Point"
    ));

    let mut program = ResolvedProgram::from_json(&shape_json(2)).expect("valid json");
    let point = ResolvedProgram::from_json(POINT_JSON).expect("valid json");
    assert!(matches!(
        program.merge(point),
        Err(MergeError::UnresolvedMember { .. })
    ));
}

#[test]
fn test_merge_unifies_members_by_signature() {
    let declaring = r#"{
      "bindings": [
        { "kind": "type", "name": "Util", "qualifiedName": "Util" },
        { "kind": "method", "name": "run", "declaringType": 0, "signature": "Util.run(int)" },
        { "kind": "method", "name": "run", "declaringType": 0, "signature": "Util.run(String)" }
      ],
      "units": [ { "path": "Util.java", "types": [ { "typeKind": "class",
        "name": { "name": "Util", "binding": 0 } } ] } ] }"#;
    let referencing = r#"{
      "bindings": [
        { "kind": "type", "name": "Util", "qualifiedName": "Util" },
        { "kind": "method", "name": "run", "declaringType": 0, "signature": "Util.run(String)" }
      ] }"#;
    let mut program = ResolvedProgram::from_json(declaring).expect("valid json");
    program
        .merge(ResolvedProgram::from_json(referencing).expect("valid json"))
        .expect("dumps merge");
    assert_eq!(program.bindings.len(), 3);
}

#[test]
fn test_round_trips_through_json() {
    let program = ResolvedProgram::from_json(POINT_JSON).expect("valid json");
    let text = program.to_json().expect("serializable");
    let again = ResolvedProgram::from_json(&text).expect("reparse");
    assert_eq!(program, again);
}

#[test]
fn test_rejects_unknown_statement_kind() {
    let text = r#"{ "units": [ { "path": "A.java", "types": [ { "typeKind": "class",
        "name": { "name": "A" }, "body": [ { "kind": "initializer",
        "body": { "statements": [ { "kind": "yield" } ] } } ] } ] } ] }"#;
    assert!(ResolvedProgram::from_json(text).is_err());
}
