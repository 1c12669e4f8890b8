//! End-to-end runs of the CLI driver over resolver dumps on disk.

use clap::Parser;
use std::path::{Path, PathBuf};

use j2d::cli::args::CliArgs;
use j2d::cli::config::OutputTarget;
use j2d::cli::driver;

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
                      "right": { "kind": "name", "name": { "name": "x", "binding": 3 } } } }
                ] } } }
          ]
        }
      ]
    }
  ]
}"#;

const SHAPE_JSON: &str = r#"{
  "bindings": [
    { "kind": "type", "name": "Shape", "qualifiedName": "geo.Shape", "typeKind": "class", "nesting": "topLevel" },
    { "kind": "field", "name": "sides", "declaringType": 0 },
    { "kind": "method", "name": "count", "declaringType": 0, "signature": "geo.Shape.count()" }
  ],
  "units": [
    { "path": "geo/Shape.java", "package": "geo",
      "types": [ { "typeKind": "class", "name": { "name": "Shape", "binding": 0 },
        "body": [
          { "kind": "field", "declaration": {
              "ty": { "kind": "primitive", "primitive": "int" },
              "fragments": [ { "name": { "name": "sides", "binding": 1 } } ] } },
          { "kind": "method", "declaration": {
              "returnType": { "kind": "primitive", "primitive": "int" },
              "name": { "name": "count", "binding": 2 },
              "body": { "statements": [
                { "kind": "return", "expression": { "kind": "name", "name": { "name": "sides", "binding": 1 } } }
              ] } } }
        ] } ] }
  ]
}"#;

const STATIC_INIT_JSON: &str = r#"{
  "bindings": [
    { "kind": "type", "name": "Registry", "qualifiedName": "Registry", "typeKind": "class", "nesting": "topLevel" }
  ],
  "units": [
    { "path": "Registry.java",
      "types": [ { "typeKind": "class", "name": { "name": "Registry", "binding": 0 },
        "body": [ { "kind": "initializer", "isStatic": true, "body": { "statements": [] } } ] } ] }
  ]
}"#;

const COUNTER_JSON: &str = r#"{
  "bindings": [
    { "kind": "type", "name": "Counter", "qualifiedName": "Counter", "typeKind": "class", "nesting": "topLevel" },
    { "kind": "constructor", "name": "Counter", "declaringType": 0 },
    { "kind": "constructor", "name": "Counter", "declaringType": 0, "parameterCount": 1 },
    { "kind": "parameter", "name": "start" }
  ],
  "units": [
    { "path": "Counter.java",
      "types": [ { "typeKind": "class", "name": { "name": "Counter", "binding": 0 },
        "body": [
          { "kind": "method", "declaration": {
              "isConstructor": true,
              "name": { "name": "Counter", "binding": 1 },
              "body": { "statements": [] } } },
          { "kind": "method", "declaration": {
              "isConstructor": true,
              "name": { "name": "Counter", "binding": 2 },
              "parameters": [ { "ty": { "kind": "primitive", "primitive": "int" }, "name": { "name": "start", "binding": 3 } } ],
              "body": { "statements": [] } } }
        ] } ] }
  ]
}"#;

/// Uses `new Counter(1)` through its own bindings for `Counter`.
const CLIENT_JSON: &str = r#"{
  "bindings": [
    { "kind": "type", "name": "Counter", "qualifiedName": "Counter", "typeKind": "class" },
    { "kind": "constructor", "name": "Counter", "declaringType": 0, "parameterCount": 1 },
    { "kind": "type", "name": "Client", "qualifiedName": "Client", "typeKind": "class", "nesting": "topLevel" },
    { "kind": "method", "name": "run", "declaringType": 2 }
  ],
  "units": [
    { "path": "Client.java",
      "types": [ { "typeKind": "class", "name": { "name": "Client", "binding": 2 },
        "body": [
          { "kind": "method", "declaration": {
              "returnType": { "kind": "primitive", "primitive": "void" },
              "name": { "name": "run", "binding": 3 },
              "body": { "statements": [
                { "kind": "expression", "expression": {
                    "kind": "classInstanceCreation",
                    "ty": { "kind": "simple", "name": { "name": "Counter", "binding": 0 } },
                    "constructor": 1,
                    "arguments": [ { "kind": "numberLiteral", "token": "1",
                      "staticType": { "kind": "primitive", "primitive": "int" } } ] } }
              ] } } }
        ] } ] }
  ]
}"#;

const POINT_DART: &str = "class Point {\n  int x;\n\n  Point(int x) {\n    this.x = x;\n  }\n}\n";

fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("failed to create test dir");
    }
    std::fs::write(&path, contents).expect("failed to write test file");
    path
}

fn args(argv: &[&str]) -> CliArgs {
    let mut full = vec!["j2d"];
    full.extend_from_slice(argv);
    CliArgs::try_parse_from(full).expect("args parse")
}

#[test]
fn translates_dump_directory_into_out_dir() {
    let temp = tempfile::tempdir().expect("temp dir");
    let root = temp.path();
    write_file(root, "dumps/point.json", POINT_JSON);
    write_file(root, "dumps/nested/shape.json", SHAPE_JSON);

    let result = driver::run(&args(&["--out-dir", "out", "dumps"]), root).expect("run succeeds");

    assert_eq!(result.output, OutputTarget::Directory(root.join("out")));
    assert_eq!(result.written.len(), 2);
    let point = std::fs::read_to_string(root.join("out/geo/Point.dart")).expect("Point.dart");
    assert_eq!(point, POINT_DART);
    let shape = std::fs::read_to_string(root.join("out/geo/Shape.dart")).expect("Shape.dart");
    assert!(shape.contains("int count() {\n    return sides;\n  }"), "{shape}");
}

#[test]
fn stdout_target_writes_no_files() {
    let temp = tempfile::tempdir().expect("temp dir");
    let dump = write_file(temp.path(), "point.json", POINT_JSON);

    let result = driver::run(&args(&["--stdout", dump.to_str().expect("utf-8 path")]), temp.path())
        .expect("run succeeds");

    assert_eq!(result.output, OutputTarget::Stdout);
    assert!(result.written.is_empty());
    assert_eq!(
        driver::render_stdout(&result.translation.files),
        format!("// geo/Point.dart\n{POINT_DART}")
    );
}

#[test]
fn config_file_supplies_renames_indent_and_paths() {
    let temp = tempfile::tempdir().expect("temp dir");
    let root = temp.path();
    write_file(root, "project/dumps/shape.json", SHAPE_JSON);
    let config = write_file(
        root,
        "project/j2d.json",
        r#"{
          "renames": { "geo.Shape.count()": "sideCount" },
          "indentWidth": 4,
          "outDir": "lib",
          "inputs": ["dumps"]
        }"#,
    );

    let result = driver::run(&args(&["--config", config.to_str().expect("utf-8 path")]), root)
        .expect("run succeeds");

    assert_eq!(result.output, OutputTarget::Directory(root.join("project/lib")));
    let shape = std::fs::read_to_string(root.join("project/lib/geo/Shape.dart")).expect("Shape.dart");
    assert_eq!(
        shape,
        "class Shape {\n    int sides = 0;\n\n    int sideCount() {\n        return sides;\n    }\n}\n"
    );
}

#[test]
fn invalid_rename_in_config_fails_before_reading_inputs() {
    let temp = tempfile::tempdir().expect("temp dir");
    write_file(
        temp.path(),
        "j2d.json",
        r#"{ "renames": { "geo.Shape.count()": "class" }, "outDir": "out" }"#,
    );

    let err = driver::run(&args(&["missing.json"]), temp.path()).expect_err("invalid rename");
    assert!(format!("{err:#}").contains("reserved word"), "{err:#}");
    assert!(!temp.path().join("out").exists());
}

#[test]
fn fatal_translation_error_writes_nothing() {
    let temp = tempfile::tempdir().expect("temp dir");
    write_file(temp.path(), "dumps/point.json", POINT_JSON);
    write_file(temp.path(), "dumps/registry.json", STATIC_INIT_JSON);

    let err = driver::run(&args(&["--out-dir", "out", "dumps"]), temp.path())
        .expect_err("static initializer is unsupported");

    assert!(format!("{err:#}").contains("static initializer"), "{err:#}");
    assert!(!temp.path().join("out").exists());
}

#[test]
fn constructor_renames_reach_call_sites_in_other_dumps() {
    let temp = tempfile::tempdir().expect("temp dir");
    let root = temp.path();
    // The client dump sorts first, so its reference to Counter is merged
    // before the declaration.
    write_file(root, "dumps/a_client.json", CLIENT_JSON);
    write_file(root, "dumps/b_counter.json", COUNTER_JSON);

    driver::run(&args(&["--out-dir", "out", "dumps"]), root).expect("run succeeds");

    let counter = std::fs::read_to_string(root.join("out/Counter.dart")).expect("Counter.dart");
    assert!(counter.contains("Counter.con1(int start)"), "{counter}");
    let client = std::fs::read_to_string(root.join("out/Client.dart")).expect("Client.dart");
    assert!(client.contains("new Counter.con1(1);"), "{client}");
}

#[test]
fn conflicting_dumps_fail_to_merge() {
    let temp = tempfile::tempdir().expect("temp dir");
    write_file(temp.path(), "dumps/one.json", POINT_JSON);
    write_file(temp.path(), "dumps/two.json", POINT_JSON);

    let err = driver::run(&args(&["--out-dir", "out", "dumps"]), temp.path())
        .expect_err("Point is declared twice");

    let message = format!("{err:#}");
    assert!(message.contains("failed to merge resolver dump"), "{message}");
    assert!(message.contains("geo.Point"), "{message}");
    assert!(!temp.path().join("out").exists());
}
