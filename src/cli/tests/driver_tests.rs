use std::path::{Path, PathBuf};

use super::driver::{discover_inputs, load_program, render_stdout, write_outputs};
use j2d_translator::OutputFile;

const LINE_JSON: &str = r#"{
  "bindings": [
    { "kind": "type", "name": "Line", "qualifiedName": "geo.Line", "typeKind": "class", "nesting": "topLevel" }
  ],
  "units": [
    { "path": "geo/Line.java", "package": "geo",
      "types": [ { "typeKind": "class", "name": { "name": "Line", "binding": 0 } } ] }
  ]
}"#;

const SHAPE_JSON: &str = r#"{
  "bindings": [
    { "kind": "type", "name": "Shape", "qualifiedName": "geo.Shape", "typeKind": "class", "nesting": "topLevel" },
    { "kind": "field", "name": "sides", "declaringType": 0 }
  ],
  "units": [
    { "path": "geo/Shape.java", "package": "geo",
      "types": [ { "typeKind": "class", "name": { "name": "Shape", "binding": 0 },
        "body": [ { "kind": "field", "declaration": {
          "ty": { "kind": "primitive", "primitive": "int" },
          "fragments": [ { "name": { "name": "sides", "binding": 1 } } ] } } ] } ] }
  ]
}"#;

fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("failed to create test dir");
    }
    std::fs::write(&path, contents).expect("failed to write test file");
    path
}

#[test]
fn discovers_json_dumps_recursively() {
    let temp = tempfile::tempdir().expect("temp dir");
    let root = temp.path();
    write_file(root, "b/shape.json", SHAPE_JSON);
    write_file(root, "a/line.json", LINE_JSON);
    write_file(root, "a/notes.txt", "ignored");
    write_file(root, "j2d.json", "{}");

    let dumps = discover_inputs(&[root.to_path_buf()]).expect("discovers");
    assert_eq!(dumps, vec![root.join("a/line.json"), root.join("b/shape.json")]);
}

#[test]
fn explicit_files_are_deduplicated() {
    let temp = tempfile::tempdir().expect("temp dir");
    let line = write_file(temp.path(), "line.json", LINE_JSON);

    let dumps = discover_inputs(&[line.clone(), temp.path().to_path_buf()]).expect("discovers");
    assert_eq!(dumps, vec![line]);
}

#[test]
fn missing_input_is_an_error() {
    let temp = tempfile::tempdir().expect("temp dir");
    let err = discover_inputs(&[temp.path().join("absent.json")]).expect_err("missing");
    assert!(err.to_string().contains("absent.json"));
}

#[test]
fn directory_without_dumps_is_an_error() {
    let temp = tempfile::tempdir().expect("temp dir");
    write_file(temp.path(), "readme.md", "");
    assert!(discover_inputs(&[temp.path().to_path_buf()]).is_err());
}

#[test]
fn loads_and_merges_dumps_in_order() {
    let temp = tempfile::tempdir().expect("temp dir");
    let line = write_file(temp.path(), "a.json", LINE_JSON);
    let shape = write_file(temp.path(), "b.json", SHAPE_JSON);

    let program = load_program(&[line, shape]).expect("loads");
    assert_eq!(program.bindings.len(), 3);
    assert_eq!(program.units[0].path, "geo/Line.java");
    assert_eq!(program.units[1].path, "geo/Shape.java");
    // Shape's ids are shifted past Line's table.
    assert_eq!(program.units[1].types[0].name.binding, Some(j2d_java::BindingId(1)));
}

#[test]
fn malformed_dump_names_the_file() {
    let temp = tempfile::tempdir().expect("temp dir");
    let bad = write_file(temp.path(), "bad.json", r#"{ "units": 3 }"#);
    let err = load_program(&[bad]).expect_err("malformed");
    assert!(format!("{err:#}").contains("bad.json"));
}

#[test]
fn writes_outputs_below_out_dir() {
    let temp = tempfile::tempdir().expect("temp dir");
    let files = vec![
        OutputFile {
            path: "geo/Line.dart".to_string(),
            text: "class Line {}\n".to_string(),
        },
        OutputFile {
            path: "Main.dart".to_string(),
            text: "class Main {}\n".to_string(),
        },
    ];

    let written = write_outputs(temp.path(), &files).expect("writes");
    assert_eq!(written, vec![temp.path().join("geo/Line.dart"), temp.path().join("Main.dart")]);
    let text = std::fs::read_to_string(temp.path().join("geo/Line.dart")).expect("written");
    assert_eq!(text, "class Line {}\n");
}

#[test]
fn stdout_rendering_marks_each_unit() {
    let files = vec![
        OutputFile {
            path: "A.dart".to_string(),
            text: "class A {}\n".to_string(),
        },
        OutputFile {
            path: "b/B.dart".to_string(),
            text: "class B {}\n".to_string(),
        },
    ];
    assert_eq!(
        render_stdout(&files),
        "// A.dart\nclass A {}\n\n// b/B.dart\nclass B {}\n"
    );
}
