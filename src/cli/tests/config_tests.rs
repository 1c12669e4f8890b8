use clap::Parser;
use std::path::{Path, PathBuf};

use super::args::CliArgs;
use super::config::{J2dConfig, OutputTarget, load_config, parse_config, resolve, resolve_with};

fn args(argv: &[&str]) -> CliArgs {
    let mut full = vec!["j2d"];
    full.extend_from_slice(argv);
    CliArgs::try_parse_from(full).expect("args parse")
}

fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("failed to write test file");
    path
}

#[test]
fn parses_camel_case_config() {
    let config = parse_config(
        r#"{
          "renames": { "A.compute(I)": "calc", "A.<init>(I)": "withX" },
          "convertAccessors": true,
          "indentWidth": 4,
          "outDir": "lib",
          "inputs": ["dumps", "extra.json"]
        }"#,
    )
    .expect("config parses");

    assert_eq!(config.renames.len(), 2);
    assert_eq!(config.renames.get("A.compute(I)").map(String::as_str), Some("calc"));
    let order: Vec<&str> = config.renames.keys().map(String::as_str).collect();
    assert_eq!(order, vec!["A.compute(I)", "A.<init>(I)"]);
    assert_eq!(config.convert_accessors, Some(true));
    assert_eq!(config.indent_width, Some(4));
    assert_eq!(config.out_dir.as_deref(), Some(Path::new("lib")));
    assert_eq!(config.inputs.len(), 2);
}

#[test]
fn empty_object_is_default_config() {
    assert_eq!(parse_config("{}").expect("parses"), J2dConfig::default());
}

#[test]
fn rejects_unknown_keys() {
    let err = parse_config(r#"{ "outdir": "lib" }"#).expect_err("unknown key");
    assert!(format!("{err:#}").contains("outdir"));
}

#[test]
fn flags_override_file_values() {
    let config = J2dConfig {
        convert_accessors: Some(false),
        indent_width: Some(4),
        out_dir: Some(PathBuf::from("from_file")),
        inputs: vec![PathBuf::from("file.json")],
        ..J2dConfig::default()
    };
    let cwd = Path::new("/work");
    let resolved = resolve_with(
        &args(&["--accessors", "--indent", "3", "--out-dir", "cli_out", "cli.json"]),
        cwd,
        config,
        Path::new("/conf"),
    )
    .expect("resolves");

    assert!(resolved.options.convert_accessors);
    assert_eq!(resolved.options.indent_width, 3);
    assert_eq!(resolved.output, OutputTarget::Directory(PathBuf::from("/work/cli_out")));
    assert_eq!(resolved.inputs, vec![PathBuf::from("/work/cli.json")]);
}

#[test]
fn file_paths_are_relative_to_config_dir() {
    let config = J2dConfig {
        out_dir: Some(PathBuf::from("lib")),
        inputs: vec![PathBuf::from("dumps")],
        ..J2dConfig::default()
    };
    let resolved =
        resolve_with(&args(&[]), Path::new("/work"), config, Path::new("/conf")).expect("resolves");

    assert_eq!(resolved.inputs, vec![PathBuf::from("/conf/dumps")]);
    assert_eq!(resolved.output, OutputTarget::Directory(PathBuf::from("/conf/lib")));
    assert!(!resolved.options.convert_accessors);
    assert_eq!(resolved.options.indent_width, j2d_dart::DEFAULT_INDENT_WIDTH);
}

#[test]
fn stdout_wins_over_out_dir() {
    let config = J2dConfig {
        out_dir: Some(PathBuf::from("lib")),
        ..J2dConfig::default()
    };
    let resolved = resolve_with(&args(&["--stdout", "a.json"]), Path::new("/w"), config, Path::new("/w"))
        .expect("resolves");
    assert_eq!(resolved.output, OutputTarget::Stdout);
}

#[test]
fn missing_inputs_and_output_are_errors() {
    let err = resolve_with(&args(&["--stdout"]), Path::new("/w"), J2dConfig::default(), Path::new("/w"))
        .expect_err("no inputs");
    assert!(err.to_string().contains("no inputs"));

    let err = resolve_with(&args(&["a.json"]), Path::new("/w"), J2dConfig::default(), Path::new("/w"))
        .expect_err("no output");
    assert!(err.to_string().contains("no output destination"));
}

#[test]
fn invalid_renames_are_rejected_before_translation() {
    for target in ["class", "1abc", "a-b"] {
        let mut config = J2dConfig::default();
        config.renames.insert("A.compute(I)".to_string(), target.to_string());
        let err = resolve_with(&args(&["--stdout", "a.json"]), Path::new("/w"), config, Path::new("/w"))
            .expect_err("invalid rename");
        assert!(format!("{err:#}").contains(target), "{err:#}");
    }
}

#[test]
fn out_of_range_indent_in_file_is_rejected() {
    let config = J2dConfig {
        indent_width: Some(0),
        ..J2dConfig::default()
    };
    let err = resolve_with(&args(&["--stdout", "a.json"]), Path::new("/w"), config, Path::new("/w"))
        .expect_err("zero indent");
    assert!(err.to_string().contains("indentWidth"));
}

#[test]
fn discovers_config_in_working_directory() {
    let temp = tempfile::tempdir().expect("temp dir");
    write_file(temp.path(), "j2d.json", r#"{ "outDir": "out", "indentWidth": 4 }"#);

    let resolved = resolve(&args(&["a.json"]), temp.path()).expect("resolves");
    assert_eq!(resolved.options.indent_width, 4);
    assert_eq!(resolved.output, OutputTarget::Directory(temp.path().join("out")));
}

#[test]
fn load_config_reports_path() {
    let temp = tempfile::tempdir().expect("temp dir");
    let path = write_file(temp.path(), "broken.json", "{ not json");
    let err = load_config(&path).expect_err("broken config");
    assert!(format!("{err:#}").contains("broken.json"));
}
