//! `j2d.json` loading and merging with command-line flags.

use anyhow::{Context, Result, bail};
use indexmap::IndexMap;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::cli::args::CliArgs;
use j2d_dart::DEFAULT_INDENT_WIDTH;
use j2d_translator::TranslateOptions;
use j2d_translator::pipeline::validate_renames;

/// Config file looked up in the working directory when `--config` is absent.
pub const CONFIG_FILE_NAME: &str = "j2d.json";

const MAX_INDENT_WIDTH: usize = 16;

/// On-disk configuration.
///
/// ```json
/// {
///   "renames": { "geo.Point.distance(Lgeo/Point;)": "distanceTo" },
///   "convertAccessors": true,
///   "indentWidth": 2,
///   "outDir": "lib/src",
///   "inputs": ["dumps"]
/// }
/// ```
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct J2dConfig {
    #[serde(default)]
    pub renames: IndexMap<String, String>,
    #[serde(default)]
    pub convert_accessors: Option<bool>,
    #[serde(default)]
    pub indent_width: Option<usize>,
    #[serde(default)]
    pub out_dir: Option<PathBuf>,
    #[serde(default)]
    pub inputs: Vec<PathBuf>,
}

/// Where the printed units go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Directory(PathBuf),
    Stdout,
}

/// Flags and file values merged into one run description.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub options: TranslateOptions,
    pub inputs: Vec<PathBuf>,
    pub output: OutputTarget,
}

pub fn parse_config(source: &str) -> Result<J2dConfig> {
    let config = serde_json::from_str(source).context("failed to parse j2d config JSON")?;
    Ok(config)
}

pub fn load_config(path: &Path) -> Result<J2dConfig> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    parse_config(&source).with_context(|| format!("failed to parse config: {}", path.display()))
}

/// Pick the config file: `--config` wins, then `j2d.json` in `cwd` if present.
pub fn find_config(args: &CliArgs, cwd: &Path) -> Option<PathBuf> {
    if let Some(path) = &args.config {
        return Some(absolutize(cwd, path));
    }
    let candidate = cwd.join(CONFIG_FILE_NAME);
    candidate.is_file().then_some(candidate)
}

/// Merge `args` over the config found for `cwd`.
pub fn resolve(args: &CliArgs, cwd: &Path) -> Result<ResolvedConfig> {
    let (config, config_dir) = match find_config(args, cwd) {
        Some(path) => {
            let config = load_config(&path)?;
            let dir = path.parent().map_or_else(|| cwd.to_path_buf(), Path::to_path_buf);
            (config, dir)
        }
        None => (J2dConfig::default(), cwd.to_path_buf()),
    };
    resolve_with(args, cwd, config, &config_dir)
}

/// Merge `args` over an already loaded `config`.
///
/// Paths from the command line are relative to `cwd`; paths from the file are
/// relative to the directory holding it.
pub fn resolve_with(
    args: &CliArgs,
    cwd: &Path,
    config: J2dConfig,
    config_dir: &Path,
) -> Result<ResolvedConfig> {
    validate_renames(&config.renames).context("invalid rename table")?;

    let indent_width = match (args.indent, config.indent_width) {
        (Some(indent), _) => usize::from(indent),
        (None, Some(width)) => {
            if width == 0 || width > MAX_INDENT_WIDTH {
                bail!("indentWidth must be between 1 and {MAX_INDENT_WIDTH}, got {width}");
            }
            width
        }
        (None, None) => DEFAULT_INDENT_WIDTH,
    };

    let inputs: Vec<PathBuf> = if args.inputs.is_empty() {
        config
            .inputs
            .iter()
            .map(|path| absolutize(config_dir, path))
            .collect()
    } else {
        args.inputs.iter().map(|path| absolutize(cwd, path)).collect()
    };
    if inputs.is_empty() {
        bail!("no inputs given; pass resolver dumps or list them under \"inputs\" in {CONFIG_FILE_NAME}");
    }

    let output = if args.stdout {
        OutputTarget::Stdout
    } else if let Some(dir) = &args.out_dir {
        OutputTarget::Directory(absolutize(cwd, dir))
    } else if let Some(dir) = &config.out_dir {
        OutputTarget::Directory(absolutize(config_dir, dir))
    } else {
        bail!("no output destination; pass --out-dir, --stdout, or set \"outDir\"");
    };

    Ok(ResolvedConfig {
        options: TranslateOptions {
            renames: config.renames,
            convert_accessors: args.accessors || config.convert_accessors.unwrap_or(false),
            indent_width,
        },
        inputs,
        output,
    })
}

fn absolutize(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
