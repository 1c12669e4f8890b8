//! Input discovery, dump loading, translation and output writing.

use anyhow::{Context, Result, bail};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info, info_span};
use walkdir::WalkDir;

use crate::cli::args::CliArgs;
use crate::cli::config::{self, OutputTarget, ResolvedConfig};
use j2d_java::ResolvedProgram;
use j2d_translator::{OutputFile, Translation, translate_program};

/// Outcome of one CLI run.
#[derive(Debug)]
pub struct RunResult {
    pub translation: Translation,
    /// Files written, empty when printing to stdout.
    pub written: Vec<PathBuf>,
    pub output: OutputTarget,
}

/// Resolve configuration, translate, and write outputs.
pub fn run(args: &CliArgs, cwd: &Path) -> Result<RunResult> {
    let resolved = config::resolve(args, cwd)?;
    run_resolved(&resolved)
}

pub fn run_resolved(resolved: &ResolvedConfig) -> Result<RunResult> {
    let _span = info_span!("j2d_run", inputs = resolved.inputs.len()).entered();

    let dumps = discover_inputs(&resolved.inputs)?;
    let program = load_program(&dumps)?;
    info!(
        dumps = dumps.len(),
        bindings = program.bindings.len(),
        types = program.type_count(),
        "resolver dumps loaded"
    );

    // Fatal errors surface here, before anything is written.
    let translation =
        translate_program(program, &resolved.options).context("translation failed")?;

    let written = match &resolved.output {
        OutputTarget::Directory(dir) => write_outputs(dir, &translation.files)?,
        OutputTarget::Stdout => Vec::new(),
    };

    Ok(RunResult {
        translation,
        written,
        output: resolved.output.clone(),
    })
}

/// Expand `inputs` into the list of `*.json` dumps, sorted and deduplicated.
///
/// Files are taken as given; directories are walked recursively for `.json`
/// files.
pub fn discover_inputs(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut dumps = Vec::new();
    for input in inputs {
        if input.is_file() {
            dumps.push(input.clone());
            continue;
        }
        if !input.is_dir() {
            bail!("input not found: {}", input.display());
        }
        for entry in WalkDir::new(input).follow_links(true) {
            let entry =
                entry.with_context(|| format!("failed to scan {}", input.display()))?;
            let path = entry.path();
            if entry.file_type().is_file() && is_dump(path) {
                dumps.push(path.to_path_buf());
            }
        }
    }
    dumps.sort();
    dumps.dedup();
    if dumps.is_empty() {
        bail!("no resolver dumps (*.json) found in the given inputs");
    }
    debug!(count = dumps.len(), "discovered resolver dumps");
    Ok(dumps)
}

fn is_dump(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
        && path
            .file_name()
            .is_none_or(|name| name != config::CONFIG_FILE_NAME)
}

/// Read and deserialize every dump in parallel, then merge them in path order.
pub fn load_program(dumps: &[PathBuf]) -> Result<ResolvedProgram> {
    let programs = dumps
        .par_iter()
        .map(|path| -> Result<ResolvedProgram> {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            ResolvedProgram::from_json(&text)
                .with_context(|| format!("failed to parse resolver dump {}", path.display()))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut merged = ResolvedProgram::default();
    for (path, program) in dumps.iter().zip(programs) {
        merged
            .merge(program)
            .with_context(|| format!("failed to merge resolver dump {}", path.display()))?;
    }
    Ok(merged)
}

/// Write each unit below `out_dir`, creating directories as needed.
pub fn write_outputs(out_dir: &Path, files: &[OutputFile]) -> Result<Vec<PathBuf>> {
    let paths: Vec<PathBuf> = files.iter().map(|file| out_dir.join(&file.path)).collect();
    files
        .par_iter()
        .zip(paths.par_iter())
        .try_for_each(|(file, path)| -> Result<()> {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create directory {}", parent.display()))?;
            }
            std::fs::write(path, &file.text)
                .with_context(|| format!("failed to write {}", path.display()))?;
            Ok(())
        })?;
    Ok(paths)
}

/// All units as one text, each preceded by a `// path` marker line.
pub fn render_stdout(files: &[OutputFile]) -> String {
    let mut out = String::new();
    for (index, file) in files.iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        out.push_str("// ");
        out.push_str(&file.path);
        out.push('\n');
        out.push_str(&file.text);
    }
    out
}
