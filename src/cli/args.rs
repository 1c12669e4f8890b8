use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for the j2d binary.
#[derive(Parser, Debug)]
#[command(name = "j2d", version, about = "Translate resolved Java sources to Dart")]
pub struct CliArgs {
    /// Path to a j2d.json configuration file.
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Directory that receives one .dart file per compilation unit.
    #[arg(short = 'o', long = "out-dir", alias = "outDir")]
    pub out_dir: Option<PathBuf>,

    /// Convert getX()/setX() pairs to Dart getters and setters.
    #[arg(long)]
    pub accessors: bool,

    /// Spaces per indentation level in the printed output.
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..=16))]
    pub indent: Option<u16>,

    /// Print every translated unit to stdout instead of writing files.
    #[arg(long)]
    pub stdout: bool,

    /// Disable colored diagnostics.
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Resolver dumps (*.json) or directories containing them.
    #[arg(value_name = "INPUT")]
    pub inputs: Vec<PathBuf>,
}
