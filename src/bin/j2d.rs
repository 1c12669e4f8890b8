#![allow(clippy::print_stderr)]

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{IsTerminal, Write};

use j2d::cli::args::CliArgs;
use j2d::cli::config::OutputTarget;
use j2d::cli::driver;
use j2d::cli::reporter::Reporter;

fn main() -> Result<()> {
    // No-op unless J2D_LOG or RUST_LOG is set; J2D_LOG_FORMAT=tree|json|text.
    j2d::tracing_config::init_tracing();

    let args = CliArgs::parse();
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;

    let result = driver::run(&args, &cwd)?;

    if result.output == OutputTarget::Stdout {
        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(driver::render_stdout(&result.translation.files).as_bytes())
            .context("failed to write to stdout")?;
        stdout.flush().context("failed to flush stdout")?;
    }

    let color = !args.no_color && std::io::stderr().is_terminal();
    let reporter = Reporter::new(color);
    let diagnostics = &result.translation.diagnostics;
    if !diagnostics.is_empty() {
        eprintln!("{}", reporter.render(diagnostics));
    }
    if let OutputTarget::Directory(dir) = &result.output {
        eprintln!("{}", reporter.summary(result.written.len(), diagnostics));
        eprintln!("Output written to {}", dir.display());
    }

    Ok(())
}
