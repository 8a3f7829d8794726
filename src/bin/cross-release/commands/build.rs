//! `cross-release build` command

use std::io::{self, IsTerminal};

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::cli::{BuildArgs, GlobalArgs, MessageFormat};
use cross_release::builder::{ExternalCompiler, JsonReporter, ProgressReporter, TracingReporter};
use cross_release::{Pipeline, RunConfig};

/// Whether to draw a progress bar instead of plain log lines.
fn use_progress_bar(verbose: bool, artifacts: usize, is_terminal: bool) -> bool {
    !verbose && artifacts > 1 && is_terminal
}

pub fn execute(global: &GlobalArgs, args: BuildArgs) -> Result<()> {
    let config = RunConfig::load(&global.config_file)?;
    debug!(
        config_file = %global.config_file.display(),
        artifacts = config.artifacts.len(),
        "loaded config"
    );

    for warning in config.check() {
        warn!("{}", warning);
    }

    if args.skip_build {
        config.validate_dirs()?;
        info!("skipping build step");
        return Ok(());
    }

    let compiler = ExternalCompiler::new(config.toolchain.clone());
    let pipeline = Pipeline::new(&config, &compiler);

    let summary = match global.message_format {
        MessageFormat::Json => pipeline.run(&mut JsonReporter::new(io::stdout().lock()))?,
        MessageFormat::Human
            if use_progress_bar(
                global.verbose,
                config.artifacts.len(),
                io::stderr().is_terminal(),
            ) =>
        {
            pipeline.run(&mut ProgressReporter::new(config.artifacts.len()))?
        }
        MessageFormat::Human => pipeline.run(&mut TracingReporter)?,
    };

    if global.message_format == MessageFormat::Human {
        for artifact in &summary.artifacts {
            eprintln!(
                "    Finished `{}` -> {}",
                artifact.name,
                artifact.binary.display()
            );
        }
        eprintln!(
            "    Finished {} artifact(s) in {:.2}s",
            summary.artifacts.len(),
            summary.duration.as_secs_f64()
        );
    }

    Ok(())
}
