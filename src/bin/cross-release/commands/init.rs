//! `cross-release init` command

use std::path::Path;

use anyhow::Result;
use tracing::info;

use crate::cli::{GlobalArgs, InitArgs};
use cross_release::util::fs::dir_name;
use cross_release::RunConfig;

/// Artifact name prefix: the explicit name, else the directory name, else `example`.
pub fn determine_name(name: Option<String>, cwd: Option<&Path>) -> String {
    name.filter(|n| !n.is_empty())
        .or_else(|| cwd.and_then(dir_name))
        .unwrap_or_else(|| "example".to_string())
}

pub fn execute(global: &GlobalArgs, args: InitArgs) -> Result<()> {
    let cwd = std::env::current_dir().ok();
    let name = determine_name(args.name, cwd.as_deref());

    let config = RunConfig::template(&name);
    config.save(&global.config_file, args.force)?;

    info!(
        config_file = %global.config_file.display(),
        artifacts = config.artifacts.len(),
        "created new config"
    );

    Ok(())
}
