//! `cross-release version` command

use anyhow::Result;
use tracing::info;

pub fn execute() -> Result<()> {
    info!(
        name = env!("CARGO_PKG_NAME"),
        version = env!("CARGO_PKG_VERSION"),
        "build info"
    );
    info!(
        os = std::env::consts::OS,
        arch = std::env::consts::ARCH,
        "build info"
    );
    if let Some(repository) = option_env!("CARGO_PKG_REPOSITORY").filter(|r| !r.is_empty()) {
        info!(repository, "build info");
    }
    Ok(())
}
