//! Test fixtures for common test scenarios.

use std::path::Path;

use crate::core::artifact::ArtifactSpec;
use crate::core::config::RunConfig;

/// Config with `src/` and `out/` created under `root` and one linux artifact
/// per name. The architecture is the name's last `-` segment.
pub fn run_config(root: &Path, names: &[&str]) -> RunConfig {
    let src_dir = root.join("src");
    let out_dir = root.join("out");
    std::fs::create_dir_all(&src_dir).unwrap();
    std::fs::create_dir_all(&out_dir).unwrap();

    let mut config = RunConfig {
        src_dir,
        out_dir,
        ..RunConfig::default()
    };
    for name in names {
        let arch = name.rsplit('-').next().unwrap_or(*name);
        config.add_artifact(ArtifactSpec::new(*name, "linux", arch));
    }
    config
}

/// Sorted file names in a directory.
pub fn list_dir(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
