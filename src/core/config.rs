//! Run configuration file support.
//!
//! The configuration is a single document, JSON by default or TOML when the
//! file name ends in `.toml`:
//!
//! ```json
//! {
//!   "outDir": "build",
//!   "srcDir": ".",
//!   "md5": false,
//!   "sha1": true,
//!   "sha256": false,
//!   "sha512": false,
//!   "zipFile": false,
//!   "artifacts": [
//!     { "name": "tool-linux-amd64", "os": "linux", "arch": "amd64" }
//!   ]
//! }
//! ```
//!
//! Missing keys take the values of [`RunConfig::default`].

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::artifact::ArtifactSpec;
use crate::error::{Error, Result};
use crate::util::fs::is_dir;
use crate::util::hash::ChecksumKind;

/// Config file used when none is given on the command line.
pub const DEFAULT_CONFIG_FILE: &str = "cross-release.json";

/// On-disk format of a config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    /// Pick the format from the file extension; anything but `.toml` is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => ConfigFormat::Toml,
            _ => ConfigFormat::Json,
        }
    }
}

/// Configuration for one release run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RunConfig {
    /// Directory receiving binaries, checksum files and archives (must exist)
    pub out_dir: PathBuf,

    /// Directory the compiler runs in (must exist)
    pub src_dir: PathBuf,

    pub md5: bool,
    pub sha1: bool,
    pub sha256: bool,
    pub sha512: bool,

    /// Pack each binary into `<name>.zip`
    pub zip_file: bool,

    /// Build targets, in build order
    pub artifacts: Vec<ArtifactSpec>,

    /// External compiler settings
    #[serde(skip_serializing_if = "ToolchainConfig::is_default")]
    pub toolchain: ToolchainConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            out_dir: PathBuf::from("build"),
            src_dir: PathBuf::from("."),
            md5: false,
            sha1: true,
            sha256: false,
            sha512: false,
            zip_file: false,
            artifacts: Vec::new(),
            toolchain: ToolchainConfig::default(),
        }
    }
}

/// How the external compiler is invoked.
///
/// The defaults drive `go build`: the command line is
/// `<program> <build_args...> <output> <artifact flags...>` with the target
/// selected through `os_env` and `arch_env`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ToolchainConfig {
    /// Compiler executable, looked up on PATH unless it is a path
    pub program: String,

    /// Arguments placed before the output path
    pub build_args: Vec<String>,

    /// Variable selecting the target operating system
    pub os_env: String,

    /// Variable selecting the target architecture
    pub arch_env: String,

    /// Variable set to `1` for artifacts with native interop enabled
    pub native_interop_env: String,
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        ToolchainConfig {
            program: "go".to_string(),
            build_args: vec!["build".to_string(), "-o".to_string()],
            os_env: "GOOS".to_string(),
            arch_env: "GOARCH".to_string(),
            native_interop_env: "CGO_ENABLED".to_string(),
        }
    }
}

impl ToolchainConfig {
    pub fn is_default(&self) -> bool {
        *self == ToolchainConfig::default()
    }
}

/// A suspicious but non-fatal configuration detail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// The architecture does not appear in the artifact name.
    ArchNotInName { artifact: String, arch: String },
    /// Several artifacts share a name and will overwrite each other's outputs.
    DuplicateName { artifact: String },
    /// Nothing to build.
    NoArtifacts,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigWarning::ArchNotInName { artifact, arch } => write!(
                f,
                "arch `{}` not found in artifact name `{}`",
                arch, artifact
            ),
            ConfigWarning::DuplicateName { artifact } => write!(
                f,
                "artifact name `{}` is used more than once; later builds overwrite earlier outputs",
                artifact
            ),
            ConfigWarning::NoArtifacts => write!(f, "no artifacts configured"),
        }
    }
}

impl RunConfig {
    /// Starter configuration with common platform/architecture pairs.
    pub fn template(name: &str) -> Self {
        let mut config = RunConfig::default();
        for (os, arch, suffix) in [
            ("darwin", "amd64", ""),
            ("darwin", "arm64", ""),
            ("linux", "amd64", ""),
            ("linux", "arm64", ""),
            ("windows", "amd64", ".exe"),
            ("windows", "arm64", ".exe"),
        ] {
            config.add_artifact(ArtifactSpec::new(
                format!("{}-{}-{}{}", name, os, arch, suffix),
                os,
                arch,
            ));
        }
        config
    }

    pub fn add_artifact(&mut self, artifact: ArtifactSpec) {
        self.artifacts.push(artifact);
    }

    /// Load a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let contents = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(&contents, ConfigFormat::from_path(path)).map_err(|message| {
            Error::ConfigParse {
                path: path.to_path_buf(),
                message,
            }
        })
    }

    /// Parse configuration text.
    pub fn parse(contents: &str, format: ConfigFormat) -> Result<Self, String> {
        match format {
            ConfigFormat::Json => serde_json::from_str(contents).map_err(|e| e.to_string()),
            ConfigFormat::Toml => toml::from_str(contents).map_err(|e| e.to_string()),
        }
    }

    /// Render configuration text.
    pub fn render(&self, format: ConfigFormat) -> Result<String> {
        let rendered = match format {
            ConfigFormat::Json => serde_json::to_string_pretty(self)
                .map(|s| s + "\n")
                .map_err(|e| e.to_string()),
            ConfigFormat::Toml => toml::to_string_pretty(self).map_err(|e| e.to_string()),
        };
        rendered.map_err(|message| Error::ConfigSerialize { message })
    }

    /// Save the configuration, refusing to replace an existing file unless
    /// `overwrite` is set.
    pub fn save(&self, path: &Path, overwrite: bool) -> Result<()> {
        if path.exists() && !overwrite {
            return Err(Error::ConfigExists {
                path: path.to_path_buf(),
            });
        }

        let contents = self.render(ConfigFormat::from_path(path))?;
        std::fs::write(path, contents).map_err(|source| Error::ConfigWrite {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Whether the checksum step for `kind` is enabled.
    pub fn is_enabled(&self, kind: ChecksumKind) -> bool {
        match kind {
            ChecksumKind::Md5 => self.md5,
            ChecksumKind::Sha1 => self.sha1,
            ChecksumKind::Sha256 => self.sha256,
            ChecksumKind::Sha512 => self.sha512,
        }
    }

    /// Enabled checksum algorithms, in emission order.
    pub fn checksums(&self) -> Vec<ChecksumKind> {
        ChecksumKind::ALL
            .into_iter()
            .filter(|kind| self.is_enabled(*kind))
            .collect()
    }

    /// Check that the source and output directories exist.
    ///
    /// Neither is created; a missing output directory is treated as a
    /// mistake rather than something to paper over.
    pub fn validate_dirs(&self) -> Result<()> {
        if !is_dir(&self.src_dir) {
            return Err(Error::SrcDirNotFound {
                path: self.src_dir.clone(),
            });
        }
        if !is_dir(&self.out_dir) {
            return Err(Error::OutDirNotFound {
                path: self.out_dir.clone(),
            });
        }
        Ok(())
    }

    /// Look for likely mistakes that do not prevent a run.
    pub fn check(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if self.artifacts.is_empty() {
            warnings.push(ConfigWarning::NoArtifacts);
        }

        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        for artifact in &self.artifacts {
            if !artifact.name.contains(&artifact.arch) {
                warnings.push(ConfigWarning::ArchNotInName {
                    artifact: artifact.name.clone(),
                    arch: artifact.arch.clone(),
                });
            }
            if !seen.insert(artifact.name.as_str()) && reported.insert(artifact.name.as_str()) {
                warnings.push(ConfigWarning::DuplicateName {
                    artifact: artifact.name.clone(),
                });
            }
        }

        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"{
        "outDir": "dist",
        "srcDir": "cmd/tool",
        "md5": true,
        "sha1": false,
        "sha256": true,
        "sha512": false,
        "zipFile": true,
        "artifacts": [
            {"name": "tool-linux-amd64", "os": "linux", "arch": "amd64"},
            {"name": "tool-darwin-arm64", "os": "darwin", "arch": "arm64",
             "cgoEnabled": true, "flags": ["-ldflags", "-s -w"]}
        ]
    }"#;

    #[test]
    fn test_parse_json() {
        let config = RunConfig::parse(SAMPLE, ConfigFormat::Json).unwrap();

        assert_eq!(config.out_dir, PathBuf::from("dist"));
        assert_eq!(config.src_dir, PathBuf::from("cmd/tool"));
        assert_eq!(
            config.checksums(),
            vec![ChecksumKind::Md5, ChecksumKind::Sha256]
        );
        assert!(config.zip_file);
        assert_eq!(config.artifacts.len(), 2);
        assert_eq!(config.artifacts[1].flags, vec!["-ldflags", "-s -w"]);
        assert!(config.artifacts[1].native_interop);
        assert!(config.toolchain.is_default());
    }

    #[test]
    fn test_missing_keys_use_defaults() {
        let config = RunConfig::parse(r#"{"artifacts": []}"#, ConfigFormat::Json).unwrap();

        assert_eq!(config, RunConfig::default());
        assert_eq!(config.checksums(), vec![ChecksumKind::Sha1]);
    }

    #[test]
    fn test_parse_toml() {
        let contents = r#"
outDir = "dist"
sha256 = true
sha1 = false

[toolchain]
program = "/usr/local/go/bin/go"

[[artifacts]]
name = "tool-linux-arm64"
os = "linux"
arch = "arm64"
flags = ["-trimpath"]
"#;
        let config = RunConfig::parse(contents, ConfigFormat::Toml).unwrap();

        assert_eq!(config.out_dir, PathBuf::from("dist"));
        assert_eq!(config.src_dir, PathBuf::from("."));
        assert_eq!(config.checksums(), vec![ChecksumKind::Sha256]);
        assert_eq!(config.toolchain.program, "/usr/local/go/bin/go");
        assert_eq!(config.toolchain.os_env, "GOOS");
        assert_eq!(config.artifacts[0].flags, vec!["-trimpath"]);
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            ConfigFormat::from_path(Path::new("release.toml")),
            ConfigFormat::Toml
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("cross-release.json")),
            ConfigFormat::Json
        );
        assert_eq!(ConfigFormat::from_path(Path::new("config")), ConfigFormat::Json);
    }

    #[test]
    fn test_template() {
        let config = RunConfig::template("mytool");
        let names: Vec<&str> = config.artifacts.iter().map(|a| a.name.as_str()).collect();

        assert_eq!(
            names,
            vec![
                "mytool-darwin-amd64",
                "mytool-darwin-arm64",
                "mytool-linux-amd64",
                "mytool-linux-arm64",
                "mytool-windows-amd64.exe",
                "mytool-windows-arm64.exe",
            ]
        );
        assert_eq!(config.out_dir, PathBuf::from("build"));
        assert!(config.sha1 && !config.md5 && !config.sha256 && !config.sha512);
        assert!(!config.zip_file);
        assert!(config.check().is_empty());
    }

    #[test]
    fn test_save_and_load() {
        for file in ["cross-release.json", "cross-release.toml"] {
            let tmp = TempDir::new().unwrap();
            let path = tmp.path().join(file);
            let mut config = RunConfig::template("app");
            config.artifacts[0] = config.artifacts[0]
                .clone()
                .with_native_interop(true)
                .with_flags(["-trimpath"]);

            config.save(&path, false).unwrap();
            let loaded = RunConfig::load(&path).unwrap();

            assert_eq!(loaded, config, "format of {}", file);
        }
    }

    #[test]
    fn test_saved_json_uses_camel_case() {
        let json = RunConfig::template("app")
            .render(ConfigFormat::Json)
            .unwrap();

        assert!(json.contains("\"outDir\": \"build\""));
        assert!(json.contains("\"zipFile\": false"));
        assert!(!json.contains("toolchain"));
        assert!(!json.contains("cgoEnabled"));
        assert!(json.ends_with("}\n"));
    }

    #[test]
    fn test_save_refuses_existing_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("cross-release.json");
        std::fs::write(&path, "{}").unwrap();

        let err = RunConfig::template("app").save(&path, false).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInit);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");

        RunConfig::template("app").save(&path, true).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("app-linux-amd64"));
    }

    #[test]
    fn test_load_missing_file() {
        let tmp = TempDir::new().unwrap();
        let err = RunConfig::load(&tmp.path().join("nope.json")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigNotFound);
    }

    #[test]
    fn test_load_malformed_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bad.json");
        std::fs::write(&path, "{ \"outDir\": ").unwrap();

        let err = RunConfig::load(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigRead);
        assert!(err.to_string().contains("bad.json"));
    }

    #[test]
    fn test_validate_dirs() {
        let tmp = TempDir::new().unwrap();
        let mut config = RunConfig {
            src_dir: tmp.path().join("src"),
            out_dir: tmp.path().join("out"),
            ..RunConfig::default()
        };

        assert_eq!(
            config.validate_dirs().unwrap_err().kind(),
            ErrorKind::SrcDirNotFound
        );

        std::fs::create_dir(&config.src_dir).unwrap();
        assert_eq!(
            config.validate_dirs().unwrap_err().kind(),
            ErrorKind::OutDirNotFound
        );
        assert!(!config.out_dir.exists());

        config.out_dir = tmp.path().to_path_buf();
        config.validate_dirs().unwrap();
    }

    #[test]
    fn test_check_flags_arch_mismatch() {
        let mut config = RunConfig::default();
        config.add_artifact(ArtifactSpec::new("tool-linux", "linux", "amd64"));

        assert_eq!(
            config.check(),
            vec![ConfigWarning::ArchNotInName {
                artifact: "tool-linux".to_string(),
                arch: "amd64".to_string(),
            }]
        );
    }

    #[test]
    fn test_check_flags_duplicate_names_once() {
        let mut config = RunConfig::default();
        for _ in 0..3 {
            config.add_artifact(ArtifactSpec::new("tool-amd64", "linux", "amd64"));
        }

        assert_eq!(
            config.check(),
            vec![ConfigWarning::DuplicateName {
                artifact: "tool-amd64".to_string(),
            }]
        );
    }

    #[test]
    fn test_check_flags_empty_artifacts() {
        assert_eq!(RunConfig::default().check(), vec![ConfigWarning::NoArtifacts]);
    }
}
