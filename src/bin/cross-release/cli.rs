//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use cross_release::core::DEFAULT_CONFIG_FILE;

const AFTER_HELP: &str = "\
Outputs per configured artifact:
  <outDir>/<name>              the binary
  <outDir>/<name>.<algo>.txt   for each of md5, sha1, sha256, sha512 when enabled
  <outDir>/<name>.zip          when zipFile is enabled

Workflow:
  1. cross-release init            write a starter config
  2. edit cross-release.json       adjust artifacts and switches
  3. mkdir build                   the output directory must already exist
  4. cross-release build           build, hash and archive

Checksum files are compatible with md5sum/sha256sum --check; zip archives hold
the binary at their root.";

/// Cross-compile release binaries and package them with checksums and zips
#[derive(Parser)]
#[command(name = "cross-release")]
#[command(author, version, about, long_about = None, after_help = AFTER_HELP)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Options shared by all commands.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Config file to use
    #[arg(
        short,
        long,
        global = true,
        env = "CROSS_RELEASE_CONFIG",
        default_value = DEFAULT_CONFIG_FILE
    )]
    pub config_file: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format for build events
    #[arg(long, global = true, value_enum, default_value_t = MessageFormat::Human)]
    pub message_format: MessageFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MessageFormat {
    /// Log lines on stderr
    Human,
    /// One JSON object per build event on stdout
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build every configured artifact (default)
    Build(BuildArgs),

    /// Write a starter config file
    Init(InitArgs),

    /// Show version and build information
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug, Default)]
pub struct BuildArgs {
    /// Check the config and directories, then stop before building
    #[arg(long)]
    pub skip_build: bool,
}

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Artifact name prefix (defaults to the current directory name)
    #[arg(long)]
    pub name: Option<String>,

    /// Overwrite an existing config file
    #[arg(long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
