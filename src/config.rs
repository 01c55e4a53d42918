use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Result, SyncError};

/// Name of the configuration file looked up in the repository root and in
/// the user config directory.
pub const CONFIG_FILE_NAME: &str = "pinsync.toml";

/// Represents the complete configuration for pinsync.
///
/// Holds the ordered extraction steps and the output export settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub steps: Vec<StepConfig>,

    #[serde(default)]
    pub output: OutputConfig,
}

/// One value pulled from a source file plus the files it is published to.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct StepConfig {
    /// Name templates use to refer to the extracted value
    pub name: String,

    /// File holding the value
    pub source: String,

    /// Line-anchored pattern with exactly one capturing group
    pub pattern: String,

    #[serde(default)]
    pub targets: Vec<TargetConfig>,
}

/// A substitution applied to each of `files`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TargetConfig {
    pub files: Vec<String>,

    /// Pattern replaced everywhere it occurs
    pub pattern: String,

    /// Replacement text with `{name}` placeholders
    pub template: String,
}

fn default_output_env_var() -> String {
    "GITHUB_OUTPUT".to_string()
}

fn default_output_fallback() -> String {
    "github_output.txt".to_string()
}

/// Configuration for exporting values to a downstream CI step.
///
/// Each entry of `values` becomes one `key=value` line appended, in the order
/// configured, to the file named by `env_var`, or to `fallback_path` when that
/// variable is unset. `enabled` only decides whether the export runs; the
/// command line can override it.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct OutputConfig {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_output_env_var")]
    pub env_var: String,

    #[serde(default = "default_output_fallback")]
    pub fallback_path: String,

    #[serde(default)]
    pub values: Vec<OutputValue>,
}

/// One exported `key=value` line; `value` is a template.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct OutputValue {
    pub key: String,
    pub value: String,
}

impl OutputValue {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        OutputValue {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            enabled: false,
            env_var: default_output_env_var(),
            fallback_path: default_output_fallback(),
            values: Vec::new(),
        }
    }
}

/// Built-in pipelines matching the repository's pinning convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    /// Workflows and Dockerfile, exporting `rust_version` for later CI steps
    Update,
    /// Workflows and Dockerfile; `rust_version` is exported only on request
    RustToolchain,
}

const TOOLCHAIN_FILE: &str = "rust-toolchain";
const TOOLCHAIN_PATTERN: &str = r#"(?:channel\s*=\s*")?(\d+\.\d+\.\d+)"#;
const WORKFLOW_FILES: [&str; 2] = [
    ".github/workflows/test.yml",
    ".github/workflows/test-slim.yml",
];
const DOCKERFILE: &str = "Dockerfile.build";

fn rust_version_output() -> OutputValue {
    OutputValue::new("rust_version", "{rust_version}")
}

impl Preset {
    pub fn name(&self) -> &'static str {
        match self {
            Preset::Update => "update",
            Preset::RustToolchain => "rust-toolchain",
        }
    }

    pub fn config(&self) -> Config {
        let toolchain = StepConfig {
            name: "rust_version".to_string(),
            source: TOOLCHAIN_FILE.to_string(),
            pattern: TOOLCHAIN_PATTERN.to_string(),
            targets: vec![TargetConfig {
                files: WORKFLOW_FILES.iter().map(|f| f.to_string()).collect(),
                pattern: r"dtolnay/rust-toolchain@\d+\.\d+\.\d+".to_string(),
                template: "dtolnay/rust-toolchain@{rust_version}".to_string(),
            }],
        };

        match self {
            Preset::Update => {
                let chef = StepConfig {
                    name: "chef_version".to_string(),
                    source: DOCKERFILE.to_string(),
                    pattern: r"FROM lukemathwalker/cargo-chef:(\d+\.\d+\.\d+)-rust-\d+\.\d+\.\d+-slim-buster AS chef".to_string(),
                    targets: vec![TargetConfig {
                        files: vec![DOCKERFILE.to_string()],
                        pattern: r"lukemathwalker/cargo-chef:\d+\.\d+\.\d+-rust-\d+\.\d+\.\d+-slim-buster".to_string(),
                        template: "lukemathwalker/cargo-chef:{chef_version}-rust-{rust_version}-slim-buster".to_string(),
                    }],
                };

                Config {
                    steps: vec![toolchain, chef],
                    output: OutputConfig {
                        enabled: true,
                        values: vec![rust_version_output()],
                        ..OutputConfig::default()
                    },
                }
            }
            Preset::RustToolchain => {
                let chef = StepConfig {
                    name: "chef_version".to_string(),
                    source: DOCKERFILE.to_string(),
                    pattern: r".*cargo-chef:(\d+\.\d+\.\d+)-rust-\d+\.\d+\.\d+-slim-buster AS chef"
                        .to_string(),
                    targets: vec![TargetConfig {
                        files: vec![DOCKERFILE.to_string()],
                        pattern: r"cargo-chef:\d+\.\d+\.\d+-rust-\d+\.\d+\.\d+-slim-buster"
                            .to_string(),
                        template: "cargo-chef:{chef_version}-rust-{rust_version}-slim-buster"
                            .to_string(),
                    }],
                };

                Config {
                    steps: vec![toolchain, chef],
                    output: OutputConfig {
                        enabled: false,
                        values: vec![rust_version_output()],
                        ..OutputConfig::default()
                    },
                }
            }
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Preset::Update.config()
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `pinsync.toml` in the repository root
/// 3. `pinsync.toml` in the user config directory
/// 4. The `update` preset if no file is found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>, root: &Path) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path).map_err(|e| SyncError::read(path, e))?
    } else if root.join(CONFIG_FILE_NAME).exists() {
        let path = root.join(CONFIG_FILE_NAME);
        fs::read_to_string(&path).map_err(|e| SyncError::read(&path, e))?
    } else if let Some(config_dir) = dirs::config_dir() {
        let path = config_dir.join(CONFIG_FILE_NAME);
        if path.exists() {
            fs::read_to_string(&path).map_err(|e| SyncError::read(&path, e))?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    parse_config(&config_str)
}

/// Parses configuration from TOML text.
pub fn parse_config(config_str: &str) -> Result<Config> {
    let config: Config = toml::from_str(config_str)?;
    Ok(config)
}
