//! Config schema: env file location, missing-variable policy, targets.
use std::path::PathBuf;

use {
    envstamp_inject::{DEFAULT_TARGET, DEFAULT_VARIABLE, MissingPolicy, Target},
    serde::{Deserialize, Serialize},
};

/// Default env file merged into the process environment.
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Root configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvstampConfig {
    /// `.env`-style file loaded before injection. Missing files are skipped.
    pub env_file: PathBuf,

    /// Replacement for unset variables.
    pub missing: MissingPolicy,

    /// Files to rewrite, processed in order.
    pub targets: Vec<TargetConfig>,
}

impl Default for EnvstampConfig {
    fn default() -> Self {
        Self {
            env_file: PathBuf::from(DEFAULT_ENV_FILE),
            missing: MissingPolicy::default(),
            targets: vec![TargetConfig::default()],
        }
    }
}

/// A single file to rewrite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    pub path: PathBuf,

    /// Variable names; each `%NAME%` is replaced once.
    pub variables: Vec<String>,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_TARGET),
            variables: vec![DEFAULT_VARIABLE.to_string()],
        }
    }
}

impl From<&TargetConfig> for Target {
    fn from(cfg: &TargetConfig) -> Self {
        Target::new(cfg.path.clone(), cfg.variables.iter().cloned())
    }
}

impl EnvstampConfig {
    pub fn targets(&self) -> Vec<Target> {
        self.targets.iter().map(Target::from).collect()
    }
}
