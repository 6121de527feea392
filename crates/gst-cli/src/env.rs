//! # Environment Layering
//!
//! Variables are read from the process environment first, then from a single
//! dotenv file: the `--env-file` path when given, `./.env` otherwise. The
//! file is parsed into memory and the process environment is left untouched.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// File read when no `--env-file` is given.
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Process environment layered over at most one dotenv file.
#[derive(Debug, Clone, Default)]
pub struct EnvSource {
    file: Option<PathBuf>,
    vars: HashMap<String, String>,
}

impl EnvSource {
    /// Process environment only.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load `env_file` if given. Otherwise load `.env` from `dir` when it
    /// exists. An explicit file that cannot be read is an error.
    pub fn load(env_file: Option<&Path>, dir: &Path) -> Result<Self> {
        match env_file {
            Some(path) => Self::from_file(path),
            None => {
                let default = dir.join(DEFAULT_ENV_FILE);
                if default.is_file() {
                    Self::from_file(&default)
                } else {
                    Ok(Self::empty())
                }
            }
        }
    }

    /// Parse one dotenv file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let entries = dotenvy::from_path_iter(path)
            .with_context(|| format!("failed to read env file: {}", path.display()))?;
        let vars = entries
            .collect::<Result<HashMap<_, _>, _>>()
            .with_context(|| format!("failed to parse env file: {}", path.display()))?;

        tracing::debug!(path = %path.display(), vars = vars.len(), "loaded env file");
        Ok(Self {
            file: Some(path.to_path_buf()),
            vars,
        })
    }

    /// The dotenv file in use, if any.
    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    /// Look up `key`. The process environment wins over the file.
    pub fn get(&self, key: &str) -> Option<String> {
        std::env::var(key)
            .ok()
            .or_else(|| self.vars.get(key).cloned())
    }
}
