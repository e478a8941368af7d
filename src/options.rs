//! Hash options and their persistent config file.

use std::path::{Path, PathBuf};

use murmur3::Variant;
use serde::{Deserialize, Serialize};

use crate::digest::IdLayout;
use crate::error::{Error, Result};
use crate::hash::TextEncoding;

/// Environment variable that overrides the configured seed.
pub const SEED_ENV: &str = "FASTHASH_SEED";

/// Everything that changes a digest, plus how it becomes an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HashOptions {
    /// `None` hashes with seed 0.
    pub seed: Option<u32>,
    pub variant: Variant,
    pub encoding: TextEncoding,
    pub layout: IdLayout,
}

impl HashOptions {
    pub fn with_seed(mut self, seed: Option<u32>) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    /// Default config file path: `<config_dir>/fasthash/config.json`.
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut p| {
            p.push("fasthash");
            p.push("config.json");
            p
        })
    }

    /// Load from the default path. Missing or unreadable config falls back to defaults.
    pub fn load() -> Self {
        let Some(path) = Self::path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(opts) => {
                tracing::debug!(path = %path.display(), "loaded config");
                opts
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring invalid config");
                Self::default()
            }
        }
    }

    /// Load from a specific file.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::FileNotFound(path.to_path_buf())
            } else {
                Error::Io(e)
            }
        })?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Write as pretty JSON, creating parent directories.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Save to the default path and return it.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::path().ok_or_else(|| Error::config("no config directory on this platform"))?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Apply `FASTHASH_SEED` if set.
    pub fn apply_env(self) -> Result<Self> {
        let value = std::env::var(SEED_ENV).ok();
        self.apply_seed_override(value.as_deref())
    }

    /// Apply a textual seed override; `None` or blank leaves the seed alone.
    pub fn apply_seed_override(mut self, value: Option<&str>) -> Result<Self> {
        match value.map(str::trim) {
            Some(v) if !v.is_empty() => {
                self.seed = Some(parse_seed(v)?);
                Ok(self)
            }
            _ => Ok(self),
        }
    }
}

/// Parse a 32-bit seed given in decimal or `0x` hex.
pub fn parse_seed(s: &str) -> Result<u32> {
    let s = s.trim();
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => s.parse::<u32>(),
    };
    parsed.map_err(|e| Error::InvalidSeed(format!("{:?}: {}", s, e)))
}
