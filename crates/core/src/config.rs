//! Host build description: which `prebuilt_apis` meta-modules exist and
//! where their directories are.

use crate::error::ConfigError;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use std::path::Path;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PrebuiltApisConfig {
    /// Meta-module name; diagnostics are attributed to it.
    pub name: String,
    /// Module directory relative to the host root. Empty means the root.
    #[serde(default, deserialize_with = "deserialize_dir")]
    pub dir: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

fn deserialize_dir<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    String::deserialize(deserializer).map(|dir| normalize_dir(&dir))
}

/// Drops empty and `.` segments, so `./prebuilts/sdk/` becomes `prebuilts/sdk`
/// and `.` becomes the root.
pub fn normalize_dir(dir: &str) -> String {
    dir.split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect::<Vec<_>>()
        .join("/")
}

impl PrebuiltApisConfig {
    pub fn new(name: impl Into<String>, dir: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dir: normalize_dir(&dir.into()),
            enabled: true,
        }
    }

    /// The module directory in the form the host reports paths in.
    pub fn module_dir(&self) -> String {
        normalize_dir(&self.dir)
    }

    /// The module directory with a trailing `/`, or `""` for the root.
    pub fn dir_prefix(&self) -> String {
        let dir = self.module_dir();
        if dir.is_empty() {
            String::new()
        } else {
            format!("{dir}/")
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildDescription {
    #[serde(default)]
    pub modules: Vec<PrebuiltApisConfig>,
}

impl BuildDescription {
    pub fn single(config: PrebuiltApisConfig) -> Self {
        Self {
            modules: vec![config],
        }
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let description: BuildDescription = serde_json::from_str(content)?;

        let mut seen = HashSet::new();
        for module in &description.modules {
            if !seen.insert(module.name.as_str()) {
                return Err(ConfigError::DuplicateModule(module.name.clone()));
            }
        }

        Ok(description)
    }

    pub fn enabled(&self) -> impl Iterator<Item = &PrebuiltApisConfig> {
        self.modules.iter().filter(|m| m.enabled)
    }
}
