//! Launcher Configuration Module
//!
//! Serde-based TOML configuration for the trainer program and the
//! device-visibility variable. Every section is optional; an absent
//! file yields the stock `python train.py` setup.

use crate::errors::LaunchError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root launcher configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LaunchConfig {
    #[serde(default)]
    pub trainer: TrainerConfig,

    #[serde(default)]
    pub devices: DeviceConfig,
}

impl LaunchConfig {
    /// Load configuration from TOML file
    pub fn from_file(path: &Path) -> Result<Self, LaunchError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parse configuration from TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, LaunchError> {
        Ok(toml::from_str(content)?)
    }

    /// Load from `path` when given, defaults otherwise, then validate.
    pub fn load(path: Option<&Path>) -> Result<Self, LaunchError> {
        let config = match path {
            Some(path) => {
                log::debug!("Loading launcher config from {}", path.display());
                Self::from_file(path)?
            }
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration consistency
    pub fn validate(&self) -> Result<(), LaunchError> {
        self.trainer.validate()?;
        self.devices.validate()?;
        Ok(())
    }
}

// =============================================================================
// Trainer Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainerConfig {
    /// Program spawned for every run
    #[serde(default = "default_interpreter")]
    pub interpreter: String,

    /// Training entry point, passed as the first argument
    #[serde(default = "default_script")]
    pub script: String,

    #[serde(default)]
    pub working_dir: Option<String>,
}

impl TrainerConfig {
    pub fn validate(&self) -> Result<(), LaunchError> {
        if self.interpreter.trim().is_empty() {
            return Err(LaunchError::config("trainer.interpreter must not be empty"));
        }
        if self.script.trim().is_empty() {
            return Err(LaunchError::config("trainer.script must not be empty"));
        }
        Ok(())
    }
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            interpreter: default_interpreter(),
            script: default_script(),
            working_dir: None,
        }
    }
}

// =============================================================================
// Device Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Variable scoped onto the trainer for device-visible policies
    #[serde(default = "default_device_env_var")]
    pub env_var: String,
}

impl DeviceConfig {
    pub fn validate(&self) -> Result<(), LaunchError> {
        if self.env_var.is_empty() {
            return Err(LaunchError::config("devices.env_var must not be empty"));
        }
        if self.env_var.contains('=') || self.env_var.contains('\0') {
            return Err(LaunchError::config(format!(
                "devices.env_var '{}' is not a valid variable name",
                self.env_var.escape_debug()
            )));
        }
        Ok(())
    }
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            env_var: default_device_env_var(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_interpreter() -> String { "python".to_string() }
fn default_script() -> String { "train.py".to_string() }
fn default_device_env_var() -> String { "CUDA_VISIBLE_DEVICES".to_string() }
