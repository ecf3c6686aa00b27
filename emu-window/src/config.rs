use serde::{Deserialize, Serialize};

use crate::error::{Result, WindowError};

/// Largest resolution multiplier accepted.
pub const MAX_SCALE: f32 = 10.0;

/// How the two emulated screens are arranged inside the framebuffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LayoutOption {
    /// Top screen stacked above the bottom screen.
    #[default]
    Default,
    /// Only one screen, top unless swapped.
    SingleScreen,
    /// One large screen with the other at quarter size beside it.
    LargeScreen,
    /// Both screens next to each other.
    SideScreen,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Resolution multiplier applied to the native screen sizes.
    #[serde(default = "default_scale")]
    pub scale: f32,

    #[serde(default)]
    pub layout: LayoutOption,

    #[serde(default)]
    pub swap_screens: bool,

    /// Translate host pointer samples into touch input.
    #[serde(default = "default_emulated_pointer")]
    pub emulated_pointer: bool,
}

fn default_scale() -> f32 {
    2.0
}

fn default_emulated_pointer() -> bool {
    true
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            scale: default_scale(),
            layout: LayoutOption::default(),
            swap_screens: false,
            emulated_pointer: default_emulated_pointer(),
        }
    }
}

impl WindowConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let cfg: WindowConfig =
            toml::from_str(s).map_err(|e| WindowError::Config(format!("parse: {}", e)))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.scale.is_finite() || !(1.0..=MAX_SCALE).contains(&self.scale) {
            return Err(WindowError::Config(format!(
                "scale must be between 1 and {}, got {}",
                MAX_SCALE, self.scale
            )));
        }
        Ok(())
    }
}
