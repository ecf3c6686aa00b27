use anyhow::{Context, Result};
use emu_window::WindowConfig;
use serde::Deserialize;
use std::fs;

#[derive(Debug, Clone, Deserialize)]
pub struct HostConfig {
    /// Host ticks to run before shutting down.
    #[serde(default = "default_frames")]
    pub frames: u32,

    #[serde(default)]
    pub window: WindowConfig,
}

fn default_frames() -> u32 {
    120
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            frames: default_frames(),
            window: WindowConfig::default(),
        }
    }
}

impl HostConfig {
    pub fn parse(s: &str) -> Result<Self> {
        let cfg: HostConfig = toml::from_str(s).context("invalid host config")?;
        cfg.window.validate()?;
        Ok(cfg)
    }

    pub fn load_or_default(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => {
                let s = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config {}", path))?;
                Self::parse(&s).with_context(|| format!("Failed to parse config {}", path))
            }
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use emu_window::LayoutOption;

    #[test]
    fn parses_window_table() {
        let cfg = HostConfig::parse("frames = 3\n[window]\nscale = 1.0\nlayout = \"large_screen\"\n")
            .unwrap();
        assert_eq!(cfg.frames, 3);
        assert_eq!(cfg.window.layout, LayoutOption::LargeScreen);
    }

    #[test]
    fn rejects_bad_scale() {
        assert!(HostConfig::parse("[window]\nscale = -1.0\n").is_err());
        assert_eq!(HostConfig::load_or_default(None).unwrap().frames, 120);
    }
}
