//! Run configuration loaded from `~/.config/backarc/config.toml`.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::template::DEFAULT_TEMPLATE_URL;

/// Delivery surface used by every worker slot in a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Iframe,
    Popup,
    Tab,
}

/// Window lifecycle for popup/tab modes: a new window per task, or one
/// window per slot navigated in place. Ignored when mode is iframe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reuse {
    #[default]
    Fresh,
    Reuse,
}

/// Enabled archive targets.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Targets {
    pub wayback: bool,
    pub archivetoday: bool,
}

impl Default for Targets {
    fn default() -> Self {
        Self {
            wayback: true,
            archivetoday: true,
        }
    }
}

impl Targets {
    pub fn any(&self) -> bool {
        self.wayback || self.archivetoday
    }

    /// Tasks emitted per backlink.
    pub fn enabled_count(&self) -> usize {
        usize::from(self.wayback) + usize::from(self.archivetoday)
    }
}

/// Global configuration. Defaults mirror a first run: iframe delivery,
/// four slots, shuffled order, both targets, no auto-rerun.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackarcConfig {
    #[serde(default)]
    pub mode: Mode,
    #[serde(default)]
    pub reuse: Reuse,
    /// Worker slots per run (clamped to >= 1 by the scheduler).
    pub concurrency: usize,
    /// Randomize backlink order each run.
    pub shuffle: bool,
    /// Start a fresh run 500 ms after a completed one.
    pub rerun: bool,
    #[serde(default)]
    pub targets: Targets,
    /// Template list source; the published list when unset.
    #[serde(default)]
    pub template_url: Option<String>,
}

impl Default for BackarcConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Iframe,
            reuse: Reuse::Fresh,
            concurrency: 4,
            shuffle: true,
            rerun: false,
            targets: Targets::default(),
            template_url: None,
        }
    }
}

impl BackarcConfig {
    /// The configured template source, falling back to the published list.
    pub fn template_source(&self) -> &str {
        self.template_url.as_deref().unwrap_or(DEFAULT_TEMPLATE_URL)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("backarc")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<BackarcConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = BackarcConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from(&path)
}

/// Load configuration from an explicit path.
pub fn load_from(path: &Path) -> Result<BackarcConfig> {
    let data = fs::read_to_string(path)?;
    let cfg: BackarcConfig = toml::from_str(&data)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = BackarcConfig::default();
        assert_eq!(cfg.mode, Mode::Iframe);
        assert_eq!(cfg.reuse, Reuse::Fresh);
        assert_eq!(cfg.concurrency, 4);
        assert!(cfg.shuffle);
        assert!(!cfg.rerun);
        assert!(cfg.targets.wayback);
        assert!(cfg.targets.archivetoday);
        assert_eq!(cfg.template_source(), DEFAULT_TEMPLATE_URL);
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = BackarcConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: BackarcConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.mode, cfg.mode);
        assert_eq!(parsed.reuse, cfg.reuse);
        assert_eq!(parsed.concurrency, cfg.concurrency);
        assert_eq!(parsed.shuffle, cfg.shuffle);
        assert_eq!(parsed.targets.wayback, cfg.targets.wayback);
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            mode = "popup"
            reuse = "reuse"
            concurrency = 8
            shuffle = false
            rerun = true

            [targets]
            wayback = true
            archivetoday = false
        "#;
        let cfg: BackarcConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.mode, Mode::Popup);
        assert_eq!(cfg.reuse, Reuse::Reuse);
        assert_eq!(cfg.concurrency, 8);
        assert!(!cfg.shuffle);
        assert!(cfg.rerun);
        assert!(!cfg.targets.archivetoday);
        assert!(cfg.template_url.is_none());
    }

    #[test]
    fn config_toml_template_url_override() {
        let toml = r#"
            concurrency = 2
            shuffle = true
            rerun = false
            template_url = "https://example.com/templates.json"
        "#;
        let cfg: BackarcConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.template_source(), "https://example.com/templates.json");
        assert_eq!(cfg.mode, Mode::Iframe);
    }

    #[test]
    fn targets_enabled_count() {
        let both = Targets::default();
        assert_eq!(both.enabled_count(), 2);
        assert!(both.any());

        let one = Targets {
            wayback: true,
            archivetoday: false,
        };
        assert_eq!(one.enabled_count(), 1);

        let none = Targets {
            wayback: false,
            archivetoday: false,
        };
        assert_eq!(none.enabled_count(), 0);
        assert!(!none.any());
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "mode = \"tab\"\nconcurrency = 3\nshuffle = true\nrerun = false\n",
        )
        .unwrap();
        let cfg = load_from(&path).unwrap();
        assert_eq!(cfg.mode, Mode::Tab);
        assert_eq!(cfg.concurrency, 3);
    }
}
