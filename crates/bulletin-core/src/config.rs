//! Configuration types for bulletin.
//!
//! [`Config::load`] reads `~/.config/bulletin/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::defaults`] returns
//! the same defaults without touching the filesystem (useful in tests).

use serde::Deserialize;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[ui]
show_descriptions     = true
filter_pane_width_pct = 30

[search]
default_limit  = 200
smart_matching = true
require_all    = false
scope          = "both"

[keybindings]
toggle_focus = "Tab"
search_focus = "/"
limit_up     = "]"
limit_down   = "["
export       = "e"
help         = "?"
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration, loaded from `~/.config/bulletin/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub search: SearchDefaults,
    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}

/// `[ui]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_show_descriptions")]
    pub show_descriptions: bool,
    #[serde(default = "default_filter_pane_width_pct")]
    pub filter_pane_width_pct: u16,
}

fn default_show_descriptions() -> bool { true }
fn default_filter_pane_width_pct() -> u16 { 30 }

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_descriptions: default_show_descriptions(),
            filter_pane_width_pct: default_filter_pane_width_pct(),
        }
    }
}

/// `[search]` section of `config.toml` — the initial search state for a
/// new session.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchDefaults {
    #[serde(default = "default_limit")]
    pub default_limit: usize,
    #[serde(default = "default_smart_matching")]
    pub smart_matching: bool,
    #[serde(default)]
    pub require_all: bool,
    #[serde(default = "default_scope")]
    pub scope: String,
}

fn default_limit() -> usize { crate::types::DEFAULT_LIMIT }
fn default_smart_matching() -> bool { true }
fn default_scope() -> String { "both".to_string() }

impl Default for SearchDefaults {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            smart_matching: default_smart_matching(),
            require_all: false,
            scope: default_scope(),
        }
    }
}

/// `[keybindings]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct KeybindingsConfig {
    #[serde(default = "default_toggle_focus")]
    pub toggle_focus: String,
    #[serde(default = "default_search_focus")]
    pub search_focus: String,
    #[serde(default = "default_limit_up")]
    pub limit_up: String,
    #[serde(default = "default_limit_down")]
    pub limit_down: String,
    #[serde(default = "default_export")]
    pub export: String,
    #[serde(default = "default_help")]
    pub help: String,
}

fn default_toggle_focus() -> String { "Tab".to_string() }
fn default_search_focus() -> String { "/".to_string() }
fn default_limit_up() -> String { "]".to_string() }
fn default_limit_down() -> String { "[".to_string() }
fn default_export() -> String { "e".to_string() }
fn default_help() -> String { "?".to_string() }

impl Default for KeybindingsConfig {
    fn default() -> Self {
        Self {
            toggle_focus: default_toggle_focus(),
            search_focus: default_search_focus(),
            limit_up: default_limit_up(),
            limit_down: default_limit_down(),
            export: default_export(),
            help: default_help(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/bulletin/config.toml`, layered on top of the
    /// built-in defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
        }

        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path.as_path()).required(false))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("bulletin")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
