//! Configuration file support for tandem
//!
//! Config file location: `~/.config/tandem/config.toml` (XDG_CONFIG_HOME)
//!
//! Example config:
//! ```toml
//! [ui]
//! view_mode = "split"
//! line_numbers = true
//! scroll_padding = 3
//! caret_marker = "▶"
//! extent_marker = "▌"
//!
//! [theme]
//! added = "#A3BE8C"
//! deleted = "#BF616A"
//! padding = "darkgray"
//! header = "cyan"
//! ```

use ratatui::style::Color;
use serde::Deserialize;
use std::path::PathBuf;
use std::str::FromStr;
use tandem_core::ViewMode;

/// UI configuration
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Default layout: "combined" or "split"
    pub view_mode: Option<String>,
    /// Show old/new line numbers in the gutter
    pub line_numbers: bool,
    /// Rows kept between the caret and the viewport edge
    pub scroll_padding: usize,
    /// Marker for the caret row
    pub caret_marker: String,
    /// Marker for rows of the current block
    pub extent_marker: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            view_mode: None,
            line_numbers: true,
            scroll_padding: 3,
            caret_marker: "▶".to_string(),
            extent_marker: "▌".to_string(),
        }
    }
}

/// Colors, as names ("green") or hex ("#A3BE8C")
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub added: String,
    pub deleted: String,
    pub padding: String,
    pub header: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            added: "green".to_string(),
            deleted: "red".to_string(),
            padding: "darkgray".to_string(),
            header: "cyan".to_string(),
        }
    }
}

/// Theme colors ready for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedTheme {
    pub added: Color,
    pub deleted: Color,
    pub padding: Color,
    pub header: Color,
}

impl Default for ResolvedTheme {
    fn default() -> Self {
        ThemeConfig::default().resolve()
    }
}

impl ThemeConfig {
    /// Unknown color names fall back to the defaults
    pub fn resolve(&self) -> ResolvedTheme {
        let parse = |value: &str, fallback: Color| {
            Color::from_str(value).unwrap_or_else(|_| {
                tracing::warn!(value, "unknown theme color");
                fallback
            })
        };
        ResolvedTheme {
            added: parse(&self.added, Color::Green),
            deleted: parse(&self.deleted, Color::Red),
            padding: parse(&self.padding, Color::DarkGray),
            header: parse(&self.header, Color::Cyan),
        }
    }
}

/// Root configuration
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub ui: UiConfig,
    pub theme: ThemeConfig,
}

impl Config {
    /// Get all possible config file paths in priority order
    fn config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
            paths.push(PathBuf::from(xdg).join("tandem").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".config").join("tandem").join("config.toml"));
        }

        // ~/Library/Application Support on macOS
        if let Some(config_dir) = dirs::config_dir() {
            let platform_path = config_dir.join("tandem").join("config.toml");
            if !paths.contains(&platform_path) {
                paths.push(platform_path);
            }
        }

        paths
    }

    /// Get the first existing config file path
    pub fn config_path() -> Option<PathBuf> {
        Self::config_paths().into_iter().find(|p| p.exists())
    }

    /// Load config from XDG config path
    /// Returns default config if file doesn't exist or can't be parsed
    pub fn load() -> Self {
        Self::config_path()
            .and_then(|path| std::fs::read_to_string(&path).ok())
            .and_then(|content| {
                Self::parse(&content)
                    .map_err(|e| {
                        eprintln!("Warning: Failed to parse config: {}", e);
                        e
                    })
                    .ok()
            })
            .unwrap_or_default()
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Parse view mode string to ViewMode enum
    pub fn parse_view_mode(&self) -> Option<ViewMode> {
        self.ui.view_mode.as_deref().and_then(parse_view_mode)
    }
}

pub fn parse_view_mode(value: &str) -> Option<ViewMode> {
    match value {
        "combined" | "unified" => Some(ViewMode::Combined),
        "split" | "sbs" | "side-by-side" => Some(ViewMode::SideBySide),
        _ => None,
    }
}
