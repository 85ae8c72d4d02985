use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::warn;

// ---------------------------------------------------------------------------
// Behavior
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq)]
pub struct Behavior {
    /// Smallest width/height a split pane may be dragged to.
    pub min_view_size: f64,
    pub minimized_width: f64,
    pub minimized_height: f64,
    /// Size of a window created by detaching a view.
    pub floating_width: f64,
    pub floating_height: f64,
    /// Offset added per consecutive detach so new windows don't stack exactly.
    pub cascade_step: f64,
    pub cascade_limit: u32,
    /// Recursion cap for tree lookups.
    pub max_depth: usize,
}

impl Default for Behavior {
    fn default() -> Self {
        Self {
            min_view_size: 100.0,
            minimized_width: 240.0,
            minimized_height: 40.0,
            floating_width: 640.0,
            floating_height: 480.0,
            cascade_step: 24.0,
            cascade_limit: 10,
            max_depth: crate::lookup::MAX_DEPTH,
        }
    }
}

// ---------------------------------------------------------------------------
// Viewport
// ---------------------------------------------------------------------------

/// Client area the floating windows live in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1920.0,
            height: 1080.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Config {
    pub behavior: Behavior,
    pub viewport: Viewport,
}

#[derive(Deserialize, Default)]
struct RawConfig {
    behavior: Option<RawBehavior>,
    viewport: Option<RawViewport>,
}

#[derive(Deserialize, Default)]
struct RawBehavior {
    min_view_size: Option<f64>,
    minimized_width: Option<f64>,
    minimized_height: Option<f64>,
    floating_width: Option<f64>,
    floating_height: Option<f64>,
    cascade_step: Option<f64>,
    cascade_limit: Option<u32>,
    max_depth: Option<usize>,
}

#[derive(Deserialize, Default)]
struct RawViewport {
    width: Option<f64>,
    height: Option<f64>,
}

pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("dockstate")
        .join("config.toml")
}

impl Config {
    /// Load from the user config dir, falling back to defaults.
    pub fn load() -> Self {
        let path = config_file_path();
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!("invalid config at {}: {:#}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let raw: RawConfig = toml::from_str(content)?;
        Ok(Self::from_raw(raw))
    }

    fn from_raw(raw: RawConfig) -> Self {
        let mut config = Self::default();

        if let Some(b) = raw.behavior {
            let d = &mut config.behavior;
            if let Some(v) = b.min_view_size {
                d.min_view_size = v;
            }
            if let Some(v) = b.minimized_width {
                d.minimized_width = v;
            }
            if let Some(v) = b.minimized_height {
                d.minimized_height = v;
            }
            if let Some(v) = b.floating_width {
                d.floating_width = v;
            }
            if let Some(v) = b.floating_height {
                d.floating_height = v;
            }
            if let Some(v) = b.cascade_step {
                d.cascade_step = v;
            }
            if let Some(v) = b.cascade_limit {
                d.cascade_limit = v.max(1);
            }
            if let Some(v) = b.max_depth {
                d.max_depth = v;
            }
        }

        if let Some(v) = raw.viewport {
            if let Some(w) = v.width {
                config.viewport.width = w;
            }
            if let Some(h) = v.height {
                config.viewport.height = h;
            }
        }

        config
    }
}
