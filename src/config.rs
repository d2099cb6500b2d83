/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory (or CWD), or from an
/// explicit path given on the command line.
/// Falls back to sensible defaults if the file is missing or incomplete.

use log::warn;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::sim::world::{DEFAULT_GOAL, DEFAULT_SIZE, START};

/// Largest grid the terminal replay can lay out.
pub const MAX_SIZE: usize = 64;

// ── Public Config Struct ──

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub grid: GridConfig,
    pub script: ScriptConfig,
    pub replay: ReplayConfig,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridConfig {
    pub size: usize,
    pub goal: (usize, usize),
}

/// Sandbox limits applied to every script run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScriptConfig {
    pub max_operations: u64,
    pub max_call_levels: usize,
    pub max_expr_depth: usize,
    pub max_string_size: usize,
    pub max_array_size: usize,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReplayConfig {
    pub step_delay_ms: u64,
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    grid: TomlGrid,
    #[serde(default)]
    script: TomlScript,
    #[serde(default)]
    replay: TomlReplay,
}

#[derive(Deserialize, Debug)]
struct TomlGrid {
    #[serde(default = "default_size")]
    size: usize,
    #[serde(default = "default_goal")]
    goal: (usize, usize),
}

#[derive(Deserialize, Debug)]
struct TomlScript {
    #[serde(default = "default_max_operations")]
    max_operations: u64,
    #[serde(default = "default_max_call_levels")]
    max_call_levels: usize,
    #[serde(default = "default_max_expr_depth")]
    max_expr_depth: usize,
    #[serde(default = "default_max_string_size")]
    max_string_size: usize,
    #[serde(default = "default_max_array_size")]
    max_array_size: usize,
}

#[derive(Deserialize, Debug)]
struct TomlReplay {
    #[serde(default = "default_step_delay")]
    step_delay_ms: u64,
}

// ── Defaults ──

fn default_size() -> usize { DEFAULT_SIZE }
fn default_goal() -> (usize, usize) { DEFAULT_GOAL }
fn default_max_operations() -> u64 { 500_000 }
fn default_max_call_levels() -> usize { 64 }
fn default_max_expr_depth() -> usize { 64 }
fn default_max_string_size() -> usize { 4096 }
fn default_max_array_size() -> usize { 4096 }
fn default_step_delay() -> u64 { 250 }

impl Default for TomlGrid {
    fn default() -> Self {
        TomlGrid {
            size: default_size(),
            goal: default_goal(),
        }
    }
}

impl Default for TomlScript {
    fn default() -> Self {
        TomlScript {
            max_operations: default_max_operations(),
            max_call_levels: default_max_call_levels(),
            max_expr_depth: default_max_expr_depth(),
            max_string_size: default_max_string_size(),
            max_array_size: default_max_array_size(),
        }
    }
}

impl Default for TomlReplay {
    fn default() -> Self {
        TomlReplay {
            step_delay_ms: default_step_delay(),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig::from_toml(TomlConfig::default())
    }
}

impl GameConfig {
    fn from_toml(cfg: TomlConfig) -> Self {
        GameConfig {
            grid: validate_grid(cfg.grid),
            script: ScriptConfig {
                // 0 means unlimited to Rhai.
                max_operations: cfg.script.max_operations.max(1_000),
                max_call_levels: cfg.script.max_call_levels.max(1),
                max_expr_depth: cfg.script.max_expr_depth.max(8),
                max_string_size: cfg.script.max_string_size.max(1),
                max_array_size: cfg.script.max_array_size.max(1),
            },
            replay: ReplayConfig {
                step_delay_ms: cfg.replay.step_delay_ms,
            },
        }
    }
}

/// Reject grids a world can't be built on, falling back to the default grid.
fn validate_grid(grid: TomlGrid) -> GridConfig {
    let (gx, gy) = grid.goal;
    let problem = if grid.size == 0 {
        Some("size must be at least 1".to_string())
    } else if grid.size > MAX_SIZE {
        Some(format!("size {} exceeds the maximum of {MAX_SIZE}", grid.size))
    } else if gx >= grid.size || gy >= grid.size {
        Some(format!("goal ({gx}, {gy}) lies outside a {0}x{0} grid", grid.size))
    } else if grid.goal == START {
        Some("goal must differ from the start cell (0, 0)".to_string())
    } else {
        None
    };

    match problem {
        Some(reason) => {
            warn!("config.toml [grid]: {reason}; using default grid");
            GridConfig { size: DEFAULT_SIZE, goal: DEFAULT_GOAL }
        }
        None => GridConfig { size: grid.size, goal: grid.goal },
    }
}

// ── Loading ──

impl GameConfig {
    /// Load config from `config.toml`.
    /// Search order: (1) exe directory, (2) current working directory,
    /// (3) `~/.local/share/gridpilot`.
    /// Missing file or missing keys gracefully fall back to defaults.
    pub fn load() -> Self {
        GameConfig::from_toml(load_toml(&candidate_dirs()))
    }

    /// Load from an explicit file. Read or parse failures fall back to defaults.
    pub fn load_from(path: &Path) -> Self {
        GameConfig::from_toml(read_toml(path).unwrap_or_default())
    }

    /// Parse config text. Used by the loaders and handy for embedding.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<TomlConfig>(text).map(GameConfig::from_toml)
    }
}

/// Candidate directories to search: exe dir + CWD + user data dir (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    // 1. Directory of the running executable
    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    // 2. Current working directory
    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    // 3. XDG data home (~/.local/share/gridpilot)
    if let Ok(home) = std::env::var("HOME") {
        let xdg = PathBuf::from(&home).join(".local/share/gridpilot");
        if xdg.is_dir() && !dirs.iter().any(|d| d == &xdg) {
            dirs.push(xdg);
        }
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

/// Search for config.toml in candidate directories.
fn load_toml(search_dirs: &[PathBuf]) -> TomlConfig {
    for dir in search_dirs {
        let path = dir.join("config.toml");
        if path.exists() {
            if let Some(cfg) = read_toml(&path) {
                return cfg;
            }
        }
    }
    TomlConfig::default()
}

/// Read and parse one file. A parse error ends the search with defaults.
fn read_toml(path: &Path) -> Option<TomlConfig> {
    match std::fs::read_to_string(path) {
        Ok(text) => match toml::from_str::<TomlConfig>(&text) {
            Ok(cfg) => Some(cfg),
            Err(e) => {
                warn!("{} parse error: {e}; using default settings", path.display());
                Some(TomlConfig::default())
            }
        },
        Err(e) => {
            warn!("could not read {}: {e}", path.display());
            None
        }
    }
}
