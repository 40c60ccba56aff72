//! External configuration loader.
//!
//! Reads `config.toml` from the executable's directory (or CWD), or from an
//! explicit path given on the command line. Falls back to sensible defaults
//! if the file is missing or incomplete.

use log::warn;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::domain::tile::Cell;
use crate::sim::spawn::PLACEMENT_ATTEMPTS;

// ── Public Config Struct ──

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub game: GameSettings,
    pub maps_dir: PathBuf,
}

/// Rules the turn engine needs at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameSettings {
    pub placement_attempts: u32,
    pub seed: Option<u64>,
    pub explorer_symbol: char,
    pub hunter_symbol: char,
}

impl Default for GameSettings {
    fn default() -> Self {
        GameSettings {
            placement_attempts: PLACEMENT_ATTEMPTS,
            seed: None,
            explorer_symbol: default_explorer_symbol(),
            hunter_symbol: default_hunter_symbol(),
        }
    }
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    game: TomlGame,
    #[serde(default)]
    general: TomlGeneral,
}

#[derive(Deserialize, Debug)]
struct TomlGame {
    #[serde(default = "default_placement_attempts")]
    placement_attempts: u32,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default = "default_explorer_symbol")]
    explorer_symbol: char,
    #[serde(default = "default_hunter_symbol")]
    hunter_symbol: char,
}

#[derive(Deserialize, Debug)]
struct TomlGeneral {
    #[serde(default = "default_maps_dir")]
    maps_dir: String,
}

// ── Defaults ──

fn default_placement_attempts() -> u32 { PLACEMENT_ATTEMPTS }
fn default_explorer_symbol() -> char { 'P' }
fn default_hunter_symbol() -> char { 'B' }
fn default_maps_dir() -> String { "maps".into() }

impl Default for TomlGame {
    fn default() -> Self {
        TomlGame {
            placement_attempts: default_placement_attempts(),
            seed: None,
            explorer_symbol: default_explorer_symbol(),
            hunter_symbol: default_hunter_symbol(),
        }
    }
}

impl Default for TomlGeneral {
    fn default() -> Self {
        TomlGeneral {
            maps_dir: default_maps_dir(),
        }
    }
}

// ── Loading ──

impl GameConfig {
    /// Load config. An explicit path is used as-is; otherwise search
    /// (1) exe directory, (2) current working directory.
    /// Missing file or missing keys gracefully fall back to defaults.
    pub fn load(explicit: Option<&Path>) -> Self {
        let mut search_dirs = candidate_dirs();
        let toml_cfg = match explicit {
            Some(path) => {
                // An explicit file's own directory wins for `maps_dir`.
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    search_dirs.insert(0, parent.to_path_buf());
                }
                load_file(path).unwrap_or_default()
            }
            None => load_toml(&search_dirs),
        };
        GameConfig::from_toml(toml_cfg, &search_dirs)
    }

    /// Parse config text directly. Unparseable text yields defaults.
    #[cfg(test)]
    pub fn from_toml_str(text: &str) -> Self {
        let toml_cfg = parse_toml(text, Path::new("<inline>")).unwrap_or_default();
        GameConfig::from_toml(toml_cfg, &[])
    }

    fn from_toml(toml_cfg: TomlConfig, search_dirs: &[PathBuf]) -> Self {
        // Resolve maps directory
        let maps_dir_str = &toml_cfg.general.maps_dir;
        let maps_dir = if PathBuf::from(maps_dir_str).is_absolute() {
            PathBuf::from(maps_dir_str)
        } else {
            search_dirs.iter()
                .map(|d| d.join(maps_dir_str))
                .find(|p| p.is_dir())
                .unwrap_or_else(|| PathBuf::from(maps_dir_str))
        };

        let mut game = GameSettings {
            placement_attempts: toml_cfg.game.placement_attempts,
            seed: toml_cfg.game.seed,
            explorer_symbol: toml_cfg.game.explorer_symbol,
            hunter_symbol: toml_cfg.game.hunter_symbol,
        };
        validate(&mut game);

        GameConfig { game, maps_dir }
    }

    /// Resolve a map argument: as given if it exists, else inside `maps_dir`.
    pub fn resolve_map(&self, arg: &str) -> PathBuf {
        let direct = PathBuf::from(arg);
        if direct.exists() || direct.is_absolute() {
            return direct;
        }
        let in_dir = self.maps_dir.join(arg);
        if in_dir.exists() { in_dir } else { direct }
    }
}

/// Symbols must be distinct and must not shadow map characters.
fn validate(game: &mut GameSettings) {
    let bad = |c: char| Cell::is_map_char(c) || c.is_whitespace() || c.is_control();
    if game.explorer_symbol == game.hunter_symbol
        || bad(game.explorer_symbol)
        || bad(game.hunter_symbol)
    {
        warn!(
            "config: unusable actor symbols '{}'/'{}', using defaults",
            game.explorer_symbol, game.hunter_symbol
        );
        game.explorer_symbol = default_explorer_symbol();
        game.hunter_symbol = default_hunter_symbol();
    }
    if game.placement_attempts == 0 {
        warn!("config: placement_attempts must be positive, using {PLACEMENT_ATTEMPTS}");
        game.placement_attempts = PLACEMENT_ATTEMPTS;
    }
}

/// Candidate directories to search: exe dir + CWD (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
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
            if let Some(cfg) = load_file(&path) {
                return cfg;
            }
        }
    }
    TomlConfig::default()
}

fn load_file(path: &Path) -> Option<TomlConfig> {
    match std::fs::read_to_string(path) {
        Ok(text) => parse_toml(&text, path),
        Err(e) => {
            warn!("could not read {}: {e}", path.display());
            None
        }
    }
}

fn parse_toml(text: &str, path: &Path) -> Option<TomlConfig> {
    match toml::from_str::<TomlConfig>(text) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            warn!("{} parse error: {e}; using default settings", path.display());
            None
        }
    }
}
