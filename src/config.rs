//! Configuration system using TOML files.
//!
//! Config is stored in the OS-standard config directory:
//! - Windows: %APPDATA%\rom-minder\config.toml
//! - macOS: ~/Library/Application Support/rom-minder/config.toml
//! - Linux: ~/.config/rom-minder/config.toml
//!
//! The config file is human-readable and editable. It carries the defaults a
//! run starts from: the ROM extension whitelist, the quarantine directory
//! name, the default keep languages, and the log filename. Everything can
//! still be overridden per-invocation on the command line.

use serde::{Deserialize, Serialize};

use crate::model::LanguageCode;

/// ROM file extensions recognized out of the box, lowercase, no dot.
///
/// Broad coverage for MiSTer-era collections: cartridge dumps, disc images,
/// compressed arcade sets, and 8/16-bit computer tape/disk images.
pub const DEFAULT_EXTENSIONS: &[&str] = &[
    // Atari / early consoles
    "a26", "a52", "a78",
    // Nintendo family (home + handheld)
    "nes", "fds", "sfc", "smc", "gb", "gbc", "gba", "nds", "dsi", "3ds", "cia", "n64", "z64",
    "v64",
    // Sega family
    "sms", "gg", "sg", "sgx", "md", "smd", "gen", "32x", "meg", "bin", "rom",
    // PC Engine / TurboGrafx / SuperGrafx
    "pce",
    // SNK / Neo Geo
    "neo", "ngp", "ngc", "ngpc",
    // Optical / disc-based systems
    "cue", "iso", "chd", "gdi", "cdi", "mdf", "mds", "nrg", "cso", "pbp",
    // PSP / Vita
    "vpk", "psv", "psvita",
    // Switch-style formats
    "nsp", "xci",
    // Arcade / MAME style / compressed sets
    "zip", "7z", "7zip", "rar",
    // 8/16-bit computer tape/disk images
    "adf", "d64", "tap", "tzx",
];

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Collection-level settings
    pub library: LibraryConfig,

    /// Scanner settings
    pub scanner: ScannerConfig,
}

/// Collection-level settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LibraryConfig {
    /// Name of the quarantine directory under the collection root
    pub quarantine_dir: String,

    /// Keep languages used when `--keep` is absent
    pub default_keep: Vec<LanguageCode>,

    /// Run log filename, written into the collection root
    pub log_file: String,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            quarantine_dir: "Moved ROMS".to_string(),
            default_keep: vec![LanguageCode::En],
            log_file: "rom_sort_log.txt".to_string(),
        }
    }
}

/// Scanner settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScannerConfig {
    /// ROM file extensions to consider, lowercase, no dot
    pub extensions: Vec<String>,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<std::path::PathBuf> {
    dirs::config_dir().map(|d| d.join("rom-minder"))
}

/// Get the full path to the config file
pub fn config_path() -> Option<std::path::PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load configuration from disk
///
/// Returns default config if file doesn't exist or can't be parsed.
/// Logs warnings but doesn't fail - we always return a usable config.
pub fn load() -> Config {
    let Some(path) = config_path() else {
        tracing::warn!("Could not determine config directory, using defaults");
        return Config::default();
    };

    if !path.exists() {
        tracing::debug!("No config file found at {:?}, using defaults", path);
        return Config::default();
    }

    match std::fs::read_to_string(&path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(config) => {
                tracing::info!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                tracing::error!("Failed to parse config file {:?}: {}", path, e);
                tracing::warn!("Using default configuration");
                Config::default()
            }
        },
        Err(e) => {
            tracing::error!("Failed to read config file {:?}: {}", path, e);
            Config::default()
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
