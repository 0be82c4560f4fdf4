//! Configuration for the invite site and gallery
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/invite/config.toml)
//! 3. Built-in defaults (lowest priority)

use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod datastore;
mod gallery;
mod observability;
mod serialization;


// ─────────────────────────────────────────────────────────────────────────────
// Re-exports
// ─────────────────────────────────────────────────────────────────────────────

pub use datastore::{Backend, DatastoreConfig, FileDatastore};
pub use gallery::{FileGallery, GalleryConfig};
pub use observability::{FileLogging, LogRotation, LoggingConfig};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_BIND: &str = "127.0.0.1:3000";

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the site server binds to
    pub bind_addr: SocketAddr,

    /// Whether to run the terminal gallery (disabled for headless mode)
    pub enable_tui: bool,

    /// Carousel timing, input tuning and media
    pub gallery: GalleryConfig,

    /// RSVP / guestbook storage backend
    pub datastore: DatastoreConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            enable_tui: true,
            gallery: GalleryConfig::default(),
            datastore: DatastoreConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub bind_addr: Option<String>,

    /// Optional [gallery] section
    pub gallery: Option<FileGallery>,

    /// Optional [datastore] section
    pub datastore: Option<FileDatastore>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the config file path: ~/.config/invite/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("invite").join("config.toml"))
    }

    /// Create config file with defaults if it doesn't exist
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        if path.exists() {
            return;
        }

        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // Config is optional
            }
        }

        let _ = std::fs::write(&path, Self::default().to_toml());
    }

    /// Load file config if it exists
    ///
    /// Exits the process if the file exists but cannot be read or parsed:
    /// silently falling back to defaults would hide the mistake.
    fn load_file_config() -> FileConfig {
        let Some(path) = Self::config_path() else {
            return FileConfig::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("\n╔══════════════════════════════════════════════════════════════╗");
                    eprintln!("║  CONFIG ERROR - Failed to parse configuration file          ║");
                    eprintln!("╚══════════════════════════════════════════════════════════════╝\n");
                    eprintln!("  File: {}\n", path.display());
                    eprintln!("  Error: {}\n", e);
                    eprintln!("  Tip: Check for:\n");
                    eprintln!("    - Missing quotes around string values");
                    eprintln!("    - Gallery items without a kind (\"image\" or \"video\")");
                    eprintln!("    - Malformed array syntax");
                    eprintln!("    - Typos in section names\n");
                    eprintln!("  To reset, run `invite config --reset`.\n");
                    std::process::exit(1);
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => FileConfig::default(),
            Err(e) => {
                eprintln!("\n╔══════════════════════════════════════════════════════════════╗");
                eprintln!("║  CONFIG ERROR - Cannot read configuration file              ║");
                eprintln!("╚══════════════════════════════════════════════════════════════╝\n");
                eprintln!("  File: {}\n", path.display());
                eprintln!("  Error: {}\n", e);
                std::process::exit(1);
            }
        }
    }

    /// Load configuration: file -> env vars -> defaults
    pub fn from_env() -> Self {
        let file = Self::load_file_config();
        match Self::resolve(file, |key| std::env::var(key).ok()) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("\n  CONFIG ERROR - {}\n", e);
                std::process::exit(1);
            }
        }
    }

    /// Merge a parsed file with an environment lookup
    pub(crate) fn resolve(
        file: FileConfig,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, String> {
        // Bind address: env > file > default
        let bind = env("INVITE_BIND")
            .or(file.bind_addr)
            .unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind_addr = bind
            .parse()
            .map_err(|e| format!("Invalid bind address '{}': {}", bind, e))?;

        // TUI toggle: env only (runtime flag)
        let enable_tui = env("INVITE_NO_TUI")
            .map(|v| v != "1" && v.to_lowercase() != "true")
            .unwrap_or(true);

        Ok(Self {
            bind_addr,
            enable_tui,
            gallery: GalleryConfig::from_file(file.gallery),
            datastore: DatastoreConfig::from_file(file.datastore, &env),
            logging: LoggingConfig::from_file(file.logging),
        })
    }
}
