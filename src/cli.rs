// CLI module - command-line argument parsing and handlers
//
// Subcommands:
// - gallery: run the terminal gallery without the site server
// - config --show: Display effective configuration
// - config --path: Show config file path
// - config --reset: Regenerate config file with defaults

use crate::config::{Config, VERSION};
use clap::{Parser, Subcommand};
use std::io::Write;

/// invite - event site server with a terminal media gallery
#[derive(Parser)]
#[command(name = "invite")]
#[command(version = VERSION)]
#[command(about = "Event site server (RSVP + guestbook) with a terminal media gallery", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run only the terminal gallery (no HTTP server)
    Gallery,

    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

/// What main should do after argument parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Server plus gallery (or server only when the TUI is disabled)
    Site,
    /// Gallery without the server
    GalleryOnly,
    /// A command already ran; exit
    Done,
}

/// Parse arguments and handle one-shot commands
pub fn handle_cli() -> RunMode {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Gallery) => RunMode::GalleryOnly,
        Some(Commands::Config { show, reset, path }) => {
            if path {
                handle_config_path();
            } else if show {
                handle_config_show();
            } else if reset {
                handle_config_reset();
            } else {
                println!("Usage: invite config [--show|--reset|--path]");
                println!();
                println!("Options:");
                println!("  --show    Display effective configuration");
                println!("  --reset   Reset config file to defaults");
                println!("  --path    Show config file path");
            }
            RunMode::Done
        }
        None => RunMode::Site,
    }
}

fn handle_config_path() {
    match Config::config_path() {
        Some(path) => println!("{}", path.display()),
        None => {
            eprintln!("Error: Could not determine config path");
            std::process::exit(1);
        }
    }
}

fn handle_config_show() {
    let config = Config::from_env();

    println!("# Effective configuration (env > file > defaults)");
    println!(
        "# Datastore token: {}",
        if config.datastore.token.is_some() {
            "set"
        } else {
            "not set"
        }
    );
    println!("# Gallery: {}", if config.enable_tui { "enabled" } else { "disabled (INVITE_NO_TUI)" });
    println!();
    print!("{}", config.to_toml());

    println!();
    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("# Source: {}", path.display());
        } else {
            println!("# Source: defaults (no config file)");
        }
    }
}

fn handle_config_reset() {
    let Some(path) = Config::config_path() else {
        eprintln!("Error: Could not determine config path");
        std::process::exit(1);
    };

    if path.exists() {
        eprint!(
            "Config file exists at {}. Overwrite? [y/N] ",
            path.display()
        );
        let _ = std::io::stderr().flush();

        let mut input = String::new();
        if std::io::stdin().read_line(&mut input).is_err()
            || !input.trim().eq_ignore_ascii_case("y")
        {
            println!("Aborted.");
            return;
        }
    }

    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            eprintln!("Error creating directory: {}", e);
            std::process::exit(1);
        }
    }

    if let Err(e) = std::fs::write(&path, Config::default().to_toml()) {
        eprintln!("Error writing config: {}", e);
        std::process::exit(1);
    }

    println!("Config reset to defaults: {}", path.display());
}
