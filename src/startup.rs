// Startup module - banner and component status
//
// Printed before the gallery takes over the screen (or in headless mode),
// and mirrored to the log so the gallery's status line has context.

use crate::config::{Backend, Config, VERSION};

/// ANSI color codes for terminal output
mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const MAGENTA: &str = "\x1b[35m";
}

/// One line of the status list
pub struct ComponentStatus {
    pub name: &'static str,
    pub enabled: bool,
    /// Needs attention (e.g. missing credentials)
    pub warning: bool,
    pub description: String,
}

/// Status of each component for the given run
pub fn component_status(config: &Config, server: bool) -> Vec<ComponentStatus> {
    let ds = &config.datastore;
    let items = config.gallery.playlist().len();

    let datastore = match ds.backend {
        Backend::Memory => ComponentStatus {
            name: "datastore",
            enabled: server,
            warning: false,
            description: "in-memory tables (not persisted)".to_string(),
        },
        Backend::Airtable => ComponentStatus {
            name: "datastore",
            enabled: server,
            warning: server && !ds.has_credentials(),
            description: if ds.has_credentials() {
                "Airtable".to_string()
            } else {
                "Airtable (credentials missing)".to_string()
            },
        },
    };

    vec![
        ComponentStatus {
            name: "site",
            enabled: server,
            warning: false,
            description: "RSVP + guestbook endpoints".to_string(),
        },
        datastore,
        ComponentStatus {
            name: "gallery",
            enabled: config.enable_tui || !server,
            warning: items == 0,
            description: format!("{} media item(s)", items),
        },
        ComponentStatus {
            name: "file-log",
            enabled: config.logging.file_enabled,
            warning: false,
            description: config.logging.file_dir.display().to_string(),
        },
    ]
}

/// Print the startup banner and component status
pub fn print_startup(config: &Config, server: bool) {
    use colors::*;

    println!();
    println!("  {BOLD}{MAGENTA}invite{RESET} {DIM}v{VERSION}{RESET}");
    println!("  {DIM}Event site server with a terminal gallery{RESET}");
    println!();

    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("  {DIM}Config:{RESET} {GREEN}✓{RESET} {}", path.display());
        } else {
            println!("  {DIM}Config:{RESET} {DIM}(using defaults){RESET}");
        }
    }
    println!();

    for component in component_status(config, server) {
        let icon = match (component.enabled, component.warning) {
            (true, false) => format!("{GREEN}✓{RESET}"),
            (true, true) => format!("{YELLOW}!{RESET}"),
            (false, _) => format!("{DIM}○{RESET}"),
        };
        let style = if component.enabled { "" } else { DIM };
        println!(
            "    {icon} {style}{:<10}{RESET} {DIM}{}{RESET}",
            component.name, component.description
        );
    }
    println!();

    if server {
        println!(
            "  {MAGENTA}▸{RESET} Site listening on {BOLD}http://{}{RESET}",
            config.bind_addr
        );
        println!();
    }
}

/// Mirror the startup status into the log
pub fn log_startup(config: &Config, server: bool) {
    tracing::info!("invite v{}", VERSION);
    for component in component_status(config, server) {
        let icon = if component.enabled { "✓" } else { "○" };
        if component.warning {
            tracing::warn!("{} {} - {}", icon, component.name, component.description);
        } else {
            tracing::info!("{} {} - {}", icon, component.name, component.description);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_credentials_are_flagged_only_when_serving() {
        let config = Config::default();

        let serving = component_status(&config, true);
        let datastore = serving.iter().find(|c| c.name == "datastore").unwrap();
        assert!(datastore.warning);

        let gallery_only = component_status(&config, false);
        let datastore = gallery_only.iter().find(|c| c.name == "datastore").unwrap();
        assert!(!datastore.enabled);
        assert!(!datastore.warning);
    }

    #[test]
    fn memory_backend_needs_no_credentials() {
        let mut config = Config::default();
        config.datastore.backend = Backend::Memory;
        let status = component_status(&config, true);
        assert!(status.iter().all(|c| !c.warning));
    }
}
