//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::Config;
use crate::carousel::MediaItem;

/// TOML basic string with escaping
fn quoted(s: &str) -> String {
    toml::Value::String(s.to_string()).to_string()
}

/// `key = "value"` when set, a commented placeholder otherwise
fn optional_line(key: &str, value: Option<&str>, hint: &str) -> String {
    match value {
        Some(v) => format!("{} = {}\n", key, quoted(v)),
        None => format!("# {} = \"\"  # {}\n", key, hint),
    }
}

impl Config {
    /// Serialize gallery items as `[[gallery.items]]` tables
    pub(super) fn items_to_toml(&self) -> String {
        if self.gallery.items.is_empty() {
            return r#"
# [[gallery.items]]
# kind = "image"
# src = "/gallery/01.jpeg"
# alt = "Optional description"
#
# [[gallery.items]]
# kind = "video"
# src = "/gallery/video.mp4"
# poster = "/gallery/poster-video.png"
"#
            .to_string();
        }

        let mut output = String::new();
        for item in &self.gallery.items {
            output.push_str("\n[[gallery.items]]\n");
            output.push_str(&format!("kind = \"{}\"\n", item.kind()));
            output.push_str(&format!("src = {}\n", quoted(item.src())));
            match item {
                MediaItem::Image { alt: Some(alt), .. } => {
                    output.push_str(&format!("alt = {}\n", quoted(alt)));
                }
                MediaItem::Video {
                    poster: Some(poster),
                    ..
                } => {
                    output.push_str(&format!("poster = {}\n", quoted(poster)));
                }
                _ => {}
            }
        }
        output
    }

    /// Serialize config to TOML string
    ///
    /// The token is never written out; it belongs in the environment.
    pub fn to_toml(&self) -> String {
        let photos: Vec<String> = self.gallery.photos.iter().map(|p| quoted(p)).collect();
        let ds = &self.datastore;

        format!(
            r#"# invite configuration

# Site server bind address (INVITE_BIND overrides)
bind_addr = "{bind}"

# Media carousel
[gallery]
interval_ms = {interval}
fade_ms = {fade}
fade_slack_ms = {slack}
swipe_threshold_px = {threshold:.1}
# Pixels per terminal column when converting mouse positions
cell_width_px = {cell}
# Local paths resolve against this directory
asset_root = {root}
# Legacy image list, used only when no items are listed
photos = [{photos}]
{items}
# RSVP and guestbook storage
# backend: "airtable" or "memory" (in-process, lost on exit)
[datastore]
backend = "{backend}"
api_url = {api_url}
timeout_secs = {timeout}
# Credentials: AIRTABLE_TOKEN, AIRTABLE_BASE_ID, AIRTABLE_TABLE_ID and
# AIRTABLE_GUESTBOOK_TABLE_ID override these
# token = ""
{base_id}{rsvp_table}{guestbook_table}
# Logging configuration (RUST_LOG env var overrides)
[logging]
level = "{log_level}"
# JSON file logging (in addition to the gallery buffer or stdout)
file_enabled = {log_file_enabled}
file_dir = {log_file_dir}
file_rotation = "{log_file_rotation}"  # hourly, daily, never
file_prefix = {log_file_prefix}
"#,
            bind = self.bind_addr,
            interval = self.gallery.interval.as_millis(),
            fade = self.gallery.fade.as_millis(),
            slack = self.gallery.fade_slack.as_millis(),
            threshold = self.gallery.swipe_threshold_px,
            cell = self.gallery.cell_width_px,
            root = quoted(&self.gallery.asset_root.display().to_string()),
            photos = photos.join(", "),
            items = self.items_to_toml(),
            backend = ds.backend.as_str(),
            api_url = quoted(&ds.api_url),
            timeout = ds.timeout.as_secs(),
            base_id = optional_line("base_id", ds.base_id.as_deref(), "app..."),
            rsvp_table = optional_line("rsvp_table", ds.rsvp_table.as_deref(), "table name or tbl..."),
            guestbook_table = optional_line(
                "guestbook_table",
                ds.guestbook_table.as_deref(),
                "table name or tbl..."
            ),
            log_level = self.logging.level,
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = quoted(&self.logging.file_dir.display().to_string()),
            log_file_rotation = self.logging.file_rotation.as_str(),
            log_file_prefix = quoted(&self.logging.file_prefix),
        )
    }
}
