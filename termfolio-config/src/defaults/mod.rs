//! Default value functions for configuration.
//!
//! Each sub-module groups related `default_*` free functions used as
//! `#[serde(default = "crate::defaults::...")]` attributes on `Config` fields.

mod content;
mod typing;

// ── Greeting & command responses ───────────────────────────────────────────
pub use content::{about_lines, boot_lines, contact_lines, help_lines, prompt, script_name};

// ── Typing animation ───────────────────────────────────────────────────────
pub use typing::{link_delay, text_delay};
