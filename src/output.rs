//! CLI output formatting.
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.
//!
//! ```text
//! $ dayglow current --hour 17
//! 17:00 evening
//!     Marker: theme-evening
//!
//! $ dayglow check
//! Modules
//! 001 @nuxt/content
//! 002 @nuxtjs/tailwindcss
//! ...
//! Images
//!     Provider: netlify
//!     Domain: https://images.unsplash.com
//! ```

use crate::config::SiteConfig;
use crate::theme::Theme;
use serde::Serialize;

/// Machine-readable form of `dayglow current`.
#[derive(Debug, Clone, Serialize)]
pub struct ThemeReport {
    pub hour: u32,
    pub theme: Theme,
    pub marker: &'static str,
}

impl ThemeReport {
    pub fn for_hour(hour: u32) -> Self {
        let theme = Theme::for_hour(hour);
        Self {
            hour,
            theme,
            marker: theme.marker(),
        }
    }
}

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Numbered list section: header then `NNN item` lines.
fn numbered_section(header: &str, items: &[String]) -> Vec<String> {
    let mut lines = vec![header.to_string()];
    if items.is_empty() {
        lines.push(format!("{}(none)", indent(1)));
    }
    for (i, item) in items.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), item));
    }
    lines
}

pub fn format_current(report: &ThemeReport) -> Vec<String> {
    vec![
        format!("{:02}:00 {}", report.hour % 24, report.theme),
        format!("{}Marker: {}", indent(1), report.marker),
    ]
}

pub fn print_current(report: &ThemeReport) {
    for line in format_current(report) {
        println!("{}", line);
    }
}

/// One line per observed theme change in `dayglow watch`.
pub fn format_theme_change(theme: Theme, body_class: &str) -> String {
    format!("{} → body class=\"{}\"", theme, body_class)
}

pub fn format_image_check(src: &str, allowed: bool) -> String {
    if allowed {
        format!("{} allowed", src)
    } else {
        format!("{} not allowed (host is not in image.domains)", src)
    }
}

/// Summary of a validated config for `dayglow check`.
pub fn format_config_summary(config: &SiteConfig) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(format!("Compatibility date: {}", config.compatibility_date));
    lines.push(format!(
        "Devtools: {}",
        if config.devtools { "enabled" } else { "disabled" }
    ));
    lines.push(String::new());

    lines.extend(numbered_section("Modules", &config.modules));
    lines.push(String::new());

    lines.extend(numbered_section("Stylesheets", &config.css));
    lines.push(String::new());

    lines.push("Images".to_string());
    lines.push(format!("{}Provider: {}", indent(1), config.image.provider));
    for domain in &config.image.domains {
        lines.push(format!("{}Domain: {}", indent(1), domain));
    }
    lines.push(String::new());

    lines.extend(numbered_section("PostCSS plugins", &config.postcss.plugins));
    lines.push(String::new());

    lines.push("Styling".to_string());
    for glob in &config.styling.content {
        lines.push(format!("{}Content: {}", indent(1), glob));
    }
    for plugin in &config.styling.plugins {
        lines.push(format!("{}Plugin: {}", indent(1), plugin));
    }
    for (name, value) in &config.styling.animations {
        lines.push(format!("{}Animation: {} ({})", indent(1), name, value));
    }
    lines.push(String::new());

    lines.push("Themes".to_string());
    for theme in Theme::ALL {
        let scheme = config.colors.scheme(theme);
        lines.push(format!(
            "{}{}: bg {}, text {}, accent {}",
            indent(1),
            theme.marker(),
            scheme.background,
            scheme.text,
            scheme.accent
        ));
    }

    lines
}

pub fn print_config_summary(config: &SiteConfig) {
    for line in format_config_summary(config) {
        println!("{}", line);
    }
}
