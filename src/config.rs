//! Site configuration module.
//!
//! Loads, validates, and merges the site's `config.toml`. The file describes
//! the web framework's declarative manifest (active modules, stylesheets, image
//! provider, styling pipeline) plus the color palette of each time-of-day
//! theme. User values are layered over stock defaults.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! compatibility_date = "2024-11-01"   # Framework behavior snapshot (YYYY-MM-DD)
//! devtools = true
//! modules = ["@nuxt/content", "@nuxtjs/tailwindcss", "@vueuse/motion/nuxt", "@nuxt/image"]
//! css = ["~/assets/css/themes.css"]
//!
//! [image]
//! provider = "netlify"
//! domains = ["https://images.unsplash.com"]
//!
//! [postcss]
//! plugins = ["tailwindcss", "autoprefixer"]
//!
//! [styling]
//! content = ["./components/**/*.{vue,js}", "./pages/**/*.vue"]
//! plugins = ["@tailwindcss/typography"]
//!
//! [styling.animations]
//! fadeIn = "fadeIn 0.6s ease-out forwards"
//!
//! [colors.morning]
//! background = "#fdf6e3"
//! text = "#1f2933"
//! text_muted = "#52606d"
//! accent = "#d97706"
//!
//! [colors.evening]
//! # ...
//!
//! [colors.night]
//! # ...
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse. Override just the values you want:
//!
//! ```toml
//! [colors.night]
//! background = "#000000"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::images;
use crate::theme::Theme;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Framework compatibility snapshot, `YYYY-MM-DD`.
    pub compatibility_date: String,
    /// Whether the framework devtools are enabled.
    pub devtools: bool,
    /// Framework modules, in load order.
    pub modules: Vec<String>,
    /// Global stylesheets included on every page.
    pub css: Vec<String>,
    /// Image optimization settings.
    pub image: ImageConfig,
    /// PostCSS pipeline.
    pub postcss: PostcssConfig,
    /// Utility-first styling layer (content globs, plugins, animations).
    pub styling: StylingConfig,
    /// Per-theme color palettes.
    pub colors: ColorConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            compatibility_date: "2024-11-01".to_string(),
            devtools: true,
            modules: vec![
                "@nuxt/content".to_string(),
                "@nuxtjs/tailwindcss".to_string(),
                "@vueuse/motion/nuxt".to_string(),
                "@nuxt/image".to_string(),
            ],
            css: vec!["~/assets/css/themes.css".to_string()],
            image: ImageConfig::default(),
            postcss: PostcssConfig::default(),
            styling: StylingConfig::default(),
            colors: ColorConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are well-formed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if NaiveDate::parse_from_str(&self.compatibility_date, "%Y-%m-%d").is_err() {
            return Err(ConfigError::Validation(format!(
                "compatibility_date must be YYYY-MM-DD, got '{}'",
                self.compatibility_date
            )));
        }
        let mut seen = HashSet::new();
        for module in &self.modules {
            if module.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "modules entries must not be empty".into(),
                ));
            }
            if !seen.insert(module.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "module '{module}' is listed more than once"
                )));
            }
        }
        if self.css.iter().any(|entry| entry.trim().is_empty()) {
            return Err(ConfigError::Validation(
                "css entries must not be empty".into(),
            ));
        }
        if self.image.provider.trim().is_empty() {
            return Err(ConfigError::Validation(
                "image.provider must not be empty".into(),
            ));
        }
        for domain in &self.image.domains {
            if images::domain_host(domain).is_none() {
                return Err(ConfigError::Validation(format!(
                    "image.domains entry '{domain}' is not a valid http(s) host"
                )));
            }
        }
        for (name, value) in &self.styling.animations {
            if !is_css_identifier(name) {
                return Err(ConfigError::Validation(format!(
                    "styling.animations key '{name}' is not a valid CSS identifier"
                )));
            }
            if !is_plain_css_value(value) {
                return Err(ConfigError::Validation(format!(
                    "styling.animations.{name} must be a single CSS value, got '{value}'"
                )));
            }
        }
        for theme in Theme::ALL {
            let scheme = self.colors.scheme(theme);
            let fields = [
                ("background", &scheme.background),
                ("text", &scheme.text),
                ("text_muted", &scheme.text_muted),
                ("accent", &scheme.accent),
            ];
            for (field, value) in fields {
                if !is_plain_css_value(value) {
                    return Err(ConfigError::Validation(format!(
                        "colors.{theme}.{field} must be a single CSS value, got '{value}'"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// A value that stays inside one declaration when spliced into a rule:
/// non-empty, single line, and free of the characters that end a
/// declaration, a block, or the surrounding `<style>` element.
fn is_plain_css_value(value: &str) -> bool {
    !value.trim().is_empty()
        && !value
            .chars()
            .any(|c| c.is_control() || matches!(c, '{' | '}' | ';' | '<' | '>'))
}

fn is_css_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '-' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Image optimization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImageConfig {
    /// Image CDN provider name, e.g. `"netlify"`.
    pub provider: String,
    /// Remote hosts images may be loaded from. Scheme is optional.
    pub domains: Vec<String>,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            provider: "netlify".to_string(),
            domains: vec!["https://images.unsplash.com".to_string()],
        }
    }
}

/// PostCSS plugins, applied in order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PostcssConfig {
    pub plugins: Vec<String>,
}

impl Default for PostcssConfig {
    fn default() -> Self {
        Self {
            plugins: vec!["tailwindcss".to_string(), "autoprefixer".to_string()],
        }
    }
}

/// Utility-first styling layer settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StylingConfig {
    /// Source globs scanned for class names.
    pub content: Vec<String>,
    /// Styling plugins.
    pub plugins: Vec<String>,
    /// Named animations, value is the CSS `animation` shorthand.
    pub animations: BTreeMap<String, String>,
}

impl Default for StylingConfig {
    fn default() -> Self {
        Self {
            content: vec![
                "./components/**/*.{vue,js}".to_string(),
                "./layouts/**/*.vue".to_string(),
                "./pages/**/*.vue".to_string(),
                "./plugins/**/*.{js,ts}".to_string(),
                "./nuxt.config.{js,ts}".to_string(),
            ],
            plugins: vec!["@tailwindcss/typography".to_string()],
            animations: BTreeMap::from([(
                "fadeIn".to_string(),
                "fadeIn 0.6s ease-out forwards".to_string(),
            )]),
        }
    }
}

/// Color palettes, one per time-of-day theme.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub morning: ColorScheme,
    pub evening: ColorScheme,
    pub night: ColorScheme,
}

impl ColorConfig {
    pub fn scheme(&self, theme: Theme) -> &ColorScheme {
        match theme {
            Theme::Morning => &self.morning,
            Theme::Evening => &self.evening,
            Theme::Night => &self.night,
        }
    }
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            morning: ColorScheme::default_morning(),
            evening: ColorScheme::default_evening(),
            night: ColorScheme::default_night(),
        }
    }
}

/// Individual theme palette.
///
/// Every field is required once a palette table is deserialized on its own.
/// Sparse overrides such as a lone `[colors.night] background` are filled
/// from that theme's stock palette by [`resolve_config`], never from another
/// theme's.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColorScheme {
    /// Page background.
    pub background: String,
    /// Primary text color.
    pub text: String,
    /// Secondary text (captions, dates, nav).
    pub text_muted: String,
    /// Links and highlights.
    pub accent: String,
}

impl ColorScheme {
    pub fn default_morning() -> Self {
        Self {
            background: "#fdf6e3".to_string(),
            text: "#1f2933".to_string(),
            text_muted: "#52606d".to_string(),
            accent: "#d97706".to_string(),
        }
    }

    pub fn default_evening() -> Self {
        Self {
            background: "#fbe3d3".to_string(),
            text: "#2d1b2e".to_string(),
            text_muted: "#6b4f5c".to_string(),
            accent: "#e76f51".to_string(),
        }
    }

    pub fn default_night() -> Self {
        Self {
            background: "#0f172a".to_string(),
            text: "#e2e8f0".to_string(),
            text_muted: "#94a3b8".to_string(),
            accent: "#818cf8".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// `SiteConfig::default()` as a TOML table, the layer every site's
/// `config.toml` is laid over.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(SiteConfig::default())?)
}

/// Lay `overlay` over `base`.
///
/// Only tables combine: a table present on both sides is merged key by key,
/// recursively. Any other overlay value wins outright, which is why a
/// `modules` list in a site config replaces the stock list instead of
/// extending it.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut merged), toml::Value::Table(overlay)) => {
            for (key, value) in overlay {
                let value = match merged.remove(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => value,
                };
                merged.insert(key, value);
            }
            toml::Value::Table(merged)
        }
        (_, overlay) => overlay,
    }
}

/// The site's `config.toml` in `dir`, parsed but not yet typed.
///
/// A directory without one yields `Ok(None)`; a file that isn't TOML is a
/// [`ConfigError::Toml`].
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let path = dir.join("config.toml");
    if !path.exists() {
        return Ok(None);
    }
    let value = toml::from_str(&fs::read_to_string(&path)?)?;
    Ok(Some(value))
}

/// Type and validate `base` with `overlay` (if any) laid over it.
///
/// Sparse palettes are completed here: a lone `[colors.night] background`
/// keeps the rest of the stock night palette from `base`.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let layered = match overlay {
        Some(overlay) => merge_toml(base, overlay),
        None => base,
    };
    let config: SiteConfig = layered.try_into()?;
    config.validate()?;
    Ok(config)
}

/// The validated site config for `dir`: stock defaults, overridden by
/// `dir/config.toml` when present.
pub fn load_config(dir: &Path) -> Result<SiteConfig, ConfigError> {
    resolve_config(stock_defaults_value()?, load_raw_config(dir)?)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# dayglow site configuration
# ==========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# Framework behavior snapshot (YYYY-MM-DD).
compatibility_date = "2024-11-01"

# Enable framework devtools during development.
devtools = true

# Framework modules, in load order.
modules = [
    "@nuxt/content",
    "@nuxtjs/tailwindcss",
    "@vueuse/motion/nuxt",
    "@nuxt/image",
]

# Global stylesheets. `dayglow css` prints the generated themes.css.
css = ["~/assets/css/themes.css"]

# ---------------------------------------------------------------------------
# Image optimization
# ---------------------------------------------------------------------------
[image]
provider = "netlify"
# Remote hosts images may be loaded from (scheme optional).
domains = ["https://images.unsplash.com"]

# ---------------------------------------------------------------------------
# PostCSS pipeline
# ---------------------------------------------------------------------------
[postcss]
plugins = ["tailwindcss", "autoprefixer"]

# ---------------------------------------------------------------------------
# Styling layer
# ---------------------------------------------------------------------------
[styling]
# Files scanned for utility class names.
content = [
    "./components/**/*.{vue,js}",
    "./layouts/**/*.vue",
    "./pages/**/*.vue",
    "./plugins/**/*.{js,ts}",
    "./nuxt.config.{js,ts}",
]
plugins = ["@tailwindcss/typography"]

# Named animations, exposed as `.animate-<name>` utilities.
[styling.animations]
fadeIn = "fadeIn 0.6s ease-out forwards"

# ---------------------------------------------------------------------------
# Colors - Morning (06:00 - 15:59)
# ---------------------------------------------------------------------------
[colors.morning]
background = "#fdf6e3"
text = "#1f2933"
text_muted = "#52606d"    # Captions, dates, nav
accent = "#d97706"        # Links, highlights

# ---------------------------------------------------------------------------
# Colors - Evening (16:00 - 19:59)
# ---------------------------------------------------------------------------
[colors.evening]
background = "#fbe3d3"
text = "#2d1b2e"
text_muted = "#6b4f5c"
accent = "#e76f51"

# ---------------------------------------------------------------------------
# Colors - Night (20:00 - 05:59)
# ---------------------------------------------------------------------------
[colors.night]
background = "#0f172a"
text = "#e2e8f0"
text_muted = "#94a3b8"
accent = "#818cf8"
"##
}

// =============================================================================
// CSS generation
// =============================================================================

/// Generate one `body.theme-*` rule per theme, defining the color variables.
pub fn generate_theme_css(colors: &ColorConfig) -> String {
    let mut css = String::new();
    for theme in Theme::ALL {
        let scheme = colors.scheme(theme);
        css.push_str(&format!(
            r#"body.{marker} {{
    --color-bg: {bg};
    --color-text: {text};
    --color-text-muted: {muted};
    --color-accent: {accent};
}}

"#,
            marker = theme.marker(),
            bg = scheme.background,
            text = scheme.text,
            muted = scheme.text_muted,
            accent = scheme.accent,
        ));
    }
    css.push_str(
        r#"body {
    background-color: var(--color-bg);
    color: var(--color-text);
    transition: background-color 0.6s ease, color 0.6s ease;
}

body a {
    color: var(--color-accent);
}"#,
    );
    css
}

/// Generate `.animate-*` utilities for the configured animations.
///
/// A `fadeIn` animation also gets its keyframes, since it is the one the
/// stock config ships with.
pub fn generate_animation_css(styling: &StylingConfig) -> String {
    let mut rules: Vec<String> = styling
        .animations
        .iter()
        .map(|(name, value)| format!(".animate-{name} {{\n    animation: {value};\n}}"))
        .collect();
    if styling.animations.contains_key("fadeIn") {
        rules.push(
            r#"@keyframes fadeIn {
    from { opacity: 0; transform: translateY(0.5rem); }
    to { opacity: 1; transform: translateY(0); }
}"#
            .to_string(),
        );
    }
    rules.join("\n\n")
}

/// The complete `themes.css` for a site.
pub fn generate_stylesheet(config: &SiteConfig) -> String {
    let theme_css = generate_theme_css(&config.colors);
    let animation_css = generate_animation_css(&config.styling);
    if animation_css.is_empty() {
        format!("{theme_css}\n")
    } else {
        format!("{theme_css}\n\n{animation_css}\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_mirrors_site_manifest() {
        let config = SiteConfig::default();
        assert_eq!(config.compatibility_date, "2024-11-01");
        assert!(config.devtools);
        assert_eq!(config.modules.len(), 4);
        assert_eq!(config.modules[0], "@nuxt/content");
        assert_eq!(config.image.provider, "netlify");
        assert_eq!(config.image.domains, vec!["https://images.unsplash.com"]);
        assert_eq!(config.postcss.plugins, vec!["tailwindcss", "autoprefixer"]);
        assert_eq!(config.css, vec!["~/assets/css/themes.css"]);
    }

    #[test]
    fn default_config_has_theme_palettes() {
        let config = SiteConfig::default();
        assert_eq!(config.colors.morning.background, "#fdf6e3");
        assert_eq!(config.colors.evening.background, "#fbe3d3");
        assert_eq!(config.colors.night.background, "#0f172a");
    }

    #[test]
    fn scheme_selects_theme_palette() {
        let colors = ColorConfig::default();
        assert_eq!(colors.scheme(Theme::Night).accent, "#818cf8");
        assert_eq!(colors.scheme(Theme::Morning).text, "#1f2933");
    }

    #[test]
    fn partial_palette_keeps_its_own_theme_defaults() {
        let overlay: toml::Value = toml::from_str(
            r##"
[colors.night]
background = "#000000"

[colors.evening]
accent = "#ff0000"
"##,
        )
        .unwrap();
        let config = resolve_config(stock_defaults_value().unwrap(), Some(overlay)).unwrap();
        assert_eq!(config.colors.night.background, "#000000");
        // Gaps come from the night palette, not morning
        assert_eq!(config.colors.night.text, "#e2e8f0");
        assert_eq!(config.colors.night.accent, "#818cf8");
        assert_eq!(config.colors.evening.accent, "#ff0000");
        assert_eq!(config.colors.evening.background, "#fbe3d3");
        assert_eq!(config.colors.morning.background, "#fdf6e3");
        assert_eq!(config.image.provider, "netlify");
    }

    #[test]
    fn partial_palette_without_stock_layer_is_rejected() {
        // Deserializing a sparse palette directly would have to invent the
        // missing colors, so it is an error instead.
        let result: Result<SiteConfig, _> = toml::from_str(
            r##"
[colors.night]
background = "#000000"
"##,
        );
        let err = result.unwrap_err().to_string();
        assert!(err.contains("missing field"));
    }

    #[test]
    fn omitted_colors_section_uses_each_theme_palette() {
        let config: SiteConfig = toml::from_str("devtools = false\n").unwrap();
        assert_eq!(config.colors.morning.background, "#fdf6e3");
        assert_eq!(config.colors.evening.background, "#fbe3d3");
        assert_eq!(config.colors.night.background, "#0f172a");
    }

    #[test]
    fn parse_image_settings() {
        let toml = r#"
[image]
provider = "ipx"
domains = ["cdn.example.com", "https://images.unsplash.com"]
"#;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.image.provider, "ipx");
        assert_eq!(config.image.domains.len(), 2);
        assert!(config.validate().is_ok());
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.modules, SiteConfig::default().modules);
        assert_eq!(config.colors.evening.accent, "#e76f51");
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r##"
devtools = false
modules = ["@nuxt/content"]

[colors.evening]
accent = "#ff0000"
"##,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert!(!config.devtools);
        // Arrays are replaced wholesale
        assert_eq!(config.modules, vec!["@nuxt/content"]);
        assert_eq!(config.colors.evening.accent, "#ff0000");
        assert_eq!(config.colors.evening.background, "#fbe3d3");
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "this is not valid toml [[[").unwrap();

        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn load_config_validates_values() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r#"compatibility_date = "yesterday""#,
        )
        .unwrap();

        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    // =========================================================================
    // CSS generation tests
    // =========================================================================

    #[test]
    fn theme_css_has_rule_per_marker() {
        let css = generate_theme_css(&ColorConfig::default());
        for theme in Theme::ALL {
            assert_eq!(
                css.matches(&format!("body.{} {{", theme.marker())).count(),
                1
            );
        }
    }

    #[test]
    fn theme_css_uses_config_colors() {
        let mut colors = ColorConfig::default();
        colors.morning.background = "#f0f0f0".to_string();
        colors.night.accent = "#123456".to_string();

        let css = generate_theme_css(&colors);
        assert!(css.contains("--color-bg: #f0f0f0"));
        assert!(css.contains("--color-accent: #123456"));
    }

    #[test]
    fn theme_css_includes_all_variables() {
        let css = generate_theme_css(&ColorConfig::default());
        assert!(css.contains("--color-bg:"));
        assert!(css.contains("--color-text:"));
        assert!(css.contains("--color-text-muted:"));
        assert!(css.contains("--color-accent:"));
        assert!(css.contains("background-color: var(--color-bg)"));
    }

    #[test]
    fn animation_css_includes_fade_in() {
        let css = generate_animation_css(&StylingConfig::default());
        assert!(css.contains(".animate-fadeIn {"));
        assert!(css.contains("animation: fadeIn 0.6s ease-out forwards;"));
        assert!(css.contains("@keyframes fadeIn"));
    }

    #[test]
    fn animation_css_custom_animation_has_no_keyframes() {
        let styling = StylingConfig {
            animations: BTreeMap::from([("pulse".to_string(), "pulse 2s infinite".to_string())]),
            ..StylingConfig::default()
        };
        let css = generate_animation_css(&styling);
        assert!(css.contains(".animate-pulse {"));
        assert!(!css.contains("@keyframes"));
    }

    #[test]
    fn stylesheet_without_animations_is_theme_rules_only() {
        let mut config = SiteConfig::default();
        config.styling.animations.clear();
        let css = generate_stylesheet(&config);
        assert!(css.contains("body.theme-night"));
        assert!(!css.contains(".animate-"));
        assert!(css.ends_with("}\n"));
    }

    // =========================================================================
    // merge_toml tests
    // =========================================================================

    #[test]
    fn merge_toml_table_merge() {
        let base: toml::Value = toml::from_str(
            r#"
[image]
provider = "netlify"
domains = ["a.example.com"]
"#,
        )
        .unwrap();
        let overlay: toml::Value = toml::from_str(
            r#"
[image]
provider = "ipx"
"#,
        )
        .unwrap();
        let merged = merge_toml(base, overlay);
        let image = merged.get("image").unwrap();
        assert_eq!(image.get("provider").unwrap().as_str(), Some("ipx"));
        assert_eq!(image.get("domains").unwrap().as_array().unwrap().len(), 1);
    }

    #[test]
    fn merge_toml_arrays_replace() {
        let base: toml::Value = toml::from_str(r#"modules = ["a", "b"]"#).unwrap();
        let overlay: toml::Value = toml::from_str(r#"modules = ["c"]"#).unwrap();
        let merged = merge_toml(base, overlay);
        let modules = merged.get("modules").unwrap().as_array().unwrap();
        assert_eq!(modules.len(), 1);
        assert_eq!(modules[0].as_str(), Some("c"));
    }

    #[test]
    fn merge_toml_deep_nested() {
        let base: toml::Value = toml::from_str(
            r##"
[colors.night]
background = "#111"
text = "#eee"
"##,
        )
        .unwrap();
        let overlay: toml::Value = toml::from_str(
            r##"
[colors.night]
background = "#000"
"##,
        )
        .unwrap();
        let merged = merge_toml(base, overlay);
        let night = merged.get("colors").unwrap().get("night").unwrap();
        assert_eq!(night.get("background").unwrap().as_str(), Some("#000"));
        assert_eq!(night.get("text").unwrap().as_str(), Some("#eee"));
    }

    // =========================================================================
    // Unknown key rejection tests
    // =========================================================================

    #[test]
    fn unknown_key_rejected() {
        let result: Result<SiteConfig, _> = toml::from_str(
            r#"
[image]
provder = "netlify"
"#,
        );
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown field"));
    }

    #[test]
    fn unknown_section_rejected() {
        let result: Result<SiteConfig, _> = toml::from_str("[imagez]\nprovider = \"x\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn unknown_theme_palette_rejected() {
        let result: Result<SiteConfig, _> = toml::from_str(
            r##"
[colors.noon]
background = "#fff"
"##,
        );
        assert!(result.is_err());
    }

    // =========================================================================
    // Validation tests
    // =========================================================================

    #[test]
    fn validate_default_config_passes() {
        assert!(SiteConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_bad_compatibility_date() {
        let mut config = SiteConfig::default();
        config.compatibility_date = "2024-13-01".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("compatibility_date"));
    }

    #[test]
    fn validate_duplicate_module() {
        let mut config = SiteConfig::default();
        config.modules.push("@nuxt/image".to_string());
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("@nuxt/image"));
    }

    #[test]
    fn validate_empty_provider() {
        let mut config = SiteConfig::default();
        config.image.provider = " ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_bad_image_domain() {
        let mut config = SiteConfig::default();
        config.image.domains.push("ftp://files.example.com".to_string());
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_bad_animation_name() {
        let mut config = SiteConfig::default();
        config
            .styling
            .animations
            .insert("1fade".to_string(), "x 1s".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_bad_color() {
        for bad in [
            "red}</style><script>alert(1)</script><style>",
            "#fff; color: red",
            "#fff\n",
            "",
        ] {
            let mut config = SiteConfig::default();
            config.colors.night.background = bad.to_string();
            let err = config.validate().unwrap_err();
            assert!(
                err.to_string().contains("colors.night.background"),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn validate_accepts_css_color_functions() {
        let mut config = SiteConfig::default();
        config.colors.evening.accent = "rgb(231 111 81 / 0.8)".to_string();
        config.colors.morning.text = "var(--brand, #111)".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_bad_animation_value() {
        let mut config = SiteConfig::default();
        config.styling.animations.insert(
            "fadeIn".to_string(),
            "fadeIn 1s } body { display: none".to_string(),
        );
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("styling.animations.fadeIn"));
    }

    #[test]
    fn load_config_rejects_markup_in_colors() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r##"
[colors.night]
background = "red}</style><script>alert(1)</script><style>"
"##,
        )
        .unwrap();

        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn css_value_rules() {
        assert!(is_plain_css_value("#0f172a"));
        assert!(is_plain_css_value("fadeIn 0.6s ease-out forwards"));
        assert!(!is_plain_css_value("  "));
        assert!(!is_plain_css_value("a<b"));
        assert!(!is_plain_css_value("a\tb"));
    }

    #[test]
    fn css_identifier_rules() {
        assert!(is_css_identifier("fadeIn"));
        assert!(is_css_identifier("-slide_up2"));
        assert!(!is_css_identifier(""));
        assert!(!is_css_identifier("fade in"));
        assert!(!is_css_identifier("9lives"));
    }

    // =========================================================================
    // resolve_config / load_raw_config tests
    // =========================================================================

    #[test]
    fn load_raw_config_returns_none_when_no_file() {
        let tmp = TempDir::new().unwrap();
        assert!(load_raw_config(tmp.path()).unwrap().is_none());
    }

    #[test]
    fn resolve_config_with_overlay() {
        let base = stock_defaults_value().unwrap();
        let overlay: toml::Value = toml::from_str(r#"css = ["~/assets/css/site.css"]"#).unwrap();
        let config = resolve_config(base, Some(overlay)).unwrap();
        assert_eq!(config.css, vec!["~/assets/css/site.css"]);
        assert_eq!(config.image.provider, "netlify");
    }

    #[test]
    fn resolve_config_rejects_invalid_values() {
        let base = stock_defaults_value().unwrap();
        let overlay: toml::Value = toml::from_str(
            r#"
[image]
domains = ["not a host"]
"#,
        )
        .unwrap();
        let result = resolve_config(base, Some(overlay));
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    // =========================================================================
    // stock config tests
    // =========================================================================

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let config: SiteConfig = toml::from_str(stock_config_toml()).unwrap();
        let defaults = SiteConfig::default();
        assert_eq!(config.compatibility_date, defaults.compatibility_date);
        assert_eq!(config.modules, defaults.modules);
        assert_eq!(config.css, defaults.css);
        assert_eq!(config.image.domains, defaults.image.domains);
        assert_eq!(config.postcss.plugins, defaults.postcss.plugins);
        assert_eq!(config.styling.content, defaults.styling.content);
        assert_eq!(config.styling.animations, defaults.styling.animations);
        assert_eq!(config.colors.night.accent, defaults.colors.night.accent);
        assert_eq!(config.colors.evening.text_muted, defaults.colors.evening.text_muted);
    }

    #[test]
    fn stock_config_toml_contains_all_sections() {
        let content = stock_config_toml();
        for section in [
            "[image]",
            "[postcss]",
            "[styling]",
            "[styling.animations]",
            "[colors.morning]",
            "[colors.evening]",
            "[colors.night]",
        ] {
            assert!(content.contains(section), "missing {section}");
        }
    }

    #[test]
    fn stock_defaults_value_has_all_sections() {
        let val = stock_defaults_value().unwrap();
        assert!(val.is_table());
        for key in ["modules", "css", "image", "postcss", "styling", "colors"] {
            assert!(val.get(key).is_some(), "missing {key}");
        }
    }
}
