//! Static preview of a themed page.
//!
//! Renders a self-contained HTML document as the site would look at a given
//! hour: the generated `themes.css` inlined, the theme marker on `<body>`, and
//! an optional markdown content page as the main body.
//!
//! Uses [maud](https://maud.lambda.xyz/) for the document and pulldown-cmark
//! for markdown, so all interpolated text is escaped.

use crate::config::{self, SiteConfig};
use crate::theme::Theme;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PreviewError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn base_document(title: &str, css: &str, body_class: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(css)) }
            }
            body class=(body_class) {
                (content)
            }
        }
    }
}

/// Title from the first `# heading` line, if any.
fn markdown_title(markdown: &str) -> Option<&str> {
    markdown
        .lines()
        .find_map(|line| line.trim().strip_prefix("# "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

fn theme_summary(config: &SiteConfig, theme: Theme) -> Markup {
    let scheme = config.colors.scheme(theme);
    html! {
        h1 { "Good " (theme) }
        p { "Marker " code { (theme.marker()) } " is applied to the page body." }
        dl.palette {
            dt { "background" } dd { (scheme.background) }
            dt { "text" } dd { (scheme.text) }
            dt { "text_muted" } dd { (scheme.text_muted) }
            dt { "accent" } dd { (scheme.accent) }
        }
    }
}

/// Render the preview document for `theme`.
pub fn render_preview(config: &SiteConfig, theme: Theme, markdown: Option<&str>) -> String {
    let css = config::generate_stylesheet(config);
    let (title, content) = match markdown {
        Some(body) => {
            let mut body_html = String::new();
            md_html::push_html(&mut body_html, Parser::new(body));
            let title = markdown_title(body).unwrap_or(theme.label()).to_string();
            (title, html! { article { (PreEscaped(body_html)) } })
        }
        None => (format!("{theme} preview"), theme_summary(config, theme)),
    };
    let animate = config
        .styling
        .animations
        .keys()
        .next()
        .map(|name| format!("animate-{name}"));

    let content = html! {
        main class=[animate] {
            (content)
        }
    };
    base_document(&title, &css, theme.marker(), content).into_string()
}

/// Render the preview, reading the markdown page from disk when given.
pub fn render_preview_file(
    config: &SiteConfig,
    theme: Theme,
    page: Option<&Path>,
) -> Result<String, PreviewError> {
    let markdown = page.map(fs::read_to_string).transpose()?;
    Ok(render_preview(config, theme, markdown.as_deref()))
}
