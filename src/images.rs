//! Remote image allow-list.
//!
//! The image module only optimizes remote images from hosts listed in
//! `image.domains`. Entries may carry a scheme (`https://images.unsplash.com`)
//! or be a bare host (`images.unsplash.com`); matching is on the host alone.

use crate::config::ImageConfig;
use url::Url;

/// Host of a configured domain entry, or `None` when it is not a usable
/// http(s) host.
pub fn domain_host(domain: &str) -> Option<String> {
    let domain = domain.trim();
    let candidate = if domain.contains("://") {
        domain.to_string()
    } else {
        format!("https://{domain}")
    };
    let url = Url::parse(&candidate).ok()?;
    if !matches!(url.scheme(), "http" | "https") {
        return None;
    }
    url.host_str().map(str::to_ascii_lowercase)
}

impl ImageConfig {
    /// Whether `src` may be served through the image pipeline.
    ///
    /// Relative paths are local assets and always allowed. Absolute URLs
    /// must be http(s) with a host present in `domains`.
    pub fn is_allowed(&self, src: &str) -> bool {
        let url = match Url::parse(src) {
            Ok(url) => url,
            Err(url::ParseError::RelativeUrlWithoutBase) => return !src.starts_with("//"),
            Err(_) => return false,
        };
        if !matches!(url.scheme(), "http" | "https") {
            return false;
        }
        let Some(host) = url.host_str() else {
            return false;
        };
        let host = host.to_ascii_lowercase();
        self.domains
            .iter()
            .filter_map(|d| domain_host(d))
            .any(|allowed| allowed == host)
    }
}
