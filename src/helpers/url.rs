//! URL helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::config::SiteConfig;

/// Characters escaped inside a single path segment
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'%');

/// Whether a link target leaves the site
pub fn is_external(target: &str) -> bool {
    target.starts_with("http://") || target.starts_with("https://") || target.starts_with("//")
}

/// Prefix a site path with the configured base URL
///
/// # Examples
/// ```ignore
/// url_for(&config, "/blog/hello") // -> "/notes/blog/hello" with base_url "/notes/"
/// ```
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    if is_external(path) {
        return path.to_string();
    }

    let root = config.base_url.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// Generate a full URL including the domain
///
/// # Examples
/// ```ignore
/// full_url_for(&config, "/blog/") // -> "https://h4c5.github.io/blog/"
/// ```
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    if is_external(path) {
        return path.to_string();
    }
    absolute_url(config, &url_for(config, path))
}

/// Join the site origin to a path that already carries the base URL
pub fn absolute_url(config: &SiteConfig, resolved: &str) -> String {
    if is_external(resolved) {
        return resolved.to_string();
    }
    format!(
        "{}/{}",
        config.url.trim_end_matches('/'),
        resolved.trim_start_matches('/')
    )
}

/// Percent-encode each segment of a path, keeping the separators
pub fn encode_path(path: &str) -> String {
    path.split('/')
        .map(|segment| utf8_percent_encode(segment, SEGMENT).to_string())
        .collect::<Vec<_>>()
        .join("/")
}
