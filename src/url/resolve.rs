use crate::url::{is_absolute, is_anchor, is_site_relative};
use crate::{ResolveError, ResolveResult};
use regex::Regex;
use std::sync::LazyLock;

/// Matches the `scheme://host` prefix of an http(s) URL, with an optional slash
static BASE_URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(https?://[^/]+)/?").expect("hardcoded regex pattern is valid")
});

/// Resolves an href found on a page into the absolute URL to probe
///
/// # Resolution Order
///
/// 1. `source_url` must look like `http(s)://host[/...]`, otherwise
///    [`ResolveError::InvalidBaseUrl`]
/// 2. Empty href → `source_url` unchanged
/// 3. Absolute href (contains `://`) → returned unchanged if it is http(s),
///    otherwise [`ResolveError::UnsupportedHref`]
/// 4. Anchor (`#...`) → appended to `source_url` verbatim
/// 5. Site-relative (`/...`) → joined onto the scheme and host of `source_url`
/// 6. Path-relative → replaces the last path segment of `source_url`, or is
///    joined onto it when the source URL has no path
///
/// # Examples
///
/// ```
/// use linklens::url::resolve;
///
/// assert_eq!(resolve("y", "https://a.com/p/q").unwrap(), "https://a.com/p/y");
/// assert_eq!(resolve("/y", "https://a.com/p/q").unwrap(), "https://a.com/y");
/// assert!(resolve("", "ftp://a.com").is_err());
/// ```
pub fn resolve(href: &str, source_url: &str) -> ResolveResult<String> {
    if source_url.is_empty() {
        return Err(ResolveError::InvalidBaseUrl(source_url.to_string()));
    }

    let base = BASE_URL_REGEX
        .captures(source_url)
        .and_then(|caps| caps.get(1))
        .ok_or_else(|| ResolveError::InvalidBaseUrl(source_url.to_string()))?;

    if href.is_empty() {
        return Ok(source_url.to_string());
    }

    if is_absolute(href) {
        if !BASE_URL_REGEX.is_match(href) {
            return Err(ResolveError::UnsupportedHref(href.to_string()));
        }
        return Ok(href.to_string());
    }

    if is_anchor(href) {
        return Ok(format!("{}{}", source_url, href));
    }

    if is_site_relative(href) {
        return Ok(concat_url(base.as_str(), href));
    }

    // Path-relative: swap out the last segment when there is a path at all
    if source_url[base.end()..].contains('/') {
        if let Some(pos) = source_url.rfind('/') {
            return Ok(format!("{}{}", &source_url[..=pos], href));
        }
    }

    Ok(concat_url(source_url, href))
}

/// Joins `base` and `path` with exactly one slash between them
///
/// An empty `path` returns `base` unchanged.
pub fn concat_url(base: &str, path: &str) -> String {
    if path.is_empty() {
        return base.to_string();
    }

    match (base.ends_with('/'), path.starts_with('/')) {
        (true, true) => format!("{}{}", base, &path[1..]),
        (false, false) => format!("{}/{}", base, path),
        _ => format!("{}{}", base, path),
    }
}
