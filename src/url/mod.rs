//! URL handling module for Linklens
//!
//! This module provides the syntactic href classification helpers and the
//! resolution of hrefs against the URL of the page they were found on.
//!
//! All classification here is purely textual and is evaluated on the raw
//! href as it appeared in the markup, never on the resolved URL.

mod resolve;

pub use resolve::{concat_url, resolve};

/// Returns true if the href is a full URL (contains `://`)
pub fn is_absolute(href: &str) -> bool {
    href.contains("://")
}

/// Returns true if the href is a same-page fragment (starts with `#`)
pub fn is_anchor(href: &str) -> bool {
    href.starts_with('#')
}

/// Returns true if the href is rooted at the host (starts with `/`)
pub fn is_site_relative(href: &str) -> bool {
    href.starts_with('/')
}
