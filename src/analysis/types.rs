use serde::Serialize;
use std::collections::BTreeMap;

/// HTML version announced by the document's doctype
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum HtmlVersion {
    #[serde(rename = "4")]
    Html4,
    #[default]
    #[serde(rename = "5")]
    Html5,
}

impl HtmlVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Html4 => "4",
            Self::Html5 => "5",
        }
    }
}

/// Coarse purpose of a page, derived from its form controls
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum PageType {
    LoginForm,
    #[default]
    Unknown,
}

impl PageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LoginForm => "LoginForm",
            Self::Unknown => "Unknown",
        }
    }
}

/// Link inventory of an analyzed page
///
/// `invalid_link_count` always equals `invalid_links.len()`, and
/// `invalid_links` is sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkStats {
    /// Distinct hrefs without a scheme, anchors included
    pub internal_link_count: usize,

    /// Distinct hrefs containing `://`
    pub external_link_count: usize,

    pub invalid_link_count: usize,

    /// Resolved URLs of the links that failed their probe
    pub invalid_links: Vec<String>,
}

/// Result of analyzing one page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub source_url: String,
    pub html_version: HtmlVersion,
    pub title: String,
    /// Uppercased heading tag name (`H1`..`H6`) to occurrence count
    pub headings_count: BTreeMap<String, u32>,
    pub link_stats: LinkStats,
    pub page_type: PageType,
}
