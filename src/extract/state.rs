use std::collections::{BTreeSet, HashMap};

/// Transient state of a single extraction run
///
/// Owned by exactly one run and dropped once the analysis that created it
/// has consumed the link set and input counts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsingState {
    /// Tag whose text is currently being captured, if any
    pub(crate) capture: Option<String>,

    /// Distinct raw href values, in lexicographic order
    pub links: BTreeSet<String>,

    /// `<input type=...>` value to occurrence count
    pub input_type_counts: HashMap<String, u32>,
}

impl ParsingState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true while text is being captured for `tag`
    pub fn is_capturing(&self, tag: &str) -> bool {
        self.capture
            .as_deref()
            .is_some_and(|current| current.eq_ignore_ascii_case(tag))
    }

    pub(crate) fn begin_capture(&mut self, tag: &str) {
        self.capture = Some(tag.to_ascii_lowercase());
    }

    pub(crate) fn end_capture(&mut self) {
        self.capture = None;
    }

    /// Records an href; duplicates collapse into one entry
    pub(crate) fn add_link(&mut self, href: &str) {
        if !self.links.contains(href) {
            self.links.insert(href.to_string());
        }
    }

    pub(crate) fn count_input_type(&mut self, input_type: &str) {
        *self
            .input_type_counts
            .entry(input_type.to_string())
            .or_insert(0) += 1;
    }

    /// Returns how many inputs of the given type were seen
    pub fn input_count(&self, input_type: &str) -> u32 {
        self.input_type_counts
            .get(input_type)
            .copied()
            .unwrap_or(0)
    }
}
