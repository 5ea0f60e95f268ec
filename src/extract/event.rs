//! Markup event definitions consumed by the extraction state machine
//!
//! Tag and attribute names arrive lowercased from the tokenizer, but the
//! state machine still compares them case-insensitively so hand-built event
//! streams behave the same.

/// One event of the markup stream, in document order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupEvent {
    /// Doctype declaration text, e.g. `html PUBLIC "-//W3C//DTD HTML 4.0//EN"`
    Doctype(String),

    /// Opening tag
    StartTag(Tag),

    /// Self-closing tag such as `<h1/>`
    SelfClosingTag(Tag),

    /// Closing tag name
    EndTag(String),

    /// A run of character data
    Text(String),

    /// Clean end of input
    End,

    /// The underlying stream failed before reaching the end
    Error(String),
}

/// Name and attributes of an opening or self-closing tag
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    pub attrs: Vec<Attribute>,
}

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: Vec::new(),
        }
    }

    /// Adds an attribute, keeping source order
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push(Attribute {
            key: key.into(),
            value: value.into(),
        });
        self
    }

    /// Returns true if the tag has the given name, ignoring ASCII case
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub key: String,
    pub value: String,
}
