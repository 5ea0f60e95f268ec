//! Extraction state machine
//!
//! Consumes [`MarkupEvent`]s one at a time and accumulates the page metadata
//! (doctype version, title, heading counts) plus the transient
//! [`ParsingState`] (link set, input-type counts).
//!
//! # Transitions
//!
//! | Event | Effect |
//! |-------|--------|
//! | Doctype matching `HTML\s+4` | html version becomes 4 |
//! | Start/self-closing `title` | begin title capture |
//! | Start/self-closing `h<digit>` | count under the uppercased name |
//! | Start/self-closing `a` | first `href` value joins the link set |
//! | Start/self-closing `input` | first `type` value is counted |
//! | Text while capturing | overwrites the title |
//! | End tag | ends capture (any end tag, or only `</title>` in strict scope) |
//! | End | run completes |
//! | Error | run fails |

use crate::analysis::HtmlVersion;
use crate::config::TitleScope;
use crate::extract::event::{MarkupEvent, Tag};
use crate::extract::state::ParsingState;
use crate::ExtractError;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

static HTML4_DOCTYPE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)HTML\s+4").expect("hardcoded regex pattern is valid"));

static HEADING_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^h\d$").expect("hardcoded regex pattern is valid"));

const TITLE_TAG: &str = "title";

/// Page metadata filled in by the state machine
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageMetadata {
    pub html_version: HtmlVersion,
    pub title: String,
    pub headings_count: BTreeMap<String, u32>,
}

/// Output of a completed extraction run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub page: PageMetadata,
    pub state: ParsingState,
}

/// Whether the machine expects more events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    Done,
}

/// Token-driven extraction state machine
#[derive(Debug)]
pub struct Extractor {
    title_scope: TitleScope,
    page: PageMetadata,
    state: ParsingState,
    done: bool,
}

impl Extractor {
    pub fn new(title_scope: TitleScope) -> Self {
        Self {
            title_scope,
            page: PageMetadata::default(),
            state: ParsingState::new(),
            done: false,
        }
    }

    /// Applies one event
    ///
    /// Events after [`MarkupEvent::End`] are ignored. An
    /// [`MarkupEvent::Error`] fails the run.
    pub fn handle(&mut self, event: MarkupEvent) -> Result<Step, ExtractError> {
        if self.done {
            return Ok(Step::Done);
        }

        match event {
            MarkupEvent::Doctype(text) => self.on_doctype(&text),
            MarkupEvent::StartTag(tag) | MarkupEvent::SelfClosingTag(tag) => self.on_open_tag(&tag),
            MarkupEvent::EndTag(name) => self.on_end_tag(&name),
            MarkupEvent::Text(text) => self.on_text(text),
            MarkupEvent::End => {
                self.done = true;
                return Ok(Step::Done);
            }
            MarkupEvent::Error(reason) => {
                self.done = true;
                return Err(ExtractError::Interrupted(reason));
            }
        }

        Ok(Step::Continue)
    }

    /// Returns true once the end of input has been seen
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Consumes the machine and returns what it accumulated
    pub fn finish(self) -> Extraction {
        Extraction {
            page: self.page,
            state: self.state,
        }
    }

    fn on_doctype(&mut self, text: &str) {
        if HTML4_DOCTYPE_REGEX.is_match(text) {
            self.page.html_version = HtmlVersion::Html4;
        }
    }

    fn on_open_tag(&mut self, tag: &Tag) {
        if tag.is(TITLE_TAG) {
            self.state.begin_capture(TITLE_TAG);
        } else if HEADING_REGEX.is_match(&tag.name) {
            *self
                .page
                .headings_count
                .entry(tag.name.to_ascii_uppercase())
                .or_insert(0) += 1;
        } else if tag.is("a") {
            if let Some(attr) = tag
                .attrs
                .iter()
                .find(|attr| attr.key.eq_ignore_ascii_case("href"))
            {
                self.state.add_link(&attr.value);
            }
        } else if tag.is("input") {
            if let Some(attr) = tag.attrs.iter().find(|attr| attr.key == "type") {
                self.state.count_input_type(&attr.value);
            }
        }
    }

    fn on_end_tag(&mut self, name: &str) {
        match self.title_scope {
            TitleScope::AnyEndTag => self.state.end_capture(),
            TitleScope::MatchingEndTag => {
                if self.state.is_capturing(name) {
                    self.state.end_capture();
                }
            }
        }
    }

    fn on_text(&mut self, text: String) {
        if self.state.is_capturing(TITLE_TAG) {
            self.page.title = text;
        }
    }
}

/// Runs the state machine over a finite event sequence
///
/// Stops at the first [`MarkupEvent::End`]. A sequence that runs out
/// without one is treated as cleanly ended.
pub fn run<I>(events: I, title_scope: TitleScope) -> Result<Extraction, ExtractError>
where
    I: IntoIterator<Item = MarkupEvent>,
{
    let mut extractor = Extractor::new(title_scope);
    for event in events {
        if extractor.handle(event)? == Step::Done {
            break;
        }
    }
    Ok(extractor.finish())
}
