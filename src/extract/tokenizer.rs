//! Streaming adapter from html5ever's tokenizer to [`MarkupEvent`]s
//!
//! Input is fed in chunks as it arrives from the network. Each html5ever
//! token is translated and handed straight to the [`Extractor`], so no event
//! list is ever materialized.

use crate::config::TitleScope;
use crate::extract::event::{Attribute, MarkupEvent, Tag};
use crate::extract::machine::{Extraction, Extractor};
use crate::ExtractError;
use html5ever::tendril::StrTendril;
use html5ever::tokenizer::states::RawKind;
use html5ever::tokenizer::{
    BufferQueue, Doctype, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
    TokenizerResult,
};

/// Token sink feeding the extraction state machine
struct ExtractorSink {
    extractor: Extractor,
    /// Pending character data, emitted as a single text event
    text: String,
    failure: Option<ExtractError>,
}

impl ExtractorSink {
    fn emit(&mut self, event: MarkupEvent) {
        if self.failure.is_some() {
            return;
        }
        tracing::trace!(?event, "markup event");
        if let Err(err) = self.extractor.handle(event) {
            self.failure = Some(err);
        }
    }

    fn flush_text(&mut self) {
        if !self.text.is_empty() {
            let text = std::mem::take(&mut self.text);
            self.emit(MarkupEvent::Text(text));
        }
    }
}

impl TokenSink for ExtractorSink {
    type Handle = ();

    fn process_token(&mut self, token: Token, line_number: u64) -> TokenSinkResult<()> {
        match token {
            Token::CharacterTokens(chars) => {
                self.text.push_str(&chars);
            }
            Token::NullCharacterToken => {}
            Token::ParseError(message) => {
                tracing::trace!(line = line_number, %message, "recoverable markup error");
            }
            Token::CommentToken(_) => self.flush_text(),
            Token::DoctypeToken(doctype) => {
                self.flush_text();
                self.emit(MarkupEvent::Doctype(doctype_text(&doctype)));
            }
            Token::TagToken(tag) => {
                self.flush_text();
                let name = tag.name.to_string();
                match tag.kind {
                    TagKind::EndTag => self.emit(MarkupEvent::EndTag(name)),
                    TagKind::StartTag => {
                        let raw_kind = if tag.self_closing {
                            None
                        } else {
                            raw_text_kind(&name)
                        };
                        let converted = Tag {
                            name,
                            attrs: tag
                                .attrs
                                .iter()
                                .map(|attr| Attribute {
                                    key: attr.name.local.to_string(),
                                    value: attr.value.to_string(),
                                })
                                .collect(),
                        };
                        if tag.self_closing {
                            self.emit(MarkupEvent::SelfClosingTag(converted));
                        } else {
                            self.emit(MarkupEvent::StartTag(converted));
                        }
                        if let Some(kind) = raw_kind {
                            return TokenSinkResult::RawData(kind);
                        }
                    }
                }
            }
            Token::EOFToken => self.flush_text(),
        }
        TokenSinkResult::Continue
    }

    fn end(&mut self) {
        self.flush_text();
    }
}

/// Tokenizer state to switch into after an element's start tag
///
/// Mirrors the elements whose content HTML treats as text, so markup-like
/// content in a script or a title is not reported as tags.
fn raw_text_kind(name: &str) -> Option<RawKind> {
    match name {
        "title" | "textarea" => Some(RawKind::Rcdata),
        "style" | "xmp" | "iframe" | "noembed" | "noframes" => Some(RawKind::Rawtext),
        "script" => Some(RawKind::ScriptData),
        _ => None,
    }
}

/// Rebuilds the doctype text the way it appears after `<!DOCTYPE `
fn doctype_text(doctype: &Doctype) -> String {
    let mut text = doctype
        .name
        .as_deref()
        .map(str::to_string)
        .unwrap_or_default();

    if let Some(public_id) = doctype.public_id.as_deref() {
        text.push_str(&format!(" PUBLIC \"{}\"", public_id));
        if let Some(system_id) = doctype.system_id.as_deref() {
            text.push_str(&format!(" \"{}\"", system_id));
        }
    } else if let Some(system_id) = doctype.system_id.as_deref() {
        text.push_str(&format!(" SYSTEM \"{}\"", system_id));
    }

    text
}

/// Incremental markup tokenizer driving an [`Extractor`]
pub struct MarkupTokenizer {
    tokenizer: Tokenizer<ExtractorSink>,
    input: BufferQueue,
}

impl MarkupTokenizer {
    pub fn new(title_scope: TitleScope) -> Self {
        let sink = ExtractorSink {
            extractor: Extractor::new(title_scope),
            text: String::new(),
            failure: None,
        };
        Self {
            tokenizer: Tokenizer::new(sink, TokenizerOpts::default()),
            input: BufferQueue::new(),
        }
    }

    /// Feeds the next chunk of decoded markup
    pub fn feed(&mut self, chunk: &str) {
        if chunk.is_empty() {
            return;
        }
        self.input.push_back(StrTendril::from_slice(chunk));
        // The sink never asks to pause for a script, so `Script` cannot occur
        while let TokenizerResult::Script(()) = self.tokenizer.feed(&mut self.input) {}
    }

    /// Signals a clean end of input and returns the extraction
    pub fn finish(mut self) -> Result<Extraction, ExtractError> {
        self.tokenizer.end();
        let mut sink = self.tokenizer.sink;
        sink.emit(MarkupEvent::End);
        match sink.failure {
            Some(err) => Err(err),
            None => Ok(sink.extractor.finish()),
        }
    }

    /// Signals that the input stream broke off
    pub fn fail(mut self, reason: impl Into<String>) -> ExtractError {
        self.tokenizer.end();
        let mut sink = self.tokenizer.sink;
        sink.emit(MarkupEvent::Error(reason.into()));
        sink.failure
            .unwrap_or_else(|| ExtractError::Interrupted("markup stream failed".to_string()))
    }
}

/// Tokenizes a complete document in one go
pub fn extract_document(html: &str, title_scope: TitleScope) -> Result<Extraction, ExtractError> {
    let mut tokenizer = MarkupTokenizer::new(title_scope);
    tokenizer.feed(html);
    tokenizer.finish()
}
