//! HTML extraction module
//!
//! This module turns the markup of the fetched page into page metadata and
//! the raw link inventory:
//! - Decoding the streamed response body into text
//! - Tokenizing it into ordered markup events
//! - Running the extraction state machine over those events

mod decode;
mod event;
mod machine;
mod state;
mod tokenizer;

pub use decode::ChunkDecoder;
pub use event::{Attribute, MarkupEvent, Tag};
pub use machine::{run, Extraction, Extractor, PageMetadata, Step};
pub use state::ParsingState;
pub use tokenizer::{extract_document, MarkupTokenizer};
