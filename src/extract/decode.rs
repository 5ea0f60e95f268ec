use encoding_rs::{Decoder, Encoding, UTF_8};

/// Incremental byte-to-text decoder for a streamed response body
///
/// Picks the encoding from the Content-Type charset, falling back to UTF-8.
/// A BOM at the start of the body overrides both. Multi-byte sequences split
/// across chunks are carried over to the next call.
pub struct ChunkDecoder {
    decoder: Decoder,
}

impl ChunkDecoder {
    pub fn for_content_type(content_type: &str) -> Self {
        let encoding = charset_label(content_type)
            .and_then(|label| Encoding::for_label(label.as_bytes()))
            .unwrap_or(UTF_8);
        Self {
            decoder: encoding.new_decoder(),
        }
    }

    /// Decodes the next chunk; pass `last = true` once the body has ended
    pub fn decode(&mut self, chunk: &[u8], last: bool) -> String {
        let capacity = self
            .decoder
            .max_utf8_buffer_length(chunk.len())
            .unwrap_or(chunk.len() * 3 + 4);
        let mut out = String::with_capacity(capacity);
        let (_, _, had_errors) = self.decoder.decode_to_string(chunk, &mut out, last);
        if had_errors {
            tracing::debug!("replaced malformed byte sequences in response body");
        }
        out
    }

    pub fn encoding_name(&self) -> &'static str {
        self.decoder.encoding().name()
    }
}

fn charset_label(content_type: &str) -> Option<String> {
    content_type.split(';').find_map(|part| {
        let (key, value) = part.trim().split_once('=')?;
        if key.trim().eq_ignore_ascii_case("charset") {
            Some(value.trim().trim_matches(['"', '\'']).to_string())
        } else {
            None
        }
    })
}
