//! Heuristics over the asynchronous-extraction envelope.
//!
//! The envelope is SOAP-ish XML whose element names vary between
//! deployments, so detection works on tag suffixes rather than a schema.

use quick_xml::Reader;
use quick_xml::events::Event;

/// Case-insensitive markers that identify an asynchronous envelope.
const ENVELOPE_MARKERS: [&[u8]; 3] = [b"<env:envelope", b"<soap", b"<s:envelope"];

/// Bytes inspected when sniffing a response body.
const SNIFF_LEN: usize = 200;

pub(crate) fn contains_bytes(haystack: &[u8], needle: &[u8]) -> bool {
    !needle.is_empty() && haystack.windows(needle.len()).any(|window| window == needle)
}

/// Whether a response body looks like an asynchronous-extraction envelope
/// rather than tabular data.
pub fn looks_like_envelope(body: &[u8]) -> bool {
    let start = body
        .iter()
        .position(|byte| !byte.is_ascii_whitespace())
        .unwrap_or(body.len());
    let trimmed = &body[start..];
    let head = trimmed[..trimmed.len().min(SNIFF_LEN)].to_ascii_lowercase();
    ENVELOPE_MARKERS
        .iter()
        .any(|marker| contains_bytes(&head, marker))
}

/// Extract the extraction request identifier from the envelope: the text
/// of the first element whose tag ends in `id` and looks like a UUID.
pub fn extract_request_id(body: &[u8]) -> Option<String> {
    let mut reader = Reader::from_reader(body);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut open_tag: Option<Vec<u8>> = None;
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(start)) => {
                open_tag = Some(start.name().as_ref().to_ascii_lowercase());
            }
            Ok(Event::Text(content)) => {
                if open_tag.as_deref().is_some_and(|tag| tag.ends_with(b"id")) {
                    if let Ok(value) = content.unescape() {
                        let candidate = value.trim();
                        // Request ids look like UUIDs: long, with dashes.
                        if candidate.len() >= 30 && candidate.contains('-') {
                            return Some(candidate.to_string());
                        }
                    }
                }
                open_tag = None;
            }
            Ok(Event::End(_)) => open_tag = None,
            Ok(Event::Eof) | Err(_) => return None,
            Ok(_) => {}
        }
        buf.clear();
    }
}

/// Collect every status word in a polling response: the trimmed,
/// uppercased text of each element whose tag ends in `status`.
pub fn status_words(body: &[u8]) -> Vec<String> {
    let mut reader = Reader::from_reader(body);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut open_tag: Option<Vec<u8>> = None;
    let mut words = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(start)) => {
                open_tag = Some(start.name().as_ref().to_ascii_lowercase());
            }
            Ok(Event::Text(content)) => {
                if open_tag.as_deref().is_some_and(|tag| tag.ends_with(b"status")) {
                    if let Ok(value) = content.unescape() {
                        let word = value.trim().to_uppercase();
                        if !word.is_empty() {
                            words.push(word);
                        }
                    }
                }
                open_tag = None;
            }
            Ok(Event::End(_)) => open_tag = None,
            Ok(Event::Eof) | Err(_) => break,
            Ok(_) => {}
        }
        buf.clear();
    }
    words
}
