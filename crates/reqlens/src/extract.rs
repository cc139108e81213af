//! URL and header extraction from transcripts
//!
//! Both scans run over the raw input, quoted or not, and look for the
//! quoted argument following a fixed marker (`curl '...'` and `-H '...'`).
//! This is not a shell lexer.

use crate::error::DecodeError;
use crate::unwrap::COMMAND;
use std::collections::BTreeMap;
use url::Url;

/// Header arguments keyed by header name
pub type Headers = BTreeMap<String, String>;

/// Marker preceding a header argument
const HEADER_FLAG: &str = "-H";

fn is_quote(c: char) -> bool {
    c == '\'' || c == '"'
}

/// Find the target URL of a transcript
///
/// Falls back to `base` when no `curl '<url>'` argument is present, and
/// resolves relative URLs against it.
pub fn extract_url(raw: &str, base: &str) -> Result<Url, DecodeError> {
    let base_url = Url::parse(base).map_err(|source| DecodeError::InvalidBaseUrl {
        url: base.to_string(),
        source,
    })?;

    let Some(candidate) = find_url_argument(raw) else {
        tracing::debug!("No URL argument found, using base URL");
        return Ok(base_url);
    };

    match base_url.join(candidate) {
        Ok(url) => Ok(url),
        Err(e) => {
            tracing::warn!(url = candidate, error = %e, "Unparseable URL argument, using base URL");
            Ok(base_url)
        }
    }
}

/// First `curl <quote><url>[<quote>]<ws>` match
fn find_url_argument(raw: &str) -> Option<&str> {
    raw.match_indices(COMMAND)
        .find_map(|(idx, _)| url_argument_at(&raw[idx + COMMAND.len()..]))
}

fn url_argument_at(rest: &str) -> Option<&str> {
    let mut chars = rest.char_indices();

    let (_, separator) = chars.next()?;
    if !separator.is_whitespace() {
        return None;
    }
    let (quote_idx, quote) = chars.next()?;
    if !is_quote(quote) {
        return None;
    }

    let start = quote_idx + quote.len_utf8();
    let end = rest[start..]
        .find(|c: char| c.is_whitespace() || is_quote(c))
        .map(|offset| start + offset)?;

    let mut tail = rest[end..].chars();
    let next = tail.next()?;
    let terminated = if is_quote(next) {
        matches!(tail.next(), Some(c) if c.is_whitespace())
    } else {
        next.is_whitespace()
    };

    terminated.then(|| &rest[start..end])
}

/// Collect all `-H '<name>: <value>'` arguments
///
/// A repeated header name keeps the last value.
pub fn extract_headers(raw: &str) -> Headers {
    let mut headers = Headers::new();
    let mut cursor = 0;

    while let Some(found) = raw[cursor..].find(HEADER_FLAG) {
        let flag_idx = cursor + found;
        match header_argument_at(&raw[flag_idx + HEADER_FLAG.len()..]) {
            Some((header, consumed)) => {
                let (name, value) = split_header(header);
                headers.insert(name.to_string(), value.to_string());
                cursor = flag_idx + HEADER_FLAG.len() + consumed;
            }
            None => cursor = flag_idx + HEADER_FLAG.len(),
        }
    }

    tracing::trace!(count = headers.len(), "Extracted headers");
    headers
}

/// Header text and the number of bytes consumed including the closing quote
fn header_argument_at(rest: &str) -> Option<(&str, usize)> {
    let mut chars = rest.char_indices();

    let (_, separator) = chars.next()?;
    if !separator.is_whitespace() {
        return None;
    }
    let (quote_idx, quote) = chars.next()?;
    if !is_quote(quote) {
        return None;
    }

    let start = quote_idx + quote.len_utf8();
    let end = start + rest[start..].find(is_quote)?;

    Some((&rest[start..end], end + 1))
}

/// Split on the first `:` and the whitespace after it
fn split_header(header: &str) -> (&str, &str) {
    match header.split_once(':') {
        Some((name, value)) => (name, value.trim_start()),
        None => (header, ""),
    }
}
