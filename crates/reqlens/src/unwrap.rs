//! Shell envelope removal
//!
//! Reduces a `curl ...` transcript to the body argument and strips the
//! quoting around it. Inputs that do not start with `curl` pass through.

use crate::error::DecodeError;
use std::iter::Peekable;
use std::str::Chars;

/// Command token that marks a transcript
pub const COMMAND: &str = "curl";

/// Flags that carry an inline request body, in display order
pub const INLINE_BODY_FLAGS: &[&str] = &["--data-raw", "--data", "-d", "--data-binary"];

/// Flag that browsers append after a line continuation
const NO_COMPRESSION_FLAG: &str = "--compressed";

/// Strip the `curl` envelope and return the raw body argument
///
/// A quoted body is the shell word after the earliest inline body flag and
/// may span several lines. An unquoted body is the rest of the flag's line.
/// Input that does not start with `curl` is returned unchanged.
pub fn unwrap_invocation(raw: &str) -> Result<String, DecodeError> {
    if !raw.starts_with(COMMAND) {
        return Ok(raw.to_string());
    }

    let stripped = remove_compressed_continuations(raw);

    let Some((flag, value_start)) = find_body_flag(&stripped) else {
        return Err(DecodeError::malformed_invocation(INLINE_BODY_FLAGS));
    };
    tracing::debug!(flag, "Found inline body flag");

    Ok(body_argument(stripped[value_start..].trim_start()).to_string())
}

fn body_argument(rest: &str) -> &str {
    if starts_quoted(rest) {
        if let Some((_, len)) = read_word(rest) {
            return &rest[..len];
        }
    }
    let line = rest.split('\n').next().unwrap_or_default().trim_end();
    drop_line_continuation(line)
}

fn starts_quoted(data: &str) -> bool {
    data.starts_with('\'') || data.starts_with('"') || data.starts_with("$'")
}

/// Decode the shell word at the start of `data`
///
/// Adjacent quoted and unquoted segments are joined, so `'it'\''s'` reads
/// as `it's`. Returns the decoded word and its length in bytes, or `None`
/// when a quote is left open.
fn read_word(data: &str) -> Option<(String, usize)> {
    let mut word = String::with_capacity(data.len());
    let mut pos = 0;

    while pos < data.len() {
        let rest = &data[pos..];
        if let Some(inner) = rest.strip_prefix("$'") {
            let end = closing_quote(inner, '\'', true)?;
            word.push_str(&ansi_c_unquote(&inner[..end]));
            pos += end + 3;
        } else if let Some(inner) = rest.strip_prefix('\'') {
            let end = closing_quote(inner, '\'', false)?;
            word.push_str(&inner[..end]);
            pos += end + 2;
        } else if let Some(inner) = rest.strip_prefix('"') {
            let end = closing_quote(inner, '"', true)?;
            word.push_str(&double_quote_unescape(&inner[..end]));
            pos += end + 2;
        } else {
            let mut chars = rest.chars();
            let Some(c) = chars.next() else {
                break;
            };
            if c.is_whitespace() {
                break;
            }
            pos += c.len_utf8();
            match chars.next() {
                Some(escaped) if c == '\\' => {
                    word.push(escaped);
                    pos += escaped.len_utf8();
                }
                _ => word.push(c),
            }
        }
    }

    Some((word, pos))
}

fn closing_quote(data: &str, quote: char, backslash_escapes: bool) -> Option<usize> {
    let mut escaped = false;
    for (idx, c) in data.char_indices() {
        if escaped {
            escaped = false;
        } else if backslash_escapes && c == '\\' {
            escaped = true;
        } else if c == quote {
            return Some(idx);
        }
    }
    None
}

/// Remove `<ws>\<ws>--compressed` sequences
pub fn remove_compressed_continuations(data: &str) -> String {
    let mut output = String::with_capacity(data.len());
    let mut copied = 0;

    for (idx, _) in data.match_indices(NO_COMPRESSION_FLAG) {
        if idx < copied {
            continue;
        }
        if let Some(start) = continuation_start(&data[copied..idx]) {
            output.push_str(&data[copied..copied + start]);
            copied = idx + NO_COMPRESSION_FLAG.len();
        }
    }

    output.push_str(&data[copied..]);
    output
}

/// Offset where a `<ws>\<ws>` run ending exactly at the end of `prefix` begins
fn continuation_start(prefix: &str) -> Option<usize> {
    let after_backslash = prefix.trim_end();
    if after_backslash.len() == prefix.len() {
        return None;
    }
    let before_backslash = after_backslash.strip_suffix('\\')?;
    let start = before_backslash.trim_end();
    if start.len() == before_backslash.len() {
        return None;
    }
    Some(start.len())
}

/// Find the earliest whitespace-delimited inline body flag
///
/// Returns the flag and the byte offset just past it.
fn find_body_flag(data: &str) -> Option<(&'static str, usize)> {
    INLINE_BODY_FLAGS
        .iter()
        .filter_map(|flag| {
            data.match_indices(flag)
                .find(|(idx, _)| is_delimited(data, *idx, flag.len()))
                .map(|(idx, _)| (*flag, idx))
        })
        .min_by_key(|(_, idx)| *idx)
        .map(|(flag, idx)| (flag, idx + flag.len()))
}

fn is_delimited(data: &str, idx: usize, len: usize) -> bool {
    let before = data[..idx].chars().next_back();
    let after = data[idx + len..].chars().next();
    matches!(before, Some(c) if c.is_whitespace()) && matches!(after, Some(c) if c.is_whitespace())
}

fn drop_line_continuation(line: &str) -> &str {
    match line.strip_suffix('\\') {
        Some(head) if head.ends_with(char::is_whitespace) => head.trim_end(),
        _ => line,
    }
}

/// Undo an escaped JSON capture
///
/// `"{\"key\": \"val\"}"` and `{\"key\": \"val\"}` both become
/// `{"key": "val"}`.
pub fn remove_escapes(data: &str) -> String {
    let mut decoded = data;
    if decoded.starts_with('"') {
        let mut chars = decoded[1..].chars();
        chars.next_back();
        decoded = chars.as_str();
    }
    if decoded.chars().nth(1) == Some('\\') {
        return decoded.replace("\\\"", "\"");
    }
    decoded.to_string()
}

/// Strip one pair of wrapping quotes
///
/// A quoted shell word (`'...'`, `"..."`, `$'...'` or adjacent segments of
/// those) is decoded the way the shell would. Anything else that starts and
/// ends with the same quote loses exactly those two characters; the rest is
/// returned unchanged.
pub fn strip_quotes(data: &str) -> String {
    if starts_quoted(data) {
        if let Some((word, len)) = read_word(data) {
            if len == data.len() {
                return word;
            }
        }
    }

    let wrapped = (data.starts_with('\'') && data.ends_with('\''))
        || (data.starts_with('"') && data.ends_with('"'));
    if !wrapped {
        return data.to_string();
    }
    if data.len() < 2 {
        return String::new();
    }
    data[1..data.len() - 1].to_string()
}

/// Decode `\"`, `\\`, `\$` and `` \` `` as inside a `"..."` shell string
fn double_quote_unescape(data: &str) -> String {
    let mut output = String::with_capacity(data.len());
    let mut chars = data.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(&next) = chars.peek() {
                if matches!(next, '"' | '\\' | '$' | '`') {
                    output.push(next);
                    chars.next();
                    continue;
                }
            }
        }
        output.push(c);
    }

    output
}

/// Decode the escapes of a `$'...'` shell string
fn ansi_c_unquote(data: &str) -> String {
    let mut output = String::with_capacity(data.len());
    let mut chars = data.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            output.push(c);
            continue;
        }
        let Some(escape) = chars.next() else {
            output.push('\\');
            break;
        };
        match escape {
            'n' => output.push('\n'),
            'r' => output.push('\r'),
            't' => output.push('\t'),
            'a' => output.push('\u{07}'),
            'b' => output.push('\u{08}'),
            'e' | 'E' => output.push('\u{1b}'),
            'f' => output.push('\u{0c}'),
            'v' => output.push('\u{0b}'),
            '\\' | '\'' | '"' | '?' => output.push(escape),
            'x' => push_code(&mut output, &mut chars, 2, escape),
            'u' => push_unicode(&mut output, &mut chars),
            'U' => push_code(&mut output, &mut chars, 8, escape),
            other => {
                output.push('\\');
                output.push(other);
            }
        }
    }

    output
}

fn read_hex(chars: &mut Peekable<Chars<'_>>, max_digits: usize) -> Option<u32> {
    let mut value = 0u32;
    let mut digits = 0;
    while digits < max_digits {
        let Some(digit) = chars.peek().and_then(|c| c.to_digit(16)) else {
            break;
        };
        chars.next();
        value = value * 16 + digit;
        digits += 1;
    }
    (digits > 0).then_some(value)
}

fn push_code(output: &mut String, chars: &mut Peekable<Chars<'_>>, max_digits: usize, escape: char) {
    match read_hex(chars, max_digits) {
        Some(code) => output.push(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER)),
        None => {
            output.push('\\');
            output.push(escape);
        }
    }
}

/// `\uXXXX`, joining a surrogate pair spelled as two escapes
fn push_unicode(output: &mut String, chars: &mut Peekable<Chars<'_>>) {
    let Some(high) = read_hex(chars, 4) else {
        output.push_str("\\u");
        return;
    };

    if (0xD800..0xDC00).contains(&high) {
        let mut lookahead = chars.clone();
        if lookahead.next() == Some('\\') && lookahead.next() == Some('u') {
            if let Some(low) = read_hex(&mut lookahead, 4) {
                if (0xDC00..0xE000).contains(&low) {
                    *chars = lookahead;
                    let code = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
                    output.push(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
                    return;
                }
            }
        }
    }

    output.push(char::from_u32(high).unwrap_or(char::REPLACEMENT_CHARACTER));
}
