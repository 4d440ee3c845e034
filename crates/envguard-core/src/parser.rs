//! # Profile Parser
//!
//! Strict line-oriented parser for `KEY=VALUE` profile files.
//!
//! ## Grammar
//!
//! Lines break on `\n`, `\r\n`, a lone `\r`, and the other Unicode line
//! boundaries (`\x0b`, `\x0c`, `\x1c` to `\x1e`, `\x85`, U+2028, U+2029).
//! A carriage return therefore cannot hide a second assignment inside a value.
//!
//! Each line is trimmed. Blank lines and lines starting with `#` are skipped.
//! Every other line must be `KEY=VALUE` with `KEY` matching `^[A-Z][A-Z0-9_]*$`
//! (no whitespace before `=`). The value is trimmed; if it opens with `"` or
//! `'` it must close with the same character, and the delimiters are removed.
//! Nothing inside quotes is unescaped.
//!
//! ## Security Invariant
//!
//! After unquoting, a value containing `${`, `$(` or a backtick is rejected.
//! The check runs on every value, quoted or not, so that no profile can smuggle
//! shell interpolation into a downstream consumer.

use std::path::Path;

use crate::error::{ParseError, ParseErrorKind, ProfileError};
use crate::key::ProfileKey;
use crate::profile::ConfigProfile;

/// Substrings that indicate shell interpolation or command substitution.
const INTERPOLATION_MARKERS: [&str; 3] = ["${", "$(", "`"];

/// Characters that end a line. `\r\n` counts as a single break.
const LINE_BREAKS: [char; 10] = [
    '\n', '\r', '\u{0b}', '\u{0c}', '\u{1c}', '\u{1d}', '\u{1e}', '\u{85}', '\u{2028}', '\u{2029}',
];

/// Parse profile text into a [`ConfigProfile`].
///
/// Stops at the first offending line.
///
/// # Errors
///
/// Returns a [`ParseError`] carrying the 1-based line number and the reason.
pub fn parse(text: &str) -> Result<ConfigProfile, ParseError> {
    let mut profile = ConfigProfile::new();

    for (index, raw_line) in split_lines(text).into_iter().enumerate() {
        let line_no = index + 1;
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let (key, value) = parse_line(line)
            .map_err(|kind| ParseError::new(line_no, kind))?;
        profile.insert(key, value);
    }

    Ok(profile)
}

/// Read and parse a profile file.
///
/// # Errors
///
/// Returns [`ProfileError::DocumentLoadError`] if the file cannot be read as
/// UTF-8 text, or [`ProfileError::ParseFailed`] if a line is rejected.
pub fn parse_file(path: &Path) -> Result<ConfigProfile, ProfileError> {
    let content = std::fs::read_to_string(path).map_err(|e| ProfileError::DocumentLoadError {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    let profile = parse(&content).map_err(|source| ProfileError::ParseFailed {
        path: path.display().to_string(),
        source,
    })?;

    tracing::debug!(
        path = %path.display(),
        entries = profile.len(),
        "parsed profile"
    );

    Ok(profile)
}

/// Split `text` into lines on every [`LINE_BREAKS`] character.
///
/// A trailing break does not produce an extra empty line.
fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if !LINE_BREAKS.contains(&c) {
            continue;
        }
        lines.push(&text[start..i]);
        start = i + c.len_utf8();
        if c == '\r' {
            if let Some(&(j, '\n')) = chars.peek() {
                chars.next();
                start = j + 1;
            }
        }
    }

    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}

/// Parse one trimmed, non-comment line into a key and its final value.
fn parse_line(line: &str) -> Result<(ProfileKey, String), ParseErrorKind> {
    let (raw_key, raw_value) = line
        .split_once('=')
        .ok_or(ParseErrorKind::InvalidAssignment)?;
    let key = ProfileKey::new(raw_key).ok_or(ParseErrorKind::InvalidAssignment)?;

    let value = unquote(raw_value.trim())?;

    if INTERPOLATION_MARKERS.iter().any(|m| value.contains(m)) {
        return Err(ParseErrorKind::Interpolation);
    }

    Ok((key, value.to_string()))
}

/// Strip one pair of matching `"` or `'` delimiters.
fn unquote(value: &str) -> Result<&str, ParseErrorKind> {
    let Some(quote) = value.chars().next().filter(|c| *c == '"' || *c == '\'') else {
        return Ok(value);
    };
    if value.len() < 2 || !value.ends_with(quote) {
        return Err(ParseErrorKind::UnclosedQuote);
    }
    // Both delimiters are single-byte ASCII.
    Ok(&value[1..value.len() - 1])
}
