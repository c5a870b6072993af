//! Parsing of range API response bodies.
//!
//! A body is a list of `SUFFIX:COUNT` records separated by `\r\n`, where
//! SUFFIX is the 35 hex characters following the queried prefix and COUNT is
//! a decimal occurrence count. The last record usually has no terminator.
//!
//! ```text
//! 0018A45C4D1DEF81644B54AB7F969B88D65:1\r\n
//! 00D4F6E8FA6EECAD2A3AA415EEC418D38EC:2\r\n
//! 011053FD0102E94D6AE2F8B83D76FAF94F6:1
//! ```
//!
//! Records are not assumed to be sorted.

use crate::config::MatchMode;

/// Why a body could not yield a count for a suffix that it contains.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedBody {
    #[error("target suffix is empty")]
    EmptySuffix,

    #[error("no ':' separator after the matched suffix")]
    MissingSeparator,

    #[error("count '{0}' is not a non-negative integer")]
    InvalidCount(String),
}

/// Returns how many times `suffix` was reported in `body`.
///
/// A suffix that does not appear at all yields `Ok(0)`.
pub fn parse_count(body: &str, suffix: &str, mode: MatchMode) -> Result<u64, MalformedBody> {
    if suffix.is_empty() {
        return Err(MalformedBody::EmptySuffix);
    }

    match mode {
        MatchMode::Substring => parse_substring(body, suffix),
        MatchMode::Line => parse_lines(body, suffix),
    }
}

// Literal substring search, then the next ':' and the next line terminator.
fn parse_substring(body: &str, suffix: &str) -> Result<u64, MalformedBody> {
    let Some(pos) = body.find(suffix) else {
        return Ok(0);
    };

    let colon = body[pos..].find(':').ok_or(MalformedBody::MissingSeparator)? + pos;
    let after = &body[colon + 1..];
    let end = after.find(['\r', '\n']).unwrap_or(after.len());

    parse_decimal(&after[..end])
}

// Exact match on the text before ':'. Malformed lines other than the target
// are skipped so the answer never depends on record order.
fn parse_lines(body: &str, suffix: &str) -> Result<u64, MalformedBody> {
    for line in body.lines() {
        match line.split_once(':') {
            Some((hash, count)) if hash == suffix => return parse_decimal(count),
            Some(_) => {}
            None if line.trim_end() == suffix => return Err(MalformedBody::MissingSeparator),
            None => {}
        }
    }
    Ok(0)
}

#[inline]
fn parse_decimal(raw: &str) -> Result<u64, MalformedBody> {
    let raw = raw.trim();
    // u64::from_str accepts a leading '+'
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(MalformedBody::InvalidCount(raw.to_string()));
    }
    raw.parse().map_err(|_| MalformedBody::InvalidCount(raw.to_string()))
}
