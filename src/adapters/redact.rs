//! Log redaction utilities for card-data filtering.
//!
//! The simulator only handles anonymized PCA components, but log output
//! can still pick up card-like data pasted into the terminal or injected
//! through environment configuration. Formatted log lines are filtered
//! before they reach the sink:
//! - Card numbers: PAN-like digit runs (13-19 digits, optionally
//!   separated) that pass the Luhn check
//! - Contextual secrets: `cvv`/`api_key`/`password` style key-value pairs
//!
//! String scrubbing is a fallback; sensitive values should not reach
//! logging calls in the first place. `redact()` caps its input size (see
//! `FRAUDSCOPE_REDACT_MAX_BYTES`) so hostile log volume cannot turn the
//! scrubber into a bottleneck.

use regex::Regex;
use std::sync::OnceLock;
use tracing_subscriber::fmt::MakeWriter;

/// Compiled patterns for card-data detection.
static PATTERNS: OnceLock<RedactPatterns> = OnceLock::new();

/// Maximum number of bytes to scrub per call.
///
/// Defaults to 16 KiB; can be overridden via `FRAUDSCOPE_REDACT_MAX_BYTES`.
const DEFAULT_REDACT_MAX_BYTES: usize = 16 * 1024;

struct RedactPatterns {
    /// Candidate digit runs; verified with the Luhn check before masking.
    pan: Regex,
    secret: Regex,
}

fn get_patterns() -> &'static RedactPatterns {
    PATTERNS.get_or_init(|| RedactPatterns {
        // 13-19 digits, each optionally followed by a single space or dash.
        pan: Regex::new(r"\b(?:\d[ -]?){12,18}\d\b").expect("valid regex"),
        secret: Regex::new(
            r"(?i)\b(?:cvv|cvc|pin|password|passwd|pwd|api[_-]?key|secret|token)\b\s*[:=]\s*\S+",
        )
        .expect("valid regex"),
    })
}

fn truncate_to_char_boundary(input: &str, max_bytes: usize) -> (&str, bool) {
    if input.len() <= max_bytes {
        return (input, false);
    }

    // Ensure we don't panic on UTF-8 boundaries.
    let mut end = max_bytes.min(input.len());
    while end > 0 && !input.is_char_boundary(end) {
        end -= 1;
    }
    (&input[..end], true)
}

fn max_redact_bytes() -> usize {
    std::env::var("FRAUDSCOPE_REDACT_MAX_BYTES")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|&v| v > 0)
        .unwrap_or(DEFAULT_REDACT_MAX_BYTES)
}

/// Luhn checksum over the digits of a candidate card number.
fn luhn_valid(candidate: &str) -> bool {
    let digits: Vec<u32> = candidate.chars().filter_map(|c| c.to_digit(10)).collect();
    if !(13..=19).contains(&digits.len()) {
        return false;
    }

    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| {
            if i % 2 == 1 {
                let doubled = d * 2;
                if doubled > 9 {
                    doubled - 9
                } else {
                    doubled
                }
            } else {
                d
            }
        })
        .sum();

    sum % 10 == 0
}

/// Redact card data and contextual secrets from a string.
#[must_use]
pub fn redact(input: &str) -> String {
    redact_with_limit(input, max_redact_bytes())
}

fn redact_with_limit(input: &str, max_bytes: usize) -> String {
    let patterns = get_patterns();
    let (prefix, truncated) = truncate_to_char_boundary(input, max_bytes);

    let mut result = prefix.to_string();
    if patterns.pan.is_match(&result) {
        result = patterns
            .pan
            .replace_all(&result, |caps: &regex::Captures<'_>| {
                // Digit runs that fail the Luhn check (timestamps, ids) stay.
                if luhn_valid(&caps[0]) {
                    "[REDACTED-PAN]".to_string()
                } else {
                    caps[0].to_string()
                }
            })
            .into_owned();
    }
    if patterns.secret.is_match(&result) {
        result = patterns
            .secret
            .replace_all(&result, "[REDACTED-SECRET]")
            .into_owned();
    }

    if truncated {
        result.push_str(" [TRUNCATED]");
    }
    result
}

/// Check if a string contains card-like data.
#[must_use]
pub fn contains_card_data(input: &str) -> bool {
    let patterns = get_patterns();
    let (prefix, _truncated) = truncate_to_char_boundary(input, max_redact_bytes());

    patterns
        .pan
        .find_iter(prefix)
        .any(|m| luhn_valid(m.as_str()))
        || patterns.secret.is_match(prefix)
}

/// A `tracing_subscriber` writer wrapper that redacts formatted log output
/// before it is written to the underlying sink.
///
/// This keeps scrubbing centralized instead of relying on every callsite
/// to filter its own arguments.
#[derive(Debug)]
pub struct RedactingMakeWriter<M> {
    inner: M,
}

impl<M> RedactingMakeWriter<M> {
    #[must_use]
    pub fn new(inner: M) -> Self {
        Self { inner }
    }
}

impl<M> Clone for RedactingMakeWriter<M>
where
    M: Clone,
{
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

pub struct RedactingWriter<W> {
    inner: W,
    buffer: Vec<u8>,
}

impl<W> RedactingWriter<W> {
    fn new(inner: W) -> Self {
        Self {
            inner,
            buffer: Vec::new(),
        }
    }
}

impl<W> RedactingWriter<W>
where
    W: std::io::Write,
{
    fn flush_lines(&mut self) -> std::io::Result<()> {
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line = self.buffer.drain(..=pos).collect::<Vec<u8>>();
            let line_str = String::from_utf8_lossy(&line);
            let redacted = redact(&line_str);
            self.inner.write_all(redacted.as_bytes())?;
        }
        Ok(())
    }
}

impl<W> std::io::Write for RedactingWriter<W>
where
    W: std::io::Write,
{
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.extend_from_slice(buf);

        // Prevent unbounded buffering if the formatter writes a huge line
        // with no newline. `redact()` caps the scrubbed output anyway.
        let hard_cap = max_redact_bytes().saturating_mul(2);
        if hard_cap > 0 && self.buffer.len() > hard_cap {
            let s = String::from_utf8_lossy(&self.buffer).to_string();
            let redacted = redact(&s);
            self.inner.write_all(redacted.as_bytes())?;
            self.inner.write_all(b"\n[TRUNCATED]\n")?;
            self.buffer.clear();
            return Ok(buf.len());
        }

        self.flush_lines()?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_lines()?;

        if !self.buffer.is_empty() {
            let s = String::from_utf8_lossy(&self.buffer);
            let redacted = redact(&s);
            self.inner.write_all(redacted.as_bytes())?;
            self.buffer.clear();
        }

        self.inner.flush()
    }
}

impl<'a, M> MakeWriter<'a> for RedactingMakeWriter<M>
where
    M: MakeWriter<'a>,
{
    type Writer = RedactingWriter<M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        RedactingWriter::new(self.inner.make_writer())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_pan() {
        let input = "card 4111 1111 1111 1111 declined";
        let redacted = redact(input);
        assert!(redacted.contains("[REDACTED-PAN]"));
        assert!(!redacted.contains("4111"));
    }

    #[test]
    fn test_redact_dashed_pan() {
        let input = "PAN=5500-0000-0000-0004";
        let redacted = redact(input);
        assert!(redacted.contains("[REDACTED-PAN]"));
    }

    #[test]
    fn test_non_luhn_digit_run_kept() {
        // 16 digits that fail the Luhn check stay untouched.
        let input = "trace id 1234 5678 9012 3456 recorded";
        assert_eq!(redact(input), input);
    }

    #[test]
    fn test_short_numbers_kept() {
        let input = "Assessment complete, confidence 62.83%, fraud_probability 0.6283";
        assert_eq!(redact(input), input);
    }

    #[test]
    fn test_redact_contextual_secret() {
        let input = "cvv: 123";
        let redacted = redact(input);
        assert!(redacted.contains("[REDACTED-SECRET]"));
        assert!(!redacted.contains("123"));
    }

    #[test]
    fn test_contains_card_data() {
        assert!(contains_card_data("4111111111111111"));
        assert!(contains_card_data("api_key=abcdef"));
        assert!(!contains_card_data("Just normal log text"));
        assert!(!contains_card_data("count=1234567890123456")); // fails Luhn
    }

    #[test]
    fn test_luhn() {
        assert!(luhn_valid("4111111111111111"));
        assert!(luhn_valid("5500000000000004"));
        assert!(!luhn_valid("4111111111111112"));
        assert!(!luhn_valid("411")); // too short to be a PAN
    }

    #[test]
    fn test_redact_truncates_large_inputs() {
        let input = "prefix 4111 1111 1111 1111 suffix";
        let redacted = redact_with_limit(input, 10);
        assert!(redacted.contains("[TRUNCATED]"));
    }
}
