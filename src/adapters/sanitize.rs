//! Log sanitization for personal data.
//!
//! Assessment inputs are personal health data. The services only log
//! categories, but any formatted log line still passes through [`sanitize`]
//! before it reaches a sink, which redacts:
//! - the report's `Name:` line
//! - body measurements with units (kg, cm)
//! - BMI and ratio values written as `key: value` / `key=value`
//! - e-mail addresses and phone numbers typed into free-text fields
//!
//! Input is capped (see `ADIPOSCOPE_SANITIZE_MAX_BYTES`) so a runaway log
//! line cannot stall the writer.

use regex::{Regex, RegexSet};
use std::sync::OnceLock;
use tracing_subscriber::fmt::MakeWriter;

static PATTERNS: OnceLock<Patterns> = OnceLock::new();

/// Default cap on bytes sanitized per call (16 KiB).
const DEFAULT_SANITIZE_MAX_BYTES: usize = 16 * 1024;

struct Rule {
    regex: Regex,
    replacement: &'static str,
}

struct Patterns {
    set: RegexSet,
    rules: Vec<Rule>,
}

fn truncate_to_char_boundary(input: &str, max_bytes: usize) -> (&str, bool) {
    if input.len() <= max_bytes {
        return (input, false);
    }

    let mut end = max_bytes.min(input.len());
    while end > 0 && !input.is_char_boundary(end) {
        end -= 1;
    }
    (&input[..end], true)
}

fn max_sanitize_bytes() -> usize {
    std::env::var("ADIPOSCOPE_SANITIZE_MAX_BYTES")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|&v| v > 0)
        .unwrap_or(DEFAULT_SANITIZE_MAX_BYTES)
}

fn get_patterns() -> &'static Patterns {
    PATTERNS.get_or_init(|| {
        let rules: Vec<(&'static str, &'static str)> = vec![
            // Report name line
            (r"(?m)\bName:[^\n]*", "Name: [REDACTED-NAME]"),
            // Measurements with units
            (
                r"(?i)\b\d{1,4}(?:\.\d+)?\s?(?:kg|cm)\b",
                "[REDACTED-MEASUREMENT]",
            ),
            // Metric values
            (
                r"(?i)\b(?:bmi|waist-to-height ratio|waist-to-hip ratio|whtr|whr)\s*[:=]\s*\d+(?:\.\d+)?",
                "[REDACTED-METRIC]",
            ),
            // E-mail addresses
            (
                r"(?i)\b[a-z0-9](?:[a-z0-9._%+-]{0,62}[a-z0-9])?@(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z]{2,}\b",
                "[REDACTED-EMAIL]",
            ),
            // Phone numbers
            (
                r"(?:\+\d{1,3}[\s.-]?)?\(?\b\d{3}\)?[\s.-]?\d{3}[\s.-]?\d{4}\b",
                "[REDACTED-PHONE]",
            ),
        ];

        let set = RegexSet::new(rules.iter().map(|(p, _)| *p)).expect("Valid regex set");
        let rules = rules
            .into_iter()
            .map(|(pattern, replacement)| Rule {
                regex: Regex::new(pattern).expect("Valid regex"),
                replacement,
            })
            .collect();

        Patterns { set, rules }
    })
}

/// Sanitize a string by replacing personal-data patterns.
#[must_use]
pub fn sanitize(input: &str) -> String {
    sanitize_with_limit(input, max_sanitize_bytes())
}

fn sanitize_with_limit(input: &str, max_bytes: usize) -> String {
    let patterns = get_patterns();
    let (prefix, truncated) = truncate_to_char_boundary(input, max_bytes);

    let mut result = prefix.to_string();
    for idx in patterns.set.matches(prefix).into_iter() {
        let rule = &patterns.rules[idx];
        result = rule.regex.replace_all(&result, rule.replacement).to_string();
    }

    if truncated {
        result.push_str(" [TRUNCATED]");
    }
    result
}

/// A `tracing_subscriber` writer wrapper that sanitizes each formatted
/// line before it is written to the underlying sink.
#[derive(Debug)]
pub struct SanitizingMakeWriter<M> {
    inner: M,
}

impl<M> SanitizingMakeWriter<M> {
    #[must_use]
    pub fn new(inner: M) -> Self {
        Self { inner }
    }
}

impl<M> Clone for SanitizingMakeWriter<M>
where
    M: Clone,
{
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

pub struct SanitizingWriter<W> {
    inner: W,
    buffer: Vec<u8>,
}

impl<W> SanitizingWriter<W> {
    fn new(inner: W) -> Self {
        Self {
            inner,
            buffer: Vec::new(),
        }
    }
}

impl<W> SanitizingWriter<W>
where
    W: std::io::Write,
{
    fn flush_lines(&mut self) -> std::io::Result<()> {
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line = self.buffer.drain(..=pos).collect::<Vec<u8>>();
            let sanitized = sanitize(&String::from_utf8_lossy(&line));
            self.inner.write_all(sanitized.as_bytes())?;
        }
        Ok(())
    }
}

impl<W> std::io::Write for SanitizingWriter<W>
where
    W: std::io::Write,
{
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.extend_from_slice(buf);

        // A line with no newline in sight is flushed whole once it outgrows the cap.
        let hard_cap = max_sanitize_bytes().saturating_mul(2);
        if self.buffer.len() > hard_cap {
            let sanitized = sanitize(&String::from_utf8_lossy(&self.buffer));
            self.inner.write_all(sanitized.as_bytes())?;
            self.inner.write_all(b"\n")?;
            self.buffer.clear();
            return Ok(buf.len());
        }

        self.flush_lines()?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_lines()?;

        if !self.buffer.is_empty() {
            let sanitized = sanitize(&String::from_utf8_lossy(&self.buffer));
            self.inner.write_all(sanitized.as_bytes())?;
            self.buffer.clear();
        }

        self.inner.flush()
    }
}

impl<'a, M> MakeWriter<'a> for SanitizingMakeWriter<M>
where
    M: MakeWriter<'a>,
{
    type Writer = SanitizingWriter<M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        SanitizingWriter::new(self.inner.make_writer())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_sanitize_name_line() {
        let sanitized = sanitize("Name: Sara Ahmadi\nObesity assessment report");
        assert!(sanitized.contains("Name: [REDACTED-NAME]"));
        assert!(!sanitized.contains("Ahmadi"));
        assert!(sanitized.contains("Obesity assessment report"));
    }

    #[test]
    fn test_sanitize_measurements() {
        let sanitized = sanitize("waist 95 cm, weight 80.5kg");
        assert!(!sanitized.contains("95"));
        assert!(!sanitized.contains("80.5"));
        assert_eq!(sanitized.matches("[REDACTED-MEASUREMENT]").count(), 2);
    }

    #[test]
    fn test_sanitize_metric_values() {
        let sanitized = sanitize("computed BMI: 29.38 and whr=0.91");
        assert_eq!(sanitized.matches("[REDACTED-METRIC]").count(), 2);
        assert!(!sanitized.contains("29.38"));
    }

    #[test]
    fn test_sanitize_contact_details() {
        let sanitized = sanitize("contact sara@example.com or +98 912 345 6789");
        assert!(sanitized.contains("[REDACTED-EMAIL]"));
        assert!(sanitized.contains("[REDACTED-PHONE]"));
    }

    #[test]
    fn test_category_logs_pass_through() {
        let line = "Assessment complete: risk=MODERATE, recommendations=8";
        assert_eq!(sanitize(line), line);
    }

    #[test]
    fn test_truncates_large_inputs() {
        let sanitized = sanitize_with_limit("prefix waist 95 cm suffix", 10);
        assert!(sanitized.ends_with("[TRUNCATED]"));
        assert!(sanitized.starts_with("prefix wai"));
    }

    #[test]
    fn test_writer_sanitizes_per_line() {
        let mut out = Vec::new();
        {
            let mut writer = SanitizingWriter::new(&mut out);
            writer.write_all(b"height 170 c").expect("write");
            writer.write_all(b"m\nok\n").expect("write");
            writer.flush().expect("flush");
        }
        let text = String::from_utf8(out).expect("utf8");
        assert_eq!(text, "height [REDACTED-MEASUREMENT]\nok\n");
    }
}
