//! Utility functions for time handling, number formatting, and file system checks.
//!
//! This module provides helper functions used throughout the application:
//! - The fixed reporting timezone and timestamp formatting
//! - Lenient numeric parsing and one-decimal rendering for feed values
//! - Whitespace normalization for free-text fields
//! - String truncation for logging
//! - File system validation for the report output path

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use std::error::Error;
use std::fs as stdfs;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Offset of Europe/Istanbul from UTC, in seconds. Turkey has stayed on
/// UTC+03:00 all year since 2016.
pub const ISTANBUL_OFFSET_SECS: i32 = 3 * 60 * 60;

/// Display format for record and report timestamps (`18.10.2025 10:12`).
pub const TIMESTAMP_FORMAT: &str = "%d.%m.%Y %H:%M";

/// The reporting timezone: Europe/Istanbul as a fixed UTC+03:00 offset.
///
/// Every timestamp computation takes this value explicitly; nothing reads
/// the host's local timezone.
pub fn istanbul() -> FixedOffset {
    FixedOffset::east_opt(ISTANBUL_OFFSET_SECS).expect("UTC+03:00 is a valid offset")
}

/// The current instant expressed in `tz`.
pub fn now_in(tz: FixedOffset) -> DateTime<FixedOffset> {
    Utc::now().with_timezone(&tz)
}

/// Render a timestamp as `dd.mm.YYYY HH:MM` in `tz`.
///
/// # Examples
///
/// ```ignore
/// let t = DateTime::parse_from_rfc3339("2025-10-18T07:12:00Z").unwrap();
/// assert_eq!(format_timestamp(&t, istanbul()), "18.10.2025 10:12");
/// ```
pub fn format_timestamp<Tz: TimeZone>(t: &DateTime<Tz>, tz: FixedOffset) -> String {
    t.with_timezone(&tz).format(TIMESTAMP_FORMAT).to_string()
}

/// Parse the longest leading decimal number out of a `[0-9.]+` token.
///
/// Feed numerals are loose: a token such as `"4.2."` or `"1.2.3"` still
/// carries a usable value in its prefix. Parsing stops at the second dot.
/// Returns `None` when the token holds no digit at all.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(parse_leading_float("4"), Some(4.0));
/// assert_eq!(parse_leading_float("1.2.3"), Some(1.2));
/// assert_eq!(parse_leading_float("."), None);
/// ```
pub fn parse_leading_float(token: &str) -> Option<f64> {
    let mut end = 0;
    let mut seen_dot = false;
    let mut seen_digit = false;

    for (i, c) in token.char_indices() {
        match c {
            '0'..='9' => seen_digit = true,
            '.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end = i + c.len_utf8();
    }

    if !seen_digit {
        return None;
    }

    let prefix = token[..end].trim_end_matches('.');
    let prefix = if prefix.starts_with('.') {
        format!("0{}", prefix)
    } else {
        prefix.to_string()
    };
    prefix.parse::<f64>().ok()
}

/// Render a value with exactly one digit after the decimal point.
///
/// Rounds half away from zero on the shortest decimal form of `value`, so a
/// feed value of `4.35` renders as `4.4` even though the nearest `f64` is
/// slightly below it.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(one_decimal(4.0), "4.0");
/// assert_eq!(one_decimal(4.25), "4.3");
/// assert_eq!(one_decimal(9.96), "10.0");
/// ```
pub fn one_decimal(value: f64) -> String {
    if !value.is_finite() {
        return format!("{:.1}", value);
    }

    let repr = value.abs().to_string();
    let (int_part, frac_part) = repr.split_once('.').unwrap_or((repr.as_str(), ""));
    let mut frac = frac_part.bytes();

    // Integer digits followed by the tenths digit.
    let mut digits: Vec<u8> = int_part.bytes().collect();
    digits.push(frac.next().unwrap_or(b'0'));

    if frac.next().is_some_and(|d| d >= b'5') {
        let mut carry = true;
        for d in digits.iter_mut().rev() {
            if *d == b'9' {
                *d = b'0';
            } else {
                *d += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, b'1');
        }
    }

    let tenths = digits.pop().map(char::from).unwrap_or('0');
    let whole = String::from_utf8_lossy(&digits).into_owned();
    let sign = if value < 0.0 && (whole.bytes().any(|d| d != b'0') || tenths != '0') {
        "-"
    } else {
        ""
    };
    format!("{}{}.{}", sign, whole, tenths)
}

/// Collapse every run of whitespace to a single space and trim the ends.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(collapse_whitespace("  Gulf   of   Izmir "), "Gulf of Izmir");
/// ```
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut at the last character boundary at or below `max`
/// bytes, with an ellipsis and byte count indicator appended. Feed text is
/// Turkish, so the cut must never land inside a multi-byte character.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}

/// Ensure the parent directory of `path` exists and is writable.
///
/// Creates the directory if needed, then performs a write test by creating
/// and immediately deleting a probe file.
///
/// # Errors
///
/// Returns an error if:
/// - The directory cannot be created
/// - The directory is not writable (permission denied, read-only filesystem, etc.)
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn ensure_writable_parent(path: &Path) -> Result<(), Box<dyn Error>> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => Path::new(".").to_path_buf(),
    };

    fs::create_dir_all(&dir).await?;

    // Try a small sync write using std fs (simpler error surface)
    let probe_path = dir.join("..__probe_write__");
    match stdfs::File::create(&probe_path) {
        Ok(_) => {
            let _ = stdfs::remove_file(&probe_path);
            info!(dir = %dir.display(), "Output directory is writable");
            Ok(())
        }
        Err(e) => Err(Box::new(e)),
    }
}
