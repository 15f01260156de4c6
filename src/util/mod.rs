//
//  klog-sdk
//  util/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Formatting helpers for the `klog` binary.

use std::path::Path;

use chrono::DateTime;

/// Truncates a string to at most `max_len` characters, appending `...` when
/// something was cut.
///
/// # Example
///
/// ```rust
/// use klog_sdk::util::truncate;
///
/// assert_eq!(truncate("hello", 10), "hello");
/// assert_eq!(truncate("hello world", 8), "hello...");
/// ```
///
/// # Notes
///
/// - Counts characters, not bytes, so multi-byte text is never split.
/// - When `max_len` is 3 or less the string is cut without an ellipsis.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len > 3 {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{kept}...")
    } else {
        s.chars().take(max_len).collect()
    }
}

/// Formats a byte count with binary units.
///
/// ```rust
/// use klog_sdk::util::format_size;
///
/// assert_eq!(format_size(500), "500 B");
/// assert_eq!(format_size(1536), "1.5 KB");
/// ```
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}

/// Formats an RFC 3339 timestamp as `YYYY-MM-DD HH:MM`.
///
/// Anything that does not parse is returned unchanged.
///
/// ```rust
/// use klog_sdk::util::format_date;
///
/// assert_eq!(format_date("2024-01-02T03:04:05Z"), "2024-01-02 03:04");
/// assert_eq!(format_date("yesterday"), "yesterday");
/// ```
pub fn format_date(timestamp: &str) -> String {
    DateTime::parse_from_rfc3339(timestamp)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|_| timestamp.to_string())
}

/// Guesses a MIME type from the file extension.
///
/// Unknown or missing extensions map to `application/octet-stream`.
pub fn guess_mime_type(path: &Path) -> String {
    mime_guess::from_path(path).first_or_octet_stream().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
        assert_eq!(truncate("héllo wörld", 8), "héllo...");
        assert_eq!(truncate("short", 3), "sho");
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(500), "500 B");
        assert_eq!(format_size(1024), "1.0 KB");
        assert_eq!(format_size(1048576), "1.0 MB");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-01-02T03:04:05Z"), "2024-01-02 03:04");
        assert_eq!(format_date("2024-01-02T03:04:05+02:00"), "2024-01-02 03:04");
        assert_eq!(format_date("2024-01-02"), "2024-01-02");
    }

    #[test]
    fn test_guess_mime_type() {
        assert_eq!(guess_mime_type(Path::new("cover.PNG")), "image/png");
        assert_eq!(guess_mime_type(Path::new("page.html")), "text/html");
        assert_eq!(guess_mime_type(Path::new("song.mp3")), "audio/mpeg");
        assert_eq!(guess_mime_type(Path::new("data.json")), "application/json");
        assert_eq!(guess_mime_type(Path::new("archive.zip")), "application/zip");
        assert_eq!(guess_mime_type(Path::new("doc.css")), "text/css");
        assert_eq!(guess_mime_type(Path::new("notes")), "application/octet-stream");
    }
}
