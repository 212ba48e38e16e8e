//! Utility functions for formatting and parsing

use crate::constants::emoji;

/// Format file size in human-readable format
pub fn format_bytes(bytes: i64) -> String {
    const UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let sign = if bytes < 0 { "-" } else { "" };
    let bytes = bytes.unsigned_abs() as f64;
    let unit_index = (bytes.ln() / 1024_f64.ln()).floor() as usize;
    let unit_index = unit_index.min(UNITS.len() - 1);

    let size = bytes / 1024_f64.powi(unit_index as i32);

    format!("{}{:.2} {}", sign, size, UNITS[unit_index])
}

/// Format file size (u64) in human-readable format
pub fn format_size(bytes: u64) -> String {
    format_bytes(i64::try_from(bytes).unwrap_or(i64::MAX))
}

/// Format a completion fraction as a percentage with one decimal
pub fn format_percent(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}

/// Icon for the dominant file extension of a torrent
pub fn ext_icon(ext: &str) -> &'static str {
    const VIDEO: [&str; 7] = ["avi", "mkv", "mp4", "m4v", "mov", "bdmv", "vob"];
    const MUSIC: [&str; 4] = ["mp3", "wav", "m3u", "ogg"];

    let ext = ext.to_ascii_lowercase();
    if VIDEO.contains(&ext.as_str()) {
        emoji::VIDEO
    } else if MUSIC.contains(&ext.as_str()) {
        emoji::MUSIC
    } else {
        emoji::FILE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(512), "512.00 B");
        assert_eq!(format_bytes(1024), "1.00 KB");
        assert_eq!(format_bytes(1536), "1.50 KB");
        assert_eq!(format_bytes(1048576), "1.00 MB");
        assert_eq!(format_bytes(1073741824), "1.00 GB");
        assert_eq!(format_bytes(1099511627776), "1.00 TB");
        assert_eq!(format_bytes(-2048), "-2.00 KB");
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(1024), "1.00 KB");
        assert_eq!(format_size(u64::MAX), format_bytes(i64::MAX));
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.0), "0.0%");
        assert_eq!(format_percent(0.5), "50.0%");
        assert_eq!(format_percent(0.1234), "12.3%");
        assert_eq!(format_percent(1.0), "100.0%");
    }

    #[test]
    fn test_ext_icon() {
        assert_eq!(ext_icon("mkv"), "🎬");
        assert_eq!(ext_icon("MP4"), "🎬");
        assert_eq!(ext_icon("ogg"), "🎧");
        assert_eq!(ext_icon("pdf"), "📄");
        assert_eq!(ext_icon(""), "📄");
    }
}
