//! Utility functions for torrent operations

use std::collections::HashMap;

/// Extension of a file name without the dot, or an empty string
pub fn file_ext(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(i) => &file_name[i + 1..],
        None => "",
    }
}

/// Most frequent extension among the given file names
///
/// Ties are broken by first appearance so the result is stable for a
/// given file order.
pub fn most_common_ext<'a, I>(names: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();

    for name in names {
        let ext = file_ext(name);
        let count = counts.entry(ext).or_insert(0);
        if *count == 0 {
            order.push(ext);
        }
        *count += 1;
    }

    let mut best = "";
    let mut best_count = 0;
    for ext in order {
        let count = counts[ext];
        if count > best_count {
            best = ext;
            best_count = count;
        }
    }
    best.to_string()
}

/// Unix timestamp used as a cache-busting query parameter
pub fn timestamp() -> String {
    chrono::Utc::now().timestamp().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_ext() {
        assert_eq!(file_ext("movie.mkv"), "mkv");
        assert_eq!(file_ext("archive.tar.gz"), "gz");
        assert_eq!(file_ext("README"), "");
        assert_eq!(file_ext("dir/track.MP3"), "MP3");
        assert_eq!(file_ext("trailing."), "");
    }

    #[test]
    fn test_most_common_ext() {
        let names = ["a.mp3", "b.mp3", "cover.jpg", "c.mp3"];
        assert_eq!(most_common_ext(names), "mp3");

        // Ties go to the first extension seen
        let names = ["a.nfo", "b.mkv"];
        assert_eq!(most_common_ext(names), "nfo");

        let empty: [&str; 0] = [];
        assert_eq!(most_common_ext(empty), "");
    }

    #[test]
    fn test_timestamp_is_numeric() {
        assert!(timestamp().parse::<i64>().is_ok());
    }
}
