use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::libs::constants::STORAGE_KEY_PREFIX;

/**
 * Replace every character outside [A-Za-z0-9.\-_] with an underscore so
 * the name can be embedded in a storage key without escaping. The mapping
 * is 1:1, the sanitized name always has the same length as the input.
 */
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/**
 * Build the storage key for an upload: uploads/<epoch-millis>-<sanitized>.
 * Two files sanitizing to the same name within the same millisecond will
 * collide, which we accept (last write wins on the bucket side).
 */
pub fn storage_key(sanitized_name: &str, timestamp_ms: i64) -> String {
    format!("{}/{}-{}", STORAGE_KEY_PREFIX, timestamp_ms, sanitized_name)
}

/**
 * Whole-file progress: percentage of files attempted so far. There is no
 * byte-level progress within a single file.
 */
pub fn progress_percent(attempted: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    (100.0 * attempted as f64 / total as f64).round() as u8
}

/// Progress information for an upload batch, emitted after each file
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../generated/typings/index.ts")]
pub struct UploadProgress {
    pub current: usize,
    pub total: usize,
    pub percent: u8,
}

/// One file that could not be uploaded
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../generated/typings/index.ts")]
pub struct UploadFailure {
    pub name: String,
    pub error: String,
}

/// Result of an upload batch
#[derive(Default, Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../generated/typings/index.ts")]
pub struct UploadReport {
    pub uploaded: usize,
    pub failures: Vec<UploadFailure>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_keeps_allowed_characters() {
        assert_eq!(sanitize_file_name("song.mp3"), "song.mp3");
        assert_eq!(sanitize_file_name("My-Track_01.flac"), "My-Track_01.flac");
    }

    #[test]
    fn test_sanitize_replaces_each_disallowed_character() {
        assert_eq!(sanitize_file_name("clip 1.mp4"), "clip_1.mp4");
        assert_eq!(sanitize_file_name("été (live)!.ogg"), "_t___live__.ogg");
        // 1:1 mapping, length is preserved
        let name = "a b/c\\d:e*f?.wav";
        assert_eq!(sanitize_file_name(name).chars().count(), name.chars().count());
        assert!(sanitize_file_name(name)
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_'));
    }

    #[test]
    fn test_storage_keys_differ_across_milliseconds() {
        let first = storage_key("song.mp3", 1700000000000);
        let second = storage_key("song.mp3", 1700000000001);
        assert_ne!(first, second);
        assert!(first.starts_with("uploads/"));
    }

    #[test]
    fn test_progress_sequence_is_monotonic_and_ends_at_100() {
        let total = 3;
        let observed: Vec<u8> = (1..=total).map(|i| progress_percent(i, total)).collect();
        assert_eq!(observed, vec![33, 67, 100]);
        assert!(observed.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn test_progress_with_empty_batch() {
        assert_eq!(progress_percent(0, 0), 100);
    }

    #[test]
    fn test_two_file_batch_scenario() {
        // spec scenario: ["song.mp3", "clip 1.mp4"] uploaded one millisecond apart
        let first = storage_key(&sanitize_file_name("song.mp3"), 1700000000000);
        let second = storage_key(&sanitize_file_name("clip 1.mp4"), 1700000000001);
        assert_eq!(first, "uploads/1700000000000-song.mp3");
        assert_eq!(second, "uploads/1700000000001-clip_1.mp4");
        assert_eq!(progress_percent(2, 2), 100);
    }
}
