use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::Display;
use ts_rs::TS;

/**
 * MediaRecord
 * represents a single playable item, one row of the hosted playlist table
 */
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../generated/typings/index.ts")]
pub struct MediaRecord {
    pub id: i64,
    pub name: String,
    pub url: String,
    /// Full MIME type of the uploaded file, e.g. "audio/mpeg"
    #[serde(rename = "type")]
    pub media_type: String,
    /// Storage key of the uploaded object. Rows inserted by older clients
    /// may not carry one, in which case deletion only removes the row.
    pub path: Option<String>,
    pub uploaded_at: DateTime<Utc>,
}

impl MediaRecord {
    pub fn kind(&self) -> MediaKind {
        if self.media_type.starts_with("video") {
            MediaKind::Video
        } else {
            MediaKind::Audio
        }
    }

    /**
     * Storage key to remove when this record is deleted. Rows without a
     * key (or with a blank one) only get the row removal, no object call.
     */
    pub fn object_key(&self) -> Option<&str> {
        self.path.as_deref().filter(|key| !key.trim().is_empty())
    }
}

/**
 * Payload for inserting a new row. `id` and `uploaded_at` are assigned by
 * the backend.
 */
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../generated/typings/index.ts")]
pub struct NewMediaRecord {
    pub name: String,
    pub url: String,
    #[serde(rename = "type")]
    pub media_type: String,
    pub path: Option<String>,
}

/**
 * Which media element the frontend should target for playback
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, TS)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "../generated/typings/index.ts")]
pub enum MediaKind {
    Audio,
    Video,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(media_type: &str, path: Option<&str>) -> MediaRecord {
        MediaRecord {
            id: 1,
            name: "song.mp3".to_string(),
            url: "https://example.supabase.co/storage/v1/object/public/media/uploads/1-song.mp3"
                .to_string(),
            media_type: media_type.to_string(),
            path: path.map(ToString::to_string),
            uploaded_at: Utc::now(),
        }
    }

    #[test]
    fn test_media_kind_from_mime_prefix() {
        assert_eq!(record("audio/mpeg", None).kind(), MediaKind::Audio);
        assert_eq!(record("video/mp4", None).kind(), MediaKind::Video);
        // Anything that is not a video is played through the audio element
        assert_eq!(record("application/octet-stream", None).kind(), MediaKind::Audio);
    }

    #[test]
    fn test_record_deserializes_postgrest_row() {
        let row = r#"{
            "id": 42,
            "name": "clip 1.mp4",
            "url": "https://example.supabase.co/storage/v1/object/public/media/uploads/1700000000000-clip_1.mp4",
            "type": "video/mp4",
            "path": "uploads/1700000000000-clip_1.mp4",
            "uploaded_at": "2026-08-26T12:34:56.789+00:00"
        }"#;

        let record: MediaRecord = serde_json::from_str(row).unwrap();
        assert_eq!(record.id, 42);
        assert_eq!(record.name, "clip 1.mp4");
        assert_eq!(record.kind(), MediaKind::Video);
        assert_eq!(record.path.as_deref(), Some("uploads/1700000000000-clip_1.mp4"));
    }

    #[test]
    fn test_object_key_decides_what_deletion_removes() {
        // No storage key: only the table row is removed
        assert_eq!(record("audio/mpeg", None).object_key(), None);
        // A blank key counts as no key
        assert_eq!(record("audio/mpeg", Some("  ")).object_key(), None);
        assert_eq!(
            record("audio/mpeg", Some("uploads/1-song.mp3")).object_key(),
            Some("uploads/1-song.mp3")
        );
    }

    #[test]
    fn test_record_tolerates_missing_path() {
        // Rows created before the storage key was persisted
        let row = r#"{
            "id": 7,
            "name": "song.mp3",
            "url": "https://example.supabase.co/storage/v1/object/public/media/uploads/1-song.mp3",
            "type": "audio/mpeg",
            "path": null,
            "uploaded_at": "2026-08-26T12:34:56+00:00"
        }"#;

        let record: MediaRecord = serde_json::from_str(row).unwrap();
        assert!(record.path.is_none());
    }
}
