// Supabase-related constants

// KEEP THAT IN SYNC with the accepted file types in the upload view
pub const SUPPORTED_MEDIA_EXTENSIONS: [&str; 12] = [
    "mp3", "aac", "m4a", "wav", /* mp3 / mp4 */
    "ogg", "opus", /* Opus */
    "flac", /* Flac */
    "weba", /* Web media */
    "mp4", "webm", "mov", "mkv", /* Video */
];

// Fixed names on the Supabase side. The endpoint URL and the anon key are
// the only configurable values (see the config plugin).
pub const MEDIA_BUCKET: &str = "media";
pub const PLAYLIST_TABLE: &str = "playlist";

// Every uploaded object lives under this prefix in the bucket
pub const STORAGE_KEY_PREFIX: &str = "uploads";
