use strum::AsRefStr;

/**
 * Events emitted to the webview. KEEP THAT IN SYNC with the frontend
 * listeners.
 */
#[derive(AsRefStr)]
pub enum IPCEvent {
    #[strum(serialize = "upload_progress")]
    UploadProgress,
    #[strum(serialize = "playlist_refreshed")]
    PlaylistRefreshed,
    #[strum(serialize = "playback_changed")]
    PlaybackChanged,
}
