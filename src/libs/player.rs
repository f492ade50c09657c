use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::libs::media::MediaRecord;

/**
 * Playback state machine over a single "current item" reference. The
 * webview owns the actual media element; it reports back via the player
 * plugin commands, and this enum is the single source of truth for what
 * is (or should be) playing.
 */
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "status", content = "track", rename_all = "snake_case")]
#[ts(export, export_to = "../generated/typings/index.ts")]
pub enum PlaybackState {
    /// No current item, the player is hidden/empty
    Idle,
    /// An item has been chosen, the media element is being mounted
    Selected(MediaRecord),
    Playing(MediaRecord),
    Paused(MediaRecord),
}

impl PlaybackState {
    pub fn current(&self) -> Option<&MediaRecord> {
        match self {
            PlaybackState::Idle => None,
            PlaybackState::Selected(track)
            | PlaybackState::Playing(track)
            | PlaybackState::Paused(track) => Some(track),
        }
    }

    /**
     * Choose a playlist entry. Selecting the item that is already current
     * clears the player (toggle-to-stop); selecting anything else switches
     * the current reference and restarts playback from scratch.
     */
    pub fn select(self, track: MediaRecord) -> Self {
        match self.current() {
            Some(current) if current.id == track.id => PlaybackState::Idle,
            _ => PlaybackState::Selected(track),
        }
    }

    /**
     * The media element reported that playback actually started.
     */
    pub fn mark_playing(self) -> Self {
        match self {
            PlaybackState::Idle => PlaybackState::Idle,
            PlaybackState::Selected(track)
            | PlaybackState::Playing(track)
            | PlaybackState::Paused(track) => PlaybackState::Playing(track),
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            PlaybackState::Idle => PlaybackState::Idle,
            PlaybackState::Playing(track) => PlaybackState::Paused(track),
            PlaybackState::Selected(track) | PlaybackState::Paused(track) => {
                PlaybackState::Playing(track)
            }
        }
    }

    pub fn stop(self) -> Self {
        PlaybackState::Idle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(id: i64) -> MediaRecord {
        MediaRecord {
            id,
            name: format!("track-{}.mp3", id),
            url: format!(
                "https://example.supabase.co/storage/v1/object/public/media/uploads/{}-track.mp3",
                id
            ),
            media_type: "audio/mpeg".to_string(),
            path: Some(format!("uploads/{}-track.mp3", id)),
            uploaded_at: chrono::DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
        }
    }

    #[test]
    fn test_select_from_idle() {
        let state = PlaybackState::Idle.select(track(1));
        assert_eq!(state.current().map(|t| t.id), Some(1));
        assert!(matches!(state, PlaybackState::Selected(_)));
    }

    #[test]
    fn test_select_same_item_clears_player() {
        let state = PlaybackState::Playing(track(1)).select(track(1));
        assert_eq!(state, PlaybackState::Idle);
    }

    #[test]
    fn test_select_other_item_switches_directly() {
        // A -> B without an intermediate Idle state
        let state = PlaybackState::Playing(track(1)).select(track(2));
        assert_eq!(state, PlaybackState::Selected(track(2)));
    }

    #[test]
    fn test_mark_playing_needs_a_current_item() {
        assert_eq!(PlaybackState::Idle.mark_playing(), PlaybackState::Idle);
        assert_eq!(
            PlaybackState::Selected(track(1)).mark_playing(),
            PlaybackState::Playing(track(1))
        );
    }

    #[test]
    fn test_toggle_play_pause() {
        let playing = PlaybackState::Paused(track(1)).toggle();
        assert_eq!(playing, PlaybackState::Playing(track(1)));
        assert_eq!(playing.toggle(), PlaybackState::Paused(track(1)));
        assert_eq!(PlaybackState::Idle.toggle(), PlaybackState::Idle);
    }

    #[test]
    fn test_stop_from_any_state() {
        assert_eq!(PlaybackState::Playing(track(1)).stop(), PlaybackState::Idle);
        assert_eq!(PlaybackState::Idle.stop(), PlaybackState::Idle);
    }
}
