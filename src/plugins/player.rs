use log::warn;
use tauri::plugin::{Builder, TauriPlugin};
use tauri::{Emitter, Manager, Runtime, State, Window};
use tokio::sync::Mutex;

use crate::libs::error::AnyResult;
use crate::libs::events::IPCEvent;
use crate::libs::media::MediaRecord;
use crate::libs::player::PlaybackState;

/**
 * Single source of truth for what is playing. The webview mirrors this
 * state onto its media element and reports element-level transitions back
 * through the commands below.
 */
pub struct PlayerState(Mutex<PlaybackState>);

impl PlayerState {
    async fn transition<R: Runtime, F>(&self, window: &Window<R>, apply: F) -> PlaybackState
    where
        F: FnOnce(PlaybackState) -> PlaybackState,
    {
        let mut state = self.0.lock().await;
        *state = apply(state.clone());

        if let Err(err) = window.emit(IPCEvent::PlaybackChanged.as_ref(), &*state) {
            warn!("Could not emit playback change: {}", err);
        }

        state.clone()
    }
}

#[tauri::command]
pub async fn get_playback_state(player_state: State<'_, PlayerState>) -> AnyResult<PlaybackState> {
    Ok(player_state.0.lock().await.clone())
}

/**
 * Choose a playlist entry. Selecting the current item again clears the
 * player, anything else switches to it and restarts playback.
 */
#[tauri::command]
pub async fn select_track<R: Runtime>(
    window: Window<R>,
    player_state: State<'_, PlayerState>,
    track: MediaRecord,
) -> AnyResult<PlaybackState> {
    Ok(player_state
        .transition(&window, |state| state.select(track))
        .await)
}

/// The media element reported that playback actually started
#[tauri::command]
pub async fn mark_playing<R: Runtime>(
    window: Window<R>,
    player_state: State<'_, PlayerState>,
) -> AnyResult<PlaybackState> {
    Ok(player_state.transition(&window, PlaybackState::mark_playing).await)
}

/// Toggle between playing and paused; a no-op when the player is empty
#[tauri::command]
pub async fn toggle_playback<R: Runtime>(
    window: Window<R>,
    player_state: State<'_, PlayerState>,
) -> AnyResult<PlaybackState> {
    Ok(player_state.transition(&window, PlaybackState::toggle).await)
}

#[tauri::command]
pub async fn stop_playback<R: Runtime>(
    window: Window<R>,
    player_state: State<'_, PlayerState>,
) -> AnyResult<PlaybackState> {
    Ok(player_state.transition(&window, PlaybackState::stop).await)
}

/// Initialize the player plugin
pub fn init<R: Runtime>() -> TauriPlugin<R> {
    Builder::<R>::new("player")
        .invoke_handler(tauri::generate_handler![
            get_playback_state,
            select_track,
            mark_playing,
            toggle_playback,
            stop_playback,
        ])
        .setup(move |app_handle, _api| {
            app_handle.manage(PlayerState(Mutex::new(PlaybackState::Idle)));
            Ok(())
        })
        .build()
}
