use log::{info, warn};
use tauri::plugin::{Builder, TauriPlugin};
use tauri::{Emitter, Manager, Runtime, State, Window};
use tokio::sync::Mutex;

use crate::libs::error::AnyResult;
use crate::libs::events::IPCEvent;
use crate::libs::media::MediaRecord;
use crate::libs::utils::TimeLogger;
use crate::plugins::config::BackendState;

/**
 * Point-in-time snapshot of the hosted playlist table, newest first. Only
 * replaced after a successful fetch: a failing fetch leaves the previous
 * snapshot untouched so the UI never regresses to an empty list on a
 * transient error.
 */
pub struct PlaylistState(Mutex<Vec<MediaRecord>>);

impl PlaylistState {
    pub async fn snapshot(&self) -> Vec<MediaRecord> {
        self.0.lock().await.clone()
    }

    pub async fn replace(&self, records: Vec<MediaRecord>) {
        *self.0.lock().await = records;
    }
}

/**
 * Re-fetch the playlist from Supabase and refresh the snapshot. Used by
 * the command below and by the upload/delete flows after a mutation.
 */
pub async fn refresh_playlist<R: Runtime>(
    window: &Window<R>,
    backend_state: &BackendState,
    playlist_state: &PlaylistState,
) -> AnyResult<Vec<MediaRecord>> {
    let client = backend_state.client().await?;

    let timer = TimeLogger::new("Fetched playlist".into());
    let records = client.fetch_records().await?;
    timer.complete();

    info!("Playlist contains {} record(s)", records.len());
    playlist_state.replace(records.clone()).await;

    if let Err(err) = window.emit(IPCEvent::PlaylistRefreshed.as_ref(), &records) {
        warn!("Could not notify the webview about the refresh: {}", err);
    }

    Ok(records)
}

/// Fetch all records ordered by uploaded_at descending
#[tauri::command]
pub async fn get_playlist<R: Runtime>(
    window: Window<R>,
    backend_state: State<'_, BackendState>,
    playlist_state: State<'_, PlaylistState>,
) -> AnyResult<Vec<MediaRecord>> {
    refresh_playlist(&window, &backend_state, &playlist_state).await
}

/// Return the last successfully fetched snapshot, without a network call
#[tauri::command]
pub async fn get_cached_playlist(
    playlist_state: State<'_, PlaylistState>,
) -> AnyResult<Vec<MediaRecord>> {
    Ok(playlist_state.snapshot().await)
}

/**
 * Delete one record: the table row first, then the stored object. Removing
 * the row first means a partial failure can orphan an object in the bucket
 * but can never leave a visible row pointing at deleted bytes. Records
 * without a storage key only get the row removal.
 */
#[tauri::command]
pub async fn delete_media<R: Runtime>(
    window: Window<R>,
    backend_state: State<'_, BackendState>,
    playlist_state: State<'_, PlaylistState>,
    record: MediaRecord,
) -> AnyResult<Vec<MediaRecord>> {
    let client = backend_state.client().await?;

    info!("Deleting record {} ({:?})", record.id, record.name);
    client.delete_record(record.id).await?;

    match record.object_key() {
        Some(key) => {
            if let Err(err) = client.remove_object(key).await {
                // The row is already gone, the object is merely orphaned
                warn!("Row {} deleted but object {:?} was not: {}", record.id, key, err);
            }
        }
        None => info!("Record {} carries no storage key, row removal only", record.id),
    }

    refresh_playlist(&window, &backend_state, &playlist_state).await
}

/// Initialize the playlist plugin
pub fn init<R: Runtime>() -> TauriPlugin<R> {
    Builder::<R>::new("playlist")
        .invoke_handler(tauri::generate_handler![
            get_playlist,
            get_cached_playlist,
            delete_media,
        ])
        .setup(move |app_handle, _api| {
            app_handle.manage(PlaylistState(Mutex::new(Vec::new())));
            Ok(())
        })
        .build()
}
