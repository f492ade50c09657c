use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use chrono::Utc;
use log::{info, warn};
use tauri::plugin::{Builder, TauriPlugin};
use tauri::{Emitter, Runtime, State, Window};
use tauri_plugin_dialog::{DialogExt, FilePath};

use crate::libs::constants::SUPPORTED_MEDIA_EXTENSIONS;
use crate::libs::error::{AnyResult, MedleyError};
use crate::libs::events::IPCEvent;
use crate::libs::media::{MediaRecord, NewMediaRecord};
use crate::libs::supabase::SupabaseClient;
use crate::libs::upload::{
    progress_percent, sanitize_file_name, storage_key, UploadFailure, UploadProgress, UploadReport,
};
use crate::libs::utils::TimeLogger;
use crate::plugins::config::BackendState;
use crate::plugins::playlist::{refresh_playlist, PlaylistState};

/// Open the native file picker, filtered to the supported media types
#[tauri::command]
pub async fn pick_media_files<R: Runtime>(window: Window<R>) -> AnyResult<Vec<PathBuf>> {
    let dialog = window.dialog().clone();

    let picked = tauri::async_runtime::spawn_blocking(move || {
        dialog
            .file()
            .add_filter("media", &SUPPORTED_MEDIA_EXTENSIONS)
            .blocking_pick_files()
    })
    .await?;

    let paths = picked
        .unwrap_or_default()
        .into_iter()
        .filter_map(|file_path| match file_path {
            // We don't support FilePath::Url
            FilePath::Path(path) => Some(path),
            _ => None,
        })
        .collect();

    Ok(paths)
}

/**
 * Upload one file: sanitize the name, upload the bytes under a
 * millisecond-stamped storage key, then insert the table row pointing at
 * the public URL. The row keeps the original (unsanitized) name as its
 * display label and the storage key for later deletion.
 */
async fn upload_one(client: &SupabaseClient, path: &Path) -> AnyResult<MediaRecord> {
    let name = path
        .file_name()
        .and_then(OsStr::to_str)
        .ok_or_else(|| MedleyError::Path(format!("{:?}", path)))?;

    let key = storage_key(&sanitize_file_name(name), Utc::now().timestamp_millis());
    let media_type = mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string();

    let bytes = tokio::fs::read(path).await?;
    client.upload_object(&key, bytes, &media_type).await?;

    let url = client.public_url(&key);
    client
        .insert_record(&NewMediaRecord {
            name: name.to_string(),
            url,
            media_type,
            path: Some(key),
        })
        .await
}

/**
 * Upload a batch of files, strictly one at a time. A failing file is
 * recorded in the report and the batch continues with the remaining files;
 * progress counts attempted files, so it is non-decreasing and always ends
 * at 100. The playlist snapshot is re-fetched once the batch is done.
 */
#[tauri::command]
pub async fn upload_files<R: Runtime>(
    window: Window<R>,
    backend_state: State<'_, BackendState>,
    playlist_state: State<'_, PlaylistState>,
    paths: Vec<PathBuf>,
) -> AnyResult<UploadReport> {
    let client = backend_state.client().await?;
    let total = paths.len();

    info!("Uploading {} file(s)", total);
    let timer = TimeLogger::new(format!("Uploaded batch of {} file(s)", total));

    let mut report = UploadReport::default();

    for (index, path) in paths.iter().enumerate() {
        match upload_one(&client, path).await {
            Ok(record) => {
                info!(
                    "Uploaded {:?} as record {} ({})",
                    record.name,
                    record.id,
                    record.kind()
                );
                report.uploaded += 1;
            }
            Err(err) => {
                let name = path
                    .file_name()
                    .and_then(OsStr::to_str)
                    .unwrap_or("<unnamed>")
                    .to_string();
                warn!("Failed to upload {:?}: {}", name, err);
                report.failures.push(UploadFailure {
                    name,
                    error: err.to_string(),
                });
            }
        }

        let attempted = index + 1;
        let progress = UploadProgress {
            current: attempted,
            total,
            percent: progress_percent(attempted, total),
        };
        if let Err(err) = window.emit(IPCEvent::UploadProgress.as_ref(), &progress) {
            warn!("Could not emit upload progress: {}", err);
        }
    }

    timer.complete();

    // Refresh the snapshot so the new rows show up; a failure here does not
    // invalidate the report, the uploads already happened.
    if let Err(err) = refresh_playlist(&window, &backend_state, &playlist_state).await {
        warn!("Could not refresh the playlist after the batch: {}", err);
    }

    Ok(report)
}

/// Initialize the upload plugin
pub fn init<R: Runtime>() -> TauriPlugin<R> {
    Builder::<R>::new("upload")
        .invoke_handler(tauri::generate_handler![pick_media_files, upload_files])
        .build()
}
