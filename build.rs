fn main() {
    // Build the app
    tauri_build::try_build(
        tauri_build::Attributes::new()
            .codegen(tauri_build::CodegenContext::new())
            .plugin(
                "config",
                tauri_build::InlinedPlugin::new().commands(&[
                    "get_config",
                    "set_config",
                    "check_credentials",
                ]),
            )
            .plugin(
                "playlist",
                tauri_build::InlinedPlugin::new().commands(&[
                    "get_playlist",
                    "get_cached_playlist",
                    "delete_media",
                ]),
            )
            .plugin(
                "upload",
                tauri_build::InlinedPlugin::new().commands(&[
                    "pick_media_files",
                    "upload_files",
                ]),
            )
            .plugin(
                "player",
                tauri_build::InlinedPlugin::new().commands(&[
                    "get_playback_state",
                    "select_track",
                    "mark_playing",
                    "toggle_playback",
                    "stop_playback",
                ]),
            ),
    )
    .expect("Failed to run tauri-build");
}
