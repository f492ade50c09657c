// Prevents additional console window on Windows in release, DO NOT REMOVE!!
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod libs;
mod plugins;

use log::LevelFilter;
use tauri_plugin_log::{Target, TargetKind};

fn main() {
    let log_plugin = tauri_plugin_log::Builder::default()
        .level(if cfg!(debug_assertions) {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .targets([
            Target::new(TargetKind::Stdout),
            Target::new(TargetKind::LogDir { file_name: None }),
        ])
        .build();

    tauri::Builder::default()
        .plugin(log_plugin)
        .plugin(tauri_plugin_dialog::init())
        .plugin(tauri_plugin_opener::init())
        .plugin(plugins::config::init())
        .plugin(plugins::playlist::init())
        .plugin(plugins::upload::init())
        .plugin(plugins::player::init())
        .run(tauri::tauri_build_context!())
        .expect("error while running tauri application");
}
