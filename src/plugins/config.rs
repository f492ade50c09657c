use std::path::PathBuf;
use std::sync::RwLock;

use home_config::HomeConfig;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use tauri::plugin::{Builder, TauriPlugin};
use tauri::{Manager, Runtime, State};
use ts_rs::TS;

use crate::libs::error::{AnyResult, MedleyError};
use crate::libs::supabase::SupabaseClient;

/**
 * The persisted part of the configuration. The environment variables
 * SUPABASE_URL / SUPABASE_ANON_KEY take precedence over both fields, so a
 * deployment can ship credentials without touching the config file.
 */
#[derive(Default, Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../generated/typings/index.ts")]
pub struct Config {
    pub supabase_url: String,
    pub supabase_anon_key: String,
}

/**
 * Outcome of a credentials check. Returned as data instead of an error so
 * the frontend can render a recoverable configuration screen instead of
 * crashing at startup.
 */
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../generated/typings/index.ts")]
pub struct CredentialsStatus {
    pub ready: bool,
    pub missing_url: bool,
    pub missing_anon_key: bool,
}

/// Credentials after the env-var override has been applied
#[derive(Debug, Clone)]
pub struct SupabaseCredentials {
    pub url: String,
    pub anon_key: String,
}

impl SupabaseCredentials {
    pub fn status(&self) -> CredentialsStatus {
        let missing_url = self.url.trim().is_empty();
        let missing_anon_key = self.anon_key.trim().is_empty();
        CredentialsStatus {
            ready: !missing_url && !missing_anon_key,
            missing_url,
            missing_anon_key,
        }
    }
}

pub fn get_storage_dir() -> PathBuf {
    let path = dirs::config_dir().expect("Could not resolve the config directory");
    path.join("medley")
}

pub struct ConfigManager {
    manager: HomeConfig,
    data: RwLock<Config>,
}

impl ConfigManager {
    pub fn get(&self) -> AnyResult<Config> {
        let data = self
            .data
            .read()
            .map_err(|_| MedleyError::Config("config lock poisoned".into()))?;
        Ok(data.clone())
    }

    pub fn update(&self, config: Config) -> AnyResult<()> {
        self.manager
            .save_toml(&config)
            .map_err(|err| MedleyError::Config(format!("{err:?}")))?;

        let mut data = self
            .data
            .write()
            .map_err(|_| MedleyError::Config("config lock poisoned".into()))?;
        *data = config;
        Ok(())
    }

    /**
     * Resolve the effective credentials: environment first, config file
     * second.
     */
    pub fn credentials(&self) -> AnyResult<SupabaseCredentials> {
        let config = self.get()?;
        Ok(SupabaseCredentials {
            url: std::env::var("SUPABASE_URL").unwrap_or(config.supabase_url),
            anon_key: std::env::var("SUPABASE_ANON_KEY").unwrap_or(config.supabase_anon_key),
        })
    }
}

/**
 * The Supabase client slot, empty until valid credentials are available.
 * Commands that need the backend go through `client()` and get a typed
 * "not configured" error when the slot is empty.
 */
pub struct BackendState {
    client: tokio::sync::RwLock<Option<SupabaseClient>>,
}

impl BackendState {
    pub fn new(client: Option<SupabaseClient>) -> Self {
        Self {
            client: tokio::sync::RwLock::new(client),
        }
    }

    pub async fn client(&self) -> AnyResult<SupabaseClient> {
        self.client
            .read()
            .await
            .clone()
            .ok_or(MedleyError::NotConfigured)
    }

    pub async fn replace(&self, client: Option<SupabaseClient>) {
        *self.client.write().await = client;
    }
}

fn setup() -> AnyResult<ConfigManager> {
    let config_path = get_storage_dir().join("config.toml");
    info!("Loading configuration from {:?}", config_path);

    let manager = HomeConfig::with_file(config_path);

    let existing: Option<Config> = manager.toml().ok();
    let config = match existing {
        Some(config) => config,
        None => {
            let config = Config::default();
            manager
                .save_toml(&config)
                .map_err(|err| MedleyError::Config(format!("{err:?}")))?;
            config
        }
    };

    Ok(ConfigManager {
        manager,
        data: RwLock::new(config),
    })
}

/// Get the full configuration (without the env-var override applied)
#[tauri::command]
pub async fn get_config(config_manager: State<'_, ConfigManager>) -> AnyResult<Config> {
    config_manager.get()
}

/// Persist a new configuration and rebuild the Supabase client from it
#[tauri::command]
pub async fn set_config(
    config_manager: State<'_, ConfigManager>,
    backend_state: State<'_, BackendState>,
    config: Config,
) -> AnyResult<CredentialsStatus> {
    config_manager.update(config)?;

    let credentials = config_manager.credentials()?;
    let status = credentials.status();

    if status.ready {
        let client = SupabaseClient::new(&credentials.url, &credentials.anon_key)?;
        backend_state.replace(Some(client)).await;
        info!("Supabase client (re)initialized");
    } else {
        backend_state.replace(None).await;
        warn!("Supabase credentials incomplete, backend disabled");
    }

    Ok(status)
}

/// Check whether the app is ready to talk to Supabase
#[tauri::command]
pub async fn check_credentials(
    config_manager: State<'_, ConfigManager>,
) -> AnyResult<CredentialsStatus> {
    Ok(config_manager.credentials()?.status())
}

/**
 * Initialize the config plugin. Also owns the Supabase client slot, which
 * other plugins reach through `BackendState`.
 */
pub fn init<R: Runtime>() -> TauriPlugin<R> {
    Builder::<R>::new("config")
        .invoke_handler(tauri::generate_handler![
            get_config,
            set_config,
            check_credentials,
        ])
        .setup(move |app_handle, _api| {
            let config_manager = setup()?;

            let client = match config_manager.credentials() {
                Ok(credentials) if credentials.status().ready => {
                    match SupabaseClient::new(&credentials.url, &credentials.anon_key) {
                        Ok(client) => Some(client),
                        Err(err) => {
                            warn!("Could not build the Supabase client: {}", err);
                            None
                        }
                    }
                }
                _ => {
                    warn!("Supabase credentials are not set, waiting for configuration");
                    None
                }
            };

            app_handle.manage(config_manager);
            app_handle.manage(BackendState::new(client));
            Ok(())
        })
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_flags_missing_values() {
        let credentials = SupabaseCredentials {
            url: String::new(),
            anon_key: "anon-key".to_string(),
        };
        let status = credentials.status();
        assert!(!status.ready);
        assert!(status.missing_url);
        assert!(!status.missing_anon_key);
    }

    #[test]
    fn test_status_ready_when_both_set() {
        let credentials = SupabaseCredentials {
            url: "https://example.supabase.co".to_string(),
            anon_key: "anon-key".to_string(),
        };
        assert!(credentials.status().ready);
    }
}
