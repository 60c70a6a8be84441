use serde::Deserialize;

/// Top-level configuration settings for the application.
///
/// Includes settings for both the HTTP server and message storage.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub storage: StorageSettings,
}

/// Configuration settings for the server.
///
/// Defines the host and port the server will bind to.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

/// Configuration settings for message storage.
///
/// Defines the directory the embedded database keeps its files in.
#[derive(Debug, Deserialize, Clone)]
pub struct StorageSettings {
    pub data_dir: String,
}

/// Partial configuration settings loaded from files or environment.
///
/// Allows partial specification of settings. Missing values can be filled using defaults.
#[derive(Debug, Deserialize)]
pub struct PartialSettings {
    pub server: Option<PartialServerSettings>,
    pub storage: Option<PartialStorageSettings>,
}

/// Partial server settings.
///
/// Used when loading server configuration from external sources with optional values.
#[derive(Debug, Deserialize)]
pub struct PartialServerSettings {
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// Partial storage settings.
///
/// Used for storage configuration from external sources with optional values.
#[derive(Debug, Deserialize)]
pub struct PartialStorageSettings {
    pub data_dir: Option<String>,
}

/// Provides default values for `Settings`.
///
/// Ensures the application has sensible defaults if no configuration is provided.
impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            storage: StorageSettings {
                data_dir: "data".to_string(),
            },
        }
    }
}
