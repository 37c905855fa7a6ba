use std::path::Path;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Name of the storage backend, matched case-insensitively by the registry.
    pub backend: String,
    /// Root directory for the local storage backend.
    pub root: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AudioConfig {
    /// Name of the audio-source backend, matched case-insensitively.
    pub backend: String,
    /// Audio container format used for cached files (e.g. "m4a").
    pub cache_format: String,
    /// External downloader invoked by the youtube backend.
    pub command: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalyserConfig {
    /// Name of the analyser backend, matched case-insensitively.
    pub backend: String,
    pub client_id: String,
    pub client_secret: String,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ApiConfig {
    /// API modules to leave unmounted, by module name.
    #[serde(default)]
    pub disabled: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    /// Directory served as static fallback for non-API requests.
    pub root: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub audio: AudioConfig,
    pub analyser: AnalyserConfig,
    #[serde(default)]
    pub api: ApiConfig,
    pub web: WebConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        // Fallback: parse the embedded default TOML
        let defaults: &str = include_str!("../config/default.toml");
        match ::config::Config::builder()
            .add_source(::config::File::from_str(defaults, ::config::FileFormat::Toml))
            .build()
        {
            Ok(cfg) => match cfg.try_deserialize() {
                Ok(app_cfg) => app_cfg,
                Err(e) => {
                    eprintln!("FATAL: Failed to deserialize default config: {}", e);
                    panic!("Failed to deserialize default config: {}", e);
                }
            },
            Err(e) => {
                eprintln!("FATAL: Failed to parse default config: {}", e);
                panic!("Failed to parse default config: {}", e);
            }
        }
    }
}

/// Loads the application configuration.
///
/// Layering, lowest precedence first: embedded defaults, the first on-disk
/// config file found (`dauerschleife.toml`, else `dauerschleife.yaml`), an
/// optional file named by `DAUERSCHLEIFE_CONFIG`, then `DAUERSCHLEIFE__*`
/// environment variables. Absent files degrade to defaults; a present but
/// malformed file is a fatal error.
pub fn load() -> anyhow::Result<AppConfig> {
    // Load .env first (optional)
    let _ = dotenvy::dotenv();

    let defaults: &str = include_str!("../config/default.toml");
    let mut builder = ::config::Config::builder()
        .add_source(::config::File::from_str(defaults, ::config::FileFormat::Toml));

    // Erste gefundene Datei gewinnt: TOML vor YAML
    if Path::new("dauerschleife.toml").is_file() {
        builder = builder.add_source(::config::File::new("dauerschleife.toml", ::config::FileFormat::Toml));
    } else if Path::new("dauerschleife.yaml").is_file() {
        builder = builder.add_source(::config::File::new("dauerschleife.yaml", ::config::FileFormat::Yaml));
    }

    if let Ok(custom_path) = std::env::var("DAUERSCHLEIFE_CONFIG") {
        builder = builder.add_source(::config::File::with_name(&custom_path).required(false));
    }
    // Environment variables last to have highest precedence
    builder = builder.add_source(::config::Environment::with_prefix("DAUERSCHLEIFE").separator("__"));

    let cfg = builder.build()?;
    let app_cfg: AppConfig = cfg.try_deserialize()?;
    validate(&app_cfg)?;
    Ok(app_cfg)
}

fn validate(cfg: &AppConfig) -> anyhow::Result<()> {
    // Server
    if cfg.server.port == 0 {
        return Err(anyhow::anyhow!("invalid server.port: {}", cfg.server.port));
    }
    // Warn for privileged ports on Unix-like systems
    #[cfg(unix)]
    if cfg.server.port < 1024 {
        tracing::warn!("Using privileged port {} - may require elevated permissions", cfg.server.port);
    }

    // Storage
    if cfg.storage.root.trim().is_empty() {
        return Err(anyhow::anyhow!("storage.root must not be empty"));
    }

    // Audio
    if cfg.audio.cache_format.trim().is_empty() {
        return Err(anyhow::anyhow!("audio.cache_format must not be empty"));
    }
    if cfg.audio.command.trim().is_empty() {
        return Err(anyhow::anyhow!("audio.command must not be empty"));
    }

    // Web
    if cfg.web.root.trim().is_empty() {
        return Err(anyhow::anyhow!("web.root must not be empty"));
    }

    Ok(())
}
