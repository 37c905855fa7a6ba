#[cfg(test)]
mod tests {
    use crate::config::{self, AppConfig};
    use std::env;
    use std::fs;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 11037);
        assert_eq!(config.storage.backend, "local");
        assert_eq!(config.storage.root, "data");
        assert_eq!(config.audio.backend, "youtube");
        assert_eq!(config.audio.cache_format, "m4a");
        assert_eq!(config.audio.command, "yt-dlp");
        assert_eq!(config.analyser.backend, "spotify");
        assert!(config.api.disabled.is_empty());
        assert_eq!(config.web.root, "web");
    }

    // All load() scenarios in one test: load() reads the process environment,
    // so these steps must not run in parallel with each other.
    #[test]
    fn test_load_sources() {
        // No config file anywhere -> the all-default record
        let config = config::load().unwrap();
        assert_eq!(config.server.port, 11037);
        assert_eq!(config.storage.backend, "local");
        assert!(config.api.disabled.is_empty());

        // Minimal file setting only the port -> that port, everything else default
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("minimal.toml");
        fs::write(&path, "[server]\nport = 9000\n").unwrap();
        env::set_var("DAUERSCHLEIFE_CONFIG", path.to_str().unwrap());

        let config = config::load().unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.storage.backend, "local");
        assert_eq!(config.audio.backend, "youtube");
        assert!(config.api.disabled.is_empty());

        env::remove_var("DAUERSCHLEIFE_CONFIG");

        // Disabled modules from a config file
        let path = dir.path().join("disabled.toml");
        fs::write(&path, "[api]\ndisabled = [\"audio\", \"site\"]\n").unwrap();
        env::set_var("DAUERSCHLEIFE_CONFIG", path.to_str().unwrap());

        let config = config::load().unwrap();
        assert_eq!(config.api.disabled, vec!["audio".to_string(), "site".to_string()]);

        env::remove_var("DAUERSCHLEIFE_CONFIG");

        // Invalid port is rejected
        env::set_var("DAUERSCHLEIFE__SERVER__PORT", "0");
        let result = config::load();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("invalid server.port"));
        env::remove_var("DAUERSCHLEIFE__SERVER__PORT");
    }

    #[test]
    fn test_malformed_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "[server\nport = oops").unwrap();

        let defaults: &str = include_str!("../../config/default.toml");
        let result = ::config::Config::builder()
            .add_source(::config::File::from_str(defaults, ::config::FileFormat::Toml))
            .add_source(::config::File::new(path.to_str().unwrap(), ::config::FileFormat::Toml))
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let toml = r#"
[server]
host = "127.0.0.1"
port = 8080
frobnicate = true

[storage]
backend = "local"
root = "data"

[audio]
backend = "youtube"
cache_format = "m4a"
command = "yt-dlp"

[analyser]
backend = "spotify"
client_id = ""
client_secret = ""

[web]
root = "web"
"#;
        let cfg = ::config::Config::builder()
            .add_source(::config::File::from_str(toml, ::config::FileFormat::Toml))
            .build()
            .unwrap();
        let app_cfg: AppConfig = cfg.try_deserialize().unwrap();
        assert_eq!(app_cfg.server.port, 8080);
    }
}
