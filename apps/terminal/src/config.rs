use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context;
use serde::Deserialize;

const DEFAULT_CONFIG_FILE: &str = "story_client.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_url: String,
    pub scroll_delay_ms: u64,
    pub catalog_path: Option<PathBuf>,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:5000".into(),
            scroll_delay_ms: 100,
            catalog_path: None,
            log_filter: "info".into(),
        }
    }
}

impl Settings {
    pub fn scroll_delay(&self) -> Duration {
        Duration::from_millis(self.scroll_delay_ms)
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    server_url: Option<String>,
    scroll_delay_ms: Option<u64>,
    catalog_path: Option<PathBuf>,
    log_filter: Option<String>,
}

/// Defaults, then the TOML file, then the process environment.
pub fn load_settings(config_path: Option<&Path>) -> anyhow::Result<Settings> {
    load_settings_with(config_path, |key| std::env::var(key).ok())
}

fn load_settings_with(
    config_path: Option<&Path>,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    let file_cfg = match config_path {
        Some(path) => Some(read_file_settings(path)?),
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
            Some(read_file_settings(Path::new(DEFAULT_CONFIG_FILE))?)
        }
        None => None,
    };

    if let Some(file_cfg) = file_cfg {
        if let Some(v) = file_cfg.server_url {
            settings.server_url = v;
        }
        if let Some(v) = file_cfg.scroll_delay_ms {
            settings.scroll_delay_ms = v;
        }
        if let Some(v) = file_cfg.catalog_path {
            settings.catalog_path = Some(v);
        }
        if let Some(v) = file_cfg.log_filter {
            settings.log_filter = v;
        }
    }

    if let Some(v) = env("STORY_SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = env("APP__SERVER_URL") {
        settings.server_url = v;
    }

    if let Some(v) = env("APP__SCROLL_DELAY_MS") {
        settings.scroll_delay_ms = v
            .parse()
            .with_context(|| format!("APP__SCROLL_DELAY_MS is not a number: '{v}'"))?;
    }

    if let Some(v) = env("APP__CATALOG_PATH") {
        settings.catalog_path = Some(PathBuf::from(v));
    }

    if let Some(v) = env("APP__LOG_FILTER") {
        settings.log_filter = v;
    }

    Ok(settings)
}

fn read_file_settings(path: &Path) -> anyhow::Result<FileSettings> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file '{}'", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("invalid config file '{}'", path.display()))
}

#[cfg(test)]
mod tests {
    use std::{
        collections::HashMap,
        env,
        time::{SystemTime, UNIX_EPOCH},
    };

    use super::*;

    fn temp_config(contents: &str) -> PathBuf {
        let suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        let path = env::temp_dir().join(format!("story_client_test_{suffix}.toml"));
        fs::write(&path, contents).expect("write config");
        path
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn defaults_point_at_local_backend() {
        let settings = Settings::default();
        assert_eq!(settings.server_url, "http://localhost:5000");
        assert_eq!(settings.scroll_delay(), Duration::from_millis(100));
        assert_eq!(settings.catalog_path, None);
    }

    #[test]
    fn file_values_override_defaults() {
        let path = temp_config(
            r#"
server_url = "http://story.internal:8080"
scroll_delay_ms = 40
catalog_path = "scenarios.json"
"#,
        );

        let settings = load_settings_with(Some(path.as_path()), no_env).expect("load");
        assert_eq!(settings.server_url, "http://story.internal:8080");
        assert_eq!(settings.scroll_delay_ms, 40);
        assert_eq!(settings.catalog_path, Some(PathBuf::from("scenarios.json")));
        assert_eq!(settings.log_filter, "info");

        fs::remove_file(path).expect("cleanup");
    }

    #[test]
    fn env_wins_over_file() {
        let path = temp_config(r#"server_url = "http://from-file:1""#);
        let vars = HashMap::from([
            ("STORY_SERVER_URL", "http://legacy:2"),
            ("APP__SERVER_URL", "http://from-env:3"),
            ("APP__LOG_FILTER", "debug"),
        ]);

        let settings = load_settings_with(Some(path.as_path()), |key| {
            vars.get(key).map(|v| v.to_string())
        })
        .expect("load");
        assert_eq!(settings.server_url, "http://from-env:3");
        assert_eq!(settings.log_filter, "debug");

        fs::remove_file(path).expect("cleanup");
    }

    #[test]
    fn bad_scroll_delay_is_reported() {
        let err = load_settings_with(None, |key| {
            (key == "APP__SCROLL_DELAY_MS").then(|| "soon".to_string())
        })
        .expect_err("must fail");
        assert!(err.to_string().contains("APP__SCROLL_DELAY_MS"));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let err = load_settings_with(Some(Path::new("/no/such/story_client.toml")), no_env)
            .expect_err("must fail");
        assert!(err.to_string().contains("failed to read config file"));
    }
}
