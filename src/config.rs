use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::hackernews::HN_API_BASE;

const DEFAULT_ENV_PREFIX: &str = "CLX";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub ui: UIConfig,
    #[serde(default)]
    pub pager: PagerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            timeout: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    HN_API_BASE.to_string()
}

fn default_user_agent() -> String {
    format!("clx/{}", crate::VERSION)
}

fn default_timeout() -> Duration {
    Duration::from_secs(20)
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UIConfig {
    #[serde(default = "default_max_stories")]
    pub max_stories: usize,
}

impl Default for UIConfig {
    fn default() -> Self {
        Self {
            max_stories: default_max_stories(),
        }
    }
}

fn default_max_stories() -> usize {
    30
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PagerConfig {
    #[serde(default = "default_pager_command")]
    pub command: Vec<String>,
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            command: default_pager_command(),
        }
    }
}

fn default_pager_command() -> Vec<String> {
    vec!["less".into(), "-r".into()]
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_file")]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: default_log_file(),
        }
    }
}

fn default_log_file() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("clx").join("clx.log"))
}

#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    pub config_file: Option<PathBuf>,
    pub env_prefix: Option<String>,
}

pub fn load(options: LoadOptions) -> Result<Config> {
    let mut cfg = Config::default();

    if let Some(path) = options.config_file.as_ref() {
        if path.exists() {
            let from_file = read_config_file(path)?;
            cfg = merge_config(cfg, from_file);
        }
    } else if let Some(default_path) = default_config_path() {
        if default_path.exists() {
            let from_file = read_config_file(&default_path)?;
            cfg = merge_config(cfg, from_file);
        }
    }

    let prefix = options.env_prefix.as_deref().unwrap_or(DEFAULT_ENV_PREFIX);
    cfg = merge_env(cfg, prefix);

    Ok(cfg)
}

fn read_config_file(path: &Path) -> Result<Config> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file at {}", path.display()))?;
    let config: Config = serde_yaml::from_str(&data)
        .with_context(|| format!("Failed to parse config file at {}", path.display()))?;
    Ok(config)
}

fn merge_config(mut base: Config, other: Config) -> Config {
    if !other.api.base_url.is_empty() {
        base.api.base_url = other.api.base_url;
    }
    if !other.api.user_agent.is_empty() {
        base.api.user_agent = other.api.user_agent;
    }
    if !other.api.timeout.is_zero() {
        base.api.timeout = other.api.timeout;
    }

    if other.ui.max_stories != 0 {
        base.ui.max_stories = other.ui.max_stories;
    }

    if !other.pager.command.is_empty() {
        base.pager.command = other.pager.command;
    }

    if other.logging.file.is_some() {
        base.logging.file = other.logging.file;
    }

    base
}

fn merge_env(mut cfg: Config, prefix: &str) -> Config {
    let mut map: HashMap<String, String> = HashMap::new();
    let upper_prefix = format!("{}_", prefix.to_uppercase());

    for (key, value) in env::vars() {
        if let Some(stripped) = key.strip_prefix(&upper_prefix) {
            let normalized = stripped.to_ascii_lowercase().replace("__", ".");
            map.insert(normalized, value);
        }
    }

    for (key, value) in map {
        apply_env_value(&mut cfg, &key, value);
    }

    cfg
}

fn apply_env_value(cfg: &mut Config, key: &str, value: String) {
    match key {
        "api.base_url" => cfg.api.base_url = value,
        "api.user_agent" => cfg.api.user_agent = value,
        "api.timeout" => {
            if let Ok(duration) = humantime::parse_duration(&value) {
                cfg.api.timeout = duration;
            }
        }
        "ui.max_stories" => {
            if let Ok(parsed) = value.parse::<usize>() {
                if parsed > 0 {
                    cfg.ui.max_stories = parsed;
                }
            }
        }
        "pager.command" => {
            let command: Vec<String> = value.split_whitespace().map(str::to_string).collect();
            if !command.is_empty() {
                cfg.pager.command = command;
            }
        }
        "logging.file" => cfg.logging.file = Some(PathBuf::from(value)),
        _ => {}
    }
}

pub fn default_path() -> Option<PathBuf> {
    default_config_path()
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("clx").join("config.yaml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::tempdir;

    fn isolated(prefix: &str) -> LoadOptions {
        LoadOptions {
            config_file: Some(PathBuf::from("/nonexistent/clx/config.yaml")),
            env_prefix: Some(prefix.to_string()),
        }
    }

    #[test]
    fn load_defaults_without_files() {
        let cfg = load(isolated("CLX_TEST_DEFAULTS")).unwrap();
        assert_eq!(cfg.api.base_url, HN_API_BASE);
        assert_eq!(cfg.ui.max_stories, 30);
        assert_eq!(cfg.pager.command, vec!["less", "-r"]);
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(
            &path,
            "api:\n  base_url: http://localhost:9000\n  timeout: 5s\nui:\n  max_stories: 12\n",
        )
        .unwrap();

        let cfg = load(LoadOptions {
            config_file: Some(path),
            env_prefix: Some("CLX_TEST_FILE".into()),
        })
        .unwrap();
        assert_eq!(cfg.api.base_url, "http://localhost:9000");
        assert_eq!(cfg.api.timeout, Duration::from_secs(5));
        assert_eq!(cfg.ui.max_stories, 12);
        assert_eq!(cfg.pager.command, vec!["less", "-r"]);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "ui: [unclosed").unwrap();
        let result = load(LoadOptions {
            config_file: Some(path),
            env_prefix: Some("CLX_TEST_BAD".into()),
        });
        assert!(result.is_err());
    }

    #[test]
    fn env_overrides() {
        env::set_var("CLX_TEST_ENV_PAGER__COMMAND", "more -d");
        env::set_var("CLX_TEST_ENV_API__TIMEOUT", "3s");
        let cfg = load(isolated("CLX_TEST_ENV")).unwrap();
        assert_eq!(cfg.pager.command, vec!["more", "-d"]);
        assert_eq!(cfg.api.timeout, Duration::from_secs(3));
        env::remove_var("CLX_TEST_ENV_PAGER__COMMAND");
        env::remove_var("CLX_TEST_ENV_API__TIMEOUT");
    }
}
