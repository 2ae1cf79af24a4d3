use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// How to launch the weather MCP server subprocess.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Executable to run, e.g. "uvx".
    pub command: String,
    /// Arguments passed to the executable.
    pub args: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            command: "uvx".to_string(),
            args: vec![
                "--from".to_string(),
                "git+https://github.com/Zero-Hero-ing/Zero-Hero-ing.git".to_string(),
                "query_weather".to_string(),
            ],
        }
    }
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Example TOML:
    /// [server]
    /// command = "uvx"
    /// args = ["--from", "git+https://...", "query_weather"]
    #[serde(default)]
    pub server: ServerConfig,
}

impl Config {
    /// Load config from disk, writing the defaults on first run so the
    /// override file is discoverable.
    pub fn load_or_init() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            let cfg = Self::default();
            cfg.save()?;
            return Ok(cfg);
        }

        Self::load_from(&path)
    }

    fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, use defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-mcp", "weather-mcp")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_server_launch_is_uvx_invocation() {
        let cfg = Config::default();

        assert_eq!(cfg.server.command, "uvx");
        assert_eq!(cfg.server.args.len(), 3);
        assert_eq!(cfg.server.args[0], "--from");
        assert_eq!(cfg.server.args[2], "query_weather");
    }

    #[test]
    fn server_launch_is_overridable_from_toml() {
        let cfg: Config = toml::from_str(
            r#"
            [server]
            command = "python"
            args = ["-m", "query_weather"]
            "#,
        )
        .expect("config should parse");

        assert_eq!(cfg.server.command, "python");
        assert_eq!(cfg.server.args, vec!["-m", "query_weather"]);
    }

    #[test]
    fn empty_file_falls_back_to_default_server() {
        let cfg: Config = toml::from_str("").expect("empty config should parse");
        assert_eq!(cfg.server.command, "uvx");
    }

    #[test]
    fn config_round_trips_through_toml() {
        let cfg = Config::default();
        let serialized = toml::to_string_pretty(&cfg).expect("serialize");
        let parsed: Config = toml::from_str(&serialized).expect("parse");

        assert_eq!(parsed.server.command, cfg.server.command);
        assert_eq!(parsed.server.args, cfg.server.args);
    }

    #[test]
    fn save_then_load_round_trips_on_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.server.command = "python".to_string();
        cfg.server.args = vec!["-m".to_string(), "query_weather".to_string()];
        cfg.save_to(&path).expect("save should create parent directories");

        let loaded = Config::load_from(&path).expect("load");
        assert_eq!(loaded.server.command, "python");
        assert_eq!(loaded.server.args, vec!["-m", "query_weather"]);
    }

    #[test]
    fn loading_a_missing_file_returns_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");

        let cfg = Config::load_from(&dir.path().join("absent.toml")).expect("load");
        assert_eq!(cfg.server.command, "uvx");
    }
}
