use serde::{Deserialize, Serialize};

/// Manage configuration, as stored in `manage.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ManageConfig {
    /// Runner settings
    #[serde(default)]
    pub settings: Settings,
    /// Invocation of the built-in `test` command
    #[serde(default = "default_test_proxy")]
    pub test: ProxyConfig,
    /// Additional proxy commands declared by the project
    #[serde(default)]
    pub proxy: Vec<NamedProxy>,
}

/// Global runner settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Default log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Exit with the child's code when a proxied command fails
    #[serde(default)]
    pub propagate_exit_code: bool,
    /// Shell used to run proxied commands
    #[serde(default = "default_shell")]
    pub shell: String,
}

/// Shell invocation template plus an optional default argument
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyConfig {
    /// Command line the arguments are appended to
    pub command: String,
    /// Argument used when none are given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    /// Subcommand help text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
}

/// Proxy command declared under `[[proxy]]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedProxy {
    /// Subcommand name
    pub name: String,
    #[serde(flatten)]
    pub proxy: ProxyConfig,
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_shell() -> String {
    if cfg!(windows) {
        "cmd".to_string()
    } else {
        "sh".to_string()
    }
}

fn default_test_proxy() -> ProxyConfig {
    ProxyConfig::test_runner()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            propagate_exit_code: false,
            shell: default_shell(),
        }
    }
}

impl ProxyConfig {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            default: None,
            help: None,
        }
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// `python -m unittest`, discovering all tests when given no arguments
    pub fn test_runner() -> Self {
        Self::new("python -m unittest").with_default("discover")
    }
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self::test_runner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serialization() {
        let config = ManageConfig::default();
        let toml_str = toml::to_string(&config).unwrap();
        let deserialized: ManageConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(deserialized.test, ProxyConfig::test_runner());
        assert_eq!(deserialized.settings, Settings::default());
    }

    #[test]
    fn test_empty_config_takes_defaults() {
        let config: ManageConfig = toml::from_str("").unwrap();
        assert_eq!(config.settings.log_level, "info");
        assert!(!config.settings.propagate_exit_code);
        assert_eq!(config.test.command, "python -m unittest");
        assert_eq!(config.test.default.as_deref(), Some("discover"));
        assert!(config.proxy.is_empty());
    }

    #[test]
    fn test_proxy_entries() {
        let config: ManageConfig = toml::from_str(
            r#"
            [settings]
            propagate_exit_code = true

            [test]
            command = "pytest -q"

            [[proxy]]
            name = "lint"
            command = "ruff check"
            default = "."
            help = "Lint the project"

            [[proxy]]
            name = "fmt"
            command = "ruff format"
            "#,
        )
        .unwrap();

        assert!(config.settings.propagate_exit_code);
        assert_eq!(config.test.command, "pytest -q");
        assert_eq!(config.test.default, None);
        assert_eq!(config.proxy.len(), 2);
        assert_eq!(config.proxy[0].name, "lint");
        assert_eq!(config.proxy[0].proxy.default.as_deref(), Some("."));
        assert_eq!(config.proxy[0].proxy.help.as_deref(), Some("Lint the project"));
        assert_eq!(config.proxy[1].proxy, ProxyConfig::new("ruff format"));
    }
}
