use crate::domain::config::{ManageConfig, NamedProxy, ProxyConfig};
use crate::domain::error::{ManageError, ManageResult};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Project configuration file name
pub const PROJECT_CONFIG_FILE: &str = "manage.toml";

/// Configuration manager
pub struct ConfigManager {
    global_config_path: Option<PathBuf>,
    project_config_path: Option<PathBuf>,
    working_dir: PathBuf,
}

impl ConfigManager {
    /// Create a configuration manager for the current directory
    pub fn new() -> ManageResult<Self> {
        let working_dir = std::env::current_dir()?;
        Ok(Self::for_dir(working_dir))
    }

    /// Create a configuration manager discovering the project config from `dir`
    pub fn for_dir(dir: impl Into<PathBuf>) -> Self {
        let working_dir = dir.into();
        Self {
            global_config_path: Self::get_global_config_path(),
            project_config_path: Self::find_project_config_path(&working_dir),
            working_dir,
        }
    }

    /// Use an explicit project configuration file instead of discovery
    pub fn with_project_config(mut self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        self.project_config_path = Some(if path.is_absolute() {
            path
        } else {
            self.working_dir.join(path)
        });
        self
    }

    /// Override (or disable) the global configuration file
    pub fn with_global_config(mut self, path: Option<PathBuf>) -> Self {
        self.global_config_path = path;
        self
    }

    /// Load configuration from files.
    ///
    /// Global settings apply first. A project file replaces them only if it
    /// has a `[settings]` table, and always supplies `[test]` and `[[proxy]]`.
    pub fn load_config(&self) -> ManageResult<ManageConfig> {
        let mut config = ManageConfig::default();

        if let Some(global_path) = &self.global_config_path {
            if global_path.exists() {
                config.settings = Self::load_config_from_path(global_path)?.settings;
                debug!("Loaded global config from {}", global_path.display());
            }
        }

        if let Some(project_path) = &self.project_config_path {
            let table = Self::read_table(project_path)?;
            let has_settings = table.contains_key("settings");
            let project: ManageConfig = Self::parse_table(table, project_path)?;

            if has_settings {
                config.settings = project.settings;
            }
            config.test = project.test;
            config.proxy = project.proxy;
            debug!("Loaded project config from {}", project_path.display());
        }

        Ok(config)
    }

    /// Load configuration from specific path
    pub fn load_config_from_path(path: &Path) -> ManageResult<ManageConfig> {
        let table = Self::read_table(path)?;
        Self::parse_table(table, path)
    }

    fn read_table(path: &Path) -> ManageResult<toml::Table> {
        let content = fs::read_to_string(path).map_err(|e| ManageError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        content.parse::<toml::Table>().map_err(|e| ManageError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })
    }

    fn parse_table(table: toml::Table, path: &Path) -> ManageResult<ManageConfig> {
        toml::Value::Table(table)
            .try_into()
            .map_err(|e| ManageError::Config {
                message: format!("Invalid config file {}: {}", path.display(), e),
            })
    }

    /// Save configuration to specific path
    pub fn save_config_to_path(path: &Path, config: &ManageConfig) -> ManageResult<()> {
        let content = toml::to_string_pretty(config).map_err(|e| ManageError::Config {
            message: format!("Failed to serialize config: {}", e),
        })?;

        fs::write(path, content).map_err(|e| ManageError::Config {
            message: format!("Failed to write config file {}: {}", path.display(), e),
        })
    }

    /// Get global configuration path
    fn get_global_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".config").join("manage").join("config.toml"))
    }

    /// Find project configuration path by walking up directory tree
    fn find_project_config_path(start: &Path) -> Option<PathBuf> {
        let mut path = start;

        loop {
            let config_path = path.join(PROJECT_CONFIG_FILE);
            if config_path.is_file() {
                return Some(config_path);
            }

            path = path.parent()?;
        }
    }

    /// Write a starter project configuration into `dir`
    pub fn init_project_config(dir: &Path, force: bool) -> ManageResult<PathBuf> {
        let config_file = dir.join(PROJECT_CONFIG_FILE);

        if config_file.exists() && !force {
            return Err(ManageError::Config {
                message: format!("{} already exists", config_file.display()),
            });
        }

        fs::create_dir_all(dir).map_err(|e| ManageError::Config {
            message: format!("Failed to create {}: {}", dir.display(), e),
        })?;

        let starter = ManageConfig {
            proxy: vec![NamedProxy {
                name: "lint".to_string(),
                proxy: ProxyConfig {
                    command: "python -m flake8".to_string(),
                    default: Some(".".to_string()),
                    help: Some("Lint the project sources".to_string()),
                },
            }],
            ..ManageConfig::default()
        };

        Self::save_config_to_path(&config_file, &starter)?;
        Ok(config_file)
    }

    /// Directory proxied commands run in: the project config's directory, or
    /// the working directory when there is none
    pub fn project_root(&self) -> PathBuf {
        self.project_config_path
            .as_deref()
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.working_dir.clone())
    }

    /// Get the current project config path (if any)
    pub fn get_project_config_path(&self) -> Option<&PathBuf> {
        self.project_config_path.as_ref()
    }
}
