//! every available configuration option and its type is listed in this file
use {
    crate::config::validate::{Validate, format_validation_errors},
    color_eyre::{
        Section,
        eyre::{Context, Result, eyre},
    },
    config::{Config, ConfigBuilder},
    schemars::JsonSchema,
    serde::{Deserialize, Serialize},
    smart_default::SmartDefault,
    std::{
        fs,
        path::{Path, PathBuf},
    },
    tracing::{debug, info},
};

/// the name of config files, both global and local
pub const CONFIG_FILE_NAME: &str = "delicious.toml";

/// the prefix of environment variables that override config values
pub const ENV_PREFIX: &str = "DELICIOUS";

/// Service endpoint settings
#[derive(Serialize, Deserialize, Clone, Debug, JsonSchema, SmartDefault)]
#[schemars(default)]
pub struct ApiCfg {
    /// The base URL of the API
    #[schemars(url)]
    #[default(Some("https://api.del.icio.us/v1".to_string()))]
    pub base_url: Option<String>,

    /// The base URL of the public json feeds
    #[schemars(url)]
    #[default(Some("https://feeds.delicious.com/v2/json".to_string()))]
    pub feeds_url: Option<String>,

    /// User agent string sent with every request
    #[default(Some(format!(
        "{}/{}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    )))]
    pub user_agent: Option<String>,
}

/// Account settings
#[derive(Serialize, Deserialize, Clone, Debug, JsonSchema, SmartDefault)]
#[schemars(default)]
pub struct LoginCfg {
    /// The account name posts are read from
    #[default(Some(String::new()))]
    pub username: Option<String>,
}

/// Output formats for logging
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, JsonSchema, SmartDefault)]
pub enum LoggingFormat {
    /// Use the compact output format
    #[default]
    Compact,

    /// Use a multi-line pretty output format
    Pretty,
}

/// Settings for logging
#[derive(Serialize, Deserialize, Clone, Debug, JsonSchema, SmartDefault)]
#[schemars(default)]
pub struct LoggingConfig {
    /// Enable logging
    #[default(Some(true))]
    pub enable: Option<bool>,

    /// The max level to log at
    #[default(Some("info".to_string()))]
    pub level: Option<String>,

    /// The output format
    #[default(Some(LoggingFormat::Compact))]
    pub format: Option<LoggingFormat>,

    /// Enable ANSI escape codes for colors
    #[default(Some(true))]
    pub ansi: Option<bool>,

    /// Display event targets in log messages
    #[default(Some(false))]
    pub event_targets: Option<bool>,

    /// Display line numbers in log messages
    #[default(Some(false))]
    pub line_numbers: Option<bool>,
}

/// delicious configuration options
#[derive(Serialize, Deserialize, Clone, Debug, JsonSchema, SmartDefault)]
#[schemars(default)]
pub struct DeliciousCfg {
    /// Configuration file version (do not modify manually)
    #[default(Some(1))]
    pub version: Option<u32>,

    /// Service endpoints
    #[default(Some(ApiCfg::default()))]
    pub api: Option<ApiCfg>,

    /// Account settings
    #[default(Some(LoginCfg::default()))]
    pub login: Option<LoginCfg>,

    /// Logging settings
    #[default(Some(LoggingConfig::default()))]
    pub logging: Option<LoggingConfig>,
}

impl DeliciousCfg {
    /// load config from default locations
    ///
    /// load prio: env > local > global > defaults
    pub fn load() -> Result<Self> {
        let curr_dir = std::env::current_dir()
            .wrap_err("Failed to get current working directory")
            .suggestion("Ensure the current directory exists and is accessible")?;

        Self::load_layered(Self::global_config_path(), &curr_dir, None)
    }

    /// load config layered over the defaults: the global file, the nearest
    /// local file at or above `start_dir`, then environment overrides
    ///
    /// `env` replaces the process environment when given, keys look like
    /// `DELICIOUS_LOGIN__USERNAME`
    pub fn load_layered(
        global: Option<PathBuf>,
        start_dir: &Path,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self> {
        let mut builder = Self::create_builder(&Self::default())?;

        if let Some(global) = global {
            debug!(path = %global.display(), "adding global config source");
            builder = builder.add_source(config::File::from(global).required(false));
        }

        if let Some(local) = Self::find_local_config(start_dir) {
            debug!(path = %local.display(), "adding local config source");
            builder = builder.add_source(config::File::from(local).required(false));
        }

        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .source(env),
        );

        Self::finish(builder)
    }

    /// load the defaults overlaid with a single config file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let builder = Self::create_builder(&Self::default())?
            .add_source(config::File::from(path.to_path_buf()).required(true));

        Self::finish(builder).wrap_err_with(|| format!("failed to load {}", path.display()))
    }

    /// write the default config to a file, creating parent directories
    pub fn write_default(path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .wrap_err_with(|| format!("failed to create {}", parent.display()))?;
        }

        let contents =
            toml::to_string_pretty(&Self::default()).wrap_err("failed to serialize defaults")?;
        fs::write(path, contents).wrap_err_with(|| format!("failed to write {}", path.display()))?;

        info!(path = %path.display(), "wrote default config");
        Ok(())
    }

    /// the json schema of the config file
    pub fn schema() -> schemars::Schema {
        schemars::schema_for!(DeliciousCfg)
    }

    /// the global config file path, if the platform has a config dir
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_FILE_NAME))
    }

    /// create a config builder with defaults
    fn create_builder(defaults: &Self) -> Result<ConfigBuilder<config::builder::DefaultState>> {
        let source = Config::try_from(defaults)
            .wrap_err("Failed to convert default config struct to config source")?;

        Ok(Config::builder().add_source(source))
    }

    /// build, deserialize and validate
    fn finish(builder: ConfigBuilder<config::builder::DefaultState>) -> Result<Self> {
        let cfg: Self = builder
            .build()
            .wrap_err("Failed to build configuration")?
            .try_deserialize()
            .wrap_err("Failed to deserialize configuration")?;

        cfg.run_validation()?;
        debug!("configuration validation successful");

        Ok(cfg)
    }

    /// run validation and return a pretty error if it fails
    fn run_validation(&self) -> Result<()> {
        self.validate()
            .map_err(|errors| eyre!(format_validation_errors(&errors)))
            .wrap_err("config validation failed")
            .suggestion("Check your delicious.toml for invalid values")
    }

    /// find the nearest local config file in `start_dir` or its ancestors
    fn find_local_config(start_dir: &Path) -> Option<PathBuf> {
        start_dir
            .ancestors()
            .map(|dir| dir.join(CONFIG_FILE_NAME))
            .find(|path| path.is_file())
    }
}

#[cfg(test)]
mod tests {
    use {super::*, std::io::Write, tempfile::TempDir};

    #[test]
    fn test_defaults_are_complete() {
        let cfg = DeliciousCfg::default();
        let api = cfg.api.unwrap();

        assert_eq!(cfg.version, Some(1));
        assert_eq!(api.base_url.as_deref(), Some("https://api.del.icio.us/v1"));
        assert!(api.user_agent.unwrap().starts_with("delicious/"));
        assert_eq!(cfg.logging.unwrap().format, Some(LoggingFormat::Compact));
    }

    #[test]
    fn test_load_from_overrides() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        let mut file = fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[login]\nusername = \"zfTestUser\"\n\n[api]\nbase_url = \"http://localhost:8080/v1\""
        )
        .unwrap();

        let cfg = DeliciousCfg::load_from(&path).unwrap();
        let api = cfg.api.unwrap();

        assert_eq!(cfg.login.unwrap().username.as_deref(), Some("zfTestUser"));
        assert_eq!(api.base_url.as_deref(), Some("http://localhost:8080/v1"));
        assert_eq!(
            api.feeds_url.as_deref(),
            Some("https://feeds.delicious.com/v2/json")
        );
    }

    #[test]
    fn test_load_from_rejects_invalid_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[api]\nbase_url = \"ftp://nope\"\n").unwrap();

        let err = DeliciousCfg::load_from(&path).unwrap_err();
        assert!(format!("{:?}", err).contains("base_url"));
    }

    #[test]
    fn test_schema_lists_sections() {
        let schema = serde_json::to_string(&DeliciousCfg::schema()).unwrap();

        assert!(schema.contains("base_url"));
        assert!(schema.contains("username"));
    }

    #[test]
    fn test_load_from_missing_file() {
        let dir = TempDir::new().unwrap();
        assert!(DeliciousCfg::load_from(dir.path().join("missing.toml")).is_err());
    }

    #[test]
    fn test_write_default_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);

        DeliciousCfg::write_default(&path).unwrap();
        let cfg = DeliciousCfg::load_from(&path).unwrap();

        assert_eq!(cfg.version, Some(1));
        assert_eq!(cfg.logging.unwrap().level.as_deref(), Some("info"));
    }

    /// global and local files for the layered loading tests
    fn layered_dirs() -> (TempDir, PathBuf, PathBuf) {
        let dir = TempDir::new().unwrap();
        let global = dir.path().join("global").join(CONFIG_FILE_NAME);
        let project = dir.path().join("project");
        let start = project.join("sub");

        fs::create_dir_all(global.parent().unwrap()).unwrap();
        fs::create_dir_all(&start).unwrap();
        fs::write(
            &global,
            "[login]\nusername = \"global\"\n\n[api]\nbase_url = \"http://global/v1\"\n",
        )
        .unwrap();
        fs::write(
            project.join(CONFIG_FILE_NAME),
            "[login]\nusername = \"local\"\n",
        )
        .unwrap();

        (dir, global, start)
    }

    #[test]
    fn test_local_overrides_global() {
        let (_dir, global, start) = layered_dirs();

        let cfg = DeliciousCfg::load_layered(Some(global), &start, Some(config::Map::new())).unwrap();
        let api = cfg.api.unwrap();

        assert_eq!(cfg.login.unwrap().username.as_deref(), Some("local"));
        assert_eq!(api.base_url.as_deref(), Some("http://global/v1"));
        assert_eq!(
            api.feeds_url.as_deref(),
            Some("https://feeds.delicious.com/v2/json")
        );
    }

    #[test]
    fn test_env_overrides_files() {
        let (_dir, global, start) = layered_dirs();
        let mut env = config::Map::new();
        env.insert("DELICIOUS_LOGIN__USERNAME".to_string(), "env".to_string());

        let cfg = DeliciousCfg::load_layered(Some(global), &start, Some(env)).unwrap();

        assert_eq!(cfg.login.unwrap().username.as_deref(), Some("env"));
        assert_eq!(
            cfg.api.unwrap().base_url.as_deref(),
            Some("http://global/v1")
        );
    }

    #[test]
    fn test_layered_without_files_is_default() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nowhere").join(CONFIG_FILE_NAME);

        let cfg = DeliciousCfg::load_layered(Some(missing), dir.path(), Some(config::Map::new()))
            .unwrap();

        assert_eq!(cfg.version, Some(1));
        assert_eq!(cfg.login.unwrap().username.as_deref(), Some(""));
    }
}
