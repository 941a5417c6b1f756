use anyhow::{ensure, Context};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

const DEFAULT_CONFIG_FILES: &[&str] = &[
    "roster.toml",
    "config/roster.toml",
    "crates/config/roster.toml",
    "../roster.toml",
    "../config/roster.toml",
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub accounts: AccountsConfig,
}

impl AppConfig {
    /// Reject settings that would leave the service unusable.
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.database.max_connections > 0,
            "database.max_connections must be at least 1"
        );
        ensure!(
            self.accounts.min_password_length > 0,
            "accounts.min_password_length must be at least 1"
        );
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://roster.db".to_string(),
            max_connections: 10,
        }
    }
}

/// Behaviour switches for the account service.
///
/// ```
/// use roster_config::AccountsConfig;
///
/// let accounts = AccountsConfig::default();
/// assert_eq!(accounts.min_password_length, 1);
/// assert!(!accounts.reveal_unknown_accounts);
/// assert!(accounts.record_last_login);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountsConfig {
    /// Shortest password accepted when creating a user.
    #[serde(default = "AccountsConfig::default_min_password_length")]
    pub min_password_length: usize,
    /// Report unknown usernames as "not found" during login instead of
    /// folding them into "invalid credentials".
    #[serde(default)]
    pub reveal_unknown_accounts: bool,
    /// Stamp the last-login column after a successful login.
    #[serde(default = "AccountsConfig::default_record_last_login")]
    pub record_last_login: bool,
}

impl AccountsConfig {
    const fn default_min_password_length() -> usize {
        1
    }

    const fn default_record_last_login() -> bool {
        true
    }
}

impl Default for AccountsConfig {
    fn default() -> Self {
        Self {
            min_password_length: Self::default_min_password_length(),
            reveal_unknown_accounts: false,
            record_last_login: Self::default_record_last_login(),
        }
    }
}

/// Load the application configuration by combining defaults, files, and environment overrides.
///
/// ```
/// use roster_config::load;
///
/// std::env::remove_var("ROSTER_CONFIG");
///
/// let config = load().expect("configuration should load with defaults");
/// assert!(!config.database.url.is_empty());
/// ```
pub fn load() -> anyhow::Result<AppConfig> {
    let defaults = AppConfig::default();

    let min_password_length =
        i64::try_from(defaults.accounts.min_password_length).unwrap_or(i64::MAX);

    let mut builder = config::Config::builder()
        .set_default("database.url", defaults.database.url.clone())?
        .set_default(
            "database.max_connections",
            i64::from(defaults.database.max_connections),
        )?
        .set_default("accounts.min_password_length", min_password_length)?
        .set_default(
            "accounts.reveal_unknown_accounts",
            defaults.accounts.reveal_unknown_accounts,
        )?
        .set_default(
            "accounts.record_last_login",
            defaults.accounts.record_last_login,
        )?;

    let environment_overrides = config::Environment::with_prefix("ROSTER").separator("__");

    let mut config_file_attached = false;

    if let Ok(path) = std::env::var("ROSTER_CONFIG") {
        builder = builder.add_source(config::File::from(PathBuf::from(&path)));
        config_file_attached = true;
        debug!(path, "loading configuration via ROSTER_CONFIG");
    } else if let Ok(cwd) = std::env::current_dir() {
        let fallback = DEFAULT_CONFIG_FILES
            .iter()
            .map(|candidate| cwd.join(candidate))
            .find(|path| path.exists());

        if let Some(path) = fallback {
            debug!(path = %path.display(), "loading configuration file");
            builder = builder.add_source(config::File::from(path));
            config_file_attached = true;
        }
    }

    if !config_file_attached {
        debug!("no configuration file found, relying on defaults and environment overrides");
    }

    builder = builder.add_source(environment_overrides);

    let cfg = builder.build().context("unable to build configuration")?;

    let config = cfg
        .try_deserialize::<AppConfig>()
        .context("invalid configuration")?;

    config.validate().context("invalid configuration")?;

    debug!(?config, "loaded roster configuration");
    Ok(config)
}
