use std::env;

use auth::JwtHandler;
use chrono::Duration;
use chrono::Utc;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;
use url::Url;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub email: EmailConfig,
    pub verification: VerificationConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub algorithm: String,
    pub expiration_minutes: i64,
    #[serde(default = "default_enforce_expiry")]
    pub enforce_expiry: bool,
}

/// SMTP relay settings. Without `smtp_host` confirmation links are only logged.
#[derive(Debug, Deserialize, Clone)]
pub struct EmailConfig {
    pub smtp_host: Option<String>,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default = "default_from_address")]
    pub from_address: String,
    #[serde(default = "default_from_name")]
    pub from_name: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            smtp_host: None,
            smtp_port: default_smtp_port(),
            username: String::new(),
            password: String::new(),
            from_address: default_from_address(),
            from_name: default_from_name(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct VerificationConfig {
    /// Public URL of the verification endpoint, e.g. `http://localhost:8000/verification`
    pub base_url: String,
    /// Lifetime of an emailed confirmation link
    #[serde(default = "default_link_expiration_minutes")]
    pub expiration_minutes: i64,
}

fn default_max_connections() -> u32 {
    5
}

fn default_enforce_expiry() -> bool {
    true
}

fn default_link_expiration_minutes() -> i64 {
    24 * 60
}

fn default_smtp_port() -> u16 {
    587
}

fn default_from_address() -> String {
    "no-reply@localhost".to_string()
}

fn default_from_name() -> String {
    "Shop".to_string()
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(environment())
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Check values that deserialize fine but cannot be used.
    ///
    /// # Errors
    /// * `ConfigError::Message` - Empty secret, non-positive or oversized expiry,
    ///   unsupported algorithm, malformed verification URL or sender address
    pub fn validate(&self) -> Result<(), ConfigError> {
        lifetime("jwt.expiration_minutes", self.jwt.expiration_minutes)?;
        lifetime(
            "verification.expiration_minutes",
            self.verification.expiration_minutes,
        )?;

        self.jwt_handler()?;
        self.verification_handler()?;
        self.confirmation_url()?;

        if self.email.smtp_host.is_some()
            && self.email.from_address.parse::<lettre::Address>().is_err()
        {
            return Err(ConfigError::Message(format!(
                "email.from_address is not a valid address: {}",
                self.email.from_address
            )));
        }

        Ok(())
    }

    /// Token codec for access tokens, described by the `jwt` section.
    pub fn jwt_handler(&self) -> Result<JwtHandler, ConfigError> {
        self.handler_with_lifetime("jwt.expiration_minutes", self.jwt.expiration_minutes)
    }

    /// Token codec for confirmation links: the `jwt` keys with the
    /// `verification` lifetime.
    pub fn verification_handler(&self) -> Result<JwtHandler, ConfigError> {
        self.handler_with_lifetime(
            "verification.expiration_minutes",
            self.verification.expiration_minutes,
        )
    }

    fn handler_with_lifetime(&self, key: &str, minutes: i64) -> Result<JwtHandler, ConfigError> {
        let expiration = if self.jwt.enforce_expiry {
            Some(lifetime(key, minutes)?)
        } else {
            None
        };

        JwtHandler::from_settings(self.jwt.secret.as_bytes(), &self.jwt.algorithm, expiration)
            .map_err(|e| ConfigError::Message(format!("jwt: {}", e)))
    }

    pub fn confirmation_url(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.verification.base_url).map_err(|e| {
            ConfigError::Message(format!(
                "verification.base_url is not a valid URL ({}): {}",
                e, self.verification.base_url
            ))
        })
    }
}

/// Environment overrides, e.g. `JWT__SECRET` for `jwt.secret`.
fn environment() -> Environment {
    Environment::default().separator("__")
}

/// A positive number of minutes that can be added to the current time.
fn lifetime(key: &str, minutes: i64) -> Result<Duration, ConfigError> {
    if minutes <= 0 {
        return Err(ConfigError::Message(format!(
            "{} must be positive, got {}",
            key, minutes
        )));
    }

    Duration::try_minutes(minutes)
        .filter(|ttl| Utc::now().checked_add_signed(*ttl).is_some())
        .ok_or_else(|| ConfigError::Message(format!("{} is too large: {}", key, minutes)))
}
