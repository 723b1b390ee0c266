use config::{Config, ConfigError, Environment, File};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

pub const DEFAULT_CALLBACK_PORT: u16 = 8888;

const MAX_CALLBACK_TIMEOUT_SECS: u64 = 3600;
const MAX_EXPIRY_MARGIN_SECS: i64 = 24 * 3600;

const DEFAULT_SCOPES: &[&str] = &[
    "user-read-playback-state",
    "user-modify-playback-state",
    "user-read-currently-playing",
    "user-library-read",
    "user-library-modify",
    "playlist-read-private",
    "playlist-read-collaborative",
    "playlist-modify-public",
    "playlist-modify-private",
    "user-read-recently-played",
    "user-top-read",
    "streaming",
];

#[derive(Debug, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub client_id: String,

    #[serde(default = "empty_secret", deserialize_with = "deserialize_secret")]
    pub client_secret: SecretString,

    #[serde(default = "default_redirect_uri")]
    pub redirect_uri: String,

    #[serde(default = "default_scopes")]
    pub scopes: Vec<String>,

    #[serde(default = "default_callback_timeout")]
    pub callback_timeout_secs: u64,

    #[serde(default = "default_expiry_margin")]
    pub expiry_margin_secs: i64,

    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_ms: u64,

    #[serde(default = "default_volume_step")]
    pub volume_step: u8,
}

fn empty_secret() -> SecretString {
    SecretString::from(String::new())
}

fn deserialize_secret<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(SecretString::from)
}

fn default_redirect_uri() -> String {
    format!("http://localhost:{}/callback", DEFAULT_CALLBACK_PORT)
}

fn default_scopes() -> Vec<String> {
    DEFAULT_SCOPES.iter().map(|s| s.to_string()).collect()
}

fn default_callback_timeout() -> u64 {
    120
}

fn default_expiry_margin() -> i64 {
    60
}

fn default_refresh_interval() -> u64 {
    1000
}

fn default_volume_step() -> u8 {
    5
}

impl Settings {
    /// Load settings from `$SPOTUIFY_CONFIG` (or the per-user config file)
    /// layered under `SPOTUIFY_*` environment variables.
    pub fn new() -> Result<Self, ConfigError> {
        let config_path = std::env::var("SPOTUIFY_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| Self::default_config_path());

        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &Path) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(config_path).required(false))
            .add_source(
                Environment::with_prefix("SPOTUIFY")
                    .try_parsing(true)
                    .list_separator(" ")
                    .with_list_parse_key("scopes"),
            )
            .build()?;

        settings.try_deserialize()
    }

    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("spotuify")
            .join("config.toml")
    }

    /// Both halves of the client credentials are present
    pub fn is_configured(&self) -> bool {
        !self.client_id.is_empty() && !self.client_secret.expose_secret().is_empty()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.client_id.is_empty() {
            return Err("client_id is required".to_string());
        }
        if self.client_secret.expose_secret().is_empty() {
            return Err("client_secret is required".to_string());
        }

        let url = Url::parse(&self.redirect_uri)
            .map_err(|e| format!("redirect_uri is not a valid URL: {}", e))?;
        if url.scheme() != "http" {
            return Err("redirect_uri must use http".to_string());
        }
        match url.host_str() {
            Some("localhost") | Some("127.0.0.1") => {}
            _ => return Err("redirect_uri must point at localhost".to_string()),
        }
        if self.scopes.is_empty() {
            return Err("at least one scope must be requested".to_string());
        }
        if !(1..=MAX_CALLBACK_TIMEOUT_SECS).contains(&self.callback_timeout_secs) {
            return Err(format!(
                "callback_timeout_secs must be between 1 and {}",
                MAX_CALLBACK_TIMEOUT_SECS
            ));
        }
        if !(0..=MAX_EXPIRY_MARGIN_SECS).contains(&self.expiry_margin_secs) {
            return Err(format!(
                "expiry_margin_secs must be between 0 and {}",
                MAX_EXPIRY_MARGIN_SECS
            ));
        }
        Ok(())
    }

    /// Port embedded in the redirect URI, falling back to 8888
    pub fn callback_port(&self) -> u16 {
        Url::parse(&self.redirect_uri)
            .ok()
            .and_then(|url| url.port())
            .unwrap_or(DEFAULT_CALLBACK_PORT)
    }

    pub fn callback_path(&self) -> String {
        Url::parse(&self.redirect_uri)
            .map(|url| url.path().to_string())
            .unwrap_or_else(|_| "/callback".to_string())
    }

    pub fn callback_timeout(&self) -> Duration {
        Duration::from_secs(self.callback_timeout_secs)
    }

    pub fn expiry_margin(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.expiry_margin_secs)
    }

    pub fn credentials(&self) -> ClientCredentials {
        ClientCredentials {
            client_id: self.client_id.clone(),
            client_secret: SecretString::from(self.client_secret.expose_secret().to_owned()),
            redirect_uri: self.redirect_uri.clone(),
            requested_scopes: self.scopes.clone(),
        }
    }
}

/// Credentials registered with the authorization server
#[derive(Debug)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: SecretString,
    pub redirect_uri: String,
    pub requested_scopes: Vec<String>,
}

impl ClientCredentials {
    /// Scopes in wire form
    pub fn scope_string(&self) -> String {
        self.requested_scopes.join(" ")
    }
}
