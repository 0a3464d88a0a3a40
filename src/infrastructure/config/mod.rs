//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use crate::application::errors::ConfigError;
use crate::application::messaging::QUEUE_CAPACITY;
use crate::application::services::DEFAULT_SEND_DELAY;

/// Relay configuration, fixed at startup
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    pub slack: SlackConfig,
    pub irc: IrcConfig,
    pub http: HttpConfig,
    pub relay: RelayConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct SlackConfig {
    /// Incoming webhook URL messages from IRC are posted to
    pub webhook_url: String,
    /// Token Slack sends with every outgoing webhook call
    pub webhook_token: String,
    /// Slack channel messages from IRC are posted to
    pub channel: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct IrcConfig {
    pub nick: String,
    pub host: String,
    pub port: u16,
    pub password: String,
    pub secure: bool,
    /// Skip certificate verification (self-signed ircds)
    pub insecure_tls: bool,
    pub channel: String,
    pub reconnect: bool,
    pub max_backoff_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct HttpConfig {
    pub listen: String,
    pub path: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct RelayConfig {
    pub queue_capacity: usize,
    pub send_delay_ms: u64,
}

impl Default for SlackConfig {
    fn default() -> Self {
        Self {
            webhook_url: String::new(),
            webhook_token: String::new(),
            channel: String::new(),
            timeout_secs: 30,
        }
    }
}

impl Default for IrcConfig {
    fn default() -> Self {
        Self {
            nick: "sirbot".to_string(),
            host: "localhost".to_string(),
            port: 6666,
            password: String::new(),
            secure: false,
            insecure_tls: false,
            channel: String::new(),
            reconnect: true,
            max_backoff_secs: 300,
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            listen: "0.0.0.0:7777".to_string(),
            path: "/".to_string(),
        }
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            queue_capacity: QUEUE_CAPACITY,
            send_delay_ms: DEFAULT_SEND_DELAY.as_millis() as u64,
        }
    }
}

impl SlackConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl IrcConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn max_backoff(&self) -> Duration {
        Duration::from_secs(self.max_backoff_secs.max(1))
    }
}

impl RelayConfig {
    pub fn send_delay(&self) -> Duration {
        Duration::from_millis(self.send_delay_ms)
    }
}

/// Command-line overrides, applied on top of file and environment values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub webhook_url: Option<String>,
    pub webhook_token: Option<String>,
    pub listen: Option<String>,
    pub nick: Option<String>,
    pub irc_host: Option<String>,
    pub irc_port: Option<u16>,
    pub irc_password: Option<String>,
    pub irc_secure: bool,
    pub irc_channel: Option<String>,
    pub slack_channel: Option<String>,
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Read(path.display().to_string(), e.to_string()))?;

        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to serialize config: {}", e)))
    }

    /// Secrets may come from the environment instead of the config file
    pub fn apply_env(&mut self) {
        if let Ok(url) = std::env::var("SLACK_WEBHOOK_URL") {
            self.slack.webhook_url = url;
        }

        if let Ok(token) = std::env::var("SLACK_WEBHOOK_TOKEN") {
            self.slack.webhook_token = token;
        }

        if let Ok(password) = std::env::var("IRC_PASSWORD") {
            self.irc.password = password;
        }
    }

    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(url) = overrides.webhook_url {
            self.slack.webhook_url = url;
        }
        if let Some(token) = overrides.webhook_token {
            self.slack.webhook_token = token;
        }
        if let Some(channel) = overrides.slack_channel {
            self.slack.channel = channel;
        }
        if let Some(listen) = overrides.listen {
            self.http.listen = listen;
        }
        if let Some(nick) = overrides.nick {
            self.irc.nick = nick;
        }
        if let Some(host) = overrides.irc_host {
            self.irc.host = host;
        }
        if let Some(port) = overrides.irc_port {
            self.irc.port = port;
        }
        if let Some(password) = overrides.irc_password {
            self.irc.password = password;
        }
        if overrides.irc_secure {
            self.irc.secure = true;
        }
        if let Some(channel) = overrides.irc_channel {
            self.irc.channel = channel;
        }
    }

    /// Reject configurations that cannot relay anything
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.slack.webhook_url.is_empty() {
            return Err(ConfigError::MissingField("slack.webhook-url".to_string()));
        }
        if self.slack.channel.is_empty() {
            return Err(ConfigError::MissingField("slack.channel".to_string()));
        }
        if self.irc.channel.is_empty() {
            return Err(ConfigError::MissingField("irc.channel".to_string()));
        }
        if self.irc.nick.is_empty() {
            return Err(ConfigError::MissingField("irc.nick".to_string()));
        }
        if !self.http.path.starts_with('/') {
            return Err(ConfigError::InvalidValue(format!(
                "http.path must start with '/': {}",
                self.http.path
            )));
        }
        if self.relay.queue_capacity == 0 {
            return Err(ConfigError::InvalidValue("relay.queue-capacity must be at least 1".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> Config {
        let mut config = Config::default();
        config.slack.webhook_url = "https://hooks.slack.com/services/T/B/X".to_string();
        config.slack.channel = "#relay".to_string();
        config.irc.channel = "#general".to_string();
        config
    }

    #[test]
    fn test_defaults_match_flags() {
        let config = Config::default();
        assert_eq!(config.irc.nick, "sirbot");
        assert_eq!(config.irc.address(), "localhost:6666");
        assert_eq!(config.http.listen, "0.0.0.0:7777");
        assert_eq!(config.http.path, "/");
        assert_eq!(config.relay.queue_capacity, 10);
        assert_eq!(config.relay.send_delay(), Duration::from_secs(1));
        assert!(!config.irc.secure);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = Config::from_yaml(
            "irc:\n  host: irc.libera.chat\n  port: 6697\n  secure: true\n  channel: \"#general\"\nslack:\n  webhook-url: https://example.com/hook\n",
        )
        .unwrap();

        assert_eq!(config.irc.address(), "irc.libera.chat:6697");
        assert!(config.irc.secure);
        assert_eq!(config.irc.nick, "sirbot");
        assert_eq!(config.slack.webhook_url, "https://example.com/hook");
        assert_eq!(config.slack.timeout_secs, 30);
    }

    #[test]
    fn test_yaml_roundtrip_of_defaults() {
        let yaml = Config::default().to_yaml().unwrap();
        assert!(yaml.contains("webhook-url"));
        assert!(yaml.contains("max-backoff-secs"));
        let parsed = Config::from_yaml(&yaml).unwrap();
        assert_eq!(parsed.irc.port, 6666);
    }

    #[test]
    fn test_malformed_yaml_is_parse_error() {
        let err = Config::from_yaml("irc: [not, a, map]").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_unreadable_file_is_read_error() {
        let err = Config::load("/nonexistent/sirbot.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Read(ref path, _) if path == "/nonexistent/sirbot.yaml"));
        assert!(err.to_string().starts_with("Failed to read config"));
    }

    #[test]
    fn test_overrides_win() {
        let mut config = valid();
        config.apply_overrides(ConfigOverrides {
            nick: Some("relaybot".to_string()),
            irc_port: Some(6697),
            irc_secure: true,
            slack_channel: Some("#other".to_string()),
            ..Default::default()
        });

        assert_eq!(config.irc.nick, "relaybot");
        assert_eq!(config.irc.port, 6697);
        assert!(config.irc.secure);
        assert_eq!(config.slack.channel, "#other");
        assert_eq!(config.irc.channel, "#general");
    }

    #[test]
    fn test_validate() {
        assert!(valid().validate().is_ok());

        let mut config = valid();
        config.irc.channel.clear();
        assert!(matches!(config.validate(), Err(ConfigError::MissingField(f)) if f == "irc.channel"));

        let mut config = valid();
        config.slack.webhook_url.clear();
        assert!(matches!(config.validate(), Err(ConfigError::MissingField(_))));

        let mut config = valid();
        config.http.path = "hook".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::InvalidValue(_))));
    }
}
