//! Configuration Management
//!
//! Loads termfolio configuration from TOML files.
//! Configuration includes:
//! - API settings (friend-request endpoint, timeouts)
//! - Animation cadences and a global speed multiplier
//! - UI settings (TUI log file)

use crate::engine::timing;
use crate::errors::TermfolioError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Config file looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "termfolio.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub animation: AnimationConfig,

    #[serde(default)]
    pub ui: UiConfig,
}

/// Friend-request endpoint settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Whole-request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

fn default_endpoint() -> String {
    "http://localhost:5000/api/friend/send".to_string()
}
fn default_timeout_secs() -> u64 {
    15
}
fn default_connect_timeout_secs() -> u64 {
    5
}

/// Animation cadences in milliseconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationConfig {
    /// When false, one-shot animations settle almost immediately
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Speed multiplier (1.0 = normal, 2.0 = faster)
    #[serde(default = "default_speed")]
    pub speed: f64,
    #[serde(default = "default_hero_typewriter_ms")]
    pub hero_typewriter_ms: u64,
    #[serde(default = "default_bio_typewriter_ms")]
    pub bio_typewriter_ms: u64,
    #[serde(default = "default_skill_counter_ms")]
    pub skill_counter_ms: u64,
    #[serde(default = "default_connection_status_ms")]
    pub connection_status_ms: u64,
    #[serde(default = "default_loading_glyph_ms")]
    pub loading_glyph_ms: u64,
    #[serde(default = "default_cursor_blink_ms")]
    pub cursor_blink_ms: u64,
    #[serde(default = "default_clock_ms")]
    pub clock_ms: u64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            speed: default_speed(),
            hero_typewriter_ms: default_hero_typewriter_ms(),
            bio_typewriter_ms: default_bio_typewriter_ms(),
            skill_counter_ms: default_skill_counter_ms(),
            connection_status_ms: default_connection_status_ms(),
            loading_glyph_ms: default_loading_glyph_ms(),
            cursor_blink_ms: default_cursor_blink_ms(),
            clock_ms: default_clock_ms(),
        }
    }
}

fn millis(d: Duration) -> u64 {
    d.as_millis() as u64
}
fn default_true() -> bool {
    true
}
fn default_speed() -> f64 {
    1.0
}
fn default_hero_typewriter_ms() -> u64 {
    millis(timing::HERO_TYPEWRITER)
}
fn default_bio_typewriter_ms() -> u64 {
    millis(timing::BIO_TYPEWRITER)
}
fn default_skill_counter_ms() -> u64 {
    millis(timing::SKILL_COUNTER)
}
fn default_connection_status_ms() -> u64 {
    millis(timing::CONNECTION_STATUS)
}
fn default_loading_glyph_ms() -> u64 {
    millis(timing::LOADING_GLYPH)
}
fn default_cursor_blink_ms() -> u64 {
    millis(timing::CURSOR_BLINK)
}
fn default_clock_ms() -> u64 {
    millis(timing::CLOCK)
}

impl AnimationConfig {
    /// Cadence for a one-shot animation (typewriters, counter, stages)
    fn one_shot(&self, ms: u64) -> Duration {
        if self.enabled {
            timing::scaled(Duration::from_millis(ms), self.speed)
        } else {
            Duration::from_millis(1)
        }
    }

    /// Cadence for a looping animation; unaffected by `enabled`
    fn looping(&self, ms: u64) -> Duration {
        timing::scaled(Duration::from_millis(ms), self.speed)
    }

    pub fn hero_typewriter(&self) -> Duration {
        self.one_shot(self.hero_typewriter_ms)
    }

    pub fn bio_typewriter(&self) -> Duration {
        self.one_shot(self.bio_typewriter_ms)
    }

    pub fn skill_counter(&self) -> Duration {
        self.one_shot(self.skill_counter_ms)
    }

    pub fn connection_status(&self) -> Duration {
        self.one_shot(self.connection_status_ms)
    }

    pub fn loading_glyph(&self) -> Duration {
        self.looping(self.loading_glyph_ms)
    }

    pub fn cursor_blink(&self) -> Duration {
        self.looping(self.cursor_blink_ms)
    }

    /// The clock keeps wall time, so the speed multiplier does not apply.
    pub fn clock(&self) -> Duration {
        Duration::from_millis(self.clock_ms.max(1))
    }

    fn intervals(&self) -> [(&'static str, u64); 7] {
        [
            ("hero_typewriter_ms", self.hero_typewriter_ms),
            ("bio_typewriter_ms", self.bio_typewriter_ms),
            ("skill_counter_ms", self.skill_counter_ms),
            ("connection_status_ms", self.connection_status_ms),
            ("loading_glyph_ms", self.loading_glyph_ms),
            ("cursor_blink_ms", self.cursor_blink_ms),
            ("clock_ms", self.clock_ms),
        ]
    }
}

/// UI configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Log file for the TUI; logging is off in the TUI when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
    /// Filter used for the TUI log file when RUST_LOG is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            log_file: None,
            log_filter: default_log_filter(),
        }
    }
}

fn default_log_filter() -> String {
    "termfolio=debug".to_string()
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit `path` must be readable. Otherwise `termfolio.toml` in the
    /// working directory, then `~/.config/termfolio/config.toml`, and finally
    /// the built-in defaults are used. Environment overrides apply last.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let mut config = match path {
            Some(p) => Self::from_file(Path::new(p))?,
            None => {
                let mut default_paths = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
                if let Some(home) = dirs::home_dir() {
                    default_paths.push(home.join(".config/termfolio/config.toml"));
                }
                Self::from_first_existing(&default_paths)?
            }
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))
    }

    /// First readable file wins; a file that exists but fails to parse is an error.
    pub fn from_first_existing(paths: &[PathBuf]) -> Result<Self> {
        for p in paths {
            if let Ok(content) = std::fs::read_to_string(p) {
                debug!(path = %p.display(), "Loaded config");
                return toml::from_str(&content)
                    .with_context(|| format!("Failed to parse config {}", p.display()));
            }
        }
        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Apply `TERMFOLIO_*` overrides. Unparseable values are ignored.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(endpoint) = lookup("TERMFOLIO_ENDPOINT") {
            self.api.endpoint = endpoint;
        }
        if let Some(timeout) = lookup("TERMFOLIO_TIMEOUT") {
            if let Ok(t) = timeout.parse::<u64>() {
                self.api.timeout_secs = t;
            }
        }
        if let Some(speed) = lookup("TERMFOLIO_ANIMATION_SPEED") {
            if let Ok(s) = speed.parse::<f64>() {
                self.animation.speed = s;
            }
        }
    }

    /// Reject settings that cannot work
    pub fn validate(&self) -> std::result::Result<(), TermfolioError> {
        if self.api.endpoint.trim().is_empty() {
            return Err(TermfolioError::Config("api.endpoint must not be empty".into()));
        }
        if self.api.timeout_secs == 0 {
            return Err(TermfolioError::Config("api.timeout_secs must be greater than 0".into()));
        }
        if self.api.connect_timeout_secs == 0 {
            return Err(TermfolioError::Config(
                "api.connect_timeout_secs must be greater than 0".into(),
            ));
        }
        if let Some((name, _)) = self.animation.intervals().into_iter().find(|(_, ms)| *ms == 0) {
            return Err(TermfolioError::Config(format!(
                "animation.{name} must be greater than 0"
            )));
        }
        Ok(())
    }

    /// Effective configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}
