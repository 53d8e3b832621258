//! Unit tests for the config module
//!
//! Tests cover:
//! - Defaults and partial TOML files
//! - Search order and explicit paths
//! - Environment overrides
//! - Validation and derived cadences

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;
use termfolio::config::{AnimationConfig, Config};

fn write(dir: &TempDir, name: &str, body: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, body).unwrap();
    path
}

// ============================================================================
// Loading Tests
// ============================================================================

mod loading_tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "termfolio.toml",
            "[api]\nendpoint = \"https://friends.example/send\"\n\n[animation]\nspeed = 2.0\n",
        );

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.api.endpoint, "https://friends.example/send");
        assert_eq!(config.api.timeout_secs, 15);
        assert_eq!(config.animation.speed, 2.0);
        assert_eq!(config.animation.hero_typewriter_ms, 150);
        assert!(config.ui.log_file.is_none());
    }

    #[test]
    fn test_explicit_missing_path_is_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(Config::load(Some(missing.to_str().unwrap())).is_err());
    }

    #[test]
    fn test_invalid_toml_is_error() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "bad.toml", "[api\nendpoint = ");
        assert!(Config::from_file(&path).is_err());
    }

    #[test]
    fn test_first_existing_wins() {
        let dir = TempDir::new().unwrap();
        let second = write(&dir, "second.toml", "[api]\ntimeout_secs = 9\n");
        let third = write(&dir, "third.toml", "[api]\ntimeout_secs = 3\n");
        let paths = vec![dir.path().join("first.toml"), second, third];

        let config = Config::from_first_existing(&paths).unwrap();
        assert_eq!(config.api.timeout_secs, 9);
    }

    #[test]
    fn test_no_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::from_first_existing(&[dir.path().join("absent.toml")]).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_toml_output_reloads() {
        let dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.animation.enabled = false;
        let path = write(&dir, "out.toml", &config.to_toml().unwrap());
        assert_eq!(Config::from_file(&path).unwrap(), config);
    }
}

// ============================================================================
// Override & Validation Tests
// ============================================================================

mod override_tests {
    use super::*;

    #[test]
    fn test_env_overrides_apply() {
        let env: HashMap<&str, &str> = [
            ("TERMFOLIO_ENDPOINT", "http://10.0.0.2/send"),
            ("TERMFOLIO_TIMEOUT", "30"),
            ("TERMFOLIO_ANIMATION_SPEED", "0.5"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_env_overrides(|key| env.get(key).map(|v| v.to_string()));
        assert_eq!(config.api.endpoint, "http://10.0.0.2/send");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.animation.speed, 0.5);
    }

    #[test]
    fn test_unparseable_env_values_ignored() {
        let mut config = Config::default();
        config.apply_env_overrides(|key| match key {
            "TERMFOLIO_TIMEOUT" => Some("soon".into()),
            "TERMFOLIO_ANIMATION_SPEED" => Some("fast".into()),
            _ => None,
        });
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.api.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_blank_endpoint() {
        let mut config = Config::default();
        config.api.endpoint = "   ".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_validates() {
        assert!(Config::default().validate().is_ok());
    }
}

// ============================================================================
// Cadence Tests
// ============================================================================

mod cadence_tests {
    use super::*;

    #[test]
    fn test_speed_divides_animation_intervals() {
        let animation = AnimationConfig {
            speed: 2.0,
            ..Default::default()
        };
        assert_eq!(animation.hero_typewriter(), Duration::from_millis(75));
        assert_eq!(animation.loading_glyph(), Duration::from_millis(150));
        assert_eq!(animation.clock(), Duration::from_millis(1000));
    }

    #[test]
    fn test_non_positive_speed_is_normal() {
        let animation = AnimationConfig {
            speed: 0.0,
            ..Default::default()
        };
        assert_eq!(animation.connection_status(), Duration::from_millis(500));
    }

    #[test]
    fn test_disabled_settles_one_shots_only() {
        let animation = AnimationConfig {
            enabled: false,
            ..Default::default()
        };
        assert_eq!(animation.bio_typewriter(), Duration::from_millis(1));
        assert_eq!(animation.skill_counter(), Duration::from_millis(1));
        assert_eq!(animation.cursor_blink(), Duration::from_millis(500));
    }
}
