//! Game tuning loaded from `~/.flapper/config.json`.
//!
//! Every field has a default, so a config file only needs the values it
//! overrides. A missing default file is not an error; a missing file passed
//! explicitly with `--config` is.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "config.json";
pub const LOG_FILENAME: &str = "flapper.log";

/// Get the ~/.flapper/ directory path, creating it if needed.
pub fn flapper_dir() -> io::Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;
    let dir = home_dir.join(".flapper");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Tunable gameplay and runtime settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Vertical gravity in m/s² (negative pulls down).
    pub gravity: f64,
    /// Upward impulse applied per tap.
    pub flap_impulse: f64,
    /// Vertical opening between the two pipes of a pair, in points.
    pub pipe_gap: f64,
    /// Seconds between pipe spawns while running.
    pub spawn_interval_secs: f64,
    /// Pipe scroll speed in points per second.
    pub pipe_speed: f64,
    /// Ground scroll pace: seconds to travel one point.
    pub ground_seconds_per_point: f64,
    /// Sky scroll pace: seconds to travel one point.
    pub sky_seconds_per_point: f64,
    /// Flash the sky red when the bird crashes.
    pub crash_flash: bool,
    /// One of `trace`, `debug`, `info`, `warn`, `error`.
    pub log_level: String,
    /// Redraws per second.
    pub frame_rate: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gravity: -3.0,
            flap_impulse: 10.0,
            pipe_gap: 150.0,
            spawn_interval_secs: 2.0,
            pipe_speed: 100.0,
            ground_seconds_per_point: 0.02,
            sky_seconds_per_point: 0.1,
            crash_flash: false,
            log_level: "info".to_string(),
            frame_rate: 30,
        }
    }
}

impl Config {
    /// Load from an explicit path, or from `~/.flapper/config.json` when
    /// `path` is `None`.
    pub fn load(path: Option<&Path>) -> io::Result<Self> {
        let config = match path {
            Some(p) => Self::from_file(p)?,
            None => {
                let default_path = flapper_dir()?.join(CONFIG_FILENAME);
                if default_path.exists() {
                    Self::from_file(&default_path)?
                } else {
                    Self::default()
                }
            }
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse a config file without validating it.
    pub fn from_file(path: &Path) -> io::Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> io::Result<Self> {
        serde_json::from_str(json).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Reject values the scene cannot run with.
    pub fn validate(&self) -> io::Result<()> {
        let invalid =
            |msg: String| -> io::Result<()> { Err(io::Error::new(io::ErrorKind::InvalidData, msg)) };

        if !self.gravity.is_finite() || self.gravity >= 0.0 {
            return invalid(format!("gravity must be negative, got {}", self.gravity));
        }
        if !self.flap_impulse.is_finite() || self.flap_impulse <= 0.0 {
            return invalid(format!(
                "flap_impulse must be positive, got {}",
                self.flap_impulse
            ));
        }
        let positive = [
            ("pipe_gap", self.pipe_gap),
            ("spawn_interval_secs", self.spawn_interval_secs),
            ("pipe_speed", self.pipe_speed),
            ("ground_seconds_per_point", self.ground_seconds_per_point),
            ("sky_seconds_per_point", self.sky_seconds_per_point),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return invalid(format!("{} must be positive, got {}", name, value));
            }
        }
        if self.frame_rate == 0 {
            return invalid("frame_rate must be at least 1".to_string());
        }
        if crate::logging::parse_level(&self.log_level).is_none() {
            return invalid(format!("unknown log_level '{}'", self.log_level));
        }
        Ok(())
    }

    /// Gravity converted to points per second squared.
    pub fn gravity_points(&self) -> f64 {
        self.gravity * crate::constants::POINTS_PER_METER
    }

    /// Time budget for one redraw.
    pub fn frame_budget(&self) -> std::time::Duration {
        std::time::Duration::from_millis(1000 / u64::from(self.frame_rate.max(1)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.pipe_gap, 150.0);
        assert_eq!(config.spawn_interval_secs, 2.0);
        assert!(!config.crash_flash);
    }

    #[test]
    fn test_gravity_points_uses_points_per_meter() {
        let config = Config::default();
        assert!((config.gravity_points() - (-450.0)).abs() < 1e-9);
    }

    #[test]
    fn test_partial_json_keeps_other_defaults() {
        let config = Config::from_json(r#"{ "pipe_gap": 120.0, "crash_flash": true }"#)
            .expect("partial config should parse");
        assert_eq!(config.pipe_gap, 120.0);
        assert!(config.crash_flash);
        assert_eq!(config.flap_impulse, Config::default().flap_impulse);
    }

    #[test]
    fn test_malformed_json_is_invalid_data() {
        let err = Config::from_json("{ not json").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_positive_gravity_rejected() {
        let config = Config {
            gravity: 3.0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_gap_rejected() {
        let config = Config {
            pipe_gap: 0.0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_frame_rate_rejected() {
        let config = Config {
            frame_rate: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_log_level_rejected() {
        let config = Config {
            log_level: "loud".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let path = std::env::temp_dir().join("flapper_missing_config_98765.json");
        let err = Config::load(Some(&path)).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_load_explicit_file() {
        let path = std::env::temp_dir().join("flapper_config_load_test.json");
        fs::write(&path, r#"{ "spawn_interval_secs": 1.5 }"#).expect("write temp config");

        let config = Config::load(Some(&path)).expect("config should load");
        assert_eq!(config.spawn_interval_secs, 1.5);

        fs::remove_file(path).ok();
    }

    #[test]
    fn test_frame_budget() {
        let config = Config {
            frame_rate: 50,
            ..Config::default()
        };
        assert_eq!(config.frame_budget().as_millis(), 20);
    }
}
