//! Runtime configuration, read from a TOML file.
//!
//! Every section has defaults, so a file only needs the values it changes:
//!
//! ```toml
//! seed = 42
//!
//! [settle.failure]
//! frames = 30
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::foundation::{DEFAULT_BUILDING_AREA, FLOOR_LOAD_KPA};
use crate::scene::SceneLayout;
use crate::settle::SettleProfile;

/// Top-level configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Seed for every random draw; entropy is used when absent.
    pub seed: Option<u64>,
    /// Drawing surface size.
    pub scene: SceneLayout,
    /// Building load assumptions.
    pub load: LoadConfig,
    /// Settling animation tuning.
    pub settle: SettleConfig,
    /// Cloud animation tuning.
    pub clouds: CloudConfig,
}

impl Config {
    /// Read a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] when the file cannot be read and
    /// [`ConfigError::Parse`] when it is not valid configuration TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&text)
    }

    /// Parse configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when `text` is not valid configuration TOML
    /// and [`ConfigError::Invalid`] when a value is out of range.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every value can drive the scene and the animations.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("scene.width", self.scene.width)?;
        positive("scene.height", self.scene.height)?;
        positive("load.floor_load", self.load.floor_load)?;
        positive("load.default_building_area", self.load.default_building_area)?;
        check_profile("normal", &self.settle.normal)?;
        check_profile("failure", &self.settle.failure)
    }

    /// Remove every pause from the animations.
    #[must_use]
    pub fn without_delays(mut self) -> Self {
        self.settle.normal = self.settle.normal.without_delay();
        self.settle.failure = self.settle.failure.without_delay();
        self.clouds.frame_delay_ms = 0;
        self
    }
}

/// Reject values that are not finite and strictly positive.
fn positive(key: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            key: key.to_owned(),
            reason: "must be a finite number above zero",
        })
    }
}

/// Reject a settling profile whose moves cannot be sampled.
fn check_profile(section: &str, profile: &SettleProfile) -> Result<(), ConfigError> {
    let invalid = |key: &str, reason: &'static str| ConfigError::Invalid {
        key: format!("settle.{section}.{key}"),
        reason,
    };
    if profile.jitter < 0 {
        return Err(invalid("jitter", "must not be negative"));
    }
    if profile.move_floor < 0 {
        return Err(invalid("move_floor", "must not be negative"));
    }
    if profile.move_cap < profile.move_floor {
        return Err(invalid("move_cap", "must not be below move_floor"));
    }
    positive(&format!("settle.{section}.probe_size"), profile.probe_size)?;
    positive(&format!("settle.{section}.depth_divisor"), profile.depth_divisor)
}

/// Building load assumptions.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadConfig {
    /// Load per floor per unit area in kN/m².
    pub floor_load: f64,
    /// Footprint used when the user gives none, in m².
    pub default_building_area: f64,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            floor_load: FLOOR_LOAD_KPA,
            default_building_area: DEFAULT_BUILDING_AREA,
        }
    }
}

/// Profiles for both settling branches.
///
/// Each profile may be given partially; missing fields keep the value of the
/// matching built-in profile.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "SettleOverrides")]
pub struct SettleConfig {
    /// Profile used when the foundation is safe.
    pub normal: SettleProfile,
    /// Profile used after a bearing failure.
    pub failure: SettleProfile,
}

impl Default for SettleConfig {
    fn default() -> Self {
        Self {
            normal: SettleProfile::NORMAL,
            failure: SettleProfile::FAILURE,
        }
    }
}

/// Settling section as written in the file.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct SettleOverrides {
    /// Changes to the normal profile.
    normal: ProfileOverrides,
    /// Changes to the failure profile.
    failure: ProfileOverrides,
}

impl From<SettleOverrides> for SettleConfig {
    fn from(overrides: SettleOverrides) -> Self {
        Self {
            normal: overrides.normal.apply(SettleProfile::NORMAL),
            failure: overrides.failure.apply(SettleProfile::FAILURE),
        }
    }
}

/// Optional replacement for each field of a [`SettleProfile`].
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ProfileOverrides {
    /// Replacement frame count.
    frames: Option<usize>,
    /// Replacement move floor.
    move_floor: Option<i32>,
    /// Replacement move cap.
    move_cap: Option<i32>,
    /// Replacement jitter.
    jitter: Option<i32>,
    /// Replacement frame delay.
    frame_delay_ms: Option<u64>,
    /// Replacement probe size.
    probe_size: Option<f64>,
    /// Replacement depth divisor.
    depth_divisor: Option<f64>,
}

impl ProfileOverrides {
    /// Overlay the given fields on `base`.
    fn apply(self, base: SettleProfile) -> SettleProfile {
        SettleProfile {
            frames: self.frames.unwrap_or(base.frames),
            move_floor: self.move_floor.unwrap_or(base.move_floor),
            move_cap: self.move_cap.unwrap_or(base.move_cap),
            jitter: self.jitter.unwrap_or(base.jitter),
            frame_delay_ms: self.frame_delay_ms.unwrap_or(base.frame_delay_ms),
            probe_size: self.probe_size.unwrap_or(base.probe_size),
            depth_divisor: self.depth_divisor.unwrap_or(base.depth_divisor),
        }
    }
}

/// Cloud drift tuning.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CloudConfig {
    /// Number of frames.
    pub frames: usize,
    /// Pause between frames in milliseconds.
    pub frame_delay_ms: u64,
}

impl CloudConfig {
    /// Pause between frames.
    #[must_use]
    pub fn frame_delay(&self) -> Duration {
        Duration::from_millis(self.frame_delay_ms)
    }
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            frames: 300,
            frame_delay_ms: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let config = Config::from_toml("").expect("empty config parses");
        assert_eq!(config, Config::default());
        assert_eq!(config.settle.normal.frames, 15);
        assert_eq!(config.settle.failure.frames, 20);
        assert_eq!(config.scene.band_top(), 300.0);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = Config::from_toml(
            "seed = 7\n[settle.failure]\nframes = 30\n[load]\nfloor_load = 8.0\n",
        )
        .expect("partial config parses");
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.settle.failure.frames, 30);
        assert_eq!(config.settle.failure.move_floor, 5);
        assert_eq!(config.settle.normal, SettleProfile::NORMAL);
        assert_eq!(config.load.floor_load, 8.0);
        assert_eq!(config.load.default_building_area, 100.0);
    }

    #[test]
    fn malformed_file_is_rejected() {
        let error = Config::from_toml("seed = \"soon\"").expect_err("bad seed rejected");
        assert!(matches!(error, ConfigError::Parse(_)));
    }

    fn rejected_key(text: &str) -> String {
        match Config::from_toml(text) {
            Err(ConfigError::Invalid { key, .. }) => key,
            other => panic!("expected an invalid value, got {other:?}"),
        }
    }

    #[test]
    fn defaults_are_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn negative_jitter_is_rejected() {
        assert_eq!(
            rejected_key("[settle.normal]\njitter = -1\n"),
            "settle.normal.jitter"
        );
    }

    #[test]
    fn negative_move_factor_is_rejected() {
        assert_eq!(
            rejected_key("[settle.failure]\nmove_floor = -4\nmove_cap = -4\n"),
            "settle.failure.move_floor"
        );
        assert_eq!(
            rejected_key("[settle.normal]\nmove_floor = 6\nmove_cap = 3\n"),
            "settle.normal.move_cap"
        );
    }

    #[test]
    fn degenerate_probe_and_divisor_are_rejected() {
        assert_eq!(
            rejected_key("[settle.normal]\nprobe_size = 0.0\n"),
            "settle.normal.probe_size"
        );
        assert_eq!(
            rejected_key("[settle.failure]\ndepth_divisor = nan\n"),
            "settle.failure.depth_divisor"
        );
        assert_eq!(
            rejected_key("[settle.failure]\ndepth_divisor = -8.0\n"),
            "settle.failure.depth_divisor"
        );
    }

    #[test]
    fn unbounded_scene_is_rejected() {
        assert_eq!(rejected_key("[scene]\nwidth = inf\n"), "scene.width");
        assert_eq!(rejected_key("[scene]\nheight = -400.0\n"), "scene.height");
    }

    #[test]
    fn non_positive_load_is_rejected() {
        assert_eq!(rejected_key("[load]\nfloor_load = 0.0\n"), "load.floor_load");
    }

    #[test]
    fn missing_file_reports_path() {
        let error = Config::load("/nonexistent/soilbed.toml").expect_err("missing file");
        assert!(error.to_string().contains("/nonexistent/soilbed.toml"));
    }

    #[test]
    fn delays_can_be_removed() {
        let config = Config::default().without_delays();
        assert!(config.settle.normal.frame_delay().is_zero());
        assert!(config.settle.failure.frame_delay().is_zero());
        assert!(config.clouds.frame_delay().is_zero());
    }

    #[test]
    fn serializes_to_json() {
        let json = serde_json::to_value(Config::default()).expect("config serializes");
        assert_eq!(json["settle"]["normal"]["move_cap"], 10);
        assert_eq!(json["scene"]["width"], 400.0);
    }
}
