//! Window display parameters and their TOML file format.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

/// Application name used for the settings directory.
const APP_NAME: &str = "rackui";

/// File name of the persisted window parameters.
const SETTINGS_FILE: &str = "window.toml";

/// One display parameter of a rack window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowParameter {
    /// Opacity of patch cables.
    CableOpacity,
    /// Sag of patch cables.
    CableTension,
    /// Brightness of the rack and its modules.
    RackBrightness,
    /// Brightness of light halos.
    HaloBrightness,
}

impl WindowParameter {
    /// Number of parameters.
    pub const COUNT: usize = 4;

    /// Every parameter, in declaration order.
    pub const ALL: [WindowParameter; Self::COUNT] = [
        WindowParameter::CableOpacity,
        WindowParameter::CableTension,
        WindowParameter::RackBrightness,
        WindowParameter::HaloBrightness,
    ];

    /// Stable key used in the TOML file.
    pub fn key(self) -> &'static str {
        match self {
            WindowParameter::CableOpacity => "cable_opacity",
            WindowParameter::CableTension => "cable_tension",
            WindowParameter::RackBrightness => "rack_brightness",
            WindowParameter::HaloBrightness => "halo_brightness",
        }
    }

    /// Position in [`ALL`](Self::ALL).
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for WindowParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for WindowParameter {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WindowParameter::ALL
            .into_iter()
            .find(|p| p.key() == s)
            .ok_or_else(|| SettingsError::UnknownParameter(s.to_string()))
    }
}

/// Display parameters of one window. Every value lies in `[0.0, 1.0]`.
///
/// # TOML Format
///
/// ```toml
/// cable_opacity = 0.5
/// cable_tension = 0.5
/// rack_brightness = 1.0
/// halo_brightness = 0.25
/// ```
///
/// Missing keys take their defaults; out-of-range values are clamped on
/// load.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowParameters {
    /// Opacity of patch cables.
    pub cable_opacity: f32,
    /// Sag of patch cables.
    pub cable_tension: f32,
    /// Brightness of the rack and its modules.
    pub rack_brightness: f32,
    /// Brightness of light halos.
    pub halo_brightness: f32,
}

impl Default for WindowParameters {
    fn default() -> Self {
        Self {
            cable_opacity: 0.5,
            cable_tension: 0.5,
            rack_brightness: 1.0,
            halo_brightness: 0.25,
        }
    }
}

impl WindowParameters {
    /// Value of one parameter.
    pub fn get(&self, param: WindowParameter) -> f32 {
        match param {
            WindowParameter::CableOpacity => self.cable_opacity,
            WindowParameter::CableTension => self.cable_tension,
            WindowParameter::RackBrightness => self.rack_brightness,
            WindowParameter::HaloBrightness => self.halo_brightness,
        }
    }

    /// Set one parameter, clamped to `[0.0, 1.0]`.
    ///
    /// Non-finite values are rejected. Returns whether the stored value
    /// changed.
    pub fn set(&mut self, param: WindowParameter, value: f32) -> bool {
        if !value.is_finite() {
            tracing::warn!(%param, value, "ignoring non-finite window parameter");
            return false;
        }
        let value = value.clamp(0.0, 1.0);
        let slot = match param {
            WindowParameter::CableOpacity => &mut self.cable_opacity,
            WindowParameter::CableTension => &mut self.cable_tension,
            WindowParameter::RackBrightness => &mut self.rack_brightness,
            WindowParameter::HaloBrightness => &mut self.halo_brightness,
        };
        if *slot == value {
            return false;
        }
        *slot = value;
        true
    }

    /// Builder form of [`set`](Self::set).
    pub fn with(mut self, param: WindowParameter, value: f32) -> Self {
        self.set(param, value);
        self
    }

    /// Parameters whose values differ from `other`.
    pub fn diff(&self, other: &WindowParameters) -> Vec<WindowParameter> {
        WindowParameter::ALL
            .into_iter()
            .filter(|&p| self.get(p) != other.get(p))
            .collect()
    }

    /// Copy with every value forced into range; non-finite values fall back
    /// to their defaults.
    pub fn sanitized(&self) -> Self {
        let mut out = WindowParameters::default();
        for param in WindowParameter::ALL {
            let value = self.get(param);
            if value.is_finite() {
                out.set(param, value);
            }
        }
        out
    }

    /// Load parameters from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| SettingsError::read_file(path, e))?;
        let params = Self::from_toml(&content)?;
        tracing::debug!(path = %path.display(), "window parameters loaded");
        Ok(params)
    }

    /// Load from a file, or return the defaults if it does not exist yet.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse parameters from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, SettingsError> {
        let params: WindowParameters = toml::from_str(toml_str)?;
        Ok(params.sanitized())
    }

    /// Save the parameters to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| SettingsError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| SettingsError::write_file(path, e))?;
        tracing::debug!(path = %path.display(), "window parameters saved");
        Ok(())
    }

    /// Convert the parameters to a TOML string.
    pub fn to_toml(&self) -> Result<String, SettingsError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Default location of the settings file.
///
/// # Platform Paths
///
/// - Linux: `~/.config/rackui/window.toml`
/// - macOS: `~/Library/Application Support/rackui/window.toml`
/// - Windows: `%APPDATA%\rackui\window.toml`
///
/// Falls back to the working directory if the config directory cannot be
/// determined.
pub fn default_settings_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
        .join(SETTINGS_FILE)
}
