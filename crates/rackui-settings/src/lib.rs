//! Display parameters of rack windows.
//!
//! Every window carries four display values (cable opacity, cable tension,
//! rack brightness, halo brightness). This crate stores them per window,
//! notifies one listener per window when they change, and persists them as
//! TOML.
//!
//! # Example
//!
//! ```rust,no_run
//! use rackui_settings::{
//!     WindowId, WindowParameter, WindowParameters, WindowRegistry, default_settings_path,
//! };
//!
//! let path = default_settings_path();
//! let initial = WindowParameters::load_or_default(&path).unwrap();
//! let mut registry = WindowRegistry::with_initial(initial);
//!
//! let window = WindowId(1);
//! registry.set_callback(window, |param, value| {
//!     println!("{param} -> {value}");
//! });
//! registry.set_value(window, WindowParameter::CableTension, 0.8);
//!
//! registry.values(window).save(&path).unwrap();
//! ```

mod error;
mod params;
mod registry;

pub use error::SettingsError;
pub use params::{WindowParameter, WindowParameters, default_settings_path};
pub use registry::{ParameterListener, WindowId, WindowRegistry};
