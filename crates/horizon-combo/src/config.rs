//! Controller configuration.
//!
//! A [`ComboConfig`] can be built in code or loaded from TOML. Every field
//! has a default, so a configuration file only needs the keys it changes:
//!
//! ```toml
//! display_path = "Name"
//! value_path = "Id"
//! open_on_focus = false
//! ```

use std::path::Path;

use horizon_combo_core::targets;
use serde::{Deserialize, Serialize};

use crate::error::{ComboError, Result};

/// Behaviour and projection settings for a [`ComboController`](crate::ComboController).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComboConfig {
    /// Field used to derive display text. `None` uses the natural string.
    pub display_path: Option<String>,
    /// Field used to derive the selected value. `None` uses the item itself.
    pub value_path: Option<String>,
    /// Open the list when the user starts typing.
    pub open_on_type: bool,
    /// Open the list when focus arrives from outside the widget.
    pub open_on_focus: bool,
    /// Select all text when focus arrives from outside the widget.
    pub select_all_on_focus: bool,
    /// Ignore typing and focus until the host reports it has loaded.
    pub defer_until_loaded: bool,
}

impl Default for ComboConfig {
    fn default() -> Self {
        Self {
            display_path: None,
            value_path: None,
            open_on_type: true,
            open_on_focus: true,
            select_all_on_focus: true,
            defer_until_loaded: true,
        }
    }
}

impl ComboConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a configuration file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ComboError::io(path, e))?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(target: targets::CONFIG, path = %path.display(), "loaded combo configuration");
        Ok(config)
    }

    /// Serialize the configuration to TOML text.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check that the configuration is usable.
    ///
    /// A projection path, when present, must name a field: an empty string
    /// is rejected rather than silently treated as "no path".
    pub fn validate(&self) -> Result<()> {
        for (field, path) in [
            ("display_path", &self.display_path),
            ("value_path", &self.value_path),
        ] {
            if let Some(path) = path
                && path.trim().is_empty()
            {
                return Err(ComboError::invalid_config(field, "path must not be empty"));
            }
        }
        Ok(())
    }

    /// Set display path using builder pattern.
    pub fn with_display_path(mut self, path: impl Into<String>) -> Self {
        self.display_path = Some(path.into());
        self
    }

    /// Set value path using builder pattern.
    pub fn with_value_path(mut self, path: impl Into<String>) -> Self {
        self.value_path = Some(path.into());
        self
    }

    /// Set whether typing opens the list.
    pub fn with_open_on_type(mut self, open: bool) -> Self {
        self.open_on_type = open;
        self
    }

    /// Set whether focus from outside opens the list.
    pub fn with_open_on_focus(mut self, open: bool) -> Self {
        self.open_on_focus = open;
        self
    }

    /// Set whether focus from outside selects all text.
    pub fn with_select_all_on_focus(mut self, select_all: bool) -> Self {
        self.select_all_on_focus = select_all;
        self
    }

    /// Set whether the controller waits for the host's load notification.
    pub fn with_defer_until_loaded(mut self, defer: bool) -> Self {
        self.defer_until_loaded = defer;
        self
    }
}
