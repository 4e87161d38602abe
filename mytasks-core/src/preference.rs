//! Light/dark display preference
//!
//! Stored under its own key, independent of the task list.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Result;
use crate::store::KeyValueStore;

/// Store key holding the serialized color scheme
pub const COLOR_SCHEME_KEY: &str = "color-scheme";

/// Display color scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

impl ColorScheme {
    /// The other scheme
    pub fn toggle(self) -> Self {
        match self {
            ColorScheme::Light => ColorScheme::Dark,
            ColorScheme::Dark => ColorScheme::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ColorScheme::Light => "light",
            ColorScheme::Dark => "dark",
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, ColorScheme::Dark)
    }
}

impl std::fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read the stored scheme, defaulting to light
pub fn get_preference<S: KeyValueStore + ?Sized>(store: &S) -> ColorScheme {
    let raw = match store.get_item(COLOR_SCHEME_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return ColorScheme::default(),
        Err(e) => {
            warn!(error = %e, "failed to read color scheme, using default");
            return ColorScheme::default();
        }
    };

    serde_json::from_str(&raw).unwrap_or_else(|e| {
        warn!(error = %e, raw = %raw, "invalid stored color scheme, using default");
        ColorScheme::default()
    })
}

/// Overwrite the stored scheme
pub fn set_preference<S: KeyValueStore + ?Sized>(store: &mut S, scheme: ColorScheme) -> Result<()> {
    let raw = serde_json::to_string(&scheme)?;
    store.set_item(COLOR_SCHEME_KEY, &raw)?;
    debug!(scheme = %scheme, "saved color scheme");
    Ok(())
}

/// Flip the stored scheme and return the new value
pub fn toggle<S: KeyValueStore + ?Sized>(store: &mut S) -> Result<ColorScheme> {
    let next = get_preference(&*store).toggle();
    set_preference(store, next)?;
    Ok(next)
}
