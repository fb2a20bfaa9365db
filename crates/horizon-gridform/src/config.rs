//! Controller configuration.
//!
//! Configuration can be built in code or loaded from JSON or TOML. Keys are
//! camelCase in both formats:
//!
//! ```toml
//! interactionMode = "formDialog"
//! label = "Contacts"
//! addButtonOrigin = "left"
//! actionPlacement = "trailing"
//! ```
//!
//! Every key is optional; see [`ControllerConfig::default`].

use std::fmt;
use std::path::Path;

use horizon_gridform_core::logging::targets;
use horizon_gridform_core::{GridFormError, Result};
use serde::{Deserialize, Serialize};

use crate::model::ActionPlacement;

/// How new rows are entered.
///
/// Parsed from configuration text. Text naming no known mode is kept as
/// [`InteractionMode::Unrecognized`] so the misconfiguration can be reported
/// where it matters instead of failing the whole load.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum InteractionMode {
    /// An always-mounted inline form; the add button appends its values.
    #[default]
    InlineForm,
    /// The add button opens a modal dialog.
    ModalDialog,
    /// Configuration text that names no known mode.
    Unrecognized(String),
}

impl InteractionMode {
    /// Returns the canonical configuration text.
    pub fn as_str(&self) -> &str {
        match self {
            Self::InlineForm => "form",
            Self::ModalDialog => "formDialog",
            Self::Unrecognized(name) => name,
        }
    }

    /// Returns `true` for the known modes.
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }
}

impl From<&str> for InteractionMode {
    fn from(text: &str) -> Self {
        match text {
            "form" | "inlineForm" => Self::InlineForm,
            "formDialog" | "modalDialog" => Self::ModalDialog,
            other => Self::Unrecognized(other.to_owned()),
        }
    }
}

impl From<String> for InteractionMode {
    fn from(text: String) -> Self {
        Self::from(text.as_str())
    }
}

impl From<InteractionMode> for String {
    fn from(mode: InteractionMode) -> Self {
        mode.as_str().to_owned()
    }
}

impl fmt::Display for InteractionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which side of the toolbar the add button sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddButtonOrigin {
    /// Leading side.
    Left,
    /// Trailing side.
    #[default]
    Right,
}

/// Configuration for a [`CrudController`](crate::controller::CrudController).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ControllerConfig {
    /// How new rows are entered.
    #[serde(alias = "addInterface")]
    pub interaction_mode: InteractionMode,
    /// Title shown in the header bar.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Whether the header bar is shown.
    pub show_header: bool,
    /// Which side the add button sits on.
    pub add_button_origin: AddButtonOrigin,
    /// Grid height in pixels.
    pub height: u32,
    /// Accepted for compatibility; currently has no effect.
    pub edit_only: bool,
    /// Where the edit and remove columns are pinned.
    pub action_placement: ActionPlacement,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            interaction_mode: InteractionMode::InlineForm,
            label: None,
            show_header: true,
            add_button_origin: AddButtonOrigin::Right,
            height: 400,
            edit_only: false,
            action_placement: ActionPlacement::Leading,
        }
    }
}

impl ControllerConfig {
    /// Creates the default configuration with the given interaction mode.
    pub fn with_mode(interaction_mode: InteractionMode) -> Self {
        Self {
            interaction_mode,
            ..Default::default()
        }
    }

    /// Parses a JSON configuration.
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Parses a TOML configuration.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Loads a configuration file, choosing the parser by extension
    /// (`.json` or `.toml`).
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        let parse: fn(&str) -> Result<Self> = match extension.as_deref() {
            Some("json") => Self::from_json_str,
            Some("toml") => Self::from_toml_str,
            _ => return Err(GridFormError::UnsupportedConfigFormat(path.to_path_buf())),
        };

        let text = std::fs::read_to_string(path).map_err(|err| GridFormError::io(path, err))?;
        let config = parse(&text)?;
        tracing::debug!(
            target: targets::CONFIG,
            path = %path.display(),
            mode = %config.interaction_mode,
            "loaded controller configuration"
        );
        Ok(config)
    }

    /// Reports configuration the controller cannot act on.
    pub fn validate(&self) -> Result<()> {
        match &self.interaction_mode {
            InteractionMode::Unrecognized(name) => {
                Err(GridFormError::invalid_interaction_mode(name.clone()))
            }
            _ => Ok(()),
        }
    }
}
