//! Visual style configuration for a form

use serde::{Deserialize, Serialize};

use crate::error::{FormError, Result};

/// Current version of the style schema
pub const STYLE_SCHEMA_VERSION: u32 = 1;

/// Fixed, versioned style schema.
///
/// Every key must be present in a stored record so that missing or unknown
/// keys are caught when the record is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FormStyle {
    pub schema_version: u32,
    pub background_color: String,
    pub gradient: bool,
    /// Ignored unless `gradient` is set, but kept so records round-trip
    pub gradient_start: String,
    pub gradient_end: String,
    pub button_color: String,
    pub button_text_color: String,
    pub label_color: String,
    pub input_border_color: String,
    pub input_background_color: String,
    pub input_text_color: String,
    /// Pixels
    pub border_radius: u32,
    /// Pixels
    pub padding: u32,
    pub font_family: String,
}

impl Default for FormStyle {
    fn default() -> Self {
        Self {
            schema_version: STYLE_SCHEMA_VERSION,
            background_color: "#ffffff".to_string(),
            gradient: false,
            gradient_start: "#6366f1".to_string(),
            gradient_end: "#8b5cf6".to_string(),
            button_color: "#4f46e5".to_string(),
            button_text_color: "#ffffff".to_string(),
            label_color: "#111827".to_string(),
            input_border_color: "#d1d5db".to_string(),
            input_background_color: "#ffffff".to_string(),
            input_text_color: "#111827".to_string(),
            border_radius: 8,
            padding: 24,
            font_family: "Inter, sans-serif".to_string(),
        }
    }
}

impl FormStyle {
    pub fn validate(&self) -> Result<()> {
        if self.schema_version != STYLE_SCHEMA_VERSION {
            return Err(FormError::InvalidStyle(format!(
                "unsupported schema version {}",
                self.schema_version
            )));
        }
        if self.gradient
            && (self.gradient_start.trim().is_empty() || self.gradient_end.trim().is_empty())
        {
            return Err(FormError::InvalidStyle(
                "gradient requires both gradient stops".to_string(),
            ));
        }
        Ok(())
    }

    /// Shallow-merge a patch, returning the merged style if it is valid.
    pub fn merged(&self, patch: StylePatch) -> Result<Self> {
        let mut style = self.clone();
        macro_rules! merge {
            ($($key:ident),* $(,)?) => {
                $(if let Some(value) = patch.$key {
                    style.$key = value;
                })*
            };
        }
        merge!(
            background_color,
            gradient,
            gradient_start,
            gradient_end,
            button_color,
            button_text_color,
            label_color,
            input_border_color,
            input_background_color,
            input_text_color,
            border_radius,
            padding,
            font_family,
        );
        style.validate()?;
        Ok(style)
    }
}

/// Partial style update; absent keys keep their current value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct StylePatch {
    #[serde(default)]
    pub background_color: Option<String>,
    #[serde(default)]
    pub gradient: Option<bool>,
    #[serde(default)]
    pub gradient_start: Option<String>,
    #[serde(default)]
    pub gradient_end: Option<String>,
    #[serde(default)]
    pub button_color: Option<String>,
    #[serde(default)]
    pub button_text_color: Option<String>,
    #[serde(default)]
    pub label_color: Option<String>,
    #[serde(default)]
    pub input_border_color: Option<String>,
    #[serde(default)]
    pub input_background_color: Option<String>,
    #[serde(default)]
    pub input_text_color: Option<String>,
    #[serde(default)]
    pub border_radius: Option<u32>,
    #[serde(default)]
    pub padding: Option<u32>,
    #[serde(default)]
    pub font_family: Option<String>,
}
