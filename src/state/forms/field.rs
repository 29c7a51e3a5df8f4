//! Form field value objects

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{FormError, Result};

/// Options seeded into a choice field created without any.
///
/// These strings are shown to end users until the form owner edits them.
pub const DEFAULT_CHOICE_OPTIONS: [&str; 3] = ["Option 1", "Option 2", "Option 3"];

/// The closed set of supported field types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Email,
    Phone,
    Textarea,
    Select,
    Checkbox,
    Radio,
    Name,
    Date,
    Url,
    File,
    Number,
    Paragraph,
    Payment,
    Heading,
    Divider,
    Image,
}

impl FieldType {
    pub const ALL: [FieldType; 17] = [
        Self::Text,
        Self::Email,
        Self::Phone,
        Self::Textarea,
        Self::Select,
        Self::Checkbox,
        Self::Radio,
        Self::Name,
        Self::Date,
        Self::Url,
        Self::File,
        Self::Number,
        Self::Paragraph,
        Self::Payment,
        Self::Heading,
        Self::Divider,
        Self::Image,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Textarea => "textarea",
            Self::Select => "select",
            Self::Checkbox => "checkbox",
            Self::Radio => "radio",
            Self::Name => "name",
            Self::Date => "date",
            Self::Url => "url",
            Self::File => "file",
            Self::Number => "number",
            Self::Paragraph => "paragraph",
            Self::Payment => "payment",
            Self::Heading => "heading",
            Self::Divider => "divider",
            Self::Image => "image",
        }
    }

    /// Whether values are picked from a declared option list
    pub fn is_choice(&self) -> bool {
        matches!(self, Self::Select | Self::Checkbox | Self::Radio)
    }

    /// Display-only blocks never receive submitted values
    pub fn accepts_input(&self) -> bool {
        !matches!(
            self,
            Self::Paragraph | Self::Heading | Self::Divider | Self::Image
        )
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| FormError::InvalidFieldType(s.to_string()))
    }
}

/// One input element within a form definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FormField {
    pub id: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

impl FormField {
    /// Build a field from a spec, assigning a fresh id
    pub(crate) fn from_spec(spec: FieldSpec) -> Result<Self> {
        let field_type: FieldType = spec.field_type.parse()?;
        let options = resolve_options(field_type, spec.options)?;

        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            field_type,
            label: spec.label,
            placeholder: spec.placeholder,
            required: spec.required,
            options,
            default_value: spec.default_value,
        })
    }

    /// Merge a patch onto this field. Nothing changes when the patch is invalid.
    pub(crate) fn apply(&mut self, patch: FieldPatch) -> Result<()> {
        let field_type = patch.field_type.unwrap_or(self.field_type);

        let options = match patch.options {
            Some(options) => resolve_options(field_type, Some(options))?,
            None if field_type.is_choice() && !self.options.is_empty() => self.options.clone(),
            None => resolve_options(field_type, None)?,
        };

        self.field_type = field_type;
        self.options = options;
        if let Some(label) = patch.label {
            self.label = label;
        }
        if let Some(placeholder) = patch.placeholder {
            self.placeholder = placeholder;
        }
        if let Some(required) = patch.required {
            self.required = required;
        }
        if let Some(default_value) = patch.default_value {
            self.default_value = default_value;
        }
        Ok(())
    }
}

/// Choice types get the supplied options or the defaults; everything else gets none.
fn resolve_options(field_type: FieldType, options: Option<Vec<String>>) -> Result<Vec<String>> {
    match options {
        Some(options) if !field_type.is_choice() => {
            if options.is_empty() {
                Ok(Vec::new())
            } else {
                Err(FormError::OptionsNotAllowed(field_type))
            }
        }
        Some(options) if !options.is_empty() => Ok(options),
        _ if field_type.is_choice() => Ok(DEFAULT_CHOICE_OPTIONS
            .iter()
            .map(|o| o.to_string())
            .collect()),
        _ => Ok(Vec::new()),
    }
}

/// Input to `add_field`. The type is kept as raw text and validated when the
/// field is constructed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSpec {
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub options: Option<Vec<String>>,
    #[serde(default)]
    pub default_value: Option<String>,
}

impl FieldSpec {
    pub fn new(field_type: impl Into<String>) -> Self {
        Self {
            field_type: field_type.into(),
            ..Default::default()
        }
    }

    pub fn of(field_type: FieldType) -> Self {
        Self::new(field_type.as_str())
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = Some(options.into_iter().map(Into::into).collect());
        self
    }

    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }
}

/// Partial update for an existing field.
///
/// `Some(None)` on the nullable members clears them. There is deliberately no
/// `id` member: a field's id never changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FieldPatch {
    #[serde(default, rename = "type")]
    pub field_type: Option<FieldType>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default, with = "double_option")]
    pub placeholder: Option<Option<String>>,
    #[serde(default)]
    pub required: Option<bool>,
    #[serde(default)]
    pub options: Option<Vec<String>>,
    #[serde(default, with = "double_option")]
    pub default_value: Option<Option<String>>,
}

impl FieldPatch {
    pub fn required(required: bool) -> Self {
        Self {
            required: Some(required),
            ..Default::default()
        }
    }

    pub fn label(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Default::default()
        }
    }
}

/// Distinguishes an absent key (no change) from an explicit `null` (clear).
pub(crate) mod double_option {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<T, S>(value: &Option<Option<T>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Serialize,
        S: Serializer,
    {
        match value {
            Some(inner) => inner.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}
