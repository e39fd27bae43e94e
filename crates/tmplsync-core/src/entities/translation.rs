//! Template translation entity - one locale of a template on one channel

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{Locale, Snowflake};

/// Translation status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TranslationStatus {
    Pending,
    Approved,
    Rejected,
    /// The template uses components we can't send; overrides the vendor status
    UnsupportedComponents,
}

impl TranslationStatus {
    /// Map a vendor status string, case-insensitively
    ///
    /// Returns `None` for anything the vendor may report that we don't store.
    pub fn from_vendor(status: &str) -> Option<Self> {
        match status.trim().to_ascii_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Single character code used for storage
    pub fn code(self) -> char {
        match self {
            Self::Pending => 'P',
            Self::Approved => 'A',
            Self::Rejected => 'R',
            Self::UnsupportedComponents => 'U',
        }
    }

    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'P' => Some(Self::Pending),
            'A' => Some(Self::Approved),
            'R' => Some(Self::Rejected),
            'U' => Some(Self::UnsupportedComponents),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::UnsupportedComponents => "unsupported_components",
        }
    }
}

impl fmt::Display for TranslationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of value a placeholder expects at send time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    Text,
    Url,
    Image,
    Video,
    Document,
}

/// Parameter descriptor, serialized as `{"type": "text"}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParamDescriptor {
    #[serde(rename = "type")]
    pub kind: ParamKind,
}

impl ParamDescriptor {
    pub const fn new(kind: ParamKind) -> Self {
        Self { kind }
    }

    pub const fn text() -> Self {
        Self::new(ParamKind::Text)
    }
}

/// A normalized template component
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedComponent {
    pub content: String,
    /// `header`, `body`, `footer`, a button kind (`quick_reply`, `url`, ...) or the raw unknown type
    #[serde(rename = "type")]
    pub kind: String,
    /// Button label when the content holds something else (url buttons)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
    #[serde(default)]
    pub params: Vec<ParamDescriptor>,
}

/// Components keyed by `header`, `body`, `footer`, `button.N`, ...
pub type Components = BTreeMap<String, NormalizedComponent>;

/// Keys joined into the legacy single-string content, in display order
const TEXT_KEYS: [&str; 3] = ["header", "body", "footer"];

/// Everything needed to store a translation, produced by normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationDraft {
    pub locale: Locale,
    pub status: TranslationStatus,
    pub external_id: String,
    pub external_locale: String,
    pub namespace: String,
    pub components: Components,
    pub variable_count: i32,
}

/// Stored translation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateTranslation {
    pub id: Snowflake,
    pub template_id: Snowflake,
    pub channel_id: Snowflake,
    pub locale: Locale,
    pub external_locale: String,
    pub external_id: String,
    pub namespace: String,
    pub status: TranslationStatus,
    pub components: Components,
    pub variable_count: i32,
    pub is_active: bool,
    pub created_on: DateTime<Utc>,
}

impl TemplateTranslation {
    /// Create a new active translation from a draft
    #[must_use]
    pub fn from_draft(
        id: Snowflake,
        template_id: Snowflake,
        channel_id: Snowflake,
        draft: TranslationDraft,
    ) -> Self {
        Self {
            id,
            template_id,
            channel_id,
            locale: draft.locale,
            external_locale: draft.external_locale,
            external_id: draft.external_id,
            namespace: draft.namespace,
            status: draft.status,
            components: draft.components,
            variable_count: draft.variable_count,
            is_active: true,
            created_on: Utc::now(),
        }
    }

    /// Whether storing `draft` for `template_id` would change nothing
    pub fn matches_draft(&self, template_id: Snowflake, draft: &TranslationDraft) -> bool {
        self.template_id == template_id
            && self.locale == draft.locale
            && self.external_locale == draft.external_locale
            && self.status == draft.status
            && self.namespace == draft.namespace
            && self.components == draft.components
            && self.variable_count == draft.variable_count
    }

    /// Header, body and footer text joined by blank lines
    pub fn content(&self) -> String {
        TEXT_KEYS
            .iter()
            .filter_map(|key| self.components.get(*key))
            .map(|c| c.content.as_str())
            .filter(|c| !c.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Params of every component that has any
    pub fn params(&self) -> BTreeMap<String, Vec<ParamDescriptor>> {
        self.components
            .iter()
            .filter(|(_, c)| !c.params.is_empty())
            .map(|(key, c)| (key.clone(), c.params.clone()))
            .collect()
    }

    /// One-line description, e.g. `hello (eng) P: Hello {{1}}`
    pub fn summary(&self, template_name: &str) -> String {
        format!(
            "{} ({}) {}: {}",
            template_name,
            self.locale,
            self.status.code(),
            self.content()
        )
    }
}
