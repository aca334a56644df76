//! Core data type definitions

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Field holding the snippet title
pub const TITLE_FIELD: &str = "title";
/// Field holding the snippet's programming language tag
pub const LANGUAGE_FIELD: &str = "programmingLanguage";

/// A problem found in a raw store document at the read boundary
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error("document is not an object (found {found})")]
    NotAnObject { found: &'static str },

    #[error("field '{field}' must be a string or null (found {found})")]
    InvalidField {
        field: &'static str,
        found: &'static str,
    },
}

/// A code snippet document as read from the store.
///
/// Only `title` and `programmingLanguage` are interpreted; every other field
/// is carried through untouched in `extra`. Both interpreted fields are
/// optional, and a value that is not a string reads as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnippetDocument {
    /// Store-assigned identity, if the store exposes one
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(rename = "programmingLanguage", default)]
    pub programming_language: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SnippetDocument {
    /// Read a loosely-typed store document as a snippet.
    ///
    /// Never fails: a non-object becomes an empty snippet and badly typed
    /// fields read as absent. Whatever had to be ignored is returned
    /// alongside so the caller can report it.
    pub fn from_value(value: Value) -> (Self, Vec<DocumentError>) {
        let mut fields = match value {
            Value::Object(map) => map,
            other => {
                let issue = DocumentError::NotAnObject {
                    found: json_kind(&other),
                };
                return (Self::default(), vec![issue]);
            }
        };

        let mut issues = Vec::new();
        let title = take_optional_string(&mut fields, TITLE_FIELD, &mut issues);
        let programming_language = take_optional_string(&mut fields, LANGUAGE_FIELD, &mut issues);

        // Identity is opaque: stores may hand out strings, numbers or
        // driver-specific objects.
        let id = fields.remove("_id").and_then(|id| match id {
            Value::Null => None,
            Value::String(s) => Some(s),
            other => Some(other.to_string()),
        });

        let snippet = Self {
            id,
            title,
            programming_language,
            extra: fields,
        };
        (snippet, issues)
    }

    /// Title to show in summaries; absent titles read as "Untitled"
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("Untitled")
    }
}

fn take_optional_string(
    fields: &mut Map<String, Value>,
    field: &'static str,
    issues: &mut Vec<DocumentError>,
) -> Option<String> {
    match fields.remove(field) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => {
            issues.push(DocumentError::InvalidField {
                field,
                found: json_kind(&other),
            });
            None
        }
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Number of snippets sharing one programming language.
///
/// `language` is `None` for the group of snippets that carry no language tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct LanguageCount {
    #[cfg_attr(feature = "openapi", schema(example = "python"))]
    pub language: Option<String>,
    #[cfg_attr(feature = "openapi", schema(example = 42))]
    pub count: u64,
}

impl LanguageCount {
    pub fn new(language: Option<impl Into<String>>, count: u64) -> Self {
        Self {
            language: language.map(Into::into),
            count,
        }
    }
}

/// Language counts ordered by count, largest first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(transparent)]
pub struct LanguageDistribution(Vec<LanguageCount>);

impl LanguageDistribution {
    /// Build a distribution, ordering entries by count descending.
    ///
    /// The sort is stable, so entries with equal counts keep the order
    /// they were given in.
    pub fn from_counts(mut counts: Vec<LanguageCount>) -> Self {
        counts.sort_by(|a, b| b.count.cmp(&a.count));
        Self(counts)
    }

    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Sum of all counts
    pub fn total(&self) -> u64 {
        self.0.iter().map(|entry| entry.count).sum()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LanguageCount> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[LanguageCount] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a LanguageDistribution {
    type Item = &'a LanguageCount;
    type IntoIter = std::slice::Iter<'a, LanguageCount>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Supported chart kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub enum ChartKind {
    #[serde(rename = "language-pie")]
    LanguagePie,
}

impl ChartKind {
    pub const ALL: [ChartKind; 1] = [ChartKind::LanguagePie];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::LanguagePie => "language-pie",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a chart type name is not recognised
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown chart type: {0}")]
pub struct UnknownChartKind(pub String);

impl FromStr for ChartKind {
    type Err = UnknownChartKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChartKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownChartKind(s.to_string()))
    }
}

/// A rendered chart, PNG-encoded then base64-encoded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ChartArtifact {
    pub kind: ChartKind,
    /// Base64 of the PNG bytes
    pub data: String,
}

impl ChartArtifact {
    pub fn new(kind: ChartKind, data: String) -> Self {
        Self { kind, data }
    }
}

/// Summary payload backing the dashboard view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct DashboardSummary {
    /// Number of snippets in the capped sample, not the whole collection
    #[cfg_attr(feature = "openapi", schema(example = 100))]
    pub total_snippets: u64,
    pub language_distribution: LanguageDistribution,
    /// Titles of the first sampled snippets, each at most 50 characters
    pub sample_titles: Vec<String>,
    pub message: String,
}
