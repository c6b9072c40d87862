//! Core data models for the MT management API

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Single record envelope: `{ "data": T }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseObject<T> {
    /// Wrapped record
    pub data: T,
}

/// Page bounds of a list response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Pagination {
    /// Index of the first returned item
    pub offset: u64,
    /// Maximum number of items in the page
    pub limit: u64,
}

/// One page of a list query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseList<T> {
    /// Items, each in its own envelope
    pub data: Vec<ResponseObject<T>>,
    /// Page bounds
    pub pagination: Pagination,
}

impl<T> ResponseList<T> {
    /// Number of items in the page
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True if the page has no items
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Iterate over the unwrapped records
    pub fn records(&self) -> impl Iterator<Item = &T> {
        self.data.iter().map(|item| &item.data)
    }
}

/// Machine translation engine record
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineTranslation {
    /// Server-assigned id
    pub id: u64,
    /// Group the engine belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<u64>,
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Provider type, e.g. `google` or `deepl`
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub engine_type: Option<String>,
    /// Provider-specific credentials, e.g. `{ "apiKey": "..." }`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<Value>,
    /// Projects using the engine
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_ids: Option<Vec<u64>>,
    /// Languages the provider supports
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supported_language_ids: Option<Vec<String>>,
    /// Supported source/target pairs, provider-specific
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supported_language_pairs: Option<Value>,
    /// Languages the engine is enabled for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled_language_ids: Option<Vec<String>>,
    /// Projects the engine is enabled for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled_project_ids: Option<Vec<u64>>,
    /// Whether the engine is active
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_enabled: Option<bool>,
}

/// Body of `POST /mts`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddMtRequest {
    /// Display name
    pub name: String,
    /// Provider type
    #[serde(rename = "type")]
    pub engine_type: String,
    /// Provider-specific credentials, sent as given
    pub credentials: Value,
    /// Group to create the engine in
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<u64>,
    /// Languages to enable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled_language_ids: Option<Vec<String>>,
    /// Projects to enable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled_project_ids: Option<Vec<u64>>,
    /// Create enabled or disabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_enabled: Option<bool>,
}

impl AddMtRequest {
    /// Create a request with only the required fields
    pub fn new(name: impl Into<String>, engine_type: impl Into<String>, credentials: Value) -> Self {
        Self {
            name: name.into(),
            engine_type: engine_type.into(),
            credentials,
            group_id: None,
            enabled_language_ids: None,
            enabled_project_ids: None,
            is_enabled: None,
        }
    }

    /// Set the group
    pub fn with_group_id(mut self, group_id: u64) -> Self {
        self.group_id = Some(group_id);
        self
    }

    /// Set the enabled languages
    pub fn with_enabled_language_ids(mut self, ids: Vec<String>) -> Self {
        self.enabled_language_ids = Some(ids);
        self
    }

    /// Set the enabled projects
    pub fn with_enabled_project_ids(mut self, ids: Vec<u64>) -> Self {
        self.enabled_project_ids = Some(ids);
        self
    }

    /// Enable or disable the engine
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.is_enabled = Some(enabled);
        self
    }
}

/// Filter for `GET /mts`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListMtsOptions {
    /// Only engines of this group
    pub group_id: Option<u64>,
    /// Page size
    pub limit: Option<u64>,
    /// Page start
    pub offset: Option<u64>,
}

impl ListMtsOptions {
    /// No filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by group
    pub fn group_id(mut self, group_id: u64) -> Self {
        self.group_id = Some(group_id);
        self
    }

    /// Set the page size
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the page start
    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Query parameters, present fields only
    pub fn to_query(&self) -> Vec<(String, String)> {
        [
            ("groupId", self.group_id),
            ("limit", self.limit),
            ("offset", self.offset),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key.to_string(), v.to_string())))
        .collect()
    }
}

/// JSON-Patch operation kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchOperation {
    /// Add a value
    Add,
    /// Remove a value
    Remove,
    /// Replace a value
    Replace,
    /// Move a value
    Move,
    /// Copy a value
    Copy,
    /// Assert a value
    Test,
}

impl fmt::Display for PatchOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PatchOperation::Add => "add",
            PatchOperation::Remove => "remove",
            PatchOperation::Replace => "replace",
            PatchOperation::Move => "move",
            PatchOperation::Copy => "copy",
            PatchOperation::Test => "test",
        };
        write!(f, "{}", s)
    }
}

/// One step of a partial update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatchRequest {
    /// Operation kind
    pub op: PatchOperation,
    /// Field reference such as `/name`
    pub path: String,
    /// Operand; absent for `remove`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl PatchRequest {
    /// `replace` the value at `path`
    pub fn replace(path: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            op: PatchOperation::Replace,
            path: path.into(),
            value: Some(value.into()),
        }
    }

    /// `add` a value at `path`
    pub fn add(path: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            op: PatchOperation::Add,
            path: path.into(),
            value: Some(value.into()),
        }
    }

    /// `remove` the value at `path`
    pub fn remove(path: impl Into<String>) -> Self {
        Self {
            op: PatchOperation::Remove,
            path: path.into(),
            value: None,
        }
    }
}

/// Body of `POST /mts/{id}/translations`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateRequest {
    /// Language to translate into
    pub target_language_id: String,
    /// Language of the input; detected when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_language_id: Option<String>,
    /// Provider used to detect the source language when it is not given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_recognition_provider: Option<String>,
    /// Texts to translate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strings: Option<Vec<String>>,
}

impl TranslateRequest {
    /// Request targeting one language
    pub fn new(target_language_id: impl Into<String>) -> Self {
        Self {
            target_language_id: target_language_id.into(),
            source_language_id: None,
            language_recognition_provider: None,
            strings: None,
        }
    }

    /// Set the source language
    pub fn with_source_language(mut self, source_language_id: impl Into<String>) -> Self {
        self.source_language_id = Some(source_language_id.into());
        self
    }

    /// Set the recognition provider
    pub fn with_recognition_provider(mut self, provider: impl Into<String>) -> Self {
        self.language_recognition_provider = Some(provider.into());
        self
    }

    /// Set the texts
    pub fn with_strings(mut self, strings: Vec<String>) -> Self {
        self.strings = Some(strings);
        self
    }
}

/// Translation relayed from the provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationResult {
    /// Language translated into
    pub target_language_id: String,
    /// Source language used or detected
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_language_id: Option<String>,
    /// Input texts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strings: Option<Vec<String>>,
    /// Translated texts, in input order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translations: Option<Vec<String>>,
}
