//! Field values held in a wizard draft.
//!
//! A draft maps field names to tagged values. The tag is persisted so a
//! restored draft can be checked against the wizard's field schema.

use serde::{Deserialize, Serialize};

/// A user-selected file referenced by a draft.
///
/// Only the location and metadata are stored; the bytes are read once, when
/// the submission request is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRef {
    pub path: String,
    pub file_name: String,
    pub size_bytes: u64,
    pub content_type: String,
}

impl FileRef {
    /// Lowercased extension of `file_name`, without the dot.
    pub fn extension(&self) -> Option<String> {
        self.file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .filter(|ext| !ext.is_empty())
    }
}

/// Value of one draft field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
    Flag(bool),
    File(Option<FileRef>),
    Choice(String),
}

impl FieldValue {
    /// Name of the variant, used in type-mismatch errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValue::Text(_) => "text",
            FieldValue::List(_) => "list",
            FieldValue::Flag(_) => "flag",
            FieldValue::File(_) => "file",
            FieldValue::Choice(_) => "choice",
        }
    }

    /// Whether two values have the same variant.
    pub fn same_type(&self, other: &FieldValue) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) | FieldValue::Choice(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            FieldValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            FieldValue::Flag(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_file(&self) -> Option<&FileRef> {
        match self {
            FieldValue::File(file) => file.as_ref(),
            _ => None,
        }
    }

    /// True when the value carries no user input.
    ///
    /// Text is blank when it trims to empty, a list when every entry does,
    /// a file when none is selected. Flags are never blank.
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Text(s) | FieldValue::Choice(s) => s.trim().is_empty(),
            FieldValue::List(items) => items.iter().all(|i| i.trim().is_empty()),
            FieldValue::Flag(_) => false,
            FieldValue::File(file) => file.is_none(),
        }
    }
}
