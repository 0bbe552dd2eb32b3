//! # Core Gemini API Data Primitives
//!
//! This module defines the building blocks shared by requests and responses:
//! [`Content`] (one conversational turn), [`Part`] (an atomic piece of a turn)
//! and [`Role`]. Every type here is a plain immutable value; the only
//! validation performed is that a [`Content`] never carries an empty part list.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use snafu::Snafu;
use time::OffsetDateTime;

/// Errors raised while constructing value objects.
#[derive(Debug, Snafu, PartialEq)]
pub enum ContentError {
    #[snafu(display("content for role '{role}' must contain at least one part"))]
    EmptyParts { role: Role },
}

/// Role of a turn in a conversation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Turn produced by the caller
    User,
    /// Turn produced by the model
    Model,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => f.write_str("user"),
            Role::Model => f.write_str("model"),
        }
    }
}

/// Content part that can be included in a turn
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Part {
    /// Text content
    Text {
        /// The text content
        text: String,
    },
    /// Raw media bytes, base64 encoded
    InlineData {
        /// The blob data
        #[serde(rename = "inlineData")]
        inline_data: Blob,
    },
    /// Media referenced by URI
    FileData {
        #[serde(rename = "fileData")]
        file_data: FileData,
    },
}

impl Part {
    /// Create a text part
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Create an inline data part from already base64-encoded data
    pub fn inline_data(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self::InlineData {
            inline_data: Blob::new(mime_type, data),
        }
    }

    /// Create a part referencing a previously uploaded file
    pub fn file_data(mime_type: impl Into<String>, file_uri: impl Into<String>) -> Self {
        Self::FileData {
            file_data: FileData {
                mime_type: mime_type.into(),
                file_uri: file_uri.into(),
            },
        }
    }

    /// Returns the text if this is a text part
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Part::Text { text } => Some(text),
            _ => None,
        }
    }
}

impl From<&str> for Part {
    fn from(text: &str) -> Self {
        Part::text(text)
    }
}

impl From<String> for Part {
    fn from(text: String) -> Self {
        Part::Text { text }
    }
}

impl From<Blob> for Part {
    fn from(inline_data: Blob) -> Self {
        Part::InlineData { inline_data }
    }
}

/// Blob for a message part
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Blob {
    /// The MIME type of the data
    pub mime_type: String,
    /// Base64 encoded data
    pub data: String,
}

impl Blob {
    /// Create a new blob with mime type and already encoded data
    pub fn new(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    /// Create a new blob by base64-encoding raw bytes
    pub fn from_bytes(mime_type: mime::Mime, bytes: impl AsRef<[u8]>) -> Self {
        Self {
            mime_type: mime_type.to_string(),
            data: STANDARD.encode(bytes),
        }
    }

    /// Decode the base64 payload back into raw bytes
    pub fn decode(&self) -> Result<Vec<u8>, base64::DecodeError> {
        STANDARD.decode(&self.data)
    }
}

/// URI based data
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FileData {
    pub mime_type: String,
    pub file_uri: String,
}

/// One turn of a conversation: a role plus a non-empty, ordered list of parts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "RawContent")]
pub struct Content {
    parts: Vec<Part>,
    role: Role,
}

#[derive(Deserialize)]
struct RawContent {
    #[serde(default)]
    parts: Vec<Part>,
    role: Role,
}

impl TryFrom<RawContent> for Content {
    type Error = ContentError;

    fn try_from(raw: RawContent) -> Result<Self, Self::Error> {
        Content::new(raw.role, raw.parts)
    }
}

impl Content {
    /// Create a new turn.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::EmptyParts`] if `parts` yields nothing.
    pub fn new(role: Role, parts: impl IntoIterator<Item = Part>) -> Result<Self, ContentError> {
        let parts: Vec<Part> = parts.into_iter().collect();
        snafu::ensure!(!parts.is_empty(), EmptyPartsSnafu { role });
        Ok(Self { parts, role })
    }

    /// Create a user turn
    pub fn user(parts: impl IntoIterator<Item = Part>) -> Result<Self, ContentError> {
        Self::new(Role::User, parts)
    }

    /// Create a model turn
    pub fn model(parts: impl IntoIterator<Item = Part>) -> Result<Self, ContentError> {
        Self::new(Role::Model, parts)
    }

    /// Create a single-part text turn. Never fails since one part is always present.
    pub fn text(role: Role, text: impl Into<String>) -> Self {
        Self {
            parts: vec![Part::text(text)],
            role,
        }
    }

    /// Parts of the turn, in order
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// Role of the turn
    pub fn role(&self) -> Role {
        self.role
    }

    /// Same parts under a different role
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }
}

/// Citation metadata for content
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CitationMetadata {
    /// The citation sources
    #[serde(default)]
    pub citation_sources: Vec<CitationSource>,
}

/// Citation source
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CitationSource {
    /// The URI of the citation source
    pub uri: Option<String>,
    /// The title of the citation source
    pub title: Option<String>,
    /// The start index of the citation in the response
    pub start_index: Option<i32>,
    /// The end index of the citation in the response
    pub end_index: Option<i32>,
    /// The license of the citation source
    pub license: Option<String>,
    /// The publication date of the citation source
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub publication_date: Option<OffsetDateTime>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_content_is_rejected() {
        let err = Content::user(Vec::<Part>::new()).unwrap_err();
        assert_eq!(err, ContentError::EmptyParts { role: Role::User });
    }

    #[test]
    fn empty_content_on_the_wire_is_rejected() {
        let result = serde_json::from_value::<Content>(json!({"role": "model", "parts": []}));
        assert!(result.is_err());
    }

    #[test]
    fn parts_serialize_in_wire_shape() {
        let content = Content::user(vec![
            Part::text("describe this"),
            Part::inline_data("image/png", "aGVsbG8="),
            Part::file_data("video/mp4", "https://example.com/files/abc"),
        ])
        .unwrap();

        assert_eq!(
            serde_json::to_value(&content).unwrap(),
            json!({
                "parts": [
                    {"text": "describe this"},
                    {"inlineData": {"mimeType": "image/png", "data": "aGVsbG8="}},
                    {"fileData": {"mimeType": "video/mp4", "fileUri": "https://example.com/files/abc"}}
                ],
                "role": "user"
            })
        );
    }

    #[test]
    fn blob_encodes_and_decodes_bytes() {
        let blob = Blob::from_bytes(mime::IMAGE_PNG, b"hello");
        assert_eq!(blob.mime_type, "image/png");
        assert_eq!(blob.data, "aGVsbG8=");
        assert_eq!(blob.decode().unwrap(), b"hello".to_vec());
    }

    #[test]
    fn citation_dates_parse_as_rfc3339() {
        let metadata: CitationMetadata = serde_json::from_value(json!({
            "citationSources": [{
                "uri": "https://example.com",
                "startIndex": 3,
                "endIndex": 10,
                "publicationDate": "2023-05-01T00:00:00Z"
            }]
        }))
        .unwrap();

        let source = &metadata.citation_sources[0];
        assert_eq!(source.start_index, Some(3));
        assert_eq!(source.publication_date.map(|d| d.year()), Some(2023));
    }
}
