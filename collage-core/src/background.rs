//! Background content for the collage canvas.

use serde::{Deserialize, Serialize};
use url::Url;

/// The background of a collage document.
///
/// Exactly one value at a time; replacing it is an atomic swap on the
/// document. Compared by value: the fetch lifecycle decides whether a
/// completed retrieval is still wanted by comparing against the document's
/// current background.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum Background {
    /// No background.
    #[default]
    Blank,
    /// A remote image addressed by URL, retrieved asynchronously.
    Url(Url),
    /// Image bytes embedded directly in the document.
    Bytes(#[serde(with = "b64")] Vec<u8>),
}

impl Background {
    /// The remote source, if this is a [`Background::Url`].
    #[must_use]
    pub fn url(&self) -> Option<&Url> {
        match self {
            Self::Url(url) => Some(url),
            _ => None,
        }
    }

    /// The embedded bytes, if this is a [`Background::Bytes`].
    #[must_use]
    pub fn bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Whether this is [`Background::Blank`].
    #[must_use]
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Blank)
    }
}

// Embedded bytes can be megabytes; log and panic output must not dump them.
impl std::fmt::Debug for Background {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Blank => write!(f, "Blank"),
            Self::Url(url) => f.debug_tuple("Url").field(&url.as_str()).finish(),
            Self::Bytes(bytes) => f
                .debug_tuple("Bytes")
                .field(&format_args!("{} bytes", bytes.len()))
                .finish(),
        }
    }
}

/// Base64 (standard alphabet) representation for embedded image bytes.
mod b64 {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let text = String::deserialize(deserializer)?;
        STANDARD.decode(text).map_err(serde::de::Error::custom)
    }
}
