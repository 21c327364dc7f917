//! Drop payload classification for the editor's import surface.

use tracing::debug;
use url::Url;

use crate::Background;

/// Font size for a newly dropped emoji, in screen points.
///
/// Callers divide this by the current zoom before converting to a model
/// size, so a fresh drop reads the same on screen at any zoom level.
pub const DEFAULT_EMOJI_SIZE: i64 = 40;

/// A payload handed to the drop surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropPayload {
    /// A dropped link.
    Url(Url),
    /// Raw image bytes, from a file drop or a clipboard paste.
    Image(Vec<u8>),
    /// Plain text, possibly an emoji.
    Text(String),
}

/// The document mutation a drop resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropAction {
    /// Replace the background.
    SetBackground(Background),
    /// Add one emoji at the drop location.
    AddEmoji {
        /// The dropped text, kept as-is.
        text: String,
    },
}

/// Classify a drop payload into a document mutation.
///
/// URLs and image bytes become background replacements. Text becomes an
/// emoji when its first character passes `is_emoji`, and is then kept
/// whole; truncating to one `char` would split multi-scalar glyphs. How
/// permissive the predicate is remains the caller's policy: anything it
/// lets through is accepted without further validation.
///
/// Returns `None` for rejected or empty text.
#[must_use]
pub fn classify<F>(payload: DropPayload, is_emoji: F) -> Option<DropAction>
where
    F: Fn(char) -> bool,
{
    match payload {
        DropPayload::Url(url) => Some(DropAction::SetBackground(Background::Url(url))),
        DropPayload::Image(bytes) => Some(DropAction::SetBackground(Background::Bytes(bytes))),
        DropPayload::Text(text) => match text.chars().next() {
            Some(first) if is_emoji(first) => Some(DropAction::AddEmoji { text }),
            Some(first) => {
                debug!(%first, "text drop rejected by emoji predicate");
                None
            }
            None => None,
        },
    }
}
