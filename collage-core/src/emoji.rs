//! Emoji elements placed on the collage.

use serde::{Deserialize, Serialize};

/// Unique identifier for an emoji within one document.
///
/// Ids come from the owning [`Document`](crate::Document)'s monotonic
/// counter and are never reused, even after the emoji is deleted. Identity
/// is always the id; two emojis with equal fields are still distinct.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct EmojiId(u64);

impl EmojiId {
    pub(crate) const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw counter value behind this id.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for EmojiId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single emoji placed on the collage.
///
/// Position and size live in integer model units; `x` and `y` are offsets
/// from the canvas center, `size` is the font size. Screen placement is
/// derived from these by [`ViewState`](crate::ViewState).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Emoji {
    /// Stable identity assigned at creation.
    pub id: EmojiId,
    /// The glyph, kept as the short grapheme string it was dropped as.
    pub text: String,
    /// Horizontal offset from the canvas center, in model units.
    pub x: i64,
    /// Vertical offset from the canvas center, in model units.
    pub y: i64,
    /// Font size in model units. Always at least 1.
    pub size: i64,
    /// Whether this emoji is part of the current selection.
    pub selected: bool,
}

impl Emoji {
    pub(crate) fn new(id: EmojiId, text: impl Into<String>, x: i64, y: i64, size: i64) -> Self {
        Self {
            id,
            text: text.into(),
            x,
            y,
            size: size.max(1),
            selected: false,
        }
    }
}
