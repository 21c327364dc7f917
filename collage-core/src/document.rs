//! The collage document: one background plus placed emojis.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Background, Emoji, EmojiId};

/// A collage document.
///
/// Emojis are stored by id with a separate insertion-order list that doubles
/// as back-to-front draw order. Ids come from a monotonic counter and are
/// never reused, so a stale id held across a delete simply misses; every
/// mutation below is a silent no-op on a missing id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    background: Background,
    emojis: HashMap<EmojiId, Emoji>,
    order: Vec<EmojiId>,
    next_id: u64,
}

impl Document {
    /// Create an empty document: blank background, no emojis.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current background.
    #[must_use]
    pub fn background(&self) -> &Background {
        &self.background
    }

    /// Replace the background, returning the previous value.
    ///
    /// The swap is unconditional; the caller compares old and new to decide
    /// whether a retrieval has to (re)start.
    pub fn set_background(&mut self, background: Background) -> Background {
        let previous = std::mem::replace(&mut self.background, background);
        debug!(from = ?previous, to = ?self.background, "background set");
        previous
    }

    /// Add an emoji at a model-space position, allocating the next id.
    ///
    /// `size` is clamped to at least 1. Returns the new emoji's id.
    pub fn add_emoji(&mut self, text: impl Into<String>, x: i64, y: i64, size: i64) -> EmojiId {
        self.next_id += 1;
        let id = EmojiId::new(self.next_id);
        self.emojis.insert(id, Emoji::new(id, text, x, y, size));
        self.order.push(id);
        id
    }

    /// Remove an emoji. Returns the removed emoji, or `None` on a stale id.
    pub fn remove(&mut self, id: EmojiId) -> Option<Emoji> {
        let removed = self.emojis.remove(&id);
        if removed.is_some() {
            self.order.retain(|&existing| existing != id);
        }
        removed
    }

    /// Look up an emoji by id.
    #[must_use]
    pub fn emoji(&self, id: EmojiId) -> Option<&Emoji> {
        self.emojis.get(&id)
    }

    /// Mutable lookup by id.
    pub fn emoji_mut(&mut self, id: EmojiId) -> Option<&mut Emoji> {
        self.emojis.get_mut(&id)
    }

    /// Emojis in insertion order (back-to-front draw order).
    pub fn emojis(&self) -> impl Iterator<Item = &Emoji> {
        self.order.iter().filter_map(|id| self.emojis.get(id))
    }

    /// Number of placed emojis.
    #[must_use]
    pub fn emoji_count(&self) -> usize {
        self.emojis.len()
    }

    /// True when the background is blank and nothing is placed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.emojis.is_empty() && self.background.is_blank()
    }

    /// Move one emoji by a model-space offset.
    pub fn move_emoji(&mut self, id: EmojiId, dx: i64, dy: i64) {
        if let Some(emoji) = self.emojis.get_mut(&id) {
            emoji.x += dx;
            emoji.y += dy;
        }
    }

    /// Scale one emoji's size by `factor`.
    ///
    /// The product rounds half away from zero and is clamped to at least 1,
    /// so an emoji can never shrink out of existence.
    pub fn resize_emoji(&mut self, id: EmojiId, factor: f64) {
        if let Some(emoji) = self.emojis.get_mut(&id) {
            emoji.size = scaled_size(emoji.size, factor);
        }
    }

    /// Toggle one emoji's selection flag.
    pub fn toggle_selected(&mut self, id: EmojiId) {
        if let Some(emoji) = self.emojis.get_mut(&id) {
            emoji.selected = !emoji.selected;
        }
    }

    /// Clear every selection flag.
    pub fn deselect_all(&mut self) {
        for emoji in self.emojis.values_mut() {
            emoji.selected = false;
        }
    }

    /// Whether any emoji is selected.
    #[must_use]
    pub fn any_selected(&self) -> bool {
        self.emojis.values().any(|emoji| emoji.selected)
    }

    /// Number of selected emojis.
    #[must_use]
    pub fn selected_count(&self) -> usize {
        self.emojis.values().filter(|emoji| emoji.selected).count()
    }

    /// Ids of the selected emojis, in insertion order.
    #[must_use]
    pub fn selected_ids(&self) -> Vec<EmojiId> {
        self.emojis()
            .filter(|emoji| emoji.selected)
            .map(|emoji| emoji.id)
            .collect()
    }

    /// Move every selected emoji by a model-space offset.
    ///
    /// With nothing selected this touches nothing: dragging an empty
    /// selection pans the view, which is session state, not document state.
    pub fn move_selected(&mut self, dx: i64, dy: i64) {
        for emoji in self.emojis.values_mut().filter(|emoji| emoji.selected) {
            emoji.x += dx;
            emoji.y += dy;
        }
    }

    /// Scale every selected emoji's size by `factor`, with the same
    /// rounding and clamp as [`Document::resize_emoji`].
    pub fn scale_selected(&mut self, factor: f64) {
        for emoji in self.emojis.values_mut().filter(|emoji| emoji.selected) {
            emoji.size = scaled_size(emoji.size, factor);
        }
    }
}

// f64::round rounds half away from zero, the required midpoint behavior:
// 10 * 1.05 lands on 11, never 10. Truncation is only for coordinates.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
fn scaled_size(size: i64, factor: f64) -> i64 {
    ((size as f64) * factor).round().max(1.0) as i64
}
