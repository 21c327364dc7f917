//! # Collage Core
//!
//! Document model and transform contract for an interactive emoji collage
//! editor: one background image plus emoji glyphs that can be placed,
//! moved, resized, selected, and deleted.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                collage-core                 │
//! ├──────────────────────┬──────────────────────┤
//! │ Document             │ ViewState            │
//! │ - Background         │ - steady pan/zoom    │
//! │ - emojis by id,      │ - live gesture       │
//! │   insertion-ordered  │   deltas, in two     │
//! │ - selection flags    │   scopes             │
//! ├──────────────────────┴──────────────────────┤
//! │ transform: screen <-> integer model space   │
//! │ import: drop payload classification         │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! The model keeps integer coordinates centered on the canvas; all
//! floating-point lives at the view boundary. Retrieval of remote
//! backgrounds, decoding, and rendering are hosted elsewhere; this crate is
//! pure data and math, synchronous and I/O-free.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod background;
pub mod document;
pub mod emoji;
pub mod import;
pub mod transform;

pub use background::Background;
pub use document::Document;
pub use emoji::{Emoji, EmojiId};
pub use import::{classify, DropAction, DropPayload, DEFAULT_EMOJI_SIZE};
pub use transform::{drag_to_model, to_model, to_screen, ViewState, ZoomEnd, ZoomScope};

/// Collage core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
