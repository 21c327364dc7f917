//! # Collage Editor
//!
//! Async host for a [`collage_core`] document: a single-writer controller
//! task applies edit intents in arrival order and runs background image
//! retrieval off to the side, without ever letting a stale result clobber
//! a newer background.
//!
//! ## Architecture
//!
//! - [`Editor`] - synchronous document + fetch-lifecycle state machine
//! - [`DocumentController`] - tokio task owning an [`Editor`], fed by
//!   [`Intent`] values, observed through snapshot watch channels
//! - [`HttpFetcher`] / [`RasterDecoder`] - production retrieval and decoding
//! - [`CliArgs`] - arguments for the scripted demo session binary
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p collage-editor -- \
//!     --background https://example.com/bg.jpg --emoji 🍎 --emoji 🚲 --json
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod controller;
pub mod decode;
pub mod editor;
pub mod fetch;

pub use controller::{DocumentController, Intent};
pub use decode::{DecodeError, DecodedImage, ImageDecoder, RasterDecoder};
pub use editor::{Editor, EditorSnapshot, FetchStatus};
pub use fetch::{BackgroundFetcher, FetchError, HttpFetcher};

use clap::Parser;
use url::Url;

/// Command-line arguments for the scripted demo session.
#[derive(Debug, Clone, Parser)]
#[command(name = "collage-editor")]
#[command(about = "Scripted emoji collage editing session")]
#[command(version)]
pub struct CliArgs {
    /// Background image URL to fetch (e.g., <https://example.com/bg.jpg>)
    #[arg(long, env = "COLLAGE_BACKGROUND_URL", value_parser = Url::parse)]
    pub background: Option<Url>,

    /// Emoji glyph to place; repeat the flag to place several
    #[arg(long = "emoji", value_name = "GLYPH")]
    pub emojis: Vec<String>,

    /// Give up on a background fetch after this many milliseconds
    #[arg(long, default_value = "10000")]
    pub fetch_deadline_ms: u64,

    /// Print the final document as JSON on stdout
    #[arg(long)]
    pub json: bool,
}
