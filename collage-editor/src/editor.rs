//! Synchronous editor state: the document plus its background fetch
//! lifecycle.
//!
//! Everything here runs on whatever thread calls it; byte retrieval happens
//! elsewhere and re-enters through [`Editor::apply_fetch_result`]. The
//! staleness rule lives in that method: a completed retrieval only lands if
//! the document still wants that exact URL.

use std::sync::Arc;

use collage_core::{Background, Document};
use tracing::{debug, warn};
use url::Url;

use crate::decode::{DecodedImage, ImageDecoder};
use crate::fetch::FetchError;

/// Where background retrieval currently stands. Drives progress UI.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchStatus {
    /// No retrieval in flight.
    #[default]
    Idle,
    /// Bytes for this URL are being retrieved.
    Fetching(Url),
}

impl FetchStatus {
    /// Whether a retrieval is in flight.
    #[must_use]
    pub fn is_fetching(&self) -> bool {
        matches!(self, Self::Fetching(_))
    }
}

/// A point-in-time copy of everything a renderer needs.
#[derive(Debug, Clone, Default)]
pub struct EditorSnapshot {
    /// The document model.
    pub document: Document,
    /// Background retrieval progress.
    pub fetch_status: FetchStatus,
    /// The installed background image, if any.
    pub background_image: Option<Arc<DecodedImage>>,
}

/// The document plus derived background state.
///
/// Owns the single mutable [`Document`] and the two pieces of derived
/// state that track it: the installed background image and the retrieval
/// status. Replacing the background immediately drops the installed image
/// in every path, so a stale picture is never shown under a new value.
pub struct Editor {
    document: Document,
    fetch_status: FetchStatus,
    background_image: Option<Arc<DecodedImage>>,
    decoder: Arc<dyn ImageDecoder>,
}

impl std::fmt::Debug for Editor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Editor")
            .field("document", &self.document)
            .field("fetch_status", &self.fetch_status)
            .field("background_image", &self.background_image)
            .finish_non_exhaustive()
    }
}

impl Editor {
    /// Create an editor over an empty document.
    #[must_use]
    pub fn new(decoder: Arc<dyn ImageDecoder>) -> Self {
        Self {
            document: Document::new(),
            fetch_status: FetchStatus::Idle,
            background_image: None,
            decoder,
        }
    }

    /// The current document.
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Mutable access to the document.
    ///
    /// Emoji edits never touch the fetch state, so they go straight
    /// through. Background changes must go through
    /// [`Editor::set_background`] instead.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// Current retrieval status.
    #[must_use]
    pub fn fetch_status(&self) -> &FetchStatus {
        &self.fetch_status
    }

    /// The installed background image.
    #[must_use]
    pub fn background_image(&self) -> Option<&Arc<DecodedImage>> {
        self.background_image.as_ref()
    }

    /// Copy out the renderable state.
    #[must_use]
    pub fn snapshot(&self) -> EditorSnapshot {
        EditorSnapshot {
            document: self.document.clone(),
            fetch_status: self.fetch_status.clone(),
            background_image: self.background_image.clone(),
        }
    }

    /// Replace the background and restart its retrieval.
    ///
    /// Setting the value the document already holds is a complete no-op:
    /// no image clear, no status change, no refetch. Otherwise the
    /// installed image is dropped first, then the new value decides what
    /// happens: blank goes idle, embedded bytes decode inline, and a URL
    /// marks retrieval in progress and is returned for the caller to fetch.
    pub fn set_background(&mut self, background: Background) -> Option<Url> {
        if self.document.background() == &background {
            debug!("background unchanged, nothing to do");
            return None;
        }
        self.document.set_background(background);
        self.background_image = None;
        match self.document.background().clone() {
            Background::Blank => {
                self.fetch_status = FetchStatus::Idle;
                None
            }
            Background::Bytes(bytes) => {
                self.fetch_status = FetchStatus::Idle;
                self.install(&bytes);
                None
            }
            Background::Url(url) => {
                self.fetch_status = FetchStatus::Fetching(url.clone());
                Some(url)
            }
        }
    }

    /// Land the outcome of a background retrieval.
    ///
    /// If the document has moved on to any other background, the result is
    /// discarded without touching the status: the spinner belongs to the
    /// current retrieval, not the one that just finished. Otherwise the
    /// status goes idle and a successful payload is decoded and installed;
    /// fetch and decode failures leave the image absent.
    pub fn apply_fetch_result(&mut self, url: &Url, result: Result<Vec<u8>, FetchError>) {
        if self.document.background().url() != Some(url) {
            debug!(%url, "discarding stale background fetch result");
            return;
        }
        self.fetch_status = FetchStatus::Idle;
        match result {
            Ok(bytes) => self.install(&bytes),
            Err(err) => warn!(%url, error = %err, "background fetch failed"),
        }
    }

    fn install(&mut self, bytes: &[u8]) {
        match self.decoder.decode(bytes) {
            Ok(image) => {
                debug!(
                    width = image.width,
                    height = image.height,
                    "background image installed"
                );
                self.background_image = Some(Arc::new(image));
            }
            Err(err) => warn!(error = %err, "background bytes failed to decode"),
        }
    }
}
