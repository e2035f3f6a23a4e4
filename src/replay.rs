//! A recorded surface that can be searched offline.
//!
//! A recording is a sequence of pages, each page being the elements visible
//! at one scroll position:
//!
//! ```json
//! { "pages": [
//!     [ { "category": "button", "text": "Save" } ],
//!     [ { "category": "text", "text": "Footer" } ]
//! ] }
//! ```
//!
//! [`ReplaySurface`] implements every collaborator contract over such a
//! recording. Scrolling moves to the next page and reports the end on the
//! last one; the surface is always idle. Calls are counted so callers can
//! check what a search did.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use thiserror::Error;

use crate::surface::{IdleWait, SnapshotSource, SurfaceScroller};
use crate::types::{Candidate, ElementCategory, SearchError};

#[derive(Error, Debug)]
pub enum ReplayError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One element of a recorded page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedElement {
    pub category: ElementCategory,
    pub text: String,
}

impl RecordedElement {
    pub fn new(category: ElementCategory, text: impl Into<String>) -> Self {
        RecordedElement {
            category,
            text: text.into(),
        }
    }
}

impl Candidate for RecordedElement {
    fn text(&self) -> &str {
        &self.text
    }
}

/// The on-disk form of a recording.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recording {
    #[serde(default)]
    pub pages: Vec<Vec<RecordedElement>>,
}

/// Replays a [`Recording`] page by page.
#[derive(Debug, Default)]
pub struct ReplaySurface {
    pages: Vec<Vec<RecordedElement>>,
    position: AtomicUsize,
    snapshot_calls: AtomicUsize,
    scroll_calls: AtomicUsize,
    idle_waits: AtomicUsize,
}

impl ReplaySurface {
    /// Creates a surface positioned on the first page.
    pub fn new(pages: Vec<Vec<RecordedElement>>) -> Self {
        ReplaySurface {
            pages,
            ..Default::default()
        }
    }

    pub fn from_recording(recording: Recording) -> Self {
        Self::new(recording.pages)
    }

    /// Parse a recording from JSON.
    ///
    /// ```
    /// use element_searcher::{ElementCategory, ReplaySurface, SnapshotSource};
    ///
    /// let surface = ReplaySurface::from_json_str(
    ///     r#"{"pages": [[{"category": "button", "text": "OK"}]]}"#,
    /// ).unwrap();
    ///
    /// let buttons = surface.current_candidates(ElementCategory::Button).unwrap();
    /// assert_eq!(buttons.len(), 1);
    /// assert_eq!(buttons[0].text, "OK");
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self, ReplayError> {
        let recording: Recording = serde_json::from_str(json)?;
        Ok(Self::from_recording(recording))
    }

    /// Load a recording from a JSON file.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ReplayError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let surface = Self::from_json_str(&contents)?;
        log::debug!(
            "[REPLAY] Loaded {} pages from {:?}",
            surface.page_count(),
            path
        );
        Ok(surface)
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Index of the page currently shown.
    pub fn page_index(&self) -> usize {
        self.position.load(Ordering::SeqCst)
    }

    pub fn snapshot_calls(&self) -> usize {
        self.snapshot_calls.load(Ordering::SeqCst)
    }

    /// Number of scroll attempts, including those that hit the end.
    pub fn scroll_calls(&self) -> usize {
        self.scroll_calls.load(Ordering::SeqCst)
    }

    pub fn idle_waits(&self) -> usize {
        self.idle_waits.load(Ordering::SeqCst)
    }
}

impl SnapshotSource for ReplaySurface {
    type Candidate = RecordedElement;

    fn current_candidates(
        &self,
        category: ElementCategory,
    ) -> Result<Vec<RecordedElement>, SearchError> {
        self.snapshot_calls.fetch_add(1, Ordering::SeqCst);
        let page = match self.pages.get(self.page_index()) {
            Some(page) => page,
            None => return Ok(Vec::new()),
        };
        Ok(page
            .iter()
            .filter(|element| category.includes(element.category))
            .cloned()
            .collect())
    }
}

impl SurfaceScroller for ReplaySurface {
    fn scroll_forward(&self) -> Result<bool, SearchError> {
        self.scroll_calls.fetch_add(1, Ordering::SeqCst);
        let position = self.page_index();
        if position + 1 < self.pages.len() {
            self.position.store(position + 1, Ordering::SeqCst);
            log::trace!("[REPLAY] Scrolled to page {}", position + 1);
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

impl IdleWait for ReplaySurface {
    fn wait_for_idle(&self) -> Result<(), SearchError> {
        self.idle_waits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
