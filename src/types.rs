//! Core data types for the element-searcher crate.
//!
//! This module defines the fundamental types used throughout the crate:
//! - `ElementCategory`: The kinds of textual elements a search can target
//! - `CountSemantics`: How matches are counted for a category
//! - `SearchRequest`: The pattern, match target and scroll policy of one search
//! - `Candidate`: Anything that exposes displayable text
//! - `SearchError`: Error types that can occur during a search

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Categories of textual UI elements.
///
/// Each category maps to one public search entry point on
/// [`ElementSearcher`](crate::ElementSearcher).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementCategory {
    /// Any element that displays text
    Text,
    /// Editable text fields
    EditText,
    /// Push buttons
    Button,
    /// Two-state toggle buttons
    ToggleButton,
}

impl ElementCategory {
    /// All categories, in declaration order.
    pub const ALL: [ElementCategory; 4] = [
        ElementCategory::Text,
        ElementCategory::EditText,
        ElementCategory::Button,
        ElementCategory::ToggleButton,
    ];

    /// Returns the string identifier for this category.
    ///
    /// # Examples
    ///
    /// ```
    /// use element_searcher::ElementCategory;
    ///
    /// assert_eq!(ElementCategory::EditText.as_str(), "edit_text");
    /// assert_eq!(ElementCategory::ToggleButton.as_str(), "toggle_button");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementCategory::Text => "text",
            ElementCategory::EditText => "edit_text",
            ElementCategory::Button => "button",
            ElementCategory::ToggleButton => "toggle_button",
        }
    }

    /// Parses a category from its string identifier.
    ///
    /// Returns `None` for unknown identifiers.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.as_str() == name)
    }

    /// How matches of this category are counted.
    ///
    /// Edit fields only ever check for presence; every other category counts
    /// matches against a threshold.
    pub fn count_semantics(&self) -> CountSemantics {
        match self {
            ElementCategory::EditText => CountSemantics::PresenceOnly,
            _ => CountSemantics::Threshold,
        }
    }

    /// Whether an element of category `other` is also an element of this category.
    ///
    /// Every element is a text element and toggle buttons are buttons. The
    /// remaining categories only contain themselves.
    ///
    /// ```
    /// use element_searcher::ElementCategory;
    ///
    /// assert!(ElementCategory::Text.includes(ElementCategory::EditText));
    /// assert!(ElementCategory::Button.includes(ElementCategory::ToggleButton));
    /// assert!(!ElementCategory::ToggleButton.includes(ElementCategory::Button));
    /// ```
    pub fn includes(&self, other: ElementCategory) -> bool {
        match self {
            ElementCategory::Text => true,
            ElementCategory::Button => {
                matches!(other, ElementCategory::Button | ElementCategory::ToggleButton)
            }
            _ => *self == other,
        }
    }
}

impl std::fmt::Display for ElementCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How matches are counted during a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountSemantics {
    /// The first matching element wins; the requested count is ignored.
    PresenceOnly,
    /// Matches are tallied until the requested count is reached.
    Threshold,
}

/// The parameters of one search.
///
/// `required_matches == 0` means "at least one".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Regular expression searched for anywhere inside element text
    pub pattern: String,

    /// Number of matching elements required (0 is treated as 1)
    pub required_matches: usize,

    /// Whether the surface may be scrolled to reveal more elements
    pub allow_scroll: bool,
}

impl SearchRequest {
    /// Creates a request for at least one match with scrolling allowed.
    ///
    /// # Example
    ///
    /// ```
    /// use element_searcher::SearchRequest;
    ///
    /// let request = SearchRequest::new("Save").with_matches(2).with_scroll(false);
    ///
    /// assert_eq!(request.pattern, "Save");
    /// assert_eq!(request.required_matches, 2);
    /// assert!(!request.allow_scroll);
    /// ```
    pub fn new(pattern: impl Into<String>) -> Self {
        SearchRequest {
            pattern: pattern.into(),
            required_matches: 0,
            allow_scroll: true,
        }
    }

    /// Sets the number of required matches.
    pub fn with_matches(mut self, required_matches: usize) -> Self {
        self.required_matches = required_matches;
        self
    }

    /// Sets whether scrolling is allowed.
    pub fn with_scroll(mut self, allow_scroll: bool) -> Self {
        self.allow_scroll = allow_scroll;
        self
    }

    /// The number of matches a scan must reach under the given semantics.
    ///
    /// ```
    /// use element_searcher::{CountSemantics, SearchRequest};
    ///
    /// let request = SearchRequest::new("OK");
    /// assert_eq!(request.target_for(CountSemantics::Threshold), 1);
    ///
    /// let request = request.with_matches(3);
    /// assert_eq!(request.target_for(CountSemantics::Threshold), 3);
    /// assert_eq!(request.target_for(CountSemantics::PresenceOnly), 1);
    /// ```
    pub fn target_for(&self, semantics: CountSemantics) -> usize {
        match semantics {
            CountSemantics::PresenceOnly => 1,
            CountSemantics::Threshold => self.required_matches.max(1),
        }
    }
}

/// An element under consideration during a scan.
///
/// The searcher only ever reads the element's text and never keeps a
/// candidate past the pass that produced it.
pub trait Candidate {
    /// The text the element currently displays.
    fn text(&self) -> &str;
}

impl Candidate for String {
    fn text(&self) -> &str {
        self
    }
}

impl Candidate for &str {
    fn text(&self) -> &str {
        self
    }
}

/// Errors that can occur during a search.
///
/// "Not found" is not an error: it is reported as `Ok(false)`.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The search pattern is not a valid regular expression
    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// The snapshot source could not list the current elements
    #[error("Snapshot failed: {0}")]
    SnapshotFailed(String),

    /// The surface could not be scrolled
    #[error("Scroll failed: {0}")]
    ScrollFailed(String),

    /// Waiting for the surface to become idle failed
    #[error("Idle wait failed: {0}")]
    IdleWaitFailed(String),
}
