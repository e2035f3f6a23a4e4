//! Element Searcher - wait for UI elements to show up, scrolling when needed.
//!
//! This crate provides the search engine of a UI test-automation library:
//! given a pattern and an expected number of matches it decides whether a
//! surface contains matching elements, scrolling to reveal more content and
//! polling again until the condition holds or a deadline passes.
//!
//! # Quick Start
//!
//! ```
//! use element_searcher::{ElementCategory, ElementSearcher, RecordedElement, ReplaySurface};
//! use element_searcher::SearchConfig;
//!
//! let surface = ReplaySurface::new(vec![vec![
//!     RecordedElement::new(ElementCategory::Button, "OK"),
//!     RecordedElement::new(ElementCategory::Button, "Cancel"),
//! ]]);
//!
//! let searcher = ElementSearcher::new(&surface, &surface, &surface)
//!     .with_config(SearchConfig::default().with_poll_pause_ms(0).with_timeout_ms(0));
//!
//! assert!(searcher.search_button("OK", 0).unwrap());
//! assert!(!searcher.search_button("Help", 0).unwrap());
//! assert!(searcher.search_button("[", 0).is_err());
//! ```
//!
//! # Modules
//!
//! - [`types`]: Core data types (ElementCategory, SearchRequest, Candidate, SearchError)
//! - [`matcher`]: Regular-expression matching of element text
//! - [`surface`]: Collaborator traits (SnapshotSource, SurfaceScroller, IdleWait)
//! - [`clock`]: System and manual clocks
//! - [`config`]: Timing configuration loaded from TOML
//! - [`searcher`]: The search engine (ElementSearcher)
//! - [`replay`]: A recorded surface for offline searches and tests

pub mod clock;
pub mod config;
pub mod matcher;
pub mod replay;
pub mod searcher;
pub mod surface;
pub mod types;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{ConfigError, SearchConfig};
pub use matcher::PatternMatcher;
pub use replay::{RecordedElement, Recording, ReplayError, ReplaySurface};
pub use searcher::ElementSearcher;
pub use surface::{AlwaysIdle, IdleWait, NoScroll, SnapshotSource, SurfaceScroller};
pub use types::{Candidate, CountSemantics, ElementCategory, SearchError, SearchRequest};
