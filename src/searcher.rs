//! Scroll-aware, deadline-bounded element search.
//!
//! A top-level search compiles its pattern once, then repeatedly runs a
//! single scan until the scan succeeds or the configured deadline passes.
//! Once the deadline has passed one final scan is made and its result is
//! returned as-is, so every search scans at least once.
//!
//! A scan waits for the surface to go idle, pauses, takes a snapshot and
//! tallies matching elements in order. It stops as soon as the tally reaches
//! the target. Otherwise it scrolls (when allowed) and continues tallying on
//! the next snapshot. The tally lives only as long as one scan.
//!
//! # Example
//!
//! ```
//! use element_searcher::{ElementSearcher, ManualClock, RecordedElement, ReplaySurface};
//! use element_searcher::ElementCategory;
//!
//! let surface = ReplaySurface::new(vec![
//!     vec![RecordedElement::new(ElementCategory::Button, "Save")],
//!     vec![RecordedElement::new(ElementCategory::Button, "Save")],
//! ]);
//! let clock = ManualClock::new();
//! let searcher = ElementSearcher::new(&surface, &surface, &surface).with_clock(&clock);
//!
//! assert!(searcher.search_button("Save", 2).unwrap());
//! ```

use crate::clock::{Clock, SystemClock};
use crate::config::SearchConfig;
use crate::matcher::PatternMatcher;
use crate::surface::{IdleWait, SnapshotSource, SurfaceScroller};
use crate::types::{Candidate, CountSemantics, ElementCategory, SearchError, SearchRequest};

/// Terminal state of one scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanOutcome {
    Found,
    Exhausted { matches: usize },
}

/// Running count of matches within one scan.
#[derive(Debug)]
struct MatchTally {
    count: usize,
    target: usize,
}

impl MatchTally {
    fn new(target: usize) -> Self {
        MatchTally { count: 0, target }
    }

    /// Count one match. Returns true once the target is reached.
    fn record(&mut self) -> bool {
        self.count += 1;
        self.count >= self.target
    }
}

/// Searches a UI surface for elements whose text matches a pattern.
///
/// The searcher is generic over its collaborators: where elements come from
/// (`S`), how the surface scrolls (`R`), how it waits for the host UI loop
/// (`W`) and the clock used for pauses and deadlines (`C`).
///
/// Every search blocks the calling thread until it succeeds or its deadline
/// passes.
pub struct ElementSearcher<S, R, W, C = SystemClock> {
    source: S,
    scroller: R,
    idle: W,
    clock: C,
    config: SearchConfig,
}

impl<S, R, W> ElementSearcher<S, R, W, SystemClock>
where
    S: SnapshotSource,
    R: SurfaceScroller,
    W: IdleWait,
{
    /// Creates a searcher using the system clock and default configuration.
    pub fn new(source: S, scroller: R, idle: W) -> Self {
        ElementSearcher {
            source,
            scroller,
            idle,
            clock: SystemClock,
            config: SearchConfig::default(),
        }
    }
}

impl<S, R, W, C> ElementSearcher<S, R, W, C>
where
    S: SnapshotSource,
    R: SurfaceScroller,
    W: IdleWait,
    C: Clock,
{
    /// Replaces the clock.
    pub fn with_clock<C2: Clock>(self, clock: C2) -> ElementSearcher<S, R, W, C2> {
        ElementSearcher {
            source: self.source,
            scroller: self.scroller,
            idle: self.idle,
            clock,
            config: self.config,
        }
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Searches all text elements for `pattern`.
    ///
    /// Returns `Ok(true)` once `required_matches` elements (at least one when
    /// 0) contain the pattern, scrolling for more only when `allow_scroll` is set.
    ///
    /// # Errors
    ///
    /// - `SearchError::InvalidPattern` - `pattern` is not a valid regular expression
    /// - `SearchError::SnapshotFailed`, `ScrollFailed`, `IdleWaitFailed` - a
    ///   collaborator failed
    pub fn search_text(
        &self,
        pattern: &str,
        required_matches: usize,
        allow_scroll: bool,
    ) -> Result<bool, SearchError> {
        let request = SearchRequest::new(pattern)
            .with_matches(required_matches)
            .with_scroll(allow_scroll);
        self.search(ElementCategory::Text, &request)
    }

    /// Searches edit fields for `pattern`. The first matching field wins.
    pub fn search_edit_text(&self, pattern: &str) -> Result<bool, SearchError> {
        self.search(ElementCategory::EditText, &SearchRequest::new(pattern))
    }

    /// Searches buttons for `pattern`, scrolling as needed.
    pub fn search_button(
        &self,
        pattern: &str,
        required_matches: usize,
    ) -> Result<bool, SearchError> {
        let request = SearchRequest::new(pattern).with_matches(required_matches);
        self.search(ElementCategory::Button, &request)
    }

    /// Searches toggle buttons for `pattern`, scrolling as needed.
    pub fn search_toggle_button(
        &self,
        pattern: &str,
        required_matches: usize,
    ) -> Result<bool, SearchError> {
        let request = SearchRequest::new(pattern).with_matches(required_matches);
        self.search(ElementCategory::ToggleButton, &request)
    }

    /// Runs `request` against `category` until it succeeds or the deadline passes.
    ///
    /// An invalid pattern is reported before anything touches the surface.
    pub fn search(
        &self,
        category: ElementCategory,
        request: &SearchRequest,
    ) -> Result<bool, SearchError> {
        let matcher = PatternMatcher::compile(&request.pattern)?;
        let deadline = self.clock.now() + self.config.timeout();
        let mut attempts = 0usize;

        while self.clock.now() < deadline {
            attempts += 1;
            log::debug!(
                "[SEARCHER] Attempt {} for {} '{}'",
                attempts,
                category,
                request.pattern
            );
            match self.scan(category, &matcher, request)? {
                ScanOutcome::Found => return Ok(true),
                ScanOutcome::Exhausted { matches } => log::trace!(
                    "[SEARCHER] Attempt {} ended with {} matches",
                    attempts,
                    matches
                ),
            }
        }

        log::info!(
            "[SEARCHER] Deadline of {}ms passed for {} '{}' after {} attempts",
            self.config.timeout_ms,
            category,
            matcher.as_str(),
            attempts
        );
        Ok(self.scan(category, &matcher, request)? == ScanOutcome::Found)
    }

    /// Runs exactly one scroll-aware scan, without retrying.
    pub fn search_once(
        &self,
        category: ElementCategory,
        request: &SearchRequest,
    ) -> Result<bool, SearchError> {
        let matcher = PatternMatcher::compile(&request.pattern)?;
        Ok(self.scan(category, &matcher, request)? == ScanOutcome::Found)
    }

    fn scan(
        &self,
        category: ElementCategory,
        matcher: &PatternMatcher,
        request: &SearchRequest,
    ) -> Result<ScanOutcome, SearchError> {
        let semantics = category.count_semantics();
        let mut tally = MatchTally::new(request.target_for(semantics));
        let mut scrolls = 0usize;

        loop {
            self.idle.wait_for_idle()?;
            self.clock.sleep(self.config.poll_pause());

            let candidates = self.source.current_candidates(category)?;
            for candidate in &candidates {
                if matcher.is_match(candidate.text()) && tally.record() {
                    return Ok(ScanOutcome::Found);
                }
            }

            if !request.allow_scroll {
                break;
            }
            if scrolls >= self.config.max_scrolls_per_scan {
                log::warn!(
                    "[SEARCHER] ⚠️ Gave up scrolling for {} '{}' after {} scrolls",
                    category,
                    matcher.as_str(),
                    scrolls
                );
                break;
            }
            if !self.scroller.scroll_forward()? {
                break;
            }
            scrolls += 1;
        }

        if semantics == CountSemantics::Threshold {
            log::debug!(
                "[SEARCHER] There are only {} matches of {}",
                tally.count,
                matcher.as_str()
            );
        }
        Ok(ScanOutcome::Exhausted { matches: tally.count })
    }
}
