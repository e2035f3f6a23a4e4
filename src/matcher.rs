//! Pattern matching against element text.
//!
//! Patterns are regular expressions matched anywhere inside the text, so
//! `"Save"` matches an element reading `"Save draft"`. Anchors can be used
//! when a full-string match is wanted.

use regex_lite::Regex;

use crate::types::SearchError;

/// A compiled search pattern.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    regex: Regex,
}

impl PatternMatcher {
    /// Compile a pattern.
    ///
    /// # Errors
    ///
    /// Returns `SearchError::InvalidPattern` if the pattern is not a valid
    /// regular expression.
    ///
    /// # Example
    ///
    /// ```
    /// use element_searcher::PatternMatcher;
    ///
    /// let matcher = PatternMatcher::compile("Sa+ve").unwrap();
    /// assert!(matcher.is_match("Saaave all"));
    /// assert!(!matcher.is_match("Cancel"));
    ///
    /// assert!(PatternMatcher::compile("[").is_err());
    /// ```
    pub fn compile(pattern: &str) -> Result<Self, SearchError> {
        Regex::new(pattern)
            .map(|regex| PatternMatcher { regex })
            .map_err(|e| SearchError::InvalidPattern {
                pattern: pattern.to_string(),
                reason: e.to_string(),
            })
    }

    /// Whether the pattern occurs anywhere in `text`.
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// The source pattern.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}
