//! Collaborator contracts consumed by the searcher.
//!
//! The searcher never touches a widget tree or performs a gesture itself.
//! It reads elements through a [`SnapshotSource`], reveals more content
//! through a [`SurfaceScroller`] and synchronizes with the host UI loop
//! through an [`IdleWait`]. Failures of any of these are returned as
//! [`SearchError`] and end the current search.
//!
//! All three traits are implemented for shared references, so a single value
//! implementing every contract (such as [`ReplaySurface`](crate::ReplaySurface))
//! can be handed to the searcher three times by reference.

use crate::types::{Candidate, ElementCategory, SearchError};

/// Lists the elements currently on the surface.
pub trait SnapshotSource {
    type Candidate: Candidate;

    /// The current elements of `category`, in surface order.
    ///
    /// Each call may return a different sequence as the surface changes.
    fn current_candidates(
        &self,
        category: ElementCategory,
    ) -> Result<Vec<Self::Candidate>, SearchError>;
}

/// Reveals more content in the primary scroll direction.
pub trait SurfaceScroller {
    /// Scroll forward. Returns `Ok(false)` when there is no more content.
    fn scroll_forward(&self) -> Result<bool, SearchError>;
}

/// Blocks until the host surface has no pending layout or update work.
pub trait IdleWait {
    fn wait_for_idle(&self) -> Result<(), SearchError>;
}

impl<T: SnapshotSource + ?Sized> SnapshotSource for &T {
    type Candidate = T::Candidate;

    fn current_candidates(
        &self,
        category: ElementCategory,
    ) -> Result<Vec<Self::Candidate>, SearchError> {
        (**self).current_candidates(category)
    }
}

impl<T: SurfaceScroller + ?Sized> SurfaceScroller for &T {
    fn scroll_forward(&self) -> Result<bool, SearchError> {
        (**self).scroll_forward()
    }
}

impl<T: IdleWait + ?Sized> IdleWait for &T {
    fn wait_for_idle(&self) -> Result<(), SearchError> {
        (**self).wait_for_idle()
    }
}

/// A surface that never scrolls.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoScroll;

impl SurfaceScroller for NoScroll {
    fn scroll_forward(&self) -> Result<bool, SearchError> {
        Ok(false)
    }
}

/// A surface that is always idle.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysIdle;

impl IdleWait for AlwaysIdle {
    fn wait_for_idle(&self) -> Result<(), SearchError> {
        Ok(())
    }
}
