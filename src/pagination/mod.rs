//! Incremental pagination over the events API.
//!
//! The [`PaginationCoordinator`] is a synchronous state machine. It never
//! performs I/O itself: operations that need a request return a
//! [`FetchTicket`], the caller runs the fetch, and hands the outcome back via
//! [`PaginationCoordinator::resolve`]. Each ticket carries a monotonically
//! increasing [`RequestToken`]; a result whose token is not the one currently
//! in flight is dropped, which is how responses for an abandoned query
//! identity are discarded.

mod coordinator;
mod session;

pub use coordinator::{
    CoordinatorOptions, FetchKind, FetchTicket, PaginationCoordinator, Phase, RequestToken,
    Resolution,
};
pub use session::{AccumulatedMemo, PageSession};

/// The (venue, page size) pair identifying one pagination session.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub venue: String,
    pub page_size: u32,
}

impl QueryKey {
    /// Build a key; `None` for a missing or empty venue, which means idle.
    ///
    /// A zero page size is raised to 1.
    pub fn new(venue: Option<&str>, page_size: u32) -> Option<Self> {
        let venue = venue.filter(|v| !v.is_empty())?;
        Some(Self {
            venue: venue.to_string(),
            page_size: page_size.max(1),
        })
    }
}
