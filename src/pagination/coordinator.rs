//! Pagination state machine.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::api::{FetchError, FetchEventsParams, DEFAULT_PAGE_SIZE};
use crate::config::{AppConfig, DEFAULT_REFETCH_INTERVAL, DEFAULT_STALE_TIME};
use crate::error::fetch_category;
use crate::models::{Event, EventsPage};

use super::{AccumulatedMemo, PageSession, QueryKey};

/// Identifies one issued request. Strictly increasing per coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Why a request was issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    /// Page 1 of a new query identity
    Initial,
    /// Page N+1 requested by the user
    NextPage,
    /// Background re-fetch of page 1 once the session is stale
    Refresh,
}

/// A request the caller must perform and then report back via
/// [`PaginationCoordinator::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub token: RequestToken,
    pub key: QueryKey,
    pub page: u32,
    pub kind: FetchKind,
}

impl FetchTicket {
    /// Client parameters for this request.
    pub fn params(&self) -> FetchEventsParams {
        FetchEventsParams::new()
            .with_venue(self.key.venue.clone())
            .with_page_size(self.key.page_size)
            .with_page(self.page)
    }
}

/// Observable state of the coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No venue supplied
    Idle,
    /// Page 1 of the current identity in flight
    Loading,
    /// At least one page loaded, no user-visible request in flight
    Ready,
    /// Ready, with the next page in flight
    FetchingMore,
    /// Page 1 of the current identity failed
    Failed,
}

/// Outcome of [`PaginationCoordinator::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The result changed the accumulated pages
    Applied,
    /// An initial or next-page request failed; the error is exposed
    Failed,
    /// A background refresh failed and was dropped silently
    Ignored,
    /// The token is not the request in flight; nothing changed
    Stale,
}

/// Tunables for a coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordinatorOptions {
    pub page_size: u32,
    pub stale_time: Duration,
    pub refetch_interval: Duration,
}

impl Default for CoordinatorOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            stale_time: DEFAULT_STALE_TIME,
            refetch_interval: DEFAULT_REFETCH_INTERVAL,
        }
    }
}

impl CoordinatorOptions {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            page_size: config.page_size.max(1),
            stale_time: config.stale_time,
            refetch_interval: config.refetch_interval,
        }
    }
}

/// Coordinates venue-scoped page fetches and accumulates their results.
///
/// Invariants:
/// - at most one request is in flight at any time;
/// - pages are requested in increasing order, page N+1 only after page N
///   has been applied;
/// - a failed next page or background refresh never discards loaded pages.
#[derive(Debug)]
pub struct PaginationCoordinator {
    options: CoordinatorOptions,
    session: Option<PageSession>,
    in_flight: Option<FetchTicket>,
    /// Failure of the initial page
    error: Option<FetchError>,
    /// Transient failure of the last "load more"
    load_more_error: Option<FetchError>,
    next_token: u64,
    next_generation: u64,
    next_poll_at: Option<Instant>,
    memo: AccumulatedMemo,
}

impl Default for PaginationCoordinator {
    fn default() -> Self {
        Self::new(CoordinatorOptions::default())
    }
}

impl PaginationCoordinator {
    pub fn new(options: CoordinatorOptions) -> Self {
        Self {
            options: CoordinatorOptions {
                page_size: options.page_size.max(1),
                ..options
            },
            session: None,
            in_flight: None,
            error: None,
            load_more_error: None,
            next_token: 0,
            next_generation: 0,
            next_poll_at: None,
            memo: AccumulatedMemo::new(),
        }
    }

    pub fn options(&self) -> &CoordinatorOptions {
        &self.options
    }

    // ------------------------------------------------------------------
    // Inputs
    // ------------------------------------------------------------------

    /// Switch to `venue` at the current page size.
    pub fn set_venue(&mut self, venue: Option<&str>) -> Option<FetchTicket> {
        self.set_query(venue, self.options.page_size)
    }

    /// Switch to a new page size for the current venue.
    pub fn set_page_size(&mut self, page_size: u32) -> Option<FetchTicket> {
        let venue = self.venue().map(str::to_string);
        self.set_query(venue.as_deref(), page_size)
    }

    /// Set the query identity.
    ///
    /// A new identity discards all pages, errors and the in-flight request,
    /// then issues page 1. The same identity is a no-op, except from
    /// [`Phase::Failed`] where it restarts the session.
    pub fn set_query(&mut self, venue: Option<&str>, page_size: u32) -> Option<FetchTicket> {
        self.options.page_size = page_size.max(1);
        let key = QueryKey::new(venue, page_size);

        let current = self.session.as_ref().map(PageSession::key);
        if current == key.as_ref() && self.phase() != Phase::Failed {
            return None;
        }

        if let Some(abandoned) = self.in_flight.take() {
            tracing::debug!(
                token = abandoned.token.value(),
                "Abandoning in-flight request for previous query"
            );
        }
        self.error = None;
        self.load_more_error = None;
        self.next_poll_at = None;

        let ticket = match key {
            Some(key) => {
                tracing::debug!(venue = %key.venue, page_size = key.page_size, "Starting new query");
                self.next_generation += 1;
                self.session = Some(PageSession::new(key.clone(), self.next_generation));
                Some(self.issue(key, FetchKind::Initial, 1))
            }
            None => {
                tracing::debug!("No venue; coordinator idle");
                self.session = None;
                None
            }
        };
        self.sync_memo();
        ticket
    }

    /// Request the next page. Only permitted from [`Phase::Ready`] with no
    /// request in flight and `has_more()`; otherwise a no-op.
    pub fn fetch_next_page(&mut self) -> Option<FetchTicket> {
        if self.phase() != Phase::Ready || self.in_flight.is_some() || !self.has_more() {
            return None;
        }
        let session = self.session.as_ref()?;
        let (key, page) = (session.key().clone(), session.next_page_number());
        self.load_more_error = None;
        Some(self.issue(key, FetchKind::NextPage, page))
    }

    /// Apply the outcome of a previously issued ticket.
    pub fn resolve(
        &mut self,
        token: RequestToken,
        result: Result<EventsPage, FetchError>,
        now: Instant,
    ) -> Resolution {
        let ticket = match self.in_flight.take() {
            Some(ticket) if ticket.token == token => ticket,
            other => {
                self.in_flight = other;
                tracing::debug!(token = token.value(), "Dropping stale response");
                return Resolution::Stale;
            }
        };

        let Some(session) = self.session.as_mut() else {
            return Resolution::Stale;
        };

        let resolution = match (ticket.kind, result) {
            (FetchKind::Initial, Ok(page)) | (FetchKind::NextPage, Ok(page)) => {
                tracing::info!(
                    venue = %ticket.key.venue,
                    page = ticket.page,
                    events = page.data.len(),
                    "Loaded events page"
                );
                session.push_page(page, now);
                if ticket.kind == FetchKind::Initial {
                    self.next_poll_at = Some(now + self.options.refetch_interval);
                }
                Resolution::Applied
            }
            (FetchKind::Refresh, Ok(page)) => {
                tracing::debug!(venue = %ticket.key.venue, "Background refresh updated page 1");
                session.replace_first(page, now);
                Resolution::Applied
            }
            (FetchKind::Initial, Err(err)) => {
                tracing::warn!(
                    venue = %ticket.key.venue,
                    category = %fetch_category(&err),
                    "Initial page failed: {}",
                    err
                );
                self.error = Some(err);
                Resolution::Failed
            }
            (FetchKind::NextPage, Err(err)) => {
                tracing::warn!(
                    venue = %ticket.key.venue,
                    page = ticket.page,
                    category = %fetch_category(&err),
                    "Load more failed: {}",
                    err
                );
                self.load_more_error = Some(err);
                Resolution::Failed
            }
            (FetchKind::Refresh, Err(err)) => {
                tracing::debug!("Background refresh failed, keeping current pages: {}", err);
                Resolution::Ignored
            }
        };

        self.sync_memo();
        resolution
    }

    /// The application regained focus: refresh page 1 if the session is stale.
    pub fn on_focus(&mut self, now: Instant) -> Option<FetchTicket> {
        self.maybe_refresh(now)
    }

    /// Periodic timer hook, call freely; acts at most once per refetch interval.
    pub fn poll(&mut self, now: Instant) -> Option<FetchTicket> {
        let due = self.next_poll_at.is_some_and(|at| now >= at);
        if !due {
            return None;
        }
        self.next_poll_at = Some(now + self.options.refetch_interval);
        self.maybe_refresh(now)
    }

    pub fn dismiss_load_more_error(&mut self) {
        self.load_more_error = None;
    }

    fn maybe_refresh(&mut self, now: Instant) -> Option<FetchTicket> {
        if self.phase() != Phase::Ready || self.in_flight.is_some() {
            return None;
        }
        let session = self.session.as_ref()?;
        if !session.is_stale(now, self.options.stale_time) {
            return None;
        }
        let key = session.key().clone();
        tracing::debug!("Session stale; refreshing page 1 in background");
        Some(self.issue(key, FetchKind::Refresh, 1))
    }

    fn issue(&mut self, key: QueryKey, kind: FetchKind, page: u32) -> FetchTicket {
        self.next_token += 1;
        let ticket = FetchTicket {
            token: RequestToken(self.next_token),
            key,
            page,
            kind,
        };
        self.in_flight = Some(ticket.clone());
        ticket
    }

    fn sync_memo(&mut self) {
        self.memo.sync(self.session.as_ref());
    }

    // ------------------------------------------------------------------
    // Outputs
    // ------------------------------------------------------------------

    pub fn phase(&self) -> Phase {
        let Some(session) = self.session.as_ref() else {
            return Phase::Idle;
        };
        if self.error.is_some() {
            return Phase::Failed;
        }
        match self.in_flight.as_ref().map(|t| t.kind) {
            Some(FetchKind::Initial) => Phase::Loading,
            Some(FetchKind::NextPage) => Phase::FetchingMore,
            _ if session.is_empty() => Phase::Loading,
            _ => Phase::Ready,
        }
    }

    /// Accumulated events in fetch order.
    ///
    /// Returns the same allocation until the loaded pages change.
    pub fn events(&self) -> Arc<[Event]> {
        self.memo.events()
    }

    pub fn venue(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.key().venue.as_str())
    }

    pub fn query_key(&self) -> Option<&QueryKey> {
        self.session.as_ref().map(PageSession::key)
    }

    pub fn is_loading(&self) -> bool {
        self.phase() == Phase::Loading
    }

    pub fn is_fetching_more(&self) -> bool {
        self.phase() == Phase::FetchingMore
    }

    /// A background refresh is in flight.
    pub fn is_refreshing(&self) -> bool {
        self.in_flight
            .as_ref()
            .is_some_and(|t| t.kind == FetchKind::Refresh)
    }

    /// Whether a further page is expected to yield data.
    pub fn has_more(&self) -> bool {
        self.error.is_none() && self.session.as_ref().is_some_and(PageSession::has_more)
    }

    /// Error from the initial page of the current identity.
    pub fn error(&self) -> Option<&FetchError> {
        self.error.as_ref()
    }

    /// Error from the most recent "load more", kept separate from [`Self::error`].
    pub fn load_more_error(&self) -> Option<&FetchError> {
        self.load_more_error.as_ref()
    }

    pub fn in_flight(&self) -> Option<&FetchTicket> {
        self.in_flight.as_ref()
    }

    pub fn page_count(&self) -> usize {
        self.session.as_ref().map_or(0, PageSession::page_count)
    }
}
