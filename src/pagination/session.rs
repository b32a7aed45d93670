//! Page storage for one query identity.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::models::{Event, EventsPage};

use super::QueryKey;

/// Owned, versioned sequence of pages fetched for one [`QueryKey`].
///
/// Pages are stored in fetch order (page 1 first). Every mutation bumps
/// `version`, which is what downstream memoization keys on.
#[derive(Debug, Clone)]
pub struct PageSession {
    /// Unique per session; distinguishes two sessions for the same key
    generation: u64,
    key: QueryKey,
    pages: Vec<Arc<EventsPage>>,
    version: u64,
    /// When page 1 was last loaded (initially or by a background refresh)
    fetched_at: Option<Instant>,
}

impl PageSession {
    pub fn new(key: QueryKey, generation: u64) -> Self {
        Self {
            generation,
            key,
            pages: Vec::new(),
            version: 0,
            fetched_at: None,
        }
    }

    pub fn key(&self) -> &QueryKey {
        &self.key
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn pages(&self) -> &[Arc<EventsPage>] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn fetched_at(&self) -> Option<Instant> {
        self.fetched_at
    }

    /// Page number the next "load more" must request.
    pub fn next_page_number(&self) -> u32 {
        self.pages.len() as u32 + 1
    }

    /// True iff the most recently loaded page was exactly full.
    ///
    /// `links.next` and `meta.total` are deliberately ignored, so a final page
    /// that happens to be full costs one extra (empty) request.
    pub fn has_more(&self) -> bool {
        self.pages
            .last()
            .is_some_and(|page| page.data.len() == self.key.page_size as usize)
    }

    /// True once `stale_time` has elapsed since page 1 was loaded.
    pub fn is_stale(&self, now: Instant, stale_time: Duration) -> bool {
        self.fetched_at
            .is_some_and(|at| now.saturating_duration_since(at) >= stale_time)
    }

    /// Append the next page.
    pub fn push_page(&mut self, page: EventsPage, now: Instant) {
        if self.pages.is_empty() {
            self.fetched_at = Some(now);
        }
        self.pages.push(Arc::new(page));
        self.version += 1;
    }

    /// Replace page 1 in place, leaving pages 2..N untouched.
    pub fn replace_first(&mut self, page: EventsPage, now: Instant) {
        match self.pages.first_mut() {
            Some(first) => *first = Arc::new(page),
            None => self.pages.push(Arc::new(page)),
        }
        self.fetched_at = Some(now);
        self.version += 1;
    }

    /// Total number of events across all pages.
    pub fn event_count(&self) -> usize {
        self.pages.iter().map(|p| p.data.len()).sum()
    }
}

/// Accumulated events, rebuilt only when the underlying session changes.
///
/// Keyed by `(generation, version)` of the source session, so repeated reads
/// without new pages hand out the same `Arc` allocation.
#[derive(Debug, Clone)]
pub struct AccumulatedMemo {
    source: Option<(u64, u64)>,
    events: Arc<[Event]>,
}

impl Default for AccumulatedMemo {
    fn default() -> Self {
        Self {
            source: None,
            events: Arc::from(Vec::new()),
        }
    }
}

impl AccumulatedMemo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bring the memo in line with `session`, rebuilding only on change.
    ///
    /// Returns true when the accumulated sequence was rebuilt.
    pub fn sync(&mut self, session: Option<&PageSession>) -> bool {
        let source = session.map(|s| (s.generation(), s.version()));
        if source == self.source {
            return false;
        }

        self.events = match session {
            Some(session) => session
                .pages()
                .iter()
                .flat_map(|page| page.data.iter().cloned())
                .collect(),
            None => Arc::from(Vec::new()),
        };
        self.source = source;
        true
    }

    pub fn events(&self) -> Arc<[Event]> {
        Arc::clone(&self.events)
    }
}
