//! Incremental loader for server-paginated collections.
//!
//! One `Pager` owns the cursor state of a single pagination session: the
//! accumulated rows, the current page, and the service-supplied `has_next`
//! and `total`. Loads are two-phase: starting one hands back a [`LoadTicket`]
//! stamped with the session identity, the caller performs the fetch however
//! it likes (inline await, spawned task), and the outcome is applied through
//! the ticket. A ticket from a superseded session is dropped at apply time,
//! so responses that race a session switch can never leak rows into the new
//! session.

use rsvp_api::{ApiError, Page};

/// Loading phase of one pagination session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    /// No session active.
    Idle,
    /// First page of a fresh session is in flight.
    LoadingFirst,
    /// At least one page applied; more may be requested.
    Ready,
    /// A follow-up page is in flight; further triggers are ignored.
    LoadingMore,
    /// The service reported no next page; this session is done.
    Exhausted,
}

/// Scroll position snapshot, in whatever unit the view measures
/// (pixels, rows). All three fields must share that unit.
#[derive(Debug, Clone, Copy)]
pub struct ScrollMetrics {
    /// Offset of the top of the viewport from the top of the content.
    pub scroll_top: i64,
    /// Total scrollable content height.
    pub scroll_height: i64,
    /// Visible viewport height.
    pub client_height: i64,
}

impl ScrollMetrics {
    /// Distance between the bottom of the viewport and the bottom of the
    /// content.
    pub fn distance_from_bottom(&self) -> i64 {
        self.scroll_height - self.scroll_top - self.client_height
    }
}

/// Permission to run one page load, stamped with the issuing session.
#[derive(Debug, Clone)]
pub struct LoadTicket {
    /// Collection the page belongs to.
    pub collection: i64,
    /// Page number to fetch (1-based).
    pub page: u32,
    /// Whether applying this page replaces the accumulator (first page of a
    /// session) or appends to it.
    pub reset: bool,
    session: u64,
}

/// Outcome of applying a load result through a ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// The ticket belonged to the current session; state was updated.
    Updated,
    /// The ticket's session was superseded; the result was discarded.
    Stale,
}

/// The single paging capability the loader needs from its data source.
///
/// Injected rather than reached for globally so tests (and alternative
/// transports) can substitute their own implementation.
#[allow(async_fn_in_trait)]
pub trait PageFetcher<T> {
    async fn fetch_page(
        &self,
        collection: i64,
        page: u32,
        size: u32,
    ) -> Result<Page<T>, ApiError>;
}

/// Cursor state for one server-paginated collection.
#[derive(Debug)]
pub struct Pager<T> {
    collection: Option<i64>,
    page_size: u32,
    session: u64,
    phase: LoadPhase,
    current_page: u32,
    has_next: bool,
    total: u64,
    items: Vec<T>,
}

impl<T> Pager<T> {
    /// Create an idle pager. `page_size` is fixed for every session this
    /// pager runs (different views configure different sizes).
    pub fn new(page_size: u32) -> Self {
        Self {
            collection: None,
            page_size,
            session: 0,
            phase: LoadPhase::Idle,
            current_page: 1,
            has_next: false,
            total: 0,
            items: Vec::new(),
        }
    }

    /// Begin a session for `collection`, discarding any previous session.
    ///
    /// Accumulated rows are cleared synchronously, the cursor rewinds to
    /// page 1, and every outstanding ticket is invalidated; late responses
    /// from the old session will be dropped at apply time.
    pub fn start(&mut self, collection: i64) -> LoadTicket {
        self.session += 1;
        self.collection = Some(collection);
        self.phase = LoadPhase::LoadingFirst;
        self.current_page = 1;
        self.has_next = false;
        self.total = 0;
        self.items.clear();
        LoadTicket {
            collection,
            page: 1,
            reset: true,
            session: self.session,
        }
    }

    /// Request the next page, if the session is ready for one.
    ///
    /// Returns `None` while a load is in flight (the loader serializes its
    /// own requests), once the session is exhausted, or before any session
    /// has started.
    pub fn request_next(&mut self) -> Option<LoadTicket> {
        if self.phase != LoadPhase::Ready || !self.has_next {
            return None;
        }
        let collection = self.collection?;
        self.phase = LoadPhase::LoadingMore;
        Some(LoadTicket {
            collection,
            page: self.current_page + 1,
            reset: false,
            session: self.session,
        })
    }

    /// The sole scroll-driven trigger: fires iff the viewport bottom is
    /// within `threshold` of the content bottom, the session is `Ready`,
    /// and the service reported a next page. Rapid repeat signals are
    /// absorbed by the in-flight guard, not by any timer.
    pub fn maybe_load_more(
        &mut self,
        metrics: ScrollMetrics,
        threshold: i64,
    ) -> Option<LoadTicket> {
        if metrics.distance_from_bottom() > threshold {
            return None;
        }
        self.request_next()
    }

    /// Apply a successfully fetched page through its ticket.
    ///
    /// Stale tickets leave all state untouched. Otherwise the page's rows
    /// replace or extend the accumulator per the ticket, and `has_next`,
    /// `total` and `current_page` advance together.
    pub fn apply(&mut self, ticket: &LoadTicket, page: Page<T>) -> Applied {
        if ticket.session != self.session {
            return Applied::Stale;
        }
        if ticket.reset {
            self.items.clear();
        }
        self.items.extend(page.items);
        self.has_next = page.meta.has_next;
        self.total = page.meta.total;
        self.current_page = ticket.page;
        self.phase = if self.has_next {
            LoadPhase::Ready
        } else {
            LoadPhase::Exhausted
        };
        Applied::Updated
    }

    /// Record a failed load. Accumulated state is left untouched; the phase
    /// rewinds so the caller may re-trigger (`Ready` after a failed
    /// follow-up, `Idle` after a failed first page). Retries are never
    /// automatic.
    pub fn apply_error(&mut self, ticket: &LoadTicket) -> Applied {
        if ticket.session != self.session {
            return Applied::Stale;
        }
        self.phase = if ticket.reset {
            LoadPhase::Idle
        } else {
            LoadPhase::Ready
        };
        Applied::Updated
    }

    // --- Async drivers (inline-await convenience over the ticket API) ---

    /// Start a session for `collection` and load its first page.
    pub async fn load_first<F: PageFetcher<T>>(
        &mut self,
        fetcher: &F,
        collection: i64,
    ) -> Result<(), ApiError> {
        let ticket = self.start(collection);
        self.run(fetcher, ticket).await
    }

    /// Load the next page if one is available. Returns `Ok(false)` when no
    /// request was issued (in flight, exhausted, or idle).
    pub async fn load_more<F: PageFetcher<T>>(&mut self, fetcher: &F) -> Result<bool, ApiError> {
        let Some(ticket) = self.request_next() else {
            return Ok(false);
        };
        self.run(fetcher, ticket).await.map(|()| true)
    }

    async fn run<F: PageFetcher<T>>(
        &mut self,
        fetcher: &F,
        ticket: LoadTicket,
    ) -> Result<(), ApiError> {
        match fetcher
            .fetch_page(ticket.collection, ticket.page, self.page_size)
            .await
        {
            Ok(page) => {
                self.apply(&ticket, page);
                Ok(())
            }
            Err(e) => {
                self.apply_error(&ticket);
                Err(e)
            }
        }
    }

    // --- Accessors ---

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn has_next(&self) -> bool {
        self.has_next
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn collection(&self) -> Option<i64> {
        self.collection
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, LoadPhase::LoadingFirst | LoadPhase::LoadingMore)
    }
}
