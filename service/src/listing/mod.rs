//! Paginated [`Listing`] of a collection, growing page by page.

mod debounce;

use std::{
    collections::{BTreeMap, BTreeSet, HashSet},
    fmt,
    future::Future,
    num::NonZeroU32,
};

use common::pagination::{Arguments, Page, Selector};
use tracing as log;

use crate::domain::Identify;

pub use self::debounce::Debouncer;

/// State of a [`Listing`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum State {
    /// Nothing is requested yet.
    Idle,

    /// Results are cleared, the first page is to be requested.
    Resetting,

    /// A page is being fetched.
    Loading,

    /// A page is merged and more pages are available.
    Loaded,

    /// Every page is merged.
    Exhausted,

    /// A page failed to load. Previous results are retained until a
    /// [`Listing::retry()`].
    Error,
}

/// Permission to fetch a single page of a [`Listing`].
///
/// Its result must be given back via [`Listing::complete()`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Ticket {
    /// Generation of the [`Listing`] this [`Ticket`] was issued in.
    generation: u64,

    /// Requested page number.
    page: NonZeroU32,

    /// [`Arguments`] to fetch the page with.
    arguments: Arguments,
}

impl Ticket {
    /// Returns the [`Arguments`] to fetch the page with.
    #[must_use]
    pub const fn arguments(&self) -> Arguments {
        self.arguments
    }
}

/// Collection fetched page by page and filtered by `F`.
///
/// Every [`Listing::reset()`] starts a new generation: pages requested
/// before it are discarded once they arrive. Pages are merged on arrival in
/// any order, skipping items already held.
#[derive(Debug)]
pub struct Listing<T: Identify, F> {
    /// Filter applied to the collection.
    filter: F,

    /// [`Arguments`] of the first page.
    first: Arguments,

    /// Current generation.
    generation: u64,

    /// Merged pages by their numbers.
    pages: BTreeMap<NonZeroU32, Vec<T>>,

    /// Identities of the held items.
    seen: HashSet<T::Id>,

    /// Pages being fetched.
    in_flight: BTreeSet<NonZeroU32>,

    /// Pages failed to load.
    failed: BTreeSet<NonZeroU32>,

    /// Total number of items in the collection, once known.
    total: Option<u64>,

    /// Last load error message.
    error: Option<String>,

    /// Current [`State`].
    state: State,
}

impl<T: Identify, F> Listing<T, F> {
    /// Creates a new [`Idle`] [`Listing`] of pages of the provided size.
    ///
    /// [`None`] is returned if `page_size` is zero.
    ///
    /// [`Idle`]: State::Idle
    #[must_use]
    pub fn new(filter: F, page_size: u32) -> Option<Self> {
        Some(Self {
            filter,
            first: Arguments::first(page_size)?,
            generation: 0,
            pages: BTreeMap::new(),
            seen: HashSet::new(),
            in_flight: BTreeSet::new(),
            failed: BTreeSet::new(),
            total: None,
            error: None,
            state: State::Idle,
        })
    }

    /// Returns the current [`State`] of this [`Listing`].
    #[must_use]
    pub const fn state(&self) -> State {
        self.state
    }

    /// Returns the filter of this [`Listing`].
    #[must_use]
    pub const fn filter(&self) -> &F {
        &self.filter
    }

    /// Returns the held items in page order.
    pub fn items(&self) -> impl Iterator<Item = &T> {
        self.pages.values().flatten()
    }

    /// Returns the number of the held items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.values().map(Vec::len).sum()
    }

    /// Indicates whether this [`Listing`] holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the total number of items in the collection, once known.
    #[must_use]
    pub const fn total(&self) -> Option<u64> {
        self.total
    }

    /// Returns the message of the last load failure, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Indicates whether the collection has items beyond the last merged
    /// page.
    #[must_use]
    pub fn has_more(&self) -> bool {
        match (self.pages.keys().next_back(), self.total) {
            (Some(&last), Some(total)) => self.first.nth(last).has_more(total),
            (None, _) | (_, None) => true,
        }
    }

    /// Indicates whether any page is being fetched.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        !self.in_flight.is_empty()
    }

    /// Clears the held items and switches to the provided filter, starting
    /// a new generation.
    pub fn reset(&mut self, filter: F) {
        self.generation += 1;
        self.filter = filter;
        self.pages.clear();
        self.seen.clear();
        self.in_flight.clear();
        self.failed.clear();
        self.total = None;
        self.error = None;
        self.state = State::Resetting;
        log::debug!("`Listing` reset to generation {}", self.generation);
    }

    /// Requests the first page of an [`Idle`] or [`Resetting`] [`Listing`].
    ///
    /// [`Idle`]: State::Idle
    /// [`Resetting`]: State::Resetting
    pub fn start(&mut self) -> Option<Ticket> {
        match self.state {
            State::Idle | State::Resetting => self.fetch(NonZeroU32::MIN),
            State::Loading | State::Loaded | State::Exhausted | State::Error => {
                None
            }
        }
    }

    /// Requests the page following the last merged one, as the end of the
    /// held items comes into view.
    ///
    /// Ignored unless this [`Listing`] is [`Loaded`].
    ///
    /// [`Loaded`]: State::Loaded
    pub fn on_scroll_proximity(&mut self) -> Option<Ticket> {
        if self.state != State::Loaded || !self.has_more() {
            return None;
        }
        let last = self.pages.keys().next_back().copied()?;
        self.fetch(last.checked_add(1)?)
    }

    /// Requests the provided page.
    ///
    /// Suppressed if the page is already being fetched or merged.
    pub fn fetch(&mut self, page: NonZeroU32) -> Option<Ticket> {
        if self.in_flight.contains(&page) || self.pages.contains_key(&page) {
            log::trace!("page {page} is already requested");
            return None;
        }

        _ = self.in_flight.insert(page);
        _ = self.failed.remove(&page);
        self.state = State::Loading;

        Some(Ticket {
            generation: self.generation,
            page,
            arguments: self.first.nth(page),
        })
    }

    /// Requests again the first failed page.
    ///
    /// Ignored unless this [`Listing`] is in the [`State::Error`].
    pub fn retry(&mut self) -> Option<Ticket> {
        if self.state != State::Error {
            return None;
        }
        let page = self.failed.first().copied()?;
        self.fetch(page)
    }

    /// Completes the fetch of a page permitted by the provided [`Ticket`].
    ///
    /// Returns `false` if the [`Ticket`] belongs to a previous generation, so
    /// the `result` is discarded.
    pub fn complete<E: fmt::Display>(
        &mut self,
        ticket: Ticket,
        result: Result<Page<T>, E>,
    ) -> bool {
        if ticket.generation != self.generation {
            log::debug!(
                "discarding page {} of stale generation {}",
                ticket.page,
                ticket.generation,
            );
            return false;
        }
        _ = self.in_flight.remove(&ticket.page);

        match result {
            Ok(Page { items, total }) => {
                let fresh = items
                    .into_iter()
                    .filter(|item| self.seen.insert(item.id()))
                    .collect();
                _ = self.pages.insert(ticket.page, fresh);
                self.total = Some(total);
            }
            Err(e) => {
                log::warn!("failed to load page {}: {e}", ticket.page);
                _ = self.failed.insert(ticket.page);
                self.error = Some(e.to_string());
            }
        }

        if self.failed.is_empty() {
            self.error = None;
        }
        self.state = if self.is_loading() {
            State::Loading
        } else if !self.failed.is_empty() {
            State::Error
        } else if self.has_more() {
            State::Loaded
        } else {
            State::Exhausted
        };
        true
    }

    /// Fetches the page permitted by the provided [`Ticket`] with the
    /// provided `fetch` and merges it.
    ///
    /// Returns `false` if the page is discarded as stale.
    pub async fn load<Fut, E>(
        &mut self,
        ticket: Ticket,
        fetch: impl FnOnce(Selector<F>) -> Fut,
    ) -> bool
    where
        F: Clone,
        Fut: Future<Output = Result<Page<T>, E>>,
        E: fmt::Display,
    {
        let result = fetch(Selector {
            arguments: ticket.arguments,
            filter: self.filter.clone(),
        })
        .await;
        self.complete(ticket, result)
    }
}
