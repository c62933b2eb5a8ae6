//! Search state controller.
//!
//! [`SearchState`] owns everything about the current search: the query text,
//! the page counter, the accumulated result set, the total-hit count reported
//! by the API, and the loading and error flags. It decides when a fetch is
//! needed but never performs one; the event handler turns the tags it hands
//! out into requests and feeds the responses back through
//! [`SearchState::complete`].
//!
//! # Fetch Trigger
//!
//! A fetch is requested only when the (query, page) pair changes. Both
//! [`SearchState::submit_query`] and [`SearchState::load_more`] just mutate
//! state; [`SearchState::next_fetch`] compares the pair with the last one it
//! triggered and emits at most one new [`FetchTag`] per change.
//!
//! # Lifecycle
//!
//! ```text
//! Idle(no query) ──submit──► Fetching(1) ──ok──► Idle(ready, more | exhausted)
//!                               │  ▲                    │
//!                             error└──── load_more ─────┘
//!                               ▼
//!                             Error ──submit / load_more──► Fetching
//! ```
//!
//! # Response Ordering
//!
//! Every response carries the tag it was issued for. Responses belonging to
//! an earlier query generation are discarded. Responses for the current
//! generation are applied strictly in page order: a page that arrives ahead of
//! an earlier outstanding page is buffered until the gap is filled. When a
//! page fails, every later page is dropped and the page counter rewinds, so
//! the next load retries the failed page instead of leaving a gap.

use crate::domain::{FetchError, ImageId, ImageRecord};
use crate::gateway::{FetchTag, SearchPage};
use std::collections::{BTreeMap, BTreeSet};

/// What happened to a delivered response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The response, and any buffered pages behind it, were applied. Carries
    /// the number of pages applied.
    Applied(usize),
    /// The response arrived ahead of an earlier page and is held back.
    Buffered,
    /// The response belongs to an abandoned query or an unknown page and was
    /// dropped.
    Stale,
}

/// The search state bundle and its controller operations.
#[derive(Debug, Clone)]
pub struct SearchState {
    query: String,
    page: u32,
    results: Vec<ImageRecord>,
    total_hits: Option<u64>,
    loading: bool,
    error: Option<String>,
    selected: Option<ImageId>,

    /// Bumped on every query change; tags from older generations are stale.
    generation: u64,
    /// Last (generation, page) pair a fetch was triggered for.
    last_trigger: Option<(u64, u32)>,
    /// Pages requested for this generation and not yet applied.
    outstanding: BTreeSet<u32>,
    /// Responses that arrived ahead of an earlier outstanding page.
    arrived: BTreeMap<u32, Result<SearchPage, FetchError>>,
}

impl Default for SearchState {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchState {
    /// Creates an idle search with no query.
    #[must_use]
    pub fn new() -> Self {
        Self {
            query: String::new(),
            page: 1,
            results: Vec::new(),
            total_hits: None,
            loading: false,
            error: None,
            selected: None,
            generation: 0,
            last_trigger: None,
            outstanding: BTreeSet::new(),
            arrived: BTreeMap::new(),
        }
    }

    /// Starts a new search for `text`.
    ///
    /// Surrounding whitespace is ignored. An empty query, or one equal to the
    /// current query, leaves every field untouched and returns `false`.
    /// Otherwise the result set, error, total hits, and selection are cleared,
    /// the page resets to 1, and `true` is returned. No fetch is issued here;
    /// see [`Self::next_fetch`].
    ///
    /// # Examples
    ///
    /// ```
    /// use image_finder::app::SearchState;
    ///
    /// let mut search = SearchState::new();
    /// assert!(search.submit_query("cats"));
    /// assert!(!search.submit_query("cats"));
    /// assert!(!search.submit_query("   "));
    /// assert_eq!(search.page(), 1);
    /// ```
    pub fn submit_query(&mut self, text: &str) -> bool {
        let text = text.trim();

        if text.is_empty() {
            tracing::debug!("ignoring empty query");
            return false;
        }

        if text == self.query {
            tracing::debug!(query = %text, "query unchanged, skipping refetch");
            return false;
        }

        tracing::debug!(
            previous = %self.query,
            query = %text,
            discarded_results = self.results.len(),
            "starting new search"
        );

        self.query = text.to_string();
        self.page = 1;
        self.results.clear();
        self.total_hits = None;
        self.error = None;
        self.selected = None;
        self.generation += 1;
        self.outstanding.clear();
        self.arrived.clear();
        self.loading = false;
        true
    }

    /// Advances to the next page of the current query.
    ///
    /// No-op returning `false` when there is no active query.
    pub fn load_more(&mut self) -> bool {
        if self.query.is_empty() {
            tracing::debug!("load more ignored without an active query");
            return false;
        }

        self.page += 1;
        tracing::debug!(query = %self.query, page = self.page, "advancing page");
        true
    }

    /// Returns the fetch the current state calls for, if any.
    ///
    /// Yields a tag only when the query is non-empty and the (query, page)
    /// pair differs from the last one triggered, so each state change produces
    /// at most one fetch. The returned page is marked outstanding and the
    /// loading flag is raised.
    pub fn next_fetch(&mut self) -> Option<FetchTag> {
        if self.query.is_empty() {
            return None;
        }

        let key = (self.generation, self.page);
        if self.last_trigger == Some(key) {
            return None;
        }

        self.last_trigger = Some(key);
        self.outstanding.insert(self.page);
        self.loading = true;

        tracing::debug!(
            query = %self.query,
            page = self.page,
            generation = self.generation,
            outstanding = self.outstanding.len(),
            "fetch triggered"
        );

        Some(FetchTag {
            generation: self.generation,
            query: self.query.clone(),
            page: self.page,
        })
    }

    /// Delivers the outcome of the fetch identified by `tag`.
    ///
    /// A response for another generation, or for a page that is not
    /// outstanding, is dropped. Otherwise it is applied in page order:
    /// successes append records, set total hits, and clear the error. A
    /// failure sets the error, leaves results untouched, and discards every
    /// later page of the generation (see [`Self::fail`]).
    pub fn complete(&mut self, tag: &FetchTag, outcome: Result<SearchPage, FetchError>) -> Completion {
        if tag.generation != self.generation || !self.outstanding.contains(&tag.page) {
            tracing::debug!(
                tag_query = %tag.query,
                tag_page = tag.page,
                tag_generation = tag.generation,
                current_generation = self.generation,
                "discarding stale response"
            );
            return Completion::Stale;
        }

        self.arrived.insert(tag.page, outcome);

        let mut applied = 0;
        while let Some(&next) = self.outstanding.first() {
            let Some(outcome) = self.arrived.remove(&next) else {
                break;
            };
            self.outstanding.remove(&next);
            applied += 1;

            match outcome {
                Ok(page) => self.apply(next, page),
                Err(e) => {
                    self.fail(next, &e);
                    break;
                }
            }
        }

        self.loading = !self.outstanding.is_empty();

        if applied == 0 {
            tracing::debug!(page = tag.page, "response buffered until earlier pages arrive");
            Completion::Buffered
        } else {
            Completion::Applied(applied)
        }
    }

    fn apply(&mut self, page: u32, SearchPage { records, total_hits }: SearchPage) {
        let room = usize::try_from(total_hits)
            .unwrap_or(usize::MAX)
            .saturating_sub(self.results.len());
        let received = records.len();
        self.results.extend(records.into_iter().take(room));
        if received > room {
            tracing::debug!(received, kept = room, total_hits, "dropped records beyond total hits");
        }

        self.total_hits = Some(total_hits);
        self.error = None;

        tracing::debug!(
            page,
            received,
            result_count = self.results.len(),
            total_hits,
            "page applied"
        );
    }

    /// Records the failure of `page` and rewinds to the page before it.
    ///
    /// Later pages of this generation, buffered or still in flight, are
    /// dropped so the result set never skips over the failed page. The next
    /// [`Self::load_more`] asks for the failed page again.
    fn fail(&mut self, page: u32, error: &FetchError) {
        let dropped = self.outstanding.len() + self.arrived.len();
        self.outstanding.clear();
        self.arrived.clear();

        self.page = page.saturating_sub(1);
        self.last_trigger = Some((self.generation, self.page));
        self.error = Some(error.to_string());

        tracing::warn!(page, query = %self.query, dropped, error = %error, "fetch failed");
    }

    /// Opens the modal on the record with `id`.
    ///
    /// Returns `false` and leaves the selection alone if no such record is in
    /// the result set.
    pub fn select_image(&mut self, id: ImageId) -> bool {
        if self.results.iter().any(|r| r.id == id) {
            self.selected = Some(id);
            true
        } else {
            false
        }
    }

    /// Closes the modal.
    pub fn deselect(&mut self) {
        self.selected = None;
    }

    /// The record shown in the modal, if any.
    #[must_use]
    pub fn selected_image(&self) -> Option<&ImageRecord> {
        self.selected
            .and_then(|id| self.results.iter().find(|r| r.id == id))
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    #[must_use]
    pub fn results(&self) -> &[ImageRecord] {
        &self.results
    }

    #[must_use]
    pub const fn total_hits(&self) -> Option<u64> {
        self.total_hits
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// True when no search has been submitted yet.
    #[must_use]
    pub fn show_welcome(&self) -> bool {
        self.query.is_empty()
    }

    /// True when the last successful fetch for the current query found nothing.
    #[must_use]
    pub fn show_no_results(&self) -> bool {
        !self.query.is_empty() && self.error.is_none() && self.total_hits == Some(0)
    }

    /// True when the last fetch failed and nothing is in flight, so a load
    /// would retry the failed page.
    #[must_use]
    pub fn can_retry(&self) -> bool {
        !self.query.is_empty() && self.error.is_some() && !self.loading
    }

    /// True when the API reports more matches than have been loaded.
    #[must_use]
    pub fn can_load_more(&self) -> bool {
        self.total_hits
            .is_some_and(|total| total > self.results.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_of(start: u64, count: u64, total_hits: u64) -> SearchPage {
        SearchPage {
            records: (start..start + count)
                .map(|id| ImageRecord::sample(id, "cat, animal"))
                .collect(),
            total_hits,
        }
    }

    fn ids(search: &SearchState) -> Vec<ImageId> {
        search.results().iter().map(|r| r.id).collect()
    }

    #[test]
    fn new_search_is_idle() {
        let mut search = SearchState::new();
        assert!(search.show_welcome());
        assert!(!search.show_no_results());
        assert!(!search.can_load_more());
        assert_eq!(search.next_fetch(), None);
    }

    #[test]
    fn submit_resets_before_any_fetch_resolves() {
        let mut search = SearchState::new();
        search.submit_query("cats");
        let tag = search.next_fetch().unwrap();
        search.complete(&tag, Ok(page_of(1, 12, 100)));
        search.load_more();
        assert_eq!(search.page(), 2);

        assert!(search.submit_query("dogs"));
        assert!(search.results().is_empty());
        assert_eq!(search.page(), 1);
        assert_eq!(search.total_hits(), None);
        assert_eq!(search.error(), None);
    }

    #[test]
    fn identical_submit_triggers_nothing() {
        let mut search = SearchState::new();
        search.submit_query("cats");
        let tag = search.next_fetch().unwrap();
        search.complete(&tag, Ok(page_of(1, 12, 100)));

        let before = (search.page(), search.results().len(), search.generation());
        assert!(!search.submit_query("cats"));
        assert!(!search.submit_query("  cats "));
        assert_eq!(before, (search.page(), search.results().len(), search.generation()));
        assert_eq!(search.next_fetch(), None);
    }

    #[test]
    fn load_more_without_query_is_noop() {
        let mut search = SearchState::new();
        assert!(!search.load_more());
        assert_eq!(search.page(), 1);
        assert_eq!(search.next_fetch(), None);
    }

    #[test]
    fn each_change_triggers_exactly_one_fetch() {
        let mut search = SearchState::new();
        search.submit_query("cats");

        let first = search.next_fetch().unwrap();
        assert_eq!((first.query.as_str(), first.page), ("cats", 1));
        assert!(search.is_loading());
        assert_eq!(search.next_fetch(), None);

        search.load_more();
        let second = search.next_fetch().unwrap();
        assert_eq!(second.page, 2);
        assert_eq!(search.next_fetch(), None);
    }

    #[test]
    fn pages_accumulate_in_order() {
        let mut search = SearchState::new();
        search.submit_query("cats");
        let p1 = search.next_fetch().unwrap();
        assert_eq!(search.complete(&p1, Ok(page_of(1, 12, 100))), Completion::Applied(1));
        assert!(search.can_load_more());
        assert!(!search.is_loading());

        search.load_more();
        let p2 = search.next_fetch().unwrap();
        search.complete(&p2, Ok(page_of(13, 12, 100)));

        assert_eq!(search.results().len(), 24);
        assert_eq!(ids(&search), (1..=24).collect::<Vec<_>>());
    }

    #[test]
    fn late_response_for_abandoned_query_is_discarded() {
        let mut search = SearchState::new();
        search.submit_query("cats");
        let p1 = search.next_fetch().unwrap();
        search.complete(&p1, Ok(page_of(1, 12, 100)));
        search.load_more();
        let cats_p2 = search.next_fetch().unwrap();

        search.submit_query("dogs");
        let dogs_p1 = search.next_fetch().unwrap();

        assert_eq!(search.complete(&cats_p2, Ok(page_of(13, 12, 100))), Completion::Stale);
        assert!(search.results().is_empty());
        assert!(search.is_loading());

        search.complete(&dogs_p1, Ok(page_of(500, 12, 40)));
        assert_eq!(ids(&search), (500..512).collect::<Vec<_>>());
    }

    #[test]
    fn resubmitting_an_old_query_starts_a_new_generation() {
        let mut search = SearchState::new();
        search.submit_query("cats");
        let old = search.next_fetch().unwrap();
        search.submit_query("dogs");
        search.submit_query("cats");
        let fresh = search.next_fetch().unwrap();

        assert_eq!(old.query, fresh.query);
        assert_eq!(search.complete(&old, Ok(page_of(1, 12, 100))), Completion::Stale);
        assert_eq!(search.complete(&fresh, Ok(page_of(1, 12, 100))), Completion::Applied(1));
    }

    #[test]
    fn out_of_order_pages_are_reordered() {
        let mut search = SearchState::new();
        search.submit_query("cats");
        let p1 = search.next_fetch().unwrap();
        search.complete(&p1, Ok(page_of(1, 12, 100)));

        search.load_more();
        let p2 = search.next_fetch().unwrap();
        search.load_more();
        let p3 = search.next_fetch().unwrap();

        assert_eq!(search.complete(&p3, Ok(page_of(25, 12, 100))), Completion::Buffered);
        assert_eq!(search.results().len(), 12);
        assert!(search.is_loading());

        assert_eq!(search.complete(&p2, Ok(page_of(13, 12, 100))), Completion::Applied(2));
        assert_eq!(ids(&search), (1..=36).collect::<Vec<_>>());
        assert!(!search.is_loading());
    }

    #[test]
    fn duplicate_response_is_stale() {
        let mut search = SearchState::new();
        search.submit_query("cats");
        let p1 = search.next_fetch().unwrap();
        search.complete(&p1, Ok(page_of(1, 12, 100)));
        assert_eq!(search.complete(&p1, Ok(page_of(1, 12, 100))), Completion::Stale);
        assert_eq!(search.results().len(), 12);
    }

    #[test]
    fn failure_keeps_previous_pages() {
        let mut search = SearchState::new();
        search.submit_query("cats");
        let p1 = search.next_fetch().unwrap();
        search.complete(&p1, Ok(page_of(1, 12, 100)));
        search.load_more();
        let p2 = search.next_fetch().unwrap();

        search.complete(&p2, Err(FetchError::Transport("connection reset".into())));

        assert_eq!(search.error(), Some("network error: connection reset"));
        assert!(!search.is_loading());
        assert_eq!(ids(&search), (1..=12).collect::<Vec<_>>());
        assert_eq!(search.total_hits(), Some(100));
        assert_eq!(search.page(), 1);
        assert!(search.can_retry());
    }

    #[test]
    fn error_does_not_block_further_actions() {
        let mut search = SearchState::new();
        search.submit_query("cats");
        let p1 = search.next_fetch().unwrap();
        search.complete(&p1, Err(FetchError::Transport("offline".into())));

        assert!(search.error().is_some());
        assert!(!search.show_welcome());
        assert!(!search.show_no_results());

        assert!(search.can_retry());
        assert!(search.load_more());
        let retry = search.next_fetch().unwrap();
        assert_eq!(retry.page, 1);
        assert!(!search.can_retry());

        search.complete(&retry, Ok(page_of(1, 12, 100)));
        assert_eq!(search.error(), None);
        assert_eq!(ids(&search), (1..=12).collect::<Vec<_>>());
    }

    #[test]
    fn failed_page_drops_later_buffered_pages() {
        let mut search = SearchState::new();
        search.submit_query("cats");
        let p1 = search.next_fetch().unwrap();
        search.complete(&p1, Ok(page_of(1, 12, 100)));

        search.load_more();
        let p2 = search.next_fetch().unwrap();
        search.load_more();
        let p3 = search.next_fetch().unwrap();

        assert_eq!(search.complete(&p3, Ok(page_of(25, 12, 100))), Completion::Buffered);
        assert_eq!(
            search.complete(&p2, Err(FetchError::Transport("connection reset".into()))),
            Completion::Applied(1)
        );

        assert_eq!(search.error(), Some("network error: connection reset"));
        assert_eq!(ids(&search), (1..=12).collect::<Vec<_>>());
        assert!(!search.is_loading());
        assert_eq!(search.page(), 1);
        assert_eq!(search.next_fetch(), None);

        search.load_more();
        let retry = search.next_fetch().unwrap();
        assert_eq!(retry.page, 2);
        search.complete(&retry, Ok(page_of(13, 12, 100)));
        assert_eq!(search.error(), None);
        assert_eq!(ids(&search), (1..=24).collect::<Vec<_>>());
    }

    #[test]
    fn failed_page_turns_later_in_flight_pages_stale() {
        let mut search = SearchState::new();
        search.submit_query("cats");
        let p1 = search.next_fetch().unwrap();
        search.complete(&p1, Ok(page_of(1, 12, 100)));

        search.load_more();
        let p2 = search.next_fetch().unwrap();
        search.load_more();
        let p3 = search.next_fetch().unwrap();

        search.complete(&p2, Err(FetchError::Status { status: 500, message: "oops".into() }));
        assert!(!search.is_loading());
        assert_eq!(search.complete(&p3, Ok(page_of(25, 12, 100))), Completion::Stale);
        assert_eq!(ids(&search), (1..=12).collect::<Vec<_>>());
        assert!(search.error().is_some());
    }

    #[test]
    fn empty_result_shows_no_results() {
        let mut search = SearchState::new();
        search.submit_query("xyzzy123nonexistent");
        let tag = search.next_fetch().unwrap();
        search.complete(&tag, Ok(page_of(0, 0, 0)));

        assert!(search.show_no_results());
        assert!(!search.can_load_more());
        assert!(!search.show_welcome());
    }

    #[test]
    fn results_never_exceed_total_hits() {
        let mut search = SearchState::new();
        search.submit_query("cats");
        let tag = search.next_fetch().unwrap();
        search.complete(&tag, Ok(page_of(1, 12, 5)));

        assert_eq!(search.results().len(), 5);
        assert!(!search.can_load_more());
    }

    #[test]
    fn selection_must_reference_a_loaded_record() {
        let mut search = SearchState::new();
        search.submit_query("cats");
        let tag = search.next_fetch().unwrap();
        search.complete(&tag, Ok(page_of(1, 3, 3)));

        assert!(!search.select_image(99));
        assert!(search.selected_image().is_none());

        assert!(search.select_image(2));
        assert_eq!(search.selected_image().map(|r| r.id), Some(2));

        search.deselect();
        assert!(search.selected_image().is_none());
    }

    #[test]
    fn new_query_clears_selection() {
        let mut search = SearchState::new();
        search.submit_query("cats");
        let tag = search.next_fetch().unwrap();
        search.complete(&tag, Ok(page_of(1, 3, 3)));
        search.select_image(1);

        search.submit_query("dogs");
        assert!(search.selected_image().is_none());
    }
}
