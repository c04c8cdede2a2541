//! On-demand headline loading for a UI shell.
//!
//! A [`FeedController`] owns everything a screen needs to show headlines for
//! one source: the current source slug, the last result, when it was
//! fetched, and the fetch that is currently running. The shell calls
//! [`start`](FeedController::start) when the view becomes active,
//! [`refresh`](FeedController::refresh) on an explicit reload, and
//! [`cancel`](FeedController::cancel) (or drops the controller) on teardown.
//!
//! At most one fetch is in flight per controller; requests made while one is
//! running are refused with [`FetchDecision::AlreadyInFlight`].

use crate::fetcher::{ArticleSource, build_request_url};
use crate::models::ArticleRecord;
use chrono::{DateTime, Utc};
use futures::FutureExt;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

/// What a call to `start` or `refresh` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchDecision {
    /// A new fetch was spawned.
    Started,
    /// Articles for the current source are already loaded; nothing was fetched.
    Reused,
    /// A fetch is still running; no second one was started.
    AlreadyInFlight,
}

/// Snapshot of what the controller has loaded.
#[derive(Debug, Clone, Default)]
pub struct FeedState {
    pub source: String,
    /// Completion time of the last fetch for `source`.
    pub last_fetch: Option<DateTime<Utc>>,
    /// Result of the last completed fetch, possibly empty.
    pub articles: Vec<ArticleRecord>,
}

impl FeedState {
    pub fn is_loaded(&self) -> bool {
        self.last_fetch.is_some()
    }
}

pub struct FeedController<S> {
    fetcher: Arc<S>,
    endpoint: String,
    api_key: String,
    state: FeedState,
    in_flight: Option<JoinHandle<Vec<ArticleRecord>>>,
}

impl<S> std::fmt::Debug for FeedController<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedController")
            .field("endpoint", &self.endpoint)
            .field("source", &self.state.source)
            .field("last_fetch", &self.state.last_fetch)
            .field("articles", &self.state.articles.len())
            .field("in_flight", &self.in_flight.is_some())
            .finish()
    }
}

impl<S> FeedController<S>
where
    S: ArticleSource + Send + Sync + 'static,
{
    /// Create an idle controller for `source`. Nothing is fetched until
    /// [`start`](Self::start) or [`refresh`](Self::refresh).
    ///
    /// # Arguments
    ///
    /// * `fetcher` - Shared article source, cloned into each spawned fetch
    /// * `endpoint` - Articles endpoint passed to [`build_request_url`]
    /// * `api_key` - News API key
    /// * `source` - Initial source slug
    pub fn new(
        fetcher: Arc<S>,
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            fetcher,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            state: FeedState {
                source: source.into(),
                ..FeedState::default()
            },
            in_flight: None,
        }
    }

    pub fn source(&self) -> &str {
        &self.state.source
    }

    pub fn state(&self) -> &FeedState {
        &self.state
    }

    /// Articles from the last completed fetch.
    pub fn articles(&self) -> &[ArticleRecord] {
        &self.state.articles
    }

    /// True while a spawned fetch is still running.
    ///
    /// A fetch that finished in the background but has not been collected
    /// yet counts as done, though its articles are not in [`state`](Self::state)
    /// until [`poll_in_flight`](Self::poll_in_flight) or [`wait`](Self::wait).
    pub fn is_in_flight(&self) -> bool {
        self.in_flight
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Collect a fetch that finished in the background, then report whether
    /// one is still running.
    ///
    /// # Returns
    ///
    /// `true` if a fetch is still running. After `false`, the state reflects
    /// the last completed fetch.
    pub fn poll_in_flight(&mut self) -> bool {
        self.collect_finished();
        self.in_flight.is_some()
    }

    /// Load articles for the current source unless they are already loaded.
    #[instrument(level = "debug", skip(self), fields(source = %self.state.source))]
    pub fn start(&mut self) -> FetchDecision {
        if self.poll_in_flight() {
            return FetchDecision::AlreadyInFlight;
        }
        if self.state.is_loaded() {
            debug!("Articles already loaded; reusing");
            return FetchDecision::Reused;
        }
        self.spawn_fetch();
        FetchDecision::Started
    }

    /// Fetch the current source again, even if articles are loaded.
    #[instrument(level = "debug", skip(self), fields(source = %self.state.source))]
    pub fn refresh(&mut self) -> FetchDecision {
        if self.poll_in_flight() {
            debug!("Refresh ignored; fetch already in flight");
            return FetchDecision::AlreadyInFlight;
        }
        self.spawn_fetch();
        FetchDecision::Started
    }

    /// Switch to another source, discarding in-flight work and loaded articles.
    ///
    /// Returns false if `source` is already the current one.
    pub fn set_source(&mut self, source: impl Into<String>) -> bool {
        let source = source.into();
        if source == self.state.source {
            return false;
        }
        self.cancel();
        info!(from = %self.state.source, to = %source, "Switching news source");
        self.state = FeedState {
            source,
            ..FeedState::default()
        };
        true
    }

    /// Wait for the in-flight fetch and record its result.
    ///
    /// Returns `None` when nothing was in flight or the fetch task died.
    pub async fn wait(&mut self) -> Option<&[ArticleRecord]> {
        let handle = self.in_flight.take()?;
        match handle.await {
            Ok(articles) => {
                self.record(articles);
                Some(self.state.articles.as_slice())
            }
            Err(e) => {
                warn!(error = %e, source = %self.state.source, "Fetch task did not complete");
                None
            }
        }
    }

    /// Abort the in-flight fetch, if any. Loaded articles are kept.
    pub fn cancel(&mut self) -> bool {
        match self.in_flight.take() {
            Some(handle) => {
                handle.abort();
                debug!(source = %self.state.source, "Cancelled in-flight fetch");
                true
            }
            None => false,
        }
    }

    fn spawn_fetch(&mut self) {
        let url = build_request_url(&self.endpoint, &self.state.source, &self.api_key);
        let fetcher = Arc::clone(&self.fetcher);
        debug!(source = %self.state.source, "Spawning fetch");
        self.in_flight = Some(tokio::spawn(async move {
            fetcher.fetch_articles(&url).await
        }));
    }

    fn collect_finished(&mut self) {
        let Some(handle) = self.in_flight.as_mut() else {
            return;
        };
        if !handle.is_finished() {
            return;
        }
        match handle.now_or_never() {
            Some(Ok(articles)) => {
                self.in_flight = None;
                self.record(articles);
            }
            Some(Err(e)) => {
                self.in_flight = None;
                warn!(error = %e, source = %self.state.source, "Fetch task did not complete");
            }
            None => {}
        }
    }

    fn record(&mut self, articles: Vec<ArticleRecord>) {
        info!(
            source = %self.state.source,
            count = articles.len(),
            "Headlines loaded"
        );
        self.state.articles = articles;
        self.state.last_fetch = Some(Utc::now());
    }
}

impl<S> Drop for FeedController<S> {
    fn drop(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }
}
