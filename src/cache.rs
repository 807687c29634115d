use crate::dataset::{fetch, Dataset};
use crate::ExplorerError;
use indicatif::{InMemoryTerm, ProgressBar, ProgressDrawTarget, ProgressStyle, TermLike};
use log::{debug, error, info};
use std::fmt;
use std::sync::Arc;
use tokio::sync::mpsc::error::TryRecvError;
use tokio::sync::mpsc::{channel, Receiver};
use tokio::task::JoinHandle;

const TERMINAL_ROWS: u16 = 4;
const TERMINAL_COLUMNS: u16 = 160;
const PROGRESS_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} {bytes_per_sec} {msg}";

/// Where the cache is in its lifecycle.
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum CacheState {
    /// Nothing fetched yet
    #[default]
    Empty,
    /// A fetch is in flight
    Loading,
    /// The dataset is available
    Ready,
    /// The last fetch failed
    Failed,
}

/// Holds the dataset for the lifetime of the process.
///
/// The dataset is fetched at most once: `request` starts a background fetch only if nothing is
/// cached and nothing is in flight, and a failed fetch stays failed until `reload` is called.
/// The fetched dataset is shared read-only behind an `Arc`.
pub struct DatasetCache {
    source_url: String,
    dataset: Option<Arc<Dataset>>,
    error: Option<ExplorerError>,
    receiver: Option<Receiver<Result<Dataset, ExplorerError>>>,
    handle: Option<JoinHandle<()>>,
    terminal: InMemoryTerm,
    fetches: usize,
}

impl fmt::Debug for DatasetCache {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatasetCache")
            .field("source_url", &self.source_url)
            .field("state", &self.state())
            .field("fetches", &self.fetches)
            .finish_non_exhaustive()
    }
}

impl DatasetCache {
    /// Creates an empty cache for the given source.
    #[inline]
    #[must_use]
    pub fn new(source_url: &str) -> Self {
        Self {
            source_url: source_url.to_owned(),
            dataset: None,
            error: None,
            receiver: None,
            handle: None,
            terminal: InMemoryTerm::new(TERMINAL_ROWS, TERMINAL_COLUMNS),
            fetches: 0,
        }
    }

    /// The URL the dataset is fetched from.
    #[inline]
    #[must_use]
    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    /// The current lifecycle state.
    #[inline]
    #[must_use]
    pub const fn state(&self) -> CacheState {
        if self.dataset.is_some() {
            CacheState::Ready
        } else if self.error.is_some() {
            CacheState::Failed
        } else if self.handle.is_some() {
            CacheState::Loading
        } else {
            CacheState::Empty
        }
    }

    /// The cached dataset, if the fetch succeeded.
    #[inline]
    #[must_use]
    pub fn dataset(&self) -> Option<Arc<Dataset>> {
        self.dataset.as_ref().map(Arc::clone)
    }

    /// The error of the last fetch, if it failed.
    #[inline]
    #[must_use]
    pub const fn error(&self) -> Option<&ExplorerError> {
        self.error.as_ref()
    }

    /// How many fetches have been started.
    #[inline]
    #[must_use]
    pub const fn fetches(&self) -> usize {
        self.fetches
    }

    /// The terminal the download progress is drawn into.
    #[inline]
    #[must_use]
    pub fn progress_log(&self) -> String {
        self.terminal.contents()
    }

    /// Starts fetching the dataset unless it is cached, failed or already in flight.
    ///
    /// Must be called from within a tokio runtime.
    /// # Errors
    /// If the progress bar cannot be set up.
    #[inline]
    pub fn request(&mut self) -> Result<(), ExplorerError> {
        if self.state() != CacheState::Empty {
            return Ok(());
        }
        let progress = self.progress_bar()?;
        let url = self.source_url.clone();
        let (tx, rx) = channel(1);
        self.receiver = Some(rx);
        self.fetches = self.fetches.saturating_add(1);
        debug!("Starting fetch #{} of {url}", self.fetches);

        self.handle = Some(tokio::spawn(async move {
            let result = fetch(&url, &progress).await;
            if let Err(e) = &result {
                progress.abandon_with_message(format!("Failed: {e}"));
            }
            if let Err(e) = tx.send(result).await {
                error!("{}", e);
            }
        }));
        Ok(())
    }

    /// Moves a finished fetch into the cache. Returns whether the state changed.
    #[inline]
    pub fn poll(&mut self) -> bool {
        let Some(receiver) = &mut self.receiver else {
            return false;
        };
        match receiver.try_recv() {
            Ok(Ok(dataset)) => {
                info!("Dataset ready");
                self.dataset = Some(Arc::new(dataset));
            }
            Ok(Err(e)) => {
                error!("Failed to load airports: {e}");
                self.error = Some(e);
            }
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Disconnected) => {
                error!("Fetch task ended without a result");
                self.error = Some(ExplorerError::FetchAborted);
            }
        }
        self.receiver.take();
        self.handle.take();
        true
    }

    /// Discards the cached dataset or error and fetches again.
    /// # Errors
    /// If the progress bar cannot be set up.
    #[inline]
    pub fn reload(&mut self) -> Result<(), ExplorerError> {
        info!("Reloading airports");
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
        self.receiver.take();
        self.dataset.take();
        self.error.take();
        self.terminal = InMemoryTerm::new(TERMINAL_ROWS, TERMINAL_COLUMNS);
        self.request()
    }

    fn progress_bar(&self) -> Result<ProgressBar, ExplorerError> {
        let bar = ProgressBar::new(0);
        bar.set_draw_target(ProgressDrawTarget::term_like(
            Box::new(self.terminal.clone()) as Box<dyn TermLike>
        ));
        bar.set_style(ProgressStyle::default_bar().template(PROGRESS_TEMPLATE)?);
        Ok(bar)
    }
}

#[allow(clippy::expect_used)]
#[allow(clippy::panic)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{serve, unreachable_url};
    use std::time::Duration;

    async fn wait_for_fetch(cache: &mut DatasetCache) {
        for _ in 0..500 {
            if cache.poll() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("The fetch did not finish");
    }

    fn fixture_body() -> String {
        std::fs::read_to_string("./test/airports.csv").expect("Failed to read airports.csv")
    }

    #[tokio::test]
    async fn it_fetches_once_and_keeps_the_dataset() {
        let server = serve("200 OK", fixture_body()).await;
        let mut cache = DatasetCache::new(&server.url);
        assert_eq!(cache.state(), CacheState::Empty);

        cache.request().expect("Failed to start fetch");
        assert_eq!(cache.state(), CacheState::Loading);
        cache.request().expect("Failed to start fetch");
        assert_eq!(cache.fetches(), 1);

        wait_for_fetch(&mut cache).await;
        assert_eq!(cache.state(), CacheState::Ready);
        let first = cache.dataset().expect("Dataset should be cached");
        assert_eq!(first.iata_complete().len(), 14);

        cache.request().expect("Failed to start fetch");
        assert!(!cache.poll());
        let second = cache.dataset().expect("Dataset should be cached");
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.fetches(), 1);
        assert_eq!(server.hits(), 1);
    }

    #[tokio::test]
    async fn it_fetches_again_on_reload() {
        let server = serve("200 OK", fixture_body()).await;
        let mut cache = DatasetCache::new(&server.url);
        cache.request().expect("Failed to start fetch");
        wait_for_fetch(&mut cache).await;
        let first = cache.dataset().expect("Dataset should be cached");

        cache.reload().expect("Failed to reload");
        assert_eq!(cache.state(), CacheState::Loading);
        assert!(cache.dataset().is_none());
        wait_for_fetch(&mut cache).await;

        let second = cache.dataset().expect("Dataset should be cached");
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(*first, *second);
        assert_eq!(cache.fetches(), 2);
        assert_eq!(server.hits(), 2);
    }

    #[tokio::test]
    async fn it_keeps_a_failed_fetch_until_reload() {
        let mut cache = DatasetCache::new(&unreachable_url().await);
        cache.request().expect("Failed to start fetch");
        wait_for_fetch(&mut cache).await;
        assert_eq!(cache.state(), CacheState::Failed);
        assert!(cache.dataset().is_none());
        assert!(matches!(cache.error(), Some(ExplorerError::HttpError(_))));

        cache.request().expect("Failed to start fetch");
        assert_eq!(cache.state(), CacheState::Failed);
        assert_eq!(cache.fetches(), 1);
    }

    #[tokio::test]
    async fn it_fails_on_a_payload_that_is_not_an_airports_file() {
        let server = serve("200 OK", "hello,world\n1,2\n".to_owned()).await;
        let mut cache = DatasetCache::new(&server.url);
        cache.request().expect("Failed to start fetch");
        wait_for_fetch(&mut cache).await;
        assert_eq!(cache.state(), CacheState::Failed);
        assert!(matches!(
            cache.error(),
            Some(ExplorerError::MissingColumn(_))
        ));
    }
}
