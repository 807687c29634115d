use crate::cache::DatasetCache;
use crate::config::Config;
use crate::dataset::Dataset;
use crate::filter::FilterCriteria;
use crate::map::{map_points, MapPoint};
use crate::projection::{project, Table};
use crate::ExplorerError;
use log::debug;
use std::sync::Arc;

/// What is shown for the current criteria.
#[derive(Debug, Clone, PartialEq, Default)]
#[non_exhaustive]
pub struct ExplorerView {
    /// How many airports passed the filter
    pub matched: usize,
    /// The filtered airports restricted to the selected columns
    pub table: Table,
    /// The filtered airports that can be placed on the map
    pub points: Vec<MapPoint>,
}

/// Filters the airports with an IATA code and derives the table and the map points.
/// # Errors
/// If a selected column is not in the dataset.
#[inline]
pub fn derive_view(
    dataset: &Dataset,
    criteria: &FilterCriteria,
    columns: &[String],
) -> Result<ExplorerView, ExplorerError> {
    let selected = criteria.apply(dataset.iata_complete());
    let table = project(dataset.columns(), selected.iter().copied(), columns)?;
    let points = map_points(selected.iter().copied());
    Ok(ExplorerView {
        matched: selected.len(),
        table,
        points,
    })
}

struct DerivedView {
    dataset: Arc<Dataset>,
    criteria: FilterCriteria,
    columns: Vec<String>,
    result: Result<ExplorerView, ExplorerError>,
}

impl DerivedView {
    fn is_current(
        &self,
        dataset: &Arc<Dataset>,
        criteria: &FilterCriteria,
        columns: &[String],
    ) -> bool {
        Arc::ptr_eq(&self.dataset, dataset) && self.criteria == *criteria && self.columns == columns
    }
}

/// The state of an explorer session.
///
/// Owns the dataset cache and what the user has chosen. The view is recomputed from the cached
/// dataset whenever the dataset, the criteria or the columns change.
pub struct Explorer {
    config: Config,
    cache: DatasetCache,
    /// The current filter
    pub criteria: FilterCriteria,
    /// The columns to show, in order
    pub columns: Vec<String>,
    /// Whether to show every row of the file
    pub show_raw: bool,
    derived: Option<DerivedView>,
}

impl std::fmt::Debug for Explorer {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Explorer")
            .field("cache", &self.cache)
            .field("criteria", &self.criteria)
            .field("columns", &self.columns)
            .field("show_raw", &self.show_raw)
            .finish_non_exhaustive()
    }
}

impl Explorer {
    /// Starts a session with the configured defaults. Nothing is fetched until `start`.
    #[inline]
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            cache: DatasetCache::new(&config.source_url),
            criteria: FilterCriteria::from_config(&config),
            columns: config.default_columns.clone(),
            show_raw: false,
            derived: None,
            config,
        }
    }

    /// The settings of the session.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// The dataset cache.
    #[inline]
    #[must_use]
    pub const fn cache(&self) -> &DatasetCache {
        &self.cache
    }

    /// The dataset, once fetched.
    #[inline]
    #[must_use]
    pub fn dataset(&self) -> Option<Arc<Dataset>> {
        self.cache.dataset()
    }

    /// Fetches the dataset unless it is already cached or in flight.
    /// # Errors
    /// If the progress bar cannot be set up.
    #[inline]
    pub fn start(&mut self) -> Result<(), ExplorerError> {
        self.cache.request()
    }

    /// Picks up a finished fetch. Returns whether the cache changed.
    #[inline]
    pub fn poll(&mut self) -> bool {
        self.cache.poll()
    }

    /// Drops the cached dataset and fetches it again.
    /// # Errors
    /// If the progress bar cannot be set up.
    #[inline]
    pub fn reload(&mut self) -> Result<(), ExplorerError> {
        self.derived.take();
        self.cache.reload()
    }

    /// Restores the configured criteria and columns.
    #[inline]
    pub fn reset_filters(&mut self) {
        self.criteria = FilterCriteria::from_config(&self.config);
        self.columns = self.config.default_columns.clone();
    }

    /// The view for the current criteria, or `None` while no dataset is cached.
    #[inline]
    pub fn view(&mut self) -> Option<Result<&ExplorerView, &ExplorerError>> {
        let dataset = self.cache.dataset()?;
        let stale = self
            .derived
            .as_ref()
            .map_or(true, |d| !d.is_current(&dataset, &self.criteria, &self.columns));
        if stale {
            debug!("Recomputing view for {}", self.criteria);
            let result = derive_view(&dataset, &self.criteria, &self.columns);
            self.derived = Some(DerivedView {
                dataset,
                criteria: self.criteria.clone(),
                columns: self.columns.clone(),
                result,
            });
        }
        self.derived.as_ref().map(|d| d.result.as_ref())
    }
}

#[allow(clippy::expect_used)]
#[allow(clippy::panic)]
#[allow(clippy::indexing_slicing)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheState;
    use crate::filter::Selection;
    use crate::test_helpers::{load_fixture, serve};
    use std::time::Duration;

    async fn loaded_explorer() -> Explorer {
        let body =
            std::fs::read_to_string("./test/airports.csv").expect("Failed to read airports.csv");
        let server = serve("200 OK", body).await;
        let mut explorer = Explorer::new(Config::with_source_url(&server.url));
        explorer.start().expect("Failed to start fetch");
        for _ in 0..500 {
            if explorer.poll() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(explorer.cache().state(), CacheState::Ready);
        explorer
    }

    fn iata_codes(view: &ExplorerView) -> Vec<&str> {
        view.table.rows.iter().map(|row| row[3].as_str()).collect()
    }

    #[test]
    fn it_derives_the_view_from_the_dataset() {
        let dataset = load_fixture();
        let config = Config::default();
        let view = derive_view(
            &dataset,
            &FilterCriteria::from_config(&config),
            &config.default_columns,
        )
        .expect("Failed to derive view");
        assert_eq!(view.matched, 2);
        assert_eq!(iata_codes(&view), vec!["ATL", "AUS"]);
        assert_eq!(view.points.len(), 2);
    }

    #[test]
    fn it_has_no_view_before_the_dataset_arrives() {
        let mut explorer = Explorer::new(Config::default());
        assert!(explorer.view().is_none());
        assert_eq!(explorer.cache().state(), CacheState::Empty);
    }

    #[tokio::test]
    async fn it_follows_criteria_changes() {
        let mut explorer = loaded_explorer().await;
        let matched = explorer
            .view()
            .expect("Dataset should be loaded")
            .map(|v| v.matched)
            .expect("View should derive");
        assert_eq!(matched, 2);

        explorer.criteria.countries.set_all(true);
        explorer.criteria.types = Selection::all();
        explorer.criteria.set_letter(0, "");
        let view = explorer
            .view()
            .expect("Dataset should be loaded")
            .expect("View should derive");
        assert_eq!(view.matched, 14);
        assert_eq!(view.points.len(), 13);

        explorer.reset_filters();
        let view = explorer
            .view()
            .expect("Dataset should be loaded")
            .expect("View should derive");
        assert_eq!(iata_codes(view), vec!["ATL", "AUS"]);
    }

    #[tokio::test]
    async fn it_reports_an_unknown_column() {
        let mut explorer = loaded_explorer().await;
        explorer.columns.push("runways".to_owned());
        match explorer.view() {
            Some(Err(ExplorerError::UnknownColumn(column))) => assert_eq!(column, "runways"),
            other => panic!("Unexpected view {other:?}"),
        }
        explorer.columns.pop();
        assert!(matches!(explorer.view(), Some(Ok(_))));
    }
}
