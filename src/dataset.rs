use crate::components::prelude::*;
use crate::ExplorerError;
use indicatif::ProgressBar;
use log::{debug, info};
use std::collections::HashSet;
use std::io::Read;

/// The parsed airports file.
///
/// Holds every row in file order along with the rows that carry an IATA code. The rows are never
/// modified after parsing; every view shown to the user is derived from them.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct Dataset {
    columns: Vec<String>,
    records: Vec<AirportRecord>,
    iata_complete: Vec<AirportRecord>,
}

impl Dataset {
    /// Parses a CSV payload with a header row.
    /// # Errors
    /// * If the payload is not valid CSV
    /// * If the header lacks one of the interpreted columns
    /// * If a row cannot be decoded
    #[inline]
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ExplorerError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);
        let header = rdr.headers()?.clone();
        if let Some(missing) = REQUIRED_COLUMNS
            .iter()
            .find(|column| !header.iter().any(|h| h == **column))
        {
            return Err(ExplorerError::MissingColumn((*missing).to_owned()));
        }

        let mut records = Vec::new();
        for row in rdr.records() {
            let row = row?;
            records.push(AirportRecord::from_row(&row, &header)?);
        }
        Ok(Self::from_records(
            header.iter().map(ToOwned::to_owned).collect(),
            records,
        ))
    }

    /// Builds a dataset out of already decoded rows.
    #[inline]
    #[must_use]
    pub fn from_records(columns: Vec<String>, records: Vec<AirportRecord>) -> Self {
        let iata_complete = records
            .iter()
            .filter(|r| r.has_iata_code())
            .cloned()
            .collect::<Vec<_>>();
        debug!(
            "Dataset has {} rows, {} with an IATA code",
            records.len(),
            iata_complete.len()
        );
        Self {
            columns,
            records,
            iata_complete,
        }
    }

    /// The column names, in header order.
    #[inline]
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Every row of the file.
    #[inline]
    #[must_use]
    pub fn records(&self) -> &[AirportRecord] {
        &self.records
    }

    /// The rows with a non-blank IATA code, in file order.
    #[inline]
    #[must_use]
    pub fn iata_complete(&self) -> &[AirportRecord] {
        &self.iata_complete
    }

    /// The position of a column in the header.
    #[inline]
    #[must_use]
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// The countries of the rows with an IATA code, in order of first appearance.
    #[inline]
    #[must_use]
    pub fn countries(&self) -> Vec<&CountryCode> {
        let mut seen = HashSet::new();
        self.iata_complete
            .iter()
            .map(|r| &r.country)
            .filter(|c| seen.insert(*c))
            .collect()
    }

    /// The airport types of the rows with an IATA code, in order of first appearance.
    #[inline]
    #[must_use]
    pub fn airport_types(&self) -> Vec<&AirportType> {
        let mut seen = HashSet::new();
        self.iata_complete
            .iter()
            .map(|r| &r.airport_type)
            .filter(|t| seen.insert(*t))
            .collect()
    }
}

/// Downloads and parses the airports file.
///
/// The body is read in chunks so that `progress` tracks the download.
/// # Errors
/// * If the request cannot be sent or the body cannot be read
/// * If the server does not answer with a success status
/// * If the body is not a valid airports file
#[inline]
#[allow(clippy::as_conversions)]
pub async fn fetch(url: &str, progress: &ProgressBar) -> Result<Dataset, ExplorerError> {
    info!("Fetching airports from {url}");
    let client = reqwest::Client::builder().build()?;
    let mut response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(ExplorerError::HttpStatus {
            url: url.to_owned(),
            status: status.as_u16(),
        });
    }
    if let Some(length) = response.content_length() {
        progress.set_length(length);
    }
    progress.set_message("Downloading airports.csv");

    let mut body = Vec::new();
    while let Some(chunk) = response.chunk().await? {
        body.extend_from_slice(&chunk);
        progress.inc(chunk.len() as u64);
    }
    debug!("Downloaded {} bytes", body.len());
    progress.set_message("Parsing");

    let dataset = tokio::task::spawn_blocking(move || Dataset::from_reader(body.as_slice())).await??;
    progress.finish_with_message(format!("Loaded {} airports", dataset.records().len()));
    info!(
        "Loaded {} airports, {} with an IATA code",
        dataset.records().len(),
        dataset.iata_complete().len()
    );
    Ok(dataset)
}
