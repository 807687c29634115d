//! Explorer for the OurAirports world airport dataset.
#![warn(
    clippy::all,
    clippy::restriction,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo,
    rust_2018_idioms,
    missing_debug_implementations,
    missing_docs
)]
#![allow(clippy::module_inception)]
#![allow(clippy::implicit_return)]
#![allow(clippy::blanket_clippy_restriction_lints)]
#![allow(clippy::shadow_same)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cargo_common_metadata)]
#![allow(clippy::separated_literal_suffix)]
#![allow(clippy::float_arithmetic)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::use_self)]
#![allow(clippy::pattern_type_mismatch)]
#![allow(clippy::pub_use)]

use indicatif::style::TemplateError;
use thiserror::Error;
use tokio::task::JoinError;

/// Holds the background loading of the dataset
pub mod cache;
/// Holds the components of a dataset row
pub mod components;
/// Holds the defaults used by the explorer
pub mod config;
/// Holds the parsed dataset and the loader
pub mod dataset;
/// Holds the top level explorer state
pub mod explorer;
/// Holds the filter criteria
pub mod filter;
/// Holds the points to plot on the map
pub mod map;
/// Holds the column projection
pub mod projection;
#[cfg(test)]
mod test_helpers;

/// Errors that may occur when loading the dataset or deriving views from it.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ExplorerError {
    /// The HTTP request could not be completed.
    #[error("{0}")]
    HttpError(#[from] reqwest::Error),
    /// The server answered with a non-success status.
    #[error("Request to {url} failed with status {status}")]
    HttpStatus {
        /// The requested URL
        url: String,
        /// The status code returned by the server
        status: u16,
    },
    /// The payload is not valid CSV.
    #[error("{0}")]
    CsvError(#[from] csv::Error),
    /// The payload lacks a column the explorer needs.
    #[error("Missing column `{0}`")]
    MissingColumn(String),
    /// A projection asked for a column the dataset does not have.
    #[error("Unknown column `{0}`")]
    UnknownColumn(String),
    /// The background fetch ended without reporting a result.
    #[error("The fetch ended without a result")]
    FetchAborted,
    /// The background fetch task failed.
    #[error("{0}")]
    JoinError(#[from] JoinError),
    /// An `indicatif` template error
    #[error("{0}")]
    TemplateError(#[from] TemplateError),
}
