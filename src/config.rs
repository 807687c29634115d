use crate::components::airport::{
    COUNTRY_COLUMN, IATA_CODE_COLUMN, MUNICIPALITY_COLUMN, NAME_COLUMN,
};

/// Where the airports file is published.
pub const SOURCE_URL: &str = "https://davidmegginson.github.io/ourairports-data/airports.csv";
/// The page describing the dataset.
pub const DATA_SOURCE_PAGE: &str = "https://ourairports.com/data/";

/// Settings for an explorer session.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct Config {
    /// The URL the dataset is fetched from
    pub source_url: String,
    /// The link shown as the data source
    pub data_source_page: String,
    /// The columns shown before the user picks any
    pub default_columns: Vec<String>,
    /// The countries selected on startup
    pub default_countries: Vec<String>,
    /// The airport types selected on startup
    pub default_types: Vec<String>,
    /// The IATA position constraints on startup
    pub default_letters: [String; 3],
    /// The initial window size in points
    pub window_size: (f32, f32),
}

impl Default for Config {
    #[inline]
    fn default() -> Self {
        Self {
            source_url: SOURCE_URL.to_owned(),
            data_source_page: DATA_SOURCE_PAGE.to_owned(),
            default_columns: [
                MUNICIPALITY_COLUMN,
                COUNTRY_COLUMN,
                NAME_COLUMN,
                IATA_CODE_COLUMN,
            ]
            .iter()
            .map(|c| (*c).to_owned())
            .collect(),
            default_countries: vec!["US".to_owned()],
            default_types: vec!["large_airport".to_owned()],
            default_letters: ["A".to_owned(), String::new(), String::new()],
            window_size: (1280.0, 800.0),
        }
    }
}

impl Config {
    /// The default settings pointed at another source.
    #[inline]
    #[must_use]
    pub fn with_source_url(url: &str) -> Self {
        Self {
            source_url: url.to_owned(),
            ..Self::default()
        }
    }
}
