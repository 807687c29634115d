use derive_more::{Display, From, FromStr};
use serde::{Deserialize, Serialize};

/// The three letter IATA code of an airport.
#[derive(
    Clone, Debug, Display, PartialEq, Eq, PartialOrd, Ord, Deserialize, Serialize, Hash, FromStr,
)]
#[non_exhaustive]
pub struct IataCode(pub String);

impl IataCode {
    /// Whether the code holds anything besides whitespace.
    #[inline]
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// The character at the given zero-based position of the code, if any.
    #[inline]
    #[must_use]
    pub fn char_at(&self, position: usize) -> Option<char> {
        self.0.trim().chars().nth(position)
    }
}

impl From<String> for IataCode {
    #[inline]
    fn from(s: String) -> Self {
        IataCode(s)
    }
}

impl From<&str> for IataCode {
    #[inline]
    fn from(s: &str) -> Self {
        IataCode(s.to_owned())
    }
}

/// An ISO 3166-1 alpha-2 country code as written in the `iso_country` column.
#[derive(
    Clone, Debug, Display, PartialEq, Eq, PartialOrd, Ord, Deserialize, Serialize, Hash, FromStr,
)]
#[non_exhaustive]
pub struct CountryCode(pub String);

impl From<String> for CountryCode {
    #[inline]
    fn from(s: String) -> Self {
        CountryCode(s)
    }
}

impl From<&str> for CountryCode {
    #[inline]
    fn from(s: &str) -> Self {
        CountryCode(s.to_owned())
    }
}

/// The airport classification in the `type` column, e.g. `large_airport` or `heliport`.
#[derive(
    Clone, Debug, Display, PartialEq, Eq, PartialOrd, Ord, Deserialize, Serialize, Hash, FromStr,
)]
#[non_exhaustive]
pub struct AirportType(pub String);

impl From<String> for AirportType {
    #[inline]
    fn from(s: String) -> Self {
        AirportType(s)
    }
}

impl From<&str> for AirportType {
    #[inline]
    fn from(s: &str) -> Self {
        AirportType(s.to_owned())
    }
}

/// A latitude in decimal degrees.
#[derive(Copy, Clone, Debug, Display, PartialEq, PartialOrd, Deserialize, Serialize, From)]
#[non_exhaustive]
pub struct Latitude(pub f64);

/// A longitude in decimal degrees.
#[derive(Copy, Clone, Debug, Display, PartialEq, PartialOrd, Deserialize, Serialize, From)]
#[non_exhaustive]
pub struct Longitude(pub f64);
