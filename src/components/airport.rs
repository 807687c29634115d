use crate::components::wrappers::{AirportType, CountryCode, IataCode, Latitude, Longitude};
use serde::{Deserialize, Serialize};

/// Column holding the IATA code.
pub const IATA_CODE_COLUMN: &str = "iata_code";
/// Column holding the airport name.
pub const NAME_COLUMN: &str = "name";
/// Column holding the municipality served by the airport.
pub const MUNICIPALITY_COLUMN: &str = "municipality";
/// Column holding the ISO country code.
pub const COUNTRY_COLUMN: &str = "iso_country";
/// Column holding the airport type.
pub const TYPE_COLUMN: &str = "type";
/// Column holding the latitude.
pub const LATITUDE_COLUMN: &str = "latitude_deg";
/// Column holding the longitude.
pub const LONGITUDE_COLUMN: &str = "longitude_deg";

/// The columns every airports file must carry.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    IATA_CODE_COLUMN,
    NAME_COLUMN,
    MUNICIPALITY_COLUMN,
    COUNTRY_COLUMN,
    TYPE_COLUMN,
    LATITUDE_COLUMN,
    LONGITUDE_COLUMN,
];

/// A row of the airports file.
///
/// The interpreted columns are decoded into typed fields; `fields` keeps every column of the row
/// verbatim, in header order, so that any column can be shown in a table.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[non_exhaustive]
pub struct AirportRecord {
    /// The IATA code, absent for most small fields
    pub iata_code: Option<IataCode>,
    /// The name of the airport
    pub name: String,
    /// The municipality served by the airport
    pub municipality: Option<String>,
    /// The country the airport is in
    #[serde(rename = "iso_country")]
    pub country: CountryCode,
    /// The kind of airport
    #[serde(rename = "type")]
    pub airport_type: AirportType,
    /// The latitude, absent if empty or not a number
    #[serde(rename = "latitude_deg", deserialize_with = "csv::invalid_option")]
    pub latitude: Option<Latitude>,
    /// The longitude, absent if empty or not a number
    #[serde(rename = "longitude_deg", deserialize_with = "csv::invalid_option")]
    pub longitude: Option<Longitude>,
    /// Every column of the row, in header order
    #[serde(skip)]
    pub fields: Vec<String>,
}

impl AirportRecord {
    /// Decodes a row given the header of the file.
    /// # Errors
    /// If one of the interpreted columns cannot be decoded.
    #[inline]
    pub fn from_row(row: &csv::StringRecord, header: &csv::StringRecord) -> Result<Self, csv::Error> {
        let mut record: AirportRecord = row.deserialize(Some(header))?;
        record.fields = row.iter().map(ToOwned::to_owned).collect();
        Ok(record)
    }

    /// Whether the record carries a non-blank IATA code.
    #[inline]
    #[must_use]
    pub fn has_iata_code(&self) -> bool {
        self.iata_code.as_ref().map_or(false, |code| !code.is_blank())
    }

    /// The raw value of the column at `index`, empty if the row is short.
    #[inline]
    #[must_use]
    pub fn field(&self, index: usize) -> &str {
        self.fields.get(index).map_or("", String::as_str)
    }
}

#[allow(clippy::expect_used)]
#[allow(clippy::indexing_slicing)]
#[cfg(test)]
mod tests {
    use super::*;

    fn header() -> csv::StringRecord {
        csv::StringRecord::from(vec![
            "id",
            "ident",
            "type",
            "name",
            "latitude_deg",
            "longitude_deg",
            "iso_country",
            "municipality",
            "iata_code",
        ])
    }

    #[test]
    fn it_decodes_a_row_and_keeps_every_field() {
        let row = csv::StringRecord::from(vec![
            "3622",
            "KJFK",
            "large_airport",
            "John F Kennedy International Airport",
            "40.639447",
            "-73.779317",
            "US",
            "New York",
            "JFK",
        ]);
        let record = AirportRecord::from_row(&row, &header()).expect("Failed to decode row");
        assert_eq!(record.iata_code, Some(IataCode::from("JFK")));
        assert_eq!(record.country, CountryCode::from("US"));
        assert_eq!(record.airport_type, AirportType::from("large_airport"));
        assert_eq!(record.latitude, Some(Latitude(40.639447)));
        assert_eq!(record.municipality.as_deref(), Some("New York"));
        assert_eq!(record.fields.len(), 9);
        assert_eq!(record.field(1), "KJFK");
        assert_eq!(record.field(42), "");
        assert!(record.has_iata_code());
    }

    #[test]
    fn it_reads_empty_fields_as_absent() {
        let row = csv::StringRecord::from(vec![
            "6523", "00A", "heliport", "Total RF Heliport", "", "oops", "US", "", "",
        ]);
        let record = AirportRecord::from_row(&row, &header()).expect("Failed to decode row");
        assert_eq!(record.iata_code, None);
        assert_eq!(record.municipality, None);
        assert_eq!(record.latitude, None);
        assert_eq!(record.longitude, None);
        assert!(!record.has_iata_code());
    }
}
