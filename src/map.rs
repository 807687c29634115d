use crate::components::airport::AirportRecord;
use crate::components::wrappers::{Latitude, Longitude};

/// An airport to plot on the map.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct MapPoint {
    /// The latitude in decimal degrees
    pub latitude: Latitude,
    /// The longitude in decimal degrees
    pub longitude: Longitude,
    /// The text shown when hovering the point
    pub label: String,
}

impl MapPoint {
    /// Builds the point for a record, if it has usable coordinates.
    #[inline]
    #[must_use]
    pub fn from_record(record: &AirportRecord) -> Option<Self> {
        let (latitude, longitude) = (record.latitude?, record.longitude?);
        if !is_usable(latitude, longitude) {
            return None;
        }
        Some(Self {
            latitude,
            longitude,
            label: label(record),
        })
    }

    /// The point as fractions of an equirectangular world map, `(0, 0)` being the north-west
    /// corner and `(1, 1)` the south-east corner.
    #[inline]
    #[must_use]
    pub fn unit_position(&self) -> (f64, f64) {
        (
            (self.longitude.0 + 180.0) / 360.0,
            (90.0 - self.latitude.0) / 180.0,
        )
    }
}

fn is_usable(latitude: Latitude, longitude: Longitude) -> bool {
    latitude.0.is_finite()
        && longitude.0.is_finite()
        && (-90.0..=90.0).contains(&latitude.0)
        && (-180.0..=180.0).contains(&longitude.0)
}

/// Builds the hover text out of whatever the record has.
fn label(record: &AirportRecord) -> String {
    let mut label = record
        .iata_code
        .as_ref()
        .filter(|code| !code.is_blank())
        .map_or_else(String::new, |code| code.0.trim().to_owned());
    if !record.name.is_empty() {
        if !label.is_empty() {
            label.push_str(" - ");
        }
        label.push_str(&record.name);
    }
    if let Some(municipality) = record.municipality.as_ref().filter(|m| !m.is_empty()) {
        label.push_str(&format!(" ({municipality})"));
    }
    if !record.airport_type.0.is_empty() {
        label.push_str(&format!(" [{}]", record.airport_type));
    }
    label
}

/// The points of every record with usable coordinates, in record order.
#[inline]
pub fn map_points<'a, I>(records: I) -> Vec<MapPoint>
where
    I: IntoIterator<Item = &'a AirportRecord>,
{
    records.into_iter().filter_map(MapPoint::from_record).collect()
}

#[allow(clippy::expect_used)]
#[allow(clippy::indexing_slicing)]
#[allow(clippy::float_cmp)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::load_fixture;

    #[test]
    fn it_skips_records_without_coordinates() {
        let dataset = load_fixture();
        let points = map_points(dataset.iata_complete());
        assert_eq!(points.len(), 13);
        assert!(points.iter().all(|p| !p.label.starts_with("AHX")));
    }

    #[test]
    fn it_labels_points() {
        let dataset = load_fixture();
        let points = map_points(dataset.iata_complete());
        assert_eq!(
            points[0].label,
            "JFK - John F Kennedy International Airport (New York) [large_airport]"
        );
        assert_eq!(points[0].latitude, Latitude(40.639447));
        assert_eq!(points[0].longitude, Longitude(-73.779317));
    }

    #[test]
    fn it_skips_out_of_range_coordinates() {
        let mut record = load_fixture().records()[1].clone();
        record.latitude = Some(Latitude(91.0));
        assert!(MapPoint::from_record(&record).is_none());
        record.latitude = Some(Latitude(f64::NAN));
        assert!(MapPoint::from_record(&record).is_none());
        record.latitude = Some(Latitude(0.0));
        record.longitude = Some(Longitude(-180.0));
        assert!(MapPoint::from_record(&record).is_some());
    }

    #[test]
    fn it_places_points_on_the_unit_square() {
        let mut record = load_fixture().records()[1].clone();
        record.latitude = Some(Latitude(90.0));
        record.longitude = Some(Longitude(-180.0));
        let corner = MapPoint::from_record(&record).expect("Point should be usable");
        assert_eq!(corner.unit_position(), (0.0, 0.0));
        record.latitude = Some(Latitude(0.0));
        record.longitude = Some(Longitude(0.0));
        let center = MapPoint::from_record(&record).expect("Point should be usable");
        assert_eq!(center.unit_position(), (0.5, 0.5));
    }
}
