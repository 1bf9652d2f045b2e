//! Adapter over the georust primitives the annotator relies on.
//!
//! Containment and great-circle distance are not reimplemented here; this
//! module validates inputs, fixes the axis order (GeoJSON is lon/lat, claims
//! carry lat/lon fields), and converts meters to kilometers.

use geo::{Contains, Distance, Haversine, MultiPolygon, Point, Polygon};

/// Build a point from a claim's optional coordinates.
///
/// `None` when either coordinate is missing or non-finite. The x axis is
/// longitude, matching GeoJSON.
#[must_use]
pub fn claim_point(latitude: Option<f64>, longitude: Option<f64>) -> Option<Point<f64>> {
    let (lat, lon) = (latitude?, longitude?);
    (lat.is_finite() && lon.is_finite()).then(|| Point::new(lon, lat))
}

/// Great-circle distance between two points in kilometers, or `None` when the
/// computation does not produce a finite number.
#[must_use]
pub fn distance_km(a: Point<f64>, b: Point<f64>) -> Option<f64> {
    let km = Haversine::distance(a, b) / 1000.0;
    km.is_finite().then_some(km)
}

/// Reference geometry of one boundary feature.
///
/// Only the two area-geometry kinds are admitted; everything else is dropped
/// when the boundary set is loaded, so containment here never fails.
#[derive(Debug, Clone, PartialEq)]
pub enum RegionGeometry {
    Polygon(Polygon<f64>),
    MultiPolygon(MultiPolygon<f64>),
}

impl RegionGeometry {
    #[must_use]
    pub fn contains(&self, point: Point<f64>) -> bool {
        match self {
            Self::Polygon(polygon) => polygon.contains(&point),
            Self::MultiPolygon(multi) => multi.contains(&point),
        }
    }
}
