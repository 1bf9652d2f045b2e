//! District boundary reference data.
//!
//! A boundary file is a GeoJSON feature collection. Only Polygon and
//! MultiPolygon features survive loading; anything else (point features,
//! missing or malformed geometry) is dropped with a warning so one bad
//! feature never poisons the containment checks downstream.

use crate::geometry::RegionGeometry;
use geo::{MultiPolygon, Point, Polygon};
use geojson::{GeoJson, Value};
use thiserror::Error;
use tracing::warn;

/// Label used when a feature carries no recognizable name property.
const DEFAULT_LABEL: &str = "District boundary";

#[derive(Debug, Error)]
pub enum BoundaryError {
    #[error("invalid GeoJSON: {0}")]
    Geojson(#[from] geojson::Error),
    #[error("boundary data is not a GeoJSON FeatureCollection")]
    NotFeatureCollection,
}

/// One loaded boundary feature: a label plus admitted area geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryFeature {
    pub label: String,
    pub geometry: RegionGeometry,
}

/// The full set of boundary features a run tests containment against.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundarySet {
    features: Vec<BoundaryFeature>,
}

impl BoundarySet {
    #[must_use]
    pub const fn empty() -> Self {
        Self { features: Vec::new() }
    }

    /// Parse a GeoJSON feature collection, keeping only well-formed
    /// Polygon/MultiPolygon features.
    pub fn from_geojson(raw: &str) -> Result<Self, BoundaryError> {
        let GeoJson::FeatureCollection(collection) = raw.parse::<GeoJson>()? else {
            return Err(BoundaryError::NotFeatureCollection);
        };

        let total = collection.features.len();
        let mut features = Vec::with_capacity(total);
        for feature in collection.features {
            let label = label_of(&feature).unwrap_or_else(|| DEFAULT_LABEL.to_string());
            let Some(geometry) = feature.geometry else {
                warn!(%label, "dropping boundary feature without geometry");
                continue;
            };
            let converted = match geometry.value {
                value @ Value::Polygon(_) => {
                    Polygon::<f64>::try_from(value).map(RegionGeometry::Polygon)
                }
                value @ Value::MultiPolygon(_) => {
                    MultiPolygon::<f64>::try_from(value).map(RegionGeometry::MultiPolygon)
                }
                _ => {
                    warn!(%label, "dropping boundary feature with non-area geometry");
                    continue;
                }
            };
            match converted {
                Ok(geometry) => features.push(BoundaryFeature { label, geometry }),
                Err(error) => warn!(%label, %error, "dropping malformed boundary feature"),
            }
        }
        if features.len() < total {
            warn!(kept = features.len(), total, "some boundary features were dropped");
        }
        Ok(Self { features })
    }

    #[must_use]
    pub fn features(&self) -> &[BoundaryFeature] {
        &self.features
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// True when any feature contains the point.
    #[must_use]
    pub fn contains(&self, point: Point<f64>) -> bool {
        self.features.iter().any(|feature| feature.geometry.contains(point))
    }
}

/// Feature label: a `label` property, the GADM `NAME_2` district key, or
/// nothing.
fn label_of(feature: &geojson::Feature) -> Option<String> {
    let properties = feature.properties.as_ref()?;
    ["label", "NAME_2"].iter().find_map(|key| {
        properties
            .get(*key)
            .and_then(|value| value.as_str())
            .filter(|name| !name.is_empty())
            .map(str::to_string)
    })
}
