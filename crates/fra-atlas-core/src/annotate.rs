//! The annotation pass.
//!
//! Given a claim list and a boundary set, produce an enriched copy of every
//! claim carrying data-quality flags and the distance to its nearest
//! neighbor. The pass is pure: same input, same output, no side effects.
//!
//! Per claim, in order:
//! 1. no usable point (coordinate missing or non-finite) flags
//!    `INVALID_COORDINATES` and skips the geometric checks entirely;
//! 2. a point outside every boundary feature flags `OUTSIDE_BOUNDARY`,
//!    unless the boundary set is empty;
//! 3. the minimum great-circle distance to every other claim with a usable
//!    point becomes `nearestNeighborKm`, and `CLOSE_PROXIMITY` fires when it
//!    falls below [`NEARBY_THRESHOLD_KM`].
//!
//! The neighbor scan is O(n²) over the claim set, which is fine at district
//! scale. A pair whose distance comes back indeterminate is skipped, never
//! propagated.

use crate::boundary::BoundarySet;
use crate::claim::{Claim, ClaimStatus};
use crate::flag::Flag;
use crate::geometry::{claim_point, distance_km};
use serde::Serialize;

/// Claims closer than this are flagged as suspiciously close, in kilometers.
pub const NEARBY_THRESHOLD_KM: f64 = 0.3;

/// A claim plus everything the annotation pass derived for it.
///
/// Serializes as the claim's own fields with `flags` and `nearestNeighborKm`
/// appended, the shape the portal's map consumed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotatedClaim {
    #[serde(flatten)]
    pub claim: Claim,
    pub flags: Vec<Flag>,
    pub nearest_neighbor_km: Option<f64>,
}

impl AnnotatedClaim {
    #[must_use]
    pub fn outside_boundary(&self) -> bool {
        self.flags.iter().any(|flag| matches!(flag, Flag::OutsideBoundary))
    }

    /// An approved claim that still carries flags deserves a second look.
    #[must_use]
    pub fn needs_attention(&self) -> bool {
        self.claim.current_status() == ClaimStatus::Approved && !self.flags.is_empty()
    }
}

/// Annotate every claim against the boundary set and the rest of the list.
#[must_use]
pub fn annotate(claims: &[Claim], boundary: &BoundarySet) -> Vec<AnnotatedClaim> {
    let points: Vec<_> = claims
        .iter()
        .map(|claim| claim_point(claim.latitude, claim.longitude))
        .collect();

    claims
        .iter()
        .enumerate()
        .map(|(index, claim)| {
            let Some(point) = points[index] else {
                return AnnotatedClaim {
                    claim: claim.clone(),
                    flags: vec![Flag::InvalidCoordinates],
                    nearest_neighbor_km: None,
                };
            };

            let mut flags = Vec::new();
            if !boundary.is_empty() && !boundary.contains(point) {
                flags.push(Flag::OutsideBoundary);
            }

            let min_km = points
                .iter()
                .enumerate()
                .filter(|(other, _)| *other != index)
                .filter_map(|(_, other)| *other)
                .filter_map(|other| distance_km(point, other))
                .fold(f64::INFINITY, f64::min);
            let nearest_neighbor_km = min_km.is_finite().then_some(min_km);

            if let Some(km) = nearest_neighbor_km
                && km < NEARBY_THRESHOLD_KM
            {
                flags.push(Flag::CloseProximity { distance_km: km });
            }

            AnnotatedClaim { claim: claim.clone(), flags, nearest_neighbor_km }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claim::ClaimType;
    use chrono::NaiveDate;

    // Square over the test coordinates: lon 80..81, lat 22..23.
    const SQUARE: &str = r#"{
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "properties": {"label": "Mandla district"},
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[80.0, 22.0], [81.0, 22.0], [81.0, 23.0], [80.0, 23.0], [80.0, 22.0]]]
            }
        }]
    }"#;

    fn boundary() -> BoundarySet {
        BoundarySet::from_geojson(SQUARE).unwrap()
    }

    fn claim(id: &str, latitude: Option<f64>, longitude: Option<f64>) -> Claim {
        Claim {
            id: id.into(),
            village: "Bichhiya".into(),
            district: "mandla".into(),
            state: "madhyaPradesh".into(),
            claim_type: ClaimType::Individual,
            status: ClaimStatus::Review,
            area_hectares: 2.0,
            households: Some(4),
            submission_date: NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
            latitude,
            longitude,
            claimant_name: None,
            remarks: None,
            history: Vec::new(),
        }
    }

    fn codes(annotated: &AnnotatedClaim) -> Vec<&'static str> {
        annotated.flags.iter().map(Flag::code).collect()
    }

    #[test]
    fn missing_coordinates_flag_invalid_and_nothing_else() {
        let claims = vec![claim("a", None, Some(80.5)), claim("b", Some(22.5), Some(80.5))];
        let annotated = annotate(&claims, &boundary());
        assert_eq!(codes(&annotated[0]), ["INVALID_COORDINATES"]);
        assert_eq!(annotated[0].nearest_neighbor_km, None);
    }

    #[test]
    fn nan_latitude_flags_invalid_and_nothing_else() {
        let claims = vec![
            claim("a", Some(f64::NAN), Some(80.5)),
            claim("b", Some(22.5), Some(80.5)),
        ];
        let annotated = annotate(&claims, &boundary());
        assert_eq!(codes(&annotated[0]), ["INVALID_COORDINATES"]);
        assert_eq!(annotated[0].nearest_neighbor_km, None);
        // The valid claim sees no neighbor because the invalid one has no point.
        assert_eq!(annotated[1].nearest_neighbor_km, None);
        assert!(annotated[1].flags.is_empty());
    }

    #[test]
    fn point_outside_every_feature_is_flagged() {
        let claims = vec![claim("a", Some(25.0), Some(85.0))];
        let annotated = annotate(&claims, &boundary());
        assert_eq!(codes(&annotated[0]), ["OUTSIDE_BOUNDARY"]);
        assert!(annotated[0].outside_boundary());
    }

    #[test]
    fn point_inside_a_feature_is_not_flagged() {
        let claims = vec![claim("a", Some(22.5), Some(80.5))];
        let annotated = annotate(&claims, &boundary());
        assert!(annotated[0].flags.is_empty());
    }

    #[test]
    fn empty_boundary_skips_containment() {
        let claims = vec![claim("a", Some(22.0), Some(80.0))];
        let annotated = annotate(&claims, &BoundarySet::empty());
        assert!(annotated[0].flags.is_empty());
        assert_eq!(annotated[0].nearest_neighbor_km, None);
    }

    #[test]
    fn close_pair_is_flagged_symmetrically() {
        // 0.00135 degrees of latitude apart, roughly 150 m.
        let claims = vec![
            claim("a", Some(22.5), Some(80.5)),
            claim("b", Some(22.50135), Some(80.5)),
        ];
        let annotated = annotate(&claims, &boundary());
        assert_eq!(codes(&annotated[0]), ["CLOSE_PROXIMITY"]);
        assert_eq!(codes(&annotated[1]), ["CLOSE_PROXIMITY"]);
        assert_eq!(annotated[0].nearest_neighbor_km, annotated[1].nearest_neighbor_km);
        assert!(annotated[0].flags[0].message().contains("150 m"));
    }

    #[test]
    fn distant_pair_reports_distance_without_flag() {
        let claims = vec![
            claim("a", Some(22.2), Some(80.2)),
            claim("b", Some(22.8), Some(80.8)),
        ];
        let annotated = annotate(&claims, &boundary());
        assert!(annotated[0].flags.is_empty());
        let km = annotated[0].nearest_neighbor_km.unwrap();
        assert!(km > NEARBY_THRESHOLD_KM, "got {km} km");
    }

    #[test]
    fn outside_claims_still_count_as_neighbors() {
        // One inside the square, one just across the lon=81 edge, ~90 m apart.
        let claims = vec![
            claim("in", Some(22.5), Some(80.9995)),
            claim("out", Some(22.5), Some(81.0004)),
        ];
        let annotated = annotate(&claims, &boundary());
        assert_eq!(codes(&annotated[0]), ["CLOSE_PROXIMITY"]);
        assert_eq!(codes(&annotated[1]), ["OUTSIDE_BOUNDARY", "CLOSE_PROXIMITY"]);
    }

    #[test]
    fn annotation_is_idempotent() {
        let claims = vec![
            claim("a", Some(22.5), Some(80.5)),
            claim("b", Some(22.50135), Some(80.5)),
            claim("c", None, None),
            claim("d", Some(25.0), Some(85.0)),
        ];
        let bounds = boundary();
        let first = annotate(&claims, &bounds);
        let reclaimed: Vec<Claim> = first.iter().map(|a| a.claim.clone()).collect();
        let second = annotate(&reclaimed, &bounds);
        assert_eq!(first, second);
    }

    #[test]
    fn single_claim_with_no_boundary_yields_bare_annotation() {
        let claims = vec![claim("a", Some(22.0), Some(80.0))];
        let annotated = annotate(&claims, &BoundarySet::empty());
        assert_eq!(annotated.len(), 1);
        assert!(annotated[0].flags.is_empty());
        assert_eq!(annotated[0].nearest_neighbor_km, None);
    }

    #[test]
    fn serializes_in_portal_shape() {
        let claims = vec![claim("a", Some(25.0), Some(85.0))];
        let annotated = annotate(&claims, &boundary());
        let value = serde_json::to_value(&annotated[0]).unwrap();
        assert_eq!(value["id"], "a");
        assert_eq!(value["areaHectares"], 2.0);
        assert_eq!(value["flags"][0]["code"], "OUTSIDE_BOUNDARY");
        assert_eq!(value["flags"][0]["severity"], "critical");
        assert!(value["nearestNeighborKm"].is_null());
    }

    #[test]
    fn needs_attention_marks_flagged_approved_claims() {
        let mut approved = claim("a", Some(25.0), Some(85.0));
        approved.status = ClaimStatus::Approved;
        let clean = claim("b", Some(22.5), Some(80.5));
        let annotated = annotate(&[approved, clean], &boundary());
        assert!(annotated[0].needs_attention());
        assert!(!annotated[1].needs_attention());
    }
}
