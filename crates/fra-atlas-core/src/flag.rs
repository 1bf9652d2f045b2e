//! Data-quality and proximity flags attached to claims at annotation time.
//!
//! Flags are derived, never persisted: each annotation pass recomputes them
//! from scratch. On the wire they appear as `{code, severity, message}`
//! objects so downstream consumers can key on the stable code string.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::fmt::{Display, Formatter};

/// How urgently a flag needs human attention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

impl Severity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }
}

impl Display for Severity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl Serialize for Severity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One annotation attached to a claim.
///
/// Closed set: anything new the annotator learns to detect becomes a new
/// variant here, not a loose code string.
#[derive(Debug, Clone, PartialEq)]
pub enum Flag {
    /// Latitude or longitude missing or non-finite.
    InvalidCoordinates,
    /// The claim's point lies outside every boundary feature.
    OutsideBoundary,
    /// Another claim's point is within the proximity threshold.
    CloseProximity { distance_km: f64 },
}

impl Flag {
    /// Stable wire code, e.g. `CLOSE_PROXIMITY`.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidCoordinates => "INVALID_COORDINATES",
            Self::OutsideBoundary => "OUTSIDE_BOUNDARY",
            Self::CloseProximity { .. } => "CLOSE_PROXIMITY",
        }
    }

    #[must_use]
    pub const fn severity(&self) -> Severity {
        match self {
            Self::InvalidCoordinates | Self::OutsideBoundary => Severity::Critical,
            Self::CloseProximity { .. } => Severity::Warning,
        }
    }

    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::InvalidCoordinates => "Missing or invalid latitude/longitude values.".to_string(),
            Self::OutsideBoundary => "Location lies outside the district boundary.".to_string(),
            Self::CloseProximity { distance_km } => match format_distance_km(*distance_km) {
                Some(label) => format!("Another claim is within {label}."),
                None => "Another claim is extremely close by.".to_string(),
            },
        }
    }

    #[must_use]
    pub const fn is_critical(&self) -> bool {
        matches!(self.severity(), Severity::Critical)
    }
}

impl Serialize for Flag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut out = serializer.serialize_struct("Flag", 3)?;
        out.serialize_field("code", self.code())?;
        out.serialize_field("severity", &self.severity())?;
        out.serialize_field("message", &self.message())?;
        out.end()
    }
}

/// Render a kilometer distance for humans: "<1 m" under a meter, whole
/// meters under a kilometer, otherwise one decimal of kilometers.
///
/// Returns `None` for non-finite input.
#[must_use]
pub fn format_distance_km(km: f64) -> Option<String> {
    if !km.is_finite() {
        return None;
    }
    let meters = (km * 1000.0).round() as i64;
    if meters < 1 {
        Some("<1 m".to_string())
    } else if meters < 1000 {
        Some(format!("{meters} m"))
    } else {
        Some(format!("{km:.1} km"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_and_severities_are_fixed() {
        assert_eq!(Flag::InvalidCoordinates.code(), "INVALID_COORDINATES");
        assert_eq!(Flag::InvalidCoordinates.severity(), Severity::Critical);
        assert_eq!(Flag::OutsideBoundary.code(), "OUTSIDE_BOUNDARY");
        assert_eq!(Flag::OutsideBoundary.severity(), Severity::Critical);
        let near = Flag::CloseProximity { distance_km: 0.15 };
        assert_eq!(near.code(), "CLOSE_PROXIMITY");
        assert_eq!(near.severity(), Severity::Warning);
        assert!(!near.is_critical());
    }

    #[test]
    fn distance_label_tiers() {
        assert_eq!(format_distance_km(0.0002).as_deref(), Some("<1 m"));
        assert_eq!(format_distance_km(0.15).as_deref(), Some("150 m"));
        assert_eq!(format_distance_km(1.26).as_deref(), Some("1.3 km"));
        assert_eq!(format_distance_km(f64::NAN), None);
    }

    #[test]
    fn distance_label_rounds_up_to_kilometre_tier() {
        // 999.6 m rounds to 1000, which is no longer "NNN m" territory.
        assert_eq!(format_distance_km(0.9996).as_deref(), Some("1.0 km"));
        assert_eq!(format_distance_km(0.9994).as_deref(), Some("999 m"));
    }

    #[test]
    fn proximity_message_embeds_distance() {
        let flag = Flag::CloseProximity { distance_km: 0.15 };
        assert_eq!(flag.message(), "Another claim is within 150 m.");
        let vague = Flag::CloseProximity { distance_km: f64::NAN };
        assert_eq!(vague.message(), "Another claim is extremely close by.");
    }

    #[test]
    fn serializes_as_code_severity_message() {
        let value = serde_json::to_value(Flag::OutsideBoundary).unwrap();
        assert_eq!(value["code"], "OUTSIDE_BOUNDARY");
        assert_eq!(value["severity"], "critical");
        assert_eq!(value["message"], "Location lies outside the district boundary.");
        assert_eq!(value.as_object().unwrap().len(), 3);
    }
}
