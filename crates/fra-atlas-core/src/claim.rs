//! Claim records and their closed field vocabularies.
//!
//! Field names follow the camelCase wire shape of the atlas data files, so a
//! claims file exported by the portal deserializes without adapters.

use chrono::NaiveDate;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Display, Formatter};
use thiserror::Error;

/// Parse failure for one of the closed claim vocabularies.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown claim status {0:?} (expected submitted, review, approved, rejected, or appeal)")]
    Status(String),
    #[error("unknown claim type {0:?} (expected individual, community, or habitat)")]
    ClaimType(String),
    #[error("unknown area bucket {0:?} (expected small, medium, or large)")]
    AreaBucket(String),
    #[error("unknown date range {0:?} (expected all, last30, last90, or lastYear)")]
    DateRange(String),
    #[error("unknown boundary policy {0:?} (expected include, exclude, or exclude-with-geographic)")]
    BoundaryPolicy(String),
    #[error("unknown sort field {0:?}")]
    SortField(String),
    #[error("unknown sort order {0:?} (expected asc or desc)")]
    SortOrder(String),
}

/// Claim review status.
///
/// Ordered by lifecycle position so sorted listings group claims by how far
/// along the process they are. The portal historically used both "pending"
/// and "review" for the same stage; "pending" parses as [`Review`](Self::Review).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ClaimStatus {
    Submitted,
    Review,
    Approved,
    Rejected,
    Appeal,
}

impl ClaimStatus {
    pub const ALL: [Self; 5] = [
        Self::Submitted,
        Self::Review,
        Self::Approved,
        Self::Rejected,
        Self::Appeal,
    ];

    /// Parse a status token case-insensitively. Accepts the "pending" alias.
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "submitted" => Ok(Self::Submitted),
            "review" | "pending" => Ok(Self::Review),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "appeal" => Ok(Self::Appeal),
            _ => Err(ParseError::Status(raw.to_string())),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Submitted => "submitted",
            Self::Review => "review",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Appeal => "appeal",
        }
    }
}

impl Display for ClaimStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl std::str::FromStr for ClaimStatus {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for ClaimStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ClaimStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(D::Error::custom)
    }
}

/// Kind of forest right being claimed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ClaimType {
    Individual,
    Community,
    Habitat,
}

impl ClaimType {
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "individual" => Ok(Self::Individual),
            "community" => Ok(Self::Community),
            "habitat" => Ok(Self::Habitat),
            _ => Err(ParseError::ClaimType(raw.to_string())),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Individual => "individual",
            Self::Community => "community",
            Self::Habitat => "habitat",
        }
    }
}

impl Display for ClaimType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl std::str::FromStr for ClaimType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for ClaimType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ClaimType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(D::Error::custom)
    }
}

/// Coarse size classification derived from claim area.
///
/// Fixed three-way split: small ≤ 2 ha, medium ≤ 5 ha, large > 5 ha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AreaBucket {
    Small,
    Medium,
    Large,
}

impl AreaBucket {
    #[must_use]
    pub fn of(area_hectares: f64) -> Self {
        if area_hectares <= 2.0 {
            Self::Small
        } else if area_hectares <= 5.0 {
            Self::Medium
        } else {
            Self::Large
        }
    }

    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "small" => Ok(Self::Small),
            "medium" => Ok(Self::Medium),
            "large" => Ok(Self::Large),
            _ => Err(ParseError::AreaBucket(raw.to_string())),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }
}

impl Display for AreaBucket {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// One entry of a claim's append-only status history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusEvent {
    pub status: ClaimStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Name or identifier of whoever recorded the event.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changed_by: Option<String>,
    pub date: NaiveDate,
}

/// A forest-rights land claim record.
///
/// Latitude/longitude are optional and unvalidated here; the annotation pass
/// decides whether they form a usable point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claim {
    pub id: String,
    pub village: String,
    pub district: String,
    pub state: String,
    pub claim_type: ClaimType,
    pub status: ClaimStatus,
    pub area_hectares: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub households: Option<u32>,
    pub submission_date: NaiveDate,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claimant_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub history: Vec<StatusEvent>,
}

impl Claim {
    /// Current status: the newest history event wins, falling back to the
    /// declared status for claims without a recorded trail.
    ///
    /// History is a plain last-event-wins fold; the portal never validated
    /// transitions, so neither does this.
    #[must_use]
    pub fn current_status(&self) -> ClaimStatus {
        self.history.last().map_or(self.status, |event| event.status)
    }

    #[must_use]
    pub fn area_bucket(&self) -> AreaBucket {
        AreaBucket::of(self.area_hectares)
    }
}

/// Next claim id for a submission year, in the portal's `FRA{year}{seq:04}`
/// scheme. Scans existing ids for the year prefix and increments the highest
/// sequence; ids from other years are ignored.
#[must_use]
pub fn next_claim_id<'a>(existing: impl IntoIterator<Item = &'a str>, year: i32) -> String {
    let prefix = format!("FRA{year}");
    let max_seq = existing
        .into_iter()
        .filter_map(|id| id.strip_prefix(&prefix))
        .filter_map(|rest| rest.parse::<u32>().ok())
        .max()
        .unwrap_or(0);
    format!("{prefix}{:04}", max_seq + 1)
}
