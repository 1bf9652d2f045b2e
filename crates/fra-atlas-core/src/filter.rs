//! Filtering and aggregation over annotated claims.
//!
//! Every filter defaults to "no restriction"; the date cutoff is computed
//! from an injected clock so the whole layer stays a pure function. What
//! happens to claims flagged `OUTSIDE_BOUNDARY` is a named policy rather
//! than a side effect of which other filters are set.

use crate::annotate::AnnotatedClaim;
use crate::claim::{AreaBucket, ClaimStatus, ClaimType, ParseError};
use chrono::{DateTime, Duration, Months, NaiveDate, Utc};
use serde::Serialize;
use std::fmt::{Display, Formatter};

/// Submission-date window, anchored to an injected "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateRange {
    #[default]
    All,
    Last30,
    Last90,
    LastYear,
}

impl DateRange {
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "last30" => Ok(Self::Last30),
            "last90" => Ok(Self::Last90),
            "lastyear" => Ok(Self::LastYear),
            _ => Err(ParseError::DateRange(raw.to_string())),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Last30 => "last30",
            Self::Last90 => "last90",
            Self::LastYear => "lastYear",
        }
    }

    /// Earliest submission date still inside the window, at date granularity.
    /// `None` means unbounded.
    #[must_use]
    pub fn cutoff(self, now: DateTime<Utc>) -> Option<NaiveDate> {
        match self {
            Self::All => None,
            Self::Last30 => now.checked_sub_signed(Duration::days(30)).map(|dt| dt.date_naive()),
            Self::Last90 => now.checked_sub_signed(Duration::days(90)).map(|dt| dt.date_naive()),
            Self::LastYear => now.checked_sub_months(Months::new(12)).map(|dt| dt.date_naive()),
        }
    }
}

impl Display for DateRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl std::str::FromStr for DateRange {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// What to do with claims flagged `OUTSIDE_BOUNDARY`.
///
/// The portal dropped them whenever a state or district filter was active
/// and kept them otherwise; [`ExcludeWithGeographic`](Self::ExcludeWithGeographic)
/// reproduces that and is the default. The other two variants make the
/// choice explicit instead of coupled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutsideBoundaryPolicy {
    /// Keep out-of-boundary claims unconditionally.
    Include,
    /// Drop out-of-boundary claims unconditionally.
    Exclude,
    /// Drop them only while a state or district filter is active.
    #[default]
    ExcludeWithGeographic,
}

impl OutsideBoundaryPolicy {
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "include" => Ok(Self::Include),
            "exclude" => Ok(Self::Exclude),
            "exclude-with-geographic" => Ok(Self::ExcludeWithGeographic),
            _ => Err(ParseError::BoundaryPolicy(raw.to_string())),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Include => "include",
            Self::Exclude => "exclude",
            Self::ExcludeWithGeographic => "exclude-with-geographic",
        }
    }
}

impl Display for OutsideBoundaryPolicy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl std::str::FromStr for OutsideBoundaryPolicy {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Field-equality filters plus the date window and boundary policy.
///
/// `None` on an optional field means "all". Status comparisons go through
/// [`Claim::current_status`](crate::claim::Claim::current_status) so a stale
/// declared status never hides a claim whose history moved on.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClaimFilter {
    pub state: Option<String>,
    pub district: Option<String>,
    pub claim_type: Option<ClaimType>,
    pub status: Option<ClaimStatus>,
    pub area: Option<AreaBucket>,
    pub date_range: DateRange,
    pub outside_boundary: OutsideBoundaryPolicy,
}

impl ClaimFilter {
    /// True while a state or district restriction is active.
    #[must_use]
    pub fn geographic(&self) -> bool {
        self.state.is_some() || self.district.is_some()
    }

    /// Apply the filter, keeping input order.
    #[must_use]
    pub fn apply(&self, claims: &[AnnotatedClaim], now: DateTime<Utc>) -> Vec<AnnotatedClaim> {
        let cutoff = self.date_range.cutoff(now);
        claims
            .iter()
            .filter(|claim| self.matches(claim, cutoff))
            .cloned()
            .collect()
    }

    fn matches(&self, annotated: &AnnotatedClaim, cutoff: Option<NaiveDate>) -> bool {
        let claim = &annotated.claim;
        if let Some(state) = &self.state
            && !claim.state.eq_ignore_ascii_case(state)
        {
            return false;
        }
        if let Some(district) = &self.district
            && !claim.district.eq_ignore_ascii_case(district)
        {
            return false;
        }
        if let Some(claim_type) = self.claim_type
            && claim.claim_type != claim_type
        {
            return false;
        }
        if let Some(status) = self.status
            && claim.current_status() != status
        {
            return false;
        }
        if let Some(area) = self.area
            && claim.area_bucket() != area
        {
            return false;
        }
        let drop_outside = match self.outside_boundary {
            OutsideBoundaryPolicy::Include => false,
            OutsideBoundaryPolicy::Exclude => true,
            OutsideBoundaryPolicy::ExcludeWithGeographic => self.geographic(),
        };
        if drop_outside && annotated.outside_boundary() {
            return false;
        }
        if let Some(cutoff) = cutoff
            && claim.submission_date < cutoff
        {
            return false;
        }
        true
    }
}

/// Running sums over a (filtered) claim list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub total_claims: usize,
    pub approved: usize,
    pub total_area: f64,
    pub households: u64,
}

impl Totals {
    /// Approved share as a percentage; 0.0 for an empty list.
    #[must_use]
    pub fn approval_rate(&self) -> f64 {
        if self.total_claims == 0 {
            return 0.0;
        }
        self.approved as f64 / self.total_claims as f64 * 100.0
    }
}

/// Single-pass aggregation. Claims without a household count contribute zero.
#[must_use]
pub fn aggregate(claims: &[AnnotatedClaim]) -> Totals {
    claims.iter().fold(Totals::default(), |mut acc, annotated| {
        acc.total_claims += 1;
        acc.total_area += annotated.claim.area_hectares;
        acc.households += annotated.claim.households.map_or(0, u64::from);
        if annotated.claim.current_status() == ClaimStatus::Approved {
            acc.approved += 1;
        }
        acc
    })
}
