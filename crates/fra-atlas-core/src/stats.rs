//! Derived statistics for dashboards and the summary view.
//!
//! Everything here is recomputed from the claim list on demand. Monthly
//! series come from real submission dates, not a canned demo series.

use crate::annotate::AnnotatedClaim;
use crate::claim::ClaimStatus;
use crate::filter::{Totals, aggregate};
use serde::Serialize;
use std::collections::BTreeMap;

/// Count of claims per current status. Every status appears, zero or not,
/// so tables and serialized output keep a stable shape.
#[must_use]
pub fn status_breakdown(claims: &[AnnotatedClaim]) -> BTreeMap<ClaimStatus, usize> {
    let mut counts: BTreeMap<ClaimStatus, usize> =
        ClaimStatus::ALL.iter().map(|status| (*status, 0)).collect();
    for annotated in claims {
        if let Some(count) = counts.get_mut(&annotated.claim.current_status()) {
            *count += 1;
        }
    }
    counts
}

/// Count of claims per state. A blank state field lands under "Unknown".
#[must_use]
pub fn claims_by_state(claims: &[AnnotatedClaim]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for annotated in claims {
        let state = annotated.claim.state.trim();
        let key = if state.is_empty() { "Unknown" } else { state };
        *counts.entry(key.to_string()).or_insert(0) += 1;
    }
    counts
}

/// Claims filed in one calendar month, broken down by the statuses the
/// portal charted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyCount {
    /// `YYYY-MM`, which also sorts chronologically.
    pub month: String,
    pub filed: usize,
    pub approved: usize,
    pub review: usize,
    pub rejected: usize,
}

/// Per-month submission counts in chronological order.
#[must_use]
pub fn monthly_submissions(claims: &[AnnotatedClaim]) -> Vec<MonthlyCount> {
    let mut months: BTreeMap<String, MonthlyCount> = BTreeMap::new();
    for annotated in claims {
        let key = annotated.claim.submission_date.format("%Y-%m").to_string();
        let entry = months.entry(key.clone()).or_insert_with(|| MonthlyCount {
            month: key,
            filed: 0,
            approved: 0,
            review: 0,
            rejected: 0,
        });
        entry.filed += 1;
        match annotated.claim.current_status() {
            ClaimStatus::Approved => entry.approved += 1,
            ClaimStatus::Review => entry.review += 1,
            ClaimStatus::Rejected => entry.rejected += 1,
            ClaimStatus::Submitted | ClaimStatus::Appeal => {}
        }
    }
    months.into_values().collect()
}

/// Everything the summary view needs, in one serializable bundle.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub totals: Totals,
    pub approval_rate: f64,
    pub status_breakdown: BTreeMap<ClaimStatus, usize>,
    pub claims_by_state: BTreeMap<String, usize>,
    pub monthly: Vec<MonthlyCount>,
    /// Claims carrying at least one flag.
    pub flagged: usize,
    /// Approved claims that still carry flags.
    pub needs_attention: usize,
}

impl Summary {
    #[must_use]
    pub fn collect(claims: &[AnnotatedClaim]) -> Self {
        let totals = aggregate(claims);
        Self {
            totals,
            approval_rate: totals.approval_rate(),
            status_breakdown: status_breakdown(claims),
            claims_by_state: claims_by_state(claims),
            monthly: monthly_submissions(claims),
            flagged: claims.iter().filter(|c| !c.flags.is_empty()).count(),
            needs_attention: claims.iter().filter(|c| c.needs_attention()).count(),
        }
    }
}
