//! Registry queries: search, sort, and paginate annotated claims.
//!
//! In-memory counterpart of the portal's claims listing endpoint. Matching
//! is case-insensitive substring search; sorting is stable, so ties keep
//! their input order; pagination clamps rather than erroring.

use crate::annotate::AnnotatedClaim;
use crate::claim::{ClaimStatus, ParseError};
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

pub const DEFAULT_PER_PAGE: usize = 10;
pub const MAX_PER_PAGE: usize = 100;

/// Column a claim listing can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    Id,
    Claimant,
    Village,
    Area,
    Status,
    SubmissionDate,
}

impl SortField {
    /// Accepts both this crate's tokens and the portal's query-string keys
    /// (`claimantName`, `location`, `dateSubmitted`).
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "id" => Ok(Self::Id),
            "claimant" | "claimantname" => Ok(Self::Claimant),
            "village" | "location" => Ok(Self::Village),
            "area" => Ok(Self::Area),
            "status" => Ok(Self::Status),
            "date" | "submissiondate" | "datesubmitted" => Ok(Self::SubmissionDate),
            _ => Err(ParseError::SortField(raw.to_string())),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Claimant => "claimant",
            Self::Village => "village",
            Self::Area => "area",
            Self::Status => "status",
            Self::SubmissionDate => "date",
        }
    }
}

impl Display for SortField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl std::str::FromStr for SortField {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(ParseError::SortOrder(raw.to_string())),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl Display for SortOrder {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl std::str::FromStr for SortOrder {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// One registry request: narrowing, ordering, and a page window.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistryQuery {
    /// Substring over claim id and claimant name.
    pub search: Option<String>,
    pub status: Option<ClaimStatus>,
    /// Substring over village, district, and state.
    pub region: Option<String>,
    pub sort: SortField,
    pub order: SortOrder,
    /// 1-based; zero is treated as the first page.
    pub page: usize,
    /// Clamped to `1..=MAX_PER_PAGE`.
    pub per_page: usize,
}

impl Default for RegistryQuery {
    fn default() -> Self {
        Self {
            search: None,
            status: None,
            region: None,
            sort: SortField::default(),
            order: SortOrder::default(),
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

/// One page of query results plus the paging bookkeeping.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimPage {
    pub items: Vec<AnnotatedClaim>,
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
    pub total_pages: usize,
}

impl RegistryQuery {
    #[must_use]
    pub fn run(&self, claims: &[AnnotatedClaim]) -> ClaimPage {
        let page = self.page.max(1);
        let per_page = self.per_page.clamp(1, MAX_PER_PAGE);

        let mut matches: Vec<AnnotatedClaim> =
            claims.iter().filter(|claim| self.matches(claim)).cloned().collect();
        matches.sort_by(|a, b| {
            let ordering = compare(a, b, self.sort);
            match self.order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });

        let total = matches.len();
        let total_pages = total.div_ceil(per_page);
        let items: Vec<_> = matches
            .into_iter()
            .skip((page - 1).saturating_mul(per_page))
            .take(per_page)
            .collect();
        ClaimPage { items, page, per_page, total, total_pages }
    }

    fn matches(&self, annotated: &AnnotatedClaim) -> bool {
        let claim = &annotated.claim;
        if let Some(needle) = &self.search {
            let needle = needle.to_lowercase();
            let in_id = claim.id.to_lowercase().contains(&needle);
            let in_claimant = claim
                .claimant_name
                .as_deref()
                .is_some_and(|name| name.to_lowercase().contains(&needle));
            if !in_id && !in_claimant {
                return false;
            }
        }
        if let Some(status) = self.status
            && claim.current_status() != status
        {
            return false;
        }
        if let Some(region) = &self.region {
            let region = region.to_lowercase();
            let hit = [&claim.village, &claim.district, &claim.state]
                .iter()
                .any(|field| field.to_lowercase().contains(&region));
            if !hit {
                return false;
            }
        }
        true
    }
}

/// Look a claim up by id, ignoring case.
#[must_use]
pub fn find_by_id<'a>(claims: &'a [AnnotatedClaim], id: &str) -> Option<&'a AnnotatedClaim> {
    claims.iter().find(|annotated| annotated.claim.id.eq_ignore_ascii_case(id))
}

fn compare(a: &AnnotatedClaim, b: &AnnotatedClaim, field: SortField) -> Ordering {
    let (x, y) = (&a.claim, &b.claim);
    match field {
        SortField::Id => x.id.cmp(&y.id),
        SortField::Claimant => x.claimant_name.cmp(&y.claimant_name),
        SortField::Village => x.village.cmp(&y.village),
        SortField::Area => {
            x.area_hectares.partial_cmp(&y.area_hectares).unwrap_or(Ordering::Equal)
        }
        SortField::Status => x.current_status().cmp(&y.current_status()),
        SortField::SubmissionDate => x.submission_date.cmp(&y.submission_date),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claim::{Claim, ClaimType};
    use chrono::NaiveDate;

    fn entry(id: &str, claimant: &str, village: &str, area: f64, status: ClaimStatus, day: u32) -> AnnotatedClaim {
        AnnotatedClaim {
            claim: Claim {
                id: id.into(),
                village: village.into(),
                district: "mandla".into(),
                state: "madhyaPradesh".into(),
                claim_type: ClaimType::Individual,
                status,
                area_hectares: area,
                households: Some(2),
                submission_date: NaiveDate::from_ymd_opt(2024, 9, day).unwrap(),
                latitude: Some(22.5),
                longitude: Some(80.5),
                claimant_name: Some(claimant.into()),
                remarks: None,
                history: Vec::new(),
            },
            flags: Vec::new(),
            nearest_neighbor_km: None,
        }
    }

    fn registry() -> Vec<AnnotatedClaim> {
        vec![
            entry("FRA20240001", "Ramesh Baiga", "Bichhiya", 2.5, ClaimStatus::Approved, 1),
            entry("FRA20240002", "Sunita Maravi", "Nainpur", 0.8, ClaimStatus::Review, 3),
            entry("FRA20240003", "Mohan Gond", "Ghughri", 6.2, ClaimStatus::Rejected, 2),
            entry("FRA20240004", "Kamla Marko", "Bichhiya", 4.0, ClaimStatus::Approved, 5),
            entry("FRA20240005", "Suresh Baiga", "Mawai", 1.1, ClaimStatus::Submitted, 4),
        ]
    }

    #[test]
    fn search_spans_id_and_claimant_name() {
        let query = RegistryQuery { search: Some("baiga".into()), ..Default::default() };
        let page = query.run(&registry());
        assert_eq!(page.total, 2);

        let query = RegistryQuery { search: Some("0003".into()), ..Default::default() };
        let page = query.run(&registry());
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].claim.id, "FRA20240003");
    }

    #[test]
    fn region_spans_village_district_and_state() {
        let query = RegistryQuery { region: Some("nainpur".into()), ..Default::default() };
        assert_eq!(query.run(&registry()).total, 1);

        let query = RegistryQuery { region: Some("MANDLA".into()), ..Default::default() };
        assert_eq!(query.run(&registry()).total, 5);
    }

    #[test]
    fn status_narrows_results() {
        let query = RegistryQuery { status: Some(ClaimStatus::Approved), ..Default::default() };
        let page = query.run(&registry());
        assert_eq!(page.total, 2);
        assert!(page.items.iter().all(|c| c.claim.status == ClaimStatus::Approved));
    }

    #[test]
    fn sorts_by_area_descending() {
        let query = RegistryQuery {
            sort: SortField::Area,
            order: SortOrder::Desc,
            ..Default::default()
        };
        let page = query.run(&registry());
        let areas: Vec<f64> = page.items.iter().map(|c| c.claim.area_hectares).collect();
        assert_eq!(areas, [6.2, 4.0, 2.5, 1.1, 0.8]);
    }

    #[test]
    fn sorts_by_status_lifecycle() {
        let query = RegistryQuery { sort: SortField::Status, ..Default::default() };
        let page = query.run(&registry());
        assert_eq!(page.items[0].claim.status, ClaimStatus::Submitted);
        assert_eq!(page.items[1].claim.status, ClaimStatus::Review);
        assert_eq!(page.items.last().unwrap().claim.status, ClaimStatus::Rejected);
    }

    #[test]
    fn paginates_with_ceil_page_count() {
        let query = RegistryQuery { per_page: 2, ..Default::default() };
        let first = query.run(&registry());
        assert_eq!(first.total, 5);
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.items.len(), 2);

        let last = RegistryQuery { per_page: 2, page: 3, ..Default::default() }.run(&registry());
        assert_eq!(last.items.len(), 1);
        assert_eq!(last.items[0].claim.id, "FRA20240005");

        let beyond = RegistryQuery { per_page: 2, page: 9, ..Default::default() }.run(&registry());
        assert!(beyond.items.is_empty());
        assert_eq!(beyond.total, 5);
    }

    #[test]
    fn page_and_per_page_are_clamped() {
        let query = RegistryQuery { page: 0, per_page: 500, ..Default::default() };
        let page = query.run(&registry());
        assert_eq!(page.page, 1);
        assert_eq!(page.per_page, MAX_PER_PAGE);
        assert_eq!(page.items.len(), 5);
    }

    #[test]
    fn sort_tokens_accept_portal_keys() {
        assert_eq!(SortField::parse("claimantName").unwrap(), SortField::Claimant);
        assert_eq!(SortField::parse("location").unwrap(), SortField::Village);
        assert_eq!(SortField::parse("dateSubmitted").unwrap(), SortField::SubmissionDate);
        assert!(SortField::parse("karma").is_err());
    }

    #[test]
    fn lookup_by_id_ignores_case() {
        let claims = registry();
        assert!(find_by_id(&claims, "fra20240004").is_some());
        assert!(find_by_id(&claims, "FRA20249999").is_none());
    }
}
