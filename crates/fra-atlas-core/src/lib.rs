pub mod annotate;
pub mod boundary;
pub mod claim;
pub mod filter;
pub mod flag;
pub mod geometry;
pub mod query;
pub mod stats;

pub use annotate::{AnnotatedClaim, NEARBY_THRESHOLD_KM, annotate};
pub use boundary::{BoundaryError, BoundaryFeature, BoundarySet};
pub use claim::{AreaBucket, Claim, ClaimStatus, ClaimType, StatusEvent, next_claim_id};
pub use filter::{ClaimFilter, DateRange, OutsideBoundaryPolicy, Totals, aggregate};
pub use flag::{Flag, Severity, format_distance_km};
pub use query::{ClaimPage, RegistryQuery, SortField, SortOrder, find_by_id};
pub use stats::{MonthlyCount, Summary};
