//! Table, card, and summary rendering for annotated claims.
//!
//! Cards group fields into sections and skip absent values; tables keep
//! fixed-width columns so flag codes line up down the right edge.

use fra_atlas_core::{
    AnnotatedClaim, ClaimPage, Flag, Summary, Totals, format_distance_km,
};

const MAX_LIST_ITEMS: usize = 10;

// ── Tables ──

/// Print claims as a fixed-width table, one row per claim.
pub fn print_claims_table(claims: &[AnnotatedClaim]) {
    if claims.is_empty() {
        println!("no claims matched");
        return;
    }
    println!(
        "{:<13} {:<14} {:<11} {:<10} {:>8} {:<12} {}",
        "ID", "VILLAGE", "TYPE", "STATUS", "AREA", "FILED", "FLAGS"
    );
    for annotated in claims {
        let claim = &annotated.claim;
        let mut flags = if annotated.flags.is_empty() {
            "-".to_string()
        } else {
            annotated
                .flags
                .iter()
                .map(Flag::code)
                .collect::<Vec<_>>()
                .join(",")
        };
        if annotated.needs_attention() {
            flags.push_str(" [attention]");
        }
        println!(
            "{:<13} {:<14} {:<11} {:<10} {:>8} {:<12} {}",
            claim.id,
            truncate(&claim.village, 14),
            claim.claim_type,
            claim.current_status(),
            format_area(claim.area_hectares),
            claim.submission_date.to_string(),
            flags
        );
    }
}

/// One-line rollup under a table, in the portal tooltip's wording.
pub fn print_totals(totals: &Totals) {
    println!();
    println!(
        "{} claims, {} approved ({:.1}%), {} under claim, {} households",
        totals.total_claims,
        totals.approved,
        totals.approval_rate(),
        format_area(totals.total_area),
        totals.households
    );
}

/// Table page plus paging bookkeeping.
pub fn print_page(page: &ClaimPage) {
    print_claims_table(&page.items);
    println!();
    println!(
        "page {} of {} ({} claims)",
        page.page, page.total_pages, page.total
    );
}

// ── Single-claim card ──

/// Print one claim as a vertical card grouped by section.
pub fn print_claim_card(annotated: &AnnotatedClaim) {
    let claim = &annotated.claim;

    println!("=== {} ===", claim.id);
    if let Some(name) = &claim.claimant_name {
        println!("{name}");
    }
    println!();

    println!("Identity");
    field("village", &claim.village);
    field("district", &claim.district);
    field("state", &claim.state);
    println!();

    println!("Claim");
    field("type", claim.claim_type);
    field("status", claim.current_status());
    field(
        "area",
        format!("{} ({})", format_area(claim.area_hectares), claim.area_bucket()),
    );
    if let Some(households) = claim.households {
        field("households", households);
    }
    field("submitted", claim.submission_date);
    if let Some(remarks) = &claim.remarks {
        field("remarks", remarks);
    }
    println!();

    println!("Location");
    match (claim.latitude, claim.longitude) {
        (Some(lat), Some(lon)) => {
            field("latitude", format!("{lat:.4}"));
            field("longitude", format!("{lon:.4}"));
        }
        _ => field("coordinates", "(missing)"),
    }
    match annotated.nearest_neighbor_km.and_then(format_distance_km) {
        Some(label) => field("nearest neighbor", label),
        None => field("nearest neighbor", "-"),
    }
    println!();

    if !annotated.flags.is_empty() {
        println!("Flags ({}):", annotated.flags.len());
        for flag in &annotated.flags {
            println!("  [{}] {}", flag.severity(), flag.message());
        }
        if annotated.needs_attention() {
            println!("  approved claim with open flags, needs attention");
        }
        println!();
    }

    if !claim.history.is_empty() {
        println!("History ({}):", claim.history.len());
        for event in &claim.history {
            print!("  {}  {:<10}", event.date, event.status);
            if let Some(note) = &event.note {
                print!(" {note}");
            }
            if let Some(actor) = &event.changed_by {
                print!(" ({actor})");
            }
            println!();
        }
        println!();
    }
}

// ── Summary ──

/// Print the full summary: totals, breakdowns, and the monthly series.
pub fn print_summary(summary: &Summary) {
    println!("Totals");
    field("claims", summary.totals.total_claims);
    field("approved", summary.totals.approved);
    field("approval rate", format!("{:.1}%", summary.approval_rate));
    field("area under claims", format_area(summary.totals.total_area));
    field("households", summary.totals.households);
    field("flagged", summary.flagged);
    field("needs attention", summary.needs_attention);
    println!();

    println!("Status");
    for (status, count) in &summary.status_breakdown {
        field(status.as_str(), count);
    }
    println!();

    println!("Claims by state");
    for (state, count) in summary.claims_by_state.iter().take(MAX_LIST_ITEMS) {
        field(state, count);
    }
    if summary.claims_by_state.len() > MAX_LIST_ITEMS {
        println!("    ... and {} more", summary.claims_by_state.len() - MAX_LIST_ITEMS);
    }
    println!();

    if !summary.monthly.is_empty() {
        println!("Monthly submissions");
        for month in &summary.monthly {
            println!(
                "  {:<9} filed {:<4} approved {:<4} review {:<4} rejected {}",
                month.month, month.filed, month.approved, month.review, month.rejected
            );
        }
        println!();
    }
}

// ── Helpers ──

fn field(name: &str, value: impl std::fmt::Display) {
    println!("  {:<26} {}", name, value);
}

fn format_area(hectares: f64) -> String {
    format!("{hectares:.1} ha")
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let cut: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{cut}...")
    } else {
        text.to_string()
    }
}
