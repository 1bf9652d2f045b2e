//! fra-atlas: annotate, filter, and summarize Forest Rights Act claim data.

use anyhow::Context;
use chrono::{Datelike, Utc};
use clap::{Args, Parser, Subcommand};
use fra_atlas_core::{
    AreaBucket, ClaimFilter, ClaimStatus, ClaimType, DateRange, OutsideBoundaryPolicy,
    RegistryQuery, SortField, SortOrder, Summary, aggregate, find_by_id, next_claim_id,
};
use fra_atlas_sync::{AtlasClient, Snapshot};
use std::path::PathBuf;

mod display;
mod seed;

#[derive(Parser)]
#[command(name = "fra-atlas", version)]
#[command(about = "Forest Rights Act claims atlas: annotate, filter, and summarize claim data")]
struct Cli {
    /// Use the bundled Mandla demo data.
    #[arg(long, global = true, conflicts_with_all = ["data_dir", "base_url"])]
    demo: bool,

    /// Directory holding boundary.geojson and claims.json.
    #[arg(
        long,
        global = true,
        env = "FRA_ATLAS_DATA_DIR",
        value_name = "DIR",
        conflicts_with = "base_url"
    )]
    data_dir: Option<PathBuf>,

    /// Base URL of an atlas data host, e.g. http://localhost:4000.
    #[arg(long, global = true, env = "FRA_ATLAS_BASE_URL", value_name = "URL")]
    base_url: Option<String>,

    /// Emit JSON instead of tables.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct FilterArgs {
    /// Filter by state.
    #[arg(long)]
    state: Option<String>,

    /// Filter by district.
    #[arg(long)]
    district: Option<String>,

    /// Filter by claim type: individual, community, or habitat.
    #[arg(long)]
    claim_type: Option<String>,

    /// Filter by status: submitted, review (or pending), approved, rejected, or appeal.
    #[arg(long)]
    status: Option<String>,

    /// Filter by area bucket: small, medium, or large.
    #[arg(long)]
    area: Option<String>,

    /// Submission window: all, last30, last90, or lastYear.
    #[arg(long, default_value = "all")]
    date_range: String,

    /// Out-of-boundary claims: include, exclude, or exclude-with-geographic.
    #[arg(long, default_value = "exclude-with-geographic")]
    boundary_policy: String,
}

impl FilterArgs {
    fn to_filter(&self) -> anyhow::Result<ClaimFilter> {
        Ok(ClaimFilter {
            state: self.state.clone(),
            district: self.district.clone(),
            claim_type: self.claim_type.as_deref().map(ClaimType::parse).transpose()?,
            status: self.status.as_deref().map(ClaimStatus::parse).transpose()?,
            area: self.area.as_deref().map(AreaBucket::parse).transpose()?,
            date_range: DateRange::parse(&self.date_range)?,
            outside_boundary: OutsideBoundaryPolicy::parse(&self.boundary_policy)?,
        })
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Annotate claims and list them with their flags.
    Annotate {
        #[command(flatten)]
        filter: FilterArgs,

        /// Only claims carrying at least one flag.
        #[arg(long)]
        flagged_only: bool,
    },

    /// Totals, status breakdown, per-state counts, and the monthly series.
    Summary {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Search, sort, and page through the claim registry.
    Claims {
        /// Substring over claim id and claimant name.
        #[arg(long)]
        search: Option<String>,

        /// Filter by status.
        #[arg(long)]
        status: Option<String>,

        /// Substring over village, district, and state.
        #[arg(long)]
        region: Option<String>,

        /// Sort column: id, claimant, village, area, status, or date.
        #[arg(long, default_value = "id")]
        sort: String,

        /// asc or desc.
        #[arg(long, default_value = "asc")]
        order: String,

        #[arg(long, default_value_t = 1)]
        page: usize,

        #[arg(long, default_value_t = fra_atlas_core::query::DEFAULT_PER_PAGE)]
        per_page: usize,
    },

    /// Show one claim as a card.
    Show {
        /// Claim id, e.g. FRA20240001.
        id: String,
    },

    /// Next free claim id for a submission year.
    NextId {
        /// Defaults to the current year.
        #[arg(long)]
        year: Option<i32>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    tracing::info!("fra-atlas v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    let snapshot = load_snapshot(&cli).await?;
    run(&cli, &snapshot)
}

async fn load_snapshot(cli: &Cli) -> anyhow::Result<Snapshot> {
    if cli.demo {
        return seed::demo_snapshot();
    }
    if let Some(dir) = &cli.data_dir {
        return fra_atlas_sync::load_dir(dir)
            .with_context(|| format!("load data from {}", dir.display()));
    }
    if let Some(url) = &cli.base_url {
        let client = AtlasClient::new(url.clone());
        return client
            .fetch_snapshot()
            .await
            .with_context(|| format!("fetch data from {url}"));
    }
    anyhow::bail!("choose a data source: --demo, --data-dir <DIR>, or --base-url <URL>")
}

fn run(cli: &Cli, snapshot: &Snapshot) -> anyhow::Result<()> {
    let annotated = snapshot.annotate();
    let now = Utc::now();

    match &cli.command {
        Commands::Annotate { filter, flagged_only } => {
            let filter = filter.to_filter()?;
            let mut claims = filter.apply(&annotated, now);
            if *flagged_only {
                claims.retain(|claim| !claim.flags.is_empty());
            }
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&claims)?);
            } else {
                display::print_claims_table(&claims);
                display::print_totals(&aggregate(&claims));
            }
        }
        Commands::Summary { filter } => {
            let filter = filter.to_filter()?;
            let claims = filter.apply(&annotated, now);
            let summary = Summary::collect(&claims);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                display::print_summary(&summary);
            }
        }
        Commands::Claims { search, status, region, sort, order, page, per_page } => {
            let query = RegistryQuery {
                search: search.clone(),
                status: status.as_deref().map(ClaimStatus::parse).transpose()?,
                region: region.clone(),
                sort: SortField::parse(sort)?,
                order: SortOrder::parse(order)?,
                page: *page,
                per_page: *per_page,
            };
            let results = query.run(&annotated);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                display::print_page(&results);
            }
        }
        Commands::Show { id } => {
            let Some(claim) = find_by_id(&annotated, id) else {
                anyhow::bail!("claim {id} not found");
            };
            if cli.json {
                println!("{}", serde_json::to_string_pretty(claim)?);
            } else {
                display::print_claim_card(claim);
            }
        }
        Commands::NextId { year } => {
            let year = year.unwrap_or_else(|| now.year());
            let next = next_claim_id(snapshot.claims.iter().map(|c| c.id.as_str()), year);
            if cli.json {
                println!("{}", serde_json::json!({ "nextId": next }));
            } else {
                println!("{next}");
            }
        }
    }
    Ok(())
}
