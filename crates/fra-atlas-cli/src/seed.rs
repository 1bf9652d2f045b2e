//! Bundled Mandla demo data.
//!
//! A simplified district boundary and ten claims covering the interesting
//! cases: a close pair, an out-of-boundary point, a record with no
//! coordinates, and one claim whose status history has moved past its
//! declared status.

use anyhow::Context;
use fra_atlas_core::{BoundarySet, Claim};
use fra_atlas_sync::Snapshot;

const BOUNDARY: &str = r#"{
    "type": "FeatureCollection",
    "features": [{
        "type": "Feature",
        "properties": {"label": "Mandla", "NAME_1": "Madhya Pradesh", "NAME_2": "Mandla"},
        "geometry": {
            "type": "Polygon",
            "coordinates": [[
                [80.05, 22.20], [81.15, 22.20], [81.15, 23.15], [80.05, 23.15], [80.05, 22.20]
            ]]
        }
    }]
}"#;

const CLAIMS: &str = r#"[
    {
        "id": "FRA20240001",
        "village": "Bichhiya",
        "district": "mandla",
        "state": "madhyaPradesh",
        "claimType": "individual",
        "status": "approved",
        "areaHectares": 1.6,
        "households": 4,
        "submissionDate": "2024-06-02",
        "latitude": 22.61,
        "longitude": 80.38,
        "claimantName": "Ramesh Kumar Dhurvey",
        "remarks": "All documents verified"
    },
    {
        "id": "FRA20240002",
        "village": "Nainpur",
        "district": "mandla",
        "state": "madhyaPradesh",
        "claimType": "community",
        "status": "pending",
        "areaHectares": 4.2,
        "households": 12,
        "submissionDate": "2024-07-15",
        "latitude": 22.43,
        "longitude": 80.11,
        "claimantName": "Sunita Maravi",
        "remarks": "Documents under review"
    },
    {
        "id": "FRA20240003",
        "village": "Ghughri",
        "district": "mandla",
        "state": "madhyaPradesh",
        "claimType": "individual",
        "status": "rejected",
        "areaHectares": 3.2,
        "households": 3,
        "submissionDate": "2024-05-08",
        "latitude": 22.70,
        "longitude": 80.72,
        "claimantName": "Arjun Singh Gond",
        "remarks": "Insufficient evidence"
    },
    {
        "id": "FRA20240004",
        "village": "Mawai",
        "district": "mandla",
        "state": "madhyaPradesh",
        "claimType": "individual",
        "status": "approved",
        "areaHectares": 2.0,
        "households": 5,
        "submissionDate": "2024-04-18",
        "latitude": 22.8,
        "longitude": 80.5,
        "claimantName": "Meera Marko"
    },
    {
        "id": "FRA20240005",
        "village": "Mawai",
        "district": "mandla",
        "state": "madhyaPradesh",
        "claimType": "individual",
        "status": "pending",
        "areaHectares": 1.4,
        "households": 4,
        "submissionDate": "2024-04-22",
        "latitude": 22.80135,
        "longitude": 80.5,
        "claimantName": "Ravi Marko",
        "remarks": "Awaiting field verification"
    },
    {
        "id": "FRA20240006",
        "village": "Niwas",
        "district": "mandla",
        "state": "madhyaPradesh",
        "claimType": "individual",
        "status": "submitted",
        "areaHectares": 2.6,
        "households": 6,
        "submissionDate": "2024-08-05",
        "latitude": 22.85,
        "longitude": 80.28,
        "claimantName": "Kamla Bai Yadav",
        "history": [
            {
                "status": "submitted",
                "note": "Claim submitted via portal",
                "changedBy": "kamla@example.com",
                "date": "2024-08-05"
            },
            {
                "status": "review",
                "note": "Admin initiated review",
                "changedBy": "admin@example.com",
                "date": "2024-08-19"
            }
        ]
    },
    {
        "id": "FRA20240007",
        "village": "Khatia",
        "district": "mandla",
        "state": "madhyaPradesh",
        "claimType": "individual",
        "status": "approved",
        "areaHectares": 2.9,
        "households": 7,
        "submissionDate": "2024-03-11",
        "latitude": 21.9,
        "longitude": 80.6,
        "claimantName": "Budhram Baiga",
        "remarks": "Plot lies near the park buffer"
    },
    {
        "id": "FRA20240008",
        "village": "Narayanganj",
        "district": "mandla",
        "state": "madhyaPradesh",
        "claimType": "individual",
        "status": "submitted",
        "areaHectares": 1.1,
        "households": 2,
        "submissionDate": "2024-09-01",
        "claimantName": "Phoolwati Uikey",
        "remarks": "GPS reading pending"
    },
    {
        "id": "FRA20240009",
        "village": "Baiga Chak",
        "district": "mandla",
        "state": "madhyaPradesh",
        "claimType": "habitat",
        "status": "pending",
        "areaHectares": 8.5,
        "households": 45,
        "submissionDate": "2024-07-28",
        "latitude": 22.95,
        "longitude": 80.85,
        "claimantName": "Baiga Mahapanchayat"
    },
    {
        "id": "FRA20240010",
        "village": "Niwas",
        "district": "mandla",
        "state": "madhyaPradesh",
        "claimType": "community",
        "status": "appeal",
        "areaHectares": 5.8,
        "households": 18,
        "submissionDate": "2024-06-25",
        "latitude": 22.55,
        "longitude": 80.25,
        "claimantName": "Gram Sabha Niwas",
        "remarks": "Appeal filed before SDLC"
    }
]"#;

/// Parse the bundled data into a snapshot.
pub fn demo_snapshot() -> anyhow::Result<Snapshot> {
    let boundary =
        BoundarySet::from_geojson(BOUNDARY).context("parse bundled demo boundary")?;
    let claims: Vec<Claim> =
        serde_json::from_str(CLAIMS).context("parse bundled demo claims")?;
    Ok(Snapshot { boundary, claims })
}
