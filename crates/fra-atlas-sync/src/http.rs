//! HTTP client for pulling boundary and claims data from an atlas data host.

use crate::snapshot::Snapshot;
use fra_atlas_core::boundary::{BoundaryError, BoundarySet};
use fra_atlas_core::claim::Claim;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {body}")]
    Server { status: u16, body: String },
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("boundary parse error: {0}")]
    Boundary(#[from] BoundaryError),
}

/// Client for the two static data endpoints an atlas host serves.
pub struct AtlasClient {
    client: reqwest::Client,
    base_url: String,
}

impl AtlasClient {
    /// Create a client for the given base URL.
    ///
    /// `base_url` should be like `http://localhost:4000` (no trailing slash).
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch and parse `<base>/data/boundary.geojson`.
    pub async fn fetch_boundary(&self) -> Result<BoundarySet, FetchError> {
        let url = format!("{}/data/boundary.geojson", self.base_url);
        info!(url = %url, "fetching boundary");
        let body = self.get_text(&url).await?;
        let boundary = BoundarySet::from_geojson(&body)?;
        info!(features = boundary.len(), "fetched boundary");
        Ok(boundary)
    }

    /// Fetch and parse `<base>/data/claims.json`.
    pub async fn fetch_claims(&self) -> Result<Vec<Claim>, FetchError> {
        let url = format!("{}/data/claims.json", self.base_url);
        info!(url = %url, "fetching claims");
        let body = self.get_text(&url).await?;
        let claims: Vec<Claim> = serde_json::from_str(&body)?;
        info!(count = claims.len(), "fetched claims");
        Ok(claims)
    }

    /// Pull both data files concurrently and wait for the pair.
    ///
    /// Either failure fails the whole load; there is no retry.
    pub async fn fetch_snapshot(&self) -> Result<Snapshot, FetchError> {
        let (boundary, claims) = futures::try_join!(self.fetch_boundary(), self.fetch_claims())?;
        Ok(Snapshot { boundary, claims })
    }

    async fn get_text(&self, url: &str) -> Result<String, FetchError> {
        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(FetchError::Server { status: status.as_u16(), body });
        }
        Ok(resp.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_trims_trailing_slash() {
        let client = AtlasClient::new("http://localhost:4000/".into());
        assert_eq!(client.base_url, "http://localhost:4000");
    }

    #[test]
    fn claims_endpoint_shape_parses() {
        let body = r#"[
            {
                "id": "FRA20240001",
                "village": "Bichhiya",
                "district": "mandla",
                "state": "madhyaPradesh",
                "claimType": "individual",
                "status": "approved",
                "areaHectares": 2.4,
                "households": 6,
                "submissionDate": "2024-06-02",
                "latitude": 22.61,
                "longitude": 80.38
            },
            {
                "id": "FRA20240002",
                "village": "Nainpur",
                "district": "mandla",
                "state": "madhyaPradesh",
                "claimType": "community",
                "status": "pending",
                "areaHectares": 12.0,
                "submissionDate": "2024-07-15"
            }
        ]"#;
        let claims: Vec<Claim> = serde_json::from_str(body).unwrap();
        assert_eq!(claims.len(), 2);
        assert_eq!(claims[0].id, "FRA20240001");
        assert_eq!(claims[1].latitude, None);
    }

    #[test]
    fn malformed_claims_body_is_a_json_error() {
        let err = serde_json::from_str::<Vec<Claim>>(r#"{"items": []}"#)
            .map_err(FetchError::from)
            .unwrap_err();
        assert!(matches!(err, FetchError::Json(_)));
    }
}
