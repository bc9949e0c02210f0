// src/source.rs
//! Program sources: where the view loader gets its records from

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use tracing::{debug, info};
use url::Url;

use crate::config::EndpointConfig;
use crate::types::{ImportPayload, Program};

/// Source of program records
#[async_trait]
pub trait ProgramSource: Send + Sync {
    /// Human readable name used in logs
    fn name(&self) -> &str;

    /// Fetch the full list of programs
    async fn fetch_programs(&self) -> Result<Vec<Program>>;
}

/// HTTP client for the program import endpoint (`GET /hackerone/import`)
pub struct ImportEndpoint {
    client: reqwest::Client,
    url: Url,
}

impl ImportEndpoint {
    /// Create a client from endpoint settings
    pub fn new(config: &EndpointConfig) -> Result<Self> {
        let base = Url::parse(&config.base_url)
            .with_context(|| format!("Invalid endpoint base URL: {}", config.base_url))?;
        let url = base
            .join(&config.import_path)
            .with_context(|| format!("Invalid import path: {}", config.import_path))?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self { client, url })
    }

    /// Full URL that will be requested
    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl ProgramSource for ImportEndpoint {
    fn name(&self) -> &str {
        "import endpoint"
    }

    async fn fetch_programs(&self) -> Result<Vec<Program>> {
        info!("Fetching programs from {}", self.url);

        let response = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .context("Failed to send request to import endpoint")?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!(
                "Import endpoint returned error: {} - {}",
                status,
                response.text().await.unwrap_or_default()
            );
        }

        let body = response
            .bytes()
            .await
            .context("Failed to read import endpoint response")?;
        debug!("Received {} bytes from import endpoint", body.len());

        let payload: ImportPayload = serde_json::from_slice(&body)
            .context("Failed to parse import endpoint response")?;
        let programs = payload.into_programs();

        info!("Found {} programs", programs.len());
        Ok(programs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url_from_config() {
        let endpoint = ImportEndpoint::new(&EndpointConfig::default()).unwrap();
        assert_eq!(endpoint.url().as_str(), "http://127.0.0.1:8000/hackerone/import");
    }

    #[test]
    fn test_endpoint_custom_path_and_timeout() {
        let config = EndpointConfig {
            base_url: "https://scope.internal:9443/api/".to_string(),
            import_path: "h1/import".to_string(),
            timeout_secs: Some(5),
        };

        let endpoint = ImportEndpoint::new(&config).unwrap();
        assert_eq!(endpoint.url().as_str(), "https://scope.internal:9443/api/h1/import");
        assert_eq!(endpoint.name(), "import endpoint");
    }

    #[test]
    fn test_endpoint_invalid_base_url() {
        let config = EndpointConfig {
            base_url: "not a url".to_string(),
            ..Default::default()
        };

        assert!(ImportEndpoint::new(&config).is_err());
    }
}
