//! Instance metadata lookup.
//!
//! Behind a load balancer, health checks reach the instance by its private
//! address, so that address has to be on the host allow-list.

use std::net::Ipv4Addr;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

use super::constants::INSTANCE_METADATA_TIMEOUT_MS;

/// Metadata lookup failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MetadataError {
    /// Connection refused, DNS failure or timeout (not running on a cloud instance)
    #[error("metadata service unreachable: {0}")]
    Unreachable(String),

    #[error("metadata service returned HTTP {0}")]
    UnexpectedStatus(u16),

    #[error("metadata service returned {0:?}, expected an IPv4 address")]
    InvalidAddress(String),
}

/// Source of the instance's private address.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait InstanceMetadata: Send + Sync {
    /// Private IPv4 address of the running instance.
    async fn local_ipv4(&self) -> Result<String, MetadataError>;
}

/// EC2-style metadata endpoint client.
#[derive(Debug, Clone)]
pub struct Ec2InstanceMetadata {
    client: reqwest::Client,
    url: String,
}

impl Ec2InstanceMetadata {
    /// Client for the given endpoint URL, bounded by the lookup timeout.
    pub fn new(url: impl Into<String>) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(INSTANCE_METADATA_TIMEOUT_MS))
            .build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl InstanceMetadata for Ec2InstanceMetadata {
    async fn local_ipv4(&self) -> Result<String, MetadataError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| MetadataError::Unreachable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(MetadataError::UnexpectedStatus(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| MetadataError::Unreachable(e.to_string()))?;

        parse_ipv4(&body)
    }
}

/// Validate a metadata response body as a bare IPv4 address.
pub fn parse_ipv4(body: &str) -> Result<String, MetadataError> {
    let trimmed = body.trim();
    trimmed
        .parse::<Ipv4Addr>()
        .map(|ip| ip.to_string())
        .map_err(|_| MetadataError::InvalidAddress(trimmed.to_string()))
}
