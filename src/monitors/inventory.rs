use log::debug;
use reqwest::{Client, Url};
use thiserror::Error;

use crate::monitors::payload::AvailabilityPayload;
use crate::monitors::TrackedItem;
use crate::utils::unix_millis;

/// Store-location code sent with every inventory query
pub const LOCATION: &str = "11061";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid fulfillment URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("fulfillment request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Retrieves pickup availability from the retailer's fulfillment endpoint
pub struct InventoryFetcher {
    /// Endpoint queried for part-number items
    fulfillment_endpoint: String,
    /// HTTP client
    client: Client,
}

impl InventoryFetcher {
    pub fn new(fulfillment_endpoint: &str) -> Self {
        Self {
            fulfillment_endpoint: fulfillment_endpoint.to_string(),
            client: Client::new(),
        }
    }

    /// Build the query URL for `item` with `timestamp_ms` as cache buster
    pub fn build_url(&self, item: &TrackedItem, timestamp_ms: i64) -> Result<Url, FetchError> {
        let base = match item {
            TrackedItem::FulfillmentUrl(url) => url.as_str(),
            TrackedItem::PartNumber(_) => self.fulfillment_endpoint.as_str(),
        };

        let mut url = Url::parse(base).map_err(|e| FetchError::InvalidUrl {
            url: base.to_string(),
            reason: e.to_string(),
        })?;

        {
            let mut query = url.query_pairs_mut();
            if let TrackedItem::PartNumber(part) = item {
                query
                    .append_pair("parts.0", part)
                    .append_pair("mt", "regular")
                    .append_pair("option.0", "");
            }
            query
                .append_pair("location", LOCATION)
                .append_pair("_", &timestamp_ms.to_string());
        }

        Ok(url)
    }

    /// Fetch and decode the availability payload for `item`.
    ///
    /// Only transport failures are errors. Any body that does not decode, whatever the status
    /// code, yields an empty payload.
    pub async fn fetch(&self, item: &TrackedItem) -> Result<AvailabilityPayload, FetchError> {
        let url = self.build_url(item, unix_millis())?;
        debug!("Requesting {}", url);

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            debug!("Fulfillment endpoint returned status code {} for {}", status, item);
        }

        let bytes = response.bytes().await?;
        let payload = AvailabilityPayload::decode_lenient(&bytes);
        debug!(
            "Fulfillment response: {} bytes, status \"{}\", {} store(s)",
            bytes.len(),
            payload.status(),
            payload.stores().len()
        );

        Ok(payload)
    }
}
