use log::debug;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Decoded fulfillment-messages response.
///
/// Every field decodes leniently: `null` or a value of the wrong type leaves that field at its
/// default and the rest of the response is still read.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AvailabilityPayload {
    #[serde(deserialize_with = "or_default")]
    pub head: Head,
    #[serde(deserialize_with = "or_default")]
    pub body: Body,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Head {
    #[serde(deserialize_with = "or_default")]
    pub status: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Body {
    #[serde(deserialize_with = "or_default")]
    pub content: Content,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Content {
    #[serde(deserialize_with = "or_default")]
    pub pickup_message: PickupMessage,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PickupMessage {
    #[serde(deserialize_with = "each_or_default")]
    pub stores: Vec<StoreEntry>,
}

/// One store and the availability of every part it reports on
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StoreEntry {
    #[serde(deserialize_with = "or_default")]
    pub store_name: String,
    /// Part number to availability, in payload order
    #[serde(deserialize_with = "ordered_parts")]
    pub parts_availability: Vec<(String, PartAvailability)>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PartAvailability {
    #[serde(deserialize_with = "or_default")]
    pub store_pickup_product_title: String,
    #[serde(rename = "pickupDisplay", deserialize_with = "or_default")]
    pub pickup_status: PickupStatus,
}

/// Pickup status of a part; only the literal `available` marker counts
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum PickupStatus {
    Available,
    #[default]
    Other,
}

impl From<String> for PickupStatus {
    fn from(value: String) -> Self {
        if value == "available" {
            PickupStatus::Available
        } else {
            PickupStatus::Other
        }
    }
}

impl AvailabilityPayload {
    /// Decode a response body. Only a body that is not a JSON object at all yields a payload with
    /// no stores; bad fields inside a valid body fall back to their defaults one by one.
    pub fn decode_lenient(bytes: &[u8]) -> Self {
        match serde_json::from_slice(bytes) {
            Ok(payload) => payload,
            Err(e) => {
                debug!("Ignoring undecodable availability payload: {}", e);
                AvailabilityPayload::default()
            }
        }
    }

    pub fn status(&self) -> &str {
        &self.head.status
    }

    pub fn stores(&self) -> &[StoreEntry] {
        &self.body.content.pickup_message.stores
    }
}

impl StoreEntry {
    /// Availability entry keyed by `part`, if the store reports one
    pub fn part(&self, part: &str) -> Option<&PartAvailability> {
        self.parts_availability
            .iter()
            .find(|(key, _)| key == part)
            .map(|(_, availability)| availability)
    }
}

impl PartAvailability {
    pub fn is_available(&self) -> bool {
        self.pickup_status == PickupStatus::Available
    }
}

/// Decode `value` as `T`, falling back to `T::default()` when it has the wrong shape
fn from_value_or_default<T>(value: Value) -> T
where
    T: DeserializeOwned + Default,
{
    T::deserialize(value).unwrap_or_else(|e| {
        debug!("Ignoring malformed payload field: {}", e);
        T::default()
    })
}

fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(from_value_or_default(Value::deserialize(deserializer)?))
}

/// Decode every array element on its own so one bad store does not hide the others
fn each_or_default<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items.into_iter().map(from_value_or_default).collect(),
        _ => Vec::new(),
    })
}

/// Keep `partsAvailability` entries in the order the retailer sent them
fn ordered_parts<'de, D>(deserializer: D) -> Result<Vec<(String, PartAvailability)>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Object(parts) => parts
            .into_iter()
            .map(|(key, value)| (key, from_value_or_default(value)))
            .collect(),
        _ => Vec::new(),
    })
}
