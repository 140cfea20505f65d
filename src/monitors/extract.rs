use std::fmt::Display;

use crate::monitors::payload::AvailabilityPayload;
use crate::monitors::TrackedItem;

/// A part that can be picked up at a store right now
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityLine {
    pub title: String,
    pub store: String,
}

impl Display for AvailabilityLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "商品「{}」在「{}」可供訂購", self.title, self.store)
    }
}

/// Yield every available (store, title) pair of `payload` for `item`.
///
/// Stores are visited in payload order. A fulfillment URL reports every available part of a
/// store; a part number only looks at the entry keyed by that part.
pub fn availability_lines<'a>(
    payload: &'a AvailabilityPayload,
    item: &'a TrackedItem,
) -> impl Iterator<Item = AvailabilityLine> + 'a {
    payload.stores().iter().flat_map(move |store| {
        let parts: Vec<_> = match item {
            TrackedItem::FulfillmentUrl(_) => store
                .parts_availability
                .iter()
                .map(|(_, availability)| availability)
                .collect(),
            TrackedItem::PartNumber(part) => store.part(part).into_iter().collect(),
        };

        parts
            .into_iter()
            .filter(|availability| availability.is_available())
            .map(move |availability| AvailabilityLine {
                title: availability.store_pickup_product_title.clone(),
                store: store.store_name.clone(),
            })
    })
}
