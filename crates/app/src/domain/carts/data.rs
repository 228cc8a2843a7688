//! Cart Data

use crate::domain::products::records::ProductUuid;

/// New Cart Item Data
///
/// Adding a product already in the cart increases that line's quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewCartItem {
    pub product_uuid: ProductUuid,
    pub quantity: u32,
}
