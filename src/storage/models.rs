//! Storage record models for the favorites store.
//!
//! Records are kept separate from [`Shop`] so the on-disk format only carries
//! what the favorites view needs and does not change when the API adds fields.

use crate::domain::Shop;
use serde::{Deserialize, Serialize};

/// A shop saved as a favorite.
///
/// `coupon_url` is resolved once when the favorite is added: the mobile URL
/// if the shop has one, else the desktop URL, else empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteRecord {
    /// Shop id, the primary key.
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub logo_image: String,

    #[serde(default)]
    pub address: String,

    #[serde(default)]
    pub coupon_url: String,

    /// Unix timestamp when the favorite was added.
    pub created_at: i64,
}

impl FavoriteRecord {
    /// Builds a record from a shop, stamped with the current time.
    ///
    /// # Examples
    ///
    /// ```
    /// use gourmet::domain::{CouponUrls, Shop};
    /// use gourmet::storage::FavoriteRecord;
    ///
    /// let shop = Shop::new(
    ///     "J001",
    ///     "Ramen Taro",
    ///     "Shibuya",
    ///     "",
    ///     CouponUrls { pc: "https://pc".into(), sp: String::new() },
    /// );
    /// let record = FavoriteRecord::from_shop(&shop);
    /// assert_eq!(record.coupon_url, "https://pc");
    /// ```
    #[must_use]
    pub fn from_shop(shop: &Shop) -> Self {
        Self {
            id: shop.id.clone(),
            name: shop.name.clone(),
            logo_image: shop.logo_image.clone(),
            address: shop.address.clone(),
            coupon_url: shop.coupon_url().unwrap_or_default().to_string(),
            created_at: chrono::Utc::now().timestamp(),
        }
    }

    /// The coupon URL, or `None` if the shop had none.
    #[must_use]
    pub fn coupon(&self) -> Option<&str> {
        (!self.coupon_url.is_empty()).then_some(self.coupon_url.as_str())
    }
}
