//! Shop domain model.
//!
//! A [`Shop`] is one restaurant listing returned by the gourmet directory API.
//! Shops are transient: a fresh search replaces the whole list, pagination
//! appends to it and a failed fetch clears it. Whether a shop is a favorite is
//! not stored here; it is looked up in the favorites store when rendering.

use serde::{Deserialize, Serialize};

/// Number of seconds in one minute.
const SECONDS_PER_MINUTE: i64 = 60;

/// Number of seconds in one hour.
const SECONDS_PER_HOUR: i64 = 3600;

/// Number of seconds in one day.
const SECONDS_PER_DAY: i64 = 86400;

/// Coupon page URLs for a shop.
///
/// The API returns a desktop (`pc`) and a mobile (`sp`) variant. Either may be
/// an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CouponUrls {
    #[serde(default)]
    pub pc: String,
    #[serde(default)]
    pub sp: String,
}

impl CouponUrls {
    /// Resolves the single URL to open: mobile if non-empty, else desktop.
    ///
    /// Returns `None` when both variants are empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use gourmet::domain::CouponUrls;
    ///
    /// let urls = CouponUrls { pc: "https://pc".into(), sp: String::new() };
    /// assert_eq!(urls.resolve(), Some("https://pc"));
    /// ```
    #[must_use]
    pub fn resolve(&self) -> Option<&str> {
        if !self.sp.is_empty() {
            Some(&self.sp)
        } else if !self.pc.is_empty() {
            Some(&self.pc)
        } else {
            None
        }
    }
}

/// A restaurant listing from one page of search results.
///
/// `id` is unique within a result set and is the key used by the favorites
/// store. The optional `genre`, `catch` and `access` fields are display-only:
/// genre fills the table's tag column, catch and access the CLI detail line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shop {
    pub id: String,
    pub name: String,
    pub address: String,
    pub logo_image: String,
    pub coupon_urls: CouponUrls,
    pub genre: Option<String>,
    pub catch: Option<String>,
    pub access: Option<String>,
}

impl Shop {
    /// Creates a shop with the required fields and no display extras.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        address: impl Into<String>,
        logo_image: impl Into<String>,
        coupon_urls: CouponUrls,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            address: address.into(),
            logo_image: logo_image.into(),
            coupon_urls,
            genre: None,
            catch: None,
            access: None,
        }
    }

    /// The coupon URL that should be opened for this shop, if any.
    #[must_use]
    pub fn coupon_url(&self) -> Option<&str> {
        self.coupon_urls.resolve()
    }
}

/// Formats how long ago `timestamp` was, relative to now.
///
/// - Less than 1 minute: "just now"
/// - Less than 1 hour: "5m ago"
/// - Less than 1 day: "3h ago"
/// - Otherwise: "7d ago"
#[must_use]
pub fn time_ago(timestamp: i64) -> String {
    let now = chrono::Utc::now().timestamp();
    let diff = now - timestamp;

    if diff < SECONDS_PER_MINUTE {
        "just now".to_string()
    } else if diff < SECONDS_PER_HOUR {
        let mins = diff / SECONDS_PER_MINUTE;
        format!("{mins}m ago")
    } else if diff < SECONDS_PER_DAY {
        let hours = diff / SECONDS_PER_HOUR;
        format!("{hours}h ago")
    } else {
        let days = diff / SECONDS_PER_DAY;
        format!("{days}d ago")
    }
}
