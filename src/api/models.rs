//! Wire models for the gourmet search API.
//!
//! These mirror the JSON payload returned with `format=json`. Only the fields
//! the application uses are decoded; everything else is ignored. A logical
//! error comes back with HTTP 200 and a `results.error` array instead of
//! `results.shop`.
//!
//! ```json
//! {
//!   "results": {
//!     "api_version": "1.26",
//!     "results_available": 2113,
//!     "results_returned": "20",
//!     "results_start": 1,
//!     "shop": [
//!       {
//!         "id": "J001246910",
//!         "name": "Ramen Taro",
//!         "address": "Tokyo, Shibuya 1-2-3",
//!         "logo_image": "https://imgfp.hotp.jp/logo.jpg",
//!         "genre": { "name": "ラーメン" },
//!         "catch": "Rich tonkotsu",
//!         "access": "3 min from Shibuya station",
//!         "coupon_urls": { "pc": "https://hotpepper.jp/strJ001/map/", "sp": "" }
//!       }
//!     ]
//!   }
//! }
//! ```

use crate::domain::{CouponUrls, FetchError, Shop};
use serde::Deserialize;

/// Top-level response envelope.
#[derive(Debug, Deserialize)]
pub struct ApiResponse {
    pub results: ApiResults,
}

/// The `results` object: either a page of shops or an error list.
#[derive(Debug, Default, Deserialize)]
pub struct ApiResults {
    #[serde(default)]
    pub shop: Vec<ApiShop>,

    #[serde(default)]
    pub error: Vec<ApiErrorEntry>,
}

/// A shop entry as the API returns it.
#[derive(Debug, Deserialize)]
pub struct ApiShop {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub logo_image: String,
    #[serde(default)]
    pub coupon_urls: CouponUrls,
    #[serde(default)]
    pub genre: Option<ApiGenre>,
    #[serde(default)]
    pub catch: Option<String>,
    #[serde(default)]
    pub access: Option<String>,
}

/// Genre sub-object; only the display name is used.
#[derive(Debug, Deserialize)]
pub struct ApiGenre {
    #[serde(default)]
    pub name: String,
}

/// One entry of `results.error`.
#[derive(Debug, Deserialize)]
pub struct ApiErrorEntry {
    pub code: i64,
    #[serde(default)]
    pub message: String,
}

impl From<ApiShop> for Shop {
    fn from(raw: ApiShop) -> Self {
        let non_empty = |s: Option<String>| s.filter(|v| !v.is_empty());
        Self {
            id: raw.id,
            name: raw.name,
            address: raw.address,
            logo_image: raw.logo_image,
            coupon_urls: raw.coupon_urls,
            genre: non_empty(raw.genre.map(|g| g.name)),
            catch: non_empty(raw.catch),
            access: non_empty(raw.access),
        }
    }
}

/// Decodes one response body into shops.
///
/// An empty `shop` array is a valid, empty page.
///
/// # Errors
///
/// - [`FetchError::Decode`] if the body is not the expected JSON shape
/// - [`FetchError::Api`] if the payload carries an error entry
pub fn decode_page(body: &str) -> Result<Vec<Shop>, FetchError> {
    let response: ApiResponse =
        serde_json::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))?;

    if let Some(first) = response.results.error.into_iter().next() {
        return Err(FetchError::Api {
            code: first.code,
            message: first.message,
        });
    }

    Ok(response.results.shop.into_iter().map(Shop::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_shop_page() {
        let body = r#"{
            "results": {
                "api_version": "1.26",
                "results_available": 2,
                "results_returned": "2",
                "results_start": 1,
                "shop": [
                    {
                        "id": "J001",
                        "name": "Ramen Taro",
                        "address": "Shibuya",
                        "logo_image": "https://img/logo1.jpg",
                        "genre": { "name": "Ramen", "code": "G013" },
                        "catch": "",
                        "coupon_urls": { "pc": "https://pc/1", "sp": "https://sp/1" }
                    },
                    {
                        "id": "J002",
                        "name": "Sushi Hana",
                        "address": "Ginza",
                        "logo_image": "https://img/logo2.jpg",
                        "coupon_urls": { "pc": "https://pc/2", "sp": "" }
                    }
                ]
            }
        }"#;

        let shops = decode_page(body).unwrap();
        assert_eq!(shops.len(), 2);
        assert_eq!(shops[0].id, "J001");
        assert_eq!(shops[0].genre.as_deref(), Some("Ramen"));
        assert_eq!(shops[0].catch, None);
        assert_eq!(shops[1].coupon_url(), Some("https://pc/2"));
    }

    #[test]
    fn empty_shop_list_is_a_valid_page() {
        let body = r#"{"results":{"api_version":"1.26","results_available":0,"shop":[]}}"#;
        assert!(decode_page(body).unwrap().is_empty());
    }

    #[test]
    fn error_payload_becomes_api_error() {
        let body = r#"{"results":{"api_version":"1.30","error":[{"code":2000,"message":"invalid key"}]}}"#;
        assert_eq!(
            decode_page(body),
            Err(FetchError::Api {
                code: 2000,
                message: "invalid key".to_string()
            })
        );
    }

    #[test]
    fn malformed_body_is_decode_error() {
        assert!(matches!(decode_page("<html>"), Err(FetchError::Decode(_))));
    }
}
