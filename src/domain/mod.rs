//! Domain layer for gourmet.
//!
//! Core types independent of the terminal, network and storage layers.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`shop`]: Shop listing model and coupon URL resolution
//!
//! # Examples
//!
//! ```
//! use gourmet::domain::{CouponUrls, Shop};
//!
//! let shop = Shop::new("J001", "Ramen Taro", "Tokyo", "", CouponUrls::default());
//! assert!(shop.coupon_url().is_none());
//! ```

pub mod error;
pub mod shop;

pub use error::{FetchError, GourmetError, Result};
pub use shop::{time_ago, CouponUrls, Shop};
