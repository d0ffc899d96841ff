//! Side effects produced by the event handler.
//!
//! [`handle_event`](crate::app::handle_event) only mutates state; anything
//! touching the network, the favorites file or other processes comes back as
//! an [`Action`] for the runtime to execute, in order.

use crate::app::pagination::FetchRequest;
use crate::domain::Shop;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Spawn a page fetch on the worker.
    StartFetch(FetchRequest),

    /// Abort the fetch tagged with `generation`, if it is still running.
    CancelFetch { generation: u64 },

    /// Add the shop to favorites, or remove it if it is already stored.
    ToggleFavorite(Shop),

    /// Remove a stored favorite.
    RemoveFavorite { id: String },

    /// Hand a coupon URL to the browser.
    OpenCoupon { url: String },

    Quit,
}
