//! Background fetching.
//!
//! - `messages`: responses posted from fetch tasks to the UI loop
//! - `handler`: the [`FetchWorker`] that spawns and cancels fetch tasks

pub mod handler;
pub mod messages;

pub use handler::{fetch_with_timeout, FetchWorker, DEFAULT_TIMEOUT};
pub use messages::WorkerResponse;
