//! Messages sent from fetch tasks back to the UI loop.

use crate::app::Event;
use crate::domain::{FetchError, Shop};

/// Completion of one fetch task.
///
/// Aborted tasks send nothing; their generation is simply never answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerResponse {
    PageLoaded {
        generation: u64,
        append: bool,
        result: Result<Vec<Shop>, FetchError>,
    },
}

impl WorkerResponse {
    /// Generation of the request this response answers.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        match self {
            Self::PageLoaded { generation, .. } => *generation,
        }
    }
}

impl From<WorkerResponse> for Event {
    fn from(response: WorkerResponse) -> Self {
        match response {
            WorkerResponse::PageLoaded {
                generation,
                append,
                result,
            } => Self::PageLoaded {
                generation,
                append,
                result,
            },
        }
    }
}
