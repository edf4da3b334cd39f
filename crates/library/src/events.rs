//! Change notifications published by the library store

use shelfwise_core::{Rating, ReadingStatus};
use tokio::sync::broadcast;

/// Events buffered per subscriber before it starts lagging
pub(crate) const EVENT_CAPACITY: usize = 256;

/// A change that has been applied to the store and persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LibraryEvent {
    Added { key: String },
    Removed { key: String },
    StatusChanged { key: String, status: ReadingStatus },
    RatingChanged { key: String, rating: Rating },
    SummaryToggled { work_key: String, open: bool },
    SummaryLoading { work_key: String },
    SummaryLoaded { work_key: String },
}

pub(crate) fn channel() -> broadcast::Sender<LibraryEvent> {
    let (sender, _) = broadcast::channel(EVENT_CAPACITY);
    sender
}
