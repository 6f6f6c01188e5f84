// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod config;
pub mod detector;
pub mod format;
pub mod listing;
pub mod notify;
pub mod pipeline;
pub mod snapshot;
pub mod source;

// ---- Re-exports for stable public API ----
pub use crate::listing::{Listing, ListingKey};
pub use crate::notify::{ChannelSender, DestinationState, Dispatcher, SendError, MAX_RETRIES};
