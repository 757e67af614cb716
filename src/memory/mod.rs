//! Bounded replay of examples the network has struggled with.
//!
//! Stored memories are retrained once per `ruminate` call; those the network
//! keeps answering correctly build up a success streak and are the first to
//! be overwritten when a new memory arrives at capacity. Slow-to-learn
//! examples therefore stay resident longer, which specialises the network on
//! its hardest cases in the manner of boosting.

pub mod memory;
pub mod store;

pub use memory::Memory;
pub use store::{Learner, MemoryStore, Rumination};
