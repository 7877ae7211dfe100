//! Test helpers shared across Lexi crates.

pub mod cache;
pub mod fixtures;
pub mod store;

pub use cache::BrokenCache;
pub use fixtures::{EntryBuilder, entry};
pub use store::StubStore;
