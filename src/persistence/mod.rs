//! Persistence layer for settings and app data

mod store;

pub use store::{Store, TaskItem};
