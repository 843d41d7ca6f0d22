//! Core types and the community store service for Plaza.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! Storage backends implement [`storage::SnapshotStorage`]; every other
//! crate depends on this one.

pub mod error;
pub mod group;
pub mod interaction;
pub mod profile;
pub mod quota;
pub mod request;
pub mod storage;
pub mod store;
pub mod views;

pub use error::{Error, Result};
pub use store::CommunityStore;

#[cfg(test)]
mod tests;
